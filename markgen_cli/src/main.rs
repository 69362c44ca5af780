use std::path::Path;
use std::process;

use clap::ArgMatches;
use clap::CommandFactory;
use clap::FromArgMatches;
use markgen_cli::Commands;
use markgen_cli::GenerateArgs;
use markgen_cli::ListFormat;
use markgen_cli::MarkgenCli;
use markgen_cli::ordered_edits;
use markgen_core::AnyEmptyResult;
use markgen_core::AnyResult;
use markgen_core::Document;
use markgen_core::GenerateOptions;
use markgen_core::MarkgenConfig;
use markgen_core::TokenIndex;
use markgen_core::generate;
use markgen_core::output_path;
use markgen_core::write_output;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let matches = MarkgenCli::command().get_matches();
	let args = MarkgenCli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose, use_color);

	let result = match (&args.command, matches.subcommand()) {
		(Some(Commands::Generate(generate_args)), Some((_, generate_matches))) => {
			run_generate(&args, generate_args, generate_matches)
		}
		(Some(Commands::List { input, format }), _) => run_list(&args, input, *format),
		_ => {
			eprintln!("No subcommand specified. Run `markgen --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<markgen_core::MarkgenError>() {
			Ok(markgen_err) => {
				let report: miette::Report = (*markgen_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };

	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
		)
		.with_ansi(use_color)
		.with_target(false)
		.with_writer(std::io::stderr)
		.init();
}

/// Load `--config` when given, otherwise discover a config file in the
/// directory holding `input`.
fn load_config(args: &MarkgenCli, input: &Path) -> AnyResult<Option<MarkgenConfig>> {
	if let Some(path) = &args.config {
		return Ok(Some(MarkgenConfig::load_from(path)?));
	}

	let root = match input.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};

	Ok(MarkgenConfig::load(root)?)
}

fn run_generate(
	args: &MarkgenCli,
	generate_args: &GenerateArgs,
	matches: &ArgMatches,
) -> AnyEmptyResult {
	let mut config = load_config(args, &generate_args.input)?.unwrap_or_default();

	// Command line flags override the config file.
	if let Some(prefix) = &generate_args.prefix {
		config.pattern.prefix = Some(prefix.clone());
	}
	if let Some(suffix) = &generate_args.suffix {
		config.pattern.suffix = Some(suffix.clone());
	}
	if let Some(license) = &generate_args.license {
		config.output.license = Some(license.clone());
	}
	if let Some(note) = &generate_args.note {
		config.output.note = Some(note.clone());
	}
	if let Some(extension) = &generate_args.extension {
		config.output.extension = Some(extension.clone());
	}
	if generate_args.keep_markers {
		config.output.strip_markers = false;
	}

	let mut edits = std::mem::take(&mut config.edits);
	edits.extend(ordered_edits(matches)?);
	tracing::debug!(
		input = %generate_args.input.display(),
		edits = edits.len(),
		"collected edits"
	);

	let options = GenerateOptions::from_config(Some(&config))?;
	let document = Document::read(&generate_args.input)?;
	let generated = generate(&document, &options, &edits)?;

	if args.verbose {
		for applied in &generated.applied {
			eprintln!(
				"  {} {} ({} occurrence(s))",
				applied.op,
				applied.id,
				applied.occurrences
			);
		}
	}

	if generate_args.diff {
		print_diff(document.text(), &generated.text);
		return Ok(());
	}

	let banner = config.output.banner();

	match &generate_args.output {
		Some(path) => {
			let path = output_path(path, config.output.extension.as_deref());
			write_output(&path, &banner, &generated.text)?;
			println!(
				"{} {} ({} edit(s) applied)",
				colored!("Generated", green),
				path.display(),
				generated.applied.len()
			);
		}
		None => print!("{}", banner.render(&generated.text)),
	}

	Ok(())
}

fn run_list(args: &MarkgenCli, input: &Path, format: ListFormat) -> AnyEmptyResult {
	let config = load_config(args, input)?;
	let options = GenerateOptions::from_config(config.as_ref())?;
	let document = Document::read(input)?;
	let index = TokenIndex::build(&document, &options.pattern)?;

	match format {
		ListFormat::Json => {
			let tokens: Vec<_> = index.iter().collect();
			println!("{}", serde_json::to_string_pretty(&tokens)?);
		}
		ListFormat::Text => {
			if index.is_empty() {
				println!("No markers found.");
				return Ok(());
			}

			println!("{}", colored!("Tokens:", bold));
			for token in index.iter() {
				println!(
					"  {:>4}  {}  {}",
					token.id.get(),
					token.text,
					colored!(format!("(line {})", token.line), yellow)
				);
			}
			println!();
			println!("{} token(s)", index.len());
		}
	}

	Ok(())
}

/// Print a unified diff between two strings, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				print!("{}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				print!("{}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				print!(" {change}");
			}
		}
	}
}
