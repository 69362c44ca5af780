use std::path::PathBuf;

use clap::ArgAction;
use clap::ArgMatches;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use markgen_core::EditRequest;
use markgen_core::MarkgenError;
use markgen_core::MarkgenResult;
use markgen_core::TokenId;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Generate source variants from one file annotated with numeric markers.",
	long_about = "markgen finds markers such as /*__1__*/ in a source file, indexes the token \
	              each marker tags, and applies edits addressed by marker id to every occurrence \
	              of that token's text.\n\nQuick start:\n  markgen list Referencer.java\n  \
	              markgen generate Referencer.java --replace 1 IntReferencer --remove 2"
)]
pub struct MarkgenCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to a config file. Defaults to the first of `markgen.toml`,
	/// `.markgen.toml` or `.config/markgen.toml` next to the input file.
	#[arg(long, short, global = true)]
	pub config: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Apply edits to an annotated file and write the generated variant.
	///
	/// Edits from the config file run first, then the edits given on the
	/// command line in the order they were written. Removes always run
	/// before every other edit. Without `--output` the result is printed to
	/// stdout.
	Generate(GenerateArgs),
	/// List every marker id in a file and the token it tags.
	List {
		/// The annotated source file.
		input: PathBuf,

		/// Output format. Use `text` for a human-readable table or `json`
		/// for programmatic consumption.
		#[arg(long, value_enum, default_value_t = ListFormat::Text)]
		format: ListFormat,
	},
}

#[derive(Args)]
pub struct GenerateArgs {
	/// The annotated source file.
	pub input: PathBuf,

	/// Where to write the generated file. The configured extension is
	/// appended to this path.
	#[arg(long, short)]
	pub output: Option<PathBuf>,

	/// Appended verbatim to the output path, e.g. `.java`.
	#[arg(long)]
	pub extension: Option<String>,

	/// Marker prefix. Defaults to `/*__`.
	#[arg(long)]
	pub prefix: Option<String>,

	/// Marker suffix. Defaults to `__*/`.
	#[arg(long)]
	pub suffix: Option<String>,

	/// License text written at the top of the generated file.
	#[arg(long)]
	pub license: Option<String>,

	/// Note written below the license. Pass an empty string to omit it.
	#[arg(long)]
	pub note: Option<String>,

	/// Leave the markers in the generated text.
	#[arg(long, default_value_t = false)]
	pub keep_markers: bool,

	/// Print a diff between the input and the generated text instead of
	/// writing anything.
	#[arg(long, default_value_t = false)]
	pub diff: bool,

	/// Delete every occurrence of the token tagged by ID.
	#[arg(long, value_name = "ID", action = ArgAction::Append, allow_hyphen_values = true)]
	pub remove: Vec<String>,

	/// Replace every occurrence of the token tagged by ID with TEXT.
	#[arg(long, num_args = 2, value_names = ["ID", "TEXT"], action = ArgAction::Append, allow_hyphen_values = true)]
	pub replace: Vec<String>,

	/// Add TEXT before every occurrence of the token tagged by ID.
	#[arg(long, num_args = 2, value_names = ["ID", "TEXT"], action = ArgAction::Append, allow_hyphen_values = true)]
	pub prepend: Vec<String>,

	/// Add TEXT after every occurrence of the token tagged by ID.
	#[arg(long, num_args = 2, value_names = ["ID", "TEXT"], action = ArgAction::Append, allow_hyphen_values = true)]
	pub append: Vec<String>,

	/// Insert TEXT OFFSET characters into every occurrence of the token
	/// tagged by ID. A negative OFFSET counts back from the token's start.
	#[arg(long, num_args = 3, value_names = ["ID", "OFFSET", "TEXT"], action = ArgAction::Append, allow_hyphen_values = true)]
	pub insert: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON array of `{ id, text, line }` objects.
	Json,
}

/// Edit flags of `generate` and the number of values each occurrence takes.
const EDIT_FLAGS: [(&str, usize); 5] = [
	("remove", 1),
	("replace", 2),
	("prepend", 2),
	("append", 2),
	("insert", 3),
];

/// Collect the edit flags of a `generate` invocation in the order they were
/// written on the command line.
///
/// Clap groups values by flag, so the position of each occurrence is
/// recovered from the index of its first value.
pub fn ordered_edits(matches: &ArgMatches) -> MarkgenResult<Vec<EditRequest>> {
	let mut positioned = Vec::new();

	for (flag, arity) in EDIT_FLAGS {
		let (Some(values), Some(indices)) = (
			matches.get_many::<String>(flag),
			matches.indices_of(flag),
		) else {
			continue;
		};

		let values: Vec<&String> = values.collect();
		let indices: Vec<usize> = indices.collect();

		for (chunk, index) in values.chunks(arity).zip(indices.iter().step_by(arity)) {
			positioned.push((*index, edit_request(flag, chunk)?));
		}
	}

	positioned.sort_by_key(|(index, _)| *index);
	Ok(positioned.into_iter().map(|(_, edit)| edit).collect())
}

fn edit_request(flag: &str, values: &[&String]) -> MarkgenResult<EditRequest> {
	let edit = match (flag, values) {
		("remove", [id]) => EditRequest::Remove { id: id.parse()? },
		("replace", [id, text]) => {
			EditRequest::Replace {
				id: id.parse()?,
				text: (*text).clone(),
			}
		}
		("prepend", [id, text]) => {
			EditRequest::Prepend {
				id: id.parse()?,
				text: (*text).clone(),
			}
		}
		("append", [id, text]) => {
			EditRequest::Append {
				id: id.parse()?,
				text: (*text).clone(),
			}
		}
		("insert", [id, offset, text]) => {
			EditRequest::Insert {
				id: id.parse::<TokenId>()?,
				offset: offset.parse().map_err(|_| {
					MarkgenError::InvalidEditArguments {
						flag: flag.to_string(),
						reason: format!("`{offset}` is not a whole number of characters"),
					}
				})?,
				text: (*text).clone(),
			}
		}
		_ => {
			return Err(MarkgenError::InvalidEditArguments {
				flag: flag.to_string(),
				reason: format!("unexpected values {values:?}"),
			});
		}
	};

	Ok(edit)
}
