use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::DEFAULT_PREFIX;
use crate::DEFAULT_SUFFIX;
use crate::EditRequest;
use crate::MarkerPattern;
use crate::MarkgenError;
use crate::MarkgenResult;
use crate::OutputBanner;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"markgen.toml",
	".markgen.toml",
	".config/markgen.toml",
];

/// The note written above generated output unless another one is
/// configured.
pub const DEFAULT_NOTE: &str = "/* PROGRAMMATICALLY GENERATED FILE. */";

/// Configuration loaded from a `markgen.toml` file.
///
/// ```toml
/// max_occurrences = 100000
///
/// [pattern]
/// prefix = "/*__"
/// suffix = "__*/"
///
/// [output]
/// license = "// SPDX-License-Identifier: MIT-0"
/// note = "// generated by markgen"
/// extension = ".java"
/// strip_markers = true
///
/// [[edits]]
/// op = "replace"
/// id = 1
/// text = "IntReferencer"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct MarkgenConfig {
	/// Upper bound on occurrences a single edit may touch. Unbounded when
	/// absent.
	#[serde(default)]
	pub max_occurrences: Option<usize>,
	/// The marker prefix and suffix.
	#[serde(default)]
	pub pattern: PatternConfig,
	/// Banners, extension and marker stripping for generated output.
	#[serde(default)]
	pub output: OutputConfig,
	/// Edits applied before any given on the command line.
	#[serde(default)]
	pub edits: Vec<EditRequest>,
}

/// The `[pattern]` section. Missing parts fall back to `/*__` and `__*/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatternConfig {
	pub prefix: Option<String>,
	pub suffix: Option<String>,
}

impl PatternConfig {
	/// Validate into a [`MarkerPattern`].
	pub fn build(&self) -> MarkgenResult<MarkerPattern> {
		MarkerPattern::new(
			self.prefix.as_deref().unwrap_or(DEFAULT_PREFIX),
			self.suffix.as_deref().unwrap_or(DEFAULT_SUFFIX),
		)
	}
}

/// The `[output]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
	/// License text written at the very top of the output.
	#[serde(default)]
	pub license: Option<String>,
	/// Note written below the license. An empty string disables the note;
	/// when absent, [`DEFAULT_NOTE`] is used.
	#[serde(default)]
	pub note: Option<String>,
	/// Appended to the output path, e.g. `.java`.
	#[serde(default)]
	pub extension: Option<String>,
	/// Remove indexed markers from the generated text. Defaults to `true`.
	#[serde(default = "default_strip_markers")]
	pub strip_markers: bool,
}

impl Default for OutputConfig {
	fn default() -> Self {
		Self {
			license: None,
			note: None,
			extension: None,
			strip_markers: default_strip_markers(),
		}
	}
}

impl OutputConfig {
	pub fn banner(&self) -> OutputBanner {
		let note = match self.note.as_deref() {
			None => Some(DEFAULT_NOTE.to_string()),
			Some("") => None,
			Some(note) => Some(note.to_string()),
		};

		OutputBanner {
			license: self.license.clone(),
			note,
		}
	}
}

fn default_strip_markers() -> bool {
	true
}

impl MarkgenConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> MarkgenResult<Option<MarkgenConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		Self::load_from(&config_path).map(Some)
	}

	/// Load the config from an explicit path.
	pub fn load_from(path: &Path) -> MarkgenResult<MarkgenConfig> {
		let content = std::fs::read_to_string(path)?;
		let config = Self::parse(&content)?;
		tracing::debug!(path = %path.display(), edits = config.edits.len(), "loaded config");

		Ok(config)
	}

	pub fn parse(content: &str) -> MarkgenResult<MarkgenConfig> {
		toml::from_str(content).map_err(|e| MarkgenError::ConfigParse(e.to_string()))
	}
}
