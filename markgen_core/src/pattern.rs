use derive_more::Display;

use crate::MarkgenError;
use crate::MarkgenResult;
use crate::tokens::is_whitespace;

/// The prefix used when no other prefix is configured.
pub const DEFAULT_PREFIX: &str = "/*__";
/// The suffix used when no other suffix is configured.
pub const DEFAULT_SUFFIX: &str = "__*/";

/// Which half of a [`MarkerPattern`] a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PatternPart {
	#[display("prefix")]
	Prefix,
	#[display("suffix")]
	Suffix,
}

/// The character sequences that surround a marker id, e.g. `/*__` and `__*/`
/// in `/*__12__*/`.
///
/// A pattern is validated once when it is built and is immutable afterwards.
/// Scanning borrows it, so it cannot change while a document is being
/// indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPattern {
	prefix: Vec<char>,
	suffix: Vec<char>,
}

impl MarkerPattern {
	/// Build a pattern from a prefix and suffix.
	///
	/// Fails with [`MarkgenError::InvalidPatternCharacter`] when either part
	/// contains whitespace and [`MarkgenError::EmptyPattern`] when either part
	/// is empty.
	pub fn new(prefix: impl AsRef<str>, suffix: impl AsRef<str>) -> MarkgenResult<Self> {
		Ok(Self {
			prefix: validate_part(prefix.as_ref(), PatternPart::Prefix)?,
			suffix: validate_part(suffix.as_ref(), PatternPart::Suffix)?,
		})
	}

	pub fn prefix(&self) -> &[char] {
		&self.prefix
	}

	pub fn suffix(&self) -> &[char] {
		&self.suffix
	}

	/// Render a marker for `id` using this pattern.
	pub fn marker(&self, id: u64) -> String {
		let prefix: String = self.prefix.iter().collect();
		let suffix: String = self.suffix.iter().collect();
		format!("{prefix}{id}{suffix}")
	}
}

impl Default for MarkerPattern {
	fn default() -> Self {
		Self {
			prefix: DEFAULT_PREFIX.chars().collect(),
			suffix: DEFAULT_SUFFIX.chars().collect(),
		}
	}
}

fn validate_part(value: &str, part: PatternPart) -> MarkgenResult<Vec<char>> {
	if value.is_empty() {
		return Err(MarkgenError::EmptyPattern(part));
	}

	if let Some(character) = value.chars().find(|&ch| is_whitespace(ch)) {
		return Err(MarkgenError::InvalidPatternCharacter {
			part,
			pattern: value.to_string(),
			character,
		});
	}

	Ok(value.chars().collect())
}
