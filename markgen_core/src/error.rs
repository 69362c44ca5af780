use miette::Diagnostic;
use thiserror::Error;

use crate::PatternPart;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum MarkgenError {
	#[error(transparent)]
	#[diagnostic(code(markgen::io_error))]
	Io(#[from] std::io::Error),

	#[error("id `{id}` (line {line}) already identifies a token")]
	#[diagnostic(
		code(markgen::duplicate_id),
		help("each marker id must be unique within one document")
	)]
	DuplicateId { id: u64, line: usize },

	#[error("id `{0}` does not identify a marked token")]
	#[diagnostic(
		code(markgen::unknown_id),
		help("run `markgen list <INPUT>` to see the ids found in the document")
	)]
	UnknownId(u64),

	#[error("`{0}` is not a valid marker id")]
	#[diagnostic(
		code(markgen::malformed_id),
		help("marker ids are non-negative base-ten integers")
	)]
	MalformedId(String),

	#[error("marker {part} `{pattern}` contains the whitespace character {character:?}")]
	#[diagnostic(
		code(markgen::invalid_pattern_character),
		help("marker prefixes and suffixes cannot contain spaces, tabs or line feeds")
	)]
	InvalidPatternCharacter {
		part: PatternPart,
		pattern: String,
		character: char,
	},

	#[error("marker {0} cannot be empty")]
	#[diagnostic(code(markgen::empty_pattern))]
	EmptyPattern(PatternPart),

	#[error("insert offset {offset} for id `{id}` falls outside the text")]
	#[diagnostic(
		code(markgen::insert_out_of_bounds),
		help("the offset is counted in characters from the first character of the token")
	)]
	InsertOutOfBounds { id: u64, offset: i64 },

	#[error("more than {limit} occurrence(s) of `{target}` were edited")]
	#[diagnostic(
		code(markgen::occurrence_limit),
		help("an edit is re-matching text it inserted; raise `max_occurrences` if this is intended")
	)]
	OccurrenceLimitExceeded { target: String, limit: usize },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(markgen::config_parse),
		help("check that markgen.toml is valid TOML with [pattern], [output] and/or [[edits]] sections")
	)]
	ConfigParse(String),

	#[error("invalid arguments for `--{flag}`: {reason}")]
	#[diagnostic(code(markgen::invalid_edit_arguments))]
	InvalidEditArguments { flag: String, reason: String },
}

pub type MarkgenResult<T> = Result<T, MarkgenError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
