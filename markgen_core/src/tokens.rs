use crate::lexer::tokenize_line;

/// The platform line separator.
pub const LINE_SEPARATOR: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// The first character of [`LINE_SEPARATOR`]. It counts as whitespace when
/// splitting a line into tokens.
pub const LINE_FEED: char = if cfg!(windows) { '\r' } else { '\n' };

/// Whitespace as far as tokenizing and pattern validation are concerned:
/// space, horizontal tab and [`LINE_FEED`].
pub fn is_whitespace(ch: char) -> bool {
	ch == ' ' || ch == '\t' || ch == LINE_FEED
}

/// A maximal run of non-whitespace characters within a line, borrowed from
/// the document it was found in.
///
/// The final token of a line may be empty, see
/// [`tokenize_line`](crate::lexer::tokenize_line).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
	/// The characters of the token.
	pub text: &'a str,
	/// Byte offset of the token's first character in the document.
	pub offset: usize,
	/// 1-indexed line the token was found on.
	pub line: usize,
}

impl<'a> Token<'a> {
	pub fn new(text: &'a str, offset: usize, line: usize) -> Self {
		Self { text, offset, line }
	}

	pub fn is_empty(&self) -> bool {
		self.text.is_empty()
	}

	/// The part of the token starting at byte `start`.
	pub fn tail(&self, start: usize) -> Self {
		Self {
			text: &self.text[start..],
			offset: self.offset + start,
			line: self.line,
		}
	}

	/// The part of the token before byte `end`.
	pub fn head(&self, end: usize) -> Self {
		Self {
			text: &self.text[..end],
			offset: self.offset,
			line: self.line,
		}
	}
}

/// A single line of a [`Document`], without its line terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
	pub text: &'a str,
	/// Byte offset of the first character of the line in the document.
	pub offset: usize,
	/// 1-indexed line number.
	pub number: usize,
}

/// The source text being generated from. It is never modified; edits are
/// applied to a [`WorkingCopy`](crate::WorkingCopy) made from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
	text: String,
}

impl Document {
	pub fn new(text: impl Into<String>) -> Self {
		Self { text: text.into() }
	}

	/// Read a document from disk.
	pub fn read(path: impl AsRef<std::path::Path>) -> crate::MarkgenResult<Self> {
		Ok(Self::new(std::fs::read_to_string(path)?))
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	/// Iterate the lines of the document. Lines end at `\n`, and a `\r` before
	/// the `\n` is not part of the line.
	pub fn lines(&self) -> impl Iterator<Item = Line<'_>> {
		let mut offset = 0;

		self.text
			.split_inclusive('\n')
			.enumerate()
			.map(move |(index, raw)| {
				let text = raw.strip_suffix('\n').unwrap_or(raw);
				let text = text.strip_suffix('\r').unwrap_or(text);
				let line = Line {
					text,
					offset,
					number: index + 1,
				};
				offset += raw.len();
				line
			})
	}

	/// Every token of the document in order, including the trailing unit that
	/// each line contributes.
	pub fn tokens(&self) -> Vec<Token<'_>> {
		self.lines().flat_map(tokenize_line).collect()
	}
}

impl From<String> for Document {
	fn from(text: String) -> Self {
		Self::new(text)
	}
}

impl From<&str> for Document {
	fn from(text: &str) -> Self {
		Self::new(text)
	}
}
