use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::ops::Range;
use std::str::FromStr;

use derive_more::Display;
use serde::Deserialize;
use serde::Serialize;

use crate::Anchor;
use crate::Document;
use crate::MarkerPattern;
use crate::MarkgenError;
use crate::MarkgenResult;
use crate::scan_marker;
use crate::tokens::Token;

/// The numeric id carried by a marker.
///
/// Ids are non-negative. Textual ids (from the command line or a config
/// file) that are negative or not numbers fail with
/// [`MarkgenError::MalformedId`].
#[derive(
	Debug,
	Clone,
	Copy,
	PartialEq,
	Eq,
	PartialOrd,
	Ord,
	Hash,
	Display,
	Serialize,
	Deserialize,
)]
#[serde(try_from = "i64", into = "u64")]
pub struct TokenId(u64);

impl TokenId {
	pub const fn new(id: u64) -> Self {
		Self(id)
	}

	pub const fn get(self) -> u64 {
		self.0
	}
}

impl FromStr for TokenId {
	type Err = MarkgenError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		value
			.parse::<u64>()
			.map(Self)
			.map_err(|_| MarkgenError::MalformedId(value.to_string()))
	}
}

impl TryFrom<i64> for TokenId {
	type Error = MarkgenError;

	fn try_from(value: i64) -> Result<Self, Self::Error> {
		u64::try_from(value)
			.map(Self)
			.map_err(|_| MarkgenError::MalformedId(value.to_string()))
	}
}

impl From<TokenId> for u64 {
	fn from(id: TokenId) -> Self {
		id.0
	}
}

/// A token of the document tagged by a marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedToken {
	pub id: TokenId,
	/// The text the marker tags. Owned, so the index outlives the document.
	pub text: String,
	/// 1-indexed line of the marker.
	pub line: usize,
}

/// Map from marker id to the token it tags, built once from a document and
/// read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenIndex {
	tokens: BTreeMap<TokenId, IndexedToken>,
	markers: Vec<Range<usize>>,
}

impl TokenIndex {
	/// Scan every token of `document` for markers and index the text each one
	/// tags.
	///
	/// A marker tags the characters that follow it in the same token, or the
	/// whole next token when nothing follows. Markers written back to back
	/// (`/*__1__*//*__2__*/name`) all tag the text after the last one. Tagged
	/// text stops where another marker begins; that marker is indexed on its
	/// own.
	///
	/// Fails with [`MarkgenError::DuplicateId`] when an id appears twice.
	pub fn build(document: &Document, pattern: &MarkerPattern) -> MarkgenResult<Self> {
		let tokens = document.tokens();
		let mut index = Self::default();
		let mut cursor = 0;
		let mut carried: Option<Token<'_>> = None;

		loop {
			let token = match carried.take() {
				Some(token) => token,
				None => {
					let Some(token) = tokens.get(cursor) else {
						break;
					};
					cursor += 1;
					*token
				}
			};

			let Some(marker) = scan_marker(token.text, pattern, Anchor::Anywhere) else {
				continue;
			};

			let mut chain = vec![(marker.id, token.line)];
			index.markers.push(marker.clone().offset_by(token.offset).span);
			let mut rest = token.tail(marker.span.end);

			loop {
				if rest.is_empty() {
					let Some(next) = tokens.get(cursor) else {
						break;
					};
					cursor += 1;
					rest = *next;
				}

				let Some(marker) = scan_marker(rest.text, pattern, Anchor::Start) else {
					break;
				};

				chain.push((marker.id, rest.line));
				index.markers.push(marker.clone().offset_by(rest.offset).span);
				rest = rest.tail(marker.span.end);
			}

			let (candidate, trailing) = split_candidate(rest, pattern);
			carried = trailing;

			if candidate.is_empty() {
				tracing::warn!(
					ids = ?chain.iter().map(|(id, _)| id.get()).collect::<Vec<_>>(),
					line = token.line,
					"marker tags an empty token"
				);
			}

			for (id, line) in chain {
				index.insert(id, candidate.text, line)?;
			}
		}

		index.markers.sort_by_key(|span| span.start);
		tracing::debug!(
			tokens = index.tokens.len(),
			markers = index.markers.len(),
			"built token index"
		);

		Ok(index)
	}

	fn insert(&mut self, id: TokenId, text: &str, line: usize) -> MarkgenResult<()> {
		match self.tokens.entry(id) {
			Entry::Occupied(_) => {
				Err(MarkgenError::DuplicateId {
					id: id.get(),
					line,
				})
			}
			Entry::Vacant(entry) => {
				tracing::trace!(id = id.get(), text, line, "indexed token");
				entry.insert(IndexedToken {
					id,
					text: text.to_string(),
					line,
				});
				Ok(())
			}
		}
	}

	/// Look up the token tagged with `id`.
	pub fn lookup(&self, id: TokenId) -> MarkgenResult<&IndexedToken> {
		self.tokens
			.get(&id)
			.ok_or_else(|| MarkgenError::UnknownId(id.get()))
	}

	/// Look up a token by a textual id, e.g. one given on the command line.
	pub fn lookup_str(&self, id: &str) -> MarkgenResult<&IndexedToken> {
		self.lookup(id.parse()?)
	}

	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	/// Indexed tokens in ascending id order.
	pub fn iter(&self) -> impl Iterator<Item = &IndexedToken> {
		self.tokens.values()
	}

	/// Byte ranges of every marker that produced an index entry, in document
	/// order.
	pub fn marker_spans(&self) -> &[Range<usize>] {
		&self.markers
	}
}

/// Cut the tagged text short at the next marker that starts after its first
/// character. Returns the tagged text and the remainder to scan on its own.
fn split_candidate<'a>(
	candidate: Token<'a>,
	pattern: &MarkerPattern,
) -> (Token<'a>, Option<Token<'a>>) {
	let Some(first) = candidate.text.chars().next() else {
		return (candidate, None);
	};

	let skip = first.len_utf8();
	match scan_marker(&candidate.text[skip..], pattern, Anchor::Anywhere) {
		Some(marker) => {
			let at = skip + marker.span.start;
			(candidate.head(at), Some(candidate.tail(at)))
		}
		None => (candidate, None),
	}
}
