use std::ops::Range;

use crate::MarkerPattern;
use crate::TokenId;

/// Where a marker is allowed to begin within the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
	/// The prefix may start at any character.
	Anywhere,
	/// The prefix must start at the first character.
	Start,
}

/// A marker recognized by [`scan_marker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
	pub id: TokenId,
	/// Byte range of the whole marker, prefix through suffix, within the
	/// scanned text.
	pub span: Range<usize>,
}

impl Marker {
	/// Shift the span by `offset` bytes.
	pub fn offset_by(self, offset: usize) -> Self {
		Self {
			id: self.id,
			span: self.span.start + offset..self.span.end + offset,
		}
	}
}

/// Scan `text` for the first marker of the form
/// `<prefix><digits><suffix>`.
///
/// Returns `None` when the text holds no marker. Matching is strict:
///
/// - A character that breaks a partial prefix match resets the match; it is
///   not retried as the first character of a new prefix.
/// - Every character between the prefix and the first character of the
///   suffix must be a digit, and there must be at least one.
/// - The rest of the suffix must follow immediately. A mismatch ends the
///   attempt; scanning does not resume later in the text.
pub fn scan_marker(text: &str, pattern: &MarkerPattern, anchor: Anchor) -> Option<Marker> {
	let prefix = pattern.prefix();
	let suffix = pattern.suffix();
	let mut chars = text.char_indices();
	let mut matched = 0;
	let mut start = 0;

	loop {
		let (offset, ch) = chars.next()?;

		if ch == prefix[matched] {
			if matched == 0 {
				start = offset;
			}

			matched += 1;
			if matched == prefix.len() {
				break;
			}
		} else if anchor == Anchor::Start {
			return None;
		} else {
			matched = 0;
		}
	}

	let mut id: u64 = 0;
	let mut digits = 0;
	let mut end;

	loop {
		let (offset, ch) = chars.next()?;

		if ch == suffix[0] {
			end = offset + ch.len_utf8();
			break;
		}

		let value = digit_value(ch)?;
		id = id.checked_mul(10)?.checked_add(value)?;
		digits += 1;
	}

	if digits == 0 {
		return None;
	}

	for expected in &suffix[1..] {
		let (offset, ch) = chars.next()?;
		if ch != *expected {
			return None;
		}

		end = offset + ch.len_utf8();
	}

	tracing::trace!(id, start, end, "matched marker");

	Some(Marker {
		id: TokenId::new(id),
		span: start..end,
	})
}

/// The numeric value of a digit character, taken as its character code
/// minus the code of `'0'`.
fn digit_value(ch: char) -> Option<u64> {
	u32::from(ch)
		.checked_sub(u32::from('0'))
		.filter(|value| *value <= 9)
		.map(u64::from)
}
