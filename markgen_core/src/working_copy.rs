use crate::Document;
use crate::EditOperation;
use crate::MarkgenError;
use crate::MarkgenResult;
use crate::TokenIndex;

/// The mutable copy of a document that edit operations are applied to.
///
/// The copy is taken once; every operation mutates the same buffer in
/// sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingCopy {
	text: String,
	max_occurrences: Option<usize>,
}

impl WorkingCopy {
	/// Copy the document text verbatim, markers included.
	pub fn new(document: &Document) -> Self {
		Self {
			text: document.text().to_string(),
			max_occurrences: None,
		}
	}

	/// Copy the document text with every indexed marker removed.
	pub fn without_markers(document: &Document, index: &TokenIndex) -> Self {
		let source = document.text();
		let mut text = String::with_capacity(source.len());
		let mut last = 0;

		for span in index.marker_spans() {
			text.push_str(&source[last..span.start]);
			last = span.end;
		}
		text.push_str(&source[last..]);

		Self {
			text,
			max_occurrences: None,
		}
	}

	/// Fail a scan with [`MarkgenError::OccurrenceLimitExceeded`] once it has
	/// edited more than `limit` occurrences.
	#[must_use]
	pub fn with_max_occurrences(mut self, limit: Option<usize>) -> Self {
		self.max_occurrences = limit;
		self
	}

	pub fn as_str(&self) -> &str {
		&self.text
	}

	pub fn into_text(self) -> String {
		self.text
	}

	/// Call `edit` for each occurrence of `needle`, scanning from the start of
	/// the buffer.
	///
	/// After each occurrence at byte `i` the scan resumes at `i + stride`, so
	/// the stride decides whether text written by `edit` can be matched again.
	/// A stride shorter than the text an edit adds will match that text again.
	/// An empty `needle` has no occurrences. Returns the number of occurrences
	/// edited.
	pub fn for_each_occurrence<F>(
		&mut self,
		needle: &str,
		stride: usize,
		mut edit: F,
	) -> MarkgenResult<usize>
	where
		F: FnMut(&mut String, usize) -> MarkgenResult<()>,
	{
		if needle.is_empty() {
			return Ok(0);
		}

		let mut cursor = 0;
		let mut count = 0;

		while let Some(found) = self
			.text
			.get(cursor..)
			.and_then(|rest| rest.find(needle))
			.map(|at| cursor + at)
		{
			if let Some(limit) = self.max_occurrences {
				if count >= limit {
					return Err(MarkgenError::OccurrenceLimitExceeded {
						target: needle.to_string(),
						limit,
					});
				}
			}

			edit(&mut self.text, found)?;
			count += 1;

			cursor = found + stride;
			while cursor < self.text.len() && !self.text.is_char_boundary(cursor) {
				cursor += 1;
			}
		}

		Ok(count)
	}

	/// Apply one operation with its own stride. Returns the number of
	/// occurrences edited.
	pub fn apply_one(&mut self, operation: &EditOperation) -> MarkgenResult<usize> {
		self.apply_with_stride(operation, operation.stride())
	}

	/// Apply one operation, overriding its stride.
	pub fn apply_with_stride(
		&mut self,
		operation: &EditOperation,
		stride: usize,
	) -> MarkgenResult<usize> {
		let target = operation.target();
		let length = target.len();

		let count = match operation {
			EditOperation::Remove { .. } => {
				self.for_each_occurrence(target, stride, |text, at| {
					text.replace_range(at..at + length, "");
					Ok(())
				})?
			}
			EditOperation::Replace { replacement, .. } => {
				self.for_each_occurrence(target, stride, |text, at| {
					text.replace_range(at..at + length, replacement);
					Ok(())
				})?
			}
			EditOperation::Prepend { text: added, .. } => {
				self.for_each_occurrence(target, stride, |text, at| {
					text.insert_str(at, added);
					Ok(())
				})?
			}
			EditOperation::Append { text: added, .. } => {
				self.for_each_occurrence(target, stride, |text, at| {
					text.insert_str(at + length, added);
					Ok(())
				})?
			}
			EditOperation::Insert {
				id,
				offset,
				text: inserted,
				..
			} => {
				self.for_each_occurrence(target, stride, |text, at| {
					let position = char_position(text, at, *offset).ok_or_else(|| {
						MarkgenError::InsertOutOfBounds {
							id: id.get(),
							offset: *offset,
						}
					})?;
					text.insert_str(position, inserted);
					Ok(())
				})?
			}
		};

		tracing::debug!(
			op = operation.name(),
			id = operation.id().get(),
			needle = target,
			stride,
			occurrences = count,
			"applied edit"
		);

		Ok(count)
	}

	/// Apply `operations` in the given order and return the resulting text.
	///
	/// Ordering is the caller's concern; see
	/// [`order_edits`](crate::order_edits).
	pub fn apply(mut self, operations: &[EditOperation]) -> MarkgenResult<String> {
		for operation in operations {
			self.apply_one(operation)?;
		}

		Ok(self.text)
	}
}

/// Byte position `offset` characters away from byte `base`. Negative offsets
/// count backwards. The end of the text is a valid position.
fn char_position(text: &str, base: usize, offset: i64) -> Option<usize> {
	let steps = usize::try_from(offset.unsigned_abs()).ok()?;

	if offset >= 0 {
		text[base..]
			.char_indices()
			.map(|(at, _)| base + at)
			.chain(std::iter::once(text.len()))
			.nth(steps)
	} else {
		text[..base]
			.char_indices()
			.rev()
			.nth(steps - 1)
			.map(|(at, _)| at)
	}
}
