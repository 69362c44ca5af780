use serde::Deserialize;

use crate::MarkgenResult;
use crate::TokenId;
use crate::TokenIndex;

/// An edit addressed by marker id, as read from a config file or the command
/// line. It is resolved against a [`TokenIndex`] into an [`EditOperation`]
/// before anything is modified.
///
/// ```toml
/// [[edits]]
/// op = "insert"
/// id = 3
/// offset = 1
/// text = "_"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum EditRequest {
	/// Insert `text` at `offset` characters from the start of the token.
	Insert {
		id: TokenId,
		offset: i64,
		text: String,
	},
	/// Add `text` after the token.
	Append { id: TokenId, text: String },
	/// Add `text` before the token.
	Prepend { id: TokenId, text: String },
	/// Replace the token with `text`.
	Replace { id: TokenId, text: String },
	/// Delete the token.
	Remove { id: TokenId },
}

impl EditRequest {
	/// Bind this request to the text of its target token.
	pub fn resolve(&self, index: &TokenIndex) -> MarkgenResult<EditOperation> {
		match self {
			Self::Insert { id, offset, text } => EditOperation::insert(index, *id, *offset, text),
			Self::Append { id, text } => EditOperation::append(index, *id, text),
			Self::Prepend { id, text } => EditOperation::prepend(index, *id, text),
			Self::Replace { id, text } => EditOperation::replace(index, *id, text),
			Self::Remove { id } => EditOperation::remove(index, *id),
		}
	}
}

/// An edit bound to the literal text of the token it targets. Every
/// occurrence of that text in the working copy is edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOperation {
	Insert {
		id: TokenId,
		target: String,
		offset: i64,
		text: String,
	},
	Append {
		id: TokenId,
		target: String,
		text: String,
	},
	Prepend {
		id: TokenId,
		target: String,
		text: String,
	},
	Replace {
		id: TokenId,
		target: String,
		replacement: String,
	},
	Remove {
		id: TokenId,
		target: String,
	},
}

impl EditOperation {
	pub fn insert(
		index: &TokenIndex,
		id: TokenId,
		offset: i64,
		text: impl Into<String>,
	) -> MarkgenResult<Self> {
		Ok(Self::Insert {
			id,
			target: target_text(index, id)?,
			offset,
			text: text.into(),
		})
	}

	pub fn append(index: &TokenIndex, id: TokenId, text: impl Into<String>) -> MarkgenResult<Self> {
		Ok(Self::Append {
			id,
			target: target_text(index, id)?,
			text: text.into(),
		})
	}

	pub fn prepend(
		index: &TokenIndex,
		id: TokenId,
		text: impl Into<String>,
	) -> MarkgenResult<Self> {
		Ok(Self::Prepend {
			id,
			target: target_text(index, id)?,
			text: text.into(),
		})
	}

	pub fn replace(
		index: &TokenIndex,
		id: TokenId,
		replacement: impl Into<String>,
	) -> MarkgenResult<Self> {
		Ok(Self::Replace {
			id,
			target: target_text(index, id)?,
			replacement: replacement.into(),
		})
	}

	pub fn remove(index: &TokenIndex, id: TokenId) -> MarkgenResult<Self> {
		Ok(Self::Remove {
			id,
			target: target_text(index, id)?,
		})
	}

	pub fn id(&self) -> TokenId {
		match self {
			Self::Insert { id, .. }
			| Self::Append { id, .. }
			| Self::Prepend { id, .. }
			| Self::Replace { id, .. }
			| Self::Remove { id, .. } => *id,
		}
	}

	/// The literal text this operation searches for.
	pub fn target(&self) -> &str {
		match self {
			Self::Insert { target, .. }
			| Self::Append { target, .. }
			| Self::Prepend { target, .. }
			| Self::Replace { target, .. }
			| Self::Remove { target, .. } => target,
		}
	}

	pub fn name(&self) -> &'static str {
		match self {
			Self::Insert { .. } => "insert",
			Self::Append { .. } => "append",
			Self::Prepend { .. } => "prepend",
			Self::Replace { .. } => "replace",
			Self::Remove { .. } => "remove",
		}
	}

	pub fn is_remove(&self) -> bool {
		matches!(self, Self::Remove { .. })
	}

	/// How far past the start of a match the occurrence scan moves before
	/// searching again, in bytes.
	///
	/// The stride skips the text the operation itself adds, so fresh text is
	/// not matched again.
	pub fn stride(&self) -> usize {
		match self {
			Self::Remove { .. } => 0,
			Self::Replace { replacement, .. } => replacement.len(),
			Self::Insert { target, text, .. }
			| Self::Append { target, text, .. }
			| Self::Prepend { target, text, .. } => target.len() + text.len(),
		}
	}
}

fn target_text(index: &TokenIndex, id: TokenId) -> MarkgenResult<String> {
	Ok(index.lookup(id)?.text.clone())
}

/// Resolve every request against `index`. Fails on the first unknown id,
/// before any text has been touched.
pub fn resolve_edits(
	requests: &[EditRequest],
	index: &TokenIndex,
) -> MarkgenResult<Vec<EditOperation>> {
	requests
		.iter()
		.map(|request| request.resolve(index))
		.collect()
}

/// Put every remove operation first, keeping the declared order within the
/// removes and within the rest.
pub fn order_edits(operations: Vec<EditOperation>) -> Vec<EditOperation> {
	let (mut ordered, rest): (Vec<_>, Vec<_>) = operations
		.into_iter()
		.partition(EditOperation::is_remove);
	ordered.extend(rest);
	ordered
}
