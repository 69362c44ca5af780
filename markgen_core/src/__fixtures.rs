use crate::Document;
use crate::EditOperation;
use crate::MarkerPattern;
use crate::MarkgenResult;
use crate::TokenId;
use crate::TokenIndex;
use crate::WorkingCopy;

/// A small generic Java class with every kind of marker placement: a marker
/// before its own token, one standing alone, and ones embedded in longer
/// tokens.
pub const REFERENCER: &str = r#"package test;

public class /*__1__*/Referencer /*__2__*/<T> {

	private volatile /*__3__*/T value;

	public Referencer(T initialValue) {
		this.value = initialValue;
	}

	public Referencer() {
		value = /*__4__*/null;
	}

	public T /*__8__*/get () {
		return value;
	}

	public void /*__9__*/set (T value) {
		this.value = value;
	}

	@Override public String toString() {
		return /*__7__*/"Referencer containing: " + String.valueOf(value);
	}

	@Override public int hashCode() {
		return /*__5__*/value.hashCode();
	}

	@SuppressWarnings("unchecked") @Override public boolean equals(Object other) {
		return other instanceof Referencer && ((Referencer<T>)other).value/*__6__*/.equals(value);
	}
}
"#;

pub fn id(value: u64) -> TokenId {
	TokenId::new(value)
}

pub fn build_index(text: &str) -> MarkgenResult<TokenIndex> {
	TokenIndex::build(&Document::new(text), &MarkerPattern::default())
}

/// Index `text` and return a working copy with the markers stripped.
pub fn stripped_copy(text: &str) -> MarkgenResult<(TokenIndex, WorkingCopy)> {
	let document = Document::new(text);
	let index = TokenIndex::build(&document, &MarkerPattern::default())?;
	let copy = WorkingCopy::without_markers(&document, &index);
	Ok((index, copy))
}

/// Index `text`, apply `build` to get one operation, and return the edited
/// text.
pub fn apply_single(
	text: &str,
	build: impl FnOnce(&TokenIndex) -> MarkgenResult<EditOperation>,
) -> MarkgenResult<String> {
	let (index, copy) = stripped_copy(text)?;
	let operation = build(&index)?;
	copy.apply(&[operation])
}
