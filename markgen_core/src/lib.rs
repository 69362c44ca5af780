//! `markgen_core` is the core library for the markgen source generator. It
//! finds numeric markers embedded in a text document, indexes the token each
//! marker tags, and applies edits addressed by marker id to a copy of the
//! document. One annotated source file can then be turned into any number of
//! variants.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Source text
//!   → Lexer (splits each line into whitespace-delimited tokens)
//!   → Marker scanner (recognizes `<prefix><digits><suffix>` inside tokens)
//!   → Token index (maps each id to the text it tags, resolving chained markers)
//!   → Working copy (document text with the markers stripped)
//!   → Edits (remove first, then insert / append / prepend / replace in order)
//! ```
//!
//! ## Markers
//!
//! With the default pattern a marker looks like `/*__7__*/`. It tags the
//! text directly after it, or the next token when it stands alone:
//!
//! ```text
//! public class /*__1__*/Referencer /*__2__*/<T> {
//! ```
//!
//! Here id `1` tags `Referencer` and id `2` tags `<T>`. Markers written
//! back to back, as in `/*__1__*//*__2__*/name`, all tag `name`.
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading from `markgen.toml`, covering the
//!   marker pattern, output banners and edits.
//! - [`lexer`]: Splits a line into whitespace-delimited tokens.
//!
//! ## Key Types
//!
//! - [`MarkerPattern`]: The validated prefix and suffix that surround a
//!   marker id.
//! - [`TokenIndex`]: Map from [`TokenId`] to [`IndexedToken`].
//! - [`EditRequest`]: An edit addressed by id, before resolution.
//! - [`EditOperation`]: An edit bound to its target text.
//! - [`WorkingCopy`]: The buffer edits are applied to, with the occurrence
//!   scanner.
//!
//! ## Quick Start
//!
//! ```rust
//! use markgen_core::Document;
//! use markgen_core::EditRequest;
//! use markgen_core::GenerateOptions;
//! use markgen_core::TokenId;
//! use markgen_core::generate;
//!
//! let document = Document::new("hello /*__1__*/world hello");
//! let edits = [EditRequest::Append {
//! 	id: TokenId::new(1),
//! 	text: "!!".into(),
//! }];
//!
//! let generated = generate(&document, &GenerateOptions::default(), &edits).unwrap();
//! assert_eq!(generated.text, "hello world!! hello");
//! ```

pub use config::*;
pub use edit::*;
pub use engine::*;
pub use error::*;
pub use index::*;
pub use output::*;
pub use pattern::*;
pub use scanner::*;
pub use tokens::Document;
pub use tokens::LINE_FEED;
pub use tokens::LINE_SEPARATOR;
pub use tokens::Line;
pub use tokens::Token;
pub use working_copy::*;

pub mod config;
mod edit;
mod engine;
#[allow(unused_assignments)]
mod error;
mod index;
pub mod lexer;
mod output;
mod pattern;
mod scanner;
pub(crate) mod tokens;
mod working_copy;

#[cfg(test)]
mod __fixtures;
