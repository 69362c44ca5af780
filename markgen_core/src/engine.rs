use crate::Document;
use crate::EditRequest;
use crate::MarkerPattern;
use crate::MarkgenConfig;
use crate::MarkgenResult;
use crate::TokenId;
use crate::TokenIndex;
use crate::WorkingCopy;
use crate::order_edits;
use crate::resolve_edits;

/// Settings for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
	/// The marker pattern to scan with.
	pub pattern: MarkerPattern,
	/// Remove indexed markers from the output.
	pub strip_markers: bool,
	/// See [`WorkingCopy::with_max_occurrences`].
	pub max_occurrences: Option<usize>,
}

impl Default for GenerateOptions {
	fn default() -> Self {
		Self {
			pattern: MarkerPattern::default(),
			strip_markers: true,
			max_occurrences: None,
		}
	}
}

impl GenerateOptions {
	/// Construct [`GenerateOptions`] from a [`MarkgenConfig`].
	pub fn from_config(config: Option<&MarkgenConfig>) -> MarkgenResult<Self> {
		let Some(config) = config else {
			return Ok(Self::default());
		};

		Ok(Self {
			pattern: config.pattern.build()?,
			strip_markers: config.output.strip_markers,
			max_occurrences: config.max_occurrences,
		})
	}
}

/// An edit that was applied during [`generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedEdit {
	pub op: &'static str,
	pub id: TokenId,
	/// Number of occurrences of the target text that were edited.
	pub occurrences: usize,
}

/// The outcome of [`generate`].
#[derive(Debug)]
pub struct Generated {
	/// The edited text.
	pub text: String,
	/// The index the edits were resolved against.
	pub index: TokenIndex,
	/// Applied edits in application order.
	pub applied: Vec<AppliedEdit>,
}

/// Index `document`, resolve `requests`, and apply them to a working copy.
///
/// Every request is resolved before any text is modified, so an unknown id
/// fails the run without partial output. Removes run first, then the other
/// edits in the order given.
pub fn generate(
	document: &Document,
	options: &GenerateOptions,
	requests: &[EditRequest],
) -> MarkgenResult<Generated> {
	let index = TokenIndex::build(document, &options.pattern)?;
	let operations = order_edits(resolve_edits(requests, &index)?);

	let copy = if options.strip_markers {
		WorkingCopy::without_markers(document, &index)
	} else {
		WorkingCopy::new(document)
	};
	let mut copy = copy.with_max_occurrences(options.max_occurrences);

	let mut applied = Vec::with_capacity(operations.len());
	for operation in &operations {
		let occurrences = copy.apply_one(operation)?;
		applied.push(AppliedEdit {
			op: operation.name(),
			id: operation.id(),
			occurrences,
		});
	}

	tracing::debug!(edits = applied.len(), "generated text");

	Ok(Generated {
		text: copy.into_text(),
		index,
		applied,
	})
}
