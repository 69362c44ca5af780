use std::path::Path;
use std::path::PathBuf;

use crate::MarkgenResult;
use crate::tokens::LINE_SEPARATOR;

/// Text written above generated output: a license, then a note that the
/// file was generated. Each is followed by a line separator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBanner {
	pub license: Option<String>,
	pub note: Option<String>,
}

impl OutputBanner {
	/// Prefix `text` with the banner.
	pub fn render(&self, text: &str) -> String {
		let mut output = String::new();

		for line in [&self.license, &self.note].into_iter().flatten() {
			output.push_str(line);
			output.push_str(LINE_SEPARATOR);
		}

		output.push_str(text);
		output
	}
}

/// Append `extension` to `path` verbatim, so `out` and `.java` become
/// `out.java`.
pub fn output_path(path: &Path, extension: Option<&str>) -> PathBuf {
	match extension {
		Some(extension) => {
			let mut path = path.as_os_str().to_owned();
			path.push(extension);
			PathBuf::from(path)
		}
		None => path.to_path_buf(),
	}
}

/// Write generated text with its banner to `path`.
pub fn write_output(path: &Path, banner: &OutputBanner, text: &str) -> MarkgenResult<()> {
	std::fs::write(path, banner.render(text))?;
	tracing::debug!(path = %path.display(), "wrote output");
	Ok(())
}
