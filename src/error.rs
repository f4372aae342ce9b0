//! Error types for data table operations.
//!
//! Most failures a list view runs into (bad page numbers, unknown fields,
//! unmapped sort keys) are absorbed by [`DataTableMixin`](crate::DataTableMixin)
//! and never surface here. What remains is what the paginator reports to
//! its own callers, CSV writer failures and settings parse errors.

use thiserror::Error;

/// Errors that can occur while paginating, exporting or configuring a table.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DataTableError {
	/// The requested page number is not an integer.
	#[error("Page not an integer: {0}")]
	PageNotAnInteger(String),

	/// The requested page is below 1 or past the last page.
	#[error("Empty page: {0}")]
	EmptyPage(String),

	/// Writing a CSV record failed.
	#[error("CSV error: {0}")]
	Csv(#[from] csv::Error),

	/// Flushing the CSV writer failed.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// The settings document could not be parsed.
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),
}

impl DataTableError {
	/// Returns true for the paginator's range errors.
	pub fn is_empty_page(&self) -> bool {
		matches!(self, DataTableError::EmptyPage(_))
	}
}

/// Result type alias for data table operations.
pub type Result<T> = std::result::Result<T, DataTableError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_display() {
		let err = DataTableError::EmptyPage("That page contains no results".to_string());
		assert_eq!(err.to_string(), "Empty page: That page contains no results");
		assert!(err.is_empty_page());

		let err = DataTableError::PageNotAnInteger("abc".to_string());
		assert_eq!(err.to_string(), "Page not an integer: abc");
		assert!(!err.is_empty_page());
	}

	#[test]
	fn test_toml_error_conversion() {
		let parse: std::result::Result<toml::Value, _> = toml::from_str("rows_per_page = ");
		let err: DataTableError = parse.unwrap_err().into();
		assert!(matches!(err, DataTableError::Toml(_)));
	}
}
