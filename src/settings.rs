//! Per-view data table settings
//!
//! Settings can be built in code or loaded from a TOML table. Every key is
//! optional and falls back to the defaults below.
//!
//! ```toml
//! csv_file_name = "hosts.csv"
//! rows_per_page = 25
//! query_variable_name = "page"
//! sort_variable_name = "sort"
//! export_variable_name = "export"
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Configuration for a data table view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataTableSettings {
	/// File name offered for CSV downloads
	pub csv_file_name: String,
	/// Query parameter holding the page number
	pub query_variable_name: String,
	/// Rows shown per page
	pub rows_per_page: usize,
	/// Query parameter holding the sort key
	pub sort_variable_name: String,
	/// Query parameter requesting an export
	pub export_variable_name: String,
	/// Rows allowed to spill onto the previous page instead of a page of their own
	pub orphans: usize,
	/// Whether an empty listing still renders an empty first page
	pub allow_empty_first_page: bool,
}

impl Default for DataTableSettings {
	fn default() -> Self {
		Self {
			csv_file_name: "file.csv".to_string(),
			query_variable_name: "page".to_string(),
			rows_per_page: 15,
			sort_variable_name: "sort".to_string(),
			export_variable_name: "export".to_string(),
			orphans: 0,
			allow_empty_first_page: true,
		}
	}
}

impl DataTableSettings {
	/// Creates settings with default values
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses settings from a TOML document
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_datatable::DataTableSettings;
	///
	/// let settings = DataTableSettings::from_toml_str("rows_per_page = 50").unwrap();
	/// assert_eq!(settings.rows_per_page, 50);
	/// assert_eq!(settings.csv_file_name, "file.csv");
	/// ```
	pub fn from_toml_str(content: &str) -> Result<Self> {
		Ok(toml::from_str(content)?)
	}

	/// Sets the CSV download file name
	pub fn csv_file_name(mut self, name: impl Into<String>) -> Self {
		self.csv_file_name = name.into();
		self
	}

	/// Sets the page query parameter
	pub fn query_variable_name(mut self, name: impl Into<String>) -> Self {
		self.query_variable_name = name.into();
		self
	}

	/// Sets the page size
	pub fn rows_per_page(mut self, rows: usize) -> Self {
		self.rows_per_page = rows;
		self
	}

	/// Sets the sort query parameter
	pub fn sort_variable_name(mut self, name: impl Into<String>) -> Self {
		self.sort_variable_name = name.into();
		self
	}

	/// Sets the export query parameter
	pub fn export_variable_name(mut self, name: impl Into<String>) -> Self {
		self.export_variable_name = name.into();
		self
	}

	/// Sets the orphan count
	pub fn orphans(mut self, orphans: usize) -> Self {
		self.orphans = orphans;
		self
	}

	/// Sets whether an empty first page is allowed
	pub fn allow_empty_first_page(mut self, allow: bool) -> Self {
		self.allow_empty_first_page = allow;
		self
	}
}
