//! Column descriptors for data tables

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display hint for a column header
///
/// The header tag uses this to pick the icon rendered next to the label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
	/// Plain text
	Text,
	/// Date or datetime
	Date,
	/// Numeric value
	Number,
	/// Yes/no value
	Boolean,
	/// Any other icon name understood by the header tag
	#[serde(untagged)]
	Custom(String),
}

impl ColumnType {
	/// Returns the icon name for this hint
	pub fn as_str(&self) -> &str {
		match self {
			ColumnType::Text => "text",
			ColumnType::Date => "date",
			ColumnType::Number => "number",
			ColumnType::Boolean => "boolean",
			ColumnType::Custom(name) => name,
		}
	}
}

impl fmt::Display for ColumnType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<&str> for ColumnType {
	fn from(value: &str) -> Self {
		match value {
			"text" => ColumnType::Text,
			"date" => ColumnType::Date,
			"number" => ColumnType::Number,
			"boolean" => ColumnType::Boolean,
			other => ColumnType::Custom(other.to_string()),
		}
	}
}

/// Everything a table header needs to know about one column
///
/// A column is immutable once built; views keep one instance per displayed
/// column and identify columns by field name.
///
/// # Example
///
/// ```rust
/// use reinhardt_datatable::{ColumnType, DataTableColumn};
///
/// let column = DataTableColumn::new("Created")
///     .field("created")
///     .column_type(ColumnType::Date)
///     .sort_expression("created_at")
///     .export(true);
///
/// assert_eq!(column.header_name(), "Created");
/// assert_eq!(column.field_name(), Some("created"));
/// assert_eq!(column.sort_expr(), Some("created_at"));
/// assert!(column.is_exported());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTableColumn {
	header_name: String,
	#[serde(default)]
	field: Option<String>,
	#[serde(default, rename = "type")]
	column_type: Option<ColumnType>,
	#[serde(default)]
	selectable: bool,
	#[serde(default)]
	bob_tag: bool,
	#[serde(default)]
	sort_expression: Option<String>,
	#[serde(default)]
	export: bool,
}

impl DataTableColumn {
	/// Creates a column with only a header label
	pub fn new(header_name: impl Into<String>) -> Self {
		Self {
			header_name: header_name.into(),
			field: None,
			column_type: None,
			selectable: false,
			bob_tag: false,
			sort_expression: None,
			export: false,
		}
	}

	/// Sets the model field this column reads
	pub fn field(mut self, field: impl Into<String>) -> Self {
		self.field = Some(field.into());
		self
	}

	/// Sets the display hint
	pub fn column_type(mut self, column_type: impl Into<ColumnType>) -> Self {
		self.column_type = Some(column_type.into());
		self
	}

	/// Marks the header as selectable
	///
	/// Selectable headers need the client-side script shipped with the
	/// header tag.
	pub fn selectable(mut self, selectable: bool) -> Self {
		self.selectable = selectable;
		self
	}

	/// Marks the column as generated by the header tag
	pub fn bob_tag(mut self, bob_tag: bool) -> Self {
		self.bob_tag = bob_tag;
		self
	}

	/// Sets the ordering directive used when sorting by this column
	pub fn sort_expression(mut self, expression: impl Into<String>) -> Self {
		self.sort_expression = Some(expression.into());
		self
	}

	/// Includes the column in CSV export headers
	pub fn export(mut self, export: bool) -> Self {
		self.export = export;
		self
	}

	/// Header label
	pub fn header_name(&self) -> &str {
		&self.header_name
	}

	/// Model field name, if any
	pub fn field_name(&self) -> Option<&str> {
		self.field.as_deref()
	}

	/// Display hint, if any
	pub fn type_hint(&self) -> Option<&ColumnType> {
		self.column_type.as_ref()
	}

	/// Whether the header is selectable
	pub fn is_selectable(&self) -> bool {
		self.selectable
	}

	/// Whether the header tag generates this column
	pub fn is_bob_tag(&self) -> bool {
		self.bob_tag
	}

	/// Ordering directive, if the column is sortable
	pub fn sort_expr(&self) -> Option<&str> {
		self.sort_expression.as_deref()
	}

	/// Whether the column appears in CSV headers
	pub fn is_exported(&self) -> bool {
		self.export
	}

	/// A column is sortable when it has both a field and a non-empty sort
	/// expression
	pub fn is_sortable(&self) -> bool {
		self.field.is_some() && self.sort_expr().is_some_and(|e| !e.is_empty())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_column_defaults() {
		let column = DataTableColumn::new("Name");
		assert_eq!(column.header_name(), "Name");
		assert_eq!(column.field_name(), None);
		assert_eq!(column.type_hint(), None);
		assert!(!column.is_selectable());
		assert!(!column.is_bob_tag());
		assert!(!column.is_exported());
		assert!(!column.is_sortable());
	}

	#[test]
	fn test_sortable_requires_field() {
		let column = DataTableColumn::new("Name").sort_expression("name");
		assert!(!column.is_sortable());

		let column = column.field("name");
		assert!(column.is_sortable());
	}

	#[test]
	fn test_empty_sort_expression_is_not_sortable() {
		let column = DataTableColumn::new("Rack").field("rack").sort_expression("");
		assert_eq!(column.sort_expr(), Some(""));
		assert!(!column.is_sortable());
	}

	#[test]
	fn test_column_type_from_str() {
		assert_eq!(ColumnType::from("date"), ColumnType::Date);
		assert_eq!(
			ColumnType::from("fugue-clock"),
			ColumnType::Custom("fugue-clock".to_string())
		);
		assert_eq!(ColumnType::Custom("x".to_string()).to_string(), "x");
	}

	#[test]
	fn test_column_deserialize() {
		let column: DataTableColumn = serde_json::from_str(
			r#"{"header_name": "Status", "field": "status", "type": "boolean", "export": true}"#,
		)
		.unwrap();
		assert_eq!(column.field_name(), Some("status"));
		assert_eq!(column.type_hint(), Some(&ColumnType::Boolean));
		assert!(column.is_exported());
		assert!(!column.is_selectable());
	}
}
