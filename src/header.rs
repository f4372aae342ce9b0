//! Table header cells for templates
//!
//! Each [`HeaderCell`] carries what the header tag needs to render one
//! column: its label and hints, whether it can be sorted, the direction it
//! is currently sorted in, and the sort value a click should request.

use crate::column::DataTableColumn;
use crate::query::SortDirection;
use serde::Serialize;

/// Rendering data for one column header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
	/// Header label
	pub label: String,
	/// Model field, if any
	pub field: Option<String>,
	/// Display hint
	#[serde(rename = "type")]
	pub column_type: Option<String>,
	/// Whether the header is selectable
	pub selectable: bool,
	/// Whether the header tag generates this column
	pub bob_tag: bool,
	/// Whether clicking the header sorts the table
	pub sortable: bool,
	/// `"asc"` or `"desc"` when the table is sorted by this column
	pub direction: Option<&'static str>,
	/// Sort parameter value for the header link
	pub sort_param: Option<String>,
}

/// Builds header cells for `columns` given the raw sort parameter
///
/// # Examples
///
/// ```
/// use reinhardt_datatable::{header_cells, DataTableColumn};
///
/// let columns = vec![
///     DataTableColumn::new("Name").field("name").sort_expression("name"),
///     DataTableColumn::new("Notes").field("notes"),
/// ];
/// let cells = header_cells(&columns, Some("name"));
/// assert_eq!(cells[0].direction, Some("asc"));
/// assert_eq!(cells[0].sort_param.as_deref(), Some("-name"));
/// assert!(!cells[1].sortable);
/// ```
pub fn header_cells(columns: &[DataTableColumn], sort: Option<&str>) -> Vec<HeaderCell> {
	let active = sort.map(|s| {
		let direction = if s.starts_with('-') {
			SortDirection::Descending
		} else {
			SortDirection::Ascending
		};
		(s.trim_matches('-'), direction)
	});

	columns
		.iter()
		.map(|column| {
			let sortable = column.is_sortable();
			let field = column.field_name();
			let direction = match (active, field) {
				(Some((key, direction)), Some(field)) if sortable && key == field => {
					Some(direction)
				}
				_ => None,
			};
			let sort_param = field.filter(|_| sortable).map(|field| match direction {
				Some(SortDirection::Ascending) => format!("-{}", field),
				_ => field.to_string(),
			});

			HeaderCell {
				label: column.header_name().to_string(),
				field: field.map(str::to_string),
				column_type: column.type_hint().map(|t| t.to_string()),
				selectable: column.is_selectable(),
				bob_tag: column.is_bob_tag(),
				sortable,
				direction: direction.map(|d| match d {
					SortDirection::Ascending => "asc",
					SortDirection::Descending => "desc",
				}),
				sort_param,
			}
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::column::ColumnType;

	fn columns() -> Vec<DataTableColumn> {
		vec![
			DataTableColumn::new("Name")
				.field("name")
				.sort_expression("name"),
			DataTableColumn::new("Created")
				.field("created")
				.column_type(ColumnType::Date)
				.sort_expression("created_at")
				.selectable(true),
		]
	}

	#[test]
	fn test_descending_active_column_toggles_to_ascending() {
		let cells = header_cells(&columns(), Some("-created"));
		assert_eq!(cells[1].direction, Some("desc"));
		assert_eq!(cells[1].sort_param.as_deref(), Some("created"));
		assert_eq!(cells[1].column_type.as_deref(), Some("date"));
		assert!(cells[1].selectable);
		assert_eq!(cells[0].direction, None);
		assert_eq!(cells[0].sort_param.as_deref(), Some("name"));
	}

	#[test]
	fn test_no_sort() {
		let cells = header_cells(&columns(), None);
		assert!(cells.iter().all(|c| c.direction.is_none()));
	}

	#[test]
	fn test_unmapped_sort_key_marks_nothing() {
		let cells = header_cells(&columns(), Some("created_at"));
		assert!(cells.iter().all(|c| c.direction.is_none()));
	}
}
