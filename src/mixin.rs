//! The data table view mixin
//!
//! Implement [`DataTableMixin`] on a list view to get sorting by column,
//! page-number pagination and CSV export driven by query-string parameters.
//!
//! A view provides its columns, the request's [`QueryParams`] and its
//! [`DataTableSettings`], then calls
//! [`data_table_query`](DataTableMixin::data_table_query) with its query:
//!
//! ```rust
//! use reinhardt_datatable::{
//!     DataTableColumn, DataTableMixin, DataTableOutcome, DataTableSettings, FieldMeta,
//!     MemoryQuerySet, QueryParams, Record,
//! };
//! use serde_json::{json, Value};
//!
//! #[derive(Debug, Clone)]
//! struct Host {
//!     name: String,
//! }
//!
//! impl Record for Host {
//!     fn fields() -> Vec<FieldMeta> {
//!         vec![FieldMeta::new("name")]
//!     }
//!     fn attribute(&self, name: &str) -> Option<Value> {
//!         (name == "name").then(|| json!(self.name))
//!     }
//! }
//!
//! struct HostList {
//!     columns: Vec<DataTableColumn>,
//!     params: QueryParams,
//!     settings: DataTableSettings,
//! }
//!
//! impl DataTableMixin<MemoryQuerySet<Host>> for HostList {
//!     fn columns(&self) -> &[DataTableColumn] {
//!         &self.columns
//!     }
//!     fn query_params(&self) -> &QueryParams {
//!         &self.params
//!     }
//!     fn settings(&self) -> &DataTableSettings {
//!         &self.settings
//!     }
//! }
//!
//! let view = HostList {
//!     columns: vec![DataTableColumn::new("Name").field("name").sort_expression("name")],
//!     params: QueryParams::parse("sort=-name"),
//!     settings: DataTableSettings::new().rows_per_page(2),
//! };
//! let hosts = ["a", "b", "c"].map(|n| Host { name: n.to_string() }).to_vec();
//!
//! match view.data_table_query(MemoryQuerySet::new(hosts)).unwrap() {
//!     DataTableOutcome::Page(result) => {
//!         assert_eq!(result.sort.as_deref(), Some("-name"));
//!         assert_eq!(result.page.object_list[0].name, "c");
//!         assert_eq!(result.page.num_pages, 2);
//!     }
//!     DataTableOutcome::Export(_) => unreachable!(),
//! }
//! ```

use crate::column::DataTableColumn;
use crate::error::Result;
use crate::header::header_cells;
use crate::paginator::{Page, Paginator};
use crate::params::QueryParams;
use crate::query::QuerySource;
use crate::record::{Record, value_to_text};
use crate::response::Response;
use crate::settings::DataTableSettings;
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Template context key holding the current page
pub const PAGE_CONTEXT_KEY: &str = "bob_page";

/// Content type of CSV downloads
pub const CSV_CONTENT_TYPE: &str = "application/csv";

/// Export parameter value that requests a CSV download
pub const CSV_EXPORT_VALUE: &str = "csv";

/// Template context
pub type Context = HashMap<String, Value>;

static DEFAULT_SETTINGS: LazyLock<DataTableSettings> = LazyLock::new(DataTableSettings::default);

/// A paginated listing
#[derive(Debug, Clone)]
pub struct PageResult<T> {
	/// The page to render
	pub page: Page<T>,
	/// Ordering expression applied to the query, if any
	pub sort: Option<String>,
	/// Page number parsed from the request, before falling back
	pub requested_page: i64,
}

/// What a data table request resolved to
#[derive(Debug, Clone)]
pub enum DataTableOutcome<T> {
	/// Render a page of results
	Page(PageResult<T>),
	/// Send a CSV download
	Export(Response),
}

/// Pagination, sorting and CSV export for list views
///
/// Every step degrades to a safe default instead of failing: unknown
/// fields render as empty cells, bad page numbers show the first page and
/// unmapped sort keys leave the ordering alone.
pub trait DataTableMixin<Q>
where
	Q: QuerySource,
{
	/// Columns displayed by the view
	fn columns(&self) -> &[DataTableColumn];

	/// Query-string parameters of the current request
	fn query_params(&self) -> &QueryParams;

	/// Settings of the view
	///
	/// Defaults to [`DataTableSettings::default`].
	fn settings(&self) -> &DataTableSettings {
		&DEFAULT_SETTINGS
	}

	/// Rows written to the CSV export
	///
	/// Override this in the view. The default exports nothing; views whose
	/// rows are [`Record`]s can delegate to
	/// [`export_rows`](Self::export_rows).
	fn get_csv_data(&self, query: &Q) -> Vec<Vec<String>> {
		let _ = query;
		tracing::debug!("get_csv_data is not overridden, exporting no rows");
		Vec::new()
	}

	/// Header names of the exported columns
	fn get_csv_header(&self) -> Vec<String> {
		self.columns()
			.iter()
			.filter(|c| c.is_exported())
			.map(|c| c.header_name().to_string())
			.collect()
	}

	/// Header row followed by one row per record, for exported columns
	fn export_rows(&self, query: &Q) -> Vec<Vec<String>>
	where
		Q::Item: Record,
	{
		let exported: Vec<&DataTableColumn> =
			self.columns().iter().filter(|c| c.is_exported()).collect();
		let mut rows = vec![self.get_csv_header()];
		for obj in query.slice(0, query.count()) {
			rows.push(
				exported
					.iter()
					.map(|column| {
						let cell = match column.field_name() {
							Some(field) => self.get_cell(Some(&obj), field),
							None => Value::Null,
						};
						value_to_text(&cell).unwrap_or_default()
					})
					.collect(),
			);
		}
		rows
	}

	/// Contents of the cell for `field` on `obj`
	///
	/// Choice fields render their label. Other fields, and choice fields
	/// whose label is blank, render the raw attribute. Missing objects and
	/// unknown attributes render as an empty string.
	fn get_cell<R>(&self, obj: Option<&R>, field: &str) -> Value
	where
		R: Record,
	{
		let Some(obj) = obj else {
			return Value::String(String::new());
		};

		if R::field_meta(field).is_none() {
			tracing::debug!("Field {} does not exist on the model", field);
		} else if let Some(display) = obj.display_value(field).filter(|d| !d.is_empty()) {
			return Value::String(display);
		}

		obj.attribute(field).unwrap_or_else(|| {
			tracing::debug!("Object has no attribute {}", field);
			Value::String(String::new())
		})
	}

	/// Column field to sort expression, for columns that have both
	///
	/// An empty sort expression counts as no expression.
	fn sortable_columns(&self) -> HashMap<String, String> {
		self.columns()
			.iter()
			.filter_map(|c| {
				let expression = c.sort_expr().filter(|e| !e.is_empty())?;
				Some((c.field_name()?.to_string(), expression.to_string()))
			})
			.collect()
	}

	/// Orders `query` by the requested column
	///
	/// `sort` overrides the sort parameter of the request. Leading `-`
	/// markers are stripped to find the column; a leading `-` on the key
	/// makes the ordering descending. Returns the query together with the
	/// applied ordering expression, or the untouched query and `None` when
	/// the key is missing or unmapped.
	fn sort_queryset(&self, query: Q, sort: Option<&str>) -> (Q, Option<String>) {
		if self.columns().is_empty() || query.is_empty() {
			return (query, None);
		}

		let sort = sort.or_else(|| self.query_params().get(&self.settings().sort_variable_name));
		let Some(sort) = sort.filter(|s| !s.is_empty()) else {
			return (query, None);
		};

		let sortable = self.sortable_columns();
		match sortable.get(sort.trim_matches('-')) {
			Some(expression) => {
				let expression = if sort.starts_with('-') {
					format!("-{}", expression)
				} else {
					expression.clone()
				};
				(query.order_by(&[expression.as_str()]), Some(expression))
			}
			None => {
				tracing::debug!("Sort key {} is not mapped to a column", sort);
				(query, None)
			}
		}
	}

	/// Returns the requested page, or the first page when the request is bad
	///
	/// Also returns the page number parsed from the request.
	fn paginate(&self, query: &Q) -> (Page<Q::Item>, i64) {
		let settings = self.settings();
		let raw = self
			.query_params()
			.get(&settings.query_variable_name)
			.filter(|p| !p.is_empty())
			.unwrap_or("1");

		let paginator = Paginator::new(query, settings.rows_per_page)
			.orphans(settings.orphans)
			.allow_empty_first_page(settings.allow_empty_first_page);

		let number = paginator.parse_number(raw).unwrap_or_else(|e| {
			tracing::debug!(page = raw, "{}, using page 1", e);
			1
		});

		let page = paginator.page(number).or_else(|e| {
			tracing::debug!("{}, using page 1", e);
			paginator.page(1)
		});
		let page = page.unwrap_or_else(|_| {
			Page::new(
				Vec::new(),
				1,
				paginator.num_pages(),
				paginator.count(),
				paginator.per_page(),
			)
		});
		(page, number)
	}

	/// Whether the request asks for a CSV download
	fn export_requested(&self) -> bool {
		self.query_params()
			.get(&self.settings().export_variable_name)
			.is_some_and(|v| v == CSV_EXPORT_VALUE)
	}

	/// Writes the export rows as CSV and wraps them in a download response
	///
	/// # Errors
	///
	/// Returns an error if the CSV writer fails.
	fn do_csv_export(&self, query: &Q) -> Result<Response> {
		let rows = self.get_csv_data(query);
		let mut writer = csv::WriterBuilder::new()
			.flexible(true)
			.terminator(csv::Terminator::CRLF)
			.from_writer(Vec::new());
		for row in &rows {
			writer.write_record(row)?;
		}
		let data = writer.into_inner().map_err(|e| e.into_error())?;

		tracing::debug!(
			"Exporting {} rows as {}",
			rows.len(),
			self.settings().csv_file_name
		);
		Ok(Response::ok()
			.with_content_type(CSV_CONTENT_TYPE)
			.with_attachment(&self.settings().csv_file_name)
			.with_body(data))
	}

	/// Sorts `query`, then either exports it or paginates it
	///
	/// # Errors
	///
	/// Returns an error only if a requested CSV export fails to write.
	fn data_table_query(&self, query: Q) -> Result<DataTableOutcome<Q::Item>> {
		let (query, sort) = self.sort_queryset(query, None);
		if self.export_requested() {
			return Ok(DataTableOutcome::Export(self.do_csv_export(&query)?));
		}
		let (page, requested_page) = self.paginate(&query);
		Ok(DataTableOutcome::Page(PageResult {
			page,
			sort,
			requested_page,
		}))
	}

	/// Template context for a paginated listing
	///
	/// Holds the page under [`PAGE_CONTEXT_KEY`], the raw sort parameter,
	/// the header cells and the query string without the page parameter.
	fn get_context_data_paginator(&self, result: &PageResult<Q::Item>) -> Context
	where
		Q::Item: Serialize,
	{
		let params = self.query_params();
		let settings = self.settings();
		let sort = params.get(&settings.sort_variable_name);

		let mut context = Context::new();
		context.insert(PAGE_CONTEXT_KEY.to_string(), page_context(&result.page));
		context.insert("sort".to_string(), json!(sort));
		context.insert("sort_expression".to_string(), json!(result.sort));
		context.insert(
			"columns".to_string(),
			json!(header_cells(self.columns(), sort)),
		);
		context.insert(
			"url_query".to_string(),
			json!(params.without(&settings.query_variable_name)),
		);
		context
	}
}

/// Serializes a page with the navigation values templates use
pub fn page_context<T: Serialize>(page: &Page<T>) -> Value {
	json!({
		"object_list": page.object_list,
		"number": page.number,
		"num_pages": page.num_pages,
		"count": page.count,
		"has_next": page.has_next(),
		"has_previous": page.has_previous(),
		"has_other_pages": page.has_other_pages(),
		"next_page_number": page.next_page_number().ok(),
		"previous_page_number": page.previous_page_number().ok(),
		"start_index": page.start_index(),
		"end_index": page.end_index(),
		"page_range": page.page_range().collect::<Vec<_>>(),
		"elided_page_range": page.get_elided_page_range(3, 2),
	})
}
