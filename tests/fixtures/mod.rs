//! Common test fixtures for reinhardt-datatable tests

#![allow(dead_code)]

use reinhardt_datatable::{
	ColumnType, DataTableColumn, DataTableMixin, DataTableSettings, FieldMeta, MemoryQuerySet,
	QueryParams, Record,
};
use rstest::*;
use serde::Serialize;
use serde_json::{Value, json};

/// Test host record with a choice field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestHost {
	pub id: i64,
	pub hostname: String,
	pub status: Option<String>,
	pub rack: Option<String>,
}

impl TestHost {
	pub fn new(id: i64, hostname: &str, status: Option<&str>) -> Self {
		Self {
			id,
			hostname: hostname.to_string(),
			status: status.map(str::to_string),
			rack: None,
		}
	}
}

impl Record for TestHost {
	fn fields() -> Vec<FieldMeta> {
		vec![
			FieldMeta::new("id"),
			FieldMeta::new("hostname"),
			FieldMeta::with_choices(
				"status",
				vec![
					("up".to_string(), "Up and running".to_string()),
					("down".to_string(), "Ünreachable".to_string()),
					("blank".to_string(), String::new()),
				],
			),
			FieldMeta::new("rack"),
		]
	}

	fn attribute(&self, name: &str) -> Option<Value> {
		match name {
			"id" => Some(json!(self.id)),
			"hostname" => Some(json!(self.hostname)),
			"status" => Some(json!(self.status)),
			"rack" => Some(json!(self.rack)),
			// Computed attribute that is not a declared field
			"fqdn" => Some(json!(format!("{}.example.com", self.hostname))),
			_ => None,
		}
	}
}

/// List view under test
pub struct HostListView {
	pub columns: Vec<DataTableColumn>,
	pub params: QueryParams,
	pub settings: DataTableSettings,
	pub export_records: bool,
}

impl HostListView {
	pub fn with_query(query: &str) -> Self {
		Self {
			columns: host_columns(),
			params: QueryParams::parse(query),
			settings: DataTableSettings::new().rows_per_page(2),
			export_records: true,
		}
	}
}

impl DataTableMixin<MemoryQuerySet<TestHost>> for HostListView {
	fn columns(&self) -> &[DataTableColumn] {
		&self.columns
	}

	fn query_params(&self) -> &QueryParams {
		&self.params
	}

	fn settings(&self) -> &DataTableSettings {
		&self.settings
	}

	fn get_csv_data(&self, query: &MemoryQuerySet<TestHost>) -> Vec<Vec<String>> {
		if self.export_records {
			self.export_rows(query)
		} else {
			Vec::new()
		}
	}
}

/// Columns of the host list
pub fn host_columns() -> Vec<DataTableColumn> {
	vec![
		DataTableColumn::new("ID").field("id").export(true),
		DataTableColumn::new("Hostname")
			.field("hostname")
			.sort_expression("hostname")
			.selectable(true)
			.export(true),
		DataTableColumn::new("Status")
			.field("status")
			.column_type(ColumnType::Boolean)
			.sort_expression("status")
			.export(true),
		DataTableColumn::new("Actions").bob_tag(true),
	]
}

/// Fixture providing five hosts in id order
#[fixture]
pub fn sample_hosts() -> Vec<TestHost> {
	vec![
		TestHost::new(1, "delta", Some("up")),
		TestHost::new(2, "alpha", Some("down")),
		TestHost::new(3, "echo", None),
		TestHost::new(4, "charlie", Some("up")),
		TestHost::new(5, "bravo", Some("unknown")),
	]
}

/// Fixture providing the hosts as a query set
#[fixture]
pub fn host_query(sample_hosts: Vec<TestHost>) -> MemoryQuerySet<TestHost> {
	MemoryQuerySet::new(sample_hosts)
}
