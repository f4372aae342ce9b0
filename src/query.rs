//! Orderable queries
//!
//! [`QuerySource`] is the part of a query set a data table relies on:
//! ordering by field expressions, counting and slicing. Ordering follows the
//! ORM convention where a leading `-` means descending.
//!
//! [`MemoryQuerySet`] implements it over an owned `Vec` of [`Record`]s.

use crate::record::Record;
use serde_json::Value;
use std::cmp::Ordering;

/// Sort direction of an ordering expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
	/// Smallest first
	Ascending,
	/// Largest first
	Descending,
}

/// A parsed ordering expression such as `name` or `-created_at`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderingTerm {
	/// Field path
	pub field: String,
	/// Direction
	pub direction: SortDirection,
}

impl OrderingTerm {
	/// Parses an ordering expression
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_datatable::{OrderingTerm, SortDirection};
	///
	/// let term = OrderingTerm::parse("-created_at");
	/// assert_eq!(term.field, "created_at");
	/// assert_eq!(term.direction, SortDirection::Descending);
	/// assert_eq!(term.to_string(), "-created_at");
	/// ```
	pub fn parse(expression: &str) -> Self {
		match expression.strip_prefix('-') {
			Some(field) => Self {
				field: field.to_string(),
				direction: SortDirection::Descending,
			},
			None => Self {
				field: expression.to_string(),
				direction: SortDirection::Ascending,
			},
		}
	}
}

impl std::fmt::Display for OrderingTerm {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.direction {
			SortDirection::Ascending => write!(f, "{}", self.field),
			SortDirection::Descending => write!(f, "-{}", self.field),
		}
	}
}

/// The query operations a data table needs
pub trait QuerySource {
	/// Row type produced by the query
	type Item;

	/// Replaces the ordering of the query
	///
	/// Fields prefixed with `-` sort descending.
	fn order_by(self, fields: &[&str]) -> Self
	where
		Self: Sized;

	/// Current ordering expressions
	fn ordering(&self) -> &[String];

	/// Number of rows the query yields
	fn count(&self) -> usize;

	/// Rows in `start..end`, clamped to the result size
	fn slice(&self, start: usize, end: usize) -> Vec<Self::Item>;

	/// Whether the query yields no rows
	fn is_empty(&self) -> bool {
		self.count() == 0
	}
}

/// In-memory query set over records
///
/// # Examples
///
/// ```
/// use reinhardt_datatable::{FieldMeta, MemoryQuerySet, QuerySource, Record};
/// use serde_json::{json, Value};
///
/// #[derive(Debug, Clone)]
/// struct Item { n: i64 }
///
/// impl Record for Item {
///     fn fields() -> Vec<FieldMeta> { vec![FieldMeta::new("n")] }
///     fn attribute(&self, name: &str) -> Option<Value> {
///         (name == "n").then(|| json!(self.n))
///     }
/// }
///
/// let qs = MemoryQuerySet::new(vec![Item { n: 2 }, Item { n: 3 }, Item { n: 1 }])
///     .order_by(&["-n"]);
/// let ns: Vec<i64> = qs.slice(0, 3).iter().map(|i| i.n).collect();
/// assert_eq!(ns, vec![3, 2, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryQuerySet<R> {
	items: Vec<R>,
	ordering: Vec<String>,
}

impl<R> MemoryQuerySet<R>
where
	R: Record + Clone,
{
	/// Creates a query set in insertion order
	pub fn new(items: Vec<R>) -> Self {
		Self {
			items,
			ordering: Vec::new(),
		}
	}

	/// All rows in current order
	pub fn items(&self) -> &[R] {
		&self.items
	}

	fn compare(a: &R, b: &R, terms: &[OrderingTerm]) -> Ordering {
		for term in terms {
			let left = a.attribute(&term.field).unwrap_or(Value::Null);
			let right = b.attribute(&term.field).unwrap_or(Value::Null);
			let ord = compare_values(&left, &right);
			let ord = match term.direction {
				SortDirection::Ascending => ord,
				SortDirection::Descending => ord.reverse(),
			};
			if ord != Ordering::Equal {
				return ord;
			}
		}
		Ordering::Equal
	}
}

impl<R> QuerySource for MemoryQuerySet<R>
where
	R: Record + Clone,
{
	type Item = R;

	fn order_by(mut self, fields: &[&str]) -> Self {
		self.ordering = fields.iter().map(|s| s.to_string()).collect();
		let terms: Vec<OrderingTerm> = fields.iter().map(|f| OrderingTerm::parse(f)).collect();
		// Stable, so equal keys keep their previous relative order
		self.items.sort_by(|a, b| Self::compare(a, b, &terms));
		self
	}

	fn ordering(&self) -> &[String] {
		&self.ordering
	}

	fn count(&self) -> usize {
		self.items.len()
	}

	fn slice(&self, start: usize, end: usize) -> Vec<R> {
		let end = end.min(self.items.len());
		let start = start.min(end);
		self.items[start..end].to_vec()
	}
}

/// Orders JSON values the way SQL backends order mixed columns:
/// nulls, then booleans, numbers, strings, and anything else last.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
	fn rank(v: &Value) -> u8 {
		match v {
			Value::Null => 0,
			Value::Bool(_) => 1,
			Value::Number(_) => 2,
			Value::String(_) => 3,
			Value::Array(_) => 4,
			Value::Object(_) => 5,
		}
	}

	match (a, b) {
		(Value::Bool(x), Value::Bool(y)) => x.cmp(y),
		(Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
			(Some(x), Some(y)) => x.cmp(&y),
			_ => {
				let x = x.as_f64().unwrap_or(f64::NAN);
				let y = y.as_f64().unwrap_or(f64::NAN);
				x.partial_cmp(&y).unwrap_or(Ordering::Equal)
			}
		},
		(Value::String(x), Value::String(y)) => x.cmp(y),
		(Value::Array(x), Value::Array(y)) => x.len().cmp(&y.len()),
		_ => rank(a).cmp(&rank(b)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::record::FieldMeta;
	use serde_json::json;

	#[derive(Debug, Clone, PartialEq)]
	struct Row {
		name: &'static str,
		size: Option<i64>,
	}

	impl Record for Row {
		fn fields() -> Vec<FieldMeta> {
			vec![FieldMeta::new("name"), FieldMeta::new("size")]
		}

		fn attribute(&self, name: &str) -> Option<Value> {
			match name {
				"name" => Some(json!(self.name)),
				"size" => Some(json!(self.size)),
				_ => None,
			}
		}
	}

	fn rows() -> Vec<Row> {
		vec![
			Row { name: "b", size: Some(2) },
			Row { name: "a", size: None },
			Row { name: "c", size: Some(2) },
			Row { name: "d", size: Some(1) },
		]
	}

	fn names(qs: &MemoryQuerySet<Row>) -> Vec<&'static str> {
		qs.items().iter().map(|r| r.name).collect()
	}

	#[test]
	fn test_order_by_ascending_puts_nulls_first() {
		let qs = MemoryQuerySet::new(rows()).order_by(&["size"]);
		assert_eq!(names(&qs), vec!["a", "d", "b", "c"]);
		assert_eq!(qs.ordering(), &["size".to_string()]);
	}

	#[test]
	fn test_order_by_descending_with_tiebreak() {
		let qs = MemoryQuerySet::new(rows()).order_by(&["-size", "-name"]);
		assert_eq!(names(&qs), vec!["c", "b", "d", "a"]);
	}

	#[test]
	fn test_order_by_unknown_field_keeps_order() {
		let qs = MemoryQuerySet::new(rows()).order_by(&["missing"]);
		assert_eq!(names(&qs), vec!["b", "a", "c", "d"]);
	}

	#[test]
	fn test_slice_clamps() {
		let qs = MemoryQuerySet::new(rows());
		assert_eq!(qs.slice(2, 10).len(), 2);
		assert!(qs.slice(10, 20).is_empty());
		assert_eq!(qs.count(), 4);
		assert!(!qs.is_empty());
	}

	#[test]
	fn test_ordering_term_roundtrip() {
		let term = OrderingTerm::parse("name");
		assert_eq!(term.direction, SortDirection::Ascending);
		assert_eq!(term.to_string(), "name");
	}
}
