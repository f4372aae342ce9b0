//! Model records as seen by a data table
//!
//! A table reads cells by field name. [`Record`] is the seam to the data
//! model: it exposes field metadata (including choices) and raw attribute
//! values as [`serde_json::Value`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata for one model field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMeta {
	/// Field name
	pub name: String,
	/// `(value, label)` pairs for choice fields
	pub choices: Option<Vec<(String, String)>>,
}

impl FieldMeta {
	/// Creates metadata for a plain field
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			choices: None,
		}
	}

	/// Creates metadata for a field with predefined choices
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_datatable::FieldMeta;
	///
	/// let status = FieldMeta::with_choices(
	///     "status",
	///     vec![
	///         ("d".to_string(), "Draft".to_string()),
	///         ("p".to_string(), "Published".to_string()),
	///     ],
	/// );
	/// assert_eq!(status.label_for("p"), Some("Published"));
	/// assert_eq!(status.label_for("x"), None);
	/// ```
	pub fn with_choices(name: impl Into<String>, choices: Vec<(String, String)>) -> Self {
		Self {
			name: name.into(),
			choices: Some(choices),
		}
	}

	/// Whether this field declares choices
	pub fn has_choices(&self) -> bool {
		self.choices.as_ref().is_some_and(|c| !c.is_empty())
	}

	/// Looks up the label for a stored value
	pub fn label_for(&self, value: &str) -> Option<&str> {
		self.choices
			.as_ref()?
			.iter()
			.find(|(v, _)| v == value)
			.map(|(_, label)| label.as_str())
	}
}

/// A model instance that can be listed in a data table
///
/// # Examples
///
/// ```
/// use reinhardt_datatable::{FieldMeta, Record};
/// use serde_json::{json, Value};
///
/// struct Ticket {
///     title: String,
///     priority: u8,
/// }
///
/// impl Record for Ticket {
///     fn fields() -> Vec<FieldMeta> {
///         vec![
///             FieldMeta::new("title"),
///             FieldMeta::with_choices(
///                 "priority",
///                 vec![("1".into(), "Low".into()), ("2".into(), "High".into())],
///             ),
///         ]
///     }
///
///     fn attribute(&self, name: &str) -> Option<Value> {
///         match name {
///             "title" => Some(json!(self.title)),
///             "priority" => Some(json!(self.priority)),
///             _ => None,
///         }
///     }
/// }
///
/// let ticket = Ticket { title: "Crash".into(), priority: 2 };
/// assert_eq!(ticket.display_value("priority").as_deref(), Some("High"));
/// assert_eq!(ticket.display_value("title"), None);
/// ```
pub trait Record {
	/// Declared model fields
	fn fields() -> Vec<FieldMeta>
	where
		Self: Sized;

	/// Raw attribute value, `None` when the attribute does not exist
	///
	/// Attributes are not limited to declared fields; computed values and
	/// related lookups may be exposed here too.
	fn attribute(&self, name: &str) -> Option<Value>;

	/// Metadata for a declared field
	fn field_meta(name: &str) -> Option<FieldMeta>
	where
		Self: Sized,
	{
		Self::fields().into_iter().find(|f| f.name == name)
	}

	/// Human-readable value of a choice field
	///
	/// Returns `None` when the field is not declared, has no choices, or
	/// holds null. A stored value with no matching choice is returned as is.
	fn display_value(&self, name: &str) -> Option<String>
	where
		Self: Sized,
	{
		let meta = Self::field_meta(name)?;
		if !meta.has_choices() {
			return None;
		}
		let raw = value_to_text(&self.attribute(name)?)?;
		Some(meta.label_for(&raw).map(str::to_string).unwrap_or(raw))
	}
}

/// Renders a cell value as plain text, `None` for null
pub fn value_to_text(value: &Value) -> Option<String> {
	match value {
		Value::Null => None,
		Value::String(s) => Some(s.clone()),
		other => Some(other.to_string()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	struct Host {
		name: String,
		state: Option<i64>,
	}

	impl Record for Host {
		fn fields() -> Vec<FieldMeta> {
			vec![
				FieldMeta::new("name"),
				FieldMeta::with_choices(
					"state",
					vec![
						("1".to_string(), "Up".to_string()),
						("2".to_string(), "Down".to_string()),
					],
				),
			]
		}

		fn attribute(&self, name: &str) -> Option<Value> {
			match name {
				"name" => Some(json!(self.name)),
				"state" => Some(json!(self.state)),
				_ => None,
			}
		}
	}

	#[test]
	fn test_display_value_uses_label() {
		let host = Host {
			name: "db1".to_string(),
			state: Some(2),
		};
		assert_eq!(host.display_value("state").as_deref(), Some("Down"));
	}

	#[test]
	fn test_display_value_unknown_choice_returns_raw() {
		let host = Host {
			name: "db1".to_string(),
			state: Some(7),
		};
		assert_eq!(host.display_value("state").as_deref(), Some("7"));
	}

	#[test]
	fn test_display_value_null_and_plain_fields() {
		let host = Host {
			name: "db1".to_string(),
			state: None,
		};
		assert_eq!(host.display_value("state"), None);
		assert_eq!(host.display_value("name"), None);
		assert_eq!(host.display_value("missing"), None);
	}
}
