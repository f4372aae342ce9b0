//! Query-string parameters of the incoming request

/// Decoded query-string parameters
///
/// Keys may repeat; [`get`](Self::get) returns the last value, matching how
/// Django's `QueryDict.get` behaves.
///
/// # Examples
///
/// ```
/// use reinhardt_datatable::QueryParams;
///
/// let params = QueryParams::parse("page=2&sort=-name&tag=a&tag=b");
/// assert_eq!(params.get("page"), Some("2"));
/// assert_eq!(params.get("tag"), Some("b"));
/// assert_eq!(params.get_all("tag"), vec!["a", "b"]);
/// assert_eq!(params.without("page"), "sort=-name&tag=a&tag=b");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
	pairs: Vec<(String, String)>,
}

impl QueryParams {
	/// Creates an empty parameter set
	pub fn new() -> Self {
		Self::default()
	}

	/// Decodes a query string, with or without the leading `?`
	///
	/// Malformed input yields an empty parameter set.
	pub fn parse(query: &str) -> Self {
		let query = query.strip_prefix('?').unwrap_or(query);
		match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
			Ok(pairs) => Self { pairs },
			Err(e) => {
				tracing::debug!(error = %e, "ignoring malformed query string");
				Self::default()
			}
		}
	}

	/// Decodes the query component of a request URI
	pub fn from_uri(uri: &http::Uri) -> Self {
		uri.query().map(Self::parse).unwrap_or_default()
	}

	/// Builds a parameter set from key/value pairs
	pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			pairs: pairs
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}

	/// Appends a value for `key`
	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.pairs.push((key.into(), value.into()));
		self
	}

	/// Last value for `key`
	pub fn get(&self, key: &str) -> Option<&str> {
		self.pairs
			.iter()
			.rev()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	/// All values for `key`, in order
	pub fn get_all(&self, key: &str) -> Vec<&str> {
		self.pairs
			.iter()
			.filter(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
			.collect()
	}

	/// Whether no parameters are present
	pub fn is_empty(&self) -> bool {
		self.pairs.is_empty()
	}

	/// Re-encodes every parameter except `key`
	///
	/// Used to build pagination and sorting links that keep the rest of the
	/// query intact.
	pub fn without(&self, key: &str) -> String {
		let kept: Vec<&(String, String)> = self.pairs.iter().filter(|(k, _)| k != key).collect();
		serde_urlencoded::to_string(kept).unwrap_or_else(|e| {
			tracing::debug!(error = %e, "failed to encode query string");
			String::new()
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_strips_question_mark() {
		let params = QueryParams::parse("?export=csv");
		assert_eq!(params.get("export"), Some("csv"));
	}

	#[test]
	fn test_parse_decodes_values() {
		let params = QueryParams::parse("q=a+b%26c&empty=");
		assert_eq!(params.get("q"), Some("a b&c"));
		assert_eq!(params.get("empty"), Some(""));
		assert_eq!(params.get("missing"), None);
	}

	#[test]
	fn test_from_uri() {
		let uri: http::Uri = "/hosts/?page=3".parse().unwrap();
		assert_eq!(QueryParams::from_uri(&uri).get("page"), Some("3"));

		let uri: http::Uri = "/hosts/".parse().unwrap();
		assert!(QueryParams::from_uri(&uri).is_empty());
	}

	#[test]
	fn test_without_reencodes() {
		let params = QueryParams::new().with("page", "2").with("q", "a b");
		assert_eq!(params.without("page"), "q=a+b");

		let params = QueryParams::from_pairs([("sort", "-name"), ("page", "4")]);
		assert_eq!(params.without("page"), "sort=-name");
		assert_eq!(params.without("missing"), "sort=-name&page=4");
	}
}
