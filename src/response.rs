//! HTTP response returned by the export path

use bytes::Bytes;
use http::header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderName, HeaderValue};
use http::{HeaderMap, StatusCode};

/// HTTP response representation
#[derive(Debug, Clone)]
pub struct Response {
	/// Status code
	pub status: StatusCode,
	/// Response headers
	pub headers: HeaderMap,
	/// Response body
	pub body: Bytes,
}

impl Response {
	/// Create a new Response with the given status code
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_datatable::Response;
	/// use http::StatusCode;
	///
	/// let response = Response::new(StatusCode::OK);
	/// assert_eq!(response.status, StatusCode::OK);
	/// assert!(response.body.is_empty());
	/// ```
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	/// Create a Response with HTTP 200 OK status
	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	/// Set the response body
	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Add a custom header to the response
	///
	/// Names or values that are not valid header text are dropped.
	pub fn with_header(mut self, name: &str, value: &str) -> Self {
		match (
			HeaderName::from_bytes(name.as_bytes()),
			HeaderValue::from_str(value),
		) {
			(Ok(name), Ok(value)) => {
				self.headers.insert(name, value);
			}
			_ => tracing::warn!(header = name, "dropping invalid response header"),
		}
		self
	}

	/// Set the `Content-Type` header
	pub fn with_content_type(self, content_type: &str) -> Self {
		self.with_header(CONTENT_TYPE.as_str(), content_type)
	}

	/// Mark the body as a file download named `filename`
	///
	/// A filename that is not valid header text is left out of the header.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_datatable::Response;
	///
	/// let response = Response::ok().with_attachment("hosts.csv");
	/// assert_eq!(
	///     response.headers.get("content-disposition").unwrap(),
	///     "attachment; filename=hosts.csv"
	/// );
	/// ```
	pub fn with_attachment(self, filename: &str) -> Self {
		let disposition = format!("attachment; filename={}", filename);
		if HeaderValue::from_str(&disposition).is_ok() {
			self.with_header(CONTENT_DISPOSITION.as_str(), &disposition)
		} else {
			tracing::warn!(filename, "attachment filename is not valid header text");
			self.with_header(CONTENT_DISPOSITION.as_str(), "attachment")
		}
	}

	/// Body as UTF-8 text, lossy
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_with_header_drops_invalid() {
		let response = Response::ok()
			.with_header("X-Ok", "yes")
			.with_header("bad header", "x")
			.with_header("X-Bad-Value", "line\nbreak");
		assert_eq!(response.headers.len(), 1);
		assert_eq!(response.headers.get("x-ok").unwrap(), "yes");
	}

	#[test]
	fn test_attachment_with_invalid_filename() {
		let response = Response::ok().with_attachment("bad\nname.csv");
		assert_eq!(
			response.headers.get(CONTENT_DISPOSITION).unwrap(),
			"attachment"
		);
	}

	#[test]
	fn test_content_type_and_body() {
		let response = Response::ok()
			.with_content_type("application/csv")
			.with_body("a,b\r\n");
		assert_eq!(response.headers.get(CONTENT_TYPE).unwrap(), "application/csv");
		assert_eq!(response.text(), "a,b\r\n");
	}

	#[test]
	fn test_invalid_content_type_is_dropped() {
		let response = Response::ok().with_content_type("text/csv\r\nX-Injected: 1");
		assert!(response.headers.get(CONTENT_TYPE).is_none());
		assert!(response.headers.is_empty());
	}
}
