//! Page-number pagination over a [`QuerySource`]
//!
//! Mirrors Django's `Paginator`: pages are 1-indexed, a trailing page with
//! at most `orphans` rows is merged into the previous one, and an empty
//! result set still has a single empty first page unless that is disabled.

use crate::error::{DataTableError, Result};
use crate::query::QuerySource;
use serde::Serialize;

const MIN_PAGE_MESSAGE: &str = "That page number is less than 1";
const NO_RESULTS_MESSAGE: &str = "That page contains no results";
const INVALID_PAGE_MESSAGE: &str = "That page number is not an integer";

/// Splits a query into fixed-size pages
#[derive(Debug)]
pub struct Paginator<'a, Q> {
	query: &'a Q,
	per_page: usize,
	orphans: usize,
	allow_empty_first_page: bool,
}

impl<'a, Q> Paginator<'a, Q>
where
	Q: QuerySource,
{
	/// Creates a paginator with `per_page` rows per page
	///
	/// A page size of zero is treated as one.
	pub fn new(query: &'a Q, per_page: usize) -> Self {
		Self {
			query,
			per_page: per_page.max(1),
			orphans: 0,
			allow_empty_first_page: true,
		}
	}

	/// Sets the minimum number of rows allowed on the last page
	pub fn orphans(mut self, orphans: usize) -> Self {
		self.orphans = orphans;
		self
	}

	/// Sets whether an empty result set yields an empty first page
	pub fn allow_empty_first_page(mut self, allow: bool) -> Self {
		self.allow_empty_first_page = allow;
		self
	}

	/// Rows per page
	pub fn per_page(&self) -> usize {
		self.per_page
	}

	/// Total number of rows
	pub fn count(&self) -> usize {
		self.query.count()
	}

	/// Total number of pages
	pub fn num_pages(&self) -> usize {
		let count = self.count();
		if count == 0 && !self.allow_empty_first_page {
			return 0;
		}
		let hits = count.saturating_sub(self.orphans).max(1);
		hits.div_ceil(self.per_page)
	}

	/// All page numbers, 1-indexed
	pub fn page_range(&self) -> std::ops::RangeInclusive<usize> {
		1..=self.num_pages()
	}

	/// Parses and validates a page number given as text
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_datatable::{FieldMeta, MemoryQuerySet, Paginator, Record};
	/// # use serde_json::Value;
	/// # #[derive(Clone)]
	/// # struct Row;
	/// # impl Record for Row {
	/// #     fn fields() -> Vec<FieldMeta> { Vec::new() }
	/// #     fn attribute(&self, _: &str) -> Option<Value> { None }
	/// # }
	///
	/// let qs = MemoryQuerySet::new(vec![Row; 30]);
	/// let paginator = Paginator::new(&qs, 10);
	/// assert_eq!(paginator.validate_number_str(" 2 ").unwrap(), 2);
	/// assert!(paginator.validate_number_str("two").is_err());
	/// assert!(paginator.validate_number_str("4").is_err());
	/// ```
	pub fn validate_number_str(&self, number: &str) -> Result<usize> {
		let number = self.parse_number(number)?;
		self.validate_number(number)
	}

	/// Parses a page number given as text, without checking its range
	///
	/// Surrounding whitespace is ignored.
	pub fn parse_number(&self, number: &str) -> Result<i64> {
		number
			.trim()
			.parse::<i64>()
			.map_err(|_| DataTableError::PageNotAnInteger(INVALID_PAGE_MESSAGE.to_string()))
	}

	/// Validates a page number against the page count
	pub fn validate_number(&self, number: i64) -> Result<usize> {
		if number < 1 {
			return Err(DataTableError::EmptyPage(MIN_PAGE_MESSAGE.to_string()));
		}
		let number = usize::try_from(number)
			.map_err(|_| DataTableError::EmptyPage(NO_RESULTS_MESSAGE.to_string()))?;
		if number > self.num_pages() {
			if number == 1 && self.allow_empty_first_page {
				return Ok(number);
			}
			return Err(DataTableError::EmptyPage(NO_RESULTS_MESSAGE.to_string()));
		}
		Ok(number)
	}

	/// Returns the page with the given 1-based number
	///
	/// # Errors
	///
	/// Returns [`DataTableError::EmptyPage`] when the number is below 1 or
	/// past the last page.
	pub fn page(&self, number: i64) -> Result<Page<Q::Item>> {
		let number = self.validate_number(number)?;
		let count = self.count();
		let bottom = (number - 1) * self.per_page;
		let mut top = bottom + self.per_page;
		if top + self.orphans >= count {
			top = count;
		}
		Ok(Page::new(
			self.query.slice(bottom, top),
			number,
			self.num_pages(),
			count,
			self.per_page,
		))
	}
}

/// A single page of results
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
	/// Items in this page
	pub object_list: Vec<T>,
	/// Current page number (1-indexed)
	pub number: usize,
	/// Total number of pages
	pub num_pages: usize,
	/// Total number of items across all pages
	pub count: usize,
	/// Items per page
	pub page_size: usize,
}

impl<T> Page<T> {
	/// Creates a new page
	pub fn new(
		object_list: Vec<T>,
		number: usize,
		num_pages: usize,
		count: usize,
		page_size: usize,
	) -> Self {
		Self {
			object_list,
			number,
			num_pages,
			count,
			page_size,
		}
	}

	/// Returns the 1-based index of the first item on this page
	pub fn start_index(&self) -> usize {
		if self.count == 0 {
			0
		} else {
			(self.number - 1) * self.page_size + 1
		}
	}

	/// Returns the 1-based index of the last item on this page
	pub fn end_index(&self) -> usize {
		if self.object_list.is_empty() {
			self.start_index()
		} else {
			self.start_index() + self.object_list.len() - 1
		}
	}

	/// Returns true if there is a next page
	pub fn has_next(&self) -> bool {
		self.number < self.num_pages
	}

	/// Returns true if there is a previous page
	pub fn has_previous(&self) -> bool {
		self.number > 1
	}

	/// Returns true if there are other pages (previous or next)
	pub fn has_other_pages(&self) -> bool {
		self.has_previous() || self.has_next()
	}

	/// Returns the next page number
	///
	/// # Errors
	/// Returns `EmptyPage` if there is no next page
	pub fn next_page_number(&self) -> Result<usize> {
		if self.has_next() {
			Ok(self.number + 1)
		} else {
			Err(DataTableError::EmptyPage(NO_RESULTS_MESSAGE.to_string()))
		}
	}

	/// Returns the previous page number
	///
	/// # Errors
	/// Returns `EmptyPage` if there is no previous page
	pub fn previous_page_number(&self) -> Result<usize> {
		if self.has_previous() {
			Ok(self.number - 1)
		} else {
			Err(DataTableError::EmptyPage(MIN_PAGE_MESSAGE.to_string()))
		}
	}

	/// Number of items on this page
	pub fn len(&self) -> usize {
		self.object_list.len()
	}

	/// Returns true if this page contains no items
	pub fn is_empty(&self) -> bool {
		self.object_list.is_empty()
	}

	/// Returns an iterator over all page numbers (1-indexed)
	pub fn page_range(&self) -> std::ops::RangeInclusive<usize> {
		1..=self.num_pages
	}

	/// Returns page numbers around the current page, `None` marking an ellipsis
	///
	/// Ranges short enough to show in full are not elided.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_datatable::Page;
	///
	/// let page = Page::new(vec![1], 10, 20, 200, 10);
	/// let elided = page.get_elided_page_range(2, 2);
	/// assert_eq!(
	///     elided,
	///     vec![
	///         Some(1), Some(2), None,
	///         Some(8), Some(9), Some(10), Some(11), Some(12),
	///         None, Some(19), Some(20),
	///     ]
	/// );
	/// ```
	pub fn get_elided_page_range(&self, on_each_side: usize, on_ends: usize) -> Vec<Option<usize>> {
		let number = self.number;
		let num_pages = self.num_pages;
		if num_pages <= (on_each_side + on_ends) * 2 {
			return self.page_range().map(Some).collect();
		}

		let mut result = Vec::new();
		if number > 1 + on_each_side + on_ends + 1 {
			result.extend((1..=on_ends).map(Some));
			result.push(None);
			result.extend((number - on_each_side..=number).map(Some));
		} else {
			result.extend((1..=number).map(Some));
		}

		if number + on_each_side + on_ends + 1 < num_pages {
			result.extend((number + 1..=number + on_each_side).map(Some));
			result.push(None);
			result.extend((num_pages - on_ends + 1..=num_pages).map(Some));
		} else {
			result.extend((number + 1..=num_pages).map(Some));
		}
		result
	}

	/// Get an item by index
	pub fn get(&self, index: usize) -> Option<&T> {
		self.object_list.get(index)
	}
}

impl<T> std::ops::Index<usize> for Page<T> {
	type Output = T;

	fn index(&self, index: usize) -> &Self::Output {
		&self.object_list[index]
	}
}

impl<T> IntoIterator for Page<T> {
	type Item = T;
	type IntoIter = std::vec::IntoIter<T>;

	fn into_iter(self) -> Self::IntoIter {
		self.object_list.into_iter()
	}
}

impl<'a, T> IntoIterator for &'a Page<T> {
	type Item = &'a T;
	type IntoIter = std::slice::Iter<'a, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.object_list.iter()
	}
}
