//! Data table support for Reinhardt list views
//!
//! This crate adds column sorting, page-number pagination and CSV export to
//! a list view backed by an orderable query, driven by query-string
//! parameters.
//!
//! # Features
//!
//! - **Columns**: [`DataTableColumn`] descriptors with header labels, field
//!   names, display hints and sort expressions
//! - **Sorting**: `?sort=field` / `?sort=-field`, mapped through the columns'
//!   sort expressions
//! - **Pagination**: `?page=N` with a Django-equivalent [`Paginator`]; bad or
//!   out-of-range numbers fall back to the first page
//! - **Export**: `?export=csv` returns a CSV attachment [`Response`]
//! - **Templates**: page, header and query-string context for rendering
//!
//! # Architecture
//!
//! ```mermaid
//! graph TD
//!     A[DataTableMixin] --> B[Columns]
//!     A --> C[QueryParams]
//!     A --> D[Settings]
//!     A --> E[QuerySource]
//!     E --> F[order_by]
//!     A --> G[Paginator]
//!     G --> H[Page]
//!     A --> I[CSV Export]
//!     I --> J[Response]
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod column;
pub mod error;
pub mod header;
pub mod mixin;
pub mod paginator;
pub mod params;
pub mod query;
pub mod record;
pub mod response;
pub mod settings;

// Re-exports for convenience
pub use column::{ColumnType, DataTableColumn};
pub use error::{DataTableError, Result};
pub use header::{HeaderCell, header_cells};
pub use mixin::{
	CSV_CONTENT_TYPE, CSV_EXPORT_VALUE, Context, DataTableMixin, DataTableOutcome,
	PAGE_CONTEXT_KEY, PageResult, page_context,
};
pub use paginator::{Page, Paginator};
pub use params::QueryParams;
pub use query::{MemoryQuerySet, OrderingTerm, QuerySource, SortDirection, compare_values};
pub use record::{FieldMeta, Record, value_to_text};
pub use response::Response;
pub use settings::DataTableSettings;
