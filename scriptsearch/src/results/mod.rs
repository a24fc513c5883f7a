//! Ordering, paging and display of search results.

pub mod format;
mod pagination;
mod sort;

pub use format::{
    format_timestamp, format_upload_date, highlight_segments, plain_snippet, thumbnail_url, watch_url,
    SnippetSegment,
};
pub use pagination::{Paginator, DEFAULT_PAGE_SIZE};
pub use sort::{sort_results, SortField, SortSpec};
