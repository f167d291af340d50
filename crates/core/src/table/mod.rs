//! Table module - sorting, filtering and search for dashboard tables.

mod sort_filter;
mod sort_keys;

pub use sort_filter::{
    filter_rows, matches_search, search_and_sort, sort_rows, Searchable, SortDirection,
    SortKey, SortSpec, SortValue, Sortable,
};
pub use sort_keys::{AccountBreakdownSortKey, AccountOverviewSortKey, PaymentSortKey};
