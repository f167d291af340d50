//! Stable sorting, filtering and text search over dashboard table rows.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigurationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(ConfigurationError::UnknownSortDirection(s.to_string())),
        }
    }
}

/// A comparable field value pulled out of a row.
///
/// A given sort key always yields the same variant, so rows only ever compare
/// like with like.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue<'a> {
    Number(Decimal),
    Count(u64),
    Date(NaiveDate),
    Text(&'a str),
}

/// Column key of one sortable table.
pub trait SortKey: Copy + PartialEq {
    /// Direction a column sorts in when its header is first clicked.
    const FIRST_DIRECTION: SortDirection;

    /// Sort the table opens with.
    fn default_spec() -> SortSpec<Self>;
}

/// Row types with an enumerated set of sort keys.
pub trait Sortable {
    type Key: SortKey;

    fn sort_value(&self, key: Self::Key) -> SortValue<'_>;
}

/// Rows exposing the text fields a search box looks at.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;

    fn matches(&self, term: &str) -> bool {
        matches_search(term, &self.search_fields())
    }
}

/// Case-insensitive substring match against any field. A blank term matches.
pub fn matches_search(term: &str, fields: &[&str]) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Active column and direction of a sortable table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K: Copy + PartialEq> SortSpec<K> {
    pub fn new(key: K, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub fn ascending(key: K) -> Self {
        Self::new(key, SortDirection::Asc)
    }

    pub fn descending(key: K) -> Self {
        Self::new(key, SortDirection::Desc)
    }

}

impl<K: SortKey> SortSpec<K> {
    /// Next state after clicking a column header. A new column sorts in the
    /// table's first direction; clicking the active column while it is in
    /// that direction reverses it, and a second click restores it.
    pub fn toggle(&self, key: K) -> Self {
        if self.key == key && self.direction == K::FIRST_DIRECTION {
            Self::new(key, K::FIRST_DIRECTION.reversed())
        } else {
            Self::new(key, K::FIRST_DIRECTION)
        }
    }
}

impl<K> SortSpec<K>
where
    K: FromStr<Err = ConfigurationError>,
{
    /// Parses a key label and a direction label.
    pub fn parse(key: &str, direction: &str) -> Result<Self, ConfigurationError> {
        Ok(Self {
            key: key.parse()?,
            direction: direction.parse()?,
        })
    }
}

/// Sorts in place. The sort is stable in both directions: rows with equal
/// keys keep their input order.
pub fn sort_rows<R: Sortable>(rows: &mut [R], spec: &SortSpec<R::Key>) {
    rows.sort_by(|a, b| {
        spec.direction
            .apply(a.sort_value(spec.key).cmp(&b.sort_value(spec.key)))
    });
}

/// Keeps the rows matching `predicate`, in order.
pub fn filter_rows<R, P>(rows: Vec<R>, predicate: P) -> Vec<R>
where
    P: Fn(&R) -> bool,
{
    rows.into_iter().filter(|row| predicate(row)).collect()
}

/// Search then sort, the way every dashboard table is fed.
pub fn search_and_sort<R>(rows: Vec<R>, term: &str, spec: &SortSpec<R::Key>) -> Vec<R>
where
    R: Sortable + Searchable,
{
    let mut rows = filter_rows(rows, |row| row.matches(term));
    sort_rows(&mut rows, spec);
    rows
}
