//! Bucket key derivation for daily, weekly and monthly rollups.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::ConfigurationError;
use crate::utils::local_date_from_utc;

/// Width of a time bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Granularity {
    Daily,
    #[default]
    Weekly,
    Monthly,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Daily => "DAILY",
            Granularity::Weekly => "WEEKLY",
            Granularity::Monthly => "MONTHLY",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DAILY" => Ok(Granularity::Daily),
            "WEEKLY" => Ok(Granularity::Weekly),
            "MONTHLY" => Ok(Granularity::Monthly),
            _ => Err(ConfigurationError::UnknownGranularity(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Granularity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

/// Total order over buckets of one granularity.
///
/// Week and month keys carry the year so that week 1 of 2025 sorts after
/// week 53 of 2024 instead of colliding with week 1 of 2024.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BucketSortKey {
    Day(NaiveDate),
    Week { year: i32, week: u32 },
    Month { year: i32, month: u32 },
}

impl BucketSortKey {
    pub fn for_date(date: NaiveDate, granularity: Granularity) -> Self {
        match granularity {
            Granularity::Daily => BucketSortKey::Day(date),
            Granularity::Weekly => BucketSortKey::Week {
                year: date.year(),
                week: week_number(date),
            },
            Granularity::Monthly => BucketSortKey::Month {
                year: date.year(),
                month: date.month(),
            },
        }
    }

    pub fn granularity(&self) -> Granularity {
        match self {
            BucketSortKey::Day(_) => Granularity::Daily,
            BucketSortKey::Week { .. } => Granularity::Weekly,
            BucketSortKey::Month { .. } => Granularity::Monthly,
        }
    }

    /// Human label: "Jan 5", "W2 2024" or "January 2024".
    pub fn label(&self) -> String {
        match *self {
            BucketSortKey::Day(date) => date.format("%b %-d").to_string(),
            BucketSortKey::Week { year, week } => format!("W{} {}", week, year),
            BucketSortKey::Month { year, month } => NaiveDate::from_ymd_opt(year, month, 1)
                .map(|first| first.format("%B %Y").to_string())
                .unwrap_or_else(|| format!("{}-{:02}", year, month)),
        }
    }
}

/// A bucket's identity and display label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketKey {
    pub sort_key: BucketSortKey,
    pub label: String,
}

impl From<BucketSortKey> for BucketKey {
    fn from(sort_key: BucketSortKey) -> Self {
        Self {
            label: sort_key.label(),
            sort_key,
        }
    }
}

/// Week of the year, weeks starting on Sunday.
///
/// `ceil((day_of_year0 + jan1_weekday + 1) / 7)` where `jan1_weekday` counts
/// days from Sunday. Week 1 is the (possibly partial) week holding January 1.
pub fn week_number(date: NaiveDate) -> u32 {
    let jan1_offset = NaiveDate::from_ymd_opt(date.year(), 1, 1)
        .map(|jan1| jan1.weekday().num_days_from_sunday())
        .unwrap_or(0);
    let elapsed = date.ordinal0() + jan1_offset + 1;
    elapsed.div_ceil(7)
}

/// Bucket for a calendar date.
pub fn derive_key_for_date(date: NaiveDate, granularity: Granularity) -> BucketKey {
    BucketSortKey::for_date(date, granularity).into()
}

/// Bucket for an instant, read on the calendar of `tz`.
pub fn derive_key(timestamp: DateTime<Utc>, granularity: Granularity, tz: Tz) -> BucketKey {
    derive_key_for_date(local_date_from_utc(timestamp, tz), granularity)
}
