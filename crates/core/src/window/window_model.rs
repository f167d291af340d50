//! Date-filter selections and the inclusion predicate behind every view.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};

use super::TimedEvent;
use crate::errors::ConfigurationError;
use crate::utils::{end_of_local_day, start_of_local_day, ReportingClock};

/// Length of the LAST_7D rolling window.
pub const LAST_7_DAYS: i64 = 7;
/// Length of the LAST_30D rolling window.
pub const LAST_30_DAYS: i64 = 30;

/// The selector label a dashboard sends, before custom bounds are attached.
///
/// Deserialization goes through [`FromStr`], so payloads accept the same
/// labels as query strings and environment overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum WindowKind {
    #[default]
    #[serde(rename = "ALL")]
    All,
    #[serde(rename = "TODAY")]
    Today,
    #[serde(rename = "LAST_7D")]
    Last7Days,
    #[serde(rename = "LAST_30D")]
    Last30Days,
    #[serde(rename = "MTD")]
    MonthToDate,
    #[serde(rename = "CUSTOM")]
    Custom,
}

impl WindowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowKind::All => "ALL",
            WindowKind::Today => "TODAY",
            WindowKind::Last7Days => "LAST_7D",
            WindowKind::Last30Days => "LAST_30D",
            WindowKind::MonthToDate => "MTD",
            WindowKind::Custom => "CUSTOM",
        }
    }
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ALL" => Ok(WindowKind::All),
            "TODAY" => Ok(WindowKind::Today),
            "LAST_7D" => Ok(WindowKind::Last7Days),
            "LAST_30D" => Ok(WindowKind::Last30Days),
            "MTD" | "MONTH_TO_DATE" => Ok(WindowKind::MonthToDate),
            "CUSTOM" => Ok(WindowKind::Custom),
            _ => Err(ConfigurationError::UnknownWindowKind(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for WindowKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

/// A resolved date filter.
///
/// Calendar-aligned windows (`Today`, `MonthToDate`) are evaluated in the
/// timezone of the [`ReportingClock`]; rolling windows are plain instant
/// arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    #[default]
    All,
    Today,
    Last7Days,
    Last30Days,
    MonthToDate,
    /// Inclusive on both ends. A missing bound makes the window match
    /// everything, the same as `All`.
    Custom {
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    },
}

impl TimeWindow {
    /// Builds a window from a selector and optional custom bounds.
    ///
    /// Bounds are ignored for every kind except `Custom`.
    pub fn from_kind(
        kind: WindowKind,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Self {
        match kind {
            WindowKind::All => TimeWindow::All,
            WindowKind::Today => TimeWindow::Today,
            WindowKind::Last7Days => TimeWindow::Last7Days,
            WindowKind::Last30Days => TimeWindow::Last30Days,
            WindowKind::MonthToDate => TimeWindow::MonthToDate,
            WindowKind::Custom => TimeWindow::custom(start, end),
        }
    }

    /// Parses a selector label. Unknown labels are a configuration error.
    pub fn parse(
        kind: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self::from_kind(kind.parse()?, start, end))
    }

    pub fn custom(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        if start.is_none() || end.is_none() {
            warn!(
                "Custom window missing a bound (start: {:?}, end: {:?}); matching all records",
                start, end
            );
        }
        TimeWindow::Custom { start, end }
    }

    /// Custom window over whole calendar days: from local midnight of `start`
    /// through the last instant of `end`.
    pub fn from_calendar_dates(start: Option<NaiveDate>, end: Option<NaiveDate>, tz: Tz) -> Self {
        Self::custom(
            start.map(|d| start_of_local_day(d, tz)),
            end.map(|d| end_of_local_day(d, tz)),
        )
    }

    pub fn kind(&self) -> WindowKind {
        match self {
            TimeWindow::All => WindowKind::All,
            TimeWindow::Today => WindowKind::Today,
            TimeWindow::Last7Days => WindowKind::Last7Days,
            TimeWindow::Last30Days => WindowKind::Last30Days,
            TimeWindow::MonthToDate => WindowKind::MonthToDate,
            TimeWindow::Custom { .. } => WindowKind::Custom,
        }
    }

    /// True when the window cannot exclude anything.
    pub fn is_unbounded(&self) -> bool {
        match self {
            TimeWindow::All => true,
            TimeWindow::Custom { start, end } => start.is_none() || end.is_none(),
            _ => false,
        }
    }

    pub fn includes(&self, timestamp: DateTime<Utc>, clock: &ReportingClock) -> bool {
        match self {
            TimeWindow::All => true,
            TimeWindow::Today => clock.local_date(timestamp) == clock.today(),
            TimeWindow::Last7Days => timestamp > clock.now - Duration::days(LAST_7_DAYS),
            TimeWindow::Last30Days => timestamp > clock.now - Duration::days(LAST_30_DAYS),
            TimeWindow::MonthToDate => {
                let date = clock.local_date(timestamp);
                let today = clock.today();
                date.year() == today.year() && date.month() == today.month()
            }
            TimeWindow::Custom {
                start: Some(start),
                end: Some(end),
            } => timestamp >= *start && timestamp <= *end,
            TimeWindow::Custom { .. } => true,
        }
    }

    pub fn includes_event<E: TimedEvent>(&self, event: &E, clock: &ReportingClock) -> bool {
        self.includes(event.event_time(clock.timezone), clock)
    }

    /// Events inside the window, in input order.
    pub fn select<'a, E: TimedEvent>(
        &'a self,
        events: &'a [E],
        clock: &'a ReportingClock,
    ) -> impl Iterator<Item = &'a E> + 'a {
        events
            .iter()
            .filter(move |event| self.includes_event(*event, clock))
    }
}
