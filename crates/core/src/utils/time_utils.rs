use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Default reporting timezone.
/// Calendar-aligned windows (TODAY, MTD) and bucket keys are evaluated in this
/// zone unless the settings say otherwise.
pub const DEFAULT_REPORTING_TZ: Tz = chrono_tz::UTC;

/// Converts a UTC instant to a calendar date in the given timezone.
///
/// This is the single source of truth for turning instants into reporting
/// dates. Every window and bucket decision goes through it.
pub fn local_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// First instant of `date` in `tz`, as UTC.
///
/// When local midnight does not exist (DST gap) the first valid local instant
/// after it is used; when it is ambiguous the earlier one wins.
pub fn start_of_local_day(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    resolve_local(tz, date.and_time(NaiveTime::MIN))
}

/// Last representable instant of `date` in `tz`, as UTC.
pub fn end_of_local_day(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    match date.succ_opt() {
        Some(next) => start_of_local_day(next, tz) - Duration::nanoseconds(1),
        None => DateTime::<Utc>::MAX_UTC,
    }
}

fn resolve_local(tz: Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    let local = match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => tz.from_local_datetime(&(naive + Duration::hours(1))).earliest(),
    };
    local
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

/// The instant a computation is evaluated at, paired with the timezone that
/// defines its calendar.
///
/// The engine never reads the system clock. Callers build one of these per
/// request (usually through `EngineSettings::clock_at`) and pass it down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingClock {
    pub now: DateTime<Utc>,
    pub timezone: Tz,
}

impl ReportingClock {
    pub fn new(now: DateTime<Utc>, timezone: Tz) -> Self {
        Self { now, timezone }
    }

    /// Clock evaluated in the default reporting timezone.
    pub fn utc(now: DateTime<Utc>) -> Self {
        Self::new(now, DEFAULT_REPORTING_TZ)
    }

    /// Calendar date of `now`.
    pub fn today(&self) -> NaiveDate {
        local_date_from_utc(self.now, self.timezone)
    }

    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        local_date_from_utc(instant, self.timezone)
    }
}
