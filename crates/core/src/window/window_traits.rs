use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Anything that happens at a point in time and can be windowed or bucketed.
///
/// Records carrying only a calendar date resolve it against the reporting
/// timezone, which is why the zone is passed in.
pub trait TimedEvent {
    fn event_time(&self, tz: Tz) -> DateTime<Utc>;
}

impl<T: TimedEvent + ?Sized> TimedEvent for &T {
    fn event_time(&self, tz: Tz) -> DateTime<Utc> {
        (**self).event_time(tz)
    }
}
