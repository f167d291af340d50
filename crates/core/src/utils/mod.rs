pub mod time_utils;

pub use time_utils::{
    end_of_local_day, local_date_from_utc, start_of_local_day, ReportingClock, DEFAULT_REPORTING_TZ,
};
