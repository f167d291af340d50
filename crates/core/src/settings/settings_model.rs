//! Engine settings: reporting timezone, custom-range policy and view defaults.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{ConfigurationError, Error, Result};
use crate::portfolio::buckets::Granularity;
use crate::utils::{ReportingClock, DEFAULT_REPORTING_TZ};
use crate::window::{TimeWindow, WindowKind};

pub const ENV_TIMEZONE: &str = "PW_TIMEZONE";
pub const ENV_STRICT_CUSTOM_RANGE: &str = "PW_STRICT_CUSTOM_RANGE";
pub const ENV_DEFAULT_WINDOW: &str = "PW_DEFAULT_WINDOW";
pub const ENV_DEFAULT_GRANULARITY: &str = "PW_DEFAULT_GRANULARITY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSettings {
    /// Zone whose calendar defines days, weeks and months.
    pub timezone: Tz,
    /// Reject custom ranges missing a bound instead of matching everything.
    pub strict_custom_range: bool,
    pub default_window: WindowKind,
    pub default_granularity: Granularity,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_REPORTING_TZ,
            strict_custom_range: false,
            default_window: WindowKind::Last30Days,
            default_granularity: Granularity::Weekly,
        }
    }
}

impl EngineSettings {
    /// Reads settings from the process environment, loading a `.env` file
    /// first when one exists. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut settings = Self::default();

        if let Some(value) = read(ENV_TIMEZONE) {
            settings.timezone = value
                .parse::<Tz>()
                .map_err(|_| ConfigurationError::UnknownTimezone(value.clone()))?;
        }
        if let Some(value) = read(ENV_STRICT_CUSTOM_RANGE) {
            settings.strict_custom_range = parse_flag(ENV_STRICT_CUSTOM_RANGE, &value)?;
        }
        if let Some(value) = read(ENV_DEFAULT_WINDOW) {
            let kind: WindowKind = value.parse()?;
            if kind == WindowKind::Custom {
                return Err(Error::InvalidConfigValue(format!(
                    "{} cannot be CUSTOM without bounds",
                    ENV_DEFAULT_WINDOW
                )));
            }
            settings.default_window = kind;
        }
        if let Some(value) = read(ENV_DEFAULT_GRANULARITY) {
            settings.default_granularity = value.parse()?;
        }

        debug!(
            "Engine settings: timezone {}, strict custom range {}, default window {}, default granularity {}",
            settings.timezone,
            settings.strict_custom_range,
            settings.default_window,
            settings.default_granularity
        );
        Ok(settings)
    }

    /// Reporting clock at `now` in the configured timezone.
    pub fn clock_at(&self, now: DateTime<Utc>) -> ReportingClock {
        ReportingClock::new(now, self.timezone)
    }

    /// Validates a dashboard window selection. No label means the default
    /// window; in strict mode a custom range must carry both bounds.
    pub fn parse_window(
        &self,
        kind: Option<&str>,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<TimeWindow> {
        let kind = match kind {
            Some(label) => label.parse::<WindowKind>()?,
            None => self.default_window,
        };

        if kind == WindowKind::Custom && self.strict_custom_range {
            if start.is_none() {
                return Err(ConfigurationError::MissingCustomBound("start").into());
            }
            if end.is_none() {
                return Err(ConfigurationError::MissingCustomBound("end").into());
            }
        }

        Ok(TimeWindow::from_kind(kind, start, end))
    }

    /// Granularity label, or the default when none is given.
    pub fn parse_granularity(&self, label: Option<&str>) -> Result<Granularity> {
        match label {
            Some(label) => Ok(label.parse()?),
            None => Ok(self.default_granularity),
        }
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::InvalidConfigValue(format!(
            "{} must be a boolean, got '{}'",
            key, value
        ))),
    }
}
