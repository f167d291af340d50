//! Settings module - engine defaults and their environment loader.

mod settings_model;


pub use settings_model::{
    EngineSettings, ENV_DEFAULT_GRANULARITY, ENV_DEFAULT_WINDOW, ENV_STRICT_CUSTOM_RANGE,
    ENV_TIMEZONE,
};
