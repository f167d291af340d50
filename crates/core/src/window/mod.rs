//! Window module - date-filter selection and inclusion.

mod window_model;
mod window_traits;


pub use window_model::{TimeWindow, WindowKind, LAST_30_DAYS, LAST_7_DAYS};
pub use window_traits::TimedEvent;
