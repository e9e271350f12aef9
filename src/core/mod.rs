//! Core data structures for daily production data.

mod daily_series;

pub use daily_series::{DailySeries, DailySeriesBuilder};
