//! # minewatch
//!
//! Anomaly detection and trend analysis for daily mine production series.
//!
//! Analyzes a time series of daily production figures (multiple named mine
//! sources plus a total) to flag anomalous days and to fit a smoothed
//! polynomial trend over the raw series. Provides descriptive statistics,
//! a four-method anomaly detector (IQR fence, Z-score, moving-average
//! deviation, Grubbs' test), and a least-squares polynomial trendline
//! fitter.
//!
//! Every entry point is a pure function of its arguments: no internal
//! state, no side effects, safe to call concurrently on independent inputs.

#![allow(clippy::needless_range_loop)]

pub mod core;
pub mod detection;
pub mod error;
pub mod stats;
pub mod trend;

pub use error::{AnalysisError, Result};

pub mod prelude {
    pub use crate::core::{DailySeries, DailySeriesBuilder};
    pub use crate::detection::{
        detect_anomalies, Anomaly, AnomalyKind, AnomalyParams, DetectionMethod,
    };
    pub use crate::error::{AnalysisError, Result};
    pub use crate::stats::{compute_statistics, Statistics};
    pub use crate::trend::{fit_trend, TrendDegree};
}
