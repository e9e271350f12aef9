//! Anomaly detection for daily series.
//!
//! Four independent statistical tests, each an independent vote:
//! - IQR fence (Tukey, 1977)
//! - Z-score cutoff
//! - Trailing moving-average deviation
//! - Grubbs' test (Grubbs, 1969), per-point approximation

mod anomaly;

pub use anomaly::{
    detect_anomalies, detect_grubbs, detect_iqr, detect_moving_average, detect_z_score,
    group_anomalies_by_date, Anomaly, AnomalyKind, AnomalyParams, DetectionMethod,
};
