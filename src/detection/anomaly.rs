//! Multi-method anomaly detection over a daily series.
//!
//! Four independent statistical tests scan the series and each emits its
//! own flags. The combined output is a plain concatenation: the same day
//! can appear under several methods, which is an independent vote per
//! method rather than a duplicate. Severity is measured in method-local
//! units (IQR widths, standard deviations, ratios to a threshold) and is
//! not comparable across methods.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use crate::stats::compute_statistics;

/// Direction of a flagged excursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyKind {
    /// Value above the expected range.
    Spike,
    /// Value below the expected range.
    Drop,
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnomalyKind::Spike => write!(f, "spike"),
            AnomalyKind::Drop => write!(f, "drop"),
        }
    }
}

/// Statistical test that produced a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionMethod {
    /// Interquartile-range fence.
    Iqr,
    /// Standard-score cutoff.
    ZScore,
    /// Deviation from the trailing moving average.
    MovingAverage,
    /// Grubbs' test (per-point approximation).
    Grubbs,
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionMethod::Iqr => write!(f, "IQR"),
            DetectionMethod::ZScore => write!(f, "Z-Score"),
            DetectionMethod::MovingAverage => write!(f, "Moving Avg"),
            DetectionMethod::Grubbs => write!(f, "Grubbs"),
        }
    }
}

/// One flagged observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Anomaly {
    /// Day the observation belongs to.
    pub date: NaiveDate,
    /// The observed value.
    pub value: f64,
    /// Spike or drop.
    pub kind: AnomalyKind,
    /// Which test flagged it.
    pub method: DetectionMethod,
    /// How far the point exceeds the method's threshold, in that method's
    /// own units.
    pub severity: f64,
}

/// Sensitivity knobs for the four detection methods.
///
/// The engine accepts any values without validation; range enforcement is
/// a caller concern. Documented ranges: multiplier 0.5-3.0, z threshold
/// 1-5, window 3-14 days, moving-average threshold 10-100 percent, alpha
/// 0.01-0.1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyParams {
    /// IQR fence width multiplier.
    pub iqr_multiplier: f64,
    /// |z| cutoff.
    pub z_score_threshold: f64,
    /// Trailing window length in days.
    pub ma_window: usize,
    /// Percent deviation cutoff from the moving average.
    pub ma_threshold: f64,
    /// Grubbs significance level.
    pub grubbs_alpha: f64,
}

impl Default for AnomalyParams {
    fn default() -> Self {
        Self {
            iqr_multiplier: 1.5,
            z_score_threshold: 2.5,
            ma_window: 7,
            ma_threshold: 30.0,
            grubbs_alpha: 0.05,
        }
    }
}

impl AnomalyParams {
    /// Set the IQR fence multiplier.
    pub fn with_iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.iqr_multiplier = multiplier;
        self
    }

    /// Set the |z| cutoff.
    pub fn with_z_score_threshold(mut self, threshold: f64) -> Self {
        self.z_score_threshold = threshold;
        self
    }

    /// Set the trailing moving-average window length.
    pub fn with_ma_window(mut self, window: usize) -> Self {
        self.ma_window = window;
        self
    }

    /// Set the moving-average percent deviation cutoff.
    pub fn with_ma_threshold(mut self, threshold: f64) -> Self {
        self.ma_threshold = threshold;
        self
    }

    /// Set the Grubbs significance level.
    pub fn with_grubbs_alpha(mut self, alpha: f64) -> Self {
        self.grubbs_alpha = alpha;
        self
    }
}

/// Runs all four detectors and concatenates their output in method order
/// IQR, Z-Score, Moving Avg, Grubbs.
///
/// No deduplication and no sorting: each method is an independent vote,
/// and a presentation layer that wants one row per day deduplicates by
/// day and method itself.
///
/// `dates` is expected to parallel `values`; extra elements on either
/// side are ignored.
pub fn detect_anomalies(
    values: &[f64],
    dates: &[NaiveDate],
    params: &AnomalyParams,
) -> Vec<Anomaly> {
    let mut anomalies = detect_iqr(values, dates, params.iqr_multiplier);
    anomalies.extend(detect_z_score(values, dates, params.z_score_threshold));
    anomalies.extend(detect_moving_average(
        values,
        dates,
        params.ma_window,
        params.ma_threshold,
    ));
    anomalies.extend(detect_grubbs(values, dates, params.grubbs_alpha));
    anomalies
}

/// Flags points outside the Tukey fences q1 - m*iqr and q3 + m*iqr.
///
/// Severity is the distance past the fence in IQR widths. The division is
/// unguarded: a zero IQR with a point outside the fence yields an
/// infinite severity.
pub fn detect_iqr(values: &[f64], dates: &[NaiveDate], multiplier: f64) -> Vec<Anomaly> {
    let stats = compute_statistics(values);
    let lower_bound = stats.q1 - multiplier * stats.iqr;
    let upper_bound = stats.q3 + multiplier * stats.iqr;

    values
        .iter()
        .zip(dates)
        .filter_map(|(&value, &date)| {
            if value < lower_bound {
                Some(Anomaly {
                    date,
                    value,
                    kind: AnomalyKind::Drop,
                    method: DetectionMethod::Iqr,
                    severity: (lower_bound - value) / stats.iqr,
                })
            } else if value > upper_bound {
                Some(Anomaly {
                    date,
                    value,
                    kind: AnomalyKind::Spike,
                    method: DetectionMethod::Iqr,
                    severity: (value - upper_bound) / stats.iqr,
                })
            } else {
                None
            }
        })
        .collect()
}

/// Flags points whose standard score exceeds the threshold in magnitude.
///
/// A zero-variance series has no outliers by this method and returns an
/// empty list.
pub fn detect_z_score(values: &[f64], dates: &[NaiveDate], threshold: f64) -> Vec<Anomaly> {
    let stats = compute_statistics(values);
    if stats.std_dev == 0.0 {
        return Vec::new();
    }

    values
        .iter()
        .zip(dates)
        .filter_map(|(&value, &date)| {
            let z = (value - stats.mean) / stats.std_dev;
            if z.abs() > threshold {
                Some(Anomaly {
                    date,
                    value,
                    kind: if z > 0.0 {
                        AnomalyKind::Spike
                    } else {
                        AnomalyKind::Drop
                    },
                    method: DetectionMethod::ZScore,
                    severity: z.abs(),
                })
            } else {
                None
            }
        })
        .collect()
}

/// Flags points deviating from the trailing moving average by more than
/// `threshold_pct` percent.
///
/// The average at index i covers the `window` values strictly before i,
/// so the first `window` points are never evaluated. An index whose
/// trailing average is zero is skipped.
pub fn detect_moving_average(
    values: &[f64],
    dates: &[NaiveDate],
    window: usize,
    threshold_pct: f64,
) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();

    for (i, (&value, &date)) in values.iter().zip(dates).enumerate().skip(window) {
        let ma = values[i - window..i].iter().sum::<f64>() / window as f64;
        if ma == 0.0 {
            continue;
        }

        let pct_diff = (value - ma) / ma * 100.0;
        if pct_diff.abs() > threshold_pct {
            anomalies.push(Anomaly {
                date,
                value,
                kind: if pct_diff > 0.0 {
                    AnomalyKind::Spike
                } else {
                    AnomalyKind::Drop
                },
                method: DetectionMethod::MovingAverage,
                severity: pct_diff.abs() / threshold_pct,
            });
        }
    }

    anomalies
}

/// Flags points whose deviation from the mean exceeds the Grubbs critical
/// value at significance `alpha`.
///
/// This is the per-point, both-tails variant: every point is compared
/// against one critical value, rather than the classical procedure of
/// removing the most extreme point and re-testing. Requires at least 3
/// points and non-zero variance; otherwise returns an empty list.
pub fn detect_grubbs(values: &[f64], dates: &[NaiveDate], alpha: f64) -> Vec<Anomaly> {
    let n = values.len();
    if n < 3 {
        return Vec::new();
    }

    let stats = compute_statistics(values);
    if stats.std_dev == 0.0 {
        return Vec::new();
    }

    let df = (n - 2) as f64;
    let t_crit = t_critical(df, alpha / (2.0 * n as f64));
    let g_crit =
        ((n - 1) as f64 / (n as f64).sqrt()) * (t_crit * t_crit / (df + t_crit * t_crit)).sqrt();

    values
        .iter()
        .zip(dates)
        .filter_map(|(&value, &date)| {
            let g = (value - stats.mean).abs() / stats.std_dev;
            if g > g_crit {
                Some(Anomaly {
                    date,
                    value,
                    kind: if value > stats.mean {
                        AnomalyKind::Spike
                    } else {
                        AnomalyKind::Drop
                    },
                    method: DetectionMethod::Grubbs,
                    severity: g / g_crit,
                })
            } else {
                None
            }
        })
        .collect()
}

/// Two-sided Student-t critical value via the closed-form
/// `z = -ln(4a(1-a))` approximation.
fn t_critical(df: f64, alpha: f64) -> f64 {
    let z = -(4.0 * alpha * (1.0 - alpha)).ln();
    (z * (1.0 + (z - 2.0) / (4.0 * df))).sqrt()
}

/// Groups anomalies by day, in chronological order.
///
/// Useful to display consumers that render one row per day with the
/// methods that voted for it.
pub fn group_anomalies_by_date(anomalies: &[Anomaly]) -> BTreeMap<NaiveDate, Vec<Anomaly>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<Anomaly>> = BTreeMap::new();
    for anomaly in anomalies {
        grouped.entry(anomaly.date).or_default().push(anomaly.clone());
    }
    grouped
}
