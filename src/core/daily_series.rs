//! Daily production series container.

use chrono::NaiveDate;

use crate::error::{AnalysisError, Result};

/// A table of daily production figures: one row per calendar day, one
/// named column per source, plus the total column.
///
/// Column names and their order come from the data feed (first-seen order
/// of the input headers); there is no fixed schema. The analysis entry
/// points take plain slices, so callers pick a column (or the total) and
/// pass it along with [`dates`](DailySeries::dates).
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    dates: Vec<NaiveDate>,
    labels: Vec<String>,
    columns: Vec<Vec<f64>>,
    total: Vec<f64>,
}

impl DailySeries {
    /// Creates a series from parallel columns.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::DimensionMismatch`] when a column or the total
    /// differs in length from `dates`, or when `labels` and `columns`
    /// differ in count. [`AnalysisError::InvalidParameter`] on duplicate
    /// labels.
    pub fn new(
        dates: Vec<NaiveDate>,
        labels: Vec<String>,
        columns: Vec<Vec<f64>>,
        total: Vec<f64>,
    ) -> Result<Self> {
        let n = dates.len();

        if labels.len() != columns.len() {
            return Err(AnalysisError::DimensionMismatch {
                expected: labels.len(),
                got: columns.len(),
            });
        }
        for column in &columns {
            if column.len() != n {
                return Err(AnalysisError::DimensionMismatch {
                    expected: n,
                    got: column.len(),
                });
            }
        }
        if total.len() != n {
            return Err(AnalysisError::DimensionMismatch {
                expected: n,
                got: total.len(),
            });
        }
        for (i, label) in labels.iter().enumerate() {
            if labels[..i].contains(label) {
                return Err(AnalysisError::InvalidParameter(format!(
                    "duplicate source label '{label}'"
                )));
            }
        }

        Ok(Self {
            dates,
            labels,
            columns,
            total,
        })
    }

    /// Returns a builder for fluent construction.
    pub fn builder() -> DailySeriesBuilder {
        DailySeriesBuilder::new()
    }

    /// Number of days in the series.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the series has no days.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Chronological day labels.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Day labels formatted as ISO "YYYY-MM-DD" strings, for display
    /// consumers.
    pub fn date_labels(&self) -> Vec<String> {
        self.dates
            .iter()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect()
    }

    /// Source names in first-seen order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Values for a named source, if present.
    pub fn column(&self, label: &str) -> Option<&[f64]> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.columns[i].as_slice())
    }

    /// The total column.
    pub fn total(&self) -> &[f64] {
        &self.total
    }
}

/// Builder for constructing a [`DailySeries`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use minewatch::core::DailySeries;
///
/// let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let dates: Vec<_> = (0..3).map(|i| base + chrono::Duration::days(i)).collect();
///
/// let series = DailySeries::builder()
///     .dates(dates)
///     .source("North Pit", vec![120.0, 130.0, 110.0])
///     .source("South Pit", vec![80.0, 95.0, 90.0])
///     .total(vec![200.0, 225.0, 200.0])
///     .build()
///     .unwrap();
///
/// assert_eq!(series.len(), 3);
/// assert_eq!(series.labels(), ["North Pit", "South Pit"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DailySeriesBuilder {
    dates: Vec<NaiveDate>,
    labels: Vec<String>,
    columns: Vec<Vec<f64>>,
    total: Vec<f64>,
}

impl DailySeriesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the day labels.
    pub fn dates(mut self, dates: Vec<NaiveDate>) -> Self {
        self.dates = dates;
        self
    }

    /// Append a named source column. Order of calls is the order the
    /// labels are reported in.
    pub fn source(mut self, label: impl Into<String>, values: Vec<f64>) -> Self {
        self.labels.push(label.into());
        self.columns.push(values);
        self
    }

    /// Set the total column.
    pub fn total(mut self, total: Vec<f64>) -> Self {
        self.total = total;
        self
    }

    /// Validates the columns and builds the series.
    pub fn build(self) -> Result<DailySeries> {
        DailySeries::new(self.dates, self.labels, self.columns, self.total)
    }
}
