//! Descriptive statistics over a user-entered data set
//!
//! The data set is independent of the calculator state machine. Every
//! statistic reports [`StatsError::NoData`] on an empty set instead of
//! panicking.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::format::to_fixed;
use crate::core::operand::{number_to_string, parse_float};

/// Statistics errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatsError {
    /// The data set is empty
    #[error("No data available")]
    NoData,
}

/// Result type for statistics
pub type StatsResult<T> = Result<T, StatsError>;

/// Fraction digits in report strings
pub const REPORT_DIGITS: usize = 4;

/// Statistics panel actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatsAction {
    /// Parse the input field and append its numbers
    AddData,
    /// Arithmetic mean
    Mean,
    /// Middle value
    Median,
    /// Most frequent values
    Mode,
    /// Population standard deviation
    StdDev,
    /// Population variance
    Variance,
    /// Empty the data set
    ClearData,
}

impl StatsAction {
    /// All actions in panel order
    pub const ALL: [Self; 7] = [
        Self::AddData,
        Self::Mean,
        Self::Median,
        Self::Mode,
        Self::StdDev,
        Self::Variance,
        Self::ClearData,
    ];

    /// Action name used by panel buttons
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::AddData => "add-data",
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Mode => "mode",
            Self::StdDev => "std-dev",
            Self::Variance => "variance",
            Self::ClearData => "clear-data",
        }
    }

    /// Looks an action up by name
    #[must_use]
    pub fn from_action(action: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.action() == action)
    }
}

/// The most frequent values and how often they occur
#[derive(Debug, Clone, PartialEq)]
pub struct Mode {
    /// Every value sharing the highest frequency, in tally order
    pub values: Vec<f64>,
    /// That frequency
    pub frequency: usize,
}

/// Ordered list of numbers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSet {
    values: Vec<f64>,
}

impl DataSet {
    /// Creates an empty data set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Values in entry order
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of values
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no values were entered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Appends finite values; anything else is dropped
    pub fn add_values(&mut self, values: impl IntoIterator<Item = f64>) -> &Self {
        self.values
            .extend(values.into_iter().filter(|v| v.is_finite()));
        self
    }

    /// Appends the numbers in a comma-separated input line
    ///
    /// Pieces are trimmed and parsed leniently; pieces with no leading number
    /// are dropped.
    pub fn add_input(&mut self, input: &str) -> &Self {
        let parsed: Vec<f64> = input.split(',').filter_map(|p| parse_float(p.trim())).collect();
        self.add_values(parsed)
    }

    /// Empties the set
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Arithmetic mean
    pub fn mean(&self) -> StatsResult<f64> {
        if self.values.is_empty() {
            return Err(StatsError::NoData);
        }
        Ok(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }

    /// Middle value; the mean of the two middle values for an even count
    pub fn median(&self) -> StatsResult<f64> {
        if self.values.is_empty() {
            return Err(StatsError::NoData);
        }
        let sorted = self.sorted();
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
        } else {
            Ok(sorted[mid])
        }
    }

    /// Every value with the highest frequency
    ///
    /// Values are listed the way a keyed tally enumerates its keys:
    /// non-negative integers ascending first, then the rest in the order they
    /// were first entered.
    pub fn mode(&self) -> StatsResult<Mode> {
        if self.values.is_empty() {
            return Err(StatsError::NoData);
        }
        let mut tally: Vec<(f64, usize)> = Vec::new();
        let mut slots: HashMap<u64, usize> = HashMap::new();
        for value in &self.values {
            let value = if *value == 0.0 { 0.0 } else { *value };
            let slot = *slots.entry(value.to_bits()).or_insert_with(|| {
                tally.push((value, 0));
                tally.len() - 1
            });
            tally[slot].1 += 1;
        }

        let frequency = tally.iter().map(|(_, count)| *count).max().unwrap_or(0);
        let mut values: Vec<f64> = tally
            .into_iter()
            .filter(|(_, count)| *count == frequency)
            .map(|(value, _)| value)
            .collect();
        values.sort_by(|a, b| match (is_index_key(*a), is_index_key(*b)) {
            (true, true) => a.total_cmp(b),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => Ordering::Equal,
        });
        Ok(Mode { values, frequency })
    }

    /// Population variance (divides by n)
    pub fn variance(&self) -> StatsResult<f64> {
        let mean = self.mean()?;
        let sum_sq: f64 = self.values.iter().map(|v| (v - mean).powi(2)).sum();
        Ok(sum_sq / self.values.len() as f64)
    }

    /// Population standard deviation
    pub fn std_dev(&self) -> StatsResult<f64> {
        self.variance().map(f64::sqrt)
    }

    /// Data-values line: entries joined with `", "`
    #[must_use]
    pub fn values_line(&self) -> String {
        self.values
            .iter()
            .map(|v| number_to_string(*v))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Runs a panel action and returns the new results line
    ///
    /// `AddData` reads `input` and leaves the results line alone (`None`).
    pub fn apply(&mut self, action: StatsAction, input: &str) -> Option<String> {
        let report = match action {
            StatsAction::AddData => {
                self.add_input(input);
                return None;
            }
            StatsAction::ClearData => {
                self.clear();
                return Some("Data cleared".to_string());
            }
            StatsAction::Mean => self.mean().map(|v| format!("Mean: {}", fixed(v))),
            StatsAction::Median => self.median().map(|v| format!("Median: {}", fixed(v))),
            StatsAction::Mode => self.mode().map(|m| {
                let values: Vec<String> = m.values.iter().map(|v| number_to_string(*v)).collect();
                format!("Mode: {} (Frequency: {})", values.join(", "), m.frequency)
            }),
            StatsAction::StdDev => self
                .std_dev()
                .map(|v| format!("Standard Deviation: {}", fixed(v))),
            StatsAction::Variance => self.variance().map(|v| format!("Variance: {}", fixed(v))),
        };
        Some(report.unwrap_or_else(|err| err.to_string()))
    }

    fn sorted(&self) -> Vec<f64> {
        let mut sorted: Vec<f64> = self
            .values
            .iter()
            .map(|v| if *v == 0.0 { 0.0 } else { *v })
            .collect();
        sorted.sort_by(f64::total_cmp);
        sorted
    }
}

/// Integers in `0..2^32 - 1` enumerate first, in numeric order
fn is_index_key(value: f64) -> bool {
    value >= 0.0 && value.fract() == 0.0 && value < 4_294_967_295.0
}

fn fixed(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    to_fixed(value, REPORT_DIGITS)
}
