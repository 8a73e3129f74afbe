//! Historical completion records (training data).
//!
//! A [`TrainingRecord`] captures one finished order: what was built,
//! which options it carried, and how long production actually took.
//! Records accumulate over the system's life — an initial batch at
//! rollout, then one per completed order via planner feedback — and
//! are immutable once constructed.
//!
//! Feature values live in ordered maps rather than free-form bags so
//! that model training iterates them deterministically.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Training record construction error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// Completion date precedes the order date.
    #[error("completion date {completion} is before order date {order}")]
    CompletionBeforeOrder {
        /// Order date.
        order: NaiveDate,
        /// Completion date.
        completion: NaiveDate,
    },
    /// Actual duration must be at least one day.
    #[error("actual duration must be at least one day")]
    ZeroDays,
}

/// One completed order, used as model training data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRecord {
    /// Product category (cell type).
    pub category: String,
    /// Date the order was placed.
    pub order_date: NaiveDate,
    /// Date production finished (>= order date).
    pub completion_date: NaiveDate,
    /// Observed production duration in days (>= 1).
    pub actual_days: u32,
    /// Categorical features: name -> value (e.g. "voltage" -> "36kV").
    pub categorical: BTreeMap<String, String>,
    /// Boolean features: name -> flag (e.g. "custom_design" -> true).
    pub flags: BTreeMap<String, bool>,
}

impl TrainingRecord {
    /// Creates a record, rejecting inverted dates and zero durations.
    pub fn new(
        category: impl Into<String>,
        order_date: NaiveDate,
        completion_date: NaiveDate,
        actual_days: u32,
    ) -> Result<Self, HistoryError> {
        if completion_date < order_date {
            return Err(HistoryError::CompletionBeforeOrder {
                order: order_date,
                completion: completion_date,
            });
        }
        if actual_days == 0 {
            return Err(HistoryError::ZeroDays);
        }
        Ok(Self {
            category: category.into(),
            order_date,
            completion_date,
            actual_days,
            categorical: BTreeMap::new(),
            flags: BTreeMap::new(),
        })
    }

    /// Adds a categorical feature value.
    pub fn with_feature(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.categorical.insert(name.into(), value.into());
        self
    }

    /// Adds a boolean feature flag.
    pub fn with_flag(mut self, name: impl Into<String>, value: bool) -> Self {
        self.flags.insert(name.into(), value);
        self
    }

    /// Looks up a categorical feature value.
    pub fn feature(&self, name: &str) -> Option<&str> {
        self.categorical.get(name).map(String::as_str)
    }

    /// Looks up a boolean feature flag.
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.flags.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_record_builder() {
        let record = TrainingRecord::new("RM 36 CB", d("2025-01-10"), d("2025-01-26"), 16)
            .unwrap()
            .with_feature("voltage", "36kV")
            .with_feature("current", "1250A")
            .with_flag("custom_design", true)
            .with_flag("relay_coding", false);

        assert_eq!(record.category, "RM 36 CB");
        assert_eq!(record.actual_days, 16);
        assert_eq!(record.feature("voltage"), Some("36kV"));
        assert_eq!(record.feature("color"), None);
        assert_eq!(record.flag("custom_design"), Some(true));
        assert_eq!(record.flag("relay_coding"), Some(false));
        assert_eq!(record.flag("unknown"), None);
    }

    #[test]
    fn test_record_rejects_inverted_dates() {
        let err = TrainingRecord::new("RMU", d("2025-02-01"), d("2025-01-01"), 10).unwrap_err();
        assert!(matches!(err, HistoryError::CompletionBeforeOrder { .. }));
    }

    #[test]
    fn test_record_rejects_zero_duration() {
        let err = TrainingRecord::new("RMU", d("2025-02-01"), d("2025-02-10"), 0).unwrap_err();
        assert_eq!(err, HistoryError::ZeroDays);
    }

    #[test]
    fn test_same_day_completion_allowed() {
        // A one-day order completes on its order date
        let record = TrainingRecord::new("RM 36 FL", d("2025-03-01"), d("2025-03-01"), 1);
        assert!(record.is_ok());
    }

    #[test]
    fn test_serde_round_trip() {
        let record = TrainingRecord::new("RM 36 LB", d("2025-05-05"), d("2025-05-20"), 15)
            .unwrap()
            .with_feature("voltage", "24kV")
            .with_flag("energy_analyzer", true);
        let json = serde_json::to_string(&record).unwrap();
        let back: TrainingRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
