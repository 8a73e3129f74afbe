//! Prediction requests.
//!
//! The feature bundle the presentation layer fills in for a new order
//! before asking for a duration estimate. Constructed per call, never
//! persisted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::TrainingRecord;

/// Feature bundle for one duration prediction.
///
/// Carries the same categorical/boolean feature maps as
/// [`TrainingRecord`], minus the observed outcome. Values unseen
/// during training are simply ignored by the predictor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Product category (cell type).
    pub category: String,
    /// Categorical features: name -> value.
    pub categorical: BTreeMap<String, String>,
    /// Boolean features: name -> flag.
    pub flags: BTreeMap<String, bool>,
}

impl PredictionRequest {
    /// Creates a request for a category with no features set.
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            categorical: BTreeMap::new(),
            flags: BTreeMap::new(),
        }
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
}

impl From<&TrainingRecord> for PredictionRequest {
    /// Rebuilds the request a record would have been predicted from,
    /// used when scoring feedback against the model.
    fn from(record: &TrainingRecord) -> Self {
        Self {
            category: record.category.clone(),
            categorical: record.categorical.clone(),
            flags: record.flags.clone(),
        }
    }
}
