//! High-level planning facade.
//!
//! Composes the estimator and scheduler into the full pipeline:
//! predict duration -> search for the least-loaded slot -> lay out the
//! stage timeline. Also owns the model lifecycle: the trained model
//! map is an immutable snapshot behind an `Arc`; retraining builds a
//! complete replacement and swaps the pointer, so concurrent
//! predictions never observe a half-trained model.
//!
//! Everything is dependency-injected: the existing schedule and the
//! reference date (`today`) are arguments, never ambient state, so
//! results are reproducible and testable.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::estimator::{self, CategoryModels};
use crate::models::{
    PredictionRequest, ScheduleConflict, ScheduleEntry, ScheduleSuggestion, StageCatalog,
    TrainingRecord,
};
use crate::scheduler;

/// Planner tuning knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Maximum concurrent entries allowed on any single day.
    pub capacity_limit: u32,
    /// How many candidate start dates the slot search scans.
    pub horizon_days: u32,
    /// Feedback records accumulated before an automatic retrain.
    pub retrain_threshold: usize,
    /// Prediction fallback for categories without a stage table.
    pub fallback_days: u32,
    /// Offset from `today` to the earliest allowed start date.
    pub lead_days: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            capacity_limit: 3,
            horizon_days: 60,
            retrain_threshold: 10,
            fallback_days: 14,
            lead_days: 1,
        }
    }
}

impl PlannerConfig {
    /// Sets the daily capacity limit.
    pub fn with_capacity_limit(mut self, limit: u32) -> Self {
        self.capacity_limit = limit;
        self
    }

    /// Sets the search horizon in days.
    pub fn with_horizon_days(mut self, days: u32) -> Self {
        self.horizon_days = days;
        self
    }

    /// Sets the feedback count that triggers a retrain.
    pub fn with_retrain_threshold(mut self, threshold: usize) -> Self {
        self.retrain_threshold = threshold;
        self
    }

    /// Sets the global prediction fallback in days.
    pub fn with_fallback_days(mut self, days: u32) -> Self {
        self.fallback_days = days;
        self
    }

    /// Sets the lead time from `today` to the earliest start.
    pub fn with_lead_days(mut self, days: u32) -> Self {
        self.lead_days = days;
        self
    }
}

/// Result of scoring one feedback record against the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackOutcome {
    /// What the current model predicted for this order.
    pub predicted_days: u32,
    /// What production actually took.
    pub actual_days: u32,
    /// `actual - predicted` in days.
    pub error_days: i64,
    /// Whether the error stayed within 20% of the prediction.
    pub improved: bool,
    /// Whether this record pushed the feedback counter over the
    /// threshold and triggered a retrain.
    pub retrained: bool,
}

struct HistoryState {
    records: Vec<TrainingRecord>,
    since_train: usize,
}

/// Duration estimation and slot planning over a shared model snapshot.
///
/// Cheap to share behind an `Arc`: predictions and suggestions take a
/// read lock only long enough to clone the snapshot pointer, and
/// feedback ingestion serializes with retraining through the history
/// mutex without blocking readers.
pub struct Planner {
    config: PlannerConfig,
    catalog: StageCatalog,
    models: RwLock<Arc<CategoryModels>>,
    history: Mutex<HistoryState>,
}

impl Planner {
    /// Creates a planner with no training history.
    pub fn new(config: PlannerConfig, catalog: StageCatalog) -> Self {
        Self {
            config,
            catalog,
            models: RwLock::new(Arc::new(CategoryModels::new())),
            history: Mutex::new(HistoryState {
                records: Vec::new(),
                since_train: 0,
            }),
        }
    }

    /// Seeds the history and trains the initial snapshot.
    pub fn with_history(self, records: Vec<TrainingRecord>) -> Self {
        {
            let mut history = self.history.lock();
            history.records = records;
        }
        self.train();
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// The stage catalog in use.
    pub fn catalog(&self) -> &StageCatalog {
        &self.catalog
    }

    /// The current model snapshot.
    pub fn models(&self) -> Arc<CategoryModels> {
        self.models.read().clone()
    }

    /// Number of training records held.
    pub fn history_len(&self) -> usize {
        self.history.lock().records.len()
    }

    /// Retrains from the full history and swaps the snapshot.
    ///
    /// Holds the history lock for the duration of training so feedback
    /// appends cannot tear the record list; predictions keep using the
    /// previous snapshot until the single pointer swap.
    pub fn train(&self) {
        let mut history = self.history.lock();
        let models = estimator::train(&history.records);
        history.since_train = 0;
        *self.models.write() = Arc::new(models);
    }

    /// Predicts the production duration for a request, in whole days.
    pub fn predict(&self, request: &PredictionRequest) -> u32 {
        let snapshot = self.models();
        estimator::predict_days(request, &snapshot, &self.catalog, self.config.fallback_days)
    }

    /// Runs the full pipeline: predict the duration, find the
    /// least-loaded slot after `today + lead_days`, and lay out the
    /// stage timeline from the chosen start.
    ///
    /// The suggestion is transient — committing it to the schedule is
    /// the caller's decision.
    pub fn suggest_schedule(
        &self,
        request: &PredictionRequest,
        existing: &[ScheduleEntry],
        today: NaiveDate,
    ) -> ScheduleSuggestion {
        let estimated_days = self.predict(request);
        let earliest_start = today + Days::new(u64::from(self.config.lead_days));
        let slot = scheduler::suggest_slot(
            estimated_days,
            existing,
            earliest_start,
            self.config.capacity_limit,
            self.config.horizon_days,
        );
        let stages = scheduler::layout(
            &scheduler::decompose(&self.catalog, &request.category),
            slot.start,
        );

        ScheduleSuggestion {
            estimated_days,
            start: slot.start,
            end: slot.end,
            average_load: slot.average_load,
            feasible: slot.feasible,
            stages,
        }
    }

    /// Overlaps between a suggestion's window and existing entries.
    pub fn check_conflicts(
        &self,
        suggestion: &ScheduleSuggestion,
        existing: &[ScheduleEntry],
    ) -> Vec<ScheduleConflict> {
        match suggestion.span() {
            Ok(span) => scheduler::find_conflicts(&span, existing),
            Err(err) => {
                log::warn!("suggestion holds an invalid interval: {}", err);
                Vec::new()
            }
        }
    }

    /// Ingests a completed order and scores the model against it.
    ///
    /// The record joins the training history; once
    /// `retrain_threshold` records have accumulated since the last
    /// train, the model is rebuilt from the full history.
    pub fn record_feedback(&self, record: TrainingRecord) -> FeedbackOutcome {
        let predicted_days = self.predict(&PredictionRequest::from(&record));
        let actual_days = record.actual_days;
        let error_days = i64::from(actual_days) - i64::from(predicted_days);
        let improved = (error_days as f64).abs() < f64::from(predicted_days) * 0.2;
        log::debug!(
            "feedback for {:?}: predicted {} days, actual {}, error {:+}",
            record.category,
            predicted_days,
            actual_days,
            error_days
        );

        let mut history = self.history.lock();
        history.records.push(record);
        history.since_train += 1;

        let retrained = history.since_train >= self.config.retrain_threshold;
        if retrained {
            let models = estimator::train(&history.records);
            history.since_train = 0;
            *self.models.write() = Arc::new(models);
            log::info!(
                "retrained on {} records after {} feedback entries",
                history.records.len(),
                self.config.retrain_threshold
            );
        }

        FeedbackOutcome {
            predicted_days,
            actual_days,
            error_days,
            improved,
            retrained,
        }
    }
}
