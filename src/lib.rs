//! Production lead-time estimation and capacity-aware slot planning.
//!
//! Predicts how long a new order will take from historical
//! completions, finds the least-loaded start date on a bounded
//! horizon, and lays the order out as a fixed sequence of production
//! stages. Built for in-process use: data providers hand in read-only
//! snapshots of history and schedule, and the presentation layer
//! consumes plain suggestion values.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `TrainingRecord`, `PredictionRequest`,
//!   `ScheduleEntry`, `ScheduleSuggestion`, `Stage`, `StageCatalog`
//! - **`estimator`**: Per-category statistical models — `train`, `predict_days`
//! - **`scheduler`**: Slot search, stage layout, conflict detection
//! - **`planner`**: Facade composing the pipeline, with snapshot-swap
//!   retraining driven by completion feedback
//! - **`validation`**: Bulk integrity checks for externally produced data
//! - **`synthetic`**: Seeded fixture-history generator (demos/tests only)
//!
//! # Architecture
//!
//! The core is a set of pure functions over caller-supplied snapshots;
//! only the [`planner::Planner`] holds state, and that state is a
//! replaceable `Arc` snapshot of trained models. Persistence,
//! rendering, and notification are external concerns.

pub mod estimator;
pub mod models;
pub mod planner;
pub mod scheduler;
pub mod synthetic;
pub mod validation;
