//! Statistical duration estimation.
//!
//! Learns per-category duration statistics from historical
//! completions and applies them to new orders. Two halves:
//!
//! - [`train`]: records -> [`CategoryModels`] (pure, deterministic,
//!   rebuilt whole on every call)
//! - [`predict_days`]: request + models + static defaults -> whole-day
//!   estimate, with graceful fallback when data is missing
//!
//! Deliberately simple statistics — grouped means and multiplicative
//! feature effects — sized for training sets of tens of thousands of
//! records in milliseconds.

mod model;
mod predict;

pub use model::{train, CategoryModel, CategoryModels};
pub use predict::predict_days;
