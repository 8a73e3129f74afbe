//! Per-category statistical duration models.
//!
//! Training groups historical records by product category and derives,
//! per group, a mean duration plus multiplicative adjustment factors
//! for every categorical and boolean feature seen in the data. The
//! result is a plain value map: training has no side effects, and
//! identical input always produces an identical model map.
//!
//! # Algorithm
//!
//! For each category group:
//! 1. `mean` — arithmetic mean of actual durations.
//! 2. `std_dev` — population standard deviation.
//! 3. Per categorical feature value: multiplier = mean duration for
//!    that value / mean of all per-value means. Normalizing against
//!    the average of the value means (not the raw category mean) makes
//!    multipliers of a balanced feature average ~1.0.
//! 4. Per boolean feature: multiplier = mean(duration | true) /
//!    mean(duration | false), or exactly 1.0 when either subset is
//!    empty — a constant flag carries no information.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::models::TrainingRecord;

/// Trained models keyed by category.
///
/// Categories with zero records are absent; callers fall back to
/// static defaults for them. Ordered map so iteration (and serialized
/// form) is deterministic.
pub type CategoryModels = BTreeMap<String, CategoryModel>;

/// Statistics learned for one product category.
///
/// Rebuilt whole on every (re)train — never mutated incrementally.
/// All multipliers are > 0 because durations are positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryModel {
    /// Mean actual duration (days).
    pub mean: f64,
    /// Population standard deviation (days).
    pub std_dev: f64,
    /// Per-feature, per-value duration multipliers.
    pub categorical_effects: BTreeMap<String, BTreeMap<String, f64>>,
    /// Per-flag duration multipliers (applied when the flag is true).
    pub flag_effects: BTreeMap<String, f64>,
    /// Number of records backing this model.
    pub sample_size: usize,
}

/// Trains category models from historical records.
///
/// Pure and deterministic: grouping and feature iteration use ordered
/// maps, so repeated runs over the same records yield identical
/// output. Categories simply absent from `records` are absent from
/// the result — never an error.
pub fn train(records: &[TrainingRecord]) -> CategoryModels {
    let mut groups: BTreeMap<&str, Vec<&TrainingRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.category.as_str()).or_default().push(record);
    }

    let mut models = CategoryModels::new();
    for (category, group) in groups {
        let model = CategoryModel::fit(&group);
        log::debug!(
            "trained category {:?}: mean {:.2} days, std dev {:.2}, {} records",
            category,
            model.mean,
            model.std_dev,
            model.sample_size
        );
        models.insert(category.to_string(), model);
    }
    models
}

impl CategoryModel {
    /// Fits a model to one non-empty category group.
    fn fit(group: &[&TrainingRecord]) -> Self {
        let n = group.len() as f64;
        let mean = group.iter().map(|r| f64::from(r.actual_days)).sum::<f64>() / n;
        let variance = group
            .iter()
            .map(|r| {
                let diff = f64::from(r.actual_days) - mean;
                diff * diff
            })
            .sum::<f64>()
            / n;
        let std_dev = variance.sqrt();

        let feature_names: BTreeSet<&str> = group
            .iter()
            .flat_map(|r| r.categorical.keys().map(String::as_str))
            .collect();
        let categorical_effects = feature_names
            .into_iter()
            .map(|name| (name.to_string(), categorical_effect(group, name)))
            .collect();

        let flag_names: BTreeSet<&str> = group
            .iter()
            .flat_map(|r| r.flags.keys().map(String::as_str))
            .collect();
        let flag_effects = flag_names
            .into_iter()
            .map(|name| (name.to_string(), flag_effect(group, name)))
            .collect();

        Self {
            mean,
            std_dev,
            categorical_effects,
            flag_effects,
            sample_size: group.len(),
        }
    }
}

/// Per-value multipliers for one categorical feature.
///
/// Each distinct value's mean duration is normalized against the mean
/// of all per-value means.
fn categorical_effect(group: &[&TrainingRecord], feature: &str) -> BTreeMap<String, f64> {
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for record in group {
        if let Some(value) = record.feature(feature) {
            let slot = sums.entry(value).or_insert((0.0, 0));
            slot.0 += f64::from(record.actual_days);
            slot.1 += 1;
        }
    }

    let value_means: BTreeMap<&str, f64> = sums
        .into_iter()
        .map(|(value, (sum, count))| (value, sum / count as f64))
        .collect();
    if value_means.is_empty() {
        return BTreeMap::new();
    }

    let baseline = value_means.values().sum::<f64>() / value_means.len() as f64;
    value_means
        .into_iter()
        .map(|(value, mean)| (value.to_string(), mean / baseline))
        .collect()
}

/// Multiplier for one boolean feature: mean(true) / mean(false).
///
/// Exactly 1.0 when either subset is empty, including flags that are
/// constant across the whole group.
fn flag_effect(group: &[&TrainingRecord], flag: &str) -> f64 {
    let mut with = (0.0, 0usize);
    let mut without = (0.0, 0usize);
    for record in group {
        match record.flag(flag) {
            Some(true) => {
                with.0 += f64::from(record.actual_days);
                with.1 += 1;
            }
            Some(false) => {
                without.0 += f64::from(record.actual_days);
                without.1 += 1;
            }
            None => {}
        }
    }
    if with.1 == 0 || without.1 == 0 {
        return 1.0;
    }
    (with.0 / with.1 as f64) / (without.0 / without.1 as f64)
}
