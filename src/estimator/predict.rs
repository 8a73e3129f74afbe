//! Duration prediction.
//!
//! Applies a trained [`CategoryModel`](super::CategoryModel) to a new
//! order's features. Missing models degrade to the category's static
//! baseline, then to a global fallback — prediction never fails.

use crate::estimator::CategoryModels;
use crate::models::{PredictionRequest, StageCatalog};

/// Predicts the production duration for a request, in whole days.
///
/// With a trained model for the request's category: start from the
/// model mean, multiply by every categorical effect whose feature and
/// value both appear in model and request, multiply by every flag
/// effect whose flag is set in the request, then round to the nearest
/// whole day (minimum 1). Feature values unseen during training are
/// ignored, not errors.
///
/// Without a model: the category's `base_days` from the catalog, or
/// `fallback_days` for categories the catalog doesn't know either.
pub fn predict_days(
    request: &PredictionRequest,
    models: &CategoryModels,
    catalog: &StageCatalog,
    fallback_days: u32,
) -> u32 {
    let Some(model) = models.get(&request.category) else {
        let days = catalog
            .base_days(&request.category)
            .unwrap_or(fallback_days);
        log::warn!(
            "no trained model for category {:?}; using static default of {} days",
            request.category,
            days
        );
        return days.max(1);
    };

    let mut estimate = model.mean;

    for (feature, value) in &request.categorical {
        if let Some(multiplier) = model
            .categorical_effects
            .get(feature)
            .and_then(|table| table.get(value))
        {
            estimate *= multiplier;
        }
    }

    for (flag, &set) in &request.flags {
        if set {
            if let Some(multiplier) = model.flag_effects.get(flag) {
                estimate *= multiplier;
            }
        }
    }

    log::debug!(
        "predicted {:.2} days for category {:?} ({} records)",
        estimate,
        request.category,
        model.sample_size
    );
    (estimate.round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::train;
    use crate::models::TrainingRecord;
    use chrono::NaiveDate;

    fn record(category: &str, days: u32) -> TrainingRecord {
        let order: NaiveDate = "2025-01-01".parse().unwrap();
        let completion = order + chrono::Days::new(u64::from(days));
        TrainingRecord::new(category, order, completion, days).unwrap()
    }

    /// Mean 14 with a 1.5x custom-design effect predicts 21 days.
    #[test]
    fn test_flag_effect_applied() {
        let mut records = Vec::new();
        // 10 custom jobs at 18 days, 20 standard at 12 -> mean 14, effect 1.5
        for _ in 0..10 {
            records.push(record("RM 36 CB", 18).with_flag("custom_design", true));
        }
        for _ in 0..20 {
            records.push(record("RM 36 CB", 12).with_flag("custom_design", false));
        }
        let models = train(&records);
        assert!((models["RM 36 CB"].mean - 14.0).abs() < 1e-10);
        assert!((models["RM 36 CB"].flag_effects["custom_design"] - 1.5).abs() < 1e-10);

        let request = PredictionRequest::new("RM 36 CB").with_flag("custom_design", true);
        let days = predict_days(&request, &models, &StageCatalog::builtin(), 14);
        assert_eq!(days, 21);

        // The flag set to false leaves the mean untouched
        let request = PredictionRequest::new("RM 36 CB").with_flag("custom_design", false);
        let days = predict_days(&request, &models, &StageCatalog::builtin(), 14);
        assert_eq!(days, 14);
    }

    #[test]
    fn test_categorical_effect_applied() {
        let records = vec![
            record("RMU", 20).with_feature("voltage", "36kV"),
            record("RMU", 20).with_feature("voltage", "36kV"),
            record("RMU", 10).with_feature("voltage", "12kV"),
            record("RMU", 10).with_feature("voltage", "12kV"),
        ];
        let models = train(&records);

        // mean 15, 36kV multiplier 20/15 -> 15 * 4/3 = 20
        let request = PredictionRequest::new("RMU").with_feature("voltage", "36kV");
        assert_eq!(predict_days(&request, &models, &StageCatalog::builtin(), 14), 20);
    }

    #[test]
    fn test_unseen_value_ignored() {
        let records = vec![
            record("RMU", 20).with_feature("voltage", "36kV"),
            record("RMU", 10).with_feature("voltage", "12kV"),
        ];
        let models = train(&records);

        // 17.5kV never occurred in training: prediction falls back to the mean
        let request = PredictionRequest::new("RMU").with_feature("voltage", "17.5kV");
        assert_eq!(predict_days(&request, &models, &StageCatalog::builtin(), 14), 15);
    }

    #[test]
    fn test_missing_model_uses_catalog_baseline() {
        let models = CategoryModels::new();
        let catalog = StageCatalog::builtin();

        // Known category, no trained model -> its base_days, whatever the features
        let request = PredictionRequest::new("RM 36 FL")
            .with_feature("voltage", "36kV")
            .with_flag("custom_design", true);
        assert_eq!(predict_days(&request, &models, &catalog, 99), 10);
    }

    #[test]
    fn test_unknown_category_uses_global_fallback() {
        let models = CategoryModels::new();
        let catalog = StageCatalog::builtin();
        let request = PredictionRequest::new("HV GIS");
        assert_eq!(predict_days(&request, &models, &catalog, 14), 14);
    }

    #[test]
    fn test_minimum_one_day() {
        let records = vec![record("RM 36 FL", 1), record("RM 36 FL", 1)];
        let models = train(&records);
        let request = PredictionRequest::new("RM 36 FL");
        assert_eq!(predict_days(&request, &models, &StageCatalog::builtin(), 14), 1);
    }

    #[test]
    fn test_prediction_deterministic() {
        let records = vec![
            record("RM 36 LB", 11).with_flag("relay_coding", true),
            record("RM 36 LB", 14).with_flag("relay_coding", false),
            record("RM 36 LB", 13).with_feature("current", "1250A"),
        ];
        let models = train(&records);
        let request = PredictionRequest::new("RM 36 LB")
            .with_feature("current", "1250A")
            .with_flag("relay_coding", true);

        let first = predict_days(&request, &models, &StageCatalog::builtin(), 14);
        let second = predict_days(&request, &models, &StageCatalog::builtin(), 14);
        assert_eq!(first, second);
    }
}
