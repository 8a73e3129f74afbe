//! Synthetic training history for demos and tests.
//!
//! Generates plausible completed-order records around each catalog
//! category's baseline: voltage and current options shift the
//! duration multiplicatively, design options flip with fixed
//! probabilities, and every record carries ±20% noise. This is
//! fixture data only — a production deployment trains on real
//! completions ingested through planner feedback.
//!
//! Randomness is threaded through `&mut impl Rng` so tests can seed a
//! `SmallRng` and get reproducible histories.

use chrono::{Days, NaiveDate};
use rand::Rng;

use crate::models::{StageCatalog, TrainingRecord};

const VOLTAGES: [(&str, f64); 3] = [("36kV", 1.1), ("24kV", 1.0), ("12kV", 0.9)];
const CURRENTS: [(&str, f64); 4] = [
    ("630A", 0.9),
    ("1250A", 1.0),
    ("2000A", 1.1),
    ("4000A", 1.2),
];

/// Days of history generated behind `today`.
const HISTORY_DAYS: u64 = 730;

/// Generates 25-35 synthetic completions per catalog category, dated
/// within the two years before `today` and sorted by order date.
pub fn generate_history<R: Rng>(
    catalog: &StageCatalog,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<TrainingRecord> {
    let mut records = Vec::new();

    for category in catalog.categories() {
        let Some(base_days) = catalog.base_days(category) else {
            continue;
        };
        let count = rng.random_range(25..=35);

        for _ in 0..count {
            let order_date = today - Days::new(rng.random_range(1..=HISTORY_DAYS));

            let (voltage, voltage_factor) = VOLTAGES[rng.random_range(0..VOLTAGES.len())];
            let (current, current_factor) = CURRENTS[rng.random_range(0..CURRENTS.len())];
            let noise = 0.8 + rng.random::<f64>() * 0.4;

            let actual = f64::from(base_days) * voltage_factor * current_factor * noise;
            let actual_days = (actual.round() as u32).max(1);
            let completion_date = order_date + Days::new(u64::from(actual_days));

            let Ok(record) = TrainingRecord::new(category, order_date, completion_date, actual_days)
            else {
                continue;
            };
            let record = record
                .with_feature("voltage", voltage)
                .with_feature("current", current)
                .with_flag("custom_design", rng.random_bool(0.3))
                .with_flag("relay_coding", rng.random_bool(0.5))
                .with_flag("energy_analyzer", rng.random_bool(0.6));

            records.push(record);
        }
    }

    records.sort_by_key(|r| r.order_date);
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_record_counts_per_category() {
        let catalog = StageCatalog::builtin();
        let mut rng = SmallRng::seed_from_u64(7);
        let records = generate_history(&catalog, d("2026-08-01"), &mut rng);

        for category in catalog.categories() {
            let count = records.iter().filter(|r| r.category == category).count();
            assert!((25..=35).contains(&count), "{category}: {count} records");
        }
    }

    #[test]
    fn test_records_are_valid_and_dated_in_range() {
        let catalog = StageCatalog::builtin();
        let mut rng = SmallRng::seed_from_u64(42);
        let today = d("2026-08-01");
        let records = generate_history(&catalog, today, &mut rng);

        let oldest = today - Days::new(HISTORY_DAYS);
        for record in &records {
            assert!(record.actual_days >= 1);
            assert!(record.completion_date >= record.order_date);
            assert!(record.order_date >= oldest && record.order_date < today);
            assert!(record.feature("voltage").is_some());
            assert!(record.feature("current").is_some());
            assert!(record.flag("custom_design").is_some());
        }
    }

    #[test]
    fn test_sorted_by_order_date() {
        let catalog = StageCatalog::builtin();
        let mut rng = SmallRng::seed_from_u64(3);
        let records = generate_history(&catalog, d("2026-08-01"), &mut rng);
        assert!(records.windows(2).all(|w| w[0].order_date <= w[1].order_date));
    }

    #[test]
    fn test_same_seed_same_history() {
        let catalog = StageCatalog::builtin();
        let a = generate_history(&catalog, d("2026-08-01"), &mut SmallRng::seed_from_u64(99));
        let b = generate_history(&catalog, d("2026-08-01"), &mut SmallRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_generated_history_trains_every_category() {
        let catalog = StageCatalog::builtin();
        let mut rng = SmallRng::seed_from_u64(11);
        let records = generate_history(&catalog, d("2026-08-01"), &mut rng);

        let models = estimator::train(&records);
        for category in catalog.categories() {
            let model = &models[category];
            assert!(model.sample_size >= 25);
            assert!(model.mean > 0.0);
        }
    }
}
