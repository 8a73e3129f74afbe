//! Stage timeline decomposition and layout.
//!
//! Splits an order into its fixed sequence of production stages and
//! lays them out back-to-back on the calendar. Stage day counts come
//! from the category's static [`StageTable`] — planning data, not the
//! statistical estimate — so the laid-out timeline may end before or
//! after the predicted completion date.

use chrono::{Days, NaiveDate};

use crate::models::{Stage, StageCatalog, StageInterval};

/// The stage split for a category, in fixed production order.
///
/// Unknown categories use the catalog's default table.
pub fn decompose(catalog: &StageCatalog, category: &str) -> Vec<(Stage, u32)> {
    catalog.table_for(category).stage_days().collect()
}

/// Lays stages out as contiguous inclusive intervals.
///
/// The first stage starts exactly at `schedule_start`; each following
/// stage starts the day after its predecessor ends. Stages with a
/// zero day count have no calendar footprint and are skipped.
pub fn layout(stages: &[(Stage, u32)], schedule_start: NaiveDate) -> Vec<StageInterval> {
    let mut intervals = Vec::with_capacity(stages.len());
    let mut cursor = schedule_start;
    for &(stage, duration_days) in stages {
        if duration_days == 0 {
            continue;
        }
        let end = cursor + Days::new(u64::from(duration_days - 1));
        intervals.push(StageInterval {
            stage,
            start: cursor,
            end,
            duration_days,
        });
        cursor = end + Days::new(1);
    }
    intervals
}
