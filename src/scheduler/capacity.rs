//! Capacity-aware slot search.
//!
//! # Algorithm
//!
//! 1. Count, per calendar day, how many existing entries cover it.
//! 2. Scan candidate starts from `earliest_start` through the horizon
//!    in date order.
//! 3. A candidate window is feasible iff no day in it is already at
//!    the capacity limit; among feasible candidates the lowest average
//!    load wins, earliest on ties.
//! 4. A feasible window averaging under half a slot is accepted
//!    immediately; scanning further cannot improve it meaningfully.
//! 5. A fully loaded horizon still yields an answer: the least-loaded
//!    candidate, flagged infeasible, so the caller decides whether to
//!    accept or escalate.
//!
//! # Complexity
//! O(horizon_days * estimated_days) map lookups plus O(total occupied
//! days) for the load map.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::ScheduleEntry;

/// Feasible windows averaging below this load are taken immediately.
const GOOD_ENOUGH_LOAD: f64 = 0.5;

/// Result of a slot search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotSuggestion {
    /// Chosen first production day.
    pub start: NaiveDate,
    /// Chosen last production day (`start + estimated_days - 1`).
    pub end: NaiveDate,
    /// Mean existing load over the chosen window.
    pub average_load: f64,
    /// Whether every day of the window was under the capacity limit.
    pub feasible: bool,
}

/// Builds the per-day concurrent-entry count for a schedule.
///
/// Every day of each entry's inclusive span counts as one unit of
/// load. Entries whose interval was invalidated after construction
/// are skipped with a warning; `validation::validate_entries` reports
/// them properly.
pub fn build_load_map(entries: &[ScheduleEntry]) -> BTreeMap<NaiveDate, u32> {
    let mut load: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for entry in entries {
        match entry.span() {
            Ok(span) => {
                for day in span.iter_days() {
                    *load.entry(day).or_insert(0) += 1;
                }
            }
            Err(err) => log::warn!("skipping schedule entry {:?}: {}", entry.id, err),
        }
    }
    load
}

/// Finds the best start date for a job of `estimated_days` within
/// `[earliest_start, earliest_start + horizon_days)`.
///
/// Always returns a suggestion: when no window stays under
/// `capacity_limit`, the least-loaded candidate is returned with
/// `feasible = false` rather than failing.
pub fn suggest_slot(
    estimated_days: u32,
    entries: &[ScheduleEntry],
    earliest_start: NaiveDate,
    capacity_limit: u32,
    horizon_days: u32,
) -> SlotSuggestion {
    let days = estimated_days.max(1);
    let horizon = horizon_days.max(1);
    let load = build_load_map(entries);

    let mut best_feasible: Option<(NaiveDate, f64)> = None;
    let mut least_bad: Option<(NaiveDate, f64)> = None;

    for offset in 0..horizon {
        let start = earliest_start + Days::new(u64::from(offset));

        let mut total_load: u64 = 0;
        let mut days_at_capacity: u32 = 0;
        for day_offset in 0..days {
            let day = start + Days::new(u64::from(day_offset));
            let current = load.get(&day).copied().unwrap_or(0);
            total_load += u64::from(current);
            if current >= capacity_limit {
                days_at_capacity += 1;
            }
        }
        let average = total_load as f64 / f64::from(days);

        // Strict comparison keeps the earliest candidate on ties.
        if least_bad.map_or(true, |(_, best)| average < best) {
            least_bad = Some((start, average));
        }
        if days_at_capacity == 0 && best_feasible.map_or(true, |(_, best)| average < best) {
            best_feasible = Some((start, average));
            if average < GOOD_ENOUGH_LOAD {
                break;
            }
        }
    }

    let (start, average_load, feasible) = match (best_feasible, least_bad) {
        (Some((start, average)), _) => (start, average, true),
        (None, Some((start, average))) => {
            log::warn!(
                "no window under capacity {} within {} days of {}; \
                 suggesting least-loaded start {}",
                capacity_limit,
                horizon,
                earliest_start,
                start
            );
            (start, average, false)
        }
        // horizon >= 1, so at least one candidate was scanned
        (None, None) => (earliest_start, 0.0, false),
    };

    SlotSuggestion {
        start,
        end: start + Days::new(u64::from(days - 1)),
        average_load,
        feasible,
    }
}
