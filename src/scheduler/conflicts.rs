//! Overlap detection between a proposed window and existing entries.

use crate::models::{DateSpan, ScheduleConflict, ScheduleEntry};

/// Finds every existing entry whose span overlaps the candidate.
///
/// Inclusive overlap test: sharing a single boundary day counts, with
/// an overlap of zero days (`min(ends) - max(starts)`). Returns an
/// empty vec when nothing overlaps; entries with invalidated
/// intervals are skipped with a warning.
pub fn find_conflicts(candidate: &DateSpan, entries: &[ScheduleEntry]) -> Vec<ScheduleConflict> {
    let mut conflicts = Vec::new();
    for entry in entries {
        let span = match entry.span() {
            Ok(span) => span,
            Err(err) => {
                log::warn!("skipping schedule entry {:?}: {}", entry.id, err);
                continue;
            }
        };
        if let Some(overlap_days) = candidate.overlap_days(&span) {
            conflicts.push(ScheduleConflict {
                entry_id: entry.id.clone(),
                overlap_days,
                start: span.start(),
                end: span.end(),
            });
        }
    }
    conflicts
}
