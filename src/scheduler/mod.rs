//! Capacity-aware slot search, stage layout, and conflict detection.
//!
//! # Algorithm
//!
//! `suggest_slot` scans a bounded horizon of candidate start dates and
//! picks the feasible window with the lowest average concurrent load;
//! a fully loaded horizon yields the least-bad candidate flagged
//! infeasible rather than an error. `decompose`/`layout` turn a
//! chosen start into a contiguous stage timeline, and
//! `find_conflicts` reports overlaps against committed entries.
//!
//! All functions are pure over their inputs; the schedule is a
//! read-only snapshot supplied by the caller.

mod capacity;
mod conflicts;
mod timeline;

pub use capacity::{build_load_map, suggest_slot, SlotSuggestion};
pub use conflicts::find_conflicts;
pub use timeline::{decompose, layout};
