//! Schedule entries and computed plan outputs.
//!
//! A [`ScheduleEntry`] is a committed work item occupying an inclusive
//! range of calendar days. [`ScheduleSuggestion`] is the transient
//! result of a slot search plus stage layout; it only becomes an entry
//! if the caller commits it. [`DateSpan`] carries the interval
//! arithmetic shared by both.
//!
//! # Time Model
//! Day granularity, inclusive on both ends: an entry with
//! `start == end` occupies exactly one day. Sub-day precision is out
//! of scope for production planning at this horizon.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use super::Stage;

/// Interval construction error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntervalError {
    /// End date precedes start date.
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart {
        /// Requested start.
        start: NaiveDate,
        /// Requested end.
        end: NaiveDate,
    },
}

/// An inclusive calendar-day interval `[start, end]`.
///
/// `end >= start` is enforced at construction, so a span always covers
/// at least one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSpan {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateSpan {
    /// Creates a span, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, IntervalError> {
        if end < start {
            return Err(IntervalError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a single-day span.
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// First day (inclusive).
    #[inline]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day (inclusive).
    #[inline]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days covered (>= 1).
    #[inline]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Whether a day falls within this span.
    #[inline]
    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && day <= self.end
    }

    /// Whether two spans share at least one day.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// Overlap size in days: `min(ends) - max(starts)`.
    ///
    /// Returns `None` for disjoint spans. Touching spans (one ends the
    /// day the other starts) overlap with a count of zero.
    pub fn overlap_days(&self, other: &Self) -> Option<i64> {
        if !self.overlaps(other) {
            return None;
        }
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        Some((end - start).num_days())
    }

    /// Iterates every day of the span in order.
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.days() as usize)
    }
}

/// A committed (or candidate) work item on the production schedule.
///
/// Entries are immutable in the core; move/resize operations belong to
/// the calendar UI, which re-checks conflicts afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Unique entry identifier.
    pub id: String,
    /// First occupied day (inclusive).
    pub start: NaiveDate,
    /// Last occupied day (inclusive).
    pub end: NaiveDate,
    /// Production stage this entry covers, if it is a stage-level item.
    pub stage: Option<Stage>,
    /// Product category (cell type), when known.
    pub category: Option<String>,
    /// Domain-specific key-value metadata.
    pub attributes: HashMap<String, String>,
}

impl ScheduleEntry {
    /// Creates an entry, rejecting `end < start`.
    pub fn new(
        id: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, IntervalError> {
        let span = DateSpan::new(start, end)?;
        Ok(Self {
            id: id.into(),
            start: span.start(),
            end: span.end(),
            stage: None,
            category: None,
            attributes: HashMap::new(),
        })
    }

    /// Sets the stage label.
    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    /// Sets the product category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Adds a metadata attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// The occupied interval.
    ///
    /// Fields are public for serde and UI convenience, so an entry that
    /// bypassed [`ScheduleEntry::new`] may hold an inverted interval;
    /// `validation::validate_entries` reports those in bulk.
    pub fn span(&self) -> Result<DateSpan, IntervalError> {
        DateSpan::new(self.start, self.end)
    }
}

/// One production stage laid out on the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageInterval {
    /// The stage.
    pub stage: Stage,
    /// First day (inclusive).
    pub start: NaiveDate,
    /// Last day (inclusive).
    pub end: NaiveDate,
    /// Stage length in days.
    pub duration_days: u32,
}

/// A computed schedule proposal.
///
/// Transient: the core never stores suggestions. Only if the caller
/// commits one does it become a [`ScheduleEntry`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSuggestion {
    /// Predicted total production duration in days.
    pub estimated_days: u32,
    /// Suggested first production day.
    pub start: NaiveDate,
    /// Suggested last production day (`start + estimated_days - 1`).
    pub end: NaiveDate,
    /// Mean concurrent-entry load over the suggested window.
    pub average_load: f64,
    /// Whether every day of the window stayed under the capacity limit.
    /// `false` means the horizon held no clean window and this is the
    /// least-loaded candidate; the caller decides whether to accept.
    pub feasible: bool,
    /// Stage timeline, in fixed production order, starting at `start`.
    pub stages: Vec<StageInterval>,
}

impl ScheduleSuggestion {
    /// The suggested interval.
    pub fn span(&self) -> Result<DateSpan, IntervalError> {
        DateSpan::new(self.start, self.end)
    }
}

/// An overlap between a proposed schedule and an existing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConflict {
    /// The existing entry involved.
    pub entry_id: String,
    /// Overlap size in days (`min(ends) - max(starts)`, >= 0).
    pub overlap_days: i64,
    /// Existing entry start.
    pub start: NaiveDate,
    /// Existing entry end.
    pub end: NaiveDate,
}
