//! Calendar-day arithmetic for the scoring engine.
//!
//! All windowing in the engine is inclusive calendar-day arithmetic; nothing
//! here touches wall-clock time or time zones.

use chrono::NaiveDate;

/// An inclusive calendar-day window `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Window {
    /// The window `[t0 - (days-1), t0]`, e.g. `ending(t0, 30)` is the last 30 days.
    pub fn ending(t0: NaiveDate, days: i64) -> Self {
        Self {
            start: t0 - chrono::Duration::days(days - 1),
            end: t0,
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && day <= self.end
    }

    /// Number of calendar days spanned, inclusive.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// `end - start + 1`, the inclusive day-count between two calendar days.
pub fn inclusive_days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}
