//! Timeline axis construction.
//!
//! The axis is one entry per calendar day (UTC), from two days before the
//! earliest start to two days after the latest end, inclusive.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::normalize::NormalizedTask;

/// Days of padding on each side of the task span
pub const AXIS_PADDING_DAYS: u64 = 2;

/// Ordered, day-stepped sequence of dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimelineAxis {
    dates: Vec<NaiveDate>,
}

impl TimelineAxis {
    /// An axis with no dates.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the padded axis spanning every task.
    ///
    /// Returns an empty axis for an empty task list, and also when any task
    /// carries an invalid date, since the span is then undefined.
    pub fn build(tasks: &[NormalizedTask]) -> Self {
        if tasks.is_empty() {
            return Self::empty();
        }

        let mut min_start: Option<DateTime<Utc>> = None;
        let mut max_end: Option<DateTime<Utc>> = None;

        for task in tasks {
            let (Some(start), Some(end)) = (task.start_date.get(), task.end_date.get()) else {
                warn!(task = %task.id, "invalid date on task, timeline axis left empty");
                return Self::empty();
            };
            min_start = Some(min_start.map_or(start, |m| m.min(start)));
            max_end = Some(max_end.map_or(end, |m| m.max(end)));
        }

        match (min_start, max_end) {
            (Some(min_start), Some(max_end)) => {
                Self::padded_range(min_start.date_naive(), max_end.date_naive())
            }
            _ => Self::empty(),
        }
    }

    /// Enumerate `start - pad ..= end + pad`, one entry per day.
    ///
    /// Inverted bounds produce an empty axis.
    pub fn padded_range(start: NaiveDate, end: NaiveDate) -> Self {
        let padding = Days::new(AXIS_PADDING_DAYS);
        let (Some(first), Some(last)) = (
            start.checked_sub_days(padding),
            end.checked_add_days(padding),
        ) else {
            return Self::empty();
        };

        if first > last {
            warn!(%first, %last, "inverted timeline span");
            return Self::empty();
        }

        let dates: Vec<NaiveDate> = first.iter_days().take_while(|d| *d <= last).collect();
        debug!(days = dates.len(), %first, %last, "built timeline axis");
        Self { dates }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn iter(&self) -> impl Iterator<Item = &NaiveDate> {
        self.dates.iter()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn first(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Midnight UTC of the first axis date.
    pub fn start_instant(&self) -> Option<DateTime<Utc>> {
        self.first().and_then(midnight_utc)
    }

    /// Midnight UTC of the last axis date.
    pub fn end_instant(&self) -> Option<DateTime<Utc>> {
        self.last().and_then(midnight_utc)
    }

    /// Milliseconds from the first to the last date; zero for a one-day axis.
    pub fn span_ms(&self) -> Option<i64> {
        Some((self.end_instant()? - self.start_instant()?).num_milliseconds())
    }
}

fn midnight_utc(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc())
}
