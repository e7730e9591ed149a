//! Horizontal placement of task bars.
//!
//! Positions are percentages of the axis span. Invalid dates or a zero span
//! yield NaN or infinite values instead of errors; presenters are expected to
//! skip anything that is not [`PositionResult::is_renderable`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::axis::TimelineAxis;
use crate::normalize::{NormalizedTask, TaskDate};

/// Minimum bar width in percent, so zero-length tasks stay visible
pub const MIN_WIDTH_PERCENT: f64 = 1.0;

/// A bar's offset and width as percentages of the axis span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionResult {
    pub left: f64,
    pub width: f64,
}

impl PositionResult {
    /// The position used when there is nothing to measure against.
    pub fn degenerate() -> Self {
        Self {
            left: f64::NAN,
            width: f64::NAN,
        }
    }

    /// Whether both values are finite numbers.
    pub fn is_renderable(&self) -> bool {
        self.left.is_finite() && self.width.is_finite()
    }

    /// Right edge in percent. May exceed 100; there is no upper clamp.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Lower clamp that keeps NaN as NaN.
///
/// `f64::max` would turn NaN into the bound and hide the bad input.
fn clamp_lower(bound: f64, value: f64) -> f64 {
    if value.is_nan() { value } else { value.max(bound) }
}

/// Place a task's interval against the axis bounds.
pub fn calculate_position(
    axis_start: DateTime<Utc>,
    axis_end: DateTime<Utc>,
    start: TaskDate,
    end: TaskDate,
) -> PositionResult {
    let axis_start_ms = axis_start.timestamp_millis() as f64;
    let span_ms = (axis_end - axis_start).num_milliseconds() as f64;
    let start_ms = start.timestamp_ms();
    let end_ms = end.timestamp_ms();

    PositionResult {
        left: clamp_lower(0.0, (start_ms - axis_start_ms) / span_ms * 100.0),
        width: clamp_lower(MIN_WIDTH_PERCENT, (end_ms - start_ms) / span_ms * 100.0),
    }
}

/// Positions for every task, aligned with the input order.
///
/// With an empty axis every position is [`PositionResult::degenerate`].
pub fn compute_positions(tasks: &[NormalizedTask], axis: &TimelineAxis) -> Vec<PositionResult> {
    match (axis.start_instant(), axis.end_instant()) {
        (Some(axis_start), Some(axis_end)) => tasks
            .iter()
            .map(|task| calculate_position(axis_start, axis_end, task.start_date, task.end_date))
            .collect(),
        _ => vec![PositionResult::degenerate(); tasks.len()],
    }
}
