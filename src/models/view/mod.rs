// View module
// Active view granularity and the time-range value type

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Active view granularity of the planner grid.
///
/// Determines navigation step size and the bucket unit used for
/// query filtering and stacking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    Day,
    Week,
    Month,
}

impl ViewType {
    pub fn label(&self) -> &'static str {
        match self {
            ViewType::Day => "Day",
            ViewType::Week => "Week",
            ViewType::Month => "Month",
        }
    }
}

/// A half-open time interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

impl TimeRange {
    /// Create a new range; `end` must be after `start`.
    pub fn new(start: DateTime<Local>, end: DateTime<Local>) -> Result<Self, String> {
        if end <= start {
            return Err("Time range end must be after start".to_string());
        }
        Ok(Self { start, end })
    }

    /// Check whether `[start, end)` intersects another range.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Check whether an instant falls inside the range.
    pub fn contains(&self, instant: DateTime<Local>) -> bool {
        instant >= self.start && instant < self.end
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }
}
