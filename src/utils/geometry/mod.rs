//! Pixel ↔ calendar-time mapping for the planner grid.
//!
//! Every function here is pure: the drag controller recomputes a live
//! preview from the raw pointer position on each move event, so the
//! mapping must not accumulate state between calls.

use chrono::{DateTime, Duration, Local, NaiveDate, Timelike};

use crate::utils::date::day_start;

/// Axis-aligned rectangle in grid-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl GridRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Containment is half-open on the right/bottom edges so adjacent
    /// cells never both claim a boundary pixel.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }
}

/// Horizontal pixel offset of an instant within its day row.
///
/// Offset = (hour-of-day + minute-of-hour / 60) × column width.
pub fn time_to_offset(instant: DateTime<Local>, column_width: f32) -> f32 {
    let hours = instant.hour() as f32 + instant.minute() as f32 / 60.0;
    hours * column_width
}

/// Pixel width of an interval of the given duration.
pub fn duration_to_width(duration: Duration, column_width: f32) -> f32 {
    let hours = duration.num_minutes() as f32 / 60.0;
    hours * column_width
}

/// Hour-column index covering a pixel offset.
pub fn column_index(offset: f32, column_width: f32) -> usize {
    if offset <= 0.0 || column_width <= 0.0 {
        return 0;
    }
    (offset / column_width) as usize
}

/// Map a pixel offset back to an instant on `reference_day`, snapping
/// minutes to `snap_minutes` granularity.
///
/// The hour comes from the covered column, the minute from the position
/// inside it rounded to the nearest snap step. A snap that rounds up to
/// a full hour carries into the next column.
pub fn offset_to_instant(
    offset: f32,
    column_width: f32,
    reference_day: NaiveDate,
    snap_minutes: u32,
) -> DateTime<Local> {
    let offset = offset.max(0.0);
    let hour = (offset / column_width).floor() as i64;

    let slots_per_hour = (60 / snap_minutes.clamp(1, 60)) as f32;
    let slot_width = column_width / slots_per_hour;
    let minute = ((offset % column_width) / slot_width).round() as i64 * snap_minutes as i64;

    day_start(reference_day) + Duration::minutes(hour * 60 + minute)
}

/// Index of the hour column whose hour-of-day matches the instant, if
/// the instant's day and hour fall inside the virtual sequence.
pub fn column_index_of_instant(
    hours: &[DateTime<Local>],
    instant: DateTime<Local>,
) -> Option<usize> {
    hours
        .iter()
        .position(|h| h.date_naive() == instant.date_naive() && h.hour() == instant.hour())
}
