//! Sliding window of visible time columns.
//!
//! The window anchors on a calendar day and exposes `hours_to_load`
//! hourly columns from midnight, plus a buffered range for loading so
//! navigation near the window edges already has data.

use chrono::{DateTime, Duration, Local, NaiveDate};

use crate::config::PlannerConfig;
use crate::models::view::{TimeRange, ViewType};
use crate::utils::date::{day_start, hour_sequence, shift_month_preserving_day};

/// Date navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigateDirection {
    Previous,
    Next,
    Today,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeWindow {
    anchor: NaiveDate,
    hours_to_load: u32,
    buffer_hours: u32,
}

impl TimeWindow {
    pub fn new(anchor: NaiveDate, config: &PlannerConfig) -> Self {
        Self {
            anchor,
            hours_to_load: config.hours_to_load,
            buffer_hours: config.buffer_hours,
        }
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn set_anchor(&mut self, anchor: NaiveDate) {
        self.anchor = anchor;
    }

    /// The hourly column instants, one per virtual column.
    pub fn virtual_hours(&self) -> Vec<DateTime<Local>> {
        hour_sequence(self.anchor, self.hours_to_load)
    }

    /// Instant at a column's leading edge, if the index is in range.
    pub fn hour_at(&self, column_index: usize) -> Option<DateTime<Local>> {
        if column_index >= self.hours_to_load as usize {
            return None;
        }
        Some(day_start(self.anchor) + Duration::hours(column_index as i64))
    }

    /// The columns' span.
    pub fn visible_range(&self) -> TimeRange {
        let start = day_start(self.anchor);
        TimeRange {
            start,
            end: start + Duration::hours(self.hours_to_load as i64),
        }
    }

    /// The span a store load should cover: the visible range expanded by
    /// the buffer on each side.
    pub fn loaded_range(&self) -> TimeRange {
        let visible = self.visible_range();
        let buffer = Duration::hours(self.buffer_hours as i64);
        TimeRange {
            start: visible.start - buffer,
            end: visible.end + buffer,
        }
    }

    /// Move the anchor; the step depends on the active view.
    pub fn navigate(&mut self, direction: NavigateDirection, view: ViewType) {
        self.anchor = match direction {
            NavigateDirection::Today => Local::now().date_naive(),
            NavigateDirection::Previous => match view {
                ViewType::Day => self.anchor - Duration::days(1),
                ViewType::Week => self.anchor - Duration::weeks(1),
                ViewType::Month => shift_month_preserving_day(self.anchor, -1),
            },
            NavigateDirection::Next => match view {
                ViewType::Day => self.anchor + Duration::days(1),
                ViewType::Week => self.anchor + Duration::weeks(1),
                ViewType::Month => shift_month_preserving_day(self.anchor, 1),
            },
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn window() -> TimeWindow {
        TimeWindow::new(
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            &PlannerConfig::default(),
        )
    }

    #[test]
    fn test_virtual_hours_cover_the_day() {
        let hours = window().virtual_hours();

        assert_eq!(hours.len(), 24);
        assert_eq!(hours[0].hour(), 0);
        assert_eq!(hours[23].hour(), 23);
        assert!(hours.windows(2).all(|w| w[1] - w[0] == Duration::hours(1)));
    }

    #[test]
    fn test_hour_at() {
        let window = window();

        assert_eq!(window.hour_at(9).unwrap().hour(), 9);
        assert!(window.hour_at(24).is_none());
    }

    #[test]
    fn test_loaded_range_includes_buffer() {
        let window = window();
        let visible = window.visible_range();
        let loaded = window.loaded_range();

        assert_eq!(visible.duration(), Duration::hours(24));
        assert_eq!(loaded.start, visible.start - Duration::hours(6));
        assert_eq!(loaded.end, visible.end + Duration::hours(6));
    }

    #[test]
    fn test_navigate_day_view() {
        let mut window = window();

        window.navigate(NavigateDirection::Next, ViewType::Day);
        assert_eq!(window.anchor(), NaiveDate::from_ymd_opt(2025, 3, 11).unwrap());

        window.navigate(NavigateDirection::Previous, ViewType::Day);
        window.navigate(NavigateDirection::Previous, ViewType::Day);
        assert_eq!(window.anchor(), NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());
    }

    #[test]
    fn test_navigate_week_view() {
        let mut window = window();

        window.navigate(NavigateDirection::Next, ViewType::Week);
        assert_eq!(window.anchor(), NaiveDate::from_ymd_opt(2025, 3, 17).unwrap());
    }

    #[test]
    fn test_navigate_month_view_clamps_day() {
        let mut window = window();
        window.set_anchor(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());

        window.navigate(NavigateDirection::Next, ViewType::Month);
        assert_eq!(window.anchor(), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
    }

    #[test]
    fn test_navigate_today() {
        let mut window = window();

        window.navigate(NavigateDirection::Today, ViewType::Month);
        assert_eq!(window.anchor(), Local::now().date_naive());
    }

    #[test]
    fn test_smaller_window() {
        let mut config = PlannerConfig::default();
        config.hours_to_load = 8;
        config.buffer_hours = 2;
        let window = TimeWindow::new(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(), &config);

        assert_eq!(window.virtual_hours().len(), 8);
        assert_eq!(window.visible_range().duration(), Duration::hours(8));
        assert_eq!(window.loaded_range().duration(), Duration::hours(12));
    }
}
