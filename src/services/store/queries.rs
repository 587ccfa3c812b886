//! Store queries: range overlap and view-dependent bucket filtering.

use chrono::{Duration, Timelike};

use super::AppointmentStore;
use crate::models::appointment::Appointment;
use crate::models::view::{TimeRange, ViewType};
use crate::utils::date::day_start;

/// Pluggable bucket-membership predicate of
/// (appointment, bucket index, queried range, active view).
pub type BucketFilter = fn(&Appointment, usize, &TimeRange, ViewType) -> bool;

/// The bucket an appointment's start instant falls into for a view:
/// the containing hour in day view, the containing date otherwise.
pub fn start_bucket(appointment: &Appointment, view: ViewType) -> TimeRange {
    let day = day_start(appointment.start.date_naive());
    let (bucket_start, len) = match view {
        ViewType::Day => (
            day + Duration::hours(appointment.start.hour() as i64),
            Duration::hours(1),
        ),
        ViewType::Week | ViewType::Month => (day, Duration::days(1)),
    };
    TimeRange {
        start: bucket_start,
        end: bucket_start + len,
    }
}

/// The `index`-th bucket of a queried range for a view, counted from the
/// start of the range's first day.
pub fn bucket_range(range: &TimeRange, view: ViewType, index: usize) -> TimeRange {
    let base = day_start(range.start.date_naive());
    let len = match view {
        ViewType::Day => Duration::hours(1),
        ViewType::Week | ViewType::Month => Duration::days(1),
    };
    let start = base + len * index as i32;
    TimeRange {
        start,
        end: start + len,
    }
}

/// Default bucket filter: membership by start instant, half-open at
/// bucket boundaries.
pub fn default_bucket_filter(
    appointment: &Appointment,
    bucket_index: usize,
    range: &TimeRange,
    view: ViewType,
) -> bool {
    bucket_range(range, view, bucket_index).contains(appointment.start)
}

impl AppointmentStore {
    /// Appointments whose interval overlaps the range, sorted by start
    /// ascending with `order` as tie-break.
    pub fn query(&self, range: &TimeRange) -> Vec<Appointment> {
        let mut matches: Vec<Appointment> = self
            .appointments
            .values()
            .filter(|a| a.overlaps(range.start, range.end))
            .cloned()
            .collect();
        sort_for_stacking(&mut matches);
        matches
    }

    /// Appointments whose view bucket intersects the range.
    pub fn query_view(&self, view: ViewType, range: &TimeRange) -> Vec<Appointment> {
        let mut matches: Vec<Appointment> = self
            .appointments
            .values()
            .filter(|a| start_bucket(a, view).overlaps(range))
            .cloned()
            .collect();
        sort_for_stacking(&mut matches);
        matches
    }

    /// Appointments belonging to one bucket of the range, per the given
    /// filter predicate.
    pub fn query_bucket(
        &self,
        bucket_index: usize,
        range: &TimeRange,
        view: ViewType,
        filter: BucketFilter,
    ) -> Vec<Appointment> {
        let mut matches: Vec<Appointment> = self
            .appointments
            .values()
            .filter(|a| filter(a, bucket_index, range, view))
            .cloned()
            .collect();
        sort_for_stacking(&mut matches);
        matches
    }
}

/// Stacking order: start ascending, then `order`, then id for stability.
pub(crate) fn sort_for_stacking(appointments: &mut [Appointment]) {
    appointments.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(a.order.cmp(&b.order))
            .then(a.id.cmp(&b.id))
    });
}
