//! Store mutation: patch application with invariant validation.

use chrono::{DateTime, Local};
use thiserror::Error;

use super::AppointmentStore;
use crate::models::appointment::Appointment;

/// Why a mutation was refused. The store record is untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutateError {
    #[error("Appointment not found: {0}")]
    NotFound(String),

    #[error("Invalid interval: start must precede end")]
    InvalidInterval,

    #[error("Duration below the {0}-minute minimum")]
    BelowMinimumDuration(i64),

    #[error("Unknown resource: {0}")]
    InvalidResource(String),
}

/// A partial update to an appointment's interval and/or owning resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentPatch {
    pub start: Option<DateTime<Local>>,
    pub end: Option<DateTime<Local>>,
    pub resource_id: Option<String>,
}

impl AppointmentPatch {
    /// Patch produced by a committed resize gesture.
    pub fn reschedule(start: DateTime<Local>, end: DateTime<Local>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            resource_id: None,
        }
    }

    /// Patch produced by a committed move gesture.
    pub fn relocate(
        start: DateTime<Local>,
        end: DateTime<Local>,
        resource_id: impl Into<String>,
    ) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            resource_id: Some(resource_id.into()),
        }
    }
}

impl AppointmentStore {
    /// Apply a patch to the appointment with the given id.
    ///
    /// Invariants are validated in order — interval, minimum duration,
    /// resource existence — and the first violation is returned with the
    /// stored record unchanged. On success the store replaces the record
    /// copy-on-write and returns the replacement.
    ///
    /// Applying the same patch twice yields an identical record, which is
    /// what makes a same-slot drop a harmless no-op.
    pub fn mutate(&mut self, id: &str, patch: &AppointmentPatch) -> Result<Appointment, MutateError> {
        let current = self
            .appointments
            .get(id)
            .ok_or_else(|| MutateError::NotFound(id.to_string()))?;

        let mut candidate = current.clone();
        if let Some(start) = patch.start {
            candidate.start = start;
        }
        if let Some(end) = patch.end {
            candidate.end = end;
        }
        if let Some(ref resource_id) = patch.resource_id {
            candidate.resource_id = Some(resource_id.clone());
        }

        if candidate.start >= candidate.end {
            return Err(MutateError::InvalidInterval);
        }

        let min_duration = self.config.min_duration();
        if candidate.end - candidate.start < min_duration {
            return Err(MutateError::BelowMinimumDuration(
                self.config.min_duration_minutes,
            ));
        }

        match candidate.resource_id {
            Some(ref resource_id) if self.resources.contains_key(resource_id) => {}
            Some(ref resource_id) => {
                return Err(MutateError::InvalidResource(resource_id.clone()));
            }
            None => {
                return Err(MutateError::InvalidResource("<none>".to_string()));
            }
        }

        log::debug!(
            "Mutating appointment {}: {} .. {} on {:?}",
            id,
            candidate.start,
            candidate.end,
            candidate.resource_id
        );

        self.appointments.insert(id.to_string(), candidate.clone());
        self.mark_dirty(id);
        Ok(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;
    use crate::models::resource::Resource;
    use chrono::{Duration, TimeZone};

    fn at(hour: u32, minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 10, hour, minute, 0).unwrap()
    }

    fn store() -> AppointmentStore {
        let mut store = AppointmentStore::new(PlannerConfig::default());
        store.set_resources(vec![
            Resource::new("r1", "Dr. Sarah Smith", "Cardiologist").unwrap(),
            Resource::new("r2", "Dr. John Doe", "Neurologist").unwrap(),
        ]);
        store.insert_batch(vec![Appointment::builder()
            .id("a1")
            .title("Consultation")
            .start(at(9, 0))
            .end(at(10, 0))
            .resource_id("r1")
            .build()
            .unwrap()]);
        store
    }

    #[test]
    fn test_mutate_move_commits() {
        let mut store = store();

        let patch = AppointmentPatch::relocate(at(14, 0), at(15, 0), "r2");
        let updated = store.mutate("a1", &patch).unwrap();

        assert_eq!(updated.start, at(14, 0));
        assert_eq!(updated.end, at(15, 0));
        assert_eq!(updated.resource_id, Some("r2".to_string()));
        // Identity is stable across mutations
        assert_eq!(updated.id, "a1");
        assert_eq!(store.get("a1").unwrap(), &updated);
    }

    #[test]
    fn test_mutate_is_idempotent() {
        let mut store = store();

        let patch = AppointmentPatch::relocate(at(14, 0), at(15, 0), "r2");
        let first = store.mutate("a1", &patch).unwrap();
        let second = store.mutate("a1", &patch).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_mutate_not_found() {
        let mut store = store();

        let patch = AppointmentPatch::reschedule(at(9, 0), at(10, 0));
        assert_eq!(
            store.mutate("ghost", &patch),
            Err(MutateError::NotFound("ghost".to_string()))
        );
    }

    #[test]
    fn test_mutate_rejects_inverted_interval() {
        let mut store = store();

        let patch = AppointmentPatch::reschedule(at(10, 0), at(9, 0));
        assert_eq!(store.mutate("a1", &patch), Err(MutateError::InvalidInterval));

        // Record unchanged
        let record = store.get("a1").unwrap();
        assert_eq!(record.start, at(9, 0));
        assert_eq!(record.end, at(10, 0));
    }

    #[test]
    fn test_mutate_rejects_below_minimum_duration() {
        let mut store = store();

        let patch = AppointmentPatch::reschedule(at(9, 0), at(9, 10));
        assert_eq!(
            store.mutate("a1", &patch),
            Err(MutateError::BelowMinimumDuration(30))
        );

        let record = store.get("a1").unwrap();
        assert_eq!(record.end, at(10, 0));
    }

    #[test]
    fn test_mutate_accepts_exact_minimum_duration() {
        let mut store = store();

        let patch = AppointmentPatch::reschedule(at(9, 0), at(9, 30));
        let updated = store.mutate("a1", &patch).unwrap();
        assert_eq!(updated.duration(), Duration::minutes(30));
    }

    #[test]
    fn test_mutate_rejects_unknown_resource() {
        let mut store = store();

        let patch = AppointmentPatch::relocate(at(14, 0), at(15, 0), "r99");
        assert_eq!(
            store.mutate("a1", &patch),
            Err(MutateError::InvalidResource("r99".to_string()))
        );
        assert_eq!(store.get("a1").unwrap().resource_id, Some("r1".to_string()));
    }

    #[test]
    fn test_mutate_rejects_detached_record() {
        let mut store = store();
        // Simulate a record stuck in the transient detached state
        let mut detached = store.get("a1").unwrap().clone();
        detached.resource_id = None;
        store.insert_batch(vec![detached]);

        let patch = AppointmentPatch::reschedule(at(9, 0), at(11, 0));
        assert_eq!(
            store.mutate("a1", &patch),
            Err(MutateError::InvalidResource("<none>".to_string()))
        );
    }

    #[test]
    fn test_validation_order_interval_before_duration() {
        let mut store = store();

        // Inverted and too short: interval violation wins
        let patch = AppointmentPatch::reschedule(at(10, 0), at(9, 55));
        assert_eq!(store.mutate("a1", &patch), Err(MutateError::InvalidInterval));
    }

    #[test]
    fn test_committed_intervals_always_valid() {
        let mut store = store();
        let min = store.config().min_duration();

        let patches = [
            AppointmentPatch::reschedule(at(8, 0), at(8, 45)),
            AppointmentPatch::relocate(at(13, 15), at(16, 0), "r2"),
            AppointmentPatch::reschedule(at(22, 30), at(23, 0)),
        ];

        for patch in &patches {
            let updated = store.mutate("a1", patch).unwrap();
            assert!(updated.start < updated.end);
            assert!(updated.end - updated.start >= min);
        }
    }
}
