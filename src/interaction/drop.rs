//! Drop-target registry and drop dispatch.
//!
//! The rendering layer registers one region per (resource row, hour
//! column) cell; during a move gesture the resolver maps the pointer to
//! the covering region. Drop dispatch resolves ids against the store and
//! delegates to `mutate`, preserving the dragged appointment's duration.

use crate::interaction::drag::{DragPayload, DropTargetPayload};
use crate::models::appointment::Appointment;
use crate::services::store::{AppointmentPatch, AppointmentStore, MutateError};
use crate::utils::geometry::GridRect;
use chrono::{DateTime, Local};

/// A registered drop cell on the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DropRegion {
    pub resource_id: String,
    pub column_index: usize,
    /// Instant at the cell's leading edge.
    pub hour: DateTime<Local>,
    pub rect: GridRect,
}

impl DropRegion {
    pub fn payload(&self) -> DropTargetPayload {
        DropTargetPayload {
            resource_id: self.resource_id.clone(),
            column_index: self.column_index,
            hour: Some(self.hour),
        }
    }
}

/// Registry of the grid's drop regions, rebuilt per layout pass.
#[derive(Debug, Default)]
pub struct DropTargetRegistry {
    regions: Vec<DropRegion>,
}

impl DropTargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn register(&mut self, region: DropRegion) {
        self.regions.push(region);
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// The region covering a pointer position, or `None` when the pointer
    /// is outside every registered cell.
    pub fn resolve(&self, x: f32, y: f32) -> Option<&DropRegion> {
        self.regions.iter().find(|r| r.rect.contains(x, y))
    }
}

/// Why a drop was silently ignored (no store call at all).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredDrop {
    UnknownAppointment,
    UnknownResource,
    MissingInstant,
}

/// What dispatching a drop did.
#[derive(Debug, Clone, PartialEq)]
pub enum DropDisposition {
    Committed(Appointment),
    Ignored(IgnoredDrop),
    Rejected(MutateError),
}

/// Dispatch a resolved drop.
///
/// Source appointment and destination resource are resolved by id; either
/// one missing makes the drop a no-op. The committed interval keeps the
/// appointment's current duration, starting at the target cell's instant.
pub fn dispatch_drop(
    store: &mut AppointmentStore,
    payload: &DragPayload,
    target: &DropTargetPayload,
) -> DropDisposition {
    let Some(appointment) = store.get(&payload.appointment_id) else {
        log::debug!("Ignoring drop of unknown appointment {}", payload.appointment_id);
        return DropDisposition::Ignored(IgnoredDrop::UnknownAppointment);
    };

    if store.resource(&target.resource_id).is_none() {
        log::debug!("Ignoring drop onto unknown resource {}", target.resource_id);
        return DropDisposition::Ignored(IgnoredDrop::UnknownResource);
    }

    let Some(new_start) = target.hour else {
        return DropDisposition::Ignored(IgnoredDrop::MissingInstant);
    };

    let new_end = new_start + appointment.duration();
    let patch = AppointmentPatch::relocate(new_start, new_end, target.resource_id.clone());

    match store.mutate(&payload.appointment_id, &patch) {
        Ok(updated) => DropDisposition::Committed(updated),
        Err(e) => DropDisposition::Rejected(e),
    }
}
