//! Appointment resize system.
//!
//! Resizing drags a handle on the appointment's start or end edge along
//! the time axis. Candidate times are recomputed from the raw pointer
//! offset on every move; a candidate that would invert the interval is
//! rejected live and never reaches the preview.

use chrono::{DateTime, Local, NaiveDate};

use crate::config::PlannerConfig;
use crate::interaction::drag::{DragPayload, GestureKind};
use crate::models::appointment::Appointment;
use crate::services::store::AppointmentPatch;
use crate::utils::geometry::{self, GridRect};

/// Which edge of the appointment is being resized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeHandle {
    /// Leading edge - adjusts start time
    Start,
    /// Trailing edge - adjusts end time
    End,
}

impl ResizeHandle {
    pub fn gesture_kind(&self) -> GestureKind {
        match self {
            ResizeHandle::Start => GestureKind::ResizeStart,
            ResizeHandle::End => GestureKind::ResizeEnd,
        }
    }
}

/// Size of the resize handle hit area
pub const HANDLE_SIZE: f32 = 8.0;

/// Context for an active resize operation
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeContext {
    /// The appointment being resized
    pub appointment_id: String,
    /// Which handle is being dragged
    pub handle: ResizeHandle,
    /// Original appointment start time
    pub original_start: DateTime<Local>,
    /// Original appointment end time
    pub original_end: DateTime<Local>,
    /// Accepted candidate start, if the start edge moved
    pub preview_start: Option<DateTime<Local>>,
    /// Accepted candidate end, if the end edge moved
    pub preview_end: Option<DateTime<Local>>,
}

impl ResizeContext {
    /// Create a resize context from an appointment
    pub fn from_appointment(appointment: &Appointment, handle: ResizeHandle) -> Self {
        Self {
            appointment_id: appointment.id.clone(),
            handle,
            original_start: appointment.start,
            original_end: appointment.end,
            preview_start: None,
            preview_end: None,
        }
    }

    /// Effective start: accepted preview or the original.
    pub fn current_start(&self) -> DateTime<Local> {
        self.preview_start.unwrap_or(self.original_start)
    }

    /// Effective end: accepted preview or the original.
    pub fn current_end(&self) -> DateTime<Local> {
        self.preview_end.unwrap_or(self.original_end)
    }

    pub fn has_preview(&self) -> bool {
        self.preview_start.is_some() || self.preview_end.is_some()
    }

    /// Offer a candidate time for the dragged edge.
    ///
    /// Start candidates at or past the current end, and end candidates at
    /// or before the current start, are rejected without touching the
    /// preview. Returns whether the candidate was accepted.
    pub fn offer_candidate(&mut self, candidate: DateTime<Local>) -> bool {
        match self.handle {
            ResizeHandle::Start => {
                if candidate >= self.current_end() {
                    log::debug!(
                        "Rejecting resize-start candidate {} at/after end {}",
                        candidate,
                        self.current_end()
                    );
                    return false;
                }
                self.preview_start = Some(candidate);
            }
            ResizeHandle::End => {
                if candidate <= self.current_start() {
                    log::debug!(
                        "Rejecting resize-end candidate {} at/before start {}",
                        candidate,
                        self.current_start()
                    );
                    return false;
                }
                self.preview_end = Some(candidate);
            }
        }
        true
    }

    /// Offer the candidate implied by a grid pixel offset, mapped through
    /// the geometry snap. Returns whether it was accepted.
    pub fn offer_offset(
        &mut self,
        offset: f32,
        reference_day: NaiveDate,
        config: &PlannerConfig,
    ) -> bool {
        let candidate = geometry::offset_to_instant(
            offset,
            config.column_width,
            reference_day,
            config.snap_minutes,
        );
        self.offer_candidate(candidate)
    }

    /// The times a commit would write: preview where accepted, original
    /// elsewhere.
    pub fn resolved_times(&self) -> (DateTime<Local>, DateTime<Local>) {
        (self.current_start(), self.current_end())
    }

    /// The store patch for the accumulated preview.
    pub fn patch(&self) -> AppointmentPatch {
        let (start, end) = self.resolved_times();
        AppointmentPatch::reschedule(start, end)
    }

    /// The interop payload for this gesture.
    pub fn payload(&self) -> DragPayload {
        DragPayload {
            appointment_id: self.appointment_id.clone(),
            kind: self.handle.gesture_kind(),
            source_resource_id: None,
            column_index: None,
            original_start: Some(self.original_start),
            original_end: Some(self.original_end),
        }
    }
}

/// Pointer-down hit zones for an appointment block: resize zones along
/// the leading/trailing edges, move zone in between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleRects {
    pub start: GridRect,
    pub end: GridRect,
    pub body: GridRect,
}

impl HandleRects {
    /// Carve a block rect into start-handle, body, and end-handle zones.
    ///
    /// Narrow blocks split into thirds so both handles stay reachable.
    pub fn for_block(rect: GridRect) -> Self {
        let zone = HANDLE_SIZE.min(rect.width / 3.0);
        Self {
            start: GridRect::new(rect.left, rect.top, zone, rect.height),
            end: GridRect::new(rect.right() - zone, rect.top, zone, rect.height),
            body: GridRect::new(
                rect.left + zone,
                rect.top,
                (rect.width - 2.0 * zone).max(0.0),
                rect.height,
            ),
        }
    }

    /// Which gesture a pointer-down at this point starts, if any.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<GestureKind> {
        if self.start.contains(x, y) {
            Some(GestureKind::ResizeStart)
        } else if self.end.contains(x, y) {
            Some(GestureKind::ResizeEnd)
        } else if self.body.contains(x, y) {
            Some(GestureKind::Move)
        } else {
            None
        }
    }
}
