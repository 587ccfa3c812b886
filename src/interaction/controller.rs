//! Gesture state machine.
//!
//! One controller drives all pointer gestures on the grid:
//! `idle → dragging → {committing, cancelled} → idle`. The committing and
//! cancelled states resolve within the release call and are reported
//! through [`GestureOutcome`]; between events the controller is either
//! idle or dragging. Preview state lives here, never in the store, so a
//! cancelled gesture leaves no trace.
//!
//! The rendering layer observes transitions through the [`GestureSurface`]
//! capability instead of being called into directly, keeping the state
//! logic testable without a rendering surface.

use chrono::{DateTime, Local, NaiveDate};
use thiserror::Error;

use crate::interaction::drag::{DragContext, DragPayload, DropTargetPayload, GestureKind};
use crate::interaction::resize::{ResizeContext, ResizeHandle};
use crate::services::store::{AppointmentPatch, AppointmentStore, MutateError};

/// Why a gesture ended without a commit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GestureError {
    #[error(transparent)]
    Mutate(#[from] MutateError),

    #[error("No drop region covers the release point")]
    InvalidDrop,
}

/// Terminal result of a gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    /// The store accepted the patch; this is the replacement record.
    Committed(crate::models::appointment::Appointment),
    /// Preview discarded, store untouched. The error is `None` for an
    /// explicit cancel (escape, release with nothing to commit).
    Cancelled(Option<GestureError>),
}

/// Observable controller state between events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Dragging,
}

/// Uncommitted candidate state shown while a gesture is active.
#[derive(Debug, Clone, PartialEq)]
pub struct GesturePreview {
    pub appointment_id: String,
    pub kind: GestureKind,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub resource_id: Option<String>,
}

/// Capability interface the rendering layer implements to mirror gesture
/// progress (ghost blocks, highlight, cursor).
pub trait GestureSurface {
    fn gesture_began(&mut self, _preview: &GesturePreview) {}
    fn gesture_progressed(&mut self, _preview: &GesturePreview) {}
    fn gesture_ended(&mut self, _outcome: &GestureOutcome) {}
}

/// Surface that ignores every notification.
#[derive(Debug, Default)]
pub struct NullSurface;

impl GestureSurface for NullSurface {}

enum ActiveGesture {
    Move(DragContext),
    Resize(ResizeContext),
}

/// Single-owner gesture state: at most one gesture is active at a time,
/// and a conflicting begin is ignored rather than tearing the current one.
#[derive(Default)]
pub struct GestureController {
    active: Option<ActiveGesture>,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GesturePhase {
        if self.active.is_some() {
            GesturePhase::Dragging
        } else {
            GesturePhase::Idle
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_appointment_id(&self) -> Option<&str> {
        match self.active.as_ref()? {
            ActiveGesture::Move(ctx) => Some(&ctx.appointment_id),
            ActiveGesture::Resize(ctx) => Some(&ctx.appointment_id),
        }
    }

    /// The interop payload of the active gesture, if any.
    pub fn payload(&self) -> Option<DragPayload> {
        match self.active.as_ref()? {
            ActiveGesture::Move(ctx) => Some(ctx.payload()),
            ActiveGesture::Resize(ctx) => Some(ctx.payload()),
        }
    }

    /// Begin a gesture on pointer-down.
    ///
    /// Returns false (and changes nothing) when a gesture is already
    /// active or the appointment is unknown — fast double-gesture input
    /// must not corrupt the running gesture.
    pub fn begin(
        &mut self,
        store: &AppointmentStore,
        appointment_id: &str,
        kind: GestureKind,
        surface: &mut dyn GestureSurface,
    ) -> bool {
        if self.active.is_some() {
            log::debug!(
                "Ignoring {:?} begin on {} while a gesture is active",
                kind,
                appointment_id
            );
            return false;
        }

        let Some(appointment) = store.get(appointment_id) else {
            log::debug!("Ignoring gesture begin on unknown appointment {}", appointment_id);
            return false;
        };

        let gesture = match kind {
            GestureKind::Move => ActiveGesture::Move(DragContext::from_appointment(appointment)),
            GestureKind::ResizeStart => ActiveGesture::Resize(ResizeContext::from_appointment(
                appointment,
                ResizeHandle::Start,
            )),
            GestureKind::ResizeEnd => ActiveGesture::Resize(ResizeContext::from_appointment(
                appointment,
                ResizeHandle::End,
            )),
        };

        self.active = Some(gesture);
        if let Some(preview) = self.preview() {
            surface.gesture_began(&preview);
        }
        true
    }

    /// Report the drop cell under the pointer during a move gesture.
    /// `None` clears the hover (pointer left the grid).
    pub fn update_move_target(
        &mut self,
        target: Option<&DropTargetPayload>,
        surface: &mut dyn GestureSurface,
    ) {
        let Some(ActiveGesture::Move(ctx)) = self.active.as_mut() else {
            return;
        };

        match target {
            Some(t) => match t.hour {
                Some(hour) => ctx.update_hover(t.resource_id.clone(), hour),
                None => ctx.clear_hover(),
            },
            None => ctx.clear_hover(),
        }

        if let Some(preview) = self.preview() {
            surface.gesture_progressed(&preview);
        }
    }

    /// Report the pointer's grid offset during a resize gesture. Rejected
    /// candidates do not update the preview and are not reported.
    pub fn update_resize_offset(
        &mut self,
        offset: f32,
        reference_day: NaiveDate,
        surface: &mut dyn GestureSurface,
        store: &AppointmentStore,
    ) -> bool {
        let Some(ActiveGesture::Resize(ctx)) = self.active.as_mut() else {
            return false;
        };

        let accepted = ctx.offer_offset(offset, reference_day, store.config());
        if accepted {
            if let Some(preview) = self.preview() {
                surface.gesture_progressed(&preview);
            }
        }
        accepted
    }

    /// Release the pointer, committing the accumulated preview.
    ///
    /// Move gestures need a hovered drop cell; releasing outside every
    /// region cancels with [`GestureError::InvalidDrop`]. A store
    /// rejection cancels with the mutation error and the record keeps its
    /// pre-gesture values. Returns `None` when no gesture was active.
    pub fn release(
        &mut self,
        store: &mut AppointmentStore,
        surface: &mut dyn GestureSurface,
    ) -> Option<GestureOutcome> {
        let gesture = self.active.take()?;

        let outcome = match gesture {
            ActiveGesture::Move(ctx) => {
                match (ctx.hovered_resource_id.as_deref(), ctx.hovered_times()) {
                    (Some(resource_id), Some((start, end))) => {
                        let patch = AppointmentPatch::relocate(start, end, resource_id);
                        match store.mutate(&ctx.appointment_id, &patch) {
                            Ok(updated) => GestureOutcome::Committed(updated),
                            Err(e) => GestureOutcome::Cancelled(Some(e.into())),
                        }
                    }
                    _ => GestureOutcome::Cancelled(Some(GestureError::InvalidDrop)),
                }
            }
            ActiveGesture::Resize(ctx) => {
                if ctx.has_preview() {
                    match store.mutate(&ctx.appointment_id, &ctx.patch()) {
                        Ok(updated) => GestureOutcome::Committed(updated),
                        Err(e) => GestureOutcome::Cancelled(Some(e.into())),
                    }
                } else {
                    // Handle grabbed but never moved
                    GestureOutcome::Cancelled(None)
                }
            }
        };

        surface.gesture_ended(&outcome);
        Some(outcome)
    }

    /// Explicitly cancel the active gesture (escape key). The preview is
    /// discarded without any store call.
    pub fn cancel(&mut self, surface: &mut dyn GestureSurface) -> bool {
        if self.active.take().is_none() {
            return false;
        }
        surface.gesture_ended(&GestureOutcome::Cancelled(None));
        true
    }

    /// Live preview for rendering, recomputed from the gesture state.
    pub fn preview(&self) -> Option<GesturePreview> {
        match self.active.as_ref()? {
            ActiveGesture::Move(ctx) => {
                let (start, end) = ctx
                    .hovered_times()
                    .unwrap_or((ctx.original_start, ctx.original_end));
                Some(GesturePreview {
                    appointment_id: ctx.appointment_id.clone(),
                    kind: GestureKind::Move,
                    start,
                    end,
                    resource_id: ctx
                        .hovered_resource_id
                        .clone()
                        .or_else(|| ctx.source_resource_id.clone()),
                })
            }
            ActiveGesture::Resize(ctx) => {
                let (start, end) = ctx.resolved_times();
                Some(GesturePreview {
                    appointment_id: ctx.appointment_id.clone(),
                    kind: ctx.handle.gesture_kind(),
                    start,
                    end,
                    resource_id: None,
                })
            }
        }
    }
}
