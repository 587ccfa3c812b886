//! Drag payloads and the move-gesture context.
//!
//! The payload schema is shared across components and must keep the
//! original field spelling; the context is the owned per-gesture state
//! the controller updates from pointer events.

use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};

use crate::models::appointment::Appointment;

/// Kind of pointer gesture, tagged with the interop spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureKind {
    #[serde(rename = "appointment")]
    Move,
    #[serde(rename = "resize-start")]
    ResizeStart,
    #[serde(rename = "resize-end")]
    ResizeEnd,
}

/// Payload attached to a drag at gesture start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    pub appointment_id: String,
    #[serde(rename = "type")]
    pub kind: GestureKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_start: Option<DateTime<Local>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_end: Option<DateTime<Local>>,
}

/// Payload describing a resolved drop cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropTargetPayload {
    pub resource_id: String,
    pub column_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<DateTime<Local>>,
}

/// Owned state of an active move gesture.
///
/// Original times are captured once at pointer-down; every pointer move
/// recomputes the hover fields from scratch, so the preview cannot drift.
#[derive(Debug, Clone, PartialEq)]
pub struct DragContext {
    pub appointment_id: String,
    pub original_start: DateTime<Local>,
    pub original_end: DateTime<Local>,
    pub duration: Duration,
    pub source_resource_id: Option<String>,
    pub column_index: Option<usize>,
    pub hovered_resource_id: Option<String>,
    pub hovered_instant: Option<DateTime<Local>>,
}

impl DragContext {
    pub fn from_appointment(appointment: &Appointment) -> Self {
        Self {
            appointment_id: appointment.id.clone(),
            original_start: appointment.start,
            original_end: appointment.end,
            duration: appointment.duration(),
            source_resource_id: appointment.resource_id.clone(),
            column_index: None,
            hovered_resource_id: appointment.resource_id.clone(),
            hovered_instant: Some(appointment.start),
        }
    }

    pub fn with_column_index(mut self, column_index: usize) -> Self {
        self.column_index = Some(column_index);
        self
    }

    /// Record the cell currently under the pointer.
    pub fn update_hover(&mut self, resource_id: impl Into<String>, instant: DateTime<Local>) {
        self.hovered_resource_id = Some(resource_id.into());
        self.hovered_instant = Some(instant);
    }

    /// Forget the hover target (pointer left the grid).
    pub fn clear_hover(&mut self) {
        self.hovered_resource_id = None;
        self.hovered_instant = None;
    }

    /// Candidate start/end at the hovered cell, duration preserved.
    pub fn hovered_times(&self) -> Option<(DateTime<Local>, DateTime<Local>)> {
        self.hovered_instant
            .map(|start| (start, start + self.duration))
    }

    /// The interop payload for this gesture.
    pub fn payload(&self) -> DragPayload {
        DragPayload {
            appointment_id: self.appointment_id.clone(),
            kind: GestureKind::Move,
            source_resource_id: self.source_resource_id.clone(),
            column_index: self.column_index,
            original_start: Some(self.original_start),
            original_end: Some(self.original_end),
        }
    }
}
