//! Stacking layout for appointment blocks within resource lanes.
//!
//! Overlapping appointments in a lane are stacked vertically in sorted
//! order (start ascending, `order` as tie-break) and the lane grows to
//! fit the stack. This is deliberately not interval-graph packing — the
//! row trades density for a stable, predictable ordering.

use crate::config::PlannerConfig;
use crate::models::appointment::Appointment;
use crate::models::resource::Resource;
use crate::models::view::TimeRange;
use crate::services::store::queries::sort_for_stacking;
use crate::utils::geometry::{self, GridRect};

/// A positioned appointment block inside its lane.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentBlock {
    pub appointment_id: String,
    /// Hour column the appointment starts in.
    pub column_index: usize,
    /// Vertical slot within the lane stack.
    pub stack_index: usize,
    /// Lane-local pixel rect.
    pub rect: GridRect,
}

/// One resource row of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceLane {
    pub resource_id: String,
    pub height: f32,
    pub blocks: Vec<AppointmentBlock>,
}

/// Lay out one resource's appointments for the visible range.
///
/// Blocks are clipped to the appointments whose interval overlaps the
/// range; lane height is `row_height × stack depth` so stacked blocks
/// never collide visually.
pub fn layout_resource_lane(
    resource: &Resource,
    appointments: &[Appointment],
    visible: &TimeRange,
    config: &PlannerConfig,
) -> ResourceLane {
    let mut lane_appointments: Vec<Appointment> = appointments
        .iter()
        .filter(|a| a.resource_id.as_deref() == Some(resource.id.as_str()))
        .filter(|a| a.overlaps(visible.start, visible.end))
        .cloned()
        .collect();
    sort_for_stacking(&mut lane_appointments);

    let depth = lane_appointments.len().max(1);
    let height = config.row_height * depth as f32;

    let blocks = lane_appointments
        .iter()
        .enumerate()
        .map(|(stack_index, appointment)| {
            let left = geometry::time_to_offset(appointment.start, config.column_width);
            let width = geometry::duration_to_width(appointment.duration(), config.column_width);
            AppointmentBlock {
                appointment_id: appointment.id.clone(),
                column_index: geometry::column_index(left, config.column_width),
                stack_index,
                rect: GridRect::new(
                    left,
                    stack_index as f32 * config.row_height,
                    width,
                    config.row_height,
                ),
            }
        })
        .collect();

    ResourceLane {
        resource_id: resource.id.clone(),
        height,
        blocks,
    }
}

/// Lay out every visible resource lane in presentation order.
pub fn layout_grid(
    resources: &[&Resource],
    appointments: &[Appointment],
    visible: &TimeRange,
    config: &PlannerConfig,
) -> Vec<ResourceLane> {
    resources
        .iter()
        .map(|resource| layout_resource_lane(resource, appointments, visible, config))
        .collect()
}
