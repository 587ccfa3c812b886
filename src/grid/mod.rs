// Grid module
// Virtualized time window and stacking layout for the planner grid

pub mod layout;
pub mod window;

pub use layout::{AppointmentBlock, ResourceLane};
pub use window::{NavigateDirection, TimeWindow};
