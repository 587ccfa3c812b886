// Interaction engine: gesture state, resize candidates, drop resolution

pub mod controller;
pub mod drag;
pub mod drop;
pub mod resize;
