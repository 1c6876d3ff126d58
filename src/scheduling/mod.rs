pub mod time_grid;
pub mod conflict;
pub mod dock_locks;
pub mod utilization;
pub mod occupancy;
pub mod scheduler;

pub use scheduler::DockScheduler;
pub use time_grid::{from_minutes, generate_slots, to_minutes, OperatingWindow, TimeGrid};
