//! # IQX Dock Booking
//!
//! Allocation of loading docks to carrier visits: a dock registry, an in-memory booking store, a
//! scheduler enforcing overlap and compatibility invariants, utilization accounting, and an HTTP API.

pub mod config;
pub mod controllers;
pub mod errors;
pub mod event_handling;
pub mod init;
pub mod models;
pub mod repositories;
pub mod rules;
pub mod scheduling;
pub mod utils;
