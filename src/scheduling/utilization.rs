//! # Utilization
//!
//! Percentage of a dock's operating window claimed by live bookings:
//! `round(100 * booked_minutes / operating_window_minutes)`.
//!
//! Overlapping bookings would be counted twice; the scheduler never stores them, so no deduplication happens here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::models::{Booking, Dock};

/// Minutes of live bookings on a dock among `bookings`
pub fn booked_minutes(dock_id: &str, bookings: &[Booking]) -> u32 {
    bookings
        .iter()
        .filter(|b| b.dock_id == dock_id && b.status.claims_slot())
        .map(|b| b.duration_minutes)
        .sum()
}

/// Utilization of one dock in whole percent, rounded half up
///
/// `bookings` should hold a single day; the caller selects the date. A zero-length window yields 0.
pub fn utilization(dock_id: &str, bookings: &[Booking], operating_window_minutes: u32) -> u32 {
    percent(booked_minutes(dock_id, bookings), operating_window_minutes)
}

fn percent(minutes: u32, window: u32) -> u32 {
    if window == 0 {
        return 0;
    }
    let (minutes, window) = (u64::from(minutes), u64::from(window));
    ((200 * minutes + window) / (2 * window)) as u32
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockUtilization {
    pub dock_id: String,
    pub dock_name: String,
    pub booked_minutes: u32,
    pub utilization: u32,
}

/// Utilization of every dock on one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilizationReport {
    pub date: NaiveDate,
    pub operating_window_minutes: u32,
    pub docks: Vec<DockUtilization>,
    /// Mean utilization across docks, rounded half up; 0 when there are no docks
    pub average: u32,
}

impl UtilizationReport {
    pub fn build(date: NaiveDate, docks: &[Dock], bookings: &[Booking], operating_window_minutes: u32) -> Self {
        let docks: Vec<DockUtilization> = docks
            .iter()
            .map(|dock| {
                let minutes = booked_minutes(&dock.id, bookings);
                DockUtilization {
                    dock_id: dock.id.clone(),
                    dock_name: dock.name.clone(),
                    booked_minutes: minutes,
                    utilization: percent(minutes, operating_window_minutes),
                }
            })
            .collect();

        let average = if docks.is_empty() {
            0
        } else {
            let total: u32 = docks.iter().map(|d| d.utilization).sum();
            percent(total, 100 * docks.len() as u32)
        };

        Self { date, operating_window_minutes, docks, average }
    }
}
