use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::models::{Booking, BookingSummary, ClockTime, Dock, DockStatus};
use crate::scheduling::utilization::utilization;

/// One grid slot of one dock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotOccupancy {
    pub slot: ClockTime,
    /// The live booking covering the slot start, if any
    pub booking: Option<BookingSummary>,
}

/// The slot row of one dock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockOccupancy {
    pub dock_id: String,
    pub dock_name: String,
    pub status: DockStatus,
    pub utilization: u32,
    pub slots: Vec<SlotOccupancy>,
}

/// The occupancy grid of a day: one row per dock, one column per slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyView {
    pub date: NaiveDate,
    pub slots: Vec<ClockTime>,
    pub docks: Vec<DockOccupancy>,
}

impl OccupancyView {
    /// Lays the day's bookings out on the grid
    ///
    /// A slot is occupied by the booking whose half-open interval contains the slot start.
    pub fn build(
        date: NaiveDate,
        docks: &[Dock],
        bookings: &[Booking],
        slots: &[ClockTime],
        operating_window_minutes: u32,
    ) -> Self {
        let rows = docks
            .iter()
            .map(|dock| {
                let on_dock: Vec<&Booking> = bookings
                    .iter()
                    .filter(|b| b.dock_id == dock.id && b.date == date && b.status.claims_slot())
                    .collect();
                let cells = slots
                    .iter()
                    .map(|slot| SlotOccupancy {
                        slot: *slot,
                        booking: on_dock
                            .iter()
                            .find(|b| b.start <= *slot && *slot < b.end)
                            .map(|b| b.summary()),
                    })
                    .collect();
                DockOccupancy {
                    dock_id: dock.id.clone(),
                    dock_name: dock.name.clone(),
                    status: dock.status,
                    utilization: utilization(&dock.id, bookings, operating_window_minutes),
                    slots: cells,
                }
            })
            .collect();

        Self { date, slots: slots.to_vec(), docks: rows }
    }
}
