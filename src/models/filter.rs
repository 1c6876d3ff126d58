use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::models::booking::Booking;
use crate::models::states::BookingStatus;

/// Selects either every dock or one specific dock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum DockSelector {
    #[default]
    All,
    Dock(String),
}

impl DockSelector {
    pub fn matches(&self, dock_id: &str) -> bool {
        match self {
            DockSelector::All => true,
            DockSelector::Dock(id) => id == dock_id,
        }
    }
}

impl From<String> for DockSelector {
    fn from(value: String) -> Self {
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            DockSelector::All
        } else {
            DockSelector::Dock(value)
        }
    }
}

impl From<DockSelector> for String {
    fn from(selector: DockSelector) -> Self {
        match selector {
            DockSelector::All => "all".to_string(),
            DockSelector::Dock(id) => id,
        }
    }
}

/// Criteria deriving the visible subset of bookings. All predicates are ANDed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingFilter {
    /// Exact calendar date
    pub date: NaiveDate,
    /// Dock restriction, `All` by default
    #[serde(default)]
    pub dock: DockSelector,
    /// Case-insensitive substring of the carrier name
    #[serde(default)]
    pub carrier: Option<String>,
    /// Exact lifecycle status
    #[serde(default)]
    pub status: Option<BookingStatus>,
}

impl BookingFilter {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date,
            dock: DockSelector::All,
            carrier: None,
            status: None,
        }
    }

    pub fn with_dock(mut self, dock_id: impl Into<String>) -> Self {
        self.dock = DockSelector::from(dock_id.into());
        self
    }

    pub fn with_carrier(mut self, carrier: impl Into<String>) -> Self {
        self.carrier = Some(carrier.into());
        self
    }

    pub fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        booking.date == self.date
            && self.dock.matches(&booking.dock_id)
            && self.carrier.as_deref().map_or(true, |needle| {
                booking.carrier.to_lowercase().contains(&needle.to_lowercase())
            })
            && self.status.map_or(true, |status| booking.status == status)
    }
}
