use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use crate::errors::DockBookingError;
use crate::scheduling::time_grid::{from_minutes, to_minutes, MINUTES_PER_DAY};

/// A time of day with minute precision, stored as minutes since midnight.
///
/// Serialized as a 24 hour `HH:MM` label. Valid values range from `00:00` to `23:59`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Builds a `ClockTime` from minutes since midnight
    ///
    /// # Returns
    ///
    /// * `Ok(ClockTime)` when `minutes` is within `[0, 1439]`
    /// * `Err(DockBookingError::InvalidTimeFormat)` otherwise
    pub fn from_minutes(minutes: u32) -> Result<Self, DockBookingError> {
        if minutes >= MINUTES_PER_DAY {
            return Err(DockBookingError::InvalidTimeFormat(format!(
                "{} minutes is outside the day",
                minutes
            )));
        }
        Ok(ClockTime(minutes as u16))
    }

    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }

    /// Adds a duration, returning `None` when the result would run past `23:59`
    pub fn checked_add(self, minutes: u32) -> Option<ClockTime> {
        let total = self.minutes().checked_add(minutes)?;
        ClockTime::from_minutes(total).ok()
    }
}

impl FromStr for ClockTime {
    type Err = DockBookingError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        to_minutes(label).map(|m| ClockTime(m as u16))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // always in range, construction is checked
        match from_minutes(self.minutes()) {
            Ok(label) => f.write_str(&label),
            Err(_) => write!(f, "{}min", self.0),
        }
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}
