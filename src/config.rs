//! # Configuration Management

//! This module handles the configuration loading and management for the IQX Dock Booking service.
//! It leverages the `config` crate to provide a flexible and structured way to define and access configuration settings from various sources, including:

//! * YAML configuration files (default.yaml, development.yaml, production.yaml)
//! * Environment variables

//! The core of this module is the `Settings` struct, which encapsulates all the configuration settings required by the application.

use serde::{Deserialize, Serialize};
use config::{Config, Environment, File};
use std::collections::BTreeSet;
use std::env;
use std::path::PathBuf;
use tracing::debug;
use crate::errors::{DockBookingError, DockBookingResult};
use crate::models::{ClockTime, Dock, DockStatus, DockType, TemperatureZone, VehicleType};
use crate::scheduling::time_grid::{OperatingWindow, TimeGrid};

/// Represents the complete set of configuration settings for the IQX Dock Booking service.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Settings for the HTTP listener
    pub server: ServerSettings,
    /// Settings for application logging
    pub logging: LoggingSettings,
    /// Time grid and operating window of the site
    pub schedule: ScheduleSettings,
    /// The docks the registry is seeded with
    #[serde(default)]
    pub docks: Vec<DockSettings>,
}

/// Holds the address the HTTP API binds to
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Holds the configuration settings for application logging
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    /// The logging level used when `RUST_LOG` is not set (e.g., "info", "debug")
    pub level: String,
    /// The directory path where log files will be stored (optional)
    pub path: Option<PathBuf>,
}

/// Time grid and operating window.
///
/// The grid is a display and snapping convenience; the operating window is the denominator of utilization
/// and bounds the slots offered as available. They are configured independently.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScheduleSettings {
    /// First grid slot of the day
    pub grid_start: ClockTime,
    /// Grid slot width in minutes
    pub grid_step_minutes: u32,
    /// Number of grid slots per day
    pub grid_slot_count: usize,
    pub operating_window_start: ClockTime,
    pub operating_window_end: ClockTime,
    /// Capacity of the booking event channel
    pub event_buffer: usize,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            grid_start: ClockTime::from_minutes(6 * 60).unwrap_or(ClockTime::MIDNIGHT),
            grid_step_minutes: 45,
            grid_slot_count: 22,
            operating_window_start: ClockTime::from_minutes(6 * 60).unwrap_or(ClockTime::MIDNIGHT),
            operating_window_end: ClockTime::from_minutes(22 * 60).unwrap_or(ClockTime::MIDNIGHT),
            event_buffer: 256,
        }
    }
}

impl ScheduleSettings {
    pub fn time_grid(&self) -> DockBookingResult<TimeGrid> {
        TimeGrid::new(self.grid_start, self.grid_step_minutes, self.grid_slot_count)
    }

    pub fn operating_window(&self) -> DockBookingResult<OperatingWindow> {
        OperatingWindow::new(self.operating_window_start, self.operating_window_end)
    }
}

/// Represents the configuration for a single dock
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DockSettings {
    pub id: String,
    pub name: String,
    pub dock_type: DockType,
    #[serde(default = "default_dock_status")]
    pub status: DockStatus,
    pub max_vehicle_size: VehicleType,
    pub temperature_zones: BTreeSet<TemperatureZone>,
    #[serde(default)]
    pub equipment: Vec<String>,
}

fn default_dock_status() -> DockStatus {
    DockStatus::Active
}

impl From<DockSettings> for Dock {
    fn from(settings: DockSettings) -> Self {
        Dock {
            id: settings.id,
            name: settings.name,
            dock_type: settings.dock_type,
            status: settings.status,
            max_vehicle_size: settings.max_vehicle_size,
            temperature_zones: settings.temperature_zones,
            equipment: settings.equipment,
        }
    }
}


/// # Settings Initialization
///
/// The `Settings` implementation provides a `new` function to load and construct the configuration settings.
impl Settings {
    /// Loads and constructs the application settings from various configuration sources.
    ///
    /// This function reads configuration settings from the following sources, in order of precedence:
    ///
    /// 1. `default.yaml`: Contains default settings for the application, including the seeded docks
    /// 2. Environment-specific YAML file (e.g., `development.yaml` or `production.yaml`) based on the `RUN_MODE` environment variable
    /// 3. Environment variables prefixed with `APP` (e.g., `APP__SERVER__PORT`)
    ///
    /// The `CONFIG_DIR` environment variable can be used to specify the directory where the YAML configuration files are located (defaults to "src/config").
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)`: If the settings were loaded, constructed and validated successfully
    /// * `Err(DockBookingError)`: If there was an error during the loading or construction process
    pub fn new() -> Result<Self, DockBookingError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "src/config".into());
        debug!("Run Mode: {:?}, Config Dir: {:?}", run_mode, config_dir);

        let s = Config::builder()
            .add_source(File::with_name(&format!("{}/default", config_dir)))
            .add_source(File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        let mut s: Self = s.try_deserialize::<Settings>()
            .map_err(DockBookingError::from)?;

        if let Some(ref mut path) = s.logging.path {
            *path = env::current_dir()?.join(path.clone());
        }

        s.validate()?;
        Ok(s)
    }

    /// Checks the values deserialization cannot: grid step within a day, window order, unique dock ids
    pub fn validate(&self) -> DockBookingResult<()> {
        self.schedule.time_grid()?;
        self.schedule.operating_window()?;
        if self.schedule.event_buffer == 0 {
            return Err(DockBookingError::ConfigError("schedule.event_buffer must be positive".to_string()));
        }
        let mut seen = BTreeSet::new();
        for dock in &self.docks {
            if !seen.insert(dock.id.as_str()) {
                return Err(DockBookingError::DuplicateDock(dock.id.clone()));
            }
        }
        Ok(())
    }
}
