use parking_lot::RwLock;
use tracing::info;
use crate::config::DockSettings;
use crate::errors::{DockBookingError, DockBookingResult};
use crate::models::{Dock, DockStatus};

/// Holds the docks of the site in registration order
#[derive(Default)]
pub struct DockRegistry {
    docks: RwLock<Vec<Dock>>,
}

impl DockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry seeded from the configured docks
    ///
    /// # Returns
    ///
    /// * `Ok(DockRegistry)` with every configured dock registered
    /// * `Err(DockBookingError::DuplicateDock)` if two docks share an id
    pub fn from_settings(docks: &[DockSettings]) -> DockBookingResult<Self> {
        let registry = Self::new();
        for dock in docks {
            registry.register(Dock::from(dock.clone()))?;
        }
        info!("Dock registry initialized with {} docks", docks.len());
        Ok(registry)
    }

    /// All docks in registration order
    pub fn list(&self) -> Vec<Dock> {
        self.docks.read().clone()
    }

    pub fn get(&self, id: &str) -> DockBookingResult<Dock> {
        self.docks
            .read()
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| DockBookingError::DockNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.docks.read().iter().any(|d| d.id == id)
    }

    pub fn register(&self, dock: Dock) -> DockBookingResult<()> {
        let mut docks = self.docks.write();
        if docks.iter().any(|d| d.id == dock.id) {
            return Err(DockBookingError::DuplicateDock(dock.id));
        }
        docks.push(dock);
        Ok(())
    }

    /// Changes the operational status of a dock
    ///
    /// Existing bookings on the dock are left as they are.
    ///
    /// # Returns
    ///
    /// * `Ok(DockStatus)`: the status the dock had before the change
    /// * `Err(DockBookingError::DockNotFound)` if the dock is not registered
    pub fn set_status(&self, id: &str, status: DockStatus) -> DockBookingResult<DockStatus> {
        let mut docks = self.docks.write();
        let dock = docks
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| DockBookingError::DockNotFound(id.to_string()))?;
        Ok(std::mem::replace(&mut dock.status, status))
    }

    /// Removes a dock. Callers must make sure no booking references it.
    pub fn remove(&self, id: &str) -> DockBookingResult<Dock> {
        let mut docks = self.docks.write();
        let index = docks
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| DockBookingError::DockNotFound(id.to_string()))?;
        Ok(docks.remove(index))
    }
}
