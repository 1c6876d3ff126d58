use std::sync::Arc;
use dashmap::DashMap;
use parking_lot::{ArcMutexGuard, Mutex, RawMutex};

/// Per-dock exclusive locks serializing check-then-mutate sequences.
///
/// Locks are created lazily, only for docks the caller has already found in the registry, and
/// dropped with `forget` when a dock is removed. When several docks are locked at once they are
/// acquired in sorted id order, so two operations touching the same pair of docks cannot deadlock.
#[derive(Default)]
pub struct DockLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

/// Holds the locks of one or more docks; they are released when the guard is dropped
pub struct DockGuard {
    _guards: Vec<ArcMutexGuard<RawMutex, ()>>,
}

impl DockLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&self, dock_id: &str) -> Arc<Mutex<()>> {
        // clone the Arc out so no DashMap shard lock is held while blocking on the dock lock
        self.locks.entry(dock_id.to_string()).or_default().value().clone()
    }

    /// Acquires the locks of every listed dock, blocking until all are held
    pub fn lock(&self, dock_ids: &[&str]) -> DockGuard {
        let mut ids: Vec<&str> = dock_ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        let guards = ids
            .into_iter()
            .map(|id| self.handle(id).lock_arc())
            .collect();

        DockGuard { _guards: guards }
    }

    /// Drops the lock of a removed dock. Guards already handed out stay valid.
    pub fn forget(&self, dock_id: &str) {
        self.locks.remove(dock_id);
    }

    /// Number of docks with a lock allocated
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
