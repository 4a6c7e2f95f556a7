use super::error::SaveError;
use super::snapshot::RosterSnapshot;
use super::RosterStore;

/// In-memory store. The reference implementation of [`RosterStore`], used
/// by tests and by embeddings that persist elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: RosterSnapshot,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: RosterSnapshot) -> Self {
        Self { snapshot }
    }

    /// Last saved snapshot.
    pub fn snapshot(&self) -> &RosterSnapshot {
        &self.snapshot
    }
}

impl RosterStore for MemoryStore {
    fn load(&self) -> RosterSnapshot {
        self.snapshot.clone()
    }

    fn save(&mut self, snapshot: &RosterSnapshot) -> Result<(), SaveError> {
        self.snapshot = snapshot.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load(), RosterSnapshot::default());

        let mut snapshot = RosterSnapshot::default();
        snapshot.wait_queue.push("Diego".to_string());
        store.save(&snapshot).unwrap();

        assert_eq!(store.load(), snapshot);
        assert_eq!(store.snapshot(), &snapshot);
    }
}
