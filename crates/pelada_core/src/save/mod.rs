// Persistence seam for the roster snapshot.
// The engine only needs load/save of the snapshot shape; anything smarter
// (spreadsheet APIs, databases) plugs in behind the trait.

pub mod error;
pub mod file;
pub mod memory;
pub mod snapshot;

pub use error::SaveError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use snapshot::RosterSnapshot;

/// Durable storage of the roster snapshot across restarts.
pub trait RosterStore {
    /// Current stored snapshot, or defaults when nothing usable exists.
    /// Never fails: an unreadable store is reported in the log and treated
    /// as empty.
    fn load(&self) -> RosterSnapshot;

    /// Replace the stored snapshot.
    fn save(&mut self, snapshot: &RosterSnapshot) -> Result<(), SaveError>;
}
