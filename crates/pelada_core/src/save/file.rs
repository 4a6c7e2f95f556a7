use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::error::SaveError;
use super::snapshot::RosterSnapshot;
use super::RosterStore;

/// JSON flat-file store.
///
/// Writes are atomic (temp file + rename) so a crash mid-save leaves the
/// previous file intact. A missing or unreadable file loads as defaults;
/// a bad disk never takes the roster down.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_snapshot(&self) -> Result<RosterSnapshot, SaveError> {
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(SaveError::Deserialization)
    }
}

impl RosterStore for FileStore {
    fn load(&self) -> RosterSnapshot {
        if !self.path.exists() {
            return RosterSnapshot::default();
        }

        match self.read_snapshot() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                log::warn!(
                    "unreadable roster file {:?}, starting from defaults: {}",
                    self.path,
                    err
                );
                RosterSnapshot::default()
            }
        }
    }

    fn save(&mut self, snapshot: &RosterSnapshot) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let data =
            serde_json::to_string_pretty(snapshot).map_err(SaveError::Serialization)?;

        // Atomic save: write to temp file, then rename
        let temp_path = self.path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(data.as_bytes())?;
            file.flush()?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, &self.path)?;

        log::debug!("saved {} bytes to {:?}", data.len(), self.path);
        Ok(())
    }
}
