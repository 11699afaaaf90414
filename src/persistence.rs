use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use crate::errors::{LedgerError, Result};

/// storage for the encoded ledger snapshot
pub trait SnapshotStore {
    /// read the last saved blob, if any
    fn load(&self) -> Result<Option<String>>;

    /// replace the saved blob
    fn save(&mut self, raw: &str) -> Result<()>;
}

/// in-memory store for tests and ephemeral ledgers
pub struct MemorySnapshotStore {
    blob: Option<String>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self { blob: None }
    }

    /// start from an existing blob, as if it had been saved earlier
    pub fn with_blob(raw: impl Into<String>) -> Self {
        Self {
            blob: Some(raw.into()),
        }
    }
}

impl Default for MemorySnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.blob.clone())
    }

    fn save(&mut self, raw: &str) -> Result<()> {
        self.blob = Some(raw.to_string());
        Ok(())
    }
}

/// store backed by a single file on disk
///
/// a missing file reads as no snapshot rather than an error, so a
/// fresh ledger can point at a path that does not exist yet
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LedgerError::Persistence {
                message: format!("read {}: {}", self.path.display(), e),
            }),
        }
    }

    fn save(&mut self, raw: &str) -> Result<()> {
        std::fs::write(&self.path, raw).map_err(|e| LedgerError::Persistence {
            message: format!("write {}: {}", self.path.display(), e),
        })?;
        debug!(path = %self.path.display(), bytes = raw.len(), "snapshot saved");
        Ok(())
    }
}
