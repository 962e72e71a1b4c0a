use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("best score storage at {path} is unavailable: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("best score file {path} is malformed: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A single persisted slot holding the best score.
pub trait ScoreStore {
    fn load_best(&self) -> Result<u64, StoreError>;
    fn save_best(&mut self, best: u64) -> Result<(), StoreError>;
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
struct BestRecord {
    #[serde(default)]
    best: u64,
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ScoreStore for JsonFileStore {
    fn load_best(&self) -> Result<u64, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(self.io_err(e)),
        };
        let record: BestRecord =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            })?;
        Ok(record.best)
    }

    fn save_best(&mut self, best: u64) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
            }
        }
        let text = serde_json::to_string_pretty(&BestRecord { best }).map_err(|source| {
            StoreError::Json {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, text).map_err(|e| self.io_err(e))
    }
}

#[cfg(test)]
pub use memory::MemoryStore;

#[cfg(test)]
mod memory {
    use std::cell::Cell;
    use std::io;
    use std::path::PathBuf;
    use std::rc::Rc;

    use super::{ScoreStore, StoreError};

    /// In-memory slot; clones share it so tests can peek after handing one to a game.
    #[derive(Clone, Default)]
    pub struct MemoryStore {
        slot: Rc<Cell<u64>>,
        writes: Rc<Cell<usize>>,
        read_only: bool,
    }

    impl MemoryStore {
        pub fn with_best(best: u64) -> Self {
            let store = Self::default();
            store.slot.set(best);
            store
        }

        pub fn read_only(mut self) -> Self {
            self.read_only = true;
            self
        }

        pub fn best(&self) -> u64 {
            self.slot.get()
        }

        pub fn writes(&self) -> usize {
            self.writes.get()
        }
    }

    impl ScoreStore for MemoryStore {
        fn load_best(&self) -> Result<u64, StoreError> {
            Ok(self.slot.get())
        }

        fn save_best(&mut self, best: u64) -> Result<(), StoreError> {
            if self.read_only {
                return Err(StoreError::Io {
                    path: PathBuf::from("<memory>"),
                    source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
                });
            }
            self.slot.set(best);
            self.writes.set(self.writes.get() + 1);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("blockfall-{name}-{}-{nanos}", std::process::id()));
        path.push("best.json");
        path
    }

    #[test]
    fn missing_file_reads_as_zero() {
        let store = JsonFileStore::new(scratch_path("missing"));
        assert_eq!(store.load_best().expect("missing file is not an error"), 0);
    }

    #[test]
    fn save_creates_directories_and_reloads() {
        let path = scratch_path("save");
        let mut store = JsonFileStore::new(&path);
        store.save_best(1234).expect("save should succeed");
        assert_eq!(JsonFileStore::new(&path).load_best().expect("reload"), 1234);
        let _ = fs::remove_dir_all(path.parent().expect("has parent"));
    }

    #[test]
    fn malformed_file_is_a_json_error() {
        let path = scratch_path("malformed");
        fs::create_dir_all(path.parent().expect("has parent")).expect("mkdir");
        fs::write(&path, "not json").expect("write");
        let err = JsonFileStore::new(&path).load_best().unwrap_err();
        assert!(matches!(err, StoreError::Json { .. }));
        let _ = fs::remove_dir_all(path.parent().expect("has parent"));
    }

    #[test]
    fn missing_field_defaults_to_zero() {
        let record: BestRecord = serde_json::from_str("{}").expect("parse");
        assert_eq!(record, BestRecord { best: 0 });
    }
}
