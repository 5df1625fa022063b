use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the store is opened.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Mode {
    /// Open an existing store for reading only.
    ReadOnly,

    /// Create the store if it does not exist and open it for reading
    /// and writing (default).
    #[default]
    ReadWriteCreate,
}

/// Durability trade-off for commits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// Full durability – `fsync()` on every commit.
    Full,

    /// Skips syncing the meta-page on each commit (default).
    ///
    /// Data pages are still synced, so committed data survives process
    /// crashes. An OS crash or power failure may lose the last transaction,
    /// but the database remains consistent.
    #[default]
    NoMetaSync,

    /// No `fsync()` at all – the OS page cache decides when to flush.
    ///
    /// Fastest, but a power failure can lose an unbounded number of recent
    /// commits. Only use this for reproducible dataset builds or tests.
    NoSync,
}

/// Configuration for a record store.
///
/// The map size is only the *initial* capacity: commits that run out of
/// mapped space grow it automatically, so the default is deliberately small.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the store directory.
    pub path: PathBuf,

    /// Open mode (default: [`Mode::ReadWriteCreate`]).
    #[serde(default)]
    pub mode: Mode,

    /// Initial size of the memory map in bytes (default: 1 MiB).
    #[serde(default = "default_map_size")]
    pub map_size: usize,

    /// Maximum number of concurrent readers (default: 126).
    #[serde(default = "default_max_readers")]
    pub max_readers: u32,

    /// Sync mode for durability.
    #[serde(default)]
    pub sync_mode: SyncMode,
}

fn default_map_size() -> usize {
    1024 * 1024 // 1 MiB
}

fn default_max_readers() -> u32 {
    126
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mode: Mode::default(),
            map_size: default_map_size(),
            max_readers: default_max_readers(),
            sync_mode: SyncMode::default(),
        }
    }

    /// Open an existing store read-only.
    pub fn read_only(path: impl Into<PathBuf>) -> Self {
        Self::new(path).with_mode(Mode::ReadOnly)
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_map_size(mut self, map_size: usize) -> Self {
        self.map_size = map_size;
        self
    }

    pub fn with_max_readers(mut self, max_readers: u32) -> Self {
        self.max_readers = max_readers;
        self
    }

    pub fn with_sync_mode(mut self, sync_mode: SyncMode) -> Self {
        self.sync_mode = sync_mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = StoreConfig::new("/tmp/datumdb-test");
        assert_eq!(cfg.mode, Mode::ReadWriteCreate);
        assert_eq!(cfg.map_size, 1024 * 1024);
        assert_eq!(cfg.max_readers, 126);
        assert_eq!(cfg.sync_mode, SyncMode::NoMetaSync);
    }

    #[test]
    fn test_builders() {
        let cfg = StoreConfig::read_only("/data/train_lmdb")
            .with_map_size(64 * 1024)
            .with_sync_mode(SyncMode::NoSync);
        assert_eq!(cfg.mode, Mode::ReadOnly);
        assert_eq!(cfg.map_size, 64 * 1024);
        assert_eq!(cfg.sync_mode, SyncMode::NoSync);
    }
}
