use datumdb_core::{
    config::{Mode, StoreConfig, SyncMode},
    error::{DatumError, Result},
    index::load_index,
    traits::{RecordCursor, RecordStore},
};
use lmdb::{Database, Environment, EnvironmentFlags};
use parking_lot::Mutex;
use std::io;
use std::path::Path;

use crate::batch::LmdbWriteBatch;
use crate::cursor::{LmdbCursor, LmdbRandomAccessCursor};

/// The open environment plus the single default database inside it.
pub(crate) struct StoreInner {
    pub(crate) env: Environment,
    pub(crate) db: Database,

    /// Current capacity of the memory map. Doubled by the write batch when a
    /// commit hits `MapFull`; the lock doubles as the single-writer guard so
    /// a resize can never race another commit.
    pub(crate) map_size: Mutex<usize>,
}

impl StoreInner {
    fn open(config: &StoreConfig) -> Result<Self> {
        // Reader slots are tied to cursors, not threads: every cursor owns
        // its own read transaction, so one thread may hold several at once.
        let mut flags = EnvironmentFlags::NO_TLS;
        match config.sync_mode {
            SyncMode::Full => {}
            SyncMode::NoMetaSync => flags.insert(EnvironmentFlags::NO_META_SYNC),
            SyncMode::NoSync => flags.insert(EnvironmentFlags::NO_SYNC),
        }

        match config.mode {
            Mode::ReadOnly => {
                flags.insert(EnvironmentFlags::READ_ONLY);
            }
            Mode::ReadWriteCreate => {
                std::fs::create_dir_all(&config.path)?;
            }
        }

        let mut builder = Environment::new();
        builder.set_flags(flags);
        builder.set_map_size(config.map_size);
        builder.set_max_readers(config.max_readers);

        let env = builder
            .open(&config.path)
            .map_err(|e| DatumError::Io(io::Error::other(e)))?;

        // The unnamed default database always exists, in both modes.
        let db = env
            .open_db(None)
            .map_err(|e| DatumError::Transaction(e.to_string()))?;

        tracing::debug!(
            path = %config.path.display(),
            mode = ?config.mode,
            map_size = config.map_size,
            "opened record store"
        );

        Ok(Self {
            env,
            db,
            map_size: Mutex::new(config.map_size),
        })
    }
}

/// LMDB-backed record store.
///
/// Reads hand out cursors, each bound to its own read snapshot; writes go
/// through buffered [`LmdbWriteBatch`]es that grow the memory map on demand.
/// [`close`](RecordStore::close) is idempotent and the handle can be
/// [`reopen`](LmdbStore::reopen)ed afterwards with its original
/// configuration.
pub struct LmdbStore {
    config: StoreConfig,
    inner: Option<StoreInner>,
}

impl LmdbStore {
    pub(crate) fn inner(&self) -> Result<&StoreInner> {
        self.inner
            .as_ref()
            .ok_or_else(|| DatumError::InvalidState("store is closed".into()))
    }

    /// Whether the handle currently has an open environment.
    pub fn is_open(&self) -> bool {
        self.inner.is_some()
    }

    /// Reopen a closed store with the configuration it was opened with.
    /// No-op if the store is already open.
    pub fn reopen(&mut self) -> Result<()> {
        if self.inner.is_none() {
            self.inner = Some(StoreInner::open(&self.config)?);
        }
        Ok(())
    }

    /// Current capacity of the memory map in bytes.
    ///
    /// Starts at `config.map_size` and grows when commits exhaust it.
    pub fn map_size(&self) -> Result<usize> {
        Ok(*self.inner()?.map_size.lock())
    }

    /// The configuration this store was opened with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

impl RecordStore for LmdbStore {
    type Cursor<'a>
        = LmdbCursor<'a>
    where
        Self: 'a;
    type RandomAccessCursor<'a>
        = LmdbRandomAccessCursor<'a>
    where
        Self: 'a;
    type Batch<'a>
        = LmdbWriteBatch<'a>
    where
        Self: 'a;

    fn open(config: StoreConfig) -> Result<Self> {
        let inner = StoreInner::open(&config)?;
        Ok(Self {
            config,
            inner: Some(inner),
        })
    }

    fn close(&mut self) {
        if self.inner.take().is_some() {
            tracing::debug!(path = %self.config.path.display(), "closed record store");
        }
    }

    fn cursor(&self) -> Result<LmdbCursor<'_>> {
        let inner = self.inner()?;
        let txn = inner
            .env
            .begin_ro_txn()
            .map_err(|e| DatumError::Transaction(e.to_string()))?;
        let mut cursor = LmdbCursor::new(txn, inner.db);
        cursor.seek_to_first()?;
        Ok(cursor)
    }

    fn random_access_cursor(&self, index_path: &Path) -> Result<LmdbRandomAccessCursor<'_>> {
        let inner = self.inner()?;
        let entries = load_index(index_path)?;
        if entries.is_empty() {
            return Err(DatumError::CorruptIndex(format!(
                "{}: index file contains no entries",
                index_path.display()
            )));
        }
        let txn = inner
            .env
            .begin_ro_txn()
            .map_err(|e| DatumError::Transaction(e.to_string()))?;
        LmdbRandomAccessCursor::new(txn, inner.db, entries)
    }

    fn transaction(&self) -> Result<LmdbWriteBatch<'_>> {
        Ok(LmdbWriteBatch::new(self.inner()?))
    }
}

impl Drop for LmdbStore {
    fn drop(&mut self) {
        self.close();
    }
}
