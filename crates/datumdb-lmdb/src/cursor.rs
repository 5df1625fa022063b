//! Sequential and random-access cursors.
//!
//! Both cursor kinds own their read transaction, so they see a stable
//! snapshot of the store for their whole lifetime and never block writers
//! (read transactions are always aborted on drop, never committed).
//!
//! Native LMDB cursors borrow their transaction, which would make a struct
//! holding both self-referential. Instead each seek opens a short-lived
//! native cursor scoped inside the call, copies the record out, and drops
//! it before the call returns. Re-anchoring a fresh cursor on the current
//! key is exact because the snapshot is immutable.

use datumdb_core::{
    error::{DatumError, Result},
    index::IndexEntry,
    keys::synthetic_key,
    traits::RecordCursor,
};
use lmdb::{Cursor, Database, RoTransaction, Transaction};
use lmdb_sys as ffi;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Walks every record in ascending key order.
pub struct LmdbCursor<'env> {
    txn: RoTransaction<'env>,
    db: Database,
    key: Vec<u8>,
    value: Vec<u8>,
    valid: bool,
}

impl<'env> LmdbCursor<'env> {
    pub(crate) fn new(txn: RoTransaction<'env>, db: Database) -> Self {
        Self {
            txn,
            db,
            key: Vec::new(),
            value: Vec::new(),
            valid: false,
        }
    }
}

impl RecordCursor for LmdbCursor<'_> {
    fn seek_to_first(&mut self) -> Result<()> {
        let cursor = self
            .txn
            .open_ro_cursor(self.db)
            .map_err(|e| DatumError::Transaction(e.to_string()))?;

        match cursor.get(None, None, ffi::MDB_FIRST) {
            Ok((key, value)) => {
                self.key = key.unwrap_or(&[]).to_vec();
                self.value = value.to_vec();
                self.valid = true;
            }
            Err(lmdb::Error::NotFound) => self.valid = false,
            Err(e) => return Err(DatumError::Transaction(e.to_string())),
        }
        Ok(())
    }

    fn next(&mut self) -> Result<()> {
        if !self.valid {
            return Ok(());
        }

        let cursor = self
            .txn
            .open_ro_cursor(self.db)
            .map_err(|e| DatumError::Transaction(e.to_string()))?;

        // A fresh native cursor has no position; anchor it on the current
        // key before stepping.
        cursor
            .get(Some(self.key.as_slice()), None, ffi::MDB_SET_KEY)
            .map_err(|e| DatumError::Transaction(e.to_string()))?;

        match cursor.get(None, None, ffi::MDB_NEXT) {
            Ok((key, value)) => {
                self.key = key.unwrap_or(&[]).to_vec();
                self.value = value.to_vec();
                self.valid = true;
            }
            Err(lmdb::Error::NotFound) => self.valid = false,
            Err(e) => return Err(DatumError::Transaction(e.to_string())),
        }
        Ok(())
    }

    fn key(&self) -> &[u8] {
        &self.key
    }

    fn value(&self) -> &[u8] {
        &self.value
    }

    fn valid(&self) -> bool {
        self.valid
    }
}

/// Visits records in the order given by an index file rather than the
/// store's native key order.
///
/// Each step recomputes the synthetic key for the current position and
/// performs an exact-match seek; a key missing from the store means the
/// index file and the store are out of sync and surfaces as
/// [`DatumError::KeyNotFound`]. Advancing past the last entry wraps back
/// to position 0, so a training loop can run epochs without reseeding.
///
/// The position counter is atomic so another thread may observe the
/// current position, but cursor motion itself must be driven by a single
/// thread: the read-counter/compute-key/seek sequence is not synchronized.
pub struct LmdbRandomAccessCursor<'env> {
    txn: RoTransaction<'env>,
    db: Database,
    entries: Vec<IndexEntry>,
    position: AtomicUsize,
    key: Vec<u8>,
    value: Vec<u8>,
    valid: bool,
}

impl<'env> LmdbRandomAccessCursor<'env> {
    /// `entries` must be non-empty; the store handle checks before calling.
    pub(crate) fn new(
        txn: RoTransaction<'env>,
        db: Database,
        entries: Vec<IndexEntry>,
    ) -> Result<Self> {
        let mut cursor = Self {
            txn,
            db,
            entries,
            position: AtomicUsize::new(0),
            key: Vec::new(),
            value: Vec::new(),
            valid: false,
        };
        cursor.seek_to_first()?;
        Ok(cursor)
    }

    /// Current position in the index entry list.
    pub fn position(&self) -> usize {
        self.position.load(Ordering::SeqCst)
    }

    /// Label of the index entry at the current position.
    pub fn label(&self) -> i32 {
        self.entries[self.position()].label
    }

    /// Number of entries in the index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn seek_exact(&mut self, position: usize) -> Result<()> {
        let target = synthetic_key(position, &self.entries[position].identifier);

        let cursor = self
            .txn
            .open_ro_cursor(self.db)
            .map_err(|e| DatumError::Transaction(e.to_string()))?;

        // MDB_SET_KEY accepts only the exact key; there is no fallback to
        // the nearest record.
        match cursor.get(Some(target.as_slice()), None, ffi::MDB_SET_KEY) {
            Ok((key, value)) => {
                self.value = value.to_vec();
                self.key = match key {
                    Some(key) => key.to_vec(),
                    None => target,
                };
                self.valid = true;
                Ok(())
            }
            Err(lmdb::Error::NotFound) => {
                self.valid = false;
                Err(DatumError::KeyNotFound(
                    String::from_utf8_lossy(&target).into_owned(),
                ))
            }
            Err(e) => {
                self.valid = false;
                Err(DatumError::Transaction(e.to_string()))
            }
        }
    }
}

impl RecordCursor for LmdbRandomAccessCursor<'_> {
    fn seek_to_first(&mut self) -> Result<()> {
        self.position.store(0, Ordering::SeqCst);
        self.seek_exact(0)
    }

    /// Advance, wrapping to position 0 past the last entry.
    fn next(&mut self) -> Result<()> {
        let next = (self.position.load(Ordering::SeqCst) + 1) % self.entries.len();
        self.position.store(next, Ordering::SeqCst);
        self.seek_exact(next)
    }

    fn key(&self) -> &[u8] {
        &self.key
    }

    fn value(&self) -> &[u8] {
        &self.value
    }

    fn valid(&self) -> bool {
        self.valid
    }
}
