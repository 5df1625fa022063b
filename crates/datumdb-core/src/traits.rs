//! Store, cursor, and batch abstractions.
//!
//! Backends implement these traits; pipeline code is written against them so
//! the storage engine can be swapped without touching readers or writers.

use crate::config::StoreConfig;
use crate::error::Result;
use std::path::Path;

/// A stateful iterator over records, bound to its own read snapshot.
///
/// Two states: *valid* (positioned on a record) and *exhausted*. When
/// `valid()` is false the contents of `key()` and `value()` are
/// unspecified and must not be relied on.
pub trait RecordCursor {
    /// Position at the first record in iteration order.
    ///
    /// Leaves the cursor exhausted (not an error) if there is nothing to
    /// iterate.
    fn seek_to_first(&mut self) -> Result<()>;

    /// Advance to the next record in iteration order.
    fn next(&mut self) -> Result<()>;

    /// Raw bytes of the current record's key.
    fn key(&self) -> &[u8];

    /// Raw bytes of the current record's value.
    fn value(&self) -> &[u8];

    /// Whether the cursor is positioned on a record.
    fn valid(&self) -> bool;
}

/// A buffered write batch, applied atomically on [`commit`](Self::commit).
///
/// Puts never touch the store; all buffered pairs are written in a single
/// store-level transaction when the batch is committed. A batch dropped
/// without committing applies nothing.
pub trait WriteBatch {
    /// Buffer a key-value pair.
    fn put(&mut self, key: &[u8], value: &[u8]);

    /// Number of buffered pairs.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write every buffered pair and commit.
    fn commit(self) -> Result<()>;
}

/// An open record store handle.
pub trait RecordStore: Sized {
    type Cursor<'a>: RecordCursor
    where
        Self: 'a;
    type RandomAccessCursor<'a>: RecordCursor
    where
        Self: 'a;
    type Batch<'a>: WriteBatch
    where
        Self: 'a;

    /// Open (or create, depending on `config.mode`) the store.
    fn open(config: StoreConfig) -> Result<Self>;

    /// Close the store. Idempotent; the handle stays usable for a later
    /// reopen.
    fn close(&mut self);

    /// Start a read snapshot and return a cursor positioned at the first
    /// record in key order (exhausted if the store is empty).
    fn cursor(&self) -> Result<Self::Cursor<'_>>;

    /// Start a read snapshot and return a cursor that visits records in the
    /// order given by the index file at `index_path`, positioned at index 0.
    fn random_access_cursor(&self, index_path: &Path) -> Result<Self::RandomAccessCursor<'_>>;

    /// Return a fresh, empty write batch. No store-level transaction is
    /// opened until the batch commits.
    fn transaction(&self) -> Result<Self::Batch<'_>>;
}
