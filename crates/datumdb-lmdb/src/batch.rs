use datumdb_core::{
    error::{DatumError, Result},
    traits::WriteBatch,
};
use lmdb::{Transaction, WriteFlags};

use crate::store::StoreInner;

/// Buffered write batch that survives map exhaustion.
///
/// Puts accumulate in memory; [`commit`](WriteBatch::commit) writes every
/// buffered pair in a single LMDB write transaction. If the store reports
/// `MapFull` (from a put or from the commit itself), the failed
/// transaction is discarded, the map size is doubled, and the whole batch
/// is retried. The retry loop is bounded only by success or a non-capacity
/// error.
///
/// Growth calls `mdb_env_set_mapsize`, which requires that no transaction
/// is active in this process: the batch's own writer lock covers writers,
/// but callers must not hold cursors open across a commit that may grow
/// the map.
pub struct LmdbWriteBatch<'s> {
    store: &'s StoreInner,

    // Parallel buffers; entry i of each is one logical put.
    keys: Vec<Vec<u8>>,
    values: Vec<Vec<u8>>,
}

impl<'s> LmdbWriteBatch<'s> {
    pub(crate) fn new(store: &'s StoreInner) -> Self {
        Self {
            store,
            keys: Vec::new(),
            values: Vec::new(),
        }
    }

    /// One full write attempt: begin, put everything in buffer order,
    /// commit. The transaction aborts on drop if any step fails.
    fn try_commit(&self) -> std::result::Result<(), lmdb::Error> {
        let mut txn = self.store.env.begin_rw_txn()?;
        for (key, value) in self.keys.iter().zip(&self.values) {
            txn.put(self.store.db, key, value, WriteFlags::empty())?;
        }
        txn.commit()
    }
}

impl WriteBatch for LmdbWriteBatch<'_> {
    fn put(&mut self, key: &[u8], value: &[u8]) {
        self.keys.push(key.to_vec());
        self.values.push(value.to_vec());
    }

    fn len(&self) -> usize {
        self.keys.len()
    }

    fn commit(self) -> Result<()> {
        // The capacity lock is also the single-writer guard, so a resize
        // cannot race another commit.
        let mut map_size = self.store.map_size.lock();

        loop {
            match self.try_commit() {
                Ok(()) => return Ok(()),
                Err(lmdb::Error::MapFull) => {
                    let new_size = *map_size * 2;
                    tracing::warn!(
                        old_size = *map_size,
                        new_size,
                        "store map full, doubling map size and retrying commit"
                    );
                    self.store
                        .env
                        .set_map_size(new_size)
                        .map_err(|e| DatumError::CapacityExhausted(e.to_string()))?;
                    *map_size = new_size;
                }
                Err(e) => return Err(DatumError::Transaction(e.to_string())),
            }
        }
    }
}
