//! LMDB-backed record store implementation
//!
//! Implements the `datumdb-core` traits on top of LMDB:
//! - Sequential cursors over the store's native key order
//! - Random-access cursors driven by an external `<identifier> <label>`
//!   index file and the shared synthetic key scheme
//! - Buffered write batches that double the memory map and retry when a
//!   commit exhausts it
//! - Single-writer semantics (enforced by mutex), concurrent readers on
//!   independent snapshots

pub mod batch;
pub mod cursor;
pub mod store;

pub use batch::LmdbWriteBatch;
pub use cursor::{LmdbCursor, LmdbRandomAccessCursor};
pub use store::LmdbStore;
