//! datumdb core: traits and types for a sorted record store feeding
//! training-data pipelines.
//!
//! This crate defines the storage-engine-independent pieces:
//! - [`RecordStore`] / [`RecordCursor`] / [`WriteBatch`]: the three
//!   capabilities a pipeline needs: sequential reads, index-driven
//!   random-access reads, and buffered batch writes
//! - [`StoreConfig`]: open mode, initial map size, durability
//! - [`index`]: the `<identifier> <label>` index file format that drives
//!   random-access traversal
//! - [`keys`]: the synthetic key scheme shared by builders and readers
//!
//! The LMDB implementation lives in `datumdb-lmdb`.

pub mod config;
pub mod error;
pub mod index;
pub mod keys;
pub mod traits;

pub use config::{Mode, StoreConfig, SyncMode};
pub use error::{DatumError, Result};
pub use index::{load_index, IndexEntry};
pub use traits::{RecordCursor, RecordStore, WriteBatch};
