//! Storage layer for LanceHub.
//!
//! Architecture, top down:
//!
//! ```text
//! IndexedEntityStore<K, V>   ← typed CRUD + atomic secondary indexes
//! EntityStore<K, V>          ← typed CRUD, JSON at rest
//!     ↓
//! StorageBackend             ← generic K/V operations over partitions
//!     ↓
//! RocksDbBackend / InMemoryBackend
//! ```
//!
//! Uniqueness is a first-class storage outcome here: batches may carry
//! [`Operation::PutUnique`] entries whose precondition is checked under
//! the backend's write lock, so a violated unique index surfaces as
//! [`StorageError::UniqueConstraintViolation`] naming the field, never
//! as a caught-and-inspected backend fault.

pub mod entity_store;
pub mod indexed_store;
pub mod memory;
pub mod rocksdb_impl;
pub mod storage_trait;

pub use entity_store::EntityStore;
pub use indexed_store::{IndexDefinition, IndexedEntityStore};
pub use memory::InMemoryBackend;
pub use rocksdb_impl::RocksDbBackend;
pub use storage_trait::{
    Operation, Partition, Result, StorageBackend, StorageError,
};
