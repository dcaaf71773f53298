//! Storage backend abstraction for pluggable storage implementations.
//!
//! The `StorageBackend` trait defines the operations every backend
//! provides:
//! - get/put/delete for key-value access
//! - batch for atomic multi-operation transactions, including
//!   unique-precondition writes
//! - scan for prefix/range queries
//! - partition management (column families in RocksDB, map namespaces
//!   in memory)
//!
//! ## Partition model
//!
//! A [`Partition`] is a named keyspace. RocksDB maps it to a column
//! family; the in-memory backend maps it to a separate ordered map.
//!
//! ## Atomicity contract
//!
//! `batch()` is all-or-nothing. If any [`Operation::PutUnique`]
//! precondition fails, *no* operation in the batch is applied and the
//! backend reports the violated field. This is the transaction
//! primitive the approval workflow leans on.

use thiserror::Error;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// Partition (column family, map namespace) not found
    #[error("Partition not found: {0}")]
    PartitionNotFound(String),

    /// Generic I/O error from the underlying storage
    #[error("I/O error: {0}")]
    IoError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Operation not supported by this backend
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Unique constraint violation, carrying the logical field name
    /// (e.g. "email", "username", "phone")
    #[error("Unique constraint violation on field '{0}'")]
    UniqueConstraintViolation(String),

    /// Other errors
    #[error("Storage error: {0}")]
    Other(String),
}

/// A named keyspace within a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Partition {
    name: String,
}

impl Partition {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<&str> for Partition {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Partition {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// A single operation inside an atomic batch.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Insert or update a key-value pair.
    Put {
        partition: Partition,
        key: Vec<u8>,
        value: Vec<u8>,
    },

    /// Insert a key-value pair only if the key is absent or already
    /// holds exactly `value`. Used for unique index entries where the
    /// value is the owning primary key: re-pointing a key at the same
    /// owner is a no-op, pointing it at a different owner is a
    /// constraint violation on `field`.
    PutUnique {
        partition: Partition,
        key: Vec<u8>,
        value: Vec<u8>,
        field: String,
    },

    /// Delete a key. Deleting an absent key is not an error.
    Delete { partition: Partition, key: Vec<u8> },
}

/// Trait for pluggable storage backend implementations.
///
/// Implementations must be thread-safe (`Send + Sync`).
///
/// ## Error handling
///
/// - `PartitionNotFound` if the partition doesn't exist
/// - `IoError` for underlying storage failures
/// - `UniqueConstraintViolation` when a `PutUnique` precondition fails
pub trait StorageBackend: Send + Sync {
    /// Retrieves a value by key. `Ok(None)` if the key doesn't exist.
    fn get(&self, partition: &Partition, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Stores a key-value pair, overwriting any existing value.
    fn put(&self, partition: &Partition, key: &[u8], value: &[u8]) -> Result<()>;

    /// Deletes a key. Idempotent.
    fn delete(&self, partition: &Partition, key: &[u8]) -> Result<()>;

    /// Executes the operations atomically: either every operation is
    /// applied or none is. `PutUnique` preconditions are evaluated
    /// against the pre-batch state plus earlier staged writes in the
    /// same batch.
    fn batch(&self, operations: Vec<Operation>) -> Result<()>;

    /// Scans key-value pairs in a partition.
    ///
    /// - `prefix`: only return keys starting with these bytes
    /// - `start_key`: start scanning from this key (inclusive)
    /// - `limit`: return at most this many entries
    fn scan(
        &self,
        partition: &Partition,
        prefix: Option<&[u8]>,
        start_key: Option<&[u8]>,
        limit: Option<usize>,
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>>;

    /// Checks whether a partition exists.
    fn partition_exists(&self, partition: &Partition) -> bool;

    /// Creates a partition. Idempotent where supported; backends that
    /// fix their partition set at open time return `Unsupported` for
    /// partitions they were not opened with.
    fn create_partition(&self, partition: &Partition) -> Result<()>;
}
