//! Typed entity storage over a single partition.
//!
//! `EntityStore<K, V>` gives strongly-typed CRUD with type-safe keys:
//! a store keyed by `ApplicationId` will not compile against an
//! `AccountId`. Entities are JSON at rest.

use crate::storage_trait::{Operation, Partition, Result, StorageBackend, StorageError};
use lancehub_commons::StorageKey;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Trait for typed entity storage with automatic serialization.
///
/// Implementors provide the backend handle and partition name; the
/// CRUD methods come for free.
pub trait EntityStore<K, V>
where
    K: StorageKey,
    V: Serialize + DeserializeOwned + Send + Sync,
{
    /// The storage backend this store writes through.
    fn backend(&self) -> &Arc<dyn StorageBackend>;

    /// Partition name for this entity type, e.g. "applications".
    fn partition(&self) -> &str;

    fn serialize(&self, entity: &V) -> Result<Vec<u8>> {
        serde_json::to_vec(entity).map_err(|e| StorageError::SerializationError(e.to_string()))
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<V> {
        serde_json::from_slice(bytes).map_err(|e| StorageError::SerializationError(e.to_string()))
    }

    /// Stores an entity under its key, overwriting any previous value.
    fn put(&self, key: &K, entity: &V) -> Result<()> {
        let partition = Partition::new(self.partition());
        let value = self.serialize(entity)?;
        self.backend().put(&partition, &key.storage_key(), &value)
    }

    /// Retrieves an entity. `Ok(None)` if absent.
    fn get(&self, key: &K) -> Result<Option<V>> {
        let partition = Partition::new(self.partition());
        match self.backend().get(&partition, &key.storage_key())? {
            Some(bytes) => Ok(Some(self.deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Deletes an entity. Idempotent.
    fn delete(&self, key: &K) -> Result<()> {
        let partition = Partition::new(self.partition());
        self.backend().delete(&partition, &key.storage_key())
    }

    /// Builds the batch operation that would store this entity, for
    /// composition into a larger atomic batch.
    fn put_op(&self, key: &K, entity: &V) -> Result<Operation> {
        Ok(Operation::Put {
            partition: Partition::new(self.partition()),
            key: key.storage_key(),
            value: self.serialize(entity)?,
        })
    }

    /// Builds the batch operation that would delete this entity.
    fn delete_op(&self, key: &K) -> Operation {
        Operation::Delete {
            partition: Partition::new(self.partition()),
            key: key.storage_key(),
        }
    }

    /// Loads every entity in the partition. Fine for the small tables
    /// this service keeps; not meant for unbounded data.
    fn scan_all(&self) -> Result<Vec<V>> {
        let partition = Partition::new(self.partition());
        let pairs = self.backend().scan(&partition, None, None, None)?;
        pairs
            .into_iter()
            .map(|(_, bytes)| self.deserialize(&bytes))
            .collect()
    }
}
