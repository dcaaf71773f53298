//! In-memory implementation of the `StorageBackend` trait.
//!
//! Backs each partition with an ordered map behind a single `RwLock`,
//! which makes `batch()` trivially atomic: preconditions are checked
//! and all writes applied while holding the write lock. Used by the
//! test suites and as an embedded collaborator when no durable store
//! is configured.

use crate::storage_trait::{Operation, Partition, Result, StorageBackend, StorageError};
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

type PartitionMap = BTreeMap<Vec<u8>, Vec<u8>>;

/// In-memory storage backend.
///
/// Partitions are created on demand via `create_partition`. All data
/// is lost on drop.
#[derive(Default)]
pub struct InMemoryBackend {
    partitions: RwLock<HashMap<String, PartitionMap>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for InMemoryBackend {
    fn get(&self, partition: &Partition, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let guard = self.partitions.read().unwrap_or_else(|e| e.into_inner());
        let map = guard
            .get(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn put(&self, partition: &Partition, key: &[u8], value: &[u8]) -> Result<()> {
        let mut guard = self.partitions.write().unwrap_or_else(|e| e.into_inner());
        let map = guard
            .get_mut(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))?;
        map.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&self, partition: &Partition, key: &[u8]) -> Result<()> {
        let mut guard = self.partitions.write().unwrap_or_else(|e| e.into_inner());
        let map = guard
            .get_mut(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))?;
        map.remove(key);
        Ok(())
    }

    fn batch(&self, operations: Vec<Operation>) -> Result<()> {
        let mut guard = self.partitions.write().unwrap_or_else(|e| e.into_inner());

        // Validate every operation against pre-batch state plus the
        // writes staged earlier in this batch, before touching the maps.
        let mut staged: HashMap<(String, Vec<u8>), Option<Vec<u8>>> = HashMap::new();

        for op in &operations {
            let (partition, key) = match op {
                Operation::Put { partition, key, .. }
                | Operation::PutUnique { partition, key, .. }
                | Operation::Delete { partition, key } => (partition, key),
            };
            if !guard.contains_key(partition.name()) {
                return Err(StorageError::PartitionNotFound(partition.name().to_string()));
            }

            if let Operation::PutUnique { value, field, .. } = op {
                let slot = (partition.name().to_string(), key.clone());
                let current = match staged.get(&slot) {
                    Some(staged_value) => staged_value.clone(),
                    None => guard
                        .get(partition.name())
                        .and_then(|map| map.get(key).cloned()),
                };
                if let Some(existing) = current {
                    if existing != *value {
                        return Err(StorageError::UniqueConstraintViolation(field.clone()));
                    }
                }
            }

            let slot = (partition.name().to_string(), key.clone());
            match op {
                Operation::Put { value, .. } | Operation::PutUnique { value, .. } => {
                    staged.insert(slot, Some(value.clone()));
                }
                Operation::Delete { .. } => {
                    staged.insert(slot, None);
                }
            }
        }

        // Preconditions hold; apply everything.
        for op in operations {
            match op {
                Operation::Put { partition, key, value }
                | Operation::PutUnique { partition, key, value, .. } => {
                    if let Some(map) = guard.get_mut(partition.name()) {
                        map.insert(key, value);
                    }
                }
                Operation::Delete { partition, key } => {
                    if let Some(map) = guard.get_mut(partition.name()) {
                        map.remove(&key);
                    }
                }
            }
        }

        Ok(())
    }

    fn scan(
        &self,
        partition: &Partition,
        prefix: Option<&[u8]>,
        start_key: Option<&[u8]>,
        limit: Option<usize>,
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let guard = self.partitions.read().unwrap_or_else(|e| e.into_inner());
        let map = guard
            .get(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))?;

        let lower = start_key.or(prefix).map(|k| k.to_vec());
        let iter: Box<dyn Iterator<Item = (&Vec<u8>, &Vec<u8>)>> = match lower {
            Some(start) => Box::new(map.range(start..)),
            None => Box::new(map.iter()),
        };

        let mut results = Vec::new();
        for (k, v) in iter {
            if let Some(p) = prefix {
                if !k.starts_with(p) {
                    break;
                }
            }
            results.push((k.clone(), v.clone()));
            if let Some(max) = limit {
                if results.len() >= max {
                    break;
                }
            }
        }
        Ok(results)
    }

    fn partition_exists(&self, partition: &Partition) -> bool {
        self.partitions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(partition.name())
    }

    fn create_partition(&self, partition: &Partition) -> Result<()> {
        self.partitions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .entry(partition.name().to_string())
            .or_default();
        Ok(())
    }
}
