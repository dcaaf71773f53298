//! RocksDB implementation of the `StorageBackend` trait.
//!
//! Maps partitions to column families. The column family set is fixed
//! at open time: callers pass every partition they will use to
//! [`RocksDbBackend::open`], which merges them with whatever already
//! exists on disk.
//!
//! ## Uniqueness and batches
//!
//! RocksDB's `WriteBatch` gives atomicity but has no conditional
//! writes, so `PutUnique` preconditions are evaluated under an internal
//! mutex that serializes batches. Single-writer check-then-write is
//! enough here: this process is the only writer of its database.

use crate::storage_trait::{Operation, Partition, Result, StorageBackend, StorageError};
use rocksdb::{ColumnFamily, Direction, IteratorMode, Options, WriteBatch, DB};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// RocksDB-backed storage.
pub struct RocksDbBackend {
    db: Arc<DB>,
    /// Serializes batch precondition checks against batch writes.
    batch_lock: Mutex<()>,
}

impl RocksDbBackend {
    /// Opens (or creates) a database at `path` with the given
    /// partitions as column families, merged with any column families
    /// already present on disk.
    pub fn open(path: impl AsRef<Path>, partitions: &[&str]) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let mut cf_names: HashSet<String> =
            partitions.iter().map(|p| p.to_string()).collect();
        if let Ok(existing) = DB::list_cf(&opts, path.as_ref()) {
            cf_names.extend(existing);
        }
        let cf_names: Vec<String> = cf_names.into_iter().collect();

        let db = DB::open_cf(&opts, path.as_ref(), cf_names)
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        Ok(Self {
            db: Arc::new(db),
            batch_lock: Mutex::new(()),
        })
    }

    fn get_cf(&self, partition: &Partition) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))
    }
}

impl StorageBackend for RocksDbBackend {
    fn get(&self, partition: &Partition, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let cf = self.get_cf(partition)?;
        self.db
            .get_cf(cf, key)
            .map_err(|e| StorageError::IoError(e.to_string()))
    }

    fn put(&self, partition: &Partition, key: &[u8], value: &[u8]) -> Result<()> {
        let cf = self.get_cf(partition)?;
        self.db
            .put_cf(cf, key, value)
            .map_err(|e| StorageError::IoError(e.to_string()))
    }

    fn delete(&self, partition: &Partition, key: &[u8]) -> Result<()> {
        let cf = self.get_cf(partition)?;
        self.db
            .delete_cf(cf, key)
            .map_err(|e| StorageError::IoError(e.to_string()))
    }

    fn batch(&self, operations: Vec<Operation>) -> Result<()> {
        let _serialized = self.batch_lock.lock().unwrap_or_else(|e| e.into_inner());

        // Phase 1: validate PutUnique preconditions against the current
        // state plus writes staged earlier in this batch.
        let mut staged: HashMap<(String, Vec<u8>), Option<Vec<u8>>> = HashMap::new();
        for op in &operations {
            match op {
                Operation::PutUnique { partition, key, value, field } => {
                    let slot = (partition.name().to_string(), key.clone());
                    let current = match staged.get(&slot) {
                        Some(v) => v.clone(),
                        None => {
                            let cf = self.get_cf(partition)?;
                            self.db
                                .get_cf(cf, key)
                                .map_err(|e| StorageError::IoError(e.to_string()))?
                        }
                    };
                    if let Some(existing) = current {
                        if existing != *value {
                            return Err(StorageError::UniqueConstraintViolation(field.clone()));
                        }
                    }
                    staged.insert(slot, Some(value.clone()));
                }
                Operation::Put { partition, key, value } => {
                    staged.insert(
                        (partition.name().to_string(), key.clone()),
                        Some(value.clone()),
                    );
                }
                Operation::Delete { partition, key } => {
                    staged.insert((partition.name().to_string(), key.clone()), None);
                }
            }
        }

        // Phase 2: apply atomically.
        let mut batch = WriteBatch::default();
        for op in operations {
            match op {
                Operation::Put { partition, key, value }
                | Operation::PutUnique { partition, key, value, .. } => {
                    let cf = self.get_cf(&partition)?;
                    batch.put_cf(cf, key, value);
                }
                Operation::Delete { partition, key } => {
                    let cf = self.get_cf(&partition)?;
                    batch.delete_cf(cf, key);
                }
            }
        }

        self.db
            .write(batch)
            .map_err(|e| StorageError::IoError(e.to_string()))
    }

    fn scan(
        &self,
        partition: &Partition,
        prefix: Option<&[u8]>,
        start_key: Option<&[u8]>,
        limit: Option<usize>,
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let cf = self.get_cf(partition)?;

        let mode = if let Some(start) = start_key {
            IteratorMode::From(start, Direction::Forward)
        } else if let Some(p) = prefix {
            IteratorMode::From(p, Direction::Forward)
        } else {
            IteratorMode::Start
        };

        let mut results = Vec::new();
        for item in self.db.iterator_cf(cf, mode) {
            let (k, v) = item.map_err(|e| StorageError::IoError(e.to_string()))?;
            if let Some(p) = prefix {
                if !k.starts_with(p) {
                    break;
                }
            }
            results.push((k.to_vec(), v.to_vec()));
            if let Some(max) = limit {
                if results.len() >= max {
                    break;
                }
            }
        }
        Ok(results)
    }

    fn partition_exists(&self, partition: &Partition) -> bool {
        self.db.cf_handle(partition.name()).is_some()
    }

    fn create_partition(&self, partition: &Partition) -> Result<()> {
        // The column family set is fixed at open time.
        if self.partition_exists(partition) {
            Ok(())
        } else {
            Err(StorageError::Unsupported(format!(
                "partition '{}' was not listed at open time",
                partition.name()
            )))
        }
    }
}
