//! Entity store with automatic secondary index maintenance.
//!
//! `IndexedEntityStore<K, V>` keeps the entity row and all of its
//! index entries consistent by writing them in a single atomic batch:
//!
//! ```text
//! insert(key, entity)
//!     backend.batch([
//!         Put       { entity },
//!         PutUnique { email index },     // unique indexes carry a
//!         PutUnique { username index },  // precondition; a violation
//!     ])                                 // aborts the whole batch
//!
//! update(key, entity)
//!     1. fetch old entity
//!     2. backend.batch([
//!         Delete    { stale index entries },
//!         Put       { entity },
//!         PutUnique { new index entries },
//!     ])
//! ```
//!
//! The `ops_for_*` methods expose the same operation lists without
//! executing them, so callers can bundle an entity update with writes
//! to *other* partitions into one transaction. The approval workflow
//! uses this to migrate an application into an account and delete the
//! application row atomically.

use crate::storage_trait::{Operation, Partition, Result, StorageBackend, StorageError};
use lancehub_commons::StorageKey;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Defines how to derive one index entry from an entity.
pub trait IndexDefinition<K, V>: Send + Sync
where
    K: StorageKey,
    V: Serialize + DeserializeOwned + Send + Sync,
{
    /// Partition holding this index's entries.
    /// Convention: `{main_partition}_idx_{field}`.
    fn partition(&self) -> &str;

    /// Logical field name, reported on uniqueness conflicts.
    fn field(&self) -> &str;

    /// Whether this index enforces uniqueness.
    fn unique(&self) -> bool {
        false
    }

    /// Extracts the index key for an entity, or `None` to skip
    /// indexing it (e.g. a nullable field that is currently unset).
    fn extract_key(&self, primary_key: &K, entity: &V) -> Option<Vec<u8>>;
}

/// An entity store that keeps secondary indexes consistent with the
/// entity rows. Index entries store the primary key bytes, enabling
/// reverse lookup.
pub struct IndexedEntityStore<K, V>
where
    K: StorageKey,
    V: Serialize + DeserializeOwned + Send + Sync,
{
    backend: Arc<dyn StorageBackend>,
    partition: String,
    indexes: Vec<Arc<dyn IndexDefinition<K, V>>>,
}

impl<K, V> IndexedEntityStore<K, V>
where
    K: StorageKey,
    V: Serialize + DeserializeOwned + Send + Sync,
{
    /// Creates the store and makes sure the main and index partitions
    /// exist on backends that create partitions dynamically.
    pub fn new(
        backend: Arc<dyn StorageBackend>,
        partition: impl Into<String>,
        indexes: Vec<Arc<dyn IndexDefinition<K, V>>>,
    ) -> Self {
        let partition = partition.into();
        let _ = backend.create_partition(&Partition::new(&partition));
        for index in &indexes {
            let _ = backend.create_partition(&Partition::new(index.partition()));
        }
        Self { backend, partition, indexes }
    }

    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    pub fn partition(&self) -> &str {
        &self.partition
    }

    fn serialize(&self, entity: &V) -> Result<Vec<u8>> {
        serde_json::to_vec(entity).map_err(|e| StorageError::SerializationError(e.to_string()))
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<V> {
        serde_json::from_slice(bytes).map_err(|e| StorageError::SerializationError(e.to_string()))
    }

    fn index_put_op(&self, index: &dyn IndexDefinition<K, V>, index_key: Vec<u8>, pk: &K) -> Operation {
        let partition = Partition::new(index.partition());
        if index.unique() {
            Operation::PutUnique {
                partition,
                key: index_key,
                value: pk.storage_key(),
                field: index.field().to_string(),
            }
        } else {
            Operation::Put {
                partition,
                key: index_key,
                value: pk.storage_key(),
            }
        }
    }

    /// Operations to insert a brand-new entity with its index entries.
    pub fn ops_for_insert(&self, key: &K, entity: &V) -> Result<Vec<Operation>> {
        let mut ops = Vec::with_capacity(1 + self.indexes.len());
        ops.push(Operation::Put {
            partition: Partition::new(&self.partition),
            key: key.storage_key(),
            value: self.serialize(entity)?,
        });
        for index in &self.indexes {
            if let Some(index_key) = index.extract_key(key, entity) {
                ops.push(self.index_put_op(index.as_ref(), index_key, key));
            }
        }
        Ok(ops)
    }

    /// Operations to replace an existing entity: stale index entries
    /// are deleted, changed ones rewritten. `old` is the entity as
    /// currently stored (`None` if this is effectively an insert).
    pub fn ops_for_update(&self, key: &K, old: Option<&V>, new: &V) -> Result<Vec<Operation>> {
        let mut ops = Vec::with_capacity(1 + 2 * self.indexes.len());

        for index in &self.indexes {
            let old_key = old.and_then(|o| index.extract_key(key, o));
            let new_key = index.extract_key(key, new);
            if old_key == new_key {
                continue;
            }
            if let Some(stale) = old_key {
                ops.push(Operation::Delete {
                    partition: Partition::new(index.partition()),
                    key: stale,
                });
            }
            if let Some(fresh) = new_key {
                ops.push(self.index_put_op(index.as_ref(), fresh, key));
            }
        }

        ops.push(Operation::Put {
            partition: Partition::new(&self.partition),
            key: key.storage_key(),
            value: self.serialize(new)?,
        });
        Ok(ops)
    }

    /// Operations to delete an entity together with its index entries.
    pub fn ops_for_delete(&self, key: &K, entity: &V) -> Vec<Operation> {
        let mut ops = Vec::with_capacity(1 + self.indexes.len());
        for index in &self.indexes {
            if let Some(index_key) = index.extract_key(key, entity) {
                ops.push(Operation::Delete {
                    partition: Partition::new(index.partition()),
                    key: index_key,
                });
            }
        }
        ops.push(Operation::Delete {
            partition: Partition::new(&self.partition),
            key: key.storage_key(),
        });
        ops
    }

    /// Inserts a new entity, indexes included, atomically.
    pub fn insert(&self, key: &K, entity: &V) -> Result<()> {
        self.backend.batch(self.ops_for_insert(key, entity)?)
    }

    /// Replaces an existing entity atomically. The caller passes the
    /// previously-stored value so stale index entries can be removed;
    /// fetch-and-update helpers live on the domain providers.
    pub fn update(&self, key: &K, old: Option<&V>, new: &V) -> Result<()> {
        self.backend.batch(self.ops_for_update(key, old, new)?)
    }

    /// Deletes an entity and its index entries atomically.
    pub fn delete(&self, key: &K, entity: &V) -> Result<()> {
        self.backend.batch(self.ops_for_delete(key, entity))
    }

    /// Fetches an entity by primary key.
    pub fn get(&self, key: &K) -> Result<Option<V>> {
        let partition = Partition::new(&self.partition);
        match self.backend.get(&partition, &key.storage_key())? {
            Some(bytes) => Ok(Some(self.deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Fetches an entity through an index: index entry → primary key
    /// bytes → entity row.
    pub fn get_by_index(&self, field: &str, index_key: &[u8]) -> Result<Option<V>> {
        let index = self
            .indexes
            .iter()
            .find(|i| i.field() == field)
            .ok_or_else(|| StorageError::Other(format!("no index on field '{}'", field)))?;

        let index_partition = Partition::new(index.partition());
        let pk_bytes = match self.backend.get(&index_partition, index_key)? {
            Some(bytes) => bytes,
            None => return Ok(None),
        };

        let main = Partition::new(&self.partition);
        match self.backend.get(&main, &pk_bytes)? {
            Some(bytes) => Ok(Some(self.deserialize(&bytes)?)),
            None => {
                // Index points at a row that no longer exists; treat as
                // absent rather than surfacing the inconsistency.
                log::warn!(
                    "dangling index entry in '{}' for field '{}'",
                    index.partition(),
                    field
                );
                Ok(None)
            }
        }
    }

    /// Loads every entity in the main partition.
    pub fn scan_all(&self) -> Result<Vec<V>> {
        let partition = Partition::new(&self.partition);
        self.backend
            .scan(&partition, None, None, None)?
            .into_iter()
            .map(|(_, bytes)| self.deserialize(&bytes))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryBackend;
    use lancehub_commons::AccountId;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Member {
        id: AccountId,
        email: String,
        nickname: Option<String>,
    }

    struct EmailIndex;

    impl IndexDefinition<AccountId, Member> for EmailIndex {
        fn partition(&self) -> &str {
            "members_idx_email"
        }

        fn field(&self) -> &str {
            "email"
        }

        fn unique(&self) -> bool {
            true
        }

        fn extract_key(&self, _pk: &AccountId, m: &Member) -> Option<Vec<u8>> {
            Some(m.email.to_lowercase().into_bytes())
        }
    }

    struct NicknameIndex;

    impl IndexDefinition<AccountId, Member> for NicknameIndex {
        fn partition(&self) -> &str {
            "members_idx_nickname"
        }

        fn field(&self) -> &str {
            "nickname"
        }

        fn unique(&self) -> bool {
            true
        }

        fn extract_key(&self, _pk: &AccountId, m: &Member) -> Option<Vec<u8>> {
            m.nickname.as_ref().map(|n| n.to_lowercase().into_bytes())
        }
    }

    fn store() -> IndexedEntityStore<AccountId, Member> {
        IndexedEntityStore::new(
            Arc::new(InMemoryBackend::new()),
            "members",
            vec![Arc::new(EmailIndex), Arc::new(NicknameIndex)],
        )
    }

    fn member(id: &str, email: &str, nickname: Option<&str>) -> (AccountId, Member) {
        let id = AccountId::new(id);
        let m = Member {
            id: id.clone(),
            email: email.to_string(),
            nickname: nickname.map(|s| s.to_string()),
        };
        (id, m)
    }

    #[test]
    fn insert_then_lookup_by_index() {
        let store = store();
        let (id, m) = member("a_1", "Alice@Example.com", None);
        store.insert(&id, &m).unwrap();

        let found = store.get_by_index("email", b"alice@example.com").unwrap();
        assert_eq!(found, Some(m));
    }

    #[test]
    fn duplicate_email_rejected_with_field_name() {
        let store = store();
        let (id1, m1) = member("a_1", "alice@example.com", None);
        let (id2, m2) = member("a_2", "alice@example.com", None);
        store.insert(&id1, &m1).unwrap();

        let err = store.insert(&id2, &m2).unwrap_err();
        assert!(matches!(
            err,
            StorageError::UniqueConstraintViolation(ref f) if f == "email"
        ));
        // The losing entity row must not exist.
        assert_eq!(store.get(&id2).unwrap(), None);
    }

    #[test]
    fn unset_nullable_field_is_not_indexed() {
        let store = store();
        let (id1, m1) = member("a_1", "a@x.com", None);
        let (id2, m2) = member("a_2", "b@x.com", None);
        // Two members without nicknames must not collide.
        store.insert(&id1, &m1).unwrap();
        store.insert(&id2, &m2).unwrap();
    }

    #[test]
    fn update_moves_index_entries() {
        let store = store();
        let (id, m) = member("a_1", "a@x.com", Some("al"));
        store.insert(&id, &m).unwrap();

        let mut renamed = m.clone();
        renamed.nickname = Some("alice".to_string());
        store.update(&id, Some(&m), &renamed).unwrap();

        assert_eq!(store.get_by_index("nickname", b"al").unwrap(), None);
        assert_eq!(store.get_by_index("nickname", b"alice").unwrap(), Some(renamed.clone()));

        // The freed nickname is claimable by someone else.
        let (id2, m2) = member("a_2", "b@x.com", Some("al"));
        store.insert(&id2, &m2).unwrap();
    }

    #[test]
    fn update_conflicting_nickname_rolls_back_entirely() {
        let store = store();
        let (id1, m1) = member("a_1", "a@x.com", Some("al"));
        let (id2, m2) = member("a_2", "b@x.com", Some("bob"));
        store.insert(&id1, &m1).unwrap();
        store.insert(&id2, &m2).unwrap();

        let mut stolen = m2.clone();
        stolen.nickname = Some("al".to_string());
        let err = store.update(&id2, Some(&m2), &stolen).unwrap_err();
        assert!(matches!(
            err,
            StorageError::UniqueConstraintViolation(ref f) if f == "nickname"
        ));
        // Entity unchanged, old index entry intact.
        assert_eq!(store.get(&id2).unwrap(), Some(m2.clone()));
        assert_eq!(store.get_by_index("nickname", b"bob").unwrap(), Some(m2));
    }

    #[test]
    fn delete_removes_index_entries() {
        let store = store();
        let (id, m) = member("a_1", "a@x.com", Some("al"));
        store.insert(&id, &m).unwrap();
        store.delete(&id, &m).unwrap();

        assert_eq!(store.get(&id).unwrap(), None);
        assert_eq!(store.get_by_index("email", b"a@x.com").unwrap(), None);
        assert_eq!(store.get_by_index("nickname", b"al").unwrap(), None);
    }
}
