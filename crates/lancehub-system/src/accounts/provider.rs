//! Accounts provider: CRUD over the credential store with automatic
//! unique-index maintenance.

use super::indexes::create_account_indexes;
use crate::error::{SystemError, SystemResult};
use crate::partitions::StoragePartition;
use lancehub_commons::{Account, AccountId};
use lancehub_store::{IndexedEntityStore, Operation, StorageBackend};
use std::sync::Arc;

/// One record per account identity, unique on email, username, phone.
pub struct AccountsProvider {
    store: IndexedEntityStore<AccountId, Account>,
}

impl AccountsProvider {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let store = IndexedEntityStore::new(
            backend,
            StoragePartition::Accounts.name(),
            create_account_indexes(),
        );
        Self { store }
    }

    /// Creates a new account. Fails with `Conflict` naming the field
    /// if email (or an already-set username/phone) is taken.
    pub fn create_account(&self, account: &Account) -> SystemResult<()> {
        self.store.insert(&account.id, account)?;
        Ok(())
    }

    /// Fetches an account by id, failing with `NotFound` when absent.
    pub fn get_account(&self, id: &AccountId) -> SystemResult<Account> {
        self.store
            .get(id)?
            .ok_or_else(|| SystemError::NotFound(format!("Account '{}' not found", id)))
    }

    /// Looks up an account by email (case-insensitive). `Ok(None)`
    /// when no account holds that email.
    pub fn find_by_email(&self, email: &str) -> SystemResult<Option<Account>> {
        Ok(self
            .store
            .get_by_index("email", email.to_lowercase().as_bytes())?)
    }

    /// Looks up an account by username (case-insensitive).
    pub fn find_by_username(&self, username: &str) -> SystemResult<Option<Account>> {
        Ok(self
            .store
            .get_by_index("username", username.to_lowercase().as_bytes())?)
    }

    /// Replaces an account record, re-pointing any changed unique
    /// index entries atomically. A racing writer holding one of the
    /// new values surfaces as `Conflict` with the field name.
    pub fn update_account(&self, updated: &Account) -> SystemResult<()> {
        let current = self.get_account(&updated.id)?;
        self.store.update(&updated.id, Some(&current), updated)?;
        Ok(())
    }

    /// Builds the operation list for an account update without
    /// executing it, for composition into a cross-store batch.
    pub fn ops_for_update(&self, updated: &Account) -> SystemResult<Vec<Operation>> {
        let current = self.get_account(&updated.id)?;
        Ok(self.store.ops_for_update(&updated.id, Some(&current), updated)?)
    }

    /// The backend handle, for composing cross-store batches.
    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        self.store.backend()
    }
}
