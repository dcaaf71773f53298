//! Secondary index definitions for the accounts partition.
//!
//! Three unique indexes, all storing the owning account id:
//!
//! 1. **email**: required, case-insensitive, immutable after signup
//! 2. **username**: indexed only while set, case-insensitive
//! 3. **phone**: indexed only while set, exact bytes

use crate::partitions::StoragePartition;
use lancehub_commons::{Account, AccountId};
use lancehub_store::IndexDefinition;
use std::sync::Arc;

struct EmailIndex;

impl IndexDefinition<AccountId, Account> for EmailIndex {
    fn partition(&self) -> &str {
        StoragePartition::AccountsEmailIdx.name()
    }

    fn field(&self) -> &str {
        "email"
    }

    fn unique(&self) -> bool {
        true
    }

    fn extract_key(&self, _pk: &AccountId, account: &Account) -> Option<Vec<u8>> {
        Some(account.email.to_lowercase().into_bytes())
    }
}

struct UsernameIndex;

impl IndexDefinition<AccountId, Account> for UsernameIndex {
    fn partition(&self) -> &str {
        StoragePartition::AccountsUsernameIdx.name()
    }

    fn field(&self) -> &str {
        "username"
    }

    fn unique(&self) -> bool {
        true
    }

    fn extract_key(&self, _pk: &AccountId, account: &Account) -> Option<Vec<u8>> {
        account
            .username
            .as_ref()
            .map(|u| u.to_lowercase().into_bytes())
    }
}

struct PhoneIndex;

impl IndexDefinition<AccountId, Account> for PhoneIndex {
    fn partition(&self) -> &str {
        StoragePartition::AccountsPhoneIdx.name()
    }

    fn field(&self) -> &str {
        "phone"
    }

    fn unique(&self) -> bool {
        true
    }

    fn extract_key(&self, _pk: &AccountId, account: &Account) -> Option<Vec<u8>> {
        account.phone.as_ref().map(|p| p.as_bytes().to_vec())
    }
}

/// The index set wired into the accounts store.
pub fn create_account_indexes() -> Vec<Arc<dyn IndexDefinition<AccountId, Account>>> {
    vec![Arc::new(EmailIndex), Arc::new(UsernameIndex), Arc::new(PhoneIndex)]
}
