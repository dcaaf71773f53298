//! Named storage partitions used by the system stores.

/// Every partition this service keeps, in one place so backends with a
/// fixed partition set (RocksDB column families) can be opened with
/// the complete list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoragePartition {
    Accounts,
    AccountsEmailIdx,
    AccountsUsernameIdx,
    AccountsPhoneIdx,
    Applications,
}

impl StoragePartition {
    pub fn name(&self) -> &'static str {
        match self {
            StoragePartition::Accounts => "accounts",
            StoragePartition::AccountsEmailIdx => "accounts_idx_email",
            StoragePartition::AccountsUsernameIdx => "accounts_idx_username",
            StoragePartition::AccountsPhoneIdx => "accounts_idx_phone",
            StoragePartition::Applications => "applications",
        }
    }

    /// All partition names, for opening a fixed-set backend.
    pub fn all() -> Vec<&'static str> {
        [
            StoragePartition::Accounts,
            StoragePartition::AccountsEmailIdx,
            StoragePartition::AccountsUsernameIdx,
            StoragePartition::AccountsPhoneIdx,
            StoragePartition::Applications,
        ]
        .iter()
        .map(|p| p.name())
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_every_partition() {
        let names = StoragePartition::all();
        assert_eq!(names.len(), 5);
        assert!(names.contains(&"accounts"));
        assert!(names.contains(&"applications"));
    }
}
