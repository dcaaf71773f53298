//! Single-image-per-account replacement.

use crate::error::{FilestoreError, FilestoreResult};
use crate::image_store::{sanitize_file_name, ProfileImageStore};
use bytes::Bytes;
use lancehub_commons::{now_millis, AccountId, AccountView};
use lancehub_system::AccountsProvider;
use std::sync::Arc;

/// Replaces the one profile image an account may hold.
///
/// Replacement order is: delete the old file (best-effort), write the
/// new file durably, then re-point the account record. A crash
/// between the write and the record update leaves an orphaned new
/// file but never a record pointing at a missing file.
pub struct AssetManager {
    accounts: Arc<AccountsProvider>,
    images: ProfileImageStore,
}

impl AssetManager {
    pub fn new(accounts: Arc<AccountsProvider>, images: ProfileImageStore) -> Self {
        Self { accounts, images }
    }

    pub fn images(&self) -> &ProfileImageStore {
        &self.images
    }

    /// Swaps in a new profile image for the account.
    ///
    /// `Validation` on an empty payload or name, `NotFound` for an
    /// unknown account. Returns the updated view; the stored
    /// `profile_image` is the relative path of the new file.
    pub fn replace_profile_image(
        &self,
        account_id: &AccountId,
        file_name: &str,
        data: Bytes,
    ) -> FilestoreResult<AccountView> {
        if file_name.trim().is_empty() {
            return Err(FilestoreError::Validation("File name is required".to_string()));
        }
        if data.is_empty() {
            return Err(FilestoreError::Validation("File is required".to_string()));
        }

        let mut account = self.accounts.get_account(account_id)?;

        if let Some(old) = account.profile_image.take() {
            // Best-effort: a missing old file means a previous
            // replacement got partway through.
            if let Err(e) = self.images.delete(&old) {
                log::warn!("failed to delete previous image '{}': {}", old, e);
            }
        }

        let now = now_millis();
        let new_path = format!("{}_{}_{}", now, account_id, sanitize_file_name(file_name));
        self.images.write(&new_path, &data)?;

        account.profile_image = Some(new_path);
        account.updated_at = now;
        self.accounts.update_account(&account)?;

        log::debug!("profile image replaced for {}", account_id);
        Ok(AccountView::from(account))
    }
}
