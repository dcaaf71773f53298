//! Profile service: reads and full-replacement updates.

use crate::error::{ProfileError, ProfileResult};
use crate::update::ProfileUpdate;
use lancehub_commons::{now_millis, Account, AccountId, AccountView};
use lancehub_system::AccountsProvider;
use std::sync::Arc;

/// Reads and rewrites the mutable profile slice of an account.
///
/// Identity fields (id, email, password hash), the image reference,
/// and every workflow-owned field pass through updates untouched.
/// `ProfileUpdate` has no way to express them.
pub struct ProfileService {
    accounts: Arc<AccountsProvider>,
}

impl ProfileService {
    pub fn new(accounts: Arc<AccountsProvider>) -> Self {
        Self { accounts }
    }

    /// The account's read view. `NotFound` if the id resolves to
    /// nothing.
    pub fn get_profile(&self, account_id: &AccountId) -> ProfileResult<AccountView> {
        let account = self.accounts.get_account(account_id)?;
        Ok(AccountView::from(account))
    }

    /// Replaces the mutable profile fields with the payload.
    ///
    /// Validates everything before the first write: the date string
    /// must parse, and nothing else can fail client-side. Uniqueness
    /// on username and phone is enforced by the store inside the
    /// write batch, so a racing claim surfaces as `Conflict` naming
    /// the field and leaves this account unchanged.
    pub fn update_profile(
        &self,
        account_id: &AccountId,
        update: &ProfileUpdate,
    ) -> ProfileResult<AccountView> {
        let date_of_birth = update.parsed_date_of_birth()?;
        let current = self.accounts.get_account(account_id)?;

        let updated = apply_update(&current, update, date_of_birth);
        self.accounts.update_account(&updated)?;

        log::debug!("profile updated for {}", account_id);
        Ok(AccountView::from(updated))
    }

    /// Claims a username for the account.
    ///
    /// Empty or whitespace-only names are rejected before any write.
    /// Exactly one of two concurrent claims for the same name
    /// succeeds; the loser gets `Conflict { field: "username" }`.
    pub fn set_username(
        &self,
        account_id: &AccountId,
        username: &str,
    ) -> ProfileResult<AccountView> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ProfileError::Validation("Username is required".to_string()));
        }

        let mut account = self.accounts.get_account(account_id)?;
        account.username = Some(username.to_string());
        account.updated_at = now_millis();
        self.accounts.update_account(&account)?;

        Ok(AccountView::from(account))
    }
}

/// The merge rule: mutable fields come from the payload wholesale,
/// everything else from the stored record.
fn apply_update(
    current: &Account,
    update: &ProfileUpdate,
    date_of_birth: Option<chrono::NaiveDate>,
) -> Account {
    Account {
        id: current.id.clone(),
        email: current.email.clone(),
        password_hash: current.password_hash.clone(),

        username: update.username.clone(),
        full_name: update.full_name.clone(),
        phone: update.phone.clone(),
        description: update.description.clone(),

        profile_image: current.profile_image.clone(),
        is_freelancer: current.is_freelancer,
        profile_info_set: true,

        date_of_birth,
        gender: update.gender,
        experience: update.experience,

        languages: update.languages.clone(),
        qualifications: update.qualifications.clone(),
        hobbies: update.hobbies.clone(),
        skills: update.skills.clone(),
        interests: update.interests.clone(),

        address: update.address.clone(),

        documents: current.documents.clone(),
        verified_at: current.verified_at,
        freelancer_approved: current.freelancer_approved,

        created_at: current.created_at,
        updated_at: now_millis(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lancehub_commons::ids::SnowflakeGenerator;
    use lancehub_store::{InMemoryBackend, StorageBackend};
    use lancehub_system::SystemError;

    struct Fixture {
        accounts: Arc<AccountsProvider>,
        service: ProfileService,
        ids: SnowflakeGenerator,
    }

    fn fixture() -> Fixture {
        let backend: Arc<dyn StorageBackend> = Arc::new(InMemoryBackend::new());
        let accounts = Arc::new(AccountsProvider::new(backend));
        let service = ProfileService::new(Arc::clone(&accounts));
        Fixture { accounts, service, ids: SnowflakeGenerator::new(1) }
    }

    fn account(fx: &Fixture, email: &str) -> AccountId {
        let id = AccountId::generate(&fx.ids);
        let account = Account::new(id.clone(), email, "$2b$10$hash", now_millis());
        fx.accounts.create_account(&account).unwrap();
        id
    }

    fn full_update() -> ProfileUpdate {
        ProfileUpdate {
            username: Some("alice".to_string()),
            full_name: Some("Alice Martin".to_string()),
            phone: Some("+15550100".to_string()),
            description: Some("Rust developer".to_string()),
            date_of_birth: Some("1990-05-17".to_string()),
            gender: Some(lancehub_commons::Gender::Female),
            experience: Some(4),
            languages: vec!["en".to_string(), "fr".to_string()],
            qualifications: vec!["BSc".to_string()],
            hobbies: vec![],
            skills: vec!["rust".to_string()],
            interests: vec![],
            address: None,
        }
    }

    #[test]
    fn get_profile_unknown_id_is_not_found() {
        let fx = fixture();
        let err = fx.service.get_profile(&AccountId::new("a_missing")).unwrap_err();
        assert!(matches!(err, ProfileError::System(SystemError::NotFound(_))));
    }

    #[test]
    fn update_sets_profile_info_flag() {
        let fx = fixture();
        let id = account(&fx, "alice@example.com");

        let view = fx.service.update_profile(&id, &full_update()).unwrap();
        assert!(view.profile_info_set);
        assert_eq!(view.username.as_deref(), Some("alice"));
        assert_eq!(view.experience, Some(4));
    }

    #[test]
    fn omitted_fields_are_cleared() {
        let fx = fixture();
        let id = account(&fx, "alice@example.com");
        fx.service.update_profile(&id, &full_update()).unwrap();

        // Second update omits description and the arrays.
        let sparse = ProfileUpdate {
            username: Some("alice".to_string()),
            full_name: Some("Alice Martin".to_string()),
            ..Default::default()
        };
        let view = fx.service.update_profile(&id, &sparse).unwrap();
        assert_eq!(view.description, None);
        assert_eq!(view.phone, None);
        assert!(view.languages.is_empty());
        assert!(view.skills.is_empty());
    }

    #[test]
    fn update_preserves_identity_and_workflow_fields() {
        let fx = fixture();
        let id = account(&fx, "alice@example.com");

        let mut stored = fx.accounts.get_account(&id).unwrap();
        stored.profile_image = Some("profiles/1_a_x.png".to_string());
        stored.is_freelancer = true;
        stored.freelancer_approved = true;
        stored.verified_at = Some(99);
        fx.accounts.update_account(&stored).unwrap();

        let view = fx.service.update_profile(&id, &full_update()).unwrap();
        assert_eq!(view.email, "alice@example.com");
        assert_eq!(view.profile_image.as_deref(), Some("profiles/1_a_x.png"));
        assert!(view.is_freelancer);
        assert!(view.freelancer_approved);
        assert_eq!(view.verified_at, Some(99));

        let hash = fx.accounts.get_account(&id).unwrap().password_hash;
        assert_eq!(hash, "$2b$10$hash");
    }

    #[test]
    fn update_twice_is_idempotent() {
        let fx = fixture();
        let id = account(&fx, "alice@example.com");

        let first = fx.service.update_profile(&id, &full_update()).unwrap();
        let second = fx.service.update_profile(&id, &full_update()).unwrap();

        // updated_at moves; every caller-visible field is identical.
        assert_eq!(first.username, second.username);
        assert_eq!(first.full_name, second.full_name);
        assert_eq!(first.phone, second.phone);
        assert_eq!(first.date_of_birth, second.date_of_birth);
        assert_eq!(first.languages, second.languages);
        assert_eq!(first.profile_info_set, second.profile_info_set);
    }

    #[test]
    fn bad_date_blocks_the_whole_update() {
        let fx = fixture();
        let id = account(&fx, "alice@example.com");

        let mut update = full_update();
        update.date_of_birth = Some("not-a-date".to_string());
        assert!(matches!(
            fx.service.update_profile(&id, &update),
            Err(ProfileError::Validation(_))
        ));

        // Nothing was written.
        let stored = fx.accounts.get_account(&id).unwrap();
        assert!(!stored.profile_info_set);
        assert_eq!(stored.username, None);
    }

    #[test]
    fn username_conflict_names_the_field() {
        let fx = fixture();
        let id_a = account(&fx, "alice@example.com");
        let id_b = account(&fx, "bob@example.com");

        fx.service.set_username(&id_a, "taken").unwrap();
        let err = fx.service.set_username(&id_b, "taken").unwrap_err();
        assert!(matches!(
            err,
            ProfileError::System(SystemError::Conflict { ref field }) if field == "username"
        ));

        // Loser keeps its previous state.
        assert_eq!(fx.accounts.get_account(&id_b).unwrap().username, None);
    }

    #[test]
    fn phone_conflict_names_the_field() {
        let fx = fixture();
        let id_a = account(&fx, "alice@example.com");
        let id_b = account(&fx, "bob@example.com");

        fx.service.update_profile(&id_a, &full_update()).unwrap();

        let mut update = full_update();
        update.username = Some("bob".to_string());
        let err = fx.service.update_profile(&id_b, &update).unwrap_err();
        assert!(matches!(
            err,
            ProfileError::System(SystemError::Conflict { ref field }) if field == "phone"
        ));
    }

    #[test]
    fn set_username_rejects_blank() {
        let fx = fixture();
        let id = account(&fx, "alice@example.com");
        assert!(matches!(
            fx.service.set_username(&id, "   "),
            Err(ProfileError::Validation(_))
        ));
    }
}
