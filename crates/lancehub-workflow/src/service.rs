//! Submit and approve for freelancer applications.

use crate::error::WorkflowResult;
use crate::form::{ApplicationForm, ValidatedForm};
use lancehub_commons::ids::SnowflakeGenerator;
use lancehub_commons::{
    now_millis, Account, AccountId, Application, ApplicationId, ApplicationStatus,
};
use lancehub_store::EntityStore;
use lancehub_system::{AccountsProvider, ApplicationsProvider};
use std::sync::Arc;

/// The two-stage elevation workflow.
///
/// `submit` records a pending application; `approve` migrates it into
/// the account and deletes the row, all in one storage batch. One open
/// application per account is policy, not enforced here: a second
/// submit creates a second pending row.
pub struct ApprovalWorkflow {
    accounts: Arc<AccountsProvider>,
    applications: Arc<ApplicationsProvider>,
    ids: Arc<SnowflakeGenerator>,
}

impl ApprovalWorkflow {
    pub fn new(
        accounts: Arc<AccountsProvider>,
        applications: Arc<ApplicationsProvider>,
        ids: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self { accounts, applications, ids }
    }

    /// Validates the form and records a pending application for the
    /// account.
    ///
    /// # Errors
    /// - `Validation` naming the first missing field
    /// - `NotFound` when the account does not exist
    pub fn submit(
        &self,
        account_id: &AccountId,
        form: &ApplicationForm,
    ) -> WorkflowResult<Application> {
        let validated = form.validate()?;
        // The weak account reference must resolve at submit time.
        self.accounts.get_account(account_id)?;

        let application = build_application(
            ApplicationId::generate(&self.ids),
            account_id.clone(),
            validated,
        );
        self.applications.create_application(&application)?;

        log::info!("application {} submitted for {}", application.id, account_id);
        Ok(application)
    }

    /// Approves a pending application.
    ///
    /// In one atomic batch: the application payload overwrites the
    /// account's mirrored fields, the elevated flag is set, and the
    /// application row is deleted. A second call finds no row and
    /// fails with `NotFound`, leaving the account exactly as the
    /// first call wrote it.
    pub fn approve(&self, application_id: &ApplicationId) -> WorkflowResult<Account> {
        let application = self.applications.get_application(application_id)?;
        let current = self.accounts.get_account(&application.account_id)?;
        let migrated = migrate_into_account(&current, &application);

        let mut operations = self.accounts.ops_for_update(&migrated)?;
        operations.push(self.applications.delete_op(application_id));
        self.accounts.backend().batch(operations)?;

        log::info!(
            "application {} approved, account {} elevated",
            application_id,
            migrated.id
        );
        Ok(migrated)
    }

    /// Pending applications awaiting operator review.
    pub fn pending_applications(&self) -> WorkflowResult<Vec<Application>> {
        Ok(self.applications.list_applications()?)
    }
}

fn build_application(
    id: ApplicationId,
    account_id: AccountId,
    form: ValidatedForm,
) -> Application {
    Application {
        id,
        account_id,
        full_name: form.full_name,
        phone: form.phone,
        email: form.email,
        date_of_birth: form.date_of_birth,
        gender: form.gender,
        address: form.address,
        experience: form.experience,
        languages: form.languages,
        qualifications: form.qualifications,
        hobbies: form.hobbies,
        skills: form.skills,
        interests: form.interests,
        description: form.description,
        portfolio: form.portfolio,
        document: form.document,
        agreement: true,
        status: ApplicationStatus::Pending,
        created_at: now_millis(),
    }
}

/// The migration rule: application fields are authoritative for the
/// profile slice; identity fields and the image reference stay.
fn migrate_into_account(current: &Account, application: &Application) -> Account {
    Account {
        id: current.id.clone(),
        email: current.email.clone(),
        password_hash: current.password_hash.clone(),
        username: current.username.clone(),

        full_name: Some(application.full_name.clone()),
        phone: Some(application.phone.clone()),
        description: application.description.clone(),
        profile_image: current.profile_image.clone(),

        is_freelancer: true,
        profile_info_set: true,

        date_of_birth: Some(application.date_of_birth),
        gender: Some(application.gender),
        experience: Some(application.experience),

        languages: application.languages.clone(),
        qualifications: application.qualifications.clone(),
        hobbies: application.hobbies.clone(),
        skills: application.skills.clone(),
        interests: application.interests.clone(),

        address: Some(application.address.clone()),

        documents: Some(application.document.clone()),
        verified_at: Some(now_millis()),
        freelancer_approved: true,

        created_at: current.created_at,
        updated_at: now_millis(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WorkflowError;
    use crate::form::tests::complete_form;
    use lancehub_store::{InMemoryBackend, StorageBackend};
    use lancehub_system::SystemError;

    struct Fixture {
        accounts: Arc<AccountsProvider>,
        workflow: ApprovalWorkflow,
        ids: Arc<SnowflakeGenerator>,
    }

    fn fixture() -> Fixture {
        let backend: Arc<dyn StorageBackend> = Arc::new(InMemoryBackend::new());
        let accounts = Arc::new(AccountsProvider::new(Arc::clone(&backend)));
        let applications = Arc::new(ApplicationsProvider::new(backend));
        let ids = Arc::new(SnowflakeGenerator::new(1));
        let workflow =
            ApprovalWorkflow::new(Arc::clone(&accounts), applications, Arc::clone(&ids));
        Fixture { accounts, workflow, ids }
    }

    fn account(fx: &Fixture, email: &str) -> AccountId {
        let id = AccountId::generate(&fx.ids);
        let account = Account::new(id.clone(), email, "h", 1);
        fx.accounts.create_account(&account).unwrap();
        id
    }

    #[test]
    fn submit_creates_a_pending_row() {
        let fx = fixture();
        let id = account(&fx, "alice@example.com");

        let application = fx.workflow.submit(&id, &complete_form()).unwrap();
        assert_eq!(application.status, ApplicationStatus::Pending);
        assert_eq!(application.account_id, id);
        assert_eq!(fx.workflow.pending_applications().unwrap().len(), 1);
    }

    #[test]
    fn submit_for_unknown_account_is_not_found() {
        let fx = fixture();
        let err = fx
            .workflow
            .submit(&AccountId::new("a_missing"), &complete_form())
            .unwrap_err();
        assert!(matches!(err, WorkflowError::System(SystemError::NotFound(_))));
    }

    #[test]
    fn invalid_form_writes_nothing() {
        let fx = fixture();
        let id = account(&fx, "alice@example.com");

        let mut form = complete_form();
        form.document = None;
        assert!(fx.workflow.submit(&id, &form).is_err());
        assert!(fx.workflow.pending_applications().unwrap().is_empty());
    }

    #[test]
    fn approve_migrates_and_deletes() {
        let fx = fixture();
        let id = account(&fx, "alice@example.com");
        let application = fx.workflow.submit(&id, &complete_form()).unwrap();

        let migrated = fx.workflow.approve(&application.id).unwrap();
        assert!(migrated.is_freelancer);
        assert!(migrated.freelancer_approved);
        assert!(migrated.verified_at.is_some());
        assert_eq!(migrated.full_name.as_deref(), Some("Alice Martin"));
        assert_eq!(migrated.documents.as_deref(), Some("docs/alice.pdf"));

        // Row is gone, account state persisted.
        assert!(fx.workflow.pending_applications().unwrap().is_empty());
        let stored = fx.accounts.get_account(&id).unwrap();
        assert!(stored.is_freelancer);
        assert_eq!(stored.email, "alice@example.com");
    }

    #[test]
    fn approve_preserves_identity_and_image() {
        let fx = fixture();
        let id = account(&fx, "alice@example.com");

        let mut stored = fx.accounts.get_account(&id).unwrap();
        stored.username = Some("alice".to_string());
        stored.profile_image = Some("1_a_pic.png".to_string());
        fx.accounts.update_account(&stored).unwrap();

        let application = fx.workflow.submit(&id, &complete_form()).unwrap();
        let migrated = fx.workflow.approve(&application.id).unwrap();

        assert_eq!(migrated.username.as_deref(), Some("alice"));
        assert_eq!(migrated.profile_image.as_deref(), Some("1_a_pic.png"));
        assert_eq!(migrated.password_hash, "h");
    }

    #[test]
    fn approve_twice_is_not_found_and_account_unchanged() {
        let fx = fixture();
        let id = account(&fx, "alice@example.com");
        let application = fx.workflow.submit(&id, &complete_form()).unwrap();

        fx.workflow.approve(&application.id).unwrap();
        let after_first = fx.accounts.get_account(&id).unwrap();

        let err = fx.workflow.approve(&application.id).unwrap_err();
        assert!(matches!(err, WorkflowError::System(SystemError::NotFound(_))));
        assert_eq!(fx.accounts.get_account(&id).unwrap(), after_first);
    }

    #[test]
    fn approve_conflicting_phone_rolls_back_entirely() {
        let fx = fixture();
        let id_a = account(&fx, "alice@example.com");
        let id_b = account(&fx, "bob@example.com");

        // Bob already holds the phone number the application carries.
        let mut bob = fx.accounts.get_account(&id_b).unwrap();
        bob.phone = Some("+15550100".to_string());
        fx.accounts.update_account(&bob).unwrap();

        let application = fx.workflow.submit(&id_a, &complete_form()).unwrap();
        let err = fx.workflow.approve(&application.id).unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::System(SystemError::Conflict { ref field }) if field == "phone"
        ));

        // Neither the account nor the application row changed.
        let alice = fx.accounts.get_account(&id_a).unwrap();
        assert!(!alice.is_freelancer);
        assert_eq!(fx.workflow.pending_applications().unwrap().len(), 1);
    }
}
