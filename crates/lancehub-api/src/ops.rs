//! The transport-agnostic operation facade.

use crate::context::AppContext;
use bytes::Bytes;
use lancehub_commons::{
    AccountView, Application, ApplicationId, OperationStatus, ServiceError, ServiceResult,
};
use lancehub_profile::ProfileUpdate;
use lancehub_workflow::ApplicationForm;
use serde::Serialize;

/// A signed-in session as returned by `signup` and `login`.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub account: AccountView,
    pub token: String,
}

/// Every operation of the service, with each failure classified into
/// the shared taxonomy. Protected operations take the caller's bearer
/// token and resolve it to an account before touching anything.
pub struct LanceHub {
    ctx: AppContext,
}

impl LanceHub {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    pub async fn signup(&self, email: &str, password: &str) -> ServiceResult<SessionResponse> {
        let session = self.ctx.credentials.signup(email, password).await?;
        Ok(SessionResponse { account: session.account, token: session.token })
    }

    pub async fn login(&self, email: &str, password: &str) -> ServiceResult<SessionResponse> {
        let session = self.ctx.credentials.login(email, password).await?;
        Ok(SessionResponse { account: session.account, token: session.token })
    }

    pub fn get_profile(&self, token: Option<&str>) -> ServiceResult<AccountView> {
        let account_id = self.ctx.sessions.verify(token)?;
        Ok(self.ctx.profiles.get_profile(&account_id)?)
    }

    pub fn update_profile(
        &self,
        token: Option<&str>,
        update: &ProfileUpdate,
    ) -> ServiceResult<AccountView> {
        let account_id = self.ctx.sessions.verify(token)?;
        Ok(self.ctx.profiles.update_profile(&account_id, update)?)
    }

    pub fn set_username(&self, token: Option<&str>, username: &str) -> ServiceResult<AccountView> {
        let account_id = self.ctx.sessions.verify(token)?;
        Ok(self.ctx.profiles.set_username(&account_id, username)?)
    }

    pub fn replace_profile_image(
        &self,
        token: Option<&str>,
        file_name: &str,
        data: Bytes,
    ) -> ServiceResult<AccountView> {
        let account_id = self.ctx.sessions.verify(token)?;
        Ok(self.ctx.assets.replace_profile_image(&account_id, file_name, data)?)
    }

    pub fn submit_application(
        &self,
        token: Option<&str>,
        form: &ApplicationForm,
    ) -> ServiceResult<Application> {
        let account_id = self.ctx.sessions.verify(token)?;
        Ok(self.ctx.workflow.submit(&account_id, form)?)
    }

    /// Approves a pending application on behalf of an authenticated
    /// operator session. Not idempotent: the second call reports
    /// `NotFound`.
    pub fn approve_application(
        &self,
        token: Option<&str>,
        application_id: &ApplicationId,
    ) -> ServiceResult<AccountView> {
        self.ctx.sessions.verify(token)?;
        let migrated = self.ctx.workflow.approve(application_id)?;
        Ok(AccountView::from(migrated))
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }
}

/// Wire shape for transport layers: result tag plus either the data
/// or the error message.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub status: OperationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Set for conflict outcomes: the field that collided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict_field: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn from_result(result: ServiceResult<T>) -> Self {
        match result {
            Ok(data) => Self {
                status: OperationStatus::Ok,
                data: Some(data),
                error: None,
                conflict_field: None,
            },
            Err(err) => {
                let conflict_field = match &err {
                    ServiceError::Conflict { field } => Some(field.clone()),
                    _ => None,
                };
                Self {
                    status: err.status(),
                    data: None,
                    error: Some(err.to_string()),
                    conflict_field,
                }
            }
        }
    }
}
