//! Shared foundation for LanceHub crates.
//!
//! Holds the typed identifiers, the persisted data model (accounts and
//! freelancer applications), and the error taxonomy every service
//! classifies into before crossing a component boundary.

pub mod errors;
pub mod ids;
pub mod models;

pub use errors::{OperationStatus, ServiceError, ServiceResult};
pub use ids::{AccountId, ApplicationId, SnowflakeGenerator, StorageKey};
pub use models::{
    Account, AccountView, Address, Application, ApplicationStatus, Gender,
};

/// Current wall-clock time as Unix milliseconds.
///
/// All persisted timestamps in LanceHub use this representation.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
