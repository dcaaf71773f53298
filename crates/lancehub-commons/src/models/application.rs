//! Application entity: a pending freelancer-elevation request.

use crate::ids::{AccountId, ApplicationId};
use crate::models::{Address, Gender};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status tag of an application.
///
/// Only `Pending` is ever durable: approval migrates the payload into
/// the account and deletes the row inside the same storage batch, so
/// `Approved` and `Rejected` are transient labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

/// One row per elevation submission.
///
/// `account_id` is a weak reference: it is used to look up the owning
/// account during approval and never ties the two lifecycles together.
/// An account may have at most one *open* application by policy, but
/// storage does not enforce that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub account_id: AccountId,

    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub address: Address,

    pub experience: u32,
    pub languages: Vec<String>,
    pub qualifications: Vec<String>,
    #[serde(default)]
    pub hobbies: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    pub description: Option<String>,

    pub portfolio: String,
    /// Verification document reference. Required at submission.
    pub document: String,
    pub agreement: bool,

    pub status: ApplicationStatus,
    pub created_at: i64,
}
