//! Account entity: the identity + profile aggregate.

use crate::ids::AccountId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Gender as submitted on the profile or application form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Postal address sub-record on a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub house: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub apartment: Option<String>,
    pub landmark: Option<String>,
    pub address_type: Option<String>,
}

/// One record per account identity.
///
/// Created at signup with only email + password hash; every other
/// field is filled in by the profile service or the approval workflow.
///
/// ## Invariants
/// - `email` is required, unique, and immutable after creation
/// - `username` and `phone` are unique while non-null
/// - `is_freelancer` is only ever set by the approval workflow
///
/// ## Serialization
/// JSON at rest and over the wire; `password_hash` is write-only and
/// excluded from every response view (see [`AccountView`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    pub password_hash: String,

    pub username: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,

    /// Relative path of the current profile image, if any.
    pub profile_image: Option<String>,

    /// Elevated-status flag. False until the approval workflow flips it.
    #[serde(default)]
    pub is_freelancer: bool,

    /// Set unconditionally on the first successful profile update.
    #[serde(default)]
    pub profile_info_set: bool,

    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    /// Years of experience. Non-negative by construction.
    pub experience: Option<u32>,

    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub qualifications: Vec<String>,
    #[serde(default)]
    pub hobbies: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,

    pub address: Option<Address>,

    /// Verification document reference copied in at approval.
    pub documents: Option<String>,
    /// Unix ms timestamp of verification, set at approval.
    pub verified_at: Option<i64>,
    #[serde(default)]
    pub freelancer_approved: bool,

    pub created_at: i64,
    pub updated_at: i64,
}

impl Account {
    /// Minimal account created at signup: email + hash only.
    pub fn new(id: AccountId, email: impl Into<String>, password_hash: impl Into<String>, now: i64) -> Self {
        Self {
            id,
            email: email.into(),
            password_hash: password_hash.into(),
            username: None,
            full_name: None,
            phone: None,
            description: None,
            profile_image: None,
            is_freelancer: false,
            profile_info_set: false,
            date_of_birth: None,
            gender: None,
            experience: None,
            languages: Vec::new(),
            qualifications: Vec::new(),
            hobbies: Vec::new(),
            skills: Vec::new(),
            interests: Vec::new(),
            address: None,
            documents: None,
            verified_at: None,
            freelancer_approved: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Read view of an account with the password hash stripped.
///
/// This is the only account shape that leaves the service boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountView {
    pub id: AccountId,
    pub email: String,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub profile_image: Option<String>,
    pub is_freelancer: bool,
    pub profile_info_set: bool,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub experience: Option<u32>,
    pub languages: Vec<String>,
    pub qualifications: Vec<String>,
    pub hobbies: Vec<String>,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub address: Option<Address>,
    pub verified_at: Option<i64>,
    pub freelancer_approved: bool,
    pub created_at: i64,
}

impl From<&Account> for AccountView {
    fn from(a: &Account) -> Self {
        Self {
            id: a.id.clone(),
            email: a.email.clone(),
            username: a.username.clone(),
            full_name: a.full_name.clone(),
            phone: a.phone.clone(),
            description: a.description.clone(),
            profile_image: a.profile_image.clone(),
            is_freelancer: a.is_freelancer,
            profile_info_set: a.profile_info_set,
            date_of_birth: a.date_of_birth,
            gender: a.gender,
            experience: a.experience,
            languages: a.languages.clone(),
            qualifications: a.qualifications.clone(),
            hobbies: a.hobbies.clone(),
            skills: a.skills.clone(),
            interests: a.interests.clone(),
            address: a.address.clone(),
            verified_at: a.verified_at,
            freelancer_approved: a.freelancer_approved,
            created_at: a.created_at,
        }
    }
}

impl From<Account> for AccountView {
    fn from(a: Account) -> Self {
        Self::from(&a)
    }
}
