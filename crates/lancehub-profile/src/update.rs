//! Profile update payload.

use crate::error::{ProfileError, ProfileResult};
use chrono::NaiveDate;
use lancehub_commons::{Address, Gender};
use serde::{Deserialize, Serialize};

/// Full replacement payload for the mutable profile fields.
///
/// Overwrite semantics: a scalar omitted from the payload clears the
/// stored value to `None`, an omitted array resets to empty. Callers
/// wanting a partial edit resubmit the fields they keep.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,

    /// Calendar date as `YYYY-MM-DD`. Parse failure is a validation
    /// error before any write.
    pub date_of_birth: Option<String>,
    pub gender: Option<Gender>,
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
}

impl ProfileUpdate {
    /// Parses the date-of-birth string, if present.
    pub(crate) fn parsed_date_of_birth(&self) -> ProfileResult<Option<NaiveDate>> {
        match &self.date_of_birth {
            None => Ok(None),
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| {
                    ProfileError::Validation(format!(
                        "Invalid date of birth '{}', expected YYYY-MM-DD",
                        raw
                    ))
                }),
        }
    }
}
