//! Application form payload and validation.

use crate::error::{WorkflowError, WorkflowResult};
use chrono::NaiveDate;
use lancehub_commons::{Address, Gender};
use serde::{Deserialize, Serialize};

/// Raw submission payload for a freelancer application.
///
/// Everything arrives optional so validation can name the first
/// missing field instead of failing at deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationForm {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    /// Calendar date as `YYYY-MM-DD`.
    pub date_of_birth: Option<String>,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub address: Option<Address>,
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

    pub description: Option<String>,
    pub portfolio: Option<String>,
    /// Terms acceptance. Must be explicitly true.
    pub agreement: Option<bool>,
    /// Verification document reference.
    pub document: Option<String>,
}

/// A form that passed validation, with required fields unwrapped.
#[derive(Debug, Clone)]
pub struct ValidatedForm {
    pub full_name: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub email: String,
    pub gender: Gender,
    pub address: Address,
    pub experience: u32,
    pub languages: Vec<String>,
    pub qualifications: Vec<String>,
    pub hobbies: Vec<String>,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub description: Option<String>,
    pub portfolio: String,
    pub document: String,
}

fn missing(field: &str) -> WorkflowError {
    WorkflowError::Validation(format!("Missing required field: {}", field))
}

fn require_str(value: &Option<String>, field: &str) -> WorkflowResult<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(missing(field)),
    }
}

impl ApplicationForm {
    /// Checks the full required field set, naming the first missing
    /// field. Nothing is written before this passes.
    pub fn validate(&self) -> WorkflowResult<ValidatedForm> {
        let full_name = require_str(&self.full_name, "full_name")?;
        let phone = require_str(&self.phone, "phone")?;
        let dob_raw = require_str(&self.date_of_birth, "date_of_birth")?;
        let date_of_birth = NaiveDate::parse_from_str(&dob_raw, "%Y-%m-%d").map_err(|_| {
            WorkflowError::Validation(format!(
                "Invalid date of birth '{}', expected YYYY-MM-DD",
                dob_raw
            ))
        })?;
        let email = require_str(&self.email, "email")?;
        let gender = self.gender.ok_or_else(|| missing("gender"))?;

        let address = self.address.clone().ok_or_else(|| missing("address"))?;
        require_str(&address.street, "address.street")?;
        require_str(&address.city, "address.city")?;
        require_str(&address.state, "address.state")?;
        require_str(&address.postal_code, "address.postal_code")?;

        if self.qualifications.is_empty() {
            return Err(missing("qualifications"));
        }
        let experience = self.experience.ok_or_else(|| missing("experience"))?;
        if self.languages.is_empty() {
            return Err(missing("languages"));
        }
        let portfolio = require_str(&self.portfolio, "portfolio")?;

        if self.agreement != Some(true) {
            return Err(missing("agreement"));
        }
        let document = require_str(&self.document, "document")?;

        Ok(ValidatedForm {
            full_name,
            phone,
            date_of_birth,
            email,
            gender,
            address,
            experience,
            languages: self.languages.clone(),
            qualifications: self.qualifications.clone(),
            hobbies: self.hobbies.clone(),
            skills: self.skills.clone(),
            interests: self.interests.clone(),
            description: self.description.clone(),
            portfolio,
            document,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn complete_form() -> ApplicationForm {
        ApplicationForm {
            full_name: Some("Alice Martin".to_string()),
            phone: Some("+15550100".to_string()),
            date_of_birth: Some("1990-05-17".to_string()),
            email: Some("alice@example.com".to_string()),
            gender: Some(Gender::Female),
            address: Some(Address {
                street: Some("12 Rue Verte".to_string()),
                city: Some("Lyon".to_string()),
                state: Some("ARA".to_string()),
                postal_code: Some("69001".to_string()),
                ..Default::default()
            }),
            experience: Some(4),
            languages: vec!["en".to_string(), "fr".to_string()],
            qualifications: vec!["BSc".to_string()],
            hobbies: vec![],
            skills: vec!["rust".to_string()],
            interests: vec![],
            description: Some("Systems programmer".to_string()),
            portfolio: Some("https://alice.dev".to_string()),
            agreement: Some(true),
            document: Some("docs/alice.pdf".to_string()),
        }
    }

    #[test]
    fn complete_form_validates() {
        let form = complete_form().validate().unwrap();
        assert_eq!(form.full_name, "Alice Martin");
        assert_eq!(form.date_of_birth, NaiveDate::from_ymd_opt(1990, 5, 17).unwrap());
        assert_eq!(form.experience, 4);
    }

    #[test]
    fn each_missing_field_is_named() {
        let cases: Vec<(&str, Box<dyn Fn(&mut ApplicationForm)>)> = vec![
            ("full_name", Box::new(|f| f.full_name = None)),
            ("phone", Box::new(|f| f.phone = None)),
            ("date_of_birth", Box::new(|f| f.date_of_birth = None)),
            ("email", Box::new(|f| f.email = None)),
            ("gender", Box::new(|f| f.gender = None)),
            ("address", Box::new(|f| f.address = None)),
            ("qualifications", Box::new(|f| f.qualifications.clear())),
            ("experience", Box::new(|f| f.experience = None)),
            ("languages", Box::new(|f| f.languages.clear())),
            ("portfolio", Box::new(|f| f.portfolio = None)),
            ("agreement", Box::new(|f| f.agreement = None)),
            ("document", Box::new(|f| f.document = None)),
        ];

        for (field, strip) in cases {
            let mut form = complete_form();
            strip(&mut form);
            match form.validate() {
                Err(WorkflowError::Validation(msg)) => {
                    assert!(msg.contains(field), "expected '{}' in '{}'", field, msg)
                }
                other => panic!("expected validation error for {}, got {:?}", field, other.err()),
            }
        }
    }

    #[test]
    fn partial_address_names_the_subfield() {
        let mut form = complete_form();
        if let Some(address) = form.address.as_mut() {
            address.city = None;
        }
        match form.validate() {
            Err(WorkflowError::Validation(msg)) => assert!(msg.contains("address.city")),
            other => panic!("expected validation error, got {:?}", other.err()),
        }
    }

    #[test]
    fn declined_agreement_is_rejected() {
        let mut form = complete_form();
        form.agreement = Some(false);
        assert!(form.validate().is_err());
    }

    #[test]
    fn whitespace_only_field_counts_as_missing() {
        let mut form = complete_form();
        form.portfolio = Some("   ".to_string());
        match form.validate() {
            Err(WorkflowError::Validation(msg)) => assert!(msg.contains("portfolio")),
            other => panic!("expected validation error, got {:?}", other.err()),
        }
    }
}
