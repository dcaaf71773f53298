//! Freelancer elevation workflow: form validation, pending
//! applications, and atomic approval.

pub mod error;
pub mod form;
pub mod service;

pub use error::{WorkflowError, WorkflowResult};
pub use form::{ApplicationForm, ValidatedForm};
pub use service::ApprovalWorkflow;
