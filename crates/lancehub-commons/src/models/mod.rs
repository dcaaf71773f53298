//! Persisted data model: accounts and freelancer applications.

mod account;
mod application;

pub use account::{Account, AccountView, Address, Gender};
pub use application::{Application, ApplicationStatus};
