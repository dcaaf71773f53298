//! Credential store: accounts with unique email/username/phone.

mod indexes;
mod provider;

pub use indexes::create_account_indexes;
pub use provider::AccountsProvider;
