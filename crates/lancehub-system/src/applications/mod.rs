//! Application store: pending elevation requests.

mod provider;

pub use provider::ApplicationsProvider;
