//! System stores for LanceHub: the credential (accounts) store and the
//! pending-application store.
//!
//! Both are thin domain providers over `lancehub-store`:
//! `AccountsProvider` rides an `IndexedEntityStore` with unique indexes
//! on email, username, and phone; `ApplicationsProvider` is a plain
//! `EntityStore` keyed by application id.

pub mod accounts;
pub mod applications;
pub mod error;
pub mod partitions;

pub use accounts::AccountsProvider;
pub use applications::ApplicationsProvider;
pub use error::{SystemError, SystemResult};
pub use partitions::StoragePartition;
