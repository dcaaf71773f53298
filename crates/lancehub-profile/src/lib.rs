//! Profile layer: reads and full-replacement updates over the
//! accounts store.

pub mod error;
pub mod service;
pub mod update;

pub use error::{ProfileError, ProfileResult};
pub use service::ProfileService;
pub use update::ProfileUpdate;
