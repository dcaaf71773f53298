//! TOML configuration: types, defaults, loading, validation.

mod defaults;
mod loader;
mod types;

pub use loader::ENV_JWT_SECRET;
pub use types::{AuthSettings, LoggingSettings, ServerConfig, StorageSettings, UploadSettings};
