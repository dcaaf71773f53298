use super::defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level server configuration, loaded from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub uploads: UploadSettings,
    #[serde(default, alias = "authentication")]
    pub auth: AuthSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            storage: StorageSettings::default(),
            uploads: UploadSettings::default(),
            auth: AuthSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// "rocksdb" for the persistent backend, "memory" for embedded
    /// and test use.
    #[serde(default = "default_storage_backend")]
    pub backend: String,

    /// Directory holding the RocksDB database.
    #[serde(default = "default_data_path")]
    pub data_path: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            data_path: default_data_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadSettings {
    /// Directory holding profile image files.
    #[serde(default = "default_uploads_path")]
    pub path: String,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self { path: default_uploads_path() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// HS256 signing secret. Empty in the file is allowed only when
    /// `LANCEHUB_JWT_SECRET` supplies it.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    /// Session token validity window in days.
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: i64,

    /// Bcrypt cost factor (range 4-31).
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Snowflake worker id for entity id generation.
    #[serde(default = "default_id_worker")]
    pub id_worker: u16,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_days: default_token_ttl_days(),
            bcrypt_cost: default_bcrypt_cost(),
            id_worker: default_id_worker(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Base level: error, warn, info, debug, trace.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path; parent directories are created at init.
    #[serde(default = "default_log_file")]
    pub file: String,

    #[serde(default = "default_log_to_console")]
    pub console: bool,

    /// "compact" or "json".
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Per-target level overrides.
    #[serde(default)]
    pub targets: HashMap<String, String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
            console: default_log_to_console(),
            format: default_log_format(),
            targets: HashMap::new(),
        }
    }
}
