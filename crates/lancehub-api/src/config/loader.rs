use super::types::ServerConfig;
use std::fs;
use std::path::Path;

/// Environment variable that overrides `auth.jwt_secret`.
pub const ENV_JWT_SECRET: &str = "LANCEHUB_JWT_SECRET";

impl ServerConfig {
    /// Loads configuration from a TOML file, applies environment
    /// overrides, and validates.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let mut config: ServerConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Secrets can come from the environment instead of the file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(secret) = std::env::var(ENV_JWT_SECRET) {
            if !secret.is_empty() {
                self.auth.jwt_secret = secret;
            }
        }
    }

    /// Rejects configurations the services cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        match self.storage.backend.as_str() {
            "rocksdb" => {
                if self.storage.data_path.trim().is_empty() {
                    return Err(anyhow::anyhow!(
                        "storage.data_path is required for the rocksdb backend"
                    ));
                }
            }
            "memory" => {}
            other => {
                return Err(anyhow::anyhow!(
                    "Invalid storage backend '{}'. Must be 'rocksdb' or 'memory'",
                    other
                ));
            }
        }

        if self.uploads.path.trim().is_empty() {
            return Err(anyhow::anyhow!("uploads.path cannot be empty"));
        }

        if self.auth.jwt_secret.is_empty() {
            return Err(anyhow::anyhow!(
                "auth.jwt_secret is required (set it in the config file or via {})",
                ENV_JWT_SECRET
            ));
        }

        if self.auth.token_ttl_days <= 0 {
            return Err(anyhow::anyhow!("auth.token_ttl_days must be positive"));
        }

        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(anyhow::anyhow!(
                "auth.bcrypt_cost must be in 4-31, got {}",
                self.auth.bcrypt_cost
            ));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            ));
        }
        for (target, level) in &self.logging.targets {
            if !valid_levels.contains(&level.as_str()) {
                return Err(anyhow::anyhow!(
                    "Invalid log level '{}' for target '{}'",
                    level,
                    target
                ));
            }
        }

        let valid_formats = ["compact", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_formats.join(", ")
            ));
        }

        Ok(())
    }
}
