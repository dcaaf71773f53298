//! Default values for `ServerConfig` fields.

pub(super) fn default_storage_backend() -> String {
    "rocksdb".to_string()
}

pub(super) fn default_data_path() -> String {
    "./data".to_string()
}

pub(super) fn default_uploads_path() -> String {
    "uploads/profiles".to_string()
}

pub(super) fn default_jwt_secret() -> String {
    String::new()
}

pub(super) fn default_token_ttl_days() -> i64 {
    7
}

pub(super) fn default_bcrypt_cost() -> u32 {
    10
}

pub(super) fn default_log_level() -> String {
    "info".to_string()
}

pub(super) fn default_log_file() -> String {
    "logs/lancehub.log".to_string()
}

pub(super) fn default_log_to_console() -> bool {
    true
}

pub(super) fn default_log_format() -> String {
    "compact".to_string()
}

pub(super) fn default_id_worker() -> u16 {
    0
}
