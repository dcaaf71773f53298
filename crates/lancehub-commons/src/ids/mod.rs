//! Typed identifiers and the storage key contract.

mod snowflake;

pub use snowflake::SnowflakeGenerator;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Contract for serializing a typed id into storage key bytes.
///
/// Kept separate from `AsRef<[u8]>` so that the storage encoding is an
/// explicit decision rather than whatever a convenience impl happens to
/// return.
pub trait StorageKey: Clone + Send + Sync {
    /// Byte encoding used as the storage key.
    fn storage_key(&self) -> Vec<u8>;
}

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Mints a fresh identifier from a Snowflake id.
            pub fn generate(ids: &SnowflakeGenerator) -> Self {
                Self(format!("{}{}", $prefix, ids.next_id()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl StorageKey for $name {
            fn storage_key(&self) -> Vec<u8> {
                self.0.as_bytes().to_vec()
            }
        }
    };
}

string_id!(
    /// Type-safe wrapper for account identifiers.
    ///
    /// Prevents an account id from being passed where an application id
    /// is expected, and vice versa.
    AccountId,
    "a_"
);

string_id!(
    /// Type-safe wrapper for pending-application identifiers.
    ApplicationId,
    "ap_"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_carry_type_prefix() {
        let ids = SnowflakeGenerator::new(0);
        let account = AccountId::generate(&ids);
        let application = ApplicationId::generate(&ids);
        assert!(account.as_str().starts_with("a_"));
        assert!(application.as_str().starts_with("ap_"));
        assert_ne!(account.as_str(), application.as_str());
    }

    #[test]
    fn storage_key_is_utf8_bytes() {
        let id = AccountId::new("a_42");
        assert_eq!(id.storage_key(), b"a_42".to_vec());
    }

    #[test]
    fn ids_round_trip_through_serde() {
        let id = AccountId::new("a_7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"a_7\"");
        let back: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
