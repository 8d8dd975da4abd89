use serde::{Deserialize, Serialize};

use super::{Extra, nullable};

/// A Discord user (`GET /users/@me`)
///
/// `email` and `verified` require the `email` scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Snowflake ID
    pub id: String,
    /// Unique username
    pub username: String,
    /// Display name
    pub global_name: Option<String>,
    /// Legacy discriminator (`"0"` for migrated users)
    pub discriminator: String,
    /// Avatar hash
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Option<String>>,
    /// Whether the user is a bot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot: Option<bool>,
    /// Whether two-factor auth is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mfa_enabled: Option<bool>,
    /// Banner hash
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub banner: Option<Option<String>>,
    /// Banner color as an integer
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<Option<u32>>,
    /// Chosen language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Whether the email has been verified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    /// Email address
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
    /// Account flags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
    /// Nitro subscription type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium_type: Option<u8>,
    /// Public account flags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_flags: Option<u64>,
    /// Unrecognised fields
    #[serde(flatten)]
    pub extra: Extra,
}

impl User {
    /// Avatar hash, if the user has one set
    #[must_use]
    pub fn avatar_hash(&self) -> Option<&str> {
        self.avatar.as_ref().and_then(Option::as_deref)
    }

    /// Email address, if granted and set
    #[must_use]
    pub fn email_address(&self) -> Option<&str> {
        self.email.as_ref().and_then(Option::as_deref)
    }

    /// Display name, falling back to the username
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.username)
    }
}
