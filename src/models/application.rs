use serde::{Deserialize, Serialize};

use super::{Extra, User, nullable};

/// Application object as returned by `GET /oauth2/@me`
///
/// Discord returns different subsets of the application depending on where it
/// is embedded; see [`IntegrationApplication`] for the integration variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    /// Snowflake ID
    pub id: String,
    /// Application name
    pub name: String,
    /// Icon hash
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub icon: Option<Option<String>>,
    /// Description shown on the store and bot profile
    pub description: String,
    /// RPC origin URLs, if RPC is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_origins: Option<Vec<String>>,
    /// Whether anyone can add the bot to a guild
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_public: Option<bool>,
    /// Whether adding the bot requires a full OAuth2 code grant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_require_code_grant: Option<bool>,
    /// Bot user of the application
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot: Option<User>,
    /// Terms of service URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_of_service_url: Option<String>,
    /// Privacy policy URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_policy_url: Option<String>,
    /// Hex encoded key for interaction signature verification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify_key: Option<String>,
    /// Application flags bitset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
    /// Deprecated; always an empty string when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Whether the application uses webhooks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook: Option<bool>,
    /// Unrecognised fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// Partial application embedded in an [`Integration`](super::Integration)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationApplication {
    /// Snowflake ID
    pub id: String,
    /// Application name
    pub name: String,
    /// Icon hash
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub icon: Option<Option<String>>,
    /// Application description
    pub description: String,
    /// Deprecated upstream; kept for older payloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Bot user of the application
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot: Option<User>,
    /// Unrecognised fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// Current authorization (`GET /oauth2/@me`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationInformation {
    /// Application the token was issued to
    pub application: Application,
    /// Scopes granted to the token
    pub scopes: Vec<String>,
    /// ISO-8601 expiry of the token
    pub expires: String,
    /// Present when the `identify` scope was granted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Unrecognised fields
    #[serde(flatten)]
    pub extra: Extra,
}

impl AuthorizationInformation {
    /// Whether the token was granted `scope`
    #[must_use]
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }
}
