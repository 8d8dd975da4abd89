use serde::{Deserialize, Serialize};

use super::{Extra, IntegrationApplication, User};

/// Third-party account linked to the user (`GET /users/@me/connections`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Account ID on the service
    pub id: String,
    /// Account name on the service
    pub name: String,
    /// Service type (`twitch`, `youtube`, ...)
    pub r#type: String,
    /// Whether the connection was revoked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revoked: Option<bool>,
    /// Partial server integrations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integrations: Option<Vec<Integration>>,
    /// Whether the connection is verified
    pub verified: bool,
    /// Whether friend sync is enabled
    pub friend_sync: bool,
    /// Whether activity from this connection is shown in presence
    pub show_activity: bool,
    /// Whether the service supports two-way linking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two_way_link: Option<bool>,
    /// 0 = only the user, 1 = everyone
    pub visibility: u8,
    /// Unrecognised fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// Guild integration
///
/// Connections embed a partial integration, so everything past `id`, `name`,
/// `type` and `account` is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Integration {
    /// Snowflake ID
    pub id: String,
    /// Integration name
    pub name: String,
    /// `twitch`, `youtube`, `discord` or `guild_subscription`
    pub r#type: String,
    /// Whether the integration is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Whether the integration is syncing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syncing: Option<bool>,
    /// Role granted to subscribers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,
    /// Whether emoticons should be synced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_emoticons: Option<bool>,
    /// 0 = remove role, 1 = kick
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_behavior: Option<u8>,
    /// Grace period in days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_grace_period: Option<u64>,
    /// User for this integration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Integration account information
    pub account: IntegrationAccount,
    /// ISO-8601 timestamp of the last sync
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synced_at: Option<String>,
    /// Subscriber count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriber_count: Option<u64>,
    /// Whether the integration was revoked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revoked: Option<bool>,
    /// Bot/OAuth2 application for Discord integrations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<IntegrationApplication>,
    /// Scopes the application was authorized with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
    /// Unrecognised fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// Account behind an integration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationAccount {
    /// Account ID
    pub id: String,
    /// Account name
    pub name: String,
}
