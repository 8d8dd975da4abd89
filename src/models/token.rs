use serde::{Deserialize, Serialize};

use super::{Extra, Guild};

/// Response of `POST /oauth2/token`
///
/// `webhook` is present when `webhook.incoming` was granted, `guild` when the
/// `bot` scope added the application to a guild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRequestResult {
    /// Bearer token for user endpoints
    pub access_token: String,
    /// Always `Bearer`
    pub token_type: String,
    /// Lifetime of `access_token` in seconds
    pub expires_in: u64,
    /// Token for the `refresh_token` grant
    pub refresh_token: String,
    /// Space-separated granted scopes
    pub scope: String,
    /// Created webhook
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook: Option<Webhook>,
    /// Guild the bot was added to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild: Option<Box<Guild>>,
    /// Unrecognised fields
    #[serde(flatten)]
    pub extra: Extra,
}

impl TokenRequestResult {
    /// Granted scopes, split on whitespace
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.scope.split_whitespace()
    }
}

/// Incoming webhook created by the `webhook.incoming` scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Webhook {
    /// 1 = incoming, 2 = channel follower, 3 = application
    pub r#type: u8,
    /// Snowflake ID
    pub id: String,
    /// Default name
    pub name: Option<String>,
    /// Default avatar hash
    pub avatar: Option<String>,
    /// Target channel ID
    pub channel_id: Option<String>,
    /// Guild ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<String>,
    /// Creating application ID
    pub application_id: Option<String>,
    /// Secure token; incoming webhooks only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Execution URL; incoming webhooks only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Unrecognised fields
    #[serde(flatten)]
    pub extra: Extra,
}
