use serde::{Deserialize, Serialize};

use super::{Extra, User, nullable};

/// Guild summary returned by `GET /users/@me/guilds`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialGuild {
    /// Snowflake ID
    pub id: String,
    /// Guild name
    pub name: String,
    /// Icon hash
    pub icon: Option<String>,
    /// Whether the current user owns the guild
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<bool>,
    /// The current user's permissions bitset, as a decimal string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
    /// Enabled guild features
    pub features: Vec<String>,
    /// Only present with `with_counts=true`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approximate_member_count: Option<u64>,
    /// Only present with `with_counts=true`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approximate_presence_count: Option<u64>,
    /// Unrecognised fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// Full guild object, embedded in a token response for the `bot` scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guild {
    /// Snowflake ID
    pub id: String,
    /// Guild name
    pub name: String,
    /// Icon hash
    pub icon: Option<String>,
    /// Owner user ID
    pub owner_id: String,
    /// Splash hash
    pub splash: Option<String>,
    /// Discovery splash hash
    pub discovery_splash: Option<String>,
    /// AFK channel ID
    pub afk_channel_id: Option<String>,
    /// AFK timeout in seconds
    pub afk_timeout: u64,
    /// Whether the server widget is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_enabled: Option<bool>,
    /// Channel the widget invite points to
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub widget_channel_id: Option<Option<String>>,
    /// Verification level
    pub verification_level: u8,
    /// Default notification level
    pub default_message_notifications: u8,
    /// Explicit content filter level
    pub explicit_content_filter: u8,
    /// Guild roles
    pub roles: Vec<Role>,
    /// Custom emoji
    pub emojis: Vec<Emoji>,
    /// Enabled guild features
    pub features: Vec<String>,
    /// Required MFA level
    pub mfa_level: u8,
    /// Creator application ID, for bot-created guilds
    pub application_id: Option<String>,
    /// System message channel ID
    pub system_channel_id: Option<String>,
    /// System channel flags bitset
    pub system_channel_flags: u64,
    /// Rules channel ID
    pub rules_channel_id: Option<String>,
    /// Maximum presences; `null` for the largest guilds
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub max_presences: Option<Option<u64>>,
    /// Maximum members
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_members: Option<u64>,
    /// Vanity invite code
    pub vanity_url_code: Option<String>,
    /// Guild description
    pub description: Option<String>,
    /// Banner hash
    pub banner: Option<String>,
    /// Boost tier
    pub premium_tier: u8,
    /// Number of boosts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium_subscription_count: Option<u64>,
    /// Preferred locale
    pub preferred_locale: String,
    /// Channel for community updates from Discord
    pub public_updates_channel_id: Option<String>,
    /// Maximum users in a video channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_video_channel_users: Option<u64>,
    /// Maximum users in a stage video channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stage_video_channel_users: Option<u64>,
    /// Safety alerts channel ID
    pub safety_alerts_channel_id: Option<String>,
    /// Unrecognised fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// Guild role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// Snowflake ID
    pub id: String,
    /// Role name
    pub name: String,
    /// Integer representation of the hex colour
    pub color: u32,
    /// Whether the role is shown separately
    pub hoist: bool,
    /// Icon hash
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub icon: Option<Option<String>>,
    /// Unicode emoji
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub unicode_emoji: Option<Option<String>>,
    /// Sort position
    pub position: i64,
    /// Permission bitset as a decimal string
    pub permissions: String,
    /// Whether an integration manages this role
    pub managed: bool,
    /// Whether the role can be mentioned
    pub mentionable: bool,
    /// Role flags bitset
    pub flags: u64,
    /// Unrecognised fields (`tags`, `colors`, ...)
    #[serde(flatten)]
    pub extra: Extra,
}

/// Guild emoji
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emoji {
    /// `None` for unicode emoji
    pub id: Option<String>,
    /// `None` for deleted reaction emoji
    pub name: Option<String>,
    /// Roles allowed to use this emoji
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    /// Creator of the emoji
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Whether the emoji needs colons
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_colons: Option<bool>,
    /// Whether an integration manages this emoji
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed: Option<bool>,
    /// Whether the emoji is animated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animated: Option<bool>,
    /// Whether the emoji is usable; false when boosts lapse
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    /// Unrecognised fields
    #[serde(flatten)]
    pub extra: Extra,
}

impl PartialGuild {
    /// Parse the permissions string into a bitset
    #[must_use]
    pub fn permission_bits(&self) -> Option<u64> {
        self.permissions.as_deref().and_then(|p| p.parse().ok())
    }
}
