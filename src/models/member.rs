use serde::{Deserialize, Serialize};

use super::{Extra, User, nullable};

/// A guild member (`GET /users/@me/guilds/{guild.id}/member`, `PUT /guilds/{guild.id}/members/{user.id}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// The member's user; omitted in some contexts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Guild nickname
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub nick: Option<Option<String>>,
    /// Guild avatar hash
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Option<String>>,
    /// Role IDs
    pub roles: Vec<String>,
    /// ISO-8601 join timestamp
    pub joined_at: String,
    /// ISO-8601 timestamp of when the member started boosting
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub premium_since: Option<Option<String>>,
    /// Server deafened
    pub deaf: bool,
    /// Server muted
    pub mute: bool,
    /// Member flags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
    /// Not yet passed membership screening
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<bool>,
    /// Legacy spelling of `pending` still sent by some endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_pending: Option<bool>,
    /// ISO-8601 timestamp of when a timeout expires
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub communication_disabled_until: Option<Option<String>>,
    /// Unrecognised fields
    #[serde(flatten)]
    pub extra: Extra,
}

impl Member {
    /// Nickname, if one is set
    #[must_use]
    pub fn nickname(&self) -> Option<&str> {
        self.nick.as_ref().and_then(Option::as_deref)
    }

    /// Whether the member has the given role
    #[must_use]
    pub fn has_role(&self, role_id: &str) -> bool {
        self.roles.iter().any(|r| r == role_id)
    }
}
