//! Call parameters for the client operations

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::{Error, Result};

/// Maximum page size accepted by `GET /users/@me/guilds`
pub const MAX_GUILDS_LIMIT: u16 = 200;

/// OAuth2 grant used by [`TokenRequest`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantType {
    /// Exchange an authorization code
    AuthorizationCode,
    /// Exchange a refresh token
    RefreshToken,
}

impl GrantType {
    /// Wire value of the `grant_type` form field
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AuthorizationCode => "authorization_code",
            Self::RefreshToken => "refresh_token",
        }
    }
}

impl fmt::Display for GrantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GrantType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "authorization_code" => Ok(Self::AuthorizationCode),
            "refresh_token" => Ok(Self::RefreshToken),
            other => Err(Error::invalid_argument(format!(
                "grant_type must be authorization_code or refresh_token, got {other:?}"
            ))),
        }
    }
}

/// One or more OAuth2 scopes
///
/// Built from a space-separated string or a list; blank entries are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope(Vec<String>);

impl Scope {
    /// Whether no scope was given
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Scopes joined by a single space, as Discord expects
    #[must_use]
    pub fn joined(&self) -> String {
        self.0.join(" ")
    }

    /// Individual scopes
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    fn from_parts<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            parts
                .into_iter()
                .flat_map(|p| {
                    p.as_ref()
                        .split_whitespace()
                        .map(String::from)
                        .collect::<Vec<_>>()
                })
                .collect(),
        )
    }
}

impl From<&str> for Scope {
    fn from(value: &str) -> Self {
        Self::from_parts([value])
    }
}

impl From<String> for Scope {
    fn from(value: String) -> Self {
        Self::from_parts([value])
    }
}

impl From<Vec<String>> for Scope {
    fn from(value: Vec<String>) -> Self {
        Self::from_parts(value)
    }
}

impl From<Vec<&str>> for Scope {
    fn from(value: Vec<&str>) -> Self {
        Self::from_parts(value)
    }
}

impl From<&[&str]> for Scope {
    fn from(value: &[&str]) -> Self {
        Self::from_parts(value)
    }
}

impl<const N: usize> From<[&str; N]> for Scope {
    fn from(value: [&str; N]) -> Self {
        Self::from_parts(value)
    }
}

/// Parameters for [`OAuthClient::token_request`](super::OAuthClient::token_request)
///
/// `client_id`, `client_secret` and `redirect_uri` fall back to the client
/// configuration when unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRequest {
    /// Grant being exchanged
    pub grant_type: GrantType,
    /// Required for `authorization_code`
    pub code: Option<String>,
    /// Required for `authorization_code`
    pub redirect_uri: Option<String>,
    /// Required for `refresh_token`
    pub refresh_token: Option<String>,
    /// Scopes to request; omitted from the form when empty
    pub scope: Scope,
    /// Overrides the configured client ID
    pub client_id: Option<String>,
    /// Overrides the configured client secret
    pub client_secret: Option<String>,
}

impl TokenRequest {
    /// Empty request for `grant_type`
    #[must_use]
    pub fn new(grant_type: GrantType) -> Self {
        Self {
            grant_type,
            code: None,
            redirect_uri: None,
            refresh_token: None,
            scope: Scope::default(),
            client_id: None,
            client_secret: None,
        }
    }

    /// Exchange an authorization code
    #[must_use]
    pub fn authorization_code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Self::new(GrantType::AuthorizationCode)
        }
    }

    /// Exchange a refresh token
    #[must_use]
    pub fn refresh_token(refresh_token: impl Into<String>) -> Self {
        Self {
            refresh_token: Some(refresh_token.into()),
            ..Self::new(GrantType::RefreshToken)
        }
    }

    /// Set the redirect URI sent with the code
    #[must_use]
    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Set the requested scopes
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<Scope>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Override the client ID
    #[must_use]
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Override the client secret
    #[must_use]
    pub fn with_client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }
}

/// Pagination and count options for `GET /users/@me/guilds`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuildsQuery {
    /// Guilds before this ID
    pub before: Option<String>,
    /// Guilds after this ID
    pub after: Option<String>,
    /// Page size, 1-200; Discord defaults to 200
    pub limit: Option<u16>,
    /// Include approximate member and presence counts
    pub with_counts: Option<bool>,
}

impl GuildsQuery {
    /// Page of guilds before this ID
    #[must_use]
    pub fn before(mut self, id: impl Into<String>) -> Self {
        self.before = Some(id.into());
        self
    }

    /// Page of guilds after this ID
    #[must_use]
    pub fn after(mut self, id: impl Into<String>) -> Self {
        self.after = Some(id.into());
        self
    }

    /// Set the page size (1-200)
    #[must_use]
    pub fn limit(mut self, limit: u16) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Request approximate member and presence counts
    #[must_use]
    pub fn with_counts(mut self, with_counts: bool) -> Self {
        self.with_counts = Some(with_counts);
        self
    }

    /// Query pairs for the set options, in a stable order
    pub(crate) fn to_query(&self) -> Result<Vec<(&'static str, String)>> {
        let mut query = Vec::new();
        if let Some(before) = &self.before {
            query.push(("before", before.clone()));
        }
        if let Some(after) = &self.after {
            query.push(("after", after.clone()));
        }
        if let Some(limit) = self.limit {
            if !(1..=MAX_GUILDS_LIMIT).contains(&limit) {
                return Err(Error::invalid_argument(format!(
                    "limit must be between 1 and {MAX_GUILDS_LIMIT}, got {limit}"
                )));
            }
            query.push(("limit", limit.to_string()));
        }
        if let Some(with_counts) = self.with_counts {
            query.push(("with_counts", with_counts.to_string()));
        }
        Ok(query)
    }
}

/// Parameters for [`OAuthClient::add_member`](super::OAuthClient::add_member)
///
/// The bot token authorizes the guild side; the user's access token (with
/// `guilds.join`) proves consent.
#[derive(Clone, PartialEq, Eq)]
pub struct AddMember {
    /// Guild to join
    pub guild_id: String,
    /// User to add; must match the access token
    pub user_id: String,
    /// Bot token of an application in the guild
    pub bot_token: String,
    /// User access token with `guilds.join`
    pub access_token: String,
    /// Nickname to set (requires `MANAGE_NICKNAMES`)
    pub nickname: Option<String>,
    /// Role IDs to assign (requires `MANAGE_ROLES`)
    pub roles: Option<Vec<String>>,
    /// Server mute the user
    pub mute: Option<bool>,
    /// Server deafen the user
    pub deaf: Option<bool>,
}

impl fmt::Debug for AddMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddMember")
            .field("guild_id", &self.guild_id)
            .field("user_id", &self.user_id)
            .field("bot_token", &"[REDACTED]")
            .field("access_token", &"[REDACTED]")
            .field("nickname", &self.nickname)
            .field("roles", &self.roles)
            .field("mute", &self.mute)
            .field("deaf", &self.deaf)
            .finish()
    }
}

/// JSON body of `PUT /guilds/{guild.id}/members/{user.id}`
#[derive(Debug, Serialize)]
pub(crate) struct AddMemberBody<'a> {
    access_token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    nick: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    roles: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mute: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deaf: Option<bool>,
}

impl AddMember {
    /// Join request with no optional fields
    #[must_use]
    pub fn new(
        guild_id: impl Into<String>,
        user_id: impl Into<String>,
        bot_token: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            guild_id: guild_id.into(),
            user_id: user_id.into(),
            bot_token: bot_token.into(),
            access_token: access_token.into(),
            nickname: None,
            roles: None,
            mute: None,
            deaf: None,
        }
    }

    /// Set the nickname
    #[must_use]
    pub fn nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    /// Set the roles
    #[must_use]
    pub fn roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = Some(roles.into_iter().map(Into::into).collect());
        self
    }

    /// Set server mute
    #[must_use]
    pub fn mute(mut self, mute: bool) -> Self {
        self.mute = Some(mute);
        self
    }

    /// Set server deafen
    #[must_use]
    pub fn deaf(mut self, deaf: bool) -> Self {
        self.deaf = Some(deaf);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require_snowflake("guild_id", &self.guild_id)?;
        require_snowflake("user_id", &self.user_id)?;
        require("bot_token", &self.bot_token)?;
        require("access_token", &self.access_token)
    }

    pub(crate) fn body(&self) -> AddMemberBody<'_> {
        AddMemberBody {
            access_token: &self.access_token,
            nick: self.nickname.as_deref(),
            roles: self.roles.as_deref(),
            mute: self.mute,
            deaf: self.deaf,
        }
    }
}

/// Reject an empty string parameter
pub(crate) fn require(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid_argument(format!("{name} is required")));
    }
    Ok(())
}

/// Reject anything but a decimal snowflake, so IDs are safe as path segments
pub(crate) fn require_snowflake(name: &str, value: &str) -> Result<()> {
    require(name, value)?;
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_argument(format!(
            "{name} must be a numeric snowflake, got {value:?}"
        )));
    }
    Ok(())
}
