//! Authorization URL construction

use url::form_urlencoded;

use super::params::Scope;
use crate::config::ClientConfig;
use crate::{Error, Result};

/// `response_type` of the authorization request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseType {
    /// Authorization code grant
    #[default]
    Code,
    /// Implicit grant
    Token,
}

impl ResponseType {
    fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Token => "token",
        }
    }
}

/// Whether Discord re-prompts a user who already authorized the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// Always show the consent screen
    Consent,
    /// Skip the consent screen if already authorized
    None,
}

impl Prompt {
    fn as_str(self) -> &'static str {
        match self {
            Self::Consent => "consent",
            Self::None => "none",
        }
    }
}

/// Installation context for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationType {
    /// Install to a guild
    GuildInstall,
    /// Install to a user account
    UserInstall,
}

impl IntegrationType {
    fn as_str(self) -> &'static str {
        match self {
            Self::GuildInstall => "0",
            Self::UserInstall => "1",
        }
    }
}

/// Options for [`OAuthClient::generate_auth_url`](super::OAuthClient::generate_auth_url)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthUrlOptions {
    /// Requested scopes; must not be empty
    pub scope: Scope,
    /// Opaque value echoed back on the redirect
    pub state: Option<String>,
    /// Falls back to the configured client ID
    pub client_id: Option<String>,
    /// Consent screen behaviour
    pub prompt: Option<Prompt>,
    /// Falls back to the configured redirect URI
    pub redirect_uri: Option<String>,
    /// Grant type to request; defaults to `code`
    pub response_type: ResponseType,
    /// Permission bitset for the `bot` scope, as a decimal string
    pub permissions: Option<String>,
    /// Preselected guild for the `bot` / `webhook.incoming` scopes
    pub guild_id: Option<String>,
    /// Hide the guild picker when `guild_id` is set
    pub disable_guild_select: Option<bool>,
    /// Installation context
    pub integration_type: Option<IntegrationType>,
}

impl AuthUrlOptions {
    /// Options requesting `scope`
    #[must_use]
    pub fn new(scope: impl Into<Scope>) -> Self {
        Self {
            scope: scope.into(),
            ..Self::default()
        }
    }

    /// Set `state`
    #[must_use]
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Override the configured client ID
    #[must_use]
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set `prompt`
    #[must_use]
    pub fn prompt(mut self, prompt: Prompt) -> Self {
        self.prompt = Some(prompt);
        self
    }

    /// Override the configured redirect URI
    #[must_use]
    pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Set `response_type`
    #[must_use]
    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    /// Set the `bot` permission bitset
    #[must_use]
    pub fn permissions(mut self, permissions: impl Into<String>) -> Self {
        self.permissions = Some(permissions.into());
        self
    }

    /// Preselect a guild
    #[must_use]
    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = Some(guild_id.into());
        self
    }

    /// Lock the guild picker to `guild_id`
    #[must_use]
    pub fn disable_guild_select(mut self, disable: bool) -> Self {
        self.disable_guild_select = Some(disable);
        self
    }

    /// Set the installation context
    #[must_use]
    pub fn integration_type(mut self, integration_type: IntegrationType) -> Self {
        self.integration_type = Some(integration_type);
        self
    }
}

/// Build `{api_base}/oauth2/authorize?...` without touching the network
///
/// Spaces are encoded as `%20` rather than `+`.
pub(crate) fn build_auth_url(config: &ClientConfig, opts: &AuthUrlOptions) -> Result<String> {
    if opts.scope.is_empty() {
        return Err(Error::invalid_argument("scope must not be empty"));
    }
    let client_id = opts
        .client_id
        .as_deref()
        .or(config.client_id.as_deref())
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| Error::invalid_argument("client_id is required"))?;

    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("client_id", client_id);
    if let Some(redirect_uri) = opts.redirect_uri.as_deref().or(config.redirect_uri.as_deref()) {
        query.append_pair("redirect_uri", redirect_uri);
    }
    query.append_pair("response_type", opts.response_type.as_str());
    query.append_pair("scope", &opts.scope.joined());
    if let Some(state) = &opts.state {
        query.append_pair("state", state);
    }
    if let Some(prompt) = opts.prompt {
        query.append_pair("prompt", prompt.as_str());
    }
    if let Some(permissions) = &opts.permissions {
        query.append_pair("permissions", permissions);
    }
    if let Some(guild_id) = &opts.guild_id {
        query.append_pair("guild_id", guild_id);
    }
    if let Some(disable) = opts.disable_guild_select {
        query.append_pair("disable_guild_select", if disable { "true" } else { "false" });
    }
    if let Some(integration_type) = opts.integration_type {
        query.append_pair("integration_type", integration_type.as_str());
    }

    // Literal '+' is already escaped as %2B, so every remaining '+' is a space
    let query = query.finish().replace('+', "%20");
    Ok(format!(
        "{}/oauth2/authorize?{query}",
        config.api_base_url.trim_end_matches('/')
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> ClientConfig {
        ClientConfig::default()
            .with_client_id("332269999912132097")
            .with_redirect_uri("https://nicememe.website")
    }

    #[test]
    fn builds_minimal_url() {
        let url = build_auth_url(&config(), &AuthUrlOptions::new(["identify", "guilds"])).unwrap();
        assert_eq!(
            url,
            "https://discord.com/api/oauth2/authorize?client_id=332269999912132097&redirect_uri=https%3A%2F%2Fnicememe.website&response_type=code&scope=identify%20guilds"
        );
    }

    #[test]
    fn empty_scope_is_invalid() {
        let result = build_auth_url(&config(), &AuthUrlOptions::new(Vec::<String>::new()));
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn missing_client_id_is_invalid() {
        let result = build_auth_url(&ClientConfig::default(), &AuthUrlOptions::new("identify"));
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn optional_parameters_in_order() {
        let opts = AuthUrlOptions::new("bot applications.commands")
            .client_id("42")
            .state("a+b c")
            .prompt(Prompt::None)
            .response_type(ResponseType::Token)
            .permissions("8")
            .guild_id("123")
            .disable_guild_select(true)
            .integration_type(IntegrationType::GuildInstall);

        let url = build_auth_url(&ClientConfig::default(), &opts).unwrap();
        assert_eq!(
            url,
            "https://discord.com/api/oauth2/authorize?client_id=42&response_type=token&scope=bot%20applications.commands&state=a%2Bb%20c&prompt=none&permissions=8&guild_id=123&disable_guild_select=true&integration_type=0"
        );
    }
}
