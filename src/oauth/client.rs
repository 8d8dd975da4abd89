//! OAuth Client
//!
//! Stateless facade over Discord's OAuth2 and `users/@me` endpoints.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::instrument;

use super::auth_url::{AuthUrlOptions, build_auth_url};
use super::events::{ClientEvent, EventSink};
use super::params::{AddMember, GrantType, GuildsQuery, TokenRequest, require, require_snowflake};
use super::request::{Authorization, RestRequest, Requester, basic_credentials};
use crate::config::ClientConfig;
use crate::models::{
    AuthorizationInformation, Connection, Member, PartialGuild, TokenRequestResult, User,
};
use crate::{Error, Result};

/// Discord OAuth2 client
///
/// Holds only read-only configuration and a pooled HTTP client, so clones are
/// cheap and calls may run concurrently. Every operation issues at most one
/// request and never retries.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    /// Construction options
    config: Arc<ClientConfig>,

    /// HTTP machinery and event sink
    requester: Requester,
}

impl OAuthClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let requester = Requester::new(&config, EventSink::new())?;
        Ok(Self {
            config: Arc::new(config),
            requester,
        })
    }

    /// Client configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Receive `debug` and `warn` events emitted by this client and its clones
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.requester.events().subscribe()
    }

    /// Exchange an authorization code or refresh token (`POST /oauth2/token`)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] before any request when the grant's
    /// companion fields or the client credentials are missing.
    #[instrument(skip_all, fields(grant_type = %params.grant_type))]
    pub async fn token_request(&self, params: &TokenRequest) -> Result<TokenRequestResult> {
        let client_id = non_empty(params.client_id.as_deref())
            .or_else(|| non_empty(self.config.client_id.as_deref()));

        let mut form = Vec::with_capacity(5);
        if let Some(client_id) = client_id {
            form.push(("client_id", client_id.to_string()));
        }
        form.push(("grant_type", params.grant_type.as_str().to_string()));

        match params.grant_type {
            GrantType::AuthorizationCode => {
                let code = non_empty(params.code.as_deref()).ok_or_else(|| {
                    Error::invalid_argument("code is required for the authorization_code grant")
                })?;
                let redirect_uri = non_empty(params.redirect_uri.as_deref())
                    .or_else(|| non_empty(self.config.redirect_uri.as_deref()))
                    .ok_or_else(|| {
                        Error::invalid_argument(
                            "redirect_uri is required for the authorization_code grant",
                        )
                    })?;
                form.push(("code", code.to_string()));
                form.push(("redirect_uri", redirect_uri.to_string()));
            }
            GrantType::RefreshToken => {
                let refresh_token = non_empty(params.refresh_token.as_deref()).ok_or_else(|| {
                    Error::invalid_argument("refresh_token is required for the refresh_token grant")
                })?;
                form.push(("refresh_token", refresh_token.to_string()));
            }
        }

        if !params.scope.is_empty() {
            form.push(("scope", params.scope.joined()));
        }

        let credentials = self.resolve_credentials(client_id, params.client_secret.as_deref())?;
        let response = self
            .requester
            .execute(RestRequest::post_form(
                "/oauth2/token",
                Authorization::Basic(credentials),
                form,
            ))
            .await?;
        response.json()
    }

    /// Revoke an access or refresh token (`POST /oauth2/token/revoke`)
    ///
    /// `credentials` is a base64 `client_id:client_secret`; the configured
    /// credentials are used when it is `None`. Returns the raw response body.
    #[instrument(skip_all)]
    pub async fn revoke_token(&self, access_token: &str, credentials: Option<&str>) -> Result<String> {
        require("access_token", access_token)?;
        let credentials = match non_empty(credentials) {
            Some(c) => c.to_string(),
            None => self.resolve_credentials(non_empty(self.config.client_id.as_deref()), None)?,
        };

        let response = self
            .requester
            .execute(RestRequest::post_form(
                "/oauth2/token/revoke",
                Authorization::Basic(credentials),
                vec![("token", access_token.to_string())],
            ))
            .await?;
        Ok(response.text())
    }

    /// Current authorization details (`GET /oauth2/@me`)
    #[instrument(skip_all)]
    pub async fn get_current_authorization_information(
        &self,
        access_token: &str,
    ) -> Result<AuthorizationInformation> {
        self.get_json("/oauth2/@me".to_string(), access_token, Vec::new())
            .await
    }

    /// The authorizing user (`GET /users/@me`)
    #[instrument(skip_all)]
    pub async fn get_user(&self, access_token: &str) -> Result<User> {
        self.get_json("/users/@me".to_string(), access_token, Vec::new())
            .await
    }

    /// Guilds the user is in (`GET /users/@me/guilds`); requires `guilds`
    ///
    /// Only the options set on `query` are sent.
    #[instrument(skip_all)]
    pub async fn get_user_guilds(
        &self,
        access_token: &str,
        query: &GuildsQuery,
    ) -> Result<Vec<PartialGuild>> {
        let query = query.to_query()?;
        self.get_json("/users/@me/guilds".to_string(), access_token, query)
            .await
    }

    /// Linked third-party accounts (`GET /users/@me/connections`); requires `connections`
    #[instrument(skip_all)]
    pub async fn get_user_connections(&self, access_token: &str) -> Result<Vec<Connection>> {
        self.get_json("/users/@me/connections".to_string(), access_token, Vec::new())
            .await
    }

    /// The user's membership in a guild; requires `guilds.members.read`
    #[instrument(skip_all, fields(guild_id = %guild_id))]
    pub async fn get_guild_member(&self, access_token: &str, guild_id: &str) -> Result<Member> {
        require_snowflake("guild_id", guild_id)?;
        self.get_json(
            format!("/users/@me/guilds/{guild_id}/member"),
            access_token,
            Vec::new(),
        )
        .await
    }

    /// Add the user to a guild (`PUT /guilds/{guild.id}/members/{user.id}`)
    ///
    /// Returns `None` when Discord answers 204 because the user is already a
    /// member.
    #[instrument(skip_all, fields(guild_id = %opts.guild_id, user_id = %opts.user_id))]
    pub async fn add_member(&self, opts: &AddMember) -> Result<Option<Member>> {
        opts.validate()?;
        let body = serde_json::to_value(opts.body())?;
        let response = self
            .requester
            .execute(RestRequest::put_json(
                format!("/guilds/{}/members/{}", opts.guild_id, opts.user_id),
                Authorization::Bot(opts.bot_token.clone()),
                body,
            ))
            .await?;

        if response.is_empty() {
            return Ok(None);
        }
        response.json().map(Some)
    }

    /// Build the URL users visit to authorize the application
    ///
    /// Pure; no request is made.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `scope` is empty or no client ID
    /// is available.
    pub fn generate_auth_url(&self, opts: &AuthUrlOptions) -> Result<String> {
        build_auth_url(&self.config, opts)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: String,
        access_token: &str,
        query: Vec<(&'static str, String)>,
    ) -> Result<T> {
        require("access_token", access_token)?;
        let response = self
            .requester
            .execute(
                RestRequest::get(path, Authorization::Bearer(access_token.to_string()))
                    .with_query(query),
            )
            .await?;
        response.json()
    }

    /// Basic credentials: per-call secret, else configured credentials, else configured secret
    ///
    /// A client ID is only needed when the credentials are built from a secret.
    fn resolve_credentials(
        &self,
        client_id: Option<&str>,
        client_secret: Option<&str>,
    ) -> Result<String> {
        let with_secret = |secret: &str| -> Result<String> {
            let client_id = non_empty(client_id).ok_or_else(|| {
                Error::invalid_argument("client_id is required to use client_secret")
            })?;
            Ok(basic_credentials(client_id, secret))
        };

        if let Some(secret) = non_empty(client_secret) {
            return with_secret(secret);
        }
        if let Some(credentials) = non_empty(self.config.credentials.as_deref()) {
            return Ok(credentials.to_string());
        }
        if let Some(secret) = non_empty(self.config.client_secret.as_deref()) {
            return with_secret(secret);
        }
        Err(Error::invalid_argument(
            "client credentials are required: set credentials or client_secret",
        ))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
