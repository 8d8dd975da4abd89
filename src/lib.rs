//! Discord OAuth2 Client Library
//!
//! A thin, stateless client for Discord's OAuth2 and user REST endpoints.
//!
//! # Features
//!
//! - **Token exchange**: authorization code and refresh token grants
//! - **Revocation**: revoke access or refresh tokens
//! - **User data**: current user, guilds, connections, guild member, authorization info
//! - **Guild join**: add an authorized user to a guild with a bot token
//! - **Authorization URLs**: pure URL builder for the consent screen
//! - **Events**: `debug`/`warn` stream for request tracing, latency and rate limits
//!
//! Nothing is cached, stored or retried. Errors are returned as-is: see
//! [`Error`] for how Discord rejections are mapped.
//!
//! ```no_run
//! use discord_oauth::{AuthUrlOptions, ClientConfig, OAuthClient, TokenRequest};
//!
//! # async fn run() -> discord_oauth::Result<()> {
//! let client = OAuthClient::new(
//!     ClientConfig::default()
//!         .with_client_id("332269999912132097")
//!         .with_client_secret("secret")
//!         .with_redirect_uri("https://example.com/callback"),
//! )?;
//!
//! let url = client.generate_auth_url(&AuthUrlOptions::new(["identify", "guilds"]))?;
//! println!("Visit {url}");
//!
//! let token = client
//!     .token_request(&TokenRequest::authorization_code("code-from-callback"))
//!     .await?;
//! let user = client.get_user(&token.access_token).await?;
//! println!("Hello {}", user.display_name());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod models;
pub mod oauth;

pub use config::ClientConfig;
pub use error::{Error, ErrorBody, HttpError, RestError, Result, flatten_errors};
pub use oauth::{
    AddMember, AuthUrlOptions, ClientEvent, GrantType, GuildsQuery, IntegrationType, OAuthClient,
    Prompt, ResponseType, Scope, TokenRequest,
};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Setup tracing/logging for host binaries and examples
///
/// `format` of `Some("json")` selects JSON output; anything else is plain text.
/// `RUST_LOG` takes precedence over `level`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn setup_tracing(level: &str, format: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(filter);

    let installed = match format {
        Some("json") => subscriber.with(fmt::layer().json()).try_init(),
        _ => subscriber.with(fmt::layer()).try_init(),
    };

    installed.map_err(|e| Error::Config(format!("Failed to install tracing subscriber: {e}")))
}
