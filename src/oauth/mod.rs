//! Discord OAuth2 client
//!
//! Features:
//! - Authorization code and refresh token exchange
//! - Token revocation
//! - `users/@me` lookups (user, guilds, connections, guild member)
//! - Adding a user to a guild with `guilds.join`
//! - Authorization URL generation
//! - Debug/warn events for latency and rate-limit pressure

mod auth_url;
mod client;
mod events;
mod params;
mod request;

pub use auth_url::{AuthUrlOptions, IntegrationType, Prompt, ResponseType};
pub use client::OAuthClient;
pub use events::ClientEvent;
pub use params::{AddMember, GrantType, GuildsQuery, MAX_GUILDS_LIMIT, Scope, TokenRequest};
