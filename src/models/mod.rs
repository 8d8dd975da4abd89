//! Discord resource records returned by the OAuth2 and user endpoints
//!
//! Field names match Discord's JSON exactly. Optionality follows three rules:
//!
//! - `T`: always present and non-null
//! - `Option<T>`: may be absent, or is always present but nullable
//! - `Option<Option<T>>`: `None` when absent, `Some(None)` when explicitly
//!   `null`, `Some(Some(v))` otherwise
//!
//! Fields this crate does not know about are kept in each record's `extra` map.

mod application;
mod connection;
mod guild;
mod member;
mod token;
mod user;

pub use application::{Application, AuthorizationInformation, IntegrationApplication};
pub use connection::{Connection, Integration, IntegrationAccount};
pub use guild::{Emoji, Guild, PartialGuild, Role};
pub use member::Member;
pub use token::{TokenRequestResult, Webhook};
pub use user::User;

use serde::{Deserialize, Deserializer};

/// Unknown fields captured alongside the typed ones
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// Deserialize a present field into `Some(value)`, keeping `null` as `Some(None)`
///
/// Pair with `#[serde(default)]` so an absent field stays `None`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
