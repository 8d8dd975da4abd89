//! Authorization URL generation through the public client API

use discord_oauth::{
    AuthUrlOptions, ClientConfig, Error, IntegrationType, OAuthClient, Prompt, ResponseType, Scope,
};
use pretty_assertions::assert_eq;
use url::Url;

fn client() -> OAuthClient {
    OAuthClient::new(
        ClientConfig::default()
            .with_client_id("157730590492196864")
            .with_redirect_uri("https://example.com/callback"),
    )
    .unwrap()
}

fn param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

#[test]
fn scope_list_is_space_joined_and_response_type_defaults_to_code() {
    let url = client()
        .generate_auth_url(&AuthUrlOptions::new(["identify", "guilds"]))
        .unwrap();

    assert!(url.starts_with("https://discord.com/api/oauth2/authorize?"));
    assert!(url.contains("scope=identify%20guilds"));
    assert!(url.contains("response_type=code"));

    let parsed = Url::parse(&url).unwrap();
    assert_eq!(param(&parsed, "client_id").as_deref(), Some("157730590492196864"));
    assert_eq!(
        param(&parsed, "redirect_uri").as_deref(),
        Some("https://example.com/callback")
    );
    assert_eq!(param(&parsed, "scope").as_deref(), Some("identify guilds"));
    assert_eq!(param(&parsed, "state"), None);
}

#[test]
fn empty_scope_is_rejected() {
    let client = client();
    for scope in [Scope::default(), Scope::from(""), Scope::from(Vec::<String>::new())] {
        let result = client.generate_auth_url(&AuthUrlOptions::new(scope));
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }
}

#[test]
fn per_call_values_override_configuration() {
    let url = client()
        .generate_auth_url(
            &AuthUrlOptions::new("identify")
                .client_id("1")
                .redirect_uri("http://localhost:3000/cb"),
        )
        .unwrap();

    let parsed = Url::parse(&url).unwrap();
    assert_eq!(param(&parsed, "client_id").as_deref(), Some("1"));
    assert_eq!(
        param(&parsed, "redirect_uri").as_deref(),
        Some("http://localhost:3000/cb")
    );
}

#[test]
fn bot_install_url_carries_guild_parameters() {
    let url = client()
        .generate_auth_url(
            &AuthUrlOptions::new("bot applications.commands")
                .permissions("2048")
                .guild_id("41771983423143937")
                .disable_guild_select(true)
                .integration_type(IntegrationType::GuildInstall)
                .prompt(Prompt::Consent)
                .state("15773059ghq9183habn")
                .response_type(ResponseType::Code),
        )
        .unwrap();

    let parsed = Url::parse(&url).unwrap();
    assert_eq!(param(&parsed, "permissions").as_deref(), Some("2048"));
    assert_eq!(param(&parsed, "guild_id").as_deref(), Some("41771983423143937"));
    assert_eq!(param(&parsed, "disable_guild_select").as_deref(), Some("true"));
    assert_eq!(param(&parsed, "integration_type").as_deref(), Some("0"));
    assert_eq!(param(&parsed, "prompt").as_deref(), Some("consent"));
    assert_eq!(param(&parsed, "state").as_deref(), Some("15773059ghq9183habn"));
}

#[test]
fn custom_api_base_is_respected() {
    let client = OAuthClient::new(
        ClientConfig::default()
            .with_client_id("1")
            .with_api_base_url("https://canary.discord.com/api/"),
    )
    .unwrap();

    let url = client.generate_auth_url(&AuthUrlOptions::new("identify")).unwrap();
    assert!(url.starts_with("https://canary.discord.com/api/oauth2/authorize?client_id=1&"));
    assert!(!url.contains("redirect_uri"));
}
