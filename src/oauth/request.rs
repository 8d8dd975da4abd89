//! Request execution
//!
//! Builds each HTTP request, measures its latency, inspects rate-limit
//! headers and maps non-2xx responses into [`RestError`] or [`HttpError`].
//! Nothing here retries or waits.

use std::time::{Duration, Instant};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::header::{self, HeaderMap};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::events::EventSink;
use crate::config::ClientConfig;
use crate::error::{ErrorBody, HttpError, RestError};
use crate::{Error, Result};

const RATELIMIT_REMAINING: &str = "x-ratelimit-remaining";
const RATELIMIT_RESET_AFTER: &str = "x-ratelimit-reset-after";
const RATELIMIT_BUCKET: &str = "x-ratelimit-bucket";

/// `Authorization` header scheme
#[derive(Clone, PartialEq, Eq)]
pub(crate) enum Authorization {
    /// User access token
    Bearer(String),
    /// Base64 `client_id:client_secret`
    Basic(String),
    /// Bot token
    Bot(String),
}

impl Authorization {
    fn header_value(&self) -> String {
        match self {
            Self::Bearer(token) => format!("Bearer {token}"),
            Self::Basic(credentials) => format!("Basic {credentials}"),
            Self::Bot(token) => format!("Bot {token}"),
        }
    }
}

/// Base64 encode `client_id:client_secret`
pub(crate) fn basic_credentials(client_id: &str, client_secret: &str) -> String {
    STANDARD.encode(format!("{client_id}:{client_secret}"))
}

/// Request body
pub(crate) enum Body {
    Empty,
    Form(Vec<(&'static str, String)>),
    Json(Value),
}

/// A single REST call, relative to the versioned API base
pub(crate) struct RestRequest {
    pub method: Method,
    pub path: String,
    pub auth: Authorization,
    pub query: Vec<(&'static str, String)>,
    pub body: Body,
}

impl RestRequest {
    pub(crate) fn get(path: impl Into<String>, auth: Authorization) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            auth,
            query: Vec::new(),
            body: Body::Empty,
        }
    }

    pub(crate) fn post_form(
        path: impl Into<String>,
        auth: Authorization,
        form: Vec<(&'static str, String)>,
    ) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            auth,
            query: Vec::new(),
            body: Body::Form(form),
        }
    }

    pub(crate) fn put_json(path: impl Into<String>, auth: Authorization, body: Value) -> Self {
        Self {
            method: Method::PUT,
            path: path.into(),
            auth,
            query: Vec::new(),
            body: Body::Json(body),
        }
    }

    pub(crate) fn with_query(mut self, query: Vec<(&'static str, String)>) -> Self {
        self.query = query;
        self
    }
}

/// Successful (2xx) response
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub(crate) fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    pub(crate) fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.status == StatusCode::NO_CONTENT || self.body.iter().all(u8::is_ascii_whitespace)
    }
}

/// Shared HTTP machinery behind every client operation
#[derive(Debug, Clone)]
pub(crate) struct Requester {
    http: Client,
    base_url: String,
    latency_threshold: Duration,
    ratelimiter_offset: Duration,
    events: EventSink,
}

impl Requester {
    pub(crate) fn new(config: &ClientConfig, events: EventSink) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!(
                "DiscordBot (discord-oauth, ",
                env!("CARGO_PKG_VERSION"),
                ")"
            ))
            .build()?;

        Ok(Self {
            http,
            base_url: config.versioned_base(),
            latency_threshold: config.latency_threshold,
            ratelimiter_offset: config.ratelimiter_offset,
            events,
        })
    }

    pub(crate) fn events(&self) -> &EventSink {
        &self.events
    }

    /// Issue one request and return its body if the status is 2xx
    pub(crate) async fn execute(&self, request: RestRequest) -> Result<RawResponse> {
        let RestRequest {
            method,
            path,
            auth,
            query,
            body,
        } = request;

        self.events.debug(format!("{method} {path}"));

        let url = format!("{}{path}", self.base_url);
        let mut builder = self
            .http
            .request(method.clone(), &url)
            .header(header::AUTHORIZATION, auth.header_value());
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        builder = match body {
            Body::Empty => builder,
            Body::Form(form) => builder.form(&form),
            Body::Json(json) => builder.json(&json),
        };

        let started = Instant::now();
        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;
        let latency = started.elapsed();

        self.events.debug(format!(
            "{method} {path} -> {} ({}ms)",
            status.as_u16(),
            latency.as_millis()
        ));
        if latency > self.latency_threshold {
            self.events.warn(format!(
                "Request latency {}ms on {method} {path} exceeds threshold of {}ms",
                latency.as_millis(),
                self.latency_threshold.as_millis()
            ));
        }
        self.inspect_bucket(&method, &path, status, &headers);

        if status.is_success() {
            return Ok(RawResponse {
                status,
                body: bytes.to_vec(),
            });
        }

        Err(self.map_error(method, path, status, headers, &bytes))
    }

    /// Warn when the bucket for this route has no requests left
    fn inspect_bucket(&self, method: &Method, path: &str, status: StatusCode, headers: &HeaderMap) {
        if status == StatusCode::TOO_MANY_REQUESTS {
            return;
        }
        if header_number::<u64>(headers, RATELIMIT_REMAINING) != Some(0) {
            return;
        }
        let bucket = headers
            .get(RATELIMIT_BUCKET)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown");
        let wait = header_number::<f64>(headers, RATELIMIT_RESET_AFTER)
            .map_or(self.ratelimiter_offset, |secs| self.retry_delay(secs));
        self.events.warn(format!(
            "Rate limit bucket {bucket} exhausted on {method} {path}; resets in {}ms",
            wait.as_millis()
        ));
    }

    fn map_error(
        &self,
        method: Method,
        path: String,
        status: StatusCode,
        headers: HeaderMap,
        body: &[u8],
    ) -> Error {
        let parsed = match serde_json::from_slice::<Value>(body) {
            Ok(value @ Value::Object(_)) => serde_json::from_value::<ErrorBody>(value).ok(),
            _ => None,
        };

        let retry_after = parsed
            .as_ref()
            .and_then(|b| b.retry_after)
            .or_else(|| header_number::<f64>(&headers, header::RETRY_AFTER.as_str()));

        if status == StatusCode::TOO_MANY_REQUESTS {
            let global = parsed.as_ref().and_then(|b| b.global).unwrap_or(false);
            let wait = retry_after.map_or(self.ratelimiter_offset, |secs| self.retry_delay(secs));
            self.events.warn(format!(
                "429 Too Many Requests on {method} {path} (global: {global}); retry after {}ms",
                wait.as_millis()
            ));
        }

        match parsed {
            Some(response) => RestError {
                status,
                headers,
                method,
                path,
                retry_delay: retry_after.map(|secs| self.retry_delay(secs)),
                response,
            }
            .into(),
            None => HttpError {
                status,
                headers,
                method,
                path,
                body: String::from_utf8_lossy(body).into_owned(),
            }
            .into(),
        }
    }

    /// Seconds from Discord plus the configured offset, saturating at `Duration::MAX`
    fn retry_delay(&self, secs: f64) -> Duration {
        let base = if secs > 0.0 {
            Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        };
        base.saturating_add(self.ratelimiter_offset)
    }
}

fn header_number<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn requester(offset_ms: u64) -> Requester {
        let config = ClientConfig {
            ratelimiter_offset: Duration::from_millis(offset_ms),
            ..ClientConfig::default()
        };
        Requester::new(&config, EventSink::new()).unwrap()
    }

    #[test]
    fn basic_credentials_encode_id_and_secret() {
        assert_eq!(basic_credentials("foo", "bar"), "Zm9vOmJhcg==");
        assert_eq!(
            Authorization::Basic(basic_credentials("foo", "bar")).header_value(),
            "Basic Zm9vOmJhcg=="
        );
        assert_eq!(Authorization::Bearer("t".into()).header_value(), "Bearer t");
        assert_eq!(Authorization::Bot("b".into()).header_value(), "Bot b");
    }

    #[test]
    fn retry_delay_adds_offset_and_ignores_garbage() {
        let r = requester(250);
        assert_eq!(r.retry_delay(1.5), Duration::from_millis(1750));
        assert_eq!(r.retry_delay(-3.0), Duration::from_millis(250));
        assert_eq!(r.retry_delay(f64::NAN), Duration::from_millis(250));
    }

    #[test]
    fn retry_delay_saturates_on_huge_values() {
        let r = requester(250);
        assert_eq!(r.retry_delay(1e300), Duration::MAX);
        assert_eq!(r.retry_delay(f64::INFINITY), Duration::MAX);
    }

    #[test]
    fn huge_retry_after_in_body_does_not_panic() {
        let r = requester(100);
        let mut rx = r.events().subscribe();
        let err = r.map_error(
            Method::GET,
            "/users/@me".to_string(),
            StatusCode::TOO_MANY_REQUESTS,
            HeaderMap::new(),
            br#"{"message": "You are being rate limited.", "retry_after": 1e300, "global": true}"#,
        );

        let Error::Rest(e) = err else {
            panic!("expected RestError");
        };
        assert_eq!(e.retry_after(), Some(1e300));
        assert_eq!(e.retry_delay, Some(Duration::MAX));
        assert!(rx.try_recv().unwrap().is_warn());
    }

    #[test]
    fn huge_retry_after_header_does_not_panic() {
        let r = requester(0);
        let mut headers = HeaderMap::new();
        headers.insert(header::RETRY_AFTER, HeaderValue::from_static("1e300"));
        let err = r.map_error(
            Method::GET,
            "/users/@me".to_string(),
            StatusCode::TOO_MANY_REQUESTS,
            headers,
            br#"{"message": "You are being rate limited.", "code": 0}"#,
        );

        let Error::Rest(e) = err else {
            panic!("expected RestError");
        };
        assert_eq!(e.retry_delay, Some(Duration::MAX));
    }

    #[test]
    fn huge_reset_after_header_does_not_panic() {
        let r = requester(500);
        let mut rx = r.events().subscribe();
        let mut headers = HeaderMap::new();
        headers.insert(RATELIMIT_REMAINING, HeaderValue::from_static("0"));
        headers.insert(RATELIMIT_RESET_AFTER, HeaderValue::from_static("1e300"));

        r.inspect_bucket(&Method::GET, "/users/@me", StatusCode::OK, &headers);
        let event = rx.try_recv().unwrap();
        assert!(event.is_warn());
        assert!(event.message().contains(&Duration::MAX.as_millis().to_string()));
    }

    #[test]
    fn json_error_body_maps_to_rest_error() {
        let r = requester(0);
        let err = r.map_error(
            Method::GET,
            "/users/@me".to_string(),
            StatusCode::UNAUTHORIZED,
            HeaderMap::new(),
            br#"{"message": "401: Unauthorized", "code": 0}"#,
        );
        match err {
            Error::Rest(e) => {
                assert_eq!(e.status, StatusCode::UNAUTHORIZED);
                assert_eq!(e.response.message, "401: Unauthorized");
                assert_eq!(e.retry_delay, None);
            }
            other => panic!("expected RestError, got {other:?}"),
        }
    }

    #[test]
    fn non_object_body_maps_to_http_error() {
        let r = requester(0);
        for body in [&b"<html>bad gateway</html>"[..], &b"[1,2]"[..], &b""[..]] {
            let err = r.map_error(
                Method::GET,
                "/users/@me".to_string(),
                StatusCode::BAD_GATEWAY,
                HeaderMap::new(),
                body,
            );
            assert!(matches!(err, Error::Http(_)), "body {body:?} gave {err:?}");
        }
    }

    #[test]
    fn rate_limited_response_warns_and_carries_retry_after() {
        let r = requester(100);
        let mut rx = r.events().subscribe();
        let err = r.map_error(
            Method::GET,
            "/users/@me/guilds".to_string(),
            StatusCode::TOO_MANY_REQUESTS,
            HeaderMap::new(),
            br#"{"message": "You are being rate limited.", "retry_after": 2.0, "global": false}"#,
        );

        let Error::Rest(e) = err else {
            panic!("expected RestError");
        };
        assert_eq!(e.retry_after(), Some(2.0));
        assert_eq!(e.retry_delay, Some(Duration::from_millis(2100)));
        let event = rx.try_recv().unwrap();
        assert!(event.is_warn());
        assert!(event.message().contains("retry after 2100ms"));
    }

    #[test]
    fn retry_after_header_is_used_when_body_lacks_it() {
        let r = requester(0);
        let mut headers = HeaderMap::new();
        headers.insert(header::RETRY_AFTER, HeaderValue::from_static("3"));
        let err = r.map_error(
            Method::POST,
            "/oauth2/token".to_string(),
            StatusCode::TOO_MANY_REQUESTS,
            headers,
            br#"{"message": "slow down", "code": 0}"#,
        );
        let Error::Rest(e) = err else {
            panic!("expected RestError");
        };
        assert_eq!(e.retry_delay, Some(Duration::from_secs(3)));
    }

    #[test]
    fn exhausted_bucket_warns() {
        let r = requester(500);
        let mut rx = r.events().subscribe();
        let mut headers = HeaderMap::new();
        headers.insert(RATELIMIT_REMAINING, HeaderValue::from_static("0"));
        headers.insert(RATELIMIT_RESET_AFTER, HeaderValue::from_static("1.25"));
        headers.insert(RATELIMIT_BUCKET, HeaderValue::from_static("abcd1234"));

        r.inspect_bucket(&Method::GET, "/users/@me", StatusCode::OK, &headers);
        let event = rx.try_recv().unwrap();
        assert!(event.is_warn());
        assert_eq!(
            event.message(),
            "Rate limit bucket abcd1234 exhausted on GET /users/@me; resets in 1750ms"
        );

        headers.insert(RATELIMIT_REMAINING, HeaderValue::from_static("4"));
        r.inspect_bucket(&Method::GET, "/users/@me", StatusCode::OK, &headers);
        assert!(rx.try_recv().is_err());
    }
}
