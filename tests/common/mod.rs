//! In-process stand-in for the Discord API
//!
//! Every request is recorded; responses are looked up by method and path.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::Response,
};
use discord_oauth::{ClientConfig, ClientEvent, OAuthClient};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

pub const CLIENT_ID: &str = "332269999912132097";
pub const CLIENT_SECRET: &str = "hunter2";
pub const REDIRECT_URI: &str = "https://example.com/callback";

/// A request as seen by the mock server
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl Recorded {
    /// Decode an `application/x-www-form-urlencoded` body
    pub fn form(&self) -> HashMap<String, String> {
        serde_urlencoded::from_str(&self.body).expect("form body")
    }

    /// Decode a JSON body
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("json body")
    }
}

/// Canned response
#[derive(Debug, Clone)]
pub struct MockResponse {
    status: StatusCode,
    content_type: Option<&'static str>,
    headers: Vec<(&'static str, String)>,
    body: String,
}

impl MockResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status: StatusCode::from_u16(status).expect("status"),
            content_type: Some("application/json"),
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status: StatusCode::from_u16(status).expect("status"),
            content_type: Some("text/html"),
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status: StatusCode::from_u16(status).expect("status"),
            content_type: None,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        self.headers.push((name, value.to_string()));
        self
    }
}

#[derive(Clone, Default)]
pub struct MockDiscord {
    routes: Arc<Mutex<HashMap<(Method, String), MockResponse>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockDiscord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a response for `method` on a path relative to `/api/v10`
    pub fn on(&self, method: Method, path: &str, response: MockResponse) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .insert((method, format!("/api/v10{path}")), response);
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// Serve on an ephemeral port and return the unversioned API base URL
    pub async fn start(&self) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock");
        let addr: SocketAddr = listener.local_addr().expect("mock addr");

        let app = Router::new().fallback(handle).with_state(self.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server");
        });

        format!("http://{addr}/api")
    }
}

async fn handle(
    State(mock): State<MockDiscord>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let header_string = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };
    mock.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: uri.path().to_string(),
        query: uri.query().map(String::from),
        authorization: header_string(header::AUTHORIZATION),
        content_type: header_string(header::CONTENT_TYPE),
        body,
    });

    let canned = mock
        .routes
        .lock()
        .unwrap()
        .get(&(method, uri.path().to_string()))
        .cloned()
        .unwrap_or_else(|| {
            MockResponse::json(404, serde_json::json!({"message": "404: Not Found", "code": 0}))
        });

    let mut builder = Response::builder().status(canned.status);
    if let Some(content_type) = canned.content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    for (name, value) in canned.headers {
        builder = builder.header(name, value);
    }
    builder.body(Body::from(canned.body)).expect("mock response")
}

/// Config pointing at `base` with the test application's credentials
pub fn config(base: &str) -> ClientConfig {
    ClientConfig::default()
        .with_client_id(CLIENT_ID)
        .with_client_secret(CLIENT_SECRET)
        .with_redirect_uri(REDIRECT_URI)
        .with_api_base_url(base)
}

pub fn client(base: &str) -> OAuthClient {
    OAuthClient::new(config(base)).expect("client")
}

/// Drain every event received so far
pub fn drain(rx: &mut broadcast::Receiver<ClientEvent>) -> Vec<ClientEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

pub fn user_json() -> Value {
    serde_json::json!({
        "id": "80351110224678912",
        "username": "nelly",
        "global_name": "Nelly",
        "discriminator": "0",
        "avatar": "8342729096ea3675442027381ff50dfe",
        "verified": true,
        "email": "nelly@discord.com",
        "flags": 64,
        "banner": "06c16474723fe537c283b8efa61a30c8",
        "accent_color": 16_711_680,
        "premium_type": 1,
        "public_flags": 64
    })
}

pub fn member_json() -> Value {
    serde_json::json!({
        "user": user_json(),
        "nick": "NOT API SUPPORT",
        "avatar": null,
        "roles": ["41771983423143936"],
        "joined_at": "2015-04-26T06:26:56.936000+00:00",
        "deaf": false,
        "mute": false,
        "flags": 0,
        "pending": false
    })
}
