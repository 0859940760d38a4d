// HTTP client wrapper: fixed base URL, 10 s timeout, bearer injection on
// the way out, error normalization on the way in. The 401 path is the only
// one with a side effect (session teardown); everything else is pure
// request/response.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use url::Url;

use crate::config;
use crate::error::ClientError;
use crate::session::Session;

/// REST endpoints consumed by the domain services.
pub mod endpoints {
    pub const LOGIN: &str = "/users/login";
    pub const USERS: &str = "/users";
    pub const PROJECTS: &str = "/projects";
    pub const CHECKLISTS: &str = "/checklists";
    pub const POSTS: &str = "/posts";
    pub const PROGRESS: &str = "/progress";
}

pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<Session>,
}

impl ApiClient {
    /// Client against the configured backend.
    pub fn from_config(session: Arc<Session>) -> Result<Self, ClientError> {
        let api = &config::config().api;
        Self::new(&api.base_url, api.timeout_secs, session)
    }

    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        session: Arc<Session>,
    ) -> Result<Self, ClientError> {
        Url::parse(base_url)
            .map_err(|err| ClientError::unknown(format!("ogiltig bas-URL {base_url}: {err}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|err| ClientError::unknown(err.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn patch(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        self.request(Method::PATCH, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ClientError> {
        self.request(Method::DELETE, path, None).await
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.base_url, path);

        let mut builder = self.http.request(method, &url);
        // Token absence is not an error; the request goes out unauthenticated
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) if err.is_builder() => return Err(ClientError::unknown(err.to_string())),
            Err(err) => {
                tracing::debug!("request to {url} failed before a response: {err}");
                return Err(ClientError::Network);
            }
        };

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let data: Value = serde_json::from_str(&text).unwrap_or(Value::Null);

        if status.is_success() {
            return Ok(data);
        }

        if status == StatusCode::UNAUTHORIZED {
            // Token expired or invalid: tear the session down and let the
            // caller land on the login route.
            self.session.invalidate();
        }

        let message = data
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP-fel {}", status.as_u16()));

        Err(ClientError::api(status.as_u16(), message, Some(data)))
    }
}
