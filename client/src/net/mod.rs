//! The session-aware HTTP layer.
//!
//! Every API call the client makes goes through [`SessionClient::request`] so
//! that bearer-token decoration, cookie credentials, and authorization-failure
//! recovery behave identically on every page. Pages never call the transport
//! directly.

pub mod envelope;
pub mod paths;

use crate::config::Config;
use crate::errors::{ClientError, ClientResult};
use crate::session::SessionStore;
use crate::ui::redirect::schedule_login_redirect;
use crate::ui::{ConfirmPrompt, Navigator, Notifier, SESSION_EXPIRED_MESSAGE};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Options for a single request. Defaults to a GET with JSON content
/// negotiation; caller-supplied headers always win over the defaults.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        RequestOptions {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Value) -> Self {
        RequestOptions {
            method: Method::POST,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn put(body: Value) -> Self {
        RequestOptions {
            method: Method::PUT,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn delete() -> Self {
        RequestOptions {
            method: Method::DELETE,
            ..Self::default()
        }
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Parsed body of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    pub fn into_json(self) -> Option<Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Text(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            Payload::Json(_) => None,
        }
    }
}

/// Centralized API caller owning the bearer-token lifecycle.
pub struct SessionClient {
    http: Client,
    config: Config,
    store: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    prompt: Arc<dyn ConfirmPrompt>,
}

impl SessionClient {
    pub fn new(
        config: Config,
        store: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        prompt: Arc<dyn ConfirmPrompt>,
    ) -> ClientResult<Self> {
        // Cookies ride along on every call so the hybrid cookie/token backend
        // keeps working for anonymous requests too.
        let http = Client::builder()
            .timeout(config.request_timeout())
            .cookie_store(true)
            .build()?;

        Ok(SessionClient {
            http,
            config,
            store,
            notifier,
            navigator,
            prompt,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> Arc<dyn SessionStore> {
        Arc::clone(&self.store)
    }

    /// Issues an API request with the current session attached.
    ///
    /// Resolves to `Ok(Some(payload))` on success and `Ok(None)` when the
    /// request was aborted by an authorization failure (session cleared,
    /// redirect scheduled). `None` is never an empty success. The path is an
    /// absolute request path and must not embed the credential.
    pub async fn request(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ClientResult<Option<Payload>> {
        debug!("Sending {} request to {}", options.method, path);
        let headers = self.decorated_headers(&options).await;
        let response = self.execute(path, &options, headers).await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            if is_order_creation(&options.method, path) {
                return self.recover_checkout(path, &options).await.map(Some);
            }
            self.store.clear().await;
            self.notifier.error(SESSION_EXPIRED_MESSAGE);
            schedule_login_redirect(Arc::clone(&self.navigator), self.config.redirect_delay());
            return Ok(None);
        }
        if !status.is_success() {
            return Err(response_error(response).await);
        }
        parse_success(response).await.map(Some)
    }

    /// Ends the session: best-effort server-side logout, unconditional local
    /// cleanup, then a deferred redirect to the role-appropriate login page.
    pub async fn logout(&self) -> ClientResult<()> {
        if !self.prompt.confirm("Sign out of your account?") {
            return Ok(());
        }

        let mut builder = self.http.post(self.config.endpoint(paths::AUTH_LOGOUT));
        if let Some(session) = self.store.get().await {
            builder = builder.bearer_auth(&session.token);
        }
        match builder.send().await {
            Ok(response) if !response.status().is_success() => {
                warn!("Logout request rejected with status {}", response.status());
            }
            Ok(_) => {}
            Err(e) => warn!("Logout request failed: {}", e),
        }

        // Local cleanup happens regardless of what the server said.
        self.store.clear().await;
        self.notifier.success("Signed out");
        schedule_login_redirect(Arc::clone(&self.navigator), self.config.redirect_delay());
        Ok(())
    }

    /// Default headers with the stored bearer token, overlaid by the caller's
    /// headers.
    async fn decorated_headers(&self, options: &RequestOptions) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(session) = self.store.get().await {
            match bearer_value(&session.token) {
                Some(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                None => warn!(
                    "Stored token contains invalid header characters, sending unauthenticated"
                ),
            }
        }

        for (name, value) in options.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }
        headers
    }

    async fn execute(
        &self,
        path: &str,
        options: &RequestOptions,
        headers: HeaderMap,
    ) -> ClientResult<reqwest::Response> {
        let mut builder = self
            .http
            .request(options.method.clone(), self.config.endpoint(path))
            .headers(headers);
        if let Some(body) = &options.body {
            builder = builder.json(body);
        }
        Ok(builder.send().await?)
    }

    /// The one documented 401 exception: order creation refreshes the token
    /// once and retries, instead of redirecting away from the checkout form.
    async fn recover_checkout(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> ClientResult<Payload> {
        info!("Order creation hit a 401, attempting a one-shot token refresh");
        let Some(token) = self.refresh_token().await else {
            return Err(ClientError::session_expired(
                "the login session could not be refreshed",
            ));
        };
        self.store.update_token(&token).await;

        let mut headers = self.decorated_headers(options).await;
        match bearer_value(&token) {
            Some(value) => {
                // The retry must carry the fresh token even if the caller
                // supplied its own stale Authorization header.
                headers.insert(AUTHORIZATION, value);
            }
            None => {
                return Err(ClientError::session_expired(
                    "the refreshed token is not usable",
                ));
            }
        }

        let response = self.execute(path, options, headers).await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::session_expired(
                "the login session could not be renewed",
            ));
        }
        if !status.is_success() {
            return Err(response_error(response).await);
        }
        parse_success(response).await
    }

    /// Requests a fresh bearer token from the refresh endpoint. The refresh
    /// call authenticates through the cookie side of the backend only.
    async fn refresh_token(&self) -> Option<String> {
        let response = match self
            .http
            .post(self.config.endpoint(paths::AUTH_REFRESH_TOKEN))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Token refresh request failed: {}", e);
                return None;
            }
        };
        if !response.status().is_success() {
            warn!("Token refresh rejected with status {}", response.status());
            return None;
        }
        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Token refresh returned an unreadable body: {}", e);
                return None;
            }
        };
        body.get("token").and_then(Value::as_str).map(str::to_owned)
    }
}

fn is_order_creation(method: &Method, path: &str) -> bool {
    *method == Method::POST && path.split('?').next().unwrap_or(path) == paths::ORDERS
}

fn bearer_value(token: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!("Bearer {}", token)).ok()
}

/// Maps a non-2xx, non-401 response onto an error carrying the
/// server-provided message when one exists, else the HTTP status text.
async fn response_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let fallback = status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string();
    let message = match response.json::<Value>().await {
        Ok(body) => body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or(fallback),
        Err(_) => fallback,
    };
    ClientError::request_failed(status.as_u16(), message)
}

/// Parses a 2xx body per its content type: JSON when declared, raw text
/// otherwise. A body that declares JSON but does not parse is an error, not a
/// silent text fallback.
async fn parse_success(response: reqwest::Response) -> ClientResult<Payload> {
    let declares_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"));

    let text = response.text().await?;
    if declares_json {
        let value = serde_json::from_str(&text)
            .map_err(|e| ClientError::invalid_body(format!("declared JSON did not parse: {}", e)))?;
        Ok(Payload::Json(value))
    } else {
        Ok(Payload::Text(text))
    }
}
