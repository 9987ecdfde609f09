use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::models::auth::{RefreshRequest, RefreshResponse};
use crate::store::{MemoryTokenStore, TokenStore};

/// Default refresh endpoint under the configured base origin.
const DEFAULT_REFRESH_PATH: &str = "/auth/admin/refresh";

/// Client configuration, fixed at construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    refresh_path: String,
    timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Create a configuration for the given base origin,
    /// e.g. `https://api.tourhub.example.com`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            refresh_path: DEFAULT_REFRESH_PATH.to_string(),
            timeout_secs: None,
        }
    }

    /// Set a request timeout in seconds (transport default when unset).
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = Some(seconds);
        self
    }

    /// Override the token refresh endpoint path.
    pub fn with_refresh_path(mut self, path: impl Into<String>) -> Self {
        self.refresh_path = path.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Per-request options.
///
/// Requests are authenticated by default; endpoints that are public opt out
/// with [`RequestOptions::no_credential`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    skip_credential: bool,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send this request without an Authorization header. A 401 on such a
    /// request is an ordinary HTTP error, never a refresh trigger.
    pub fn no_credential(mut self) -> Self {
        self.skip_credential = true;
        self
    }

    fn requires_auth(&self) -> bool {
        !self.skip_credential
    }
}

/// Authenticated API client.
///
/// Wraps requests to the configured origin, attaching a bearer token where
/// required. When an authenticated request comes back 401 the client performs
/// exactly one silent token refresh and retries the original request once;
/// concurrent refreshes are coalesced into a single in-flight exchange.
#[derive(Clone)]
pub struct Client {
    config: ClientConfig,
    http: reqwest::Client,
    store: Arc<dyn TokenStore>,
    refresh_gate: Arc<tokio::sync::Mutex<()>>,
}

impl Client {
    /// Create a client backed by an in-memory token store.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_store(config, Arc::new(MemoryTokenStore::new()))
    }

    /// Create a client with an injected token store (e.g. a
    /// [`crate::FileTokenStore`], or an in-memory fake in tests).
    pub fn with_store(config: ClientConfig, store: Arc<dyn TokenStore>) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(seconds) = config.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(seconds));
        }
        // Build only fails for TLS/resolver misconfiguration, neither of
        // which this builder touches
        let http = builder
            .build()
            .expect("HTTP client build cannot fail with only a timeout configured");

        Self {
            config,
            http,
            store,
            refresh_gate: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// Seed the token store after a login. Called by the auth layer of the
    /// application; the client itself only consumes the store.
    pub fn set_tokens(&self, access_token: &str, refresh_token: &str) {
        self.store.set_access_token(access_token);
        self.store.set_refresh_token(refresh_token);
    }

    /// Drop both tokens, returning the store to the logged-out state.
    pub fn clear_tokens(&self) {
        self.store.clear();
    }

    /// GET `path` and decode the JSON response.
    pub async fn get<T>(&self, path: &str, options: RequestOptions) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        self.request(Method::GET, path, None::<&()>, options).await
    }

    /// POST a JSON body to `path` and decode the JSON response.
    pub async fn post<T, B>(&self, path: &str, body: &B, options: RequestOptions) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body), options).await
    }

    /// DELETE `path` and decode the JSON response.
    pub async fn delete<T>(&self, path: &str, options: RequestOptions) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        self.request(Method::DELETE, path, None::<&()>, options)
            .await
    }

    async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        if !options.requires_auth() {
            let response = self.execute(method, path, body, None).await?;
            return Self::decode(response).await;
        }

        // Authenticated requests never go out without a stored credential.
        let token = self
            .store
            .access_token()
            .filter(|token| !token.is_empty())
            .ok_or(ApiError::NoCredential)?;

        let response = self
            .execute(method.clone(), path, body, Some(&token))
            .await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::decode(response).await;
        }

        tracing::debug!(target: "api::auth", path, "Received 401, refreshing access token");
        let fresh = self.refresh_access_token(&token).await?;

        // Exactly one retry; a second 401 is terminal.
        let retry = self.execute(method, path, body, Some(&fresh)).await?;
        if retry.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!(target: "api::auth", path, "Retry rejected after refresh");
            return Err(ApiError::AuthExpired);
        }
        Self::decode(retry).await
    }

    async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        bearer: Option<&str>,
    ) -> ApiResult<reqwest::Response>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.config.base_url, path);
        tracing::debug!(target: "api", method = %method, %url, "Sending request");

        let mut request = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = bearer {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }

    async fn decode<T>(response: reqwest::Response) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: Self::server_message(&body, status),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Pull a human-readable message out of an error body, falling back to
    /// the status reason when the body carries none.
    fn server_message(body: &str, status: StatusCode) -> String {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
            for key in ["message", "error"] {
                if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                    if !message.is_empty() {
                        return message.to_string();
                    }
                }
            }
        }
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// `stale` is the access token that earned the 401. Refreshes are
    /// serialized behind a gate; a caller that finds the stored token already
    /// changed while it waited reuses it instead of refreshing again. Any
    /// failure clears both tokens together, and a 401 from the refresh
    /// endpoint itself is terminal, never another refresh.
    async fn refresh_access_token(&self, stale: &str) -> ApiResult<String> {
        let _gate = self.refresh_gate.lock().await;

        if let Some(current) = self.store.access_token() {
            if !current.is_empty() && current != stale {
                tracing::debug!(target: "api::auth", "Token already refreshed by concurrent request");
                return Ok(current);
            }
        }

        let Some(refresh_token) = self.store.refresh_token().filter(|t| !t.is_empty()) else {
            self.store.clear();
            return Err(ApiError::NoRefreshToken);
        };

        let url = format!("{}{}", self.config.base_url, self.config.refresh_path);
        let request = RefreshRequest { refresh_token };

        let response = match self.http.post(&url).json(&request).send().await {
            Ok(response) => response,
            Err(err) => {
                self.store.clear();
                return Err(ApiError::Network(err));
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                self.store.clear();
                return Err(ApiError::Network(err));
            }
        };

        if !status.is_success() {
            self.store.clear();
            tracing::warn!(
                target: "api::auth",
                status = status.as_u16(),
                "Refresh rejected, clearing session"
            );
            return Err(ApiError::RefreshRejected(Self::server_message(
                &body, status,
            )));
        }

        let parsed = serde_json::from_str::<RefreshResponse>(&body).ok();
        let Some(parsed) = parsed.filter(|r| !r.access_token.is_empty()) else {
            self.store.clear();
            return Err(ApiError::RefreshRejected(
                "refresh response missing access token".to_string(),
            ));
        };

        // Rotate both together when the server issues a new refresh token.
        if let Some(rotated) = &parsed.refresh_token {
            self.store.set_refresh_token(rotated);
        }
        self.store.set_access_token(&parsed.access_token);
        tracing::debug!(target: "api::auth", "Access token refreshed");

        Ok(parsed.access_token)
    }
}
