//! HTTP client for the authentication and media backend
//!
//! Each operation is a single request/response exchange. A bearer token is
//! attached only when the caller passes one; the backend decides what an
//! anonymous request may do.

use reqwest::{Client, RequestBuilder, Response, multipart};
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use crate::{
    error::{BackendError, BackendResult},
    models::{ErrorBody, FeedResponse, NewUpload, Post, RegisterRequest, TokenResponse, UserProfile},
};

/// Default backend location of the reference deployment
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Configuration for the backend connection
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL without trailing slash (e.g. "http://localhost:8000")
    pub base_url: String,
}

impl BackendConfig {
    /// Create a config for `base_url`, dropping any trailing slash
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}

/// Backend client
#[derive(Debug, Clone)]
pub struct BackendClient {
    config: BackendConfig,
    http: Client,
}

impl BackendClient {
    /// Create a new backend client
    pub fn new(config: BackendConfig) -> Self {
        info!("Backend client initialized with URL: {}", config.base_url);
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(request: RequestBuilder) -> BackendResult<Response> {
        request.send().await.map_err(|e| {
            error!("Backend request failed: {}", e);
            BackendError::Transport(e)
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> BackendResult<T> {
        response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    /// Pull `detail` out of an error response, falling back to `default`
    async fn error_detail(response: Response, default: &str) -> String {
        match response.json::<ErrorBody>().await {
            Ok(body) => body.detail_message().unwrap_or_else(|| default.to_string()),
            Err(_) => default.to_string(),
        }
    }

    /// Exchange credentials for an access token
    pub async fn login(&self, email: &str, password: &str) -> BackendResult<TokenResponse> {
        info!("Login attempt for user: {}", email);

        let request = self
            .http
            .post(self.url("/auth/jwt/login"))
            .form(&[("username", email), ("password", password)]);
        let response = Self::send(request).await?;

        if !response.status().is_success() {
            warn!("Login rejected for {}: {}", email, response.status());
            return Err(BackendError::InvalidCredentials);
        }

        Self::decode(response).await
    }

    /// Log in and fetch the profile with the new token
    ///
    /// Succeeds only when both steps do, so callers never hold a token
    /// without a user.
    pub async fn login_session(
        &self,
        email: &str,
        password: &str,
    ) -> BackendResult<(String, UserProfile)> {
        let token = self.login(email, password).await?.access_token;
        let user = self.fetch_current_user(Some(&token)).await?;
        Ok((token, user))
    }

    /// Create a new account
    pub async fn register(&self, email: &str, password: &str) -> BackendResult<()> {
        info!("Registering user: {}", email);

        let request = self
            .http
            .post(self.url("/auth/register"))
            .json(&RegisterRequest { email, password });
        let response = Self::send(request).await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = Self::error_detail(response, "Registration failed").await;
            warn!("Registration rejected for {}: {} ({})", email, status, detail);
            return Err(BackendError::Registration { detail });
        }

        Ok(())
    }

    /// Fetch the profile of the token's owner
    pub async fn fetch_current_user(&self, token: Option<&str>) -> BackendResult<UserProfile> {
        let request = Self::authorize(self.http.get(self.url("/users/me")), token);
        let response = Self::send(request).await?;

        if !response.status().is_success() {
            warn!("Profile fetch failed: {}", response.status());
            return Err(BackendError::ProfileFetch);
        }

        Self::decode(response).await
    }

    /// Fetch the feed in server order
    pub async fn fetch_feed(&self, token: Option<&str>) -> BackendResult<Vec<Post>> {
        let request = Self::authorize(self.http.get(self.url("/feed")), token);
        let response = Self::send(request).await?;

        if !response.status().is_success() {
            warn!("Feed fetch failed: {}", response.status());
            return Err(BackendError::Feed);
        }

        let feed: FeedResponse = Self::decode(response).await?;
        Ok(feed.posts)
    }

    /// Share a new post
    pub async fn upload_post(&self, token: Option<&str>, upload: NewUpload) -> BackendResult<()> {
        info!(
            "Uploading {} ({}, {} bytes)",
            upload.filename,
            upload.mime_type,
            upload.bytes.len()
        );

        let part = multipart::Part::bytes(upload.bytes)
            .file_name(upload.filename)
            .mime_str(&upload.mime_type)
            .map_err(|e| BackendError::Upload {
                detail: format!("Invalid media type: {}", e),
            })?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("caption", upload.caption);

        let request = Self::authorize(self.http.post(self.url("/upload")).multipart(form), token);
        let response = Self::send(request).await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = Self::error_detail(response, "Upload failed").await;
            warn!("Upload rejected: {} ({})", status, detail);
            return Err(BackendError::Upload { detail });
        }

        Ok(())
    }

    /// Delete a post owned by the token's owner
    pub async fn delete_post(&self, token: Option<&str>, id: &str) -> BackendResult<()> {
        info!("Deleting post: {}", id);

        let path = format!("/posts/{}", urlencoding::encode(id));
        let request = Self::authorize(self.http.delete(self.url(&path)), token);
        let response = Self::send(request).await?;

        if !response.status().is_success() {
            warn!("Delete of post {} failed: {}", id, response.status());
            return Err(BackendError::Delete);
        }

        Ok(())
    }
}
