use async_trait::async_trait;
use log::{debug, info};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use super::ApiError;
use super::models::{BandwidthReport, LoginRequest, LoginResponse, Session};

const LOGIN_PATH: &str = "/api/auth/login";
const BANDWIDTH_PATH: &str = "/api/bandwidth";

/// Channel that delivers bandwidth deltas to the remote collector
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_bandwidth(&self, report: BandwidthReport) -> Result<(), ApiError>;
}

/// JSON-over-HTTP client for the Ignite collector API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .user_agent(concat!("ignite-node/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Uses a bearer token obtained elsewhere instead of logging in
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Exchanges credentials for a bearer token, which is kept for later requests
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Session, ApiError> {
        info!("Logging in to {} as {}", self.base_url, email);

        let response: LoginResponse = self
            .post_json(LOGIN_PATH, &LoginRequest { email, password })
            .await?;

        self.token = Some(response.token.clone());
        Ok(Session {
            token: response.token,
            account: response.user,
        })
    }

    /// Posts a JSON body and decodes a JSON reply
    ///
    /// The body is parsed before the status is checked so error replies can carry
    /// a `message` field; a non-JSON body is always an invalid response.
    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.post(&url).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!("POST {} -> {} ({} bytes)", url, status, text.len());

        let json: Value = serde_json::from_str(&text)
            .map_err(|_| ApiError::InvalidResponse { body: text.clone() })?;

        if !status.is_success() {
            let message = json
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_value(json).map_err(|_| ApiError::InvalidResponse { body: text })
    }
}

#[async_trait]
impl Transport for ApiClient {
    async fn send_bandwidth(&self, report: BandwidthReport) -> Result<(), ApiError> {
        if self.token.is_none() {
            return Err(ApiError::NotAuthenticated);
        }
        let _: Value = self.post_json(BANDWIDTH_PATH, &report).await?;
        Ok(())
    }
}
