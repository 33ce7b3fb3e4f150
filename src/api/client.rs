use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ProbeConfig;
use crate::error::ApiError;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("te-probe/", env!("CARGO_PKG_VERSION"));

/// Status and body of a completed HTTP exchange.
///
/// Non-success statuses are not errors at this layer: the pipeline stages own
/// the interpretation (for example, creation only succeeds on `201`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReply {
    pub status: StatusCode,
    pub body: String,
}

impl ApiReply {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the decoder error when the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Minimal surface of the monitoring API used by the pipeline.
#[async_trait]
pub trait MonitoringApi: Send + Sync {
    /// Issues a GET for `path`, relative to the API root.
    ///
    /// # Errors
    ///
    /// Returns an error when the request cannot be sent or its body read.
    async fn get(&self, path: &str) -> Result<ApiReply, ApiError>;

    /// Issues a POST for `path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error when the request cannot be sent or its body read.
    async fn post_json(&self, path: &str, body: &Value) -> Result<ApiReply, ApiError>;
}

/// Bearer-authenticated client for the ThousandEyes REST API.
#[derive(Debug, Clone)]
pub struct ThousandEyesClient {
    client: Client,
    base_url: String,
}

impl ThousandEyesClient {
    /// Builds a client from the resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the token is not a valid header value or the
    /// underlying HTTP client cannot be built.
    pub fn new(config: &ProbeConfig) -> Result<Self, ApiError> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", config.api_token()))
            .map_err(|err| ApiError::InvalidToken { source: err })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(DEFAULT_USER_AGENT)
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| ApiError::BuildClientFailed { source: err })?;

        Ok(Self {
            client,
            base_url: config.base_url.as_str().trim_end_matches('/').to_owned(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let joined = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&joined).map_err(|err| ApiError::JoinUrlFailed {
            base: self.base_url.clone(),
            path: path.to_owned(),
            source: err,
        })
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiReply, ApiError> {
        let url = self.endpoint(path)?;
        tracing::debug!("{} {}", method, url);

        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|err| ApiError::Transport {
            method,
            url: url.to_string(),
            source: err,
        })?;
        let status = response.status();
        let text = response.text().await.map_err(|err| ApiError::ReadBody {
            url: url.to_string(),
            source: err,
        })?;
        tracing::debug!("{} -> {}", url, status);

        Ok(ApiReply::new(status, text))
    }
}

#[async_trait]
impl MonitoringApi for ThousandEyesClient {
    async fn get(&self, path: &str) -> Result<ApiReply, ApiError> {
        self.send(Method::GET, path, None).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<ApiReply, ApiError> {
        self.send(Method::POST, path, Some(body)).await
    }
}
