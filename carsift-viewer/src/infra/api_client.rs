use std::time::Duration;

use carsift_config::ServerConfig;
use log::{debug, info, warn};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Serialize, de::DeserializeOwned};

use crate::infra::errors::AcquisitionError;

/// Thin JSON/bytes client for the acquisition backend.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ApiClient {
    /// Create a new API client
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AcquisitionError> {
        // Users tend to paste "localhost:5000"; reqwest rejects a missing
        // scheme and a trailing slash doubles up with route paths.
        fn normalize(raw: String) -> String {
            let trimmed = raw.trim().trim_end_matches('/').to_string();
            let with_scheme = if trimmed.starts_with("http://")
                || trimmed.starts_with("https://")
            {
                trimmed
            } else {
                format!("http://{}", trimmed)
            };
            if with_scheme != raw {
                warn!(
                    "[ApiClient] Normalized base URL from '{}' to '{}'",
                    raw, with_scheme
                );
            }
            with_scheme
        }

        let base_url = normalize(base_url.into());
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AcquisitionError::transport(e.to_string()))?;

        info!(
            "[ApiClient] Creating new API client with base URL: {}",
            base_url
        );

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self, AcquisitionError> {
        Self::new(config.base_url_str(), config.request_timeout)
    }

    /// Resolve a route path against the base URL. Absolute URLs pass through.
    pub fn build_url(&self, path: impl AsRef<str>) -> String {
        let p = path.as_ref();
        if p.starts_with("http://") || p.starts_with("https://") {
            return p.to_string();
        }
        format!("{}/{}", self.base_url, p.trim_start_matches('/'))
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, AcquisitionError> {
        let url = self.build_url(path);
        debug!("[ApiClient] GET {}", url);
        self.execute_json(self.client.get(&url)).await
    }

    /// POST a JSON body; any 2xx is accepted and the body is ignored.
    pub async fn post_accepted<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), AcquisitionError> {
        let url = self.build_url(path);
        debug!("[ApiClient] POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::status_error(status, response).await)
    }

    /// GET raw bytes. A 404 is reported as `None` rather than an error.
    pub async fn get_bytes(
        &self,
        path: &str,
    ) -> Result<Option<Vec<u8>>, AcquisitionError> {
        let url = self.build_url(path);
        debug!("[ApiClient] GET bytes {}", url);
        let response = self.client.get(&url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let bytes = response.bytes().await?;
                Ok(Some(bytes.to_vec()))
            }
            status => Err(Self::status_error(status, response).await),
        }
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, AcquisitionError> {
        let response = request.send().await?;

        match response.status() {
            status if status.is_success() => {
                // Read the body first so a dropped connection stays a
                // transport error and only shape problems count as malformed.
                let body = response.bytes().await?;
                Ok(serde_json::from_slice(&body)?)
            }
            status => Err(Self::status_error(status, response).await),
        }
    }

    async fn status_error(
        status: StatusCode,
        response: reqwest::Response,
    ) -> AcquisitionError {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        AcquisitionError::status(status.as_u16(), error_text)
    }
}
