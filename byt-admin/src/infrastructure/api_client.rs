use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info};

use super::errors::{ApiError, ApiResult};

/// JSON client for the Build-Your-Tech backend.
///
/// Requests are sent once; there is no retry and no auth header since the
/// `/usuarios` endpoints are public.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
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
        accept_invalid_certs: bool,
    ) -> ApiResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(ApiError::ClientBuild)?;

        info!("[ApiClient] Creating new API client with base URL: {}", base_url);

        Ok(Self { client, base_url })
    }

    /// Build an absolute URL for an API path
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

    /// Send a request, require a 2xx status and decode the JSON body
    async fn execute_request<T: DeserializeOwned>(
        &self,
        url: &str,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        let response = request.send().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Status {
                url: url.to_string(),
                status,
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_slice(&bytes).map_err(|source| {
            debug!(
                "[ApiClient] Undecodable body from {}: {}",
                url,
                String::from_utf8_lossy(&bytes)
            );
            ApiError::Decode {
                url: url.to_string(),
                source,
            }
        })
    }

    /// GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.build_url(path);
        debug!("GET request to: {}", url);

        let request = self.client.get(&url);
        self.execute_request(&url, request).await
    }

    /// POST request with a JSON body
    pub async fn post<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> ApiResult<R> {
        let url = self.build_url(path);
        debug!("POST request to: {}", url);

        let request = self.client.post(&url).json(body);
        self.execute_request(&url, request).await
    }

    /// DELETE request
    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> ApiResult<R> {
        let url = self.build_url(path);
        debug!("DELETE request to: {}", url);

        let request = self.client.delete(&url);
        self.execute_request(&url, request).await
    }
}
