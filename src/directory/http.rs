use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::app_config::ApiConfig;
use crate::directory::{DirectoryApi, NamedRef, NewRecord, Squad};
use crate::errors::DirectoryError;

/// HTTP client for the directory/record service
#[derive(Debug)]
pub struct HttpDirectoryClient {
    /// Base URL of the service
    base_url: String,
    /// HTTP client for making requests
    client: Client,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

impl HttpDirectoryClient {
    /// Create a new client from the API configuration. Fails when the HTTP
    /// client cannot be constructed; a client without the configured timeout
    /// would make unbounded remote calls.
    pub fn new(config: &ApiConfig) -> Result<Self, DirectoryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                DirectoryError::RequestFailed(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            client,
            max_retries: config.retry_count,
            backoff_base_ms: config.retry_backoff_ms,
        })
    }

    /// Create a new client from a complete URL with default limits
    pub fn from_url(url: impl Into<String>) -> Result<Self, DirectoryError> {
        Self::new(&ApiConfig {
            endpoint: url.into(),
            ..ApiConfig::default()
        })
    }

    /// GET a JSON list from the service, retrying transport failures and
    /// server errors with exponential backoff
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, DirectoryError> {
        let url = format!("{}{}", self.base_url, path);

        let mut attempt = 0;
        let mut last_error = DirectoryError::RequestFailed(format!("no attempt made for {}", url));

        while attempt <= self.max_retries {
            match self.client.get(&url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let body = response.text().await.map_err(|e| {
                            DirectoryError::RequestFailed(format!(
                                "Failed to read response body from {}: {}",
                                url, e
                            ))
                        })?;

                        return serde_json::from_str::<T>(&body).map_err(|e| {
                            error!("Unparsable directory response from {}: {}", url, e);
                            DirectoryError::ParseError(format!("{}: {}", url, e))
                        });
                    }

                    let message = response.text().await.unwrap_or_default();
                    let api_error = DirectoryError::ApiError {
                        status_code: status.as_u16(),
                        message,
                    };

                    // Client errors are not retryable; server errors are
                    if status.is_client_error() {
                        return Err(api_error);
                    }
                    last_error = api_error;
                }
                Err(e) => {
                    last_error = Self::map_transport_error(&url, &e);
                }
            }

            attempt += 1;
            if attempt <= self.max_retries {
                let backoff_ms = self.backoff_base_ms * (1u64 << (attempt - 1));
                warn!(
                    "Directory request to {} failed (attempt {}), retrying in {}ms: {}",
                    url, attempt, backoff_ms, last_error
                );
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
            }
        }

        Err(last_error)
    }

    /// POST a JSON body to the service. No retries: record creation is
    /// at-least-once, and the committer reports per-entry failures instead.
    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), DirectoryError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| Self::map_transport_error(&url, &e))?;

        let status = response.status();
        if status.is_success() {
            debug!("POST {} succeeded with status {}", url, status);
            return Ok(());
        }

        let message = response.text().await.unwrap_or_default();
        Err(DirectoryError::ApiError {
            status_code: status.as_u16(),
            message,
        })
    }

    /// Classify a reqwest transport failure into the error taxonomy
    fn map_transport_error(url: &str, error: &reqwest::Error) -> DirectoryError {
        if error.is_timeout() {
            DirectoryError::Timeout(format!("{}: {}", url, error))
        } else if error.is_connect() {
            DirectoryError::ConnectionError(format!("{}: {}", url, error))
        } else {
            DirectoryError::RequestFailed(format!("{}: {}", url, error))
        }
    }
}

#[async_trait]
impl DirectoryApi for HttpDirectoryClient {
    async fn fetch_squads(&self) -> Result<Vec<Squad>, DirectoryError> {
        self.get_json("/directory/squads").await
    }

    async fn fetch_log_types(&self) -> Result<Vec<NamedRef>, DirectoryError> {
        self.get_json("/directory/log-types").await
    }

    async fn fetch_categories(&self) -> Result<Vec<NamedRef>, DirectoryError> {
        self.get_json("/directory/categories").await
    }

    async fn create_record(&self, record: &NewRecord) -> Result<(), DirectoryError> {
        self.post_json("/records", record).await
    }
}
