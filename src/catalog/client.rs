//! HTTP client for catalog lookups
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout and User-Agent
//! - Exponential backoff retry logic (max 3 retries)
//! - 404 reported as "absent" rather than as an error

use crate::error::CatalogError;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Default timeout for a single HTTP request
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("modcmp/", env!("CARGO_PKG_VERSION"));

/// Maximum number of retry attempts
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_DELAY_MS: u64 = 100;

/// HTTP client wrapper with retry logic
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    max_retries: u32,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, CatalogError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                CatalogError::network("", "HTTP client", format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            max_retries: MAX_RETRIES,
        })
    }

    /// GET `url` and decode a JSON body; `Ok(None)` on 404
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        id: &str,
        catalog: &str,
    ) -> Result<Option<T>, CatalogError> {
        let Some(response) = self.get_with_retry(url, id, catalog).await? else {
            return Ok(None);
        };

        response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|e| CatalogError::InvalidResponse {
                id: id.to_string(),
                catalog: catalog.to_string(),
                message: format!("failed to parse JSON: {}", e),
            })
    }

    /// Perform a GET request, retrying rate limits and transport failures
    async fn get_with_retry(
        &self,
        url: &str,
        id: &str,
        catalog: &str,
    ) -> Result<Option<reqwest::Response>, CatalogError> {
        let mut last_error = None;
        let mut delay = BASE_DELAY_MS;

        for attempt in 0..=self.max_retries {
            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(CatalogError::RateLimited {
                            catalog: catalog.to_string(),
                        });
                    } else if status == StatusCode::NOT_FOUND {
                        return Ok(None);
                    } else if !status.is_success() {
                        return Err(CatalogError::network(id, catalog, format!("HTTP {}", status)));
                    } else {
                        return Ok(Some(response));
                    }
                }
                Err(e) if e.is_timeout() => {
                    last_error = Some(CatalogError::timeout(id, catalog));
                }
                Err(e) => {
                    last_error = Some(CatalogError::network(id, catalog, e.to_string()));
                }
            }

            if attempt < self.max_retries {
                debug!(id, catalog, attempt, "retrying catalog request");
                tokio::time::sleep(Duration::from_millis(delay)).await;
                delay *= 2;
            }
        }

        Err(last_error.unwrap_or_else(|| CatalogError::network(id, catalog, "unknown error")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_http_client_with_config() {
        let client = HttpClient::with_config(Duration::from_secs(60), "test-agent/1.0");
        assert!(client.is_ok());
    }

    #[test]
    fn test_http_client_default_retries() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.max_retries, MAX_RETRIES);
    }

    #[test]
    fn test_default_constants() {
        assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(10));
        assert!(DEFAULT_USER_AGENT.starts_with("modcmp/"));
        assert_eq!(MAX_RETRIES, 3);
        assert_eq!(BASE_DELAY_MS, 100);
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let mut client =
            HttpClient::with_config(Duration::from_millis(500), "test-agent/1.0").unwrap();
        client.max_retries = 0;
        let result: Result<Option<serde_json::Value>, _> = client
            .get_json("http://127.0.0.1:9/project/jei", "jei", "test")
            .await;
        assert!(result.is_err());
    }
}
