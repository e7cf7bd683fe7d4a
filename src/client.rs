//! PSA API client.
//!
//! Low-level HTTP client that handles authentication, retries, and raw
//! requests. Higher-level operations are implemented via capability traits
//! on entity types.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, Response};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::{PsaError, Result};
use crate::retry::{method_is_idempotent, with_retry, RetryConfig};

const DEFAULT_API_URL: &str = "https://api.example-psa.com/v1";
const USER_AGENT: &str = concat!("psaclient/", env!("CARGO_PKG_VERSION"));

/// Request/response logging switches.
///
/// Both default to on; turn them off for chatty polling loops.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log each outgoing request at debug level.
    pub requests: bool,
    /// Log each successful response at info level.
    pub responses: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            requests: true,
            responses: true,
        }
    }
}

/// Low-level PSA API client.
///
/// Handles authentication, retry-with-backoff, and HTTP requests.
/// Entity-specific operations are implemented via the `Create`, `Get`,
/// `Update`, `Patch`, `Delete`, and `List` traits on entity types.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use psaclient::PsaClient;
///
/// # fn example() -> psaclient::Result<()> {
/// // Create from environment variables
/// let client = PsaClient::from_env()?;
///
/// // Or configure manually
/// let client = PsaClient::new("your-api-key", "https://api.example-psa.com/v1")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PsaClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
    retry: RetryConfig,
    logging: LoggingConfig,
}

impl std::fmt::Debug for PsaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PsaClient")
            .field("base_url", &self.base_url.as_str())
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl PsaClient {
    /// Create a client from environment variables.
    ///
    /// Uses `PSA_API_KEY` for authentication and optionally `PSA_API_URL`
    /// for the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `PSA_API_KEY` is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("PSA_API_KEY").map_err(|_| {
            PsaError::ConfigMissing("PSA_API_KEY environment variable not set".to_string())
        })?;

        let base_url = env::var("PSA_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(&token, &base_url)
    }

    /// Create a new client with the provided token and base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        // Ensure base URL ends with / so path joins append instead of replace
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(PsaError::Http)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: token.to_string(),
            retry: RetryConfig::default(),
            logging: LoggingConfig::default(),
        })
    }

    /// Replace the retry configuration.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Replace the logging configuration.
    #[must_use]
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Response> {
        self.execute(Method::GET, path, None).await
    }

    /// Make a POST request with JSON body.
    ///
    /// Not retried automatically: an ambiguous failure could have created
    /// the resource already.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let body = serde_json::to_value(body)?;
        self.execute(Method::POST, path, Some(body)).await
    }

    /// Make a POST request to a query sub-resource.
    ///
    /// The query endpoint uses POST for transport but is a pure read, so it
    /// is retried like a GET.
    #[tracing::instrument(skip(self, body))]
    pub async fn post_query<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response> {
        let body = serde_json::to_value(body)?;
        self.execute_with(Method::POST, path, Some(body), true).await
    }

    /// Make a PUT request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let body = serde_json::to_value(body)?;
        self.execute(Method::PUT, path, Some(body)).await
    }

    /// Make a PATCH request with JSON body. Not retried automatically.
    #[tracing::instrument(skip(self, body))]
    pub async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let body = serde_json::to_value(body)?;
        self.execute(Method::PATCH, path, Some(body)).await
    }

    /// Make a DELETE request.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<Response> {
        self.execute(Method::DELETE, path, None).await
    }

    /// Execute with the retry eligibility derived from the method.
    async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> Result<Response> {
        let idempotent = method_is_idempotent(&method);
        self.execute_with(method, path, body, idempotent).await
    }

    /// Shared request-execution path: join the URL, run the attempt under
    /// the retry policy, log the outcome.
    async fn execute_with(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        idempotent: bool,
    ) -> Result<Response> {
        let url = self.base_url.join(path)?;

        if self.logging.requests {
            tracing::debug!(method = %method, path, "issuing request");
        }

        let response = with_retry(&self.retry, path, &method, idempotent, || {
            self.attempt(&method, &url, body.as_ref())
        })
        .await?;

        if self.logging.responses {
            tracing::info!(
                method = %method,
                path,
                status = response.status().as_u16(),
                "request succeeded"
            );
        }

        Ok(response)
    }

    /// One HTTP attempt: send and check the status.
    async fn attempt(&self, method: &Method, url: &Url, body: Option<&Value>) -> Result<Response> {
        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .bearer_auth(&self.token);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(PsaError::Http)?;
        Self::check_response(response).await
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // Handle rate limiting
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(PsaError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let message = Self::extract_error_message(response, status).await;
        Err(PsaError::Api {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        // Try to parse as JSON and extract a message field
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
            if let Some(err) = json.get("error").and_then(|m| m.as_str()) {
                return err.to_string();
            }
            if let Some(first) = json
                .get("errors")
                .and_then(|e| e.as_array())
                .and_then(|a| a.first())
                .and_then(|m| m.as_str())
            {
                return first.to_string();
            }
        }

        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = PsaClient::new("test-token", "https://api.example-psa.com/v1").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("PsaClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = PsaClient::new("token", "https://api.example-psa.com/v1").unwrap();
        let client2 = PsaClient::new("token", "https://api.example-psa.com/v1/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_from_env_requires_key() {
        std::env::remove_var("PSA_API_KEY");
        let result = PsaClient::from_env();
        assert!(matches!(result, Err(PsaError::ConfigMissing(_))));
    }
}
