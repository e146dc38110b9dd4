//! Authenticated API client with read-through caching
//!
//! GET responses are unwrapped from their `data` envelope and cached; POST
//! responses are returned as-is. Non-success statuses are logged and handed back
//! to the caller rather than turned into errors.

use reqwest::Method;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::endpoint::Endpoint;
use super::transport::{HttpRequest, HttpResponse, HttpTransport, Transport};
use crate::cache::{CacheError, CacheStore};
use crate::config::ClientConfig;

/// Errors that can occur when talking to the API
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// A successful response carried a body that is not JSON
    #[error("Failed to parse JSON response from {path}: {source}")]
    ParseError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Cache maintenance failed
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Client for the budgeting API
///
/// Holds the bearer token, the cache store and the last observed rate-limit
/// counter. The counter is informational only; requests are never delayed.
#[derive(Debug)]
pub struct ApiClient<T = HttpTransport> {
    transport: T,
    token: String,
    base_url: String,
    /// Client-wide switch for cache reads
    use_cache: bool,
    cache: CacheStore,
    rate_limit: Option<String>,
    last_response: Option<HttpResponse>,
}

impl ApiClient<HttpTransport> {
    /// Create a new ApiClient with default settings
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_config(token, ClientConfig::default())
    }

    /// Create a new ApiClient from an explicit configuration
    pub fn with_config(token: impl Into<String>, config: ClientConfig) -> Self {
        Self::with_transport(token, config, HttpTransport::new())
    }
}

impl<T: Transport> ApiClient<T> {
    /// Create a new ApiClient over a custom transport
    pub fn with_transport(token: impl Into<String>, config: ClientConfig, transport: T) -> Self {
        Self {
            transport,
            token: token.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            use_cache: config.use_cache,
            cache: CacheStore::with_dir(config.cache_dir),
            rate_limit: None,
            last_response: None,
        }
    }

    /// Base URL with any trailing slash removed
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether cache reads are enabled client-wide
    pub fn use_cache(&self) -> bool {
        self.use_cache
    }

    /// The transport requests go through
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The response cache
    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Last rate-limit counter reported by the server, if any
    pub fn rate_limit(&self) -> Option<&str> {
        self.rate_limit.as_deref()
    }

    /// The most recent raw response, kept for debugging
    pub fn last_response(&self) -> Option<&HttpResponse> {
        self.last_response.as_ref()
    }

    /// Empties both cache tiers
    pub fn clear_cache(&mut self) -> Result<(), ApiError> {
        self.cache.clear()?;
        Ok(())
    }

    /// Fetches an endpoint, reading through the cache
    ///
    /// The cache is consulted only when both `use_cache` and the client-wide
    /// flag are set. A 200 response is unwrapped to `data.<resource>` and
    /// cached regardless of whether the read skipped the cache.
    ///
    /// # Returns
    /// * `Ok(Value)` - the unwrapped payload, or the raw body when the status
    ///   is not 200 or the envelope lacks the resource
    /// * `Err(ApiError)` - if the request could not be sent or a 200 body is
    ///   not JSON
    pub fn get(&mut self, endpoint: &Endpoint, use_cache: bool) -> Result<Value, ApiError> {
        if use_cache && self.use_cache {
            if let Some(cached) = self.cache.get(endpoint.cache_key()) {
                return Ok(cached.clone());
            }
        }

        info!(path = endpoint.path(), "fetching from API");
        let response = self.send(Method::GET, endpoint.path(), None)?;
        let body = decode_body(endpoint.path(), &response)?;

        if response.status != 200 {
            warn!(status = response.status, path = endpoint.path(), "GET failed");
            return Ok(body);
        }

        let payload = match body.get("data").and_then(|data| data.get(endpoint.resource())) {
            Some(payload) => payload.clone(),
            None => {
                warn!(
                    path = endpoint.path(),
                    resource = endpoint.resource(),
                    "response has no data envelope for resource"
                );
                return Ok(body);
            }
        };

        if let Err(e) = self.cache.put(endpoint.cache_key(), payload.clone()) {
            warn!(path = endpoint.path(), error = %e, "failed to cache response");
        }
        Ok(payload)
    }

    /// Posts a JSON body; the response is never cached
    pub fn post(&mut self, path: &str, body: &Value) -> Result<Value, ApiError> {
        info!(path, "posting to API");
        let response = self.send(Method::POST, path, Some(body.to_string()))?;
        let reply = decode_body(path, &response)?;

        if !(200..300).contains(&response.status) {
            warn!(status = response.status, path, body = %reply, "POST failed");
        }

        Ok(reply)
    }

    /// Sends one request and records rate-limit and last-response state
    fn send(
        &mut self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<HttpResponse, ApiError> {
        let request = HttpRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            bearer_token: self.token.clone(),
            body,
        };

        let response = self.transport.execute(request)?;

        if let Some(rate_limit) = &response.rate_limit {
            debug!(path, rate_limit = %rate_limit, "rate limit updated");
            self.rate_limit = Some(rate_limit.clone());
        }

        self.last_response = Some(response.clone());
        Ok(response)
    }
}

/// Parses a response body
///
/// An unparseable body is an error only for 2xx responses; for anything else
/// it is logged and reported as `null`.
fn decode_body(path: &str, response: &HttpResponse) -> Result<Value, ApiError> {
    match serde_json::from_str(&response.body) {
        Ok(value) => Ok(value),
        Err(source) if (200..300).contains(&response.status) => Err(ApiError::ParseError {
            path: path.to_string(),
            source,
        }),
        Err(e) => {
            warn!(status = response.status, path, error = %e, "non-JSON error body");
            Ok(Value::Null)
        }
    }
}
