//! HTTP transport seam
//!
//! `ApiClient` talks to the network through the [`Transport`] trait so the
//! caching and status-handling logic can run against an in-process fake.

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;

/// Response header carrying the service's usage counter (e.g. `"36/200"`)
pub const RATE_LIMIT_HEADER: &str = "x-rate-limit";

/// A single authenticated request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL
    pub url: String,
    /// Sent as `Authorization: Bearer <token>`
    pub bearer_token: String,
    /// JSON-encoded body, if any
    pub body: Option<String>,
}

/// The parts of a response the client cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Value of the rate-limit header, when the server sent one
    pub rate_limit: Option<String>,
    pub body: String,
}

/// Executes HTTP requests on behalf of `ApiClient`
pub trait Transport {
    /// Sends the request and reads the whole response body
    ///
    /// Only transport failures (connection, DNS, TLS, timeout) are errors; any
    /// HTTP status is returned as a response.
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, reqwest::Error>;
}

/// Blocking reqwest-based transport used in production
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a new HttpTransport with default settings
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a new HttpTransport with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, reqwest::Error> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .bearer_auth(&request.bearer_token)
            .header(CONTENT_TYPE, "application/json");

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        // HeaderMap lookups are case-insensitive
        let rate_limit = response
            .headers()
            .get(RATE_LIMIT_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text()?;

        Ok(HttpResponse {
            status,
            rate_limit,
            body,
        })
    }
}
