//! Budgeting API access
//!
//! This module wraps authenticated GET/POST calls against the remote service,
//! consults the response cache before any GET, and records the advisory
//! rate-limit counter the service reports.

mod client;
mod endpoint;
mod transport;

pub use client::{ApiClient, ApiError};
pub use endpoint::Endpoint;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Transport, RATE_LIMIT_HEADER};
