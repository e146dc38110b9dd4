//! rynab - a YNAB API client library
//!
//! Layers, leaves first: [`cache`] keeps responses in memory and on disk,
//! [`api`] performs authenticated requests through that cache, and
//! [`resolver`] maps names to ids and submits transactions.

pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod logging;
pub mod resolver;

pub use api::{ApiClient, ApiError, Endpoint};
pub use cache::{CacheError, CacheStore};
pub use config::ClientConfig;
pub use resolver::{ResolveError, ResourceResolver};
