//! Cache module for storing API responses
//!
//! This module provides a two-tier store: an in-memory map consulted first, and
//! a directory of JSON files (one per normalized key) that persists payloads
//! between runs. Nothing expires; entries are only removed by an explicit clear.

mod store;

pub use store::{CacheError, CacheStore};
