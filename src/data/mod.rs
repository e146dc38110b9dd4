//! Data models for the budgeting API
//!
//! These are views materialized from cached or freshly fetched JSON on every
//! call. Only the raw JSON is ever persisted.

pub mod budget;
pub mod category;
pub mod transaction;

pub use budget::{Account, Budget, Payee};
pub use category::{Category, CategoryGroup};
pub use transaction::{
    milliunits, normalize_date, ClearedStatus, NewTransaction, SaveTransaction, Transaction,
};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Case-insensitive, whitespace-trimmed name comparison used by every lookup
pub fn names_match(wanted: &str, candidate: &str) -> bool {
    wanted.trim().to_lowercase() == candidate.trim().to_lowercase()
}

/// Materializes a list payload into typed items
///
/// Items that do not fit `T` are skipped. A payload that is not a list, such
/// as an error body, yields an empty list.
pub fn list_from<T: DeserializeOwned>(payload: Value, kind: &str) -> Vec<T> {
    let Value::Array(items) = payload else {
        warn!(kind, "expected a list payload");
        return Vec::new();
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(kind, error = %e, "skipping malformed item");
                None
            }
        })
        .collect()
}
