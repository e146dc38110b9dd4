//! Budget, account and payee views

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A budget as listed by `/budgets`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Opaque identifier (UUID-shaped)
    pub id: String,
    pub name: String,
    /// Fields this crate does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An account within a budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub closed: bool,
    /// Balance in milliunits
    #[serde(default)]
    pub balance: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A payee within a budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payee {
    pub id: String,
    pub name: String,
    /// Set when the payee is the other side of a transfer
    #[serde(default)]
    pub transfer_account_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_budget_keeps_unknown_fields() {
        let budget: Budget = serde_json::from_value(json!({
            "id": "b1",
            "name": "Personal",
            "last_modified_on": "2024-01-01T00:00:00+00:00"
        }))
        .unwrap();

        assert_eq!(budget.id, "b1");
        assert_eq!(budget.name, "Personal");
        assert_eq!(
            budget.extra.get("last_modified_on"),
            Some(&json!("2024-01-01T00:00:00+00:00"))
        );
    }

    #[test]
    fn test_account_defaults_optional_fields() {
        let account: Account =
            serde_json::from_value(json!({"id": "a1", "name": "Checking"})).unwrap();

        assert!(!account.closed);
        assert_eq!(account.balance, 0);
    }

    #[test]
    fn test_payee_transfer_account() {
        let payee: Payee = serde_json::from_value(json!({
            "id": "p1",
            "name": "Transfer : Savings",
            "transfer_account_id": "a2"
        }))
        .unwrap();

        assert_eq!(payee.transfer_account_id.as_deref(), Some("a2"));
    }
}
