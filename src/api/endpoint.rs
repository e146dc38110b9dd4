//! Endpoint descriptors
//!
//! Every GET names its path, the field under `data` that holds the resource,
//! and the key its payload is cached under. Keys are explicit so nothing has to
//! be inferred from the shape of the URL.

/// A GET endpoint of the budgeting API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    path: String,
    resource: String,
    cache_key: String,
}

impl Endpoint {
    /// Creates an endpoint cached under its own path
    ///
    /// # Arguments
    /// * `path` - Path relative to the base URL, e.g. `/budgets`
    /// * `resource` - Field of the `data` envelope to unwrap, e.g. `budgets`
    pub fn new(path: impl Into<String>, resource: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            cache_key: path.clone(),
            path,
            resource: resource.into(),
        }
    }

    /// Overrides the cache key
    pub fn with_cache_key(mut self, cache_key: impl Into<String>) -> Self {
        self.cache_key = cache_key.into();
        self
    }

    /// Request path relative to the base URL
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Field of the `data` envelope holding the payload
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Key the payload is cached under
    pub fn cache_key(&self) -> &str {
        &self.cache_key
    }

    /// `/budgets`
    pub fn budgets() -> Self {
        Self::new("/budgets", "budgets")
    }

    /// `/budgets/{budget_id}/accounts`
    pub fn accounts(budget_id: &str) -> Self {
        Self::new(format!("/budgets/{}/accounts", budget_id), "accounts")
    }

    /// `/budgets/{budget_id}/categories`, which answers with category groups
    pub fn categories(budget_id: &str) -> Self {
        Self::new(
            format!("/budgets/{}/categories", budget_id),
            "category_groups",
        )
    }

    /// `/budgets/{budget_id}/payees`
    pub fn payees(budget_id: &str) -> Self {
        Self::new(format!("/budgets/{}/payees", budget_id), "payees")
    }

    /// `/budgets/{budget_id}/payees/{payee_id}`
    pub fn payee(budget_id: &str, payee_id: &str) -> Self {
        Self::new(
            format!("/budgets/{}/payees/{}", budget_id, payee_id),
            "payee",
        )
    }

    /// `/budgets/{budget_id}/transactions`
    pub fn transactions(budget_id: &str) -> Self {
        Self::new(format!("/budgets/{}/transactions", budget_id), "transactions")
    }

    /// `/budgets/{budget_id}/categories/{category_id}/transactions`
    pub fn category_transactions(budget_id: &str, category_id: &str) -> Self {
        Self::new(
            format!(
                "/budgets/{}/categories/{}/transactions",
                budget_id, category_id
            ),
            "transactions",
        )
    }

    /// `/budgets/{budget_id}/payees/{payee_id}/transactions`
    pub fn payee_transactions(budget_id: &str, payee_id: &str) -> Self {
        Self::new(
            format!("/budgets/{}/payees/{}/transactions", budget_id, payee_id),
            "transactions",
        )
    }
}
