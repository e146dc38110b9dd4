//! Name-to-identifier resolution and transaction submission
//!
//! `ResourceResolver` turns human-facing names (budget, category, payee) into
//! the identifiers the API expects, and builds outbound transactions.
//!
//! Every lookup scans in the order the API returned items and the first match
//! wins, so duplicate names always resolve to the earliest entry.

use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError, Endpoint, HttpTransport, Transport};
use crate::config::ClientConfig;
use crate::data::{
    self, milliunits, names_match, normalize_date, Account, Budget, CategoryGroup,
    NewTransaction, Payee, SaveTransaction, Transaction,
};

/// Errors that can occur while resolving names or posting transactions
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The caller supplied incomplete or malformed input; no request was made
    /// for the offending operation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The underlying API call failed
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Resolves names to identifiers on top of an `ApiClient`
///
/// The active budget is pinned on first resolution and kept for the lifetime
/// of the resolver.
#[derive(Debug)]
pub struct ResourceResolver<T = HttpTransport> {
    client: ApiClient<T>,
    budget_id: Option<String>,
}

impl ResourceResolver<HttpTransport> {
    /// Create a resolver over a default-configured client
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_client(ApiClient::new(token))
    }

    /// Create a resolver over a client built from `config`
    pub fn with_config(token: impl Into<String>, config: ClientConfig) -> Self {
        Self::with_client(ApiClient::with_config(token, config))
    }
}

impl<T: Transport> ResourceResolver<T> {
    /// Create a resolver over an existing client
    pub fn with_client(client: ApiClient<T>) -> Self {
        Self {
            client,
            budget_id: None,
        }
    }

    /// The underlying API client
    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    /// Mutable access to the client, e.g. to clear its cache
    pub fn client_mut(&mut self) -> &mut ApiClient<T> {
        &mut self.client
    }

    /// The pinned budget id, if one has been resolved or set
    pub fn budget_id(&self) -> Option<&str> {
        self.budget_id.as_deref()
    }

    /// Pins the active budget explicitly
    pub fn set_budget_id(&mut self, budget_id: impl Into<String>) {
        self.budget_id = Some(budget_id.into());
    }

    /// Lists every budget visible to the token
    pub fn get_budgets(&mut self) -> Result<Vec<Budget>, ResolveError> {
        let payload = self.client.get(&Endpoint::budgets(), true)?;
        Ok(data::list_from(payload, "budget"))
    }

    /// Returns the active budget id, resolving and pinning it if needed
    ///
    /// Once pinned the id is returned as-is, whatever `name` asks for.
    /// Otherwise the first budget whose name matches wins, falling back to the
    /// first budget listed. Returns `None` when there are no budgets.
    pub fn get_budget_id(&mut self, name: Option<&str>) -> Result<Option<String>, ResolveError> {
        if let Some(pinned) = &self.budget_id {
            if let Some(name) = name {
                debug!(name, budget_id = %pinned, "budget already pinned; ignoring name");
            }
            return Ok(Some(pinned.clone()));
        }

        let budgets = self.get_budgets()?;
        let by_name = name.and_then(|name| budgets.iter().find(|b| names_match(name, &b.name)));
        if let (Some(name), None) = (name, by_name) {
            debug!(name, "budget name not found; using first budget");
        }

        let resolved = by_name.or_else(|| budgets.first()).map(|b| b.id.clone());
        if let Some(budget_id) = &resolved {
            debug!(budget_id = %budget_id, "pinned budget");
            self.budget_id = Some(budget_id.clone());
        }
        Ok(resolved)
    }

    /// Active budget id, or `None` (logged) when the account has no budgets
    fn active_budget_id(&mut self) -> Result<Option<String>, ResolveError> {
        let budget_id = self.get_budget_id(None)?;
        if budget_id.is_none() {
            warn!("no budget available");
        }
        Ok(budget_id)
    }

    /// Accounts of the active budget; empty when no budget resolves
    pub fn get_accounts(&mut self) -> Result<Vec<Account>, ResolveError> {
        let Some(budget_id) = self.active_budget_id()? else {
            return Ok(Vec::new());
        };
        let payload = self.client.get(&Endpoint::accounts(&budget_id), true)?;
        Ok(data::list_from(payload, "account"))
    }

    /// Category groups of the active budget, each with its categories
    pub fn get_categories(&mut self) -> Result<Vec<CategoryGroup>, ResolveError> {
        let Some(budget_id) = self.active_budget_id()? else {
            return Ok(Vec::new());
        };
        let payload = self.client.get(&Endpoint::categories(&budget_id), true)?;
        Ok(data::list_from(payload, "category group"))
    }

    /// Finds a category id by name
    ///
    /// With `group_name`, only groups with that name are searched.
    pub fn get_category_id(
        &mut self,
        name: &str,
        group_name: Option<&str>,
    ) -> Result<Option<String>, ResolveError> {
        let groups = self.get_categories()?;

        let found = groups
            .iter()
            .filter(|group| group_name.map_or(true, |wanted| names_match(wanted, &group.name)))
            .flat_map(|group| group.categories.iter())
            .find(|category| names_match(name, &category.name))
            .map(|category| category.id.clone());

        if found.is_none() {
            debug!(name, group = ?group_name, "category not found");
        }
        Ok(found)
    }

    /// Payees of the active budget; empty when no budget resolves
    pub fn get_payees(&mut self) -> Result<Vec<Payee>, ResolveError> {
        let Some(budget_id) = self.active_budget_id()? else {
            return Ok(Vec::new());
        };
        let payload = self.client.get(&Endpoint::payees(&budget_id), true)?;
        Ok(data::list_from(payload, "payee"))
    }

    /// Fetches a single payee; `None` if the API does not know it
    pub fn get_payee(&mut self, payee_id: &str) -> Result<Option<Payee>, ResolveError> {
        let Some(budget_id) = self.active_budget_id()? else {
            return Ok(None);
        };
        let payload = self.client.get(&Endpoint::payee(&budget_id, payee_id), true)?;

        match serde_json::from_value(payload) {
            Ok(payee) => Ok(Some(payee)),
            Err(e) => {
                warn!(payee_id, error = %e, "payee response did not contain a payee");
                Ok(None)
            }
        }
    }

    pub fn get_payee_id(&mut self, name: &str) -> Result<Option<String>, ResolveError> {
        let found = self
            .get_payees()?
            .into_iter()
            .find(|payee| names_match(name, &payee.name))
            .map(|payee| payee.id);

        if found.is_none() {
            debug!(name, "payee not found");
        }
        Ok(found)
    }

    /// Transactions of the active budget, optionally narrowed
    ///
    /// `category_id` takes precedence over `payee_id` when both are given.
    pub fn get_transactions(
        &mut self,
        category_id: Option<&str>,
        payee_id: Option<&str>,
    ) -> Result<Vec<Transaction>, ResolveError> {
        let Some(budget_id) = self.active_budget_id()? else {
            return Ok(Vec::new());
        };

        let endpoint = match (category_id, payee_id) {
            (Some(category_id), _) => Endpoint::category_transactions(&budget_id, category_id),
            (None, Some(payee_id)) => Endpoint::payee_transactions(&budget_id, payee_id),
            (None, None) => Endpoint::transactions(&budget_id),
        };

        let payload = self.client.get(&endpoint, true)?;
        Ok(data::list_from(payload, "transaction"))
    }

    /// Creates a transaction in the active budget
    ///
    /// Input is validated before any request is made.
    ///
    /// # Returns
    /// * `Ok(Some(Transaction))` - the transaction as echoed by the API
    /// * `Ok(None)` - the API answered without a transaction (logged)
    /// * `Err(ResolveError::InvalidArgument)` - no payee, bad date or amount,
    ///   or no budget/account to post into
    pub fn post_transaction(
        &mut self,
        txn: NewTransaction,
    ) -> Result<Option<Transaction>, ResolveError> {
        let payee_id = txn.payee_id.filter(|id| !id.is_empty());
        let payee_name = txn.payee_name.filter(|name| !name.is_empty());
        if payee_id.is_none() && payee_name.is_none() {
            return Err(ResolveError::InvalidArgument(
                "payee_id or payee_name is required".to_string(),
            ));
        }

        let amount = milliunits(txn.amount).ok_or_else(|| {
            ResolveError::InvalidArgument(format!("amount {} is out of range", txn.amount))
        })?;
        let date = normalize_date(&txn.date).ok_or_else(|| {
            ResolveError::InvalidArgument(format!("unrecognized date '{}'", txn.date))
        })?;

        let budget_id = self
            .active_budget_id()?
            .ok_or_else(|| ResolveError::InvalidArgument("no budget to post into".to_string()))?;

        let account_id = match txn.account_id {
            Some(account_id) => account_id,
            None => self
                .get_accounts()?
                .into_iter()
                .next()
                .map(|account| account.id)
                .ok_or_else(|| {
                    ResolveError::InvalidArgument("no account to post into".to_string())
                })?,
        };

        let (payee_id, payee_name) = match payee_id {
            Some(id) => (Some(id), None),
            None => (None, payee_name),
        };

        let payload = SaveTransaction {
            account_id,
            date,
            amount,
            payee_id,
            payee_name,
            category_id: txn.category_id,
            memo: txn.memo,
            cleared: txn.cleared.into(),
            approved: txn.approved,
            flag_color: None,
            import_id: None,
        };

        let reply = self.client.post(
            Endpoint::transactions(&budget_id).path(),
            &json!({ "transaction": payload }),
        )?;

        let Some(echoed) = reply.get("data").and_then(|data| data.get("transaction")) else {
            warn!("transaction response had no data.transaction");
            return Ok(None);
        };

        match serde_json::from_value(echoed.clone()) {
            Ok(transaction) => Ok(Some(transaction)),
            Err(e) => {
                warn!(error = %e, "could not read echoed transaction");
                Ok(None)
            }
        }
    }
}
