//! Transactions, inbound and outbound
//!
//! `Transaction` is what the API reports. `NewTransaction` is what a caller
//! asks for; `SaveTransaction` is the wire payload built from it once names and
//! defaults have been resolved.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Milliunits per currency unit
const MILLIUNITS_PER_UNIT: i64 = 1000;

/// Accepted formats for dates without an offset
const NAIVE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Clearing state of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearedStatus {
    Cleared,
    Uncleared,
    Reconciled,
}

impl From<bool> for ClearedStatus {
    fn from(cleared: bool) -> Self {
        if cleared {
            ClearedStatus::Cleared
        } else {
            ClearedStatus::Uncleared
        }
    }
}

/// A transaction as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(default)]
    pub date: String,
    /// Amount in milliunits
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub cleared: Option<ClearedStatus>,
    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub payee_id: Option<String>,
    #[serde(default)]
    pub payee_name: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A transaction the caller wants to create
///
/// At least one of `payee_id` and `payee_name` must be set; the id wins when
/// both are. Without an `account_id` the first account of the active budget is
/// used.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub memo: String,
    /// `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` (taken as UTC) or RFC 3339
    pub date: String,
    /// Amount in currency units; negative for outflows
    pub amount: Decimal,
    pub payee_id: Option<String>,
    pub payee_name: Option<String>,
    pub account_id: Option<String>,
    pub category_id: Option<String>,
    pub approved: bool,
    pub cleared: bool,
}

impl NewTransaction {
    /// Creates an approved, cleared transaction with no payee set yet
    pub fn new(memo: impl Into<String>, date: impl Into<String>, amount: Decimal) -> Self {
        Self {
            memo: memo.into(),
            date: date.into(),
            amount,
            payee_id: None,
            payee_name: None,
            account_id: None,
            category_id: None,
            approved: true,
            cleared: true,
        }
    }

    pub fn with_payee_id(mut self, payee_id: impl Into<String>) -> Self {
        self.payee_id = Some(payee_id.into());
        self
    }

    pub fn with_payee_name(mut self, payee_name: impl Into<String>) -> Self {
        self.payee_name = Some(payee_name.into());
        self
    }

    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    pub fn with_category_id(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn with_approved(mut self, approved: bool) -> Self {
        self.approved = approved;
        self
    }

    pub fn with_cleared(mut self, cleared: bool) -> Self {
        self.cleared = cleared;
        self
    }
}

/// Wire payload for creating a transaction
///
/// `flag_color` and `import_id` are always sent as `null`. Only one of the
/// payee fields is ever serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveTransaction {
    pub account_id: String,
    pub date: String,
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee_name: Option<String>,
    pub category_id: Option<String>,
    pub memo: String,
    pub cleared: ClearedStatus,
    pub approved: bool,
    pub flag_color: Option<String>,
    pub import_id: Option<String>,
}

/// Converts currency units to milliunits, truncating toward zero
///
/// Returns `None` when the result does not fit in an `i64`.
pub fn milliunits(amount: Decimal) -> Option<i64> {
    amount
        .checked_mul(Decimal::from(MILLIUNITS_PER_UNIT))?
        .trunc()
        .to_i64()
}

/// Normalizes a caller-supplied date to an RFC 3339 timestamp
///
/// Dates and naive date-times are taken as UTC midnight / UTC. Returns `None`
/// for anything unparseable.
pub fn normalize_date(date: &str) -> Option<String> {
    let date = date.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(date) {
        return Some(parsed.to_rfc3339());
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(date, NAIVE_DATETIME_FORMAT) {
        return Some(parsed.and_utc().to_rfc3339());
    }

    let day = NaiveDate::parse_from_str(date, DATE_FORMAT).ok()?;
    Some(day.and_hms_opt(0, 0, 0)?.and_utc().to_rfc3339())
}
