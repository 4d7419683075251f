use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ----------- Scraped records -----------------

/// One entry from the shopping site's payment-history listing. Carries the
/// amount and order id but no item detail.
#[derive(Clone, Debug, PartialEq)]
pub struct PurchaseRecord {
    pub order_id: String,
    pub payee: String,
    pub order_date: NaiveDate,
    pub amount_cents: i64,
}

/// One entry from the order-history listing. Carries item names but no
/// amount. `item_names` may be empty when the card was unparsable.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderInfo {
    pub order_id: String,
    pub item_names: Vec<String>,
}

/// Join of [`PurchaseRecord`] and [`OrderInfo`] on order id.
#[derive(Clone, Debug, PartialEq)]
pub struct EnrichedPurchase {
    pub order_id: String,
    pub payee: String,
    pub order_date: NaiveDate,
    pub amount_cents: i64,
    pub item_names: Vec<String>,
}

// ----------- Ledger entities -----------------

#[derive(Clone, Debug, Deserialize)]
pub struct Budget {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub last_modified_on: Option<DateTime<Utc>>,
}

/// A record owned by the external budgeting service. Amounts are in
/// milliunits, 1000 per currency unit. We only ever read it and conditionally
/// rewrite its memo.
#[derive(Clone, Debug, Deserialize)]
pub struct LedgerTransaction {
    pub id: String,
    pub date: NaiveDate,
    pub amount: i64,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub payee_name: Option<String>,
}

/// A memo rewrite queued for write-back. Exists only within one run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MemoUpdate {
    pub id: String,
    pub memo: String,
    /// Memo the transaction carried before this run touched it. Not sent to
    /// the service; the write-back guard checks it.
    #[serde(skip)]
    pub prior_memo: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    pub updated: usize,
}
