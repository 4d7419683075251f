use std::time::Duration;
use thiserror::Error;

/// Distinguished run-terminal failures. Anything else that aborts a run is a
/// plain navigation/fetch error propagated through `anyhow`.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("ledger returned zero budgets")]
    NoBudgets,

    #[error("no unapproved or uncategorized ledger transactions for payee filter \"{0}\"")]
    NoApplicableTransactions(String),

    #[error("no ledger transactions matched any scraped purchase")]
    NoMatches,

    #[error("page did not become ready within {0:?}")]
    PageLoadTimeout(Duration),
}
