use crate::core::types::{Budget, LedgerTransaction, MemoUpdate};
use anyhow::Result;
use async_trait::async_trait;

/// The two transaction listings the matcher draws candidates from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionKind {
    Unapproved,
    Uncategorized,
}

impl TransactionKind {
    pub fn as_query(self) -> &'static str {
        match self {
            TransactionKind::Unapproved => "unapproved",
            TransactionKind::Uncategorized => "uncategorized",
        }
    }
}

#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn budgets(&self) -> Result<Vec<Budget>>;

    async fn transactions_by_kind(
        &self,
        budget_id: &str,
        kind: TransactionKind,
    ) -> Result<Vec<LedgerTransaction>>;

    /// Submit a batch of memo rewrites.
    async fn update_transactions(&self, budget_id: &str, updates: Vec<MemoUpdate>) -> Result<()>;
}
