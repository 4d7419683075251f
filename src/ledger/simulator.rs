use crate::core::types::{Budget, LedgerTransaction, MemoUpdate};
use crate::ledger::client::{LedgerClient, TransactionKind};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;

/// Serves canned budgets and transactions and records every submitted batch.
pub struct SimLedgerClient {
    budgets: Vec<Budget>,
    unapproved: Vec<LedgerTransaction>,
    uncategorized: Vec<LedgerTransaction>,
    pub submitted: Mutex<Vec<MemoUpdate>>,
}

impl SimLedgerClient {
    pub fn new(
        budgets: Vec<Budget>,
        unapproved: Vec<LedgerTransaction>,
        uncategorized: Vec<LedgerTransaction>,
    ) -> Self {
        Self {
            budgets,
            unapproved,
            uncategorized,
            submitted: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LedgerClient for SimLedgerClient {
    async fn budgets(&self) -> Result<Vec<Budget>> {
        Ok(self.budgets.clone())
    }

    async fn transactions_by_kind(
        &self,
        _budget_id: &str,
        kind: TransactionKind,
    ) -> Result<Vec<LedgerTransaction>> {
        Ok(match kind {
            TransactionKind::Unapproved => self.unapproved.clone(),
            TransactionKind::Uncategorized => self.uncategorized.clone(),
        })
    }

    async fn update_transactions(&self, _budget_id: &str, updates: Vec<MemoUpdate>) -> Result<()> {
        self.submitted.lock().unwrap().extend(updates);
        Ok(())
    }
}
