use crate::config::config::LedgerCfg;
use crate::core::types::{Budget, LedgerTransaction, MemoUpdate};
use crate::ledger::client::{LedgerClient, TransactionKind};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

// The service wraps every response in a {"data": ...} envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct BudgetsPayload {
    budgets: Vec<Budget>,
}

#[derive(Debug, Deserialize)]
struct TransactionsPayload {
    transactions: Vec<LedgerTransaction>,
}

#[derive(Debug, Serialize)]
struct UpdateRequest {
    transactions: Vec<MemoUpdate>,
}

/// Client for the budgeting service's HTTP API, authenticated with a bearer
/// credential. Monetary amounts are exchanged in milliunits.
pub struct HttpLedgerClient {
    client: Client,
    cfg: LedgerCfg,
}

impl HttpLedgerClient {
    pub fn new(cfg: LedgerCfg, client: Client) -> Self {
        Self { client, cfg }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.cfg.base_url, path)
    }
}

#[async_trait]
impl LedgerClient for HttpLedgerClient {
    async fn budgets(&self) -> Result<Vec<Budget>> {
        let resp = self
            .client
            .get(self.url("/budgets"))
            .bearer_auth(&self.cfg.access_token)
            .send()
            .await
            .context("requesting budgets")?
            .error_for_status()
            .context("non-success status for budgets request")?
            .json::<Envelope<BudgetsPayload>>()
            .await
            .context("parsing budgets response")?;
        Ok(resp.data.budgets)
    }

    async fn transactions_by_kind(
        &self,
        budget_id: &str,
        kind: TransactionKind,
    ) -> Result<Vec<LedgerTransaction>> {
        let resp = self
            .client
            .get(self.url(&format!("/budgets/{budget_id}/transactions")))
            .query(&[("type", kind.as_query())])
            .bearer_auth(&self.cfg.access_token)
            .send()
            .await
            .with_context(|| format!("requesting {} transactions", kind.as_query()))?
            .error_for_status()
            .with_context(|| format!("non-success status for {} transactions", kind.as_query()))?
            .json::<Envelope<TransactionsPayload>>()
            .await
            .context("parsing transactions response")?;
        Ok(resp.data.transactions)
    }

    async fn update_transactions(&self, budget_id: &str, updates: Vec<MemoUpdate>) -> Result<()> {
        self.client
            .patch(self.url(&format!("/budgets/{budget_id}/transactions")))
            .bearer_auth(&self.cfg.access_token)
            .json(&UpdateRequest {
                transactions: updates,
            })
            .send()
            .await
            .context("submitting transaction updates")?
            .error_for_status()
            .context("non-success status for transaction update")?;
        Ok(())
    }
}
