use crate::core::error::RunError;
use crate::core::types::{Budget, LedgerTransaction, MemoUpdate};
use crate::ledger::client::{LedgerClient, TransactionKind};
use anyhow::Result;
use chrono::NaiveDate;
use tracing::{info, warn};

/// Pick the budget with the latest last-modified timestamp. A budget with no
/// timestamp sorts as older than any budget with one; ties keep the earlier
/// entry.
pub fn most_recent_budget(mut budgets: Vec<Budget>) -> Result<Budget> {
    if budgets.is_empty() {
        return Err(RunError::NoBudgets.into());
    }
    let mut best = 0;
    for i in 1..budgets.len() {
        // Option<DateTime> ordering puts None below every Some.
        if budgets[i].last_modified_on > budgets[best].last_modified_on {
            best = i;
        }
    }
    Ok(budgets.swap_remove(best))
}

/// Union of unapproved and uncategorized transactions, each independently
/// filtered to dates within the trailing `limit_days` window (inclusive
/// boundary). The two fetches run sequentially.
pub async fn applicable_transactions(
    ledger: &dyn LedgerClient,
    budget_id: &str,
    limit_days: i64,
    today: NaiveDate,
) -> Result<Vec<LedgerTransaction>> {
    let cutoff = today - chrono::Duration::days(limit_days);
    let mut out = Vec::new();

    for kind in [TransactionKind::Unapproved, TransactionKind::Uncategorized] {
        let transactions = ledger.transactions_by_kind(budget_id, kind).await?;
        out.extend(transactions.into_iter().filter(|t| t.date >= cutoff));
    }
    Ok(out)
}

/// Submit the batch. With the guard on, updates whose target already carried
/// a memo are dropped first; the matcher applies the same rule, this is
/// defense in depth. An all-filtered batch skips the network call entirely.
pub async fn write_updates(
    ledger: &dyn LedgerClient,
    budget_id: &str,
    mut updates: Vec<MemoUpdate>,
    ignore_with_memo: bool,
) -> Result<usize> {
    if ignore_with_memo {
        updates.retain(|u| {
            let keep = u.prior_memo.as_deref().map_or(true, |m| m.is_empty());
            if !keep {
                warn!(id = %u.id, "target transaction already has a memo, not overwriting");
            }
            keep
        });
    }

    if updates.is_empty() {
        info!("nothing left to write after memo guard");
        return Ok(0);
    }

    let count = updates.len();
    ledger.update_transactions(budget_id, updates).await?;
    Ok(count)
}
