use crate::core::error::RunError;
use crate::core::types::{EnrichedPurchase, LedgerTransaction, MemoUpdate};
use anyhow::Result;
use std::collections::HashMap;
use tracing::warn;

/// The service rejects memos longer than this.
pub const MEMO_MAX_CHARS: usize = 200;

/// Match enriched purchases to candidate ledger transactions by amount and
/// build the memo rewrites.
///
/// Matching is amount-only with last-write-wins on duplicate amounts; two
/// same-amount purchases are not disambiguated. Known limitation, kept as
/// documented behavior.
///
/// An empty candidate set or an empty match set is [`RunError::NoMatches`]: a
/// run that would silently do nothing should be visible as an error.
pub fn build_updates(
    purchases: &[EnrichedPurchase],
    candidates: &[LedgerTransaction],
    ignore_with_memo: bool,
) -> Result<Vec<MemoUpdate>> {
    if candidates.is_empty() {
        return Err(RunError::NoMatches.into());
    }

    let mut by_cents: HashMap<i64, &EnrichedPurchase> = HashMap::new();
    for p in purchases {
        by_cents.insert(p.amount_cents, p);
    }

    let mut updates = Vec::new();
    for txn in candidates {
        if ignore_with_memo && txn.memo.as_deref().is_some_and(|m| !m.is_empty()) {
            warn!(id = %txn.id, "transaction already carries a memo, leaving it alone");
            continue;
        }

        // Ledger amounts are milliunits; i64 division truncates toward zero.
        let cents = txn.amount / 10;
        let Some(purchase) = by_cents.get(&cents) else {
            warn!(id = %txn.id, cents, "no scraped purchase for ledger transaction");
            continue;
        };

        let mut memo = purchase.item_names.join("; ");
        if memo.chars().count() > MEMO_MAX_CHARS {
            memo = memo.chars().take(MEMO_MAX_CHARS).collect();
        }

        updates.push(MemoUpdate {
            id: txn.id.clone(),
            memo,
            prior_memo: txn.memo.clone(),
        });
    }

    if updates.is_empty() {
        return Err(RunError::NoMatches.into());
    }
    Ok(updates)
}
