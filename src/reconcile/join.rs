use crate::core::types::{EnrichedPurchase, OrderInfo, PurchaseRecord};
use std::collections::HashMap;
use tracing::warn;

/// Inner-join purchase records with order info on order id. Order ids key a
/// single-valued map, so a duplicated id in the source keeps the last card.
/// Purchases with no matching order drop with a diagnostic; the two listings'
/// pagination windows rarely align perfectly and this is expected.
pub fn join_orders(
    purchases: Vec<PurchaseRecord>,
    orders: Vec<OrderInfo>,
) -> Vec<EnrichedPurchase> {
    let mut items_by_id: HashMap<String, Vec<String>> = HashMap::new();
    for order in orders {
        items_by_id.insert(order.order_id, order.item_names);
    }

    let mut enriched = Vec::new();
    for p in purchases {
        match items_by_id.get(&p.order_id) {
            Some(item_names) => enriched.push(EnrichedPurchase {
                order_id: p.order_id,
                payee: p.payee,
                order_date: p.order_date,
                amount_cents: p.amount_cents,
                item_names: item_names.clone(),
            }),
            None => {
                warn!(order_id = %p.order_id, "no order info for purchase, dropping");
            }
        }
    }
    enriched
}
