use crate::core::types::{OrderInfo, PurchaseRecord};
use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

const ORDER_ID_PREFIX: &str = "Order #";

fn text_of(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn next_element_sibling<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    let mut node = el.next_sibling();
    while let Some(n) = node {
        if let Some(found) = ElementRef::wrap(n) {
            return Some(found);
        }
        node = n.next_sibling();
    }
    None
}

/// Date-group labels read like "July 5, 2024"; some locales abbreviate the
/// month.
fn parse_label_date(label: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(label, "%B %d, %Y")
        .or_else(|_| NaiveDate::parse_from_str(label, "%b %d, %Y"))
        .ok()
}

/// Parse the payment-history page into purchase records.
///
/// Anything that is missing where the markup usually has it skips that one
/// record with a diagnostic. A malformed document yields partial results,
/// never an error.
pub fn parse_transactions(html: &str) -> Vec<PurchaseRecord> {
    let doc = Html::parse_document(html);
    let sel_date_group = Selector::parse(".apx-transaction-date-container").unwrap();
    let sel_span = Selector::parse("span").unwrap();
    let sel_line_item = Selector::parse(".apx-transactions-line-item-component-container").unwrap();
    let sel_order_link = Selector::parse("a").unwrap();
    let sel_price = Selector::parse(".a-text-right span").unwrap();

    let mut records = Vec::new();

    for group in doc.select(&sel_date_group) {
        let Some(label) = group.select(&sel_span).next().map(|s| text_of(s)) else {
            warn!("date group without a label span, skipping group");
            continue;
        };
        let Some(order_date) = parse_label_date(&label) else {
            warn!(%label, "unparsable date label, skipping group");
            continue;
        };

        // Line items live in the sibling container that follows the label.
        let Some(line_items) = next_element_sibling(group) else {
            warn!(%order_date, "date group without a line item container");
            continue;
        };

        for line in line_items.select(&sel_line_item) {
            let Some(order_id) = line.select(&sel_order_link).next().map(|a| {
                let t = text_of(a);
                t.strip_prefix(ORDER_ID_PREFIX).unwrap_or(&t).to_string()
            }) else {
                warn!("line item without an order link, skipping");
                continue;
            };

            let Some(price_text) = line.select(&sel_price).next().map(|s| text_of(s)) else {
                warn!(%order_id, "line item without a price, skipping");
                continue;
            };
            // "$12.34" -> "1234": the decimal point is discarded, not scaled,
            // matching the two-decimal display convention. '-' survives so
            // refunds keep their sign.
            let digits: String = price_text
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '-')
                .collect();
            let Ok(amount_cents) = digits.parse::<i64>() else {
                warn!(%order_id, %price_text, "unparsable price, skipping");
                continue;
            };

            // Third inline span is the merchant; gift-card style payments
            // render without one.
            let Some(payee) = line.select(&sel_span).nth(2).map(|s| text_of(s)) else {
                warn!(%order_id, "no payee information, skipping transaction");
                continue;
            };

            records.push(PurchaseRecord {
                order_id,
                payee,
                order_date,
                amount_cents,
            });
        }
    }

    records
}

/// Parse the order-history page into order cards. A card missing its id
/// degrades to an empty-string id rather than being dropped.
pub fn parse_orders(html: &str) -> Vec<OrderInfo> {
    let doc = Html::parse_document(html);
    let sel_card = Selector::parse(".order-card").unwrap();
    let sel_order_id = Selector::parse(".yohtmlc-order-id span:nth-child(2)").unwrap();
    let sel_title = Selector::parse(".yohtmlc-product-title").unwrap();

    let mut orders = Vec::new();

    for card in doc.select(&sel_card) {
        let order_id = match card.select(&sel_order_id).next() {
            Some(el) => text_of(el),
            None => {
                warn!("order card without an order id");
                String::new()
            }
        };
        let item_names = card.select(&sel_title).map(|t| text_of(t)).collect();
        orders.push(OrderInfo {
            order_id,
            item_names,
        });
    }

    orders
}
