use crate::config::config::ShopCfg;
use crate::core::types::OrderInfo;
use crate::shop::page::PageClient;
use crate::shop::parser;
use anyhow::Result;
use tracing::info;

/// Walk the order-history listing page by page until `maxOrders` records have
/// accumulated or a page comes back empty. The result may overshoot the
/// target by up to one page; callers needing an exact cap truncate downstream.
///
/// A navigation failure or load timeout on any page aborts the whole run.
pub async fn collect_orders(page: &mut dyn PageClient, cfg: &ShopCfg) -> Result<Vec<OrderInfo>> {
    let mut orders: Vec<OrderInfo> = Vec::new();
    let mut start_index: u32 = 0;

    loop {
        let url = page_url(&cfg.orders_url, start_index);
        page.navigate(&url).await?;
        page.wait_ready(cfg.load_poll, cfg.load_timeout).await?;
        let html = page.document().await?;

        let new_orders = parser::parse_orders(&html);
        info!(start_index, count = new_orders.len(), "parsed order page");

        if new_orders.is_empty() {
            break; // end of listing
        }
        orders.extend(new_orders);
        if orders.len() >= cfg.max_orders {
            break;
        }
        start_index += cfg.page_size;
    }

    Ok(orders)
}

fn page_url(base: &str, start_index: u32) -> String {
    let sep = if base.contains('?') { '&' } else { '?' };
    format!("{base}{sep}startIndex={start_index}")
}
