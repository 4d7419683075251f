use crate::config::config::AppCfg;
use crate::core::error::RunError;
use crate::core::types::RunReport;
use crate::ledger::client::LedgerClient;
use crate::ledger::service;
use crate::reconcile::{join, matcher};
use crate::shop::page::PageClient;
use crate::shop::{orders, parser};
use anyhow::Result;
use chrono::Utc;
use tracing::info;

/// One reconciliation run: scrape, join, fetch, match, write back. Single
/// pass, no retries; the first error aborts the run.
pub struct Pipeline<P, L> {
    page: P,
    ledger: L,
    cfg: AppCfg,
}

impl<P: PageClient, L: LedgerClient> Pipeline<P, L> {
    pub fn new(page: P, ledger: L, cfg: AppCfg) -> Self {
        Self { page, ledger, cfg }
    }

    pub async fn run(&mut self) -> Result<RunReport> {
        info!("Scraping transactions page");
        self.page.navigate(&self.cfg.shop.transactions_url).await?;
        self.page
            .wait_ready(self.cfg.shop.load_poll, self.cfg.shop.load_timeout)
            .await?;
        let html = self.page.document().await?;
        let purchases = parser::parse_transactions(&html);
        info!(count = purchases.len(), "parsed purchase records");

        info!("Paginating order history");
        let order_infos = orders::collect_orders(&mut self.page, &self.cfg.shop).await?;

        let enriched = join::join_orders(purchases, order_infos);
        info!(count = enriched.len(), "joined purchases with order info");

        let budget = service::most_recent_budget(self.ledger.budgets().await?)?;
        info!(budget = %budget.id, "selected most recently modified budget");

        let today = Utc::now().date_naive();
        let candidates = service::applicable_transactions(
            &self.ledger,
            &budget.id,
            self.cfg.ledger.limit_days,
            today,
        )
        .await?;
        if candidates.is_empty() {
            return Err(
                RunError::NoApplicableTransactions(self.cfg.ledger.payee_filter.clone()).into(),
            );
        }

        let needle = self.cfg.ledger.payee_filter.as_str();
        let candidates: Vec<_> = candidates
            .into_iter()
            .filter(|t| t.payee_name.as_deref().is_some_and(|p| p.contains(needle)))
            .collect();
        if candidates.is_empty() {
            return Err(RunError::NoApplicableTransactions(needle.to_string()).into());
        }
        info!(count = candidates.len(), "candidate ledger transactions");

        let updates =
            matcher::build_updates(&enriched, &candidates, self.cfg.ledger.ignore_with_memo)?;

        let updated = service::write_updates(
            &self.ledger,
            &budget.id,
            updates,
            self.cfg.ledger.ignore_with_memo,
        )
        .await?;

        Ok(RunReport { updated })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Budget, LedgerTransaction};
    use crate::ledger::simulator::SimLedgerClient;
    use crate::shop::simulator::SimPage;
    use chrono::{Duration, NaiveDate};
    use std::collections::HashMap;
    use std::time::Duration as StdDuration;

    fn test_cfg() -> AppCfg {
        let mut cfg = AppCfg::default();
        cfg.shop.transactions_url = "https://shop.test/transactions".into();
        cfg.shop.orders_url = "https://shop.test/orders".into();
        cfg.shop.load_poll = StdDuration::from_millis(5);
        cfg.shop.load_timeout = StdDuration::from_millis(50);
        cfg.ledger.access_token = "test-token".into();
        cfg
    }

    fn recent_date() -> NaiveDate {
        Utc::now().date_naive() - Duration::days(3)
    }

    fn transactions_page() -> String {
        let label = recent_date().format("%B %-d, %Y").to_string();
        format!(
            r##"
            <div class="apx-transaction-date-container"><span>{label}</span></div>
            <div>
              <div class="apx-transactions-line-item-component-container">
                <div><a href="#">Order #100-123</a></div>
                <div class="a-text-right"><span>$12.34</span></div>
                <span>Visa ****1111</span>
                <span>Example Store</span>
              </div>
            </div>
            "##
        )
    }

    fn orders_page() -> String {
        r#"
        <div class="order-card">
          <div class="yohtmlc-order-id"><span>Order placed</span><span>100-123</span></div>
          <div class="yohtmlc-product-title">Widget</div>
          <div class="yohtmlc-product-title">Gadget</div>
        </div>
        "#
        .to_string()
    }

    fn sim_page() -> SimPage {
        let mut pages = HashMap::new();
        pages.insert("https://shop.test/transactions".to_string(), transactions_page());
        pages.insert(
            "https://shop.test/orders?startIndex=0".to_string(),
            orders_page(),
        );
        SimPage::new(pages)
    }

    fn ledger_txn(id: &str, amount: i64, memo: Option<&str>, payee: &str) -> LedgerTransaction {
        LedgerTransaction {
            id: id.to_string(),
            date: recent_date(),
            amount,
            memo: memo.map(|s| s.to_string()),
            payee_name: Some(payee.to_string()),
        }
    }

    fn one_budget() -> Vec<Budget> {
        vec![Budget {
            id: "b1".to_string(),
            name: "Household".to_string(),
            last_modified_on: Some(Utc::now()),
        }]
    }

    #[tokio::test]
    async fn test_end_to_end_single_match() {
        let ledger = SimLedgerClient::new(
            one_budget(),
            vec![ledger_txn("t1", 12340, None, "Amazon.com")],
            vec![],
        );
        let mut pipeline = Pipeline::new(sim_page(), ledger, test_cfg());

        let report = pipeline.run().await.unwrap();
        assert_eq!(report.updated, 1);

        let submitted = pipeline.ledger.submitted.lock().unwrap();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].id, "t1");
        assert_eq!(submitted[0].memo, "Widget; Gadget");
    }

    #[tokio::test]
    async fn test_non_matching_payee_is_no_applicable() {
        let ledger = SimLedgerClient::new(
            one_budget(),
            vec![ledger_txn("t1", 12340, None, "Grocery Store")],
            vec![],
        );
        let mut pipeline = Pipeline::new(sim_page(), ledger, test_cfg());

        let err = pipeline.run().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RunError>(),
            Some(RunError::NoApplicableTransactions(_))
        ));
    }

    #[tokio::test]
    async fn test_existing_memo_makes_run_a_noop_error() {
        let ledger = SimLedgerClient::new(
            one_budget(),
            vec![ledger_txn("t1", 12340, Some("kept"), "Amazon.com")],
            vec![],
        );
        let mut pipeline = Pipeline::new(sim_page(), ledger, test_cfg());

        let err = pipeline.run().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RunError>(),
            Some(RunError::NoMatches)
        ));
        assert!(pipeline.ledger.submitted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_zero_budgets_aborts() {
        let ledger = SimLedgerClient::new(vec![], vec![], vec![]);
        let mut pipeline = Pipeline::new(sim_page(), ledger, test_cfg());

        let err = pipeline.run().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RunError>(),
            Some(RunError::NoBudgets)
        ));
    }
}
