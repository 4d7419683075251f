use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppCfg {
    #[serde(default)]
    pub http: HttpCfg,
    #[serde(default)]
    pub shop: ShopCfg,
    #[serde(default)]
    pub ledger: LedgerCfg,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpCfg {
    #[serde(rename = "userAgent", default = "default_ua")]
    pub user_agent: String,
    #[serde(with = "humantime_serde", default = "default_timeout")]
    pub timeout: Duration,
    #[serde(
        rename = "poolIdleTimeout",
        with = "humantime_serde",
        default = "default_pool_idle"
    )]
    pub pool_idle_timeout: Duration,
    #[serde(
        rename = "tcpKeepAlive",
        with = "humantime_serde",
        default = "default_keep_alive"
    )]
    pub tcp_keep_alive: Duration,
    #[serde(rename = "poolMaxIdlePerHost", default = "default_pool")]
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpCfg {
    fn default() -> Self {
        Self {
            user_agent: default_ua(),
            timeout: default_timeout(),
            pool_idle_timeout: default_pool_idle(),
            tcp_keep_alive: default_keep_alive(),
            pool_max_idle_per_host: default_pool(),
        }
    }
}
fn default_ua() -> String {
    "ordermemo/0.1".into()
}
fn default_timeout() -> Duration {
    Duration::from_secs(10)
}
fn default_pool_idle() -> Duration {
    Duration::from_secs(90)
}
fn default_keep_alive() -> Duration {
    Duration::from_secs(60)
}
fn default_pool() -> usize {
    16
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShopCfg {
    #[serde(rename = "transactionsUrl", default = "default_transactions_url")]
    pub transactions_url: String,
    #[serde(rename = "ordersUrl", default = "default_orders_url")]
    pub orders_url: String,
    /// The order listing advances its startIndex query parameter in steps of
    /// this size.
    #[serde(rename = "pageSize", default = "default_page_size")]
    pub page_size: u32,
    #[serde(rename = "maxOrders", default = "default_max_orders")]
    pub max_orders: usize,
    #[serde(
        rename = "loadPoll",
        with = "humantime_serde",
        default = "default_load_poll"
    )]
    pub load_poll: Duration,
    #[serde(
        rename = "loadTimeout",
        with = "humantime_serde",
        default = "default_load_timeout"
    )]
    pub load_timeout: Duration,
}

impl Default for ShopCfg {
    fn default() -> Self {
        Self {
            transactions_url: default_transactions_url(),
            orders_url: default_orders_url(),
            page_size: default_page_size(),
            max_orders: default_max_orders(),
            load_poll: default_load_poll(),
            load_timeout: default_load_timeout(),
        }
    }
}
fn default_transactions_url() -> String {
    "https://www.amazon.com/cpe/yourpayments/transactions".to_string()
}
fn default_orders_url() -> String {
    "https://www.amazon.com/your-orders/orders?_encoding=UTF8&ref=nav_orders_first".to_string()
}
fn default_page_size() -> u32 {
    10
}
fn default_max_orders() -> usize {
    50
}
fn default_load_poll() -> Duration {
    Duration::from_millis(250)
}
fn default_load_timeout() -> Duration {
    Duration::from_secs(10)
}

#[derive(Debug, Deserialize, Clone)]
pub struct LedgerCfg {
    #[serde(rename = "baseUrl", default = "default_ledger_url")]
    pub base_url: String,
    #[serde(default)]
    pub access_token: String,
    /// Only ledger transactions dated within this trailing window are
    /// considered for matching.
    #[serde(rename = "limitDays", default = "default_limit_days")]
    pub limit_days: i64,
    /// Candidate transactions must carry a payee name containing this needle.
    #[serde(rename = "payeeFilter", default = "default_payee_filter")]
    pub payee_filter: String,
    /// Never overwrite a memo that is already present.
    #[serde(rename = "ignoreWithMemo", default = "default_true")]
    pub ignore_with_memo: bool,
}

impl Default for LedgerCfg {
    fn default() -> Self {
        Self {
            base_url: default_ledger_url(),
            access_token: "".to_string(),
            limit_days: default_limit_days(),
            payee_filter: default_payee_filter(),
            ignore_with_memo: true,
        }
    }
}
fn default_ledger_url() -> String {
    "https://api.ynab.com/v1".to_string()
}
fn default_limit_days() -> i64 {
    60
}
fn default_payee_filter() -> String {
    "Amazon".to_string()
}
fn default_true() -> bool {
    true
}

impl AppCfg {
    pub fn load(path: &str) -> Result<Self> {
        let cfg = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(config::Environment::default().separator("__"))
            .build()
            .context("building config")?;

        let app: AppCfg = cfg.try_deserialize().context("deserializing config")?;
        app.validate()?;
        Ok(app)
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.shop.transactions_url.is_empty(),
            "shop.transactionsUrl missing"
        );
        anyhow::ensure!(!self.shop.orders_url.is_empty(), "shop.ordersUrl missing");
        anyhow::ensure!(self.shop.page_size > 0, "shop.pageSize must be > 0");
        anyhow::ensure!(self.shop.max_orders > 0, "shop.maxOrders must be > 0");
        anyhow::ensure!(!self.ledger.base_url.is_empty(), "ledger.baseUrl missing");
        anyhow::ensure!(
            !self.ledger.access_token.is_empty(),
            "ledger.access_token missing (set LEDGER__ACCESS_TOKEN)"
        );
        anyhow::ensure!(self.ledger.limit_days > 0, "ledger.limitDays must be > 0");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_env_var_override() {
        env::set_var("LEDGER__ACCESS_TOKEN", "token-abc");

        let cfg = Config::builder()
            .add_source(config::Environment::default().separator("__"))
            .build()
            .unwrap();

        let val = cfg.get_string("ledger.access_token").unwrap();
        assert_eq!(val, "token-abc");

        env::remove_var("LEDGER__ACCESS_TOKEN");
    }

    #[test]
    fn test_defaults_validate_except_token() {
        let mut cfg = AppCfg::default();
        assert!(cfg.validate().is_err());

        cfg.ledger.access_token = "t".into();
        cfg.validate().unwrap();
        assert_eq!(cfg.shop.max_orders, 50);
        assert_eq!(cfg.ledger.limit_days, 60);
        assert!(cfg.ledger.ignore_with_memo);
    }
}
