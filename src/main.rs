mod config;
mod core;
mod ledger;
mod pipeline;
mod reconcile;
mod shop;

use anyhow::Result;
use config::config::AppCfg;
use ledger::http::HttpLedgerClient;
use pipeline::run::Pipeline;
use reqwest::Client;
use shop::page::HttpPage;
use tracing::{error, info, info_span};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    dotenv::dotenv().ok();

    let cfg = AppCfg::load("config.yml")?;

    // Root span for the single reconciliation run
    let span = info_span!(
        "Reconcile",
        pid = %std::process::id(),
        version = env!("CARGO_PKG_VERSION"),
    );
    let _enter = span.enter();

    info!("Starting up");

    info!("Initializing Client");
    let client = Client::builder()
        .user_agent(cfg.http.user_agent.clone())
        .pool_idle_timeout(cfg.http.pool_idle_timeout)
        .pool_max_idle_per_host(cfg.http.pool_max_idle_per_host)
        .tcp_keepalive(cfg.http.tcp_keep_alive)
        .timeout(cfg.http.timeout)
        .build()
        .expect("client");

    let page = HttpPage::new(client.clone());
    let ledger_client = HttpLedgerClient::new(cfg.ledger.clone(), client);

    let mut pipeline = Pipeline::new(page, ledger_client, cfg);
    match pipeline.run().await {
        Ok(report) => {
            info!("Successfully updated {} transaction(s)!", report.updated);
            Ok(())
        }
        Err(e) => {
            error!("Run failed: {e:#}");
            std::process::exit(1);
        }
    }
}
