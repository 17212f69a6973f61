mod config;
mod execution;
mod market;
mod monitoring;
mod session;
mod shell;
mod tool;

use anyhow::{Context, Result};
use chrono::Utc;
use config::{Config, EnvConfig};
use monitoring::logger::CsvLogger;
use serde_json::{json, Value};
use session::store::SessionStore;
use shell::Shell;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const CLI_SESSION: &str = "cli";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Market simulator starting...");

    // Load configuration
    let env_config = EnvConfig::load()?;
    let mut config = Config::load(&env_config.config_path)?;
    if let Some(base_url) = &env_config.widget_base_url {
        config.widget.base_url = base_url.clone();
    }

    tracing::info!("Impact: {} shares per unit probability, cap {:.2}", config.impact.shares_per_unit, config.impact.max_impact);
    match config.order.max_order_size {
        Some(limit) => tracing::info!("Max order size: {:.1} shares", limit),
        None => tracing::info!("Max order size: unlimited"),
    }

    // Market label: first CLI argument, then $MARKET
    let label = std::env::args().nth(1).or_else(|| env_config.market.clone());
    let args = match &label {
        Some(market) => json!({ "market": market }),
        None => Value::Null,
    };
    let launch = tool::launch::invoke(args, &config, Utc::now())?;
    println!("{}", launch.text);
    println!(
        "{}",
        serde_json::to_string_pretty(&launch.structured).context("Failed to encode launch payload")?
    );

    let journal = if config.monitoring.csv_logging {
        tracing::info!("Trade journal: {}", config.monitoring.csv_log_path);
        Some(CsvLogger::new(config.monitoring.csv_log_path.clone())?)
    } else {
        None
    };

    let store = SessionStore::new(config);
    store.insert(CLI_SESSION, launch.session);
    let mut shell = Shell::new(store, CLI_SESSION, journal)?;

    println!("{}", shell.handle("quote").text);
    println!("{}", shell::render::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                let reply = shell.handle(&line);
                println!("{}", reply.text);
                if reply.quit {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    if let Some(session) = shell.close() {
        tracing::info!(
            "Final state: cash ${:.2}, {:.1} YES, {:.1} NO, YES at {:.3}",
            session.account.cash,
            session.account.shares_yes,
            session.account.shares_no,
            session.market.yes_probability()
        );
    }
    tracing::info!("Shutting down...");

    Ok(())
}
