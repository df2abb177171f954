//! FLIPPER — Auction house flip detection engine
//!
//! Entry point. Loads configuration, initialises structured logging, and
//! runs the fetch→detect refresh loop until Ctrl+C.

use anyhow::Result;
use std::time::Duration;
use tracing::{error, info};

use flipper::config;
use flipper::engine::estimator::MarketPriceEstimator;
use flipper::engine::fees::FeeSchedule;
use flipper::engine::{CycleReport, FlipEngine, FlipScanner};
use flipper::lore::ModifierExtractor;
use flipper::source::hypixel::HypixelClient;

const BANNER: &str = r#"
 _____ _     ___ ____  ____  _____ ____
|  ___| |   |_ _|  _ \|  _ \| ____|  _ \
| |_  | |    | || |_) | |_) |  _| | |_) |
|  _| | |___ | ||  __/|  __/| |___|  _ <
|_|   |_____|___|_|   |_|   |_____|_| \_\

  Auction house flip detection engine
  v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cfg = config::AppConfig::load("config.toml")?;

    init_logging();

    println!("{BANNER}");
    info!(
        scanner_name = %cfg.scanner.name,
        refresh_interval_secs = cfg.scanner.refresh_interval_secs,
        profit_threshold = %cfg.engine.profit_threshold,
        min_buy_price = %cfg.engine.min_buy_price,
        "FLIPPER starting up"
    );

    // -- Initialise components -------------------------------------------

    let source = HypixelClient::new(&cfg.source)?;
    let engine = FlipEngine::new(
        cfg.engine.to_engine_config(),
        ModifierExtractor::default(),
        MarketPriceEstimator::new(cfg.estimator.to_estimator_config()),
        FeeSchedule::default(),
    );
    let mut scanner = FlipScanner::new(Box::new(source), engine);

    // -- Main loop -------------------------------------------------------

    let refresh = Duration::from_secs(cfg.scanner.refresh_interval_secs);
    let mut interval = tokio::time::interval(refresh);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!(
        interval_secs = cfg.scanner.refresh_interval_secs,
        "Entering main loop. Press Ctrl+C to stop."
    );

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match scanner.run_cycle().await {
                    Ok(report) => log_cycle_report(&report, cfg.scanner.max_logged_flips),
                    Err(e) => {
                        error!(error = %e, "Cycle failed, keeping previous results");
                    }
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received.");
                break;
            }
        }
    }

    info!(cycles = scanner.cycle_count(), "FLIPPER shut down cleanly.");
    Ok(())
}

/// Log a cycle summary followed by the best flips.
fn log_cycle_report(report: &CycleReport, max_logged_flips: usize) {
    let s = &report.summary;
    info!(
        cycle = report.cycle_number,
        listings = report.listings_fetched,
        commodities = report.commodities_priced,
        active = s.active_listings,
        groups = s.groups,
        flips = s.flips,
        below_min_price = s.below_min_price,
        no_estimate = s.no_market_estimate,
        market_not_above_buy = s.market_not_above_buy,
        below_threshold = s.below_profit_threshold,
        "Cycle complete"
    );

    for flip in report.top_flips(max_logged_flips) {
        info!(
            id = %flip.id,
            name = %flip.name,
            rarity = %flip.rarity,
            buy = %flip.buy_price,
            market = %flip.market_price,
            profit = flip.profit,
            worth = ?flip.estimated_worth,
            worth_profit = ?flip.worth_profit,
            "Flip"
        );
    }
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("flipper=info"));

    let json_logging = std::env::var("FLIPPER_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
