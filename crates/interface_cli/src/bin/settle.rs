//! Settle - Command-Line Binary
//!
//! # Usage
//!
//! ```bash
//! settle --book work_dir/test.csv flow
//! settle --state work_dir/test.json balance
//! SETTLE_DISPLAY_PRECISION=3 settle --state work_dir/test.json flow
//! ```
//!
//! # Environment Variables
//!
//! * `SETTLE_WORKSPACE` - Directory relative paths resolve against (default: .)
//! * `SETTLE_LOG_LEVEL` - Log filter when `RUST_LOG` is unset (default: warn)
//! * `SETTLE_DISPLAY_PRECISION` - Decimal places shown for amounts (default: 2)
//! * `SETTLE_TOLERANCE` - Settlement tolerance (default: 1e-6)

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use interface_cli::{run, Cli, CliConfig};

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = CliConfig::from_env().context("Failed to load SETTLE_* configuration")?;

    init_tracing(cli.log_level.as_deref().unwrap_or(&config.log_level));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli, &config, &mut out)?;
    Ok(())
}

/// Initializes the tracing subscriber, logging to stderr
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
