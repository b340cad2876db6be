//! Process bootstrap for the P2P SIP call daemon (spec.md §6): CLI parsing,
//! PID-file locking, config load, and structured logging setup. This
//! binary currently stops at getting a loaded [`Config`] onto a running
//! Tokio runtime; wiring the SIP/RTP/ICE call director onto that runtime
//! is tracked separately (see DESIGN.md).

mod config;
mod logging;
mod pidfile;

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use config::Config;
use pidfile::PidFile;

/// `rvoip-daemon [--port=<n>]`; absent arguments boot the daemon with the
/// persisted config's port (spec.md §6).
#[derive(Parser, Debug)]
#[command(name = "rvoip-daemon")]
#[command(about = "P2P SIP call daemon")]
struct Args {
    /// Overrides the SIP listener port from the persisted config.
    #[arg(long)]
    port: Option<u16>,

    /// Path to the YAML config file. Defaults to
    /// `$XDG_CONFIG_HOME/rvoip/rvoip.yaml`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rvoip")
        .join("rvoip.yaml")
}

fn run(args: Args) -> anyhow::Result<()> {
    logging::install(&args.log_level)?;
    logging::log_welcome("rvoip-daemon", env!("CARGO_PKG_VERSION"));

    let config_path = args.config.unwrap_or_else(default_config_path);
    let mut config = Config::load_or_default(&config_path)?;
    if let Some(port) = args.port {
        config.voip_link.sip_port = port;
    }

    let _pidfile = PidFile::acquire(&pidfile::cache_dir()).map_err(|e| {
        error!("{}", e);
        anyhow::anyhow!(e)
    })?;

    info!(
        "loaded {} account(s), listening on port {}",
        config.accounts.list.len(),
        config.voip_link.sip_port
    );
    for account in config.ordered_accounts() {
        info!("account {} -> {}@{}", account.id, account.username, account.hostname);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async move {
        info!("rvoip-daemon bootstrap complete, entering manager loop");
        tokio::signal::ctrl_c().await.ok();
        info!("shutdown signal received");
    });

    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
