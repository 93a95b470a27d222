use clap::Parser;
use std::process;
use std::sync::Arc;

use emoji_select::config::{AppState, Config};
use emoji_select::{logger, server, startup};

/// Serve the emoji picker and its selection API
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file name, extension optional (config.json, config.toml, ...)
    #[arg(short, long, default_value = "config")]
    config: String,

    /// Port to listen on, overrides the configuration file
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind, overrides the configuration file
    #[arg(long)]
    host: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut cfg = match Config::load_from(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: failed to load configuration '{}': {e}", cli.config);
            process::exit(1);
        }
    };
    if let Some(port) = cli.port {
        cfg.port = port;
    }
    if let Some(host) = cli.host {
        cfg.host = host;
    }

    if let Err(e) = logger::init(&cfg) {
        eprintln!("Error: failed to open log files: {e}");
        process::exit(1);
    }

    let state = AppState::new(cfg);
    if let Err(e) = startup::prepare(&state) {
        logger::log_startup_failure(&e);
        process::exit(1);
    }

    // Requests are handled on a single thread; file I/O goes through tokio's blocking pool
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let local = tokio::task::LocalSet::new();
    runtime.block_on(local.run_until(server::run(Arc::new(state))))
}
