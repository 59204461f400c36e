use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use swap_pool::app::{self, AppCfg, Command};
use swap_pool::config::{self, Config};

#[derive(Parser, Debug)]
#[command(version, about = "Constant-product token swap pool calculator")]
struct Args {
    /// Path to config file (defaults to ./Config.toml when present)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Pool snapshot file (.json or .toml), overrides config
    #[arg(long, global = true)]
    snapshot: Option<String>,

    /// Print a JSON report instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Log filter, e.g. `debug` (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load base configuration from file if provided or present
    let config_path = args.config.clone().or_else(|| {
        Path::new(config::DEFAULT_CONFIG_FILE)
            .exists()
            .then(|| config::DEFAULT_CONFIG_FILE.to_string())
    });
    let base_config = match &config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    // Priority: CLI args > Config file > Defaults
    let mut app_cfg = AppCfg::from_config(base_config);
    if let Some(snapshot) = args.snapshot {
        app_cfg = AppCfg::from_cli_args(snapshot, app_cfg.json, app_cfg.log_filter);
    }
    if args.json {
        app_cfg.json = true;
    }
    if let Some(filter) = args.log {
        app_cfg.log_filter = filter;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&app_cfg.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = &config_path {
        tracing::debug!("Loaded config from {}", path);
    }

    app::run(app_cfg, args.command)
}
