mod api;
mod config;
mod errors;
mod logging;
mod security;
mod server;
mod store;

use crate::config::Config;
use anyhow::Context;
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let mut config_path = PathBuf::from("labelkit.toml");
    let mut explicit = false;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                if i >= args.len() { eprintln!("--config requires a path"); std::process::exit(2); }
                config_path = PathBuf::from(&args[i]);
                explicit = true;
            }
            other => {
                eprintln!("unknown argument: {other}");
                std::process::exit(2);
            }
        }
        i += 1;
    }

    let cfg = if explicit { Config::load(&config_path) } else { Config::load_or_default(&config_path) }
        .with_context(|| format!("loading config {}", config_path.display()))?;
    logging::init(cfg.logging.format);
    cfg.validate().context("validating config")?;

    info!(
        bind = %cfg.server.bind_addr,
        port = cfg.server.port,
        symlink_check = cfg.paths.symlink_check,
        max_label_kb = cfg.limits.max_label_kb,
        "labelkit starting"
    );

    server::serve(cfg).await
}
