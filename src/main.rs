use anyhow::{Context, Result};
use jiraboard::backend::HttpBackend;
use jiraboard::config::Config;
use jiraboard::logger::Logger;
use jiraboard::ui;
use log::info;
use std::sync::Arc;

fn print_usage() {
    println!("Usage: jiraboard [--generate-config [PATH]]");
    println!();
    println!("Options:");
    println!("  --generate-config [PATH]  Write a default configuration file and exit");
    println!("  -h, --help                Show this help");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("--generate-config") => {
            let path = match args.get(1) {
                Some(path) => path.into(),
                None => Config::get_default_config_path()?,
            };
            return Config::generate_default_config(path);
        }
        Some("-h") | Some("--help") => {
            print_usage();
            return Ok(());
        }
        Some(other) => {
            eprintln!("❌ Error: unknown argument '{}'\n", other);
            print_usage();
            std::process::exit(2);
        }
        None => {}
    }

    let config = Config::load().context("Failed to load configuration")?;

    let logger = Logger::from_config(config.logging.enabled)?;
    logger.install(log::LevelFilter::Debug)?;
    if let Some(path) = logger.file_path() {
        info!("Logging to {}", path.display());
    }

    let backend = HttpBackend::new(&config.api.base_url, config.api.timeout())
        .context("Failed to create backend client")?;
    info!("Using backend at {}", backend.base_url());

    ui::run_app(config, Arc::new(backend), logger).await
}
