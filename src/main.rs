use anyhow::Result;
use clap::Parser;
use std::fs;
use std::path::Path;

use coinflip_backend::{services, settings};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config.toml")]
    config: String,
    #[arg(long, default_value = "log4rs.yaml")]
    log4rs: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = settings::Settings::load(&args.config).expect("Could not load config file.");

    init_logging(&args.log4rs).expect("Failed to initialize logging.");
    log::info!("Starting coinflip backend.");

    services::start_services(settings).await?;

    Ok(())
}

fn init_logging(path: &str) -> Result<(), anyhow::Error> {
    if !Path::new("logs").exists() {
        fs::create_dir("logs")?;
    }

    match log4rs::init_file(path, Default::default()) {
        Ok(_) => Ok(()),
        Err(e) => Err(anyhow::anyhow!("Could not initialize logging: {}", e)),
    }
}
