use anyhow::Result;
use clap::Parser;
use log::info;
use subsheets::cli::{Cli, commands};
use subsheets::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Log to file, truncated on each run
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("subsheets.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }
    info!("Starting subsheets {}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    let ok = commands::dispatch(cli, config).await?;

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
