use anyhow::Context;
use clap::Parser;
use tokio::runtime::Runtime;

use market_view::{Cli, build_provider, run};

fn main() -> anyhow::Result<()> {
    // A. Init Logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::debug!("Parsed arguments: {:?}", args);

    // C. Fetch and analyse (Blocking)
    let rt = Runtime::new().context("Failed to create Tokio runtime")?;
    let provider = build_provider(&args)?;
    let output = rt.block_on(run(&args, provider.as_ref()))?;

    println!("{}", output);
    Ok(())
}
