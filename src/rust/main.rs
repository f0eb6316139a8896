use anyhow::Context;
use clap::Parser;
use log::info;
use std::io;
use std::time::Instant;

use sporeprint::cli::{self, Args};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    info!("=== Starting Mushroom Classifier ===");
    let start_time = Instant::now();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    cli::run(&args, &mut out).context("Failed to classify image")?;

    info!("=== Done (took {:.2?}) ===", start_time.elapsed());
    Ok(())
}
