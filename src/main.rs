//! Signet CLI: sign the values 0..COUNT and print the combined signature.

use anyhow::Result;
use clap::Parser;
use signet::cli::Cli;
use signet::logger::setup_logging;
use signet::{SignOpts, sign_with_opts};
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let opts = SignOpts {
        channel_cap: cli.channel_cap,
    };
    let signature = sign_with_opts(0..cli.count, &opts)?;
    println!("{signature}");

    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
