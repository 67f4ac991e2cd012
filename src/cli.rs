use clap::Parser;

use crate::pipeline::CHANNEL_CAP;

struct DefaultArgs;

impl DefaultArgs {
    pub const COUNT: u64 = 10;
}

/// Concurrent hash-signing pipeline.
#[derive(Clone, Parser)]
#[command(name = "signet")]
#[command(about = "Sign the values 0..COUNT and print the combined signature.")]
pub struct Cli {
    /// How many values to feed: the input domain is 0..COUNT.
    #[arg(value_name = "COUNT", default_value_t = DefaultArgs::COUNT)]
    pub count: u64,

    /// Capacity of each inter-stage channel.
    #[arg(long, default_value_t = CHANNEL_CAP)]
    pub channel_cap: usize,

    /// Verbose output (per-item hash steps at debug level).
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
