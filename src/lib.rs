//! Signet: concurrent hash-signing pipeline over bounded channels.
//!
//! Values flow through three stages, each a long-lived worker connected to
//! the next by a bounded channel: [`single_hash`] fans each value out to a
//! serialized MD5 digest plus two parallel CRC32-C checksums, [`multi_hash`]
//! derives six more checksums per intermediate value, and
//! [`combine_results`] folds everything into one sorted, `_`-joined
//! signature string.

pub mod cli;
pub mod hashing;
pub mod logger;
pub mod pipeline;

pub use pipeline::{
    CHANNEL_CAP, Pipeline, PipelineContext, SerialLock, SignOpts, combine_results, multi_hash,
    single_hash,
};

use std::sync::Arc;

/// Result alias used by the public signet API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Sign `values` through the full pipeline with default options.
pub fn sign<I>(values: I) -> Result<String>
where
    I: IntoIterator<Item = u64> + Send + 'static,
{
    sign_with_opts(values, &SignOpts::default())
}

/// Sign `values` through [`single_hash`] → [`multi_hash`] →
/// [`combine_results`]. All coordination state (the serial digest lock, the
/// channels) is created here per call, so concurrent runs are independent.
pub fn sign_with_opts<I>(values: I, opts: &SignOpts) -> Result<String>
where
    I: IntoIterator<Item = u64> + Send + 'static,
{
    let ctx = Arc::new(PipelineContext::new(opts));
    Pipeline::source(ctx, values)
        .stage("single_hash", single_hash)
        .stage("multi_hash", multi_hash)
        .stage("combine_results", combine_results)
        .collect_one()
}
