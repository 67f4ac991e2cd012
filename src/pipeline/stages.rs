//! The three stage functions. All share the shape
//! `fn(Receiver<I>, Sender<O>, Arc<PipelineContext>) -> Result<()>`, so any
//! ordered list of them (with matching boundary types) forms a pipeline.

use anyhow::{Result, anyhow};
use crossbeam_channel::{Receiver, Sender};
use log::debug;
use std::sync::Arc;
use std::thread;

use crate::hashing::{checksum, digest};
use crate::pipeline::context::PipelineContext;
use crate::pipeline::runner::run_fanout;

/// Per value `n`, with `d = n.to_string()`: emit
/// `checksum(d) + "~" + checksum(digest(d))`. The digest runs under the
/// run's serial lock; the two checksums run in parallel with each other.
/// Items are processed concurrently, so emission order across items is
/// unspecified — downstream must not assume input order.
pub fn single_hash(
    rx: Receiver<u64>,
    tx: Sender<String>,
    ctx: Arc<PipelineContext>,
) -> Result<()> {
    run_fanout(rx, tx, |n, tx| {
        let data = n.to_string();
        let md = digest(&ctx.digest_lock, &data);
        debug!("{data} single_hash digest {md}");
        let (crc_data, crc_md) = thread::scope(|s| {
            let crc_data = s.spawn(|| checksum(&data));
            let crc_md = s.spawn(|| checksum(&md));
            (crc_data.join(), crc_md.join())
        });
        let crc_data = crc_data.map_err(|_| anyhow!("checksum sub-task panicked"))?;
        let crc_md = crc_md.map_err(|_| anyhow!("checksum sub-task panicked"))?;
        let signature = format!("{crc_data}~{crc_md}");
        debug!("{data} single_hash result {signature}");
        let _ = tx.send(signature);
        Ok(())
    })
}

/// Per value `data`: compute `checksum(i.to_string() + data)` for `i` in
/// 0..6 concurrently, then concatenate the six results in ascending index
/// order (each task writes its own slot, so completion order is irrelevant).
pub fn multi_hash(
    rx: Receiver<String>,
    tx: Sender<String>,
    _ctx: Arc<PipelineContext>,
) -> Result<()> {
    run_fanout(rx, tx, |data, tx| {
        let mut parts: [String; 6] = std::array::from_fn(|_| String::new());
        thread::scope(|s| {
            for (i, slot) in parts.iter_mut().enumerate() {
                let data = data.as_str();
                s.spawn(move || *slot = checksum(&format!("{i}{data}")));
            }
        });
        let signature = parts.concat();
        debug!("{data} multi_hash result {signature}");
        let _ = tx.send(signature);
        Ok(())
    })
}

/// Fold the whole upstream into one string: accumulate until the input
/// closes, sort ascending by byte order, join with `_`. Emits exactly one
/// value (empty when no input arrived). No internal concurrency — this is
/// the only point in the pipeline where order matters, and it is imposed
/// here by the sort.
pub fn combine_results(
    rx: Receiver<String>,
    tx: Sender<String>,
    _ctx: Arc<PipelineContext>,
) -> Result<()> {
    let mut results: Vec<String> = rx.iter().collect();
    results.sort_unstable();
    debug!("combine_results {} inputs", results.len());
    let _ = tx.send(results.join("_"));
    Ok(())
}
