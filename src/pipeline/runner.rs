//! Generic fan-out harness: blocking input consumption, one scoped task per
//! item, full join before the stage returns.

use anyhow::Result;
use crossbeam_channel::{Receiver, Sender};
use std::sync::Mutex;
use std::thread;

/// Run a fan-out stage body: read `rx` until it is closed and drained,
/// spawn one task per item, and return only after every spawned task has
/// finished (the scope exit is the join barrier).
///
/// `tx` is consumed here and dropped on return, after the barrier — the
/// stage's output closes exactly once and never while a task may still
/// write. A per-item send error means every downstream receiver is gone
/// (a later stage failed); items treat that as shutdown, not an error.
/// The first per-item error is recorded and returned as the stage result.
pub fn run_fanout<I, O, F>(rx: Receiver<I>, tx: Sender<O>, per_item: F) -> Result<()>
where
    I: Send,
    O: Send,
    F: Fn(I, &Sender<O>) -> Result<()> + Sync,
{
    let first_error: Mutex<Option<anyhow::Error>> = Mutex::new(None);
    thread::scope(|s| {
        // recv() blocks until an item arrives or the channel is closed;
        // end of input is the only termination signal.
        while let Ok(item) = rx.recv() {
            let tx = tx.clone();
            let per_item = &per_item;
            let first_error = &first_error;
            s.spawn(move || {
                if let Err(err) = per_item(item, &tx) {
                    first_error.lock().unwrap().get_or_insert(err);
                }
            });
        }
    });
    match first_error.into_inner().unwrap() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
