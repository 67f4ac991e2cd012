//! Typed pipeline builder: one bounded channel per stage boundary, one
//! long-lived worker per stage, and a full join on collect.

use anyhow::{Result, anyhow, bail};
use crossbeam_channel::{Receiver, Sender, bounded};
use log::debug;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::context::PipelineContext;

/// A running pipeline whose most recent channel carries `T`. The type
/// parameter threads through [`Pipeline::stage`], so attaching a stage to an
/// upstream that produces the wrong input type is a compile error, not a
/// runtime check.
pub struct Pipeline<T: Send + 'static> {
    ctx: Arc<PipelineContext>,
    rx: Receiver<T>,
    workers: Vec<(&'static str, JoinHandle<Result<()>>)>,
}

impl<T: Send + 'static> Pipeline<T> {
    /// Create channel C0 and spawn a source worker that writes every item
    /// then drops the sender — closing C0 after the last write is the only
    /// end-of-input signal downstream ever sees.
    pub fn source<I>(ctx: Arc<PipelineContext>, items: I) -> Self
    where
        I: IntoIterator<Item = T> + Send + 'static,
    {
        let (tx, rx) = bounded(ctx.channel_cap);
        let handle = thread::spawn(move || {
            for item in items {
                // Send fails only when every receiver is gone (a downstream
                // stage failed); stop feeding and let collect() report it.
                if tx.send(item).is_err() {
                    break;
                }
            }
            Ok(())
        });
        Self {
            ctx,
            rx,
            workers: vec![("source", handle)],
        }
    }

    /// Attach a stage: create the next bounded channel and spawn one worker
    /// running `stage` over (input, output, context). Exactly one join
    /// handle is recorded per worker, here at creation time; collect() waits
    /// on all of them.
    pub fn stage<U, F>(mut self, name: &'static str, stage: F) -> Pipeline<U>
    where
        U: Send + 'static,
        F: FnOnce(Receiver<T>, Sender<U>, Arc<PipelineContext>) -> Result<()> + Send + 'static,
    {
        let (tx, rx) = bounded(self.ctx.channel_cap);
        let input = self.rx;
        let ctx = Arc::clone(&self.ctx);
        let handle = thread::spawn(move || {
            let res = stage(input, tx, ctx);
            debug!("stage {name} finished");
            res
        });
        self.workers.push((name, handle));
        Pipeline {
            ctx: self.ctx,
            rx,
            workers: self.workers,
        }
    }

    /// Drain the final channel into a Vec, then join every worker — the
    /// pipeline is complete only when all of them have finished. Returns the
    /// drained items, or the first stage error (panics included).
    pub fn collect(self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Ok(item) = self.rx.recv() {
            items.push(item);
        }
        debug!("pipeline drained, {} items", items.len());

        let mut first_error: Option<anyhow::Error> = None;
        for (name, handle) in self.workers {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    first_error.get_or_insert(err.context(format!("stage {name} failed")));
                }
                Err(_) => {
                    first_error.get_or_insert(anyhow!("stage {name} panicked"));
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(items),
        }
    }

    /// Collect a pipeline whose final stage emits exactly one value (e.g.
    /// one ending in [`combine_results`](super::stages::combine_results)).
    pub fn collect_one(self) -> Result<T> {
        let mut items = self.collect()?;
        if items.len() != 1 {
            bail!("expected exactly one result, got {}", items.len());
        }
        items.pop().ok_or_else(|| anyhow!("pipeline produced no result"))
    }
}
