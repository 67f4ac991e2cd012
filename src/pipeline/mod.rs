//! Pipeline components: run context, fan-out runner, stage functions, orchestrator.

pub mod context;
pub mod orchestrator;
pub mod runner;
pub mod stages;

pub use context::{PipelineContext, SerialLock, SignOpts};
pub use orchestrator::Pipeline;
pub use runner::run_fanout;
pub use stages::{combine_results, multi_hash, single_hash};

/// Default capacity of every inter-stage channel. A full channel blocks
/// producers until the downstream stage frees capacity; a closed channel
/// (all senders dropped) tells consumers no more items will arrive.
pub const CHANNEL_CAP: usize = 100;
