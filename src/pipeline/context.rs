//! Run-scoped context: the serial digest lock and channel tuning. Built once
//! per pipeline run and shared by `Arc` across stage workers, so independent
//! runs (e.g. concurrent tests) never share coordination state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::CHANNEL_CAP;

/// Lib-facing options for a signing run. Only tuning lives here; the
/// coordination primitives are created from these in [`PipelineContext::new`].
#[derive(Clone, Debug)]
pub struct SignOpts {
    /// Capacity of each inter-stage channel. Producers block when full.
    pub channel_cap: usize,
}

impl Default for SignOpts {
    fn default() -> Self {
        Self {
            channel_cap: CHANNEL_CAP,
        }
    }
}

/// Guards the digest primitive: the underlying resource tolerates exactly one
/// in-flight call at a time. The in-flight flag is a contract check — if two
/// holders ever overlap, the mutex was bypassed and [`SerialLock::acquire`]
/// panics rather than returning a corrupt result.
pub struct SerialLock {
    inner: Mutex<()>,
    in_flight: AtomicBool,
}

impl SerialLock {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(()),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Acquire exclusive access to the digest resource. The guard releases
    /// on drop. Never held across anything but the digest call itself.
    pub fn acquire(&self) -> SerialGuard<'_> {
        let guard = self.inner.lock().unwrap();
        if self.in_flight.swap(true, Ordering::SeqCst) {
            panic!("serial lock overheat: a digest call is already in flight");
        }
        SerialGuard {
            _mutex: guard,
            in_flight: &self.in_flight,
        }
    }
}

impl Default for SerialLock {
    fn default() -> Self {
        Self::new()
    }
}

pub struct SerialGuard<'a> {
    _mutex: MutexGuard<'a, ()>,
    in_flight: &'a AtomicBool,
}

impl Drop for SerialGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::SeqCst);
    }
}

/// Shared context for one pipeline run: the serial digest lock and the
/// channel capacity every stage boundary is created with.
pub struct PipelineContext {
    pub digest_lock: SerialLock,
    pub channel_cap: usize,
}

impl PipelineContext {
    pub fn new(opts: &SignOpts) -> Self {
        Self {
            digest_lock: SerialLock::new(),
            channel_cap: opts.channel_cap,
        }
    }
}
