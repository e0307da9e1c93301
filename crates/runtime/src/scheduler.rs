//! Tick requests from the session to its host.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Asks the host to deliver one tick later. The host calls
/// [`Session::on_tick`](crate::Session::on_tick) when the request fires.
pub trait FrameScheduler {
    fn request_tick(&mut self);
}

/// Pull-based scheduler for host loops and tests.
///
/// Requests coalesce: at most one tick is outstanding at a time. Clones share
/// state, so the host keeps one handle and gives another to the session.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    pending: Arc<AtomicBool>,
    requests: Arc<AtomicU64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the outstanding request, if any.
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Total requests received, coalesced or not.
    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_tick(&mut self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.pending.store(true, Ordering::Release);
    }
}
