//! The submission latch.
//!
//! At most one submission may await adjudication at a time. The latch is
//! taken before the request is built and released when the permit drops,
//! on success and failure alike.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Process-wide "submitting" flag.
#[derive(Debug, Clone, Default)]
pub struct SubmissionLatch {
    active: Arc<AtomicBool>,
}

impl SubmissionLatch {
    /// An open latch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the latch, or returns `None` if a submission is already in
    /// flight.
    #[must_use]
    pub fn try_acquire(&self) -> Option<SubmissionPermit> {
        self.active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmissionPermit {
                active: Arc::clone(&self.active),
            })
    }

    /// Whether a submission is in flight.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

/// Holds the latch until dropped.
#[derive(Debug)]
pub struct SubmissionPermit {
    active: Arc<AtomicBool>,
}

impl Drop for SubmissionPermit {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
    }
}
