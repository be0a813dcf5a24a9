//! Submission fencing.
//!
//! Each waitlist submission attempt takes a monotonically increasing id
//! when it enters the pipeline. Side effects that should only apply to the
//! most recent attempt (the marquee count refresh after an insert) check
//! the id first, so a response that arrives after a newer attempt has
//! started is discarded instead of clobbering its state.

use std::sync::atomic::{AtomicU64, Ordering};

/// Ticket identifying one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket(u64);

/// Monotonic fence over submission attempts.
#[derive(Debug, Default)]
pub struct SubmissionFence {
    latest: AtomicU64,
}

impl SubmissionFence {
    /// Start a new attempt, superseding all earlier tickets.
    pub fn begin(&self) -> SubmissionTicket {
        SubmissionTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether the ticket still belongs to the most recent attempt.
    pub fn is_current(&self, ticket: SubmissionTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}
