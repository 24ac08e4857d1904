//=========================================================================
// Timeline System
//=========================================================================
//
// Delayed, cancelable state transitions relative to a scope's zero point.
//
// Architecture:
//   Schedule<A> (validated data)
//        ↓ entries
//   Sequencer<A> ── next_due(now) ──→ owner applies action
//        ↑
//   cancel_all() on every scope change
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use thiserror::Error;

//=== Module Declarations =================================================

mod schedule;
mod sequencer;

//=== Public API ==========================================================

pub use schedule::{Schedule, TimelineEntry};
pub use sequencer::{Fired, Sequencer};

//=== TimelineError =======================================================

/// Errors raised while building or arming a timeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimelineError {
    /// An entry's delay does not come strictly after its predecessor's.
    #[error("entry {index} has delay {delay:?}, not after previous delay {previous:?}")]
    NonIncreasingDelay {
        index: usize,
        previous: Duration,
        delay: Duration,
    },

    /// Entries from an earlier `schedule` call have not fired or been cancelled.
    #[error("sequencer still has {pending} pending entries; cancel before re-arming")]
    AlreadyArmed { pending: usize },
}
