//=========================================================================
// Sequencer
//=========================================================================
//
// Cancelable set of armed timeline entries.
//
// Architecture:
//   schedule(now, entries) → pending (sorted by deadline, then seq)
//                                ↓
//   next_due(now) ─────────→ Fired<A> (one at a time, earliest first)
//                                ↓
//   cancel_all() ──────────→ pending cleared synchronously
//
// The sequencer owns no scene state. It only remembers which actions are
// due when; the owner applies them. Because `next_due` hands out a single
// entry per call, an owner that cancels in response to one fired action
// guarantees that nothing else from the old scope fires afterwards.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::trace;

//=== Internal Dependencies ===============================================

use super::{TimelineEntry, TimelineError};

//=== Fired ===============================================================

/// An entry whose deadline has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired<A> {
    /// Absolute time at which the entry was due.
    pub deadline: Duration,

    /// The entry's action.
    pub action: A,
}

//=== Armed ===============================================================

#[derive(Debug, Clone)]
struct Armed<A> {
    deadline: Duration,
    seq: u64,
    action: A,
}

//=== Sequencer ===========================================================

/// Timer set for one scope at a time.
///
/// Time is passed in explicitly as a [`Duration`] since an arbitrary
/// origin, which keeps the sequencer deterministic under test.
///
/// # Example
///
/// ```
/// # use std::time::Duration;
/// # use reveal_engine::core::timeline::{Sequencer, TimelineEntry};
/// let mut sequencer = Sequencer::new();
/// sequencer
///     .schedule(Duration::ZERO, vec![TimelineEntry::after_millis(500, "ping")])
///     .unwrap();
///
/// assert!(sequencer.next_due(Duration::from_millis(499)).is_none());
/// assert_eq!(sequencer.next_due(Duration::from_millis(500)).unwrap().action, "ping");
/// ```
#[derive(Debug)]
pub struct Sequencer<A> {
    pending: Vec<Armed<A>>,
    next_seq: u64,
}

impl<A> Sequencer<A> {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }

    //--- Arming -----------------------------------------------------------

    /// Arms one trigger per entry, each due `delay` after `now`.
    ///
    /// Entries may arrive in any order; they fire by deadline.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::AlreadyArmed`] if entries from a previous
    /// call are still pending. Call [`Sequencer::cancel_all`] first.
    pub fn schedule<I>(&mut self, now: Duration, entries: I) -> Result<usize, TimelineError>
    where
        I: IntoIterator<Item = TimelineEntry<A>>,
    {
        if !self.pending.is_empty() {
            return Err(TimelineError::AlreadyArmed {
                pending: self.pending.len(),
            });
        }

        let mut armed = 0;
        for entry in entries {
            self.insert(now + entry.delay, entry.action);
            armed += 1;
        }

        trace!("Armed {} timeline entries at {:?}", armed, now);
        Ok(armed)
    }

    /// Drops every pending entry. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();

        if dropped > 0 {
            trace!("Cancelled {} pending timeline entries", dropped);
        }
        dropped
    }

    //--- Firing -----------------------------------------------------------

    /// Removes and returns the earliest entry due at or before `now`.
    pub fn next_due(&mut self, now: Duration) -> Option<Fired<A>> {
        match self.pending.first() {
            Some(first) if first.deadline <= now => {
                let armed = self.pending.remove(0);
                Some(Fired {
                    deadline: armed.deadline,
                    action: armed.action,
                })
            }
            _ => None,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_armed(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Deadline of the next entry to fire, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.first().map(|armed| armed.deadline)
    }

    //--- Internal Helpers -------------------------------------------------

    fn insert(&mut self, deadline: Duration, action: A) {
        let seq = self.next_seq;
        self.next_seq += 1;

        // Stable: equal deadlines keep insertion order
        let pos = self
            .pending
            .partition_point(|armed| (armed.deadline, armed.seq) <= (deadline, seq));
        self.pending.insert(pos, Armed { deadline, seq, action });
    }
}

impl<A> Default for Sequencer<A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
