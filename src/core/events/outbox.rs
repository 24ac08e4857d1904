//=========================================================================
// Outbox
//=========================================================================
//
// Queue of show events awaiting the presentation layer.
//
// Systems push events here while they mutate state. The orchestrator
// drains the outbox at the end of each tick and hands the batch to the
// registered observers.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::ShowEvent;

//=== Outbox ==============================================================

/// FIFO of [`ShowEvent`]s produced during the current tick.
#[derive(Debug, Default)]
pub struct Outbox {
    queue: Vec<ShowEvent>,
}

impl Outbox {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues an event for delivery at the end of the tick.
    pub fn push(&mut self, event: ShowEvent) {
        self.queue.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShowEvent> {
        self.queue.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear()
    }

    /// Takes all queued events, leaving the outbox empty.
    pub fn take(&mut self) -> Vec<ShowEvent> {
        std::mem::take(&mut self.queue)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
