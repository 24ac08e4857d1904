//=========================================================================
// Event Collector
//=========================================================================
//
// Platform event collector with bounded polling and shutdown detection.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → Vec<FrameEvent> → TickControl
//
// Bounded polling prevents a flooding backend from starving the tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::{FrameEvent, PlatformEvent};

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Drains platform events into a flat, ordered list per tick.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    frame: Vec<FrameEvent>,
}

impl EventCollector {
    const MAX_EVENTS_PER_FRAME: usize = 100;

    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            frame: Vec::with_capacity(16),
        }
    }

    /// Collects pending platform events (bounded to prevent starvation).
    ///
    /// Whatever is left over stays queued for the next tick.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.frame.clear();
        let mut drained = 0;

        while drained < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= Self::MAX_EVENTS_PER_FRAME {
            warn!("Event queue backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    /// Events collected by the last [`EventCollector::collect_frame`].
    pub(crate) fn frame(&self) -> &[FrameEvent] {
        &self.frame
    }

    fn handle_event(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::Keys(keys) => {
                self.frame.extend(keys.into_iter().map(FrameEvent::Key));
                TickControl::Continue
            }
            PlatformEvent::Media(event) => {
                self.frame.push(FrameEvent::Media(event));
                TickControl::Continue
            }
            PlatformEvent::WindowClosed => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;
    use crate::core::media::{MediaEvent, SessionId};
    use crossbeam_channel::unbounded;

    #[test]
    fn collect_handles_empty_queue() {
        let (_tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        let result = collector.collect_frame();

        assert_eq!(result, TickControl::Continue);
        assert!(collector.frame().is_empty());
    }

    #[test]
    fn collect_keeps_arrival_order() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);
        let ended = MediaEvent::Ended {
            session: SessionId::first(),
        };

        tx.send(PlatformEvent::Keys(vec![KeyCode::Enter, KeyCode::KeyL])).unwrap();
        tx.send(PlatformEvent::Media(ended)).unwrap();
        tx.send(PlatformEvent::Keys(vec![KeyCode::Space])).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert_eq!(
            collector.frame(),
            &[
                FrameEvent::Key(KeyCode::Enter),
                FrameEvent::Key(KeyCode::KeyL),
                FrameEvent::Media(ended),
                FrameEvent::Key(KeyCode::Space),
            ]
        );
    }

    #[test]
    fn collect_returns_exit_on_window_closed() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::WindowClosed).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }

    #[test]
    fn collect_clears_previous_frame() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Keys(vec![KeyCode::Space])).unwrap();
        collector.collect_frame();
        assert_eq!(collector.frame().len(), 1);

        collector.collect_frame();
        assert!(collector.frame().is_empty());
    }

    #[test]
    fn collect_is_bounded_per_frame() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        for _ in 0..EventCollector::MAX_EVENTS_PER_FRAME + 5 {
            tx.send(PlatformEvent::Keys(vec![KeyCode::Space])).unwrap();
        }

        collector.collect_frame();
        assert_eq!(collector.frame().len(), EventCollector::MAX_EVENTS_PER_FRAME);

        collector.collect_frame();
        assert_eq!(collector.frame().len(), 5);
    }

    #[test]
    fn collect_returns_exit_on_disconnect() {
        let (tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        drop(tx);

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }
}
