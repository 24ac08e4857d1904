//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Messages that cross into the logic thread, and the errors of the
// thread that produces most of them.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;
use log::warn;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::KeyCode;
use crate::core::media::MediaEvent;

//=== PlatformEvent =======================================================

/// Events sent to the logic thread over the bounded channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PlatformEvent {
    /// Keys pressed since the last frame boundary, in press order.
    Keys(Vec<KeyCode>),

    /// A playback report from the host's media backend.
    Media(MediaEvent),

    /// Window close requested.
    WindowClosed,
}

//=== FrameEvent ==========================================================

/// One input the logic thread handles during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent {
    Key(KeyCode),
    Media(MediaEvent),
}

//=== MediaEventSink ======================================================

/// Handle through which a media backend reports playback progress.
///
/// Cheap to clone; every clone feeds the same logic thread.
#[derive(Debug, Clone)]
pub struct MediaEventSink {
    sender: Sender<PlatformEvent>,
}

impl MediaEventSink {
    pub(crate) fn new(sender: Sender<PlatformEvent>) -> Self {
        Self { sender }
    }

    /// Queues `event` for the next tick.
    ///
    /// Returns `false` once the logic thread has shut down.
    pub fn report(&self, event: MediaEvent) -> bool {
        if self.sender.send(PlatformEvent::Media(event)).is_err() {
            warn!("Logic thread gone, dropping {:?}", event);
            return false;
        }
        true
    }
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(#[source] winit::error::EventLoopError),

    /// Event loop execution error.
    #[error("event loop error: {0}")]
    EventLoopExecution(#[source] winit::error::EventLoopError),
}

//=========================================================================
// Unit Tests
//=========================================================================
