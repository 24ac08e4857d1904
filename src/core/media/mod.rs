//=========================================================================
// Media System
//=========================================================================
//
// Opaque media handles and the single output channel that plays them.
//
// Architecture:
//   MediaRegistry: MediaId → MediaRef (lookup only)
//   PlaybackController: owns dyn OutputChannel + Option<PlaybackSession>
//
// Media never blocks the show. Every failure here is logged and handed
// back as a `MediaError` the caller is free to drop.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Module Declarations =================================================

mod playback;
mod registry;

//=== Public API ==========================================================

pub use playback::{
    MediaEvent, OutputChannel, PlaybackController, PlaybackNotice, PlaybackSession, SessionId,
    SessionOwner, SilentChannel,
};
pub use registry::{MediaId, MediaKind, MediaRef, MediaRegistry};

//=== MediaError ==========================================================

/// Non-fatal media failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    /// No handle is registered under this id.
    #[error("no media registered as `{0}`")]
    Unknown(MediaId),

    /// The handle names an image, which cannot be bound to a channel.
    #[error("media `{0}` cannot be played")]
    NotPlayable(MediaId),

    /// The environment refused to start output without a user gesture.
    #[error("autoplay was blocked")]
    AutoplayBlocked,

    /// A transport call arrived while nothing was loaded.
    #[error("no playback session is active")]
    NoSession,

    /// Backend-specific failure.
    #[error("output backend error: {0}")]
    Backend(String),
}

//=========================================================================
// Test Support
//=========================================================================

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;

    /// Calls observed by a [`RecordingChannel`].
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum ChannelCall {
        Open(MediaId),
        Play,
        Pause,
        Seek(Duration),
        Close,
    }

    /// Shared view of a recording channel's call log.
    #[derive(Debug, Clone, Default)]
    pub(crate) struct CallLog(Arc<Mutex<Vec<ChannelCall>>>);

    impl CallLog {
        fn push(&self, call: ChannelCall) {
            self.0.lock().unwrap().push(call);
        }

        /// Returns and clears the recorded calls.
        pub(crate) fn take(&self) -> Vec<ChannelCall> {
            std::mem::take(&mut *self.0.lock().unwrap())
        }

        pub(crate) fn opened(&self) -> Vec<MediaId> {
            self.0
                .lock()
                .unwrap()
                .iter()
                .filter_map(|call| match call {
                    ChannelCall::Open(id) => Some(id.clone()),
                    _ => None,
                })
                .collect()
        }
    }

    /// Output channel test double that records every call.
    pub(crate) struct RecordingChannel {
        log: CallLog,
        fail_open: bool,
        block_play: bool,
    }

    impl RecordingChannel {
        pub(crate) fn new() -> (Self, CallLog) {
            Self::build(false, false)
        }

        pub(crate) fn failing_open() -> (Self, CallLog) {
            Self::build(true, false)
        }

        pub(crate) fn blocking_autoplay() -> (Self, CallLog) {
            Self::build(false, true)
        }

        fn build(fail_open: bool, block_play: bool) -> (Self, CallLog) {
            let log = CallLog::default();
            let channel = Self {
                log: log.clone(),
                fail_open,
                block_play,
            };
            (channel, log)
        }
    }

    impl OutputChannel for RecordingChannel {
        fn open(&mut self, _session: SessionId, media: &MediaRef) -> Result<(), MediaError> {
            if self.fail_open {
                return Err(MediaError::Backend(format!("cannot decode {}", media.locator)));
            }
            self.log.push(ChannelCall::Open(media.id.clone()));
            Ok(())
        }

        fn play(&mut self) -> Result<(), MediaError> {
            if self.block_play {
                return Err(MediaError::AutoplayBlocked);
            }
            self.log.push(ChannelCall::Play);
            Ok(())
        }

        fn pause(&mut self) {
            self.log.push(ChannelCall::Pause);
        }

        fn seek(&mut self, position: Duration) {
            self.log.push(ChannelCall::Seek(position));
        }

        fn close(&mut self) {
            self.log.push(ChannelCall::Close);
        }
    }
}
