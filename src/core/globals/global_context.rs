//=========================================================================
// Global Context
//=========================================================================
//
// Shared data container for the show's state machines.
//
// Contains state data that systems read/write:
// - media: Registry of opaque media handles
// - playback: The single output channel and its session
// - outbox: Events awaiting the presentation layer
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::events::{Outbox, ShowEvent};
use crate::core::media::{
    MediaEvent, MediaId, MediaRegistry, OutputChannel, PlaybackController, PlaybackNotice,
    SessionId, SessionOwner,
};

//=== GlobalContext =======================================================

/// Shared context data passed to the state machines on every call.
///
/// Separates data (media, playback, published events) from the systems
/// that decide what happens next.
#[derive(Debug, Default)]
pub struct GlobalContext {
    /// Lookup of media handles by id.
    pub media: MediaRegistry,

    /// Exclusive owner of the active output channel.
    pub playback: PlaybackController,

    /// Events produced during the current tick.
    pub outbox: Outbox,
}

impl GlobalContext {
    /// Creates a context with an empty registry and a silent output channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context playing through `channel`.
    pub fn with_channel(channel: Box<dyn OutputChannel>) -> Self {
        Self {
            playback: PlaybackController::new(channel),
            ..Self::default()
        }
    }

    //--- Session Helpers --------------------------------------------------

    /// Resolves `id`, binds it for `owner` and asks the channel to play.
    ///
    /// Best-effort: any failure is logged and the show carries on. Returns
    /// the new session id when the media could at least be loaded.
    pub fn start_session(&mut self, id: &MediaId, owner: SessionOwner) -> Option<SessionId> {
        let media = match self.media.resolve_playable(id) {
            Ok(media) => media.clone(),
            Err(e) => {
                warn!("Skipping playback for {:?}: {}", owner, e);
                if let Some(stopped) = self.playback.stop() {
                    self.outbox.push(ShowEvent::PlaybackStopped { owner: stopped.owner() });
                }
                return None;
            }
        };

        let replaced = self.playback.owner();
        let session = self.playback.load(media, owner).ok();
        if let Some(previous) = replaced {
            self.outbox.push(ShowEvent::PlaybackStopped { owner: previous });
        }
        session?;

        self.outbox.push(ShowEvent::PlaybackStarted {
            owner,
            media: id.clone(),
        });

        if self.playback.play().is_ok() {
            self.outbox.push(ShowEvent::PlayStateChanged { playing: true });
        }

        session
    }

    /// Stops the active session if `owner` holds it.
    pub fn stop_session(&mut self, owner: SessionOwner) {
        if self.playback.owner() != Some(owner) {
            return;
        }

        if self.playback.stop().is_some() {
            debug!("Session for {:?} stopped", owner);
            self.outbox.push(ShowEvent::PlaybackStopped { owner });
        }
    }

    /// Applies a backend notification, publishing progress reports.
    ///
    /// Returns the notice so the owning system can react to `Ended`.
    pub fn apply_media_event(&mut self, event: MediaEvent) -> Option<PlaybackNotice> {
        let notice = self.playback.handle_event(event)?;

        if let PlaybackNotice::Progress { owner, elapsed, duration } = notice {
            self.outbox.push(ShowEvent::Progress { owner, elapsed, duration });
        }

        Some(notice)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::media::test_support::RecordingChannel;
    use crate::core::media::MediaKind;

    fn context() -> GlobalContext {
        let (channel, _calls) = RecordingChannel::new();
        let mut ctx = GlobalContext::with_channel(Box::new(channel));
        ctx.media.register("weird", MediaKind::Audio, "weird.mp3");
        ctx.media.register("song1", MediaKind::Audio, "song1.mp3");
        ctx
    }

    #[test]
    fn start_session_publishes_start_and_play_state() {
        let mut ctx = context();

        let session = ctx.start_session(&"weird".into(), SessionOwner::Ambient);

        assert!(session.is_some());
        assert!(ctx.playback.is_playing());
        assert_eq!(
            ctx.outbox.take(),
            vec![
                ShowEvent::PlaybackStarted {
                    owner: SessionOwner::Ambient,
                    media: "weird".into(),
                },
                ShowEvent::PlayStateChanged { playing: true },
            ]
        );
    }

    #[test]
    fn unknown_media_is_skipped_quietly() {
        let mut ctx = context();

        assert!(ctx.start_session(&"nope".into(), SessionOwner::Player).is_none());
        assert!(!ctx.playback.is_active());
        assert!(ctx.outbox.is_empty());
    }

    #[test]
    fn replacing_a_session_announces_the_stop() {
        let mut ctx = context();
        ctx.start_session(&"weird".into(), SessionOwner::Ambient);
        ctx.outbox.clear();

        ctx.start_session(&"song1".into(), SessionOwner::Player);

        let events = ctx.outbox.take();
        assert_eq!(events[0], ShowEvent::PlaybackStopped { owner: SessionOwner::Ambient });
        assert_eq!(ctx.playback.owner(), Some(SessionOwner::Player));
    }

    #[test]
    fn stop_session_ignores_other_owners() {
        let mut ctx = context();
        ctx.start_session(&"song1".into(), SessionOwner::Player);

        ctx.stop_session(SessionOwner::Ambient);
        assert!(ctx.playback.is_active());

        ctx.stop_session(SessionOwner::Player);
        assert!(!ctx.playback.is_active());
    }

    #[test]
    fn progress_is_published() {
        let mut ctx = context();
        let id = ctx.start_session(&"song1".into(), SessionOwner::Player).unwrap();
        ctx.outbox.clear();

        let elapsed = std::time::Duration::from_secs(3);
        ctx.apply_media_event(MediaEvent::TimeUpdate {
            session: id,
            elapsed,
            duration: None,
        });

        assert_eq!(
            ctx.outbox.take(),
            vec![ShowEvent::Progress {
                owner: SessionOwner::Player,
                elapsed,
                duration: None,
            }]
        );
    }
}
