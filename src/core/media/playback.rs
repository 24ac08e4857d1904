//=========================================================================
// Playback Controller
//=========================================================================
//
// Single point of control for the one active audio/video channel.
//
// Architecture:
//   owner ── load(ref) ──→ PlaybackController ──→ dyn OutputChannel
//           play/pause/seek     │ session: Option<PlaybackSession>
//                               ↑
//   backend ── MediaEvent ── handle_event() ──→ PlaybackNotice
//
// Every load tears down the previous session, so at most one channel is
// ever bound. Failures are logged and returned; nothing here can stop the
// presentation from progressing.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::time::Duration;

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::{MediaError, MediaRef};

//=== SessionId ===========================================================

/// Identifies one binding of a media reference to the output channel.
///
/// Backends tag their notifications with it so that events from a session
/// that has since been torn down can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

#[cfg(test)]
impl SessionId {
    /// The id the first `load` of a fresh controller hands out.
    pub(crate) const fn first() -> Self {
        Self(0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session#{}", self.0)
    }
}

//=== SessionOwner ========================================================

/// Component that activated a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionOwner {
    /// A fixed scene's one-shot track. Stops or loops, never auto-advances.
    Ambient,

    /// The embedded player's current playlist track.
    Player,

    /// The decoration page's celebration song.
    Celebration,
}

//=== MediaEvent ==========================================================

/// Notifications reported by the output backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    /// Current position, and the total duration once known.
    TimeUpdate {
        session: SessionId,
        elapsed: Duration,
        duration: Option<Duration>,
    },

    /// The bound media played to its end.
    Ended { session: SessionId },
}

impl MediaEvent {
    pub fn session(&self) -> SessionId {
        match self {
            Self::TimeUpdate { session, .. } | Self::Ended { session } => *session,
        }
    }
}

//=== PlaybackNotice ======================================================

/// What a backend notification meant for the active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackNotice {
    Progress {
        owner: SessionOwner,
        elapsed: Duration,
        duration: Option<Duration>,
    },
    Ended {
        owner: SessionOwner,
    },
}

//=== OutputChannel =======================================================

/// The host's audio/video output.
///
/// Implementations drive a real device (or a browser element, or nothing)
/// and report progress back as [`MediaEvent`]s tagged with the session id
/// passed to [`OutputChannel::open`].
pub trait OutputChannel: Send {
    /// Binds a source. Any previously bound source is already closed.
    fn open(&mut self, session: SessionId, media: &MediaRef) -> Result<(), MediaError>;

    /// Starts or resumes output. May be refused (e.g. autoplay policy).
    fn play(&mut self) -> Result<(), MediaError>;

    fn pause(&mut self);

    fn seek(&mut self, position: Duration);

    /// Releases the bound source.
    fn close(&mut self);
}

/// Output channel that produces no sound and accepts every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentChannel;

impl OutputChannel for SilentChannel {
    fn open(&mut self, session: SessionId, media: &MediaRef) -> Result<(), MediaError> {
        trace!("Silent channel bound {} to {}", media.id, session);
        Ok(())
    }

    fn play(&mut self) -> Result<(), MediaError> {
        Ok(())
    }

    fn pause(&mut self) {}

    fn seek(&mut self, _position: Duration) {}

    fn close(&mut self) {}
}

//=== PlaybackSession =====================================================

/// Live binding between a media reference and the output channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackSession {
    id: SessionId,
    media: MediaRef,
    owner: SessionOwner,
    elapsed: Duration,
    duration: Option<Duration>,
    playing: bool,
}

impl PlaybackSession {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn media(&self) -> &MediaRef {
        &self.media
    }

    pub fn owner(&self) -> SessionOwner {
        self.owner
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Total duration, once the backend has reported it.
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

//=== PlaybackController ==================================================

/// Exclusive owner of the output channel and its current session.
pub struct PlaybackController {
    channel: Box<dyn OutputChannel>,
    session: Option<PlaybackSession>,
    next_id: u64,
}

impl PlaybackController {
    //--- Construction -----------------------------------------------------

    pub fn new(channel: Box<dyn OutputChannel>) -> Self {
        Self {
            channel,
            session: None,
            next_id: 0,
        }
    }

    /// Swaps the output backend, tearing down any active session first.
    pub fn set_channel(&mut self, channel: Box<dyn OutputChannel>) {
        self.stop();
        self.channel = channel;
    }

    //--- Transport --------------------------------------------------------

    /// Binds `media` as the current source for `owner`.
    ///
    /// The previous session, whoever owned it, is stopped first.
    ///
    /// # Errors
    ///
    /// Propagates the backend's refusal to open the source. The error has
    /// already been logged; callers are free to ignore it.
    pub fn load(&mut self, media: MediaRef, owner: SessionOwner) -> Result<SessionId, MediaError> {
        self.stop();

        let id = SessionId(self.next_id);
        self.next_id += 1;

        if let Err(e) = self.channel.open(id, &media) {
            warn!("Could not load {} for {:?}: {}", media.id, owner, e);
            return Err(e);
        }

        debug!("Loaded {} as {} for {:?}", media.id, id, owner);
        self.session = Some(PlaybackSession {
            id,
            media,
            owner,
            elapsed: Duration::ZERO,
            duration: None,
            playing: false,
        });

        Ok(id)
    }

    /// Starts or resumes the current session.
    ///
    /// # Errors
    ///
    /// [`MediaError::NoSession`] if nothing is loaded, or the backend's
    /// refusal (typically [`MediaError::AutoplayBlocked`]). Either way the
    /// failure is logged and the session stays paused.
    pub fn play(&mut self) -> Result<(), MediaError> {
        let Some(session) = self.session.as_mut() else {
            debug!("Play requested with no session loaded");
            return Err(MediaError::NoSession);
        };

        match self.channel.play() {
            Ok(()) => {
                session.playing = true;
                Ok(())
            }
            Err(e) => {
                warn!("Playback of {} did not start: {}", session.media.id, e);
                session.playing = false;
                Err(e)
            }
        }
    }

    pub fn pause(&mut self) {
        if let Some(session) = self.session.as_mut() {
            if session.playing {
                self.channel.pause();
                session.playing = false;
            }
        }
    }

    /// Moves the playhead, clamped to `[0, duration]`.
    ///
    /// An unknown duration counts as zero. Returns the applied position,
    /// or `None` when nothing is loaded.
    pub fn seek(&mut self, position: Duration) -> Option<Duration> {
        let session = self.session.as_mut()?;

        let limit = session.duration.unwrap_or(Duration::ZERO);
        let clamped = position.min(limit);

        self.channel.seek(clamped);
        session.elapsed = clamped;
        Some(clamped)
    }

    /// Tears down the current session, if any, and returns it.
    pub fn stop(&mut self) -> Option<PlaybackSession> {
        let session = self.session.take()?;

        if session.playing {
            self.channel.pause();
        }
        self.channel.close();

        debug!("Stopped {} ({})", session.media.id, session.id);
        Some(session)
    }

    //--- Notifications ----------------------------------------------------

    /// Applies a backend notification to the active session.
    ///
    /// Notifications for any other session id are dropped.
    pub fn handle_event(&mut self, event: MediaEvent) -> Option<PlaybackNotice> {
        let Some(session) = self.session.as_mut().filter(|s| s.id == event.session()) else {
            trace!("Dropping media event for inactive {}", event.session());
            return None;
        };

        match event {
            MediaEvent::TimeUpdate { elapsed, duration, .. } => {
                if duration.is_some() {
                    session.duration = duration;
                }
                session.elapsed = match session.duration {
                    Some(total) => elapsed.min(total),
                    None => elapsed,
                };

                Some(PlaybackNotice::Progress {
                    owner: session.owner,
                    elapsed: session.elapsed,
                    duration: session.duration,
                })
            }
            MediaEvent::Ended { .. } => {
                session.playing = false;
                if let Some(total) = session.duration {
                    session.elapsed = total;
                }

                Some(PlaybackNotice::Ended { owner: session.owner })
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.playing)
    }

    /// Owner of the active session, if any.
    pub fn owner(&self) -> Option<SessionOwner> {
        self.session.as_ref().map(|s| s.owner)
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(Box::new(SilentChannel))
    }
}

impl fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackController")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
