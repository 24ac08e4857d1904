//=========================================================================
// Embedded Player
//=========================================================================
//
// Playlist navigation layered on the playback controller.
//
// The player has no timers. Every transition comes from a user gesture
// (next, prev, toggle, seek) or from the backend reporting that the
// current track ended.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::debug;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::events::ShowEvent;
use crate::core::globals::GlobalContext;
use crate::core::media::{MediaId, SessionOwner};

//=== Track ===============================================================

/// Playlist entry. Cover and audio are opaque media ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub cover: MediaId,
    pub media: MediaId,
}

impl Track {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        cover: impl Into<MediaId>,
        media: impl Into<MediaId>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            cover: cover.into(),
            media: media.into(),
        }
    }
}

//=== Playlist ============================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaylistError {
    #[error("a playlist needs at least one track")]
    Empty,
}

/// Non-empty, ordered list of tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// # Errors
    ///
    /// [`PlaylistError::Empty`] when `tracks` is empty.
    pub fn new(tracks: Vec<Track>) -> Result<Self, PlaylistError> {
        if tracks.is_empty() {
            return Err(PlaylistError::Empty);
        }
        Ok(Self { tracks })
    }

    /// The three-track mixtape played in the party scene.
    pub fn mixtape() -> Self {
        Self {
            tracks: vec![
                Track::new("Daydreaming", "Radiohead", "album_radiohead", "song1"),
                Track::new("Black Car", "Beach House", "album_beachhouse", "song2"),
                Track::new("This Isn't The Place", "Nine Inch Nails", "album_nin", "song3"),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    fn wrap_next(&self, index: usize) -> usize {
        (index + 1) % self.tracks.len()
    }

    fn wrap_prev(&self, index: usize) -> usize {
        (index + self.tracks.len() - 1) % self.tracks.len()
    }
}

//=== EmbeddedPlayer ======================================================

/// Current playlist position plus transport controls.
///
/// Play/pause and position live in the [`PlaybackController`] session;
/// the player only decides *which* track that session plays.
///
/// [`PlaybackController`]: crate::core::media::PlaybackController
#[derive(Debug, Clone)]
pub struct EmbeddedPlayer {
    playlist: Playlist,
    index: usize,
}

impl EmbeddedPlayer {
    pub fn new(playlist: Playlist) -> Self {
        Self { playlist, index: 0 }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Rewinds to the first track and starts it.
    pub fn enter(&mut self, ctx: &mut GlobalContext) {
        self.index = 0;
        ctx.outbox.push(ShowEvent::TrackChanged { index: 0 });
        self.load_current(ctx);
    }

    /// Stops the player's session, if it still owns the channel.
    pub fn leave(&mut self, ctx: &mut GlobalContext) {
        ctx.stop_session(SessionOwner::Player);
    }

    //--- Transport --------------------------------------------------------

    pub fn next(&mut self, ctx: &mut GlobalContext) {
        self.jump(ctx, self.playlist.wrap_next(self.index));
    }

    pub fn prev(&mut self, ctx: &mut GlobalContext) {
        self.jump(ctx, self.playlist.wrap_prev(self.index));
    }

    /// Flips play/pause without changing track.
    pub fn toggle_play(&mut self, ctx: &mut GlobalContext) {
        if ctx.playback.owner() != Some(SessionOwner::Player) {
            debug!("Toggle ignored: player has no session");
            return;
        }

        let was_playing = ctx.playback.is_playing();
        if was_playing {
            ctx.playback.pause();
        } else {
            // A refused play leaves the session paused; nothing else to do
            let _ = ctx.playback.play();
        }

        let playing = ctx.playback.is_playing();
        if playing != was_playing {
            ctx.outbox.push(ShowEvent::PlayStateChanged { playing });
        }
    }

    /// Seeks within the current track. Returns the clamped position.
    pub fn seek(&mut self, ctx: &mut GlobalContext, position: Duration) -> Option<Duration> {
        if ctx.playback.owner() != Some(SessionOwner::Player) {
            return None;
        }
        ctx.playback.seek(position)
    }

    /// The current track finished: move on, wrapping at the end.
    pub fn on_ended(&mut self, ctx: &mut GlobalContext) {
        self.next(ctx);
    }

    //--- Queries ----------------------------------------------------------

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &Track {
        // index is always kept in [0, len) and the playlist is non-empty
        &self.playlist.tracks[self.index]
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    //--- Internal Helpers -------------------------------------------------

    fn jump(&mut self, ctx: &mut GlobalContext, index: usize) {
        self.index = index;
        debug!("Player moved to track {} ({})", index, self.current().title);
        ctx.outbox.push(ShowEvent::TrackChanged { index });
        self.load_current(ctx);
    }

    fn load_current(&self, ctx: &mut GlobalContext) {
        let media = self.current().media.clone();
        ctx.start_session(&media, SessionOwner::Player);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
