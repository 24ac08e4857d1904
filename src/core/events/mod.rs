//=========================================================================
// Show Events
//=========================================================================
//
// Observable changes published to the presentation layer.
//
// The presentation layer never reaches into the state machines. It reads
// the (Scene, Step) pairs and playback facts announced here and renders
// accordingly.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::decor::GiftId;
use crate::core::media::{MediaId, SessionOwner};
use crate::core::scene::{Scene, Step};

//=== Module Declarations =================================================

mod outbox;

//=== Public API ==========================================================

pub use outbox::Outbox;

//=== ShowEvent ===========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowEvent {
    /// A scene became current with step 0.
    SceneEntered { scene: Scene },

    /// The current scene's step moved forward.
    StepAdvanced { scene: Scene, step: Step },

    /// A session was bound to the output channel.
    PlaybackStarted { owner: SessionOwner, media: MediaId },

    /// A session was torn down.
    PlaybackStopped { owner: SessionOwner },

    /// Playback position report for progress display.
    Progress {
        owner: SessionOwner,
        elapsed: Duration,
        duration: Option<Duration>,
    },

    /// Play/pause state of the active session changed.
    PlayStateChanged { playing: bool },

    /// The embedded player moved to another playlist index.
    TrackChanged { index: usize },

    /// Control left the intro sequence for the decoration page.
    ExploreHandedOff,

    /// The decoration reveal moved forward.
    DecorStepAdvanced { step: Step },

    GiftSelected { gift: GiftId },

    GiftClosed,

    EnvelopeOpened { gift: GiftId },
}
