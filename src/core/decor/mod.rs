//=========================================================================
// Decoration Stage
//=========================================================================
//
// The page shown after the explore hand-off.
//
// Idle until the user asks to decorate; then the celebration song starts
// and a fixed timeline reveals the room in eight steps. Gift boxes can be
// opened at any time on this page and have no timers of their own.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::events::ShowEvent;
use crate::core::globals::GlobalContext;
use crate::core::media::{MediaId, PlaybackNotice, SessionOwner};
use crate::core::scene::Step;
use crate::core::timeline::{Schedule, Sequencer};

//=== Module Declarations =================================================

mod gifts;

//=== Public API ==========================================================

pub use gifts::{CatalogKind, GiftCatalog, GiftContent, GiftId, GiftSelection};

//--- Built-in Timings ----------------------------------------------------

const REVEAL: &[(u64, Step)] = &[
    (0, 1),
    (1200, 2),
    (2500, 3),
    (4500, 4),
    (5500, 5),
    (8000, 6),
    (9500, 7),
    (11000, 8),
];

const CELEBRATION_SONG: &str = "hbd_song";

//=== DecorStage ==========================================================

#[derive(Debug)]
pub struct DecorStage {
    step: Step,
    started: bool,
    torn_down: bool,
    reveal: Schedule<Step>,
    sequencer: Sequencer<Step>,
    song: MediaId,
    gifts: GiftSelection,
}

impl DecorStage {
    //--- Construction -----------------------------------------------------

    pub fn new(catalog: GiftCatalog) -> Self {
        Self {
            step: 0,
            started: false,
            torn_down: false,
            reveal: Schedule::from_millis(REVEAL),
            sequencer: Sequencer::new(),
            song: MediaId::new(CELEBRATION_SONG),
            gifts: GiftSelection::new(catalog),
        }
    }

    /// Replaces the media id of the celebration song.
    pub fn with_song(mut self, id: impl Into<MediaId>) -> Self {
        self.song = id.into();
        self
    }

    //--- Reveal -----------------------------------------------------------

    /// Starts the song and the reveal timeline. Only the first call before
    /// teardown counts.
    ///
    /// The step-1 cue is due immediately and fires before this returns.
    pub fn begin(&mut self, ctx: &mut GlobalContext, now: Duration) -> bool {
        if self.started || self.torn_down {
            debug!("Decorate ignored: reveal already started");
            return false;
        }

        self.started = true;
        debug!("Decoration reveal started at {:?}", now);
        ctx.start_session(&self.song, SessionOwner::Celebration);

        if let Err(e) = self.sequencer.schedule(now, self.reveal.iter().copied()) {
            warn!("Could not arm decoration reveal: {}", e);
        }
        self.tick(ctx, now);
        true
    }

    pub fn tick(&mut self, ctx: &mut GlobalContext, now: Duration) {
        while let Some(fired) = self.sequencer.next_due(now) {
            if fired.action <= self.step {
                continue;
            }
            self.step = fired.action;
            trace!("Decoration step {}", self.step);
            ctx.outbox.push(ShowEvent::DecorStepAdvanced { step: self.step });
        }
    }

    /// The celebration song plays once; its end releases the channel.
    pub fn on_playback(&mut self, ctx: &mut GlobalContext, notice: PlaybackNotice) {
        if self.torn_down {
            return;
        }
        if let PlaybackNotice::Ended {
            owner: SessionOwner::Celebration,
        } = notice
        {
            ctx.stop_session(SessionOwner::Celebration);
        }
    }

    /// Cancels the reveal and stops the song. Later gestures are ignored.
    pub fn teardown(&mut self, ctx: &mut GlobalContext) {
        self.torn_down = true;
        self.sequencer.cancel_all();
        ctx.stop_session(SessionOwner::Celebration);
    }

    //--- Gifts ------------------------------------------------------------

    pub fn select_gift(&mut self, ctx: &mut GlobalContext, gift: GiftId) {
        if self.torn_down {
            debug!("Gift {} ignored after teardown", gift);
            return;
        }
        self.gifts.select(gift);
        ctx.outbox.push(ShowEvent::GiftSelected { gift });
    }

    pub fn close_gift(&mut self, ctx: &mut GlobalContext) {
        if self.torn_down {
            return;
        }
        if self.gifts.close().is_some() {
            ctx.outbox.push(ShowEvent::GiftClosed);
        }
    }

    pub fn open_envelope(&mut self, ctx: &mut GlobalContext) {
        if self.torn_down {
            return;
        }
        match self.gifts.open_envelope() {
            Some(gift) => ctx.outbox.push(ShowEvent::EnvelopeOpened { gift }),
            None => debug!("No sealed gift to open"),
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn gifts(&self) -> &GiftSelection {
        &self.gifts
    }
}

impl Default for DecorStage {
    fn default() -> Self {
        Self::new(GiftCatalog::default())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
