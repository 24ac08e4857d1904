//=========================================================================
// Global Systems
//=========================================================================
//
// Container for the show's state machines and the gesture router.
//
// Contains systems that turn keys into gestures, drive the intro scenes
// and the decoration page, and publish what changed. Systems operate on
// GlobalContext data.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::time::Duration;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::GlobalContext;
use crate::config::EngineConfig;
use crate::core::decor::{DecorStage, GiftCatalog};
use crate::core::events::ShowEvent;
use crate::core::input::{Gesture, GestureBindings, Page};
use crate::core::platform_bridge::FrameEvent;
use crate::core::player::Playlist;
use crate::core::scene::{SceneMachine, Script};

//=== GlobalSystems =======================================================

/// Observer called with every published [`ShowEvent`].
pub type ShowObserver = Box<dyn FnMut(&ShowEvent) + Send>;

/// Container for the show's logic systems.
///
/// # Available Systems
///
/// - `bindings`: Key → gesture table per page
/// - `intro`: Scripted scenes through to the embedded player
/// - `decor`: Room reveal and gift boxes after the explore hand-off
pub struct GlobalSystems {
    /// Key bindings consulted for every key press.
    pub bindings: GestureBindings,

    /// The intro page's scene machine.
    pub intro: SceneMachine,

    /// The decoration page.
    pub decor: DecorStage,

    page: Page,
    observers: Vec<ShowObserver>,
}

impl GlobalSystems {
    //--- Construction -----------------------------------------------------

    /// Creates the standard show with default bindings.
    pub fn new() -> Self {
        Self::from_config(&EngineConfig::default())
    }

    /// Creates the standard show with the variants chosen in `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            bindings: GestureBindings::standard(),
            intro: SceneMachine::new(Script::standard(), Playlist::mixtape())
                .with_ambient_mode(config.ambient),
            decor: DecorStage::new(GiftCatalog::from_kind(config.gifts)),
            page: Page::Intro,
            observers: Vec::new(),
        }
    }

    /// Registers an observer for published show events.
    pub fn add_observer<F>(&mut self, observer: F)
    where
        F: FnMut(&ShowEvent) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    //--- Gestures ---------------------------------------------------------

    /// Applies one gesture at time `now`.
    ///
    /// Gestures for the other page are ignored. Returns whether the
    /// gesture changed anything.
    pub fn gesture(&mut self, ctx: &mut GlobalContext, gesture: Gesture, now: Duration) -> bool {
        if gesture.page() != self.page {
            debug!("{:?} ignored on {:?} page", gesture, self.page);
            return false;
        }

        match gesture {
            Gesture::Start => self.intro.start(ctx, now),
            Gesture::SkipIntro => self.intro.skip_intro(ctx, now),
            Gesture::LetsParty => self.intro.lets_party(ctx, now),
            Gesture::Explore => {
                let handed_off = self.intro.explore(ctx);
                if handed_off {
                    debug!("Switching to decoration page");
                    self.page = Page::Decoration;
                }
                handed_off
            }
            Gesture::TogglePlay => self.player_gesture(ctx, SceneMachine::toggle_play),
            Gesture::NextTrack => self.player_gesture(ctx, SceneMachine::next_track),
            Gesture::PrevTrack => self.player_gesture(ctx, SceneMachine::prev_track),
            Gesture::Seek(position) => self.intro.seek(ctx, position).is_some(),
            Gesture::Decorate => self.decor.begin(ctx, now),
            Gesture::SelectGift(gift) => {
                let before = ctx.outbox.len();
                self.decor.select_gift(ctx, gift);
                ctx.outbox.len() > before
            }
            Gesture::OpenEnvelope => {
                let before = ctx.outbox.len();
                self.decor.open_envelope(ctx);
                ctx.outbox.len() > before
            }
            Gesture::CloseGift => {
                let before = ctx.outbox.len();
                self.decor.close_gift(ctx);
                ctx.outbox.len() > before
            }
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Runs one tick: due timers, then this tick's inputs, then publishing.
    ///
    /// Timers go first so gestures are judged against everything that was
    /// due by `now`.
    pub(crate) fn update(&mut self, ctx: &mut GlobalContext, frame: &[FrameEvent], now: Duration) {
        self.tick(ctx, now);

        for event in frame {
            match *event {
                FrameEvent::Key(key) => match self.bindings.resolve(self.page, key) {
                    Some(gesture) => {
                        self.gesture(ctx, gesture, now);
                    }
                    None => trace!("Unbound key {:?} on {:?} page", key, self.page),
                },
                FrameEvent::Media(media) => {
                    if let Some(notice) = ctx.apply_media_event(media) {
                        match self.page {
                            Page::Intro => self.intro.on_playback(ctx, notice),
                            Page::Decoration => self.decor.on_playback(ctx, notice),
                        }
                    }
                }
            }
        }

        self.publish(ctx);
    }

    /// Fires the active page's due timers.
    pub fn tick(&mut self, ctx: &mut GlobalContext, now: Duration) {
        match self.page {
            Page::Intro => self.intro.tick(ctx, now),
            Page::Decoration => self.decor.tick(ctx, now),
        }
    }

    /// Drains the outbox into every observer. Returns the drained events.
    pub fn publish(&mut self, ctx: &mut GlobalContext) -> Vec<ShowEvent> {
        let events = ctx.outbox.take();
        for event in &events {
            for observer in &mut self.observers {
                observer(event);
            }
        }
        events
    }

    /// Stops both pages' timers and sessions.
    pub fn teardown(&mut self, ctx: &mut GlobalContext) {
        self.intro.teardown(ctx);
        self.decor.teardown(ctx);
    }

    //--- Queries ----------------------------------------------------------

    pub fn page(&self) -> Page {
        self.page
    }

    //--- Internal Helpers -------------------------------------------------

    fn player_gesture(
        &mut self,
        ctx: &mut GlobalContext,
        action: fn(&mut SceneMachine, &mut GlobalContext),
    ) -> bool {
        let before = ctx.outbox.len();
        action(&mut self.intro, ctx);
        ctx.outbox.len() > before
    }
}

impl Default for GlobalSystems {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GlobalSystems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalSystems")
            .field("page", &self.page)
            .field("intro", &self.intro)
            .field("decor", &self.decor)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
