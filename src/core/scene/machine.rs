//=========================================================================
// Scene Machine
//=========================================================================
//
// Owns the current scene, its step, and the timers that move them.
//
// Lifecycle of a scene:
//   enter(scene, at)
//     ├─ exit_current()      cancel timers, stop owned session
//     ├─ step = 0, SceneEntered
//     ├─ start ambient track / player if the scene owns one
//     └─ arm the scene's schedule with `at` as zero point
//
// Every exit path (timer, user action, explore, teardown) goes through
// exit_current(), so no cue of a left scene can fire afterwards.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::time::Duration;

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::{AmbientMode, Cue, Scene, Script, Step, Trigger};
use crate::core::events::ShowEvent;
use crate::core::globals::GlobalContext;
use crate::core::media::{PlaybackNotice, SessionOwner};
use crate::core::player::{EmbeddedPlayer, Playlist};
use crate::core::timeline::{Fired, Sequencer};

//=== SceneMachine ========================================================

/// Callback invoked once when the player scene hands control away.
pub type ExploreHook = Box<dyn FnMut() + Send>;

/// Single owned state machine driving the scripted intro sequence.
///
/// The presentation layer renders from `(scene(), step())` and the
/// [`ShowEvent`]s pushed into the context's outbox.
pub struct SceneMachine {
    scene: Scene,
    step: Step,
    started: bool,
    handed_off: bool,
    torn_down: bool,
    script: Script,
    sequencer: Sequencer<Cue>,
    player: EmbeddedPlayer,
    ambient: AmbientMode,
    on_explore: Option<ExploreHook>,
}

impl SceneMachine {
    //--- Construction -----------------------------------------------------

    /// Creates a machine idling in `Intro` at step 0. Nothing is armed
    /// until [`SceneMachine::start`].
    pub fn new(script: Script, playlist: Playlist) -> Self {
        Self {
            scene: Scene::Intro,
            step: 0,
            started: false,
            handed_off: false,
            torn_down: false,
            script,
            sequencer: Sequencer::new(),
            player: EmbeddedPlayer::new(playlist),
            ambient: AmbientMode::default(),
            on_explore: None,
        }
    }

    pub fn with_ambient_mode(mut self, mode: AmbientMode) -> Self {
        self.ambient = mode;
        self
    }

    /// Registers the explore call-out, replacing any previous one.
    pub fn set_on_explore<F>(&mut self, hook: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.on_explore = Some(Box::new(hook));
    }

    //--- User Actions -----------------------------------------------------

    /// Begins the show. Returns `false` if it had already begun or was
    /// torn down.
    pub fn start(&mut self, ctx: &mut GlobalContext, now: Duration) -> bool {
        if self.started || self.torn_down {
            debug!("Start ignored: show already running");
            return false;
        }

        self.started = true;
        self.enter(ctx, Scene::Intro, now);
        true
    }

    /// Leaves `Intro` immediately ("turn on the lights").
    pub fn skip_intro(&mut self, ctx: &mut GlobalContext, now: Duration) -> bool {
        if !self.started || self.torn_down || self.scene != Scene::Intro {
            debug!("Skip ignored in {:?}", self.scene);
            return false;
        }

        self.transition(ctx, Trigger::UserAction, now)
    }

    /// Moves from `Dialogue2` into the player once its last line is shown.
    pub fn lets_party(&mut self, ctx: &mut GlobalContext, now: Duration) -> bool {
        if self.torn_down
            || self.scene != Scene::Dialogue2
            || self.step < self.script.final_step(Scene::Dialogue2)
        {
            debug!("Party ignored in {:?} at step {}", self.scene, self.step);
            return false;
        }

        self.transition(ctx, Trigger::UserAction, now)
    }

    /// Hands control to the outside world from the player scene.
    ///
    /// Tears the machine down, publishes [`ShowEvent::ExploreHandedOff`]
    /// and calls the explore hook. Only the first call has any effect.
    pub fn explore(&mut self, ctx: &mut GlobalContext) -> bool {
        if self.scene != Scene::Player || self.handed_off || self.torn_down {
            debug!("Explore ignored in {:?}", self.scene);
            return false;
        }

        self.handed_off = true;
        self.teardown(ctx);
        ctx.outbox.push(ShowEvent::ExploreHandedOff);
        debug!("Explore hand-off");

        if let Some(hook) = self.on_explore.as_mut() {
            hook();
        }
        true
    }

    //--- Player Gestures --------------------------------------------------

    pub fn toggle_play(&mut self, ctx: &mut GlobalContext) {
        if self.player_active() {
            self.player.toggle_play(ctx);
        }
    }

    pub fn next_track(&mut self, ctx: &mut GlobalContext) {
        if self.player_active() {
            self.player.next(ctx);
        }
    }

    pub fn prev_track(&mut self, ctx: &mut GlobalContext) {
        if self.player_active() {
            self.player.prev(ctx);
        }
    }

    pub fn seek(&mut self, ctx: &mut GlobalContext, position: Duration) -> Option<Duration> {
        if !self.player_active() {
            return None;
        }
        self.player.seek(ctx, position)
    }

    //--- Tick & Notifications ---------------------------------------------

    /// Fires every cue due at `now`, in deadline order.
    ///
    /// Cues are taken one at a time so that a cue which changes scene
    /// cancels the rest of the old scene's cues before they are looked at.
    pub fn tick(&mut self, ctx: &mut GlobalContext, now: Duration) {
        while let Some(fired) = self.sequencer.next_due(now) {
            self.apply(ctx, fired);
        }
    }

    /// Reacts to playback reports for sessions this machine owns.
    pub fn on_playback(&mut self, ctx: &mut GlobalContext, notice: PlaybackNotice) {
        let PlaybackNotice::Ended { owner } = notice else {
            return;
        };
        if self.torn_down {
            return;
        }

        match owner {
            SessionOwner::Player if self.player_active() => self.player.on_ended(ctx),
            SessionOwner::Ambient if self.scene.owns_ambient_track() => match self.ambient {
                AmbientMode::Loop => {
                    trace!("Looping ambient track");
                    ctx.playback.seek(Duration::ZERO);
                    // Blocked replay just leaves the track silent
                    if ctx.playback.play().is_ok() {
                        ctx.outbox.push(ShowEvent::PlayStateChanged { playing: true });
                    }
                }
                AmbientMode::Stop => ctx.stop_session(SessionOwner::Ambient),
            },
            _ => trace!("Ignoring end of {:?} session in {:?}", owner, self.scene),
        }
    }

    /// Cancels pending cues and stops any session a scene owns.
    ///
    /// Final: every later action and gesture is ignored.
    pub fn teardown(&mut self, ctx: &mut GlobalContext) {
        self.torn_down = true;
        self.exit_current(ctx);
    }

    //--- Queries ----------------------------------------------------------

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_handed_off(&self) -> bool {
        self.handed_off
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn player(&self) -> &EmbeddedPlayer {
        &self.player
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    /// Number of cues still armed for the current scene.
    pub fn pending_cues(&self) -> usize {
        self.sequencer.pending()
    }

    //--- Internal Helpers -------------------------------------------------

    fn player_active(&self) -> bool {
        self.scene.hosts_player() && !self.handed_off && !self.torn_down
    }

    fn apply(&mut self, ctx: &mut GlobalContext, fired: Fired<Cue>) {
        match fired.action {
            Cue::Step(step) if step > self.step => {
                self.step = step;
                trace!("{:?} step {}", self.scene, step);
                ctx.outbox.push(ShowEvent::StepAdvanced {
                    scene: self.scene,
                    step,
                });

                if self.scene.advances_on_final_step() && step >= self.script.final_step(self.scene) {
                    self.transition(ctx, Trigger::Timer, fired.deadline);
                }
            }
            Cue::Step(step) => {
                warn!("Dropping cue for step {} at step {} of {:?}", step, self.step, self.scene);
            }
            Cue::Advance => {
                self.transition(ctx, Trigger::Timer, fired.deadline);
            }
        }
    }

    fn transition(&mut self, ctx: &mut GlobalContext, trigger: Trigger, at: Duration) -> bool {
        match self.scene.successor(trigger) {
            Some(next) => {
                self.enter(ctx, next, at);
                true
            }
            None => {
                warn!("No {:?} transition out of {:?}", trigger, self.scene);
                false
            }
        }
    }

    fn enter(&mut self, ctx: &mut GlobalContext, scene: Scene, at: Duration) {
        self.exit_current(ctx);

        debug!("Entering {:?} at {:?}", scene, at);
        self.scene = scene;
        self.step = 0;
        ctx.outbox.push(ShowEvent::SceneEntered { scene });

        if scene.owns_ambient_track() {
            let track = self.script.ambient_track().clone();
            ctx.start_session(&track, SessionOwner::Ambient);
        }
        if scene.hosts_player() {
            self.player.enter(ctx);
        }

        let cues = self.script.schedule(scene).iter().copied();
        if let Err(e) = self.sequencer.schedule(at, cues) {
            warn!("Could not arm {:?}: {}", scene, e);
        }
    }

    fn exit_current(&mut self, ctx: &mut GlobalContext) {
        self.sequencer.cancel_all();

        if self.scene.owns_ambient_track() {
            ctx.stop_session(SessionOwner::Ambient);
        }
        if self.scene.hosts_player() {
            self.player.leave(ctx);
        }
    }
}

impl Default for SceneMachine {
    fn default() -> Self {
        Self::new(Script::standard(), Playlist::mixtape())
    }
}

impl fmt::Debug for SceneMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneMachine")
            .field("scene", &self.scene)
            .field("step", &self.step)
            .field("started", &self.started)
            .field("handed_off", &self.handed_off)
            .field("torn_down", &self.torn_down)
            .field("pending", &self.sequencer.pending())
            .field("ambient", &self.ambient)
            .finish_non_exhaustive()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::core::media::test_support::{CallLog, RecordingChannel};
    use crate::core::media::{MediaEvent, MediaId, MediaKind};

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn setup() -> (SceneMachine, GlobalContext, CallLog) {
        let (channel, calls) = RecordingChannel::new();
        let mut ctx = GlobalContext::with_channel(Box::new(channel));
        ctx.media.register("weird", MediaKind::Audio, "weird.mp3");
        for id in ["song1", "song2", "song3"] {
            ctx.media.register(id, MediaKind::Audio, format!("{}.mp3", id));
        }
        (SceneMachine::default(), ctx, calls)
    }

    /// Drives a started machine into `Dialogue2` at its final step.
    fn reach_dialogue2(machine: &mut SceneMachine, ctx: &mut GlobalContext) -> Duration {
        machine.start(ctx, Duration::ZERO);
        // 10 s intro + 12 s dialogue + 10 s transition + 30 s media + 5 s
        let now = ms(67_000);
        machine.tick(ctx, now);
        assert_eq!(machine.scene(), Scene::Dialogue2);
        assert_eq!(machine.step(), 2);
        now
    }

    fn reach_player(machine: &mut SceneMachine, ctx: &mut GlobalContext) -> Duration {
        let now = reach_dialogue2(machine, ctx);
        assert!(machine.lets_party(ctx, now));
        now
    }

    #[test]
    fn nothing_happens_before_start() {
        let (mut machine, mut ctx, _calls) = setup();

        machine.tick(&mut ctx, ms(60_000));

        assert_eq!(machine.scene(), Scene::Intro);
        assert_eq!(machine.step(), 0);
        assert!(ctx.outbox.is_empty());
    }

    #[test]
    fn start_reaches_step_one_after_two_seconds() {
        let (mut machine, mut ctx, _calls) = setup();
        machine.start(&mut ctx, Duration::ZERO);

        machine.tick(&mut ctx, ms(1999));
        assert_eq!(machine.step(), 0);

        machine.tick(&mut ctx, ms(2000));
        assert_eq!(machine.step(), 1);
    }

    #[test]
    fn final_intro_step_advances_to_dialogue() {
        let (mut machine, mut ctx, _calls) = setup();
        machine.start(&mut ctx, Duration::ZERO);
        machine.tick(&mut ctx, ms(2000));
        ctx.outbox.clear();

        machine.tick(&mut ctx, ms(10_000));

        assert_eq!(machine.scene(), Scene::Dialogue);
        assert_eq!(machine.step(), 0);
        let events = ctx.outbox.take();
        assert_eq!(
            events.last(),
            Some(&ShowEvent::SceneEntered { scene: Scene::Dialogue })
        );
        assert!(events.contains(&ShowEvent::StepAdvanced {
            scene: Scene::Intro,
            step: 5
        }));
    }

    #[test]
    fn second_start_is_ignored() {
        let (mut machine, mut ctx, _calls) = setup();
        assert!(machine.start(&mut ctx, Duration::ZERO));
        machine.tick(&mut ctx, ms(4000));

        assert!(!machine.start(&mut ctx, ms(4000)));
        assert_eq!(machine.step(), 2);
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let (mut machine, mut ctx, _calls) = setup();
        machine.start(&mut ctx, Duration::ZERO);
        machine.teardown(&mut ctx);
        ctx.outbox.clear();

        machine.tick(&mut ctx, ms(120_000));

        assert_eq!(machine.scene(), Scene::Intro);
        assert_eq!(machine.step(), 0);
        assert!(ctx.outbox.is_empty());
    }

    #[test]
    fn teardown_in_any_scene_silences_its_timers() {
        let cases = [
            (ms(3000), Scene::Intro),
            (ms(15_000), Scene::Dialogue),
            (ms(25_000), Scene::Transition),
            (ms(40_000), Scene::Media),
            (ms(63_500), Scene::Dialogue2),
        ];

        for (at, scene) in cases {
            let (mut machine, mut ctx, _calls) = setup();
            machine.start(&mut ctx, Duration::ZERO);
            machine.tick(&mut ctx, at);
            assert_eq!(machine.scene(), scene);
            if scene == Scene::Media {
                assert_eq!(ctx.playback.owner(), Some(SessionOwner::Ambient));
            }
            let step = machine.step();

            machine.teardown(&mut ctx);
            ctx.outbox.clear();
            machine.tick(&mut ctx, Duration::from_secs(10_000));

            assert_eq!(machine.scene(), scene, "scene changed after teardown in {:?}", scene);
            assert_eq!(machine.step(), step, "step changed after teardown in {:?}", scene);
            assert_eq!(machine.pending_cues(), 0);
            assert!(ctx.outbox.is_empty(), "events after teardown in {:?}", scene);
            assert!(!ctx.playback.is_active(), "session alive after teardown in {:?}", scene);
        }
    }

    #[test]
    fn torn_down_machine_ignores_user_actions() {
        let (mut machine, mut ctx, _calls) = setup();
        let now = reach_dialogue2(&mut machine, &mut ctx);
        machine.teardown(&mut ctx);
        ctx.outbox.clear();

        assert!(!machine.lets_party(&mut ctx, now + ms(1000)));
        machine.next_track(&mut ctx);

        assert!(machine.is_torn_down());
        assert_eq!(machine.scene(), Scene::Dialogue2);
        assert!(!ctx.playback.is_active());
        assert_eq!(machine.pending_cues(), 0);
        assert!(ctx.outbox.is_empty());
    }

    #[test]
    fn torn_down_intro_cannot_be_skipped_or_restarted() {
        let (mut machine, mut ctx, _calls) = setup();
        machine.teardown(&mut ctx);
        assert!(!machine.start(&mut ctx, Duration::ZERO));

        let (mut machine, mut ctx, _calls) = setup();
        machine.start(&mut ctx, Duration::ZERO);
        machine.teardown(&mut ctx);

        assert!(!machine.skip_intro(&mut ctx, ms(1)));
        assert_eq!(machine.scene(), Scene::Intro);
        assert_eq!(machine.pending_cues(), 0);
    }

    #[test]
    fn skip_leaves_intro_and_drops_its_cues() {
        let (mut machine, mut ctx, _calls) = setup();
        machine.start(&mut ctx, Duration::ZERO);
        machine.tick(&mut ctx, ms(3000));

        assert!(machine.skip_intro(&mut ctx, ms(3000)));
        assert_eq!(machine.scene(), Scene::Dialogue);

        // Intro's 4000 ms cue must not bump Dialogue's step
        machine.tick(&mut ctx, ms(4000));
        assert_eq!(machine.step(), 0);

        // Dialogue's own timeline runs from the skip
        machine.tick(&mut ctx, ms(4500));
        assert_eq!(machine.step(), 1);
    }

    #[test]
    fn skip_requires_start_and_intro() {
        let (mut machine, mut ctx, _calls) = setup();
        assert!(!machine.skip_intro(&mut ctx, Duration::ZERO));

        machine.start(&mut ctx, Duration::ZERO);
        machine.tick(&mut ctx, ms(10_000));
        assert!(!machine.skip_intro(&mut ctx, ms(10_000)));
        assert_eq!(machine.scene(), Scene::Dialogue);
    }

    #[test]
    fn timed_scenes_chain_to_dialogue2() {
        let (mut machine, mut ctx, _calls) = setup();
        machine.start(&mut ctx, Duration::ZERO);

        machine.tick(&mut ctx, ms(22_000));
        assert_eq!(machine.scene(), Scene::Transition);

        machine.tick(&mut ctx, ms(32_000));
        assert_eq!(machine.scene(), Scene::Media);

        machine.tick(&mut ctx, ms(62_000));
        assert_eq!(machine.scene(), Scene::Dialogue2);
    }

    #[test]
    fn one_coarse_tick_keeps_scene_zero_points() {
        let (mut machine, mut ctx, _calls) = setup();
        machine.start(&mut ctx, Duration::ZERO);

        machine.tick(&mut ctx, ms(62_999));
        assert_eq!(machine.scene(), Scene::Dialogue2);
        assert_eq!(machine.step(), 0);

        machine.tick(&mut ctx, ms(63_000));
        assert_eq!(machine.step(), 1);
    }

    #[test]
    fn media_scene_starts_and_stops_ambient_track() {
        let (mut machine, mut ctx, calls) = setup();
        machine.start(&mut ctx, Duration::ZERO);

        machine.tick(&mut ctx, ms(32_000));
        assert_eq!(ctx.playback.owner(), Some(SessionOwner::Ambient));
        assert_eq!(calls.opened(), vec![MediaId::from("weird")]);

        machine.tick(&mut ctx, ms(62_000));
        assert_eq!(machine.scene(), Scene::Dialogue2);
        assert!(!ctx.playback.is_active());
    }

    #[test]
    fn ambient_end_never_changes_scene() {
        let (mut machine, mut ctx, _calls) = setup();
        machine.start(&mut ctx, Duration::ZERO);
        machine.tick(&mut ctx, ms(32_000));
        let session = ctx.playback.session().unwrap().id();

        let notice = ctx.apply_media_event(MediaEvent::Ended { session }).unwrap();
        machine.on_playback(&mut ctx, notice);

        assert_eq!(machine.scene(), Scene::Media);
        assert!(!ctx.playback.is_active());
    }

    #[test]
    fn looping_ambient_track_restarts() {
        let (channel, _calls) = RecordingChannel::new();
        let mut ctx = GlobalContext::with_channel(Box::new(channel));
        ctx.media.register("weird", MediaKind::Audio, "weird.mp3");
        let mut machine = SceneMachine::default().with_ambient_mode(AmbientMode::Loop);
        machine.start(&mut ctx, Duration::ZERO);
        machine.tick(&mut ctx, ms(32_000));
        let session = ctx.playback.session().unwrap().id();
        ctx.outbox.clear();

        let notice = ctx.apply_media_event(MediaEvent::Ended { session }).unwrap();
        machine.on_playback(&mut ctx, notice);

        assert!(ctx.playback.is_playing());
        assert_eq!(ctx.playback.session().unwrap().id(), session);
        assert_eq!(ctx.outbox.take(), vec![ShowEvent::PlayStateChanged { playing: true }]);
    }

    #[test]
    fn missing_ambient_track_does_not_block_progress() {
        let mut ctx = GlobalContext::new();
        let mut machine = SceneMachine::default();
        machine.start(&mut ctx, Duration::ZERO);

        machine.tick(&mut ctx, ms(62_000));

        assert_eq!(machine.scene(), Scene::Dialogue2);
    }

    #[test]
    fn dialogue2_waits_for_user() {
        let (mut machine, mut ctx, _calls) = setup();
        reach_dialogue2(&mut machine, &mut ctx);

        machine.tick(&mut ctx, ms(600_000));

        assert_eq!(machine.scene(), Scene::Dialogue2);
        assert_eq!(machine.step(), 2);
    }

    #[test]
    fn party_needs_final_dialogue2_step() {
        let (mut machine, mut ctx, _calls) = setup();
        machine.start(&mut ctx, Duration::ZERO);
        machine.tick(&mut ctx, ms(63_000));
        assert_eq!(machine.step(), 1);

        assert!(!machine.lets_party(&mut ctx, ms(63_000)));
        assert_eq!(machine.scene(), Scene::Dialogue2);
    }

    #[test]
    fn party_enters_player_with_first_track() {
        let (mut machine, mut ctx, calls) = setup();
        reach_player(&mut machine, &mut ctx);

        assert_eq!(machine.scene(), Scene::Player);
        assert_eq!(machine.player().index(), 0);
        assert_eq!(calls.opened().last(), Some(&MediaId::from("song1")));
        assert!(ctx.playback.is_playing());
        assert_eq!(machine.pending_cues(), 0);
    }

    #[test]
    fn player_gestures_only_work_in_player() {
        let (mut machine, mut ctx, _calls) = setup();
        machine.start(&mut ctx, Duration::ZERO);

        machine.next_track(&mut ctx);
        assert_eq!(machine.player().index(), 0);
        assert!(!ctx.playback.is_active());
    }

    #[test]
    fn player_end_advances_track() {
        let (mut machine, mut ctx, _calls) = setup();
        reach_player(&mut machine, &mut ctx);
        let session = ctx.playback.session().unwrap().id();

        let notice = ctx.apply_media_event(MediaEvent::Ended { session }).unwrap();
        machine.on_playback(&mut ctx, notice);

        assert_eq!(machine.player().index(), 1);
        assert_eq!(machine.scene(), Scene::Player);
    }

    #[test]
    fn explore_hands_off_once() {
        let (mut machine, mut ctx, _calls) = setup();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        machine.set_on_explore(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        reach_player(&mut machine, &mut ctx);
        ctx.outbox.clear();

        assert!(machine.explore(&mut ctx));
        assert!(!machine.explore(&mut ctx));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(machine.is_handed_off());
        assert!(!ctx.playback.is_active());
        assert_eq!(ctx.outbox.iter().last(), Some(&ShowEvent::ExploreHandedOff));
    }

    #[test]
    fn explore_outside_player_is_ignored() {
        let (mut machine, mut ctx, _calls) = setup();
        reach_dialogue2(&mut machine, &mut ctx);

        assert!(!machine.explore(&mut ctx));
        assert!(!machine.is_handed_off());
    }
}
