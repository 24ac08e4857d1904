//=========================================================================
// Scene System
//=========================================================================
//
// The presentation's top-level phases and the table that links them.
//
// Architecture:
//   SceneMachine
//     ├─ scene: Scene, step: Step
//     ├─ sequencer: Sequencer<Cue>   (armed from Script per scene)
//     └─ player: EmbeddedPlayer      (Player scene only)
//
// Flow:
//   tick(now) → Sequencer::next_due() → Cue::Step / Cue::Advance
//                                            ↓
//                               Scene::successor(Trigger)
//
//=========================================================================

//=== External Dependencies ===============================================

use serde::Deserialize;

//=== Module Declarations =================================================

mod machine;
mod script;

//=== Public API ==========================================================

pub use machine::SceneMachine;
pub use script::{Cue, Script};

/// Sub-phase counter within a scene.
pub type Step = u32;

//=== Scene ===============================================================

/// Top-level phase of the presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scene {
    /// Spotlight and speech bubbles, waiting on the start gesture.
    Intro,

    /// First scripted conversation.
    Dialogue,

    /// Hand-over conversation leading into the media scene.
    Transition,

    /// Full-screen video with its ambient track.
    Media,

    /// Second conversation, ending on a manual gate.
    Dialogue2,

    /// Embedded music player; exits only through the explore hand-off.
    Player,
}

//=== Trigger =============================================================

/// What caused a transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// A scheduled cue fired.
    Timer,

    /// The user pressed a button.
    UserAction,
}

impl Scene {
    pub const COUNT: usize = 6;

    pub const ALL: [Scene; Self::COUNT] = [
        Scene::Intro,
        Scene::Dialogue,
        Scene::Transition,
        Scene::Media,
        Scene::Dialogue2,
        Scene::Player,
    ];

    /// The transition table.
    ///
    /// Returns the scene that follows `self` for the given trigger, or
    /// `None` when that trigger has no edge out of `self`.
    pub const fn successor(self, trigger: Trigger) -> Option<Scene> {
        match (self, trigger) {
            (Scene::Intro, _) => Some(Scene::Dialogue),
            (Scene::Dialogue, Trigger::Timer) => Some(Scene::Transition),
            (Scene::Transition, Trigger::Timer) => Some(Scene::Media),
            (Scene::Media, Trigger::Timer) => Some(Scene::Dialogue2),
            (Scene::Dialogue2, Trigger::UserAction) => Some(Scene::Player),
            _ => None,
        }
    }

    /// Whether reaching the final step is itself the timer edge.
    pub const fn advances_on_final_step(self) -> bool {
        matches!(self, Scene::Intro)
    }

    /// Scenes whose entry starts the ambient track.
    pub const fn owns_ambient_track(self) -> bool {
        matches!(self, Scene::Media)
    }

    pub const fn hosts_player(self) -> bool {
        matches!(self, Scene::Player)
    }

    /// No successor in the table; leaves only through the hand-off.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Scene::Player)
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

//=== AmbientMode =========================================================

/// What an ambient track does when it reaches its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmbientMode {
    /// Release the channel.
    #[default]
    Stop,

    /// Restart from the beginning.
    Loop,
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_edges_form_the_scripted_chain() {
        assert_eq!(Scene::Intro.successor(Trigger::Timer), Some(Scene::Dialogue));
        assert_eq!(Scene::Dialogue.successor(Trigger::Timer), Some(Scene::Transition));
        assert_eq!(Scene::Transition.successor(Trigger::Timer), Some(Scene::Media));
        assert_eq!(Scene::Media.successor(Trigger::Timer), Some(Scene::Dialogue2));
    }

    #[test]
    fn dialogue2_has_no_timer_edge() {
        assert_eq!(Scene::Dialogue2.successor(Trigger::Timer), None);
        assert_eq!(Scene::Dialogue2.successor(Trigger::UserAction), Some(Scene::Player));
    }

    #[test]
    fn intro_can_be_skipped_by_user() {
        assert_eq!(Scene::Intro.successor(Trigger::UserAction), Some(Scene::Dialogue));
    }

    #[test]
    fn player_is_terminal() {
        assert!(Scene::Player.is_terminal());
        assert_eq!(Scene::Player.successor(Trigger::Timer), None);
        assert_eq!(Scene::Player.successor(Trigger::UserAction), None);
    }

    #[test]
    fn timed_scenes_cannot_be_skipped() {
        for scene in [Scene::Dialogue, Scene::Transition, Scene::Media] {
            assert_eq!(scene.successor(Trigger::UserAction), None);
        }
    }

    #[test]
    fn indices_follow_declaration_order() {
        for (i, scene) in Scene::ALL.iter().enumerate() {
            assert_eq!(scene.index(), i);
        }
    }
}
