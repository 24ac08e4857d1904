//=========================================================================
// Scene Script
//=========================================================================
//
// The fixed timeline of every scene, as data.
//
// Each scene gets one schedule of cues measured from the moment the scene
// is entered. A cue either bumps the step counter or asks the machine to
// advance along the timer edge of the transition table. Cues never name a
// target scene, so a script cannot express an illegal transition.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{Scene, Step};
use crate::core::media::MediaId;
use crate::core::timeline::Schedule;

//=== Cue =================================================================

/// Action carried by a scene's timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Raise the current scene's step to this value.
    Step(Step),

    /// Follow the scene's timer-driven transition.
    Advance,
}

//--- Built-in Timings ----------------------------------------------------

const INTRO: &[(u64, Cue)] = &[
    (2000, Cue::Step(1)),
    (4000, Cue::Step(2)),
    (6000, Cue::Step(3)),
    (8000, Cue::Step(4)),
    (10000, Cue::Step(5)),
];

const DIALOGUE: &[(u64, Cue)] = &[
    (1500, Cue::Step(1)),
    (4000, Cue::Step(2)),
    (6500, Cue::Step(3)),
    (9000, Cue::Step(4)),
    (12000, Cue::Advance),
];

const TRANSITION: &[(u64, Cue)] = &[
    (1000, Cue::Step(1)),
    (4000, Cue::Step(2)),
    (7000, Cue::Step(3)),
    (10000, Cue::Advance),
];

const MEDIA: &[(u64, Cue)] = &[(30000, Cue::Advance)];

const DIALOGUE2: &[(u64, Cue)] = &[(1000, Cue::Step(1)), (5000, Cue::Step(2))];

const AMBIENT_TRACK: &str = "weird";

//=== Script ==============================================================

/// Per-scene schedules plus the media the fixed scenes use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    schedules: [Schedule<Cue>; Scene::COUNT],
    ambient_track: MediaId,
}

impl Script {
    /// The presentation's built-in timings.
    pub fn standard() -> Self {
        Self {
            schedules: [
                Schedule::from_millis(INTRO),
                Schedule::from_millis(DIALOGUE),
                Schedule::from_millis(TRANSITION),
                Schedule::from_millis(MEDIA),
                Schedule::from_millis(DIALOGUE2),
                Schedule::empty(),
            ],
            ambient_track: MediaId::new(AMBIENT_TRACK),
        }
    }

    /// Replaces one scene's schedule.
    pub fn with_schedule(mut self, scene: Scene, schedule: Schedule<Cue>) -> Self {
        self.schedules[scene.index()] = schedule;
        self
    }

    /// Replaces the media id of the ambient track.
    pub fn with_ambient_track(mut self, id: impl Into<MediaId>) -> Self {
        self.ambient_track = id.into();
        self
    }

    pub fn schedule(&self, scene: Scene) -> &Schedule<Cue> {
        &self.schedules[scene.index()]
    }

    /// Highest step any cue of `scene` reaches (0 when it has none).
    pub fn final_step(&self, scene: Scene) -> Step {
        self.schedule(scene)
            .iter()
            .filter_map(|entry| match entry.action {
                Cue::Step(step) => Some(step),
                Cue::Advance => None,
            })
            .max()
            .unwrap_or(0)
    }

    pub fn ambient_track(&self) -> &MediaId {
        &self.ambient_track
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::standard()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
