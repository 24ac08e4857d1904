//=========================================================================
// Core Systems Orchestrator
//=========================================================================
//
// Central coordinator for the show running on the logic (non-platform)
// thread.
//
// Responsibilities:
// - Own GlobalSystems (logic) and GlobalContext (data)
// - Receive platform and media events via the bounded channel
// - Maintain deterministic pacing using a fixed tick rate (TPS)
// - Feed every tick the elapsed time since the thread started
//
// Notes:
// The orchestrator runs independently from the platform layer. All show
// state is mutated on this one thread; communication with the platform
// and media backends occurs only through message passing.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::{debug, info};

//=== Module Declarations =================================================

pub mod decor;
pub mod events;
pub mod globals;
pub mod input;
pub mod media;
pub mod platform_bridge;
pub mod player;
pub mod scene;
pub mod timeline;

//=== Internal Dependencies ===============================================

use globals::{GlobalContext, GlobalSystems};
use platform_bridge::{EventCollector, FrameEvent, PlatformEvent, TickControl};

//=== Clock ===============================================================

/// Monotonic time since the logic thread started.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Clock {
    origin: Instant,
}

impl Clock {
    pub(crate) fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub(crate) fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

//=== CoreSystemsOrchestrator =============================================

/// Owns the show's systems and context and ticks them at a fixed rate.
pub(crate) struct CoreSystemsOrchestrator {
    systems: GlobalSystems,
    context: GlobalContext,
}

impl CoreSystemsOrchestrator {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(systems: GlobalSystems) -> Self {
        Self {
            systems,
            context: GlobalContext::new(),
        }
    }

    /// Gives the host one chance to configure systems and context.
    pub(crate) fn init_systems<F>(&mut self, init_fn: F)
    where
        F: FnOnce(&mut GlobalSystems, &mut GlobalContext),
    {
        init_fn(&mut self.systems, &mut self.context);
    }

    //--- Thread -----------------------------------------------------------

    /// Spawns the logic thread, ticking at `tps` until the window closes
    /// or every sender is dropped.
    ///
    /// Each tick:
    ///  1. Collects platform and media events
    ///  2. Runs timers, gestures, and media notices
    ///  3. Publishes show events to observers
    ///  4. Sleeps to maintain fixed pacing
    pub(crate) fn spawn_core_thread(
        mut self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut collector = EventCollector::new(receiver);
            let clock = Clock::start();
            info!("Core thread started ({:?} per tick)", frame_duration);

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if collector.collect_frame() == TickControl::Exit {
                    info!("Core thread exiting.");
                    break;
                }

                //--- Step 2 & 3: Update and publish ------------------------
                self.run_frame(collector.frame(), clock.now());

                //--- Step 4: Maintain deterministic pacing ----------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }

            self.shutdown();
        })
    }

    /// Runs one tick against an explicit time.
    pub(crate) fn run_frame(&mut self, frame: &[FrameEvent], now: Duration) {
        self.systems.update(&mut self.context, frame, now);
    }

    fn shutdown(&mut self) {
        debug!("Tearing down show state");
        self.systems.teardown(&mut self.context);
        self.systems.publish(&mut self.context);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
