//=========================================================================
// Reveal Engine
//
// Main entry point and coordinator for the show runtime.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_config()           ├─ init()
//         ├─ with_tps()              ├─ media_sink()
//         └─ with_channel_capacity() └─ run(): spawns logic thread,
//                                       runs platform, blocks until exit
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::config::EngineConfig;
use crate::core::globals::{GlobalContext, GlobalSystems};
use crate::core::platform_bridge::{MediaEventSink, PlatformEvent};
use crate::core::CoreSystemsOrchestrator;
use crate::platform::Platform;

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 events
/// - **Window title**: "Reveal"
///
/// # Examples
///
/// Simple usage with defaults:
/// ```no_run
/// use reveal_engine::EngineBuilder;
///
/// EngineBuilder::new().build().run();
/// ```
///
/// From a config file, with media registered before the show starts:
/// ```no_run
/// use reveal_engine::{EngineBuilder, EngineConfig};
/// use reveal_engine::core::media::MediaKind;
///
/// let config = EngineConfig::load("reveal.toml").unwrap_or_default();
///
/// EngineBuilder::new()
///     .with_config(config)
///     .build()
///     .init(|systems, ctx| {
///         ctx.media.register("weird", MediaKind::Audio, "media/weird.mp3");
///         systems.add_observer(|event| println!("{:?}", event));
///     })
///     .run();
/// ```
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    config: EngineConfig,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        let config = EngineConfig::default();
        Self {
            tps: config.tps,
            channel_capacity: config.channel_capacity,
            config,
        }
    }

    /// Adopts every setting from `config`.
    ///
    /// Later `with_tps` / `with_channel_capacity` calls still override.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`EngineConfig::validate`]; configs from
    /// [`EngineConfig::load`] are already validated.
    pub fn with_config(self, config: EngineConfig) -> Self {
        let tps = config.tps;
        let capacity = config.channel_capacity;
        Self { config, ..self }
            .with_tps(tps)
            .with_channel_capacity(capacity)
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// Higher values fire timeline cues closer to their deadlines, at the
    /// cost of CPU usage.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Builds the engine instance.
    ///
    /// The platform → core channel is created here so a
    /// [`MediaEventSink`] can be handed out before [`Engine::run`].
    pub fn build(self) -> Engine {
        info!("Building engine (TPS: {}, channel: {})", self.tps, self.channel_capacity);

        let (sender, receiver): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);

        Engine {
            orchestrator: CoreSystemsOrchestrator::new(GlobalSystems::from_config(&self.config)),
            sender,
            receiver,
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            title: self.config.window_title,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Reveal Engine runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► SceneMachine, DecorStage, PlaybackController
///   │
///   ├─► Platform (Event Loop)
///   │     └─► Window, key presses
///   │
///   └─► MediaEventSink (any thread)
///         └─► media backend callbacks
///
/// Communication: bounded channel (PlatformEvent)
/// ```
pub struct Engine {
    orchestrator: CoreSystemsOrchestrator,
    sender: Sender<PlatformEvent>,
    receiver: Receiver<PlatformEvent>,
    tps: f64,
    channel_capacity: usize,
    title: String,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Configures systems and context before execution.
    ///
    /// Typical uses: register media, swap the output channel, rebind keys,
    /// add observers, set the explore hook.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut GlobalSystems, &mut GlobalContext),
    {
        info!("Initializing engine systems");

        self.orchestrator.init_systems(init_fn);

        info!("Engine initialization complete");
        self
    }

    /// Returns a handle a media backend uses to report playback events.
    pub fn media_sink(&self) -> MediaEventSink {
        MediaEventSink::new(self.sender.clone())
    }

    //--- Execution --------------------------------------------------------

    /// Starts the engine runtime and blocks until the application exits.
    ///
    /// # Lifecycle
    ///
    /// 1. Spawns the logic thread running at the configured TPS
    /// 2. Runs the platform event loop (blocks here)
    /// 3. On window close the platform sends `WindowClosed`, the logic
    ///    thread tears the show down and exits
    /// 4. Joins the logic thread
    ///
    /// Platform failures are logged, not propagated; the logic thread is
    /// still joined.
    pub fn run(self) {
        info!("Starting engine runtime (TPS: {})", self.tps);

        let Self {
            orchestrator,
            sender,
            receiver,
            tps,
            channel_capacity,
            title,
        } = self;

        //--- 1. Spawn the core logic thread -------------------------------
        let core_handle = orchestrator.spawn_core_thread(receiver, tps);
        info!("Core logic thread spawned (channel capacity: {})", channel_capacity);

        //--- 2. Launch the platform subsystem -----------------------------
        let platform = Platform::new(sender.clone(), title);
        info!("Platform initialized, entering event loop");

        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
            let _ = sender.send(PlatformEvent::WindowClosed);
        }
        drop(sender);

        info!("Platform event loop exited");

        //--- 3. Cleanup: Wait for logic thread to terminate --------------
        match core_handle.join() {
            Ok(()) => {
                info!("Core thread terminated cleanly");
            }
            Err(e) => {
                error!("Core thread panicked: {:?}", e);
            }
        }

        info!("Engine shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
