//=========================================================================
// Reveal Engine - Library Root
//
// A scene/timeline sequencer for scripted, single-session gift-reveal
// presentations.
//
// Responsibilities:
// - Expose the engine facade (`Engine`, `EngineBuilder`) and config
// - Keep the Winit integration (`platform`) hidden from end users
// - Expose `core` for hosts that drive the show without a window
//
// Typical usage:
// ```no_run
// use reveal_engine::EngineBuilder;
//
// fn main() {
//     EngineBuilder::new().build().run();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the show itself: timeline, scene machine, decoration page,
// media sessions, gesture bindings. It runs headless, so tests and custom
// hosts can tick it directly.
//
// `config` loads `EngineConfig` from TOML.
//
pub mod config;
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the Winit window and key capture and is not part of
// the public API surface.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, EngineBuilder};
