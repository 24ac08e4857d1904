//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the platform layer and media backends with the logic thread.
//
// Components:
// - `interface`: Event types, the media sink handle, and errors
// - `event_collector`: Logic-side draining of the bounded channel
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Public API ==========================================================

pub use interface::{FrameEvent, MediaEventSink, PlatformError};

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::PlatformEvent;
