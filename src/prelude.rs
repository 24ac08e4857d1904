//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types.
//
// Usage:
//   use reveal_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::config::{ConfigError, EngineConfig};
pub use crate::engine::{Engine, EngineBuilder};

// Global systems and context
pub use crate::core::globals::{GlobalContext, GlobalSystems};

// Show events
pub use crate::core::events::ShowEvent;

// Input
pub use crate::core::input::{Gesture, GestureBindings, KeyCode, Page};

// Scenes and decoration
pub use crate::core::decor::{CatalogKind, GiftId};
pub use crate::core::scene::{AmbientMode, Scene, SceneMachine, Step};

// Media
pub use crate::core::media::{MediaEvent, MediaKind, OutputChannel};
pub use crate::core::platform_bridge::MediaEventSink;
