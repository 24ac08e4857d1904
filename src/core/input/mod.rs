//=========================================================================
// Input System
//=========================================================================
//
// Turns key presses into gestures for the active page.
//
// Architecture:
//   Platform: winit KeyCode → KeyCode (pressed, non-repeat only)
//   Logic:    (KeyCode, Page) → GestureBindings → Gesture → GlobalSystems
//
// Gestures are also the programmatic entry point: hosts and tests can
// submit them directly without going through a key.
//
//=========================================================================

//=== Module Declarations =================================================

mod bindings;
mod gesture;
mod key;

//=== Public API ==========================================================

pub use bindings::GestureBindings;
pub use gesture::{Gesture, Page};
pub use key::KeyCode;
