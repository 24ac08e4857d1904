//=========================================================================
// Global Engine State
//=========================================================================
//
// Separates systems (logic components) from context (shared data).
//
// Architecture:
//   GlobalSystems: GestureBindings + SceneMachine + DecorStage (owned by orchestrator)
//   GlobalContext: MediaRegistry + PlaybackController + Outbox (passed to systems)
//
//=========================================================================

//=== Module Declarations =================================================

mod global_context;
mod global_systems;

//=== Public API ==========================================================

pub use global_context::GlobalContext;
pub use global_systems::{GlobalSystems, ShowObserver};
