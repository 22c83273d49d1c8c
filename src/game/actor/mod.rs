// Actor locomotion
//
// The controlled character: kinematic state, the movement lock, the
// grounding/jump/gravity state machine, and its tuning.

pub mod actor;
pub mod locomotion;
pub mod phase;
pub mod settings;

// Re-export commonly used types
pub use actor::{Actor, MovementLock};
pub use locomotion::{LocomotionState, LocomotionTick};
pub use phase::MovePhase;
pub use settings::MovementSettings;
