// Scene loading and transitions
//
// Streaming itself lives behind the `SceneSource` trait; this module owns
// the tick-driven gating around it (loading screen pacing, activation
// confirmation, spawn hand-off between scenes).

mod director;
mod transition;

pub use director::SceneDirector;
pub use transition::{
    LoadingTransition, SceneSource, TransitionEvent, TransitionPhase, ACTIVATION_GATE,
};

/// Scene transition errors
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("a scene transition to '{current}' is already in flight")]
    AlreadyLoading { current: String },
}
