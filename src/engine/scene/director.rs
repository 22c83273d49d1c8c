// Scene director - owns scene transitions and cross-scene hand-off
//
// An explicitly constructed service handed to whoever needs it; there is
// no global instance.

use super::transition::{LoadingTransition, SceneSource, TransitionEvent, TransitionPhase};
use super::SceneError;
use glam::{Quat, Vec3};

/// Drives at most one scene transition at a time and carries the player's
/// spawn placement into the next scene.
pub struct SceneDirector {
    /// Minimum visible duration of a loading screen
    min_loading_time: f32,

    /// The in-flight transition, if any
    current: Option<LoadingTransition>,

    /// Where the player should appear after the next completed transition
    next_spawn: Option<(Vec3, Quat)>,
}

impl SceneDirector {
    pub fn new(min_loading_time: f32) -> Self {
        Self {
            min_loading_time,
            current: None,
            next_spawn: None,
        }
    }

    /// Whether a transition is in flight
    pub fn is_loading(&self) -> bool {
        self.current.is_some()
    }

    /// The in-flight transition's phase, if any
    pub fn phase(&self) -> Option<TransitionPhase> {
        self.current.as_ref().map(|t| t.phase())
    }

    /// Start a transition to `scene`. Fails if one is already in flight.
    pub fn begin(
        &mut self,
        source: &mut dyn SceneSource,
        scene: impl Into<String>,
    ) -> Result<(), SceneError> {
        if let Some(current) = &self.current {
            return Err(SceneError::AlreadyLoading {
                current: current.target().to_string(),
            });
        }

        let scene = scene.into();
        log::info!("Scene transition started: {scene}");
        source.begin_load(&scene);
        self.current = Some(LoadingTransition::new(scene, self.min_loading_time));
        Ok(())
    }

    /// Advance the in-flight transition, if any. The returned events are
    /// the only notification channel; there are no registered callbacks.
    pub fn tick(
        &mut self,
        source: &mut dyn SceneSource,
        confirm_pressed: bool,
        dt: f32,
    ) -> Vec<TransitionEvent> {
        let Some(transition) = &mut self.current else {
            return Vec::new();
        };

        let events = transition.tick(source, confirm_pressed, dt);

        if transition.phase() == TransitionPhase::Done {
            log::info!("Scene transition completed: {}", transition.target());
            self.current = None;
        }

        events
    }

    /// Record where the player should stand in the next scene
    pub fn set_next_spawn(&mut self, position: Vec3, orientation: Quat) {
        self.next_spawn = Some((position, orientation));
    }

    /// Take the recorded spawn placement, if any. Consumed once.
    pub fn take_next_spawn(&mut self) -> Option<(Vec3, Quat)> {
        self.next_spawn.take()
    }
}
