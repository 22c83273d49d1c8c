// Loading-screen transition state machine
//
// All waiting is represented as state advanced by the caller's tick loop:
// remaining-time fields and an explicit phase enum, never a blocked call.
// The actual streaming work happens in an external `SceneSource`; this
// machine only gates and presents it.

use crate::core::math::move_towards;

/// Raw source progress at or above this value means the scene is fully
/// staged and only waits for activation (engine loaders conventionally park
/// at 0.9 until told to activate)
pub const ACTIVATION_GATE: f32 = 0.9;

/// Units of display progress gained per second while catching up
const DISPLAY_SMOOTHING_RATE: f32 = 0.5;

/// The external, genuinely asynchronous scene loader.
/// `progress` is polled every tick; nothing here blocks.
pub trait SceneSource {
    /// Start streaming a scene. Called once per transition.
    fn begin_load(&mut self, scene: &str);

    /// Raw load progress in [0, 1]; parks at the activation gate until
    /// `activate` is called
    fn progress(&self) -> f32;

    /// Allow the staged scene to become active
    fn activate(&mut self);

    /// True once the activated scene finished switching in
    fn is_done(&self) -> bool;
}

/// Phases of one loading-screen transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    /// Streaming and/or padding out the minimum loading time
    Loading,
    /// Fully staged; waiting for the player to confirm
    AwaitingConfirm,
    /// Activation requested; waiting for the source to finish switching
    Activating,
    /// Scene is active
    Done,
}

/// Events surfaced to observers (loading UI, audio, spawn logic)
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionEvent {
    /// Display progress changed; value in [0, 1]
    Progress(f32),
    /// Staged and waiting for player confirmation
    ReadyToActivate,
    /// The target scene is now active
    Completed(String),
}

/// One in-flight scene transition.
///
/// Display progress deliberately lags raw progress: it is the minimum of
/// streaming progress (normalized by the activation gate) and elapsed time
/// over the configured minimum, approached at a fixed smoothing rate, so
/// the bar neither jumps nor finishes before the loading screen had a
/// chance to be seen.
#[derive(Debug)]
pub struct LoadingTransition {
    target: String,
    min_time: f32,
    elapsed: f32,
    display_progress: f32,
    phase: TransitionPhase,
}

impl LoadingTransition {
    pub fn new(target: impl Into<String>, min_time: f32) -> Self {
        Self {
            target: target.into(),
            min_time: min_time.max(0.0),
            elapsed: 0.0,
            display_progress: 0.0,
            phase: TransitionPhase::Loading,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Smoothed progress for UI, in [0, 1]
    pub fn display_progress(&self) -> f32 {
        self.display_progress
    }

    /// Advance the transition by one tick.
    /// `confirm_pressed` is the player's "continue" input for this tick.
    pub fn tick(
        &mut self,
        source: &mut dyn SceneSource,
        confirm_pressed: bool,
        dt: f32,
    ) -> Vec<TransitionEvent> {
        let mut events = Vec::new();

        match self.phase {
            TransitionPhase::Loading => {
                self.elapsed += dt;

                let stream_progress = (source.progress() / ACTIVATION_GATE).clamp(0.0, 1.0);
                let time_progress = if self.min_time > 0.0 {
                    (self.elapsed / self.min_time).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                let targeted = stream_progress.min(time_progress);

                let previous = self.display_progress;
                self.display_progress =
                    move_towards(self.display_progress, targeted, DISPLAY_SMOOTHING_RATE * dt);
                if self.display_progress != previous {
                    events.push(TransitionEvent::Progress(self.display_progress));
                }

                if stream_progress >= 1.0 && time_progress >= 1.0 && self.display_progress >= 1.0 {
                    self.phase = TransitionPhase::AwaitingConfirm;
                    events.push(TransitionEvent::ReadyToActivate);
                }
            }
            TransitionPhase::AwaitingConfirm => {
                if confirm_pressed {
                    source.activate();
                    self.phase = TransitionPhase::Activating;
                }
            }
            TransitionPhase::Activating => {
                if source.is_done() {
                    self.phase = TransitionPhase::Done;
                    events.push(TransitionEvent::Completed(self.target.clone()));
                }
            }
            TransitionPhase::Done => {}
        }

        events
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::SceneSource;

    /// Scene source whose streaming advances at a fixed rate per poll tick
    pub struct ScriptedSource {
        pub progress: f32,
        pub rate_per_tick: f32,
        pub began: Option<String>,
        pub activated: bool,
        pub done: bool,
    }

    impl ScriptedSource {
        pub fn new(rate_per_tick: f32) -> Self {
            Self {
                progress: 0.0,
                rate_per_tick,
                began: None,
                activated: false,
                done: false,
            }
        }
    }

    impl SceneSource for ScriptedSource {
        fn begin_load(&mut self, scene: &str) {
            self.began = Some(scene.to_string());
        }

        fn progress(&self) -> f32 {
            self.progress
        }

        fn activate(&mut self) {
            self.activated = true;
            self.done = true;
        }

        fn is_done(&self) -> bool {
            self.done
        }
    }
}
