// Animation parameter sink
//
// The gameplay core does not play animations; it writes named parameters
// (floats, bools, triggers) to a sink once per tick. A real client backs
// the sink with its animation graph; tests and the headless demo use the
// recording sink.

use serde::Deserialize;
use std::collections::HashMap;

/// Animator parameter names. These are configuration, not hard-coded
/// constants: a project can rename them to match its animation graph.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnimationParameters {
    pub speed: String,
    pub is_grounded: String,
    pub vertical_velocity: String,
    pub jump_trigger: String,
}

impl Default for AnimationParameters {
    fn default() -> Self {
        Self {
            speed: "Speed".to_string(),
            is_grounded: "IsGrounded".to_string(),
            vertical_velocity: "VerticalVelocity".to_string(),
            jump_trigger: "Jump".to_string(),
        }
    }
}

/// Receives parameter writes from the gameplay state machines
pub trait AnimationSink {
    /// Set a float parameter immediately
    fn set_float(&mut self, name: &str, value: f32);

    /// Set a float parameter, approaching the target over `smoothing` seconds.
    /// A non-positive smoothing time writes the value immediately.
    fn set_float_damped(&mut self, name: &str, value: f32, smoothing: f32, dt: f32);

    /// Set a bool parameter
    fn set_bool(&mut self, name: &str, value: bool);

    /// Fire a one-shot trigger
    fn set_trigger(&mut self, name: &str);
}

/// Sink that discards every write
#[derive(Debug, Default)]
pub struct NullSink;

impl AnimationSink for NullSink {
    fn set_float(&mut self, _name: &str, _value: f32) {}
    fn set_float_damped(&mut self, _name: &str, _value: f32, _smoothing: f32, _dt: f32) {}
    fn set_bool(&mut self, _name: &str, _value: bool) {}
    fn set_trigger(&mut self, _name: &str) {}
}

/// Sink that records the latest parameter values and queued triggers.
/// Used by tests, the headless demo, and anything that wants to observe
/// the animation state the core produced for a tick.
#[derive(Debug, Default)]
pub struct RecordingSink {
    floats: HashMap<String, f32>,
    bools: HashMap<String, bool>,
    triggers: Vec<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest value of a float parameter
    pub fn float(&self, name: &str) -> Option<f32> {
        self.floats.get(name).copied()
    }

    /// Latest value of a bool parameter
    pub fn bool_value(&self, name: &str) -> Option<bool> {
        self.bools.get(name).copied()
    }

    /// Triggers fired since the last drain, in firing order
    pub fn take_triggers(&mut self) -> Vec<String> {
        std::mem::take(&mut self.triggers)
    }

    /// Whether a trigger is queued
    pub fn has_trigger(&self, name: &str) -> bool {
        self.triggers.iter().any(|t| t == name)
    }
}

impl AnimationSink for RecordingSink {
    fn set_float(&mut self, name: &str, value: f32) {
        self.floats.insert(name.to_string(), value);
    }

    fn set_float_damped(&mut self, name: &str, value: f32, smoothing: f32, dt: f32) {
        if smoothing <= 0.0 {
            self.set_float(name, value);
            return;
        }

        let current = self.floats.get(name).copied().unwrap_or(value);
        let blend = (dt / smoothing).clamp(0.0, 1.0);
        self.floats
            .insert(name.to_string(), current + (value - current) * blend);
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.bools.insert(name.to_string(), value);
    }

    fn set_trigger(&mut self, name: &str) {
        self.triggers.push(name.to_string());
    }
}
