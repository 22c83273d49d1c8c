// Input manager - routes window events into the local player's input state

use super::action::Action;
use super::config::BindingLayers;
use super::player::PlayerInput;
use super::snapshot::{CameraBasis, InputSnapshot};
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// Translates winit keyboard events into action state for the local player
pub struct InputManager {
    /// Layered bindings (player over global)
    bindings: BindingLayers,

    /// Input state for the local player
    player: PlayerInput,
}

impl InputManager {
    /// Create an input manager with default bindings
    pub fn new() -> Self {
        Self {
            bindings: BindingLayers::new(),
            player: PlayerInput::new(0),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return;
        };

        let source = super::action::InputSource::key(key_code);
        let Some(action) = self.bindings.action_for(source) else {
            return;
        };

        match event.state {
            ElementState::Pressed => {
                // Key repeats are not fresh presses
                if !event.repeat {
                    self.player.press(action);
                }
            }
            ElementState::Released => {
                self.player.release(action);
            }
        }
    }

    /// Build the per-tick snapshot and advance the input state.
    /// Call once per fixed update, after all pending events were processed.
    pub fn tick(&mut self, camera: CameraBasis, dt: f32) -> InputSnapshot {
        let snapshot = self.player.snapshot(camera);
        self.player.update(dt);
        snapshot
    }

    /// Get the local player's input state
    pub fn player(&self) -> &PlayerInput {
        &self.player
    }

    /// Get mutable access to the local player's input state
    pub fn player_mut(&mut self) -> &mut PlayerInput {
        &mut self.player
    }

    /// Get the binding layers
    pub fn bindings(&self) -> &BindingLayers {
        &self.bindings
    }

    /// Get mutable binding layers for remapping
    pub fn bindings_mut(&mut self) -> &mut BindingLayers {
        &mut self.bindings
    }

    /// Check if a meta action was just pressed (menu/pause handling)
    pub fn just_pressed(&self, action: Action) -> bool {
        self.player.just_pressed(action)
    }

    /// Reset all input state (e.g. on focus loss)
    pub fn reset(&mut self) {
        self.player.reset();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
