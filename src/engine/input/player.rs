// Per-player input state management

use super::action::{Action, HOTBAR_SLOTS};
use super::buffer::InputBuffer;
use super::snapshot::{CameraBasis, InputSnapshot};
use std::collections::HashSet;

/// Represents the input state for a single player
#[derive(Debug)]
pub struct PlayerInput {
    /// Player ID
    player_id: usize,

    /// Actions that are currently pressed this frame
    pressed: HashSet<Action>,

    /// Actions that were just pressed this frame (press events)
    just_pressed: HashSet<Action>,

    /// Actions that were just released this frame (release events)
    just_released: HashSet<Action>,

    /// Input buffer for presses that land between fixed updates
    buffer: InputBuffer,
}

impl PlayerInput {
    /// Create a new player input state
    pub fn new(player_id: usize) -> Self {
        Self {
            player_id,
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
            buffer: InputBuffer::new(),
        }
    }

    /// Get the player ID
    pub fn player_id(&self) -> usize {
        self.player_id
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this frame
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Check if an action is buffered
    pub fn is_buffered(&self, action: Action) -> bool {
        self.buffer.has(action)
    }

    /// Consume a buffered action
    /// Returns true if the action was buffered and consumed
    pub fn consume_buffered(&mut self, action: Action) -> bool {
        self.buffer.consume(action)
    }

    /// Register an action press
    pub(crate) fn press(&mut self, action: Action) {
        if !self.pressed.contains(&action) {
            self.just_pressed.insert(action);
            self.pressed.insert(action);
            // Also add to buffer for reliable input detection
            self.buffer.push(action);
        }
    }

    /// Register an action release
    pub(crate) fn release(&mut self, action: Action) {
        if self.pressed.contains(&action) {
            self.just_released.insert(action);
            self.pressed.remove(&action);
        }
    }

    /// Update input state for a new tick
    /// Call this once per fixed update after the snapshot has been taken
    pub(crate) fn update(&mut self, dt: f32) {
        self.just_pressed.clear();
        self.just_released.clear();
        self.buffer.update(dt);
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
        self.buffer.clear();
    }

    /// Get movement axes from held keys as (horizontal, vertical) in [-1, 1]
    pub fn move_axes(&self) -> (f32, f32) {
        let mut horizontal = 0.0;
        let mut vertical = 0.0;

        if self.is_pressed(Action::MoveLeft) {
            horizontal -= 1.0;
        }
        if self.is_pressed(Action::MoveRight) {
            horizontal += 1.0;
        }
        if self.is_pressed(Action::MoveBack) {
            vertical -= 1.0;
        }
        if self.is_pressed(Action::MoveForward) {
            vertical += 1.0;
        }

        (horizontal, vertical)
    }

    /// Build the per-tick snapshot consumed by the gameplay state machines.
    ///
    /// Jump and cast presses are read through the buffer and consumed, so a
    /// press that lands between two fixed updates still reaches exactly one
    /// tick. When several cast slots are buffered the lowest slot wins.
    pub fn snapshot(&mut self, camera: CameraBasis) -> InputSnapshot {
        let (horizontal, vertical) = self.move_axes();

        let jump_pressed = self.consume_buffered(Action::Jump);

        let mut cast_slot_pressed = None;
        for index in 0..HOTBAR_SLOTS {
            let Some(action) = Action::for_cast_slot(index) else {
                break;
            };
            if self.consume_buffered(action) {
                cast_slot_pressed = Some(index);
                break;
            }
        }

        InputSnapshot {
            horizontal,
            vertical,
            run_held: self.is_pressed(Action::Run),
            jump_pressed,
            cast_slot_pressed,
            camera,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_input_creation() {
        let input = PlayerInput::new(0);
        assert_eq!(input.player_id(), 0);
        assert!(!input.is_pressed(Action::Jump));
    }

    #[test]
    fn test_press_and_release() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Jump);
        assert!(input.is_pressed(Action::Jump));
        assert!(input.just_pressed(Action::Jump));

        input.update(0.016);
        input.release(Action::Jump);
        assert!(!input.is_pressed(Action::Jump));
        assert!(input.just_released(Action::Jump));
    }

    #[test]
    fn test_just_pressed_cleared_on_update() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Run);
        assert!(input.just_pressed(Action::Run));

        input.update(0.016);
        assert!(input.is_pressed(Action::Run));
        assert!(!input.just_pressed(Action::Run));
    }

    #[test]
    fn test_press_is_buffered() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Jump);
        assert!(input.is_buffered(Action::Jump));
    }

    #[test]
    fn test_move_axes() {
        let mut input = PlayerInput::new(0);
        assert_eq!(input.move_axes(), (0.0, 0.0));

        input.press(Action::MoveForward);
        input.press(Action::MoveRight);
        assert_eq!(input.move_axes(), (1.0, 1.0));

        input.release(Action::MoveRight);
        input.press(Action::MoveLeft);
        assert_eq!(input.move_axes(), (-1.0, 1.0));
    }

    #[test]
    fn test_snapshot_consumes_jump_once() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Jump);

        let first = input.snapshot(CameraBasis::default());
        assert!(first.jump_pressed);

        // A second snapshot without a new press sees nothing
        let second = input.snapshot(CameraBasis::default());
        assert!(!second.jump_pressed);
    }

    #[test]
    fn test_snapshot_survives_release_before_tick() {
        let mut input = PlayerInput::new(0);

        // Press and release between two fixed updates
        input.press(Action::CastSlot2);
        input.release(Action::CastSlot2);

        let snapshot = input.snapshot(CameraBasis::default());
        assert_eq!(snapshot.cast_slot_pressed, Some(1));
    }

    #[test]
    fn test_snapshot_lowest_cast_slot_wins() {
        let mut input = PlayerInput::new(0);
        input.press(Action::CastSlot3);
        input.press(Action::CastSlot1);

        let snapshot = input.snapshot(CameraBasis::default());
        assert_eq!(snapshot.cast_slot_pressed, Some(0));

        // The other buffered cast is still available next tick
        let next = input.snapshot(CameraBasis::default());
        assert_eq!(next.cast_slot_pressed, Some(2));
    }

    #[test]
    fn test_snapshot_axes_and_run() {
        let mut input = PlayerInput::new(0);
        input.press(Action::MoveForward);
        input.press(Action::Run);

        let snapshot = input.snapshot(CameraBasis::default());
        assert_eq!(snapshot.vertical, 1.0);
        assert!(snapshot.run_held);
    }

    #[test]
    fn test_reset() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Jump);
        input.press(Action::CastSlot1);
        input.reset();

        assert!(!input.is_pressed(Action::Jump));
        assert!(!input.is_buffered(Action::Jump));
        assert!(!input.is_buffered(Action::CastSlot1));
    }
}
