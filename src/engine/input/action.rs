// Game action definitions and mappings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Number of hotbar slots that can be triggered from the keyboard
pub const HOTBAR_SLOTS: usize = 4;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    Jump,
    Run,

    // Hotbar skill casts (number row)
    CastSlot1,
    CastSlot2,
    CastSlot3,
    CastSlot4,

    // Meta actions
    Pause,
    Menu,
}

impl Action {
    /// The hotbar slot index this action casts, if it is a cast action
    pub fn cast_slot_index(&self) -> Option<usize> {
        match self {
            Action::CastSlot1 => Some(0),
            Action::CastSlot2 => Some(1),
            Action::CastSlot3 => Some(2),
            Action::CastSlot4 => Some(3),
            _ => None,
        }
    }

    /// The cast action for a hotbar slot index
    pub fn for_cast_slot(index: usize) -> Option<Action> {
        match index {
            0 => Some(Action::CastSlot1),
            1 => Some(Action::CastSlot2),
            2 => Some(Action::CastSlot3),
            3 => Some(Action::CastSlot4),
            _ => None,
        }
    }
}

/// Represents an input source (keyboard key, mouse button, or controller button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
    // Future: Add controller support
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    /// Create a mouse button input source
    #[allow(dead_code)]
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Default keyboard bindings for the local player
pub fn default_player_bindings() -> Vec<(InputSource, Action)> {
    vec![
        // Movement (WASD - standard gaming layout)
        (InputSource::key(KeyCode::KeyW), Action::MoveForward),
        (InputSource::key(KeyCode::KeyS), Action::MoveBack),
        (InputSource::key(KeyCode::KeyA), Action::MoveLeft),
        (InputSource::key(KeyCode::KeyD), Action::MoveRight),
        (InputSource::key(KeyCode::Space), Action::Jump),
        (InputSource::key(KeyCode::ShiftLeft), Action::Run),
        // Hotbar casts (number row, slot order)
        (InputSource::key(KeyCode::Digit1), Action::CastSlot1),
        (InputSource::key(KeyCode::Digit2), Action::CastSlot2),
        (InputSource::key(KeyCode::Digit3), Action::CastSlot3),
        (InputSource::key(KeyCode::Digit4), Action::CastSlot4),
    ]
}

/// Global bindings (not player-specific)
pub fn global_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::Escape), Action::Menu),
        // Note: Pause (P) is handled separately in main.rs to work when game is paused
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_equality() {
        assert_eq!(Action::Jump, Action::Jump);
        assert_ne!(Action::Jump, Action::Run);
    }

    #[test]
    fn test_cast_slot_round_trip() {
        for index in 0..HOTBAR_SLOTS {
            let action = Action::for_cast_slot(index).unwrap();
            assert_eq!(action.cast_slot_index(), Some(index));
        }
    }

    #[test]
    fn test_cast_slot_out_of_range() {
        assert!(Action::for_cast_slot(HOTBAR_SLOTS).is_none());
    }

    #[test]
    fn test_non_cast_actions_have_no_slot() {
        assert_eq!(Action::Jump.cast_slot_index(), None);
        assert_eq!(Action::MoveForward.cast_slot_index(), None);
    }

    #[test]
    fn test_default_bindings_cover_movement_and_hotbar() {
        let bindings = default_player_bindings();
        assert!(bindings.len() >= 6 + HOTBAR_SLOTS);

        let bound: Vec<Action> = bindings.iter().map(|(_, a)| *a).collect();
        assert!(bound.contains(&Action::Jump));
        assert!(bound.contains(&Action::Run));
        for index in 0..HOTBAR_SLOTS {
            assert!(bound.contains(&Action::for_cast_slot(index).unwrap()));
        }
    }

    #[test]
    fn test_hotbar_bound_to_number_row() {
        let bindings = default_player_bindings();
        let slot1 = bindings
            .iter()
            .find(|(_, action)| *action == Action::CastSlot1);
        assert!(matches!(
            slot1,
            Some((InputSource::Keyboard(KeyCode::Digit1), _))
        ));
    }

    #[test]
    fn test_global_bindings_exist() {
        let bindings = global_bindings();
        assert!(!bindings.is_empty());
    }

    #[test]
    fn test_no_duplicate_sources_in_defaults() {
        let bindings = default_player_bindings();
        let mut seen_sources = std::collections::HashSet::new();
        for (source, _) in bindings {
            assert!(
                seen_sources.insert(source),
                "Duplicate input source found in default bindings"
            );
        }
    }
}
