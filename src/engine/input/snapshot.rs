// Per-tick read-only input view consumed by the gameplay state machines

use glam::Vec3;

/// Horizontal camera frame used for camera-relative movement.
///
/// Forward and right are the camera's axes before flattening; consumers
/// project them onto the horizontal plane themselves.
#[derive(Debug, Clone, Copy)]
pub struct CameraBasis {
    pub forward: Vec3,
    pub right: Vec3,
}

impl Default for CameraBasis {
    fn default() -> Self {
        Self {
            forward: Vec3::NEG_Z,
            right: Vec3::X,
        }
    }
}

impl CameraBasis {
    pub fn new(forward: Vec3, right: Vec3) -> Self {
        Self { forward, right }
    }
}

/// Read-only view of one tick's worth of player intent.
///
/// Built once per fixed update from the live input state; the gameplay
/// state machines never poll devices directly.
#[derive(Debug, Clone, Copy)]
pub struct InputSnapshot {
    /// Strafe axis in [-1, 1] (right positive)
    pub horizontal: f32,
    /// Forward axis in [-1, 1] (forward positive)
    pub vertical: f32,
    /// Run modifier held this tick
    pub run_held: bool,
    /// Jump was requested this tick
    pub jump_pressed: bool,
    /// Hotbar slot whose cast was requested this tick, if any
    pub cast_slot_pressed: Option<usize>,
    /// Camera frame for camera-relative movement
    pub camera: CameraBasis,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            horizontal: 0.0,
            vertical: 0.0,
            run_held: false,
            jump_pressed: false,
            cast_slot_pressed: None,
            camera: CameraBasis::default(),
        }
    }
}

impl InputSnapshot {
    /// A snapshot with no intent at all
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Set the movement axes
    pub fn with_move(mut self, horizontal: f32, vertical: f32) -> Self {
        self.horizontal = horizontal;
        self.vertical = vertical;
        self
    }

    /// Hold the run modifier
    pub fn with_run(mut self) -> Self {
        self.run_held = true;
        self
    }

    /// Request a jump this tick
    pub fn with_jump(mut self) -> Self {
        self.jump_pressed = true;
        self
    }

    /// Request a hotbar cast this tick
    pub fn with_cast(mut self, slot: usize) -> Self {
        self.cast_slot_pressed = Some(slot);
        self
    }

    /// Set the camera frame
    pub fn with_camera(mut self, camera: CameraBasis) -> Self {
        self.camera = camera;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_snapshot() {
        let snapshot = InputSnapshot::neutral();
        assert_eq!(snapshot.horizontal, 0.0);
        assert_eq!(snapshot.vertical, 0.0);
        assert!(!snapshot.run_held);
        assert!(!snapshot.jump_pressed);
        assert!(snapshot.cast_slot_pressed.is_none());
    }

    #[test]
    fn test_snapshot_builders() {
        let snapshot = InputSnapshot::neutral()
            .with_move(0.5, -1.0)
            .with_run()
            .with_jump()
            .with_cast(2);

        assert_eq!(snapshot.horizontal, 0.5);
        assert_eq!(snapshot.vertical, -1.0);
        assert!(snapshot.run_held);
        assert!(snapshot.jump_pressed);
        assert_eq!(snapshot.cast_slot_pressed, Some(2));
    }

    #[test]
    fn test_default_camera_basis() {
        let camera = CameraBasis::default();
        assert_eq!(camera.forward, Vec3::NEG_Z);
        assert_eq!(camera.right, Vec3::X);
    }
}
