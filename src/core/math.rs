// Math utilities and helper functions

use glam::{Vec2, Vec3};

/// Input magnitudes below this are treated as no input at all
pub const INPUT_DEAD_ZONE: f32 = 0.1;

/// Linear interpolation
#[allow(dead_code)]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Move `current` toward `target` by at most `max_delta`, without overshooting
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Check if two f32 values are approximately equal
#[allow(dead_code)]
pub fn approx_equal(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Normalize a 2D input vector, treating magnitudes inside the dead zone as zero.
/// Returns the normalized direction and the clamped input magnitude.
pub fn normalized_input(raw: Vec2) -> (Vec2, f32) {
    let magnitude = raw.length().min(1.0);
    if magnitude < INPUT_DEAD_ZONE {
        (Vec2::ZERO, 0.0)
    } else {
        (raw / raw.length(), magnitude)
    }
}

/// Project a direction onto the horizontal (XZ) plane and renormalize.
/// Returns `None` for directions that are vertical or near-zero.
pub fn flatten_to_horizontal(direction: Vec3) -> Option<Vec3> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() < 1e-8 {
        None
    } else {
        Some(flat.normalize())
    }
}
