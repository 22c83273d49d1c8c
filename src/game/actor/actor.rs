// Actor kinematic state and the shared movement lock

use glam::{Quat, Vec3};

/// Reference-counted movement lock.
///
/// Several skill slots can lock movement with overlapping durations; a
/// plain boolean would let the first release unlock the actor while another
/// cast still needs it held. Each holder acquires and releases exactly once.
#[derive(Debug, Default)]
pub struct MovementLock {
    count: u32,
}

impl MovementLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a hold on the lock
    pub fn acquire(&mut self) {
        self.count += 1;
    }

    /// Release one hold. Releasing without a matching acquire is a caller
    /// bug; it is logged and ignored rather than wrapping around.
    pub fn release(&mut self) {
        if self.count == 0 {
            log::warn!("movement lock released with no holders");
            return;
        }
        self.count -= 1;
    }

    /// Whether any holder currently locks movement
    pub fn is_locked(&self) -> bool {
        self.count > 0
    }

    /// Number of active holds
    pub fn holders(&self) -> u32 {
        self.count
    }
}

/// The controlled character's kinematic state.
///
/// Owned by the world outside the core (spawn to despawn); the state
/// machines only read and write these fields. Velocity's y component is
/// authoritative for vertical motion.
#[derive(Debug)]
pub struct Actor {
    pub position: Vec3,
    pub orientation: Quat,
    pub velocity: Vec3,

    /// Movement lock shared by all of this actor's skill slots
    pub lock: MovementLock,
}

impl Actor {
    /// Spawn an actor at a position, facing the world forward direction
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            lock: MovementLock::new(),
        }
    }

    /// The direction the actor is facing
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// Whether movement is currently locked by any skill
    pub fn is_movement_locked(&self) -> bool {
        self.lock.is_locked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_actor_faces_forward() {
        let actor = Actor::new(Vec3::ZERO);
        assert_relative_eq!(actor.forward().x, 0.0);
        assert_relative_eq!(actor.forward().z, -1.0);
        assert!(!actor.is_movement_locked());
    }

    #[test]
    fn test_lock_acquire_release() {
        let mut lock = MovementLock::new();
        assert!(!lock.is_locked());

        lock.acquire();
        assert!(lock.is_locked());

        lock.release();
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_overlapping_holders_keep_lock() {
        let mut lock = MovementLock::new();
        lock.acquire();
        lock.acquire();
        assert_eq!(lock.holders(), 2);

        // First release must not unlock while the second cast still holds
        lock.release();
        assert!(lock.is_locked());

        lock.release();
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_release_without_acquire_is_ignored() {
        let mut lock = MovementLock::new();
        lock.release();
        assert_eq!(lock.holders(), 0);

        lock.acquire();
        assert!(lock.is_locked());
    }

    #[test]
    fn test_forward_tracks_orientation() {
        let mut actor = Actor::new(Vec3::ZERO);
        actor.orientation = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);

        let forward = actor.forward();
        assert_relative_eq!(forward.x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(forward.z, 0.0, epsilon = 1e-6);
    }
}
