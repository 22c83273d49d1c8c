// Ground probing and kinematic motion execution
//
// The locomotion state machine consumes two capabilities from here and
// nothing else: a ground probe and a motion executor. `CharacterMotor`
// implements both on top of the rapier-backed `PhysicsWorld`.

use super::world::{CollisionLayer, PhysicsWorld};
use glam::Vec3;
use rapier3d::prelude::{vector, Isometry};
use serde::Deserialize;

/// Ground probe configuration.
/// A missing configuration is a setup error; there are no silent defaults
/// at the construction site (`ProbeSettings::default()` is an explicit choice).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// Lift of the probe origin above the actor's feet, to avoid starting
    /// queries inside the floor
    pub check_offset: f32,
    /// Radius of the volumetric (sphere) ground check
    pub check_radius: f32,
    /// Length of the downward disambiguation ray
    pub check_distance: f32,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            check_offset: 0.1,
            check_radius: 0.3,
            check_distance: 0.2,
        }
    }
}

impl ProbeSettings {
    /// Validate the configuration; zero or negative extents would make
    /// every ground check fail or start inside geometry.
    pub fn validate(&self) -> Result<(), String> {
        if self.check_radius <= 0.0 {
            return Err(format!("probe check_radius must be > 0, got {}", self.check_radius));
        }
        if self.check_distance <= 0.0 {
            return Err(format!(
                "probe check_distance must be > 0, got {}",
                self.check_distance
            ));
        }
        if self.check_offset < 0.0 {
            return Err(format!("probe check_offset must be >= 0, got {}", self.check_offset));
        }
        Ok(())
    }
}

/// Grounded-state queries consumed by the locomotion state machine
pub trait GroundProbe {
    /// Contact reported by the most recent kinematic move (primary source,
    /// the equivalent of a character controller's grounded flag)
    fn contact_grounded(&self) -> bool;

    /// Volumetric overlap test at the actor's feet (secondary source)
    fn overlap_grounded(&self, position: Vec3) -> bool;

    /// Downward ray from `origin`; distance to the hit if within `max_distance`
    fn raycast_down(&self, origin: Vec3, max_distance: f32) -> Option<f32>;
}

/// Applies a tick's worth of velocity to a position, resolving collision
/// with the world. The locomotion core computes velocities; it never moves
/// the actor itself.
pub trait MotionExecutor {
    /// Move from `position` by `velocity * dt` and return the resolved position
    fn apply_move(&mut self, position: Vec3, velocity: Vec3, dt: f32) -> Vec3;
}

/// Distance below the feet within which a downward move snaps to the surface
const SNAP_DISTANCE: f32 = 0.3;

/// Kinematic character motor backed by the physics world.
///
/// Owns the world, executes moves with a ground snap, and remembers whether
/// the last move ended in ground contact - that memory is the primary probe
/// the next tick's ground check reads, mirroring how engine character
/// controllers report contact from their previous move.
pub struct CharacterMotor {
    world: PhysicsWorld,
    settings: ProbeSettings,
    contact: bool,
}

impl CharacterMotor {
    pub fn new(world: PhysicsWorld, settings: ProbeSettings) -> Self {
        Self {
            world,
            settings,
            contact: false,
        }
    }

    /// Access the underlying world (e.g. to add level geometry)
    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    pub fn settings(&self) -> &ProbeSettings {
        &self.settings
    }

    fn ray_down(&self, origin: Vec3, max_distance: f32) -> Option<f32> {
        self.world
            .raycast(
                vector![origin.x, origin.y, origin.z],
                vector![0.0, -1.0, 0.0],
                max_distance,
                true,
                CollisionLayer::Ground.query_filter(),
            )
            .map(|(_, toi)| toi)
    }
}

impl GroundProbe for CharacterMotor {
    fn contact_grounded(&self) -> bool {
        self.contact
    }

    fn overlap_grounded(&self, position: Vec3) -> bool {
        let ball = parry3d::shape::Ball::new(self.settings.check_radius);
        let center = position + Vec3::Y * self.settings.check_offset;
        self.world.intersects_shape(
            &Isometry::translation(center.x, center.y, center.z),
            &ball,
            CollisionLayer::Ground.query_filter(),
        )
    }

    fn raycast_down(&self, origin: Vec3, max_distance: f32) -> Option<f32> {
        self.ray_down(origin + Vec3::Y * self.settings.check_offset, max_distance)
            .map(|toi| (toi - self.settings.check_offset).max(0.0))
    }
}

impl MotionExecutor for CharacterMotor {
    fn apply_move(&mut self, position: Vec3, velocity: Vec3, dt: f32) -> Vec3 {
        let mut next = position + velocity * dt;

        if velocity.y > 0.0 {
            // Rising: no snap, contact is lost until the move comes back down
            self.contact = false;
            return next;
        }

        // Probe from the old height down past the new feet position, so a
        // surface tunneled through in one step is still seen
        let origin = Vec3::new(
            next.x,
            position.y.max(next.y) + self.settings.check_offset,
            next.z,
        );
        let reach = (origin.y - next.y) + SNAP_DISTANCE;
        match self.ray_down(origin, reach) {
            Some(toi) => {
                let surface_y = origin.y - toi;
                if next.y <= surface_y + SNAP_DISTANCE {
                    next.y = surface_y;
                    self.contact = true;
                } else {
                    self.contact = false;
                }
            }
            None => {
                self.contact = false;
            }
        }

        next
    }
}
