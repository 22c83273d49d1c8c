// Physics system using rapier3d
//
// Only the query surface the character needs: raycasts, volume overlaps,
// and a kinematic motor. The gameplay core consumes the `GroundProbe` and
// `MotionExecutor` traits, never rapier types.

mod ground;
mod world;

pub use ground::{CharacterMotor, GroundProbe, MotionExecutor, ProbeSettings};
pub use world::{CollisionLayer, PhysicsWorld};

// Re-export commonly used rapier types for convenience
#[allow(unused_imports)]
pub use rapier3d::prelude::{nalgebra, ColliderBuilder, Isometry, QueryFilter, Real, Vector};
