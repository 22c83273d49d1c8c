use rapier3d::prelude::*;

/// Handle to identify colliders
pub type ColliderHandle = rapier3d::prelude::ColliderHandle;

/// Collision layers for filtering queries against the right geometry.
/// The ground probe only wants walkable geometry, not actors or effect
/// volumes sharing the space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionLayer {
    /// Walkable world geometry (terrain, platforms, floors)
    Ground = 0b0000_0001,

    /// Player and NPC bodies
    Actor = 0b0000_0010,

    /// Skill effect volumes (spawned by casts)
    Effect = 0b0000_0100,
}

impl CollisionLayer {
    /// Membership/filter pair for colliders on this layer
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        let filter = match self {
            CollisionLayer::Ground => Group::ALL,
            CollisionLayer::Actor => Group::from_bits_truncate(
                CollisionLayer::Ground as u32 | CollisionLayer::Effect as u32,
            ),
            CollisionLayer::Effect => Group::from_bits_truncate(
                CollisionLayer::Ground as u32 | CollisionLayer::Actor as u32,
            ),
        };

        InteractionGroups::new(memberships, filter)
    }

    /// A query filter that only sees colliders on this layer
    pub fn query_filter(self) -> QueryFilter<'static> {
        QueryFilter::new().groups(InteractionGroups::new(
            Group::ALL,
            Group::from_bits_truncate(self as u32),
        ))
    }
}

/// Physics world wrapping rapier's query and simulation state.
///
/// The gameplay core never touches this directly; it reaches physics through
/// the `GroundProbe` and `MotionExecutor` capabilities implemented on top.
pub struct PhysicsWorld {
    /// Gravity vector (default: -9.81 m/s² in y-axis)
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Query pipeline for raycasts and shape queries
    query_pipeline: QueryPipeline,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,
}

impl PhysicsWorld {
    /// Create a new physics world with default settings
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, -9.81, 0.0])
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        // Fixed timestep of 1/60 seconds (60 FPS)
        integration_parameters.dt = 1.0 / 60.0;

        Self {
            gravity,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Add a free-standing static collider (world geometry)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        let handle = self.collider_set.insert(collider);
        self.query_pipeline.update(&self.rigid_body_set, &self.collider_set);
        handle
    }

    /// Add a flat ground slab centered at `(x, y, z)` with the given half extents.
    /// `y` is the top surface height.
    pub fn add_ground_slab(
        &mut self,
        x: Real,
        y: Real,
        z: Real,
        half_x: Real,
        half_z: Real,
    ) -> ColliderHandle {
        const SLAB_HALF_THICKNESS: Real = 0.5;
        let collider = ColliderBuilder::cuboid(half_x, SLAB_HALF_THICKNESS, half_z)
            .translation(vector![x, y - SLAB_HALF_THICKNESS, z])
            .collision_groups(CollisionLayer::Ground.to_interaction_groups())
            .friction(0.3)
            .restitution(0.0)
            .build();
        self.add_static_collider(collider)
    }

    /// Remove a collider from the physics world
    pub fn remove_collider(&mut self, handle: ColliderHandle) {
        self.collider_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.rigid_body_set,
            true, // wake up attached body
        );
        self.query_pipeline.update(&self.rigid_body_set, &self.collider_set);
    }

    /// Get a reference to a collider
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Cast a ray and return the first hit as (collider, distance along ray)
    pub fn raycast(
        &self,
        ray_origin: Vector<Real>,
        ray_dir: Vector<Real>,
        max_toi: Real,
        solid: bool,
        filter: QueryFilter,
    ) -> Option<(ColliderHandle, Real)> {
        let ray = Ray::new(
            point![ray_origin.x, ray_origin.y, ray_origin.z],
            ray_dir,
        );
        self.query_pipeline.cast_ray(
            &self.rigid_body_set,
            &self.collider_set,
            &ray,
            max_toi,
            solid,
            filter,
        )
    }

    /// Test whether any collider intersects the given shape at the given pose
    pub fn intersects_shape(
        &self,
        shape_pos: &Isometry<Real>,
        shape: &dyn Shape,
        filter: QueryFilter,
    ) -> bool {
        self.query_pipeline
            .intersection_with_shape(
                &self.rigid_body_set,
                &self.collider_set,
                shape_pos,
                shape,
                filter,
            )
            .is_some()
    }

    /// Set gravity for the physics world
    pub fn set_gravity(&mut self, gravity: Vector<Real>) {
        self.gravity = gravity;
    }

    /// Get current gravity
    pub fn gravity(&self) -> Vector<Real> {
        self.gravity
    }

    /// Set the timestep for physics simulation
    pub fn set_timestep(&mut self, dt: Real) {
        self.integration_parameters.dt = dt;
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raycast_hits_ground_slab() {
        let mut world = PhysicsWorld::new();
        world.add_ground_slab(0.0, 0.0, 0.0, 50.0, 50.0);

        let hit = world.raycast(
            vector![0.0, 5.0, 0.0],
            vector![0.0, -1.0, 0.0],
            10.0,
            true,
            CollisionLayer::Ground.query_filter(),
        );

        let (_, toi) = hit.expect("ray straight down should hit the slab");
        assert!((toi - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_raycast_misses_beyond_range() {
        let mut world = PhysicsWorld::new();
        world.add_ground_slab(0.0, 0.0, 0.0, 50.0, 50.0);

        let hit = world.raycast(
            vector![0.0, 5.0, 0.0],
            vector![0.0, -1.0, 0.0],
            1.0,
            true,
            CollisionLayer::Ground.query_filter(),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_sphere_overlap_near_ground() {
        let mut world = PhysicsWorld::new();
        world.add_ground_slab(0.0, 0.0, 0.0, 50.0, 50.0);

        let ball = parry3d::shape::Ball::new(0.3);

        let touching = world.intersects_shape(
            &Isometry::translation(0.0, 0.1, 0.0),
            &ball,
            CollisionLayer::Ground.query_filter(),
        );
        assert!(touching);

        let airborne = world.intersects_shape(
            &Isometry::translation(0.0, 2.0, 0.0),
            &ball,
            CollisionLayer::Ground.query_filter(),
        );
        assert!(!airborne);
    }

    #[test]
    fn test_layer_filter_excludes_other_layers() {
        let mut world = PhysicsWorld::new();
        let collider = ColliderBuilder::ball(0.5)
            .translation(vector![0.0, 0.0, 0.0])
            .collision_groups(CollisionLayer::Effect.to_interaction_groups())
            .build();
        world.add_static_collider(collider);

        let hit = world.raycast(
            vector![0.0, 5.0, 0.0],
            vector![0.0, -1.0, 0.0],
            10.0,
            true,
            CollisionLayer::Ground.query_filter(),
        );
        assert!(hit.is_none(), "effect collider must not look like ground");
    }
}
