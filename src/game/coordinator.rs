// Action coordinator - one consistent tick across both state machines
//
// Movement and casting are mutually exclusive character actions; this is
// the one place that sees both. Per tick: progress casts, accept new cast
// intent, advance locomotion under the merged movement lock, execute the
// move, then push a single combined parameter set to the animation sink so
// observers never see a half-updated tick.

use crate::engine::animation::{AnimationParameters, AnimationSink};
use crate::engine::input::InputSnapshot;
use crate::engine::physics::{GroundProbe, MotionExecutor};
use crate::game::actor::{Actor, LocomotionState, MovePhase};
use crate::game::skills::{EffectApplier, SkillManager, SlotEvent, TargetRef};
use glam::Vec3;

/// Damp time for the animator speed parameter
const SPEED_SMOOTHING: f32 = 0.1;

/// Everything observers need to know about one coordinated tick
#[derive(Debug)]
pub struct CoordinatorTick {
    pub phase: MovePhase,
    /// Velocity actually handed to the motion executor
    pub applied_velocity: Vec3,
    pub movement_locked: bool,
    pub jumped: bool,
    pub skill_events: Vec<SlotEvent>,
}

/// Owns the two per-actor state machines and arbitrates between them
pub struct ActionCoordinator {
    locomotion: LocomotionState,
    skills: SkillManager,
    animation: AnimationParameters,
}

impl ActionCoordinator {
    pub fn new(
        locomotion: LocomotionState,
        skills: SkillManager,
        animation: AnimationParameters,
    ) -> Self {
        Self {
            locomotion,
            skills,
            animation,
        }
    }

    pub fn locomotion(&self) -> &LocomotionState {
        &self.locomotion
    }

    pub fn skills(&self) -> &SkillManager {
        &self.skills
    }

    pub fn skills_mut(&mut self) -> &mut SkillManager {
        &mut self.skills
    }

    /// Advance one tick.
    ///
    /// `motor` supplies both external movement capabilities: the ground
    /// probe read during locomotion and the executor that resolves the
    /// final move against the world.
    pub fn tick<M>(
        &mut self,
        actor: &mut Actor,
        input: &InputSnapshot,
        motor: &mut M,
        applier: &mut dyn EffectApplier,
        sink: &mut dyn AnimationSink,
        target: Option<TargetRef>,
        dt: f32,
    ) -> CoordinatorTick
    where
        M: GroundProbe + MotionExecutor,
    {
        // In-flight casts and cooldowns progress first, so a cast completing
        // this tick releases its movement lock before movement is decided
        let mut skill_events = self.skills.tick(actor, applier, dt);

        // New cast intent from the hotbar
        if let Some(slot) = input.cast_slot_pressed {
            self.skills
                .try_activate(slot, actor, target, applier, &mut skill_events);
        }

        // Locomotion under the merged lock state
        let locked = actor.is_movement_locked();
        let locomotion = self.locomotion.advance(actor, input, &*motor, locked, dt);

        // While locked the executor sees no horizontal motion at all;
        // gravity keeps applying so an airborne cast still falls
        let applied_velocity = if locked {
            Vec3::new(0.0, locomotion.velocity.y, 0.0)
        } else {
            locomotion.velocity
        };
        actor.position = motor.apply_move(actor.position, applied_velocity, dt);

        // Single combined animation push for the whole tick
        sink.set_float_damped(
            &self.animation.speed,
            locomotion.speed_value,
            SPEED_SMOOTHING,
            dt,
        );
        sink.set_bool(&self.animation.is_grounded, self.locomotion.is_grounded());
        sink.set_float(
            &self.animation.vertical_velocity,
            self.locomotion.vertical_velocity(),
        );
        if locomotion.jumped {
            sink.set_trigger(&self.animation.jump_trigger);
        }
        for event in &skill_events {
            if let SlotEvent::CastStarted {
                animation_trigger, ..
            } = event
            {
                if !animation_trigger.is_empty() {
                    sink.set_trigger(animation_trigger);
                }
            }
        }

        CoordinatorTick {
            phase: locomotion.phase,
            applied_velocity,
            movement_locked: locked,
            jumped: locomotion.jumped,
            skill_events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::animation::RecordingSink;
    use crate::game::actor::MovementSettings;
    use crate::game::skills::{RecordingEffects, SkillCatalog};
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    /// Flat floor at y = 0: probe and executor in one, like the real motor
    struct FlatMotor {
        contact: bool,
    }

    impl FlatMotor {
        fn new() -> Self {
            Self { contact: true }
        }
    }

    impl GroundProbe for FlatMotor {
        fn contact_grounded(&self) -> bool {
            self.contact
        }

        fn overlap_grounded(&self, position: Vec3) -> bool {
            position.y <= 0.15
        }

        fn raycast_down(&self, origin: Vec3, max_distance: f32) -> Option<f32> {
            (origin.y >= 0.0 && origin.y <= max_distance).then_some(origin.y)
        }
    }

    impl MotionExecutor for FlatMotor {
        fn apply_move(&mut self, position: Vec3, velocity: Vec3, dt: f32) -> Vec3 {
            let mut next = position + velocity * dt;
            if velocity.y <= 0.0 && next.y <= 0.0 {
                next.y = 0.0;
                self.contact = true;
            } else {
                self.contact = false;
            }
            next
        }
    }

    const CATALOG: &str = r#"
    [[skills]]
    id = "fireball"
    name = "Fireball"
    cast_time = 0.5
    cooldown = 3.0
    animation_trigger = "CastFireball"

    [[skills.effects]]
    id = "bolt"
    kind = "damage"
    value = 25.0

    [[skills]]
    id = "mend"
    name = "Mend"
    cast_time = 0.0
    cooldown = 8.0
    lock_movement = false
    animation_trigger = "CastMend"
    "#;

    fn coordinator() -> ActionCoordinator {
        let catalog = SkillCatalog::from_toml_str(CATALOG).unwrap();
        ActionCoordinator::new(
            LocomotionState::new(MovementSettings::default()),
            SkillManager::from_catalog(&catalog, 4),
            AnimationParameters::default(),
        )
    }

    struct Rig {
        coordinator: ActionCoordinator,
        actor: Actor,
        motor: FlatMotor,
        applier: RecordingEffects,
        sink: RecordingSink,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                coordinator: coordinator(),
                actor: Actor::new(Vec3::ZERO),
                motor: FlatMotor::new(),
                applier: RecordingEffects::new(),
                sink: RecordingSink::new(),
            }
        }

        fn tick(&mut self, input: &InputSnapshot) -> CoordinatorTick {
            self.coordinator.tick(
                &mut self.actor,
                input,
                &mut self.motor,
                &mut self.applier,
                &mut self.sink,
                None,
                DT,
            )
        }
    }

    #[test]
    fn test_walking_moves_the_actor() {
        let mut rig = Rig::new();
        let input = InputSnapshot::neutral().with_move(0.0, 1.0);

        for _ in 0..60 {
            rig.tick(&input);
        }

        // One second at walk speed 2 along camera forward (-Z)
        assert_relative_eq!(rig.actor.position.z, -2.0, epsilon = 0.1);
        assert_eq!(rig.coordinator.locomotion().phase(), MovePhase::Walking);
    }

    #[test]
    fn test_cast_locks_movement_until_completion() {
        let mut rig = Rig::new();

        // Start the 0.5s locking cast
        let tick = rig.tick(&InputSnapshot::neutral().with_cast(0));
        assert!(tick
            .skill_events
            .iter()
            .any(|e| matches!(e, SlotEvent::CastStarted { .. })));
        assert!(rig.actor.is_movement_locked());

        // Movement input is ignored while the cast runs
        let before = rig.actor.position;
        let input = InputSnapshot::neutral().with_move(0.0, 1.0);
        for _ in 0..10 {
            let tick = rig.tick(&input);
            assert!(tick.movement_locked);
            assert_eq!(tick.applied_velocity.x, 0.0);
            assert_eq!(tick.applied_velocity.z, 0.0);
        }
        assert_relative_eq!(rig.actor.position.x, before.x);
        assert_relative_eq!(rig.actor.position.z, before.z);

        // Cast completes around the 30th tick; movement resumes
        let mut used = false;
        for _ in 0..25 {
            let tick = rig.tick(&input);
            used |= tick
                .skill_events
                .iter()
                .any(|e| matches!(e, SlotEvent::SkillUsed { .. }));
        }
        assert!(used);
        assert!(!rig.actor.is_movement_locked());

        for _ in 0..30 {
            rig.tick(&input);
        }
        assert!(rig.actor.position.z < before.z - 0.5);
    }

    #[test]
    fn test_cast_effects_apply_once() {
        let mut rig = Rig::new();
        rig.tick(&InputSnapshot::neutral().with_cast(0));

        for _ in 0..40 {
            rig.tick(&InputSnapshot::neutral());
        }

        assert_eq!(rig.applier.applied().len(), 1);
        assert_eq!(rig.applier.applied()[0].effect_id, "bolt");
    }

    #[test]
    fn test_non_locking_cast_leaves_movement_free() {
        let mut rig = Rig::new();
        let input = InputSnapshot::neutral().with_move(0.0, 1.0).with_cast(1);

        let tick = rig.tick(&input);
        assert!(!tick.movement_locked);
        assert!(tick.applied_velocity.z < 0.0);
    }

    #[test]
    fn test_animation_push_reflects_one_tick() {
        let mut rig = Rig::new();
        let input = InputSnapshot::neutral().with_move(0.0, 1.0).with_run();

        rig.tick(&input);

        assert!(rig.sink.float("Speed").is_some());
        assert_eq!(rig.sink.bool_value("IsGrounded"), Some(true));
        assert!(rig.sink.float("VerticalVelocity").is_some());
    }

    #[test]
    fn test_jump_and_cast_triggers_fire() {
        let mut rig = Rig::new();

        rig.tick(&InputSnapshot::neutral().with_jump());
        assert!(rig.sink.has_trigger("Jump"));
        rig.sink.take_triggers();

        // Land again before casting
        for _ in 0..120 {
            rig.tick(&InputSnapshot::neutral());
        }
        rig.sink.take_triggers();

        rig.tick(&InputSnapshot::neutral().with_cast(0));
        assert!(rig.sink.has_trigger("CastFireball"));
    }

    #[test]
    fn test_cooldown_progress_events_flow_through() {
        let mut rig = Rig::new();
        rig.tick(&InputSnapshot::neutral().with_cast(1));

        let tick = rig.tick(&InputSnapshot::neutral());
        assert!(tick
            .skill_events
            .iter()
            .any(|e| matches!(e, SlotEvent::CooldownProgress { .. })));
    }
}
