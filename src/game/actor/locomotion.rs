// Locomotion state machine: grounding, jumping, gravity, and phase
//
// One `advance` call per tick, in a fixed order: ground check, anti-bounce
// clamp, horizontal intent, jump evaluation, gravity integration, phase
// classification. All timing is held as remaining-time fields; nothing
// here waits or schedules.

use super::actor::Actor;
use super::phase::MovePhase;
use super::settings::MovementSettings;
use crate::core::math::{flatten_to_horizontal, normalized_input, INPUT_DEAD_ZONE};
use crate::engine::input::InputSnapshot;
use crate::engine::physics::GroundProbe;
use glam::{Quat, Vec2, Vec3};

/// Result of one locomotion tick
#[derive(Debug, Clone, Copy)]
pub struct LocomotionTick {
    /// Velocity to hand to the motion executor, in units/second.
    /// The y component carries the gravity-integrated vertical velocity.
    pub velocity: Vec3,
    /// Phase classified for this tick
    pub phase: MovePhase,
    /// A jump launched this tick (animation trigger)
    pub jumped: bool,
    /// Blend value for the animator's speed parameter
    pub speed_value: f32,
}

/// Grounding, jump, and gravity state for one actor
#[derive(Debug)]
pub struct LocomotionState {
    settings: MovementSettings,

    vertical_velocity: f32,
    phase: MovePhase,

    is_grounded: bool,
    was_grounded: bool,
    /// Monotonic clock, accumulated from tick deltas
    clock: f32,
    /// Clock value of the most recent grounded tick
    last_grounded_time: f32,

    /// Remaining window of a pending jump request
    jump_buffer_remaining: f32,
    is_jumping: bool,
}

impl LocomotionState {
    pub fn new(settings: MovementSettings) -> Self {
        Self {
            settings,
            vertical_velocity: 0.0,
            phase: MovePhase::Idle,
            is_grounded: false,
            was_grounded: false,
            clock: 0.0,
            // Spawning airborne must not grant a coyote jump
            last_grounded_time: f32::NEG_INFINITY,
            jump_buffer_remaining: 0.0,
            is_jumping: false,
        }
    }

    pub fn settings(&self) -> &MovementSettings {
        &self.settings
    }

    pub fn phase(&self) -> MovePhase {
        self.phase
    }

    pub fn is_grounded(&self) -> bool {
        self.is_grounded
    }

    pub fn was_grounded(&self) -> bool {
        self.was_grounded
    }

    pub fn is_jumping(&self) -> bool {
        self.is_jumping
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn jump_buffer_remaining(&self) -> f32 {
        self.jump_buffer_remaining
    }

    /// Advance the state machine by one tick.
    ///
    /// `locked` suppresses intent: no horizontal movement, no rotation, no
    /// jump evaluation. Grounding, the anti-bounce clamp, gravity, and
    /// classification still run, so a cast mid-air keeps falling normally.
    pub fn advance(
        &mut self,
        actor: &mut Actor,
        input: &InputSnapshot,
        probe: &impl GroundProbe,
        locked: bool,
        dt: f32,
    ) -> LocomotionTick {
        self.clock += dt;

        // 1. Ground check
        self.was_grounded = self.is_grounded;
        self.is_grounded = self.resolve_grounded(probe, actor.position);
        if self.is_grounded {
            self.last_grounded_time = self.clock;
            if self.is_jumping && self.vertical_velocity <= 0.0 {
                self.is_jumping = false;
            }
        }

        // 2. Anti-bounce clamp. Runs every grounded tick with downward
        // velocity, jump state notwithstanding, so standing on a slope never
        // accumulates fall speed.
        if self.is_grounded && self.vertical_velocity < 0.0 {
            self.vertical_velocity = self.settings.grounded_stick_velocity;
        }

        // 3. Horizontal intent and rotation
        let (move_direction, intent) = if locked {
            (None, 0.0)
        } else {
            self.resolve_move_direction(input)
        };

        if let Some(direction) = move_direction {
            let target = yaw_towards(direction);
            let turn = (self.settings.rotation_speed * dt).min(1.0);
            actor.orientation = actor.orientation.slerp(target, turn);
        }

        // 4. Jump evaluation. The press always reloads the buffer (even mid
        // cast, so a press just before a cast ends is honored right after);
        // execution is gated on the lock.
        if input.jump_pressed {
            self.jump_buffer_remaining = self.settings.jump_buffer_time;
        }
        let jumped = if locked { false } else { self.try_jump() };

        // 5. Gravity integration
        if !self.is_grounded {
            self.vertical_velocity = (self.vertical_velocity + self.settings.gravity * dt)
                .max(self.settings.terminal_fall_speed);
        }

        // 6. Phase classification
        self.phase = self.classify(intent, input.run_held);

        // Expire the buffer after evaluation so a request and its execution
        // can share a tick
        self.jump_buffer_remaining = (self.jump_buffer_remaining - dt).max(0.0);

        let speed = if input.run_held {
            self.settings.run_speed
        } else {
            self.settings.walk_speed
        };
        let horizontal = move_direction.map_or(Vec3::ZERO, |direction| direction * speed);

        actor.velocity = horizontal + Vec3::Y * self.vertical_velocity;

        LocomotionTick {
            velocity: actor.velocity,
            phase: self.phase,
            jumped,
            speed_value: self.speed_value(intent, input.run_held),
        }
    }

    /// Combine the probe's two grounded sources.
    /// Either alone is normally enough (biased toward "grounded" to avoid
    /// jitter), except a bare primary contact with no volumetric support,
    /// which one extra downward ray has to confirm.
    fn resolve_grounded(&self, probe: &impl GroundProbe, position: Vec3) -> bool {
        let primary = probe.contact_grounded();
        let secondary = probe.overlap_grounded(position);

        if primary && !secondary {
            probe
                .raycast_down(position, self.settings.ground_check_distance + 0.1)
                .is_some()
        } else {
            primary || secondary
        }
    }

    /// Camera-relative move direction from the snapshot's axes.
    /// Returns the world-space direction and the input magnitude, or no
    /// direction inside the dead zone.
    fn resolve_move_direction(&self, input: &InputSnapshot) -> (Option<Vec3>, f32) {
        let (stick, magnitude) = normalized_input(Vec2::new(input.horizontal, input.vertical));
        if magnitude == 0.0 {
            return (None, 0.0);
        }

        let forward = flatten_to_horizontal(input.camera.forward).unwrap_or(Vec3::NEG_Z);
        let right = flatten_to_horizontal(input.camera.right).unwrap_or(Vec3::X);

        let direction = forward * stick.y + right * stick.x;
        match flatten_to_horizontal(direction) {
            Some(direction) => (Some(direction), magnitude),
            None => (None, 0.0),
        }
    }

    /// A jump executes while the buffered request is live, the actor is
    /// grounded or within the coyote window, and no jump is in flight.
    /// Both windows must expire for the request to be discarded.
    fn try_jump(&mut self) -> bool {
        let within_coyote = self.clock - self.last_grounded_time <= self.settings.coyote_time;
        let can_jump = self.is_grounded || within_coyote;

        if self.jump_buffer_remaining > 0.0 && can_jump && !self.is_jumping {
            // Projectile motion: v = sqrt(2 * h * |g|)
            self.vertical_velocity =
                (2.0 * self.settings.jump_height * self.settings.gravity.abs()).sqrt();
            self.is_jumping = true;
            self.jump_buffer_remaining = 0.0;
            true
        } else {
            false
        }
    }

    fn classify(&mut self, intent: f32, run_held: bool) -> MovePhase {
        if self.is_jumping {
            if self.vertical_velocity > 0.0 {
                return MovePhase::Jumping;
            }
            if !self.is_grounded {
                return MovePhase::Falling;
            }
            // Landed with the flag still set: clear it and classify below
            self.is_jumping = false;
        }

        if self.is_grounded {
            if intent > 0.0 {
                if run_held {
                    MovePhase::Running
                } else {
                    MovePhase::Walking
                }
            } else {
                MovePhase::Idle
            }
        } else {
            MovePhase::Falling
        }
    }

    /// Animator speed blend: walk occupies 0..0.5, run 0.5..1.0, with small
    /// fixed values in the air
    fn speed_value(&self, intent: f32, run_held: bool) -> f32 {
        if self.is_grounded {
            if intent > INPUT_DEAD_ZONE {
                if run_held {
                    0.5 + intent * 0.5
                } else {
                    intent * 0.5
                }
            } else {
                0.0
            }
        } else if intent > INPUT_DEAD_ZONE {
            0.3
        } else {
            0.1
        }
    }
}

/// Yaw-only rotation facing `direction` (actor forward is -Z)
fn yaw_towards(direction: Vec3) -> Quat {
    Quat::from_rotation_y((-direction.x).atan2(-direction.z))
}
