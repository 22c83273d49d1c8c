// Hotbar slot cast/cooldown state machine
//
// Each slot cycles Ready -> Casting -> OnCooldown -> Ready. All waiting is
// a remaining-time field decremented by the caller's tick; canceling a slot
// abandons the in-flight cast or cooldown immediately with no partial
// effects.

use super::definition::SkillDefinition;
use super::effects::{EffectApplier, EffectContext, TargetRef};
use crate::game::actor::MovementLock;
use glam::{Quat, Vec3};
use std::sync::Arc;

/// Lifecycle state of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Ready,
    Casting,
    OnCooldown,
}

/// Why an activation would succeed or fail right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Ready,
    Empty,
    Casting,
    OnCooldown,
}

/// Notifications surfaced per tick. Observers (animation, UI, audio)
/// consume these returned values; slots hold no callbacks.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotEvent {
    CastStarted {
        slot: usize,
        skill_id: String,
        animation_trigger: String,
    },
    SkillUsed {
        slot: usize,
        skill_id: String,
    },
    EffectSkipped {
        slot: usize,
        skill_id: String,
        effect_id: String,
    },
    /// Remaining cooldown as a fraction of the full cooldown, for UI fills
    CooldownProgress {
        slot: usize,
        remaining_fraction: f32,
    },
    CooldownFinished {
        slot: usize,
    },
}

/// One hotbar slot and its bound skill
#[derive(Debug)]
pub struct SkillSlot {
    index: usize,
    skill: Option<Arc<SkillDefinition>>,
    state: SlotState,
    cast_remaining: f32,
    cooldown_remaining: f32,
    /// Whether this slot currently holds the actor's movement lock.
    /// Tracked per slot so release is exactly matched to acquire.
    holds_lock: bool,
    /// Target captured at activation, applied at completion
    pending_target: Option<TargetRef>,
}

impl SkillSlot {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            skill: None,
            state: SlotState::Ready,
            cast_remaining: 0.0,
            cooldown_remaining: 0.0,
            holds_lock: false,
            pending_target: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn skill(&self) -> Option<&Arc<SkillDefinition>> {
        self.skill.as_ref()
    }

    pub fn state(&self) -> SlotState {
        self.state
    }

    pub fn is_casting(&self) -> bool {
        self.state == SlotState::Casting
    }

    /// Derived, never stored separately: on cooldown means time remains
    pub fn is_on_cooldown(&self) -> bool {
        self.cooldown_remaining > 0.0
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_remaining
    }

    /// Remaining cooldown as a fraction of the bound skill's full cooldown
    pub fn cooldown_fraction(&self) -> f32 {
        match &self.skill {
            Some(skill) if skill.cooldown > 0.0 => self.cooldown_remaining / skill.cooldown,
            _ => 0.0,
        }
    }

    /// What an activation attempt would find right now
    pub fn availability(&self) -> Availability {
        if self.skill.is_none() {
            Availability::Empty
        } else if self.state == SlotState::Casting {
            Availability::Casting
        } else if self.state == SlotState::OnCooldown {
            Availability::OnCooldown
        } else {
            Availability::Ready
        }
    }

    /// Bind a skill to this slot. Only a Ready slot accepts a binding;
    /// replacing a skill mid-cast or mid-cooldown would leave timers and
    /// the movement lock attached to the wrong definition. Use `reset`
    /// first to discard in-flight state deliberately.
    pub fn assign_skill(&mut self, skill: Arc<SkillDefinition>) -> bool {
        if self.state != SlotState::Ready {
            log::debug!(
                "slot {} refused assignment of '{}' while {:?}",
                self.index,
                skill.id,
                self.state
            );
            return false;
        }
        self.skill = Some(skill);
        self.cooldown_remaining = 0.0;
        self.cast_remaining = 0.0;
        true
    }

    /// Abandon any in-flight cast or cooldown and return to Ready.
    /// No partial effects apply; a held movement lock is released.
    pub fn reset(&mut self, lock: &mut MovementLock) {
        if self.holds_lock {
            lock.release();
            self.holds_lock = false;
        }
        self.state = SlotState::Ready;
        self.cast_remaining = 0.0;
        self.cooldown_remaining = 0.0;
        self.pending_target = None;
    }

    /// Attempt to start casting. Fails with no side effect if the slot is
    /// empty, cooling down, or already casting. A zero cast time completes
    /// within this call.
    pub fn try_activate(
        &mut self,
        ctx: EffectContext,
        lock: &mut MovementLock,
        applier: &mut dyn EffectApplier,
        events: &mut Vec<SlotEvent>,
    ) -> bool {
        match self.availability() {
            Availability::Ready => {}
            other => {
                log::debug!("slot {} activation refused: {:?}", self.index, other);
                return false;
            }
        }
        let Some(skill) = self.skill.clone() else {
            return false;
        };

        self.state = SlotState::Casting;
        self.cast_remaining = skill.cast_time;
        self.pending_target = ctx.target;

        if skill.lock_movement {
            lock.acquire();
            self.holds_lock = true;
        }

        events.push(SlotEvent::CastStarted {
            slot: self.index,
            skill_id: skill.id.clone(),
            animation_trigger: skill.animation_trigger.clone(),
        });

        if self.cast_remaining <= 0.0 {
            self.complete_cast(&skill, ctx, lock, applier, events);
        }

        true
    }

    /// Advance cast and cooldown timers by one tick
    pub fn tick(
        &mut self,
        caster_position: Vec3,
        caster_orientation: Quat,
        lock: &mut MovementLock,
        applier: &mut dyn EffectApplier,
        dt: f32,
        events: &mut Vec<SlotEvent>,
    ) {
        match self.state {
            SlotState::Ready => {}
            SlotState::Casting => {
                self.cast_remaining = (self.cast_remaining - dt).max(0.0);
                if self.cast_remaining <= 0.0 {
                    let Some(skill) = self.skill.clone() else {
                        self.state = SlotState::Ready;
                        return;
                    };
                    let ctx = EffectContext {
                        caster_position,
                        caster_orientation,
                        target: self.pending_target,
                    };
                    self.complete_cast(&skill, ctx, lock, applier, events);
                }
            }
            SlotState::OnCooldown => {
                self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
                events.push(SlotEvent::CooldownProgress {
                    slot: self.index,
                    remaining_fraction: self.cooldown_fraction(),
                });
                if self.cooldown_remaining <= 0.0 {
                    self.state = SlotState::Ready;
                    events.push(SlotEvent::CooldownFinished { slot: self.index });
                }
            }
        }
    }

    /// Apply the effect list in order, notify, and start the cooldown
    fn complete_cast(
        &mut self,
        skill: &Arc<SkillDefinition>,
        ctx: EffectContext,
        lock: &mut MovementLock,
        applier: &mut dyn EffectApplier,
        events: &mut Vec<SlotEvent>,
    ) {
        for effect in &skill.effects {
            if effect.requires_target && ctx.target.is_none() {
                log::warn!(
                    "effect '{}' of skill '{}' skipped: no target supplied",
                    effect.id,
                    skill.id
                );
                events.push(SlotEvent::EffectSkipped {
                    slot: self.index,
                    skill_id: skill.id.clone(),
                    effect_id: effect.id.clone(),
                });
                continue;
            }
            applier.apply(skill, effect, &ctx);
        }

        events.push(SlotEvent::SkillUsed {
            slot: self.index,
            skill_id: skill.id.clone(),
        });

        if self.holds_lock {
            lock.release();
            self.holds_lock = false;
        }

        self.pending_target = None;
        self.cast_remaining = 0.0;
        self.cooldown_remaining = skill.cooldown;
        self.state = if skill.cooldown > 0.0 {
            SlotState::OnCooldown
        } else {
            SlotState::Ready
        };
    }
}
