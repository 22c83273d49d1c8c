// Hotbar manager - routes cast intents to slots and enforces the
// actor-wide casting rules the slots cannot see alone

use super::catalog::SkillCatalog;
use super::definition::SkillDefinition;
use super::effects::{EffectApplier, EffectContext, TargetRef};
use super::slot::{SkillSlot, SlotEvent};
use crate::game::actor::Actor;
use std::sync::Arc;

/// All of one actor's hotbar slots plus the learned-skill list.
///
/// Enforces single-cast concurrency: at most one slot casts at a time,
/// so two skills can never fight over the actor's animation and lock.
#[derive(Debug)]
pub struct SkillManager {
    slots: Vec<SkillSlot>,
    learned: Vec<Arc<SkillDefinition>>,
    /// Diagnostic count of effects skipped for a missing target
    skipped_effects: u64,
}

impl SkillManager {
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: (0..slot_count).map(SkillSlot::new).collect(),
            learned: Vec::new(),
            skipped_effects: 0,
        }
    }

    /// Build a manager that knows every catalog skill and binds the first
    /// N of them to the N slots, in catalog order
    pub fn from_catalog(catalog: &SkillCatalog, slot_count: usize) -> Self {
        let mut manager = Self::new(slot_count);
        for skill in catalog.iter() {
            manager.learn(skill);
        }
        manager.assign_defaults();
        manager
    }

    /// Add a skill to the learned list. Returns false if already known.
    pub fn learn(&mut self, skill: Arc<SkillDefinition>) -> bool {
        if self.learned.iter().any(|known| known.id == skill.id) {
            return false;
        }
        self.learned.push(skill);
        true
    }

    /// Bind the first learned skills to the hotbar, one per slot
    pub fn assign_defaults(&mut self) {
        let count = self.learned.len().min(self.slots.len());
        for index in 0..count {
            let skill = self.learned[index].clone();
            self.slots[index].assign_skill(skill);
        }
    }

    /// Bind a learned skill to a slot. Fails for unknown ids, bad indices,
    /// and slots that are not Ready.
    pub fn assign_to_slot(&mut self, index: usize, skill_id: &str) -> bool {
        let Some(skill) = self
            .learned
            .iter()
            .find(|skill| skill.id == skill_id)
            .cloned()
        else {
            log::debug!("assign_to_slot: '{skill_id}' is not a learned skill");
            return false;
        };
        match self.slots.get_mut(index) {
            Some(slot) => slot.assign_skill(skill),
            None => false,
        }
    }

    pub fn slot(&self, index: usize) -> Option<&SkillSlot> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> &[SkillSlot] {
        &self.slots
    }

    pub fn learned(&self) -> &[Arc<SkillDefinition>] {
        &self.learned
    }

    /// Whether any slot is casting right now
    pub fn any_casting(&self) -> bool {
        self.slots.iter().any(|slot| slot.is_casting())
    }

    /// Total effects skipped for a missing target since startup
    pub fn skipped_effects(&self) -> u64 {
        self.skipped_effects
    }

    /// Attempt to cast from a slot. Refused while any other slot is casting
    /// (single-cast concurrency is actor-scoped, not slot-scoped).
    pub fn try_activate(
        &mut self,
        index: usize,
        actor: &mut Actor,
        target: Option<TargetRef>,
        applier: &mut dyn EffectApplier,
        events: &mut Vec<SlotEvent>,
    ) -> bool {
        if self.any_casting() {
            log::debug!("cast from slot {index} refused: another cast is in flight");
            return false;
        }

        let mut ctx = EffectContext::new(actor.position, actor.orientation);
        ctx.target = target;

        let Some(slot) = self.slots.get_mut(index) else {
            return false;
        };
        let already_counted = events.len();
        let activated = slot.try_activate(ctx, &mut actor.lock, applier, events);
        self.count_skips(&events[already_counted..]);
        activated
    }

    /// Advance every slot's cast and cooldown timers by one tick
    pub fn tick(
        &mut self,
        actor: &mut Actor,
        applier: &mut dyn EffectApplier,
        dt: f32,
    ) -> Vec<SlotEvent> {
        let mut events = Vec::new();
        for slot in &mut self.slots {
            slot.tick(
                actor.position,
                actor.orientation,
                &mut actor.lock,
                applier,
                dt,
                &mut events,
            );
        }
        self.count_skips(&events);
        events
    }

    /// Cancel a slot, abandoning any in-flight cast or cooldown
    pub fn reset_slot(&mut self, index: usize, actor: &mut Actor) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.reset(&mut actor.lock);
        }
    }

    fn count_skips(&mut self, events: &[SlotEvent]) {
        let new_skips = events
            .iter()
            .filter(|e| matches!(e, SlotEvent::EffectSkipped { .. }))
            .count() as u64;
        if new_skips > 0 {
            self.skipped_effects += new_skips;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::skills::effects::RecordingEffects;
    use glam::Vec3;

    const DT: f32 = 1.0 / 60.0;

    const CATALOG: &str = r#"
    [[skills]]
    id = "fireball"
    name = "Fireball"
    cast_time = 0.5
    cooldown = 3.0

    [[skills]]
    id = "mend"
    name = "Mend"
    cast_time = 0.0
    cooldown = 8.0
    lock_movement = false

    [[skills]]
    id = "smite"
    name = "Smite"
    cast_time = 0.0
    cooldown = 1.0
    lock_movement = false

    [[skills.effects]]
    id = "strike"
    kind = "damage"
    requires_target = true
    "#;

    fn manager() -> SkillManager {
        let catalog = SkillCatalog::from_toml_str(CATALOG).unwrap();
        SkillManager::from_catalog(&catalog, 4)
    }

    #[test]
    fn test_default_assignment_in_catalog_order() {
        let manager = manager();
        assert_eq!(manager.slot(0).unwrap().skill().unwrap().id, "fireball");
        assert_eq!(manager.slot(1).unwrap().skill().unwrap().id, "mend");
        assert_eq!(manager.slot(2).unwrap().skill().unwrap().id, "smite");
        assert!(manager.slot(3).unwrap().skill().is_none());
    }

    #[test]
    fn test_learn_dedupes_by_id() {
        let mut manager = manager();
        let known = manager.learned()[0].clone();
        assert!(!manager.learn(known));
        assert_eq!(manager.learned().len(), 3);
    }

    #[test]
    fn test_single_cast_concurrency_across_slots() {
        let mut manager = manager();
        let mut actor = Actor::new(Vec3::ZERO);
        let mut applier = RecordingEffects::new();
        let mut events = Vec::new();

        // Fireball starts a 0.5s cast
        assert!(manager.try_activate(0, &mut actor, None, &mut applier, &mut events));
        assert!(manager.any_casting());

        // Mend is itself Ready but the actor is busy casting
        assert!(!manager.try_activate(1, &mut actor, None, &mut applier, &mut events));

        // After the cast completes, mend goes through
        for _ in 0..31 {
            manager.tick(&mut actor, &mut applier, DT);
        }
        assert!(!manager.any_casting());
        assert!(manager.try_activate(1, &mut actor, None, &mut applier, &mut events));
    }

    #[test]
    fn test_movement_lock_follows_cast() {
        let mut manager = manager();
        let mut actor = Actor::new(Vec3::ZERO);
        let mut applier = RecordingEffects::new();
        let mut events = Vec::new();

        manager.try_activate(0, &mut actor, None, &mut applier, &mut events);
        assert!(actor.is_movement_locked());

        for _ in 0..31 {
            manager.tick(&mut actor, &mut applier, DT);
        }
        assert!(!actor.is_movement_locked());
    }

    #[test]
    fn test_unknown_slot_index_fails() {
        let mut manager = manager();
        let mut actor = Actor::new(Vec3::ZERO);
        let mut applier = RecordingEffects::new();
        let mut events = Vec::new();

        assert!(!manager.try_activate(9, &mut actor, None, &mut applier, &mut events));
    }

    #[test]
    fn test_assign_to_slot_requires_learned_skill() {
        let mut manager = manager();
        assert!(manager.assign_to_slot(3, "mend"));
        assert_eq!(manager.slot(3).unwrap().skill().unwrap().id, "mend");

        assert!(!manager.assign_to_slot(3, "unknown-skill"));
        assert!(!manager.assign_to_slot(9, "mend"));
    }

    #[test]
    fn test_skipped_effect_diagnostics() {
        let mut manager = manager();
        let mut actor = Actor::new(Vec3::ZERO);
        let mut applier = RecordingEffects::new();
        let mut events = Vec::new();

        // Smite requires a target; casting without one skips its effect
        assert!(manager.try_activate(2, &mut actor, None, &mut applier, &mut events));
        assert_eq!(manager.skipped_effects(), 1);
        assert!(applier.applied().is_empty());

        // Cooldown still started despite the skip
        assert!(manager.slot(2).unwrap().is_on_cooldown());
    }

    #[test]
    fn test_reset_slot_allows_immediate_reuse() {
        let mut manager = manager();
        let mut actor = Actor::new(Vec3::ZERO);
        let mut applier = RecordingEffects::new();
        let mut events = Vec::new();

        manager.try_activate(0, &mut actor, None, &mut applier, &mut events);
        assert!(actor.is_movement_locked());

        manager.reset_slot(0, &mut actor);
        assert!(!actor.is_movement_locked());
        assert!(!manager.any_casting());

        assert!(manager.try_activate(0, &mut actor, None, &mut applier, &mut events));
    }

    #[test]
    fn test_tick_with_no_activity_is_quiet() {
        let mut manager = manager();
        let mut actor = Actor::new(Vec3::ZERO);
        let mut applier = RecordingEffects::new();

        let events = manager.tick(&mut actor, &mut applier, DT);
        assert!(events.is_empty());
    }
}
