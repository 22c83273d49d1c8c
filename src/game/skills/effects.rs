// Effect application boundary
//
// The cast state machine forwards effect entries here in order; what an
// effect actually does (damage math, VFX, audio) is the collaborator's
// business. The core only resolves the spawn transform and the target
// requirement.

use super::definition::{EffectSpec, SkillDefinition};
use glam::{EulerRot, Quat, Vec3};

/// An effect target supplied at activation time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetRef {
    pub id: u64,
    pub position: Vec3,
}

/// Caster state at the moment effects resolve
#[derive(Debug, Clone, Copy)]
pub struct EffectContext {
    pub caster_position: Vec3,
    pub caster_orientation: Quat,
    pub target: Option<TargetRef>,
}

impl EffectContext {
    pub fn new(caster_position: Vec3, caster_orientation: Quat) -> Self {
        Self {
            caster_position,
            caster_orientation,
            target: None,
        }
    }

    pub fn with_target(mut self, target: TargetRef) -> Self {
        self.target = Some(target);
        self
    }
}

/// World transform at which an effect's visual spawns.
///
/// Position is the caster position plus the raw effect offset. Orientation
/// composes the caster's yaw, the caster's pitch, and the effect's own roll,
/// in that order, so a cone of flame follows the camera tilt while its spin
/// stays authored.
pub fn spawn_transform(ctx: &EffectContext, effect: &EffectSpec) -> (Vec3, Quat) {
    let position = ctx.caster_position + effect.offset;

    let (yaw, pitch, _roll) = ctx.caster_orientation.to_euler(EulerRot::YXZ);
    let effect_roll = effect.rotation.z.to_radians();

    let orientation = Quat::from_rotation_y(yaw)
        * Quat::from_rotation_x(pitch)
        * Quat::from_rotation_z(effect_roll);

    (position, orientation)
}

/// Receives effects whose requirements were satisfied
pub trait EffectApplier {
    fn apply(&mut self, skill: &SkillDefinition, effect: &EffectSpec, ctx: &EffectContext);
}

/// Applier that records what it was asked to do.
/// Backs tests and the headless demo; a real client would spawn prefabs
/// and play audio here.
#[derive(Debug, Default)]
pub struct RecordingEffects {
    applied: Vec<AppliedEffect>,
}

/// One recorded application
#[derive(Debug, Clone)]
pub struct AppliedEffect {
    pub skill_id: String,
    pub effect_id: String,
    pub position: Vec3,
    pub orientation: Quat,
    pub target: Option<TargetRef>,
}

impl RecordingEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn applied(&self) -> &[AppliedEffect] {
        &self.applied
    }

    pub fn take_applied(&mut self) -> Vec<AppliedEffect> {
        std::mem::take(&mut self.applied)
    }
}

impl EffectApplier for RecordingEffects {
    fn apply(&mut self, skill: &SkillDefinition, effect: &EffectSpec, ctx: &EffectContext) {
        let (position, orientation) = spawn_transform(ctx, effect);

        if let Some(prefab) = &effect.prefab {
            log::debug!("spawn '{prefab}' for {}/{} at {position}", skill.id, effect.id);
        }
        if let Some(audio) = &effect.audio {
            log::debug!("play '{audio}' for {}/{}", skill.id, effect.id);
        }

        self.applied.push(AppliedEffect {
            skill_id: skill.id.clone(),
            effect_id: effect.id.clone(),
            position,
            orientation,
            target: ctx.target,
        });
    }
}
