// Skill definitions - the immutable data a catalog loads once
//
// Definitions are shared read-only (`Arc`) between every slot that binds
// them; no slot ever mutates one.

use glam::Vec3;
use serde::Deserialize;

/// What an effect entry does when it resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    Damage,
    Heal,
    Buff,
}

/// One entry of a skill's ordered effect list.
///
/// Effects are opaque payloads to the cast state machine: it forwards them
/// to the effect applier in order and never interprets them beyond the
/// target requirement.
#[derive(Debug, Clone, Deserialize)]
pub struct EffectSpec {
    pub id: String,
    pub kind: EffectKind,

    /// Strength of the effect (damage dealt, healing done, buff magnitude)
    #[serde(default)]
    pub value: f32,
    /// Lifetime of lingering effects, in seconds
    #[serde(default)]
    pub duration: f32,

    /// Spawn offset from the caster, in the caster's local frame
    #[serde(default)]
    pub offset: Vec3,
    /// Euler spawn rotation in degrees; only the roll component composes
    /// into the spawn orientation
    #[serde(default)]
    pub rotation: Vec3,

    /// Visual to instantiate at the spawn transform
    #[serde(default)]
    pub prefab: Option<String>,
    /// Sound to play at the caster
    #[serde(default)]
    pub audio: Option<String>,

    /// The effect cannot resolve without a supplied target
    #[serde(default)]
    pub requires_target: bool,
}

/// Resource price of a cast. Carried as data; activation does not enforce
/// payment (failure cases are empty slot, cooldown, and in-flight cast).
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct SkillCost {
    pub mana: f32,
    pub stamina: f32,
}

fn default_cast_time() -> f32 {
    0.5
}

fn default_range() -> f32 {
    5.0
}

fn default_lock_movement() -> bool {
    true
}

fn default_animation_trigger() -> String {
    "Attack".to_string()
}

fn default_animation_duration() -> f32 {
    1.0
}

/// Immutable description of one castable skill
#[derive(Debug, Clone, Deserialize)]
pub struct SkillDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,

    /// Delay between activation and effect application; zero means instant
    #[serde(default = "default_cast_time")]
    pub cast_time: f32,
    /// Mandatory wait after the effects apply before the next activation
    #[serde(default)]
    pub cooldown: f32,
    #[serde(default)]
    pub cost: SkillCost,

    #[serde(default = "default_range")]
    pub range: f32,
    #[serde(default)]
    pub requires_target: bool,

    /// Freeze the caster's movement for the cast duration
    #[serde(default = "default_lock_movement")]
    pub lock_movement: bool,
    #[serde(default = "default_animation_trigger")]
    pub animation_trigger: String,
    #[serde(default = "default_animation_duration")]
    pub animation_duration: f32,

    #[serde(default)]
    pub effects: Vec<EffectSpec>,
}

impl SkillDefinition {
    /// Validate a loaded definition; negative timings would make the cast
    /// state machine misbehave silently.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("skill id must not be empty".to_string());
        }
        if self.cast_time < 0.0 {
            return Err(format!(
                "skill '{}' has negative cast_time {}",
                self.id, self.cast_time
            ));
        }
        if self.cooldown < 0.0 {
            return Err(format!(
                "skill '{}' has negative cooldown {}",
                self.id, self.cooldown
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub fn minimal_toml() -> &'static str {
        r#"
        id = "fireball"
        name = "Fireball"
        cooldown = 3.0
        "#
    }

    #[test]
    fn test_defaults_from_minimal_toml() {
        let skill: SkillDefinition = toml::from_str(minimal_toml()).unwrap();
        assert_eq!(skill.id, "fireball");
        assert_eq!(skill.cast_time, 0.5);
        assert_eq!(skill.cooldown, 3.0);
        assert_eq!(skill.range, 5.0);
        assert!(skill.lock_movement);
        assert_eq!(skill.animation_trigger, "Attack");
        assert!(skill.effects.is_empty());
        assert!(skill.validate().is_ok());
    }

    #[test]
    fn test_effect_list_parses_in_order() {
        let skill: SkillDefinition = toml::from_str(
            r#"
            id = "ember-wave"
            name = "Ember Wave"
            cooldown = 6.0

            [[effects]]
            id = "scorch"
            kind = "damage"
            value = 12.0
            offset = [0.0, 1.2, -0.8]
            requires_target = true

            [[effects]]
            id = "afterglow"
            kind = "buff"
            value = 2.0
            duration = 4.0
            prefab = "vfx/afterglow"
            "#,
        )
        .unwrap();

        assert_eq!(skill.effects.len(), 2);
        assert_eq!(skill.effects[0].id, "scorch");
        assert_eq!(skill.effects[0].kind, EffectKind::Damage);
        assert!(skill.effects[0].requires_target);
        assert_eq!(skill.effects[0].offset, Vec3::new(0.0, 1.2, -0.8));
        assert_eq!(skill.effects[1].kind, EffectKind::Buff);
        assert_eq!(skill.effects[1].prefab.as_deref(), Some("vfx/afterglow"));
    }

    #[test]
    fn test_negative_cast_time_rejected() {
        let skill: SkillDefinition = toml::from_str(
            r#"
            id = "broken"
            name = "Broken"
            cast_time = -1.0
            "#,
        )
        .unwrap();
        assert!(skill.validate().is_err());
    }

    #[test]
    fn test_empty_id_rejected() {
        let skill: SkillDefinition = toml::from_str(
            r#"
            id = ""
            name = "Nameless"
            "#,
        )
        .unwrap();
        assert!(skill.validate().is_err());
    }
}
