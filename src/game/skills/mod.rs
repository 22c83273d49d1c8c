// Skill system
//
// - `definition`: immutable skill data (cast time, cooldown, effects)
// - `catalog`: loads definitions from TOML and shares them read-only
// - `slot`: the per-slot Ready -> Casting -> OnCooldown state machine
// - `manager`: the actor's hotbar - routing, concurrency, diagnostics
// - `effects`: the application boundary and spawn transform math

pub mod catalog;
pub mod definition;
pub mod effects;
pub mod manager;
pub mod slot;

// Re-export commonly used types
pub use catalog::SkillCatalog;
pub use definition::{EffectKind, EffectSpec, SkillCost, SkillDefinition};
pub use effects::{AppliedEffect, EffectApplier, EffectContext, RecordingEffects, TargetRef};
pub use manager::SkillManager;
pub use slot::{Availability, SkillSlot, SlotEvent, SlotState};

/// Skill catalog errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate skill id: {id}")]
    DuplicateId { id: String },

    #[error("invalid skill definition: {reason}")]
    InvalidSkill { reason: String },

    #[error("failed to parse skill catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
