// Skill catalog - loads definitions once and shares them read-only

use super::definition::SkillDefinition;
use super::CatalogError;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Registry of every skill the game knows.
///
/// Loaded from TOML at startup and read-only afterwards, except for
/// `learn`, which adds definitions acquired at runtime. Lookup order is
/// preserved for default hotbar assignment.
#[derive(Debug, Default)]
pub struct SkillCatalog {
    by_id: HashMap<String, Arc<SkillDefinition>>,
    order: Vec<String>,
}

/// On-disk shape of a catalog file
#[derive(Debug, serde::Deserialize)]
struct CatalogFile {
    #[serde(default)]
    skills: Vec<SkillDefinition>,
}

impl SkillCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a TOML file. Fatal at startup: an unreadable or
    /// invalid catalog must halt setup, not limp along with nothing bound.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_toml_str(&text)?;
        log::info!(
            "Loaded skill catalog: {} skills from {}",
            catalog.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }

    /// Parse a catalog from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(text)?;

        let mut catalog = Self::new();
        for skill in file.skills {
            skill
                .validate()
                .map_err(|reason| CatalogError::InvalidSkill { reason })?;
            if !catalog.learn(Arc::new(skill.clone())) {
                return Err(CatalogError::DuplicateId { id: skill.id });
            }
        }
        Ok(catalog)
    }

    /// Add a definition at runtime. Returns false if the id is already known.
    pub fn learn(&mut self, skill: Arc<SkillDefinition>) -> bool {
        if self.by_id.contains_key(&skill.id) {
            return false;
        }
        self.order.push(skill.id.clone());
        self.by_id.insert(skill.id.clone(), skill);
        true
    }

    /// Look up a skill by id
    pub fn get(&self, id: &str) -> Option<Arc<SkillDefinition>> {
        self.by_id.get(id).cloned()
    }

    /// Whether the catalog knows this id
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Skills in load order
    pub fn iter(&self) -> impl Iterator<Item = Arc<SkillDefinition>> + '_ {
        self.order.iter().filter_map(|id| self.by_id.get(id).cloned())
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
