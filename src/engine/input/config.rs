// Input configuration and remapping system

use super::action::{Action, InputSource};
use std::collections::HashMap;

/// A remappable set of input bindings.
/// Maps input sources (keys/buttons) to game actions.
#[derive(Debug, Clone)]
pub struct InputBindings {
    /// Mapping from input sources to actions
    bindings: HashMap<InputSource, Action>,

    /// Reverse mapping for quick lookups (action -> all sources)
    action_to_sources: HashMap<Action, Vec<InputSource>>,
}

impl InputBindings {
    /// Create an empty binding set
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            action_to_sources: HashMap::new(),
        }
    }

    /// Create a binding set from a list of pairs
    pub fn from_pairs(pairs: Vec<(InputSource, Action)>) -> Self {
        let mut bindings = Self::new();
        for (source, action) in pairs {
            bindings.bind(source, action);
        }
        bindings
    }

    /// The default local-player bindings
    pub fn defaults() -> Self {
        Self::from_pairs(super::action::default_player_bindings())
    }

    /// Bind an input source to an action, replacing any existing binding
    /// for that source
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.unbind_source(source);

        self.bindings.insert(source, action);
        self.action_to_sources.entry(action).or_default().push(source);
    }

    /// Unbind an input source
    pub fn unbind_source(&mut self, source: InputSource) {
        if let Some(action) = self.bindings.remove(&source) {
            if let Some(sources) = self.action_to_sources.get_mut(&action) {
                sources.retain(|s| *s != source);
                if sources.is_empty() {
                    self.action_to_sources.remove(&action);
                }
            }
        }
    }

    /// Unbind all sources for an action
    pub fn unbind_action(&mut self, action: Action) {
        if let Some(sources) = self.action_to_sources.remove(&action) {
            for source in sources {
                self.bindings.remove(&source);
            }
        }
    }

    /// Get the action bound to an input source
    pub fn action_for(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    /// Get all input sources bound to an action
    pub fn sources_for(&self, action: Action) -> Vec<InputSource> {
        self.action_to_sources
            .get(&action)
            .cloned()
            .unwrap_or_default()
    }

    /// Check if an action has any bindings
    pub fn has_binding(&self, action: Action) -> bool {
        self.action_to_sources.contains_key(&action)
    }

    /// Clear all bindings
    pub fn clear(&mut self) {
        self.bindings.clear();
        self.action_to_sources.clear();
    }
}

impl Default for InputBindings {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Player bindings layered over global (non-remappable) bindings.
/// Player bindings win when both match a source.
#[derive(Debug, Clone)]
pub struct BindingLayers {
    player: InputBindings,
    global: InputBindings,
}

impl BindingLayers {
    /// Create the standard layering: default player bindings plus globals
    pub fn new() -> Self {
        Self {
            player: InputBindings::defaults(),
            global: InputBindings::from_pairs(super::action::global_bindings()),
        }
    }

    /// Resolve a source against the player layer first, then the global layer
    pub fn action_for(&self, source: InputSource) -> Option<Action> {
        self.player
            .action_for(source)
            .or_else(|| self.global.action_for(source))
    }

    /// The remappable player layer
    pub fn player(&self) -> &InputBindings {
        &self.player
    }

    /// Mutable access for remapping
    pub fn player_mut(&mut self) -> &mut InputBindings {
        &mut self.player
    }

    /// Restore the default player bindings
    pub fn reset_to_defaults(&mut self) {
        self.player = InputBindings::defaults();
    }
}

impl Default for BindingLayers {
    fn default() -> Self {
        Self::new()
    }
}
