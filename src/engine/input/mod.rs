// Input handling system
//
// Turns raw keyboard events into the per-tick snapshots the gameplay
// state machines consume. Nothing outside this module polls devices.
//
// - `action`: game actions and default key bindings
// - `buffer`: time-window buffering so presses between ticks are not lost
// - `config`: remappable bindings, player layer over global layer
// - `player`: per-player action state and snapshot building
// - `snapshot`: the read-only per-tick view (axes, jump, cast slot, camera)
// - `manager`: routes winit events into the local player's state

pub mod action;
pub mod buffer;
pub mod config;
pub mod manager;
pub mod player;
pub mod snapshot;

// Re-export commonly used types
pub use action::{Action, InputSource, HOTBAR_SLOTS};
pub use config::{BindingLayers, InputBindings};
pub use manager::InputManager;
pub use player::PlayerInput;
pub use snapshot::{CameraBasis, InputSnapshot};
