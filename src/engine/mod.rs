// Engine modules: timing, input, physics queries, animation sink, scenes

pub mod animation;
pub mod game_loop;
pub mod input;
pub mod physics;
pub mod scene;
