use anyhow::{Context, Result};
use glam::Vec3;
use log::{debug, info};
use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::animation::RecordingSink;
use engine::game_loop::GameLoop;
use engine::input::{Action, CameraBasis, InputManager};
use engine::physics::{CharacterMotor, PhysicsWorld};
use engine::scene::{SceneDirector, SceneSource, TransitionEvent, ACTIVATION_GATE};
use game::actor::{Actor, LocomotionState, MovePhase};
use game::config::PlayerSettings;
use game::coordinator::ActionCoordinator;
use game::skills::{RecordingEffects, SkillCatalog, SkillManager, SlotEvent};

/// Stand-in for an engine scene loader: streams at a fixed rate up to the
/// activation gate, then finishes when activated
struct DemoSceneSource {
    progress: f32,
    rate: f32,
    done: bool,
}

impl DemoSceneSource {
    fn new(stream_seconds: f32) -> Self {
        Self {
            progress: 0.0,
            rate: ACTIVATION_GATE / stream_seconds.max(0.01),
            done: false,
        }
    }

    fn stream(&mut self, dt: f32) {
        self.progress = (self.progress + self.rate * dt).min(ACTIVATION_GATE);
    }
}

impl SceneSource for DemoSceneSource {
    fn begin_load(&mut self, scene: &str) {
        debug!("streaming scene '{scene}'");
        self.progress = 0.0;
        self.done = false;
    }

    fn progress(&self) -> f32 {
        self.progress
    }

    fn activate(&mut self) {
        self.done = true;
    }

    fn is_done(&self) -> bool {
        self.done
    }
}

enum AppPhase {
    Loading,
    Playing,
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Emberfall...");

    // Configuration is fatal when broken: a character without a validated
    // ground probe or movement tuning must not limp into gameplay
    let settings =
        PlayerSettings::load("assets/player.toml").context("loading assets/player.toml")?;
    let catalog =
        SkillCatalog::load("assets/skills.toml").context("loading assets/skills.toml")?;

    // World: a flat slab to stand on plus the character motor over it
    let mut world = PhysicsWorld::new();
    world.add_ground_slab(0.0, 0.0, 0.0, 100.0, 100.0);
    let mut motor = CharacterMotor::new(world, settings.probe.clone());

    let mut actor = Actor::new(Vec3::new(0.0, 0.5, 0.0));
    let mut coordinator = ActionCoordinator::new(
        LocomotionState::new(settings.movement.clone()),
        SkillManager::from_catalog(&catalog, engine::input::HOTBAR_SLOTS),
        settings.animation.clone(),
    );

    for slot in coordinator.skills().slots() {
        if let Some(skill) = slot.skill() {
            info!("Hotbar {}: {} ({})", slot.index() + 1, skill.name, skill.id);
        }
    }

    // Startup scene transition, driven by the same fixed ticks as gameplay
    let mut director = SceneDirector::new(settings.scene.min_loading_time);
    let mut scene_source = DemoSceneSource::new(1.5);
    director
        .begin(&mut scene_source, settings.scene.start_scene.clone())
        .context("starting intro scene transition")?;
    director.set_next_spawn(Vec3::new(0.0, 0.5, 0.0), glam::Quat::IDENTITY);

    let mut input = InputManager::new();
    let mut game_loop = GameLoop::new();
    let mut sink = RecordingSink::new();
    let mut effects = RecordingEffects::new();

    let mut app_phase = AppPhase::Loading;
    let mut last_phase = MovePhase::Idle;
    let mut any_key_pressed = false;

    // Create event loop and window (input capture only; nothing is drawn)
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Emberfall")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent {
                    event: WindowEvent::CloseRequested,
                    ..
                } => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                Event::WindowEvent {
                    event: WindowEvent::Focused(false),
                    ..
                } => {
                    // Drop held keys so nothing sticks while unfocused
                    input.reset();
                }
                Event::WindowEvent {
                    event: WindowEvent::KeyboardInput { event, .. },
                    ..
                } => {
                    if event.state == ElementState::Pressed && !event.repeat {
                        any_key_pressed = true;

                        // Handled here, not via bindings, so pause still
                        // works while the game loop is paused
                        if event.physical_key == PhysicalKey::Code(KeyCode::KeyP) {
                            game_loop.toggle_pause();
                        }
                    }
                    input.process_keyboard_event(&event);
                }
                Event::AboutToWait => {
                    let updates = game_loop.begin_frame();
                    for _ in 0..updates {
                        let dt = game_loop.fixed_timestep();

                        // Read meta actions before the snapshot clears
                        // this tick's press events
                        if input.just_pressed(Action::Menu) {
                            info!("Menu requested, shutting down...");
                            elwt.exit();
                            return;
                        }

                        let snapshot = input.tick(CameraBasis::default(), dt);

                        match app_phase {
                            AppPhase::Loading => {
                                scene_source.stream(dt);
                                for event in director.tick(&mut scene_source, any_key_pressed, dt)
                                {
                                    match event {
                                        TransitionEvent::Progress(progress) => {
                                            debug!("loading {:3.0}%", progress * 100.0);
                                        }
                                        TransitionEvent::ReadyToActivate => {
                                            info!("Loading complete - press any key");
                                        }
                                        TransitionEvent::Completed(scene) => {
                                            if let Some((position, orientation)) =
                                                director.take_next_spawn()
                                            {
                                                actor.position = position;
                                                actor.orientation = orientation;
                                            }
                                            info!("Entered scene '{scene}'");
                                            app_phase = AppPhase::Playing;
                                        }
                                    }
                                }
                            }
                            AppPhase::Playing => {
                                let tick = coordinator.tick(
                                    &mut actor,
                                    &snapshot,
                                    &mut motor,
                                    &mut effects,
                                    &mut sink,
                                    None,
                                    dt,
                                );

                                if tick.phase != last_phase {
                                    info!("{:?} -> {:?}", last_phase, tick.phase);
                                    last_phase = tick.phase;
                                }

                                for event in &tick.skill_events {
                                    match event {
                                        SlotEvent::CastStarted { skill_id, .. } => {
                                            info!("Casting {skill_id}...");
                                        }
                                        SlotEvent::SkillUsed { skill_id, .. } => {
                                            info!("{skill_id} fired");
                                        }
                                        SlotEvent::EffectSkipped {
                                            skill_id,
                                            effect_id,
                                            ..
                                        } => {
                                            info!("{skill_id}/{effect_id} skipped (no target)");
                                        }
                                        SlotEvent::CooldownFinished { slot } => {
                                            info!("Slot {} ready", slot + 1);
                                        }
                                        SlotEvent::CooldownProgress { .. } => {}
                                    }
                                }

                                for applied in effects.take_applied() {
                                    info!(
                                        "effect {}/{} at {:.1?}",
                                        applied.skill_id, applied.effect_id, applied.position
                                    );
                                }
                                for trigger in sink.take_triggers() {
                                    debug!("animation trigger: {trigger}");
                                }

                                if game_loop.update_count() % 300 == 0 {
                                    debug!(
                                        "pos {:.2?} phase {:?}",
                                        actor.position,
                                        coordinator.locomotion().phase()
                                    );
                                }
                            }
                        }

                        any_key_pressed = false;
                    }

                    window.request_redraw();
                }
                _ => {}
            }
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
