/*
 * Application Module
 *
 * This module defines the main application model and logic for the creature
 * viewer. It handles initialization, the per-frame update and wiring the
 * window callbacks to the input and renderer modules.
 *
 * Physics runs on a fixed timestep: frame time is accumulated and the
 * simulation is stepped in whole `physics_step_size` increments, so the flock
 * behaves the same regardless of the render rate.
 */

use nannou::prelude::*;
use nannou_egui::Egui;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::camera::Camera;
use crate::config::{AreaConfig, SimulationConfig};
use crate::debug::DebugInfo;
use crate::input::{
    key_pressed, mouse_exited, mouse_moved, mouse_pressed, mouse_released, mouse_wheel, raw_window_event,
    window_resized,
};
use crate::params::SimulationParams;
use crate::renderer::view;
use crate::simulation::{Simulation, NOMINAL_FPS};
use crate::style::Style;
use crate::ui;
use crate::vector::Vector2D;

// Where the viewer saves its config when it was started without one
const DEFAULT_CONFIG_PATH: &str = "creature_flock.json";
// Upper bound on catch-up steps after a long frame
const MAX_STEPS_PER_FRAME: usize = 5;

// Main model for the application
pub struct Model {
    pub simulation: Simulation,
    pub config: SimulationConfig,
    pub config_path: Option<PathBuf>,
    // UI-edited copies, pushed into the simulation when they change
    pub params: SimulationParams,
    pub style: Style,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub camera: Camera,
    pub mouse_position: Vector2D,
    // Fixed timestep physics variables
    pub physics_accumulator: Duration,
    pub physics_step_size: Duration,
    pub last_update_time: Instant,
}

// Reads the config named on the command line, falling back to defaults sized
// to the window when there is none or it cannot be used
fn load_config(window_width: f32, window_height: f32) -> (SimulationConfig, Option<PathBuf>) {
    let path = std::env::args().nth(1).map(PathBuf::from);

    if let Some(path) = &path {
        match SimulationConfig::load(path) {
            Ok(config) => {
                info!(path = %path.display(), "loaded config");
                return (config, Some(path.clone()));
            }
            Err(err) => warn!(path = %path.display(), %err, "could not use config, falling back to defaults"),
        }
    }

    let config = SimulationConfig {
        area: AreaConfig {
            width: window_width,
            height: window_height,
            ..AreaConfig::default()
        },
        ..SimulationConfig::default()
    };
    (config, path)
}

fn step_size(params: &SimulationParams) -> Duration {
    Duration::from_secs_f32(1.0 / params.physics_fps.max(1.0))
}

// Initialize the model
pub fn model(app: &App) -> Model {
    // 80% of the primary monitor, or a plain 720p window when it is unknown
    let (window_width, window_height) = app
        .primary_monitor()
        .map(|monitor| {
            let size = monitor.size();
            (size.width as f32 * 0.8, size.height as f32 * 0.8)
        })
        .unwrap_or((1280.0, 720.0));

    let window_id = app
        .new_window()
        .title("Creature Flock")
        .size(window_width as u32, window_height as u32)
        .view(view)
        .mouse_moved(mouse_moved)
        .mouse_pressed(mouse_pressed)
        .mouse_released(mouse_released)
        .mouse_wheel(mouse_wheel)
        .mouse_exited(mouse_exited)
        .key_pressed(key_pressed)
        .resized(window_resized)
        .raw_event(raw_window_event)
        .build()
        .expect("failed to create the main window");

    let window = app.window(window_id).expect("main window was just created");
    let egui = Egui::from_window(&window);

    let (config, config_path) = load_config(window_width, window_height);
    let simulation = Simulation::new(&config);

    // Look at the centre of the visible area
    let camera = Camera::looking_at(Vector2D::new(config.area.width / 2.0, config.area.height / 2.0));

    Model {
        params: config.params.clone(),
        style: config.style.clone(),
        physics_step_size: step_size(&config.params),
        simulation,
        config,
        config_path,
        egui,
        debug_info: DebugInfo::default(),
        camera,
        mouse_position: Vector2D::ZERO,
        physics_accumulator: Duration::ZERO,
        last_update_time: Instant::now(),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let actions = ui::update_ui(
        &mut model.egui,
        &mut model.params,
        &mut model.style,
        &model.debug_info,
        &model.camera,
    );
    apply_ui_actions(model, actions);

    let now = Instant::now();
    let frame_time = now.duration_since(model.last_update_time);
    model.last_update_time = now;

    if model.params.pause_simulation {
        // Don't bank time while paused or the flock would jump on resume
        model.physics_accumulator = Duration::ZERO;
        model.debug_info.physics_updates_per_frame = 0;
    } else {
        model.physics_accumulator += frame_time;

        let dt = model.physics_step_size.as_secs_f32() * NOMINAL_FPS;
        let mut steps = 0;
        while model.physics_accumulator >= model.physics_step_size && steps < MAX_STEPS_PER_FRAME {
            model.simulation.update(dt);
            model.physics_accumulator -= model.physics_step_size;
            steps += 1;
        }
        if steps == MAX_STEPS_PER_FRAME {
            model.physics_accumulator = Duration::ZERO;
        }
        model.debug_info.physics_updates_per_frame = steps;
    }

    model.debug_info.collect(&model.simulation);
}

fn apply_ui_actions(model: &mut Model, actions: ui::UiActions) {
    let changes = actions.changes;
    if changes.any {
        model.simulation.set_params(model.params.clone());
        if changes.physics_rate {
            model.physics_step_size = step_size(&model.params);
        }
    }

    if actions.respawn {
        model.simulation.set_species(model.params.species);
    }

    if actions.restyle {
        model.simulation.restyle(model.style.clone());
    }

    if actions.reset_camera {
        let area = &model.config.area;
        model.camera = Camera::looking_at(Vector2D::new(area.width / 2.0, area.height / 2.0));
    }

    if actions.save_config {
        save_config(model);
    }
}

fn save_config(model: &mut Model) {
    model.config.params = model.params.clone();
    model.config.style = model.style.clone();

    let path = model
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    match model.config.save(&path) {
        Ok(()) => {
            info!(path = %path.display(), "saved config");
            model.config_path = Some(path);
        }
        Err(err) => warn!(path = %path.display(), %err, "failed to save config"),
    }
}
