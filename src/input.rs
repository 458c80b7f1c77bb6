/*
 * Input Module
 *
 * This module handles user input events for the creature viewer.
 *
 * Features:
 * - Pointer tracking (drives the optional pointer attraction)
 * - Left click spawns a ripple under the cursor
 * - Right drag pans, the wheel zooms
 * - Keys: Space pause, R restyle, D debug overlay, 1/2/3 species
 * - Resizing the window resizes the simulation area
 * - Clicks and keys over the egui panel are left to egui
 */

use nannou::prelude::*;
use nannou::winit::event::{MouseButton, MouseScrollDelta, TouchPhase, WindowEvent};
use tracing::debug;

use crate::app::Model;
use crate::boid::Bounds;
use crate::species::Species;
use crate::vector::Vector2D;

// Pixel scroll deltas are much larger than line deltas
const PIXEL_SCROLL_SCALE: f32 = 0.01;

// Mouse moved event handler
pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    let screen = Vector2D::new(pos.x, pos.y);
    model.camera.drag(screen);
    model.mouse_position = screen;

    let world = model.camera.screen_to_world(screen);
    model.simulation.set_pointer(world);
}

pub fn mouse_exited(_app: &App, model: &mut Model) {
    model.simulation.clear_pointer();
}

// Mouse pressed event handler
pub fn mouse_pressed(_app: &App, model: &mut Model, button: MouseButton) {
    if model.egui.ctx().is_pointer_over_area() {
        return;
    }
    match button {
        MouseButton::Left => {
            if !model.simulation.spawn_ripple() {
                debug!("ripple not spawned");
            }
        }
        MouseButton::Right => model.camera.start_drag(model.mouse_position),
        _ => {}
    }
}

// Mouse released event handler
pub fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Right {
        model.camera.end_drag();
    }
}

// Mouse wheel event handler for zooming
pub fn mouse_wheel(_app: &App, model: &mut Model, delta: MouseScrollDelta, _phase: TouchPhase) {
    if model.egui.ctx().is_pointer_over_area() {
        return;
    }
    let scroll = match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * PIXEL_SCROLL_SCALE,
    };
    model.camera.zoom(scroll, model.mouse_position);
}

pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    if model.egui.ctx().wants_keyboard_input() {
        return;
    }

    let species = match key {
        Key::Key1 => Some(Species::Fish),
        Key::Key2 => Some(Species::Snake),
        Key::Key3 => Some(Species::Lizard),
        _ => None,
    };
    if let Some(species) = species {
        model.params.species = species;
        model.simulation.set_species(species);
        return;
    }

    match key {
        Key::Space => model.params.pause_simulation = !model.params.pause_simulation,
        Key::D => model.params.show_debug = !model.params.show_debug,
        Key::R => model.simulation.restyle(model.style.clone()),
        _ => {}
    }
}

pub fn window_resized(_app: &App, model: &mut Model, size: Vec2) {
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    let area = &mut model.config.area;
    area.width = size.x;
    area.height = size.y;
    model
        .simulation
        .set_bounds(Bounds::with_margin(area.width, area.height, area.margin));
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &WindowEvent) {
    model.egui.handle_raw_event(event);
}
