/*
 * Renderer Module
 *
 * This module handles the rendering of the creature simulation.
 * It draws the visible area, the ripples, every creature's geometry layers
 * and the debug overlay. The simulation hands over plain shapes in world
 * space; everything here is camera mapping and nannou calls.
 */

use nannou::prelude::*;
use tracing::warn;

use crate::app::Model;
use crate::camera::Camera;
use crate::color::parse_hex;
use crate::shapes::{Drawable, Shape};
use crate::ui;
use crate::vector::Vector2D;

// Screen-space size of a ripple ring at the end of its life
const RIPPLE_MAX_RADIUS: f32 = 60.0;
const VELOCITY_ARROW_SCALE: f32 = 10.0;

fn to_point(v: Vector2D) -> Point2 {
    pt2(v.x, v.y)
}

// Hex colour to a nannou colour; anything unreadable draws white
fn to_color(code: &str) -> Srgb<u8> {
    match parse_hex(code) {
        Some((r, g, b)) => rgb8(r, g, b),
        None => rgb8(255, 255, 255),
    }
}

fn screen_points(camera: &Camera, points: &[Vector2D]) -> Vec<Point2> {
    points.iter().map(|&p| to_point(camera.world_to_screen(p))).collect()
}

// Filled outline shapes: polygons and flattened quadratic patches
fn draw_filled(draw: &Draw, camera: &Camera, layer: &Drawable, points: &[Vector2D]) {
    if points.len() < 3 {
        return;
    }
    let points = screen_points(camera, points);

    if let Some(fill) = &layer.paint.fill {
        draw.polygon().color(to_color(fill)).points(points.iter().copied());
    }
    if let Some(outline) = &layer.paint.outline {
        draw.polyline()
            .weight(layer.paint.width * camera.zoom)
            .join_round()
            .color(to_color(outline))
            .points_closed(points);
    }
}

fn draw_layer(draw: &Draw, camera: &Camera, layer: &Drawable) {
    match &layer.shape {
        Shape::Polygon(points) => draw_filled(draw, camera, layer, points),
        Shape::QuadPatch { .. } => {
            if let Some(points) = layer.shape.outline_points() {
                draw_filled(draw, camera, layer, &points);
            }
        }
        Shape::Polyline(points) => {
            if points.len() < 2 {
                return;
            }
            let color = layer.paint.fill.as_deref().map_or(rgb8(255, 255, 255), to_color);
            draw.polyline()
                .weight(layer.paint.width * camera.zoom)
                .join_round()
                .color(color)
                .points(screen_points(camera, points));
        }
        Shape::Ellipse {
            center,
            radii,
            rotation,
        } => {
            let center = to_point(camera.world_to_screen(*center));
            let (w, h) = (2.0 * radii.0 * camera.zoom, 2.0 * radii.1 * camera.zoom);
            let angle = camera.screen_angle(*rotation);
            if let Some(fill) = &layer.paint.fill {
                draw.ellipse().xy(center).w_h(w, h).rotate(angle).color(to_color(fill));
            }
            if let Some(outline) = &layer.paint.outline {
                draw.ellipse()
                    .xy(center)
                    .w_h(w, h)
                    .rotate(angle)
                    .no_fill()
                    .stroke(to_color(outline))
                    .stroke_weight(layer.paint.width * camera.zoom);
            }
        }
        Shape::Circle { center, radius } => {
            let center = to_point(camera.world_to_screen(*center));
            let radius = radius * camera.zoom;
            if let Some(fill) = &layer.paint.fill {
                draw.ellipse().xy(center).radius(radius).color(to_color(fill));
            }
            if let Some(outline) = &layer.paint.outline {
                draw.ellipse()
                    .xy(center)
                    .radius(radius)
                    .no_fill()
                    .stroke(to_color(outline))
                    .stroke_weight(layer.paint.width * camera.zoom);
            }
        }
    }
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();
    let camera = &model.camera;
    let simulation = &model.simulation;

    // Visible area, the region creatures wrap around
    let bounds = simulation.bounds();
    let top_left = camera.world_to_screen(Vector2D::new(bounds.left, bounds.top));
    let bottom_right = camera.world_to_screen(Vector2D::new(bounds.right(), bounds.bottom()));
    let area = Rect::from_corners(to_point(top_left), to_point(bottom_right));
    draw.rect()
        .xy(area.xy())
        .wh(area.wh())
        .color(rgba(0.12, 0.12, 0.12, 1.0));

    // Ripples grow and fade over their lifetime
    let now = simulation.time();
    for ripple in simulation.ripples() {
        let age = ripple.age_fraction(now);
        draw.ellipse()
            .xy(to_point(camera.world_to_screen(ripple.pos)))
            .radius(RIPPLE_MAX_RADIUS * age * camera.zoom)
            .no_fill()
            .stroke(rgba(0.6, 0.8, 1.0, 1.0 - age))
            .stroke_weight(2.0);
    }

    for geometry in simulation.geometry() {
        for layer in &geometry.layers {
            draw_layer(&draw, camera, layer);
        }
    }

    if model.params.show_debug {
        if let Some(first) = simulation.boids().first() {
            let screen_pos = to_point(camera.world_to_screen(first.position));

            // Perception radius
            draw.ellipse()
                .xy(screen_pos)
                .radius(model.params.perception_radius * camera.zoom)
                .no_fill()
                .stroke(GREEN)
                .stroke_weight(1.0);

            // Velocity vector
            let tip = camera.world_to_screen(first.position + first.velocity * VELOCITY_ARROW_SCALE);
            draw.arrow()
                .start(screen_pos)
                .end(to_point(tip))
                .color(YELLOW)
                .stroke_weight(2.0);
        }

        if let Some(pointer) = simulation.pointer() {
            draw.ellipse()
                .xy(to_point(camera.world_to_screen(pointer)))
                .radius(4.0)
                .color(RED);
        }

        ui::draw_debug_info(&draw, &model.debug_info, window_rect, camera.zoom);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        warn!(?err, "failed to draw the scene");
    }

    // Draw the egui UI on top
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        warn!(?err, "failed to draw the controls");
    }
}
