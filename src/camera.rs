/*
 * Camera Module
 *
 * This module defines the Camera struct that handles zooming and panning
 * over the simulation. It maps between world space (origin top-left, y down,
 * as the simulation sees it) and screen space (origin at the window centre,
 * y up, as nannou draws it).
 */

use crate::vector::Vector2D;

// Zoom change per unit of scroll
const ZOOM_STEP: f32 = 0.1;

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// World point shown at the centre of the window.
    pub position: Vector2D,
    pub zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub is_dragging: bool,
    pub last_cursor_pos: Vector2D,
}

impl Default for Camera {
    fn default() -> Self {
        Self::looking_at(Vector2D::ZERO)
    }
}

impl Camera {
    pub fn looking_at(position: Vector2D) -> Self {
        Self {
            position,
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 5.0,
            is_dragging: false,
            last_cursor_pos: Vector2D::ZERO,
        }
    }

    // Convert a point from world space to screen space
    pub fn world_to_screen(&self, point: Vector2D) -> Vector2D {
        let offset = (point - self.position) * self.zoom;
        Vector2D::new(offset.x, -offset.y)
    }

    // Convert a point from screen space to world space
    pub fn screen_to_world(&self, point: Vector2D) -> Vector2D {
        Vector2D::new(point.x, -point.y) / self.zoom + self.position
    }

    /// Screen-space rotation for a world-space angle; the y flip mirrors it.
    pub fn screen_angle(&self, world_angle: f32) -> f32 {
        -world_angle
    }

    // Zoom by `scroll` steps, keeping the world point under the cursor fixed
    pub fn zoom(&mut self, scroll: f32, cursor: Vector2D) {
        let before = self.screen_to_world(cursor);
        self.zoom = (self.zoom * (1.0 + scroll * ZOOM_STEP)).clamp(self.min_zoom, self.max_zoom);
        let after = self.screen_to_world(cursor);
        self.position += before - after;
    }

    pub fn start_drag(&mut self, cursor: Vector2D) {
        self.last_cursor_pos = cursor;
        self.is_dragging = true;
    }

    // Move the camera so the world follows the cursor
    pub fn drag(&mut self, cursor: Vector2D) {
        if !self.is_dragging {
            return;
        }
        let delta = cursor - self.last_cursor_pos;
        if !delta.is_zero() {
            self.position -= Vector2D::new(delta.x, -delta.y) / self.zoom;
            self.last_cursor_pos = cursor;
        }
    }

    pub fn end_drag(&mut self) {
        self.is_dragging = false;
    }
}
