/*
 * Shapes Module
 *
 * Render-sink data: plain geometry plus resolved paint. The core fills these
 * in every frame; a renderer only reads them.
 */

use serde::{Deserialize, Serialize};

use crate::geometry::sample_quadratic;
use crate::vector::Vector2D;

// Segments used when a quadratic patch is flattened into a polygon
pub const CURVE_SEGMENTS: usize = 12;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Closed filled polygon.
    Polygon(Vec<Vector2D>),
    /// Open stroked path.
    Polyline(Vec<Vector2D>),
    /// Ellipse with semi-axes `radii`, rotated by `rotation` radians.
    Ellipse {
        center: Vector2D,
        radii: (f32, f32),
        rotation: f32,
    },
    Circle {
        center: Vector2D,
        radius: f32,
    },
    /// Area between a quadratic curve and the straight chord closing it.
    QuadPatch {
        start: Vector2D,
        control: Vector2D,
        end: Vector2D,
    },
}

impl Shape {
    /// Flattens curved shapes into a point list. Ellipses and circles return
    /// `None`; renderers draw those natively.
    pub fn outline_points(&self) -> Option<Vec<Vector2D>> {
        match self {
            Shape::Polygon(points) | Shape::Polyline(points) => Some(points.clone()),
            Shape::QuadPatch {
                start,
                control,
                end,
            } => Some(sample_quadratic(*start, *control, *end, CURVE_SEGMENTS)),
            Shape::Ellipse { .. } | Shape::Circle { .. } => None,
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Shape::Polygon(points) | Shape::Polyline(points) => {
                points.iter().all(|p| p.is_finite())
            }
            Shape::Ellipse {
                center,
                radii,
                rotation,
            } => center.is_finite() && radii.0.is_finite() && radii.1.is_finite() && rotation.is_finite(),
            Shape::Circle { center, radius } => center.is_finite() && radius.is_finite(),
            Shape::QuadPatch {
                start,
                control,
                end,
            } => start.is_finite() && control.is_finite() && end.is_finite(),
        }
    }
}

/// Resolved colours for one shape. For polylines `fill` is the stroke colour
/// and `width` the stroke width.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    pub fill: Option<String>,
    pub outline: Option<String>,
    pub width: f32,
}

impl Paint {
    pub fn filled(fill: &str, outline: &str, width: f32) -> Self {
        Self {
            fill: Some(fill.to_string()),
            outline: (width > 0.0).then(|| outline.to_string()),
            width,
        }
    }

    pub fn stroke(color: &str, width: f32) -> Self {
        Self {
            fill: Some(color.to_string()),
            outline: None,
            width,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Drawable {
    pub shape: Shape,
    pub paint: Paint,
}

/// Everything needed to draw one creature, back to front.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatureGeometry {
    pub layers: Vec<Drawable>,
}

impl CreatureGeometry {
    pub fn push(&mut self, shape: Shape, paint: Paint) {
        self.layers.push(Drawable { shape, paint });
    }

    pub fn is_finite(&self) -> bool {
        self.layers.iter().all(|layer| layer.shape.is_finite())
    }
}
