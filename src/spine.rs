/*
 * Spine Module
 *
 * The articulated body shared by every species: an ordered chain of links
 * that follows its head. Each update pins the head to a target, pulls the
 * neck along behind it, then resolves every further link at a fixed spacing
 * while keeping the bend between consecutive links below `max_angle`.
 *
 * The spine also derives the geometry a renderer needs:
 * - Side points of every link (body outline)
 * - Rounded head and tail caps
 * - Two contour strategies (per-segment quads or a single polygon)
 * - Eye positions
 */

use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::geometry::{normalize_angle, wrap_degrees};
use crate::vector::{Vector2D, EPSILON};

// Used when a radius profile has no entries at all
pub const DEFAULT_RADIUS: f32 = 10.0;
pub const MIN_END_POINTS: usize = 2;

/// How the body outline is turned into polygons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContourMode {
    /// One quad per segment plus the two caps. Stays correct when the body
    /// overlaps itself.
    #[default]
    Quads,
    /// One closed polygon around the whole body. Cheaper, but glitches where
    /// the spine crosses itself.
    SingleShape,
}

impl ContourMode {
    pub const ALL: [ContourMode; 2] = [ContourMode::Quads, ContourMode::SingleShape];

    pub fn label(self) -> &'static str {
        match self {
            ContourMode::Quads => "Quads",
            ContourMode::SingleShape => "Single shape",
        }
    }
}

impl fmt::Display for ContourMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ContourMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quads" | "quad" => Ok(ContourMode::Quads),
            "single" | "single_shape" | "singleshape" => Ok(ContourMode::SingleShape),
            other => Err(ConfigError::UnknownContourMode(other.to_string())),
        }
    }
}

/// Where the eyes sit on the body.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EyeGeometry {
    pub link_index: usize,
    /// Offset from the link's facing, degrees, mirrored for the second eye.
    pub angle: f32,
    /// Distance from the link centre as a fraction of the link radius.
    pub distance: f32,
    pub radius: f32,
}

/// Static description of a body: radius taper, spacing and limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyProfile {
    pub radii: Vec<f32>,
    pub spacing: f32,
    /// Maximum bend between consecutive links, degrees.
    pub max_angle: f32,
    pub head_points: usize,
    pub tail_points: usize,
    pub eyes: EyeGeometry,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChainLink {
    pub radius: f32,
    pub pos: Vector2D,
    /// Facing of the link, pointing toward the previous link (the head side).
    pub direction_angle: f32,
}

impl ChainLink {
    pub fn new(radius: f32, pos: Vector2D, direction_angle: f32) -> Self {
        Self {
            radius,
            pos,
            direction_angle,
        }
    }

    /// The two outline points at ±90° from the facing, as `(left, right)`.
    pub fn side_points(&self, scale: f32) -> (Vector2D, Vector2D) {
        let r = self.radius * scale;
        (
            self.pos.polar_offset(r, self.direction_angle + FRAC_PI_2),
            self.pos.polar_offset(r, self.direction_angle - FRAC_PI_2),
        )
    }

    /// Re-places this link `spacing` away from `previous`, keeping it outside
    /// the cone that would bend the chain by more than `max_bend` radians.
    /// `anchor` is the link before `previous`.
    pub fn follow(&mut self, anchor: Vector2D, previous: Vector2D, spacing: f32, max_bend: f32) {
        let anchor_angle = previous.angle_to(anchor);
        let to_self = self.pos - previous;

        let mut diff = if to_self.is_zero() {
            PI
        } else {
            normalize_angle(to_self.angle() - anchor_angle)
        };

        // |diff| == PI is a straight chain, |diff| -> 0 folds back onto the anchor
        let min_diff = (PI - max_bend).max(0.0);
        if diff.abs() < min_diff {
            diff = if diff >= 0.0 { min_diff } else { -min_diff };
        }

        self.pos = previous.polar_offset(spacing, anchor_angle + diff);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Spine {
    links: Vec<ChainLink>,
    spacing: f32,
    max_angle: f32,
    head_points: usize,
    tail_points: usize,
    eyes: EyeGeometry,
    scale: f32,
    total_curvature: f32,
}

impl Spine {
    /// Lays the links out in a straight line behind `origin`, facing `heading`.
    ///
    /// Profiles with fewer than two radii are padded to a uniform two-link
    /// body, end point counts are floored to two and the scale is made
    /// non-negative.
    pub fn new(profile: &BodyProfile, origin: Vector2D, heading: f32, scale: f32) -> Self {
        let mut radii: Vec<f32> = profile.radii.iter().map(|r| r.abs()).collect();
        match radii.len() {
            0 => radii = vec![DEFAULT_RADIUS; 2],
            1 => radii.push(radii[0]),
            _ => {}
        }

        let scale = scale.abs();
        let spacing = profile.spacing.abs();
        let back = heading + PI;

        let links = radii
            .iter()
            .enumerate()
            .map(|(i, &radius)| {
                let pos = origin.polar_offset(i as f32 * spacing * scale, back);
                ChainLink::new(radius, pos, heading)
            })
            .collect::<Vec<_>>();

        let mut eyes = profile.eyes;
        eyes.link_index = eyes.link_index.min(links.len() - 1);

        Self {
            links,
            spacing,
            max_angle: profile.max_angle.clamp(0.0, 180.0),
            head_points: profile.head_points.max(MIN_END_POINTS),
            tail_points: profile.tail_points.max(MIN_END_POINTS),
            eyes,
            scale,
            total_curvature: 0.0,
        }
    }

    pub fn links(&self) -> &[ChainLink] {
        &self.links
    }

    pub fn link(&self, index: usize) -> Option<&ChainLink> {
        self.links.get(index)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn head(&self) -> &ChainLink {
        &self.links[0]
    }

    pub fn tail(&self) -> &ChainLink {
        &self.links[self.links.len() - 1]
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn max_angle(&self) -> f32 {
        self.max_angle
    }

    pub fn head_points(&self) -> usize {
        self.head_points
    }

    pub fn tail_points(&self) -> usize {
        self.tail_points
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale.abs();
    }

    /// Net bend of the body in [-1, 1], refreshed by every `update`.
    pub fn total_curvature(&self) -> f32 {
        self.total_curvature
    }

    /// Moves the head to `target` and drags the rest of the chain after it.
    pub fn update(&mut self, target: Vector2D) {
        let spacing = self.spacing * self.scale;
        let max_bend = self.max_angle.to_radians();

        self.links[0].pos = target;

        // Neck: keep its bearing from the head, fall back to the last facing
        let neck = self.links[1].pos - target;
        let neck_angle = if neck.magnitude() > EPSILON {
            neck.angle()
        } else {
            self.links[1].direction_angle + PI
        };
        self.links[1].pos = target.polar_offset(spacing, neck_angle);

        for i in 2..self.links.len() {
            let anchor = self.links[i - 2].pos;
            let previous = self.links[i - 1].pos;
            self.links[i].follow(anchor, previous, spacing, max_bend);
        }

        self.update_directions();
        self.total_curvature = self.compute_total_curvature();
    }

    pub fn translate(&mut self, offset: Vector2D) {
        for link in &mut self.links {
            link.pos += offset;
        }
    }

    fn update_directions(&mut self) {
        for i in 1..self.links.len() {
            let toward_head = self.links[i - 1].pos - self.links[i].pos;
            if !toward_head.is_zero() {
                self.links[i].direction_angle = toward_head.angle();
            }
        }
        self.links[0].direction_angle = self.links[1].direction_angle;
    }

    fn compute_total_curvature(&self) -> f32 {
        let n = self.links.len();
        if n < 3 || self.max_angle <= 0.0 {
            return 0.0;
        }

        let sum: f32 = (2..n)
            .map(|i| {
                let bend = self.links[i - 1].direction_angle - self.links[i].direction_angle;
                wrap_degrees(bend.to_degrees())
            })
            .sum();

        (sum / (self.max_angle * (n - 2) as f32)).clamp(-1.0, 1.0)
    }

    /// Fans the head or tail point count across half a circle around the end
    /// link. The head fan runs right side -> nose -> left side, the tail fan
    /// left side -> tip -> right side, so both slot into a clockwise outline.
    pub fn end_points(&self, is_head: bool) -> Vec<Vector2D> {
        let (link, count, start) = if is_head {
            let head = self.head();
            (head, self.head_points, head.direction_angle - FRAC_PI_2)
        } else {
            let tail = self.tail();
            (tail, self.tail_points, tail.direction_angle + FRAC_PI_2)
        };

        let radius = link.radius * self.scale;
        let step = PI / (count - 1) as f32;
        (0..count)
            .map(|k| link.pos.polar_offset(radius, start + step * k as f32))
            .collect()
    }

    pub fn contour(&self, mode: ContourMode) -> Vec<Vec<Vector2D>> {
        match mode {
            ContourMode::Quads => self.quad_contours(),
            ContourMode::SingleShape => vec![self.single_contour()],
        }
    }

    /// Head cap, one quad per segment, tail cap.
    pub fn quad_contours(&self) -> Vec<Vec<Vector2D>> {
        let sides: Vec<(Vector2D, Vector2D)> =
            self.links.iter().map(|l| l.side_points(self.scale)).collect();

        let mut polygons = Vec::with_capacity(self.links.len() + 1);
        polygons.push(self.end_points(true));
        for pair in sides.windows(2) {
            let (left_a, right_a) = pair[0];
            let (left_b, right_b) = pair[1];
            polygons.push(vec![left_a, left_b, right_b, right_a]);
        }
        polygons.push(self.end_points(false));
        polygons
    }

    /// A single outline: head cap, left side, tail cap, right side.
    pub fn single_contour(&self) -> Vec<Vector2D> {
        let n = self.links.len();
        let inner = &self.links[1..n - 1];
        let mut points =
            Vec::with_capacity(self.head_points + self.tail_points + 2 * inner.len());

        points.extend(self.end_points(true));
        points.extend(inner.iter().map(|l| l.side_points(self.scale).0));
        points.extend(self.end_points(false));
        points.extend(inner.iter().rev().map(|l| l.side_points(self.scale).1));
        points
    }

    /// Centre and radius of both eyes.
    pub fn eyes(&self) -> [(Vector2D, f32); 2] {
        let link = &self.links[self.eyes.link_index];
        let offset = self.eyes.angle.to_radians();
        let distance = link.radius * self.scale * self.eyes.distance;
        let radius = self.eyes.radius * self.scale;
        [
            (link.pos.polar_offset(distance, link.direction_angle + offset), radius),
            (link.pos.polar_offset(distance, link.direction_angle - offset), radius),
        ]
    }
}
