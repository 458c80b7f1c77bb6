/*
 * Creature Module
 *
 * A creature is a spine plus whatever hangs off it. The spine update logic
 * lives in one place; species only differ by their `Attachments`, which
 * decorate the body geometry with fins or legs derived from the spine state.
 *
 * Layers are emitted back to front:
 * - Fish: side fins, tail fin, body, top fin, eyes
 * - Lizard: legs, body, eyes
 * - Snake: body, eyes
 */

use rand::Rng;

use crate::leg::Leg3Joint;
use crate::shapes::{CreatureGeometry, Paint, Shape};
use crate::species::{FinSet, Species};
use crate::spine::{ContourMode, Spine};
use crate::style::{resolve_style, ResolvedStyle, Style};
use crate::vector::Vector2D;

#[derive(Clone, Debug, PartialEq)]
pub enum Attachments {
    None,
    Fins(FinSet),
    Legs(Vec<Leg3Joint>),
}

impl Attachments {
    fn for_species(species: Species, spine: &Spine) -> Self {
        if let Some(fins) = species.fins() {
            return Attachments::Fins(fins);
        }
        let legs = species.legs();
        if legs.is_empty() {
            Attachments::None
        } else {
            Attachments::Legs(legs.into_iter().map(|cfg| Leg3Joint::new(cfg, spine)).collect())
        }
    }

    fn update(&mut self, spine: &Spine) {
        if let Attachments::Legs(legs) = self {
            for leg in legs.iter_mut() {
                leg.update(spine);
            }
        }
    }

    // Layers drawn underneath the body
    fn decorate_below(&self, spine: &Spine, style: &ResolvedStyle, out: &mut CreatureGeometry) {
        match self {
            Attachments::None => {}
            Attachments::Fins(fins) => {
                side_fins(fins, spine, style, out);
                tail_fin(fins, spine, style, out);
            }
            Attachments::Legs(legs) => {
                for leg in legs {
                    leg_layers(leg, spine, style, out);
                }
            }
        }
    }

    // Layers drawn on top of the body, below the eyes
    fn decorate_above(&self, spine: &Spine, style: &ResolvedStyle, out: &mut CreatureGeometry) {
        if let Attachments::Fins(fins) = self {
            top_fin(fins, spine, style, out);
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Creature {
    species: Species,
    spine: Spine,
    attachments: Attachments,
    style: ResolvedStyle,
}

impl Creature {
    pub fn new<R: Rng + ?Sized>(
        species: Species,
        position: Vector2D,
        heading: f32,
        scale: f32,
        style: &Style,
        rng: &mut R,
    ) -> Self {
        let spine = Spine::new(&species.profile(), position, heading, scale);
        let attachments = Attachments::for_species(species, &spine);
        Self {
            species,
            spine,
            attachments,
            style: resolve_style(style, rng),
        }
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn spine(&self) -> &Spine {
        &self.spine
    }

    pub fn attachments(&self) -> &Attachments {
        &self.attachments
    }

    pub fn style(&self) -> &ResolvedStyle {
        &self.style
    }

    pub fn legs(&self) -> &[Leg3Joint] {
        match &self.attachments {
            Attachments::Legs(legs) => legs,
            _ => &[],
        }
    }

    /// Moves the head to `target`, then lets the attachments follow the body.
    pub fn update(&mut self, target: Vector2D) {
        self.spine.update(target);
        self.attachments.update(&self.spine);
    }

    /// Shifts the whole body, legs included, without re-solving anything.
    pub fn translate(&mut self, offset: Vector2D) {
        self.spine.translate(offset);
        if let Attachments::Legs(legs) = &mut self.attachments {
            for leg in legs.iter_mut() {
                leg.translate(offset);
            }
        }
    }

    /// Re-resolves the style; "random" fills draw a fresh colour.
    pub fn apply_style<R: Rng + ?Sized>(&mut self, style: &Style, rng: &mut R) {
        self.style = resolve_style(style, rng);
    }

    pub fn geometry(&self, mode: ContourMode) -> CreatureGeometry {
        let mut out = CreatureGeometry::default();
        let style = &self.style;

        self.attachments.decorate_below(&self.spine, style, &mut out);
        body_layers(&self.spine, mode, style, &mut out);
        self.attachments.decorate_above(&self.spine, style, &mut out);

        for (center, radius) in self.spine.eyes() {
            out.push(
                Shape::Circle { center, radius },
                Paint {
                    fill: Some(style.eyes_color.clone()),
                    outline: None,
                    width: 0.0,
                },
            );
        }
        out
    }
}

fn body_layers(spine: &Spine, mode: ContourMode, style: &ResolvedStyle, out: &mut CreatureGeometry) {
    match mode {
        ContourMode::SingleShape => {
            out.push(
                Shape::Polygon(spine.single_contour()),
                Paint::filled(&style.fill, &style.outline, style.outline_width),
            );
        }
        ContourMode::Quads => {
            // quads are filled seamlessly, the outline is traced once on top
            for polygon in spine.quad_contours() {
                out.push(
                    Shape::Polygon(polygon),
                    Paint {
                        fill: Some(style.fill.clone()),
                        outline: None,
                        width: 0.0,
                    },
                );
            }
            if style.outline_width > 0.0 {
                out.push(
                    Shape::Polygon(spine.single_contour()),
                    Paint {
                        fill: None,
                        outline: Some(style.outline.clone()),
                        width: style.outline_width,
                    },
                );
            }
        }
    }
}

fn fin_paint(style: &ResolvedStyle) -> Paint {
    Paint::filled(&style.fin_fill, &style.outline, style.outline_width)
}

fn side_fins(fins: &FinSet, spine: &Spine, style: &ResolvedStyle, out: &mut CreatureGeometry) {
    let scale = spine.scale();
    let links = spine.links();

    for fin in &fins.side_fins {
        let index = fin.link_index.min(links.len() - 1);
        let facing = links[index.saturating_sub(1)].direction_angle;
        let (left, right) = links[index].side_points(scale);
        let tilt = fin.angle.to_radians();
        let radii = (fin.radii.0 * scale, fin.radii.1 * scale);

        out.push(
            Shape::Ellipse {
                center: left,
                radii,
                rotation: facing + tilt,
            },
            fin_paint(style),
        );
        out.push(
            Shape::Ellipse {
                center: right,
                radii,
                rotation: facing - tilt,
            },
            fin_paint(style),
        );
    }
}

fn tail_fin(fins: &FinSet, spine: &Spine, style: &ResolvedStyle, out: &mut CreatureGeometry) {
    let tail = &fins.tail_fin;
    let scale = spine.scale();
    let curvature = spine.total_curvature();
    let end = spine.tail();

    let back = end.direction_angle + std::f32::consts::PI + (curvature * tail.bend).to_radians();
    let half_spread = (tail.spread + curvature.abs() * tail.separation).to_radians();
    let length = tail.length * scale;
    let (left, right) = end.side_points(scale);

    let points = vec![
        left,
        end.pos.polar_offset(length, back - half_spread),
        end.pos.polar_offset(length * 0.45, back),
        end.pos.polar_offset(length, back + half_spread),
        right,
    ];
    out.push(Shape::Polygon(points), fin_paint(style));
}

fn top_fin(fins: &FinSet, spine: &Spine, style: &ResolvedStyle, out: &mut CreatureGeometry) {
    let fin = &fins.top_fin;
    let links = spine.links();
    let last = links.len() - 1;
    let start = links[fin.start_link.min(last)].pos;
    let end = links[fin.end_link.min(last)].pos;

    let chord = end - start;
    if chord.is_zero() {
        return;
    }
    let bow = spine.total_curvature() * fin.offset * spine.scale();
    let control = start.lerp(end, 0.5) + chord.unit().perpendicular() * bow;

    out.push(Shape::QuadPatch { start, control, end }, fin_paint(style));
}

fn leg_layers(leg: &Leg3Joint, spine: &Spine, style: &ResolvedStyle, out: &mut CreatureGeometry) {
    let points = leg.joints().to_vec();
    let width = leg.width(spine.scale());

    if style.outline_width > 0.0 {
        out.push(
            Shape::Polyline(points.clone()),
            Paint::stroke(&style.outline, width + 2.0 * style.outline_width),
        );
    }
    out.push(Shape::Polyline(points), Paint::stroke(&style.fill, width));
}
