/*
 * Boid Module
 *
 * This module defines the Boid struct and its behavior.
 * Each boid steers with three rules, each weighted by its own impact:
 * 1. Alignment: steer towards the average heading of neighbors
 * 2. Cohesion: steer towards the average position of neighbors
 * 3. Separation: steer away from neighbors, weighted by inverse distance
 *
 * Neighbor scans read an immutable `Kinematics` snapshot of the whole flock,
 * so a boid only ever writes its own acceleration while flocking.
 */

use serde::{Deserialize, Serialize};

use crate::creature::Creature;
use crate::params::SimulationParams;
use crate::vector::{Vector2D, EPSILON};

/// Axis-aligned simulation area, `[left, left + width] x [top, top + height]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    /// Area of `width x height` grown by `margin` on every side, so creatures
    /// leave the visible region completely before wrapping.
    pub fn with_margin(width: f32, height: f32, margin: f32) -> Self {
        Self {
            left: -margin,
            top: -margin,
            width: width + 2.0 * margin,
            height: height + 2.0 * margin,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> Vector2D {
        Vector2D::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn is_finite(&self) -> bool {
        self.left.is_finite() && self.top.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Same area with non-negative width and height; a negative extent flips
    /// the corner it is measured from.
    pub fn normalized(self) -> Self {
        let (left, width) = if self.width < 0.0 {
            (self.left + self.width, -self.width)
        } else {
            (self.left, self.width)
        };
        let (top, height) = if self.height < 0.0 {
            (self.top + self.height, -self.height)
        } else {
            (self.top, self.height)
        };
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn contains(&self, point: Vector2D) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::with_margin(1280.0, 720.0, 100.0)
    }
}

/// The part of a boid its neighbors can see.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Kinematics {
    pub position: Vector2D,
    pub velocity: Vector2D,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Boid {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub acceleration: Vector2D,
    pub creature: Option<Creature>,
}

impl Boid {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vector2D::ZERO,
            creature: None,
        }
    }

    pub fn with_creature(mut self, creature: Creature) -> Self {
        self.creature = Some(creature);
        self
    }

    pub fn kinematics(&self) -> Kinematics {
        Kinematics {
            position: self.position,
            velocity: self.velocity,
        }
    }

    // Shared tail of every steering rule: desired = target at full speed,
    // steering = desired - velocity, capped at max acceleration
    fn steer(&self, mut desired: Vector2D, params: &SimulationParams) -> Vector2D {
        desired.set_mag(params.max_velocity);
        desired -= self.velocity;
        desired.limit(params.max_acceleration);
        desired
    }

    // Every other boid inside the perception radius
    fn neighbors<'a>(
        &'a self,
        index: usize,
        flock: &'a [Kinematics],
        radius: f32,
    ) -> impl Iterator<Item = &'a Kinematics> + 'a {
        let radius_sq = radius * radius;
        flock.iter().enumerate().filter_map(move |(i, other)| {
            let close = (other.position - self.position).magnitude_squared() < radius_sq;
            (i != index && close).then_some(other)
        })
    }

    // Calculate alignment force (steer towards average velocity of neighbors)
    pub fn alignment(&self, index: usize, flock: &[Kinematics], params: &SimulationParams) -> Vector2D {
        let mut sum = Vector2D::ZERO;
        let mut count = 0;
        for other in self.neighbors(index, flock, params.perception_radius) {
            sum += other.velocity;
            count += 1;
        }
        if count == 0 {
            return Vector2D::ZERO;
        }
        self.steer(sum / count as f32, params)
    }

    // Calculate cohesion force (steer towards average position of neighbors)
    pub fn cohesion(&self, index: usize, flock: &[Kinematics], params: &SimulationParams) -> Vector2D {
        let mut sum = Vector2D::ZERO;
        let mut count = 0;
        for other in self.neighbors(index, flock, params.perception_radius) {
            sum += other.position;
            count += 1;
        }
        if count == 0 {
            return Vector2D::ZERO;
        }
        self.steer(sum / count as f32 - self.position, params)
    }

    // Calculate separation force (avoid crowding neighbors)
    pub fn separation(&self, index: usize, flock: &[Kinematics], params: &SimulationParams) -> Vector2D {
        let mut sum = Vector2D::ZERO;
        let mut count = 0;
        for other in self.neighbors(index, flock, params.perception_radius) {
            let diff = self.position - other.position;
            let d = diff.magnitude();
            if d > 0.0 {
                // single inverse-distance weighting: |diff / d| == 1
                sum += diff / d;
            }
            count += 1;
        }
        if count == 0 {
            return Vector2D::ZERO;
        }
        self.steer(sum / count as f32, params)
    }

    /// Resets the acceleration to the weighted sum of the three steering
    /// rules. `index` is this boid's slot in `flock`.
    pub fn flock(&mut self, index: usize, flock: &[Kinematics], params: &SimulationParams) {
        let alignment = self.alignment(index, flock, params) * params.align_impact;
        let cohesion = self.cohesion(index, flock, params) * params.cohesion_impact;
        let separation = self.separation(index, flock, params) * params.separation_impact;

        self.acceleration = Vector2D::ZERO;
        self.acceleration += alignment;
        self.acceleration += cohesion;
        self.acceleration += separation;
    }

    /// Pushes the boid away from `point` with magnitude `scale / distance`.
    /// A negative scale pulls instead. Outside `radius` (when given) and at
    /// the point itself nothing happens.
    pub fn apply_force(&mut self, point: Vector2D, scale: f32, radius: Option<f32>) {
        let mut force = self.position - point;
        let d = force.magnitude();
        if radius.map_or(false, |r| d > r) || d <= EPSILON {
            return;
        }
        force.set_mag(scale / d);
        self.acceleration += force;
    }

    /// Integrates one step and drags the creature's head along.
    pub fn update(&mut self, dt: f32, params: &SimulationParams) {
        self.position += self.velocity * dt;
        self.velocity += self.acceleration;
        self.velocity.limit(params.max_velocity);

        if let Some(creature) = &mut self.creature {
            creature.update(self.position);
        }
    }

    /// Teleports the boid to the opposite edge once it leaves `bounds`.
    /// The creature is shifted by the same jump so its body stays intact.
    pub fn edges(&mut self, bounds: &Bounds) {
        let before = self.position;

        if self.position.x > bounds.right() {
            self.position.x = bounds.left;
        } else if self.position.x < bounds.left {
            self.position.x = bounds.right();
        }

        if self.position.y > bounds.bottom() {
            self.position.y = bounds.top;
        } else if self.position.y < bounds.top {
            self.position.y = bounds.bottom();
        }

        let jump = self.position - before;
        if !jump.is_zero() {
            if let Some(creature) = &mut self.creature {
                creature.translate(jump);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SimulationParams {
        let mut params = SimulationParams::default();
        params.perception_radius = 50.0;
        params.max_velocity = 4.0;
        params.max_acceleration = 0.5;
        params.align_impact = 1.0;
        params.cohesion_impact = 1.0;
        params.separation_impact = 1.0;
        params
    }

    fn snapshot(boids: &[Boid]) -> Vec<Kinematics> {
        boids.iter().map(Boid::kinematics).collect()
    }

    #[test]
    fn negative_extents_are_flipped() {
        let bounds = Bounds {
            left: 100.0,
            top: 50.0,
            width: -200.0,
            height: -20.0,
        }
        .normalized();
        assert_eq!(bounds.left, -100.0);
        assert_eq!(bounds.right(), 100.0);
        assert_eq!(bounds.top, 30.0);
        assert_eq!(bounds.bottom(), 50.0);
        assert_eq!(Bounds::default().normalized(), Bounds::default());
    }

    #[test]
    fn lonely_boid_feels_no_flocking_force() {
        let mut boid = Boid::new(Vector2D::ZERO, Vector2D::new(1.0, 0.0));
        let far = Boid::new(Vector2D::new(500.0, 0.0), Vector2D::new(0.0, 1.0));
        let flock = snapshot(&[boid.clone(), far]);
        boid.flock(0, &flock, &params());
        assert_eq!(boid.acceleration, Vector2D::ZERO);
    }

    #[test]
    fn alignment_turns_toward_neighbor_heading() {
        let boid = Boid::new(Vector2D::ZERO, Vector2D::new(4.0, 0.0));
        let other = Boid::new(Vector2D::new(10.0, 0.0), Vector2D::new(0.0, 4.0));
        let flock = snapshot(&[boid.clone(), other]);
        let steer = boid.alignment(0, &flock, &params());
        // desired (0,4) - velocity (4,0), capped at 0.5
        assert!((steer.magnitude() - 0.5).abs() < 1.0e-5);
        assert!(steer.x < 0.0 && steer.y > 0.0);
    }

    #[test]
    fn cohesion_and_separation_pull_opposite_ways() {
        let boid = Boid::new(Vector2D::ZERO, Vector2D::ZERO);
        let other = Boid::new(Vector2D::new(20.0, 0.0), Vector2D::ZERO);
        let flock = snapshot(&[boid.clone(), other]);
        let p = params();
        assert!(boid.cohesion(0, &flock, &p).x > 0.0);
        assert!(boid.separation(0, &flock, &p).x < 0.0);
    }

    #[test]
    fn coincident_neighbors_do_not_produce_nan() {
        let mut boid = Boid::new(Vector2D::new(3.0, 3.0), Vector2D::new(1.0, 1.0));
        let twin = boid.clone();
        let flock = snapshot(&[boid.clone(), twin]);
        boid.flock(0, &flock, &params());
        assert!(boid.acceleration.is_finite());
    }

    #[test]
    fn point_force_falls_off_with_distance_and_respects_radius() {
        let mut near = Boid::new(Vector2D::new(10.0, 0.0), Vector2D::ZERO);
        near.apply_force(Vector2D::ZERO, 100.0, None);
        assert!((near.acceleration - Vector2D::new(10.0, 0.0)).magnitude() < 1.0e-4);

        let mut far = Boid::new(Vector2D::new(100.0, 0.0), Vector2D::ZERO);
        far.apply_force(Vector2D::ZERO, 100.0, Some(50.0));
        assert_eq!(far.acceleration, Vector2D::ZERO);

        let mut pulled = Boid::new(Vector2D::new(0.0, 20.0), Vector2D::ZERO);
        pulled.apply_force(Vector2D::ZERO, -40.0, Some(50.0));
        assert!((pulled.acceleration - Vector2D::new(0.0, -2.0)).magnitude() < 1.0e-4);

        let mut on_top = Boid::new(Vector2D::ZERO, Vector2D::ZERO);
        on_top.apply_force(Vector2D::ZERO, 100.0, None);
        assert_eq!(on_top.acceleration, Vector2D::ZERO);
    }

    #[test]
    fn update_integrates_position_before_velocity() {
        let mut boid = Boid::new(Vector2D::ZERO, Vector2D::new(1.0, 0.0));
        boid.acceleration = Vector2D::new(0.0, 10.0);
        boid.update(2.0, &params());
        assert_eq!(boid.position, Vector2D::new(2.0, 0.0));
        assert!((boid.velocity.magnitude() - 4.0).abs() < 1.0e-5);
    }

    #[test]
    fn edges_teleport_across_every_side() {
        let bounds = Bounds::with_margin(800.0, 600.0, 50.0);
        let cases = [
            (Vector2D::new(bounds.width + bounds.left + 1.0, 10.0), Vector2D::new(bounds.left, 10.0)),
            (Vector2D::new(bounds.left - 1.0, 10.0), Vector2D::new(bounds.right(), 10.0)),
            (Vector2D::new(10.0, bounds.height + bounds.top + 1.0), Vector2D::new(10.0, bounds.top)),
            (Vector2D::new(10.0, bounds.top - 1.0), Vector2D::new(10.0, bounds.bottom())),
        ];
        for (start, expected) in cases {
            let mut boid = Boid::new(start, Vector2D::ZERO);
            boid.edges(&bounds);
            assert_eq!(boid.position, expected);
        }
    }

    #[test]
    fn margin_grows_the_area_on_every_side() {
        let bounds = Bounds::with_margin(800.0, 600.0, 50.0);
        assert_eq!(bounds.left, -50.0);
        assert_eq!(bounds.top, -50.0);
        assert_eq!(bounds.right(), 850.0);
        assert_eq!(bounds.bottom(), 650.0);
        assert!(bounds.contains(Vector2D::new(-49.0, 649.0)));
    }
}
