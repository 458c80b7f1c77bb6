/*
 * Leg Module
 *
 * A two-segment IK leg (shoulder, knee, foot) hung off one spine link.
 *
 * The foot has two states:
 * - stuck: planted on the ground, it stays put while the body moves
 * - unstuck: it catches up with its target, moving faster than the shoulder
 *
 * The latch keeps feet from sliding every frame; a foot only lets go once the
 * body has dragged its target more than `max_difference` away. The knee is the
 * intersection of the two segment circles, or a straight interpolation when
 * the leg is over- or under-stretched.
 */

use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

use crate::geometry::circle_intersection;
use crate::spine::Spine;
use crate::vector::Vector2D;

// Beyond this multiple of the leg length the foot jumps instead of walking
const OVERSTRETCH_FACTOR: f32 = 1.5;

/// Static description of one leg, in unscaled body units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegConfig {
    pub link_index: usize,
    pub is_shoulder_right: bool,
    /// Chooses which knee solution is used so front and back legs bend the
    /// right way.
    pub is_forward_bend: bool,
    /// Target direction relative to the link's facing, degrees.
    pub anchor_angle: f32,
    pub anchor_distance: f32,
    pub segment_lengths: [f32; 2],
    pub max_difference: f32,
    pub return_speed: f32,
    pub width: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Leg3Joint {
    config: LegConfig,
    /// `[shoulder, knee, foot]`
    joints: [Vector2D; 3],
    sticked: bool,
}

impl Leg3Joint {
    /// Builds the leg with its foot planted on its target.
    pub fn new(config: LegConfig, spine: &Spine) -> Self {
        let mut config = config;
        config.link_index = config.link_index.min(spine.len() - 1);

        let mut leg = Self {
            config,
            joints: [Vector2D::ZERO; 3],
            sticked: true,
        };
        leg.joints[0] = leg.shoulder_position(spine);
        leg.joints[2] = leg.target_position(spine);
        leg.joints[1] = leg.solve_knee(spine.scale());
        leg
    }

    pub fn config(&self) -> &LegConfig {
        &self.config
    }

    pub fn joints(&self) -> &[Vector2D; 3] {
        &self.joints
    }

    pub fn shoulder(&self) -> Vector2D {
        self.joints[0]
    }

    pub fn knee(&self) -> Vector2D {
        self.joints[1]
    }

    pub fn foot(&self) -> Vector2D {
        self.joints[2]
    }

    pub fn is_sticked(&self) -> bool {
        self.sticked
    }

    // +1 for the left side of the body, -1 for the right
    fn side_sign(&self) -> f32 {
        if self.config.is_shoulder_right {
            -1.0
        } else {
            1.0
        }
    }

    /// Shoulder anchor: the side point of the parent link.
    pub fn shoulder_position(&self, spine: &Spine) -> Vector2D {
        let link = &spine.links()[self.config.link_index];
        let (left, right) = link.side_points(spine.scale());
        if self.config.is_shoulder_right {
            right
        } else {
            left
        }
    }

    /// Where the foot wants to be, relative to the parent link's facing and
    /// mirrored for the right side.
    pub fn target_position(&self, spine: &Spine) -> Vector2D {
        let link = &spine.links()[self.config.link_index];
        let angle = link.direction_angle + self.side_sign() * self.config.anchor_angle.to_radians();
        link.pos
            .polar_offset(self.config.anchor_distance * spine.scale(), angle)
    }

    pub fn update(&mut self, spine: &Spine) {
        let scale = spine.scale();
        let target = self.target_position(spine);

        if self.foot().distance(target) > self.config.max_difference * scale {
            self.sticked = false;
        }

        let previous_shoulder = self.joints[0];
        self.joints[0] = self.shoulder_position(spine);

        if !self.sticked {
            self.step_foot(target, previous_shoulder.distance(self.joints[0]), scale);
        }

        self.joints[1] = self.solve_knee(scale);
    }

    pub fn translate(&mut self, offset: Vector2D) {
        for joint in &mut self.joints {
            *joint += offset;
        }
    }

    fn step_foot(&mut self, target: Vector2D, shoulder_travel: f32, scale: f32) {
        let foot = self.joints[2];
        let remaining = foot.distance(target);
        let available = shoulder_travel * self.config.return_speed;

        if remaining <= available {
            self.joints[2] = target;
            self.sticked = true;
            return;
        }

        let reach = self.leg_length(scale);
        let step = if remaining > OVERSTRETCH_FACTOR * reach {
            remaining - reach
        } else {
            available
        };
        self.joints[2] = foot + (target - foot).with_mag(step);
    }

    fn leg_length(&self, scale: f32) -> f32 {
        (self.config.segment_lengths[0] + self.config.segment_lengths[1]) * scale
    }

    fn solve_knee(&self, scale: f32) -> Vector2D {
        let shoulder = self.joints[0];
        let foot = self.joints[2];
        let upper = self.config.segment_lengths[0] * scale;
        let lower = self.config.segment_lengths[1] * scale;

        match circle_intersection(shoulder, foot, upper, lower) {
            Some(points) => {
                let branch = self.config.is_forward_bend ^ self.config.is_shoulder_right;
                points[if branch { 0 } else { 1 }]
            }
            None => {
                let total = upper + lower;
                let ratio = if total > 0.0 { upper / total } else { 0.5 };
                shoulder.lerp(foot, ratio)
            }
        }
    }

    /// Width of the drawn leg at the current scale.
    pub fn width(&self, scale: f32) -> f32 {
        self.config.width * scale
    }

    /// Direction the shoulder faces, useful for drawing a joint cap.
    pub fn shoulder_angle(&self, spine: &Spine) -> f32 {
        let link = &spine.links()[self.config.link_index];
        link.direction_angle + self.side_sign() * FRAC_PI_2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spine::{BodyProfile, EyeGeometry};

    fn spine() -> Spine {
        let profile = BodyProfile {
            radii: vec![10.0; 6],
            spacing: 20.0,
            max_angle: 30.0,
            head_points: 3,
            tail_points: 2,
            eyes: EyeGeometry {
                link_index: 0,
                angle: 60.0,
                distance: 0.5,
                radius: 2.0,
            },
        };
        Spine::new(&profile, Vector2D::ZERO, 0.0, 1.0)
    }

    fn config(is_shoulder_right: bool) -> LegConfig {
        LegConfig {
            link_index: 2,
            is_shoulder_right,
            is_forward_bend: true,
            anchor_angle: 60.0,
            anchor_distance: 40.0,
            segment_lengths: [22.0, 20.0],
            max_difference: 15.0,
            return_speed: 3.0,
            width: 4.0,
        }
    }

    #[test]
    fn planted_leg_stays_sticked_on_a_still_body() {
        let spine = spine();
        let mut leg = Leg3Joint::new(config(false), &spine);
        let foot = leg.foot();
        for _ in 0..20 {
            leg.update(&spine);
            assert!(leg.is_sticked());
            assert_eq!(leg.foot(), foot);
        }
    }

    #[test]
    fn segments_keep_their_lengths_when_reachable() {
        let spine = spine();
        let leg = Leg3Joint::new(config(true), &spine);
        assert!((leg.shoulder().distance(leg.knee()) - 22.0).abs() < 1.0e-3);
        assert!((leg.knee().distance(leg.foot()) - 20.0).abs() < 1.0e-3);
    }

    #[test]
    fn left_and_right_legs_mirror_each_other() {
        let spine = spine();
        let left = Leg3Joint::new(config(false), &spine);
        let right = Leg3Joint::new(config(true), &spine);
        for (a, b) in left.joints().iter().zip(right.joints()) {
            assert!((a.x - b.x).abs() < 1.0e-3);
            assert!((a.y + b.y).abs() < 1.0e-3);
        }
    }

    #[test]
    fn foot_lets_go_then_catches_up_and_relatches() {
        let mut spine = spine();
        let mut cfg = config(false);
        cfg.return_speed = 1.25;
        let mut leg = Leg3Joint::new(cfg, &spine);
        let planted = leg.foot();

        // small moves keep the foot planted
        spine.update(Vector2D::new(5.0, 0.0));
        leg.update(&spine);
        assert!(leg.is_sticked());
        assert_eq!(leg.foot(), planted);

        // dragging the target past max_difference releases it; the foot covers
        // 1.25x the shoulder's travel, one unit short of the target
        spine.update(Vector2D::new(21.0, 0.0));
        leg.update(&spine);
        assert!(!leg.is_sticked());
        assert!((leg.foot().distance(leg.target_position(&spine)) - 1.0).abs() < 1.0e-2);

        spine.update(Vector2D::new(27.0, 0.0));
        leg.update(&spine);
        assert!(leg.is_sticked());
        assert!(leg.foot().distance(leg.target_position(&spine)) < 1.0e-3);
    }

    #[test]
    fn overstretched_foot_jumps_back_within_reach() {
        let mut spine = spine();
        let mut cfg = config(false);
        cfg.return_speed = 0.1;
        let mut leg = Leg3Joint::new(cfg, &spine);

        spine.update(Vector2D::new(400.0, 0.0));
        leg.update(&spine);

        let target = leg.target_position(&spine);
        assert!(!leg.is_sticked());
        // whips to exactly one leg length (22 + 20) from the target
        assert!((leg.foot().distance(target) - 42.0).abs() < 1.0e-2);
        assert!(leg.knee().is_finite());
    }

    #[test]
    fn unreachable_knee_falls_back_to_interpolation() {
        let spine = spine();
        let mut cfg = config(false);
        cfg.segment_lengths = [5.0, 5.0];
        let leg = Leg3Joint::new(cfg, &spine);
        let expected = leg.shoulder().lerp(leg.foot(), 0.5);
        assert!(leg.knee().distance(expected) < 1.0e-4);
    }
}
