/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * adjustable parameters for the creature simulation. These parameters can be
 * modified through the UI or loaded from a config file. It also provides the
 * snapshot-based change detection the app uses to react to UI edits.
 */

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::error::ConfigError;
use crate::species::Species;
use crate::spine::ContourMode;

// Parameters for the simulation that can be adjusted via UI
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub num_creatures: usize,
    pub species: Species,
    pub contour_mode: ContourMode,
    // Flocking
    pub perception_radius: f32,
    pub align_impact: f32,
    pub cohesion_impact: f32,
    pub separation_impact: f32,
    pub max_velocity: f32,
    pub max_acceleration: f32,
    // Point forces
    pub ripple_force: f32,
    pub ripple_radius: f32,
    pub pointer_attraction: bool,
    pub pointer_force: f32,
    pub pointer_radius: f32,
    // Loop
    pub physics_fps: f32,
    pub enable_parallel: bool,
    pub show_debug: bool,
    pub pause_simulation: bool,

    // Internal state for tracking changes
    #[serde(skip)]
    previous_values: Option<ParamSnapshot>,
}

// A snapshot of parameter values used for change detection
#[derive(Clone, Debug, PartialEq)]
struct ParamSnapshot {
    num_creatures: usize,
    species: Species,
    contour_mode: ContourMode,
    perception_radius: f32,
    align_impact: f32,
    cohesion_impact: f32,
    separation_impact: f32,
    max_velocity: f32,
    max_acceleration: f32,
    ripple_force: f32,
    ripple_radius: f32,
    pointer_attraction: bool,
    pointer_force: f32,
    pointer_radius: f32,
    physics_fps: f32,
    enable_parallel: bool,
    show_debug: bool,
    pause_simulation: bool,
}

/// What changed since the last snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParamChanges {
    pub population: bool,
    pub species: bool,
    pub contour_mode: bool,
    pub physics_rate: bool,
    pub any: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_creatures: 24,
            species: Species::Fish,
            contour_mode: ContourMode::Quads,
            perception_radius: 120.0,
            align_impact: 1.0,
            cohesion_impact: 0.8,
            separation_impact: 1.4,
            max_velocity: 3.0,
            max_acceleration: 0.06,
            ripple_force: 400.0,
            ripple_radius: 300.0,
            pointer_attraction: false,
            pointer_force: -60.0,
            pointer_radius: 400.0,
            physics_fps: 60.0,
            enable_parallel: false,
            show_debug: false,
            pause_simulation: false,
            previous_values: None,
        }
    }
}

impl SimulationParams {
    fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            num_creatures: self.num_creatures,
            species: self.species,
            contour_mode: self.contour_mode,
            perception_radius: self.perception_radius,
            align_impact: self.align_impact,
            cohesion_impact: self.cohesion_impact,
            separation_impact: self.separation_impact,
            max_velocity: self.max_velocity,
            max_acceleration: self.max_acceleration,
            ripple_force: self.ripple_force,
            ripple_radius: self.ripple_radius,
            pointer_attraction: self.pointer_attraction,
            pointer_force: self.pointer_force,
            pointer_radius: self.pointer_radius,
            physics_fps: self.physics_fps,
            enable_parallel: self.enable_parallel,
            show_debug: self.show_debug,
            pause_simulation: self.pause_simulation,
        }
    }

    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(self.snapshot());
    }

    // Compare against the last snapshot; without one nothing has changed
    pub fn detect_changes(&self) -> ParamChanges {
        let prev = match &self.previous_values {
            Some(prev) => prev,
            None => return ParamChanges::default(),
        };

        ParamChanges {
            population: self.num_creatures != prev.num_creatures,
            species: self.species != prev.species,
            contour_mode: self.contour_mode != prev.contour_mode,
            physics_rate: self.physics_fps != prev.physics_fps,
            any: self.snapshot() != *prev,
        }
    }

    /// Rejects values that would make the simulation meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            self.perception_radius,
            self.align_impact,
            self.cohesion_impact,
            self.separation_impact,
            self.max_velocity,
            self.max_acceleration,
            self.ripple_force,
            self.ripple_radius,
            self.pointer_force,
            self.pointer_radius,
            self.physics_fps,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "params",
                reason: "must only contain finite numbers",
            });
        }
        if self.perception_radius < 0.0 {
            return Err(ConfigError::Invalid {
                field: "perception_radius",
                reason: "must not be negative",
            });
        }
        if self.max_velocity <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "max_velocity",
                reason: "must be positive",
            });
        }
        if self.max_acceleration < 0.0 {
            return Err(ConfigError::Invalid {
                field: "max_acceleration",
                reason: "must not be negative",
            });
        }
        if self.physics_fps <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "physics_fps",
                reason: "must be positive",
            });
        }
        Ok(())
    }

    // Get parameter ranges for UI sliders
    pub fn get_num_creatures_range() -> RangeInclusive<usize> {
        0..=300
    }

    pub fn get_perception_range() -> RangeInclusive<f32> {
        0.0..=400.0
    }

    pub fn get_impact_range() -> RangeInclusive<f32> {
        0.0..=3.0
    }

    pub fn get_max_velocity_range() -> RangeInclusive<f32> {
        0.5..=10.0
    }

    pub fn get_max_acceleration_range() -> RangeInclusive<f32> {
        0.0..=0.5
    }

    pub fn get_force_range() -> RangeInclusive<f32> {
        -1000.0..=1000.0
    }

    pub fn get_force_radius_range() -> RangeInclusive<f32> {
        0.0..=1000.0
    }

    pub fn get_physics_fps_range() -> RangeInclusive<f32> {
        15.0..=240.0
    }
}
