/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * and flock statistics to be displayed in the UI.
 *
 * Includes metrics for:
 * - FPS and frame time
 * - Physics steps run in the last frame
 * - Creature and ripple counts
 * - Average speed and body curvature
 * - Planted feet (lizards)
 */

use std::time::Duration;

use crate::simulation::Simulation;

// Debug information to display
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub physics_updates_per_frame: usize,
    pub creatures: usize,
    pub ripples: usize,
    pub average_speed: f32,
    pub average_curvature: f32,
    pub planted_feet: usize,
    pub total_feet: usize,
    pub sim_time: f32,
}

impl DebugInfo {
    /// Refreshes the flock statistics from the current simulation state.
    pub fn collect(&mut self, simulation: &Simulation) {
        let boids = simulation.boids();
        self.creatures = boids.len();
        self.ripples = simulation.ripples().len();
        self.sim_time = simulation.time();

        if boids.is_empty() {
            self.average_speed = 0.0;
            self.average_curvature = 0.0;
            self.planted_feet = 0;
            self.total_feet = 0;
            return;
        }

        let n = boids.len() as f32;
        self.average_speed = boids.iter().map(|b| b.velocity.magnitude()).sum::<f32>() / n;

        let creatures = boids.iter().filter_map(|b| b.creature.as_ref());
        self.average_curvature = creatures
            .clone()
            .map(|c| c.spine().total_curvature().abs())
            .sum::<f32>()
            / n;

        let legs = creatures.flat_map(|c| c.legs());
        let (planted, total) = legs.fold((0, 0), |(planted, total), leg| {
            (planted + usize::from(leg.is_sticked()), total + 1)
        });
        self.planted_feet = planted;
        self.total_feet = total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::species::Species;

    #[test]
    fn collects_flock_statistics() {
        let mut config = SimulationConfig {
            seed: Some(4),
            ..SimulationConfig::default()
        };
        config.params.species = Species::Lizard;
        config.params.num_creatures = 3;
        let simulation = Simulation::new(&config);

        let mut info = DebugInfo::default();
        info.collect(&simulation);
        assert_eq!(info.creatures, 3);
        assert_eq!(info.total_feet, 12);
        // freshly spawned feet are planted on their targets
        assert_eq!(info.planted_feet, 12);
        assert!(info.average_speed > 0.0);
    }

    #[test]
    fn empty_flock_zeroes_the_averages() {
        let mut config = SimulationConfig::default();
        config.params.num_creatures = 0;
        let simulation = Simulation::new(&config);

        let mut info = DebugInfo {
            average_speed: 9.0,
            ..DebugInfo::default()
        };
        info.collect(&simulation);
        assert_eq!(info.average_speed, 0.0);
        assert_eq!(info.creatures, 0);
    }
}
