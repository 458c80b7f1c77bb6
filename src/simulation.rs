/*
 * Simulation Module
 *
 * Owns the flock and drives one tick of the world:
 * 1. Advance the clock and expire ripples
 * 2. Wrap every boid at the edges
 * 3. Snapshot the flock and compute flocking accelerations
 *    (sequentially or on the rayon pool, with identical results)
 * 4. Add ripple and pointer forces, then integrate
 *
 * The boid vector order is spawn order and also render order.
 */

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::f32::consts::TAU;
use tracing::{debug, info, warn};

use crate::boid::{Boid, Bounds, Kinematics};
use crate::config::SimulationConfig;
use crate::creature::Creature;
use crate::params::SimulationParams;
use crate::ripples::{Ripple, RipplesManager};
use crate::shapes::CreatureGeometry;
use crate::species::Species;
use crate::style::Style;
use crate::vector::Vector2D;

/// `dt == 1.0` is one frame at this rate; the clock advances `dt / NOMINAL_FPS`
/// seconds per tick.
pub const NOMINAL_FPS: f32 = 60.0;

// Spawn speed as a fraction of max velocity
const MIN_SPAWN_SPEED: f32 = 0.5;

pub struct Simulation {
    boids: Vec<Boid>,
    bounds: Bounds,
    params: SimulationParams,
    style: Style,
    ripples: RipplesManager,
    pointer: Option<Vector2D>,
    clock: f32,
    rng: SmallRng,
}

impl Simulation {
    pub fn new(config: &SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::seed_from_u64(rand::random()),
        };

        let mut simulation = Self {
            boids: Vec::new(),
            bounds: config.area.bounds(),
            params: config.params.clone(),
            style: config.style.clone(),
            ripples: RipplesManager::new(config.max_ripples, config.ripple_delay),
            pointer: None,
            clock: 0.0,
            rng,
        };
        simulation.set_population(config.params.num_creatures);
        info!(
            creatures = simulation.boids.len(),
            species = %simulation.params.species,
            seed = ?config.seed,
            "simulation created"
        );
        simulation
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Seconds of simulation time elapsed.
    pub fn time(&self) -> f32 {
        self.clock
    }

    pub fn pointer(&self) -> Option<Vector2D> {
        self.pointer
    }

    pub fn ripples(&self) -> &[Ripple] {
        self.ripples.ripples()
    }

    pub fn ripple_manager(&self) -> &RipplesManager {
        &self.ripples
    }

    /// Advances the world by `dt` frames.
    pub fn update(&mut self, dt: f32) {
        self.clock += dt / NOMINAL_FPS;
        self.ripples.prune(self.clock);
        let ripple_points = self.ripples.points(self.clock);

        for boid in &mut self.boids {
            boid.edges(&self.bounds);
        }

        let flock: Vec<Kinematics> = self.boids.iter().map(Boid::kinematics).collect();
        let params = &self.params;

        // Every boid reads the same snapshot and writes only its own
        // acceleration, so both branches produce the same result
        if params.enable_parallel {
            self.boids
                .par_iter_mut()
                .enumerate()
                .for_each(|(i, boid)| boid.flock(i, &flock, params));
        } else {
            for (i, boid) in self.boids.iter_mut().enumerate() {
                boid.flock(i, &flock, params);
            }
        }

        let ripple_radius = (params.ripple_radius > 0.0).then_some(params.ripple_radius);
        let pointer_radius = (params.pointer_radius > 0.0).then_some(params.pointer_radius);
        let pointer = self.pointer.filter(|_| params.pointer_attraction);

        for boid in &mut self.boids {
            for point in &ripple_points {
                boid.apply_force(*point, params.ripple_force, ripple_radius);
            }
            if let Some(pointer) = pointer {
                boid.apply_force(pointer, params.pointer_force, pointer_radius);
            }
            boid.update(dt, params);
        }
    }

    /// One geometry record per creature, in render order.
    pub fn geometry(&self) -> Vec<CreatureGeometry> {
        let mode = self.params.contour_mode;
        self.boids
            .iter()
            .filter_map(|boid| boid.creature.as_ref())
            .map(|creature| creature.geometry(mode))
            .collect()
    }

    fn spawn_boid(&mut self) -> Boid {
        let species = self.params.species;
        let b = self.bounds;
        let position = Vector2D::new(
            self.rng.gen_range(b.left..=b.right()),
            self.rng.gen_range(b.top..=b.bottom()),
        );
        let heading = self.rng.gen_range(0.0..TAU);
        let speed = self.rng.gen_range(MIN_SPAWN_SPEED..=1.0) * self.params.max_velocity;
        let scale = self.rng.gen_range(species.scale_range());

        let creature = Creature::new(species, position, heading, scale, &self.style, &mut self.rng);
        Boid::new(position, Vector2D::from_polar(speed, heading)).with_creature(creature)
    }

    /// Spawns or drops creatures until exactly `count` remain. Newest
    /// creatures are dropped first.
    pub fn set_population(&mut self, count: usize) {
        let before = self.boids.len();
        if count < before {
            self.boids.truncate(count);
        } else {
            self.boids.reserve(count - before);
            for _ in before..count {
                let boid = self.spawn_boid();
                self.boids.push(boid);
            }
        }
        self.params.num_creatures = count;
        if count != before {
            info!(from = before, to = count, "population changed");
        }
    }

    /// Replaces the whole population with creatures of `species`.
    pub fn set_species(&mut self, species: Species) {
        let count = self.boids.len();
        self.boids.clear();
        self.params.species = species;
        self.set_population(count);
        info!(%species, creatures = count, "species swapped");
    }

    /// Re-resolves every creature's colours from `style`.
    pub fn restyle(&mut self, style: Style) {
        for boid in &mut self.boids {
            if let Some(creature) = &mut boid.creature {
                creature.apply_style(&style, &mut self.rng);
            }
        }
        debug!(fill = %style.fill, "restyled creatures");
        self.style = style;
    }

    /// Replaces the simulation area. Negative extents are flipped; bounds
    /// that are not finite are ignored.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        if !bounds.is_finite() {
            warn!(?bounds, "ignoring non-finite bounds");
            return;
        }
        let bounds = bounds.normalized();
        debug!(?bounds, "bounds changed");
        self.bounds = bounds;
    }

    /// Adopts edited parameters, respawning when the species or population
    /// changed.
    pub fn set_params(&mut self, params: SimulationParams) {
        let species_changed = params.species != self.params.species;
        let count = params.num_creatures;
        self.params = params;

        if species_changed {
            self.set_species(self.params.species);
        }
        if self.boids.len() != count {
            self.set_population(count);
        }
    }

    pub fn set_pointer(&mut self, pos: Vector2D) {
        self.pointer = Some(pos);
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// Queues a ripple at the last known pointer position.
    pub fn spawn_ripple(&mut self) -> bool {
        match self.pointer {
            Some(pos) => self.add_ripple(pos),
            None => false,
        }
    }

    pub fn add_ripple(&mut self, pos: Vector2D) -> bool {
        self.ripples.add_point(pos, self.clock)
    }
}
