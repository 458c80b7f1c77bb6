/*
 * Creature Flock - Module Definitions
 *
 * This file defines the module structure for the creature flock application.
 * The simulation core (spines, legs, species, flocking, ripples) has no
 * dependency on the viewer; app, input, renderer and ui wire it to nannou.
 */

// Re-export key components for easier access
pub use boid::{Boid, Bounds};
pub use camera::Camera;
pub use config::SimulationConfig;
pub use creature::Creature;
pub use debug::DebugInfo;
pub use error::ConfigError;
pub use params::SimulationParams;
pub use simulation::Simulation;
pub use species::Species;
pub use vector::Vector2D;

// Simulation core
pub mod boid;
pub mod color;
pub mod config;
pub mod creature;
pub mod error;
pub mod geometry;
pub mod leg;
pub mod params;
pub mod ripples;
pub mod shapes;
pub mod simulation;
pub mod species;
pub mod spine;
pub mod style;
pub mod vector;

// Viewer
pub mod app;
pub mod camera;
pub mod debug;
pub mod input;
pub mod renderer;
pub mod ui;
