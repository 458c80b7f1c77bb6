/*
 * Creature Flock
 *
 * Fish, snakes and lizards swimming as a flock. Each creature is a boid
 * steered by alignment, cohesion and separation, with a procedurally rigged
 * spine (and, for lizards, IK legs) following the boid around.
 *
 * Usage: creature_flock [config.json]
 * Logging is controlled through RUST_LOG, e.g. RUST_LOG=creature_flock=debug.
 */

use tracing::info;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn main() {
    init_tracing();
    info!("Starting creature flock viewer");

    nannou::app(creature_flock::app::model)
        .update(creature_flock::app::update)
        .run();
}
