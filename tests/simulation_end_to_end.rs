// End-to-end checks that drive the public API the way the viewer does.

use creature_flock::boid::{Boid, Bounds};
use creature_flock::config::SimulationConfig;
use creature_flock::leg::Leg3Joint;
use creature_flock::spine::{BodyProfile, EyeGeometry, Spine};
use creature_flock::{Simulation, Species, Vector2D};

fn seeded(count: usize, species: Species) -> SimulationConfig {
    let mut config = SimulationConfig {
        seed: Some(2024),
        ..SimulationConfig::default()
    };
    config.params.num_creatures = count;
    config.params.species = species;
    config
}

fn run(simulation: &mut Simulation, ticks: usize) {
    for _ in 0..ticks {
        simulation.update(1.0);
    }
}

#[test]
fn three_link_spine_follows_its_head() {
    let profile = BodyProfile {
        radii: vec![10.0, 10.0, 10.0],
        spacing: 10.0,
        max_angle: 30.0,
        head_points: 3,
        tail_points: 3,
        eyes: EyeGeometry {
            link_index: 0,
            angle: 60.0,
            distance: 0.5,
            radius: 2.0,
        },
    };
    let mut spine = Spine::new(&profile, Vector2D::ZERO, 0.0, 1.0);

    spine.update(Vector2D::new(0.0, 0.0));
    spine.update(Vector2D::new(100.0, 0.0));

    assert_eq!(spine.head().pos, Vector2D::new(100.0, 0.0));
    assert_eq!(spine.len(), 3);
    assert!(spine.links().iter().all(|link| link.pos.is_finite()));
}

#[test]
fn planted_foot_stays_planted_under_a_still_body() {
    let profile = Species::Lizard.profile();
    let spine = Spine::new(&profile, Vector2D::new(300.0, 300.0), 0.0, 0.2);

    for config in Species::Lizard.legs() {
        let mut leg = Leg3Joint::new(config, &spine);
        for _ in 0..50 {
            leg.update(&spine);
            assert!(leg.is_sticked());
        }
    }
}

#[test]
fn boids_wrap_at_every_edge() {
    let bounds = Bounds::with_margin(1280.0, 720.0, 100.0);
    let mid = bounds.center();

    let cases = [
        (Vector2D::new(bounds.right() + 1.0, mid.y), Vector2D::new(bounds.left, mid.y)),
        (Vector2D::new(bounds.left - 1.0, mid.y), Vector2D::new(bounds.right(), mid.y)),
        (Vector2D::new(mid.x, bounds.bottom() + 1.0), Vector2D::new(mid.x, bounds.top)),
        (Vector2D::new(mid.x, bounds.top - 1.0), Vector2D::new(mid.x, bounds.bottom())),
    ];

    for (start, expected) in cases {
        let mut boid = Boid::new(start, Vector2D::new(1.0, 0.0));
        boid.edges(&bounds);
        assert_eq!(boid.position, expected);
    }
}

#[test]
fn ripple_lives_for_its_delay() {
    let mut simulation = Simulation::new(&seeded(0, Species::Fish));
    let delay = simulation.ripple_manager().delay();
    assert!(simulation.add_ripple(Vector2D::new(50.0, 50.0)));

    // just before expiry, in 60 Hz ticks
    let before = ((delay * 60.0) as usize).saturating_sub(1);
    run(&mut simulation, before);
    assert!(simulation.time() < delay);
    assert_eq!(simulation.ripple_manager().points(simulation.time()).len(), 1);

    run(&mut simulation, 2);
    assert!(simulation.time() > delay);
    assert!(simulation.ripple_manager().points(simulation.time()).is_empty());
    run(&mut simulation, 1);
    assert!(simulation.ripples().is_empty());
}

#[test]
fn ripple_capacity_is_enforced() {
    let mut simulation = Simulation::new(&seeded(0, Species::Fish));
    let max = simulation.ripple_manager().max_ripples();

    for i in 0..max {
        assert!(simulation.add_ripple(Vector2D::new(i as f32, 0.0)));
    }
    assert!(!simulation.add_ripple(Vector2D::new(99.0, 99.0)));
    assert_eq!(simulation.ripples().len(), max);
}

#[test]
fn population_and_species_changes() {
    let mut simulation = Simulation::new(&seeded(10, Species::Fish));
    assert_eq!(simulation.len(), 10);

    simulation.set_population(3);
    assert_eq!(simulation.len(), 3);
    simulation.set_population(20);
    assert_eq!(simulation.len(), 20);

    simulation.set_species(Species::Lizard);
    assert_eq!(simulation.len(), 20);
    assert!(simulation
        .boids()
        .iter()
        .all(|b| b.creature.as_ref().map(|c| c.species()) == Some(Species::Lizard)));
    assert_eq!(simulation.params().species, Species::Lizard);
}

#[test]
fn every_species_produces_finite_geometry() {
    for species in Species::ALL {
        let mut simulation = Simulation::new(&seeded(8, species));
        simulation.add_ripple(simulation.bounds().center());
        simulation.set_pointer(Vector2D::new(200.0, 200.0));
        run(&mut simulation, 240);

        let geometry = simulation.geometry();
        assert_eq!(geometry.len(), 8);
        assert!(geometry.iter().all(|g| g.is_finite() && !g.layers.is_empty()));
        for boid in simulation.boids() {
            assert!(boid.position.is_finite());
            assert!(boid.velocity.magnitude() <= simulation.params().max_velocity + 1.0e-3);
        }
    }
}

#[test]
fn parallel_and_sequential_flocks_agree() {
    let sequential_config = seeded(40, Species::Snake);
    let mut parallel_config = sequential_config.clone();
    parallel_config.params.enable_parallel = true;

    let mut sequential = Simulation::new(&sequential_config);
    let mut parallel = Simulation::new(&parallel_config);
    run(&mut sequential, 60);
    run(&mut parallel, 60);

    assert_eq!(sequential.boids(), parallel.boids());
}

#[test]
fn config_file_drives_the_simulation() {
    let path = std::env::temp_dir().join(format!("creature_flock_e2e_{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"{ "seed": 7, "params": { "num_creatures": 5, "species": "lizard" }, "style": { "fill": "red" } }"#,
    )
    .unwrap();

    let config = SimulationConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let simulation = Simulation::new(&config);
    assert_eq!(simulation.len(), 5);
    let creature = simulation.boids()[0].creature.as_ref().unwrap();
    assert_eq!(creature.species(), Species::Lizard);
    assert_eq!(creature.style().fill, "#ff0000");
}
