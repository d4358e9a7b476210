use flowfield_core::config::SimConfig;
use flowfield_core::math::{mix, smoothstep};
use flowfield_core::simulator::Simulator;
use glam::Vec2;

fn small_sim(seed: u64) -> Simulator {
    let config = SimConfig {
        particle_count: 50,
        ..SimConfig::default()
    };
    Simulator::new(200.0, 200.0, config, seed)
}

#[test]
fn velocity_never_exceeds_max_speed() {
    let mut sim = small_sim(1);
    for _ in 0..100 {
        sim.step();
        for i in 0..sim.particles.count {
            let speed = sim.particles.velocity[i].length();
            let cap = sim.particles.max_speed[i];
            assert!(
                speed <= cap + 1e-5,
                "particle {i} speed {speed} over cap {cap}"
            );
        }
    }
}

#[test]
fn out_of_bounds_particle_is_reborn() {
    let mut sim = small_sim(2);
    sim.particles.position[0] = Vec2::new(500.0, -30.0);
    sim.particles.velocity[0] = Vec2::new(2.0, 2.0);
    sim.step();

    let pos = sim.particles.position[0];
    assert!((0.0..200.0).contains(&pos.x), "x not re-sampled in bounds: {pos:?}");
    assert!((0.0..200.0).contains(&pos.y), "y not re-sampled in bounds: {pos:?}");
    assert_eq!(sim.particles.velocity[0], Vec2::ZERO);
    assert_eq!(sim.particles.acceleration[0], Vec2::ZERO);
    assert_eq!(sim.particles.prev_position[0], pos, "trail anchor must snap");
}

#[test]
fn spec_scenario_205_50_on_200x200_grid() {
    let config = SimConfig {
        particle_count: 1,
        ..SimConfig::default()
    };
    let mut sim = Simulator::new(200.0, 200.0, config, 3);
    assert_eq!(sim.field.cols(), 10);
    assert_eq!(sim.field.rows(), 10);

    sim.particles.position[0] = Vec2::new(205.0, 50.0);
    sim.step();

    let pos = sim.particles.position[0];
    assert!((0.0..200.0).contains(&pos.x));
    assert!((0.0..200.0).contains(&pos.y));
    assert_eq!(sim.particles.velocity[0], Vec2::ZERO);
}

#[test]
fn reborn_particle_draws_no_segment() {
    let config = SimConfig {
        particle_count: 3,
        ..SimConfig::default()
    };
    let mut sim = Simulator::new(200.0, 200.0, config, 4);
    sim.particles.position[0] = Vec2::new(100.0, 100.0);
    sim.particles.position[1] = Vec2::new(1000.0, 1000.0);
    sim.particles.position[2] = Vec2::new(50.0, 50.0);
    let frame = sim.step();
    assert_eq!(frame.segments.len(), 2);
}

#[test]
fn growing_population_keeps_existing_state() {
    let mut sim = small_sim(5);
    for _ in 0..10 {
        sim.step();
    }
    let before: Vec<(Vec2, Vec2)> = (0..sim.particles.count)
        .map(|i| (sim.particles.position[i], sim.particles.velocity[i]))
        .collect();

    sim.set_particle_count(80);
    assert_eq!(sim.particles.count, 80);
    for (i, (pos, vel)) in before.iter().enumerate() {
        assert_eq!(sim.particles.position[i], *pos, "particle {i} moved");
        assert_eq!(sim.particles.velocity[i], *vel, "particle {i} velocity changed");
    }
    // New spawns start at rest with trail anchors in place.
    for i in before.len()..80 {
        assert_eq!(sim.particles.velocity[i], Vec2::ZERO);
        assert_eq!(sim.particles.prev_position[i], sim.particles.position[i]);
    }
}

#[test]
fn shrinking_population_truncates_from_the_end() {
    let mut sim = small_sim(6);
    for _ in 0..5 {
        sim.step();
    }
    let before: Vec<Vec2> = sim.particles.position.clone();

    sim.set_particle_count(20);
    assert_eq!(sim.particles.count, 20);
    assert_eq!(sim.particles.position.len(), 20);
    for i in 0..20 {
        assert_eq!(sim.particles.position[i], before[i], "survivor {i} changed");
    }
}

#[test]
fn set_max_speed_applies_to_all_particles() {
    let mut sim = small_sim(7);
    for _ in 0..20 {
        sim.step();
    }
    sim.set_max_speed(0.5);
    sim.step();
    for i in 0..sim.particles.count {
        assert!(sim.particles.velocity[i].length() <= 0.5 + 1e-5);
    }
}

#[test]
fn viewport_resize_rebuilds_grid_and_leaves_particles_alone() {
    let mut sim = small_sim(8);
    for _ in 0..3 {
        sim.step();
    }
    let positions: Vec<Vec2> = sim.particles.position.clone();

    sim.resize(400.0, 300.0);
    assert_eq!(sim.field.cols(), 20);
    assert_eq!(sim.field.rows(), 15);
    assert_eq!(sim.particles.position, positions);
}

#[test]
fn same_seed_replays_identically() {
    let mut a = small_sim(99);
    let mut b = small_sim(99);
    for _ in 0..30 {
        a.step();
        b.step();
    }
    assert_eq!(a.particles.position, b.particles.position);
    assert_eq!(a.particles.velocity, b.particles.velocity);
}

#[test]
fn trail_alpha_eases_with_speed() {
    let config = SimConfig {
        particle_count: 2,
        force_magnitude: 0.0,
        ..SimConfig::default()
    };
    let mut sim = Simulator::with_noise(
        200.0,
        200.0,
        config,
        11,
        Box::new(|_: f32, _: f32, _: f32| 0.5f32),
    );
    sim.particles.position[0] = Vec2::new(100.0, 100.0);
    sim.particles.velocity[0] = Vec2::new(0.75, 0.0);
    sim.particles.position[1] = Vec2::new(60.0, 60.0);
    sim.particles.velocity[1] = Vec2::ZERO;
    let frame = sim.step();

    // Zero field force leaves the set speeds untouched through the step.
    let cap = sim.particles.max_speed[0];
    let expected = mix(0.3, 1.0, smoothstep(0.0, cap, 0.75));
    assert!(
        (expected - 0.409375).abs() < 1e-6,
        "quarter-speed alpha must ease below the linear ramp, got {expected}"
    );
    assert!((frame.segments[0].color[3] - expected).abs() < 1e-6);
    assert!(
        (frame.segments[1].color[3] - 0.3).abs() < 1e-6,
        "resting particle sits at the alpha floor"
    );
}

#[test]
fn frame_carries_fade_and_speed_scaled_alpha() {
    let mut sim = small_sim(10);
    let frame = sim.step();
    assert!(frame.fade[3] > 0.0 && frame.fade[3] < 1.0, "fade must be translucent");
    for seg in &frame.segments {
        assert!(seg.color[3] >= 0.3 - 1e-6 && seg.color[3] <= 1.0);
        assert!(seg.width > 0.0);
        for c in &seg.color[..3] {
            assert!((0.0..=1.0).contains(c), "channel out of range: {c}");
        }
    }
}
