use point_gravity::{CollisionPolicy, Simulation, SimulationConfig, StepParams, Vector2D};
use proptest::prelude::*;
use std::f64::consts::TAU;

fn params() -> StepParams {
    StepParams {
        dt: 10.0,
        gravitational_constant: 6.67,
        collision_distance: 7.0,
        collision_policy: CollisionPolicy::AbsorbHigherId,
    }
}

fn seeded(point_count: usize, seed: u64) -> SimulationConfig {
    SimulationConfig {
        point_count,
        bounds_side: 600.0,
        seed: Some(seed),
        ..Default::default()
    }
}

proptest! {
    #[test]
    fn polar_round_trip(m in 1e-6f64..1e6, theta in 0.0f64..TAU) {
        let v = Vector2D::from_polar(m, theta);
        prop_assert!((v.magnitude() - m).abs() <= 1e-9 * m);

        let back = v.direction().rem_euclid(TAU);
        let diff = (back - theta).abs();
        prop_assert!(diff.min(TAU - diff) < 1e-9);
    }

    #[test]
    fn distance_is_symmetric(
        ax in -1e6f64..1e6, ay in -1e6f64..1e6,
        bx in -1e6f64..1e6, by in -1e6f64..1e6,
    ) {
        let a = Vector2D::new(ax, ay);
        let b = Vector2D::new(bx, by);
        prop_assert_eq!(a.distance_to(b), b.distance_to(a));
    }
}

#[test]
fn test_two_body_attraction() {
    let r = 100.0;
    let mut sim = Simulation::with_points(
        [(Vector2D::new(100.0, 200.0), 1.0), (Vector2D::new(100.0 + r, 200.0), 1.0)],
        params(),
    )
    .unwrap();
    let before = sim.points().to_vec();

    sim.step();

    let after = sim.points();
    let expected = 0.5 * 10.0 * 10.0 * 6.67 / (r * r);
    let d0 = after[0].position - before[0].position;
    let d1 = after[1].position - before[1].position;

    assert!((d0.magnitude() - expected).abs() < 1e-12);
    assert!((d1.magnitude() - expected).abs() < 1e-12);
    // Along the joining line, toward each other
    assert!(d0.x() > 0.0 && d0.y().abs() < 1e-12);
    assert!(d1.x() < 0.0 && d1.y().abs() < 1e-12);

    let gap = after[0].position.distance_to(after[1].position);
    assert!(gap < r);
    assert!((gap - (r - 2.0 * expected)).abs() < 1e-9);
}

#[test]
fn test_collision_absorbs_higher_id() {
    let mut sim = Simulation::with_points(
        [(Vector2D::new(10.0, 10.0), 1.0), (Vector2D::new(14.0, 13.0), 1.0)],
        params(),
    )
    .unwrap();

    sim.step();

    let points = sim.points();
    assert_eq!(points[0].mass, 1.0);
    assert_eq!(points[1].mass, 0.0);
    assert_eq!(sim.live_count(), 1);
    // Colliding points exchange no force
    assert_eq!(points[0].position, Vector2D::new(10.0, 10.0));
    assert_eq!(points[1].position, Vector2D::new(14.0, 13.0));
}

#[test]
fn test_collision_outcome_does_not_depend_on_placement_order() {
    // Same geometry, ids swapped: the lower id always survives
    let mut sim = Simulation::with_points(
        [(Vector2D::new(14.0, 13.0), 1.0), (Vector2D::new(10.0, 10.0), 1.0)],
        params(),
    )
    .unwrap();
    sim.step();
    assert_eq!(sim.points()[0].mass, 1.0);
    assert_eq!(sim.points()[1].mass, 0.0);
}

#[test]
fn test_collision_chain_keeps_lowest_id() {
    // 0-1 and 1-2 collide, 0-2 do not
    let mut sim = Simulation::with_points(
        [
            (Vector2D::new(0.0, 0.0), 1.0),
            (Vector2D::new(6.0, 0.0), 1.0),
            (Vector2D::new(12.0, 0.0), 1.0),
        ],
        params(),
    )
    .unwrap();
    sim.step();

    let masses: Vec<f64> = sim.points().iter().map(|p| p.mass).collect();
    assert_eq!(masses, vec![1.0, 0.0, 0.0]);
}

#[test]
fn test_mutual_destruction_zeroes_both() {
    let mut sim = Simulation::with_points(
        [(Vector2D::new(0.0, 0.0), 1.0), (Vector2D::new(3.0, 0.0), 1.0)],
        StepParams {
            collision_policy: CollisionPolicy::MutualDestruction,
            ..params()
        },
    )
    .unwrap();
    sim.step();
    assert_eq!(sim.live_count(), 0);
}

#[test]
fn test_mass_decreases_by_absorbed_mass() {
    let mut sim = Simulation::with_points(
        [
            (Vector2D::new(0.0, 0.0), 2.0),
            (Vector2D::new(1.0, 1.0), 3.0),
            (Vector2D::new(300.0, 300.0), 1.0),
        ],
        params(),
    )
    .unwrap();
    let before = sim.total_mass();

    sim.step();

    assert_eq!(sim.points()[1].mass, 0.0);
    assert!(sim.total_mass() < before);
    assert_eq!(before - sim.total_mass(), 3.0);
}

#[test]
fn test_inert_points_stay_frozen() {
    let mut sim = Simulation::initialize(seeded(400, 11)).unwrap();
    let mut frozen: Vec<Option<point_gravity::PointMass>> = vec![None; 400];

    for _ in 0..20 {
        sim.step();
        for point in sim.points() {
            match frozen[point.id] {
                Some(seen) => assert_eq!(*point, seen),
                None if point.is_inert() => frozen[point.id] = Some(*point),
                None => {}
            }
        }
    }

    // 400 points in 600x600 always produce some collisions
    assert!(frozen.iter().any(Option::is_some));
}

#[test]
fn test_ids_are_stable_slots() {
    let mut sim = Simulation::initialize(seeded(200, 4)).unwrap();
    for _ in 0..5 {
        sim.step();
    }
    let snapshot = sim.snapshot();
    assert_eq!(snapshot.len(), 200);
    assert!(snapshot.iter().enumerate().all(|(i, p)| p.id == i));
}

#[test]
fn test_single_point_never_moves() {
    let origin = Vector2D::new(123.0, 456.0);
    let mut sim = Simulation::with_points([(origin, 1.0)], params()).unwrap();
    for _ in 0..50 {
        sim.step();
    }
    assert_eq!(sim.points()[0].position, origin);
    assert_eq!(sim.points()[0].mass, 1.0);
}

#[test]
fn test_empty_simulation_steps() {
    let mut sim = Simulation::initialize(seeded(0, 1)).unwrap();
    sim.step();
    assert!(sim.snapshot().is_empty());
    assert_eq!(sim.frame(), 1);
}

#[test]
fn test_invalid_bounds_rejected() {
    let config = SimulationConfig {
        bounds_side: 0.0,
        ..seeded(10, 1)
    };
    assert!(matches!(
        Simulation::initialize(config),
        Err(point_gravity::Error::InvalidConfiguration(_))
    ));
}

#[test]
fn test_seeded_runs_are_identical() {
    let run = || {
        let mut sim = Simulation::initialize(seeded(300, 77)).unwrap();
        for _ in 0..10 {
            sim.step();
        }
        sim.snapshot()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_parallel_matches_serial() {
    let mut serial = Simulation::initialize(seeded(500, 21)).unwrap();
    let mut parallel = serial.clone();
    parallel.set_parallel(true);

    for _ in 0..5 {
        serial.step();
        parallel.step();
        assert_eq!(serial.snapshot(), parallel.snapshot());
    }
}

#[test]
fn test_initial_snapshot_before_any_step() {
    let sim = Simulation::initialize(seeded(25, 8)).unwrap();
    let snapshot = sim.snapshot();
    assert_eq!(snapshot.len(), 25);
    for p in &snapshot {
        assert_eq!(p.mass, 1.0);
        assert!((0.0..600.0).contains(&p.x) && (0.0..600.0).contains(&p.y));
    }
}

#[test]
fn test_step_with_overrides_constants() {
    let mut sim = Simulation::with_points(
        [(Vector2D::new(0.0, 0.0), 1.0), (Vector2D::new(20.0, 0.0), 1.0)],
        params(),
    )
    .unwrap();

    // Collision distance wide enough to swallow the pair
    sim.step_with(&StepParams {
        collision_distance: 25.0,
        ..params()
    });
    assert_eq!(sim.live_count(), 1);
}
