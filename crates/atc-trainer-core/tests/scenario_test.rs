//! Scenario generation properties.
//!
//! Runs full difficulty sequences over many seeds and checks every generated
//! aircraft against the airspace rules.

use atc_trainer_core::{
    altitude_matches_heading, plan_sequence, too_close, AircraftCatalog, AircraftFactory,
    AircraftOverrides, Difficulty, DisplayScale, GenerationRules, RadarBounds, ScenarioError,
    ScenarioGenerator, ScenarioStep, Scene, StepKind,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const SEEDS: u64 = 40;

fn bounds() -> RadarBounds {
    RadarBounds::new(800.0, 50.0).expect("valid bounds")
}

#[test]
fn test_every_generated_aircraft_is_consistent() {
    let generator = ScenarioGenerator::default();
    let rules = generator.factory().rules().clone();
    let bounds = bounds();

    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        for difficulty in Difficulty::ALL {
            let sequence = plan_sequence(&mut rng, difficulty);
            let report = generator
                .run_sequence(&mut rng, &sequence, &bounds)
                .expect("default catalog never fails");

            for aircraft in &report.scene.aircraft {
                assert!(
                    altitude_matches_heading(aircraft.altitude, aircraft.heading),
                    "{} at {} heading {}",
                    aircraft.callsign,
                    aircraft.altitude,
                    aircraft.heading
                );
                assert!(aircraft.heading > 0.0 && aircraft.heading <= 360.0);
                assert!(aircraft.speed >= rules.min_speed);
                assert!(aircraft.speed <= aircraft.model.max_speed);
                assert!(aircraft.altitude >= rules.min_altitude);
                assert!(aircraft.altitude <= aircraft.model.max_alt);
                assert!(bounds.contains(&aircraft.position));
            }
        }
    }
}

#[test]
fn test_conflict_pairs_converge_within_ring() {
    let generator = ScenarioGenerator::default();
    let scale = *generator.scale();
    let ring_px = scale.nm_to_px(generator.factory().rules().conflict_ring_nm);

    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let placement = generator.place_conflict_pair(&mut rng, 4, &bounds(), &Scene::new());
        assert!(!placement.exhausted, "seed {seed} exhausted");

        for (pair, geometry) in placement.aircraft.chunks(2).zip(&placement.conflicts) {
            let (a, b) = (&pair[0], &pair[1]);
            assert_eq!(a.altitude, b.altitude);
            assert_eq!(b.speed, geometry.speed_b_effective);

            let end_a = a.position_after(geometry.time_min, &scale);
            let end_b = b.position_after(geometry.time_min, &scale);
            assert!(end_a.distance_to(&end_b) <= ring_px);
            assert!(end_a.distance_to(&geometry.conflict_point) <= 1.0);
        }
    }
}

#[test]
fn test_random_traffic_never_too_close() {
    let generator = ScenarioGenerator::default();
    let min_nm = generator.factory().rules().min_separation_nm;

    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let sequence = vec![ScenarioStep::random(8)];
        let report = generator
            .run_sequence(&mut rng, &sequence, &bounds())
            .expect("random step");

        assert!(report.scene.len() <= 8);
        let aircraft = &report.scene.aircraft;
        for (i, a) in aircraft.iter().enumerate() {
            for b in &aircraft[i + 1..] {
                assert!(!too_close(a, b, min_nm, generator.scale()));
                assert_eq!(
                    too_close(a, b, min_nm, generator.scale()),
                    too_close(b, a, min_nm, generator.scale())
                );
            }
        }
    }
}

#[test]
fn test_seed_reproduces_scene() {
    let generator = ScenarioGenerator::default();
    let sequence = vec![ScenarioStep::conflict(2), ScenarioStep::random(4)];

    let first = generator
        .run_sequence(&mut StdRng::seed_from_u64(2024), &sequence, &bounds())
        .unwrap();
    let second = generator
        .run_sequence(&mut StdRng::seed_from_u64(2024), &sequence, &bounds())
        .unwrap();

    let summary = |report: &atc_trainer_core::SceneReport| {
        report
            .scene
            .aircraft
            .iter()
            .map(|a| (a.id, a.callsign.clone(), a.altitude, a.speed))
            .collect::<Vec<_>>()
    };
    assert_eq!(summary(&first), summary(&second));
}

#[test]
fn test_factory_rejects_contradictory_overrides() {
    let factory = AircraftFactory::default();
    let mut rng = StdRng::seed_from_u64(0);
    let result = factory.create(
        &mut rng,
        &bounds(),
        &AircraftOverrides::default().with_heading(90.0).with_altitude(30),
    );
    assert!(matches!(
        result,
        Err(ScenarioError::IncompatibleKinematics { altitude: 30, .. })
    ));
}

#[test]
fn test_scale_round_trip_through_public_api() {
    let scale = DisplayScale::new(0.25).expect("valid scale");
    let px = 123.456;
    assert!((scale.nm_to_px(scale.px_to_nm(px)) - px).abs() < 1e-9);
}

#[test]
fn test_outcomes_follow_sequence_order() {
    let generator = ScenarioGenerator::default();
    let mut rng = StdRng::seed_from_u64(77);
    let sequence = vec![
        ScenarioStep::random(2),
        ScenarioStep::conflict(2),
        ScenarioStep::random(1),
    ];
    let report = generator.run_sequence(&mut rng, &sequence, &bounds()).unwrap();

    let kinds: Vec<StepKind> = report.outcomes.iter().map(|o| o.step.kind).collect();
    assert_eq!(kinds, vec![StepKind::Random, StepKind::Conflict, StepKind::Random]);
    assert_eq!(report.conflicts.len(), 1);
}

#[test]
fn test_only_intended_conflicts_in_scene() {
    let generator = ScenarioGenerator::default();
    let min_nm = generator.factory().rules().min_separation_nm;
    let sequence = vec![ScenarioStep::conflict(6), ScenarioStep::random(4)];

    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let report = generator
            .run_sequence(&mut rng, &sequence, &bounds())
            .expect("default catalog never fails");

        let pairs = report.conflict_pairs();
        let partner = |a: &atc_trainer_core::Aircraft, b: &atc_trainer_core::Aircraft| {
            pairs
                .iter()
                .any(|(x, y, _)| (x.id == a.id && y.id == b.id) || (x.id == b.id && y.id == a.id))
        };
        let aircraft = &report.scene.aircraft;
        for (i, a) in aircraft.iter().enumerate() {
            for b in &aircraft[i + 1..] {
                if !partner(a, b) {
                    assert!(!too_close(a, b, min_nm, generator.scale()), "seed {seed}");
                }
            }
        }
    }
}

#[test]
fn test_conflict_speed_band_below_minimum_is_rejected() {
    let mut rules = GenerationRules::default();
    rules.conflict_min_speed = 10;
    rules.conflict_max_speed = 20;
    let result = AircraftFactory::new(AircraftCatalog::default(), rules);
    assert!(matches!(result, Err(ScenarioError::InvalidRules(_))));
}

#[test]
fn test_zero_scale_is_rejected_up_front() {
    assert_eq!(
        DisplayScale::new(0.0).unwrap_err(),
        ScenarioError::InvalidScale { nm_per_px: 0.0 }
    );
}
