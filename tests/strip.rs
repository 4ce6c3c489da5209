//! End-to-end strip runs through the public API

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use runner_strip::consts::SIM_DT;
use runner_strip::sim::{StripSnapshot, pattern};
use runner_strip::{
    ContentCatalog, Difficulty, DistanceTracker, Mover, Runner, StageDistance, Strip, StripEvent,
    StripSettings,
};

fn run(settings: &StripSettings, seed: u64, ticks: u32) -> (StripSnapshot, Vec<StripEvent>) {
    let runner = Runner::new(settings.max_speed);
    let stage = StageDistance::new(500.0);
    let mut strip = Strip::new(settings.clone(), ContentCatalog::builtin(), runner, stage, seed).unwrap();
    strip.initialize(Vec2::ZERO).unwrap();

    let mut events = Vec::new();
    for _ in 0..ticks {
        strip.mover_mut().run(SIM_DT);
        strip.advance(SIM_DT);
        assert_eq!(strip.len(), settings.pool_size);
        events.extend(strip.drain_events());
    }
    (strip.snapshot(), events)
}

#[test]
fn pool_sized_pattern_has_gaps_and_no_neighbours() {
    let mut rng = Pcg32::seed_from_u64(42);
    let mut any_gap = false;
    for _ in 0..16 {
        let p = pattern::generate(20, 1, &mut rng);
        assert!(p[0] && p[19]);
        assert!(pattern::is_well_formed(&p));
        any_gap |= p.contains(&false);
    }
    assert!(any_gap);
}

#[test]
fn runner_session_scrolls_and_records_distance() {
    let settings = StripSettings::from_preset(Difficulty::Hard);
    let runner = Runner::new(settings.max_speed);
    let stage = StageDistance::new(500.0);
    let mut strip = Strip::new(settings, ContentCatalog::builtin(), runner, stage, 7).unwrap();

    // Runner is not spawned until the strip places it
    assert!(!strip.mover().is_ready());
    strip.initialize(Vec2::ZERO).unwrap();
    assert!(strip.mover().is_ready());

    for _ in 0..600 {
        strip.mover_mut().run(SIM_DT);
        strip.advance(SIM_DT);
    }
    assert!(strip.distance() > 0.0);
    assert_eq!(strip.tracker().total(), strip.distance());
    // The runner outpaces the strip, so the strip never scrolls past it
    assert!(strip.distance() <= strip.mover().traveled() + strip.speed() * SIM_DT);
}

#[test]
fn same_seed_replays_identically() {
    let settings = StripSettings::default();
    let (snap_a, events_a) = run(&settings, 2024, 3000);
    let (snap_b, events_b) = run(&settings, 2024, 3000);
    assert_eq!(snap_a, snap_b);
    assert_eq!(events_a, events_b);

    let json_a = serde_json::to_string(&snap_a).unwrap();
    let json_b = serde_json::to_string(&snap_b).unwrap();
    assert_eq!(json_a, json_b);
}

#[test]
fn settings_from_json_drive_the_strip() {
    let settings = StripSettings::from_json(
        r#"{
            "pool_size": 8,
            "tile_width": 1.0,
            "tile_scale": [2.0, 0.5],
            "item_spawn_percent": 1.0,
            "invincible_item_chance": 0.0
        }"#,
    )
    .unwrap();
    let (snapshot, events) = run(&settings, 5, 1200);
    assert_eq!(snapshot.tiles.len(), 8);

    for event in &events {
        match event {
            StripEvent::ObstaclePlaced(h) => {
                assert!(h.fitted);
                // Scale is relative to a parent scaled by (2, 0.5)
                let template = &ContentCatalog::builtin().obstacles[h.template];
                let world = template.footprint.unwrap() * h.scale * Vec2::new(2.0, 0.5);
                assert!((world.x - 1.0).abs() < 1e-4);
            }
            StripEvent::ItemPlaced(h) => {
                assert_eq!(h.kind, runner_strip::sim::ItemKind::Common);
            }
            _ => {}
        }
    }
    assert!(events.iter().any(|e| matches!(e, StripEvent::ObstaclePlaced(_))));
}
