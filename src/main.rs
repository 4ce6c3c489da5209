//! Runner Strip headless entry point
//!
//! Runs a seeded strip for a fixed number of ticks and logs what it built.
//!
//! Usage: `runner-strip [seed] [ticks] [easy|normal|hard|settings.json]`

use glam::Vec2;

use runner_strip::consts::SIM_DT;
use runner_strip::session::{Runner, StageDistance};
use runner_strip::sim::ItemKind;
use runner_strip::{ContentCatalog, Difficulty, Strip, StripEvent, StripSettings};

/// Stage length for headless runs
const STAGE_LENGTH: f32 = 2_000.0;

#[derive(Debug, Default)]
struct Tally {
    recycled: u32,
    gaps: u32,
    obstacles: u32,
    common_items: u32,
    rare_items: u32,
}

fn settings_from_arg(arg: Option<&str>) -> Result<StripSettings, runner_strip::StripError> {
    match arg {
        None => Ok(StripSettings::default()),
        Some(arg) => match Difficulty::from_str(arg) {
            Some(preset) => Ok(StripSettings::from_preset(preset)),
            None => StripSettings::load(arg),
        },
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = args.first().and_then(|s| s.parse().ok()).unwrap_or(42u64);
    let ticks = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3_600u32);

    let settings = match settings_from_arg(args.get(2).map(String::as_str)) {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    };
    log::info!(
        "Runner Strip (headless) starting: seed {}, {} ticks, {} difficulty",
        seed,
        ticks,
        settings.difficulty.as_str()
    );

    let runner = Runner::new(settings.max_speed);
    let stage = StageDistance::new(STAGE_LENGTH);
    let mut strip = match Strip::new(settings, ContentCatalog::builtin(), runner, stage, seed) {
        Ok(strip) => strip,
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    };
    if let Err(err) = strip.initialize(Vec2::ZERO) {
        log::error!("{}", err);
        std::process::exit(1);
    }

    let mut tally = Tally::default();
    for _ in 0..ticks {
        strip.mover_mut().run(SIM_DT);
        strip.advance(SIM_DT);

        for event in strip.drain_events() {
            match event {
                StripEvent::TileRecycled { active, .. } => {
                    tally.recycled += 1;
                    if !active {
                        tally.gaps += 1;
                    }
                }
                StripEvent::ObstaclePlaced(_) => tally.obstacles += 1,
                StripEvent::ItemPlaced(item) => match item.kind {
                    ItemKind::Common => tally.common_items += 1,
                    ItemKind::Rare => tally.rare_items += 1,
                },
                StripEvent::ObstacleRemoved { .. } | StripEvent::ItemRemoved { .. } => {}
            }
        }
    }

    let row: String = strip
        .tiles()
        .map(|t| match (t.active, &t.obstacle, &t.item) {
            (false, _, _) => '_',
            (true, Some(_), _) => '^',
            (true, None, Some(item)) if item.kind == ItemKind::Rare => '*',
            (true, None, Some(_)) => 'o',
            (true, None, None) => '=',
        })
        .collect();

    println!("distance  {:.1} / {:.1}", strip.distance(), STAGE_LENGTH);
    println!("speed     {:.2}", strip.speed());
    println!(
        "recycled  {} tiles ({} gaps, {} obstacles, {} items, {} rare)",
        tally.recycled,
        tally.gaps,
        tally.obstacles,
        tally.common_items + tally.rare_items,
        tally.rare_items
    );
    println!("strip     {}", row);
}
