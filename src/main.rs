//! Danmaku Lasers headless soak runner
//!
//! Plays the laser test level with a wandering player and reports how the
//! pools behaved.
//!
//! Usage: danmaku-lasers [settings.json] [frames] [seed]

use std::path::Path;

use danmaku_lasers::LaserSettings;
use danmaku_lasers::demo::run_soak;

const DEFAULT_FRAMES: u64 = 60 * 60;
const DEFAULT_SEED: u64 = 0x1a5e_2b0d;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = LaserSettings::load_or_default(args.first().map(Path::new));
    let frames = parse_arg(args.get(1), DEFAULT_FRAMES);
    let seed = parse_arg(args.get(2), DEFAULT_SEED);

    log::info!("Danmaku Lasers soak starting...");
    log::info!(
        "Pools: {} straight, {} bent; seed {}; {} frames",
        settings.max_lasers,
        settings.max_bent_lasers,
        seed,
        frames
    );

    let summary = run_soak(seed, frames, &settings);

    log::info!(
        "Player hit on {} of {} frames (peak {} straight / {} bent, {} spawns dropped)",
        summary.hit_frames,
        summary.frames,
        summary.peak_lasers,
        summary.peak_bent_lasers,
        summary.dropped_spawns
    );
    match serde_json::to_string(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode summary: {}", e),
    }
}

fn parse_arg(arg: Option<&String>, default: u64) -> u64 {
    match arg.map(|s| s.parse::<u64>()) {
        Some(Ok(value)) => value,
        Some(Err(e)) => {
            log::warn!("Ignoring bad numeric argument: {}", e);
            default
        }
        None => default,
    }
}
