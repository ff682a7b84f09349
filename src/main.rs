//! Durian Dash entry point
//!
//! The browser build is driven from JavaScript through `platform::web`.
//! Natively this runs a headless, scripted session and logs what happens,
//! which is handy for balancing a tuning file without a browser.
//!
//! Usage: `durian-dash [PROFILE|TUNING.json] [TICKS] [SEED]`

#[cfg(not(target_arch = "wasm32"))]
use durian_dash::{ConfigError, GameState, InputIntent, Simulation, Tuning, World};

#[cfg(not(target_arch = "wasm32"))]
const VIEWPORT: (f32, f32) = (800.0, 600.0);
#[cfg(not(target_arch = "wasm32"))]
const BACKGROUND: (f32, f32) = (2048.0, 512.0);

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Durian Dash (native, headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), ConfigError> {
    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(arg) if arg.ends_with(".json") => Tuning::from_json(&std::fs::read_to_string(&arg)?)?,
        Some(name) => Tuning::profile(&name)?,
        None => Tuning::default(),
    };
    let ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3600);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    let world = World::from_background(VIEWPORT.0, VIEWPORT.1, BACKGROUND.0, BACKGROUND.1)?;
    let mut sim = Simulation::new(tuning, world, seed)?;

    let mut state = sim.state();
    let mut runs = 1;
    let mut best = 0;
    for tick in 0..ticks {
        let intent = if state == GameState::GameOver {
            runs += 1;
            InputIntent::restart()
        } else {
            scripted_intent(tick)
        };
        sim.advance(intent);

        let next = sim.state();
        if next != state {
            log::info!("tick {tick}: {state:?} -> {next:?}");
            if next == GameState::Dying {
                best = best.max(sim.time_ticks());
            }
            state = next;
        }
        if tick % 600 == 0 {
            let player = sim.player();
            log::debug!(
                "tick {tick}: player ({:.0}, {:.0}) hp {} hazards {} camera {:.0}",
                player.pos.x,
                player.pos.y,
                player.health,
                sim.hazards().len(),
                sim.world().camera_x
            );
        }
    }

    let best = if state == GameState::Running {
        best.max(sim.time_ticks())
    } else {
        best
    };
    log::info!(
        "{ticks} ticks (seed {}), {runs} run(s), longest survival {best} ticks",
        sim.seed()
    );
    Ok(())
}

/// Run right, turn back every few seconds, and hop now and then
#[cfg(not(target_arch = "wasm32"))]
fn scripted_intent(tick: u64) -> InputIntent {
    let dir = if (tick / 240) % 2 == 0 { 1 } else { -1 };
    let jump = tick % 45 == 0 || tick % 45 == 8;
    InputIntent::new(dir, jump)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
