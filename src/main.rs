//! Hold the Line entry point
//!
//! Natively this runs headless autopilot rounds and prints the leaderboard,
//! which is handy for checking balance changes. The browser build goes
//! through `hold_the_line::web` instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use hold_the_line::assets::{AssetManifest, NoopLoader};
    use hold_the_line::audio::NullSink;
    use hold_the_line::consts::SIM_DT;
    use hold_the_line::{App, GameConfig};
    use hold_the_line::sim::TickInput;

    /// Demo rounds to play
    const ROUNDS: u32 = 5;
    /// Give up on a round after ten simulated minutes (unlimited time budget)
    const MAX_TICKS: u32 = 60 * 60 * 10;

    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text = match std::fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) => {
                    log::error!("Failed to read config {}: {}", path, e);
                    std::process::exit(1);
                }
            };
            match GameConfig::from_json(&text) {
                Ok(config) => config,
                Err(e) => {
                    log::error!("Invalid config {}: {}", path, e);
                    std::process::exit(1);
                }
            }
        }
        None => GameConfig::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut app = match App::boot(config, seed, &mut NoopLoader, &AssetManifest::standard()) {
        Ok(app) => app,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut sink = NullSink;

    for round in 1..=ROUNDS {
        app.start();
        let mut ticks = 0;
        while !app.phase().is_over() && ticks < MAX_TICKS {
            app.frame(SIM_DT, &input, &mut sink);
            ticks += 1;
        }

        match app.outcome() {
            Some(outcome) => {
                log::info!(
                    "Round {}: {:?} after {}s, score {:?}",
                    round,
                    outcome.phase,
                    outcome.elapsed_secs,
                    outcome.score
                );
                if outcome.rank.is_some() {
                    if let Err(e) = app.submit_name(&format!("Autopilot {round}")) {
                        log::warn!("Round {} score not recorded: {}", round, e);
                    }
                }
            }
            None => log::warn!("Round {} hit the tick limit", round),
        }
    }

    println!("Leaderboard");
    for (i, entry) in app.leaderboard.entries().iter().enumerate() {
        println!("{:>2}. {:<12} {:>3}", i + 1, entry.display_name(), entry.score);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
