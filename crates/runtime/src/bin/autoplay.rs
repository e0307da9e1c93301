//! Plays a full game with random legal moves and logs the outcome.
use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;

use lines_runtime::{AutoplayConfig, RuntimeConfig, Session, autoplay};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RuntimeConfig::from_env();
    let autoplay_config = AutoplayConfig::from_env();

    let mut chooser = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut session = Session::builder()
        .config(config)
        .build()
        .context("failed to build session")?;

    let report = autoplay::run(&mut session, autoplay_config, &mut chooser)
        .context("autoplay aborted")?;

    println!(
        "moves: {}, score: {}, game over: {}",
        report.moves, report.score, report.game_over
    );
    Ok(())
}
