use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use rampart_app::autoplay::Autoplayer;
use rampart_app::game_loop;
use rampart_app::state::RunSummary;
use rampart_core::config::SimConfig;

/// Upper bound on ticks per requested level before a run is abandoned.
const MAX_TICKS_PER_LEVEL: u64 = 60 * 60 * 5;

/// Plays rampart levels with a seeded scripted player and prints a JSON summary
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON simulation config; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Levels to play before stopping
    #[arg(short, long, default_value_t = 3)]
    levels: u32,
    /// Seed for tower placement
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
    /// Towers to try placing each build phase
    #[arg(long, default_value_t = 4)]
    builds_per_level: u32,
    /// Run on a paced game loop thread at this multiple of real time
    #[arg(long)]
    realtime: Option<f64>,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    SimConfig::from_json_str(&text).with_context(|| format!("loading config {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = load_config(args.config.as_ref())?;
    let max_ticks = MAX_TICKS_PER_LEVEL * u64::from(args.levels.max(1));
    let mut player = Autoplayer::new(config.clone(), args.seed, args.levels, args.builds_per_level);
    let mut summary = RunSummary::new(args.seed);

    tracing::info!(levels = args.levels, seed = args.seed, realtime = ?args.realtime, "starting run");
    match args.realtime {
        Some(scale) => game_loop::run_realtime(config, scale, &mut player, &mut summary, max_ticks)?,
        None => game_loop::run_lockstep(config, &mut player, &mut summary, max_ticks)?,
    }
    summary.towers_built = player.towers_built();

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
