//! Headless flight simulation binary.
//!
//! Usage:
//!   cargo run -p flight_movement -- [--config sim.json] [--ticks 360] [--tick-hz 90] [--realtime]
//!
//! Runs the scripted pilot through a flight provider and prints a JSON
//! report of the run. Set `RUST_LOG=debug` for per-second frame traces.

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use flight_movement::sim;
use flight_shared::config::SimConfig;
use tracing::info;

struct Args {
    config: Option<PathBuf>,
    ticks: Option<u32>,
    tick_hz: Option<u32>,
    realtime: bool,
}

fn parse_args() -> Args {
    let mut parsed = Args {
        config: None,
        ticks: None,
        tick_hz: None,
        realtime: false,
    };
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                parsed.config = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--ticks" if i + 1 < args.len() => {
                parsed.ticks = args[i + 1].parse().ok();
                i += 2;
            }
            "--tick-hz" if i + 1 < args.len() => {
                parsed.tick_hz = args[i + 1].parse().ok();
                i += 2;
            }
            "--realtime" => {
                parsed.realtime = true;
                i += 1;
            }
            _ => i += 1,
        }
    }
    parsed
}

fn load_config(args: &Args) -> anyhow::Result<SimConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            SimConfig::from_json_str(&text)
                .with_context(|| format!("parse config {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    if let Some(ticks) = args.ticks {
        cfg.ticks = ticks;
    }
    if let Some(tick_hz) = args.tick_hz {
        cfg.tick_hz = tick_hz;
    }
    Ok(cfg)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = parse_args();
    let cfg = load_config(&args)?;
    info!(
        ticks = cfg.ticks,
        tick_hz = cfg.tick_hz,
        exclusive = cfg.flight.exclusive,
        bearing = ?cfg.flight.bearing,
        pitch = ?cfg.flight.pitch,
        "Starting flight simulation"
    );

    let report = sim::run(&cfg, args.realtime).await.context("run simulation")?;
    info!(
        active_frames = report.active_frames,
        max_speed = report.max_speed,
        "Simulation finished"
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
