//! Controls Replay
//!
//! Headless host for void_controls. Loads a controller config and a recorded
//! input trace, plays the trace frame by frame against an in-memory object
//! and prints the resulting transform as JSON.
//!
//! Run with: cargo run -p void_controls_replay -- traces/spin.json --config controls.toml
//!
//! Set `RUST_LOG=debug` to see mode transitions, `trace` for per-frame deltas.

mod trace;

use std::path::PathBuf;

use void_controls::ControllerConfig;

use crate::trace::{replay, ReplayError, ReplayResult, Trace};

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> ReplayResult<()> {
    let (trace_path, config_path) = parse_args(std::env::args().skip(1))?;

    let config = match &config_path {
        Some(path) => ControllerConfig::load(path)?,
        None => ControllerConfig::default(),
    };

    let trace = Trace::load(&trace_path)?;
    log::info!(
        "Replaying {} ({} frames, viewport {}x{})",
        trace_path.display(),
        trace.frames.len(),
        trace.viewport.width,
        trace.viewport.height,
    );

    let report = replay(&trace, config);
    log::info!(
        "Ran {} updates, {} events consumed",
        report.frames, report.consumed_events
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn parse_args(mut args: impl Iterator<Item = String>) -> ReplayResult<(PathBuf, Option<PathBuf>)> {
    let mut trace = None;
    let mut config = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => config = Some(PathBuf::from(args.next().ok_or(ReplayError::Usage)?)),
            "--help" | "-h" => return Err(ReplayError::Usage),
            _ if trace.is_none() => trace = Some(PathBuf::from(arg)),
            _ => return Err(ReplayError::Usage),
        }
    }

    Ok((trace.ok_or(ReplayError::Usage)?, config))
}
