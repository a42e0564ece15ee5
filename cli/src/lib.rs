//! Argument handling and run loop for the `hotspot-track` binary.
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::dbg_macro, clippy::large_enum_variant)]

use std::path::PathBuf;

use clap::Parser;
use track_engine::{
    snapshots, EngineError, GpsTextSource, MemorySource, RunSummary, SamplingStrategy,
    SimulationConfig, Simulation,
};

#[derive(Parser, Debug)]
#[command(name = "hotspot-track")]
#[command(about = "Trace a mantle-fixed hotspot across a drifting, deforming plate")]
pub struct Args {
    /// TOML configuration file (defaults are used when omitted)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// GPS velocity table (lon lat ve vn [se sn ren], mm/yr)
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Override the number of steps
    #[arg(long)]
    pub steps: Option<u32>,

    /// Override the signed step size in years (negative rewinds)
    #[arg(long, allow_hyphen_values = true)]
    pub dt_years: Option<f64>,

    /// Override the sampling strategy (nearest_neighbor | linear_interpolation)
    #[arg(long)]
    pub strategy: Option<String>,

    /// Rigid-plate motion only
    #[arg(long)]
    pub no_crustal: bool,

    /// Scale crustal rates by the historical curve before present
    #[arg(long)]
    pub historical_scaling: bool,

    /// Write the track as CSV
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Add slab leading-edge and occlusion columns to the CSV
    #[arg(long)]
    pub slab: bool,
}

/// Resolve the configuration: file (or defaults), then command-line overrides, then validation.
pub fn build_config(args: &Args) -> Result<SimulationConfig, EngineError> {
    let mut cfg = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(steps) = args.steps {
        cfg.run.steps = steps;
    }
    if let Some(dt) = args.dt_years {
        cfg.run.dt_years = dt;
    }
    if let Some(name) = &args.strategy {
        cfg.sampling.strategy = name.parse::<SamplingStrategy>()?;
    }
    if args.no_crustal {
        cfg.apply_crustal_velocity = false;
    }
    if args.historical_scaling {
        cfg.apply_historical_scaling = true;
    }
    if cfg.apply_crustal_velocity && args.observations.is_none() {
        return Err(EngineError::Config(
            "crustal velocity is enabled but no --observations table was given".into(),
        ));
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Build the simulation, run it, and write the CSV if requested.
pub fn run(args: &Args) -> Result<RunSummary, EngineError> {
    let cfg = build_config(args)?;
    tracing::info!(
        strategy = %cfg.sampling.strategy,
        crustal = cfg.apply_crustal_velocity,
        scaling = cfg.apply_historical_scaling,
        steps = cfg.run.steps,
        dt_years = cfg.run.dt_years,
        "starting hotspot track"
    );
    let slab = cfg.slab;
    let mut sim = match &args.observations {
        Some(path) => Simulation::new(cfg, GpsTextSource::new(path))?,
        None => Simulation::new(cfg, MemorySource::default())?,
    };
    let summary = sim.run();
    if let Some(out) = &args.out {
        let slab = args.slab.then_some(&slab);
        snapshots::write_csv_track(out, &summary.records, slab)?;
        tracing::info!(path = %out.display(), rows = summary.records.len(), "wrote track");
    }
    Ok(summary)
}
