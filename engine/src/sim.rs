//! Simulation driver: builds the field and integrator from a config and runs fixed steps.

use track_geo::{planar_path_length_m, Location};

use crate::config::SimulationConfig;
use crate::error::EngineError;
use crate::field::VelocityField;
use crate::motion::{PlateMotion, StepParams, StepRecord};
use crate::observations::ObservationSource;
use crate::scaling::RateScalingCurve;
use crate::units::{MetersPerYear, Years};

/// Outcome of a run: every committed step, and the error that stopped it early, if any.
#[derive(Debug)]
pub struct RunSummary {
    /// Location before the first step.
    pub start: Location,
    /// Records of committed steps in order.
    pub records: Vec<StepRecord>,
    /// Error of the first failed step; `None` when every requested step ran.
    pub halted: Option<EngineError>,
}

impl RunSummary {
    /// True when no step failed.
    pub fn completed(&self) -> bool {
        self.halted.is_none()
    }

    /// Start location followed by the location after each committed step.
    pub fn path(&self) -> Vec<Location> {
        std::iter::once(self.start).chain(self.records.iter().map(|r| r.state.location)).collect()
    }

    /// Track length in meters along the local planar projection.
    pub fn track_length_m(&self) -> f64 {
        planar_path_length_m(&self.path())
    }
}

/// A configured field + integrator pair.
pub struct Simulation {
    config: SimulationConfig,
    field: VelocityField,
    motion: PlateMotion,
}

impl Simulation {
    /// Validate `config`, wire the field to `source`, select the sampling strategy and
    /// initialize the integrator.
    ///
    /// Linear interpolation needs the observations to build its triangulation, so it loads them
    /// here; nearest-neighbor keeps loading lazy. With crustal velocity disabled the field is
    /// never touched.
    pub fn new(
        config: SimulationConfig,
        source: impl ObservationSource + 'static,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let curve = RateScalingCurve::from_config(&config.scaling)?;
        let mut field = VelocityField::new(source, config.sampling.clone());
        if config.apply_crustal_velocity {
            field.configure_sampling(config.sampling.strategy)?;
        }
        let mut motion = PlateMotion::new(curve);
        motion.initialize(
            Years(config.start_time_years),
            config.start.latitude,
            config.start.longitude,
            MetersPerYear(config.plate.speed_m_per_yr),
            config.plate.bearing_deg,
        );
        Ok(Self { config, field, motion })
    }

    /// Configuration in use.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Velocity field.
    pub fn field(&self) -> &VelocityField {
        &self.field
    }

    /// Integrator.
    pub fn motion(&self) -> &PlateMotion {
        &self.motion
    }

    /// Step parameters for a given `dt` under the configured flags.
    pub fn step_params(&self, dt_years: f64) -> StepParams {
        StepParams {
            dt_years,
            apply_historical_scaling: self.config.apply_historical_scaling,
            apply_crustal_velocity: self.config.apply_crustal_velocity,
        }
    }

    /// Run the configured number of steps.
    pub fn run(&mut self) -> RunSummary {
        let r = self.config.run;
        self.run_steps(r.steps, r.dt_years)
    }

    /// Run up to `steps` steps of `dt_years`, stopping at the first failure.
    pub fn run_steps(&mut self, steps: u32, dt_years: f64) -> RunSummary {
        let start = self.motion.state().location;
        let params = self.step_params(dt_years);
        let mut records = Vec::new();
        let mut halted = None;
        for i in 0..steps {
            match self.motion.step(&self.field, &params) {
                Ok(rec) => records.push(rec),
                Err(e) => {
                    tracing::warn!(step = i, error = %e, "simulation halted");
                    halted = Some(e);
                    break;
                }
            }
        }
        let end = self.motion.state();
        tracing::info!(
            steps = records.len(),
            elapsed_years = end.elapsed_years,
            lon = end.location.longitude,
            lat = end.location.latitude,
            "run finished"
        );
        RunSummary { start, records, halted }
    }
}
