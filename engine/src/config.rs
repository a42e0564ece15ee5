//! Configuration types for a track simulation.
//!
//! Every table the engine consults (clamp bounds, outlier set, scaling curve, slab parameters)
//! lives here as a plain value handed to the component that owns it. `SimulationConfig` loads
//! from TOML; missing fields take their defaults.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::slab::SlabParams;

/// Velocity-field sampling algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingStrategy {
    /// Closest non-excluded observation by planar lon/lat distance.
    #[default]
    #[serde(alias = "NearestNeighbor", alias = "ClosestEntry")]
    NearestNeighbor,
    /// Barycentric interpolation over a Delaunay triangulation of the observations.
    #[serde(alias = "LinearInterpolation", alias = "LinearNDInterpolator")]
    LinearInterpolation,
}

impl FromStr for SamplingStrategy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nearest_neighbor" | "NearestNeighbor" | "ClosestEntry" | "nearest" => {
                Ok(Self::NearestNeighbor)
            }
            "linear_interpolation" | "LinearInterpolation" | "LinearNDInterpolator" | "linear" => {
                Ok(Self::LinearInterpolation)
            }
            other => Err(EngineError::Config(format!("unknown sampling strategy '{other}'"))),
        }
    }
}

impl fmt::Display for SamplingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NearestNeighbor => f.write_str("nearest_neighbor"),
            Self::LinearInterpolation => f.write_str("linear_interpolation"),
        }
    }
}

/// Closed interval of degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Range {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl Range {
    /// Construct `[min, max]`.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// True when `v` lies inside the interval.
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    fn check(&self, name: &str) -> Result<(), EngineError> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min > self.max {
            return Err(EngineError::Config(format!(
                "{name} must be a finite range with min <= max, got [{}, {}]",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Outlier indices dropped from the Pacific Northwest GPS compilation.
pub const DEFAULT_EXCLUSIONS: [usize; 3] = [2425, 438, 3659];

/// Velocity-field sampling parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Active strategy.
    pub strategy: SamplingStrategy,
    /// Observation indices excluded from every strategy.
    pub exclusions: Vec<usize>,
    /// Longitude clamp applied before interpolation.
    pub longitude_range: Range,
    /// Latitude clamp applied before interpolation.
    pub latitude_range: Range,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            strategy: SamplingStrategy::NearestNeighbor,
            exclusions: DEFAULT_EXCLUSIONS.to_vec(),
            longitude_range: Range::new(-125.0, -110.0),
            latitude_range: Range::new(37.0, 50.0),
        }
    }
}

impl SamplingConfig {
    /// Check the clamp bounds.
    pub fn validate(&self) -> Result<(), EngineError> {
        self.longitude_range.check("sampling.longitude_range")?;
        self.latitude_range.check("sampling.latitude_range")?;
        Ok(())
    }
}

/// Rigid-plate drift.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlateConfig {
    /// Plate speed in m/yr.
    pub speed_m_per_yr: f64,
    /// Azimuth of plate motion, degrees clockwise from north.
    pub bearing_deg: f64,
}

impl Default for PlateConfig {
    fn default() -> Self {
        // North American plate over the Yellowstone hotspot.
        Self { speed_m_per_yr: 0.035, bearing_deg: 240.0 }
    }
}

/// Historical rate-scaling table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalingConfig {
    /// Width of one table bin in Myr.
    pub bin_width_myr: f64,
    /// Multipliers at 0, 1, 2, ... bins before present. The first entry must be 1.0.
    pub factors: Vec<f64>,
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self { bin_width_myr: 5.0, factors: vec![1.0, 1.15, 1.3, 1.45, 1.6] }
    }
}

/// Starting point of the tracked mantle point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartConfig {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Default for StartConfig {
    fn default() -> Self {
        // Yellowstone caldera
        Self { latitude: 44.43, longitude: -110.67 }
    }
}

/// Driver loop parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of steps to run.
    pub steps: u32,
    /// Signed step size in years (positive runs forward in time).
    pub dt_years: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { steps: 16, dt_years: 1.0e6 }
    }
}

/// Complete simulation configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Elapsed time at initialization, years (negative = before present).
    pub start_time_years: f64,
    /// Add sampled crustal velocity to the rigid-plate motion.
    pub apply_crustal_velocity: bool,
    /// Scale crustal rates by the historical curve when elapsed time is negative.
    pub apply_historical_scaling: bool,
    /// Starting location.
    pub start: StartConfig,
    /// Rigid-plate motion.
    pub plate: PlateConfig,
    /// Velocity-field sampling.
    pub sampling: SamplingConfig,
    /// Historical scaling curve.
    pub scaling: ScalingConfig,
    /// Driver loop.
    pub run: RunConfig,
    /// Subducting-slab occlusion model.
    pub slab: SlabParams,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_time_years: 0.0,
            apply_crustal_velocity: true,
            apply_historical_scaling: false,
            start: StartConfig::default(),
            plate: PlateConfig::default(),
            sampling: SamplingConfig::default(),
            scaling: ScalingConfig::default(),
            run: RunConfig::default(),
            slab: SlabParams::default(),
        }
    }
}

impl SimulationConfig {
    /// Validate every section. Errors are fatal at set-up.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.start_time_years.is_finite() {
            return Err(EngineError::Config("start_time_years must be finite".into()));
        }
        let s = &self.start;
        if !(s.latitude.is_finite() && s.longitude.is_finite()) {
            return Err(EngineError::Config("start location must be finite".into()));
        }
        if s.latitude.abs() >= 90.0 {
            return Err(EngineError::Config(format!(
                "start.latitude must be strictly between -90 and 90, got {}",
                s.latitude
            )));
        }
        if !(self.plate.speed_m_per_yr.is_finite() && self.plate.bearing_deg.is_finite()) {
            return Err(EngineError::Config("plate speed and bearing must be finite".into()));
        }
        self.sampling.validate()?;
        // Curve checks live with the curve itself.
        crate::scaling::RateScalingCurve::from_config(&self.scaling)?;
        if !self.run.dt_years.is_finite() || self.run.dt_years == 0.0 {
            return Err(EngineError::Config(format!(
                "run.dt_years must be finite and non-zero, got {}",
                self.run.dt_years
            )));
        }
        self.slab.validate()?;
        Ok(())
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, EngineError> {
        let cfg: Self = toml::from_str(text).map_err(|e| EngineError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, EngineError> {
        toml::to_string_pretty(self).map_err(|e| EngineError::Config(e.to_string()))
    }
}
