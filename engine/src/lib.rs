//! Hotspot track engine.
//! Integrates the apparent path of a mantle-fixed point across a plate that drifts rigidly and
//! deforms locally according to GPS velocity observations.
#![deny(missing_docs)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::dbg_macro, clippy::large_enum_variant)]

pub mod config;
pub mod error;
pub mod field;
pub mod interp;
pub mod motion;
pub mod observations;
pub mod scaling;
pub mod sim;
pub mod slab;
pub mod snapshots;
pub mod units;

pub use config::{SamplingStrategy, SimulationConfig};
pub use error::EngineError;
pub use field::VelocityField;
pub use motion::{MotionState, PlateMotion, StepParams, StepRecord};
pub use observations::{GpsTextSource, MemorySource, ObservationSource, VelocitySample};
pub use scaling::RateScalingCurve;
pub use sim::{RunSummary, Simulation};

/// Returns the engine version string from Cargo metadata.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
