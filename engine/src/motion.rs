//! Plate-motion integrator: the apparent path of a mantle-fixed point across a drifting,
//! internally deforming plate.

use track_geo::{apply_local_displacement, Location};

use crate::error::EngineError;
use crate::field::VelocityField;
use crate::observations::VelocitySample;
use crate::scaling::RateScalingCurve;
use crate::units::{EnVector, MetersPerYear, Years};

/// Integrator state after initialization or the last committed step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionState {
    /// Current position of the tracked point.
    pub location: Location,
    /// Accumulated time in years (negative = before present).
    pub elapsed_years: f64,
    /// Rigid-plate velocity (m/yr), fixed at initialization.
    pub rigid_velocity: EnVector,
    /// Crustal-only part of the last step's displacement (m), as applied.
    pub last_crustal_displacement_m: EnVector,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            location: Location::default(),
            elapsed_years: 0.0,
            rigid_velocity: EnVector::ZERO,
            last_crustal_displacement_m: EnVector::ZERO,
        }
    }
}

/// Step parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepParams {
    /// Signed time step in years. Positive advances the plate.
    pub dt_years: f64,
    /// Scale crustal rates by the historical curve while elapsed time is negative.
    pub apply_historical_scaling: bool,
    /// Sample the velocity field and add its rate to the rigid-plate motion.
    pub apply_crustal_velocity: bool,
}

/// Per-step diagnostic record. Velocities carry the motion sense and scaling actually applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepRecord {
    /// Location before the step (where the field was sampled).
    pub from: Location,
    /// State after the step.
    pub state: MotionState,
    /// Sample the crustal rate came from, if crustal velocity was enabled.
    pub sample: Option<VelocitySample>,
    /// Historical scaling multiplier applied to the crustal rate (1.0 when unused).
    pub scaling_factor: f64,
    /// Crustal velocity contribution (m/yr).
    pub crustal_velocity: EnVector,
    /// Rigid-plate velocity contribution (m/yr).
    pub rigid_velocity: EnVector,
    /// Sum of both contributions (m/yr).
    pub combined_velocity: EnVector,
    /// Longitude change (degrees).
    pub delta_longitude: f64,
    /// Latitude change (degrees).
    pub delta_latitude: f64,
}

/// Single-writer integrator. Reads a velocity field, never mutates it.
#[derive(Clone, Debug)]
pub struct PlateMotion {
    curve: RateScalingCurve,
    state: MotionState,
    history: Vec<MotionState>,
}

impl PlateMotion {
    /// Integrator using `curve` for historical scaling. Call [`PlateMotion::initialize`] before
    /// stepping.
    pub fn new(curve: RateScalingCurve) -> Self {
        Self { curve, state: MotionState::default(), history: Vec::new() }
    }

    /// Reset time, position and history, and fix the rigid-plate velocity from speed and
    /// azimuth (degrees clockwise from north).
    pub fn initialize(
        &mut self,
        start_time: Years,
        latitude: f64,
        longitude: f64,
        speed: MetersPerYear,
        bearing_deg: f64,
    ) -> MotionState {
        self.state = MotionState {
            location: Location::new(longitude, latitude),
            elapsed_years: start_time.value(),
            rigid_velocity: EnVector::from_bearing(speed, bearing_deg),
            last_crustal_displacement_m: EnVector::ZERO,
        };
        self.history.clear();
        self.state
    }

    /// Current state.
    pub fn state(&self) -> &MotionState {
        &self.state
    }

    /// Every committed post-step state, oldest first.
    pub fn history(&self) -> &[MotionState] {
        &self.history
    }

    /// Scaling curve in use.
    pub fn curve(&self) -> &RateScalingCurve {
        &self.curve
    }

    /// Advance by one step.
    ///
    /// Advancing time (dt > 0) carries the plate forward, which moves the tracked point backward
    /// across the plate, so velocities are negated; rewinding (dt <= 0) leaves them as is.
    /// When crustal velocity is enabled and no sample exists at the current location the step
    /// fails with [`EngineError::SampleNotFound`] and the state is left untouched.
    pub fn step(&mut self, field: &VelocityField, p: &StepParams) -> Result<StepRecord, EngineError> {
        let dt = p.dt_years;
        let elapsed = self.state.elapsed_years + dt;
        let sense = if dt > 0.0 { -1.0 } else { 1.0 };
        let here = self.state.location;

        let mut scaling_factor = 1.0;
        let mut sample = None;
        let crustal = if p.apply_crustal_velocity {
            let s = field.sample(here.longitude, here.latitude)?.ok_or(
                EngineError::SampleNotFound { longitude: here.longitude, latitude: here.latitude },
            )?;
            if p.apply_historical_scaling && elapsed < 0.0 {
                scaling_factor = self.curve.scaling_factor(Years(-elapsed));
            }
            sample = Some(s);
            s.velocity() * (scaling_factor * sense)
        } else {
            EnVector::ZERO
        };
        let rigid = self.state.rigid_velocity * sense;
        let combined = crustal + rigid;

        let span = dt.abs();
        let displacement = combined * span;
        let next = apply_local_displacement(here, displacement.east, displacement.north);

        self.state = MotionState {
            location: next,
            elapsed_years: elapsed,
            rigid_velocity: self.state.rigid_velocity,
            last_crustal_displacement_m: crustal * span,
        };
        self.history.push(self.state);

        let record = StepRecord {
            from: here,
            state: self.state,
            sample,
            scaling_factor,
            crustal_velocity: crustal,
            rigid_velocity: rigid,
            combined_velocity: combined,
            delta_longitude: next.longitude - here.longitude,
            delta_latitude: next.latitude - here.latitude,
        };
        tracing::debug!(
            elapsed_years = elapsed,
            lon = next.longitude,
            lat = next.latitude,
            ve = combined.east,
            vn = combined.north,
            scaling = scaling_factor,
            "plate motion step"
        );
        Ok(record)
    }
}
