//! First-order Juan de Fuca slab model: how far east the subducted slab has advanced beneath
//! the tracking latitude at a given date, and whether it lies under a point.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::units::{MetersPerYear, MillimetersPerYear, Years};

/// Slab geometry and convergence history.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlabParams {
    /// Date subduction began, years (negative = before present).
    pub initial_subduction_years: f64,
    /// Depth at which the slab stops advancing eastward (m).
    pub max_depth_m: f64,
    /// Slab dip (degrees).
    pub dip_deg: f64,
    /// Latitude along which eastward advance is measured (degrees).
    pub tracking_latitude: f64,
    /// Trench longitude (degrees).
    pub trench_longitude: f64,
    /// Convergence rate down-dip (mm/yr).
    pub convergence_mm_per_yr: f64,
}

impl Default for SlabParams {
    fn default() -> Self {
        Self {
            initial_subduction_years: -45.0e6,
            max_depth_m: 500.0e3,
            dip_deg: 45.0,
            tracking_latitude: 42.0,
            trench_longitude: -125.0,
            convergence_mm_per_yr: 28.0,
        }
    }
}

impl SlabParams {
    /// Check geometry.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.dip_deg > 0.0 && self.dip_deg < 90.0) {
            return Err(EngineError::Config(format!(
                "slab.dip_deg must be in (0, 90), got {}",
                self.dip_deg
            )));
        }
        if !(self.max_depth_m > 0.0) || !self.max_depth_m.is_finite() {
            return Err(EngineError::Config("slab.max_depth_m must be > 0".into()));
        }
        if !(self.tracking_latitude.abs() < 90.0) {
            return Err(EngineError::Config("slab.tracking_latitude must be off the poles".into()));
        }
        if !(self.initial_subduction_years.is_finite()
            && self.trench_longitude.is_finite()
            && self.convergence_mm_per_yr.is_finite())
        {
            return Err(EngineError::Config("slab parameters must be finite".into()));
        }
        Ok(())
    }

    /// Horizontal slab extent (m) once the leading edge reaches `max_depth_m`.
    ///
    /// This is the geometric run `max_depth / tan(dip)`. The older `max_depth * tan(dip)`
    /// formulation agrees only at 45° and gives a different extent at any other dip.
    pub fn max_east_extent_m(&self) -> f64 {
        self.max_depth_m / self.dip_deg.to_radians().tan()
    }

    /// Longitude of the slab's leading edge at `date`. Before subduction starts this is the
    /// trench; afterwards the edge advances east until the slab reaches its maximum depth.
    pub fn leading_edge_longitude(&self, date: Years) -> f64 {
        if date.value() < self.initial_subduction_years {
            return self.trench_longitude;
        }
        let rate = MetersPerYear::from(MillimetersPerYear(self.convergence_mm_per_yr));
        let down_dip_m = (date.value() - self.initial_subduction_years) * rate.value();
        let dip = self.dip_deg.to_radians();
        let mut east_m = down_dip_m * dip.cos();
        if down_dip_m * dip.sin() > self.max_depth_m {
            east_m = self.max_east_extent_m();
        }
        self.trench_longitude + track_geo::longitude_from_east_displacement(self.tracking_latitude, east_m)
    }

    /// True when the slab's leading edge has reached or passed `longitude` at `date`.
    pub fn occludes(&self, date: Years, longitude: f64) -> bool {
        self.leading_edge_longitude(date) >= longitude
    }
}
