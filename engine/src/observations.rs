//! Geodetic velocity observations and the sources that supply them.
//!
//! A source is asked for its records exactly once, by [`crate::field::VelocityField::load`].
//! Rates handed to the engine are always in m/yr.

use std::path::{Path, PathBuf};

use crate::error::EngineError;
use crate::units::{EnVector, MetersPerYear, MillimetersPerYear};

/// An observed (or interpolated) crustal velocity at a point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocitySample {
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Eastward rate (m/yr).
    pub east_rate: f64,
    /// Northward rate (m/yr).
    pub north_rate: f64,
}

impl VelocitySample {
    /// Construct a sample from position and rates.
    pub fn new(longitude: f64, latitude: f64, east_rate: f64, north_rate: f64) -> Self {
        Self { longitude, latitude, east_rate, north_rate }
    }

    /// Rates as an east/north vector.
    pub fn velocity(&self) -> EnVector {
        EnVector::new(self.east_rate, self.north_rate)
    }
}

/// Supplier of the raw observation set.
pub trait ObservationSource: Send + Sync {
    /// Return every observation, in a stable order. Index identity in the returned sequence is
    /// what outlier exclusion refers to.
    fn fetch(&self) -> Result<Vec<VelocitySample>, EngineError>;
}

/// Observations already held in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    samples: Vec<VelocitySample>,
}

impl MemorySource {
    /// Wrap a ready-made sample list.
    pub fn new(samples: Vec<VelocitySample>) -> Self {
        Self { samples }
    }
}

impl ObservationSource for MemorySource {
    // An empty list is a reachable, empty dataset rather than a failed fetch.
    fn fetch(&self) -> Result<Vec<VelocitySample>, EngineError> {
        Ok(self.samples.clone())
    }
}

/// Lon/lat box used to keep only observations of a region (strict inequalities).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionFilter {
    /// Minimum longitude (degrees, -180..180).
    pub min_lon: f64,
    /// Maximum longitude (degrees, -180..180).
    pub max_lon: f64,
    /// Minimum latitude (degrees).
    pub min_lat: f64,
    /// Maximum latitude (degrees).
    pub max_lat: f64,
}

impl RegionFilter {
    /// True when the point lies strictly inside the box.
    pub fn contains(&self, longitude: f64, latitude: f64) -> bool {
        latitude > self.min_lat
            && latitude < self.max_lat
            && longitude > self.min_lon
            && longitude < self.max_lon
    }
}

/// GPS velocity table on disk.
///
/// Format: one station per line, whitespace or comma separated,
/// `lon lat ve vn [se sn ren]`. Lines starting with `//` or `#` are comments; lines with fewer
/// than four numeric columns are skipped. Longitudes in `0..360` are folded into `-180..180`.
/// Rates are in mm/yr unless `rate_unit` says otherwise.
#[derive(Clone, Debug)]
pub struct GpsTextSource {
    path: PathBuf,
    region: Option<RegionFilter>,
    rate_unit: MetersPerYear,
}

impl GpsTextSource {
    /// Source reading `path` with mm/yr rates and no region filter.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), region: None, rate_unit: MillimetersPerYear(1.0).into() }
    }

    /// Keep only stations strictly inside `region`.
    pub fn with_region(mut self, region: RegionFilter) -> Self {
        self.region = Some(region);
        self
    }

    /// Size of one file rate unit in m/yr (1e-3 for mm/yr, 1.0 for m/yr).
    pub fn with_rate_unit(mut self, unit: MetersPerYear) -> Self {
        self.rate_unit = unit;
        self
    }

    /// Path of the table.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse table text into samples; returns the samples and the number of skipped lines.
    pub fn parse(&self, text: &str) -> (Vec<VelocitySample>, usize) {
        let mut out = Vec::new();
        let mut skipped = 0usize;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with("//") || line.starts_with('#') {
                continue;
            }
            let cols: Vec<f64> = line
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|s| !s.is_empty())
                .map_while(|s| s.parse::<f64>().ok())
                .collect();
            if cols.len() < 4 || cols[..4].iter().any(|v| !v.is_finite()) {
                skipped += 1;
                continue;
            }
            let longitude = normalize_longitude(cols[0]);
            let latitude = cols[1];
            if let Some(r) = &self.region {
                if !r.contains(longitude, latitude) {
                    continue;
                }
            }
            let k = self.rate_unit.value();
            out.push(VelocitySample::new(longitude, latitude, cols[2] * k, cols[3] * k));
        }
        (out, skipped)
    }
}

impl ObservationSource for GpsTextSource {
    fn fetch(&self) -> Result<Vec<VelocitySample>, EngineError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            EngineError::DataUnavailable(format!("{}: {e}", self.path.display()))
        })?;
        let (samples, skipped) = self.parse(&text);
        if skipped > 0 {
            tracing::debug!(path = %self.path.display(), skipped, "skipped malformed GPS lines");
        }
        if samples.is_empty() {
            return Err(EngineError::DataUnavailable(format!(
                "{}: no usable velocity records",
                self.path.display()
            )));
        }
        Ok(samples)
    }
}

/// Fold a longitude given in `0..360` into `-180..180`.
pub fn normalize_longitude(lon: f64) -> f64 {
    if lon > 180.0 {
        lon - 360.0
    } else if lon < -180.0 {
        lon + 360.0
    } else {
        lon
    }
}
