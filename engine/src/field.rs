//! Crustal velocity field sampled from geodetic observations.
//!
//! The observation set is fetched from its source once (on `load` or on the first sample
//! request) and is read-only afterwards, so a loaded field can be shared between several
//! integrators.

use std::collections::BTreeSet;
use std::sync::{Mutex, OnceLock, PoisonError};

use crate::config::{SamplingConfig, SamplingStrategy};
use crate::error::EngineError;
use crate::interp::LinearInterpolant;
use crate::observations::{ObservationSource, VelocitySample};
use crate::units::EnVector;

/// Cached observation set plus the indices excluded as outliers.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    /// Observations in source order.
    pub samples: Vec<VelocitySample>,
    /// Excluded indices into `samples`.
    pub excluded: BTreeSet<usize>,
}

impl Snapshot {
    /// Samples still eligible for sampling.
    pub fn active_count(&self) -> usize {
        self.samples.len() - self.excluded.iter().filter(|&&i| i < self.samples.len()).count()
    }

    /// Index of the closest non-excluded sample by squared lon/lat distance in degrees.
    ///
    /// No spherical correction. Ties keep the lowest index; samples at a NaN distance never match.
    pub fn nearest_index(&self, longitude: f64, latitude: f64) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, s) in self.samples.iter().enumerate() {
            if self.excluded.contains(&i) {
                continue;
            }
            let d = (s.longitude - longitude).powi(2) + (s.latitude - latitude).powi(2);
            if d.is_nan() {
                continue;
            }
            match best {
                Some((_, bd)) if d >= bd => {}
                _ => best = Some((i, d)),
            }
        }
        best.map(|(i, _)| i)
    }
}

enum Sampler {
    NearestNeighbor,
    LinearInterpolation(LinearInterpolant),
}

/// Velocity field over a lazily loaded observation snapshot.
pub struct VelocityField {
    source: Box<dyn ObservationSource>,
    config: SamplingConfig,
    snapshot: OnceLock<Snapshot>,
    // held across a fetch so concurrent first requests hit the source once
    fetch_lock: Mutex<()>,
    sampler: Sampler,
}

impl VelocityField {
    /// Field over `source` with the given sampling parameters. The configured strategy is not
    /// active until [`VelocityField::configure_sampling`] runs; until then nearest-neighbor is
    /// used.
    pub fn new(source: impl ObservationSource + 'static, config: SamplingConfig) -> Self {
        Self {
            source: Box::new(source),
            config,
            snapshot: OnceLock::new(),
            fetch_lock: Mutex::new(()),
            sampler: Sampler::NearestNeighbor,
        }
    }

    /// Sampling parameters.
    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Strategy currently answering [`VelocityField::sample`].
    pub fn strategy(&self) -> SamplingStrategy {
        match self.sampler {
            Sampler::NearestNeighbor => SamplingStrategy::NearestNeighbor,
            Sampler::LinearInterpolation(_) => SamplingStrategy::LinearInterpolation,
        }
    }

    /// True once the observation set has been fetched.
    pub fn is_loaded(&self) -> bool {
        self.snapshot.get().is_some()
    }

    /// Fetch the observations. A no-op after the first success; a failure leaves the field
    /// unloaded so the caller may retry.
    pub fn load(&self) -> Result<(), EngineError> {
        self.snapshot().map(|_| ())
    }

    /// Loaded snapshot, fetching it first if needed.
    pub fn snapshot(&self) -> Result<&Snapshot, EngineError> {
        if let Some(s) = self.snapshot.get() {
            return Ok(s);
        }
        let _guard = self.fetch_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(s) = self.snapshot.get() {
            return Ok(s);
        }
        let samples = self.source.fetch().map_err(|e| match e {
            EngineError::DataUnavailable(_) => e,
            other => EngineError::DataUnavailable(other.to_string()),
        })?;
        let mut excluded: BTreeSet<usize> = self.config.exclusions.iter().copied().collect();
        let ignored = excluded.iter().filter(|&&i| i >= samples.len()).count();
        if ignored > 0 {
            tracing::debug!(ignored, "exclusion indices beyond the observation set");
        }
        for (i, s) in samples.iter().enumerate() {
            let finite =
                [s.longitude, s.latitude, s.east_rate, s.north_rate].iter().all(|v| v.is_finite());
            if !finite && excluded.insert(i) {
                tracing::warn!(index = i, "excluding non-finite velocity observation");
            }
        }
        tracing::info!(
            samples = samples.len(),
            excluded = excluded.len() - ignored,
            "loaded velocity observations"
        );
        Ok(self.snapshot.get_or_init(|| Snapshot { samples, excluded }))
    }

    /// Select the sampling strategy. Linear interpolation triangulates the snapshot here, which
    /// requires the observations to be loadable.
    pub fn configure_sampling(&mut self, strategy: SamplingStrategy) -> Result<(), EngineError> {
        self.sampler = match strategy {
            SamplingStrategy::NearestNeighbor => Sampler::NearestNeighbor,
            SamplingStrategy::LinearInterpolation => {
                let snap = self.snapshot()?;
                Sampler::LinearInterpolation(LinearInterpolant::build(
                    &snap.samples,
                    &snap.excluded,
                    self.config.longitude_range,
                    self.config.latitude_range,
                )?)
            }
        };
        self.config.strategy = strategy;
        Ok(())
    }

    /// Crustal velocity sample at a point under the active strategy.
    ///
    /// `Ok(None)` means no sample exists there (empty or fully excluded set, or outside the
    /// interpolant's hull); `Err` means the observations could not be loaded.
    pub fn sample(&self, longitude: f64, latitude: f64) -> Result<Option<VelocitySample>, EngineError> {
        match &self.sampler {
            Sampler::NearestNeighbor => {
                let snap = self.snapshot()?;
                Ok(snap.nearest_index(longitude, latitude).map(|i| snap.samples[i]))
            }
            Sampler::LinearInterpolation(interp) => Ok(interp.sample(longitude, latitude)),
        }
    }

    /// Crustal velocity (m/yr) at a point, or zero when nothing is available.
    pub fn velocity_at(&self, longitude: f64, latitude: f64) -> EnVector {
        match self.sample(longitude, latitude) {
            Ok(Some(s)) => s.velocity(),
            Ok(None) => {
                tracing::warn!(longitude, latitude, "no velocity sample found, using zero");
                EnVector::ZERO
            }
            Err(e) => {
                tracing::warn!(longitude, latitude, error = %e, "velocity field unavailable, using zero");
                EnVector::ZERO
            }
        }
    }
}
