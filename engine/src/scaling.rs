//! Historical rate scaling: a multiplier on present-day crustal rates as a function of time
//! before present.

use crate::config::ScalingConfig;
use crate::error::EngineError;
use crate::units::{Myr, Years};

/// Piecewise-linear multiplier table at a fixed bin width, starting at the present.
#[derive(Clone, Debug, PartialEq)]
pub struct RateScalingCurve {
    bin_width: Myr,
    factors: Vec<f64>,
}

impl RateScalingCurve {
    /// Build a curve. `factors[0]` is the present and must be exactly 1.0.
    pub fn new(bin_width: Myr, factors: Vec<f64>) -> Result<Self, EngineError> {
        if !(bin_width.value().is_finite() && bin_width.value() > 0.0) {
            return Err(EngineError::Config(format!(
                "scaling bin width must be > 0, got {} Myr",
                bin_width.value()
            )));
        }
        match factors.first() {
            None => return Err(EngineError::Config("scaling table is empty".into())),
            Some(&f0) if f0 != 1.0 => {
                return Err(EngineError::Config(format!(
                    "scaling table must start at 1.0 for the present, got {f0}"
                )))
            }
            Some(_) => {}
        }
        if let Some(bad) = factors.iter().find(|f| !f.is_finite()) {
            return Err(EngineError::Config(format!("non-finite scaling factor {bad}")));
        }
        Ok(Self { bin_width, factors })
    }

    /// Build from the configuration section.
    pub fn from_config(cfg: &ScalingConfig) -> Result<Self, EngineError> {
        Self::new(Myr(cfg.bin_width_myr), cfg.factors.clone())
    }

    /// Table entries, present first.
    pub fn factors(&self) -> &[f64] {
        &self.factors
    }

    /// Multiplier for `years_before_present` (positive = past).
    ///
    /// The present and the future map to exactly 1.0. Past offsets interpolate linearly between
    /// bracketing bins and saturate at the last entry.
    pub fn scaling_factor(&self, years_before_present: Years) -> f64 {
        if years_before_present.value() <= 0.0 {
            return 1.0;
        }
        let last = self.factors.len() - 1;
        let offset = Myr::from(years_before_present).value() / self.bin_width.value();
        let pos = offset.min(last as f64);
        let i = pos.floor() as usize;
        if i >= last {
            return self.factors[last];
        }
        let frac = pos - i as f64;
        self.factors[i] + (self.factors[i + 1] - self.factors[i]) * frac
    }
}

impl Default for RateScalingCurve {
    fn default() -> Self {
        let cfg = ScalingConfig::default();
        Self { bin_width: Myr(cfg.bin_width_myr), factors: cfg.factors }
    }
}
