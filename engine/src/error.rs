//! Engine error type.

/// Errors surfaced by loading, sampling, stepping and configuration.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// The observation source could not deliver any velocity records. Recoverable: retry the
    /// load or continue with rigid-plate motion only.
    #[error("observation data unavailable: {0}")]
    DataUnavailable(String),
    /// No velocity sample exists at the location under the active sampling strategy.
    #[error("no velocity sample at lon={longitude:.4} lat={latitude:.4}")]
    SampleNotFound {
        /// Query longitude (degrees).
        longitude: f64,
        /// Query latitude (degrees).
        latitude: f64,
    },
    /// Invalid or incomplete configuration; fatal at set-up.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Wrapper for standard I/O errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// True for conditions the caller may recover from (retry, skip, or fall back).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EngineError::DataUnavailable(_) | EngineError::SampleNotFound { .. })
    }
}
