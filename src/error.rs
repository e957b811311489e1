//! Error types
//!
//! Every fallible operation of the crate returns [`Result`]. A run either
//! produces a complete trajectory or fails with one of these variants; no
//! partial output is ever returned.

use thiserror::Error;

/// Errors raised while building or integrating an epidemic scenario
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Out-of-range or inconsistent input (parameters, time grid, scenario)
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Numerical output became non-finite or meaningfully negative
    ///
    /// `step` is the index of the output grid point at which the failure
    /// was detected and `time` its abscissa.
    #[error("integration diverged at step {step} (t = {time}): {reason}")]
    IntegrationDiverged {
        step: usize,
        time: f64,
        reason: String,
    },

    /// A solver was handed a step control it does not implement
    #[error("unsupported solver configuration: {0}")]
    UnsupportedConfiguration(String),

    /// A configuration document could not be read or parsed
    ///
    /// Parameters are validated while the document is deserialized, so a
    /// rejected value arrives here rather than as `InvalidParameter`; the
    /// message keeps the `invalid parameter: ...` text.
    #[error("configuration error: {0}")]
    Config(String),
}

impl SimulationError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    pub(crate) fn diverged(step: usize, time: f64, reason: impl Into<String>) -> Self {
        Self::IntegrationDiverged {
            step,
            time,
            reason: reason.into(),
        }
    }
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, SimulationError>;
