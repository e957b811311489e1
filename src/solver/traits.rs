//! Numerical solver traits and types
//!
//! # Design Philosophy
//!
//! - Central enum `StepControl` defines how the solver advances between
//!   output points (fixed sub-steps or adaptive error control)
//! - `SolverConfiguration` pairs it with the output `TimeGrid`
//! - `TrajectoryResult` is the time series handed to downstream consumers
//!
//! # Stability Guarantee
//!
//! - `Solver` trait: STABLE since v0.1.0
//! - `StepControl` enum: EXTENSIBLE (new variants can be added)

use std::collections::HashMap;

use ndarray::Array2;

use crate::epidemic::CompartmentState;
use crate::error::{Result, SimulationError};
use crate::solver::{Scenario, TimeGrid};

/// Default tolerance on negative compartments, relative to the population
pub const DEFAULT_NEGATIVITY_TOLERANCE: f64 = 1e-6;

/// Default number of fixed sub-steps per output interval
pub const DEFAULT_SUBSTEPS: usize = 4;

// =================================================================================================
// Step control
// =================================================================================================

/// How a solver advances from one output point to the next
///
/// # Examples
///
/// ```rust
/// use sir_rs::solver::StepControl;
///
/// // Four RK4/Euler steps between consecutive grid points
/// let fixed = StepControl::Fixed { substeps: 4 };
///
/// // Error-controlled steps (Dormand-Prince)
/// let adaptive = StepControl::Adaptive { rtol: 1e-8, atol: 1e-8, max_steps: 10_000 };
///
/// assert!(fixed.validate().is_ok());
/// assert!(adaptive.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum StepControl {
    /// Fixed number of equal steps per grid interval
    ///
    /// Used by: Euler, RK4
    Fixed { substeps: usize },

    /// Embedded error estimate with step-size adaptation
    ///
    /// Used by: Dormand-Prince
    ///
    /// # Parameters
    /// - `rtol`, `atol`: relative and absolute local error tolerances
    /// - `max_steps`: attempted steps allowed per grid interval
    Adaptive {
        rtol: f64,
        atol: f64,
        max_steps: usize,
    },
}

impl StepControl {
    /// Get name identifier
    pub fn name(&self) -> &str {
        match self {
            StepControl::Fixed { .. } => "Fixed",
            StepControl::Adaptive { .. } => "Adaptive",
        }
    }

    /// Validate that parameters are numerically meaningful
    pub fn validate(&self) -> Result<()> {
        match self {
            StepControl::Fixed { substeps } => {
                if *substeps == 0 {
                    return Err(SimulationError::invalid("substeps must be greater than 0"));
                }
                Ok(())
            }
            StepControl::Adaptive { rtol, atol, max_steps } => {
                if !rtol.is_finite() || *rtol <= 0.0 {
                    return Err(SimulationError::invalid(format!(
                        "rtol must be positive and finite, got {rtol}"
                    )));
                }
                if !atol.is_finite() || *atol <= 0.0 {
                    return Err(SimulationError::invalid(format!(
                        "atol must be positive and finite, got {atol}"
                    )));
                }
                if *max_steps == 0 {
                    return Err(SimulationError::invalid("max_steps must be greater than 0"));
                }
                Ok(())
            }
        }
    }
}

// =================================================================================================
// Solver configuration
// =================================================================================================

/// Configuration for numerical solver
///
/// # Examples
///
/// ```rust
/// use sir_rs::solver::{SolverConfiguration, TimeGrid};
///
/// let grid = TimeGrid::linspace(365.0, 365)?;
///
/// let fixed = SolverConfiguration::fixed_step(grid.clone(), 4);
/// let adaptive = SolverConfiguration::adaptive(grid, 1e-8, 1e-8);
///
/// assert!(fixed.validate().is_ok());
/// assert!(adaptive.validate().is_ok());
/// # Ok::<(), sir_rs::SimulationError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfiguration {
    /// Output instants
    pub time_grid: TimeGrid,

    /// Stepping strategy between output instants
    pub step_control: StepControl,

    /// Compartments may dip below zero by at most `negativity_tolerance * N`
    pub negativity_tolerance: f64,
}

impl SolverConfiguration {
    /// Create a new configuration with a given step control
    pub fn new(time_grid: TimeGrid, step_control: StepControl) -> Self {
        Self {
            time_grid,
            step_control,
            negativity_tolerance: DEFAULT_NEGATIVITY_TOLERANCE,
        }
    }

    /// Fixed-step configuration
    pub fn fixed_step(time_grid: TimeGrid, substeps: usize) -> Self {
        Self::new(time_grid, StepControl::Fixed { substeps })
    }

    /// Adaptive configuration with 10 000 attempted steps per interval
    pub fn adaptive(time_grid: TimeGrid, rtol: f64, atol: f64) -> Self {
        Self::new(
            time_grid,
            StepControl::Adaptive {
                rtol,
                atol,
                max_steps: 10_000,
            },
        )
    }

    /// Builder pattern: set negativity tolerance
    pub fn with_negativity_tolerance(mut self, tolerance: f64) -> Self {
        self.negativity_tolerance = tolerance;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.negativity_tolerance.is_finite() || self.negativity_tolerance < 0.0 {
            return Err(SimulationError::invalid(format!(
                "negativity tolerance must be non-negative and finite, got {}",
                self.negativity_tolerance
            )));
        }
        self.step_control.validate()
    }
}

// =================================================================================================
// Trajectory result
// =================================================================================================

/// Time series produced by a solver
///
/// Parallel sequences of equal length, one entry per grid point, the first
/// being the initial state. `total[i] = S[i] + I[i] + R[i]`.
#[derive(Clone, Debug, PartialEq)]
pub struct TrajectoryResult {
    pub time: Vec<f64>,
    pub susceptible: Vec<f64>,
    pub infected: Vec<f64>,
    pub recovered: Vec<f64>,
    pub total: Vec<f64>,

    /// Free-form diagnostics (solver name, evaluations, ...)
    pub metadata: HashMap<String, String>,
}

impl TrajectoryResult {
    /// Build the columns from one state per time point
    ///
    /// # Panics
    ///
    /// Panics if `time` and `states` differ in length.
    pub fn new(time: Vec<f64>, states: &[CompartmentState]) -> Self {
        assert_eq!(
            time.len(),
            states.len(),
            "one state per time point is required"
        );

        Self {
            time,
            susceptible: states.iter().map(CompartmentState::susceptible).collect(),
            infected: states.iter().map(CompartmentState::infected).collect(),
            recovered: states.iter().map(CompartmentState::recovered).collect(),
            total: states.iter().map(CompartmentState::total).collect(),
            metadata: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// State at sample `index`
    pub fn state_at(&self, index: usize) -> Option<CompartmentState> {
        if index >= self.len() {
            return None;
        }
        Some(CompartmentState::new(
            self.susceptible[index],
            self.infected[index],
            self.recovered[index],
        ))
    }

    pub fn initial_state(&self) -> Option<CompartmentState> {
        self.state_at(0)
    }

    pub fn final_state(&self) -> Option<CompartmentState> {
        self.len().checked_sub(1).and_then(|last| self.state_at(last))
    }

    /// `(t, I)` at the sample with the most infected individuals
    pub fn peak_infected(&self) -> Option<(f64, f64)> {
        self.infected
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(index, infected)| (self.time[index], *infected))
    }

    /// Rows of `[t, S, I, R, total]`
    pub fn to_array(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.len(), 5), |(row, column)| match column {
            0 => self.time[row],
            1 => self.susceptible[row],
            2 => self.infected[row],
            3 => self.recovered[row],
            _ => self.total[row],
        })
    }

    /// Add a metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Get a metadata entry
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

// =================================================================================================
// Solver trait
// =================================================================================================

/// Numerical integrator for epidemic scenarios
///
/// A solver is stateless: the same instance can solve any number of
/// scenarios, concurrently if needed.
pub trait Solver: Send + Sync {
    /// Integrate `scenario` over `config.time_grid`
    ///
    /// # Errors
    ///
    /// - [`SimulationError::InvalidParameter`] for an invalid scenario or configuration
    /// - [`SimulationError::UnsupportedConfiguration`] for a step control the solver lacks
    /// - [`SimulationError::IntegrationDiverged`] on non-finite or negative output
    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> Result<TrajectoryResult>;

    /// Human-readable solver name
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> TrajectoryResult {
        TrajectoryResult::new(
            vec![0.0, 1.0, 2.0],
            &[
                CompartmentState::new(99.0, 1.0, 0.0),
                CompartmentState::new(95.0, 4.0, 1.0),
                CompartmentState::new(92.0, 3.0, 5.0),
            ],
        )
    }

    #[test]
    fn test_step_control_validation() {
        assert!(StepControl::Fixed { substeps: 0 }.validate().is_err());
        assert!(StepControl::Adaptive { rtol: 0.0, atol: 1e-8, max_steps: 10 }.validate().is_err());
        assert!(StepControl::Adaptive { rtol: 1e-6, atol: -1.0, max_steps: 10 }.validate().is_err());
        assert!(StepControl::Adaptive { rtol: 1e-6, atol: 1e-8, max_steps: 0 }.validate().is_err());
    }

    #[test]
    fn test_configuration_validation() {
        let grid = TimeGrid::linspace(10.0, 11).unwrap();
        let config = SolverConfiguration::fixed_step(grid.clone(), 2);
        assert_eq!(config.negativity_tolerance, DEFAULT_NEGATIVITY_TOLERANCE);
        assert!(config.validate().is_ok());

        let config = SolverConfiguration::fixed_step(grid, 2).with_negativity_tolerance(-1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_trajectory_columns() {
        let result = result();

        assert_eq!(result.len(), 3);
        assert_eq!(result.total, vec![100.0, 100.0, 100.0]);
        assert_eq!(result.final_state(), Some(CompartmentState::new(92.0, 3.0, 5.0)));
        assert_eq!(result.state_at(3), None);
        assert_eq!(result.peak_infected(), Some((1.0, 4.0)));
    }

    #[test]
    fn test_trajectory_array() {
        let array = result().to_array();

        assert_eq!(array.shape(), &[3, 5]);
        assert_eq!(array[[1, 0]], 1.0);
        assert_eq!(array[[1, 2]], 4.0);
        assert_eq!(array[[2, 4]], 100.0);
    }

    #[test]
    fn test_metadata() {
        let mut result = result();
        result.add_metadata("solver", "RK4");
        assert_eq!(result.metadata("solver"), Some("RK4"));
        assert_eq!(result.metadata("missing"), None);
    }
}
