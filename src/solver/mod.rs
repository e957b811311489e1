//! Numerical solvers
//!
//! This module provides traits and implementations for numerical solvers.
//! A numerical solver applies a numerical method to the equations provided
//! by an epidemic model, from an initial state, over a time grid.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! 1. **Scenario** (`Scenario`) - WHAT to solve
//!    - Epidemic model (equations)
//!    - Initial compartment state
//!
//! 2. **Configuration** (`SolverConfiguration`) - HOW to solve
//!    - Output time grid
//!    - Step control (fixed sub-steps or adaptive tolerances)
//!    - Negativity tolerance
//!
//! 3. **Solver** (`Solver` trait) - The numerical method
//!    - Applies the numerical scheme
//!    - Returns the trajectory
//!    - Independent of epidemiology
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌─────────────────┐   ┌──────────────┐
//! │ Parameter Set   │   │  Time Grid   │
//! └────────┬────────┘   └──────┬───────┘
//!          │                   │
//! ┌────────▼────────┐ ┌────────▼─────────────┐
//! │ Scenario        │ │ Solver Configuration │
//! │ (model + y0)    │ │ (grid + stepping)    │
//! └────────┬────────┘ └────────┬─────────────┘
//!          └─────────┬─────────┘
//!           ┌────────▼────────┐
//!           │ Solver          │  Euler, RK4, Dormand-Prince
//!           └────────┬────────┘
//!           ┌────────▼──────────┐
//!           │ Trajectory Result │  t, S, I, R, total
//!           └───────────────────┘
//! ```
//!
//! # Quick Start Example
//!
//! ```rust
//! use sir_rs::epidemic::BasicParameters;
//! use sir_rs::models::ModelVariant;
//! use sir_rs::solver::{RK4Solver, Scenario, Solver, SolverConfiguration, TimeGrid};
//!
//! let params = BasicParameters::new(1000.0, 990.0, 10.0, 0.0, 50.0, 5.0)?;
//! let scenario = Scenario::from_variant(ModelVariant::Basic(params));
//!
//! let grid = TimeGrid::linspace(365.0, 365)?;
//! let config = SolverConfiguration::fixed_step(grid, 4);
//!
//! let result = RK4Solver::new().solve(&scenario, &config)?;
//! assert_eq!(result.len(), 365);
//! # Ok::<(), sir_rs::SimulationError>(())
//! ```
//!
//! # Error Handling
//!
//! A run either returns a complete [`TrajectoryResult`] or fails:
//!
//! - Invalid configuration or scenario → `InvalidParameter`
//! - Step control not supported by the solver → `UnsupportedConfiguration`
//! - NaN/Inf values or compartments below `-tolerance * N` → `IntegrationDiverged`
//!
//! Divergence is never retried automatically. Callers may retry with more
//! sub-steps or the adaptive solver.

// =================================================================================================
// Module Declarations
// =================================================================================================

mod grid;
mod methods;
mod scenario;
mod traits;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use grid::TimeGrid;
pub use methods::{DormandPrinceSolver, EulerSolver, RK4Solver};
pub use scenario::Scenario;
pub use traits::{
    DEFAULT_NEGATIVITY_TOLERANCE, DEFAULT_SUBSTEPS, Solver, SolverConfiguration, StepControl,
    TrajectoryResult,
};

// =================================================================================================
// Helper Functions
// =================================================================================================

use crate::epidemic::CompartmentState;
use crate::error::{Result, SimulationError};

/// Validate a produced state for numerical issues
///
/// Fails when a compartment is NaN or infinite, or lower than
/// `-tolerance * population`.
///
/// # Arguments
///
/// * `state` - State to validate
/// * `step` - Index of the output grid point (for error reporting)
/// * `time` - Time of that grid point
pub(crate) fn validate_state(
    state: &CompartmentState,
    step: usize,
    time: f64,
    population: f64,
    tolerance: f64,
) -> Result<()> {
    let floor = -tolerance * population;
    if state.is_finite() && state.min_component() >= floor {
        return Ok(());
    }

    // Name the first offending compartment
    for (index, value) in state.to_array().into_iter().enumerate() {
        let compartment = CompartmentState::compartment_name(index);

        if value.is_nan() {
            return Err(SimulationError::diverged(
                step,
                time,
                format!(
                    "NaN detected in {compartment}. Try more sub-steps or the adaptive solver."
                ),
            ));
        }

        if value.is_infinite() {
            return Err(SimulationError::diverged(
                step,
                time,
                format!("infinity detected in {compartment} (numerical overflow)"),
            ));
        }

        if value < floor {
            return Err(SimulationError::diverged(
                step,
                time,
                format!("{compartment} became negative ({value}), below the tolerance of {floor}"),
            ));
        }
    }

    Ok(())
}

/// Extract the fixed sub-step count or reject the configuration
pub(crate) fn fixed_substeps(config: &SolverConfiguration, solver: &str) -> Result<usize> {
    match &config.step_control {
        StepControl::Fixed { substeps } => Ok(*substeps),
        other => Err(SimulationError::UnsupportedConfiguration(format!(
            "{solver} only supports Fixed step control, got {}",
            other.name()
        ))),
    }
}

// =================================================================================================
// Tests
// =================================================================================================
