//! Forward Euler numerical solver
//!
//! # Mathematical Background
//!
//! The Forward Euler method is the simplest explicit scheme for
//! `dy/dt = f(y)`:
//!
//! ```text
//! yₙ₊₁ = yₙ + dt · f(yₙ)
//! ```
//!
//! Between two consecutive output points `t_k` and `t_{k+1}` the solver
//! takes `substeps` equal steps of `dt = (t_{k+1} - t_k) / substeps`.
//!
//! # Characteristics
//!
//! - **Order**: First-order accurate (global error ~ O(dt))
//! - **Complexity**: 1 function evaluation per step
//!
//! Mostly useful as a reference for convergence tests. Prefer
//! [`RK4Solver`](crate::solver::RK4Solver) for actual simulations.

use log::debug;

use crate::error::Result;
use crate::solver::{
    Scenario, Solver, SolverConfiguration, TrajectoryResult, fixed_substeps, validate_state,
};

/// Forward Euler solver
///
/// # Example
///
/// ```rust
/// use sir_rs::epidemic::BasicParameters;
/// use sir_rs::models::ModelVariant;
/// use sir_rs::solver::{EulerSolver, Scenario, Solver, SolverConfiguration, TimeGrid};
///
/// let params = BasicParameters::new(1000.0, 990.0, 10.0, 0.0, 50.0, 5.0)?;
/// let scenario = Scenario::from_variant(ModelVariant::Basic(params));
///
/// // Euler needs many more sub-steps than RK4 for the same accuracy
/// let config = SolverConfiguration::fixed_step(TimeGrid::linspace(365.0, 365)?, 100);
/// let result = EulerSolver::new().solve(&scenario, &config)?;
///
/// assert_eq!(result.metadata("function evaluations"), Some("36400"));
/// # Ok::<(), sir_rs::SimulationError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerSolver;

impl EulerSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Solver for EulerSolver {
    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> Result<TrajectoryResult> {
        // ====== Step 1: Validation ======

        config.validate()?;
        scenario.validate()?;
        let substeps = fixed_substeps(config, self.name())?;

        // ====== Step 2: Setup ======

        let grid = &config.time_grid;
        let population = scenario.population();
        let tolerance = config.negativity_tolerance;

        debug!(
            "Euler: {} on {} points, {} sub-steps per interval",
            scenario.model_name(),
            grid.len(),
            substeps
        );

        let mut state = scenario.initial;
        let mut states = Vec::with_capacity(grid.len());
        states.push(state);

        // ====== Step 3: Time Integration ======

        for (step, (t_start, t_end)) in grid.intervals().enumerate() {
            let dt = (t_end - t_start) / substeps as f64;

            for _ in 0..substeps {
                let rate = scenario.model.derivative(&state);
                state = state + rate * dt;
            }

            validate_state(&state, step + 1, t_end, population, tolerance)?;
            states.push(state);
        }

        // ====== Step 4: Build Result ======

        let intervals = grid.len() - 1;
        let mut result = TrajectoryResult::new(grid.points().to_vec(), &states);

        result.add_metadata("solver", "Forward Euler");
        result.add_metadata("substeps", &substeps.to_string());
        result.add_metadata("function evaluations", &(intervals * substeps).to_string());

        debug!("Euler: done, {} function evaluations", intervals * substeps);

        Ok(result)
    }

    fn name(&self) -> &str {
        "Forward Euler"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
