//! Batch execution of independent scenarios
//!
//! A sweep solves many scenarios (typically one per parameter set) with the
//! same solver and configuration. Runs share nothing mutable, so with the
//! `parallel` feature they are dispatched on the Rayon thread pool once the
//! batch is large enough.
//!
//! # Example
//!
//! ```rust
//! use sir_rs::epidemic::BasicParameters;
//! use sir_rs::solver::{RK4Solver, Scenario, SolverConfiguration, TimeGrid};
//! use sir_rs::sweep::run_sweep;
//!
//! let scenarios: Vec<Scenario> = [20.0, 50.0, 80.0]
//!     .into_iter()
//!     .map(|beta| BasicParameters::new(1000.0, 990.0, 10.0, 0.0, beta, 5.0))
//!     .map(|params| params.map(|p| Scenario::from_variant(p.into())))
//!     .collect::<Result<_, _>>()?;
//!
//! let config = SolverConfiguration::fixed_step(TimeGrid::linspace(365.0, 365)?, 4);
//! let results = run_sweep(&scenarios, &RK4Solver::new(), &config);
//!
//! assert_eq!(results.len(), 3);
//! assert!(results.iter().all(|r| r.is_ok()));
//! # Ok::<(), sir_rs::SimulationError>(())
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use log::info;

use crate::error::Result;
use crate::solver::{Scenario, Solver, SolverConfiguration, TrajectoryResult};

// =================================================================================================
// Parallel threshold
// =================================================================================================

/// Default number of scenarios from which a sweep runs in parallel
///
/// A single 365-point RK4 run costs a few thousand derivative evaluations,
/// so a handful of scenarios is enough to pay for the thread-pool dispatch.
const DEFAULT_PARALLEL_THRESHOLD: usize = 8;

static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Current batch size from which [`run_sweep`] uses Rayon
///
/// Only meaningful with the `parallel` feature.
///
/// ```rust
/// use sir_rs::sweep::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Change the parallel threshold
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// ```rust
/// use sir_rs::sweep::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(64);
/// assert_eq!(parallel_threshold(), 64);
///
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// Restores the previous threshold on drop
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
}

#[cfg(test)]
impl ThresholdGuard {
    pub(crate) fn save(new_value: usize) -> Self {
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Sweep
// =================================================================================================

/// Solve every scenario with the same solver and configuration
///
/// Results come back in the order of `scenarios`. A failing run does not
/// stop the others.
pub fn run_sweep(
    scenarios: &[Scenario],
    solver: &dyn Solver,
    config: &SolverConfiguration,
) -> Vec<Result<TrajectoryResult>> {
    let solve = |scenario: &Scenario| solver.solve(scenario, config);

    #[cfg(feature = "parallel")]
    let results: Vec<Result<TrajectoryResult>> = if scenarios.len() >= parallel_threshold() {
        use rayon::prelude::*;

        info!(
            "sweep: {} scenarios with {} on the rayon pool",
            scenarios.len(),
            solver.name()
        );
        scenarios.par_iter().map(solve).collect()
    } else {
        info!("sweep: {} scenarios with {}", scenarios.len(), solver.name());
        scenarios.iter().map(solve).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let results: Vec<Result<TrajectoryResult>> = {
        info!("sweep: {} scenarios with {}", scenarios.len(), solver.name());
        scenarios.iter().map(solve).collect()
    };

    let failures = results.iter().filter(|r| r.is_err()).count();
    if failures > 0 {
        info!("sweep: {failures} of {} runs failed", results.len());
    }

    results
}

// =================================================================================================
// Tests
// =================================================================================================
