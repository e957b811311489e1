//! Dormand-Prince 5(4) adaptive solver
//!
//! # Mathematical Background
//!
//! An explicit embedded Runge-Kutta pair: seven stages produce a fifth-order
//! solution (used to advance) and a fourth-order one (used only for the
//! local error estimate). The last stage is evaluated at the new point and
//! reused as the first stage of the next step (FSAL).
//!
//! The scaled RMS error of a step is
//!
//! ```text
//! err = sqrt( 1/3 · Σ (eᵢ / (atol + rtol · max(|yᵢ|, |ŷᵢ|)))² )
//! ```
//!
//! A step is accepted when `err ≤ 1`. The next step size is scaled by
//! `0.9 · err^(-1/5)`, clamped to `[0.2, 5]`.
//!
//! Steps never cross an output grid point: each interval is integrated on
//! its own, carrying the step size and FSAL slope over to the next one.

use log::{debug, trace, warn};

use crate::epidemic::CompartmentState;
use crate::error::{Result, SimulationError};
use crate::solver::{
    Scenario, Solver, SolverConfiguration, StepControl, TrajectoryResult, validate_state,
};

// Butcher tableau
const A21: f64 = 1.0 / 5.0;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

// Fifth-order weights (advancing solution)
const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

// Fifth minus fourth order weights
const E1: f64 = B1 - 5179.0 / 57600.0;
const E3: f64 = B3 - 7571.0 / 16695.0;
const E4: f64 = B4 - 393.0 / 640.0;
const E5: f64 = B5 - -92097.0 / 339200.0;
const E6: f64 = B6 - 187.0 / 2100.0;
const E7: f64 = -1.0 / 40.0;

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 5.0;

/// Smallest step size relative to the grid span
const MIN_STEP_FRACTION: f64 = 1e-12;

/// Adaptive Dormand-Prince 5(4) solver
///
/// Requires [`StepControl::Adaptive`].
///
/// # Example
///
/// ```rust
/// use sir_rs::epidemic::BasicParameters;
/// use sir_rs::models::ModelVariant;
/// use sir_rs::solver::{DormandPrinceSolver, Scenario, Solver, SolverConfiguration, TimeGrid};
///
/// let params = BasicParameters::new(1000.0, 990.0, 10.0, 0.0, 50.0, 5.0)?;
/// let scenario = Scenario::from_variant(ModelVariant::Basic(params));
/// let config = SolverConfiguration::adaptive(TimeGrid::linspace(365.0, 365)?, 1e-8, 1e-8);
///
/// let result = DormandPrinceSolver::new().solve(&scenario, &config)?;
/// assert_eq!(result.len(), 365);
/// assert!(result.metadata("accepted steps").is_some());
/// # Ok::<(), sir_rs::SimulationError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DormandPrinceSolver;

/// Integration counters
#[derive(Debug, Default)]
struct StepStats {
    accepted: usize,
    rejected: usize,
    evaluations: usize,
}

/// One trial step: the fifth-order candidate, its FSAL slope and scaled error
struct Trial {
    state: CompartmentState,
    slope: CompartmentState,
    error: f64,
}

impl DormandPrinceSolver {
    pub fn new() -> Self {
        Self
    }

    fn trial(
        scenario: &Scenario,
        y: &CompartmentState,
        k1: &CompartmentState,
        h: f64,
        rtol: f64,
        atol: f64,
    ) -> Trial {
        let model = &scenario.model;
        let (y, k1) = (*y, *k1);

        let k2 = model.derivative(&(y + k1 * (h * A21)));
        let k3 = model.derivative(&(y + (k1 * A31 + k2 * A32) * h));
        let k4 = model.derivative(&(y + (k1 * A41 + k2 * A42 + k3 * A43) * h));
        let k5 = model.derivative(&(y + (k1 * A51 + k2 * A52 + k3 * A53 + k4 * A54) * h));
        let k6 = model.derivative(
            &(y + (k1 * A61 + k2 * A62 + k3 * A63 + k4 * A64 + k5 * A65) * h),
        );

        let candidate = y + (k1 * B1 + k3 * B3 + k4 * B4 + k5 * B5 + k6 * B6) * h;
        let k7 = model.derivative(&candidate);

        let error = (k1 * E1 + k3 * E3 + k4 * E4 + k5 * E5 + k6 * E6 + k7 * E7) * h;

        let sum: f64 = error
            .to_array()
            .iter()
            .zip(y.to_array().iter().zip(candidate.to_array().iter()))
            .map(|(e, (old, new))| {
                let scale = atol + rtol * old.abs().max(new.abs());
                (e / scale).powi(2)
            })
            .sum();

        Trial {
            state: candidate,
            slope: k7,
            error: (sum / 3.0).sqrt(),
        }
    }
}

impl Solver for DormandPrinceSolver {
    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> Result<TrajectoryResult> {
        // ====== Step 1: Validation ======

        config.validate()?;
        scenario.validate()?;

        let (rtol, atol, max_steps) = match &config.step_control {
            StepControl::Adaptive {
                rtol,
                atol,
                max_steps,
            } => (*rtol, *atol, *max_steps),
            other => {
                return Err(SimulationError::UnsupportedConfiguration(format!(
                    "{} only supports Adaptive step control, got {}",
                    self.name(),
                    other.name()
                )));
            }
        };

        // ====== Step 2: Setup ======

        let grid = &config.time_grid;
        let population = scenario.population();
        let tolerance = config.negativity_tolerance;
        let h_min = grid.span() * MIN_STEP_FRACTION;

        debug!(
            "Dormand-Prince: {} on {} points, rtol = {rtol:e}, atol = {atol:e}",
            scenario.model_name(),
            grid.len()
        );

        let mut y = scenario.initial;
        let mut k1 = scenario.model.derivative(&y);
        let mut stats = StepStats {
            evaluations: 1,
            ..StepStats::default()
        };
        let mut h = (grid.span() * 1e-3).max(h_min);

        let mut states = Vec::with_capacity(grid.len());
        states.push(y);

        // ====== Step 3: Time Integration ======

        for (step, (t_start, t_end)) in grid.intervals().enumerate() {
            let mut t = t_start;
            let mut attempts = 0;

            while t < t_end {
                if attempts == max_steps {
                    warn!("Dormand-Prince: step budget exhausted at t = {t}");
                    return Err(SimulationError::diverged(
                        step + 1,
                        t_end,
                        format!(
                            "exceeded {max_steps} steps before reaching t = {t_end} (stopped at t = {t})"
                        ),
                    ));
                }
                attempts += 1;

                let remaining = t_end - t;
                let last = h >= remaining;
                let h_step = if last { remaining } else { h };

                let trial = Self::trial(scenario, &y, &k1, h_step, rtol, atol);
                stats.evaluations += 6;

                // A non-finite estimate is an overflowing step, not a verdict on the run
                let finite = trial.error.is_finite();
                let factor = if !finite {
                    MIN_FACTOR
                } else if trial.error == 0.0 {
                    MAX_FACTOR
                } else {
                    (SAFETY * trial.error.powf(-0.2)).clamp(MIN_FACTOR, MAX_FACTOR)
                };

                if finite && trial.error <= 1.0 {
                    t = if last { t_end } else { t + h_step };
                    y = trial.state;
                    k1 = trial.slope;
                    stats.accepted += 1;
                    trace!("Dormand-Prince: accepted h = {h_step:e}, t = {t}");

                    // A shortened final step says nothing about the usable step size
                    if !last || factor < 1.0 {
                        h = h_step * factor;
                    }
                } else {
                    stats.rejected += 1;
                    trace!(
                        "Dormand-Prince: rejected h = {h_step:e} at t = {t} (error {:.3})",
                        trial.error
                    );

                    if h_step <= h_min {
                        warn!("Dormand-Prince: step size underflow at t = {t}");
                        let reason = if finite {
                            format!("step size fell below the minimum of {h_min:e}")
                        } else {
                            format!(
                                "non-finite error estimate (NaN or infinity in the derivative) \
                                 down to the minimum step of {h_min:e}"
                            )
                        };
                        return Err(SimulationError::diverged(step + 1, t, reason));
                    }
                    h = h_step * factor;
                }

                h = h.max(h_min);
            }

            validate_state(&y, step + 1, t_end, population, tolerance)?;
            states.push(y);
        }

        // ====== Step 4: Build Result ======

        debug!(
            "Dormand-Prince: {} accepted, {} rejected, {} evaluations",
            stats.accepted, stats.rejected, stats.evaluations
        );

        let mut result = TrajectoryResult::new(grid.points().to_vec(), &states);

        result.add_metadata("solver", "Dormand-Prince 5(4)");
        result.add_metadata("rtol", &rtol.to_string());
        result.add_metadata("atol", &atol.to_string());
        result.add_metadata("accepted steps", &stats.accepted.to_string());
        result.add_metadata("rejected steps", &stats.rejected.to_string());
        result.add_metadata("function evaluations", &stats.evaluations.to_string());

        Ok(result)
    }

    fn name(&self) -> &str {
        "Dormand-Prince"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
