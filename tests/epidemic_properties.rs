//! Qualitative properties of the reference scenarios
//!
//! Basic outbreak: N = 1000, S₀ = 990, I₀ = 10, β = 50, γ = 5.
//! Advanced outbreak adds μ = 10, ρ = 0.3, ω = 0.5.

use approx::assert_relative_eq;

use sir_rs::epidemic::{BasicParameters, CompartmentState, VitalParameters};
use sir_rs::models::ModelVariant;
use sir_rs::prelude::*;
use sir_rs::SimulationError;

mod common;
use common::{
    ConstantDrain, PoisonedRates, RecoveryOnly, advanced_reference, basic_reference,
    create_simple_scenario, daily_grid,
};

fn solve_daily(scenario: &Scenario) -> TrajectoryResult {
    RK4Solver::new()
        .solve(scenario, &SolverConfiguration::fixed_step(daily_grid(), 4))
        .unwrap()
}

fn vital(mu: f64, infected: f64) -> Scenario {
    let basic =
        BasicParameters::new(1000.0, 1000.0 - infected, infected, 0.0, 50.0, 5.0).unwrap();
    let params = VitalParameters::new(basic, mu, 0.3, 0.5).unwrap();
    Scenario::from_variant(ModelVariant::Advanced(params))
}

// =================================================================================================
// Basic model
// =================================================================================================

#[test]
fn test_basic_conserves_population() {
    let result = solve_daily(&basic_reference());

    assert_eq!(result.len(), 365);
    for &total in &result.total {
        assert!((total - 1000.0).abs() < 1e-6, "total drifted to {}", total);
    }
}

#[test]
fn test_basic_susceptible_falls_and_recovered_rises() {
    let result = solve_daily(&basic_reference());

    for i in 1..result.len() {
        assert!(result.susceptible[i] < result.susceptible[i - 1]);
        assert!(result.recovered[i] > result.recovered[i - 1]);
    }
}

#[test]
fn test_basic_infected_peaks_inside_horizon() {
    let result = solve_daily(&basic_reference());
    let (t_peak, peak) = result.peak_infected().unwrap();

    assert!(t_peak > 0.0 && t_peak < 365.0, "peak at t = {}", t_peak);
    assert!(t_peak > 100.0 && t_peak < 200.0);
    assert!(peak > result.infected[0]);
    assert!(*result.infected.last().unwrap() < peak);

    // Infected grows until the peak, then declines
    let peak_index = result.infected.iter().position(|&i| i == peak).unwrap();
    for i in 1..=peak_index {
        assert!(result.infected[i] >= result.infected[i - 1]);
    }
    for i in peak_index + 1..result.len() {
        assert!(result.infected[i] <= result.infected[i - 1]);
    }
}

#[test]
fn test_basic_no_outbreak_below_threshold() {
    // β·S₀/N < γ: I never grows
    let params = BasicParameters::new(1000.0, 990.0, 10.0, 0.0, 4.0, 5.0).unwrap();
    let result = solve_daily(&Scenario::from_variant(params.into()));

    for i in 1..result.len() {
        assert!(result.infected[i] <= result.infected[i - 1]);
    }
}

#[test]
fn test_basic_without_infection_stays_put() {
    let params = BasicParameters::new(1000.0, 1000.0, 0.0, 0.0, 50.0, 5.0).unwrap();
    let result = solve_daily(&Scenario::from_variant(params.into()));

    for i in 0..result.len() {
        assert_eq!(result.susceptible[i], 1000.0);
        assert_eq!(result.infected[i], 0.0);
        assert_eq!(result.recovered[i], 0.0);
    }
}

// =================================================================================================
// Advanced model
// =================================================================================================

#[test]
fn test_advanced_mortality_rate() {
    let basic = BasicParameters::new(1000.0, 990.0, 10.0, 0.0, 50.0, 5.0).unwrap();
    let params = VitalParameters::new(basic, 10.0, 0.3, 0.5).unwrap();

    assert_relative_eq!(params.disease_mortality(), 6.428571428571429, epsilon = 1e-9);
}

#[test]
fn test_advanced_population_never_exceeds_initial() {
    let result = solve_daily(&advanced_reference());

    for &total in &result.total {
        assert!(total <= 1000.0 + 1e-6, "total rose to {}", total);
    }
    assert!(*result.total.last().unwrap() < 1000.0);
}

#[test]
fn test_advanced_population_shrinks_during_epidemic() {
    let result = solve_daily(&advanced_reference());

    for i in 1..=300 {
        assert!(
            result.total[i] < result.total[i - 1],
            "total grew at t = {}",
            result.time[i]
        );
    }
}

#[test]
fn test_advanced_without_births_only_loses_people() {
    let result = solve_daily(&vital(0.0, 10.0));

    for i in 1..result.len() {
        assert!(result.total[i] < result.total[i - 1]);
    }
}

#[test]
fn test_advanced_disease_free_equilibrium() {
    let result = solve_daily(&vital(10.0, 0.0));

    for state in (0..result.len()).filter_map(|i| result.state_at(i)) {
        assert_relative_eq!(state.susceptible(), 1000.0, epsilon = 1e-9);
        assert_relative_eq!(state.infected(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(state.recovered(), 0.0, epsilon = 1e-12);
    }
}

#[test]
fn test_advanced_compartments_stay_non_negative() {
    let result = solve_daily(&advanced_reference());

    for state in (0..result.len()).filter_map(|i| result.state_at(i)) {
        assert!(state.min_component() >= -1e-6, "{}", state);
    }
}

// =================================================================================================
// Failure handling
// =================================================================================================

#[test]
fn test_negative_compartment_aborts_run() {
    // I = 1 drained at rate 1: crosses zero at t = 1
    let scenario = create_simple_scenario(Box::new(ConstantDrain::new(1.0, 1.0)));
    let config = SolverConfiguration::fixed_step(TimeGrid::linspace(4.0, 9).unwrap(), 1);

    for solver in [
        Box::new(EulerSolver::new()) as Box<dyn Solver>,
        Box::new(RK4Solver::new()),
    ] {
        match solver.solve(&scenario, &config) {
            Err(SimulationError::IntegrationDiverged { step, time, reason }) => {
                assert_eq!(step, 3, "{}", solver.name());
                assert_relative_eq!(time, 1.5);
                assert!(reason.contains("infected"), "{}", reason);
            }
            other => panic!("{}: expected divergence, got {:?}", solver.name(), other),
        }
    }
}

#[test]
fn test_nan_rates_abort_run() {
    let scenario = create_simple_scenario(Box::new(PoisonedRates { threshold: 2.0 }));
    let config = SolverConfiguration::fixed_step(TimeGrid::linspace(5.0, 6).unwrap(), 1);

    let err = EulerSolver::new().solve(&scenario, &config).unwrap_err();
    match err {
        SimulationError::IntegrationDiverged { reason, .. } => {
            assert!(reason.contains("NaN"), "{}", reason);
        }
        other => panic!("expected divergence, got {:?}", other),
    }
}

#[test]
fn test_unbalanced_initial_state_is_rejected() {
    let scenario = create_simple_scenario(Box::new(RecoveryOnly::new(100.0, 10.0, 0.5)))
        .with_initial_state(CompartmentState::new(90.0, 20.0, 0.0));
    let config = SolverConfiguration::fixed_step(TimeGrid::linspace(1.0, 2).unwrap(), 1);

    assert!(matches!(
        RK4Solver::new().solve(&scenario, &config),
        Err(SimulationError::InvalidParameter(_))
    ));
}

#[test]
fn test_solvers_leave_scenario_reusable() {
    let scenario = basic_reference();
    let config = SolverConfiguration::fixed_step(daily_grid(), 4);

    let first = RK4Solver::new().solve(&scenario, &config).unwrap();
    let second = RK4Solver::new().solve(&scenario, &config).unwrap();

    assert_eq!(first.infected, second.infected);
    assert_eq!(scenario.initial, CompartmentState::new(990.0, 10.0, 0.0));
}
