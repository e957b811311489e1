//! Helper functions for integration tests

#![allow(dead_code)]

use sir_rs::epidemic::{BasicParameters, EpidemicModel, VitalParameters};
use sir_rs::models::ModelVariant;
use sir_rs::solver::{Scenario, TimeGrid, TrajectoryResult};

/// Relative error with an absolute floor, so values near zero don't blow up
pub fn relative_error(computed: f64, reference: f64, floor: f64) -> f64 {
    (computed - reference).abs() / reference.abs().max(floor)
}

/// Assert that two trajectories agree on every compartment at every point
pub fn assert_trajectories_close(
    computed: &TrajectoryResult,
    reference: &TrajectoryResult,
    tolerance: f64,
    floor: f64,
    message: &str,
) {
    assert_eq!(computed.len(), reference.len(), "{}: length mismatch", message);

    let columns = [
        ("S", &computed.susceptible, &reference.susceptible),
        ("I", &computed.infected, &reference.infected),
        ("R", &computed.recovered, &reference.recovered),
    ];

    for (name, lhs, rhs) in columns {
        for (i, (&a, &b)) in lhs.iter().zip(rhs.iter()).enumerate() {
            let err = relative_error(a, b, floor);
            assert!(
                err < tolerance,
                "{}: {} at t = {} differs by {:e} (tolerance {:e})",
                message,
                name,
                computed.time[i],
                err,
                tolerance
            );
        }
    }
}

/// Wrap a model into a scenario starting from its own initial state
pub fn create_simple_scenario(model: Box<dyn EpidemicModel>) -> Scenario {
    Scenario::new(model)
}

/// 365 evenly spaced samples from t = 0 to t = 365
pub fn daily_grid() -> TimeGrid {
    TimeGrid::linspace(365.0, 365).unwrap()
}

/// N = 1000, 10 initial cases, β = 50, γ = 5
pub fn basic_parameters(beta: f64, gamma: f64) -> BasicParameters {
    BasicParameters::new(1000.0, 990.0, 10.0, 0.0, beta, gamma).unwrap()
}

pub fn basic_reference() -> Scenario {
    Scenario::from_variant(ModelVariant::Basic(basic_parameters(50.0, 5.0)))
}

/// Reference outbreak plus μ = 10, ρ = 0.3, ω = 0.5
pub fn advanced_reference() -> Scenario {
    let params = VitalParameters::new(basic_parameters(50.0, 5.0), 10.0, 0.3, 0.5).unwrap();
    Scenario::from_variant(ModelVariant::Advanced(params))
}
