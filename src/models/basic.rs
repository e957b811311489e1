//! Closed-population S-I-R model
//!
//! No births, no deaths, no loss of immunity. Infection force is the
//! product of the susceptible and infected population *fractions*:
//!
//! ```text
//! dS/dt = -β (S/N) (I/N)
//! dI/dt =  β (S/N) (I/N) - γ (I/N)
//! dR/dt =  γ (I/N)
//! ```
//!
//! Both S and I are divided by N, so the mass-action term is a product of
//! two fractions rather than a single normalisation.
//!
//! The three rates always sum to zero, hence `S + I + R = N` for all time.

use crate::epidemic::{BasicParameters, CompartmentState, EpidemicModel};

/// Basic S-I-R model
///
/// # Example
///
/// ```rust
/// use sir_rs::epidemic::{BasicParameters, EpidemicModel};
/// use sir_rs::models::BasicSir;
///
/// let params = BasicParameters::new(1000.0, 990.0, 10.0, 0.0, 50.0, 5.0)?;
/// let model = BasicSir::new(params);
///
/// let rate = model.derivative(&model.initial_state());
/// assert!(rate.susceptible() < 0.0);
/// assert!(rate.total().abs() < 1e-12);
/// # Ok::<(), sir_rs::SimulationError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasicSir {
    params: BasicParameters,
}

impl BasicSir {
    pub fn new(params: BasicParameters) -> Self {
        Self { params }
    }

    pub fn parameters(&self) -> &BasicParameters {
        &self.params
    }
}

impl EpidemicModel for BasicSir {
    fn derivative(&self, state: &CompartmentState) -> CompartmentState {
        let n = self.params.population();
        let s = state.susceptible() / n;
        let i = state.infected() / n;

        let infection = self.params.beta() * s * i;
        let recovery = self.params.gamma() * i;

        CompartmentState::new(-infection, infection - recovery, recovery)
    }

    fn initial_state(&self) -> CompartmentState {
        self.params.initial_state()
    }

    fn population(&self) -> f64 {
        self.params.population()
    }

    fn name(&self) -> &str {
        "Basic SIR"
    }

    fn description(&self) -> Option<&str> {
        Some("closed population, no vital dynamics, permanent immunity")
    }
}
