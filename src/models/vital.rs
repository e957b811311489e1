//! S-I-R model with vital dynamics, disease mortality and waning immunity
//!
//! ```text
//! dS/dt = -β (S/N)(I/N) + μ - μ (S/N) + ω (R/N)
//! dI/dt =  β (S/N)(I/N) - γ (I/N) - μ (I/N) - m (I/N)
//! dR/dt =  γ (I/N) - μ (R/N) - ω (R/N)
//! ```
//!
//! - `μ` alone is the birth inflow. It enters only the susceptible
//!   compartment and is not scaled by any fraction.
//! - `μ (X/N)` is natural death, proportional to each compartment.
//! - `m (I/N)` is disease-induced death. It leaves the system entirely.
//! - `ω (R/N)` moves recovered individuals back to susceptible.
//!
//! The total changes at rate `μ (1 - (S+I+R)/N) - m (I/N)`: births balance
//! natural deaths only while the total equals N, and disease deaths remove
//! mass whenever `I > 0`.

use crate::epidemic::{CompartmentState, EpidemicModel, VitalParameters};

/// Advanced S-I-R model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VitalDynamicsSir {
    params: VitalParameters,
}

impl VitalDynamicsSir {
    pub fn new(params: VitalParameters) -> Self {
        Self { params }
    }

    pub fn parameters(&self) -> &VitalParameters {
        &self.params
    }
}

impl EpidemicModel for VitalDynamicsSir {
    fn derivative(&self, state: &CompartmentState) -> CompartmentState {
        let p = &self.params;
        let n = p.population();
        let s = state.susceptible() / n;
        let i = state.infected() / n;
        let r = state.recovered() / n;

        let infection = p.beta() * s * i;
        let recovery = p.gamma() * i;
        let waning = p.omega() * r;
        let births = p.mu();

        let ds = -infection + births - p.mu() * s + waning;
        let di = infection - recovery - p.mu() * i - p.disease_mortality() * i;
        let dr = recovery - p.mu() * r - waning;

        CompartmentState::new(ds, di, dr)
    }

    fn initial_state(&self) -> CompartmentState {
        self.params.initial_state()
    }

    fn population(&self) -> f64 {
        self.params.population()
    }

    fn name(&self) -> &str {
        "SIR with vital dynamics"
    }

    fn description(&self) -> Option<&str> {
        Some("births and natural deaths, disease mortality, waning immunity")
    }
}
