//! Mock epidemic models for testing
//!
//! Most of these have closed-form solutions, which makes them a good
//! yardstick for solver accuracy.

#![allow(dead_code)]

use sir_rs::epidemic::{CompartmentState, EpidemicModel};

// =================================================================================================
// Recovery only: dI/dt = -k*I, dR/dt = k*I
// =================================================================================================

/// No transmission, infected recover at rate k
///
/// Analytical solution: I(t) = I₀ * exp(-k*t), R(t) = I₀ - I(t)
pub struct RecoveryOnly {
    pub population: f64,
    pub infected: f64,
    pub rate: f64,
}

impl RecoveryOnly {
    pub fn new(population: f64, infected: f64, rate: f64) -> Self {
        Self {
            population,
            infected,
            rate,
        }
    }

    pub fn analytical_solution(&self, t: f64) -> CompartmentState {
        let infected = self.infected * (-self.rate * t).exp();
        CompartmentState::new(
            self.population - self.infected,
            infected,
            self.infected - infected,
        )
    }
}

impl EpidemicModel for RecoveryOnly {
    fn derivative(&self, state: &CompartmentState) -> CompartmentState {
        let flow = self.rate * state.infected();
        CompartmentState::new(0.0, -flow, flow)
    }

    fn initial_state(&self) -> CompartmentState {
        CompartmentState::new(self.population - self.infected, self.infected, 0.0)
    }

    fn population(&self) -> f64 {
        self.population
    }

    fn name(&self) -> &str {
        "Recovery only"
    }
}

// =================================================================================================
// Logistic infection (S-I without recovery), unit population
// =================================================================================================

/// dI/dt = β*S*I with S + I = 1
///
/// Analytical solution: I(t) = 1 / (1 + (1/I₀ - 1) * exp(-β*t))
pub struct LogisticInfection {
    pub beta: f64,
    pub infected: f64,
}

impl LogisticInfection {
    pub fn new(beta: f64, infected: f64) -> Self {
        Self { beta, infected }
    }

    pub fn analytical_solution(&self, t: f64) -> CompartmentState {
        let infected = 1.0 / (1.0 + (1.0 / self.infected - 1.0) * (-self.beta * t).exp());
        CompartmentState::new(1.0 - infected, infected, 0.0)
    }
}

impl EpidemicModel for LogisticInfection {
    fn derivative(&self, state: &CompartmentState) -> CompartmentState {
        let flow = self.beta * state.susceptible() * state.infected();
        CompartmentState::new(-flow, flow, 0.0)
    }

    fn initial_state(&self) -> CompartmentState {
        CompartmentState::new(1.0 - self.infected, self.infected, 0.0)
    }

    fn population(&self) -> f64 {
        1.0
    }

    fn name(&self) -> &str {
        "Logistic infection"
    }
}

// =================================================================================================
// Constant drain: dI/dt = -c, dR/dt = c
// =================================================================================================

/// Infected leave at a constant rate, so I crosses zero at t = I₀ / c
///
/// Every explicit method is exact here, which pins down the moment the
/// negativity check fires.
pub struct ConstantDrain {
    pub infected: f64,
    pub rate: f64,
}

impl ConstantDrain {
    pub fn new(infected: f64, rate: f64) -> Self {
        Self { infected, rate }
    }
}

impl EpidemicModel for ConstantDrain {
    fn derivative(&self, _state: &CompartmentState) -> CompartmentState {
        CompartmentState::new(0.0, -self.rate, self.rate)
    }

    fn initial_state(&self) -> CompartmentState {
        CompartmentState::new(0.0, self.infected, 0.0)
    }

    fn population(&self) -> f64 {
        self.infected
    }

    fn name(&self) -> &str {
        "Constant drain"
    }
}

// =================================================================================================
// Poisoned rates
// =================================================================================================

/// Rates turn to NaN once I exceeds a threshold
pub struct PoisonedRates {
    pub threshold: f64,
}

impl EpidemicModel for PoisonedRates {
    fn derivative(&self, state: &CompartmentState) -> CompartmentState {
        if state.infected() > self.threshold {
            CompartmentState::new(f64::NAN, f64::NAN, f64::NAN)
        } else {
            CompartmentState::new(-1.0, 1.0, 0.0)
        }
    }

    fn initial_state(&self) -> CompartmentState {
        CompartmentState::new(10.0, 0.0, 0.0)
    }

    fn population(&self) -> f64 {
        10.0
    }

    fn name(&self) -> &str {
        "Poisoned rates"
    }
}
