//! Epidemic model trait
//!
//! This module defines the seam between epidemiology and numerics:
//! a model supplies `dy/dt = f(y)`, a solver integrates it.

use crate::epidemic::CompartmentState;

/// Trait for compartmental epidemic models
///
/// # Responsibility
///
/// Computes the instantaneous rate of change of every compartment at a
/// given state. Does NOT integrate it (that's the Solver's job).
///
/// # Purity
///
/// `derivative` is called several times per integration step and from
/// several threads during parameter sweeps. Implementations hold only
/// immutable parameters and must not keep mutable state between calls.
///
/// # Example
///
/// ```rust
/// use sir_rs::epidemic::{CompartmentState, EpidemicModel};
///
/// /// Recovery only: dI = -I, dR = I
/// struct RecoveryOnly;
///
/// impl EpidemicModel for RecoveryOnly {
///     fn derivative(&self, state: &CompartmentState) -> CompartmentState {
///         CompartmentState::new(0.0, -state.infected(), state.infected())
///     }
///     fn initial_state(&self) -> CompartmentState {
///         CompartmentState::new(0.0, 1.0, 0.0)
///     }
///     fn population(&self) -> f64 { 1.0 }
///     fn name(&self) -> &str { "Recovery only" }
/// }
///
/// let model = RecoveryOnly;
/// let rate = model.derivative(&model.initial_state());
/// assert_eq!(rate.infected(), -1.0);
/// ```
pub trait EpidemicModel: Send + Sync {
    /// Right-hand side `(dS, dI, dR)` evaluated at `state`
    fn derivative(&self, state: &CompartmentState) -> CompartmentState;

    /// Initial compartment sizes `(S0, I0, R0)`
    fn initial_state(&self) -> CompartmentState;

    /// Reference population N
    ///
    /// Used to scale the negativity tolerance of the integrators.
    fn population(&self) -> f64;

    /// Name of the model (used to display and logging)
    fn name(&self) -> &str;

    /// Description of the model (option)
    fn description(&self) -> Option<&str> {
        None
    }
}
