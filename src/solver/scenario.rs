//! Simulation scenario definition
//!
//! A scenario combines an epidemic model with its initial condition.

use crate::epidemic::parameters::check_population_balance;
use crate::epidemic::{CompartmentState, EpidemicModel};
use crate::error::Result;
use crate::models::ModelVariant;

/// Simulation scenario
///
/// Defines a specific case to simulate:
/// - Epidemic model (equations)
/// - Initial compartment state
///
/// # Design
///
/// The same scenario can be solved with different numerical methods.
/// This is the "WHAT to solve" (not "HOW to solve").
///
/// # Examples
///
/// ```rust
/// use sir_rs::epidemic::BasicParameters;
/// use sir_rs::models::BasicSir;
/// use sir_rs::solver::Scenario;
///
/// let params = BasicParameters::new(1000.0, 990.0, 10.0, 0.0, 50.0, 5.0)?;
/// let scenario = Scenario::new(Box::new(BasicSir::new(params)));
///
/// assert_eq!(scenario.model_name(), "Basic SIR");
/// assert!(scenario.validate().is_ok());
/// # Ok::<(), sir_rs::SimulationError>(())
/// ```
pub struct Scenario {
    /// Epidemic model (equations)
    pub model: Box<dyn EpidemicModel>,

    /// State at the first grid point
    pub initial: CompartmentState,
}

impl Scenario {
    /// Create a scenario starting from the model's own initial state
    pub fn new(model: Box<dyn EpidemicModel>) -> Self {
        let initial = model.initial_state();
        Self { model, initial }
    }

    /// Create a scenario from a model variant
    pub fn from_variant(variant: ModelVariant) -> Self {
        Self::new(variant.into_model())
    }

    /// Override the initial state
    pub fn with_initial_state(mut self, initial: CompartmentState) -> Self {
        self.initial = initial;
        self
    }

    /// Check the initial state against the model population
    pub fn validate(&self) -> Result<()> {
        check_population_balance(self.model.population(), &self.initial)
    }

    /// Get model name
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn population(&self) -> f64 {
        self.model.population()
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("model", &self.model_name())
            .field("population", &self.population())
            .field("initial", &self.initial)
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================
