//! Epidemic models
//!
//! All models implement the [`EpidemicModel`](crate::epidemic::EpidemicModel) trait.
//! The solver calls `derivative` at each stage of each step. Models are responsible
//! for the epidemiology, the solver for the time integration.
//!
//! # Available Models
//!
//! ## [`BasicSir`]: closed population
//!
//! Transmission and recovery only. `S + I + R` stays equal to N.
//!
//! ## [`VitalDynamicsSir`]: births and deaths
//!
//! Adds a birth inflow, natural death from every compartment, disease-induced
//! death from the infected compartment and loss of immunity. Disease deaths
//! remove population from the system.
//!
//! # Selecting a variant
//!
//! [`ModelVariant`] is the tagged choice between the two, as read from a
//! configuration file:
//!
//! ```rust
//! use sir_rs::models::ModelVariant;
//!
//! let variant: ModelVariant = toml::from_str(r#"
//!     variant = "basic"
//!     population = 1000.0
//!     susceptible = 990.0
//!     infected = 10.0
//!     recovered = 0.0
//!     beta = 50.0
//!     gamma = 5.0
//! "#).unwrap();
//!
//! let model = variant.into_model();
//! assert_eq!(model.name(), "Basic SIR");
//! ```

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod basic;
pub mod vital;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use basic::BasicSir;
pub use vital::VitalDynamicsSir;

use serde::{Deserialize, Serialize};

use crate::epidemic::{BasicParameters, CompartmentState, EpidemicModel, VitalParameters};

/// Model variant selected by the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum ModelVariant {
    /// No births, deaths or waning immunity
    Basic(BasicParameters),

    /// Vital dynamics, disease mortality and waning immunity
    Advanced(VitalParameters),
}

impl ModelVariant {
    /// Box the matching model implementation
    pub fn into_model(self) -> Box<dyn EpidemicModel> {
        match self {
            ModelVariant::Basic(params) => Box::new(BasicSir::new(params)),
            ModelVariant::Advanced(params) => Box::new(VitalDynamicsSir::new(params)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModelVariant::Basic(_) => "basic",
            ModelVariant::Advanced(_) => "advanced",
        }
    }

    pub fn population(&self) -> f64 {
        match self {
            ModelVariant::Basic(params) => params.population(),
            ModelVariant::Advanced(params) => params.population(),
        }
    }

    pub fn initial_state(&self) -> CompartmentState {
        match self {
            ModelVariant::Basic(params) => params.initial_state(),
            ModelVariant::Advanced(params) => params.initial_state(),
        }
    }

    pub fn basic_reproduction_number(&self) -> f64 {
        match self {
            ModelVariant::Basic(params) => params.basic_reproduction_number(),
            ModelVariant::Advanced(params) => params.basic_reproduction_number(),
        }
    }
}

impl From<BasicParameters> for ModelVariant {
    fn from(params: BasicParameters) -> Self {
        ModelVariant::Basic(params)
    }
}

impl From<VitalParameters> for ModelVariant {
    fn from(params: VitalParameters) -> Self {
        ModelVariant::Advanced(params)
    }
}
