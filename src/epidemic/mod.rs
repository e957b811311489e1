//! Epidemic building blocks
//!
//! This module provides the data types every model and solver share:
//!
//! - **Compartment State**: the `(S, I, R)` triple and its arithmetic
//! - **Parameter Sets**: validated, immutable model parameters
//! - **Epidemic Model**: the trait a model implements to expose its equations
//!
//! # Architecture
//!
//! Epidemic models are **separate from numerical solvers**:
//! - The model provides the **equations** (`dS`, `dI`, `dR`)
//! - The solver provides the **method** to integrate them
//!
//! Concrete models live in [`crate::models`].

pub mod parameters;
pub mod state;
pub mod traits;

pub use parameters::{BasicParameters, VitalParameters, POPULATION_TOLERANCE};
pub use state::CompartmentState;
pub use traits::EpidemicModel;
