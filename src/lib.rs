//! sir-rs: Compartmental Epidemic Simulation
//!
//! Deterministic S-I-R epidemic models integrated with explicit ODE solvers.
//!
//! # Architecture
//!
//! sir-rs is built on two core principles:
//!
//! 1. **Separation of Epidemiology and Numerics**
//!    - Epidemic models define the rate equations (what to solve)
//!    - Numerical solvers provide methods (how to solve)
//!
//! 2. **Validated inputs, complete outputs**
//!    - Parameters are checked when constructed or deserialized
//!    - A run returns either a full trajectory or a [`SimulationError`]
//!
//! # Quick Start
//!
//! ```rust
//! use sir_rs::prelude::*;
//!
//! // 1. Parameters and scenario (N = 1000, 10 initial cases)
//! let params = BasicParameters::new(1000.0, 990.0, 10.0, 0.0, 50.0, 5.0)?;
//! let scenario = Scenario::from_variant(ModelVariant::Basic(params));
//!
//! // 2. Output grid and step control: one sample per day, 4 RK4 steps each
//! let config = SolverConfiguration::fixed_step(TimeGrid::linspace(365.0, 365)?, 4);
//!
//! // 3. Run simulation
//! let result = RK4Solver::new().solve(&scenario, &config)?;
//!
//! // 4. Access results
//! let (t_peak, peak) = result.peak_infected().unwrap_or_default();
//! println!("peak of {peak:.1} infected at day {t_peak:.0}");
//! # Ok::<(), SimulationError>(())
//! ```
//!
//! # Modules
//!
//! - [`epidemic`]: Compartment state, parameters and the model trait
//! - [`models`]: Basic and vital-dynamics SIR models
//! - [`solver`]: Time grid, configuration and numerical solvers
//! - [`sweep`]: Batch runs over many scenarios (parallel with `parallel`)
//! - [`config`]: TOML run description
//! - [`output`]: CSV export and plots (plots with `plot`)

pub mod config;
pub mod epidemic;
pub mod error;
pub mod models;
pub mod output;
pub mod solver;
pub mod sweep;

pub use error::{Result, SimulationError};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use sir_rs::prelude::*;
    //! ```
    pub use crate::epidemic::{BasicParameters, CompartmentState, EpidemicModel, VitalParameters};
    pub use crate::error::SimulationError;
    pub use crate::models::{BasicSir, ModelVariant, VitalDynamicsSir};
    pub use crate::solver::{
        DormandPrinceSolver, EulerSolver, RK4Solver, Scenario, Solver, SolverConfiguration,
        StepControl, TimeGrid, TrajectoryResult,
    };
}
