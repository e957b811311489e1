//! Visualization of simulation results
//!
//! Available with the `plot` feature, using the `plotters` library.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use sir_rs::output::visualization::{plot_trajectory, PlotConfig};
//!
//! let result = solver.solve(&scenario, &config)?;
//!
//! // Default colors: S blue, I red, R green, total black
//! plot_trajectory(&result, "outbreak.png", None)?;
//!
//! let config = PlotConfig::trajectory("SIR with vital dynamics");
//! plot_trajectory(&result, "vital.svg", Some(&config))?;
//! ```

pub mod config;
pub mod trajectory;

pub use config::PlotConfig;
pub use trajectory::plot_trajectory;
