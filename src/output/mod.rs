//! Output module for simulation results
//!
//! - **Export**: CSV files for external analysis
//! - **Visualization**: PNG/SVG plots using plotters (feature `plot`)
//!
//! Both consume a finished [`TrajectoryResult`](crate::solver::TrajectoryResult);
//! the solvers never depend on them.
//!
//! ```text
//! output/
//! ├── mod.rs
//! ├── export/             ← Data export
//! │   ├── mod.rs
//! │   └── csv.rs
//! └── visualization/      ← Plots (feature `plot`)
//!     ├── mod.rs
//!     ├── config.rs
//!     └── trajectory.rs
//! ```

pub mod export;

#[cfg(feature = "plot")]
pub mod visualization;

pub use export::{CsvConfig, CsvError, CsvExporter, CsvMetadata, Exporter};

#[cfg(feature = "plot")]
pub use visualization::{PlotConfig, plot_trajectory};
