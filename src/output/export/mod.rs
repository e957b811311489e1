//! Export of simulation results to files.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module.
//!
//! # Available formats
//!
//! | Format  | Module  |
//! |---------|---------|
//! | CSV     | [`csv`] |
//!
//! # Usage example
//!
//! ```rust
//! use sir_rs::epidemic::BasicParameters;
//! use sir_rs::output::export::{CsvExporter, Exporter};
//! use sir_rs::solver::{RK4Solver, Scenario, Solver, SolverConfiguration, TimeGrid};
//!
//! let params = BasicParameters::new(1000.0, 990.0, 10.0, 0.0, 50.0, 5.0)?;
//! let scenario = Scenario::from_variant(params.into());
//! let config = SolverConfiguration::fixed_step(TimeGrid::linspace(365.0, 365)?, 4);
//! let result = RK4Solver::new().solve(&scenario, &config)?;
//!
//! let dir = tempfile::tempdir()?;
//! let exporter = CsvExporter::default();
//!
//! // Full export (all grid points)
//! exporter.export(&result, None, &dir.path().join("outbreak.csv"))?;
//!
//! // Downsampled export to 50 rows
//! exporter.export(&result, Some(50), &dir.path().join("outbreak_light.csv"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod csv;

pub use csv::{CsvConfig, CsvError, CsvExporter, CsvMetadata};

use std::path::Path;

use crate::solver::TrajectoryResult;

/// Abstraction trait for all export formats.
///
/// # Associated type `Error`
///
/// Each format manages its own errors via the associated type, so callers
/// can react to the precise failure.
///
/// # Parameter `n_points`
///
/// - `None`: exports every grid point
/// - `Some(n)`: uniformly downsamples to `n` rows, always keeping the
///   **first and last** points
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Writes the trajectory (`time`, `S`, `I`, `R`, `total`) to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be written, `result` is empty
    /// or holds non-finite values, or `n_points` is below 2.
    fn export(
        &self,
        result: &TrajectoryResult,
        n_points: Option<usize>,
        path: &Path,
    ) -> Result<(), Self::Error>;
}

/// Indices of `n_points` rows spread uniformly over `len` rows
///
/// The first and last rows are always included. Returns every index when
/// `n_points >= len`.
pub(crate) fn downsample_indices(len: usize, n_points: usize) -> Vec<usize> {
    if n_points >= len || len < 2 {
        return (0..len).collect();
    }

    let last = (len - 1) as f64;
    let divisions = (n_points - 1) as f64;

    let mut indices: Vec<usize> = (0..n_points)
        .map(|i| (i as f64 * last / divisions).round() as usize)
        .collect();
    indices.dedup();
    indices
}
