//! CSV export of epidemic trajectories
//!
//! The file is compatible with spreadsheets, pandas and most data analysis
//! tools.
//!
//! # Features
//!
//! - **Metadata support**: optional `#` header with run information
//! - **Customizable**: delimiter, decimal separator, precision
//! - **Downsampling**: uniform thinning that keeps the first and last rows
//! - **Validation**: rejects empty results and NaN/Inf values
//!
//! # Output
//!
//! ```csv
//! # SIR Simulation Data
//! # Generated: 2026-02-11T15:30:00+00:00
//! # Model: Basic SIR
//! # Solver: Runge Kutta (RK4)
//! # Horizon: 365
//! # Samples: 365
//! #
//! time,susceptible,infected,recovered,total
//! 0.000000,990.000000,10.000000,0.000000,1000.000000
//! ...
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use super::{Exporter, downsample_indices};
use crate::solver::TrajectoryResult;

/// Column names, in file order
pub const COLUMNS: [&str; 5] = ["time", "susceptible", "infected", "recovered", "total"];

// =============================================================================
// Errors
// =============================================================================

/// Failures of the CSV exporter
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("empty result: nothing to export")]
    EmptyResult,

    #[error("invalid data: non-finite value in column `{column}` at row {row}")]
    NonFinite { column: &'static str, row: usize },

    #[error("cannot downsample to {0} points (at least 2 are required)")]
    InvalidPointCount(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use sir_rs::output::export::CsvConfig;
///
/// let config = CsvConfig::default().delimiter(';').precision(10);
/// assert_eq!(config.delimiter, ';');
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only fields that are set are written.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    pub model_name: Option<String>,
    pub solver_name: Option<String>,
    pub horizon: Option<f64>,
    pub samples: Option<usize>,

    /// Additional `key: value` lines
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Metadata for a finished run
    ///
    /// The solver diagnostics attached to `result` become custom entries,
    /// sorted by key.
    pub fn from_result(model: &str, solver: &str, result: &TrajectoryResult) -> Self {
        let mut custom: Vec<(String, String)> = result
            .metadata
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        custom.sort();

        Self {
            model_name: Some(model.to_string()),
            solver_name: Some(solver.to_string()),
            horizon: result.time.last().copied(),
            samples: Some(result.len()),
            custom,
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: impl Into<String>, value: impl ToString) {
        self.custom.push((key.into(), value.to_string()));
    }
}

// =============================================================================
// Exporter
// =============================================================================

/// CSV implementation of [`Exporter`]
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    /// Write the CSV document to any writer
    pub fn write<W: Write>(
        &self,
        result: &TrajectoryResult,
        n_points: Option<usize>,
        writer: &mut W,
    ) -> Result<(), CsvError> {
        // ============================= Validation =============================

        if result.is_empty() {
            return Err(CsvError::EmptyResult);
        }
        if let Some(n) = n_points {
            if n < 2 {
                return Err(CsvError::InvalidPointCount(n));
            }
        }

        let columns = [
            &result.time,
            &result.susceptible,
            &result.infected,
            &result.recovered,
            &result.total,
        ];

        for (column, values) in COLUMNS.into_iter().zip(columns) {
            if let Some(row) = values.iter().position(|v| !v.is_finite()) {
                return Err(CsvError::NonFinite { column, row });
            }
        }

        // ============================= Write Metadata =========================

        if self.config.include_metadata {
            if let Some(metadata) = &self.config.metadata {
                write_metadata_header(writer, metadata)?;
            }
        }

        // ============================= Write Header ===========================

        let delimiter = self.config.delimiter.to_string();
        writeln!(writer, "{}", COLUMNS.join(&delimiter))?;

        // ============================= Write Data =============================

        let rows = match n_points {
            Some(n) => downsample_indices(result.len(), n),
            None => (0..result.len()).collect(),
        };

        for row in rows {
            let line: Vec<String> = columns
                .iter()
                .map(|values| format_number(values[row], &self.config))
                .collect();
            writeln!(writer, "{}", line.join(&delimiter))?;
        }

        Ok(())
    }
}

impl Exporter for CsvExporter {
    type Error = CsvError;

    fn export(
        &self,
        result: &TrajectoryResult,
        n_points: Option<usize>,
        path: &Path,
    ) -> Result<(), CsvError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write(result, n_points, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn write_metadata_header<W: Write>(writer: &mut W, metadata: &CsvMetadata) -> std::io::Result<()> {
    writeln!(writer, "# SIR Simulation Data")?;
    writeln!(writer, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

    if let Some(model) = &metadata.model_name {
        writeln!(writer, "# Model: {model}")?;
    }
    if let Some(solver) = &metadata.solver_name {
        writeln!(writer, "# Solver: {solver}")?;
    }
    if let Some(horizon) = metadata.horizon {
        writeln!(writer, "# Horizon: {horizon}")?;
    }
    if let Some(samples) = metadata.samples {
        writeln!(writer, "# Samples: {samples}")?;
    }
    for (key, value) in &metadata.custom {
        writeln!(writer, "# {key}: {value}")?;
    }

    writeln!(writer, "#")
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

// =================================================================================================
// Tests
// =================================================================================================
