//! TOML run configuration
//!
//! A run is described by one document:
//!
//! ```toml
//! [model]
//! variant = "advanced"      # or "basic"
//! population = 1000.0
//! susceptible = 990.0
//! infected = 10.0
//! recovered = 0.0
//! beta = 50.0
//! gamma = 5.0
//! mu = 10.0                 # advanced only
//! rho = 0.3                 # advanced only
//! omega = 0.5               # advanced only
//!
//! [time]
//! horizon = 365.0
//! samples = 365
//!
//! [solver]
//! method = "rk4"            # "euler", "rk4" or "dormand-prince"
//! substeps = 4
//!
//! [output]
//! csv = "trajectory.csv"
//! precision = 6
//! ```
//!
//! Only `[model]` is required. Numeric validation is left to the core
//! constructors, so a document that loads is a valid run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::models::ModelVariant;
use crate::solver::{
    DEFAULT_NEGATIVITY_TOLERANCE, DEFAULT_SUBSTEPS, DormandPrinceSolver, EulerSolver, RK4Solver,
    Scenario, Solver, SolverConfiguration, StepControl, TimeGrid,
};

// =================================================================================================
// Sections
// =================================================================================================

/// `[time]`: output grid from 0 to `horizon` with `samples` points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSection {
    #[serde(default = "default_horizon")]
    pub horizon: f64,
    #[serde(default = "default_samples")]
    pub samples: usize,
}

fn default_horizon() -> f64 {
    365.0
}

fn default_samples() -> usize {
    365
}

impl Default for TimeSection {
    fn default() -> Self {
        Self {
            horizon: default_horizon(),
            samples: default_samples(),
        }
    }
}

/// Integration method selected in `[solver]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SolverMethod {
    Euler,
    #[default]
    Rk4,
    DormandPrince,
}

impl SolverMethod {
    /// Boxed solver implementing this method
    pub fn solver(self) -> Box<dyn Solver> {
        match self {
            SolverMethod::Euler => Box::new(EulerSolver::new()),
            SolverMethod::Rk4 => Box::new(RK4Solver::new()),
            SolverMethod::DormandPrince => Box::new(DormandPrinceSolver::new()),
        }
    }

    pub fn is_adaptive(self) -> bool {
        matches!(self, SolverMethod::DormandPrince)
    }
}

/// `[solver]`: method and stepping parameters
///
/// `substeps` applies to the fixed-step methods, `rtol`, `atol` and
/// `max_steps` to Dormand-Prince.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverSection {
    #[serde(default)]
    pub method: SolverMethod,
    #[serde(default = "default_substeps")]
    pub substeps: usize,
    #[serde(default = "default_tolerance")]
    pub rtol: f64,
    #[serde(default = "default_tolerance")]
    pub atol: f64,
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    #[serde(default = "default_negativity_tolerance")]
    pub negativity_tolerance: f64,
}

fn default_substeps() -> usize {
    DEFAULT_SUBSTEPS
}

fn default_tolerance() -> f64 {
    1e-8
}

fn default_max_steps() -> usize {
    10_000
}

fn default_negativity_tolerance() -> f64 {
    DEFAULT_NEGATIVITY_TOLERANCE
}

impl Default for SolverSection {
    fn default() -> Self {
        Self {
            method: SolverMethod::default(),
            substeps: default_substeps(),
            rtol: default_tolerance(),
            atol: default_tolerance(),
            max_steps: default_max_steps(),
            negativity_tolerance: default_negativity_tolerance(),
        }
    }
}

impl SolverSection {
    pub fn step_control(&self) -> StepControl {
        if self.method.is_adaptive() {
            StepControl::Adaptive {
                rtol: self.rtol,
                atol: self.atol,
                max_steps: self.max_steps,
            }
        } else {
            StepControl::Fixed {
                substeps: self.substeps,
            }
        }
    }
}

/// `[output]`: optional export targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSection {
    pub csv: Option<PathBuf>,
    pub plot: Option<PathBuf>,
    #[serde(default = "default_precision")]
    pub precision: usize,
}

fn default_precision() -> usize {
    6
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            csv: None,
            plot: None,
            precision: default_precision(),
        }
    }
}

// =================================================================================================
// Document
// =================================================================================================

/// Complete run description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub model: ModelVariant,
    #[serde(default)]
    pub time: TimeSection,
    #[serde(default)]
    pub solver: SolverSection,
    #[serde(default)]
    pub output: OutputSection,
}

impl SimulationConfig {
    /// Parse a TOML document
    ///
    /// # Errors
    ///
    /// [`SimulationError::Config`] for malformed TOML, unknown variants,
    /// methods or keys, and parameters rejected by the model constructors.
    /// The latter are wrapped: the message carries the original
    /// `invalid parameter: ...` text. Checks that need the whole document
    /// (time grid, solver settings) run in [`build`](Self::build) and
    /// return [`SimulationError::InvalidParameter`] directly.
    pub fn from_toml_str(document: &str) -> Result<Self> {
        toml::from_str(document).map_err(|e| SimulationError::Config(e.to_string()))
    }

    /// Read and parse a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let document = fs::read_to_string(path).map_err(|e| {
            SimulationError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&document)
    }

    pub fn time_grid(&self) -> Result<TimeGrid> {
        TimeGrid::linspace(self.time.horizon, self.time.samples)
    }

    pub fn solver_configuration(&self) -> Result<SolverConfiguration> {
        let config = SolverConfiguration::new(self.time_grid()?, self.solver.step_control())
            .with_negativity_tolerance(self.solver.negativity_tolerance);
        config.validate()?;
        Ok(config)
    }

    pub fn solver(&self) -> Box<dyn Solver> {
        self.solver.method.solver()
    }

    pub fn scenario(&self) -> Result<Scenario> {
        let scenario = Scenario::from_variant(self.model);
        scenario.validate()?;
        Ok(scenario)
    }

    /// Everything needed for one run
    ///
    /// ```rust
    /// use sir_rs::config::SimulationConfig;
    ///
    /// let config = SimulationConfig::from_toml_str(r#"
    ///     [model]
    ///     variant = "basic"
    ///     population = 1000.0
    ///     susceptible = 990.0
    ///     infected = 10.0
    ///     beta = 50.0
    ///     gamma = 5.0
    /// "#)?;
    ///
    /// let (scenario, configuration, solver) = config.build()?;
    /// let result = solver.solve(&scenario, &configuration)?;
    /// assert_eq!(result.len(), 365);
    /// # Ok::<(), sir_rs::SimulationError>(())
    /// ```
    pub fn build(&self) -> Result<(Scenario, SolverConfiguration, Box<dyn Solver>)> {
        Ok((self.scenario()?, self.solver_configuration()?, self.solver()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ADVANCED: &str = r#"
        [model]
        variant = "advanced"
        population = 1000.0
        susceptible = 990.0
        infected = 10.0
        recovered = 0.0
        beta = 50.0
        gamma = 5.0
        mu = 10.0
        rho = 0.3
        omega = 0.5

        [time]
        horizon = 100.0
        samples = 101

        [solver]
        method = "dormand-prince"
        rtol = 1e-9
        atol = 1e-9

        [output]
        csv = "out.csv"
        precision = 4
    "#;

    #[test]
    fn test_full_document() {
        let config = SimulationConfig::from_toml_str(ADVANCED).unwrap();

        assert_eq!(config.model.name(), "advanced");
        assert_eq!(config.time.samples, 101);
        assert_eq!(config.solver.method, SolverMethod::DormandPrince);
        assert_eq!(config.solver.max_steps, 10_000);
        assert_eq!(config.output.csv, Some(PathBuf::from("out.csv")));
        assert_eq!(config.output.precision, 4);

        let (scenario, configuration, solver) = config.build().unwrap();
        assert_eq!(scenario.model_name(), "SIR with vital dynamics");
        assert_eq!(solver.name(), "Dormand-Prince");
        assert_eq!(
            configuration.step_control,
            StepControl::Adaptive {
                rtol: 1e-9,
                atol: 1e-9,
                max_steps: 10_000
            }
        );
    }

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::from_toml_str(
            r#"
            [model]
            variant = "basic"
            population = 1000.0
            susceptible = 990.0
            infected = 10.0
            beta = 50.0
            gamma = 5.0
            "#,
        )
        .unwrap();

        assert_eq!(config.time, TimeSection::default());
        assert_eq!(config.solver, SolverSection::default());
        assert_eq!(config.output, OutputSection::default());

        let configuration = config.solver_configuration().unwrap();
        assert_eq!(configuration.step_control, StepControl::Fixed { substeps: 4 });
        assert_eq!(configuration.time_grid.len(), 365);
        assert_eq!(config.solver().name(), "Runge Kutta (RK4)");
    }

    #[test]
    fn test_rejections() {
        let unknown_method = ADVANCED.replace("dormand-prince", "leapfrog");
        assert!(matches!(
            SimulationConfig::from_toml_str(&unknown_method),
            Err(SimulationError::Config(_))
        ));

        let bad_rho = ADVANCED.replace("rho = 0.3", "rho = 1.0");
        match SimulationConfig::from_toml_str(&bad_rho) {
            Err(SimulationError::Config(message)) => {
                assert!(message.contains("invalid parameter"), "{message}");
                assert!(message.contains("rho"), "{message}");
            }
            other => panic!("expected a wrapped parameter error, got {other:?}"),
        }

        let misspelled = ADVANCED.replace("omega = 0.5", "omgea = 0.5");
        assert!(matches!(
            SimulationConfig::from_toml_str(&misspelled),
            Err(SimulationError::Config(_))
        ));

        let bad_grid = ADVANCED.replace("samples = 101", "samples = 1");
        let config = SimulationConfig::from_toml_str(&bad_grid).unwrap();
        assert!(matches!(
            config.build(),
            Err(SimulationError::InvalidParameter(_))
        ));

        assert!(SimulationConfig::from_toml_str("[time]\nhorizon = 10.0").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ADVANCED.as_bytes()).unwrap();

        let config = SimulationConfig::from_file(file.path()).unwrap();
        assert_eq!(config.time.horizon, 100.0);

        let missing = SimulationConfig::from_file("/definitely/not/here.toml");
        assert!(matches!(missing, Err(SimulationError::Config(_))));
    }
}
