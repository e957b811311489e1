//! Validated parameter sets
//!
//! Parameter sets are built once, checked on construction and read-only
//! afterwards. Deserialization goes through the same constructors, so a
//! parameter set loaded from a configuration file is always valid.

use serde::{Deserialize, Serialize};

use crate::epidemic::CompartmentState;
use crate::error::{Result, SimulationError};

/// Relative tolerance used to check `S0 + I0 + R0 == N`
pub const POPULATION_TOLERANCE: f64 = 1e-9;

fn ensure_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::invalid(format!(
            "{name} must be finite, got {value}"
        )))
    }
}

/// Check that a state is non-negative and sums to `population`
pub(crate) fn check_population_balance(population: f64, state: &CompartmentState) -> Result<()> {
    for (index, value) in state.to_array().into_iter().enumerate() {
        let name = CompartmentState::compartment_name(index);
        ensure_finite(name, value)?;
        if value < 0.0 {
            return Err(SimulationError::invalid(format!(
                "initial {name} must be non-negative, got {value}"
            )));
        }
    }

    let total = state.total();
    if (total - population).abs() > POPULATION_TOLERANCE * population.max(1.0) {
        return Err(SimulationError::invalid(format!(
            "initial compartments sum to {total}, expected population {population}"
        )));
    }

    Ok(())
}

// =================================================================================================
// Basic S-I-R parameters
// =================================================================================================

/// Parameters of the closed-population S-I-R model
///
/// | Field | Meaning | Constraint |
/// |-------|---------|------------|
/// | `population` | total population N | > 0 |
/// | `susceptible`, `infected`, `recovered` | initial S0, I0, R0 | ≥ 0, sum to N |
/// | `beta` | contact rate × transmission probability | ≥ 0 |
/// | `gamma` | recovery rate (1 / infectious period) | > 0 |
///
/// # Example
///
/// ```rust
/// use sir_rs::epidemic::BasicParameters;
///
/// let params = BasicParameters::new(1000.0, 990.0, 10.0, 0.0, 50.0, 5.0)?;
/// assert_eq!(params.basic_reproduction_number(), 10.0);
///
/// // Compartments must add up to the population
/// assert!(BasicParameters::new(1000.0, 900.0, 10.0, 0.0, 50.0, 5.0).is_err());
/// # Ok::<(), sir_rs::SimulationError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBasicParameters")]
pub struct BasicParameters {
    population: f64,
    susceptible: f64,
    infected: f64,
    recovered: f64,
    beta: f64,
    gamma: f64,
}

impl BasicParameters {
    /// Build and validate a parameter set
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidParameter`] when `N <= 0`, any initial
    /// compartment is negative, `S0 + I0 + R0 != N`, `beta < 0`,
    /// `gamma <= 0`, or any value is not finite.
    pub fn new(
        population: f64,
        susceptible: f64,
        infected: f64,
        recovered: f64,
        beta: f64,
        gamma: f64,
    ) -> Result<Self> {
        ensure_finite("population", population)?;
        if population <= 0.0 {
            return Err(SimulationError::invalid(format!(
                "population must be positive, got {population}"
            )));
        }

        check_population_balance(
            population,
            &CompartmentState::new(susceptible, infected, recovered),
        )?;

        ensure_finite("beta", beta)?;
        if beta < 0.0 {
            return Err(SimulationError::invalid(format!(
                "beta must be non-negative, got {beta}"
            )));
        }

        ensure_finite("gamma", gamma)?;
        if gamma <= 0.0 {
            return Err(SimulationError::invalid(format!(
                "gamma must be positive, got {gamma}"
            )));
        }

        Ok(Self {
            population,
            susceptible,
            infected,
            recovered,
            beta,
            gamma,
        })
    }

    pub fn population(&self) -> f64 {
        self.population
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Initial `(S0, I0, R0)`
    pub fn initial_state(&self) -> CompartmentState {
        CompartmentState::new(self.susceptible, self.infected, self.recovered)
    }

    /// Basic reproduction number, approximated by `beta / gamma`
    pub fn basic_reproduction_number(&self) -> f64 {
        self.beta / self.gamma
    }
}

/// Unchecked mirror of [`BasicParameters`] used for deserialization
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBasicParameters {
    #[serde(alias = "N")]
    population: f64,
    #[serde(alias = "S0")]
    susceptible: f64,
    #[serde(alias = "I0")]
    infected: f64,
    #[serde(alias = "R0", default)]
    recovered: f64,
    beta: f64,
    gamma: f64,
}

impl TryFrom<RawBasicParameters> for BasicParameters {
    type Error = SimulationError;

    fn try_from(raw: RawBasicParameters) -> Result<Self> {
        Self::new(
            raw.population,
            raw.susceptible,
            raw.infected,
            raw.recovered,
            raw.beta,
            raw.gamma,
        )
    }
}

// =================================================================================================
// Vital dynamics + waning immunity parameters
// =================================================================================================

/// Parameters of the S-I-R model with vital dynamics, disease mortality
/// and waning immunity
///
/// Extends [`BasicParameters`] with:
///
/// - `mu`: natural birth and death rate (one value for both), ≥ 0
/// - `rho`: probability that an infected individual dies of the disease, in `[0, 1)`
/// - `omega`: rate of immunity loss (1 / mean immune period), ≥ 0
///
/// The disease-induced mortality rate is derived once:
///
/// ```text
/// m = rho / (1 - rho) * (gamma + mu)
/// ```
///
/// # Example
///
/// ```rust
/// use sir_rs::epidemic::{BasicParameters, VitalParameters};
///
/// let basic = BasicParameters::new(1000.0, 990.0, 10.0, 0.0, 50.0, 5.0)?;
/// let params = VitalParameters::new(basic, 10.0, 0.3, 0.5)?;
///
/// assert!((params.disease_mortality() - 6.428571428571429).abs() < 1e-12);
/// # Ok::<(), sir_rs::SimulationError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawVitalParameters")]
pub struct VitalParameters {
    #[serde(flatten)]
    basic: BasicParameters,
    mu: f64,
    rho: f64,
    omega: f64,
    #[serde(skip)]
    disease_mortality: f64,
}

impl VitalParameters {
    /// Build and validate the extended parameter set
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidParameter`] when `mu < 0`, `omega < 0`,
    /// `rho` is outside `[0, 1)`, or any value is not finite.
    pub fn new(basic: BasicParameters, mu: f64, rho: f64, omega: f64) -> Result<Self> {
        ensure_finite("mu", mu)?;
        if mu < 0.0 {
            return Err(SimulationError::invalid(format!(
                "mu must be non-negative, got {mu}"
            )));
        }

        ensure_finite("rho", rho)?;
        if !(0.0..1.0).contains(&rho) {
            return Err(SimulationError::invalid(format!(
                "rho must lie in [0, 1), got {rho}"
            )));
        }

        ensure_finite("omega", omega)?;
        if omega < 0.0 {
            return Err(SimulationError::invalid(format!(
                "omega must be non-negative, got {omega}"
            )));
        }

        let disease_mortality = rho / (1.0 - rho) * (basic.gamma() + mu);

        Ok(Self {
            basic,
            mu,
            rho,
            omega,
            disease_mortality,
        })
    }

    /// Shared S-I-R parameters
    pub fn basic(&self) -> &BasicParameters {
        &self.basic
    }

    pub fn population(&self) -> f64 {
        self.basic.population()
    }

    pub fn beta(&self) -> f64 {
        self.basic.beta()
    }

    pub fn gamma(&self) -> f64 {
        self.basic.gamma()
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn rho(&self) -> f64 {
        self.rho
    }

    pub fn omega(&self) -> f64 {
        self.omega
    }

    /// Disease-induced mortality rate `m`
    pub fn disease_mortality(&self) -> f64 {
        self.disease_mortality
    }

    pub fn initial_state(&self) -> CompartmentState {
        self.basic.initial_state()
    }

    /// Reproduction number accounting for every outflow of the infected
    /// compartment: `beta / (gamma + mu + m)`
    pub fn basic_reproduction_number(&self) -> f64 {
        self.beta() / (self.gamma() + self.mu + self.disease_mortality)
    }
}

/// Every vital rate is required: a missing or misspelled one is an error
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawVitalParameters {
    #[serde(alias = "N")]
    population: f64,
    #[serde(alias = "S0")]
    susceptible: f64,
    #[serde(alias = "I0")]
    infected: f64,
    #[serde(alias = "R0", default)]
    recovered: f64,
    beta: f64,
    gamma: f64,
    mu: f64,
    rho: f64,
    omega: f64,
}

impl TryFrom<RawVitalParameters> for VitalParameters {
    type Error = SimulationError;

    fn try_from(raw: RawVitalParameters) -> Result<Self> {
        let basic = BasicParameters::new(
            raw.population,
            raw.susceptible,
            raw.infected,
            raw.recovered,
            raw.beta,
            raw.gamma,
        )?;
        Self::new(basic, raw.mu, raw.rho, raw.omega)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference() -> BasicParameters {
        BasicParameters::new(1000.0, 990.0, 10.0, 0.0, 50.0, 5.0).unwrap()
    }

    #[test]
    fn test_valid_basic_parameters() {
        let params = reference();

        assert_eq!(params.population(), 1000.0);
        assert_eq!(params.initial_state(), CompartmentState::new(990.0, 10.0, 0.0));
        assert_relative_eq!(params.basic_reproduction_number(), 10.0);
    }

    #[test]
    fn test_rejects_non_positive_population() {
        assert!(BasicParameters::new(0.0, 0.0, 0.0, 0.0, 1.0, 1.0).is_err());
        assert!(BasicParameters::new(-10.0, 0.0, 0.0, 0.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_rejects_negative_compartments() {
        let err = BasicParameters::new(1000.0, 1010.0, -10.0, 0.0, 50.0, 5.0).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidParameter(_)));
        assert!(err.to_string().contains("infected"));
    }

    #[test]
    fn test_rejects_unbalanced_population() {
        let err = BasicParameters::new(1000.0, 990.0, 10.0, 5.0, 50.0, 5.0).unwrap_err();
        assert!(err.to_string().contains("sum to 1005"));
    }

    #[test]
    fn test_accepts_rounding_noise_in_balance() {
        let params = BasicParameters::new(1.0, 0.7, 0.2, 0.1, 0.5, 0.1);
        assert!(params.is_ok());
    }

    #[test]
    fn test_rejects_invalid_rates() {
        assert!(BasicParameters::new(1000.0, 990.0, 10.0, 0.0, -1.0, 5.0).is_err());
        assert!(BasicParameters::new(1000.0, 990.0, 10.0, 0.0, 50.0, 0.0).is_err());
        assert!(BasicParameters::new(1000.0, 990.0, 10.0, 0.0, 50.0, -5.0).is_err());
        assert!(BasicParameters::new(1000.0, 990.0, 10.0, 0.0, f64::NAN, 5.0).is_err());
        assert!(BasicParameters::new(1000.0, 990.0, 10.0, 0.0, 0.0, 5.0).is_ok());
    }

    #[test]
    fn test_disease_mortality_is_derived() {
        let params = VitalParameters::new(reference(), 10.0, 0.3, 0.5).unwrap();

        assert_relative_eq!(params.disease_mortality(), 0.3 / 0.7 * 15.0, epsilon = 1e-12);
        assert_relative_eq!(params.disease_mortality(), 6.428571428571429, epsilon = 1e-12);
        assert_relative_eq!(
            params.basic_reproduction_number(),
            50.0 / (5.0 + 10.0 + 6.428571428571429),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_rejects_invalid_vital_rates() {
        assert!(VitalParameters::new(reference(), -1.0, 0.3, 0.5).is_err());
        assert!(VitalParameters::new(reference(), 10.0, 1.0, 0.5).is_err());
        assert!(VitalParameters::new(reference(), 10.0, -0.1, 0.5).is_err());
        assert!(VitalParameters::new(reference(), 10.0, 0.3, -0.5).is_err());
        assert!(VitalParameters::new(reference(), 0.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn test_deserialization_validates() {
        let params: BasicParameters = toml::from_str(
            "N = 1000.0\nS0 = 990.0\nI0 = 10.0\nR0 = 0.0\nbeta = 50.0\ngamma = 5.0\n",
        )
        .unwrap();
        assert_eq!(params, reference());

        let broken: std::result::Result<BasicParameters, _> = toml::from_str(
            "population = 1000.0\nsusceptible = 900.0\ninfected = 10.0\nbeta = 50.0\ngamma = 5.0\n",
        );
        assert!(broken.is_err());
    }

    #[test]
    fn test_vital_deserialization() {
        let params: VitalParameters = toml::from_str(
            "population = 1000.0\nsusceptible = 990.0\ninfected = 10.0\n\
             beta = 50.0\ngamma = 5.0\nmu = 10.0\nrho = 0.3\nomega = 0.5\n",
        )
        .unwrap();

        assert_eq!(params.mu(), 10.0);
        assert_relative_eq!(params.disease_mortality(), 6.428571428571429, epsilon = 1e-12);
    }

    #[test]
    fn test_advanced_requires_vital_rates() {
        const BASE: &str = "population = 1000.0\nsusceptible = 990.0\ninfected = 10.0\n\
                            beta = 50.0\ngamma = 5.0\n";

        for rates in [
            "rho = 0.3\nomega = 0.5\n",
            "mu = 10.0\nomega = 0.5\n",
            "mu = 10.0\nrho = 0.3\n",
            "mu = 10.0\nrho = 0.3\nomgea = 0.5\n",
            "mu = 10.0\nrho = 0.3\nomega = 0.5\nnu = 1.0\n",
        ] {
            let document = format!("{BASE}{rates}");
            let parsed: std::result::Result<VitalParameters, _> = toml::from_str(&document);
            assert!(parsed.is_err(), "accepted:\n{document}");
        }

        let complete = format!("{BASE}mu = 10.0\nrho = 0.3\nomega = 0.5\n");
        assert!(toml::from_str::<VitalParameters>(&complete).is_ok());
    }

    #[test]
    fn test_basic_rejects_unknown_keys() {
        let parsed: std::result::Result<BasicParameters, _> = toml::from_str(
            "population = 1000.0\nsusceptible = 990.0\ninfected = 10.0\n\
             beta = 50.0\ngamma = 5.0\ngama = 5.0\n",
        );
        assert!(parsed.is_err());
    }
}
