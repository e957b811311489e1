//! Compartment state container
//!
//! A [`CompartmentState`] is the ordered triple `(S, I, R)` of real-valued
//! population counts. The same type carries both a state and its time
//! derivative, and supports the vector-space operations the integrators
//! need (`+`, `-`, scaling by `f64`).

use nalgebra::Vector3;
use std::fmt;

/// Sizes of the Susceptible, Infected and Recovered compartments
///
/// Counts are continuous: fractional individuals are expected.
///
/// # Example
///
/// ```rust
/// use sir_rs::epidemic::CompartmentState;
///
/// let state = CompartmentState::new(990.0, 10.0, 0.0);
/// let rate = CompartmentState::new(-1.0, 0.5, 0.5);
///
/// let next = state + rate * 2.0;
/// assert_eq!(next.susceptible(), 988.0);
/// assert_eq!(next.total(), 1000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompartmentState {
    values: Vector3<f64>,
}

impl CompartmentState {
    /// Create a state from its three compartments
    pub fn new(susceptible: f64, infected: f64, recovered: f64) -> Self {
        Self {
            values: Vector3::new(susceptible, infected, recovered),
        }
    }

    /// All compartments empty
    pub fn zeros() -> Self {
        Self {
            values: Vector3::zeros(),
        }
    }

    pub fn susceptible(&self) -> f64 {
        self.values.x
    }

    pub fn infected(&self) -> f64 {
        self.values.y
    }

    pub fn recovered(&self) -> f64 {
        self.values.z
    }

    /// Sum of all compartments
    pub fn total(&self) -> f64 {
        self.values.sum()
    }

    /// True when no compartment is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|value| value.is_finite())
    }

    /// Smallest compartment value
    pub fn min_component(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Compartments as `[S, I, R]`
    pub fn to_array(&self) -> [f64; 3] {
        [self.values.x, self.values.y, self.values.z]
    }

    /// Name of the compartment stored at `index` (0: S, 1: I, 2: R)
    pub fn compartment_name(index: usize) -> &'static str {
        match index {
            0 => "susceptible",
            1 => "infected",
            2 => "recovered",
            _ => "unknown",
        }
    }
}

impl From<[f64; 3]> for CompartmentState {
    fn from(values: [f64; 3]) -> Self {
        Self::new(values[0], values[1], values[2])
    }
}

impl From<Vector3<f64>> for CompartmentState {
    fn from(values: Vector3<f64>) -> Self {
        Self { values }
    }
}

// Operator overloading for numerical operations

impl std::ops::Add for CompartmentState {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            values: self.values + rhs.values,
        }
    }
}

impl std::ops::Sub for CompartmentState {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            values: self.values - rhs.values,
        }
    }
}

impl std::ops::Mul<f64> for CompartmentState {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self::Output {
        Self {
            values: self.values * scalar,
        }
    }
}

impl std::ops::Mul<CompartmentState> for f64 {
    type Output = CompartmentState;

    fn mul(self, rhs: CompartmentState) -> Self::Output {
        rhs * self
    }
}

impl fmt::Display for CompartmentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "S = {:.4}, I = {:.4}, R = {:.4}",
            self.susceptible(),
            self.infected(),
            self.recovered()
        )
    }
}
