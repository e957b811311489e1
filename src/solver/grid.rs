//! Output time grid
//!
//! The grid lists the instants at which the trajectory is sampled. The
//! integrators may take smaller internal steps, but they always land
//! exactly on every grid point.

use crate::error::{Result, SimulationError};

/// Strictly increasing sequence of sample instants
///
/// # Examples
///
/// ```rust
/// use sir_rs::solver::TimeGrid;
///
/// // 365 evenly spaced points over 365 days (as in numpy.linspace)
/// let grid = TimeGrid::linspace(365.0, 365)?;
/// assert_eq!(grid.len(), 365);
/// assert_eq!(grid.start(), 0.0);
/// assert_eq!(grid.end(), 365.0);
///
/// assert!(TimeGrid::linspace(365.0, 1).is_err());
/// # Ok::<(), sir_rs::SimulationError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    points: Vec<f64>,
}

impl TimeGrid {
    /// `samples` evenly spaced points from `0` to `horizon` inclusive
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidParameter`] when `horizon <= 0`, `horizon`
    /// is not finite, or `samples < 2`.
    pub fn linspace(horizon: f64, samples: usize) -> Result<Self> {
        if !horizon.is_finite() || horizon <= 0.0 {
            return Err(SimulationError::invalid(format!(
                "time horizon must be positive and finite, got {horizon}"
            )));
        }
        if samples < 2 {
            return Err(SimulationError::invalid(format!(
                "time grid needs at least 2 samples, got {samples}"
            )));
        }

        let last = (samples - 1) as f64;
        let mut points: Vec<f64> = (0..samples)
            .map(|index| horizon * (index as f64) / last)
            .collect();

        // Pin the endpoint: horizon * k / k is not always exactly horizon
        points[samples - 1] = horizon;

        Ok(Self { points })
    }

    /// Arbitrary grid, which need not start at zero
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidParameter`] unless the points are finite,
    /// strictly increasing and at least two.
    pub fn from_points(points: Vec<f64>) -> Result<Self> {
        if points.len() < 2 {
            return Err(SimulationError::invalid(format!(
                "time grid needs at least 2 points, got {}",
                points.len()
            )));
        }
        if let Some(bad) = points.iter().find(|t| !t.is_finite()) {
            return Err(SimulationError::invalid(format!(
                "time grid contains a non-finite point ({bad})"
            )));
        }
        if let Some(index) = points.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(SimulationError::invalid(format!(
                "time grid must be strictly increasing (points {} and {} are {} and {})",
                index,
                index + 1,
                points[index],
                points[index + 1]
            )));
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a grid holds at least two points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn start(&self) -> f64 {
        self.points[0]
    }

    pub fn end(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    /// Total covered time span
    pub fn span(&self) -> f64 {
        self.end() - self.start()
    }

    /// Consecutive `(t_k, t_{k+1})` pairs
    pub fn intervals(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }
}
