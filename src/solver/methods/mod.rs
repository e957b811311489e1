//! Numerical methods for solving the compartment equations
//!
//! This module contains concrete implementations of the [`Solver`](crate::solver::Solver) trait.
//!
//! # Available Methods
//!
//! ## Fixed-step methods ([`StepControl::Fixed`](crate::solver::StepControl))
//!
//! - **[`EulerSolver`]**: Forward Euler
//!   - Order: First-order O(dt)
//!   - Cost: 1 function evaluation per step
//!   - Use: reference for convergence studies
//!
//! - **[`RK4Solver`]**: Classical fourth-order Runge-Kutta
//!   - Order: Fourth-order O(dt⁴)
//!   - Cost: 4 function evaluations per step
//!   - Use: **default** for simulations
//!
//! ## Adaptive methods ([`StepControl::Adaptive`](crate::solver::StepControl))
//!
//! - **[`DormandPrinceSolver`]**: embedded 5(4) pair with error control
//!   - Cost: 6 function evaluations per attempted step (FSAL)
//!   - Use: reference solutions, parameter sets with fast dynamics
//!
//! # Design Philosophy
//!
//! Each solver is:
//! - **Self-contained**: No shared mutable state
//! - **Stateless**: Can be reused for multiple simulations, from several threads

mod dormand_prince;
mod euler;
mod rk4;

pub use dormand_prince::DormandPrinceSolver;
pub use euler::EulerSolver;
pub use rk4::RK4Solver;
