//! Common utilities for integration tests

pub mod mock_models;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_models::{ConstantDrain, LogisticInfection, PoisonedRates, RecoveryOnly};
pub use test_helpers::{
    advanced_reference, assert_trajectories_close, basic_reference, create_simple_scenario,
    daily_grid, relative_error,
};
