//! Example: sweep over the transmission rate
//!
//! Solves the basic model for β from 2.5 to 100 (R0 from 0.5 to 20) and
//! prints the peak and final size of each outbreak. Build with
//! `--features parallel` to spread the runs over the Rayon thread pool.
//!
//! ```text
//! cargo run --release --example parameter_sweep --features parallel
//! ```

use std::time::Instant;

use sir_rs::prelude::*;
use sir_rs::sweep::{parallel_threshold, run_sweep};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let gamma = 5.0;
    let betas: Vec<f64> = (1..=40).map(|i| 2.5 * i as f64).collect();

    let scenarios = betas
        .iter()
        .map(|&beta| {
            BasicParameters::new(1000.0, 990.0, 10.0, 0.0, beta, gamma)
                .map(|params| Scenario::from_variant(params.into()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let config = SolverConfiguration::fixed_step(TimeGrid::linspace(365.0, 365)?, 4);

    println!(
        "{} scenarios (parallel threshold {})",
        scenarios.len(),
        parallel_threshold()
    );

    let start = Instant::now();
    let results = run_sweep(&scenarios, &RK4Solver::new(), &config);
    println!("solved in {:?}\n", start.elapsed());

    println!("     β     R0    peak I   day   final R");
    for (beta, result) in betas.iter().zip(&results) {
        match result {
            Ok(trajectory) => {
                let (t_peak, peak) = trajectory.peak_infected().unwrap_or_default();
                let final_r = trajectory.recovered.last().copied().unwrap_or_default();
                println!(
                    "{:>6.1} {:>6.2} {:>9.3} {:>5.0} {:>9.3}",
                    beta,
                    beta / gamma,
                    peak,
                    t_peak,
                    final_r
                );
            }
            Err(e) => println!("{beta:>6.1}  failed: {e}"),
        }
    }

    Ok(())
}
