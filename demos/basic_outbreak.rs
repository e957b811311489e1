//! Example: closed-population outbreak
//!
//! N = 1000 with 10 initial cases, β = 50, γ = 5 (R0 = 10), one sample per
//! day over a year. Compares Euler, RK4 and Dormand-Prince on the same
//! scenario and exports the RK4 trajectory.
//!
//! ```text
//! cargo run --example basic_outbreak
//! cargo run --example basic_outbreak --features plot
//! ```

use std::time::Instant;

use sir_rs::output::{CsvConfig, CsvExporter, CsvMetadata, Exporter};
use sir_rs::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  Basic SIR - closed population outbreak");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Parameters ======

    let params = BasicParameters::new(1000.0, 990.0, 10.0, 0.0, 50.0, 5.0)?;

    println!("Parameters:");
    println!("  N      : {}", params.population());
    println!("  β      : {}", params.beta());
    println!("  γ      : {}", params.gamma());
    println!("  R0     : {:.2}\n", params.basic_reproduction_number());

    let scenario = Scenario::from_variant(ModelVariant::Basic(params));
    let grid = TimeGrid::linspace(365.0, 365)?;

    // ====== Solver comparison ======

    let runs: Vec<(Box<dyn Solver>, SolverConfiguration)> = vec![
        (
            Box::new(EulerSolver::new()),
            SolverConfiguration::fixed_step(grid.clone(), 100),
        ),
        (
            Box::new(RK4Solver::new()),
            SolverConfiguration::fixed_step(grid.clone(), 4),
        ),
        (
            Box::new(DormandPrinceSolver::new()),
            SolverConfiguration::adaptive(grid, 1e-10, 1e-10),
        ),
    ];

    let mut results = Vec::new();
    for (solver, config) in &runs {
        let start = Instant::now();
        let result = solver.solve(&scenario, config)?;
        let elapsed = start.elapsed();

        let (t_peak, peak) = result.peak_infected().unwrap_or_default();
        let last = result.final_state().unwrap_or_else(CompartmentState::zeros);

        println!("{}:", solver.name());
        println!("  evaluations : {}", result.metadata("function evaluations").unwrap_or("?"));
        println!("  time        : {elapsed:?}");
        println!("  peak        : {peak:.3} infected at day {t_peak:.1}");
        println!("  final       : {last}\n");

        results.push(result);
    }

    // Largest gap between RK4 and Dormand-Prince on I
    let gap = results[1]
        .infected
        .iter()
        .zip(&results[2].infected)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);
    println!("max |I_rk4 - I_dp| = {gap:.3e}\n");

    // ====== Export ======

    let output_dir = std::env::temp_dir();
    let rk4 = &results[1];

    let csv_path = output_dir.join("basic_outbreak.csv");
    let metadata = CsvMetadata::from_result(scenario.model_name(), "Runge Kutta (RK4)", rk4);
    CsvExporter::new(CsvConfig::default().with_metadata(metadata)).export(rk4, None, &csv_path)?;
    println!("CSV  : {}", csv_path.display());

    #[cfg(feature = "plot")]
    {
        use sir_rs::output::{PlotConfig, plot_trajectory};

        let png_path = output_dir.join("basic_outbreak.png");
        plot_trajectory(rk4, &png_path, Some(&PlotConfig::trajectory("SIR Model")))?;
        println!("Plot : {}", png_path.display());
    }

    Ok(())
}
