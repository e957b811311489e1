//! `sir-sim`: run one epidemic scenario described by a TOML file
//!
//! ```text
//! sir-sim outbreak.toml --csv outbreak.csv --plot outbreak.png --verbose
//! ```

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, error, info};

use sir_rs::config::SimulationConfig;
use sir_rs::output::{CsvConfig, CsvExporter, CsvMetadata, Exporter};
use sir_rs::solver::TrajectoryResult;

#[derive(Parser)]
#[command(name = "sir-sim")]
#[command(about = "Simulate a deterministic SIR epidemic from a TOML configuration")]
struct Cli {
    /// Run configuration (TOML)
    config: PathBuf,

    /// Write the trajectory as CSV (overrides `[output] csv`)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Draw the trajectory (PNG or SVG, needs the `plot` feature)
    #[arg(long)]
    plot: Option<PathBuf>,

    /// Debug-level logging (default level comes from RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn print_summary(model: &str, solver: &str, result: &TrajectoryResult) {
    println!("model:  {model}");
    println!("solver: {solver}");
    println!("points: {}", result.len());

    if let Some((t_peak, peak)) = result.peak_infected() {
        println!("peak infected: {peak:.3} at t = {t_peak:.2}");
    }
    if let Some(last) = result.final_state() {
        println!(
            "final: S = {:.3}, I = {:.3}, R = {:.3}, total = {:.3}",
            last.susceptible(),
            last.infected(),
            last.recovered(),
            last.total()
        );
    }
}

#[cfg(feature = "plot")]
fn write_plot(result: &TrajectoryResult, model: &str, path: &Path) -> Result<(), Box<dyn Error>> {
    use sir_rs::output::{PlotConfig, plot_trajectory};

    plot_trajectory(result, path, Some(&PlotConfig::trajectory(model)))
}

#[cfg(not(feature = "plot"))]
fn write_plot(_result: &TrajectoryResult, _model: &str, path: &Path) -> Result<(), Box<dyn Error>> {
    Err(format!(
        "cannot draw {}: sir-sim was built without the `plot` feature",
        path.display()
    )
    .into())
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = SimulationConfig::from_file(&cli.config)?;
    let (scenario, configuration, solver) = config.build()?;

    info!(
        "{}: {} with {} (R0 = {:.3})",
        cli.config.display(),
        scenario.model_name(),
        solver.name(),
        config.model.basic_reproduction_number()
    );

    let result = solver.solve(&scenario, &configuration)?;
    print_summary(scenario.model_name(), solver.name(), &result);

    if let Some(path) = cli.csv.as_ref().or(config.output.csv.as_ref()) {
        let metadata = CsvMetadata::from_result(scenario.model_name(), solver.name(), &result);
        let exporter = CsvExporter::new(
            CsvConfig::default()
                .precision(config.output.precision)
                .with_metadata(metadata),
        );
        exporter.export(&result, None, path)?;
        info!("trajectory written to {}", path.display());
    }

    if let Some(path) = cli.plot.as_ref().or(config.output.plot.as_ref()) {
        write_plot(&result, scenario.model_name(), path)?;
        info!("plot written to {}", path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("sir-sim: {e}");
            ExitCode::FAILURE
        }
    }
}
