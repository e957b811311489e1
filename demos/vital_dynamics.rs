//! Example: SIR with vital dynamics, disease mortality and waning immunity
//!
//! Loads `demos/configs/vital_dynamics.toml` (μ = 10, ρ = 0.3, ω = 0.5),
//! runs it and reports how the total population shrinks through
//! disease-induced deaths.
//!
//! ```text
//! cargo run --example vital_dynamics
//! ```

use sir_rs::config::SimulationConfig;
use sir_rs::models::ModelVariant;

const CONFIG: &str = include_str!("configs/vital_dynamics.toml");

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("═══════════════════════════════════════════════════════");
    println!("  SIR with vital dynamics");
    println!("═══════════════════════════════════════════════════════\n");

    let config = SimulationConfig::from_toml_str(CONFIG)?;

    if let ModelVariant::Advanced(params) = &config.model {
        println!("Parameters:");
        println!("  β, γ   : {}, {}", params.beta(), params.gamma());
        println!("  μ      : {}", params.mu());
        println!("  ρ      : {}", params.rho());
        println!("  ω      : {}", params.omega());
        println!("  m      : {:.6} (disease mortality)", params.disease_mortality());
        println!("  R0     : {:.4}\n", params.basic_reproduction_number());
    }

    let (scenario, configuration, solver) = config.build()?;
    let result = solver.solve(&scenario, &configuration)?;

    println!("{} with {}", scenario.model_name(), solver.name());
    println!(
        "  accepted steps : {}",
        result.metadata("accepted steps").unwrap_or("?")
    );

    println!("\n  day        S          I          R      total");
    for day in [0usize, 7, 30, 90, 180, 364] {
        if let Some(state) = result.state_at(day) {
            println!(
                "  {:>5.0} {:>10.3} {:>10.3} {:>10.3} {:>10.3}",
                result.time[day],
                state.susceptible(),
                state.infected(),
                state.recovered(),
                state.total()
            );
        }
    }

    let lost = result.total[0] - result.total[result.len() - 1];
    println!("\nPopulation lost to the disease over the horizon: {lost:.3}");

    Ok(())
}
