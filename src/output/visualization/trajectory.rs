//! Compartment trajectories over time
//!
//! Draws S (blue), I (red), R (green) and the total population (black)
//! against time on a single chart.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use super::PlotConfig;
use crate::solver::TrajectoryResult;

/// Plot the compartments of a trajectory
///
/// # Arguments
///
/// * `result`      - Simulation result
/// * `output_path` - Output file path (`.svg` → vector, anything else → bitmap)
/// * `config`      - Optional plot configuration; `None` uses defaults
///
/// # Errors
///
/// Returns `Err` if `result` is empty or the backend cannot write to
/// `output_path`.
pub fn plot_trajectory(
    result: &TrajectoryResult,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if result.is_empty() {
        return Err("empty result: nothing to plot".into());
    }

    let default_config = PlotConfig::default();
    let config = config.unwrap_or(&default_config);
    let output_path = output_path.as_ref();

    let ext = output_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_trajectory_impl(backend, result, config)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_trajectory_impl(backend, result, config)
        }
    }
}

/// Upper bound of the y axis
fn max_population(result: &TrajectoryResult) -> f64 {
    [&result.susceptible, &result.infected, &result.recovered, &result.total]
        .into_iter()
        .flatten()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max)
        .max(1e-10)
}

fn plot_trajectory_impl<DB: DrawingBackend>(
    backend: DB,
    result: &TrajectoryResult,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let t_min = result.time[0];
    let t_max = result.time[result.len() - 1].max(t_min + 1e-10);
    let y_max = max_population(result);

    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(t_min..t_max, 0.0..(y_max * 1.05))?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.0}", x))
            .y_label_formatter(&|y| format!("{:.0}", y))
            .draw()?;
    }

    let mut curves = vec![
        ("Susceptible", &result.susceptible, config.susceptible_color),
        ("Infected", &result.infected, config.infected_color),
        ("Recovered", &result.recovered, config.recovered_color),
    ];
    if config.show_total {
        curves.push(("Total", &result.total, config.total_color));
    }

    for (label, values, color) in curves {
        chart
            .draw_series(LineSeries::new(
                result.time.iter().zip(values.iter()).map(|(t, v)| (*t, *v)),
                ShapeStyle::from(&color).stroke_width(config.line_width),
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    chart
        .configure_series_labels()
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epidemic::CompartmentState;

    fn result() -> TrajectoryResult {
        let states: Vec<CompartmentState> = (0..50)
            .map(|i| {
                let r = 2.0 * i as f64;
                CompartmentState::new(100.0 - r, 0.0, r)
            })
            .collect();
        TrajectoryResult::new((0..50).map(f64::from).collect(), &states)
    }

    #[test]
    fn test_max_population() {
        assert_eq!(max_population(&result()), 100.0);
    }

    #[test]
    fn test_plot_trajectory_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sir.svg");

        plot_trajectory(&result(), &path, None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_trajectory_png_custom_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sir.png");

        let mut config = PlotConfig::trajectory("Closed population");
        config.show_total = false;
        plot_trajectory(&result(), &path, Some(&config)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_rejects_empty_result() {
        let dir = tempfile::tempdir().unwrap();
        let empty = TrajectoryResult::new(Vec::new(), &[]);

        assert!(plot_trajectory(&empty, dir.path().join("x.svg"), None).is_err());
    }
}
