//! Plot configuration

use plotters::prelude::*;

/// Configuration for customizing trajectory plots
///
/// # Example
///
/// ```rust
/// use sir_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::trajectory("Measles outbreak");
/// config.width = 1920;
/// config.height = 1080;
/// config.infected_color = MAGENTA;
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    pub title: String,
    pub xlabel: String,
    pub ylabel: String,

    /// Curve colors (defaults: blue, red, green, black)
    pub susceptible_color: RGBColor,
    pub infected_color: RGBColor,
    pub recovered_color: RGBColor,
    pub total_color: RGBColor,

    /// Draw the `S + I + R` curve (default: true)
    pub show_total: bool,

    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "SIR Model".to_string(),
            xlabel: "Time".to_string(),
            ylabel: "Population".to_string(),
            susceptible_color: BLUE,
            infected_color: RED,
            recovered_color: GREEN,
            total_color: BLACK,
            show_total: true,
            background: WHITE,
            line_width: 2,
            show_grid: true,
        }
    }
}

impl PlotConfig {
    /// Default configuration with a custom title
    pub fn trajectory(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}
