//! Command-line interface for the dipole plotter.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::core::geometry::format_number;
use crate::core::loaders;
use crate::processors::dipole::build_dipole_figure;
use crate::visualization;
use crate::PlotConfig;

#[derive(Parser)]
#[command(name = "dipole-plot")]
#[command(about = "Plot NLMO dipole contributions with their resultant vector", version)]
pub struct Cli {
    /// Path to YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the dipole figure for a CSV table (SVG or PNG)
    Plot {
        /// Input CSV file with an NLMO column
        csv_file: PathBuf,
        /// Column holding X coordinates
        #[arg(short = 'x', long, default_value = "X")]
        x_column: String,
        /// Column holding Y coordinates
        #[arg(short = 'y', long, default_value = "Y")]
        y_column: String,
        /// Output file (defaults to the input name with .svg extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Canvas width in pixels
        #[arg(long)]
        width: Option<u32>,
        /// Canvas height in pixels
        #[arg(long)]
        height: Option<u32>,
    },

    /// Print the total dipole and plot bounds without rendering
    Summary {
        /// Input CSV file with an NLMO column
        csv_file: PathBuf,
        /// Column holding X coordinates
        #[arg(short = 'x', long, default_value = "X")]
        x_column: String,
        /// Column holding Y coordinates
        #[arg(short = 'y', long, default_value = "Y")]
        y_column: String,
    },

    /// Write the default configuration as YAML
    InitConfig {
        /// Destination YAML file
        path: PathBuf,
    },
}

/// Create a spinner for indeterminate operations
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Print a summary box
fn print_summary(title: &str, items: &[(&str, String)]) {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║ {:<60} ║", title);
    println!("╠══════════════════════════════════════════════════════════════╣");
    for (key, value) in items {
        let display_value = if value.chars().count() > 38 {
            format!("{}...", value.chars().take(35).collect::<String>())
        } else {
            value.clone()
        };
        println!("║ {:<20}: {:<38} ║", key, display_value);
    }
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
}

pub fn run() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity (must come first)
    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .format_timestamp_secs()
        .init();

    let config = match &cli.config {
        Some(path) => match PlotConfig::from_yaml(path) {
            Ok(cfg) => {
                info!("Loaded config from: {}", path.display());
                cfg
            }
            Err(e) => {
                warn!("Failed to load config from {}: {}, using defaults", path.display(), e);
                PlotConfig::default()
            }
        },
        None => PlotConfig::default(),
    };

    let result = match cli.command {
        Commands::Plot { csv_file, x_column, y_column, output, width, height } => {
            cmd_plot(&csv_file, &x_column, &y_column, output, width, height, config)
        }
        Commands::Summary { csv_file, x_column, y_column } => {
            cmd_summary(&csv_file, &x_column, &y_column, &config)
        }
        Commands::InitConfig { path } => cmd_init_config(&path),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn cmd_plot(
    csv_file: &Path,
    x_column: &str,
    y_column: &str,
    output: Option<PathBuf>,
    width: Option<u32>,
    height: Option<u32>,
    mut config: PlotConfig,
) -> Result<()> {
    let start = Instant::now();

    if let Some(w) = width {
        config.figure.width = w;
    }
    if let Some(h) = height {
        config.figure.height = h;
    }

    let output_path = output.unwrap_or_else(|| csv_file.with_extension("svg"));

    let spinner = create_spinner("Loading dataset...");
    let dataset = loaders::load_csv(csv_file);
    let dataset = match dataset {
        Ok(ds) => ds,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e).with_context(|| format!("failed to load {}", csv_file.display()));
        }
    };

    spinner.set_message("Rendering figure...");
    let rendered = build_dipole_figure(&dataset, x_column, y_column, &config.style)
        .map_err(visualization::VisualizationError::from)
        .and_then(|figure| {
            visualization::save_figure(&output_path, &figure, &config.figure)?;
            Ok(figure)
        });
    spinner.finish_and_clear();

    let figure = rendered.with_context(|| {
        format!("failed to plot {} ({} vs {})", csv_file.display(), y_column, x_column)
    })?;

    print_summary(
        "Dipole Plot Complete",
        &[
            ("Input file", csv_file.display().to_string()),
            ("Output file", output_path.display().to_string()),
            ("Columns", format!("{} / {}", x_column, y_column)),
            ("NLMOs", figure.scatter.points.len().to_string()),
            ("Total dipole (D)", format_number(figure.total_dipole)),
            ("Duration", format!("{:.2?}", start.elapsed())),
        ],
    );

    Ok(())
}

fn cmd_summary(csv_file: &Path, x_column: &str, y_column: &str, config: &PlotConfig) -> Result<()> {
    let dataset = loaders::load_csv(csv_file)
        .with_context(|| format!("failed to load {}", csv_file.display()))?;
    let figure = build_dipole_figure(&dataset, x_column, y_column, &config.style)
        .with_context(|| format!("failed to read {} / {}", x_column, y_column))?;

    let first = figure.resultant.start;
    let last = figure.resultant.end;
    let bounds = figure.bounds;

    print_summary(
        "Dipole Summary",
        &[
            ("Input file", csv_file.display().to_string()),
            ("NLMOs", figure.scatter.points.len().to_string()),
            ("First point", format!("({}, {})", first.x, first.y)),
            ("Last point", format!("({}, {})", last.x, last.y)),
            ("Total dipole (D)", format_number(figure.total_dipole)),
            ("Axis limits", format!("[{}, {}]", bounds.x_min, bounds.x_max)),
        ],
    );

    Ok(())
}

fn cmd_init_config(path: &Path) -> Result<()> {
    PlotConfig::default()
        .to_yaml(path)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Default configuration written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_plot_defaults() {
        let cli = Cli::try_parse_from(["dipole-plot", "plot", "dipoles.csv"]).unwrap();
        match cli.command {
            Commands::Plot { csv_file, x_column, y_column, output, .. } => {
                assert_eq!(csv_file, PathBuf::from("dipoles.csv"));
                assert_eq!(x_column, "X");
                assert_eq!(y_column, "Y");
                assert!(output.is_none());
            }
            _ => panic!("Expected plot command"),
        }
    }

    #[test]
    fn test_parse_plot_columns() {
        let cli = Cli::try_parse_from([
            "dipole-plot", "-vv", "plot", "dipoles.csv", "-x", "newXa", "-y", "newYa", "-o",
            "out.png",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Plot { x_column, y_column, output, .. } => {
                assert_eq!(x_column, "newXa");
                assert_eq!(y_column, "newYa");
                assert_eq!(output, Some(PathBuf::from("out.png")));
            }
            _ => panic!("Expected plot command"),
        }
    }

    #[test]
    fn test_init_config_writes_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.yaml");

        cmd_init_config(&path).unwrap();

        let loaded = PlotConfig::from_yaml(&path).unwrap();
        assert_eq!(loaded, PlotConfig::default());
    }
}
