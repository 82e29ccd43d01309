//! Dipole moment plots for localized-orbital (NLMO) analyses.
//!
//! This crate provides tools for:
//! - Loading NLMO dipole tables from CSV into an ordered [`Dataset`]
//! - Computing the resultant dipole and shared plot bounds
//! - Rendering the annotated scatter/arrow figure to SVG or PNG
//!
//! # Example
//!
//! ```no_run
//! use dipole_plot::{load_csv, plot_dip};
//!
//! let df = load_csv("dipoles.csv").unwrap();
//! let rendered = plot_dip(&df, "newXa", "newYa").unwrap();
//! std::fs::write("dipoles.svg", &rendered.svg).unwrap();
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod processors;
pub mod visualization;

pub use crate::config::{FigureConfig, PlotConfig, PlotStyle};
pub use crate::core::loaders::{load_csv, Dataset};
pub use crate::processors::dipole::{build_dipole_figure, DipoleFigure};
pub use crate::visualization::{plot_dip, plot_dip_with, render_svg, save_figure, RenderedFigure};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
