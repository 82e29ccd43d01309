//! Configuration types for the dipole plotter.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Visual constants of a dipole figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotStyle {
    /// Figure title
    #[serde(default = "default_title")]
    pub title: String,

    /// Legend entry for the scatter layer
    #[serde(default = "default_legend_label")]
    pub legend_label: String,

    /// Scatter marker size as an area in points^2
    #[serde(default = "default_marker_size")]
    pub marker_size: f64,

    /// RGB color of the scatter markers
    #[serde(default = "default_marker_color")]
    pub marker_color: [u8; 3],

    /// RGB color of the first-to-last arrow
    #[serde(default = "default_resultant_color")]
    pub resultant_color: [u8; 3],

    /// RGB color of the arrows between consecutive points
    #[serde(default = "default_path_color")]
    pub path_color: [u8; 3],

    /// Arrowhead scale (head length is 0.4x, half-width 0.2x, in pixels)
    #[serde(default = "default_arrow_scale")]
    pub arrow_scale: f64,

    /// Offset of each point label from its marker, in data units
    #[serde(default = "default_label_offset")]
    pub label_offset: [f64; 2],

    /// Padding added around the data on both axes, in data units
    #[serde(default = "default_axis_padding")]
    pub axis_padding: f64,
}

fn default_title() -> String {
    "Dipole Moments (D)".to_string()
}

fn default_legend_label() -> String {
    "NLMOs".to_string()
}

fn default_marker_size() -> f64 {
    80.0
}

fn default_marker_color() -> [u8; 3] {
    [0, 0, 255] // blue
}

fn default_resultant_color() -> [u8; 3] {
    [255, 0, 0] // red
}

fn default_path_color() -> [u8; 3] {
    [0, 0, 255] // blue
}

fn default_arrow_scale() -> f64 {
    20.0
}

fn default_label_offset() -> [f64; 2] {
    [-0.1, 0.2]
}

fn default_axis_padding() -> f64 {
    1.0
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            title: default_title(),
            legend_label: default_legend_label(),
            marker_size: default_marker_size(),
            marker_color: default_marker_color(),
            resultant_color: default_resultant_color(),
            path_color: default_path_color(),
            arrow_scale: default_arrow_scale(),
            label_offset: default_label_offset(),
            axis_padding: default_axis_padding(),
        }
    }
}

/// Canvas settings used when rendering a figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureConfig {
    /// Canvas width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Canvas height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Resolution used to convert points (marker area, text offsets) to pixels
    #[serde(default = "default_dpi")]
    pub dpi: f64,

    /// Font size of the title
    #[serde(default = "default_title_font_size")]
    pub title_font_size: u32,

    /// Font size of point labels and the magnitude annotation
    #[serde(default = "default_label_font_size")]
    pub label_font_size: u32,
}

fn default_width() -> u32 {
    640
}

fn default_height() -> u32 {
    480
}

fn default_dpi() -> f64 {
    100.0
}

fn default_title_font_size() -> u32 {
    20
}

fn default_label_font_size() -> u32 {
    14
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            dpi: default_dpi(),
            title_font_size: default_title_font_size(),
            label_font_size: default_label_font_size(),
        }
    }
}

/// Main configuration combining style and canvas settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    #[serde(default)]
    pub style: PlotStyle,

    #[serde(default)]
    pub figure: FigureConfig,
}

impl PlotConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: PlotConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
