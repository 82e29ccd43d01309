//! Rendering of dipole figures.
//!
//! This module draws a [`DipoleFigure`] with the plotters library, either
//! into an in-memory SVG document or to an SVG/PNG file, and provides the
//! [`plot_dip`] entry point that builds and renders in one call.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
#[cfg(feature = "ttf")]
use plotters_bitmap::BitMapBackend;
use thiserror::Error;

use crate::config::{FigureConfig, PlotConfig};
use crate::core::loaders::Dataset;
use crate::core::writers::{ensure_parent_dirs, WriteError};
use crate::processors::dipole::{
    build_dipole_figure, points_to_pixels, Annotation, DipoleError, DipoleFigure,
};

/// Errors that can occur during visualization.
#[derive(Error, Debug)]
pub enum VisualizationError {
    #[error("Plotting error: {0}")]
    PlottingError(String),

    #[error(transparent)]
    Dipole(#[from] DipoleError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Result type for visualization operations.
pub type Result<T> = std::result::Result<T, VisualizationError>;

/// A built figure together with its SVG rendering.
#[derive(Debug, Clone)]
pub struct RenderedFigure {
    pub figure: DipoleFigure,
    pub svg: String,
}

impl RenderedFigure {
    /// Write the SVG document to `path`.
    pub fn save_svg(&self, path: &Path) -> Result<()> {
        crate::core::writers::write_svg(path, &self.svg)?;
        Ok(())
    }
}

/// Head length of an arrow as a fraction of its scale.
const HEAD_LENGTH: f64 = 0.4;

/// Half-width of an arrowhead as a fraction of its scale.
const HEAD_HALF_WIDTH: f64 = 0.2;

const SHAFT_WIDTH: u32 = 2;

fn plot_err<E: std::fmt::Display>(e: E) -> VisualizationError {
    VisualizationError::PlottingError(e.to_string())
}

#[inline]
fn rgb(c: [u8; 3]) -> RGBColor {
    RGBColor(c[0], c[1], c[2])
}

/// Plot the dipole figure for `dataset` with the default configuration.
///
/// `x_column` and `y_column` name the coordinate columns; labels come from
/// the `NLMO` column. The figure is returned to the caller, nothing is
/// displayed or written.
///
/// # Example
///
/// ```no_run
/// use dipole_plot::{load_csv, plot_dip};
///
/// let df = load_csv("dipoles.csv").unwrap();
/// let rendered = plot_dip(&df, "newXa", "newYa").unwrap();
/// println!("total dipole: {}", rendered.figure.total_dipole);
/// ```
pub fn plot_dip(dataset: &Dataset, x_column: &str, y_column: &str) -> Result<RenderedFigure> {
    plot_dip_with(dataset, x_column, y_column, &PlotConfig::default())
}

/// Same as [`plot_dip`] with explicit style and canvas settings.
pub fn plot_dip_with(
    dataset: &Dataset,
    x_column: &str,
    y_column: &str,
    config: &PlotConfig,
) -> Result<RenderedFigure> {
    let figure = build_dipole_figure(dataset, x_column, y_column, &config.style)?;
    let svg = render_svg(&figure, &config.figure)?;
    Ok(RenderedFigure { figure, svg })
}

/// Render a figure into an SVG document held in memory.
pub fn render_svg(figure: &DipoleFigure, config: &FigureConfig) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (config.width, config.height))
            .into_drawing_area();
        draw_figure(&root, figure, config)?;
    }
    Ok(svg)
}

/// Render a figure to a file. A `.png` extension selects the bitmap
/// backend; anything else is written as SVG.
///
/// # Errors
///
/// PNG output needs a font rasteriser; without the `ttf` feature a `.png`
/// path fails with `PlottingError` and nothing is written.
pub fn save_figure(path: &Path, figure: &DipoleFigure, config: &FigureConfig) -> Result<()> {
    let is_png = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false);

    if is_png {
        save_png(path, figure, config)?;
    } else {
        ensure_parent_dirs(path)?;
        let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
        draw_figure(&root, figure, config)?;
    }

    log::info!("Figure -> {}", path.display());
    Ok(())
}

#[cfg(feature = "ttf")]
fn save_png(path: &Path, figure: &DipoleFigure, config: &FigureConfig) -> Result<()> {
    ensure_parent_dirs(path)?;
    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    draw_figure(&root, figure, config)
}

#[cfg(not(feature = "ttf"))]
fn save_png(_path: &Path, _figure: &DipoleFigure, _config: &FigureConfig) -> Result<()> {
    // The bitmap backend panics on text without a rasteriser
    Err(VisualizationError::PlottingError(
        "PNG output requires the `ttf` feature".to_string(),
    ))
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &DipoleFigure,
    config: &FigureConfig,
) -> Result<()> {
    root.fill(&WHITE).map_err(plot_err)?;

    let bounds = &figure.bounds;
    let mut chart = ChartBuilder::on(root)
        .caption(
            &figure.title,
            ("sans-serif", config.title_font_size as f64).into_font(),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(bounds.x_min..bounds.x_max, bounds.y_min..bounds.y_max)
        .map_err(plot_err)?;

    {
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(figure.x_label.as_str())
            .y_desc(figure.y_label.as_str());
        if !figure.grid {
            mesh.disable_mesh();
        }
        mesh.draw().map_err(plot_err)?;
    }

    // Markers
    let marker_color = rgb(figure.scatter.color);
    let radius = figure.scatter.marker_radius(config.dpi);
    chart
        .draw_series(
            figure
                .scatter
                .points
                .iter()
                .map(|p| Circle::new((p.x, p.y), radius, marker_color.filled())),
        )
        .map_err(plot_err)?
        .label(figure.scatter.legend.as_str())
        .legend(move |(x, y)| Circle::new((x, y), radius, marker_color.filled()));

    // Point labels
    for label in &figure.labels {
        let pos = chart.backend_coord(&(label.position.x, label.position.y));
        root.draw(&annotation_text(label, pos, config))
            .map_err(plot_err)?;
    }

    // Resultant first, then the path on top of it
    for arrow in std::iter::once(&figure.resultant).chain(figure.path.iter()) {
        let color = rgb(arrow.color);
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(arrow.start.x, arrow.start.y), (arrow.end.x, arrow.end.y)],
                color.stroke_width(SHAFT_WIDTH),
            )))
            .map_err(plot_err)?;

        let tip = chart.backend_coord(&(arrow.tip().x, arrow.tip().y));
        let tail = chart.backend_coord(&(arrow.tail().x, arrow.tail().y));
        if let Some(head) = arrowhead(tip, tail, arrow.scale) {
            root.draw(&PathElement::new(head.to_vec(), color.stroke_width(SHAFT_WIDTH)))
                .map_err(plot_err)?;
        }
    }

    let label = &figure.dipole_label;
    let pos = chart.backend_coord(&(label.position.x, label.position.y));
    root.draw(&annotation_text(label, pos, config))
        .map_err(plot_err)?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;

    log::debug!(
        "Rendered {} markers, {} path arrows",
        figure.scatter.points.len(),
        figure.path.len()
    );

    Ok(())
}

/// Text element for `annotation`, anchored at the backend pixel `anchor`
/// and shifted by the annotation's point offset.
fn annotation_text(
    annotation: &Annotation,
    anchor: (i32, i32),
    config: &FigureConfig,
) -> Text<'static, (i32, i32), String> {
    let style = ("sans-serif", config.label_font_size as f64)
        .into_font()
        .color(&rgb(annotation.color))
        .pos(Pos::new(HPos::Left, VPos::Bottom));
    let (dx, dy) = offset_pixels(
        (annotation.offset_points.x, annotation.offset_points.y),
        config.dpi,
    );
    Text::new(annotation.text.clone(), (anchor.0 + dx, anchor.1 + dy), style)
}

/// Converts an offset in points (y up) to backend pixels (y down).
fn offset_pixels(offset: (f64, f64), dpi: f64) -> (i32, i32) {
    let scale = points_to_pixels(dpi);
    (
        (offset.0 * scale).round() as i32,
        (-offset.1 * scale).round() as i32,
    )
}

/// Open arrowhead polyline `[left, tip, right]` in backend pixels.
///
/// Returns `None` when tip and tail coincide, since the direction is
/// undefined.
fn arrowhead(tip: (i32, i32), tail: (i32, i32), scale: f64) -> Option<[(i32, i32); 3]> {
    let dx = (tip.0 - tail.0) as f64;
    let dy = (tip.1 - tail.1) as f64;
    let len = (dx * dx + dy * dy).sqrt();
    if len < f64::EPSILON {
        return None;
    }

    let (ux, uy) = (dx / len, dy / len);
    let head_len = HEAD_LENGTH * scale;
    let half_width = HEAD_HALF_WIDTH * scale;

    let base_x = tip.0 as f64 - ux * head_len;
    let base_y = tip.1 as f64 - uy * head_len;

    let left = (
        (base_x - uy * half_width).round() as i32,
        (base_y + ux * half_width).round() as i32,
    );
    let right = (
        (base_x + uy * half_width).round() as i32,
        (base_y - ux * half_width).round() as i32,
    );

    Some([left, tip, right])
}
