//! Dipole figure construction.
//!
//! Turns a [`Dataset`] and two coordinate column names into a
//! [`DipoleFigure`]: an explicit description of everything that gets drawn
//! (scatter markers, point labels, the resultant arrow, the path arrows and
//! the total dipole annotation). Rendering lives in
//! [`crate::visualization`]; nothing here touches a drawing backend.

use thiserror::Error;

use crate::config::PlotStyle;
use crate::core::geometry::{format_number, AxisBounds, DisplacementVector, Point};
use crate::core::loaders::{Dataset, LoaderError};

/// Name of the column holding the point labels.
pub const LABEL_COLUMN: &str = "NLMO";

/// Errors that can occur while building a dipole figure.
#[derive(Error, Debug)]
pub enum DipoleError {
    #[error(transparent)]
    Dataset(#[from] LoaderError),

    #[error("dataset has no rows")]
    EmptyDataset,
}

/// Result type for figure construction.
pub type Result<T> = std::result::Result<T, DipoleError>;

/// Where the arrowhead sits along an arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowStyle {
    /// `->`: head at the end point.
    HeadAtEnd,
    /// `<-`: head at the start point.
    HeadAtStart,
}

impl ArrowStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArrowStyle::HeadAtEnd => "->",
            ArrowStyle::HeadAtStart => "<-",
        }
    }
}

/// A straight arrow between two data points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub start: Point,
    pub end: Point,
    pub style: ArrowStyle,
    pub color: [u8; 3],
    pub scale: f64,
}

impl Arrow {
    /// Point the arrowhead is drawn at.
    pub fn tip(&self) -> Point {
        match self.style {
            ArrowStyle::HeadAtEnd => self.end,
            ArrowStyle::HeadAtStart => self.start,
        }
    }

    /// Opposite end of the shaft from the tip.
    pub fn tail(&self) -> Point {
        match self.style {
            ArrowStyle::HeadAtEnd => self.start,
            ArrowStyle::HeadAtStart => self.end,
        }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// Text placed at a data position.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub text: String,
    pub position: Point,
    /// Extra displacement from `position`, in points (y up)
    pub offset_points: Point,
    pub color: [u8; 3],
}

/// Scatter markers for every point.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterLayer {
    pub points: Vec<Point>,
    /// Marker area in points^2
    pub marker_size: f64,
    pub color: [u8; 3],
    pub legend: String,
}

impl ScatterLayer {
    /// Marker radius in pixels at `dpi`, for an area given in points^2.
    pub fn marker_radius(&self, dpi: f64) -> i32 {
        (self.marker_size.max(0.0).sqrt() / 2.0 * points_to_pixels(dpi)).round() as i32
    }
}

/// Pixels per typographic point at `dpi`.
#[inline]
pub fn points_to_pixels(dpi: f64) -> f64 {
    dpi / 72.0
}

/// Everything needed to draw one dipole figure.
#[derive(Debug, Clone, PartialEq)]
pub struct DipoleFigure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub grid: bool,
    pub bounds: AxisBounds,
    pub scatter: ScatterLayer,
    /// One label per point, in row order
    pub labels: Vec<Annotation>,
    /// First point to last point
    pub resultant: Arrow,
    /// One arrow per consecutive pair of points
    pub path: Vec<Arrow>,
    /// Resultant length rounded to two decimals
    pub total_dipole: f64,
    pub dipole_label: Annotation,
}

const LABEL_COLOR: [u8; 3] = [0, 0, 0];

const NO_OFFSET: Point = Point { x: 0.0, y: 0.0 };

/// Build the dipole figure for `dataset`, using `x_column` and `y_column` as
/// planar coordinates and the `NLMO` column as point labels.
///
/// # Errors
///
/// Returns a dataset error if any of the three columns is missing or a
/// coordinate cell is not numeric, and `EmptyDataset` if there are no rows.
pub fn build_dipole_figure(
    dataset: &Dataset,
    x_column: &str,
    y_column: &str,
    style: &PlotStyle,
) -> Result<DipoleFigure> {
    let xs = dataset.numeric_column(x_column)?;
    let ys = dataset.numeric_column(y_column)?;
    let names = dataset.column(LABEL_COLUMN)?;

    let points: Vec<Point> = xs
        .iter()
        .zip(ys.iter())
        .map(|(&x, &y)| Point::new(x, y))
        .collect();

    let displacement =
        DisplacementVector::from_sequence(&points).ok_or(DipoleError::EmptyDataset)?;
    let bounds = AxisBounds::shared(&xs, &ys, style.axis_padding)
        .ok_or(DipoleError::EmptyDataset)?;
    let total_dipole = displacement.magnitude();

    log::debug!(
        "{} points from ({}, {}); total dipole {}",
        points.len(),
        x_column,
        y_column,
        total_dipole
    );

    let [dx, dy] = style.label_offset;
    let labels = names
        .iter()
        .zip(points.iter())
        .map(|(name, point)| Annotation {
            text: name.to_string(),
            position: point.offset(dx, dy),
            offset_points: NO_OFFSET,
            color: LABEL_COLOR,
        })
        .collect();

    let resultant = Arrow {
        start: displacement.start,
        end: displacement.end,
        style: ArrowStyle::HeadAtEnd,
        color: style.resultant_color,
        scale: style.arrow_scale,
    };

    let path: Vec<Arrow> = points
        .windows(2)
        .map(|pair| Arrow {
            start: pair[1],
            end: pair[0],
            style: ArrowStyle::HeadAtStart,
            color: style.path_color,
            scale: style.arrow_scale,
        })
        .collect();

    log::debug!(
        "resultant '{}', {} path arrows '{}'",
        resultant.style.as_str(),
        path.len(),
        ArrowStyle::HeadAtStart.as_str()
    );

    // The anchor doubles as a text offset in points
    let anchor = displacement.annotation_anchor();
    let dipole_label = Annotation {
        text: format_number(total_dipole),
        position: anchor,
        offset_points: anchor,
        color: style.resultant_color,
    };

    Ok(DipoleFigure {
        title: style.title.clone(),
        x_label: "X".to_string(),
        y_label: "Y".to_string(),
        grid: true,
        bounds,
        scatter: ScatterLayer {
            points,
            marker_size: style.marker_size,
            color: style.marker_color,
            legend: style.legend_label.clone(),
        },
        labels,
        resultant,
        path,
        total_dipole,
        dipole_label,
    })
}
