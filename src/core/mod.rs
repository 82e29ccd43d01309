//! Core data types and I/O operations.

pub mod geometry;
pub mod loaders;
pub mod writers;

pub use geometry::{AxisBounds, DisplacementVector, Point};
pub use loaders::{load_csv, Dataset, LoaderError};
pub use writers::{write_svg, WriteError};
