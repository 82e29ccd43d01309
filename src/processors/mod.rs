//! Data processing modules.

pub mod dipole;

// Re-export key types for convenience
pub use dipole::{
    build_dipole_figure, Annotation, Arrow, ArrowStyle, DipoleError, DipoleFigure, ScatterLayer,
    LABEL_COLUMN,
};
