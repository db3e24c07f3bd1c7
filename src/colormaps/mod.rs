//! Color function synthesis for scale visualization.
//!
//! This module provides the continuous color function capability, the
//! builtin maps, the explicit registry, and the two transformations the
//! scale builder applies: discretization and neutral band insertion.

pub mod builtin;
pub mod discretize;
pub mod function;
pub mod neutral;
pub mod registry;

pub use discretize::{calc_bins, discretize_equal, discretize_uneven};
pub use function::{parse_color, Channel, ColorFunction, ColorStop, SegmentedColormap};
pub use neutral::{insert_neutral, NeutralTone};
pub use registry::ColormapRegistry;
