//! # hadley
//!
//! Sign-aware color scale and legend synthesis for scientific plots.
//!
//! Hadley turns a raw numeric field (gridded or scattered values) into a
//! bounded, perceptually organized color mapping: it resolves the visible
//! value range from literal or percentile limits, detects signed
//! "difference" data and rebalances the scale symmetrically around zero,
//! discretizes a continuous color function into equal or irregular bins
//! with an optional flat neutral band near zero, and derives the tick
//! values and labels for the legend.
//!
//! ## Key properties
//!
//! - **Pure computation**: one call maps (data statistics, options) to a
//!   (colormap, tick set); no I/O beyond the optional report-max side file
//! - **Self-healing scales**: negative-only data, sparse difference data,
//!   and collapsed percentile scales are corrected automatically and the
//!   corrections logged
//! - **Explicit registry**: named color functions live in a registry
//!   object built once at startup, safe to share across threads
//!
//! ## Architecture
//!
//! - **Limits**: percentile or literal bound resolution over one-pass data
//!   statistics
//! - **Scale**: standard/difference classification, rebalancing, and the
//!   synthesis entry point [`build_scale`](scale::build_scale)
//! - **Colormaps**: the color function capability, builtins, registry,
//!   discretization, and neutral band insertion
//! - **Ticks**: legend tick planning and label rendering

pub mod colormaps;
pub mod config;
pub mod error;
pub mod limits;
pub mod logging;
pub mod scale;
pub mod ticks;

pub use colormaps::{
    Channel, ColorFunction, ColorStop, ColormapRegistry, NeutralTone, SegmentedColormap,
};
pub use config::ScaleOptions;
pub use error::{HadleyError, Result};
pub use limits::{DataStats, Limit};
pub use logging::{init_tracing, log_error, log_timed_operation};
pub use scale::{build_scale, classify, ScaleContext, ScaleResult};
pub use ticks::{plan_ticks, TickSet};
