//! Buffer-overview rasterization engine.
//!
//! `glance` turns arbitrary text into a compact, fixed-size grid of visual
//! symbols -- the raster behind a minimap -- and maintains a consistent
//! bidirectional mapping between source line numbers and rendered rows so a
//! host can place scroll indicators and jump from the overview back to the
//! buffer.
//!
//! # Pipeline
//!
//! ```text
//! text lines
//!   | Mask          occupancy classification (tabs expanded, per codepoint)
//! jagged bool grid
//!   | rescale       lossy OR-reduction binning into the target extent
//! dense bool grid
//!   | SymbolTable   block bit-packing into a symbol alphabet
//! rendered rows  +  ScaleCache (line <-> row conversion factors)
//! ```
//!
//! [`encode`] runs the pipeline once; [`MapSession`] owns the state of one
//! overview instance and adds coordinated refresh: three independently
//! cacheable aspects (content, indicators, annotations) recomputed only when
//! their inputs change. See [`refresh`] for the trigger model.
//!
//! The encoding is deliberately lossy: it preserves "some non-blank content
//! in this cell" versus "entirely blank", nothing more, and the coordinate
//! mapping is row-granular. [`ScaleCache`] documents the round-trip bound.

pub mod config;
mod encode;
mod error;
mod mask;
pub mod refresh;
mod rescale;
mod scale;
mod session;
pub mod symbols;

pub use config::Config;
pub use encode::{encode, encode_mask, EncodeOptions, EncodeOptionsBuilder, Limit, Rendered};
pub use error::{Error, Result};
pub use mask::Mask;
pub use refresh::{
    Annotation, AnnotationFrame, AnnotationKind, IndicatorFrame, OverviewSource, RefreshOutcome,
    RowMark, Trigger,
};
pub use rescale::Grid;
pub use scale::ScaleCache;
pub use session::MapSession;
pub use symbols::{Resolution, SymbolTable};
