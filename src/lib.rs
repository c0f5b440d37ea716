//! iconsmith: themed icon rasterization and sprite-atlas generation.
//!
//! This crate turns a library of SVG icon sources into themed raster
//! artifacts for an editor that labels semantic symbol kinds with icons.
//! For every (style, theme, kind) unit it recolors the vector source,
//! rasterizes it to a fixed-size RGBA square, normalizes the buffer to
//! stride-free pixel data, and packs all kinds of one (style, theme) into
//! a horizontal sprite atlas with a JSON index. A combined preview image
//! summarizes every atlas for human review.
//!
//! # Example
//!
//! ```
//! use iconsmith::{Kind, TightBuffer, pack};
//!
//! let icons: Vec<_> = Kind::ALL
//!     .iter()
//!     .map(|kind| (*kind, TightBuffer::new(16, 16, vec![0; 16 * 16 * 4])))
//!     .collect();
//!
//! let atlas = pack(&icons, 16, 2, "atlas.png").unwrap();
//! assert_eq!(atlas.image.width(), 11 * 16 + 10 * 2);
//! assert_eq!(atlas.index.map["ClassMethod"].index, 0);
//! ```
//!
//! The full batch sweep lives in [`pipeline::run`], driven by a
//! [`PipelineConfig`] and a set of [`Theme`]s (see
//! [`builtin_themes`](theme::builtin_themes)).

mod atlas;
mod error;
mod kind;
mod preview;
mod raster;
mod recolor;

pub mod pipeline;
pub mod theme;

pub use atlas::{Atlas, AtlasIndex, AtlasSlot, pack};
pub use error::{Error, PackError, RunError};
pub use kind::Kind;
pub use pipeline::{PipelineConfig, RunSummary, run};
pub use preview::compose;
pub use raster::{RasterImage, TightBuffer, rasterize};
pub use recolor::recolor;
pub use theme::{HexColor, IconSpec, Style, Theme, builtin_themes};
