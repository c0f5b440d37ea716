//! Error taxonomy for the icon pipeline.
//!
//! Failures are scoped: a per-icon error ([`UnitError`]) aborts only the
//! atlas that depends on it, never the sibling (style, theme) units. The
//! run as a whole reports non-zero if any unit failed.

use thiserror::Error;

use crate::kind::Kind;
use crate::theme::Style;

/// Errors raised by individual pipeline stages.
#[derive(Debug, Error)]
pub enum Error {
    /// The vector source is absent for the requested style and for the
    /// fallback style. Visual content is never silently substituted.
    #[error("no vector source for slug `{slug}` in style `{style}` (fallback exhausted)")]
    MissingSource { style: Style, slug: String },

    /// The vector source is not well-formed XML.
    #[error("malformed vector source: {0}")]
    Parse(#[from] quick_xml::Error),

    /// An attribute inside the vector source could not be decoded.
    #[error("malformed vector attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// The vector source passed XML parsing but was rejected by the
    /// rendering backend.
    #[error("vector content failed to render: {0}")]
    Render(#[from] resvg::usvg::Error),

    /// A color string is not of the form `#rrggbb`.
    #[error("invalid color `{0}`, expected #rrggbb")]
    InvalidColor(String),

    /// A theme omits an entry for a required kind. Raised before any
    /// rendering or file output for that theme.
    #[error("theme `{theme}` has no icon spec for kind `{kind}`")]
    IncompleteTheme { theme: String, kind: Kind },

    /// A tightened buffer does not have the expected byte length. A
    /// wrong-sized buffer would corrupt the packer's uniform-cell layout,
    /// so this is a hard failure rather than a warning.
    #[error("tight buffer is {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Pack(#[from] PackError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The output image could not be encoded or written.
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),

    /// The atlas index could not be serialized.
    #[error("failed to serialize atlas index: {0}")]
    Index(#[from] serde_json::Error),
}

/// Errors specific to atlas packing.
#[derive(Debug, Error)]
pub enum PackError {
    /// A zero-icon atlas is invalid.
    #[error("cannot pack an empty atlas")]
    Empty,

    /// Every icon must be exactly `cell x cell`.
    #[error("icon `{kind}` is {actual} bytes, expected {expected} for the cell size")]
    NonUniformCell {
        kind: Kind,
        expected: usize,
        actual: usize,
    },
}

/// A pipeline failure annotated with the unit that produced it.
///
/// Per-icon failures identify the full (style, theme, kind, slug) tuple;
/// atlas-level failures (validation, packing, output) identify the
/// (style, theme) pair. Either kind aborts only the atlas it belongs to.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("[{style}/{theme}] kind `{kind}` (slug `{slug}`): {source}")]
    Icon {
        style: Style,
        theme: String,
        kind: Kind,
        slug: String,
        #[source]
        source: Error,
    },

    #[error("[{style}/{theme}]: {source}")]
    Atlas {
        style: Style,
        theme: String,
        #[source]
        source: Error,
    },
}
