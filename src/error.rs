//! Error types for the style-transform engine.

use thiserror::Error;

/// Errors produced while normalizing, styling, or validating an icon.
///
/// [`process_svg_with_style`](crate::process_svg_with_style) never returns
/// these; it logs them and falls back to a placeholder. The fallible entry
/// points ([`style_svg`](crate::style_svg), [`SourceIcon::parse`](crate::SourceIcon::parse))
/// surface them directly.
#[derive(Debug, Error)]
pub enum StyleError {
    /// The markup has no usable `<svg>` root.
    #[error("invalid SVG: {0}")]
    InvalidSvg(&'static str),

    /// The config cannot produce a drawable canvas.
    #[error("invalid style config: {0}")]
    InvalidConfig(&'static str),

    #[error("malformed SVG markup: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed SVG attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// The generated document was rejected by the validator.
    #[error("generated SVG failed validation: {0}")]
    Validation(#[from] resvg::usvg::Error),

    #[error("config serialization error")]
    Json(#[from] serde_json::Error),

    #[error("storage I/O error")]
    Io(#[from] std::io::Error),
}
