//! icon-styler: restyle SVG icons as neumorphic, glass, pixel-art or flat cards
//!
//! The engine takes one source icon and one [`IconConfig`] and returns a
//! complete, self-contained SVG document: the icon fitted onto a styled card,
//! recolored, with every filter and gradient it needs in its own `<defs>`.
//!
//! # Example
//!
//! ```
//! use icon_styler::{IconConfig, StylePreset, process_svg_with_style};
//!
//! let home = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="currentColor">
//!   <path d="M10 20v-6h4v6h5v-8h3L12 3 2 12h3v8z"/>
//! </svg>"#;
//!
//! let config = IconConfig::new(StylePreset::Neumorphism).with_icon_color("#3b82f6");
//! let styled = process_svg_with_style(home, &config);
//!
//! // The canvas grows to make room for the shadows.
//! assert!(styled.contains(r#"viewBox="0 0 152 152""#));
//! assert!(styled.contains(r##"fill="#3b82f6""##));
//! ```
//!
//! Bad input never panics; it yields a placeholder document:
//!
//! ```
//! use icon_styler::{IconConfig, process_svg_with_style};
//!
//! let styled = process_svg_with_style("<not-svg/>", &IconConfig::default());
//! assert!(styled.contains("Error processing SVG"));
//! ```
//!
//! # Stages
//!
//! 1. [`SourceIcon::parse`] normalizes the input: view box, stroke or fill
//!    coloring, inner content and source `<defs>`.
//! 2. [`Geometry`] fits the view box onto the card.
//! 3. The layer pipeline synthesizes the preset's defs, background and
//!    decorations.
//! 4. [`ExpandedCanvas`] grows the canvas for shadows that reach past the card.
//! 5. The composer assembles the document and checks it with an
//!    [`SvgValidator`].

mod color;
mod compose;
mod config;
mod error;
mod expand;
mod geometry;
mod icon;
mod layer;
mod store;
mod stylizer;
mod svg;

#[cfg(feature = "tsify")]
mod wasm;

pub use compose::{compose, fallback_svg, process_svg_with_style, style_svg};
pub use config::{
    DropShadowConfig, GlassConfig, GradientConfig, IconConfig, MIN_PIXEL_SIZE, OutlineConfig,
    StylePreset,
};
pub use error::StyleError;
pub use expand::{ExpandedCanvas, NEUMORPHISM_EXPANSION, expansion_needed};
pub use geometry::{Geometry, MIN_SCALE};
pub use icon::{IconPaint, Rect, SourceIcon, ViewBox};
pub use layer::{
    BackgroundPaint, DropShadowLayer, GlassLayer, GradientLayer, NeumorphismLayer, OutlineLayer,
    PixelArtLayer, RenderContext, StyleEffect, StylePipeline,
};
pub use store::{
    DEFAULT_GRADIENT_KEY, FileGradientStore, GradientStore, MemoryGradientStore,
    default_gradient, fallback_gradient, save_default_gradient,
};
pub use stylizer::{IconStylizer, MAX_CACHED_OUTPUTS};
pub use svg::{NoValidation, SvgValidator, UsvgValidator, render_svg};

#[cfg(feature = "tsify")]
pub use wasm::{StylePreview, process_svg_with_style_js};
