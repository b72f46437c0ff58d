//! Style synthesis layers.
//!
//! Each layer contributes to a shared [`RenderContext`]: `<defs>` entries,
//! background paint and filters, decorations drawn over the card, and
//! filter/opacity attributes for the icon group. The composer turns the
//! finished context into markup.
//!
//! # Architecture
//!
//! Each layer implements [`StyleEffect`], which defines:
//! - How the layer writes itself into the context
//! - What properties it emits for downstream layers
//!
//! Properties flow through the pipeline via [`RenderContext`], so the
//! pixel-art layer can tell whether a gradient already claimed the
//! background without knowing about the gradient layer.

pub mod gradient;
pub mod glass;
pub mod neumorphism;
pub mod outline;
pub mod pixel;
pub mod shadow;

pub use gradient::GradientLayer;
pub use glass::GlassLayer;
pub use neumorphism::NeumorphismLayer;
pub use outline::OutlineLayer;
pub use pixel::PixelArtLayer;
pub use shadow::DropShadowLayer;

use std::any::{Any, TypeId};
use std::collections::HashMap;

use quick_xml::escape::escape;

use crate::config::{IconConfig, StylePreset};
use crate::expand::ExpandedCanvas;
use crate::icon::Rect;

// ============================================================================
// Markup Helpers
// ============================================================================

/// Formats a number for SVG output: at most three decimals, no trailing zeros.
pub fn num(value: f32) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 || !rounded.is_finite() {
        return "0".into();
    }
    let text = format!("{rounded:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Renders ` name="value"` pairs, escaping the values.
pub fn attributes<K: AsRef<str>>(attrs: &[(K, String)]) -> String {
    attrs
        .iter()
        .map(|(name, value)| format!(r#" {}="{}""#, name.as_ref(), escape(value.as_str())))
        .collect()
}

/// Renders a rounded `<rect>` at canvas coordinates.
pub fn rect_element(rect: Rect, radius: f32, attrs: &[(&'static str, String)]) -> String {
    format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{r}" ry="{r}"{}/>"#,
        num(rect.x),
        num(rect.y),
        num(rect.width),
        num(rect.height),
        attributes(attrs),
        r = num(radius.max(0.0)),
    )
}

// ============================================================================
// Render Context
// ============================================================================

/// Paint and effects of the card background.
#[derive(Debug, Clone, Default)]
pub struct Background {
    /// Fill value: a color or a `url(#...)` paint server reference.
    pub paint: String,
    pub fill_opacity: Option<f32>,
    /// Filter tokens, combined in order on the `filter` attribute.
    pub filters: Vec<String>,
    /// Id of a clip path wrapping the background.
    pub clip_path: Option<String>,
}

/// A rounded rect drawn over the background, in card-local coordinates.
#[derive(Debug, Clone)]
pub struct Decoration {
    pub rect: Rect,
    pub radius: f32,
    pub attributes: Vec<(&'static str, String)>,
}

/// Effects applied to the icon group.
#[derive(Debug, Clone, Default)]
pub struct IconEffects {
    pub filters: Vec<String>,
    pub opacity: Option<f32>,
}

/// Context that flows through the style pipeline.
pub struct RenderContext<'a> {
    pub config: &'a IconConfig,

    /// Output canvas, already grown by any needed expansion.
    pub canvas: ExpandedCanvas,

    pub background: Background,
    pub decorations: Vec<Decoration>,
    pub icon: IconEffects,

    /// Rendering hints for the root `<svg>` element.
    pub root_attributes: Vec<(&'static str, String)>,

    defs: Vec<String>,

    /// Typed property bag for inter-layer communication.
    properties: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a IconConfig, canvas: ExpandedCanvas) -> Self {
        Self {
            config,
            canvas,
            background: Background {
                paint: config.background_color.clone(),
                ..Background::default()
            },
            decorations: Vec::new(),
            icon: IconEffects::default(),
            root_attributes: Vec::new(),
            defs: Vec::new(),
            properties: HashMap::new(),
        }
    }

    /// The card in card-local coordinates (origin at its top-left corner).
    pub fn card(&self) -> Rect {
        Rect::from_size(self.config.width, self.config.height)
    }

    /// Appends a `<defs>` entry.
    pub fn add_def(&mut self, def: String) {
        self.defs.push(def);
    }

    /// Synthesized `<defs>` entries, in insertion order.
    pub fn defs(&self) -> &[String] {
        &self.defs
    }

    /// Sets a typed property that downstream layers can read.
    pub fn set<T: Any + Send + Sync>(&mut self, value: T) {
        self.properties.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Gets a typed property set by an upstream layer.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.properties
            .get(&TypeId::of::<T>())
            .and_then(|b| b.downcast_ref())
    }

    /// Checks if a property has been set.
    pub fn has<T: Any + Send + Sync>(&self) -> bool {
        self.properties.contains_key(&TypeId::of::<T>())
    }
}

// ============================================================================
// Common Properties
// ============================================================================

/// A paint server that has claimed the card background.
///
/// Emitted by the gradient layer. Consumed by the pixel-art layer, which only
/// draws its checkerboard when no other paint is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundPaint(pub String);

// ============================================================================
// StyleEffect
// ============================================================================

/// A layer that knows how to write itself into a [`RenderContext`].
///
/// The separation of [`transform`](Self::transform) and [`emit`](Self::emit)
/// keeps property emission in one place.
pub trait StyleEffect {
    /// Writes defs, paint, decorations or icon effects into the context.
    fn transform(&self, ctx: &mut RenderContext);

    /// Emits properties for downstream layers. Emits nothing by default.
    fn emit(&self, _ctx: &mut RenderContext) {}

    /// Runs [`transform`](Self::transform) then [`emit`](Self::emit).
    fn apply(&self, ctx: &mut RenderContext) {
        self.transform(ctx);
        self.emit(ctx);
    }
}

// ============================================================================
// Preset Layer
// ============================================================================

/// The branch selected by [`StylePreset`].
#[derive(Debug, Clone)]
pub enum PresetLayer {
    Neumorphism(NeumorphismLayer),
    Glassmorphism(GlassLayer),
    PixelArt(PixelArtLayer),
    /// Plain color or gradient; nothing beyond the base background.
    Flat,
}

impl PresetLayer {
    pub fn from_config(config: &IconConfig) -> Self {
        match config.style {
            StylePreset::Neumorphism => Self::Neumorphism(NeumorphismLayer::from_config(config)),
            StylePreset::Glassmorphism => Self::Glassmorphism(GlassLayer::new(config.glass.clone())),
            StylePreset::PixelArt => Self::PixelArt(PixelArtLayer::from_config(config)),
            StylePreset::Flat => Self::Flat,
        }
    }
}

impl StyleEffect for PresetLayer {
    fn transform(&self, ctx: &mut RenderContext) {
        match self {
            Self::Neumorphism(layer) => layer.transform(ctx),
            Self::Glassmorphism(layer) => layer.transform(ctx),
            Self::PixelArt(layer) => layer.transform(ctx),
            Self::Flat => {}
        }
    }

    fn emit(&self, ctx: &mut RenderContext) {
        match self {
            Self::Neumorphism(layer) => layer.emit(ctx),
            Self::Glassmorphism(layer) => layer.emit(ctx),
            Self::PixelArt(layer) => layer.emit(ctx),
            Self::Flat => {}
        }
    }
}

// ============================================================================
// Style Pipeline
// ============================================================================

/// The ordered set of layers for one config.
///
/// ```text
/// Gradient ──► Preset ──► Drop shadow ──► Outline
/// (optional)   (always)   (optional,      (optional)
///                          not pixel-art)
/// ```
///
/// Pixel-art draws its own hard-edged shadow, so the generic drop shadow is
/// left out for that preset.
#[derive(Debug, Clone)]
pub struct StylePipeline {
    pub gradient: Option<GradientLayer>,
    pub preset: PresetLayer,
    pub shadow: Option<DropShadowLayer>,
    pub outline: Option<OutlineLayer>,
}

impl StylePipeline {
    pub fn from_config(config: &IconConfig) -> Self {
        let shadow = (config.drop_shadow.enabled && config.style != StylePreset::PixelArt)
            .then(|| DropShadowLayer::new(config.drop_shadow.clone()));
        let outline = (config.outline.enabled && config.outline.width > 0.0)
            .then(|| OutlineLayer::new(config.outline.clone()));

        Self {
            gradient: config.gradient.clone().map(GradientLayer::new),
            preset: PresetLayer::from_config(config),
            shadow,
            outline,
        }
    }

    /// Applies every layer in order.
    pub fn render(&self, ctx: &mut RenderContext) {
        if let Some(gradient) = &self.gradient {
            gradient.apply(ctx);
        }
        self.preset.apply(ctx);
        if let Some(shadow) = &self.shadow {
            shadow.apply(ctx);
        }
        if let Some(outline) = &self.outline {
            outline.apply(ctx);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
