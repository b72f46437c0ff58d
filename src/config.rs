//! Style configuration consumed by the transform engine.
//!
//! [`IconConfig`] is the record the UI mutates through its controls and hands
//! to the engine read-only. It serializes to camelCase JSON, and every field
//! has a default, so a missing field is never an error:
//!
//! ```json
//! {
//!   "style": "neumorphism",
//!   "width": 128,
//!   "height": 128,
//!   "iconColor": "#333333",
//!   "gradient": { "angle": 135, "startColor": "#667eea", "endColor": "#764ba2" },
//!   "dropShadow": { "enabled": true, "blur": 8 }
//! }
//! ```
//!
//! The one exception is [`GradientConfig`]: it has no field defaults, so a
//! gradient is either fully populated or absent.

use serde::{Deserialize, Serialize};

#[cfg(feature = "tsify")]
use tsify_next::Tsify;

// ============================================================================
// StylePreset
// ============================================================================

/// Named visual treatment selecting a branch of the style synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub enum StylePreset {
    /// Soft extruded card with a dark and a light shadow.
    Neumorphism,
    /// Translucent frosted card, effects clipped to the card bounds.
    Glassmorphism,
    /// Checkerboard or gradient card with a hard-edged shadow.
    PixelArt,
    /// Plain color or gradient card.
    #[default]
    Flat,
}

impl StylePreset {
    /// Returns the preset's JSON name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neumorphism => "neumorphism",
            Self::Glassmorphism => "glassmorphism",
            Self::PixelArt => "pixel-art",
            Self::Flat => "flat",
        }
    }
}

// ============================================================================
// Effect Settings
// ============================================================================

/// A two-stop linear gradient for the card background.
///
/// Has no `#[serde(default)]`: a partial record fails to deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub struct GradientConfig {
    /// Direction in degrees.
    pub angle: f32,
    pub start_color: String,
    pub end_color: String,
}

impl GradientConfig {
    pub fn new(angle: f32, start_color: impl Into<String>, end_color: impl Into<String>) -> Self {
        Self {
            angle,
            start_color: start_color.into(),
            end_color: end_color.into(),
        }
    }
}

/// User-controlled drop shadow behind the card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub struct DropShadowConfig {
    pub enabled: bool,
    pub offset_x: f32,
    pub offset_y: f32,
    /// Blur radius in canvas units. The filter uses half of it as
    /// `stdDeviation`.
    pub blur: f32,
    pub opacity: f32,
    pub color: String,
}

impl Default for DropShadowConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            offset_x: 4.0,
            offset_y: 4.0,
            blur: 8.0,
            opacity: 0.25,
            color: "#000000".into(),
        }
    }
}

impl DropShadowConfig {
    /// How far the shadow reaches past the shape that casts it.
    pub fn extent(&self) -> f32 {
        self.blur.max(0.0) + self.offset_x.abs().max(self.offset_y.abs())
    }
}

/// Stroke-only rounded rect drawn over the card edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub struct OutlineConfig {
    pub enabled: bool,
    pub width: f32,
    pub color: String,
    pub opacity: f32,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            width: 2.0,
            color: "#000000".into(),
            opacity: 1.0,
        }
    }
}

/// Glassmorphism-only parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub struct GlassConfig {
    /// Opacity of the card fill and the frost tint (0.0-1.0).
    pub transparency: f32,
    /// Blur of the surface's inner shadow.
    pub blur: f32,
    /// Blur applied to the icon layer; 0 disables the icon filter.
    pub icon_blur: f32,
    pub icon_opacity: f32,
}

impl Default for GlassConfig {
    fn default() -> Self {
        Self {
            transparency: 0.25,
            blur: 10.0,
            icon_blur: 0.0,
            icon_opacity: 0.9,
        }
    }
}

// ============================================================================
// IconConfig
// ============================================================================

/// The complete style configuration for one transform call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub struct IconConfig {
    pub style: StylePreset,
    pub width: f32,
    pub height: f32,
    pub corner_radius: f32,
    pub padding: f32,
    pub icon_color: String,
    pub background_color: String,
    pub gradient: Option<GradientConfig>,
    pub drop_shadow: DropShadowConfig,
    pub outline: OutlineConfig,
    pub glass: GlassConfig,
    pub pixel_size: f32,
}

/// Smallest pixel-art cell, in canvas units.
pub const MIN_PIXEL_SIZE: f32 = 1.0;

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            style: StylePreset::Flat,
            width: 128.0,
            height: 128.0,
            corner_radius: 24.0,
            padding: 16.0,
            icon_color: "#333333".into(),
            background_color: "#e0e5ec".into(),
            gradient: None,
            drop_shadow: DropShadowConfig::default(),
            outline: OutlineConfig::default(),
            glass: GlassConfig::default(),
            pixel_size: 4.0,
        }
    }
}

impl IconConfig {
    /// Creates the default config with the given preset.
    pub fn new(style: StylePreset) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    /// Sets the canvas size.
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_icon_color(mut self, color: impl Into<String>) -> Self {
        self.icon_color = color.into();
        self
    }

    pub fn with_gradient(mut self, gradient: Option<GradientConfig>) -> Self {
        self.gradient = gradient;
        self
    }

    pub fn with_drop_shadow(mut self, shadow: DropShadowConfig) -> Self {
        self.drop_shadow = shadow;
        self
    }

    pub fn with_outline(mut self, outline: OutlineConfig) -> Self {
        self.outline = outline;
        self
    }

    pub fn with_glass(mut self, glass: GlassConfig) -> Self {
        self.glass = glass;
        self
    }

    /// Pixel-art cell size as every pixel-art stage uses it.
    ///
    /// Values below [`MIN_PIXEL_SIZE`], and non-finite ones, become
    /// [`MIN_PIXEL_SIZE`].
    pub fn effective_pixel_size(&self) -> f32 {
        if self.pixel_size.is_finite() {
            self.pixel_size.max(MIN_PIXEL_SIZE)
        } else {
            MIN_PIXEL_SIZE
        }
    }

    /// Serializes the config to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the config to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Tests
// ============================================================================
