//! Canvas expansion for effects that reach past the card.
//!
//! Shadows drawn outside the card would be cut off by the output's
//! viewBox. The canvas grows by the same amount on every side and the card
//! stays centered, so the visible card keeps its configured size.

use crate::config::{IconConfig, StylePreset};
use crate::icon::Rect;

/// Minimum room kept around a neumorphic card for its two shadows.
pub const NEUMORPHISM_EXPANSION: f32 = 12.0;

/// Returns how far the canvas must grow on each side, rounded up.
pub fn expansion_needed(config: &IconConfig) -> f32 {
    let shadow = config.drop_shadow.enabled.then(|| config.drop_shadow.extent());

    let expansion = match config.style {
        // Clipped to the card.
        StylePreset::Glassmorphism => 0.0,
        StylePreset::Neumorphism => NEUMORPHISM_EXPANSION.max(shadow.unwrap_or(0.0)),
        // Hard shadow: no blur, offset by one pixel cell.
        StylePreset::PixelArt => config.effective_pixel_size(),
        StylePreset::Flat => shadow.unwrap_or(0.0),
    };

    let expansion = if expansion.is_finite() {
        expansion.max(0.0).ceil()
    } else {
        0.0
    };
    log::debug!("{} canvas expansion: {expansion}", config.style.as_str());
    expansion
}

/// The output canvas after expansion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpandedCanvas {
    pub width: f32,
    pub height: f32,
    /// Distance from the canvas edge to the card on every side.
    pub inset: f32,
}

impl ExpandedCanvas {
    pub fn new(width: f32, height: f32, expansion: f32) -> Self {
        Self {
            width: width + expansion * 2.0,
            height: height + expansion * 2.0,
            inset: expansion,
        }
    }

    pub fn for_config(config: &IconConfig) -> Self {
        Self::new(config.width, config.height, expansion_needed(config))
    }

    pub fn is_expanded(&self) -> bool {
        self.inset > 0.0
    }

    /// Moves a card-local rect onto the expanded canvas.
    pub fn place(&self, rect: Rect) -> Rect {
        rect.translate(self.inset, self.inset)
    }
}
