//! Pixel-art: checkerboard card, hard-edged shadow, crisp rendering.

use quick_xml::escape::escape;

use super::shadow::drop_shadow_filter;
use super::{BackgroundPaint, Decoration, RenderContext, StyleEffect, num};
use crate::color::darken;
use crate::config::IconConfig;

pub const PIXEL_PATTERN_ID: &str = "pixel-checker";
pub const PIXEL_SHADOW_ID: &str = "pixel-shadow";

const FALLBACK_ALT: &str = "#c8ced6";
const FALLBACK_BORDER: &str = "#5a6270";

#[derive(Debug, Clone)]
pub struct PixelArtLayer {
    pub pixel_size: f32,
    pub background: String,
    pub shadow_color: String,
    pub shadow_opacity: f32,
}

impl PixelArtLayer {
    pub fn from_config(config: &IconConfig) -> Self {
        let (shadow_color, shadow_opacity) = if config.drop_shadow.enabled {
            (config.drop_shadow.color.clone(), config.drop_shadow.opacity)
        } else {
            ("#000000".into(), 0.3)
        };

        Self {
            pixel_size: config.effective_pixel_size(),
            background: config.background_color.clone(),
            shadow_color,
            shadow_opacity,
        }
    }

    /// Offset of the hard shadow; one pixel cell down and to the right.
    pub fn shadow_offset(&self) -> f32 {
        self.pixel_size
    }

    fn checkerboard(&self, x: f32, y: f32) -> String {
        let cell = num(self.pixel_size);
        let tile = num(self.pixel_size * 2.0);
        let alt = darken(&self.background, 0.08).unwrap_or_else(|| FALLBACK_ALT.into());
        format!(
            concat!(
                r#"<pattern id="{id}" x="{x}" y="{y}" width="{tile}" height="{tile}" patternUnits="userSpaceOnUse">"#,
                r#"<rect width="{tile}" height="{tile}" fill="{base}"/>"#,
                r#"<rect width="{cell}" height="{cell}" fill="{alt}"/>"#,
                r#"<rect x="{cell}" y="{cell}" width="{cell}" height="{cell}" fill="{alt}"/>"#,
                "</pattern>"
            ),
            id = PIXEL_PATTERN_ID,
            x = num(x),
            y = num(y),
            tile = tile,
            cell = cell,
            base = escape(self.background.as_str()),
            alt = escape(alt.as_str()),
        )
    }
}

impl StyleEffect for PixelArtLayer {
    fn transform(&self, ctx: &mut RenderContext) {
        let card = ctx.card();

        if !ctx.has::<BackgroundPaint>() {
            let origin = ctx.canvas.place(card);
            ctx.add_def(self.checkerboard(origin.x, origin.y));
            ctx.background.paint = format!("url(#{PIXEL_PATTERN_ID})");
        }

        let offset = self.shadow_offset();
        ctx.add_def(drop_shadow_filter(
            PIXEL_SHADOW_ID,
            offset,
            offset,
            0.0,
            &self.shadow_color,
            self.shadow_opacity,
        ));
        ctx.background.filters.push(format!("url(#{PIXEL_SHADOW_ID})"));

        // Pixel border
        let half = self.pixel_size / 2.0;
        ctx.decorations.push(Decoration {
            rect: card.inset(half),
            radius: (ctx.config.corner_radius - half).max(0.0),
            attributes: vec![
                ("fill", "none".into()),
                (
                    "stroke",
                    darken(&self.background, 0.3).unwrap_or_else(|| FALLBACK_BORDER.into()),
                ),
                ("stroke-width", num(self.pixel_size)),
            ],
        });

        ctx.root_attributes.push(("shape-rendering", "crispEdges".into()));
        ctx.root_attributes.push(("style", "image-rendering: pixelated".into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DropShadowConfig, GradientConfig, StylePreset};
    use crate::expand::ExpandedCanvas;
    use crate::layer::GradientLayer;

    fn context(config: &IconConfig) -> RenderContext<'_> {
        RenderContext::new(config, ExpandedCanvas::for_config(config))
    }

    #[test]
    fn checkerboard_without_gradient() {
        let config = IconConfig::new(StylePreset::PixelArt);
        let mut ctx = context(&config);
        PixelArtLayer::from_config(&config).apply(&mut ctx);

        assert_eq!(ctx.background.paint, "url(#pixel-checker)");
        let pattern = &ctx.defs()[0];
        assert!(pattern.contains(r#"width="8" height="8" patternUnits="userSpaceOnUse""#));
        // Pattern origin follows the card on the expanded canvas.
        assert!(pattern.contains(r#"x="4" y="4""#));
    }

    #[test]
    fn gradient_replaces_checkerboard() {
        let config = IconConfig::new(StylePreset::PixelArt)
            .with_gradient(Some(GradientConfig::new(45.0, "#000000", "#ffffff")));
        let mut ctx = context(&config);
        GradientLayer::new(config.gradient.clone().unwrap()).apply(&mut ctx);
        PixelArtLayer::from_config(&config).apply(&mut ctx);

        assert_eq!(ctx.background.paint, "url(#bg-gradient)");
        assert!(!ctx.defs().iter().any(|d| d.contains(PIXEL_PATTERN_ID)));
    }

    #[test]
    fn hard_shadow_has_no_blur() {
        let config = IconConfig::new(StylePreset::PixelArt);
        let mut ctx = context(&config);
        PixelArtLayer::from_config(&config).apply(&mut ctx);

        let shadow = ctx.defs().iter().find(|d| d.contains(PIXEL_SHADOW_ID)).unwrap();
        assert!(shadow.contains(r#"dx="4" dy="4" stdDeviation="0""#));
        assert_eq!(ctx.background.filters, vec!["url(#pixel-shadow)"]);
        assert!(ctx.root_attributes.contains(&("shape-rendering", "crispEdges".into())));
    }

    #[test]
    fn user_shadow_color_is_used() {
        let config = IconConfig::new(StylePreset::PixelArt).with_drop_shadow(DropShadowConfig {
            enabled: true,
            color: "#ff00ff".into(),
            opacity: 0.8,
            ..DropShadowConfig::default()
        });
        let layer = PixelArtLayer::from_config(&config);
        assert_eq!(layer.shadow_color, "#ff00ff");
        assert_eq!(layer.shadow_opacity, 0.8);
    }
}
