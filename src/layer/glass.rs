//! Glassmorphism: a translucent frosted card.
//!
//! Every effect on the card surface is clipped to the rounded card bounds by
//! [`GLASS_CLIP_ID`], so nothing bleeds past the card edge and the canvas is
//! never expanded for this preset.

use super::{Decoration, RenderContext, StyleEffect, num, rect_element};
use crate::config::GlassConfig;

pub const GLASS_SURFACE_ID: &str = "glass-surface";
pub const GLASS_CLIP_ID: &str = "glass-clip";
pub const GLASS_ICON_BLUR_ID: &str = "glass-icon-blur";

#[derive(Debug, Clone)]
pub struct GlassLayer {
    pub config: GlassConfig,
}

impl GlassLayer {
    pub fn new(config: GlassConfig) -> Self {
        Self { config }
    }

    fn surface_filter(&self) -> String {
        format!(
            concat!(
                r#"<filter id="{id}" x="0" y="0" width="100%" height="100%">"#,
                r##"<feFlood flood-color="#ffffff" flood-opacity="{tint}" result="tint"/>"##,
                r#"<feComposite in="tint" in2="SourceAlpha" operator="in" result="frost"/>"#,
                r#"<feGaussianBlur in="SourceAlpha" stdDeviation="{blur}" result="innerBlur"/>"#,
                r#"<feOffset in="innerBlur" dx="0" dy="2" result="innerOffset"/>"#,
                r#"<feComposite in="SourceAlpha" in2="innerOffset" operator="out" result="innerEdge"/>"#,
                r##"<feFlood flood-color="#ffffff" flood-opacity="0.6"/>"##,
                r#"<feComposite in2="innerEdge" operator="in" result="innerShadow"/>"#,
                r#"<feMerge><feMergeNode in="SourceGraphic"/><feMergeNode in="frost"/><feMergeNode in="innerShadow"/></feMerge>"#,
                "</filter>"
            ),
            id = GLASS_SURFACE_ID,
            tint = num(self.config.transparency.clamp(0.0, 1.0)),
            blur = num(self.config.blur.max(0.0) / 2.0),
        )
    }
}

impl StyleEffect for GlassLayer {
    fn transform(&self, ctx: &mut RenderContext) {
        let card = ctx.card();
        let radius = ctx.config.corner_radius;

        ctx.add_def(self.surface_filter());
        ctx.add_def(format!(
            r#"<clipPath id="{GLASS_CLIP_ID}">{}</clipPath>"#,
            rect_element(ctx.canvas.place(card), radius, &[])
        ));

        ctx.background.fill_opacity = Some(self.config.transparency.clamp(0.0, 1.0));
        ctx.background.filters.push(format!("url(#{GLASS_SURFACE_ID})"));
        ctx.background.clip_path = Some(GLASS_CLIP_ID.into());

        // Edge highlight
        ctx.decorations.push(Decoration {
            rect: card.inset(0.5),
            radius: (radius - 0.5).max(0.0),
            attributes: vec![
                ("fill", "none".into()),
                ("stroke", "#ffffff".into()),
                ("stroke-width", "1".into()),
                ("stroke-opacity", "0.5".into()),
            ],
        });

        ctx.icon.opacity = Some(self.config.icon_opacity.clamp(0.0, 1.0));
        if self.config.icon_blur > 0.0 {
            ctx.add_def(format!(
                r#"<filter id="{GLASS_ICON_BLUR_ID}" x="-50%" y="-50%" width="200%" height="200%"><feGaussianBlur stdDeviation="{}"/></filter>"#,
                num(self.config.icon_blur)
            ));
            ctx.icon.filters.push(format!("url(#{GLASS_ICON_BLUR_ID})"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{IconConfig, StylePreset};
    use crate::expand::ExpandedCanvas;

    fn render(glass: GlassConfig) -> (Vec<String>, Vec<String>, Option<f32>, Option<String>) {
        let config = IconConfig::new(StylePreset::Glassmorphism).with_glass(glass.clone());
        let mut ctx = RenderContext::new(&config, ExpandedCanvas::for_config(&config));
        GlassLayer::new(glass).apply(&mut ctx);
        (
            ctx.defs().to_vec(),
            ctx.icon.filters.clone(),
            ctx.icon.opacity,
            ctx.background.clip_path.clone(),
        )
    }

    #[test]
    fn icon_blur_adds_filter() {
        let (defs, icon_filters, opacity, clip) = render(GlassConfig {
            icon_blur: 4.0,
            ..GlassConfig::default()
        });

        assert!(defs.iter().any(|d| d.contains(r#"<filter id="glass-icon-blur""#)
            && d.contains(r#"stdDeviation="4""#)));
        assert_eq!(icon_filters, vec!["url(#glass-icon-blur)"]);
        assert_eq!(opacity, Some(0.9));
        assert_eq!(clip.as_deref(), Some("glass-clip"));
    }

    #[test]
    fn no_icon_blur_no_filter() {
        let (defs, icon_filters, _, _) = render(GlassConfig::default());
        assert!(icon_filters.is_empty());
        assert!(!defs.iter().any(|d| d.contains("glass-icon-blur")));
    }

    #[test]
    fn clip_matches_card() {
        let (defs, ..) = render(GlassConfig::default());
        assert!(defs.iter().any(|d| d
            == r#"<clipPath id="glass-clip"><rect x="0" y="0" width="128" height="128" rx="24" ry="24"/></clipPath>"#));
    }
}
