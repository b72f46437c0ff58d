//! Stroke-only outline around the card.

use super::{Decoration, RenderContext, StyleEffect, num};
use crate::config::OutlineConfig;

/// Draws the outline inset by half its width so the stroke stays inside the
/// card and never needs canvas expansion.
#[derive(Debug, Clone)]
pub struct OutlineLayer {
    pub config: OutlineConfig,
}

impl OutlineLayer {
    pub fn new(config: OutlineConfig) -> Self {
        Self { config }
    }
}

impl StyleEffect for OutlineLayer {
    fn transform(&self, ctx: &mut RenderContext) {
        let half = self.config.width / 2.0;
        let radius = (ctx.config.corner_radius - half).max(0.0);
        ctx.decorations.push(Decoration {
            rect: ctx.card().inset(half),
            radius,
            attributes: vec![
                ("fill", "none".into()),
                ("stroke", self.config.color.clone()),
                ("stroke-width", num(self.config.width)),
                ("stroke-opacity", num(self.config.opacity.clamp(0.0, 1.0))),
            ],
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IconConfig;
    use crate::expand::ExpandedCanvas;
    use crate::icon::Rect;

    #[test]
    fn outline_is_inset_by_half_width() {
        let config = IconConfig::default();
        let mut ctx = RenderContext::new(&config, ExpandedCanvas::for_config(&config));
        OutlineLayer::new(OutlineConfig {
            enabled: true,
            width: 4.0,
            color: "#ff0000".into(),
            opacity: 0.5,
        })
        .apply(&mut ctx);

        let outline = &ctx.decorations[0];
        assert_eq!(outline.rect, Rect::new(2.0, 2.0, 124.0, 124.0));
        assert_eq!(outline.radius, 22.0);
        assert!(outline.attributes.contains(&("stroke-opacity", "0.5".into())));
        assert!(outline.attributes.contains(&("fill", "none".into())));
    }
}
