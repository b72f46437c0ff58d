//! User-controlled drop shadow behind the card.

use quick_xml::escape::escape;

use super::{RenderContext, StyleEffect, num};
use crate::config::DropShadowConfig;

pub const DROP_SHADOW_ID: &str = "drop-shadow";

/// Adds a `feDropShadow` filter to the background's filter list.
///
/// The shadow is an extra `filter` token, so it stacks with whatever filter
/// the preset already placed on the background.
#[derive(Debug, Clone)]
pub struct DropShadowLayer {
    pub config: DropShadowConfig,
}

impl DropShadowLayer {
    pub fn new(config: DropShadowConfig) -> Self {
        Self { config }
    }
}

impl StyleEffect for DropShadowLayer {
    fn transform(&self, ctx: &mut RenderContext) {
        let c = &self.config;
        ctx.add_def(drop_shadow_filter(
            DROP_SHADOW_ID,
            c.offset_x,
            c.offset_y,
            c.blur.max(0.0) / 2.0,
            &c.color,
            c.opacity,
        ));
        ctx.background.filters.push(format!("url(#{DROP_SHADOW_ID})"));
    }
}

/// Builds a single-primitive drop shadow filter.
pub fn drop_shadow_filter(
    id: &str,
    dx: f32,
    dy: f32,
    std_deviation: f32,
    color: &str,
    opacity: f32,
) -> String {
    format!(
        r#"<filter id="{id}" x="-50%" y="-50%" width="200%" height="200%"><feDropShadow dx="{}" dy="{}" stdDeviation="{}" flood-color="{}" flood-opacity="{}"/></filter>"#,
        num(dx),
        num(dy),
        num(std_deviation),
        escape(color),
        num(opacity.clamp(0.0, 1.0)),
    )
}
