//! Neumorphism: a soft card lit from the top-left.

use quick_xml::escape::escape;

use super::{RenderContext, StyleEffect, num};
use crate::color::{darken, lighten};
use crate::config::IconConfig;

pub const NEUMORPHISM_FILTER_ID: &str = "neumorphism-shadow";

/// Offset of each of the two shadows, in canvas units.
pub const SHADOW_DISTANCE: f32 = 6.0;
pub const SHADOW_BLUR: f32 = 6.0;

const FALLBACK_DARK: &str = "#a3b1c6";
const FALLBACK_LIGHT: &str = "#ffffff";

/// Two-direction shadow filter: a dark shadow down-right and a light
/// highlight up-left, both merged beneath the background itself.
///
/// Shadow tones are derived from the background color so the card reads as
/// extruded from a surface of the same color.
#[derive(Debug, Clone)]
pub struct NeumorphismLayer {
    pub dark: String,
    pub light: String,
}

impl NeumorphismLayer {
    pub fn from_config(config: &IconConfig) -> Self {
        let base = &config.background_color;
        Self {
            dark: darken(base, 0.15).unwrap_or_else(|| FALLBACK_DARK.into()),
            light: lighten(base, 0.1).unwrap_or_else(|| FALLBACK_LIGHT.into()),
        }
    }
}

impl StyleEffect for NeumorphismLayer {
    fn transform(&self, ctx: &mut RenderContext) {
        let d = num(SHADOW_DISTANCE);
        let nd = num(-SHADOW_DISTANCE);
        ctx.add_def(format!(
            concat!(
                r#"<filter id="{id}" x="-50%" y="-50%" width="200%" height="200%">"#,
                r#"<feGaussianBlur in="SourceAlpha" stdDeviation="{blur}" result="blur"/>"#,
                r#"<feOffset in="blur" dx="{d}" dy="{d}" result="darkOffset"/>"#,
                r#"<feFlood flood-color="{dark}" flood-opacity="0.7"/>"#,
                r#"<feComposite in2="darkOffset" operator="in" result="darkShadow"/>"#,
                r#"<feOffset in="blur" dx="{nd}" dy="{nd}" result="lightOffset"/>"#,
                r#"<feFlood flood-color="{light}" flood-opacity="0.9"/>"#,
                r#"<feComposite in2="lightOffset" operator="in" result="lightShadow"/>"#,
                r#"<feMerge><feMergeNode in="darkShadow"/><feMergeNode in="lightShadow"/><feMergeNode in="SourceGraphic"/></feMerge>"#,
                "</filter>"
            ),
            id = NEUMORPHISM_FILTER_ID,
            blur = num(SHADOW_BLUR),
            d = d,
            nd = nd,
            dark = escape(self.dark.as_str()),
            light = escape(self.light.as_str()),
        ));
        ctx.background
            .filters
            .push(format!("url(#{NEUMORPHISM_FILTER_ID})"));
    }
}
