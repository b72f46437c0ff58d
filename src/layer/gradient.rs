//! Linear gradient background.

use quick_xml::escape::escape;

use super::{BackgroundPaint, RenderContext, StyleEffect, num};
use crate::config::GradientConfig;

pub const GRADIENT_ID: &str = "bg-gradient";

#[derive(Debug, Clone)]
pub struct GradientLayer {
    pub config: GradientConfig,
}

impl GradientLayer {
    pub fn new(config: GradientConfig) -> Self {
        Self { config }
    }

    /// Converts the angle into `(x1, y1, x2, y2)` percentages:
    /// `50 ∓ 50·cos(angle)` and `50 ∓ 50·sin(angle)`.
    pub fn endpoints(&self) -> (f32, f32, f32, f32) {
        let (sin, cos) = self.config.angle.to_radians().sin_cos();
        (
            50.0 - 50.0 * cos,
            50.0 - 50.0 * sin,
            50.0 + 50.0 * cos,
            50.0 + 50.0 * sin,
        )
    }
}

impl StyleEffect for GradientLayer {
    fn transform(&self, ctx: &mut RenderContext) {
        let (x1, y1, x2, y2) = self.endpoints();
        ctx.add_def(format!(
            r#"<linearGradient id="{GRADIENT_ID}" x1="{}%" y1="{}%" x2="{}%" y2="{}%"><stop offset="0%" stop-color="{}"/><stop offset="100%" stop-color="{}"/></linearGradient>"#,
            num(x1),
            num(y1),
            num(x2),
            num(y2),
            escape(self.config.start_color.as_str()),
            escape(self.config.end_color.as_str()),
        ));
        ctx.background.paint = format!("url(#{GRADIENT_ID})");
    }

    fn emit(&self, ctx: &mut RenderContext) {
        ctx.set(BackgroundPaint(format!("url(#{GRADIENT_ID})")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IconConfig;
    use crate::expand::ExpandedCanvas;

    fn layer(angle: f32) -> GradientLayer {
        GradientLayer::new(GradientConfig::new(angle, "#667eea", "#764ba2"))
    }

    #[test]
    fn horizontal_gradient() {
        let (x1, y1, x2, y2) = layer(0.0).endpoints();
        assert_eq!((x1, y1, x2, y2), (0.0, 50.0, 100.0, 50.0));
    }

    #[test]
    fn vertical_gradient() {
        let (x1, y1, x2, y2) = layer(90.0).endpoints();
        assert_eq!(num(x1), "50");
        assert_eq!(num(y1), "0");
        assert_eq!(num(x2), "50");
        assert_eq!(num(y2), "100");
    }

    #[test]
    fn gradient_markup() {
        let config = IconConfig::default();
        let mut ctx = RenderContext::new(&config, ExpandedCanvas::for_config(&config));
        layer(0.0).apply(&mut ctx);

        assert_eq!(
            ctx.defs()[0],
            r##"<linearGradient id="bg-gradient" x1="0%" y1="50%" x2="100%" y2="50%"><stop offset="0%" stop-color="#667eea"/><stop offset="100%" stop-color="#764ba2"/></linearGradient>"##
        );
        assert_eq!(ctx.get::<BackgroundPaint>(), Some(&BackgroundPaint("url(#bg-gradient)".into())));
    }
}
