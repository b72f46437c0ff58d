//! Final document assembly.
//!
//! The composer is the one place that writes markup for the output document.
//! Layers only describe what they want drawn through the [`RenderContext`];
//! here that description becomes, in order:
//!
//! ```text
//! <svg [xmlns:*] width height viewBox [hints]>
//!   <defs> source defs, synthesized defs </defs>
//!   background rect            (inside a clip group when clipped)
//!   decorations                (outline, glass edge, pixel border)
//!   <g transform color fill|stroke [presentation] [opacity] [filter]>
//!     source content, verbatim
//!   </g>
//! </svg>
//! ```

use quick_xml::escape::escape;

use crate::config::{IconConfig, StylePreset};
use crate::error::StyleError;
use crate::expand::ExpandedCanvas;
use crate::geometry::Geometry;
use crate::icon::{IconPaint, SourceIcon};
use crate::layer::{RenderContext, StylePipeline, attributes, num, rect_element};
use crate::svg::{SvgValidator, UsvgValidator};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Canvas size of the fallback document when the config has no usable size.
const FALLBACK_SIZE: f32 = 128.0;

// ============================================================================
// Entry Points
// ============================================================================

/// Styles `svg` with `config`, returning a complete SVG document.
///
/// Never fails: any error is logged and replaced by [`fallback_svg`].
pub fn process_svg_with_style(svg: &str, config: &IconConfig) -> String {
    match style_svg(svg, config, &UsvgValidator) {
        Ok(output) => output,
        Err(err) => {
            log::error!("failed to style SVG: {err}");
            fallback_svg(config.width, config.height)
        }
    }
}

/// Styles `svg` with `config` and checks the result with `validator`.
pub fn style_svg(
    svg: &str,
    config: &IconConfig,
    validator: &dyn SvgValidator,
) -> Result<String, StyleError> {
    if !is_drawable(config.width) || !is_drawable(config.height) {
        return Err(StyleError::InvalidConfig("canvas size must be positive"));
    }

    let icon = SourceIcon::parse(svg)?;
    let output = compose(&icon, config);
    validator.validate(&output)?;
    Ok(output)
}

fn is_drawable(size: f32) -> bool {
    size.is_finite() && size > 0.0
}

// ============================================================================
// Composition
// ============================================================================

/// Builds the styled document for an already-normalized icon.
pub fn compose(icon: &SourceIcon, config: &IconConfig) -> String {
    let canvas = ExpandedCanvas::for_config(config);
    let geometry = match config.style {
        StylePreset::PixelArt => Geometry::fit_pixel_aligned(
            &icon.view_box,
            config.width,
            config.height,
            config.padding,
            config.effective_pixel_size(),
        ),
        _ => Geometry::fit(&icon.view_box, config.width, config.height, config.padding),
    };

    let mut ctx = RenderContext::new(config, canvas);
    StylePipeline::from_config(config).render(&mut ctx);

    let mut out = String::new();
    out.push_str(&format!(
        r#"<svg xmlns="{SVG_NS}"{namespaces} width="{w}" height="{h}" viewBox="0 0 {w} {h}"{hints}>"#,
        namespaces = attributes(&icon.namespaces),
        w = num(canvas.width),
        h = num(canvas.height),
        hints = attributes(&ctx.root_attributes),
    ));

    if !icon.defs.is_empty() || !ctx.defs().is_empty() {
        out.push_str("<defs>");
        out.push_str(&icon.defs);
        for def in ctx.defs() {
            out.push_str(def);
        }
        out.push_str("</defs>");
    }

    push_background(&mut out, &ctx);

    for decoration in &ctx.decorations {
        out.push_str(&rect_element(
            canvas.place(decoration.rect),
            decoration.radius,
            &decoration.attributes,
        ));
    }

    out.push_str(&icon_group(icon, config, &ctx, &geometry));
    out.push_str(&icon.content);
    out.push_str("</g></svg>");
    out
}

fn push_background(out: &mut String, ctx: &RenderContext) {
    let background = &ctx.background;

    let mut attrs = vec![("fill", background.paint.clone())];
    if let Some(opacity) = background.fill_opacity {
        attrs.push(("fill-opacity", num(opacity)));
    }
    if !background.filters.is_empty() {
        attrs.push(("filter", background.filters.join(" ")));
    }

    let rect = rect_element(ctx.canvas.place(ctx.card()), ctx.config.corner_radius, &attrs);
    match &background.clip_path {
        Some(id) => out.push_str(&format!(
            r#"<g clip-path="url(#{})">{rect}</g>"#,
            escape(id.as_str())
        )),
        None => out.push_str(&rect),
    }
}

/// Opening tag of the group that positions and recolors the icon.
fn icon_group(
    icon: &SourceIcon,
    config: &IconConfig,
    ctx: &RenderContext,
    geometry: &Geometry,
) -> String {
    let inset = ctx.canvas.inset;
    let mut transform = format!(
        "translate({}, {}) scale({})",
        num(geometry.offset_x + inset),
        num(geometry.offset_y + inset),
        num(geometry.scale),
    );
    let vb = &icon.view_box;
    if vb.min_x != 0.0 || vb.min_y != 0.0 {
        transform.push_str(&format!(" translate({}, {})", num(-vb.min_x), num(-vb.min_y)));
    }

    let color = config.icon_color.clone();
    let mut attrs = vec![("transform", transform), ("color", color.clone())];
    match icon.paint {
        IconPaint::Fill => attrs.push(("fill", color)),
        IconPaint::Stroke => {
            attrs.push(("fill", "none".into()));
            attrs.push(("stroke", color));
        }
    }
    attrs.extend(
        icon.presentation
            .iter()
            .filter(|(name, _)| *name != "opacity")
            .cloned(),
    );

    let source_opacity = icon.presentation_attr("opacity");
    let parsed = source_opacity.and_then(|v| v.trim().parse::<f32>().ok());
    let opacity = match (parsed, ctx.icon.opacity) {
        (Some(source), Some(effect)) => Some(num(source * effect)),
        (None, Some(effect)) => Some(num(effect)),
        (_, None) => source_opacity.map(str::to_owned),
    };
    if let Some(opacity) = opacity {
        attrs.push(("opacity", opacity));
    }
    if !ctx.icon.filters.is_empty() {
        attrs.push(("filter", ctx.icon.filters.join(" ")));
    }

    format!("<g{}>", attributes(&attrs))
}

// ============================================================================
// Fallback
// ============================================================================

/// Placeholder document returned when styling fails.
pub fn fallback_svg(width: f32, height: f32) -> String {
    let (width, height) = if is_drawable(width) && is_drawable(height) {
        (width, height)
    } else {
        (FALLBACK_SIZE, FALLBACK_SIZE)
    };
    let w = num(width);
    let h = num(height);
    format!(
        concat!(
            r#"<svg xmlns="{ns}" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            r##"<rect width="{w}" height="{h}" rx="8" ry="8" fill="#cccccc"/>"##,
            r##"<text x="50%" y="50%" text-anchor="middle" dominant-baseline="middle" font-family="sans-serif" font-size="12" fill="#666666">Error processing SVG</text>"##,
            "</svg>"
        ),
        ns = SVG_NS,
        w = w,
        h = h,
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GlassConfig, GradientConfig, OutlineConfig};
    use crate::svg::NoValidation;

    const HOME_PATH: &str = r#"<path d="M10 20v-6h4v6h5v-8h3L12 3 2 12h3v8z"/>"#;

    fn home() -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="currentColor">{HOME_PATH}</svg>"#
        )
    }

    const MENU: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><line x1="4" x2="20" y1="12" y2="12"/><line x1="4" x2="20" y1="6" y2="6"/></svg>"#;

    fn style(svg: &str, config: &IconConfig) -> String {
        style_svg(svg, config, &NoValidation).unwrap()
    }

    /// Reads `name="..."` from the root `<svg>` tag.
    fn root_attr<'a>(svg: &'a str, name: &str) -> &'a str {
        let root = &svg[..svg.find('>').unwrap()];
        let key = format!(r#" {name}=""#);
        let start = root.find(&key).unwrap() + key.len();
        let len = root[start..].find('"').unwrap();
        &root[start..start + len]
    }

    #[test]
    fn flat_home_glyph() {
        let config = IconConfig::new(StylePreset::Flat).with_icon_color("#333333");
        let out = style(&home(), &config);

        assert_eq!(root_attr(&out, "viewBox"), "0 0 128 128");
        assert!(out.contains(r##"fill="#333333""##));
        assert!(out.contains(r#"transform="translate(8, 8) scale(4.667)""#));
        assert!(out.contains(HOME_PATH));
        assert_eq!(out.matches("<svg").count(), 1);
        assert!(!out.contains("<defs>"));
    }

    #[test]
    fn neumorphism_expands_canvas() {
        let out = style(&home(), &IconConfig::new(StylePreset::Neumorphism));

        assert_eq!(root_attr(&out, "width"), "152");
        assert_eq!(root_attr(&out, "height"), "152");
        assert_eq!(root_attr(&out, "viewBox"), "0 0 152 152");
        // Card and icon both move by the expansion.
        assert!(out.contains(r#"<rect x="12" y="12" width="128" height="128""#));
        assert!(out.contains(r#"translate(20, 20)"#));
        assert!(out.contains(r#"filter="url(#neumorphism-shadow)""#));
    }

    #[test]
    fn glass_icon_blur() {
        let config = IconConfig::new(StylePreset::Glassmorphism).with_glass(GlassConfig {
            icon_blur: 4.0,
            ..GlassConfig::default()
        });
        let out = style(&home(), &config);

        assert_eq!(root_attr(&out, "viewBox"), "0 0 128 128");
        assert!(out.contains(r#"filter="url(#glass-icon-blur)""#));
        assert!(out.contains(r#"<feGaussianBlur stdDeviation="4"/>"#));
        assert!(out.contains(r#"<g clip-path="url(#glass-clip)"><rect"#));
        assert!(out.contains(r#"opacity="0.9""#));
    }

    #[test]
    fn malformed_input_falls_back() {
        let out = process_svg_with_style("<not-svg/>", &IconConfig::default());
        assert!(out.contains("Error processing SVG"));
        assert_eq!(root_attr(&out, "width"), "128");
    }

    #[test]
    fn fallback_uses_config_size() {
        let out = process_svg_with_style("", &IconConfig::default().with_size(64.0, 48.0));
        assert_eq!(root_attr(&out, "viewBox"), "0 0 64 48");

        let out = fallback_svg(0.0, -5.0);
        assert_eq!(root_attr(&out, "viewBox"), "0 0 128 128");
    }

    #[test]
    fn zero_size_is_rejected() {
        let config = IconConfig::default().with_size(0.0, 128.0);
        assert!(matches!(
            style_svg(&home(), &config, &NoValidation),
            Err(StyleError::InvalidConfig(_))
        ));
    }

    #[test]
    fn stroke_icon_keeps_fill_none() {
        let out = style(MENU, &IconConfig::default().with_icon_color("#ff0000"));

        assert!(out.contains(
            r##"color="#ff0000" fill="none" stroke="#ff0000" stroke-width="2" stroke-linecap="round" stroke-linejoin="round""##
        ));
        assert!(out.contains(r#"<line x1="4" x2="20" y1="12" y2="12"/><line x1="4" x2="20" y1="6" y2="6"/>"#));
    }

    #[test]
    fn source_defs_come_first() {
        let svg = r#"<svg viewBox="0 0 24 24"><defs><clipPath id="c"><rect width="24" height="24"/></clipPath></defs><path clip-path="url(#c)" d="M0 0h24v24z"/></svg>"#;
        let config = IconConfig::default()
            .with_gradient(Some(GradientConfig::new(135.0, "#667eea", "#764ba2")));
        let out = style(svg, &config);

        assert!(out.contains(r#"<defs><clipPath id="c"><rect width="24" height="24"/></clipPath><linearGradient id="bg-gradient""#));
        assert!(out.contains(r#"fill="url(#bg-gradient)""#));
        assert_eq!(out.matches("<defs>").count(), 1);
    }

    #[test]
    fn offset_view_box_is_shifted() {
        let svg = r#"<svg viewBox="-12 -12 24 24"><circle r="10"/></svg>"#;
        let out = style(svg, &IconConfig::default());
        assert!(out.contains("scale(4.667) translate(12, 12)"));
    }

    #[test]
    fn oversized_padding_floors_scale() {
        let out = style(&home(), &IconConfig::default().with_padding(500.0));
        assert!(out.contains("scale(0.01)"));
        assert_eq!(root_attr(&out, "viewBox"), "0 0 128 128");
    }

    #[test]
    fn pixel_art_hints_and_border() {
        let out = style(&home(), &IconConfig::new(StylePreset::PixelArt));

        assert!(out.contains(r#"shape-rendering="crispEdges""#));
        assert!(out.contains(r#"style="image-rendering: pixelated""#));
        assert_eq!(root_attr(&out, "viewBox"), "0 0 136 136");
        // Border inset by half a pixel cell, then placed on the canvas.
        assert!(out.contains(r#"<rect x="6" y="6" width="124" height="124""#));
    }

    #[test]
    fn outline_is_placed_on_expanded_canvas() {
        let config = IconConfig::new(StylePreset::Neumorphism).with_outline(OutlineConfig {
            enabled: true,
            width: 2.0,
            ..OutlineConfig::default()
        });
        let out = style(&home(), &config);
        assert!(out.contains(r#"<rect x="13" y="13" width="126" height="126" rx="23" ry="23" fill="none""#));
    }

    const XLINK_USE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" viewBox="0 0 24 24"><defs><path id="a" d="M4 4h16v16H4z"/></defs><use xlink:href="#a"/></svg>"##;

    const FRAME: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 16 16" fill="currentColor" fill-rule="evenodd" clip-rule="evenodd"><path d="M0 0h16v16H0zM4 4h8v8H4z"/></svg>"#;

    #[test]
    fn prefixed_namespaces_reach_the_root() {
        let out = process_svg_with_style(XLINK_USE, &IconConfig::default());

        assert!(!out.contains("Error processing SVG"));
        assert!(out.starts_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="128""#
        ));
        assert!(out.contains(r##"<use xlink:href="#a"/>"##));
        assert_eq!(out.matches("xmlns:xlink=").count(), 1);
    }

    #[test]
    fn exported_icon_survives_every_preset() {
        let svg = concat!(
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" xmlns:sketch="http://www.bohemiancoding.com/sketch/ns" "#,
            r#"width="16" height="16" viewBox="0 0 16 16" fill="currentColor" fill-rule="evenodd" clip-rule="evenodd" sketch:type="MSPage">"#,
            r#"<defs><path id="frame" d="M0 0h16v16H0zM4 4h8v8H4z"/></defs>"#,
            r##"<use xlink:href="#frame" sketch:type="MSShapeGroup"/></svg>"##,
        );
        for preset in [
            StylePreset::Flat,
            StylePreset::Neumorphism,
            StylePreset::Glassmorphism,
            StylePreset::PixelArt,
        ] {
            let out = process_svg_with_style(svg, &IconConfig::new(preset));
            assert!(!out.contains("Error processing SVG"), "{preset:?}");
            assert!(out.contains(r#"fill-rule="evenodd" clip-rule="evenodd""#), "{preset:?}");
            assert!(out.contains(r#"xmlns:sketch="http://www.bohemiancoding.com/sketch/ns""#));
        }
    }

    #[test]
    fn fill_rule_moves_to_icon_group() {
        let out = process_svg_with_style(FRAME, &IconConfig::default().with_icon_color("#ff0000"));

        assert!(!out.contains("Error processing SVG"));
        assert!(out.contains(
            r##"color="#ff0000" fill="#ff0000" fill-rule="evenodd" clip-rule="evenodd">"##
        ));
        // Paint from the root never leaks onto the group.
        assert_eq!(out.matches(r#"fill="currentColor""#).count(), 0);
    }

    #[test]
    fn stroke_presentation_moves_to_icon_group() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="1.5" stroke-dasharray="2 1" stroke-opacity="0.8" stroke-miterlimit="10"><path d="M4 12h16"/></svg>"#;
        let out = process_svg_with_style(svg, &IconConfig::default());

        assert!(!out.contains("Error processing SVG"));
        assert!(out.contains(
            r##"fill="none" stroke="#333333" stroke-width="1.5" stroke-dasharray="2 1" stroke-opacity="0.8" stroke-miterlimit="10""##
        ));
    }

    #[test]
    fn source_opacity_combines_with_glass() {
        let svg = r#"<svg viewBox="0 0 24 24" opacity="0.5"><circle cx="12" cy="12" r="8"/></svg>"#;

        let flat = style(svg, &IconConfig::default());
        assert!(flat.contains(r#"opacity="0.5""#));

        let glass = style(svg, &IconConfig::new(StylePreset::Glassmorphism));
        assert!(glass.contains(r#"opacity="0.45""#));
        assert!(!glass.contains(r#"opacity="0.9""#));
    }

    #[test]
    fn root_attribute_entities_are_escaped_once() {
        let svg = r#"<svg viewBox="0 0 24 24" font-family="Fira &amp; Co"><text y="12">A</text></svg>"#;
        let out = style(svg, &IconConfig::default());

        assert!(out.contains(r#"font-family="Fira &amp; Co""#));
        assert!(!out.contains("&amp;amp;"));
    }

    #[test]
    fn sub_unit_pixel_size_is_one_cell() {
        let mut half = IconConfig::new(StylePreset::PixelArt);
        half.pixel_size = 0.5;
        let mut one = IconConfig::new(StylePreset::PixelArt);
        one.pixel_size = 1.0;

        let out = style(&home(), &half);
        assert_eq!(out, style(&home(), &one));
        assert_eq!(root_attr(&out, "viewBox"), "0 0 130 130");
    }

    #[test]
    fn same_input_same_output() {
        let config = IconConfig::new(StylePreset::Neumorphism);
        assert_eq!(style(&home(), &config), style(&home(), &config));
    }
}
