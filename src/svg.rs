//! Output validation and raster previews using resvg/usvg.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use crate::error::StyleError;

// ============================================================================
// Validation
// ============================================================================

/// Checks that generated markup is a well-formed SVG document.
///
/// The composer never needs a DOM to build its output. Validation sits at
/// this one seam so the core can be tested with [`NoValidation`] and the
/// real check swapped in where it matters.
pub trait SvgValidator {
    fn validate(&self, svg: &str) -> Result<(), StyleError>;
}

/// Parses the document with `usvg`, rejecting anything it cannot load.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsvgValidator;

impl SvgValidator for UsvgValidator {
    fn validate(&self, svg: &str) -> Result<(), StyleError> {
        Tree::from_str(svg, &Options::default())?;
        Ok(())
    }
}

/// Accepts everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoValidation;

impl SvgValidator for NoValidation {
    fn validate(&self, _svg: &str) -> Result<(), StyleError> {
        Ok(())
    }
}

// ============================================================================
// SVG Rendering
// ============================================================================

/// Renders an SVG string to an RGBA image at the specified size.
///
/// The SVG is scaled to fit within `size x size` pixels while preserving
/// aspect ratio (the larger dimension will be `size`).
///
/// Returns `None` if the SVG cannot be parsed or rendered.
pub fn render_svg(svg_data: &str, size: u32) -> Option<RgbaImage> {
    let tree = Tree::from_str(svg_data, &Options::default()).ok()?;

    let svg_size = tree.size();
    let scale = (size as f32) / svg_size.width().max(svg_size.height());
    let width = (svg_size.width() * scale).ceil() as u32;
    let height = (svg_size.height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height)?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    Some(pixmap_to_rgba_image(&pixmap))
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    RgbaImage::from_fn(pixmap.width(), pixmap.height(), |x, y| {
        match pixmap.pixel(x, y) {
            // tiny_skia stores premultiplied alpha
            Some(p) => Rgba(unpremultiply(p.red(), p.green(), p.blue(), p.alpha())),
            None => Rgba([0, 0, 0, 0]),
        }
    })
}

fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let a_f = a as f32 / 255.0;
    let channel = |c: u8| (c as f32 / a_f).round().min(255.0) as u8;
    [channel(r), channel(g), channel(b), a]
}

// ============================================================================
// Tests
// ============================================================================
