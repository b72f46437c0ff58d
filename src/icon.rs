//! Source icon normalization.
//!
//! [`SourceIcon::parse`] reads raw SVG markup and extracts what the composer
//! needs: the intrinsic [`ViewBox`], whether the glyph is painted with strokes
//! or fills, and the inner markup. The inner markup is sliced from the input
//! by byte offset, never re-serialized, so the glyph reaches the output
//! exactly as it was written.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::StyleError;

/// Side length used when the source declares neither `viewBox` nor size.
pub const DEFAULT_VIEW_BOX_SIZE: f32 = 24.0;

// ============================================================================
// Rect / ViewBox
// ============================================================================

/// A rectangle in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle starting at origin (0, 0) with the given dimensions.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Returns the rectangle moved by `(dx, dy)`.
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Shrinks the rectangle by `amount` on every side, never below zero size.
    pub fn inset(&self, amount: f32) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            (self.width - amount * 2.0).max(0.0),
            (self.height - amount * 2.0).max(0.0),
        )
    }
}

/// The source icon's intrinsic coordinate system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f32,
    pub min_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for ViewBox {
    fn default() -> Self {
        Self::from_size(DEFAULT_VIEW_BOX_SIZE, DEFAULT_VIEW_BOX_SIZE)
    }
}

impl ViewBox {
    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            width,
            height,
        }
    }

    /// Parses a `viewBox` attribute like `"0 0 24 24"` or `"0,0,24,24"`.
    ///
    /// Returns `None` unless there are exactly four numbers and the width and
    /// height are positive.
    pub fn parse(value: &str) -> Option<Self> {
        let parts: Vec<f32> = value
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<f32>())
            .collect::<Result<_, _>>()
            .ok()?;

        match parts[..] {
            [min_x, min_y, width, height] if width > 0.0 && height > 0.0 => Some(Self {
                min_x,
                min_y,
                width,
                height,
            }),
            _ => None,
        }
    }
}

/// Parses a `width`/`height` attribute. Accepts plain numbers and `px`;
/// relative units such as `%` or `em` give `None`.
fn parse_length(value: &str) -> Option<f32> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number.parse::<f32>().ok().filter(|v| *v > 0.0)
}

// ============================================================================
// SourceIcon
// ============================================================================

/// How the source glyph carries its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconPaint {
    /// Color is applied with `fill`.
    Fill,
    /// Color is applied with `stroke`, keeping `fill="none"`.
    Stroke,
}

/// Presentation attributes carried from the source root onto the wrapper
/// group. `fill`, `stroke` and `color` are left out; the recolor sets them.
pub const CARRIED_ATTRIBUTES: &[&str] = &[
    "clip-rule",
    "fill-opacity",
    "fill-rule",
    "font-family",
    "font-size",
    "font-style",
    "font-weight",
    "opacity",
    "paint-order",
    "shape-rendering",
    "stroke-dasharray",
    "stroke-dashoffset",
    "stroke-linecap",
    "stroke-linejoin",
    "stroke-miterlimit",
    "stroke-opacity",
    "stroke-width",
    "text-anchor",
    "visibility",
];

/// A parsed source icon, valid for the duration of one transform call.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceIcon {
    pub view_box: ViewBox,
    pub paint: IconPaint,
    /// Inner markup of the root, minus top-level `<defs>` elements.
    pub content: String,
    /// Inner markup of the top-level `<defs>` elements, concatenated.
    pub defs: String,
    /// Prefixed namespace declarations of the root (`xmlns:xlink`, ...).
    pub namespaces: Vec<(String, String)>,
    /// Root presentation attributes listed in [`CARRIED_ATTRIBUTES`], in
    /// source order.
    pub presentation: Vec<(&'static str, String)>,
}

impl SourceIcon {
    /// Parses raw SVG markup.
    ///
    /// The first element must be `<svg>`; declarations, comments and doctypes
    /// before it are skipped.
    pub fn parse(svg: &str) -> Result<Self, StyleError> {
        let mut reader = Reader::from_str(svg);

        let mut root: Option<Vec<(String, String)>> = None;
        let mut content_start = 0;
        let mut depth = 0usize;
        let mut open_defs: Option<(usize, usize)> = None;
        let mut defs_ranges: Vec<(usize, usize)> = Vec::new();
        let mut defs = String::new();

        loop {
            let before = reader.buffer_position() as usize;
            match reader.read_event()? {
                Event::Start(e) => {
                    if depth == 0 {
                        root = Some(root_attributes(&e)?);
                        content_start = reader.buffer_position() as usize;
                    } else if depth == 1 && e.local_name().as_ref() == b"defs" {
                        open_defs = Some((before, reader.buffer_position() as usize));
                    }
                    depth += 1;
                }
                Event::Empty(e) => {
                    if depth == 0 {
                        let attrs = root_attributes(&e)?;
                        return Ok(Self::from_root(&attrs, String::new(), String::new()));
                    }
                    if depth == 1 && e.local_name().as_ref() == b"defs" {
                        defs_ranges.push((before, reader.buffer_position() as usize));
                    }
                }
                Event::End(e) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        let attrs = root.take().ok_or(StyleError::InvalidSvg("stray closing tag"))?;
                        let content = strip_ranges(svg, content_start, before, &defs_ranges);
                        return Ok(Self::from_root(&attrs, content, defs));
                    }
                    if depth == 1 && e.local_name().as_ref() == b"defs" {
                        if let Some((start, inner_start)) = open_defs.take() {
                            defs.push_str(svg[inner_start..before].trim());
                            defs_ranges.push((start, reader.buffer_position() as usize));
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Err(if root.is_some() {
            StyleError::InvalidSvg("unclosed <svg> element")
        } else {
            StyleError::InvalidSvg("no <svg> root element")
        })
    }

    fn from_root(attrs: &[(String, String)], content: String, defs: String) -> Self {
        let attr = |name: &str| {
            attrs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        };

        let view_box = attr("viewBox")
            .and_then(ViewBox::parse)
            .or_else(|| {
                let width = attr("width").and_then(parse_length)?;
                let height = attr("height").and_then(parse_length)?;
                Some(ViewBox::from_size(width, height))
            })
            .unwrap_or_default();

        let stroke_based = attr("stroke") == Some("currentColor") || attr("stroke-width").is_some();
        let paint = if stroke_based {
            IconPaint::Stroke
        } else {
            IconPaint::Fill
        };

        let namespaces = attrs
            .iter()
            .filter(|(key, _)| key.starts_with("xmlns:"))
            .cloned()
            .collect();
        let presentation = attrs
            .iter()
            .filter_map(|(key, value)| {
                let name = CARRIED_ATTRIBUTES.iter().find(|name| **name == key.as_str())?;
                Some((*name, value.clone()))
            })
            .collect();

        log::debug!(
            "normalized source icon: viewBox {}x{}, stroke-based: {}",
            view_box.width,
            view_box.height,
            stroke_based
        );

        Self {
            view_box,
            paint,
            content,
            defs,
            namespaces,
            presentation,
        }
    }

    /// Returns true if the glyph is colored through its strokes.
    pub fn is_stroke_based(&self) -> bool {
        self.paint == IconPaint::Stroke
    }

    /// Looks up a carried presentation attribute.
    pub fn presentation_attr(&self, name: &str) -> Option<&str> {
        self.presentation
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Collects a root element's attributes, validating them on the way.
fn root_attributes(e: &BytesStart) -> Result<Vec<(String, String)>, StyleError> {
    if e.local_name().as_ref() != b"svg" {
        return Err(StyleError::InvalidSvg("root element is not <svg>"));
    }

    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.unescape_value().map_err(quick_xml::Error::from)?;
        attrs.push((
            String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            value.into_owned(),
        ));
    }
    Ok(attrs)
}

/// Copies `svg[start..end]`, skipping the given absolute byte ranges.
fn strip_ranges(svg: &str, start: usize, end: usize, ranges: &[(usize, usize)]) -> String {
    let mut result = String::with_capacity(end - start);
    let mut cursor = start;
    for &(from, to) in ranges {
        result.push_str(&svg[cursor..from]);
        cursor = to;
    }
    result.push_str(&svg[cursor..end]);
    result
}

// ============================================================================
// Tests
// ============================================================================
