//! Fitting the source view box onto the target canvas.

use crate::icon::ViewBox;

/// Lower bound for the computed scale. Padding at or beyond the canvas size
/// would otherwise collapse the icon to zero or a negative scale.
pub const MIN_SCALE: f32 = 0.01;

/// Share of the nominal padding that is actually reserved on each side.
pub const PADDING_FACTOR: f32 = 0.5;

/// Uniform scale and centering offset for one transform call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Geometry {
    /// Fits `view_box` into a `width` x `height` canvas with `padding`.
    ///
    /// The scale is uniform (no distortion) and the offset centers the scaled
    /// icon within the full canvas, not the padded area.
    pub fn fit(view_box: &ViewBox, width: f32, height: f32, padding: f32) -> Self {
        let (available_w, available_h) = available_space(width, height, padding);
        Self::centered(view_box, width, height, available_w, available_h)
    }

    /// Like [`fit`](Self::fit), but first quantizes the available space down to
    /// a multiple of `pixel_size` so the icon lands on the pixel grid.
    ///
    /// A non-positive `pixel_size` falls back to [`fit`](Self::fit).
    pub fn fit_pixel_aligned(
        view_box: &ViewBox,
        width: f32,
        height: f32,
        padding: f32,
        pixel_size: f32,
    ) -> Self {
        if pixel_size.is_nan() || pixel_size <= 0.0 {
            return Self::fit(view_box, width, height, padding);
        }

        let (available_w, available_h) = available_space(width, height, padding);
        let quantize = |v: f32| (v / pixel_size).floor() * pixel_size;
        Self::centered(view_box, width, height, quantize(available_w), quantize(available_h))
    }

    fn centered(view_box: &ViewBox, width: f32, height: f32, available_w: f32, available_h: f32) -> Self {
        let scale = (available_w / view_box.width).min(available_h / view_box.height);
        // NaN fails the comparison and lands on the floor as well.
        let scale = if scale >= MIN_SCALE { scale } else { MIN_SCALE };

        Self {
            scale,
            offset_x: (width - view_box.width * scale) / 2.0,
            offset_y: (height - view_box.height * scale) / 2.0,
        }
    }
}

fn available_space(width: f32, height: f32, padding: f32) -> (f32, f32) {
    let reserved = padding * PADDING_FACTOR * 2.0;
    ((width - reserved).max(0.0), (height - reserved).max(0.0))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.001
    }

    #[test]
    fn half_padding_is_reserved() {
        let vb = ViewBox::from_size(24.0, 24.0);
        let geo = Geometry::fit(&vb, 128.0, 128.0, 16.0);

        // 128 - 16 * 0.5 * 2 = 112
        assert!(approx(geo.scale, 112.0 / 24.0));
        assert!(approx(geo.offset_x, 8.0));
        assert!(approx(geo.offset_y, 8.0));
    }

    #[test]
    fn wide_view_box_centers_vertically() {
        let vb = ViewBox::from_size(48.0, 24.0);
        let geo = Geometry::fit(&vb, 100.0, 100.0, 0.0);

        assert!(approx(geo.scale, 100.0 / 48.0));
        assert!(approx(geo.offset_x, 0.0));
        assert!(approx(geo.offset_y, 25.0));
    }

    #[test]
    fn fit_is_pure() {
        let vb = ViewBox::from_size(20.0, 30.0);
        let first = Geometry::fit(&vb, 96.0, 64.0, 10.0);
        let second = Geometry::fit(&vb, 96.0, 64.0, 10.0);
        assert_eq!(first, second);
    }

    #[test]
    fn oversized_padding_clamps_scale() {
        let vb = ViewBox::from_size(24.0, 24.0);
        let geo = Geometry::fit(&vb, 64.0, 64.0, 200.0);

        assert_eq!(geo.scale, MIN_SCALE);
        assert!(geo.offset_x.is_finite());
        assert!(geo.offset_x > 0.0);
    }

    #[test]
    fn zero_canvas_never_produces_nan() {
        let vb = ViewBox::from_size(24.0, 24.0);
        let geo = Geometry::fit(&vb, 0.0, 0.0, 0.0);
        assert_eq!(geo.scale, MIN_SCALE);
        assert!(!geo.offset_y.is_nan());
    }

    #[test]
    fn pixel_alignment_quantizes_available_space() {
        let vb = ViewBox::from_size(24.0, 24.0);
        // available = 110, quantized to a multiple of 8 = 104
        let geo = Geometry::fit_pixel_aligned(&vb, 128.0, 128.0, 18.0, 8.0);

        assert!(approx(geo.scale, 104.0 / 24.0));
        assert!(approx(geo.offset_x, 12.0));

        let plain = Geometry::fit(&vb, 128.0, 128.0, 18.0);
        assert!(geo.scale < plain.scale);
    }

    #[test]
    fn pixel_alignment_without_pixel_size_matches_fit() {
        let vb = ViewBox::from_size(24.0, 24.0);
        assert_eq!(
            Geometry::fit_pixel_aligned(&vb, 128.0, 128.0, 16.0, 0.0),
            Geometry::fit(&vb, 128.0, 128.0, 16.0)
        );
    }
}
