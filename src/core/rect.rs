//! Cover-fit rectangle computation.

use super::style::{StyleChangeSet, StyleProperty};
use serde::{Deserialize, Serialize};

/// Position and size in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// The `left`/`top`/`width`/`height` changes that place an absolutely
    /// positioned element at this rectangle.
    ///
    /// The result can be applied immediately or animated like any other
    /// change set.
    pub fn to_changes(&self) -> StyleChangeSet {
        StyleChangeSet::new()
            .with(StyleProperty::Left, px(self.x))
            .with(StyleProperty::Top, px(self.y))
            .with(StyleProperty::Width, px(self.width))
            .with(StyleProperty::Height, px(self.height))
    }
}

fn px(value: f64) -> String {
    format!("{value}px")
}

/// Compute the rectangle that scales a `width` x `height` element to cover a
/// `box_width` x `box_height` container.
///
/// Aspect ratio is preserved and overflow on the uncovered axis is centered,
/// so `x` or `y` is zero or negative. Near-square ratios fall into a
/// correction band that fills the dimension with the larger deficit.
///
/// A zero `height` yields non-finite values. A container exactly as tall as
/// the element never takes the correction band.
///
/// ```rust
/// use segue::core::size_fill;
///
/// let rect = size_fill(100.0, 50.0, 200.0, 200.0);
/// assert_eq!(rect.height, 200.0);
/// assert_eq!(rect.width, 400.0);
/// assert_eq!(rect.x, -100.0);
/// ```
pub fn size_fill(width: f64, height: f64, box_width: f64, box_height: f64) -> Rect {
    let ratio = width / height;
    let dw = box_width - width;
    let dh = box_height - height;
    let deficit_ratio = dw / dh;

    let fill_width = || {
        let h = box_width / ratio;
        Rect::new(0.0, (box_height - h) / 2.0, box_width, h)
    };
    let fill_height = || {
        let w = box_height * ratio;
        Rect::new((box_width - w) / 2.0, 0.0, w, box_height)
    };

    let mut rect = if dw > dh { fill_width() } else { fill_height() };

    let in_band = if ratio > 1.0 {
        deficit_ratio > 1.01 && deficit_ratio < ratio
    } else {
        deficit_ratio > ratio && deficit_ratio < 1.0
    };
    if in_band {
        rect = if dw < dh { fill_width() } else { fill_height() };
    }

    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn covers(rect: &Rect, box_width: f64, box_height: f64) -> bool {
        rect.x <= EPS
            && rect.y <= EPS
            && rect.right() >= box_width - EPS
            && rect.bottom() >= box_height - EPS
    }

    #[test]
    fn wide_element_in_square_box_fills_height() {
        let rect = size_fill(100.0, 50.0, 200.0, 200.0);

        assert_eq!(rect, Rect::new(-100.0, 0.0, 400.0, 200.0));
        assert!((rect.width / rect.height - 2.0).abs() < EPS);
        assert!(covers(&rect, 200.0, 200.0));
        // overflow is centered
        assert!((rect.x + rect.right() - 200.0).abs() < EPS);
    }

    #[test]
    fn tall_element_in_wide_box_fills_width() {
        let rect = size_fill(50.0, 100.0, 300.0, 200.0);

        assert_eq!(rect.width, 300.0);
        assert_eq!(rect.height, 600.0);
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.y, -200.0);
        assert!(covers(&rect, 300.0, 200.0));
    }

    #[test]
    fn correction_band_prefers_larger_deficit() {
        // ratio 1.5, deficits 300/250 = 1.2 sit inside (1.01, 1.5)
        let rect = size_fill(300.0, 200.0, 600.0, 450.0);

        assert_eq!(rect.width, 675.0);
        assert_eq!(rect.height, 450.0);
        assert!((rect.x - -37.5).abs() < EPS);
        assert!(covers(&rect, 600.0, 450.0));
    }

    #[test]
    fn same_aspect_ratio_fits_exactly() {
        let rect = size_fill(160.0, 90.0, 320.0, 180.0);
        assert!((rect.width - 320.0).abs() < EPS);
        assert!((rect.height - 180.0).abs() < EPS);
        assert!(rect.x.abs() < EPS && rect.y.abs() < EPS);
    }

    #[test]
    fn to_changes_uses_pixel_values() {
        let changes = Rect::new(-100.0, 0.0, 400.0, 200.5).to_changes();

        assert_eq!(changes.get(StyleProperty::Left), Some("-100px"));
        assert_eq!(changes.get(StyleProperty::Top), Some("0px"));
        assert_eq!(changes.get(StyleProperty::Width), Some("400px"));
        assert_eq!(changes.get(StyleProperty::Height), Some("200.5px"));
    }
}
