//! Circle geometry for the indicator's layers.
//!
//! Every layer of the indicator is a circle centered in the control bounds:
//! the progress arc hugs the outer edge, the track (which doubles as the solid
//! background) sits inside it, and the icon mask and shadow share the track's
//! radius. Reveal animations shrink a circle toward its center, so a reveal of
//! `0.0` is the zero-radius point at the centroid and `1.0` the full shape.

use lyon_path::{
    Path,
    math::{Point, point},
};

/// Bezier handle length for a quarter circle of radius 1.
const KAPPA: f32 = 0.552_284_8;

/// A width/height pair in logical points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Size {
    /// Creates a new size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Center point of a rectangle with this size anchored at the origin.
    pub fn center(self) -> Point {
        point(self.width * 0.5, self.height * 0.5)
    }
}

/// A circle in control coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    /// Center of the circle.
    pub center: Point,
    /// Radius, never negative.
    pub radius: f32,
}

impl Circle {
    /// Creates a circle, clamping negative radii to zero.
    pub fn new(center: Point, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    /// Scales the radius by a reveal fraction while keeping the center.
    pub fn revealed(self, fraction: f32) -> Self {
        let fraction = if fraction.is_nan() { 0.0 } else { fraction };
        Self::new(self.center, self.radius * fraction)
    }

    /// Builds a closed path that starts at twelve o'clock and runs clockwise on
    /// screen, which is where stroke fractions are measured from.
    pub fn to_path(&self) -> Path {
        let (cx, cy) = (self.center.x, self.center.y);
        let r = self.radius;
        let k = r * KAPPA;

        let mut builder = Path::builder().with_svg();
        builder.move_to(point(cx, cy - r));
        builder.cubic_bezier_to(point(cx + k, cy - r), point(cx + r, cy - k), point(cx + r, cy));
        builder.cubic_bezier_to(point(cx + r, cy + k), point(cx + k, cy + r), point(cx, cy + r));
        builder.cubic_bezier_to(point(cx - k, cy + r), point(cx - r, cy + k), point(cx - r, cy));
        builder.cubic_bezier_to(point(cx - r, cy - k), point(cx - k, cy - r), point(cx, cy - r));
        builder.close();
        builder.build()
    }
}

/// Fixed measurements that position the layers inside the control bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutMetrics {
    /// Gap between the control bounds and the progress arc.
    pub outer_padding: f32,
    /// Stroke width of the progress arc.
    pub progress_width: f32,
    /// Stroke width of the track ring.
    pub track_width: f32,
    /// Minimum space kept around an icon inside the track.
    pub min_image_padding: f32,
    /// Intrinsic size used when no icon is larger.
    pub default_content_size: Size,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            outer_padding: 1.0,
            progress_width: 2.5,
            track_width: 1.0,
            min_image_padding: 5.0,
            default_content_size: Size::new(35.0, 35.0),
        }
    }
}

impl LayoutMetrics {
    /// Distance from the control edge to the track's center line.
    pub fn track_inset(&self) -> f32 {
        self.outer_padding + self.progress_width + 0.5 * self.track_width
    }

    /// Total padding added around an icon when computing the intrinsic size.
    pub fn icon_padding(&self) -> f32 {
        2.0 * (self.min_image_padding + self.track_width + self.progress_width + self.outer_padding)
    }
}

/// Resolved circles for a concrete control size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    /// Bounds the layout was computed for.
    pub bounds: Size,
    /// Center line of the progress arc stroke.
    pub progress: Circle,
    /// Track ring and solid background.
    pub track: Circle,
    /// Mask revealing the icon.
    pub icon_mask: Circle,
    /// Shadow outline beneath the solid background.
    pub shadow: Circle,
}

impl Layout {
    /// Computes every layer circle for `bounds`.
    ///
    /// Non-square bounds are squared off to the shorter side so the layers are
    /// always circles.
    pub fn for_bounds(bounds: Size, metrics: &LayoutMetrics) -> Self {
        let center = bounds.center();
        let half = bounds.width.min(bounds.height).max(0.0) * 0.5;

        let progress = Circle::new(
            center,
            half - metrics.outer_padding - metrics.progress_width * 0.5,
        );
        let track = Circle::new(center, half - metrics.track_inset());

        Self {
            bounds,
            progress,
            track,
            icon_mask: track,
            shadow: track,
        }
    }

    /// Outer circle a press ripple grows to.
    pub fn ripple(&self, distance: f32) -> Circle {
        let half = self.bounds.width.max(self.bounds.height) * 0.5;
        Circle::new(self.bounds.center(), half + distance)
    }
}

#[cfg(test)]
mod tests {
    use lyon_path::Event;

    use super::*;

    #[test]
    fn layout_radii_follow_metrics() {
        let layout = Layout::for_bounds(Size::new(40.0, 50.0), &LayoutMetrics::default());
        assert_eq!(layout.progress.center, point(20.0, 25.0));
        assert_eq!(layout.progress.radius, 20.0 - 1.0 - 1.25);
        assert_eq!(layout.track.radius, 20.0 - 4.0);
        assert_eq!(layout.icon_mask, layout.track);
        assert_eq!(layout.ripple(5.0).radius, 30.0);
    }

    #[test]
    fn tiny_bounds_never_produce_negative_radii() {
        let layout = Layout::for_bounds(Size::new(2.0, 2.0), &LayoutMetrics::default());
        assert_eq!(layout.track.radius, 0.0);
        assert_eq!(layout.progress.radius, 0.0);
    }

    #[test]
    fn revealed_circle_collapses_to_centroid() {
        let circle = Circle::new(point(10.0, 10.0), 8.0);
        assert_eq!(circle.revealed(0.0).radius, 0.0);
        assert_eq!(circle.revealed(0.5).radius, 4.0);
        assert_eq!(circle.revealed(f32::NAN).radius, 0.0);
        assert_eq!(circle.revealed(0.25).center, circle.center);
    }

    #[test]
    fn path_starts_at_twelve_o_clock() {
        let path = Circle::new(point(10.0, 10.0), 5.0).to_path();
        let mut events = path.iter();
        match events.next() {
            Some(Event::Begin { at }) => assert_eq!(at, point(10.0, 5.0)),
            other => panic!("unexpected first event {other:?}"),
        }
        let curves = path
            .iter()
            .filter(|event| matches!(event, Event::Cubic { .. }))
            .count();
        assert_eq!(curves, 4);
        assert!(matches!(path.iter().last(), Some(Event::End { close: true, .. })));
    }
}
