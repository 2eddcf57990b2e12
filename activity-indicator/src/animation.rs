//! Animation mapping for the indicator layers.

use std::time::Duration;

/// Easing applied to a keyframe's linear progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimingCurve {
    /// Constant speed.
    Linear,
    /// `cubic-bezier(0.42, 0, 1, 1)`.
    EaseIn,
    /// `cubic-bezier(0, 0, 0.58, 1)`.
    #[default]
    EaseOut,
    /// `cubic-bezier(0.42, 0, 0.58, 1)`.
    EaseInOut,
    /// Custom curve through `(x1, y1)` and `(x2, y2)`.
    CubicBezier {
        /// First control point x, in `0.0..=1.0`.
        x1: f32,
        /// First control point y.
        y1: f32,
        /// Second control point x, in `0.0..=1.0`.
        x2: f32,
        /// Second control point y.
        y2: f32,
    },
}

impl TimingCurve {
    /// Maps linear progress in `[0.0, 1.0]` to eased progress.
    pub fn transform(self, progress: f32) -> f32 {
        match self {
            TimingCurve::Linear => progress.clamp(0.0, 1.0),
            TimingCurve::EaseIn => cubic_bezier_easing(progress, 0.42, 0.0, 1.0, 1.0),
            TimingCurve::EaseOut => cubic_bezier_easing(progress, 0.0, 0.0, 0.58, 1.0),
            TimingCurve::EaseInOut => cubic_bezier_easing(progress, 0.42, 0.0, 0.58, 1.0),
            TimingCurve::CubicBezier { x1, y1, x2, y2 } => {
                cubic_bezier_easing(progress, x1, y1, x2, y2)
            }
        }
    }

    /// Returns `false` for custom curves whose x control points leave `0.0..=1.0`.
    pub fn is_valid(self) -> bool {
        match self {
            TimingCurve::CubicBezier { x1, y1, x2, y2 } => {
                (0.0..=1.0).contains(&x1)
                    && (0.0..=1.0).contains(&x2)
                    && y1.is_finite()
                    && y2.is_finite()
            }
            _ => true,
        }
    }
}

fn cubic_bezier(t: f32, a: f32, b: f32, c: f32, d: f32) -> f32 {
    let u = 1.0 - t;
    (u * u * u * a) + (3.0 * u * u * t * b) + (3.0 * u * t * t * c) + (t * t * t * d)
}

fn cubic_bezier_easing(progress: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let x = progress.clamp(0.0, 1.0);
    let mut lo = 0.0;
    let mut hi = 1.0;
    let mut t = x;

    for _ in 0..16 {
        let mid = (lo + hi) * 0.5;
        let mid_x = cubic_bezier(mid, 0.0, x1, x2, 1.0);
        if mid_x < x {
            lo = mid;
        } else {
            hi = mid;
        }
        t = mid;
    }

    // Endpoints are exact so committed model values match the last frame.
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    cubic_bezier(t, 0.0, y1, y2, 1.0)
}

/// A single animatable property of a layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Layer opacity, `0.0..=1.0`.
    Opacity,
    /// Fraction of the path where the stroke begins.
    StrokeStart,
    /// Fraction of the path where the stroke ends.
    StrokeEnd,
    /// Rotation in radians.
    Rotation,
    /// Radius fraction of the layer's circle; `0.0` is the centroid point.
    Reveal,
    /// Uniform scale around the layer center.
    Scale,
}

/// One timed property change: `from` to `to` over `duration`, starting
/// `offset` into the owning timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    /// Animated property.
    pub channel: Channel,
    /// Value at the start of the keyframe.
    pub from: f32,
    /// Value at the end of the keyframe.
    pub to: f32,
    /// Start time relative to the timeline.
    pub offset: Duration,
    /// Length of the keyframe.
    pub duration: Duration,
    /// Easing curve.
    pub curve: TimingCurve,
}

impl Keyframe {
    /// A linear keyframe that starts at the beginning of its timeline.
    pub fn new(channel: Channel, from: f32, to: f32, duration: Duration) -> Self {
        Self {
            channel,
            from,
            to,
            offset: Duration::ZERO,
            duration,
            curve: TimingCurve::Linear,
        }
    }

    /// Moves the keyframe to `offset` into the timeline.
    pub fn starting_at(mut self, offset: Duration) -> Self {
        self.offset = offset;
        self
    }

    /// Replaces the easing curve.
    pub fn with_curve(mut self, curve: TimingCurve) -> Self {
        self.curve = curve;
        self
    }

    /// Timeline time at which the keyframe completes.
    pub fn end(&self) -> Duration {
        self.offset + self.duration
    }

    /// Value at timeline time `local`.
    pub fn sample(&self, local: Duration) -> f32 {
        if local <= self.offset {
            return self.from;
        }
        if local >= self.end() {
            return self.to;
        }
        let progress = (local - self.offset).as_secs_f64() / self.duration.as_secs_f64();
        let eased = self.curve.transform(progress as f32);
        self.from + (self.to - self.from) * eased
    }
}
