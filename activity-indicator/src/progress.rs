//! Determinate progress arc.

use std::time::Duration;

use crate::{
    animation::{Channel, TimingCurve},
    timeline::Timeline,
};

/// Maps a stored progress value to the drawn stroke fraction.
///
/// The stored value is kept as given; only what is drawn is clamped.
pub fn stroke_fraction(progress: f32) -> f32 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// Animates the stroke end from `from` to `to`, both as stored progress values.
pub fn stroke_timeline(from: f32, to: f32, duration: Duration, curve: TimingCurve) -> Timeline {
    Timeline::tween(
        Channel::StrokeEnd,
        stroke_fraction(from),
        stroke_fraction(to),
        duration,
        curve,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_fraction_is_clamped() {
        assert_eq!(stroke_fraction(0.3), 0.3);
        assert_eq!(stroke_fraction(-1.0), 0.0);
        assert_eq!(stroke_fraction(1.5), 1.0);
        assert_eq!(stroke_fraction(f32::NAN), 0.0);
        assert_eq!(stroke_fraction(f32::INFINITY), 1.0);
    }

    #[test]
    fn timeline_runs_between_clamped_fractions() {
        let timeline = stroke_timeline(-0.5, 2.0, Duration::from_millis(200), TimingCurve::Linear);
        assert_eq!(timeline.sample(Channel::StrokeEnd, Duration::ZERO), Some(0.0));
        assert_eq!(
            timeline.sample(Channel::StrokeEnd, Duration::from_millis(100)),
            Some(0.5)
        );
        assert_eq!(
            timeline.sample(Channel::StrokeEnd, Duration::from_millis(200)),
            Some(1.0)
        );
    }
}
