//! Indeterminate spinning choreography.
//!
//! The arc's stroke runs a five-stage cycle: the end races around while the
//! start trails behind, both hold, the start catches up, holds, and closes the
//! gap. Meanwhile the whole arc rotates with its own period. The two loops are
//! not phase-locked, so consecutive cycles start at different angles.

use std::{f32::consts::TAU, time::Duration};

use crate::{
    animation::{Channel, Keyframe},
    timeline::Timeline,
};

/// Timing constants for the spinning arc.
pub struct SpinnerDefaults;

impl SpinnerDefaults {
    /// Stroke end sweeps the full circle.
    pub const GROW: Duration = Duration::from_millis(900);
    /// Short pause between movements.
    pub const HOLD: Duration = Duration::from_millis(50);
    /// Stroke start chases the end.
    pub const CATCH_UP: Duration = Duration::from_millis(600);
    /// Stroke start closes the remaining gap.
    pub const CLOSE: Duration = Duration::from_millis(100);
    /// One full turn of the container.
    pub const ROTATION_PERIOD: Duration = Duration::from_secs(3);
}

/// One stage of the stroke cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpinStage {
    /// Stage length.
    pub duration: Duration,
    /// `(from, to)` of the stroke start.
    pub stroke_start: (f32, f32),
    /// `(from, to)` of the stroke end.
    pub stroke_end: (f32, f32),
}

/// The stroke cycle, in playback order.
pub const SPIN_STAGES: [SpinStage; 5] = [
    SpinStage {
        duration: SpinnerDefaults::GROW,
        stroke_start: (0.0, 0.25),
        stroke_end: (0.0, 1.0),
    },
    SpinStage {
        duration: SpinnerDefaults::HOLD,
        stroke_start: (0.25, 0.25),
        stroke_end: (1.0, 1.0),
    },
    SpinStage {
        duration: SpinnerDefaults::CATCH_UP,
        stroke_start: (0.25, 0.9),
        stroke_end: (1.0, 1.0),
    },
    SpinStage {
        duration: SpinnerDefaults::HOLD,
        stroke_start: (0.9, 0.9),
        stroke_end: (1.0, 1.0),
    },
    SpinStage {
        duration: SpinnerDefaults::CLOSE,
        stroke_start: (0.9, 1.0),
        stroke_end: (1.0, 1.0),
    },
];

/// Length of one stroke cycle.
pub fn cycle_duration() -> Duration {
    SPIN_STAGES.iter().map(|stage| stage.duration).sum()
}

/// Flattens [`SPIN_STAGES`] into `(channel, from, to, offset, duration)` keyframes.
pub fn stroke_keyframes() -> Vec<Keyframe> {
    let mut offset = Duration::ZERO;
    let mut keyframes = Vec::with_capacity(SPIN_STAGES.len() * 2);
    for stage in SPIN_STAGES {
        let (start_from, start_to) = stage.stroke_start;
        let (end_from, end_to) = stage.stroke_end;
        keyframes.push(
            Keyframe::new(Channel::StrokeStart, start_from, start_to, stage.duration)
                .starting_at(offset),
        );
        keyframes.push(
            Keyframe::new(Channel::StrokeEnd, end_from, end_to, stage.duration).starting_at(offset),
        );
        offset += stage.duration;
    }
    keyframes
}

/// The looping stroke choreography.
pub fn stroke_timeline() -> Timeline {
    Timeline::new(stroke_keyframes())
        .with_period(cycle_duration())
        .repeat_forever()
}

/// The looping full-turn rotation.
pub fn rotation_timeline() -> Timeline {
    Timeline::new([Keyframe::new(
        Channel::Rotation,
        0.0,
        TAU,
        SpinnerDefaults::ROTATION_PERIOD,
    )])
    .repeat_forever()
}
