//! Declarative keyframe timelines and their player.
//!
//! A [`Timeline`] is a list of [`Keyframe`]s over one or more [`Channel`]s.
//! Sampling a channel at a point in time picks the latest keyframe of that
//! channel that has started and interpolates it; before the first keyframe the
//! channel holds its first `from` value, after the last one its final `to`.

use std::time::Duration;

use smallvec::SmallVec;

use crate::animation::{Channel, Keyframe, TimingCurve};

/// Whether a timeline plays once or loops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Repeat {
    /// Play once and finish.
    #[default]
    Once,
    /// Loop until explicitly removed.
    Forever,
}

/// An ordered set of keyframes with a period.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    keyframes: SmallVec<[Keyframe; 2]>,
    period: Duration,
    repeat: Repeat,
}

impl Timeline {
    /// Builds a one-shot timeline whose period is the latest keyframe end.
    pub fn new(keyframes: impl IntoIterator<Item = Keyframe>) -> Self {
        let keyframes: SmallVec<[Keyframe; 2]> = keyframes.into_iter().collect();
        let period = keyframes
            .iter()
            .map(Keyframe::end)
            .max()
            .unwrap_or(Duration::ZERO);
        Self {
            keyframes,
            period,
            repeat: Repeat::Once,
        }
    }

    /// Builds a one-shot timeline animating a single channel.
    pub fn tween(
        channel: Channel,
        from: f32,
        to: f32,
        duration: Duration,
        curve: TimingCurve,
    ) -> Self {
        Self::new([Keyframe::new(channel, from, to, duration).with_curve(curve)])
    }

    /// Makes the timeline loop forever.
    pub fn repeat_forever(mut self) -> Self {
        self.repeat = Repeat::Forever;
        self
    }

    /// Overrides the period, e.g. to add trailing idle time to a loop.
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Keyframes in declaration order.
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Length of one pass.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Repeat mode.
    pub fn repeat(&self) -> Repeat {
        self.repeat
    }

    /// Returns `true` if any keyframe animates `channel`.
    pub fn animates(&self, channel: Channel) -> bool {
        self.keyframes.iter().any(|keyframe| keyframe.channel == channel)
    }

    /// Maps time since the timeline started to time within the current pass.
    pub fn local_time(&self, elapsed: Duration) -> Duration {
        match self.repeat {
            Repeat::Once => elapsed.min(self.period),
            Repeat::Forever => {
                let period = self.period.as_nanos();
                if period == 0 {
                    return Duration::ZERO;
                }
                let local = elapsed.as_nanos() % period;
                Duration::from_nanos(local as u64)
            }
        }
    }

    /// Value of `channel` after `elapsed`, or `None` if the timeline does not
    /// animate it.
    pub fn sample(&self, channel: Channel, elapsed: Duration) -> Option<f32> {
        let local = self.local_time(elapsed);
        let mut frames = self
            .keyframes
            .iter()
            .filter(|keyframe| keyframe.channel == channel);
        let first = frames.next()?;

        let mut active = first;
        for keyframe in frames {
            if keyframe.offset <= local {
                active = keyframe;
            }
        }
        Some(active.sample(local))
    }

    /// Returns `true` once a one-shot timeline has played through.
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.repeat == Repeat::Once && elapsed >= self.period
    }
}
