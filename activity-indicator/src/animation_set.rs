//! Keyed registry of running animations.
//!
//! Each animation is registered under a `(Layer, AnimationKey)` slot. Putting
//! a new animation into an occupied slot replaces the old one and hands it
//! back so the caller can settle whatever the old one was going to do on
//! completion.

use std::time::Duration;

use rustc_hash::FxHashMap;

use crate::{animation::Channel, render::OverlayId, timeline::Timeline};

/// The layer an animation writes into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Track ring and background.
    Track,
    /// Progress arc.
    Progress,
    /// Icon mask.
    Icon,
    /// Drop shadow.
    Shadow,
    /// A transient overlay.
    Overlay(OverlayId),
}

/// The role an animation plays on its layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationKey {
    /// Visibility cross-fade.
    Fade,
    /// Expand, collapse or icon mask reveal.
    Reveal,
    /// Determinate stroke end.
    Progress,
    /// Spinning stroke choreography.
    SpinStroke,
    /// Spinning rotation.
    SpinRotation,
    /// Background color wipe.
    Wipe,
    /// Press ripple.
    Ripple,
    /// Press scale of the background.
    PressScale,
}

/// Work to do once an animation stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// Commit the overlay's fill as the background and remove the overlay.
    FinishWipe(OverlayId),
    /// Remove the overlay.
    RemoveOverlay(OverlayId),
    /// Drop the glyph whose mask just collapsed.
    ClearIcon,
}

/// A timeline bound to a layer and a start time.
#[derive(Clone, Debug, PartialEq)]
pub struct RunningAnimation {
    /// Layer the timeline writes into.
    pub layer: Layer,
    /// Slot key on that layer.
    pub key: AnimationKey,
    /// Keyframes being played.
    pub timeline: Timeline,
    /// Clock time the animation began.
    pub began_at: Duration,
    /// Work to run when the animation finishes or is replaced.
    pub completion: Option<Completion>,
    seq: u64,
}

impl RunningAnimation {
    /// Time since the animation began, zero before it began.
    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.began_at)
    }

    /// Returns `true` once a one-shot timeline has played through.
    pub fn is_finished(&self, now: Duration) -> bool {
        self.timeline.is_finished(self.elapsed(now))
    }

    /// Value of `channel` at `now`, if the timeline animates it.
    pub fn sample(&self, channel: Channel, now: Duration) -> Option<f32> {
        self.timeline.sample(channel, self.elapsed(now))
    }
}

/// Every running animation of one control.
#[derive(Clone, Debug, Default)]
pub struct AnimationSet {
    running: FxHashMap<(Layer, AnimationKey), RunningAnimation>,
    next_seq: u64,
}

impl AnimationSet {
    /// Registers `timeline` under `(layer, key)` starting at `now`.
    ///
    /// Returns the animation it replaced, if any.
    pub fn insert(
        &mut self,
        layer: Layer,
        key: AnimationKey,
        timeline: Timeline,
        now: Duration,
        completion: Option<Completion>,
    ) -> Option<RunningAnimation> {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.running.insert(
            (layer, key),
            RunningAnimation {
                layer,
                key,
                timeline,
                began_at: now,
                completion,
                seq,
            },
        )
    }

    /// Unregisters the animation in `(layer, key)`.
    pub fn remove(&mut self, layer: Layer, key: AnimationKey) -> Option<RunningAnimation> {
        self.running.remove(&(layer, key))
    }

    /// Unregisters every animation on `layer`, oldest first.
    pub fn remove_layer(&mut self, layer: Layer) -> Vec<RunningAnimation> {
        self.take_where(|animation| animation.layer == layer)
    }

    /// The animation in `(layer, key)`.
    pub fn get(&self, layer: Layer, key: AnimationKey) -> Option<&RunningAnimation> {
        self.running.get(&(layer, key))
    }

    /// Returns `true` if `(layer, key)` is occupied.
    pub fn contains(&self, layer: Layer, key: AnimationKey) -> bool {
        self.running.contains_key(&(layer, key))
    }

    /// Number of running animations.
    pub fn len(&self) -> usize {
        self.running.len()
    }

    /// Returns `true` when nothing is running.
    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    /// Running animations, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &RunningAnimation> {
        let mut animations: Vec<_> = self.running.values().collect();
        animations.sort_by_key(|animation| animation.seq);
        animations.into_iter()
    }

    /// Value of `channel` on `layer` at `now`.
    ///
    /// When several animations drive the same channel the most recently
    /// registered one wins.
    pub fn sample(&self, layer: Layer, channel: Channel, now: Duration) -> Option<f32> {
        self.running
            .values()
            .filter(|animation| animation.layer == layer && animation.timeline.animates(channel))
            .max_by_key(|animation| animation.seq)
            .and_then(|animation| animation.sample(channel, now))
    }

    /// Unregisters every animation that has finished by `now`, oldest first.
    pub fn drain_finished(&mut self, now: Duration) -> Vec<RunningAnimation> {
        self.take_where(|animation| animation.is_finished(now))
    }

    fn take_where(&mut self, predicate: impl Fn(&RunningAnimation) -> bool) -> Vec<RunningAnimation> {
        let keys: Vec<_> = self
            .running
            .iter()
            .filter(|(_, animation)| predicate(animation))
            .map(|(key, _)| *key)
            .collect();
        let mut taken: Vec<_> = keys
            .into_iter()
            .filter_map(|key| self.running.remove(&key))
            .collect();
        taken.sort_by_key(|animation| animation.seq);
        taken
    }
}
