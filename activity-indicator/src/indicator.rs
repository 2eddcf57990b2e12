//! The activity indicator control.
//!
//! ## Usage
//!
//! Create an [`ActivityIndicator`], configure per-state icons and colors, then
//! call [`transition`](ActivityIndicator::transition) whenever the activity
//! changes. Once per frame, [`advance`](ActivityIndicator::advance) the clock
//! and [`render`](ActivityIndicator::render) the resulting [`Frame`].

use std::time::Duration;

use tracing::{debug, trace};

use crate::{
    animation::{Channel, Keyframe},
    animation_set::{AnimationKey, AnimationSet, Completion, Layer},
    color::Color,
    config::{ConfigError, IndicatorConfig},
    geometry::{Layout, Size},
    progress::{stroke_fraction, stroke_timeline},
    render::{Frame, Overlay, OverlayId, OverlayKind, RenderState, Renderer},
    resolve::{RenderStyle, VisualDescriptor, resolve},
    spinner,
    state::{ActivityState, Icon, StateStyle, StateStyles},
    timeline::Timeline,
    transition::{
        ElementChange, IconReveal, ProgressBaseline, ShadowMotion, Step, TransitionInput, plan,
    },
};

/// Phase of a press on the control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitPhase {
    /// The pointer went down.
    Down,
    /// The pointer was released or cancelled.
    Up,
}

/// A circular button that communicates asynchronous activity.
#[derive(Clone, Debug)]
pub struct ActivityIndicator {
    config: IndicatorConfig,
    state: ActivityState,
    styles: StateStyles,
    progress: f32,
    render_style: RenderStyle,
    descriptor: VisualDescriptor,
    render: RenderState,
    animations: AnimationSet,
    pending_wipe: Option<OverlayId>,
    now: Duration,
}

impl Default for ActivityIndicator {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! state_accessors {
    ($($state:ident => $image:ident, $set_image:ident, $tint:ident, $set_tint:ident, $track:ident, $set_track:ident;)*) => {
        $(
            #[doc = concat!("Icon shown while ", stringify!($state), ".")]
            pub fn $image(&self) -> Option<&Icon> {
                self.styles.icon(ActivityState::$state)
            }

            #[doc = concat!("Sets or clears the icon shown while ", stringify!($state), ".")]
            pub fn $set_image(&mut self, icon: Option<Icon>) {
                self.set_image(icon, [ActivityState::$state]);
            }

            #[doc = concat!("Tint used while ", stringify!($state), ".")]
            pub fn $tint(&self) -> Color {
                self.tint_color(ActivityState::$state)
            }

            #[doc = concat!("Sets or clears the tint used while ", stringify!($state), ".")]
            pub fn $set_tint(&mut self, color: Option<Color>) {
                self.set_tint_color(color, [ActivityState::$state]);
            }

            #[doc = concat!("Track color used while ", stringify!($state), ".")]
            pub fn $track(&self) -> Color {
                self.track_color(ActivityState::$state)
            }

            #[doc = concat!("Sets or clears the track color used while ", stringify!($state), ".")]
            pub fn $set_track(&mut self, color: Option<Color>) {
                self.set_track_color(color, [ActivityState::$state]);
            }
        )*
    };
}

impl ActivityIndicator {
    /// Creates an inactive indicator with the default configuration.
    pub fn new() -> Self {
        Self::build(IndicatorConfig::default())
    }

    /// Creates an inactive indicator after validating `config`.
    pub fn with_config(config: IndicatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: IndicatorConfig) -> Self {
        let mut indicator = Self {
            styles: StateStyles::new(config.default_tint),
            render_style: config.render_style,
            config,
            state: ActivityState::Inactive,
            progress: 0.0,
            descriptor: VisualDescriptor::default(),
            render: RenderState::default(),
            animations: AnimationSet::default(),
            pending_wipe: None,
            now: Duration::ZERO,
        };
        indicator.refresh();
        indicator
    }

    /// Configuration the indicator was built with.
    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Moves to `next`, animating the change when `animated` is set.
    ///
    /// Transitioning to the current state does nothing.
    #[tracing::instrument(level = "debug", skip(self), fields(from = %self.state))]
    pub fn transition(&mut self, next: ActivityState, animated: bool) {
        if next == self.state {
            return;
        }

        let from_state = self.state;
        self.state = next;
        let next_descriptor = resolve(next, self.render_style, &self.styles, &self.descriptor);
        let plan = plan(&TransitionInput {
            from_state,
            to_state: next,
            from: &self.descriptor,
            to: &next_descriptor,
            from_tint: self.styles.tint_color(from_state),
            to_tint: self.styles.tint_color(next),
            render_style: self.render_style,
            animation_style: self.config.animation_style,
            animated,
        });
        debug!(
            steps = plan.steps.len(),
            unchanged = plan.diff.is_empty(),
            "planned transition"
        );

        self.descriptor = next_descriptor;
        for step in plan.steps {
            self.apply(step);
        }
    }

    /// The live activity state.
    pub fn activity_state(&self) -> ActivityState {
        self.state
    }

    /// Moves to `state` without animation.
    pub fn set_activity_state(&mut self, state: ActivityState) {
        self.transition(state, false);
    }

    /// Stored progress, exactly as last set.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Stores `value`. While in the progress state the arc follows it, with a
    /// tween from the previous value when `animated` is set.
    pub fn set_progress(&mut self, value: f32, animated: bool) {
        let previous = self.progress;
        self.progress = value;
        if self.state == ActivityState::Progress {
            debug!(from = previous, to = value, animated, "driving progress");
            self.drive_stroke(stroke_fraction(previous), animated);
        }
    }

    /// Per-state style table.
    pub fn styles(&self) -> &StateStyles {
        &self.styles
    }

    /// Every resolved attribute of `state`.
    pub fn style(&self, state: ActivityState) -> StateStyle {
        self.styles.style(state, self.progress)
    }

    /// Control-wide tint.
    pub fn default_tint(&self) -> Color {
        self.styles.default_tint()
    }

    /// Replaces the control-wide tint.
    pub fn set_default_tint(&mut self, color: Color) {
        self.styles.set_default_tint(color);
        self.commit_colors();
    }

    /// Tint of `state`.
    pub fn tint_color(&self, state: ActivityState) -> Color {
        self.styles.tint_color(state)
    }

    /// Sets the tint for `states`, or reverts them to the default with `None`.
    pub fn set_tint_color(
        &mut self,
        color: Option<Color>,
        states: impl IntoIterator<Item = ActivityState>,
    ) {
        self.styles.set_tint_color(color, states);
        self.commit_colors();
    }

    /// Track color of `state`.
    pub fn track_color(&self, state: ActivityState) -> Color {
        self.styles.track_color(state)
    }

    /// Sets the track color for `states`, or reverts them to their tint with `None`.
    pub fn set_track_color(
        &mut self,
        color: Option<Color>,
        states: impl IntoIterator<Item = ActivityState>,
    ) {
        self.styles.set_track_color(color, states);
        self.commit_colors();
    }

    /// Icon of `state`.
    pub fn image(&self, state: ActivityState) -> Option<&Icon> {
        self.styles.icon(state)
    }

    /// Sets or clears the icon for `states` and redraws the live state
    /// without animation.
    pub fn set_image(&mut self, icon: Option<Icon>, states: impl IntoIterator<Item = ActivityState>) {
        self.styles.set_icon(icon, states);
        self.refresh();
    }

    state_accessors! {
        Inactive => inactive_image, set_inactive_image, inactive_tint_color, set_inactive_tint_color, inactive_track_color, set_inactive_track_color;
        Spinning => spinning_image, set_spinning_image, spinning_tint_color, set_spinning_tint_color, spinning_track_color, set_spinning_track_color;
        Progress => progress_image, set_progress_image, progress_tint_color, set_progress_tint_color, progress_track_color, set_progress_track_color;
        Paused => paused_image, set_paused_image, paused_tint_color, set_paused_tint_color, paused_track_color, set_paused_track_color;
        Complete => complete_image, set_complete_image, complete_tint_color, set_complete_tint_color, complete_track_color, set_complete_track_color;
    }

    /// Global render style.
    pub fn render_style(&self) -> RenderStyle {
        self.render_style
    }

    /// Switches render style and redraws the live state without animation.
    pub fn set_render_style(&mut self, style: RenderStyle) {
        if style == self.render_style {
            return;
        }
        if let Some(id) = self.pending_wipe.take() {
            self.finish_wipe(id);
        }
        self.render_style = style;
        self.refresh();
    }

    /// Descriptor of what is on screen.
    pub fn visual_descriptor(&self) -> &VisualDescriptor {
        &self.descriptor
    }

    /// Committed layer values.
    pub fn render_state(&self) -> &RenderState {
        &self.render
    }

    /// Running animations.
    pub fn animations(&self) -> &AnimationSet {
        &self.animations
    }

    /// Control clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Moves the clock forward by `dt` and settles every animation that
    /// finished by then.
    pub fn advance(&mut self, dt: Duration) {
        self.now += dt;
        for finished in self.animations.drain_finished(self.now) {
            trace!(layer = ?finished.layer, key = ?finished.key, "animation finished");
            if let Some(completion) = finished.completion {
                self.complete(completion);
            }
        }
    }

    /// Samples every layer at the current clock.
    pub fn frame(&self) -> Frame {
        Frame::sample(&self.render, &self.animations, self.now)
    }

    /// Hands the current frame to `renderer`.
    pub fn render(&self, renderer: &mut impl Renderer) {
        renderer.draw(&self.frame());
    }

    /// Plays the press feedback: a ripple that grows past the bounds while
    /// fading out, and a background scale toward the pressed size or back.
    pub fn ripple(&mut self, phase: HitPhase) {
        let ripple = self.config.ripple;
        let curve = self.config.timing_curve;
        let id = self.render.overlays.insert(Overlay {
            kind: OverlayKind::Ripple,
            fill: ripple.color,
            reveal: 1.0,
            opacity: 0.0,
        });
        let timeline = Timeline::new([
            Keyframe::new(Channel::Reveal, 0.0, 1.0, ripple.duration).with_curve(curve),
            Keyframe::new(Channel::Opacity, 1.0, 0.0, ripple.duration).with_curve(curve),
        ]);
        self.animate(
            Layer::Overlay(id),
            AnimationKey::Ripple,
            timeline,
            Some(Completion::RemoveOverlay(id)),
        );

        let target = match phase {
            HitPhase::Down => ripple.press_scale,
            HitPhase::Up => 1.0,
        };
        let from = self.presented(Layer::Track, Channel::Scale, self.render.track.scale);
        self.render.track.scale = target;
        let scale = Timeline::tween(
            Channel::Scale,
            from,
            target,
            self.config.animation_duration,
            curve,
        );
        self.animate(Layer::Track, AnimationKey::PressScale, scale, None);
        debug!(?phase, "ripple");
    }

    /// Preferred size: the default content size, grown to fit the largest
    /// configured icon with its padding.
    pub fn intrinsic_size(&self) -> Size {
        let metrics = &self.config.metrics;
        let padding = metrics.icon_padding();
        self.styles
            .icons()
            .fold(metrics.default_content_size, |size, icon| {
                let icon = icon.size();
                Size::new(
                    size.width.max(icon.width + padding),
                    size.height.max(icon.height + padding),
                )
            })
    }

    /// Layer geometry for a control of `bounds`.
    pub fn layout(&self, bounds: Size) -> Layout {
        Layout::for_bounds(bounds, &self.config.metrics)
    }

    /// Re-resolves the live state and commits it without animation.
    fn refresh(&mut self) {
        let next = resolve(self.state, self.render_style, &self.styles, &self.descriptor);
        self.apply_element(Layer::Track, ElementChange::Snap {
            visible: next.track_visible,
        });
        self.apply_element(Layer::Progress, ElementChange::Snap {
            visible: next.progress_visible,
        });
        self.set_icon(next.icon.clone(), None);
        self.descriptor = next;
        self.commit_colors();
    }

    fn apply(&mut self, step: Step) {
        match step {
            Step::Track(change) => self.apply_element(Layer::Track, change),
            Step::Progress(change) => self.apply_element(Layer::Progress, change),
            Step::Wipe { from, to } => {
                debug!(?from, ?to, "wiping background");
                self.start_wipe();
            }
            Step::CommitColors => self.commit_colors(),
            Step::SetIcon { icon, reveal } => self.set_icon(icon, reveal),
            Step::StartSpinner => self.start_spinner(),
            Step::StopSpinner { freeze } => self.stop_spinner(freeze),
            Step::DriveProgress { baseline, animated } => {
                self.render.progress.stroke_start = 0.0;
                self.render.progress.rotation = 0.0;
                let from = match baseline {
                    ProgressBaseline::Zero => 0.0,
                    ProgressBaseline::Current => self.render.progress.stroke_end,
                };
                self.drive_stroke(from, animated);
            }
        }
    }

    fn presented(&self, layer: Layer, channel: Channel, model: f32) -> f32 {
        self.animations
            .sample(layer, channel, self.now)
            .unwrap_or(model)
    }

    fn animate(
        &mut self,
        layer: Layer,
        key: AnimationKey,
        timeline: Timeline,
        completion: Option<Completion>,
    ) {
        if let Some(replaced) = self
            .animations
            .insert(layer, key, timeline, self.now, completion)
        {
            trace!(?layer, ?key, "animation replaced");
            if let Some(completion) = replaced.completion {
                self.complete(completion);
            }
        }
    }

    fn complete(&mut self, completion: Completion) {
        match completion {
            Completion::FinishWipe(id) => {
                self.finish_wipe(id);
                self.commit_colors();
            }
            Completion::RemoveOverlay(id) => {
                self.render.overlays.remove(id);
                self.animations.remove_layer(Layer::Overlay(id));
            }
            Completion::ClearIcon => {
                trace!("icon collapsed");
                self.render.icon.icon = None;
            }
        }
    }

    fn opacity_mut(&mut self, layer: Layer) -> Option<&mut f32> {
        match layer {
            Layer::Track => Some(&mut self.render.track.opacity),
            Layer::Progress => Some(&mut self.render.progress.opacity),
            _ => None,
        }
    }

    fn apply_element(&mut self, layer: Layer, change: ElementChange) {
        let duration = self.config.animation_duration;
        let curve = self.config.timing_curve;
        let from_opacity = self.presented(layer, Channel::Opacity, self.current_opacity(layer));
        let from_reveal = self
            .animations
            .get(layer, AnimationKey::Reveal)
            .and_then(|animation| animation.sample(Channel::Reveal, self.now));

        self.set_opacity(layer, change.visible());
        match change {
            ElementChange::Snap { .. } => {
                self.animations.remove(layer, AnimationKey::Fade);
                self.animations.remove(layer, AnimationKey::Reveal);
            }
            ElementChange::Fade { visible } => {
                self.animations.remove(layer, AnimationKey::Reveal);
                let to = if visible { 1.0 } else { 0.0 };
                let fade = Timeline::tween(Channel::Opacity, from_opacity, to, duration, curve);
                self.animate(layer, AnimationKey::Fade, fade, None);
            }
            ElementChange::Expand => {
                self.animations.remove(layer, AnimationKey::Fade);
                let from = from_reveal.unwrap_or(0.0);
                let grow = Timeline::tween(Channel::Reveal, from, 1.0, duration, curve);
                self.animate(layer, AnimationKey::Reveal, grow, None);
            }
            ElementChange::Collapse => {
                self.animations.remove(layer, AnimationKey::Fade);
                let from = from_reveal.unwrap_or(1.0);
                let shrink = Timeline::new([
                    Keyframe::new(Channel::Opacity, 1.0, 1.0, duration),
                    Keyframe::new(Channel::Reveal, from, 0.0, duration).with_curve(curve),
                ]);
                self.animate(layer, AnimationKey::Reveal, shrink, None);
            }
        }
    }

    fn current_opacity(&self, layer: Layer) -> f32 {
        match layer {
            Layer::Track => self.render.track.opacity,
            Layer::Progress => self.render.progress.opacity,
            _ => 1.0,
        }
    }

    fn set_opacity(&mut self, layer: Layer, visible: bool) {
        if let Some(opacity) = self.opacity_mut(layer) {
            *opacity = if visible { 1.0 } else { 0.0 };
        }
    }

    /// Shows `icon`. A disappearing glyph stays in the layer while its mask
    /// collapses and is cleared once the collapse finishes.
    fn set_icon(&mut self, icon: Option<Icon>, reveal: Option<IconReveal>) {
        let collapsing = self
            .animations
            .get(Layer::Icon, AnimationKey::Reveal)
            .is_some_and(|animation| animation.completion == Some(Completion::ClearIcon));
        let target = if collapsing {
            None
        } else {
            self.render.icon.icon.as_ref()
        };
        self.render.shadow.reveal = if icon.is_some() { 1.0 } else { 0.0 };
        if target == icon.as_ref() {
            return;
        }

        let from_reveal = self.presented(Layer::Icon, Channel::Reveal, self.render.icon.reveal);
        self.animations.remove(Layer::Icon, AnimationKey::Reveal);
        let Some(reveal) = reveal else {
            self.animations.remove(Layer::Shadow, AnimationKey::Reveal);
            self.render.icon.icon = icon;
            return;
        };

        let duration = self.config.animation_duration;
        let curve = self.config.timing_curve;
        match icon {
            Some(icon) => {
                self.render.icon.icon = Some(icon);
                self.animate(
                    Layer::Icon,
                    AnimationKey::Reveal,
                    Timeline::tween(Channel::Reveal, 0.0, 1.0, duration, curve),
                    None,
                );
            }
            None => self.animate(
                Layer::Icon,
                AnimationKey::Reveal,
                Timeline::tween(Channel::Reveal, from_reveal, 0.0, duration, curve),
                Some(Completion::ClearIcon),
            ),
        }

        let (from, to) = match reveal.shadow {
            Some(ShadowMotion::Expand) => (0.0, 1.0),
            Some(ShadowMotion::Collapse) => (1.0, 0.0),
            None => return,
        };
        self.animate(
            Layer::Shadow,
            AnimationKey::Reveal,
            Timeline::tween(Channel::Reveal, from, to, duration, curve),
            None,
        );
    }

    /// Background fill the live state settles on.
    fn button_fill(&self) -> Color {
        match self.render_style {
            RenderStyle::Solid => self.styles.tint_color(self.state),
            RenderStyle::Outline => Color::TRANSPARENT,
        }
    }

    fn commit_colors(&mut self) {
        let tint = self.styles.tint_color(self.state);
        let solid = self.render_style == RenderStyle::Solid;
        let shadow = self.config.shadow;

        self.render.progress.stroke_color = tint;
        self.render.track.stroke_color = self.styles.track_color(self.state);
        if self.pending_wipe.is_none() {
            self.render.track.fill_color = self.button_fill();
        }
        self.render.icon.tint = if solid { Color::WHITE } else { tint };
        self.render.shadow.color = if solid {
            shadow.color.with_alpha(shadow.color.a * shadow.opacity)
        } else {
            Color::TRANSPARENT
        };
    }

    fn start_wipe(&mut self) {
        if let Some(previous) = self.pending_wipe.take() {
            trace!("superseding pending wipe");
            self.finish_wipe(previous);
        }

        let fill = self.button_fill();
        if fill == self.render.track.fill_color {
            self.commit_colors();
            return;
        }

        let id = self.render.overlays.insert(Overlay {
            kind: OverlayKind::Wipe,
            fill,
            reveal: 1.0,
            opacity: 1.0,
        });
        self.pending_wipe = Some(id);
        let duration = self.config.animation_duration;
        let curve = self.config.timing_curve;
        self.animate(
            Layer::Overlay(id),
            AnimationKey::Wipe,
            Timeline::tween(Channel::Reveal, 0.0, 1.0, duration, curve),
            Some(Completion::FinishWipe(id)),
        );
        self.commit_colors();
    }

    /// Commits the overlay's fill as the background and drops the overlay.
    fn finish_wipe(&mut self, id: OverlayId) {
        if let Some(overlay) = self.render.overlays.remove(id) {
            self.render.track.fill_color = overlay.fill;
        }
        self.animations.remove_layer(Layer::Overlay(id));
        if self.pending_wipe == Some(id) {
            self.pending_wipe = None;
        }
    }

    fn start_spinner(&mut self) {
        self.animations.remove(Layer::Progress, AnimationKey::Progress);
        self.render.progress.stroke_start = 0.0;
        self.render.progress.rotation = 0.0;
        self.animate(
            Layer::Progress,
            AnimationKey::SpinStroke,
            spinner::stroke_timeline(),
            None,
        );
        self.animate(
            Layer::Progress,
            AnimationKey::SpinRotation,
            spinner::rotation_timeline(),
            None,
        );
        debug!("spinner started");
    }

    fn stop_spinner(&mut self, freeze: bool) {
        if freeze {
            let progress = &mut self.render.progress;
            for (channel, value) in [
                (Channel::StrokeStart, &mut progress.stroke_start),
                (Channel::StrokeEnd, &mut progress.stroke_end),
                (Channel::Rotation, &mut progress.rotation),
            ] {
                if let Some(sampled) = self.animations.sample(Layer::Progress, channel, self.now) {
                    *value = sampled;
                }
            }
        }

        let stroke = self
            .animations
            .remove(Layer::Progress, AnimationKey::SpinStroke);
        let rotation = self
            .animations
            .remove(Layer::Progress, AnimationKey::SpinRotation);
        if stroke.is_some() || rotation.is_some() {
            debug!(freeze, "spinner stopped");
        }
    }

    fn drive_stroke(&mut self, from: f32, animated: bool) {
        let to = stroke_fraction(self.progress);
        self.render.progress.stroke_end = to;
        if animated {
            let timeline = stroke_timeline(
                from,
                to,
                self.config.animation_duration,
                self.config.timing_curve,
            );
            self.animate(Layer::Progress, AnimationKey::Progress, timeline, None);
        } else {
            self.animations.remove(Layer::Progress, AnimationKey::Progress);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::TAU;

    use super::*;
    use crate::{
        animation::TimingCurve,
        config::RippleConfig,
        geometry::LayoutMetrics,
        resolve::AnimationStyle,
    };

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn icon(name: &str) -> Icon {
        Icon::new(name, Size::new(10.0, 10.0))
    }

    fn approx(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    fn solid() -> ActivityIndicator {
        ActivityIndicator::with_config(
            IndicatorConfig::default().render_style(RenderStyle::Solid),
        )
        .expect("valid config")
    }

    fn wipes(indicator: &ActivityIndicator) -> Vec<Color> {
        indicator
            .render_state()
            .overlays
            .values()
            .filter(|overlay| overlay.kind == OverlayKind::Wipe)
            .map(|overlay| overlay.fill)
            .collect()
    }

    #[test]
    fn starts_inactive_with_only_the_track() {
        let indicator = ActivityIndicator::new();
        assert_eq!(indicator.activity_state(), ActivityState::Inactive);
        let frame = indicator.frame();
        assert_eq!(frame.track.opacity, 1.0);
        assert_eq!(frame.progress.opacity, 0.0);
        assert_eq!(frame.track.stroke_color, Color::SYSTEM_BLUE);
        assert_eq!(frame.track.fill_color, Color::TRANSPARENT);
        assert!(indicator.animations().is_empty());
    }

    #[test]
    fn same_state_transition_is_a_no_op() {
        let mut indicator = ActivityIndicator::new();
        let before = indicator.frame();
        indicator.transition(ActivityState::Inactive, true);
        assert!(indicator.animations().is_empty());
        assert_eq!(indicator.frame(), before);

        indicator.transition(ActivityState::Spinning, true);
        let animations = indicator.animations().len();
        indicator.transition(ActivityState::Spinning, true);
        assert_eq!(indicator.animations().len(), animations);
    }

    #[test]
    fn paused_keeps_the_previous_visibility() {
        let mut indicator = ActivityIndicator::new();
        indicator.transition(ActivityState::Spinning, true);
        indicator.transition(ActivityState::Paused, true);
        let paused = indicator.visual_descriptor();
        assert!(!paused.track_visible);
        assert!(paused.progress_visible);

        indicator.transition(ActivityState::Progress, false);
        indicator.transition(ActivityState::Paused, false);
        let paused = indicator.visual_descriptor();
        assert!(paused.track_visible);
        assert!(paused.progress_visible);

        let mut solid = solid();
        solid.transition(ActivityState::Spinning, false);
        solid.transition(ActivityState::Paused, false);
        assert!(solid.visual_descriptor().track_visible);
    }

    #[test]
    fn spinner_runs_only_while_spinning() {
        let mut indicator = ActivityIndicator::new();
        indicator.transition(ActivityState::Spinning, true);
        let spinning: Vec<_> = indicator
            .animations()
            .iter()
            .filter(|animation| {
                matches!(
                    animation.key,
                    AnimationKey::SpinStroke | AnimationKey::SpinRotation
                )
            })
            .map(|animation| animation.key)
            .collect();
        assert_eq!(
            spinning,
            vec![AnimationKey::SpinStroke, AnimationKey::SpinRotation]
        );

        indicator.advance(ms(1000));
        assert!(indicator.animations().contains(Layer::Progress, AnimationKey::SpinStroke));

        indicator.transition(ActivityState::Complete, true);
        assert!(!indicator.animations().contains(Layer::Progress, AnimationKey::SpinStroke));
        assert!(!indicator.animations().contains(Layer::Progress, AnimationKey::SpinRotation));

        indicator.advance(ms(333));
        indicator.transition(ActivityState::Spinning, true);
        let stroke = indicator
            .animations()
            .get(Layer::Progress, AnimationKey::SpinStroke)
            .expect("spinner restarted");
        assert_eq!(stroke.began_at, ms(1333));
        let frame = indicator.frame();
        assert_eq!(frame.progress.stroke_start, 0.0);
        assert_eq!(frame.progress.stroke_end, 0.0);
        assert_eq!(frame.progress.rotation, 0.0);
    }

    #[test]
    fn spinner_follows_the_stage_table() {
        let mut indicator = ActivityIndicator::new();
        indicator.transition(ActivityState::Spinning, false);
        indicator.advance(ms(1250));
        let frame = indicator.frame();
        approx(frame.progress.stroke_start, 0.575);
        approx(frame.progress.stroke_end, 1.0);
        approx(frame.progress.rotation, TAU * 1.25 / 3.0);
    }

    #[test]
    fn pausing_a_spinner_freezes_the_arc() {
        let mut indicator = ActivityIndicator::new();
        indicator.transition(ActivityState::Spinning, true);
        indicator.advance(ms(1250));
        indicator.transition(ActivityState::Paused, true);

        let progress = indicator.render_state().progress;
        approx(progress.stroke_start, 0.575);
        approx(progress.stroke_end, 1.0);
        approx(progress.rotation, TAU * 1.25 / 3.0);

        indicator.advance(ms(500));
        let frame = indicator.frame();
        approx(frame.progress.stroke_start, 0.575);
        assert_eq!(frame.progress.opacity, 1.0);
    }

    #[test]
    fn set_progress_snaps_only_in_progress() {
        let mut indicator = ActivityIndicator::new();
        indicator.set_progress(0.7, false);
        assert_eq!(indicator.progress(), 0.7);
        assert_eq!(indicator.render_state().progress.stroke_end, 0.0);
        assert!(indicator.animations().is_empty());

        indicator.transition(ActivityState::Progress, false);
        assert_eq!(indicator.render_state().progress.stroke_end, 0.7);

        indicator.set_progress(0.2, false);
        assert_eq!(indicator.render_state().progress.stroke_end, 0.2);
        assert!(!indicator.animations().contains(Layer::Progress, AnimationKey::Progress));
        assert_eq!(indicator.frame().progress.stroke_end, 0.2);
    }

    #[test]
    fn set_progress_animates_from_the_previous_value() {
        let mut indicator = ActivityIndicator::with_config(
            IndicatorConfig::default().timing_curve(TimingCurve::Linear),
        )
        .expect("valid config");
        indicator.transition(ActivityState::Progress, false);
        indicator.set_progress(0.2, false);
        indicator.set_progress(0.6, true);

        indicator.advance(ms(100));
        approx(indicator.frame().progress.stroke_end, 0.4);
        indicator.advance(ms(100));
        assert!(indicator.animations().is_empty());
        assert_eq!(indicator.frame().progress.stroke_end, 0.6);
    }

    #[test]
    fn out_of_range_progress_is_stored_but_clamped_on_screen() {
        let mut indicator = ActivityIndicator::new();
        indicator.transition(ActivityState::Progress, false);
        indicator.set_progress(1.5, false);
        assert_eq!(indicator.progress(), 1.5);
        assert_eq!(indicator.frame().progress.stroke_end, 1.0);

        indicator.set_progress(f32::NAN, false);
        assert!(indicator.progress().is_nan());
        assert_eq!(indicator.frame().progress.stroke_end, 0.0);
    }

    #[test]
    fn inactive_to_spinning_schedules_fades() {
        let mut indicator = ActivityIndicator::new();
        indicator.transition(ActivityState::Spinning, true);

        for layer in [Layer::Track, Layer::Progress] {
            let fade = indicator
                .animations()
                .get(layer, AnimationKey::Fade)
                .expect("element fades");
            assert_eq!(fade.timeline.period(), ms(200));
            let keyframe = fade.timeline.keyframes()[0];
            assert_eq!(keyframe.curve, TimingCurve::EaseOut);
            assert_eq!(keyframe.duration, ms(200));
        }
        let track = indicator
            .animations()
            .get(Layer::Track, AnimationKey::Fade)
            .expect("track fades");
        assert_eq!(track.timeline.keyframes()[0].from, 1.0);
        assert_eq!(track.timeline.keyframes()[0].to, 0.0);
        assert!(!indicator.animations().contains(Layer::Icon, AnimationKey::Reveal));

        indicator.advance(ms(200));
        let frame = indicator.frame();
        assert_eq!(frame.track.opacity, 0.0);
        assert_eq!(frame.progress.opacity, 1.0);
        assert!(!indicator.animations().contains(Layer::Track, AnimationKey::Fade));
    }

    #[test]
    fn icon_reveals_only_when_it_changes() {
        let mut indicator = ActivityIndicator::new();
        indicator.set_image(Some(icon("play")), [ActivityState::Inactive]);
        indicator.set_image(Some(icon("stop")), [ActivityState::Spinning]);
        assert!(indicator.animations().is_empty());

        indicator.transition(ActivityState::Spinning, true);
        let reveal = indicator
            .animations()
            .get(Layer::Icon, AnimationKey::Reveal)
            .expect("icon reveals");
        assert_eq!(reveal.timeline.keyframes()[0].from, 0.0);
        assert!(!indicator.animations().contains(Layer::Shadow, AnimationKey::Reveal));
        assert_eq!(indicator.render_state().icon.icon, Some(icon("stop")));

        indicator.set_image(None, [ActivityState::Complete]);
        indicator.transition(ActivityState::Complete, true);
        let shadow = indicator
            .animations()
            .get(Layer::Shadow, AnimationKey::Reveal)
            .expect("shadow follows a disappearing icon");
        assert_eq!(shadow.timeline.keyframes()[0].to, 0.0);
    }

    #[test]
    fn set_image_redraws_without_animation() {
        let mut indicator = ActivityIndicator::new();
        indicator.set_inactive_image(Some(icon("play")));
        assert_eq!(indicator.inactive_image(), Some(&icon("play")));
        assert_eq!(indicator.render_state().icon.icon, Some(icon("play")));
        assert_eq!(indicator.visual_descriptor().icon, Some(icon("play")));
        assert!(indicator.animations().is_empty());

        indicator.set_image(Some(icon("other")), [ActivityState::Complete]);
        assert_eq!(indicator.render_state().icon.icon, Some(icon("play")));
    }

    #[test]
    fn progress_pause_resume_keeps_the_baseline() {
        let mut indicator = ActivityIndicator::new();
        indicator.transition(ActivityState::Progress, true);
        indicator.set_progress(0.4, false);
        indicator.advance(ms(300));

        indicator.transition(ActivityState::Paused, true);
        assert_eq!(indicator.render_state().progress.stroke_end, 0.4);
        indicator.set_progress(0.8, true);
        assert_eq!(indicator.render_state().progress.stroke_end, 0.4);

        indicator.transition(ActivityState::Progress, true);
        let resume = indicator
            .animations()
            .get(Layer::Progress, AnimationKey::Progress)
            .expect("resuming animates from the paused stroke");
        approx(resume.timeline.keyframes()[0].from, 0.4);
        approx(resume.timeline.keyframes()[0].to, 0.8);
        approx(indicator.frame().progress.stroke_end, 0.4);
        indicator.advance(ms(200));
        assert_eq!(indicator.frame().progress.stroke_end, 0.8);

        indicator.transition(ActivityState::Complete, true);
        indicator.advance(ms(300));
        indicator.transition(ActivityState::Progress, true);
        let drive = indicator
            .animations()
            .get(Layer::Progress, AnimationKey::Progress)
            .expect("progress animates from zero");
        assert_eq!(drive.timeline.keyframes()[0].from, 0.0);
        assert_eq!(drive.timeline.keyframes()[0].to, 0.8);
    }

    #[test]
    fn progress_after_a_paused_spinner_starts_from_the_frozen_arc() {
        let mut indicator = ActivityIndicator::new();
        indicator.transition(ActivityState::Spinning, true);
        indicator.advance(ms(1250));
        indicator.transition(ActivityState::Paused, true);
        indicator.set_progress(0.3, false);
        approx(indicator.render_state().progress.stroke_end, 1.0);

        indicator.transition(ActivityState::Progress, true);
        let progress = indicator.render_state().progress;
        assert_eq!(progress.stroke_start, 0.0);
        assert_eq!(progress.rotation, 0.0);
        assert_eq!(progress.stroke_end, 0.3);
        assert!(!indicator.animations().contains(Layer::Progress, AnimationKey::SpinStroke));

        let drive = indicator
            .animations()
            .get(Layer::Progress, AnimationKey::Progress)
            .expect("arc shrinks to the stored progress");
        approx(drive.timeline.keyframes()[0].from, 1.0);
        approx(drive.timeline.keyframes()[0].to, 0.3);

        let frame = indicator.frame();
        assert_eq!(frame.progress.stroke_start, 0.0);
        assert_eq!(frame.progress.rotation, 0.0);
        approx(frame.progress.stroke_end, 1.0);
    }

    #[test]
    fn disappearing_icon_collapses_before_it_is_cleared() {
        let mut indicator = ActivityIndicator::with_config(
            IndicatorConfig::default().timing_curve(TimingCurve::Linear),
        )
        .expect("valid config");
        indicator.set_inactive_image(Some(icon("play")));

        indicator.transition(ActivityState::Complete, true);
        assert_eq!(indicator.visual_descriptor().icon, None);
        let collapse = indicator
            .animations()
            .get(Layer::Icon, AnimationKey::Reveal)
            .expect("icon collapses");
        assert_eq!(collapse.timeline.keyframes()[0].from, 1.0);
        assert_eq!(collapse.timeline.keyframes()[0].to, 0.0);

        indicator.advance(ms(50));
        let frame = indicator.frame();
        assert_eq!(frame.icon.icon, Some(icon("play")));
        approx(frame.icon.reveal, 0.75);

        indicator.advance(ms(150));
        assert_eq!(indicator.render_state().icon.icon, None);
        assert!(!indicator.animations().contains(Layer::Icon, AnimationKey::Reveal));
    }

    #[test]
    fn returning_icon_cancels_a_pending_collapse() {
        let mut indicator = ActivityIndicator::new();
        indicator.set_inactive_image(Some(icon("play")));
        indicator.transition(ActivityState::Complete, true);
        indicator.advance(ms(50));

        indicator.transition(ActivityState::Inactive, true);
        let reveal = indicator
            .animations()
            .get(Layer::Icon, AnimationKey::Reveal)
            .expect("icon expands again");
        assert_eq!(reveal.completion, None);
        assert_eq!(reveal.timeline.keyframes()[0].to, 1.0);

        indicator.advance(ms(300));
        assert_eq!(indicator.render_state().icon.icon, Some(icon("play")));
        assert_eq!(indicator.frame().icon.reveal, 1.0);
    }

    #[test]
    fn tint_override_round_trips() {
        let mut indicator = ActivityIndicator::new();
        let red = Color::from_rgb(1.0, 0.0, 0.0);

        indicator.set_tint_color(Some(red), [ActivityState::Progress, ActivityState::Paused]);
        assert_eq!(indicator.tint_color(ActivityState::Progress), red);
        assert_eq!(indicator.paused_tint_color(), red);
        assert_eq!(indicator.progress_track_color(), red);
        assert_eq!(indicator.inactive_tint_color(), Color::SYSTEM_BLUE);

        indicator.set_progress_tint_color(None);
        assert_eq!(indicator.tint_color(ActivityState::Progress), Color::SYSTEM_BLUE);
        assert_eq!(indicator.style(ActivityState::Progress).tint_color, Color::SYSTEM_BLUE);
    }

    #[test]
    fn colors_follow_the_render_style() {
        let mut indicator = ActivityIndicator::new();
        let gray = Color::GRAY;
        indicator.set_inactive_track_color(Some(gray));

        let frame = indicator.frame();
        assert_eq!(frame.track.stroke_color, gray);
        assert_eq!(frame.track.fill_color, Color::TRANSPARENT);
        assert_eq!(frame.icon.tint, Color::SYSTEM_BLUE);
        assert_eq!(frame.shadow.color, Color::TRANSPARENT);

        indicator.set_render_style(RenderStyle::Solid);
        assert_eq!(indicator.render_style(), RenderStyle::Solid);
        let frame = indicator.frame();
        assert_eq!(frame.track.fill_color, Color::SYSTEM_BLUE);
        assert_eq!(frame.icon.tint, Color::WHITE);
        assert_eq!(frame.shadow.color, Color::BLACK.with_alpha(0.5));
        assert!(indicator.animations().is_empty());
    }

    #[test]
    fn finished_wipe_commits_the_tint() {
        let mut indicator = solid();
        let red = Color::from_rgb(1.0, 0.0, 0.0);
        indicator.set_complete_tint_color(Some(red));

        indicator.transition(ActivityState::Complete, true);
        assert_eq!(wipes(&indicator), vec![red]);
        assert_eq!(indicator.render_state().track.fill_color, Color::SYSTEM_BLUE);
        assert_eq!(indicator.render_state().progress.stroke_color, red);

        indicator.advance(ms(100));
        let frame = indicator.frame();
        assert_eq!(frame.overlays.len(), 1);
        assert!(frame.overlays[0].reveal > 0.0 && frame.overlays[0].reveal < 1.0);

        indicator.advance(ms(100));
        assert!(wipes(&indicator).is_empty());
        assert_eq!(indicator.render_state().track.fill_color, red);
    }

    #[test]
    fn interrupted_wipe_does_not_leak_its_overlay() {
        let mut indicator = solid();
        let red = Color::from_rgb(1.0, 0.0, 0.0);
        let green = Color::from_rgb(0.0, 1.0, 0.0);
        indicator.set_spinning_tint_color(Some(red));
        indicator.set_complete_tint_color(Some(green));

        indicator.transition(ActivityState::Spinning, true);
        indicator.advance(ms(50));
        indicator.transition(ActivityState::Complete, true);

        assert_eq!(wipes(&indicator), vec![green]);
        assert_eq!(indicator.render_state().track.fill_color, red);

        indicator.advance(ms(200));
        assert!(indicator.render_state().overlays.is_empty());
        assert_eq!(indicator.render_state().track.fill_color, green);
    }

    #[test]
    fn render_style_change_settles_a_pending_wipe() {
        let mut indicator = solid();
        indicator.set_complete_tint_color(Some(Color::BLACK));
        indicator.transition(ActivityState::Complete, true);
        assert_eq!(wipes(&indicator).len(), 1);

        indicator.set_render_style(RenderStyle::Outline);
        assert!(indicator.render_state().overlays.is_empty());
        assert_eq!(indicator.render_state().track.fill_color, Color::TRANSPARENT);
        indicator.advance(ms(500));
        assert_eq!(indicator.render_state().track.fill_color, Color::TRANSPARENT);
    }

    #[test]
    fn unanimated_tint_change_does_not_wipe() {
        let mut indicator = solid();
        indicator.set_complete_tint_color(Some(Color::BLACK));
        indicator.set_activity_state(ActivityState::Complete);
        assert!(indicator.render_state().overlays.is_empty());
        assert_eq!(indicator.render_state().track.fill_color, Color::BLACK);
    }

    #[test]
    fn expand_style_collapses_and_grows_the_track() {
        let mut indicator = ActivityIndicator::with_config(
            IndicatorConfig::default()
                .animation_style(AnimationStyle::Expand)
                .timing_curve(TimingCurve::Linear),
        )
        .expect("valid config");

        indicator.transition(ActivityState::Spinning, true);
        indicator.advance(ms(100));
        let frame = indicator.frame();
        assert_eq!(frame.track.opacity, 1.0);
        approx(frame.track.reveal, 0.5);
        indicator.advance(ms(100));
        let frame = indicator.frame();
        assert_eq!(frame.track.opacity, 0.0);
        assert_eq!(frame.track.reveal, 1.0);

        indicator.transition(ActivityState::Complete, true);
        indicator.advance(ms(50));
        let frame = indicator.frame();
        assert_eq!(frame.track.opacity, 1.0);
        approx(frame.track.reveal, 0.25);
        // The arc always fades.
        assert!(indicator.animations().contains(Layer::Progress, AnimationKey::Fade));
    }

    #[test]
    fn ripple_overlay_is_removed_after_its_duration() {
        let mut indicator = ActivityIndicator::new();
        indicator.ripple(HitPhase::Down);

        let frame = indicator.frame();
        assert_eq!(frame.overlays.len(), 1);
        assert_eq!(frame.overlays[0].kind, OverlayKind::Ripple);
        assert_eq!(frame.overlays[0].opacity, 1.0);
        assert_eq!(indicator.render_state().track.scale, 0.98);

        indicator.advance(ms(499));
        assert_eq!(indicator.render_state().overlays.len(), 1);
        indicator.advance(ms(1));
        assert!(indicator.render_state().overlays.is_empty());
        assert_eq!(indicator.frame().track.scale, 0.98);

        indicator.ripple(HitPhase::Up);
        assert_eq!(indicator.render_state().track.scale, 1.0);
        indicator.advance(ms(500));
        assert!(indicator.animations().is_empty());
    }

    #[test]
    fn ripple_geometry_uses_the_configured_distance() {
        let indicator = ActivityIndicator::with_config(
            IndicatorConfig::default().ripple(RippleConfig::default().distance(10.0)),
        )
        .expect("valid config");
        let layout = indicator.layout(Size::new(40.0, 40.0));
        assert_eq!(layout.ripple(indicator.config().ripple.distance).radius, 30.0);
    }

    #[test]
    fn intrinsic_size_grows_with_icons() {
        let mut indicator = ActivityIndicator::new();
        assert_eq!(indicator.intrinsic_size(), Size::new(35.0, 35.0));

        indicator.set_image(
            Some(Icon::new("wide", Size::new(40.0, 20.0))),
            [ActivityState::Complete],
        );
        assert_eq!(indicator.intrinsic_size(), Size::new(59.0, 39.0));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = IndicatorConfig::default().metrics(LayoutMetrics {
            outer_padding: f32::INFINITY,
            ..LayoutMetrics::default()
        });
        assert!(matches!(
            ActivityIndicator::with_config(config),
            Err(ConfigError::InvalidMetric { .. })
        ));
    }

    #[test]
    fn render_hands_the_frame_to_the_renderer() {
        let mut indicator = ActivityIndicator::new();
        indicator.transition(ActivityState::Progress, false);
        indicator.set_progress(0.5, false);

        let mut drawn = Vec::new();
        indicator.render(&mut |frame: &Frame| drawn.push(frame.progress.stroke_end));
        assert_eq!(drawn, vec![0.5]);
    }
}
