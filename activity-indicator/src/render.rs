//! Committed layer model and the sampled presentation frame.
//!
//! [`RenderState`] holds the values each layer settles on once every running
//! animation has finished. A [`Frame`] is what a renderer draws right now: the
//! model values with every running animation sampled over them.

use slotmap::SlotMap;

use crate::{
    animation::Channel,
    animation_set::{AnimationSet, Layer},
    color::Color,
    state::Icon,
};

slotmap::new_key_type! {
    /// Handle to a transient overlay layer.
    pub struct OverlayId;
}

/// What a transient overlay is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayKind {
    /// A background fill growing out of the center to its full shape.
    Wipe,
    /// A press ripple growing past the control bounds while fading out.
    Ripple,
}

/// A transient circle drawn above the background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Overlay {
    /// Purpose of the overlay, which decides its geometry.
    pub kind: OverlayKind,
    /// Fill color.
    pub fill: Color,
    /// Settled radius fraction.
    pub reveal: f32,
    /// Settled opacity.
    pub opacity: f32,
}

/// Track ring, which doubles as the solid background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackLayer {
    /// Opacity of ring and fill.
    pub opacity: f32,
    /// Ring stroke color.
    pub stroke_color: Color,
    /// Background fill, transparent in outline style.
    pub fill_color: Color,
    /// Radius fraction, animated by the expand style.
    pub reveal: f32,
    /// Press scale.
    pub scale: f32,
}

/// Progress or spinning arc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressLayer {
    /// Arc opacity.
    pub opacity: f32,
    /// Fraction of the circle where the stroke begins.
    pub stroke_start: f32,
    /// Fraction of the circle where the stroke ends.
    pub stroke_end: f32,
    /// Rotation of the whole arc in radians.
    pub rotation: f32,
    /// Arc color.
    pub stroke_color: Color,
}

/// Center glyph.
#[derive(Clone, Debug, PartialEq)]
pub struct IconLayer {
    /// Glyph to draw, if any.
    pub icon: Option<Icon>,
    /// Tint applied to the glyph.
    pub tint: Color,
    /// Radius fraction of the circular mask.
    pub reveal: f32,
}

/// Drop shadow under the solid background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowLayer {
    /// Shadow color, transparent in outline style.
    pub color: Color,
    /// Radius fraction of the shadow outline.
    pub reveal: f32,
}

/// Committed model values of every layer.
#[derive(Clone, Debug)]
pub struct RenderState {
    /// Track ring and background.
    pub track: TrackLayer,
    /// Progress arc.
    pub progress: ProgressLayer,
    /// Center glyph.
    pub icon: IconLayer,
    /// Drop shadow.
    pub shadow: ShadowLayer,
    /// Live transient overlays.
    pub overlays: SlotMap<OverlayId, Overlay>,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            track: TrackLayer {
                opacity: 1.0,
                stroke_color: Color::TRANSPARENT,
                fill_color: Color::TRANSPARENT,
                reveal: 1.0,
                scale: 1.0,
            },
            progress: ProgressLayer {
                opacity: 0.0,
                stroke_start: 0.0,
                stroke_end: 0.0,
                rotation: 0.0,
                stroke_color: Color::TRANSPARENT,
            },
            icon: IconLayer {
                icon: None,
                tint: Color::TRANSPARENT,
                reveal: 1.0,
            },
            shadow: ShadowLayer {
                color: Color::TRANSPARENT,
                reveal: 1.0,
            },
            overlays: SlotMap::with_key(),
        }
    }
}

/// One overlay as it should be drawn this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayFrame {
    /// Overlay handle.
    pub id: OverlayId,
    /// Purpose of the overlay.
    pub kind: OverlayKind,
    /// Fill color.
    pub fill: Color,
    /// Current radius fraction.
    pub reveal: f32,
    /// Current opacity.
    pub opacity: f32,
}

/// Presentation snapshot handed to a [`Renderer`].
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Track ring and background.
    pub track: TrackLayer,
    /// Progress arc.
    pub progress: ProgressLayer,
    /// Center glyph.
    pub icon: IconLayer,
    /// Drop shadow.
    pub shadow: ShadowLayer,
    /// Overlays in slot order.
    pub overlays: Vec<OverlayFrame>,
}

impl Frame {
    /// Samples every animation in `animations` at `now` over the model in `state`.
    pub fn sample(
        state: &RenderState,
        animations: &AnimationSet,
        now: std::time::Duration,
    ) -> Self {
        let value = |layer: Layer, channel: Channel, model: f32| {
            animations.sample(layer, channel, now).unwrap_or(model)
        };

        let mut track = state.track;
        track.opacity = value(Layer::Track, Channel::Opacity, track.opacity);
        track.reveal = value(Layer::Track, Channel::Reveal, track.reveal);
        track.scale = value(Layer::Track, Channel::Scale, track.scale);

        let mut progress = state.progress;
        progress.opacity = value(Layer::Progress, Channel::Opacity, progress.opacity);
        progress.stroke_start = value(Layer::Progress, Channel::StrokeStart, progress.stroke_start);
        progress.stroke_end = value(Layer::Progress, Channel::StrokeEnd, progress.stroke_end);
        progress.rotation = value(Layer::Progress, Channel::Rotation, progress.rotation);

        let mut icon = state.icon.clone();
        icon.reveal = value(Layer::Icon, Channel::Reveal, icon.reveal);

        let mut shadow = state.shadow;
        shadow.reveal = value(Layer::Shadow, Channel::Reveal, shadow.reveal);

        let overlays = state
            .overlays
            .iter()
            .map(|(id, overlay)| OverlayFrame {
                id,
                kind: overlay.kind,
                fill: overlay.fill,
                reveal: value(Layer::Overlay(id), Channel::Reveal, overlay.reveal),
                opacity: value(Layer::Overlay(id), Channel::Opacity, overlay.opacity),
            })
            .collect();

        Self {
            track,
            progress,
            icon,
            shadow,
            overlays,
        }
    }
}

/// Draws presentation frames.
///
/// Closures taking `&Frame` are renderers too.
pub trait Renderer {
    /// Draws one frame.
    fn draw(&mut self, frame: &Frame);
}

impl<F> Renderer for F
where
    F: FnMut(&Frame),
{
    fn draw(&mut self, frame: &Frame) {
        self(frame)
    }
}
