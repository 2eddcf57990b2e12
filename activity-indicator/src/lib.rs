//! A state-transition and animation engine for a circular activity indicator
//! button.
//!
//! The control shows one of five activity states. Moving between them fades,
//! expands or wipes the track ring, progress arc, background and center glyph
//! in a fixed order, runs an indeterminate spinning choreography and drives a
//! determinate progress arc.
//!
//! The crate draws nothing. The host advances the control's clock once per
//! frame and hands the sampled [`Frame`] to its own [`Renderer`]:
//!
//! ```
//! use std::time::Duration;
//!
//! use activity_indicator::{ActivityIndicator, ActivityState, Frame};
//!
//! let mut indicator = ActivityIndicator::new();
//! indicator.transition(ActivityState::Spinning, true);
//!
//! indicator.advance(Duration::from_millis(16));
//! indicator.render(&mut |frame: &Frame| {
//!     assert!(frame.progress.opacity > 0.0);
//! });
//! ```
//!
//! # Layers
//!
//! - The **track** is the ring behind the arc. In solid style it also carries
//!   the tinted background.
//! - The **progress arc** is stroked along the outer circle starting at twelve
//!   o'clock, between `stroke_start` and `stroke_end`.
//! - The **icon** is masked by a circle that reveals it from the center.
//! - **Overlays** are transient circles for color wipes and press ripples.
//!
//! [`Layout`] turns control bounds into the circles for every layer, each of
//! which builds a `lyon_path` path.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod animation;
pub mod animation_set;
pub mod color;
pub mod config;
pub mod geometry;
mod indicator;
pub mod progress;
pub mod render;
pub mod resolve;
pub mod spinner;
pub mod state;
pub mod timeline;
pub mod transition;

pub use lyon_path;

pub use crate::{
    animation::{Channel, Keyframe, TimingCurve},
    color::Color,
    config::{ConfigError, IndicatorConfig, IndicatorDefaults, RippleConfig, ShadowConfig},
    geometry::{Circle, Layout, LayoutMetrics, Size},
    indicator::{ActivityIndicator, HitPhase},
    render::{Frame, OverlayFrame, OverlayId, OverlayKind, RenderState, Renderer},
    resolve::{AnimationStyle, RenderStyle, VisualDescriptor},
    state::{ActivityState, Icon, ProgressMode, StateStyle, StateStyles},
    timeline::{Repeat, Timeline},
};
