//! Maps an activity state to the visual elements it shows.

use crate::state::{ActivityState, Icon, StateStyles};

/// Global rendering mode of the control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderStyle {
    /// Transparent background with a tinted icon.
    #[default]
    Outline,
    /// Tinted circular background with a white icon and a drop shadow.
    Solid,
}

/// How the track ring animates when it appears or disappears.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationStyle {
    /// Cross-fade the ring's opacity.
    #[default]
    Fade,
    /// Grow the ring out of its center, or shrink it back into it.
    Expand,
}

/// Which visual elements a state shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisualDescriptor {
    /// Whether the track ring is shown.
    pub track_visible: bool,
    /// Whether the progress arc is shown.
    pub progress_visible: bool,
    /// The center glyph.
    pub icon: Option<Icon>,
}

/// Element-wise differences between two descriptors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisualDiff {
    /// Track visibility changed.
    pub track: bool,
    /// Arc visibility changed.
    pub progress: bool,
    /// Icon changed.
    pub icon: bool,
}

impl VisualDiff {
    /// Returns `true` when nothing changed.
    pub fn is_empty(&self) -> bool {
        !(self.track || self.progress || self.icon)
    }
}

impl VisualDescriptor {
    /// Compares this descriptor against `next`.
    pub fn diff(&self, next: &VisualDescriptor) -> VisualDiff {
        VisualDiff {
            track: self.track_visible != next.track_visible,
            progress: self.progress_visible != next.progress_visible,
            icon: self.icon != next.icon,
        }
    }
}

/// Fixed `(track_visible, progress_visible)` pair for a state.
///
/// Paused has no fixed pair; the `(false, false)` returned here is always
/// replaced by [`resolve`].
pub fn element_visibility(state: ActivityState, style: RenderStyle) -> (bool, bool) {
    match state {
        ActivityState::Inactive | ActivityState::Complete => (true, false),
        ActivityState::Spinning => (style == RenderStyle::Solid, true),
        ActivityState::Progress => (true, true),
        ActivityState::Paused => (false, false),
    }
}

/// Resolves the descriptor for `state`.
///
/// `previous` must be the descriptor that is live right now. Paused copies
/// both visibility flags from it so entering or leaving Paused never toggles
/// the track or the arc.
pub fn resolve(
    state: ActivityState,
    style: RenderStyle,
    styles: &StateStyles,
    previous: &VisualDescriptor,
) -> VisualDescriptor {
    let (track_visible, progress_visible) = element_visibility(state, style);
    let mut descriptor = VisualDescriptor {
        track_visible,
        progress_visible,
        icon: styles.icon(state).cloned(),
    };

    if state == ActivityState::Paused {
        descriptor.track_visible = previous.track_visible;
        descriptor.progress_visible = previous.progress_visible;
    }

    descriptor
}
