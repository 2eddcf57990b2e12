//! Activity states and the sparse per-state style table.
//!
//! ## Usage
//!
//! Override tints, track colors and icons for groups of states; anything left
//! unset falls back to the control-wide default tint.

use std::{fmt, hash::Hash, sync::Arc};

use rustc_hash::FxHashMap;

use crate::{color::Color, geometry::Size};

/// The semantic mode an activity indicator communicates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActivityState {
    /// Icon with the circular track outline.
    #[default]
    Inactive,
    /// Icon surrounded by the indeterminate spinning arc.
    Spinning,
    /// Icon surrounded by a determinate progress arc.
    Progress,
    /// Icon with the arc frozen where it was.
    Paused,
    /// Icon with the circular track outline.
    Complete,
}

impl ActivityState {
    /// Every state, in declaration order.
    pub const ALL: [ActivityState; 5] = [
        ActivityState::Inactive,
        ActivityState::Spinning,
        ActivityState::Progress,
        ActivityState::Paused,
        ActivityState::Complete,
    ];

    /// Lowercase name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            ActivityState::Inactive => "inactive",
            ActivityState::Spinning => "spinning",
            ActivityState::Progress => "progress",
            ActivityState::Paused => "paused",
            ActivityState::Complete => "complete",
        }
    }
}

impl fmt::Display for ActivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A reference to an image the renderer knows how to draw.
///
/// The indicator never decodes images. It only compares references to decide
/// whether the center glyph changed and reads the size for intrinsic sizing.
#[derive(Clone, Debug, PartialEq)]
pub struct Icon {
    name: Arc<str>,
    size: Size,
}

impl Icon {
    /// Creates an icon reference.
    pub fn new(name: impl Into<Arc<str>>, size: Size) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Resource name resolved by the renderer.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Intrinsic size of the image.
    pub fn size(&self) -> Size {
        self.size
    }
}

/// How the progress arc is driven in a given state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProgressMode {
    /// The arc is not driven. It is hidden, or frozen while paused.
    Off,
    /// The arc runs the spinning choreography.
    Indeterminate,
    /// The arc shows a stroke fraction.
    Determinate(f32),
}

impl ProgressMode {
    /// Mode used by `state` when the stored progress is `progress`.
    pub fn for_state(state: ActivityState, progress: f32) -> Self {
        match state {
            ActivityState::Spinning => ProgressMode::Indeterminate,
            ActivityState::Progress => ProgressMode::Determinate(progress),
            ActivityState::Inactive | ActivityState::Paused | ActivityState::Complete => {
                ProgressMode::Off
            }
        }
    }
}

/// The resolved visual attributes of one state.
#[derive(Clone, Debug, PartialEq)]
pub struct StateStyle {
    /// Tint for the arc, the icon (outline) or the background (solid).
    pub tint_color: Color,
    /// Stroke color of the track ring.
    pub track_color: Color,
    /// Center glyph.
    pub icon: Option<Icon>,
    /// How the arc is driven.
    pub progress_mode: ProgressMode,
}

/// Sparse per-state overrides on top of a default tint.
#[derive(Clone, Debug)]
pub struct StateStyles {
    default_tint: Color,
    tint_colors: FxHashMap<ActivityState, Color>,
    track_colors: FxHashMap<ActivityState, Color>,
    icons: FxHashMap<ActivityState, Icon>,
}

impl Default for StateStyles {
    fn default() -> Self {
        Self::new(Color::SYSTEM_BLUE)
    }
}

impl StateStyles {
    /// Creates an empty table that resolves every state to `default_tint`.
    pub fn new(default_tint: Color) -> Self {
        Self {
            default_tint,
            tint_colors: FxHashMap::default(),
            track_colors: FxHashMap::default(),
            icons: FxHashMap::default(),
        }
    }

    /// The control-wide tint used for states without an override.
    pub fn default_tint(&self) -> Color {
        self.default_tint
    }

    /// Replaces the control-wide tint.
    pub fn set_default_tint(&mut self, color: Color) {
        self.default_tint = color;
    }

    /// Tint for `state`, falling back to the default tint.
    pub fn tint_color(&self, state: ActivityState) -> Color {
        self.tint_colors
            .get(&state)
            .copied()
            .unwrap_or(self.default_tint)
    }

    /// Track color for `state`, falling back to the state's tint.
    pub fn track_color(&self, state: ActivityState) -> Color {
        self.track_colors
            .get(&state)
            .copied()
            .unwrap_or_else(|| self.tint_color(state))
    }

    /// Icon configured for `state`.
    pub fn icon(&self, state: ActivityState) -> Option<&Icon> {
        self.icons.get(&state)
    }

    /// Every configured icon.
    pub fn icons(&self) -> impl Iterator<Item = &Icon> {
        self.icons.values()
    }

    /// Sets the tint for each of `states`, or clears it when `color` is `None`.
    pub fn set_tint_color(
        &mut self,
        color: Option<Color>,
        states: impl IntoIterator<Item = ActivityState>,
    ) {
        set_override(&mut self.tint_colors, color, states);
    }

    /// Sets the track color for each of `states`, or clears it when `color` is `None`.
    pub fn set_track_color(
        &mut self,
        color: Option<Color>,
        states: impl IntoIterator<Item = ActivityState>,
    ) {
        set_override(&mut self.track_colors, color, states);
    }

    /// Sets the icon for each of `states`, or clears it when `icon` is `None`.
    pub fn set_icon(&mut self, icon: Option<Icon>, states: impl IntoIterator<Item = ActivityState>) {
        set_override(&mut self.icons, icon, states);
    }

    /// Resolves every attribute of `state`.
    pub fn style(&self, state: ActivityState, progress: f32) -> StateStyle {
        StateStyle {
            tint_color: self.tint_color(state),
            track_color: self.track_color(state),
            icon: self.icon(state).cloned(),
            progress_mode: ProgressMode::for_state(state, progress),
        }
    }
}

fn set_override<K, V>(map: &mut FxHashMap<K, V>, value: Option<V>, keys: impl IntoIterator<Item = K>)
where
    K: Eq + Hash,
    V: Clone,
{
    match value {
        Some(value) => {
            for key in keys {
                map.insert(key, value.clone());
            }
        }
        None => {
            for key in keys {
                map.remove(&key);
            }
        }
    }
}
