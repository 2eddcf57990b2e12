//! Transition planning.
//!
//! [`plan`] is pure: it compares the live and the next descriptor and lists
//! what has to happen, in the order it has to happen. The indicator applies the
//! steps to its render model and animation set.

use smallvec::SmallVec;

use crate::{
    color::Color,
    resolve::{AnimationStyle, RenderStyle, VisualDescriptor, VisualDiff},
    state::{ActivityState, Icon},
};

/// How one element gets to its next visibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementChange {
    /// Commit the visibility without a tween.
    Snap {
        /// Visibility to commit.
        visible: bool,
    },
    /// Cross-fade opacity to the visibility.
    Fade {
        /// Visibility faded to.
        visible: bool,
    },
    /// Grow out of the centroid.
    Expand,
    /// Shrink into the centroid.
    Collapse,
}

impl ElementChange {
    /// Visibility the element ends up with.
    pub fn visible(self) -> bool {
        match self {
            ElementChange::Snap { visible } | ElementChange::Fade { visible } => visible,
            ElementChange::Expand => true,
            ElementChange::Collapse => false,
        }
    }
}

/// Direction the shadow follows an icon reveal in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShadowMotion {
    /// The button appears; the shadow grows with it.
    Expand,
    /// The button disappears; the shadow shrinks away.
    Collapse,
}

/// Mask reveal played when the icon changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IconReveal {
    /// Shadow animation riding along, if the button appears or disappears.
    pub shadow: Option<ShadowMotion>,
}

/// Where the progress arc starts animating from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressBaseline {
    /// From an empty arc.
    Zero,
    /// From the stroke end already on screen.
    Current,
}

/// One unit of work in a transition.
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    /// Track ring visibility.
    Track(ElementChange),
    /// Progress arc visibility.
    Progress(ElementChange),
    /// Grow a new background fill over the old one.
    Wipe {
        /// Fill being replaced.
        from: Color,
        /// Fill growing in.
        to: Color,
    },
    /// Apply the state's colors to every layer right away.
    CommitColors,
    /// Swap the center glyph.
    SetIcon {
        /// Glyph to show.
        icon: Option<Icon>,
        /// Mask animation, if animated.
        reveal: Option<IconReveal>,
    },
    /// Start the spinning choreography from its first stage.
    StartSpinner,
    /// Stop the spinning choreography.
    StopSpinner {
        /// Keep the arc where it currently is.
        freeze: bool,
    },
    /// Show the stored progress on the arc.
    DriveProgress {
        /// Value the stroke starts from.
        baseline: ProgressBaseline,
        /// Tween instead of snapping.
        animated: bool,
    },
}

/// Everything [`plan`] needs to know about a transition.
#[derive(Clone, Copy, Debug)]
pub struct TransitionInput<'a> {
    /// State being left.
    pub from_state: ActivityState,
    /// State being entered.
    pub to_state: ActivityState,
    /// Descriptor live before the transition.
    pub from: &'a VisualDescriptor,
    /// Descriptor after the transition.
    pub to: &'a VisualDescriptor,
    /// Tint of the state being left.
    pub from_tint: Color,
    /// Tint of the state being entered.
    pub to_tint: Color,
    /// Global render style.
    pub render_style: RenderStyle,
    /// Track appear/disappear style.
    pub animation_style: AnimationStyle,
    /// Whether the caller asked for animation.
    pub animated: bool,
}

/// Ordered steps of a transition.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionPlan {
    /// Which elements differ between the two descriptors.
    pub diff: VisualDiff,
    /// Steps in application order.
    pub steps: SmallVec<[Step; 6]>,
}

impl TransitionPlan {
    /// Steps in application order.
    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }
}

/// Plans the transition described by `input`.
///
/// Steps are always ordered track, arc, colors, icon, spinner, progress.
pub fn plan(input: &TransitionInput<'_>) -> TransitionPlan {
    let mut steps = SmallVec::new();
    let animated = input.animated;
    let diff = input.from.diff(input.to);

    let track_visible = input.to.track_visible;
    let track = if animated && diff.track {
        match (input.animation_style, track_visible) {
            (AnimationStyle::Expand, true) => ElementChange::Expand,
            (AnimationStyle::Expand, false) => ElementChange::Collapse,
            (AnimationStyle::Fade, visible) => ElementChange::Fade { visible },
        }
    } else {
        ElementChange::Snap {
            visible: track_visible,
        }
    };
    steps.push(Step::Track(track));

    let progress_visible = input.to.progress_visible;
    let progress = if animated && diff.progress {
        ElementChange::Fade {
            visible: progress_visible,
        }
    } else {
        ElementChange::Snap {
            visible: progress_visible,
        }
    };
    steps.push(Step::Progress(progress));

    if animated && input.render_style == RenderStyle::Solid && input.from_tint != input.to_tint {
        steps.push(Step::Wipe {
            from: input.from_tint,
            to: input.to_tint,
        });
    } else {
        steps.push(Step::CommitColors);
    }

    let reveal = (animated && diff.icon).then(|| IconReveal {
        shadow: match (&input.from.icon, &input.to.icon) {
            (None, Some(_)) => Some(ShadowMotion::Expand),
            (Some(_), None) => Some(ShadowMotion::Collapse),
            _ => None,
        },
    });
    steps.push(Step::SetIcon {
        icon: input.to.icon.clone(),
        reveal,
    });

    if input.to_state == ActivityState::Spinning {
        steps.push(Step::StartSpinner);
    } else {
        steps.push(Step::StopSpinner {
            freeze: input.from_state == ActivityState::Spinning
                && input.to_state == ActivityState::Paused,
        });
    }

    if input.to_state == ActivityState::Progress {
        let baseline = match input.from_state {
            ActivityState::Progress | ActivityState::Paused => ProgressBaseline::Current,
            _ => ProgressBaseline::Zero,
        };
        steps.push(Step::DriveProgress { baseline, animated });
    }

    TransitionPlan { diff, steps }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    fn descriptor(track: bool, progress: bool, icon: Option<&str>) -> VisualDescriptor {
        VisualDescriptor {
            track_visible: track,
            progress_visible: progress,
            icon: icon.map(|name| Icon::new(name, Size::new(10.0, 10.0))),
        }
    }

    fn input<'a>(
        from_state: ActivityState,
        to_state: ActivityState,
        from: &'a VisualDescriptor,
        to: &'a VisualDescriptor,
    ) -> TransitionInput<'a> {
        TransitionInput {
            from_state,
            to_state,
            from,
            to,
            from_tint: Color::SYSTEM_BLUE,
            to_tint: Color::SYSTEM_BLUE,
            render_style: RenderStyle::Outline,
            animation_style: AnimationStyle::Fade,
            animated: true,
        }
    }

    #[test]
    fn inactive_to_spinning_fades_both_elements() {
        let from = descriptor(true, false, Some("play"));
        let to = descriptor(false, true, Some("play"));
        let plan = plan(&input(ActivityState::Inactive, ActivityState::Spinning, &from, &to));

        assert_eq!(
            plan.diff,
            VisualDiff {
                track: true,
                progress: true,
                icon: false
            }
        );
        let steps: Vec<_> = plan.iter().cloned().collect();
        assert_eq!(
            steps,
            vec![
                Step::Track(ElementChange::Fade { visible: false }),
                Step::Progress(ElementChange::Fade { visible: true }),
                Step::CommitColors,
                Step::SetIcon {
                    icon: to.icon.clone(),
                    reveal: None
                },
                Step::StartSpinner,
            ]
        );
    }

    #[test]
    fn unanimated_transition_only_snaps() {
        let from = descriptor(true, false, None);
        let to = descriptor(true, true, Some("stop"));
        let mut input = input(ActivityState::Inactive, ActivityState::Progress, &from, &to);
        input.animated = false;
        input.render_style = RenderStyle::Solid;
        input.to_tint = Color::BLACK;

        let plan = plan(&input);
        assert_eq!(plan.steps[0], Step::Track(ElementChange::Snap { visible: true }));
        assert_eq!(plan.steps[1], Step::Progress(ElementChange::Snap { visible: true }));
        assert_eq!(plan.steps[2], Step::CommitColors);
        assert!(matches!(plan.steps[3], Step::SetIcon { reveal: None, .. }));
        assert_eq!(
            plan.steps[5],
            Step::DriveProgress {
                baseline: ProgressBaseline::Zero,
                animated: false
            }
        );
    }

    #[test]
    fn expand_style_grows_and_collapses_the_track() {
        let shown = descriptor(true, false, None);
        let hidden = descriptor(false, true, None);
        let mut grow = input(ActivityState::Spinning, ActivityState::Complete, &hidden, &shown);
        grow.animation_style = AnimationStyle::Expand;
        assert_eq!(plan(&grow).steps[0], Step::Track(ElementChange::Expand));

        let mut shrink = input(ActivityState::Complete, ActivityState::Spinning, &shown, &hidden);
        shrink.animation_style = AnimationStyle::Expand;
        let steps = plan(&shrink).steps;
        assert_eq!(steps[0], Step::Track(ElementChange::Collapse));
        assert_eq!(steps[1], Step::Progress(ElementChange::Fade { visible: true }));
        assert!(!ElementChange::Collapse.visible());
    }

    #[test]
    fn solid_tint_change_wipes() {
        let same = descriptor(true, false, None);
        let mut wipe = input(ActivityState::Inactive, ActivityState::Complete, &same, &same);
        wipe.render_style = RenderStyle::Solid;
        wipe.to_tint = Color::BLACK;
        assert_eq!(
            plan(&wipe).steps[2],
            Step::Wipe {
                from: Color::SYSTEM_BLUE,
                to: Color::BLACK
            }
        );

        wipe.render_style = RenderStyle::Outline;
        assert_eq!(plan(&wipe).steps[2], Step::CommitColors);
    }

    #[test]
    fn icon_reveal_carries_the_shadow_when_one_side_is_empty() {
        let none = descriptor(true, false, None);
        let play = descriptor(true, false, Some("play"));
        let check = descriptor(true, false, Some("check"));

        let appear = plan(&input(ActivityState::Inactive, ActivityState::Complete, &none, &play));
        assert_eq!(
            appear.steps[3],
            Step::SetIcon {
                icon: play.icon.clone(),
                reveal: Some(IconReveal {
                    shadow: Some(ShadowMotion::Expand)
                })
            }
        );

        let vanish = plan(&input(ActivityState::Inactive, ActivityState::Complete, &play, &none));
        assert!(matches!(
            vanish.steps[3],
            Step::SetIcon {
                reveal: Some(IconReveal {
                    shadow: Some(ShadowMotion::Collapse)
                }),
                ..
            }
        ));

        let swap = plan(&input(ActivityState::Inactive, ActivityState::Complete, &play, &check));
        assert!(matches!(
            swap.steps[3],
            Step::SetIcon {
                reveal: Some(IconReveal { shadow: None }),
                ..
            }
        ));
    }

    #[test]
    fn spinner_stops_frozen_only_into_paused() {
        let spin = descriptor(false, true, None);
        let paused = plan(&input(ActivityState::Spinning, ActivityState::Paused, &spin, &spin));
        assert_eq!(paused.steps[4], Step::StopSpinner { freeze: true });
        assert_eq!(paused.steps.len(), 5);

        let done = descriptor(true, false, None);
        let complete = plan(&input(ActivityState::Spinning, ActivityState::Complete, &spin, &done));
        assert_eq!(complete.steps[4], Step::StopSpinner { freeze: false });
    }

    #[test]
    fn progress_from_paused_keeps_baseline() {
        let arc = descriptor(true, true, None);
        let resume = plan(&input(ActivityState::Paused, ActivityState::Progress, &arc, &arc));
        assert!(resume.diff.is_empty());
        assert_eq!(
            resume.steps[5],
            Step::DriveProgress {
                baseline: ProgressBaseline::Current,
                animated: true
            }
        );

        let mut still = input(ActivityState::Paused, ActivityState::Progress, &arc, &arc);
        still.animated = false;
        assert_eq!(
            plan(&still).steps[5],
            Step::DriveProgress {
                baseline: ProgressBaseline::Current,
                animated: false
            }
        );

        let fresh = descriptor(true, false, None);
        let start = plan(&input(ActivityState::Inactive, ActivityState::Progress, &fresh, &arc));
        assert_eq!(
            start.steps[5],
            Step::DriveProgress {
                baseline: ProgressBaseline::Zero,
                animated: true
            }
        );
    }
}
