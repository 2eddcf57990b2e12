//! Drives an activity indicator through a download-like session at 60 frames
//! per second and logs what a renderer would draw.
//!
//! Set `RUST_LOG=activity_indicator=debug` to also see the engine's own logs.

use std::time::Duration;

use activity_indicator::{
    ActivityIndicator, ActivityState, Circle, Color, Frame, HitPhase, Icon, IndicatorConfig,
    Layout, OverlayKind, RenderStyle, Renderer, Size,
};
use lyon_path::{Event, Path};
use tracing::{info, warn};

const FRAME: Duration = Duration::from_nanos(16_666_667);
const LOG_EVERY: u32 = 6;

#[derive(Clone, Copy, Debug)]
enum Action {
    Transition(ActivityState),
    Progress(f32),
    Press(HitPhase),
    Style(RenderStyle),
}

fn script() -> Vec<(Duration, Action)> {
    let ms = Duration::from_millis;
    vec![
        (ms(100), Action::Press(HitPhase::Down)),
        (ms(180), Action::Press(HitPhase::Up)),
        (ms(200), Action::Transition(ActivityState::Spinning)),
        (ms(1_500), Action::Transition(ActivityState::Progress)),
        (ms(1_600), Action::Progress(0.25)),
        (ms(1_900), Action::Progress(0.6)),
        (ms(2_200), Action::Transition(ActivityState::Paused)),
        (ms(2_600), Action::Transition(ActivityState::Progress)),
        (ms(2_700), Action::Progress(1.0)),
        (ms(3_000), Action::Transition(ActivityState::Complete)),
        (ms(3_400), Action::Style(RenderStyle::Solid)),
        (ms(3_500), Action::Transition(ActivityState::Inactive)),
    ]
}

/// Builds the paths a vector renderer would fill and stroke, and logs a
/// summary of each frame.
struct LoggingRenderer {
    layout: Layout,
    ripple_distance: f32,
    frames: u32,
}

impl LoggingRenderer {
    fn path_segments(path: &Path) -> usize {
        path.iter()
            .filter(|event| matches!(event, Event::Cubic { .. } | Event::Line { .. }))
            .count()
    }

    fn overlay_circle(&self, kind: OverlayKind, reveal: f32) -> Circle {
        match kind {
            OverlayKind::Wipe => self.layout.track.revealed(reveal),
            OverlayKind::Ripple => self.layout.ripple(self.ripple_distance).revealed(reveal),
        }
    }
}

impl Renderer for LoggingRenderer {
    fn draw(&mut self, frame: &Frame) {
        self.frames += 1;
        if self.frames % LOG_EVERY != 0 {
            return;
        }

        let track = self
            .layout
            .track
            .revealed(frame.track.reveal * frame.track.scale);
        let track_path = track.to_path();
        let arc_path = self.layout.progress.to_path();
        let icon_mask = self.layout.icon_mask.revealed(frame.icon.reveal);

        info!(
            frame = self.frames,
            track.opacity = frame.track.opacity,
            track.radius = track.radius,
            track.segments = Self::path_segments(&track_path),
            track.fill = ?frame.track.fill_color.to_array(),
            arc.opacity = frame.progress.opacity,
            arc.start = frame.progress.stroke_start,
            arc.end = frame.progress.stroke_end,
            arc.rotation = frame.progress.rotation,
            arc.segments = Self::path_segments(&arc_path),
            icon = frame.icon.icon.as_ref().map(Icon::name).unwrap_or("-"),
            icon.mask = icon_mask.radius,
            "frame"
        );

        for overlay in &frame.overlays {
            let circle = self.overlay_circle(overlay.kind, overlay.reveal);
            info!(
                kind = ?overlay.kind,
                radius = circle.radius,
                opacity = overlay.opacity,
                segments = Self::path_segments(&circle.to_path()),
                "overlay"
            );
        }
    }
}

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new(
            "warn,activity_indicator_demo=info",
        ) {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("warn"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .try_init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = IndicatorConfig::default();
    let mut indicator = ActivityIndicator::with_config(config)?;
    let icon_size = Size::new(14.0, 14.0);
    indicator.set_image(
        Some(Icon::new("download", icon_size)),
        [ActivityState::Inactive],
    );
    indicator.set_image(
        Some(Icon::new("stop", icon_size)),
        [ActivityState::Spinning, ActivityState::Progress],
    );
    indicator.set_image(Some(Icon::new("resume", icon_size)), [ActivityState::Paused]);
    indicator.set_image(Some(Icon::new("done", icon_size)), [ActivityState::Complete]);
    indicator.set_tint_color(
        Some(Color::from_rgb_u8(52, 199, 89)),
        [ActivityState::Complete],
    );
    indicator.set_track_color(Some(Color::GRAY), [ActivityState::Progress, ActivityState::Paused]);

    let bounds = indicator.intrinsic_size();
    info!(width = bounds.width, height = bounds.height, "intrinsic size");

    let mut renderer = LoggingRenderer {
        layout: indicator.layout(bounds),
        ripple_distance: config.ripple.distance,
        frames: 0,
    };

    let mut script = script().into_iter().peekable();
    let end = Duration::from_millis(4_000);
    while indicator.now() < end {
        while let Some((_, action)) = script.next_if(|(at, _)| *at <= indicator.now()) {
            info!(?action, at = ?indicator.now(), "script");
            match action {
                Action::Transition(state) => indicator.transition(state, true),
                Action::Progress(value) => indicator.set_progress(value, true),
                Action::Press(phase) => indicator.ripple(phase),
                Action::Style(style) => indicator.set_render_style(style),
            }
        }

        indicator.advance(FRAME);
        indicator.render(&mut renderer);
    }

    if script.peek().is_some() {
        warn!("script ended before every action ran");
    }
    info!(
        state = %indicator.activity_state(),
        frames = renderer.frames,
        running = indicator.animations().len(),
        "session finished"
    );
    Ok(())
}
