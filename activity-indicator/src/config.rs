//! Indicator configuration.
//!
//! ## Usage
//!
//! Start from [`IndicatorConfig::default`], adjust fields with the generated
//! setters and hand the result to [`ActivityIndicator::with_config`], which
//! validates it.
//!
//! [`ActivityIndicator::with_config`]: crate::ActivityIndicator::with_config

use std::time::Duration;

use derive_setters::Setters;
use thiserror::Error;

use crate::{
    animation::TimingCurve,
    color::Color,
    geometry::LayoutMetrics,
    resolve::{AnimationStyle, RenderStyle},
};

/// Default values for the indicator.
pub struct IndicatorDefaults;

impl IndicatorDefaults {
    /// Length of every transition animation.
    pub const ANIMATION_DURATION: Duration = Duration::from_millis(200);
    /// Distance a press ripple travels past the control bounds.
    pub const RIPPLE_DISTANCE: f32 = 5.0;
    /// Length of a press ripple.
    pub const RIPPLE_DURATION: Duration = Duration::from_millis(500);
    /// Ripple fill.
    pub const RIPPLE_COLOR: Color = Color::GRAY.with_alpha(0.25);
    /// Background scale while pressed.
    pub const PRESS_SCALE: f32 = 0.98;
    /// Drop shadow color.
    pub const SHADOW_COLOR: Color = Color::BLACK;
    /// Drop shadow offset.
    pub const SHADOW_OFFSET: (f32, f32) = (0.0, 2.0);
    /// Drop shadow blur radius.
    pub const SHADOW_RADIUS: f32 = 2.5;
    /// Drop shadow opacity.
    pub const SHADOW_OPACITY: f32 = 0.5;
}

/// Press ripple settings.
#[derive(Clone, Copy, Debug, PartialEq, Setters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RippleConfig {
    /// How far past the control bounds the ripple grows.
    pub distance: f32,
    /// Length of the ripple.
    pub duration: Duration,
    /// Ripple fill.
    pub color: Color,
    /// Background scale while pressed.
    pub press_scale: f32,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            distance: IndicatorDefaults::RIPPLE_DISTANCE,
            duration: IndicatorDefaults::RIPPLE_DURATION,
            color: IndicatorDefaults::RIPPLE_COLOR,
            press_scale: IndicatorDefaults::PRESS_SCALE,
        }
    }
}

/// Drop shadow settings. The shadow is only drawn in solid style.
#[derive(Clone, Copy, Debug, PartialEq, Setters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShadowConfig {
    /// Shadow color.
    pub color: Color,
    /// Offset from the background, in logical points.
    pub offset: (f32, f32),
    /// Blur radius.
    pub radius: f32,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f32,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            color: IndicatorDefaults::SHADOW_COLOR,
            offset: IndicatorDefaults::SHADOW_OFFSET,
            radius: IndicatorDefaults::SHADOW_RADIUS,
            opacity: IndicatorDefaults::SHADOW_OPACITY,
        }
    }
}

/// Configuration of an [`ActivityIndicator`](crate::ActivityIndicator).
#[derive(Clone, Copy, Debug, PartialEq, Setters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IndicatorConfig {
    /// Length of every transition animation.
    pub animation_duration: Duration,
    /// Easing of every transition animation.
    pub timing_curve: TimingCurve,
    /// Initial render style.
    pub render_style: RenderStyle,
    /// How the track appears and disappears.
    pub animation_style: AnimationStyle,
    /// Tint used by states without an override.
    pub default_tint: Color,
    /// Press ripple.
    pub ripple: RippleConfig,
    /// Drop shadow.
    pub shadow: ShadowConfig,
    /// Layer measurements.
    pub metrics: LayoutMetrics,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            animation_duration: IndicatorDefaults::ANIMATION_DURATION,
            timing_curve: TimingCurve::EaseOut,
            render_style: RenderStyle::default(),
            animation_style: AnimationStyle::default(),
            default_tint: Color::SYSTEM_BLUE,
            ripple: RippleConfig::default(),
            shadow: ShadowConfig::default(),
            metrics: LayoutMetrics::default(),
        }
    }
}

/// Errors produced while validating or loading an [`IndicatorConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A length is negative, NaN or infinite.
    #[error("`{name}` must be a finite, non-negative length, got {value}")]
    InvalidMetric {
        /// Field name.
        name: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// An opacity or scale factor is outside `0.0..=1.0`.
    #[error("`{name}` must be within 0.0..=1.0, got {value}")]
    OutOfUnitRange {
        /// Field name.
        name: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// A duration is zero.
    #[error("`{name}` must be longer than zero")]
    ZeroDuration {
        /// Field name.
        name: &'static str,
    },
    /// A custom timing curve has control points outside the unit square.
    #[error("invalid timing curve {0:?}")]
    InvalidCurve(TimingCurve),
    /// The configuration could not be parsed.
    #[cfg(feature = "serde")]
    #[error("failed to parse indicator config: {0}")]
    Parse(#[from] serde_json::Error),
}

fn check_length(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidMetric { name, value })
    }
}

fn check_unit(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { name, value })
    }
}

fn check_duration(name: &'static str, value: Duration) -> Result<(), ConfigError> {
    if value.is_zero() {
        Err(ConfigError::ZeroDuration { name })
    } else {
        Ok(())
    }
}

impl IndicatorConfig {
    /// Checks every value, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_duration("animation_duration", self.animation_duration)?;
        if !self.timing_curve.is_valid() {
            return Err(ConfigError::InvalidCurve(self.timing_curve));
        }

        check_length("ripple.distance", self.ripple.distance)?;
        check_duration("ripple.duration", self.ripple.duration)?;
        check_unit("ripple.press_scale", self.ripple.press_scale)?;

        let (dx, dy) = self.shadow.offset;
        if !dx.is_finite() {
            return Err(ConfigError::InvalidMetric {
                name: "shadow.offset",
                value: dx,
            });
        }
        if !dy.is_finite() {
            return Err(ConfigError::InvalidMetric {
                name: "shadow.offset",
                value: dy,
            });
        }
        check_length("shadow.radius", self.shadow.radius)?;
        check_unit("shadow.opacity", self.shadow.opacity)?;

        let metrics = &self.metrics;
        check_length("metrics.outer_padding", metrics.outer_padding)?;
        check_length("metrics.progress_width", metrics.progress_width)?;
        check_length("metrics.track_width", metrics.track_width)?;
        check_length("metrics.min_image_padding", metrics.min_image_padding)?;
        check_length(
            "metrics.default_content_size.width",
            metrics.default_content_size.width,
        )?;
        check_length(
            "metrics.default_content_size.height",
            metrics.default_content_size.height,
        )?;
        Ok(())
    }

    /// Parses a JSON configuration and validates it. Missing fields take their
    /// default values.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: IndicatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
