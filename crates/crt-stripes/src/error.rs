//! Error types for stripe settings validation.

use std::fmt;

/// Error type for settings validation.
///
/// Returned by [`StripeSettings::validate()`](crate::StripeSettings::validate)
/// when a field is outside the range the rasterizer can work with. Each
/// variant carries the rejected value.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// `max_width_px` must be at least 1
    ZeroMaxWidth,
    /// `target_width_mm` must be finite and positive
    InvalidTargetWidth(f64),
    /// `margin_mm` must be finite and non-negative
    InvalidMargin(f64),
    /// `stroke_width_mm` must be finite and positive
    InvalidStrokeWidth(f64),
    /// A subpixel offset is outside `0.0..=1.0`
    SubpixelOffsetOutOfRange {
        /// Position of the offset (0 = red, 1 = green, 2 = blue)
        index: usize,
        /// The rejected offset
        value: f64,
    },
    /// `dash_steps` must be at least 1
    ZeroDashSteps,
    /// `dash_fill` must be in `(0.0, 1.0]`
    DashFillOutOfRange(f64),
    /// `gamma` must be finite and positive
    InvalidGamma(f64),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::ZeroMaxWidth => write!(f, "max width must be at least 1 pixel"),
            SettingsError::InvalidTargetWidth(v) => {
                write!(f, "target width must be a positive number of mm, got {}", v)
            }
            SettingsError::InvalidMargin(v) => {
                write!(f, "margin must be a non-negative number of mm, got {}", v)
            }
            SettingsError::InvalidStrokeWidth(v) => {
                write!(f, "stroke width must be a positive number of mm, got {}", v)
            }
            SettingsError::SubpixelOffsetOutOfRange { index, value } => {
                write!(
                    f,
                    "subpixel offset {} must be within 0.0..=1.0, got {}",
                    index, value
                )
            }
            SettingsError::ZeroDashSteps => write!(f, "dash steps must be at least 1"),
            SettingsError::DashFillOutOfRange(v) => {
                write!(f, "dash fill must be within (0.0, 1.0], got {}", v)
            }
            SettingsError::InvalidGamma(v) => {
                write!(f, "gamma must be a positive number, got {}", v)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
