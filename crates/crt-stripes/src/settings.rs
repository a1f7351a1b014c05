//! Stripe rasterization settings.
//!
//! This module provides the [`StripeSettings`] struct, the single immutable
//! configuration value passed by reference into every stage of the
//! conversion.

use crate::error::SettingsError;

/// Default maximum source width in pixels before downscaling.
pub const DEFAULT_MAX_WIDTH_PX: u32 = 320;

/// Default subpixel x-offsets for red, green and blue (fractions of a pixel).
pub const DEFAULT_SUBPIXEL_OFFSETS: [f64; 3] = [0.18, 0.50, 0.82];

/// Configuration for converting an image into subpixel stripe paths.
///
/// `StripeSettings` controls output size, pen geometry and the
/// brightness-to-dash mapping.
///
/// # Defaults
///
/// The defaults suit a 0.3 mm pen on an A4/Letter-sized black sheet:
/// - Max source width: 320 px
/// - Drawing width: 260 mm, plus a 6 mm margin on every side
/// - Stroke width: 0.28 mm
/// - Subpixel offsets: 0.18 / 0.50 / 0.82
/// - 9 dash slots per stripe, 70% of each slot inked
/// - Channels below 6 are ignored
/// - Gamma 1.0 (linear)
///
/// # Example
///
/// ```
/// use crt_stripes::StripeSettings;
///
/// let settings = StripeSettings::new()
///     .dash_steps(12)
///     .gamma(1.4);
///
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StripeSettings {
    /// Images wider than this are downscaled to exactly this width.
    ///
    /// Default: `320`
    pub max_width_px: u32,

    /// Width of the drawing area in millimetres (excluding margins).
    ///
    /// The height follows from the image aspect ratio.
    ///
    /// Default: `260.0`
    pub target_width_mm: f64,

    /// Margin around the drawing in millimetres.
    ///
    /// Default: `6.0`
    pub margin_mm: f64,

    /// Pen stroke width in millimetres.
    ///
    /// Default: `0.28`
    pub stroke_width_mm: f64,

    /// Horizontal position of the red, green and blue stripes inside a
    /// pixel cell, as fractions of the cell width.
    ///
    /// Default: `[0.18, 0.50, 0.82]`
    pub subpixel_offsets: [f64; 3],

    /// Number of vertical slots each pixel stripe is divided into.
    ///
    /// Default: `9`
    pub dash_steps: u32,

    /// Fraction of each "on" slot that is drawn; the rest is gap.
    ///
    /// Default: `0.70`
    pub dash_fill: f64,

    /// Channel values below this are treated as off.
    ///
    /// A pixel whose three channels are all below the cutoff is skipped.
    ///
    /// Default: `6`
    pub min_channel_cutoff: u8,

    /// Gamma exponent applied to normalized channel intensity.
    ///
    /// Values above 1 darken mid-tones, values below 1 brighten them.
    ///
    /// Default: `1.0`
    pub gamma: f64,
}

impl Default for StripeSettings {
    fn default() -> Self {
        Self {
            max_width_px: DEFAULT_MAX_WIDTH_PX,
            target_width_mm: 260.0,
            margin_mm: 6.0,
            stroke_width_mm: 0.28,
            subpixel_offsets: DEFAULT_SUBPIXEL_OFFSETS,
            dash_steps: 9,
            dash_fill: 0.70,
            min_channel_cutoff: 6,
            gamma: 1.0,
        }
    }
}

impl StripeSettings {
    /// Create settings with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum source width in pixels.
    #[inline]
    pub fn max_width_px(mut self, width: u32) -> Self {
        self.max_width_px = width;
        self
    }

    /// Set the drawing width in millimetres.
    #[inline]
    pub fn target_width_mm(mut self, width: f64) -> Self {
        self.target_width_mm = width;
        self
    }

    /// Set the margin in millimetres.
    #[inline]
    pub fn margin_mm(mut self, margin: f64) -> Self {
        self.margin_mm = margin;
        self
    }

    /// Set the stroke width in millimetres.
    #[inline]
    pub fn stroke_width_mm(mut self, width: f64) -> Self {
        self.stroke_width_mm = width;
        self
    }

    /// Set the red, green and blue subpixel offsets.
    #[inline]
    pub fn subpixel_offsets(mut self, offsets: [f64; 3]) -> Self {
        self.subpixel_offsets = offsets;
        self
    }

    /// Set the number of dash slots per stripe.
    #[inline]
    pub fn dash_steps(mut self, steps: u32) -> Self {
        self.dash_steps = steps;
        self
    }

    /// Set the inked fraction of each slot.
    #[inline]
    pub fn dash_fill(mut self, fill: f64) -> Self {
        self.dash_fill = fill;
        self
    }

    /// Set the per-channel cutoff.
    #[inline]
    pub fn min_channel_cutoff(mut self, cutoff: u8) -> Self {
        self.min_channel_cutoff = cutoff;
        self
    }

    /// Set the gamma exponent.
    #[inline]
    pub fn gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Check every field against the range the rasterizer supports.
    ///
    /// Returns the first violation found, in field declaration order.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.max_width_px == 0 {
            return Err(SettingsError::ZeroMaxWidth);
        }
        if !self.target_width_mm.is_finite() || self.target_width_mm <= 0.0 {
            return Err(SettingsError::InvalidTargetWidth(self.target_width_mm));
        }
        if !self.margin_mm.is_finite() || self.margin_mm < 0.0 {
            return Err(SettingsError::InvalidMargin(self.margin_mm));
        }
        if !self.stroke_width_mm.is_finite() || self.stroke_width_mm <= 0.0 {
            return Err(SettingsError::InvalidStrokeWidth(self.stroke_width_mm));
        }
        for (index, &value) in self.subpixel_offsets.iter().enumerate() {
            if !(0.0..=1.0).contains(&value) {
                return Err(SettingsError::SubpixelOffsetOutOfRange { index, value });
            }
        }
        if self.dash_steps == 0 {
            return Err(SettingsError::ZeroDashSteps);
        }
        if !(self.dash_fill > 0.0 && self.dash_fill <= 1.0) {
            return Err(SettingsError::DashFillOutOfRange(self.dash_fill));
        }
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(SettingsError::InvalidGamma(self.gamma));
        }
        Ok(())
    }
}
