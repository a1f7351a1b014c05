//! Test fixtures and constants.

use image::{Rgb, RgbImage};

/// Common pixel colors
pub mod colors {
    pub const WHITE: [u8; 3] = [255, 255, 255];
    pub const BLACK: [u8; 3] = [0, 0, 0];
    pub const RED: [u8; 3] = [255, 0, 0];
    pub const NEAR_BLACK: [u8; 3] = [5, 5, 5];
    pub const MID_GRAY: [u8; 3] = [128, 128, 128];
}

/// A single-color image.
pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(rgb))
}

/// Horizontal red ramp over vertical green ramp, blue constant.
pub fn gradient(width: u32, height: u32) -> RgbImage {
    let (wx, hy) = (width.saturating_sub(1).max(1), height.saturating_sub(1).max(1));
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 255 / wx) as u8, (y * 255 / hy) as u8, 96])
    })
}

/// Minimal valid YAML config overriding a few stripe values.
pub const CUSTOM_CONFIG: &str = r#"
stripes:
  dash_steps: 4
  gamma: 2.0
output:
  background: false
  suffix: _plot
"#;
