//! Raster scan from pixels to per-channel stripe segments.
//!
//! [`StripeRasterizer`] walks a [`PixelSource`] in raster order (rows top to
//! bottom, columns left to right) and, for each lit pixel, asks the
//! [`DashDistributor`] for the dashes of each channel's subpixel stripe.
//!
//! The rasterizer never decodes images itself. Anything that can report a
//! size and hand out RGB triples can be converted, which keeps codecs out of
//! this crate and lets tests use synthetic buffers.

use crate::dash::DashDistributor;
use crate::gamma::gamma_map;
use crate::paths::{Channel, ChannelPaths};
use crate::settings::StripeSettings;

/// Read access to an RGB image.
///
/// Implementations must return valid triples for every
/// `x < width()` and `y < height()`.
pub trait PixelSource {
    /// Image width in pixels.
    fn width(&self) -> u32;

    /// Image height in pixels.
    fn height(&self) -> u32;

    /// The `[r, g, b]` triple at column `x`, row `y`.
    fn rgb(&self, x: u32, y: u32) -> [u8; 3];
}

/// An owned, row-major RGB pixel buffer.
///
/// # Example
///
/// ```
/// use crt_stripes::{PixelSource, RgbBuffer};
///
/// let image = RgbBuffer::from_fn(2, 1, |x, _| if x == 0 { [255, 0, 0] } else { [0, 0, 255] });
/// assert_eq!(image.rgb(1, 0), [0, 0, 255]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RgbBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl RgbBuffer {
    /// Wrap row-major pixels.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `pixels.len() == width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<[u8; 3]>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize,
            "pixel count ({}) must match width * height ({}x{})",
            pixels.len(),
            width,
            height,
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// A buffer filled with one color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        Self::new(width, height, vec![rgb; width as usize * height as usize])
    }

    /// A buffer whose pixels are computed from their coordinates.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [u8; 3]) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self::new(width, height, pixels)
    }
}

impl PixelSource for RgbBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[y as usize * self.width as usize + x as usize]
    }
}

/// Millimetre geometry of the output drawing.
///
/// Pixel cells are square: their height equals their width, which is the
/// target drawing width divided by the image width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripeGeometry {
    /// Image width in pixels.
    pub width_px: u32,
    /// Image height in pixels.
    pub height_px: u32,
    /// Edge length of one pixel cell in millimetres.
    pub pixel_mm: f64,
    /// Margin on every side in millimetres.
    pub margin_mm: f64,
    /// Subpixel offsets for red, green and blue.
    pub subpixel_offsets: [f64; 3],
}

impl StripeGeometry {
    /// Geometry for an image of `width_px` x `height_px` pixels.
    ///
    /// `width_px` must be at least 1.
    pub fn new(width_px: u32, height_px: u32, settings: &StripeSettings) -> Self {
        Self {
            width_px,
            height_px,
            pixel_mm: settings.target_width_mm / f64::from(width_px),
            margin_mm: settings.margin_mm,
            subpixel_offsets: settings.subpixel_offsets,
        }
    }

    /// Total document width including both margins.
    pub fn output_width_mm(&self) -> f64 {
        self.margin_mm * 2.0 + f64::from(self.width_px) * self.pixel_mm
    }

    /// Total document height including both margins.
    pub fn output_height_mm(&self) -> f64 {
        self.margin_mm * 2.0 + f64::from(self.height_px) * self.pixel_mm
    }

    /// Vertical extent `(y0, y1)` of the stripes in pixel row `row`.
    #[inline]
    pub fn stripe_extent(&self, row: u32) -> (f64, f64) {
        let y0 = self.margin_mm + f64::from(row) * self.pixel_mm;
        (y0, y0 + self.pixel_mm)
    }

    /// Horizontal position of a channel's stripe in pixel column `col`.
    #[inline]
    pub fn subpixel_x(&self, col: u32, channel: Channel) -> f64 {
        let x_base = self.margin_mm + f64::from(col) * self.pixel_mm;
        x_base + self.subpixel_offsets[channel.index()] * self.pixel_mm
    }
}

/// Result of a raster scan: the drawing geometry and the channel paths.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterOutput {
    pub geometry: StripeGeometry,
    pub paths: ChannelPaths,
}

/// Converts pixels into subpixel stripe segments.
///
/// # Example
///
/// ```
/// use crt_stripes::{Channel, RgbBuffer, StripeRasterizer, StripeSettings};
///
/// let settings = StripeSettings::default();
/// let image = RgbBuffer::filled(1, 1, [255, 255, 255]);
/// let output = StripeRasterizer::new(&settings).rasterize(&image);
///
/// for channel in Channel::ALL {
///     assert_eq!(output.paths.len(channel), 1);
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StripeRasterizer<'a> {
    settings: &'a StripeSettings,
    dashes: DashDistributor,
}

impl<'a> StripeRasterizer<'a> {
    pub fn new(settings: &'a StripeSettings) -> Self {
        Self {
            settings,
            dashes: DashDistributor::from_settings(settings),
        }
    }

    /// Scan every pixel of `source` and collect the stripe segments.
    ///
    /// A pixel whose three channels are all below the cutoff contributes
    /// nothing. Otherwise every channel at or above the cutoff gets its
    /// gamma-mapped intensity turned into dashes at its subpixel position.
    pub fn rasterize<S: PixelSource + ?Sized>(&self, source: &S) -> RasterOutput {
        let geometry = StripeGeometry::new(source.width(), source.height(), self.settings);
        let cutoff = self.settings.min_channel_cutoff;
        let mut paths = ChannelPaths::new();

        for y in 0..source.height() {
            let (y0, y1) = geometry.stripe_extent(y);

            for x in 0..source.width() {
                let rgb = source.rgb(x, y);
                if rgb.iter().all(|&v| v < cutoff) {
                    continue;
                }

                for channel in Channel::ALL {
                    let value = channel.component(rgb);
                    if value < cutoff {
                        continue;
                    }
                    let intensity = gamma_map(i32::from(value), self.settings.gamma);
                    self.dashes.distribute(
                        geometry.subpixel_x(x, channel),
                        y0,
                        y1,
                        intensity,
                        paths.channel_mut(channel),
                    );
                }
            }
        }

        RasterOutput { geometry, paths }
    }
}
