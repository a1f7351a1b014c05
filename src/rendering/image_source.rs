//! Decoding source images into something the stripe rasterizer can read.
//!
//! Any format the `image` crate was built with is accepted. The file
//! content decides the format, not the extension. Pixels are converted to
//! 8-bit RGB (alpha is dropped, not composited) and wide images are
//! downscaled with a Lanczos3 filter.

use crate::error::ConvertError;
use crt_stripes::PixelSource;
use image::imageops::{self, FilterType};
use image::{ImageFormat, ImageReader, RgbImage};
use std::path::Path;

/// Formats scanline is built to decode.
pub const SUPPORTED_FORMATS: [ImageFormat; 6] = [
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
    ImageFormat::WebP,
    ImageFormat::Gif,
];

/// Formats with a decoder compiled in.
pub fn enabled_formats() -> Vec<ImageFormat> {
    SUPPORTED_FORMATS
        .into_iter()
        .filter(|f| f.reading_enabled())
        .collect()
}

/// Fail with `MissingDependency` when no image decoder is available.
pub fn ensure_decoders() -> Result<(), ConvertError> {
    if enabled_formats().is_empty() {
        return Err(ConvertError::MissingDependency(
            "no image decoders were compiled in; rebuild with the image crate's format features enabled"
                .to_string(),
        ));
    }
    Ok(())
}

/// Size after applying the width cap.
///
/// Images no wider than `max_width` keep their size. Wider images get
/// exactly `max_width` columns and a height scaled by the same factor,
/// rounded half away from zero and never below one row.
pub fn downscaled_size(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width {
        return (width, height);
    }
    let scale = f64::from(max_width) / f64::from(width);
    let new_height = (f64::from(height) * scale).round().max(1.0) as u32;
    (max_width, new_height)
}

/// A decoded, possibly downscaled RGB image.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    image: RgbImage,
    original_size: (u32, u32),
}

impl DecodedImage {
    /// Wrap an RGB image as-is.
    pub fn from_rgb(image: RgbImage) -> Self {
        let original_size = image.dimensions();
        Self {
            image,
            original_size,
        }
    }

    /// Pixel size of the file before downscaling.
    pub fn original_size(&self) -> (u32, u32) {
        self.original_size
    }

    pub fn was_downscaled(&self) -> bool {
        self.original_size != self.image.dimensions()
    }
}

impl PixelSource for DecodedImage {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    #[inline]
    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        self.image.get_pixel(x, y).0
    }
}

/// Decode `path` and cap its width at `max_width` pixels.
pub fn load_source_image(path: &Path, max_width: u32) -> Result<DecodedImage, ConvertError> {
    let decode_error = |source| ConvertError::ImageDecode {
        path: path.to_path_buf(),
        source,
    };

    let rgb = ImageReader::open(path)
        .map_err(|e| decode_error(image::ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| decode_error(image::ImageError::IoError(e)))?
        .decode()
        .map_err(decode_error)?
        .to_rgb8();

    let (width, height) = rgb.dimensions();
    let (new_width, new_height) = downscaled_size(width, height, max_width);

    if (new_width, new_height) == (width, height) {
        tracing::debug!(path = %path.display(), width, height, "Decoded image");
        return Ok(DecodedImage::from_rgb(rgb));
    }

    tracing::debug!(
        path = %path.display(),
        from = ?(width, height),
        to = ?(new_width, new_height),
        "Downscaling image"
    );
    let resized = imageops::resize(&rgb, new_width, new_height, FilterType::Lanczos3);

    Ok(DecodedImage {
        image: resized,
        original_size: (width, height),
    })
}
