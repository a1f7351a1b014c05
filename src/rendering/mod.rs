pub mod image_source;

pub use image_source::{
    downscaled_size, enabled_formats, ensure_decoders, load_source_image, DecodedImage,
};
