//! Scanline - CRT-style RGB subpixel stripes for pen plotters
//!
//! Converts raster images into SVG drawings of red, green and blue vertical
//! stripes. The stripe tracing itself lives in the `crt-stripes` crate; this
//! crate adds image decoding, configuration and file output.
//! This library exposes modules for integration testing.

pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
