//! crt-stripes: raster images as RGB subpixel stripe drawings
//!
//! This library turns pixels into three sets of vertical pen strokes (red,
//! green and blue) laid out like the phosphor stripes of a CRT. The result
//! is meant for pen plotters drawing on black paper.
//!
//! # Quick Start
//!
//! ```
//! use crt_stripes::{Document, RgbBuffer, StripeRasterizer, StripeSettings};
//!
//! let settings = StripeSettings::default();
//! let image = RgbBuffer::filled(4, 3, [200, 120, 40]);
//!
//! let raster = StripeRasterizer::new(&settings).rasterize(&image);
//! let svg = Document::new(raster, &settings)
//!     .title("swatch CRT raster RGB")
//!     .background(true)
//!     .to_svg();
//!
//! assert!(svg.starts_with("<?xml"));
//! ```
//!
//! # Pipeline Overview
//!
//! ```text
//! PixelSource             (decoded image, or an RgbBuffer)
//!     |
//!     v
//! StripeRasterizer        raster order: rows top->bottom, columns left->right
//!     |  per pixel: skip if r, g and b are all below the cutoff
//!     |  per channel >= cutoff:
//!     |      gamma_map()         8-bit value -> intensity 0..1
//!     |      DashDistributor     intensity -> evenly spread dashes
//!     v
//! ChannelPaths            red / green / blue segment lists
//!     |
//!     v
//! Document::to_svg()      millimetre-sized SVG, one <path> per channel
//! ```
//!
//! # Dash Distribution
//!
//! Each pixel stripe is split into `dash_steps` slots. An intensity `i`
//! inks `round(i * steps)` of them (half away from zero). Which slots get
//! ink is decided by an integer error accumulator, the one Bresenham's line
//! algorithm uses to step y while walking x:
//!
//! ```text
//! err = 0
//! for slot in 0..steps:
//!     err += on
//!     if err >= steps: err -= steps; ink(slot)
//! ```
//!
//! This marks exactly `on` slots, and the gaps between inked slots never
//! differ by more than one. Inked slots draw a dash of `dash_fill` of the
//! slot length, centered in the slot. A fully lit stripe is drawn as a
//! single stroke rather than `steps` dashes.
//!
//! Everything is deterministic: the same pixels and settings always
//! produce byte-identical SVG.

pub mod dash;
pub mod document;
pub mod error;
pub mod gamma;
pub mod paths;
pub mod raster;
pub mod settings;


pub use dash::{on_slot_count, on_slots, DashDistributor, OnSlots};
pub use document::Document;
pub use error::SettingsError;
pub use gamma::gamma_map;
pub use paths::{Channel, ChannelPaths, StripeSegment};
pub use raster::{PixelSource, RasterOutput, RgbBuffer, StripeGeometry, StripeRasterizer};
pub use settings::StripeSettings;
