//! SVG document assembly and serialization.
//!
//! The document declares its size in millimetres and uses a `viewBox` with
//! the same numbers, so one user unit is one millimetre and plotter software
//! gets the physical size right without any scaling.
//!
//! Each non-empty channel becomes one `<g>` holding a single compound
//! `<path>`. Every segment is its own `M x y L x y` pair, so segments are
//! never joined into polylines and the plotter lifts the pen between them.
//!
//! Numbers are written with fixed precision (3 decimals for the declared
//! size and stroke width, 6 for the viewBox and background, 4 for path
//! coordinates), which keeps output identical across runs.

use std::fmt::Write;

use crate::paths::{Channel, ChannelPaths, StripeSegment};
use crate::raster::RasterOutput;
use crate::settings::StripeSettings;

/// A finished stripe drawing, ready to serialize.
///
/// # Example
///
/// ```
/// use crt_stripes::{Document, RgbBuffer, StripeRasterizer, StripeSettings};
///
/// let settings = StripeSettings::default();
/// let raster = StripeRasterizer::new(&settings).rasterize(&RgbBuffer::filled(1, 1, [0, 255, 0]));
/// let svg = Document::new(raster, &settings)
///     .title("dot.png CRT raster RGB")
///     .to_svg();
///
/// assert!(svg.contains(r#"<g id="green""#));
/// assert!(!svg.contains(r#"<g id="red""#));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    width_mm: f64,
    height_mm: f64,
    stroke_width_mm: f64,
    background: bool,
    title: String,
    paths: ChannelPaths,
}

impl Document {
    /// Build a document from a raster scan.
    ///
    /// No background and an empty title until set.
    pub fn new(raster: RasterOutput, settings: &StripeSettings) -> Self {
        Self {
            width_mm: raster.geometry.output_width_mm(),
            height_mm: raster.geometry.output_height_mm(),
            stroke_width_mm: settings.stroke_width_mm,
            background: false,
            title: String::new(),
            paths: raster.paths,
        }
    }

    /// Set the document title. It is XML-escaped on output.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Add a solid black full-canvas rectangle behind the stripes.
    pub fn background(mut self, enabled: bool) -> Self {
        self.background = enabled;
        self
    }

    #[inline]
    pub fn width_mm(&self) -> f64 {
        self.width_mm
    }

    #[inline]
    pub fn height_mm(&self) -> f64 {
        self.height_mm
    }

    #[inline]
    pub fn has_background(&self) -> bool {
        self.background
    }

    #[inline]
    pub fn paths(&self) -> &ChannelPaths {
        &self.paths
    }

    /// Serialize to SVG text. Lines are separated by `\n` with no
    /// trailing newline.
    pub fn to_svg(&self) -> String {
        let (w, h) = (self.width_mm, self.height_mm);
        let mut lines: Vec<String> = Vec::with_capacity(16);

        lines.push(r#"<?xml version="1.0" encoding="UTF-8"?>"#.to_string());
        lines.push(format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.3}mm" height="{h:.3}mm" viewBox="0 0 {w:.6} {h:.6}">"#
        ));
        lines.push(format!("<title>{}</title>", xml_escape(&self.title)));

        if self.background {
            lines.push(format!(
                r#"<rect x="0" y="0" width="{w:.6}" height="{h:.6}" fill="black"/>"#
            ));
        }

        let common = format!(
            r#"fill="none" stroke-linecap="round" stroke-width="{:.3}""#,
            self.stroke_width_mm
        );

        for channel in Channel::ALL {
            let segments = self.paths.segments(channel);
            if segments.is_empty() {
                continue;
            }
            lines.push(format!(
                r#"<g id="{}" {} stroke="{}">"#,
                channel.name(),
                common,
                channel.stroke()
            ));
            lines.push(format!(r#"  <path d="{}"/>"#, path_data(segments)));
            lines.push("</g>".to_string());
        }

        lines.push("</svg>".to_string());
        lines.join("\n")
    }
}

/// Build the `d` attribute for a run of disjoint vertical segments.
fn path_data(segments: &[StripeSegment]) -> String {
    // "M x y L x y" with 4-decimal coordinates is ~40 bytes
    let mut d = String::with_capacity(segments.len() * 44);
    for (i, s) in segments.iter().enumerate() {
        if i > 0 {
            d.push(' ');
        }
        let _ = write!(
            d,
            "M {:.4} {:.4} L {:.4} {:.4}",
            s.x, s.y_start, s.x, s.y_end
        );
    }
    d
}

/// Escape the five XML special characters.
fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}
