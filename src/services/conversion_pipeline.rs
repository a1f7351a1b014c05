use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crt_stripes::{Channel, Document, PixelSource, StripeRasterizer, StripeSettings};

use crate::error::ConvertError;
use crate::models::config::DEFAULT_SUFFIX;
use crate::rendering::load_source_image;

/// Summary of one finished conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Pixel size of the input file
    pub original_px: (u32, u32),
    /// Pixel size actually traced (after downscaling)
    pub raster_px: (u32, u32),
    /// Output size in millimetres, margins included
    pub size_mm: (f64, f64),
    /// Segment count per channel, in red, green, blue order
    pub segments: [usize; 3],
    pub bytes_written: usize,
}

impl ConversionReport {
    pub fn total_segments(&self) -> usize {
        self.segments.iter().sum()
    }
}

/// A rendered document plus the pixel sizes it came from.
struct Traced {
    document: Document,
    original_px: (u32, u32),
    raster_px: (u32, u32),
}

/// Image file -> stripe SVG file
pub struct ConversionPipeline {
    settings: StripeSettings,
}

impl ConversionPipeline {
    /// Create a pipeline. Settings are validated once here.
    pub fn new(settings: StripeSettings) -> Result<Self, ConvertError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &StripeSettings {
        &self.settings
    }

    /// Decode, downscale and trace `source` into a document.
    pub fn render(&self, source: &Path, background: bool) -> Result<Document, ConvertError> {
        Ok(self.trace(source, background)?.document)
    }

    /// Render `source` and write the SVG to `destination`.
    ///
    /// The whole document is built in memory before anything touches the
    /// filesystem, and is then written through a temporary file next to the
    /// destination. A failed decode or write leaves no file behind and an
    /// existing destination untouched. Missing parent directories are
    /// created.
    pub fn convert(
        &self,
        source: &Path,
        destination: &Path,
        background: bool,
    ) -> Result<ConversionReport, ConvertError> {
        let traced = self.trace(source, background)?;
        let svg = traced.document.to_svg();

        write_atomically(destination, |file| file.write_all(svg.as_bytes())).map_err(|source| {
            ConvertError::FileSystem {
                path: destination.to_path_buf(),
                source,
            }
        })?;

        let paths = traced.document.paths();
        let report = ConversionReport {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            original_px: traced.original_px,
            raster_px: traced.raster_px,
            size_mm: (traced.document.width_mm(), traced.document.height_mm()),
            segments: Channel::ALL.map(|c| paths.len(c)),
            bytes_written: svg.len(),
        };

        tracing::info!(
            source = %source.display(),
            destination = %destination.display(),
            width_px = report.raster_px.0,
            height_px = report.raster_px.1,
            width_mm = report.size_mm.0,
            height_mm = report.size_mm.1,
            red = report.segments[0],
            green = report.segments[1],
            blue = report.segments[2],
            bytes = report.bytes_written,
            "Converted image"
        );

        Ok(report)
    }

    fn trace(&self, source: &Path, background: bool) -> Result<Traced, ConvertError> {
        let image = load_source_image(source, self.settings.max_width_px)?;
        let raster = StripeRasterizer::new(&self.settings).rasterize(&image);

        let document = Document::new(raster, &self.settings)
            .title(format!("{} CRT raster RGB", file_name(source)))
            .background(background);

        Ok(Traced {
            document,
            original_px: image.original_size(),
            raster_px: (image.width(), image.height()),
        })
    }
}

/// Write `destination` via a temporary sibling that replaces it only once
/// `write` has succeeded and the data is flushed.
pub(crate) fn write_atomically(
    destination: &Path,
    write: impl FnOnce(&mut File) -> io::Result<()>,
) -> io::Result<()> {
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    // Dropped (and deleted) on any early return
    let mut tmp = NamedTempFile::new_in(dir)?;
    write(tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;
    tmp.persist(destination).map_err(|e| e.error)?;
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// `"{stem}{suffix}.svg"` for a source path.
pub fn output_name(source: &Path, suffix: &str) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    format!("{stem}{suffix}.svg")
}

/// Default output file name, e.g. `photo.jpg` -> `photo_CRT_RGB.svg`.
pub fn suggested_output_name(source: &Path) -> String {
    output_name(source, DEFAULT_SUFFIX)
}

/// Where the SVG for `source` goes when no explicit output file is given:
/// `out_dir` if set, otherwise next to the source.
pub fn default_destination(source: &Path, out_dir: Option<&Path>, suffix: &str) -> PathBuf {
    let dir = out_dir
        .map(Path::to_path_buf)
        .or_else(|| source.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(output_name(source, suffix))
}
