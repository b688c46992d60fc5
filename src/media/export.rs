// SPDX-License-Identifier: MPL-2.0
//! Export of rendered images.
//!
//! This module writes rendered images to JPEG, PNG or WebP with the `image`
//! crate and renders whole batches of inputs in parallel.

use std::fmt;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use image_rs::codecs::jpeg::JpegEncoder;
use image_rs::codecs::png::PngEncoder;
use image_rs::codecs::webp::WebPEncoder;
use image_rs::DynamicImage;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{load_image, render};
use crate::domain::editing::FilterPipeline;
use crate::error::{Error, Result};

// =============================================================================
// Export Format
// =============================================================================

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// JPEG (lossy, no alpha).
    #[default]
    Jpeg,
    /// PNG (lossless).
    Png,
    /// WebP (written lossless).
    Webp,
}

impl ExportFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Png => "png",
            ExportFormat::Webp => "webp",
        }
    }

    /// Name used in settings and on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "jpeg",
            ExportFormat::Png => "png",
            ExportFormat::Webp => "webp",
        }
    }

    /// Returns all supported formats.
    #[must_use]
    pub fn all() -> &'static [ExportFormat] {
        &[ExportFormat::Jpeg, ExportFormat::Png, ExportFormat::Webp]
    }

    /// Detects format from a file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<ExportFormat> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            "png" => Some(ExportFormat::Png),
            "webp" => Some(ExportFormat::Webp),
            _ => None,
        }
    }

    /// Detects format from a file path extension.
    pub fn from_path(path: &Path) -> Option<ExportFormat> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    fn is_lossless(self) -> bool {
        !matches!(self, ExportFormat::Jpeg)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_extension(s.trim())
            .ok_or_else(|| Error::InvalidArgument(format!("unknown export format `{s}`")))
    }
}

// =============================================================================
// Export Quality
// =============================================================================

/// Lossy encoder quality presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportQuality {
    Low,
    Medium,
    #[default]
    High,
}

impl ExportQuality {
    /// Quality factor in `[0, 1]`.
    #[must_use]
    pub fn factor(self) -> f32 {
        match self {
            ExportQuality::Low => 0.5,
            ExportQuality::Medium => 0.75,
            ExportQuality::High => 0.92,
        }
    }

    /// JPEG encoder quality (1–100).
    #[must_use]
    pub fn jpeg_quality(self) -> u8 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let quality = (self.factor() * 100.0).round().clamp(1.0, 100.0) as u8;
        quality
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ExportQuality::Low => "low",
            ExportQuality::Medium => "medium",
            ExportQuality::High => "high",
        }
    }
}

impl fmt::Display for ExportQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportQuality {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(ExportQuality::Low),
            "medium" => Ok(ExportQuality::Medium),
            "high" => Ok(ExportQuality::High),
            other => Err(Error::InvalidArgument(format!(
                "unknown export quality `{other}`"
            ))),
        }
    }
}

// =============================================================================
// Saving
// =============================================================================

/// Writes `image` to `path`, creating parent directories.
///
/// JPEG drops the alpha channel. PNG and WebP are lossless and ignore
/// `quality`.
///
/// # Errors
///
/// Returns an error if the file cannot be created or encoding fails.
pub fn save_image(
    image: &DynamicImage,
    path: &Path,
    format: ExportFormat,
    quality: ExportQuality,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    if format.is_lossless() {
        log::debug!("{format} is lossless, ignoring quality {quality}");
    }

    let writer = BufWriter::new(File::create(path)?);
    match format {
        ExportFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
            rgb.write_with_encoder(JpegEncoder::new_with_quality(
                writer,
                quality.jpeg_quality(),
            ))?;
        }
        ExportFormat::Png => {
            let rgba = DynamicImage::ImageRgba8(image.to_rgba8());
            rgba.write_with_encoder(PngEncoder::new(writer))?;
        }
        ExportFormat::Webp => {
            let rgba = DynamicImage::ImageRgba8(image.to_rgba8());
            rgba.write_with_encoder(WebPEncoder::new_lossless(writer))?;
        }
    }

    log::info!("exported {} as {format}", path.display());
    Ok(())
}

/// File name of the `index`-th (zero-based) output of a batch.
///
/// Format: `{base}_{index + 1}.{ext}`
#[must_use]
pub fn batch_file_name(base: &str, index: usize, format: ExportFormat) -> String {
    format!("{}_{}.{}", base, index + 1, format.extension())
}

// =============================================================================
// Batch Rendering
// =============================================================================

/// Options shared by every file of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOptions {
    pub output_dir: PathBuf,
    pub base_name: String,
    pub format: ExportFormat,
    pub quality: ExportQuality,
}

/// Outcome of one batch input.
#[derive(Debug)]
pub struct BatchOutcome {
    pub input: PathBuf,
    /// The written file on success.
    pub result: Result<PathBuf>,
}

/// Renders every input through `pipeline` and writes it to the output
/// directory. Files are processed in parallel; a failure only affects its
/// own outcome. Outcomes follow the input order.
#[must_use]
pub fn render_batch(
    inputs: &[PathBuf],
    pipeline: &FilterPipeline,
    options: &BatchOptions,
) -> Vec<BatchOutcome> {
    inputs
        .par_iter()
        .enumerate()
        .map(|(index, input)| {
            let output = options.output_dir.join(batch_file_name(
                &options.base_name,
                index,
                options.format,
            ));
            let result = load_image(input)
                .map(|image| render(&image, pipeline))
                .and_then(|rendered| {
                    save_image(&rendered, &output, options.format, options.quality)
                })
                .map(|()| output);
            if let Err(err) = &result {
                log::warn!("batch export of {} failed: {err}", input.display());
            }
            BatchOutcome {
                input: input.clone(),
                result,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{Rgba, RgbaImage};
    use tempfile::tempdir;

    fn sample() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 3, Rgba([10, 120, 240, 200])))
    }

    #[test]
    fn format_detection_from_extension() {
        assert_eq!(ExportFormat::from_extension("JPG"), Some(ExportFormat::Jpeg));
        assert_eq!(ExportFormat::from_extension("jpeg"), Some(ExportFormat::Jpeg));
        assert_eq!(ExportFormat::from_extension("webp"), Some(ExportFormat::Webp));
        assert_eq!(ExportFormat::from_extension("gif"), None);
        assert_eq!(
            ExportFormat::from_path(Path::new("/tmp/out.PNG")),
            Some(ExportFormat::Png)
        );
    }

    #[test]
    fn format_parses_names() {
        assert_eq!("png".parse::<ExportFormat>().ok(), Some(ExportFormat::Png));
        assert!(matches!(
            "tiff".parse::<ExportFormat>(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn quality_factors() {
        assert_eq!(ExportQuality::Low.jpeg_quality(), 50);
        assert_eq!(ExportQuality::Medium.jpeg_quality(), 75);
        assert_eq!(ExportQuality::High.jpeg_quality(), 92);
        assert_eq!("Medium".parse::<ExportQuality>().ok(), Some(ExportQuality::Medium));
    }

    #[test]
    fn batch_names_are_one_based() {
        assert_eq!(batch_file_name("edited", 0, ExportFormat::Png), "edited_1.png");
        assert_eq!(batch_file_name("trip", 9, ExportFormat::Jpeg), "trip_10.jpg");
    }

    #[test]
    fn png_export_is_lossless() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("out.png");
        let image = sample();

        save_image(&image, &path, ExportFormat::Png, ExportQuality::Low).expect("save png");

        let loaded = image_rs::open(&path).expect("reload png");
        assert_eq!(loaded.to_rgba8(), image.to_rgba8());
    }

    #[test]
    fn jpeg_export_drops_alpha() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("out.jpg");

        save_image(&sample(), &path, ExportFormat::Jpeg, ExportQuality::High).expect("save jpeg");

        let loaded = image_rs::open(&path).expect("reload jpeg");
        assert_eq!(loaded.color(), image_rs::ColorType::Rgb8);
        assert_eq!((loaded.width(), loaded.height()), (4, 3));
    }

    #[test]
    fn webp_export_round_trips() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("out.webp");
        let image = sample();

        save_image(&image, &path, ExportFormat::Webp, ExportQuality::Medium).expect("save webp");

        let loaded = image_rs::open(&path).expect("reload webp");
        assert_eq!(loaded.to_rgba8(), image.to_rgba8());
    }

    #[test]
    fn batch_reports_per_file_results() {
        let dir = tempdir().expect("temp dir");
        let good = dir.path().join("good.png");
        sample().save(&good).expect("write input");
        let missing = dir.path().join("missing.png");

        let options = BatchOptions {
            output_dir: dir.path().join("out"),
            base_name: "edited".into(),
            format: ExportFormat::Png,
            quality: ExportQuality::High,
        };
        let pipeline: FilterPipeline = "invert(100%)".parse().expect("filter");
        let outcomes = render_batch(&[good, missing.clone()], &pipeline, &options);

        assert_eq!(outcomes.len(), 2);
        let written = outcomes[0].result.as_ref().expect("first file exported");
        assert!(written.ends_with("edited_1.png"));
        assert!(written.exists());
        assert_eq!(outcomes[1].input, missing);
        assert!(outcomes[1].result.is_err());
    }
}
