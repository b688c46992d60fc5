// SPDX-License-Identifier: MPL-2.0
//! Applies a [`FilterPipeline`] to pixels.
//!
//! Terms run in order on normalized sRGB values using the Filter Effects
//! transfer functions and color matrices. Every step clamps to `[0, 1]` and
//! leaves alpha alone, except blur which convolves all channels.
//!
//! Consecutive color terms are fused into a single pass over the rows,
//! parallelized with rayon. A blur term splits the passes.

use image_rs::{imageops, DynamicImage, ImageBuffer, Rgba, Rgba32FImage};
use rayon::prelude::*;

use crate::domain::editing::{FilterPipeline, FilterTerm};

type Matrix = [[f32; 3]; 3];

// =============================================================================
// Color Operations
// =============================================================================

/// A per-pixel color transform derived from one filter term.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ColorOp {
    /// `c * slope + intercept` on every color channel.
    Linear { slope: f32, intercept: f32 },
    /// 3x3 matrix on the RGB vector.
    Matrix(Matrix),
}

impl ColorOp {
    #[inline]
    fn apply(&self, rgb: &mut [f32; 3]) {
        match *self {
            ColorOp::Linear { slope, intercept } => {
                for c in rgb.iter_mut() {
                    *c = (*c * slope + intercept).clamp(0.0, 1.0);
                }
            }
            ColorOp::Matrix(m) => {
                let [r, g, b] = *rgb;
                for (c, row) in rgb.iter_mut().zip(m.iter()) {
                    *c = (row[0] * r + row[1] * g + row[2] * b).clamp(0.0, 1.0);
                }
            }
        }
    }
}

fn fraction(percent: f64) -> f32 {
    (percent / 100.0) as f32
}

fn saturate_matrix(s: f32) -> Matrix {
    [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ]
}

fn hue_rotate_matrix(degrees: f64) -> Matrix {
    let radians = degrees.to_radians();
    let (sin, cos) = (radians.sin() as f32, radians.cos() as f32);
    [
        [
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
        ],
        [
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
        ],
        [
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ],
    ]
}

fn sepia_matrix(amount: f32) -> Matrix {
    let k = 1.0 - amount;
    [
        [0.393 + 0.607 * k, 0.769 - 0.769 * k, 0.189 - 0.189 * k],
        [0.349 - 0.349 * k, 0.686 + 0.314 * k, 0.168 - 0.168 * k],
        [0.272 - 0.272 * k, 0.534 - 0.534 * k, 0.131 + 0.869 * k],
    ]
}

fn grayscale_matrix(amount: f32) -> Matrix {
    let k = 1.0 - amount;
    [
        [0.2126 + 0.7874 * k, 0.7152 - 0.7152 * k, 0.0722 - 0.0722 * k],
        [0.2126 - 0.2126 * k, 0.7152 + 0.2848 * k, 0.0722 - 0.0722 * k],
        [0.2126 - 0.2126 * k, 0.7152 - 0.7152 * k, 0.0722 + 0.9278 * k],
    ]
}

/// Color transform of `term`, or `None` for blur.
fn color_op(term: FilterTerm) -> Option<ColorOp> {
    let op = match term {
        FilterTerm::Brightness(v) => ColorOp::Linear {
            slope: fraction(v),
            intercept: 0.0,
        },
        FilterTerm::Contrast(v) => {
            let a = fraction(v);
            ColorOp::Linear {
                slope: a,
                intercept: 0.5 - 0.5 * a,
            }
        }
        FilterTerm::Saturate(v) => ColorOp::Matrix(saturate_matrix(fraction(v))),
        FilterTerm::Sepia(v) => ColorOp::Matrix(sepia_matrix(fraction(v).min(1.0))),
        FilterTerm::Grayscale(v) => ColorOp::Matrix(grayscale_matrix(fraction(v).min(1.0))),
        FilterTerm::HueRotate(deg) => ColorOp::Matrix(hue_rotate_matrix(deg)),
        FilterTerm::Invert(v) => {
            let a = fraction(v).min(1.0);
            ColorOp::Linear {
                slope: 1.0 - 2.0 * a,
                intercept: a,
            }
        }
        FilterTerm::Blur(_) => return None,
    };
    Some(op)
}

// =============================================================================
// Passes
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Pass {
    Color(Vec<ColorOp>),
    /// Gaussian blur with this standard deviation in pixels.
    Blur(f32),
}

/// Groups the non-identity terms into fused passes.
///
/// Blur radii are capped at `max_sigma`; past the image size a larger radius
/// renders the same flat average.
fn plan(pipeline: &FilterPipeline, max_sigma: f32) -> Vec<Pass> {
    let mut passes: Vec<Pass> = Vec::new();
    for term in pipeline.terms().iter().copied() {
        if term.is_identity() {
            continue;
        }
        match color_op(term) {
            Some(op) => match passes.last_mut() {
                Some(Pass::Color(ops)) => ops.push(op),
                _ => passes.push(Pass::Color(vec![op])),
            },
            None => passes.push(Pass::Blur((term.value() as f32).min(max_sigma))),
        }
    }
    passes
}

fn apply_color_ops(buffer: &mut Rgba32FImage, ops: &[ColorOp]) {
    let stride = buffer.width() as usize * 4;
    if stride == 0 {
        return;
    }
    buffer.par_chunks_mut(stride).for_each(|row| {
        for pixel in row.chunks_exact_mut(4) {
            let mut rgb = [pixel[0], pixel[1], pixel[2]];
            for op in ops {
                op.apply(&mut rgb);
            }
            pixel[..3].copy_from_slice(&rgb);
        }
    });
}

/// Renders `image` through `pipeline`.
///
/// The result keeps the bit depth class of the input (8-bit, 16-bit or
/// float) but always carries an alpha channel.
#[must_use]
pub fn render(image: &DynamicImage, pipeline: &FilterPipeline) -> DynamicImage {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return image.clone();
    }
    let passes = plan(pipeline, width.max(height) as f32);
    if passes.is_empty() {
        return image.clone();
    }

    let mut buffer = image.to_rgba32f();
    for pass in &passes {
        match pass {
            Pass::Color(ops) => apply_color_ops(&mut buffer, ops),
            Pass::Blur(sigma) => buffer = imageops::blur(&buffer, *sigma),
        }
    }
    log::trace!(
        "rendered {}x{} through {} passes",
        buffer.width(),
        buffer.height(),
        passes.len()
    );

    let rendered = DynamicImage::ImageRgba32F(buffer);
    match image {
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => rendered,
        _ if bits_per_channel(image) > 8 => DynamicImage::ImageRgba16(rendered.to_rgba16()),
        _ => DynamicImage::ImageRgba8(rendered.to_rgba8()),
    }
}

fn bits_per_channel(image: &DynamicImage) -> u16 {
    let color = image.color();
    color.bits_per_pixel() / u16::from(color.channel_count())
}

/// Renders a single RGBA pixel, mostly useful for previews and tests.
#[must_use]
pub fn render_pixel(pixel: Rgba<u8>, pipeline: &FilterPipeline) -> Rgba<u8> {
    let source: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_pixel(1, 1, pixel);
    let rendered = render(&DynamicImage::ImageRgba8(source), pipeline).to_rgba8();
    *rendered.get_pixel(0, 0)
}
