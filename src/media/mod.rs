// SPDX-License-Identifier: MPL-2.0
//! Pixel work: loading, rendering filter pipelines and exporting.
//!
//! Nothing here touches editing state. Rendering and batch export use rayon
//! internally and are safe to call from any thread.

pub mod export;
pub mod image;
pub mod render;

pub use export::{
    batch_file_name, render_batch, save_image, BatchOptions, BatchOutcome, ExportFormat,
    ExportQuality,
};
pub use image::load_image;
pub use render::{render, render_pixel};
