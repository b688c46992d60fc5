// SPDX-License-Identifier: MPL-2.0
use image_rs::{DynamicImage, Rgba, RgbaImage};
use lens_adjust::domain::editing::{AdjustmentEngine, AdjustmentKind, FilterPipeline, FilterPreset};
use lens_adjust::media::{self, ExportFormat, ExportQuality};
use tempfile::tempdir;

fn photo() -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(32, 24, |x, y| {
        Rgba([(x * 8) as u8, (y * 10) as u8, 128, 255])
    }))
}

#[test]
fn engine_filter_renders_and_exports() {
    let mut engine = AdjustmentEngine::new();
    engine.set_value(AdjustmentKind::Grayscale, 100.0);
    engine.commit();

    let rendered = media::render(&photo(), &engine.filter());
    for pixel in rendered.to_rgba8().pixels() {
        assert_eq!(pixel[0], pixel[1]);
        assert_eq!(pixel[1], pixel[2]);
    }

    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("gray.png");
    media::save_image(&rendered, &path, ExportFormat::Png, ExportQuality::High).expect("save");
    let reloaded = media::load_image(&path).expect("reload");
    assert_eq!(reloaded.to_rgba8(), rendered.to_rgba8());
}

#[test]
fn undo_restores_original_render() {
    let source = photo();
    let mut engine = AdjustmentEngine::new();
    engine.set_value(AdjustmentKind::Invert, 100.0);
    engine.commit();
    engine.undo();

    let rendered = media::render(&source, &engine.filter());
    assert_eq!(rendered.to_rgba8(), source.to_rgba8());
}

#[test]
fn every_built_in_look_renders() {
    let source = photo();
    for preset in FilterPreset::all() {
        let rendered = media::render(&source, preset.pipeline());
        assert_eq!(
            (rendered.width(), rendered.height()),
            (32, 24),
            "{}",
            preset.name()
        );
    }
}

#[test]
fn pipeline_order_matters() {
    let pixel = Rgba([200, 100, 50, 255]);
    let a: FilterPipeline = "brightness(200%) invert(100%)".parse().expect("filter");
    let b: FilterPipeline = "invert(100%) brightness(200%)".parse().expect("filter");
    assert_ne!(media::render_pixel(pixel, &a), media::render_pixel(pixel, &b));
}
