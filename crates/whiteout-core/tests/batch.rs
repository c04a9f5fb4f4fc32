//! End-to-end batch runs against temporary directories.

use std::path::{Path, PathBuf};

use image::{ImageBuffer, ImageFormat, Rgba, RgbaImage};
use whiteout_core::config::LimitsConfig;
use whiteout_core::pipeline::{Batch, ConvertOptions, PngWriter};
use whiteout_core::{Config, FileOutcome, OutcomeKind, Resolution};

fn write_png(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let img: RgbaImage = ImageBuffer::from_fn(4, 4, |x, _| {
        if x < 2 {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([30, 60, 90, 255])
        }
    });
    img.save_with_format(path, ImageFormat::Png).unwrap();
}

fn options(input: &Path) -> ConvertOptions {
    ConvertOptions::from_config(input.to_path_buf(), &Config::default())
}

fn run(options: ConvertOptions) -> (Vec<String>, whiteout_core::BatchReport) {
    let batch = Batch::new(options, LimitsConfig::default());
    let tasks = batch.discover().unwrap();
    let mut lines = Vec::new();
    let report = batch.run(tasks, |outcome| lines.push(outcome.to_string()));
    (lines, report)
}

fn list_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    files.sort();
    files
}

#[test]
fn second_run_skips_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("logo.png"));

    let (lines, report) = run(options(dir.path()));
    assert_eq!(report.saved, 1);
    let dest = dir.path().join("logo_transparent.png");
    assert_eq!(lines, vec![format!("Saved: {}", dest.display())]);
    let after_first = list_files(dir.path());

    let (lines, report) = run(options(dir.path()));
    assert_eq!(report.saved, 0);
    assert_eq!(report.skipped, 1);
    assert_eq!(lines, vec![format!("Skip (exists): {}", dest.display())]);
    assert_eq!(list_files(dir.path()), after_first);
}

#[test]
fn overwrite_replaces_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("logo.png"));
    let dest = dir.path().join("logo_transparent.png");
    std::fs::write(&dest, b"stale").unwrap();

    let mut opts = options(dir.path());
    opts.overwrite = true;
    let (_, report) = run(opts);
    assert_eq!(report.saved, 1);

    let out = image::open(&dest).unwrap().to_rgba8();
    assert_eq!(out.get_pixel(0, 0).0, [255, 255, 255, 0]);
    assert_eq!(out.get_pixel(3, 0).0, [30, 60, 90, 255]);
}

#[test]
fn recursive_keep_subdirs_mirrors_layout() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_png(&input.path().join("a/b/img.png"));

    let mut opts = options(input.path());
    opts.output_dir = output.path().to_path_buf();
    opts.recursive = true;
    opts.keep_subdirs = true;
    let (_, report) = run(opts);

    assert_eq!(report.saved, 1);
    assert!(output.path().join("a/b/img_transparent.png").exists());
}

#[test]
fn recursive_without_keep_subdirs_is_flat() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_png(&input.path().join("a/b/img.png"));

    let mut opts = options(input.path());
    opts.output_dir = output.path().to_path_buf();
    opts.recursive = true;
    run(opts);

    assert!(output.path().join("img_transparent.png").exists());
    assert!(!output.path().join("a").exists());
}

#[test]
fn non_recursive_ignores_nested_files() {
    let input = tempfile::tempdir().unwrap();
    write_png(&input.path().join("nested/img.png"));

    let batch = Batch::new(options(input.path()), LimitsConfig::default());
    assert!(batch.discover().unwrap().is_empty());
}

#[test]
fn bad_file_does_not_abort_batch() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a_broken.png"), b"not an image").unwrap();
    write_png(&dir.path().join("b_good.png"));

    let (lines, report) = run(options(dir.path()));
    assert_eq!(report.failed, 1);
    assert_eq!(report.saved, 1);
    assert!(lines[0].starts_with("Error processing "));
    assert!(lines[0].contains("a_broken.png"));
    assert!(lines[1].starts_with("Saved: "));
    assert!(!dir.path().join("a_broken_transparent.png").exists());
    assert!(dir.path().join("b_good_transparent.png").exists());
}

#[test]
fn extension_filter_is_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("UPPER.PNG"));
    write_png(&dir.path().join("skip.bmp"));

    let (_, report) = run(options(dir.path()).with_extensions(&["png"]));
    assert_eq!(report.total(), 1);
    assert!(dir.path().join("UPPER_transparent.png").exists());
}

#[test]
fn png_resolution_is_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let img: RgbaImage = ImageBuffer::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
    let dpi = Resolution {
        x_dpi: 300.0,
        y_dpi: 300.0,
    };
    PngWriter::save(&img, Some(dpi), &dir.path().join("scan.png")).unwrap();

    let (_, report) = run(options(dir.path()));
    match &report.outcomes[0] {
        FileOutcome {
            kind: OutcomeKind::Saved { resolution, .. },
            ..
        } => {
            let res = resolution.expect("resolution carried over");
            assert_eq!(res.pixels_per_meter(), dpi.pixels_per_meter());
        }
        other => panic!("unexpected outcome {other:?}"),
    }

    let bytes = std::fs::read(dir.path().join("scan_transparent.png")).unwrap();
    let decoder = png::Decoder::new(std::io::Cursor::new(bytes));
    let reader = decoder.read_info().unwrap();
    let dims = reader.info().pixel_dims.unwrap();
    assert_eq!((dims.xppu, dims.yppu), dpi.pixels_per_meter());
}

#[test]
fn jpeg_source_becomes_png() {
    let dir = tempfile::tempdir().unwrap();
    let img = image::RgbImage::from_pixel(8, 8, image::Rgb([10, 10, 10]));
    img.save_with_format(dir.path().join("photo.jpeg"), ImageFormat::Jpeg)
        .unwrap();

    let (_, report) = run(options(dir.path()));
    assert_eq!(report.saved, 1);
    let out = dir.path().join("photo_transparent.png");
    assert_eq!(image::ImageFormat::from_path(&out).unwrap(), ImageFormat::Png);
    let decoded = image::open(&out).unwrap();
    assert!(decoded.to_rgba8().pixels().all(|p| p.0[3] == 255));
}

#[test]
fn empty_directory_discovers_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let batch = Batch::new(options(dir.path()), LimitsConfig::default());
    let tasks = batch.discover().unwrap();
    assert!(tasks.is_empty());
    let report = batch.run(tasks, |_| {});
    assert_eq!(report.total(), 0);
}
