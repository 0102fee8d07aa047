//! Integration tests for the mobile bridge.
//!
//! Exercises the method-call surface the platform channel talks to,
//! with real files on disk.

use assert_fs::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use split_view_compare::bridge::{handle_method_call, ImageCompareBridge, RawImage};
use split_view_compare::core::buffer::{PixelBuffer, PixelFormat};
use split_view_compare::core::codec;

fn write_image(dir: &assert_fs::TempDir, name: &str, width: usize, height: usize, value: u8) -> String {
    let child = dir.child(name);
    let image = PixelBuffer::filled(width, height, PixelFormat::Rgb8, value).unwrap();
    codec::encode(&image, child.path(), 90).unwrap();
    child.path().display().to_string()
}

#[test]
fn comparison_image_is_persisted_and_readable() {
    let temp = assert_fs::TempDir::new().unwrap();
    let out = temp.child("files");
    let bridge = ImageCompareBridge::new(out.path());
    let a = write_image(&temp, "a.png", 10, 8, 0);
    let b = write_image(&temp, "b.png", 6, 12, 255);

    let result = handle_method_call(
        &bridge,
        "createComparisonImage",
        &json!({ "image1Path": a, "image2Path": b, "alpha": 0.5, "verticalCut": true }),
    )
    .unwrap();

    assert_eq!(result, json!(bridge.output_path().display().to_string()));
    out.child("comparison.jpg").assert(predicate::path::is_file());

    let written = codec::decode(&bridge.output_path(), PixelFormat::Rgb8).unwrap();
    assert_eq!(written.dimensions(), (6, 8));
}

#[test]
fn similarity_of_solid_images() {
    let temp = assert_fs::TempDir::new().unwrap();
    let bridge = ImageCompareBridge::new(temp.path());
    let a = write_image(&temp, "dark.png", 5, 5, 10);
    let b = write_image(&temp, "light.png", 5, 5, 240);

    let result = handle_method_call(
        &bridge,
        "computeSimilarity",
        &json!({ "image1Path": a, "image2Path": b }),
    )
    .unwrap();

    assert_eq!(result, json!(0.0));
}

#[test]
fn blocked_output_directory_yields_empty_path() {
    let temp = assert_fs::TempDir::new().unwrap();
    let blocker = temp.child("files");
    blocker.write_str("a file, not a directory").unwrap();
    let bridge = ImageCompareBridge::new(blocker.path());
    let a = write_image(&temp, "a.png", 4, 4, 0);
    let b = write_image(&temp, "b.png", 4, 4, 255);

    let result = handle_method_call(
        &bridge,
        "createComparisonImage",
        &json!({ "image1Path": a, "image2Path": b, "alpha": 0.25, "verticalCut": false }),
    )
    .unwrap();

    assert_eq!(result, json!(""));
}

#[test]
fn null_alpha_is_invalid_arguments() {
    let temp = assert_fs::TempDir::new().unwrap();
    let bridge = ImageCompareBridge::new(temp.path());
    let a = write_image(&temp, "a.png", 4, 4, 0);

    let error = handle_method_call(
        &bridge,
        "createComparisonImage",
        &json!({ "image1Path": a, "image2Path": a, "alpha": null, "verticalCut": true }),
    )
    .unwrap_err();

    assert_eq!(error["code"], "INVALID_ARGUMENTS");
    assert!(error["message"].is_string());
}

#[test]
fn raw_bitmaps_can_be_passed_directly() {
    let temp = assert_fs::TempDir::new().unwrap();
    let bridge = ImageCompareBridge::new(temp.path());
    let opaque_black = RawImage::new([255, 0, 0, 0].repeat(9), 3, 3);
    let opaque_white = RawImage::new(vec![255; 36], 3, 3);

    // alpha bytes agree, colour bytes do not
    let score = bridge.compute_similarity(opaque_black, opaque_white).unwrap();
    assert!((score - 0.25).abs() < 1e-9);
}
