//! Image file -> SVG file conversions through the public pipeline.

mod common;

use common::{fixtures, fixtures::colors, TestWorkspace};
use crt_stripes::StripeSettings;
use pretty_assertions::assert_eq;
use scanline::models::AppConfig;
use scanline::services::{default_destination, suggested_output_name, ConversionPipeline};

fn default_pipeline() -> ConversionPipeline {
    ConversionPipeline::new(StripeSettings::default()).unwrap()
}

#[test]
fn test_white_pixel_with_background() {
    let ws = TestWorkspace::new();
    let input = ws.write_image("white.png", &fixtures::solid(1, 1, colors::WHITE));
    let output = ws.join("white_CRT_RGB.svg");

    let report = default_pipeline().convert(&input, &output, true).unwrap();

    let expected = [
        r#"<?xml version="1.0" encoding="UTF-8"?>"#,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="272.000mm" height="272.000mm" viewBox="0 0 272.000000 272.000000">"#,
        "<title>white.png CRT raster RGB</title>",
        r#"<rect x="0" y="0" width="272.000000" height="272.000000" fill="black"/>"#,
        r#"<g id="red" fill="none" stroke-linecap="round" stroke-width="0.280" stroke="rgb(255,0,0)">"#,
        r#"  <path d="M 52.8000 6.0000 L 52.8000 266.0000"/>"#,
        "</g>",
        r#"<g id="green" fill="none" stroke-linecap="round" stroke-width="0.280" stroke="rgb(0,255,0)">"#,
        r#"  <path d="M 136.0000 6.0000 L 136.0000 266.0000"/>"#,
        "</g>",
        r#"<g id="blue" fill="none" stroke-linecap="round" stroke-width="0.280" stroke="rgb(0,0,255)">"#,
        r#"  <path d="M 219.2000 6.0000 L 219.2000 266.0000"/>"#,
        "</g>",
        "</svg>",
    ]
    .join("\n");

    assert_eq!(ws.read(&output), expected);
    assert_eq!(report.segments, [1, 1, 1]);
    assert_eq!(report.raster_px, (1, 1));
    assert_eq!(report.size_mm, (272.0, 272.0));
    assert_eq!(report.bytes_written, expected.len());
}

#[test]
fn test_black_pixel_has_no_groups() {
    let ws = TestWorkspace::new();
    let input = ws.write_image("black.png", &fixtures::solid(1, 1, colors::BLACK));
    let output = ws.join("black.svg");

    let report = default_pipeline().convert(&input, &output, false).unwrap();
    let svg = ws.read(&output);

    common::assert_svg_document(&svg);
    common::assert_background(&svg, false);
    assert!(!svg.contains("<g "));
    assert_eq!(report.total_segments(), 0);
}

#[test]
fn test_near_black_image_is_empty() {
    let ws = TestWorkspace::new();
    let input = ws.write_image("dark.png", &fixtures::solid(4, 3, colors::NEAR_BLACK));
    let output = ws.join("dark.svg");

    default_pipeline().convert(&input, &output, true).unwrap();
    let svg = ws.read(&output);

    common::assert_background(&svg, true);
    for channel in ["red", "green", "blue"] {
        assert_eq!(common::segment_count(&svg, channel), 0);
    }
}

#[test]
fn test_single_channel_image() {
    let ws = TestWorkspace::new();
    let input = ws.write_image("red.png", &fixtures::solid(3, 2, colors::RED));
    let output = ws.join("red.svg");

    let report = default_pipeline().convert(&input, &output, false).unwrap();
    let svg = ws.read(&output);

    assert_eq!(common::segment_count(&svg, "red"), 6);
    assert!(common::channel_path(&svg, "green").is_none());
    assert!(common::channel_path(&svg, "blue").is_none());
    assert_eq!(report.segments, [6, 0, 0]);
}

#[test]
fn test_wide_image_is_downscaled() {
    let ws = TestWorkspace::new();
    let input = ws.write_image("wide.png", &fixtures::solid(640, 100, colors::WHITE));
    let output = ws.join("wide.svg");

    let report = default_pipeline().convert(&input, &output, false).unwrap();

    assert_eq!(report.original_px, (640, 100));
    assert_eq!(report.raster_px, (320, 50));
    // 12 mm of margins + 50 rows of 0.8125 mm
    assert_eq!(report.size_mm, (272.0, 52.625));
    common::assert_size_mm(&ws.read(&output), 272.0, 52.625);
}

#[test]
fn test_output_width_fixed_for_any_input_width() {
    let ws = TestWorkspace::new();
    for width in [1u32, 13, 320] {
        let input = ws.write_image(&format!("w{width}.png"), &fixtures::gradient(width, 5));
        let output = ws.join(&format!("w{width}.svg"));

        let report = default_pipeline().convert(&input, &output, false).unwrap();
        assert_eq!(report.size_mm.0, 272.0, "width {width}px");
    }
}

#[test]
fn test_reruns_are_byte_identical() {
    let ws = TestWorkspace::new();
    let input = ws.write_image("gradient.png", &fixtures::gradient(24, 16));
    let first = ws.join("first.svg");
    let second = ws.join("second.svg");

    let pipeline = default_pipeline();
    pipeline.convert(&input, &first, true).unwrap();
    pipeline.convert(&input, &second, true).unwrap();

    assert_eq!(ws.read(&first), ws.read(&second));
}

#[test]
fn test_render_matches_written_file() {
    let ws = TestWorkspace::new();
    let input = ws.write_image("gradient.png", &fixtures::gradient(8, 8));
    let output = ws.join("out.svg");

    let pipeline = default_pipeline();
    let document = pipeline.render(&input, true).unwrap();
    pipeline.convert(&input, &output, true).unwrap();

    assert_eq!(document.to_svg(), ws.read(&output));
}

#[test]
fn test_missing_input_writes_nothing() {
    let ws = TestWorkspace::new();
    let output = ws.join("never.svg");

    let err = default_pipeline()
        .convert(&ws.join("missing.png"), &output, true)
        .unwrap_err();

    assert_eq!(err.kind(), "ImageDecodeError");
    assert!(err.report().starts_with("ImageDecodeError: "));
    assert!(!output.exists());
}

#[test]
fn test_undecodable_input_writes_nothing() {
    let ws = TestWorkspace::new();
    let input = ws.write_file("broken.png", "this is not a png");
    let output = ws.join("broken.svg");

    let err = default_pipeline().convert(&input, &output, true).unwrap_err();

    assert_eq!(err.kind(), "ImageDecodeError");
    assert!(!output.exists());
}

#[test]
fn test_unwritable_destination_is_file_system_error() {
    let ws = TestWorkspace::new();
    let input = ws.write_image("white.png", &fixtures::solid(1, 1, colors::WHITE));
    // A regular file where a directory is needed
    let blocker = ws.write_file("blocker", "");
    let output = blocker.join("out.svg");

    let err = default_pipeline().convert(&input, &output, true).unwrap_err();

    assert_eq!(err.kind(), "FileSystemError");
}

#[test]
fn test_parent_directories_are_created() {
    let ws = TestWorkspace::new();
    let input = ws.write_image("white.png", &fixtures::solid(2, 2, colors::WHITE));
    let output = ws.join("a/b/c/white.svg");

    default_pipeline().convert(&input, &output, true).unwrap();

    assert!(output.exists());
}

#[test]
fn test_title_is_escaped_file_name() {
    let ws = TestWorkspace::new();
    let input = ws.write_image("cats & dogs.png", &fixtures::solid(1, 1, colors::WHITE));
    let output = ws.join("cats.svg");

    default_pipeline().convert(&input, &output, false).unwrap();

    assert!(ws
        .read(&output)
        .contains("<title>cats &amp; dogs.png CRT raster RGB</title>"));
}

#[test]
fn test_batch_continues_after_failure() {
    let ws = TestWorkspace::new();
    let good_a = ws.write_image("a.png", &fixtures::solid(1, 1, colors::WHITE));
    let bad = ws.write_file("b.png", "garbage");
    let good_c = ws.write_image("c.png", &fixtures::solid(1, 1, colors::MID_GRAY));

    let pipeline = default_pipeline();
    let results: Vec<_> = [&good_a, &bad, &good_c]
        .into_iter()
        .map(|input| {
            let output = default_destination(input, None, "_CRT_RGB");
            pipeline.convert(input, &output, true)
        })
        .collect();

    assert!(results[0].is_ok());
    assert!(results[1].is_err());
    assert!(results[2].is_ok());
    assert_eq!(
        ws.entries(),
        vec!["a.png", "a_CRT_RGB.svg", "b.png", "c.png", "c_CRT_RGB.svg"]
    );
}

#[test]
fn test_default_names_follow_source() {
    let ws = TestWorkspace::new();
    let input = ws.write_image("holiday.png", &fixtures::solid(1, 1, colors::WHITE));

    assert_eq!(suggested_output_name(&input), "holiday_CRT_RGB.svg");
    assert_eq!(
        default_destination(&input, None, "_CRT_RGB"),
        ws.join("holiday_CRT_RGB.svg")
    );
}

#[test]
fn test_config_file_drives_conversion() {
    let ws = TestWorkspace::new();
    let config_path = ws.write_file("scanline.yaml", fixtures::CUSTOM_CONFIG);
    let input = ws.write_image("gray.png", &fixtures::solid(2, 2, colors::MID_GRAY));

    let config = AppConfig::load(Some(&config_path)).unwrap();
    let settings = config.settings().unwrap();
    assert_eq!(settings.dash_steps, 4);

    let output = default_destination(&input, None, &config.output.suffix);
    assert_eq!(output, ws.join("gray_plot.svg"));

    let report = ConversionPipeline::new(settings)
        .unwrap()
        .convert(&input, &output, config.output.background)
        .unwrap();

    // (128/255)^2 * 4 = 1.008 -> one dash per stripe
    assert_eq!(report.segments, [4, 4, 4]);
    common::assert_background(&ws.read(&output), false);
}
