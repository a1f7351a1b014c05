//! Assertion helpers for SVG output.

use pretty_assertions::assert_eq;

/// Text of the `d` attribute of the path inside `<g id="{channel}">`, if any.
pub fn channel_path<'a>(svg: &'a str, channel: &str) -> Option<&'a str> {
    let group = format!(r#"<g id="{channel}""#);
    let start = svg.find(&group)?;
    let rest = &svg[start..];
    let d_start = rest.find(r#"<path d=""#)? + r#"<path d=""#.len();
    let d_len = rest[d_start..].find('"')?;
    Some(&rest[d_start..d_start + d_len])
}

/// Number of `M ... L ...` segments for a channel (0 if the group is absent).
pub fn segment_count(svg: &str, channel: &str) -> usize {
    channel_path(svg, channel)
        .map(|d| d.matches('M').count())
        .unwrap_or(0)
}

/// Assert the document is well-formed enough for a plotter: prolog, root,
/// title and closing tag in order, no trailing newline.
pub fn assert_svg_document(svg: &str) {
    let lines: Vec<&str> = svg.lines().collect();
    assert!(lines.len() >= 4, "SVG too short:\n{svg}");
    assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    assert!(
        lines[1].starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" "#),
        "Unexpected root element: {}",
        lines[1]
    );
    assert!(lines[2].starts_with("<title>") && lines[2].ends_with("</title>"));
    assert_eq!(lines[lines.len() - 1], "</svg>");
    assert!(!svg.ends_with('\n'), "SVG must not end with a newline");
}

/// Assert the declared size in millimetres.
pub fn assert_size_mm(svg: &str, width: f64, height: f64) {
    let expected = format!(r#"width="{width:.3}mm" height="{height:.3}mm""#);
    assert!(
        svg.contains(&expected),
        "Expected size {expected}, root was: {}",
        svg.lines().nth(1).unwrap_or_default()
    );
}

/// Assert whether the black background rectangle is present.
pub fn assert_background(svg: &str, expected: bool) {
    assert_eq!(
        svg.contains(r#"fill="black"/>"#),
        expected,
        "background rect presence"
    );
}
