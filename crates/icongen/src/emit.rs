//! SVG rendering of extracted icons
//!
//! Each icon becomes a standalone SVG document whose monochrome paths follow
//! `currentColor`, with an embedded style block switching that color between
//! a light and a dark scheme.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::model::{Color, FillRule, Icon, PathRecord};

/// Opacities at or above this are treated as fully opaque
const OPAQUE_THRESHOLD: f32 = 0.999;

/// Rendering options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// CSS color applied under the light scheme
    pub light_color: String,
    /// CSS color applied under `prefers-color-scheme: dark`
    pub dark_color: String,
    /// Keep black and white fills literal instead of mapping them to `currentColor`
    pub preserve_colors: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            light_color: "#000000".to_string(),
            dark_color: "#FFFFFF".to_string(),
            preserve_colors: false,
        }
    }
}

/// Render one icon as an SVG document
pub fn render_svg(icon: &Icon, options: &EmitOptions) -> String {
    let width = format_dimension(icon.source.viewport_width);
    let height = format_dimension(icon.source.viewport_height);

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">\n"
    ));
    svg.push_str("  <style>\n");
    svg.push_str(&format!(
        "    svg {{ color-scheme: light dark; color: {}; }}\n",
        encode_text(&options.light_color)
    ));
    svg.push_str(&format!(
        "    @media (prefers-color-scheme: dark) {{ svg {{ color: {}; }} }}\n",
        encode_text(&options.dark_color)
    ));
    svg.push_str("  </style>\n");

    for path in &icon.paths {
        svg.push_str("  ");
        svg.push_str(&render_path(path, options.preserve_colors));
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}

/// Render a single `<path/>` element
fn render_path(path: &PathRecord, preserve_colors: bool) -> String {
    let mut attributes: Vec<(&str, String)> = vec![
        ("d", path.path_data()),
        ("fill", resolve_color(path.fill.as_ref(), preserve_colors)),
    ];

    if let Some(alpha) = path.fill_alpha.filter(|a| *a < OPAQUE_THRESHOLD) {
        attributes.push(("fill-opacity", format!("{:.3}", alpha)));
    }
    if let Some(stroke) = &path.stroke {
        attributes.push(("stroke", resolve_color(Some(stroke), preserve_colors)));
    }
    if let Some(width) = &path.stroke_width {
        attributes.push(("stroke-width", width.clone()));
    }
    if let Some(alpha) = path.stroke_alpha.filter(|a| *a < OPAQUE_THRESHOLD) {
        attributes.push(("stroke-opacity", format!("{:.3}", alpha)));
    }
    if let Some(cap) = &path.stroke_line_cap {
        attributes.push(("stroke-linecap", cap.to_lowercase()));
    }
    if let Some(join) = &path.stroke_line_join {
        attributes.push(("stroke-linejoin", join.to_lowercase()));
    }
    if let Some(miter) = &path.stroke_miter {
        attributes.push(("stroke-miterlimit", miter.clone()));
    }
    if path.fill_rule == FillRule::EvenOdd {
        attributes.push(("fill-rule", "evenodd".to_string()));
        attributes.push(("clip-rule", "evenodd".to_string()));
    }

    let mut element = String::from("<path");
    for (name, value) in attributes {
        element.push_str(&format!(
            " {}=\"{}\"",
            name,
            encode_double_quoted_attribute(&value)
        ));
    }
    element.push_str("/>");
    element
}

/// Paint value for a fill or stroke
///
/// Absent colors always inherit `currentColor`. Unless `preserve_colors` is
/// set, pure black and white do too, so the icon follows the theme.
pub fn resolve_color(color: Option<&Color>, preserve_colors: bool) -> String {
    match color {
        None => "currentColor".to_string(),
        Some(color) if !preserve_colors && color.is_monochrome() => "currentColor".to_string(),
        Some(color) => color.as_css().to_string(),
    }
}

/// Format a viewport dimension: whole numbers without a fraction, everything
/// else without trailing zeros.
pub fn format_dimension(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let text = format!("{}", value);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}
