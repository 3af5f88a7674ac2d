//! Integration tests for tree conversion.

use std::fs;
use std::path::Path;

use icongen::{convert_tree, ConvertOptions, EmitOptions};
use tempfile::tempdir;

const HOME: &str = r#"
package com.example.icons.filled

import androidx.compose.ui.graphics.Color
import androidx.compose.ui.graphics.PathFillType
import androidx.compose.ui.graphics.SolidColor
import androidx.compose.ui.graphics.vector.ImageVector
import androidx.compose.ui.graphics.vector.path
import androidx.compose.ui.unit.dp

val Icons.Filled.Home: ImageVector
    get() {
        if (_home != null) {
            return _home!!
        }
        _home = ImageVector.Builder(
            name = "Home",
            defaultWidth = 24.dp,
            defaultHeight = 24.dp,
            viewportWidth = 24f,
            viewportHeight = 24f
        ).apply {
            path(
                fill = SolidColor(Color(0xFF000000)),
                fillAlpha = 1.0f,
                stroke = null,
                strokeAlpha = 1.0f,
                pathFillType = PathFillType.EvenOdd
            ) {
                moveTo(10f, 20f)
                verticalLineToRelative(-6f)
                horizontalLineToRelative(4f)
                verticalLineToRelative(6f)
                horizontalLineToRelative(5f)
                verticalLineToRelative(-8f)
                horizontalLineToRelative(3f)
                lineTo(12f, 3f)
                lineTo(2f, 12f)
                horizontalLineToRelative(3f)
                verticalLineToRelative(8f)
                close()
            }
            path(fill = SolidColor(Color(0x803482FF)), fillAlpha = 0.5f) {
                moveTo(12f, 5.5f)
                curveToRelative(1.1f, 0f, 2f, 0.9f, 2f, 2f)
            }
        }.build()
        return _home!!
    }

private var _home: ImageVector? = null
"#;

const OUTLINE: &str = r#"
val Icons.Outlined.Circle: ImageVector
    get() = ImageVector.Builder("Outlined.Circle", 20.dp, 20.dp, 20.5f, 20f).apply {
        path(
            stroke = SolidColor(Color.White),
            strokeLineWidth = 1.5f,
            strokeLineCap = StrokeCap.Round,
            strokeLineJoin = StrokeJoin.Round,
            strokeLineMiter = 4f
        ) {
            moveTo(10f, 2f)
            arcToRelative(8f, 8f, 0f, true, true, 0f, 16f)
        }
    }.build()
"#;

const NO_DECLARATION: &str = r#"
fun ImageVector.Builder.drawBadge() {
    path(fill = SolidColor(Color.Black)) {
        moveTo(1f, 1f)
        lineTo(2f, 2f)
    }
}
"#;

const AGGREGATOR: &str = r#"
object Icons {
    val all = listOf(Icons.Filled.Home, Icons.Outlined.Circle)
}
path { moveTo(0f, 0f) }
"#;

const EMPTY_PATHS: &str = r#"
val Blank = ImageVector.Builder("Blank", 24.dp, 24.dp, 24f, 24f).apply {
    path(fill = SolidColor(Color.Black)) { }
}.build()
"#;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn setup(root: &Path) {
    write(root, "filled/Home.kt", HOME);
    write(root, "outlined/Circle.kt", OUTLINE);
    write(root, "Badge.kt", NO_DECLARATION);
    write(root, "Icons.kt", AGGREGATOR);
    write(root, "Blank.kt", EMPTY_PATHS);
    write(root, "README.md", "path { moveTo(0f, 0f) }");
}

fn attribute<'a>(node: &roxmltree::Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name)
}

#[test]
fn converts_tree_mirroring_directories() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let src = temp_dir.path().join("src");
    let out = temp_dir.path().join("out");
    setup(&src);

    let report = convert_tree(&ConvertOptions::new(&src, &out)).expect("conversion failed");

    let mut generated: Vec<_> = report
        .generated
        .iter()
        .map(|p| p.strip_prefix(&out).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    generated.sort();
    assert_eq!(
        generated,
        ["Badge.svg", "filled/Home.svg", "outlined/Outlined.Circle.svg"]
    );
    assert_eq!(report.files_scanned, 4);
    assert_eq!(report.files_without_icons, 1);
    assert_eq!(report.failures, 0);
    assert!(!out.join("Blank.svg").exists());
    assert!(!out.join("Icons.svg").exists());
}

#[test]
fn emitted_home_icon_is_well_formed() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let src = temp_dir.path().join("src");
    let out = temp_dir.path().join("out");
    setup(&src);
    convert_tree(&ConvertOptions::new(&src, &out)).expect("conversion failed");

    let text = fs::read_to_string(out.join("filled/Home.svg")).unwrap();
    let doc = roxmltree::Document::parse(&text).expect("emitted SVG is not well-formed XML");

    let root = doc.root_element();
    assert_eq!(root.tag_name().name(), "svg");
    assert_eq!(attribute(&root, "width"), Some("24"));
    assert_eq!(attribute(&root, "height"), Some("24"));
    assert_eq!(attribute(&root, "viewBox"), Some("0 0 24 24"));

    let style = root
        .children()
        .find(|n| n.has_tag_name("style"))
        .and_then(|n| n.text())
        .unwrap();
    assert!(style.contains("color-scheme: light dark"));
    assert!(style.contains("prefers-color-scheme: dark"));

    let paths: Vec<_> = root.children().filter(|n| n.has_tag_name("path")).collect();
    assert_eq!(paths.len(), 2);

    let first = &paths[0];
    assert_eq!(
        attribute(first, "d"),
        Some("M10 20 v-6 h4 v6 h5 v-8 h3 L12 3 L2 12 h3 v8 Z")
    );
    assert_eq!(attribute(first, "fill"), Some("currentColor"));
    assert_eq!(attribute(first, "fill-rule"), Some("evenodd"));
    assert_eq!(attribute(first, "clip-rule"), Some("evenodd"));
    assert_eq!(attribute(first, "fill-opacity"), None);
    assert_eq!(attribute(first, "stroke"), None);

    let second = &paths[1];
    assert_eq!(attribute(second, "d"), Some("M12 5.5 c1.1 0 2 0.9 2 2"));
    assert_eq!(attribute(second, "fill"), Some("#3482FF80"));
    assert_eq!(attribute(second, "fill-opacity"), Some("0.500"));
    assert_eq!(attribute(second, "fill-rule"), None);
}

#[test]
fn emitted_stroke_icon_keeps_raw_tokens() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let src = temp_dir.path().join("src");
    let out = temp_dir.path().join("out");
    setup(&src);
    convert_tree(&ConvertOptions::new(&src, &out)).expect("conversion failed");

    let text = fs::read_to_string(out.join("outlined/Outlined.Circle.svg")).unwrap();
    let doc = roxmltree::Document::parse(&text).unwrap();
    let root = doc.root_element();
    assert_eq!(attribute(&root, "viewBox"), Some("0 0 20.5 20"));

    let path = root.children().find(|n| n.has_tag_name("path")).unwrap();
    assert_eq!(attribute(&path, "d"), Some("M10 2 a8 8 0 1 1 0 16"));
    assert_eq!(attribute(&path, "fill"), Some("currentColor"));
    assert_eq!(attribute(&path, "stroke"), Some("currentColor"));
    assert_eq!(attribute(&path, "stroke-width"), Some("1.5"));
    assert_eq!(attribute(&path, "stroke-linecap"), Some("round"));
    assert_eq!(attribute(&path, "stroke-linejoin"), Some("round"));
    assert_eq!(attribute(&path, "stroke-miterlimit"), Some("4"));
}

#[test]
fn fallback_icon_uses_file_name_and_default_viewport() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let src = temp_dir.path().join("src");
    let out = temp_dir.path().join("out");
    setup(&src);
    convert_tree(&ConvertOptions::new(&src, &out)).expect("conversion failed");

    let text = fs::read_to_string(out.join("Badge.svg")).unwrap();
    let doc = roxmltree::Document::parse(&text).unwrap();
    assert_eq!(attribute(&doc.root_element(), "viewBox"), Some("0 0 24 24"));
}

#[test]
fn preserve_colors_keeps_literals() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let src = temp_dir.path().join("src");
    let out = temp_dir.path().join("out");
    setup(&src);

    let mut options = ConvertOptions::new(&src, &out);
    options.emit = EmitOptions {
        light_color: "#222222".to_string(),
        dark_color: "#DDDDDD".to_string(),
        preserve_colors: true,
    };
    convert_tree(&options).expect("conversion failed");

    let text = fs::read_to_string(out.join("filled/Home.svg")).unwrap();
    assert!(text.contains("color: #222222;"));
    assert!(text.contains("color: #DDDDDD;"));
    let doc = roxmltree::Document::parse(&text).unwrap();
    let path = doc
        .root_element()
        .children()
        .find(|n| n.has_tag_name("path"))
        .unwrap();
    assert_eq!(attribute(&path, "fill"), Some("#000000"));
}

#[test]
fn rerun_overwrites_in_place() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let src = temp_dir.path().join("src");
    let out = temp_dir.path().join("out");
    setup(&src);

    let first = convert_tree(&ConvertOptions::new(&src, &out)).unwrap();
    let second = convert_tree(&ConvertOptions::new(&src, &out)).unwrap();
    assert_eq!(first.generated, second.generated);
}

#[test]
fn custom_selection() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let src = temp_dir.path().join("src");
    let out = temp_dir.path().join("out");
    setup(&src);

    let mut options = ConvertOptions::new(&src, &out);
    options.exclude = vec!["Badge.kt".to_string()];
    let report = convert_tree(&options).unwrap();

    // The aggregator is no longer excluded and has a bare path.
    assert!(out.join("Icons.svg").exists());
    assert!(!out.join("Badge.svg").exists());
    assert_eq!(report.generated.len(), 3);
}
