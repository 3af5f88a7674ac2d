//! Batch conversion of a source tree
//!
//! Files are processed one at a time in directory-walk order. A file that
//! cannot be read or written only loses its own output; the run continues.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::emit::{render_svg, EmitOptions};
use crate::error::IconGenError;
use crate::parser::parse_source;

/// Source file extensions scanned by default
pub const DEFAULT_EXTENSIONS: &[&str] = &["kt"];

/// File names skipped by default: the aggregator that only lists the icons
pub const DEFAULT_EXCLUDE: &[&str] = &["Icons.kt"];

/// What to convert and how
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Root of the source tree
    pub src: PathBuf,
    /// Root of the output tree, created if missing
    pub out: PathBuf,
    pub emit: EmitOptions,
    /// Extensions (without the dot) of files to scan
    pub extensions: Vec<String>,
    /// File names to skip
    pub exclude: Vec<String>,
}

impl ConvertOptions {
    pub fn new(src: impl Into<PathBuf>, out: impl Into<PathBuf>) -> Self {
        Self {
            src: src.into(),
            out: out.into(),
            emit: EmitOptions::default(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            exclude: DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Outcome of a conversion run
#[derive(Debug, Clone, Default)]
pub struct ConvertReport {
    /// SVG files written, in processing order
    pub generated: Vec<PathBuf>,
    /// Source files that matched the selection
    pub files_scanned: usize,
    /// Source files that yielded no icon
    pub files_without_icons: usize,
    /// Files that could not be read or written
    pub failures: usize,
    /// Parser warnings across all files
    pub warnings: usize,
}

/// Convert every selected file under `options.src` into SVGs under `options.out`
pub fn convert_tree(options: &ConvertOptions) -> Result<ConvertReport, IconGenError> {
    if !options.src.is_dir() {
        return Err(IconGenError::NotADirectory(options.src.clone()));
    }
    fs::create_dir_all(&options.out).map_err(|e| IconGenError::Io {
        path: options.out.clone(),
        source: e,
    })?;

    let sources = collect_sources(&options.src, &options.extensions, &options.exclude)?;
    let mut report = ConvertReport::default();
    let mut written = HashSet::new();

    for source in &sources {
        report.files_scanned += 1;
        convert_file(source, options, &mut report, &mut written)?;
    }

    info!(
        generated = report.generated.len(),
        scanned = report.files_scanned,
        failures = report.failures,
        warnings = report.warnings,
        "Conversion finished"
    );

    Ok(report)
}

/// Files under `src` with a selected extension and a non-excluded name,
/// in walk order
pub fn collect_sources(
    src: &Path,
    extensions: &[String],
    exclude: &[String],
) -> Result<Vec<PathBuf>, IconGenError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(IconGenError::WalkDir {
                    path: src.to_owned(),
                    source: e,
                })
            }
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let selected = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|e| e == ext));
        if !selected {
            continue;
        }

        let excluded = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| exclude.iter().any(|e| e == name));
        if excluded {
            debug!("Excluded {}", path.display());
            continue;
        }

        files.push(path.to_owned());
    }

    Ok(files)
}

fn convert_file(
    path: &Path,
    options: &ConvertOptions,
    report: &mut ConvertReport,
    written: &mut HashSet<PathBuf>,
) -> Result<(), IconGenError> {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            report.failures += 1;
            return Ok(());
        }
    };

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("icon");
    let output = parse_source(&source, stem);
    output.log_diagnostics(&path.display().to_string());
    report.warnings += output.warnings().count();

    if output.icons.is_empty() {
        debug!("No icons in {}", path.display());
        report.files_without_icons += 1;
        return Ok(());
    }

    let relative_dir = path
        .strip_prefix(&options.src)?
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let out_dir = options.out.join(relative_dir);

    if let Err(e) = fs::create_dir_all(&out_dir) {
        warn!("Failed to create {}: {}", out_dir.display(), e);
        report.failures += 1;
        return Ok(());
    }

    for icon in &output.icons {
        let file_name = format!("{}.svg", output_stem(&icon.source.name, stem));
        let target = out_dir.join(file_name);

        if !written.insert(target.clone()) {
            warn!(
                "{} is generated more than once; the last icon wins",
                target.display()
            );
        }

        let svg = render_svg(icon, &options.emit);
        match fs::write(&target, svg) {
            Ok(()) => {
                debug!(
                    icon = %icon.source.name,
                    paths = icon.paths.len(),
                    "Wrote {}",
                    target.display()
                );
                report.generated.push(target);
            }
            Err(e) => {
                warn!("Failed to write {}: {}", target.display(), e);
                report.failures += 1;
            }
        }
    }

    Ok(())
}

/// File stem for an icon name that cannot leave the output directory
fn output_stem(name: &str, fallback: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        fallback.to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_output_stem() {
        assert_eq!(output_stem("Filled.Home", "f"), "Filled.Home");
        assert_eq!(output_stem("a/b\\c", "f"), "a_b_c");
        assert_eq!(output_stem("..", "file"), "file");
        assert_eq!(output_stem("  ", "file"), "file");
    }

    #[test]
    fn test_collect_sources_filters_and_sorts() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let root = temp_dir.path();
        fs::create_dir_all(root.join("outlined")).unwrap();
        fs::write(root.join("b.kt"), "").unwrap();
        fs::write(root.join("a.kt"), "").unwrap();
        fs::write(root.join("Icons.kt"), "").unwrap();
        fs::write(root.join("notes.md"), "").unwrap();
        fs::write(root.join("outlined/c.kt"), "").unwrap();

        let files = collect_sources(
            root,
            &["kt".to_string()],
            &["Icons.kt".to_string()],
        )
        .unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, ["a.kt", "b.kt", "outlined/c.kt"]);
    }

    #[test]
    fn test_missing_source_directory() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let options = ConvertOptions::new(temp_dir.path().join("missing"), temp_dir.path().join("out"));
        let err = convert_tree(&options).unwrap_err();
        assert!(matches!(err, IconGenError::NotADirectory(_)));
        assert!(!temp_dir.path().join("out").exists());
    }
}
