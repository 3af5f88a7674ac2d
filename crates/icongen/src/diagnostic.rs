//! Parse diagnostics
//!
//! The extractor is best-effort: constructs it does not understand are
//! skipped and reported here instead of failing the file.

use std::fmt;

use tracing::debug;

/// Severity level for a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Something in the source was ignored (unsupported call, bad literal)
    Warning,
    /// A default was applied (fallback name, dropped empty path)
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A located message produced while extracting icons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// Source text near the location
    pub fragment: String,
}

impl Diagnostic {
    /// Build a diagnostic located at byte `offset` of `source`
    pub fn at(severity: Severity, message: impl Into<String>, source: &str, offset: usize) -> Self {
        let (line, column, fragment) = calculate_position(source, offset);
        Self {
            severity,
            message: message.into(),
            line,
            column,
            fragment,
        }
    }

    pub fn warning(message: impl Into<String>, source: &str, offset: usize) -> Self {
        Self::at(Severity::Warning, message, source, offset)
    }

    pub fn info(message: impl Into<String>, source: &str, offset: usize) -> Self {
        Self::at(Severity::Info, message, source, offset)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}:{}]: {}",
            self.severity, self.line, self.column, self.message
        )?;
        if !self.fragment.is_empty() {
            write!(f, "\n  Near: \"{}\"", self.fragment)?;
        }
        Ok(())
    }
}

/// Log diagnostics via tracing at DEBUG level
pub fn log_diagnostics(file: &str, diagnostics: &[Diagnostic]) {
    for diag in diagnostics {
        debug!(
            file,
            severity = %diag.severity,
            line = diag.line,
            column = diag.column,
            message = %diag.message,
            near = %diag.fragment,
            "icon source diagnostic"
        );
    }
}

/// Line, column and a short preview for a byte offset
fn calculate_position(source: &str, offset: usize) -> (usize, usize, String) {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    let consumed = &source[..offset];

    let line = consumed.matches('\n').count() + 1;
    let column = consumed
        .rfind('\n')
        .map(|pos| offset - pos)
        .unwrap_or(offset + 1);

    let preview: String = source[offset..]
        .chars()
        .take_while(|c| *c != '\n')
        .take(30)
        .collect();
    (line, column, preview.trim_end().to_string())
}
