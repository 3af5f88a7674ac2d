//! Compose icon to SVG conversion
//!
//! Reads Kotlin sources that declare icons with the `ImageVector` builder DSL
//! and renders each icon as a standalone, theme-aware SVG document.
//!
//! # Example
//!
//! ```ignore
//! use icongen::{convert_tree, ConvertOptions};
//!
//! let options = ConvertOptions::new("icons/src", "docs/icons");
//! let report = convert_tree(&options)?;
//! println!("Generated {} SVG files", report.generated.len());
//! ```

pub mod convert;
pub mod diagnostic;
pub mod emit;
mod error;
pub mod lexer;
pub mod model;
pub mod parser;

pub use convert::{convert_tree, ConvertOptions, ConvertReport};
pub use diagnostic::{Diagnostic, Severity};
pub use emit::{render_svg, EmitOptions};
pub use error::IconGenError;
pub use model::{Color, Command, FillRule, Icon, IconSource, PathRecord};
pub use parser::{parse_source, ParseOutput};
