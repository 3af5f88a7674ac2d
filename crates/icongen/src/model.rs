//! Icon data model
//!
//! Everything here is produced once by the parser and then only read by the
//! emitter. Coordinates keep the literal text they were written with so the
//! emitted path data reproduces the source numbers exactly.

use std::fmt;

/// Viewport size used when a source does not declare one
pub const DEFAULT_VIEWPORT: f64 = 24.0;

/// A numeric literal as written in the source, minus any Kotlin type suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Number(String);

impl Number {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The literal text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value, if the text parses as a float
    pub fn value(&self) -> Option<f64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A coordinate pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point {
    pub x: Number,
    pub y: Number,
}

impl Point {
    pub fn new(x: Number, y: Number) -> Self {
        Self { x, y }
    }
}

/// One drawing instruction of a path
///
/// `relative` selects the lowercase SVG command letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo {
        to: Point,
        relative: bool,
    },
    LineTo {
        to: Point,
        relative: bool,
    },
    /// Cubic bezier
    CurveTo {
        control1: Point,
        control2: Point,
        to: Point,
        relative: bool,
    },
    /// Quadratic bezier
    QuadTo {
        control: Point,
        to: Point,
        relative: bool,
    },
    /// Cubic bezier whose first control point mirrors the previous one
    SmoothCurveTo {
        control2: Point,
        to: Point,
        relative: bool,
    },
    /// Quadratic bezier whose control point mirrors the previous one
    SmoothQuadTo {
        to: Point,
        relative: bool,
    },
    HorizontalLineTo {
        x: Number,
        relative: bool,
    },
    VerticalLineTo {
        y: Number,
        relative: bool,
    },
    /// Elliptical arc
    ArcTo {
        radius_x: Number,
        radius_y: Number,
        rotation: Number,
        large_arc: bool,
        sweep: bool,
        to: Point,
        relative: bool,
    },
    ClosePath,
}

impl Command {
    /// SVG path command letter
    pub fn letter(&self) -> char {
        let (upper, relative) = match self {
            Command::MoveTo { relative, .. } => ('M', *relative),
            Command::LineTo { relative, .. } => ('L', *relative),
            Command::CurveTo { relative, .. } => ('C', *relative),
            Command::QuadTo { relative, .. } => ('Q', *relative),
            Command::SmoothCurveTo { relative, .. } => ('S', *relative),
            Command::SmoothQuadTo { relative, .. } => ('T', *relative),
            Command::HorizontalLineTo { relative, .. } => ('H', *relative),
            Command::VerticalLineTo { relative, .. } => ('V', *relative),
            Command::ArcTo { relative, .. } => ('A', *relative),
            Command::ClosePath => return 'Z',
        };
        if relative {
            upper.to_ascii_lowercase()
        } else {
            upper
        }
    }

    /// Argument tokens in SVG order
    fn arguments(&self) -> Vec<&str> {
        fn point(p: &Point) -> [&str; 2] {
            [p.x.as_str(), p.y.as_str()]
        }
        fn flag(b: bool) -> &'static str {
            if b {
                "1"
            } else {
                "0"
            }
        }

        match self {
            Command::MoveTo { to, .. }
            | Command::LineTo { to, .. }
            | Command::SmoothQuadTo { to, .. } => point(to).to_vec(),
            Command::CurveTo {
                control1,
                control2,
                to,
                ..
            } => [point(control1), point(control2), point(to)].concat(),
            Command::QuadTo { control, to, .. } => [point(control), point(to)].concat(),
            Command::SmoothCurveTo { control2, to, .. } => [point(control2), point(to)].concat(),
            Command::HorizontalLineTo { x, .. } => vec![x.as_str()],
            Command::VerticalLineTo { y, .. } => vec![y.as_str()],
            Command::ArcTo {
                radius_x,
                radius_y,
                rotation,
                large_arc,
                sweep,
                to,
                ..
            } => {
                let mut args = vec![
                    radius_x.as_str(),
                    radius_y.as_str(),
                    rotation.as_str(),
                    flag(*large_arc),
                    flag(*sweep),
                ];
                args.extend(point(to));
                args
            }
            Command::ClosePath => Vec::new(),
        }
    }
}

impl fmt::Display for Command {
    /// Letter immediately followed by space separated arguments, e.g. `M12 2.5`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter(), self.arguments().join(" "))
    }
}

/// Fill rule of a path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

/// A paint color extracted from a path header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Color {
    /// Explicitly transparent, emitted as `none`
    None,
    /// `#RRGGBB` or `#RRGGBBAA`
    Hex(String),
}

impl Color {
    pub fn white() -> Self {
        Color::Hex("#FFFFFF".to_string())
    }

    pub fn black() -> Self {
        Color::Hex("#000000".to_string())
    }

    /// Map a named `Color.X` constant. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "White" => Some(Color::white()),
            "Black" => Some(Color::black()),
            "Transparent" => Some(Color::None),
            _ => None,
        }
    }

    /// Map a packed `0xAARRGGBB` value. Opaque colors drop the alpha byte.
    pub fn from_argb(argb: u32) -> Self {
        let alpha = argb >> 24;
        let rgb = argb & 0x00FF_FFFF;
        if alpha == 0xFF {
            Color::Hex(format!("#{:06X}", rgb))
        } else {
            Color::Hex(format!("#{:06X}{:02X}", rgb, alpha))
        }
    }

    /// CSS text of the color
    pub fn as_css(&self) -> &str {
        match self {
            Color::None => "none",
            Color::Hex(hex) => hex,
        }
    }

    /// Pure black or pure white, the colors that follow the theme by default
    pub fn is_monochrome(&self) -> bool {
        match self {
            Color::None => false,
            Color::Hex(hex) => {
                hex.eq_ignore_ascii_case("#FFFFFF") || hex.eq_ignore_ascii_case("#000000")
            }
        }
    }
}

/// Name and viewport of one icon
#[derive(Debug, Clone, PartialEq)]
pub struct IconSource {
    pub name: String,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl IconSource {
    /// Icon with the default 24x24 viewport
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            viewport_width: DEFAULT_VIEWPORT,
            viewport_height: DEFAULT_VIEWPORT,
        }
    }
}

/// One drawn path of an icon
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathRecord {
    pub commands: Vec<Command>,
    pub fill_rule: FillRule,
    /// Absent means the path inherits the current color
    pub fill: Option<Color>,
    pub fill_alpha: Option<f32>,
    pub stroke: Option<Color>,
    /// Raw numeric text
    pub stroke_width: Option<String>,
    pub stroke_alpha: Option<f32>,
    pub stroke_line_cap: Option<String>,
    pub stroke_line_join: Option<String>,
    /// Raw numeric text
    pub stroke_miter: Option<String>,
}

impl PathRecord {
    /// SVG `d` attribute value
    pub fn path_data(&self) -> String {
        self.commands
            .iter()
            .map(|command| command.to_string())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }
}

/// An icon with at least one non-empty path
#[derive(Debug, Clone, PartialEq)]
pub struct Icon {
    pub source: IconSource,
    pub paths: Vec<PathRecord>,
}
