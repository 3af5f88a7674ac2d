//! Icon extraction from Kotlin `ImageVector` builder sources
//!
//! The accepted subset is small:
//!
//! - icon declarations: `ImageVector.Builder(...)` (positional or named
//!   arguments) and `materialIcon(name = ...)`
//! - path blocks: `path(<header>) { <body> }` and `materialPath { <body> }`
//! - body statements: the `PathBuilder` drawing calls with literal arguments
//!
//! Parsing never fails. Whatever falls outside the subset is skipped and
//! reported as a [`Diagnostic`], and the affected attribute or command is
//! left out.
//!
//! # Example
//!
//! ```
//! use icongen::parse_source;
//!
//! let source = r#"
//!     val Check = ImageVector.Builder("Check", 24.dp, 24.dp, 24f, 24f).apply {
//!         path(fill = SolidColor(Color.Black)) {
//!             moveTo(9f, 16.17f)
//!             lineToRelative(-4.17f, -4.17f)
//!             close()
//!         }
//!     }.build()
//! "#;
//!
//! let output = parse_source(source, "Check");
//! assert_eq!(output.icons.len(), 1);
//! assert_eq!(output.icons[0].paths[0].path_data(), "M9 16.17 l-4.17 -4.17 Z");
//! ```

use crate::diagnostic::{self, Diagnostic, Severity};
use crate::lexer::{tokenize, Token, TokenKind};
use crate::model::{Color, Command, FillRule, Icon, IconSource, Number, PathRecord, Point, DEFAULT_VIEWPORT};

const BUILDER_PARAMS: &[&str] = &[
    "name",
    "defaultWidth",
    "defaultHeight",
    "viewportWidth",
    "viewportHeight",
    "tintColor",
    "tintBlendMode",
    "autoMirror",
];

const MATERIAL_ICON_PARAMS: &[&str] = &["name", "autoMirror"];

const PATH_PARAMS: &[&str] = &[
    "name",
    "fill",
    "fillAlpha",
    "stroke",
    "strokeAlpha",
    "strokeLineWidth",
    "strokeLineCap",
    "strokeLineJoin",
    "strokeLineMiter",
    "pathFillType",
];

const MATERIAL_PATH_PARAMS: &[&str] = &["fillAlpha", "strokeAlpha", "pathFillType"];

/// Icons and diagnostics extracted from one source unit
#[derive(Debug, Clone, Default)]
pub struct ParseOutput {
    /// Icons with at least one drawable path, in source order
    pub icons: Vec<Icon>,
    /// Everything that was skipped or defaulted
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    /// Check if anything in the source was ignored
    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    /// Get only the warnings
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// Log all diagnostics via tracing
    pub fn log_diagnostics(&self, file: &str) {
        diagnostic::log_diagnostics(file, &self.diagnostics);
    }
}

/// Extract every icon declared in `source`
///
/// `fallback_name` (normally the file's base name) names paths that are not
/// preceded by an icon declaration, and declarations whose name cannot be
/// read.
pub fn parse_source(source: &str, fallback_name: &str) -> ParseOutput {
    let tokens = tokenize(source);
    let mut parser = Parser {
        source,
        tokens: &tokens,
        pos: 0,
        fallback_name,
        diagnostics: Vec::new(),
    };
    let icons = parser.parse_icons();

    ParseOutput {
        icons,
        diagnostics: parser.diagnostics,
    }
}

// ============================================================================
// Arguments
// ============================================================================

/// One argument of a call: an optional `name =` and the value tokens
#[derive(Debug, Clone, Copy)]
struct Argument<'t, 'a> {
    name: Option<&'a str>,
    tokens: &'t [Token<'a>],
    offset: usize,
}

/// Arguments matched against a parameter list
struct BoundArguments<'t, 'a> {
    slots: Vec<Option<Argument<'t, 'a>>>,
    /// Named arguments with no such parameter, extra or repeated arguments
    unknown: Vec<Argument<'t, 'a>>,
}

impl<'t, 'a> BoundArguments<'t, 'a> {
    fn get(&self, index: usize) -> Option<Argument<'t, 'a>> {
        self.slots.get(index).copied().flatten()
    }
}

/// Kotlin call binding: positional arguments fill parameters in order, named
/// arguments go to their parameter.
fn bind_arguments<'t, 'a>(args: &[Argument<'t, 'a>], params: &[&str]) -> BoundArguments<'t, 'a> {
    let mut slots = vec![None; params.len()];
    let mut unknown = Vec::new();
    let mut next_positional = 0;

    for arg in args {
        let index = match arg.name {
            Some(name) => params.iter().position(|p| *p == name),
            None => {
                let index = next_positional;
                next_positional += 1;
                (index < params.len()).then_some(index)
            }
        };
        match index {
            Some(i) if slots[i].is_none() => slots[i] = Some(*arg),
            _ => unknown.push(*arg),
        }
    }

    BoundArguments { slots, unknown }
}

// ============================================================================
// Literal values
// ============================================================================

/// `12f`, `-3.5f`, `24.dp`
fn number_literal(tokens: &[Token]) -> Option<Number> {
    let tokens = match tokens {
        [rest @ .., dot, unit] if dot.is_punct('.') && unit.ident() == Some("dp") => rest,
        _ => tokens,
    };
    match tokens {
        [token] => match token.kind {
            TokenKind::Number(text) => Some(Number::new(text)),
            _ => None,
        },
        [sign, token] if sign.is_punct('-') || sign.is_punct('+') => match token.kind {
            TokenKind::Number(text) if sign.is_punct('-') => Some(Number::new(format!("-{text}"))),
            TokenKind::Number(text) => Some(Number::new(text)),
            _ => None,
        },
        _ => None,
    }
}

fn string_literal<'a>(tokens: &[Token<'a>]) -> Option<&'a str> {
    match tokens {
        [token] => match token.kind {
            TokenKind::Str(text) => Some(text),
            _ => None,
        },
        _ => None,
    }
}

fn bool_literal(tokens: &[Token]) -> Option<bool> {
    match tokens {
        [token] => match token.ident() {
            Some("true") => Some(true),
            Some("false") => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// `a.b.c` as its segments
fn dotted_reference<'a>(tokens: &[Token<'a>]) -> Option<Vec<&'a str>> {
    let mut segments = Vec::new();
    for (index, token) in tokens.iter().enumerate() {
        if index % 2 == 0 {
            segments.push(token.ident()?);
        } else if !token.is_punct('.') {
            return None;
        }
    }
    if tokens.len() % 2 == 0 {
        return None;
    }
    Some(segments)
}

/// `null`, `SolidColor(C)` or a bare color `C`
fn parse_paint(tokens: &[Token]) -> Result<Option<Color>, String> {
    match tokens {
        [token] if token.ident() == Some("null") => Ok(None),
        [head, open, inner @ .., close]
            if head.ident() == Some("SolidColor") && open.is_punct('(') && close.is_punct(')') =>
        {
            parse_color(inner).map(Some)
        }
        _ => parse_color(tokens).map(Some),
    }
}

/// `Color(0xAARRGGBB)` or a named `Color.X` constant
fn parse_color(tokens: &[Token]) -> Result<Color, String> {
    if let [head, open, value, close] = tokens {
        if head.ident() == Some("Color") && open.is_punct('(') && close.is_punct(')') {
            return match value.kind {
                TokenKind::Hex(digits) => argb_color(digits),
                _ => Err("expected an ARGB hex literal inside Color(...)".to_string()),
            };
        }
    }

    match dotted_reference(tokens) {
        Some(segments) if segments.len() >= 2 && segments[0] == "Color" => {
            let name = segments[segments.len() - 1];
            Color::from_name(name).ok_or_else(|| format!("unsupported named color `Color.{name}`"))
        }
        _ => Err("unsupported paint expression".to_string()),
    }
}

fn argb_color(digits: &str) -> Result<Color, String> {
    let digits: String = digits.chars().filter(|c| *c != '_').collect();
    if digits.len() != 8 {
        return Err(format!(
            "expected an 8-digit ARGB literal, found {} digits",
            digits.len()
        ));
    }
    u32::from_str_radix(&digits, 16)
        .map(Color::from_argb)
        .map_err(|e| format!("invalid ARGB literal: {e}"))
}

// ============================================================================
// Drawing commands
// ============================================================================

/// The `PathBuilder` calls understood in a path body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    MoveTo,
    LineTo,
    CurveTo,
    HorizontalLineTo,
    VerticalLineTo,
    QuadTo,
    ReflectiveCurveTo,
    ReflectiveQuadTo,
    ArcTo,
    Close,
}

/// Map a call name such as `lineToRelative` to its shape and relative flag
fn command_shape(name: &str) -> Option<(Shape, bool)> {
    let (base, relative) = match name.strip_suffix("Relative") {
        Some(base) => (base, true),
        None => (name, false),
    };
    let shape = match base {
        "moveTo" => Shape::MoveTo,
        "lineTo" => Shape::LineTo,
        "curveTo" => Shape::CurveTo,
        "horizontalLineTo" => Shape::HorizontalLineTo,
        "verticalLineTo" => Shape::VerticalLineTo,
        "quadTo" => Shape::QuadTo,
        "reflectiveCurveTo" => Shape::ReflectiveCurveTo,
        "reflectiveQuadTo" => Shape::ReflectiveQuadTo,
        "arcTo" => Shape::ArcTo,
        "close" if !relative => Shape::Close,
        _ => return None,
    };
    Some((shape, relative))
}

impl Shape {
    /// Parameter names of the builder call, in declaration order
    fn params(self, relative: bool) -> &'static [&'static str] {
        match (self, relative) {
            (Shape::MoveTo | Shape::LineTo, false) => &["x", "y"],
            (Shape::MoveTo | Shape::LineTo, true) => &["dx", "dy"],
            (Shape::CurveTo, false) => &["x1", "y1", "x2", "y2", "x3", "y3"],
            (Shape::CurveTo, true) => &["dx1", "dy1", "dx2", "dy2", "dx3", "dy3"],
            (Shape::HorizontalLineTo, false) => &["x"],
            (Shape::HorizontalLineTo, true) => &["dx"],
            (Shape::VerticalLineTo, false) => &["y"],
            (Shape::VerticalLineTo, true) => &["dy"],
            (Shape::QuadTo | Shape::ReflectiveCurveTo, false) => &["x1", "y1", "x2", "y2"],
            (Shape::QuadTo | Shape::ReflectiveCurveTo, true) => &["dx1", "dy1", "dx2", "dy2"],
            (Shape::ReflectiveQuadTo, false) => &["x1", "y1"],
            (Shape::ReflectiveQuadTo, true) => &["dx1", "dy1"],
            (Shape::ArcTo, false) => &[
                "horizontalEllipseRadius",
                "verticalEllipseRadius",
                "theta",
                "isMoreThanHalf",
                "isPositiveArc",
                "x1",
                "y1",
            ],
            (Shape::ArcTo, true) => &[
                "a",
                "b",
                "theta",
                "isMoreThanHalf",
                "isPositiveArc",
                "dx1",
                "dy1",
            ],
            (Shape::Close, _) => &[],
        }
    }

    /// Whether parameter `index` is a boolean flag rather than a number
    fn is_flag(self, index: usize) -> bool {
        self == Shape::ArcTo && (index == 3 || index == 4)
    }

    /// Assemble the command. `numbers` holds exactly the numeric parameters.
    fn build(self, relative: bool, numbers: Vec<Number>, flags: &[bool]) -> Command {
        let mut values = numbers.into_iter();
        let mut number = move || values.next().unwrap_or_else(|| Number::new("0"));
        let flag = |index: usize| flags.get(index).copied().unwrap_or(false);

        match self {
            Shape::MoveTo => Command::MoveTo {
                to: Point::new(number(), number()),
                relative,
            },
            Shape::LineTo => Command::LineTo {
                to: Point::new(number(), number()),
                relative,
            },
            Shape::CurveTo => Command::CurveTo {
                control1: Point::new(number(), number()),
                control2: Point::new(number(), number()),
                to: Point::new(number(), number()),
                relative,
            },
            Shape::HorizontalLineTo => Command::HorizontalLineTo {
                x: number(),
                relative,
            },
            Shape::VerticalLineTo => Command::VerticalLineTo {
                y: number(),
                relative,
            },
            Shape::QuadTo => Command::QuadTo {
                control: Point::new(number(), number()),
                to: Point::new(number(), number()),
                relative,
            },
            Shape::ReflectiveCurveTo => Command::SmoothCurveTo {
                control2: Point::new(number(), number()),
                to: Point::new(number(), number()),
                relative,
            },
            Shape::ReflectiveQuadTo => Command::SmoothQuadTo {
                to: Point::new(number(), number()),
                relative,
            },
            Shape::ArcTo => Command::ArcTo {
                radius_x: number(),
                radius_y: number(),
                rotation: number(),
                large_arc: flag(0),
                sweep: flag(1),
                to: Point::new(number(), number()),
                relative,
            },
            Shape::Close => Command::ClosePath,
        }
    }
}

// ============================================================================
// Parser
// ============================================================================

/// An icon whose paths are still being collected
struct PendingIcon {
    source: IconSource,
    paths: Vec<PathRecord>,
    offset: usize,
    declared: bool,
}

struct Parser<'t, 'a> {
    source: &'a str,
    tokens: &'t [Token<'a>],
    pos: usize,
    fallback_name: &'t str,
    diagnostics: Vec<Diagnostic>,
}

impl<'t, 'a> Parser<'t, 'a> {
    fn warn(&mut self, message: impl Into<String>, offset: usize) {
        self.diagnostics
            .push(Diagnostic::warning(message, self.source, offset));
    }

    fn info(&mut self, message: impl Into<String>, offset: usize) {
        self.diagnostics
            .push(Diagnostic::info(message, self.source, offset));
    }

    fn is_punct_at(&self, index: usize, c: char) -> bool {
        self.tokens.get(index).is_some_and(|t| t.is_punct(c))
    }

    fn ident_at(&self, index: usize) -> Option<&'a str> {
        self.tokens.get(index).and_then(|t| t.ident())
    }

    /// Top-level scan: declarations open icons, path blocks attach to the
    /// most recent one.
    fn parse_icons(&mut self) -> Vec<Icon> {
        let mut icons = Vec::new();
        let mut current: Option<PendingIcon> = None;

        while self.pos < self.tokens.len() {
            if let Some(declared) = self.icon_declaration() {
                if let Some(done) = current.take() {
                    self.finish_icon(done, &mut icons);
                }
                current = Some(declared);
                continue;
            }

            if let Some((record, offset)) = self.path_block() {
                if current.is_none() {
                    self.info(
                        format!(
                            "no icon declaration before this path; using `{}` with a 24x24 viewport",
                            self.fallback_name
                        ),
                        offset,
                    );
                    current = Some(PendingIcon {
                        source: IconSource::new(self.fallback_name),
                        paths: Vec::new(),
                        offset,
                        declared: false,
                    });
                }

                if record.commands.is_empty() {
                    self.info("path has no drawing commands; dropped", offset);
                } else if let Some(icon) = current.as_mut() {
                    icon.paths.push(record);
                }
                continue;
            }

            self.check_group();
            self.pos += 1;
        }

        if let Some(done) = current.take() {
            self.finish_icon(done, &mut icons);
        }

        icons
    }

    fn finish_icon(&mut self, pending: PendingIcon, icons: &mut Vec<Icon>) {
        if pending.paths.is_empty() {
            if pending.declared {
                self.info(
                    format!("icon `{}` has no drawable paths; skipped", pending.source.name),
                    pending.offset,
                );
            }
            return;
        }
        icons.push(Icon {
            source: pending.source,
            paths: pending.paths,
        });
    }

    /// Group attributes (transforms, clip paths) are not applied to the paths
    fn check_group(&mut self) {
        if self.ident_at(self.pos) != Some("group") || !self.is_punct_at(self.pos + 1, '(') {
            return;
        }
        if let Some((args, _)) = self.arguments(self.pos + 1) {
            if !args.is_empty() {
                let offset = self.tokens[self.pos].offset;
                self.warn("group attributes are not applied to its paths", offset);
            }
        }
    }

    /// Parse a call's argument list starting at the `(` at `open`.
    ///
    /// Returns the arguments and the index just past the closing `)`.
    fn arguments(&self, open: usize) -> Option<(Vec<Argument<'t, 'a>>, usize)> {
        let mut depth = 0usize;
        let mut start = open + 1;
        let mut args = Vec::new();

        for index in open..self.tokens.len() {
            match self.tokens[index].kind {
                TokenKind::Punct('(' | '[' | '{') => depth += 1,
                TokenKind::Punct(')' | ']' | '}') => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        args.extend(self.argument(start, index));
                        return Some((args, index + 1));
                    }
                }
                TokenKind::Punct(',') if depth == 1 => {
                    args.extend(self.argument(start, index));
                    start = index + 1;
                }
                _ => {}
            }
        }

        None
    }

    fn argument(&self, start: usize, end: usize) -> Option<Argument<'t, 'a>> {
        let tokens: &'t [Token<'a>] = self.tokens.get(start..end)?;
        let first = tokens.first()?;

        match tokens {
            [name, eq, value @ ..]
                if eq.is_punct('=') && !value.first().is_some_and(|t| t.is_punct('=')) =>
            {
                match name.ident() {
                    Some(name) => Some(Argument {
                        name: Some(name),
                        tokens: value,
                        offset: first.offset,
                    }),
                    None => Some(Argument {
                        name: None,
                        tokens,
                        offset: first.offset,
                    }),
                }
            }
            _ => Some(Argument {
                name: None,
                tokens,
                offset: first.offset,
            }),
        }
    }

    /// Index of the `}` closing the `{` at `open`
    fn matching_brace(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for index in open..self.tokens.len() {
            let token = &self.tokens[index];
            if token.is_punct('{') {
                depth += 1;
            } else if token.is_punct('}') {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(index);
                }
            }
        }
        None
    }

    fn report_unknown(&mut self, bound: &BoundArguments<'t, 'a>, context: &str) {
        for arg in &bound.unknown {
            let message = match arg.name {
                Some(name) => format!("unsupported {context} attribute `{name}`; ignored"),
                None => format!("unexpected extra argument in {context}; ignored"),
            };
            self.warn(message, arg.offset);
        }
    }

    // ------------------------------------------------------------------------
    // Icon declarations
    // ------------------------------------------------------------------------

    fn icon_declaration(&mut self) -> Option<PendingIcon> {
        let start = self.pos;
        let token = self.tokens[start];

        let (params, open, material) = match token.ident()? {
            "ImageVector"
                if self.is_punct_at(start + 1, '.')
                    && self.ident_at(start + 2) == Some("Builder")
                    && self.is_punct_at(start + 3, '(') =>
            {
                (BUILDER_PARAMS, start + 3, false)
            }
            "Builder" if self.is_punct_at(start + 1, '(') => (BUILDER_PARAMS, start + 1, false),
            "materialIcon" if self.is_punct_at(start + 1, '(') => {
                (MATERIAL_ICON_PARAMS, start + 1, true)
            }
            _ => return None,
        };

        let (args, next) = self.arguments(open)?;
        self.pos = next;

        let bound = bind_arguments(&args, params);
        self.report_unknown(&bound, "icon declaration");

        let name = self.icon_name(bound.get(0), token.offset);
        let mut source = IconSource::new(name);
        if !material {
            source.viewport_width = self.viewport_value(bound.get(3), "viewportWidth");
            source.viewport_height = self.viewport_value(bound.get(4), "viewportHeight");
        }

        Some(PendingIcon {
            source,
            paths: Vec::new(),
            offset: token.offset,
            declared: true,
        })
    }

    fn icon_name(&mut self, arg: Option<Argument<'t, 'a>>, offset: usize) -> String {
        let fallback = self.fallback_name.to_string();
        match arg {
            Some(arg) => match string_literal(arg.tokens) {
                Some(name) if !name.trim().is_empty() => name.trim().to_string(),
                _ => {
                    self.warn(
                        format!("icon name is not a string literal; using `{fallback}`"),
                        arg.offset,
                    );
                    fallback
                }
            },
            None => {
                self.info(
                    format!("icon declaration has no name; using `{fallback}`"),
                    offset,
                );
                fallback
            }
        }
    }

    fn viewport_value(&mut self, arg: Option<Argument<'t, 'a>>, param: &str) -> f64 {
        let Some(arg) = arg else {
            return DEFAULT_VIEWPORT;
        };
        match number_literal(arg.tokens).and_then(|n| n.value()) {
            Some(value) if value > 0.0 && value.is_finite() => value,
            _ => {
                self.warn(
                    format!("{param} is not a positive numeric literal; using 24"),
                    arg.offset,
                );
                DEFAULT_VIEWPORT
            }
        }
    }

    // ------------------------------------------------------------------------
    // Path blocks
    // ------------------------------------------------------------------------

    fn path_block(&mut self) -> Option<(PathRecord, usize)> {
        let start = self.pos;
        let token = self.tokens[start];

        let (params, material) = match token.ident()? {
            "path" => (PATH_PARAMS, false),
            "materialPath" => (MATERIAL_PATH_PARAMS, true),
            _ => return None,
        };

        let (args, body_open) = if self.is_punct_at(start + 1, '(') {
            self.arguments(start + 1)?
        } else {
            (Vec::new(), start + 1)
        };
        if !self.is_punct_at(body_open, '{') {
            return None;
        }
        let body_close = self.matching_brace(body_open)?;

        let mut record = PathRecord::default();
        if material {
            record.fill = Some(Color::black());
        }

        let bound = bind_arguments(&args, params);
        self.report_unknown(&bound, "path");
        self.apply_header(&mut record, &bound, params);

        record.commands = self.body_commands(body_open + 1, body_close);
        self.pos = body_close + 1;

        Some((record, token.offset))
    }

    fn apply_header(
        &mut self,
        record: &mut PathRecord,
        bound: &BoundArguments<'t, 'a>,
        params: &[&str],
    ) {
        for (index, param) in params.iter().enumerate() {
            let Some(arg) = bound.get(index) else {
                continue;
            };
            match *param {
                "fill" => record.fill = self.paint(arg, param),
                "stroke" => record.stroke = self.paint(arg, param),
                "fillAlpha" => record.fill_alpha = self.alpha(arg, param),
                "strokeAlpha" => record.stroke_alpha = self.alpha(arg, param),
                "strokeLineWidth" => record.stroke_width = self.raw_number(arg, param),
                "strokeLineMiter" => record.stroke_miter = self.raw_number(arg, param),
                "strokeLineCap" => record.stroke_line_cap = self.enum_segment(arg, param),
                "strokeLineJoin" => record.stroke_line_join = self.enum_segment(arg, param),
                "pathFillType" => {
                    if let Some(rule) = self.fill_rule(arg) {
                        record.fill_rule = rule;
                    }
                }
                _ => {}
            }
        }
    }

    fn paint(&mut self, arg: Argument<'t, 'a>, param: &str) -> Option<Color> {
        match parse_paint(arg.tokens) {
            Ok(color) => color,
            Err(reason) => {
                self.warn(format!("{param}: {reason}; ignored"), arg.offset);
                None
            }
        }
    }

    fn alpha(&mut self, arg: Argument<'t, 'a>, param: &str) -> Option<f32> {
        match number_literal(arg.tokens).and_then(|n| n.value()) {
            Some(value) if (0.0..=1.0).contains(&value) => Some(value as f32),
            Some(value) => {
                self.warn(
                    format!("{param} {value} is outside 0..1; clamped"),
                    arg.offset,
                );
                Some(value.clamp(0.0, 1.0) as f32)
            }
            None => {
                self.warn(format!("{param} is not a numeric literal; ignored"), arg.offset);
                None
            }
        }
    }

    fn raw_number(&mut self, arg: Argument<'t, 'a>, param: &str) -> Option<String> {
        match number_literal(arg.tokens) {
            Some(number) => Some(number.as_str().to_string()),
            None => {
                self.warn(format!("{param} is not a numeric literal; ignored"), arg.offset);
                None
            }
        }
    }

    /// `StrokeCap.Round` keeps `Round`
    fn enum_segment(&mut self, arg: Argument<'t, 'a>, param: &str) -> Option<String> {
        match dotted_reference(arg.tokens).and_then(|segments| segments.last().copied()) {
            Some(segment) => Some(segment.to_string()),
            None => {
                self.warn(
                    format!("{param} is not an enum reference; ignored"),
                    arg.offset,
                );
                None
            }
        }
    }

    /// Both `PathFillType.EvenOdd` and a bare imported `EvenOdd` are accepted
    fn fill_rule(&mut self, arg: Argument<'t, 'a>) -> Option<FillRule> {
        let segment = dotted_reference(arg.tokens).and_then(|segments| segments.last().copied());
        match segment {
            Some("EvenOdd") => Some(FillRule::EvenOdd),
            Some("NonZero") => Some(FillRule::NonZero),
            _ => {
                self.warn("unsupported pathFillType; using NonZero", arg.offset);
                None
            }
        }
    }

    // ------------------------------------------------------------------------
    // Path bodies
    // ------------------------------------------------------------------------

    /// Drawing commands between tokens `start` and `end` (exclusive)
    fn body_commands(&mut self, start: usize, end: usize) -> Vec<Command> {
        let mut commands = Vec::new();
        let mut index = start;

        while index < end {
            let token = self.tokens[index];

            if token.is_punct('{') {
                let close = self.matching_brace(index).unwrap_or(end);
                self.warn("nested block inside path body skipped", token.offset);
                index = close + 1;
                continue;
            }

            let Some(name) = token.ident() else {
                index += 1;
                continue;
            };
            if !self.is_punct_at(index + 1, '(') {
                index += 1;
                continue;
            }
            let Some((args, next)) = self.arguments(index + 1) else {
                break;
            };
            if next > end {
                break;
            }

            match command_shape(name) {
                Some((shape, relative)) => {
                    if let Some(command) = self.command(shape, relative, name, &args, token.offset) {
                        commands.push(command);
                    }
                }
                None => self.warn(
                    format!("unsupported call `{name}` in path body; skipped"),
                    token.offset,
                ),
            }
            index = next;
        }

        commands
    }

    fn command(
        &mut self,
        shape: Shape,
        relative: bool,
        name: &str,
        args: &[Argument<'t, 'a>],
        offset: usize,
    ) -> Option<Command> {
        let params = shape.params(relative);
        let bound = bind_arguments(args, params);
        if !bound.unknown.is_empty() {
            self.warn(
                format!(
                    "`{name}` takes {} arguments; command skipped",
                    params.len()
                ),
                offset,
            );
            return None;
        }

        let mut numbers = Vec::with_capacity(params.len());
        let mut flags = Vec::new();
        for (index, param) in params.iter().enumerate() {
            let Some(arg) = bound.get(index) else {
                self.warn(
                    format!("`{name}` is missing argument `{param}`; command skipped"),
                    offset,
                );
                return None;
            };

            if shape.is_flag(index) {
                match bool_literal(arg.tokens) {
                    Some(flag) => flags.push(flag),
                    None => {
                        self.warn(
                            format!("argument `{param}` of `{name}` is not a boolean literal; command skipped"),
                            arg.offset,
                        );
                        return None;
                    }
                }
            } else {
                match number_literal(arg.tokens) {
                    Some(number) => numbers.push(number),
                    None => {
                        self.warn(
                            format!("argument `{param}` of `{name}` is not a numeric literal; command skipped"),
                            arg.offset,
                        );
                        return None;
                    }
                }
            }
        }

        Some(shape.build(relative, numbers, &flags))
    }
}
