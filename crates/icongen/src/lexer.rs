//! Tokenizer for the Kotlin subset used by icon sources
//!
//! Only the lexical shapes that matter for icon extraction are distinguished:
//! identifiers, decimal and hex literals, strings and single-character
//! punctuation. Whitespace and comments are dropped. Anything else becomes a
//! punctuation token, so tokenizing never fails.

use nom::{
    branch::alt,
    bytes::complete::{escaped, is_not, tag, tag_no_case, take_until, take_while1},
    character::complete::{alpha1, alphanumeric1, anychar, char, digit1, multispace1, not_line_ending, one_of},
    combinator::{map, opt, recognize, value},
    multi::many0,
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

/// Kind and payload of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    Ident(&'a str),
    /// Decimal literal without its type suffix (`24f` → `24`)
    Number(&'a str),
    /// Hex digits of a `0x` literal, underscores included
    Hex(&'a str),
    /// String contents without quotes, escapes left as written
    Str(&'a str),
    Punct(char),
}

/// A token and its byte offset in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub offset: usize,
}

impl<'a> Token<'a> {
    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct(c)
    }

    pub fn ident(&self) -> Option<&'a str> {
        match self.kind {
            TokenKind::Ident(name) => Some(name),
            _ => None,
        }
    }
}

/// Split source text into tokens
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = source;

    loop {
        if let Ok((after, _)) = trivia(rest) {
            rest = after;
        }
        if rest.is_empty() {
            break;
        }

        let offset = source.len() - rest.len();
        match token(rest) {
            Ok((after, kind)) => {
                tokens.push(Token { kind, offset });
                rest = after;
            }
            Err(_) => break,
        }
    }

    tokens
}

/// Whitespace, line comments and block comments
fn trivia(input: &str) -> IResult<&str, ()> {
    value(
        (),
        many0(alt((
            value((), multispace1),
            value((), preceded(tag("//"), not_line_ending)),
            value((), delimited(tag("/*"), take_until("*/"), tag("*/"))),
        ))),
    )(input)
}

fn token(input: &str) -> IResult<&str, TokenKind<'_>> {
    alt((
        map(hex_literal, TokenKind::Hex),
        map(number_literal, TokenKind::Number),
        map(identifier, TokenKind::Ident),
        map(string_literal, TokenKind::Str),
        map(anychar, TokenKind::Punct),
    ))(input)
}

/// `0xFF3482FF`, optionally with an `L`, `u` or `uL` suffix
fn hex_literal(input: &str) -> IResult<&str, &str> {
    terminated(
        preceded(
            tag_no_case("0x"),
            take_while1(|c: char| c.is_ascii_hexdigit() || c == '_'),
        ),
        opt(alt((tag("uL"), tag("UL"), tag("u"), tag("U"), tag("L")))),
    )(input)
}

/// Decimal literal. A `.` only belongs to the number when a digit follows,
/// so `24.dp` lexes as `24`, `.`, `dp`.
fn number_literal(input: &str) -> IResult<&str, &str> {
    let fraction = pair(char('.'), digit1);
    let exponent = tuple((one_of("eE"), opt(one_of("+-")), digit1));

    terminated(
        recognize(tuple((
            alt((
                recognize(pair(digit1, opt(fraction))),
                recognize(pair(char('.'), digit1)),
            )),
            opt(exponent),
        ))),
        opt(one_of("fFdDL")),
    )(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)
}

fn string_literal(input: &str) -> IResult<&str, &str> {
    delimited(
        char('"'),
        map(opt(escaped(is_not("\\\""), '\\', anychar)), |s| {
            s.unwrap_or("")
        }),
        char('"'),
    )(input)
}
