use ufo_core::errors::{ErrorInfo, UfoError};

use crate::ast::{ColorExpr, ColorIndex, ColorTerm};
use crate::lexer::{tokenize, Token, TokenKind};

/// Parses a color-structure string and checks its legs against `num_legs`.
///
/// Grammar errors surface as [`UfoError::ColorParse`], legs above `num_legs`
/// as [`UfoError::ColorIndexOutOfRange`].
pub fn parse(raw: &str, num_legs: usize) -> Result<ColorExpr, UfoError> {
    let expr = parse_expr(raw)?;
    expr.check_legs(num_legs)?;
    Ok(expr)
}

/// Parses a color-structure string without any leg bound.
pub fn parse_expr(raw: &str) -> Result<ColorExpr, UfoError> {
    let tokens = tokenize(raw)?;
    let mut parser = Parser {
        raw,
        tokens: &tokens,
        pos: 0,
    };
    let mut terms = vec![parser.term()?];
    while parser.eat(TokenKind::Star) {
        terms.push(parser.term()?);
    }
    if let Some(token) = parser.peek() {
        return Err(parse_error(
            raw,
            token.offset,
            format!("expected `*` or end of input, found {}", token.kind.describe()),
        ));
    }
    ColorExpr::from_terms(terms).ok_or_else(|| parse_error(raw, 0, "empty color expression"))
}

pub(crate) fn parse_error(raw: &str, offset: usize, message: impl Into<String>) -> UfoError {
    UfoError::ColorParse(
        ErrorInfo::new("color-parse", message)
            .with_context("expression", raw)
            .with_context("offset", offset),
    )
}

/// Number of index slots a tensor accepts.
#[derive(Debug, Clone, Copy)]
enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == *n,
            Arity::AtLeast(n) => count >= *n,
        }
    }

    fn describe(&self) -> String {
        match self {
            Arity::Exact(n) => format!("exactly {n}"),
            Arity::AtLeast(n) => format!("at least {n}"),
        }
    }
}

fn tensor_arity(name: &str) -> Option<Arity> {
    match name {
        "Identity" => Some(Arity::Exact(2)),
        "T" => Some(Arity::AtLeast(3)),
        "f" | "d" | "Epsilon" | "EpsilonBar" => Some(Arity::Exact(3)),
        _ => None,
    }
}

struct Parser<'a> {
    raw: &'a str,
    tokens: &'a [Token<'a>],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn eat(&mut self, kind: TokenKind<'a>) -> bool {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn end_offset(&self) -> usize {
        self.raw.len()
    }

    fn expect(&mut self, kind: TokenKind<'a>, what: &str) -> Result<Token<'a>, UfoError> {
        match self.bump() {
            Some(token) if token.kind == kind => Ok(token),
            Some(token) => Err(parse_error(
                self.raw,
                token.offset,
                format!("expected {what}, found {}", token.kind.describe()),
            )),
            None => Err(parse_error(
                self.raw,
                self.end_offset(),
                format!("expected {what}, found end of input"),
            )),
        }
    }

    fn term(&mut self) -> Result<ColorTerm, UfoError> {
        let token = match self.bump() {
            Some(token) => token,
            None => {
                return Err(parse_error(
                    self.raw,
                    self.end_offset(),
                    "expected color term, found end of input",
                ))
            }
        };
        match token.kind {
            TokenKind::Int(1) => Ok(ColorTerm::Unit),
            TokenKind::Ident(name) => {
                let arity = tensor_arity(name).ok_or_else(|| {
                    parse_error(
                        self.raw,
                        token.offset,
                        format!("unknown color tensor `{name}`"),
                    )
                })?;
                let indices = self.arguments()?;
                if !arity.accepts(indices.len()) {
                    return Err(UfoError::ColorParse(
                        ErrorInfo::new(
                            "color-arity",
                            format!(
                                "`{name}` takes {} indices, found {}",
                                arity.describe(),
                                indices.len()
                            ),
                        )
                        .with_context("expression", self.raw)
                        .with_context("offset", token.offset),
                    ));
                }
                Ok(build_term(name, indices))
            }
            other => Err(parse_error(
                self.raw,
                token.offset,
                format!("expected color term, found {}", other.describe()),
            )),
        }
    }

    fn arguments(&mut self) -> Result<Vec<ColorIndex>, UfoError> {
        self.expect(TokenKind::LParen, "`(`")?;
        let mut indices = vec![self.index()?];
        while self.eat(TokenKind::Comma) {
            indices.push(self.index()?);
        }
        self.expect(TokenKind::RParen, "`,` or `)`")?;
        Ok(indices)
    }

    fn index(&mut self) -> Result<ColorIndex, UfoError> {
        match self.bump() {
            Some(Token {
                kind: TokenKind::Int(value),
                offset,
            }) => i32::try_from(value)
                .ok()
                .and_then(ColorIndex::new)
                .ok_or_else(|| {
                    parse_error(
                        self.raw,
                        offset,
                        format!("invalid color index `{value}`"),
                    )
                }),
            Some(token) => Err(parse_error(
                self.raw,
                token.offset,
                format!("expected color index, found {}", token.kind.describe()),
            )),
            None => Err(parse_error(
                self.raw,
                self.end_offset(),
                "expected color index, found end of input",
            )),
        }
    }
}

fn build_term(name: &str, indices: Vec<ColorIndex>) -> ColorTerm {
    let triple = |indices: &[ColorIndex]| [indices[0], indices[1], indices[2]];
    match name {
        "Identity" => ColorTerm::Identity([indices[0], indices[1]]),
        "f" => ColorTerm::StructureF(triple(&indices)),
        "d" => ColorTerm::StructureD(triple(&indices)),
        "Epsilon" => ColorTerm::Epsilon(triple(&indices)),
        "EpsilonBar" => ColorTerm::EpsilonBar(triple(&indices)),
        _ => ColorTerm::Generator(indices),
    }
}
