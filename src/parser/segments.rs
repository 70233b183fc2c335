//! Segment scanner: splits an identifier into dotted segments.
//!
//! Segments are produced one at a time so the builder can stop at the first
//! segment that fails to resolve. A syntax problem ends the scan: the
//! problem is yielded as an `Err` and nothing follows it.

use super::lexer::{Token, TokenKind, tokenize};
use crate::base::{TextRange, fits_text_size, text_range};
use crate::diagnostics::ErrorCode;
use crate::node::{DEFAULT_VALUE_KEYWORD, IdentifierNode};

/// One `name@default[suffix]` segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Segment<'a> {
    pub name: &'a str,
    /// Range of the name, including a `@default` suffix.
    pub range: TextRange,
    pub default_value_access: bool,
    pub suffix: Option<Suffix<'a>>,
}

/// Bracketed suffix of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Suffix<'a> {
    Index { value: u32, range: TextRange },
    /// Qualifier text without quotes.
    Qualifier { value: &'a str, range: TextRange },
}

/// Malformed identifier text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SyntaxIssue {
    pub code: ErrorCode,
    pub message: String,
    pub range: TextRange,
}

impl SyntaxIssue {
    fn new(code: ErrorCode, message: impl Into<String>, range: TextRange) -> Self {
        Self {
            code,
            message: message.into(),
            range,
        }
    }

    pub fn into_node(self) -> IdentifierNode {
        IdentifierNode::new_invalid(self.code, self.message, self.range)
    }
}

pub(crate) struct SegmentScanner<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    end: usize,
    started: bool,
    done: bool,
}

impl<'a> SegmentScanner<'a> {
    pub fn new(input: &'a str) -> Self {
        // Offsets past u32::MAX have no range; such input is rejected unscanned
        let tokens = if fits_text_size(input.len()) {
            tokenize(input)
        } else {
            Vec::new()
        };
        Self {
            tokens,
            pos: 0,
            end: input.len(),
            started: false,
            done: false,
        }
    }

    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).cloned()?;
        self.pos += 1;
        Some(token)
    }

    fn at_kind(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    fn end_range(&self) -> TextRange {
        text_range(self.end, self.end)
    }

    fn segment(&mut self) -> Result<Segment<'a>, SyntaxIssue> {
        let name = match self.bump() {
            Some(token) if token.kind == TokenKind::Ident => token,
            Some(token) => return Err(unexpected_at_segment_start(&token)),
            None => {
                return Err(SyntaxIssue::new(
                    ErrorCode::E0103,
                    "Missing identifier at end of input",
                    self.end_range(),
                ));
            }
        };

        let mut range = name.range;
        let mut default_value_access = false;
        if self.at_kind(TokenKind::At) {
            let at = self.bump().map(|t| t.range).unwrap_or(range);
            match self.bump() {
                Some(keyword)
                    if keyword.kind == TokenKind::Ident && keyword.text == DEFAULT_VALUE_KEYWORD =>
                {
                    range = range.cover(keyword.range);
                    default_value_access = true;
                }
                Some(other) => {
                    return Err(SyntaxIssue::new(
                        ErrorCode::E0106,
                        format!(
                            "Expected '{}' after '@' but found '{}'",
                            DEFAULT_VALUE_KEYWORD, other.text
                        ),
                        at.cover(other.range),
                    ));
                }
                None => {
                    return Err(SyntaxIssue::new(
                        ErrorCode::E0106,
                        format!("Expected '{}' after '@'", DEFAULT_VALUE_KEYWORD),
                        at,
                    ));
                }
            }
        }

        let suffix = if self.at_kind(TokenKind::LBracket) {
            Some(self.suffix()?)
        } else {
            None
        };

        Ok(Segment {
            name: name.text,
            range,
            default_value_access,
            suffix,
        })
    }

    fn suffix(&mut self) -> Result<Suffix<'a>, SyntaxIssue> {
        let Some(open) = self.bump() else {
            return Err(SyntaxIssue::new(
                ErrorCode::E0104,
                "Expected '['",
                self.end_range(),
            ));
        };

        let content = self.bump();
        let value = match content {
            Some(token) if token.kind == TokenKind::Integer => match token.text.parse::<u32>() {
                Ok(index) => SuffixValue::Index(index),
                Err(_) => {
                    return Err(SyntaxIssue::new(
                        ErrorCode::E0105,
                        format!("Index '{}' is too large", token.text),
                        token.range,
                    ));
                }
            },
            Some(token) if token.kind == TokenKind::String => {
                SuffixValue::Qualifier(&token.text[1..token.text.len() - 1])
            }
            Some(token) if token.kind == TokenKind::UnterminatedString => {
                return Err(SyntaxIssue::new(
                    ErrorCode::E0104,
                    "Unclosed qualifier string",
                    open.range.cover(token.range),
                ));
            }
            Some(token) if token.kind == TokenKind::Minus => {
                let range = match self.peek() {
                    Some(next) if next.kind == TokenKind::Integer => token.range.cover(next.range),
                    _ => token.range,
                };
                return Err(SyntaxIssue::new(
                    ErrorCode::E0105,
                    "Index must not be negative",
                    range,
                ));
            }
            Some(token) if token.kind == TokenKind::RBracket => {
                return Err(SyntaxIssue::new(
                    ErrorCode::E0105,
                    "Missing index or qualifier in '[]'",
                    open.range.cover(token.range),
                ));
            }
            Some(token) if token.kind == TokenKind::Error => return Err(invalid_character(&token)),
            Some(token) => {
                return Err(SyntaxIssue::new(
                    ErrorCode::E0105,
                    format!(
                        "Index must be a non-negative integer but found '{}'",
                        token.text
                    ),
                    token.range,
                ));
            }
            None => {
                return Err(SyntaxIssue::new(
                    ErrorCode::E0104,
                    "Unclosed '['",
                    open.range,
                ));
            }
        };

        let close = match self.bump() {
            Some(token) if token.kind == TokenKind::RBracket => token,
            Some(token) => {
                return Err(SyntaxIssue::new(
                    ErrorCode::E0104,
                    format!("Expected ']' but found '{}'", token.text),
                    token.range,
                ));
            }
            None => {
                return Err(SyntaxIssue::new(
                    ErrorCode::E0104,
                    "Unclosed '['",
                    text_range(open.range.start().into(), self.end),
                ));
            }
        };

        let range = open.range.cover(close.range);
        Ok(match value {
            SuffixValue::Index(value) => Suffix::Index { value, range },
            SuffixValue::Qualifier(value) => Suffix::Qualifier { value, range },
        })
    }
}

enum SuffixValue<'a> {
    Index(u32),
    Qualifier(&'a str),
}

fn invalid_character(token: &Token<'_>) -> SyntaxIssue {
    SyntaxIssue::new(
        ErrorCode::E0101,
        format!("Invalid character '{}' in identifier", token.text),
        token.range,
    )
}

fn unexpected_at_segment_start(token: &Token<'_>) -> SyntaxIssue {
    match token.kind {
        TokenKind::Error => invalid_character(token),
        TokenKind::Dot => SyntaxIssue::new(
            ErrorCode::E0103,
            "Missing identifier before '.'",
            token.range,
        ),
        _ => SyntaxIssue::new(
            ErrorCode::E0103,
            format!("Expected an identifier but found '{}'", token.text),
            token.range,
        ),
    }
}

impl<'a> Iterator for SegmentScanner<'a> {
    type Item = Result<Segment<'a>, SyntaxIssue>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if !self.started {
            self.started = true;
            if !fits_text_size(self.end) {
                self.done = true;
                return Some(Err(SyntaxIssue::new(
                    ErrorCode::E0101,
                    "Identifier is too long",
                    text_range(0, 0),
                )));
            }
            if self.tokens.is_empty() {
                self.done = true;
                return Some(Err(SyntaxIssue::new(
                    ErrorCode::E0102,
                    "Identifier is empty",
                    self.end_range(),
                )));
            }
        } else {
            let separator = self.bump()?;
            match separator.kind {
                TokenKind::Dot => {
                    if self.peek().is_none() {
                        self.done = true;
                        return Some(Err(SyntaxIssue::new(
                            ErrorCode::E0103,
                            "Missing identifier after '.'",
                            separator.range,
                        )));
                    }
                }
                TokenKind::Error => {
                    self.done = true;
                    return Some(Err(invalid_character(&separator)));
                }
                _ => {
                    self.done = true;
                    return Some(Err(SyntaxIssue::new(
                        ErrorCode::E0106,
                        format!("Unexpected '{}' after identifier segment", separator.text),
                        separator.range,
                    )));
                }
            }
        }

        let segment = self.segment();
        if segment.is_err() {
            self.done = true;
        }
        Some(segment)
    }
}
