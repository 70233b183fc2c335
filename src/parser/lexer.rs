//! Logos-based lexer for formula identifiers
//!
//! Identifiers are single formula tokens, so nothing is skipped: whitespace
//! and any other stray character come out as [`TokenKind::Error`].

use logos::Logos;

use crate::base::{TextRange, text_range};

/// Kind of an identifier token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Ident,
    Integer,
    /// Quoted qualifier, quotes included
    String,
    /// Quoted qualifier missing its closing quote
    UnterminatedString,
    Dot,
    LBracket,
    RBracket,
    At,
    Minus,
    Error,
}

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub range: TextRange,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let span = self.inner.span();
        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => TokenKind::Error,
        };

        Some(Token {
            kind,
            text: self.inner.slice(),
            range: text_range(span.start, span.end),
        })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum LogosToken {
    #[regex(r"[_\p{XID_Start}]\p{XID_Continue}*")]
    Ident,

    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r#""[^"]*""#)]
    String,

    #[regex(r#""[^"]*"#)]
    UnterminatedString,

    #[token(".")]
    Dot,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("@")]
    At,

    #[token("-")]
    Minus,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Ident => TokenKind::Ident,
            LogosToken::Integer => TokenKind::Integer,
            LogosToken::String => TokenKind::String,
            LogosToken::UnterminatedString => TokenKind::UnterminatedString,
            LogosToken::Dot => TokenKind::Dot,
            LogosToken::LBracket => TokenKind::LBracket,
            LogosToken::RBracket => TokenKind::RBracket,
            LogosToken::At => TokenKind::At,
            LogosToken::Minus => TokenKind::Minus,
        }
    }
}
