//! Identifier parser for formula expressions
//!
//! Turns a dotted identifier such as `policy.coverage[1].premium` into a
//! typed [`IdentifierNode`] chain.
//!
//! ## Architecture
//!
//! ```text
//! Identifier Text
//!     ↓
//! Lexer (logos) → Tokens with byte ranges
//!     ↓
//! Segment scanner → name@default[suffix] segments, syntax problems
//!     ↓
//! Builder → IdentifierNode chain resolved against a ModelLookup
//! ```
//!
//! Malformed or unresolvable input is never an error: the chain simply ends
//! in an invalid node. Only a broken formula signature is reported as
//! [`Error`](crate::Error).

mod builder;
mod lexer;
mod segments;

pub use builder::IdentifierParser;
pub use lexer::{Lexer, Token, TokenKind, tokenize};

use crate::base::ParserOptions;
use crate::error::Result;
use crate::filter::IdentifierFilter;
use crate::model::{ModelLookup, Parameter};
use crate::node::IdentifierNode;

/// Filter snapshot and options shared by the parses of one session.
#[derive(Clone, Debug, Default)]
pub struct ParseSession {
    pub options: ParserOptions,
    pub filter: IdentifierFilter,
}

impl ParseSession {
    pub fn new(options: ParserOptions, filter: IdentifierFilter) -> Self {
        Self { options, filter }
    }

    /// Replace the filter snapshot
    pub fn with_filter(mut self, filter: IdentifierFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Replace the parser options
    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }
}

/// Parse an identifier with default options and no filter extensions.
pub fn parse<L: ModelLookup + ?Sized>(
    identifier: &str,
    parameters: &[Parameter],
    context_type: Option<&str>,
    lookup: &L,
) -> Result<IdentifierNode> {
    parse_with(
        identifier,
        parameters,
        context_type,
        lookup,
        &ParseSession::default(),
    )
}

/// Parse an identifier within a session.
pub fn parse_with<L: ModelLookup + ?Sized>(
    identifier: &str,
    parameters: &[Parameter],
    context_type: Option<&str>,
    lookup: &L,
    session: &ParseSession,
) -> Result<IdentifierNode> {
    let parser = IdentifierParser::new(lookup, parameters, context_type, session.clone())?;
    Ok(parser.parse(identifier))
}
