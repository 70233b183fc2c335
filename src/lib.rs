//! # fl-identifier
//!
//! Identifier resolution for product formulas: turns dotted identifiers
//! such as `policy.coverage[1].premium` into typed node chains and works out
//! which product components a chain can reach.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! collect     → Context collector (product components of a chain)
//!   ↓
//! parser      → Logos lexer, segment scanner, identifier builder
//!   ↓
//! node        → IdentifierNode chain
//!   ↓
//! filter      → Identifier filter chain
//!   ↓
//! model       → ModelLookup, datatypes, model parts, InMemoryModel
//!   ↓
//! diagnostics → Error codes of invalid nodes
//! error       → Configuration faults
//!   ↓
//! base        → Primitives (Name, TextRange, ParserOptions)
//! ```
//!
//! ## Example
//!
//! ```
//! use fl_identifier::model::{Attribute, InMemoryModel, Parameter};
//!
//! let model = InMemoryModel::builder()
//!     .value_datatype("String")
//!     .policy_type("Person", |t| t.attribute(Attribute::new("address", "String")))
//!     .build()
//!     .unwrap();
//!
//! let params = [Parameter::new("policyHolder", "Person")];
//! let chain = fl_identifier::parse("policyHolder.address", &params, None, &model).unwrap();
//! assert!(chain.is_valid());
//! assert_eq!(chain.len(), 2);
//! ```

// ============================================================================
// MODULES (dependency order: base → model → filter → node → parser → collect)
// ============================================================================

/// Foundation types: Name, TextRange, ParserOptions
pub mod base;

/// Error codes carried by invalid identifier nodes
pub mod diagnostics;

/// Configuration and model building errors
pub mod error;

/// Model lookup: datatypes, model parts, in-memory model
pub mod model;

/// Identifier filter chain
pub mod filter;

/// Identifier node chain
pub mod node;

/// Parser: Logos lexer, segment scanner, identifier builder
pub mod parser;

/// Context collector
pub mod collect;

// Re-export foundation types
pub use base::{Name, ParserOptions, TextRange, TextSize, is_identifier};

// Re-export the main entry points
pub use collect::{ContextCollector, ContextProducts, collect_context_product_cmpts};
pub use diagnostics::ErrorCode;
pub use error::{Error, ModelError, Result};
pub use filter::{IdentifierFilter, IdentifierFilterExtension, IdentifierKind, ModelPart};
pub use model::{Datatype, ModelLookup};
pub use node::{IdentifierNode, InvalidIdentifier, NodeKind};
pub use parser::{IdentifierParser, ParseSession, parse, parse_with};
