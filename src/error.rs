//! Error types for configuration faults.
//!
//! Malformed identifiers are never reported through these types; they end
//! up as an invalid node inside the parsed chain.

use thiserror::Error;

use crate::base::Name;

/// Errors raised while setting up a parser.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Two formula parameters share a name.
    #[error("Duplicate formula parameter: {0}")]
    DuplicateParameter(Name),

    /// A formula parameter without a name.
    #[error("Formula parameter at position {0} has an empty name")]
    EmptyParameterName(usize),

    /// A formula parameter whose name no identifier can spell.
    #[error("Formula parameter name '{0}' is not an identifier")]
    InvalidParameterName(Name),

    /// A formula parameter without a datatype.
    #[error("Formula parameter '{0}' has no datatype")]
    MissingParameterDatatype(Name),
}

/// Errors raised while building an [`InMemoryModel`](crate::model::InMemoryModel).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A type, datatype or enumeration is defined twice.
    #[error("Duplicate {kind}: {name}")]
    Duplicate { kind: &'static str, name: Name },

    /// A type declares the same member twice.
    #[error("Duplicate member '{member}' in type {owner}")]
    DuplicateMember { owner: Name, member: Name },

    /// A supertype that is not part of the model.
    #[error("Type {owner} extends unknown type {supertype}")]
    UnknownSupertype { owner: Name, supertype: Name },

    /// A supertype chain that returns to where it started.
    #[error("Supertype cycle through {0}")]
    CyclicSupertype(Name),

    /// A product component of a type that is not part of the model.
    #[error("Product component {cmpt} has unknown type {product_cmpt_type}")]
    UnknownProductCmptType { cmpt: Name, product_cmpt_type: Name },
}

impl ModelError {
    /// Create a duplicate type error.
    pub fn duplicate_type(name: impl Into<Name>) -> Self {
        Self::Duplicate {
            kind: "type",
            name: name.into(),
        }
    }

    /// Create a duplicate datatype error.
    pub fn duplicate_datatype(name: impl Into<Name>) -> Self {
        Self::Duplicate {
            kind: "datatype",
            name: name.into(),
        }
    }

    /// Create a duplicate product component error.
    pub fn duplicate_product_cmpt(name: impl Into<Name>) -> Self {
        Self::Duplicate {
            kind: "product component",
            name: name.into(),
        }
    }
}

/// Result alias for parser setup.
pub type Result<T, E = Error> = std::result::Result<T, E>;
