//! Error code definitions for identifier diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Syntax errors (characters, dots, brackets)
//! - E02xx: Resolution errors (unknown names, missing datatypes)
//! - E03xx: Access errors (filtered identifiers, misplaced suffixes)

use std::fmt;

/// Error codes carried by invalid identifier nodes
///
/// Each error code represents a specific reason why an identifier chain
/// stopped resolving, enabling filtering and editor quick fixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Syntax errors
    // =========================================================================
    /// Character that cannot appear in an identifier
    E0101,
    /// Empty identifier
    E0102,
    /// Missing segment after `.` or at the start
    E0103,
    /// Unclosed bracket `[`
    E0104,
    /// Index is not a non-negative integer
    E0105,
    /// Unexpected token after a segment
    E0106,

    // =========================================================================
    // E02xx: Resolution errors
    // =========================================================================
    /// Name is neither a parameter nor a member of the context type
    E0201,
    /// Name is not a value of the enumeration
    E0202,
    /// Member access on a value datatype
    E0203,
    /// Datatype of a parameter or attribute cannot be found
    E0204,

    // =========================================================================
    // E03xx: Access errors
    // =========================================================================
    /// Identifier rejected by the identifier filter
    E0301,
    /// `@default` on an attribute without a default value
    E0302,
    /// Index on something other than a list-valued association
    E0303,
    /// Qualifier on something other than a qualified association
    E0304,
    /// Qualifier names no product component
    E0305,
    /// Qualifier's product component does not configure the association target
    E0306,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0201")
    pub fn as_str(&self) -> &'static str {
        match self {
            // Syntax
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            Self::E0104 => "E0104",
            Self::E0105 => "E0105",
            Self::E0106 => "E0106",
            // Resolution
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0204 => "E0204",
            // Access
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            Self::E0304 => "E0304",
            Self::E0305 => "E0305",
            Self::E0306 => "E0306",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        if self.is_syntax() {
            "syntax error"
        } else if self.is_resolution() {
            "resolution error"
        } else {
            "access error"
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "invalid character",
            Self::E0102 => "empty identifier",
            Self::E0103 => "missing identifier segment",
            Self::E0104 => "unclosed bracket",
            Self::E0105 => "invalid index",
            Self::E0106 => "unexpected token",
            Self::E0201 => "undefined identifier",
            Self::E0202 => "undefined enumeration value",
            Self::E0203 => "datatype has no members",
            Self::E0204 => "undefined datatype",
            Self::E0301 => "identifier not allowed",
            Self::E0302 => "default value not applicable",
            Self::E0303 => "index not applicable",
            Self::E0304 => "qualifier not applicable",
            Self::E0305 => "undefined qualifier",
            Self::E0306 => "qualifier type mismatch",
        }
    }

    /// Check if this is a syntax error (the text does not follow the grammar)
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            Self::E0101 | Self::E0102 | Self::E0103 | Self::E0104 | Self::E0105 | Self::E0106
        )
    }

    /// Check if this is a resolution error (a name is missing from the model)
    pub fn is_resolution(&self) -> bool {
        matches!(self, Self::E0201 | Self::E0202 | Self::E0203 | Self::E0204)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
