//! Identifier filter: decides which model parts formulas may reference.
//!
//! A filter is an ordered chain of extensions. A part is allowed only if
//! every extension allows it; evaluation stops at the first veto. The chain
//! is an immutable snapshot: clone the filter to share it between parses,
//! build a new one to change the configuration.

use std::fmt;
use std::sync::Arc;

use crate::base::Name;
use crate::model::{Association, Attribute, EnumValue};

/// The way a model part is referenced by an identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IdentifierKind {
    Parameter,
    Attribute,
    /// `attribute@default`
    DefaultValueOfAttribute,
    Association,
    /// `association[0]`
    IndexBasedAssociation,
    /// `association["ProductCmpt"]`
    QualifiedAssociation,
    EnumClass,
    EnumValue,
}

impl IdentifierKind {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parameter => "parameter",
            Self::Attribute => "attribute",
            Self::DefaultValueOfAttribute => "default value of attribute",
            Self::Association => "association",
            Self::IndexBasedAssociation => "index based association",
            Self::QualifiedAssociation => "qualified association",
            Self::EnumClass => "enumeration",
            Self::EnumValue => "enumeration value",
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A model part about to be referenced by an identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelPart<'a> {
    Attribute(&'a Attribute),
    Association(&'a Association),
    /// Qualified name of an enumeration type.
    EnumType(&'a Name),
    EnumValue(&'a EnumValue),
}

impl ModelPart<'_> {
    /// Name of the part as written in an identifier.
    pub fn name(&self) -> &str {
        match self {
            ModelPart::Attribute(attr) => attr.name.as_str(),
            ModelPart::Association(assoc) => assoc.name.as_str(),
            ModelPart::EnumType(name) => name.as_str(),
            ModelPart::EnumValue(value) => value.id.as_str(),
        }
    }
}

/// One link of the filter chain.
///
/// Extensions must answer without side effects; they are called once per
/// resolved segment.
pub trait IdentifierFilterExtension: Send + Sync {
    fn is_identifier_allowed(&self, part: &ModelPart<'_>, kind: IdentifierKind) -> bool;
}

impl<F> IdentifierFilterExtension for F
where
    F: Fn(&ModelPart<'_>, IdentifierKind) -> bool + Send + Sync,
{
    fn is_identifier_allowed(&self, part: &ModelPart<'_>, kind: IdentifierKind) -> bool {
        self(part, kind)
    }
}

/// The configured chain of filter extensions.
#[derive(Clone, Default)]
pub struct IdentifierFilter {
    extensions: Arc<[Box<dyn IdentifierFilterExtension>]>,
}

impl IdentifierFilter {
    /// A filter without extensions, allowing every identifier.
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Create a filter from extensions, evaluated in the given order.
    pub fn new(extensions: Vec<Box<dyn IdentifierFilterExtension>>) -> Self {
        Self {
            extensions: extensions.into(),
        }
    }

    /// Start collecting extensions.
    pub fn builder() -> IdentifierFilterBuilder {
        IdentifierFilterBuilder::default()
    }

    /// Check if every extension allows referencing `part` as `kind`.
    pub fn is_identifier_allowed(&self, part: &ModelPart<'_>, kind: IdentifierKind) -> bool {
        self.extensions
            .iter()
            .all(|extension| extension.is_identifier_allowed(part, kind))
    }

    /// Number of registered extensions.
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

impl fmt::Debug for IdentifierFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentifierFilter")
            .field("extensions", &self.extensions.len())
            .finish()
    }
}

/// Builder for [`IdentifierFilter`].
#[derive(Default)]
pub struct IdentifierFilterBuilder {
    extensions: Vec<Box<dyn IdentifierFilterExtension>>,
}

impl IdentifierFilterBuilder {
    /// Append an extension to the chain.
    pub fn extension(mut self, extension: impl IdentifierFilterExtension + 'static) -> Self {
        self.extensions.push(Box::new(extension));
        self
    }

    pub fn build(self) -> IdentifierFilter {
        IdentifierFilter::new(self.extensions)
    }
}
