//! Resolved datatypes of identifier nodes.

use std::fmt;

use crate::base::Name;

/// The semantic type an identifier resolves to.
///
/// Lists never nest: navigating from a list to a to-many association yields
/// a flat list of the target type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Datatype {
    /// A value datatype such as `String`, `Decimal` or `Money`.
    Value(Name),
    /// An enumeration type.
    Enum(Name),
    /// A policy or product component type of the model.
    Type(Name),
    /// A list of the element datatype.
    ListOf(Box<Datatype>),
}

impl Datatype {
    /// Create a value datatype.
    pub fn value(name: impl Into<Name>) -> Self {
        Self::Value(name.into())
    }

    /// Create an enumeration datatype.
    pub fn enumeration(name: impl Into<Name>) -> Self {
        Self::Enum(name.into())
    }

    /// Create a model type datatype.
    pub fn model_type(name: impl Into<Name>) -> Self {
        Self::Type(name.into())
    }

    /// Wrap a datatype into a list, unless it already is one.
    pub fn list_of(element: Datatype) -> Self {
        match element {
            Self::ListOf(_) => element,
            other => Self::ListOf(Box::new(other)),
        }
    }

    /// Check if this is a list datatype.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::ListOf(_))
    }

    /// The element datatype of a list, or the datatype itself.
    pub fn element(&self) -> &Datatype {
        match self {
            Self::ListOf(inner) => inner.element(),
            other => other,
        }
    }

    /// Owned variant of [`Datatype::element`].
    pub fn into_element(self) -> Datatype {
        match self {
            Self::ListOf(inner) => inner.into_element(),
            other => other,
        }
    }

    /// Make this datatype a list if `list` is set.
    pub fn listed_if(self, list: bool) -> Self {
        if list { Self::list_of(self) } else { self }
    }

    /// Qualified name of the element datatype.
    pub fn qualified_name(&self) -> &Name {
        match self {
            Self::Value(name) | Self::Enum(name) | Self::Type(name) => name,
            Self::ListOf(inner) => inner.qualified_name(),
        }
    }

    /// Name of the model type, if the element datatype is one.
    pub fn model_type_name(&self) -> Option<&Name> {
        match self.element() {
            Self::Type(name) => Some(name),
            _ => None,
        }
    }

    /// Name of the enumeration, if the element datatype is one.
    pub fn enum_name(&self) -> Option<&Name> {
        match self.element() {
            Self::Enum(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(name) | Self::Enum(name) | Self::Type(name) => f.write_str(name),
            Self::ListOf(inner) => write!(f, "List<{}>", inner),
        }
    }
}
