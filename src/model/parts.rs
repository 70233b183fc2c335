//! Model parts handed out by a [`ModelLookup`](super::ModelLookup).
//!
//! These are plain records; a lookup hands out owned copies, so they stay
//! valid after the lookup that produced them is gone.

use crate::base::Name;

/// An attribute of a policy or product component type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    pub name: Name,
    /// Qualified name of the attribute's datatype.
    pub datatype: Name,
    /// Holds a list of values instead of a single value.
    pub multi_valued: bool,
    /// Configured by the product, so it has a default value (`@default`).
    pub configurable: bool,
}

impl Attribute {
    pub fn new(name: impl Into<Name>, datatype: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            datatype: datatype.into(),
            multi_valued: false,
            configurable: false,
        }
    }

    pub fn multi_valued(mut self) -> Self {
        self.multi_valued = true;
        self
    }

    pub fn configurable(mut self) -> Self {
        self.configurable = true;
        self
    }
}

/// A navigable association from one model type to another.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Association {
    pub name: Name,
    /// Qualified name of the target type.
    pub target: Name,
    pub to_many: bool,
    /// Accepts a product component qualifier (`coverage["FireCoverage"]`).
    pub qualified: bool,
    /// Name of the product-side association whose links configure this one.
    pub matching_association: Option<Name>,
}

impl Association {
    pub fn to_one(name: impl Into<Name>, target: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            to_many: false,
            qualified: false,
            matching_association: None,
        }
    }

    pub fn to_many(name: impl Into<Name>, target: impl Into<Name>) -> Self {
        Self {
            to_many: true,
            ..Self::to_one(name, target)
        }
    }

    pub fn qualified(mut self) -> Self {
        self.qualified = true;
        self
    }

    /// Set the product-side association configuring this association.
    pub fn matched_by(mut self, product_association: impl Into<Name>) -> Self {
        self.matching_association = Some(product_association.into());
        self
    }
}

/// A parameter of a formula signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameter {
    pub name: Name,
    /// Qualified name of the parameter's datatype.
    pub datatype: Name,
}

impl Parameter {
    pub fn new(name: impl Into<Name>, datatype: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            datatype: datatype.into(),
        }
    }
}

/// A value of an enumeration type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumValue {
    pub enum_type: Name,
    pub id: Name,
}

impl EnumValue {
    pub fn new(enum_type: impl Into<Name>, id: impl Into<Name>) -> Self {
        Self {
            enum_type: enum_type.into(),
            id: id.into(),
        }
    }
}

/// A product component type and the policy component type it configures.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductCmptType {
    pub name: Name,
    pub policy_cmpt_type: Option<Name>,
}

/// A link of a product component along a product-side association.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductCmptLink {
    pub association: Name,
    /// Qualified name of the linked product component.
    pub target: Name,
}

/// A concrete product component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductCmpt {
    pub name: Name,
    pub product_cmpt_type: Name,
    pub links: Vec<ProductCmptLink>,
}

impl ProductCmpt {
    pub fn new(name: impl Into<Name>, product_cmpt_type: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            product_cmpt_type: product_cmpt_type.into(),
            links: Vec::new(),
        }
    }

    /// Add a link to another product component.
    pub fn with_link(mut self, association: impl Into<Name>, target: impl Into<Name>) -> Self {
        self.links.push(ProductCmptLink {
            association: association.into(),
            target: target.into(),
        });
        self
    }

    /// Targets linked along the given product-side association, in link order.
    pub fn link_targets<'a>(&'a self, association: &'a str) -> impl Iterator<Item = &'a Name> {
        self.links
            .iter()
            .filter(move |link| link.association.as_str() == association)
            .map(|link| &link.target)
    }
}

/// The generation of a product component a formula is evaluated for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductCmptGeneration {
    /// Qualified name of the product component owning this generation.
    pub product_cmpt: Name,
    pub product_cmpt_type: Name,
}

impl ProductCmptGeneration {
    pub fn new(product_cmpt: impl Into<Name>, product_cmpt_type: impl Into<Name>) -> Self {
        Self {
            product_cmpt: product_cmpt.into(),
            product_cmpt_type: product_cmpt_type.into(),
        }
    }

    /// The generation of the given product component.
    pub fn of(cmpt: &ProductCmpt) -> Self {
        Self::new(cmpt.name.clone(), cmpt.product_cmpt_type.clone())
    }
}
