//! Model lookup: the read-only view of the domain model.
//!
//! Identifier resolution never owns the model. It asks a [`ModelLookup`]
//! for attributes, associations, datatypes, enumeration values and product
//! components, and treats "not found" as an ordinary answer.
//!
//! ## Key Types
//!
//! - [`ModelLookup`]: The capability consumed by the parser and collector
//! - [`Datatype`]: Resolved type of an identifier node
//! - [`Attribute`], [`Association`], [`Parameter`], [`EnumValue`]: Model parts
//! - [`ProductCmpt`], [`ProductCmptGeneration`]: Runtime product data
//! - [`InMemoryModel`]: A ready-made lookup built with [`ModelBuilder`]

mod datatype;
mod memory;
mod parts;

pub use datatype::Datatype;
pub use memory::{InMemoryModel, ModelBuilder, ModelTypeBuilder};
pub use parts::{
    Association, Attribute, EnumValue, Parameter, ProductCmpt, ProductCmptGeneration,
    ProductCmptLink, ProductCmptType,
};

use crate::base::Name;

/// Read-only access to the domain model of a project.
///
/// Member lookups include members inherited from supertypes. All methods
/// answer "not found" with `None` or `false` instead of failing.
pub trait ModelLookup {
    /// Find an attribute of a policy or product component type.
    fn find_attribute(&self, type_name: &str, name: &str) -> Option<Attribute>;

    /// Find an association of a policy or product component type.
    fn find_association(&self, type_name: &str, name: &str) -> Option<Association>;

    /// Resolve a qualified datatype name (value, enumeration or model type).
    fn find_datatype(&self, qualified_name: &str) -> Option<Datatype>;

    /// Find a value of an enumeration type by its id.
    fn find_enum_value(&self, enum_type: &str, id: &str) -> Option<EnumValue>;

    /// Check if `sub` is `sup` or one of its (transitive) subtypes.
    fn is_subtype_or_same(&self, sub: &str, sup: &str) -> bool;

    /// Find a product component by qualified name.
    fn find_product_cmpt(&self, qualified_name: &str) -> Option<ProductCmpt>;

    /// Find a product component type by qualified name.
    fn find_product_cmpt_type(&self, qualified_name: &str) -> Option<ProductCmptType>;

    /// The policy component type configured by a product component type.
    fn configured_policy_type(&self, product_cmpt_type: &str) -> Option<Name> {
        self.find_product_cmpt_type(product_cmpt_type)
            .and_then(|ty| ty.policy_cmpt_type)
    }
}

impl<L: ModelLookup + ?Sized> ModelLookup for &L {
    fn find_attribute(&self, type_name: &str, name: &str) -> Option<Attribute> {
        (**self).find_attribute(type_name, name)
    }

    fn find_association(&self, type_name: &str, name: &str) -> Option<Association> {
        (**self).find_association(type_name, name)
    }

    fn find_datatype(&self, qualified_name: &str) -> Option<Datatype> {
        (**self).find_datatype(qualified_name)
    }

    fn find_enum_value(&self, enum_type: &str, id: &str) -> Option<EnumValue> {
        (**self).find_enum_value(enum_type, id)
    }

    fn is_subtype_or_same(&self, sub: &str, sup: &str) -> bool {
        (**self).is_subtype_or_same(sub, sup)
    }

    fn find_product_cmpt(&self, qualified_name: &str) -> Option<ProductCmpt> {
        (**self).find_product_cmpt(qualified_name)
    }

    fn find_product_cmpt_type(&self, qualified_name: &str) -> Option<ProductCmptType> {
        (**self).find_product_cmpt_type(qualified_name)
    }
}
