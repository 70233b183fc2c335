//! In-memory model: a [`ModelLookup`] over types declared up front.
//!
//! Types are stored once and referenced by qualified name. Member lookups
//! walk the supertype chain, so a subtype sees every inherited attribute and
//! association. The builder rejects models whose supertype chains cannot be
//! walked (unknown or cyclic supertypes), so lookups never loop.

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};

use super::{
    Association, Attribute, Datatype, EnumValue, ModelLookup, ProductCmpt, ProductCmptType,
};
use crate::base::Name;
use crate::error::ModelError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TypeKind {
    Policy,
    Product,
}

#[derive(Clone, Debug)]
struct ModelType {
    name: Name,
    kind: TypeKind,
    supertype: Option<Name>,
    attributes: IndexMap<Name, Attribute>,
    associations: IndexMap<Name, Association>,
    /// Policy component type configured by a product component type.
    policy_cmpt_type: Option<Name>,
}

/// A complete domain model held in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemoryModel {
    /// Policy and product component types by qualified name.
    types: IndexMap<Name, ModelType>,
    /// Value and enumeration datatypes by qualified name.
    datatypes: FxHashMap<Name, Datatype>,
    /// Enumeration values by enumeration, in declaration order.
    enum_values: FxHashMap<Name, IndexMap<Name, EnumValue>>,
    product_cmpts: IndexMap<Name, ProductCmpt>,
}

impl InMemoryModel {
    /// Start declaring a model.
    pub fn builder() -> ModelBuilder {
        ModelBuilder::default()
    }

    /// Number of policy and product component types.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Iterate over all product components in declaration order.
    pub fn product_cmpts(&self) -> impl Iterator<Item = &ProductCmpt> {
        self.product_cmpts.values()
    }

    /// Walk from a type up its supertype chain.
    fn type_hierarchy<'a>(&'a self, type_name: &str) -> impl Iterator<Item = &'a ModelType> {
        let mut visited = FxHashSet::default();
        let mut next = self.types.get(type_name);
        std::iter::from_fn(move || {
            let current = next.take()?;
            if !visited.insert(current.name.clone()) {
                return None;
            }
            next = current
                .supertype
                .as_ref()
                .and_then(|supertype| self.types.get(supertype.as_str()));
            Some(current)
        })
    }
}

impl ModelLookup for InMemoryModel {
    fn find_attribute(&self, type_name: &str, name: &str) -> Option<Attribute> {
        self.type_hierarchy(type_name)
            .find_map(|ty| ty.attributes.get(name))
            .cloned()
    }

    fn find_association(&self, type_name: &str, name: &str) -> Option<Association> {
        self.type_hierarchy(type_name)
            .find_map(|ty| ty.associations.get(name))
            .cloned()
    }

    fn find_datatype(&self, qualified_name: &str) -> Option<Datatype> {
        if let Some(datatype) = self.datatypes.get(qualified_name) {
            return Some(datatype.clone());
        }
        self.types
            .get(qualified_name)
            .map(|ty| Datatype::Type(ty.name.clone()))
    }

    fn find_enum_value(&self, enum_type: &str, id: &str) -> Option<EnumValue> {
        self.enum_values.get(enum_type)?.get(id).cloned()
    }

    fn is_subtype_or_same(&self, sub: &str, sup: &str) -> bool {
        self.type_hierarchy(sub).any(|ty| ty.name.as_str() == sup)
    }

    fn find_product_cmpt(&self, qualified_name: &str) -> Option<ProductCmpt> {
        self.product_cmpts.get(qualified_name).cloned()
    }

    fn find_product_cmpt_type(&self, qualified_name: &str) -> Option<ProductCmptType> {
        let ty = self.types.get(qualified_name)?;
        if ty.kind != TypeKind::Product {
            return None;
        }
        let policy_cmpt_type = self
            .type_hierarchy(qualified_name)
            .find_map(|ty| ty.policy_cmpt_type.clone());
        Some(ProductCmptType {
            name: ty.name.clone(),
            policy_cmpt_type,
        })
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Declares the members of one policy or product component type.
#[derive(Clone, Debug)]
pub struct ModelTypeBuilder {
    ty: ModelType,
    duplicate_member: Option<Name>,
}

impl ModelTypeBuilder {
    fn new(name: Name, kind: TypeKind) -> Self {
        Self {
            ty: ModelType {
                name,
                kind,
                supertype: None,
                attributes: IndexMap::new(),
                associations: IndexMap::new(),
                policy_cmpt_type: None,
            },
            duplicate_member: None,
        }
    }

    /// Set the supertype.
    pub fn extends(mut self, supertype: impl Into<Name>) -> Self {
        self.ty.supertype = Some(supertype.into());
        self
    }

    /// Declare the policy component type this product component type configures.
    pub fn configures(mut self, policy_cmpt_type: impl Into<Name>) -> Self {
        self.ty.policy_cmpt_type = Some(policy_cmpt_type.into());
        self
    }

    /// Add an attribute.
    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.note_member(&attribute.name);
        self.ty.attributes.insert(attribute.name.clone(), attribute);
        self
    }

    /// Add an association.
    pub fn association(mut self, association: Association) -> Self {
        self.note_member(&association.name);
        self.ty
            .associations
            .insert(association.name.clone(), association);
        self
    }

    fn note_member(&mut self, name: &Name) {
        let taken =
            self.ty.attributes.contains_key(name) || self.ty.associations.contains_key(name);
        if taken && self.duplicate_member.is_none() {
            self.duplicate_member = Some(name.clone());
        }
    }
}

/// Collects declarations and validates them into an [`InMemoryModel`].
#[derive(Clone, Debug, Default)]
pub struct ModelBuilder {
    types: Vec<ModelTypeBuilder>,
    datatypes: Vec<Datatype>,
    enum_values: Vec<(Name, Vec<Name>)>,
    product_cmpts: Vec<ProductCmpt>,
}

impl ModelBuilder {
    /// Declare a value datatype such as `String` or `Money`.
    pub fn value_datatype(mut self, name: impl Into<Name>) -> Self {
        self.datatypes.push(Datatype::Value(name.into()));
        self
    }

    /// Declare an enumeration and its values.
    pub fn enumeration<I, V>(mut self, name: impl Into<Name>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Name>,
    {
        let name = name.into();
        self.datatypes.push(Datatype::Enum(name.clone()));
        self.enum_values
            .push((name, values.into_iter().map(Into::into).collect()));
        self
    }

    /// Declare a policy component type.
    pub fn policy_type(
        mut self,
        name: impl Into<Name>,
        declare: impl FnOnce(ModelTypeBuilder) -> ModelTypeBuilder,
    ) -> Self {
        let ty = ModelTypeBuilder::new(name.into(), TypeKind::Policy);
        self.types.push(declare(ty));
        self
    }

    /// Declare a product component type.
    pub fn product_type(
        mut self,
        name: impl Into<Name>,
        declare: impl FnOnce(ModelTypeBuilder) -> ModelTypeBuilder,
    ) -> Self {
        let ty = ModelTypeBuilder::new(name.into(), TypeKind::Product);
        self.types.push(declare(ty));
        self
    }

    /// Add a product component.
    pub fn product_cmpt(mut self, cmpt: ProductCmpt) -> Self {
        self.product_cmpts.push(cmpt);
        self
    }

    /// Validate all declarations and build the model.
    pub fn build(self) -> Result<InMemoryModel, ModelError> {
        let mut model = InMemoryModel::default();

        for datatype in self.datatypes {
            let name = datatype.qualified_name().clone();
            if model.datatypes.insert(name.clone(), datatype).is_some() {
                return Err(ModelError::duplicate_datatype(name));
            }
        }
        for (enum_type, ids) in self.enum_values {
            let values = ids
                .into_iter()
                .map(|id| (id.clone(), EnumValue::new(enum_type.clone(), id)))
                .collect();
            model.enum_values.insert(enum_type, values);
        }

        for builder in self.types {
            let ty = builder.ty;
            if let Some(member) = builder.duplicate_member {
                return Err(ModelError::DuplicateMember {
                    owner: ty.name,
                    member,
                });
            }
            if model.datatypes.contains_key(&ty.name) || model.types.contains_key(&ty.name) {
                return Err(ModelError::duplicate_type(ty.name));
            }
            model.types.insert(ty.name.clone(), ty);
        }

        for ty in model.types.values() {
            if let Some(supertype) = &ty.supertype {
                if !model.types.contains_key(supertype) {
                    return Err(ModelError::UnknownSupertype {
                        owner: ty.name.clone(),
                        supertype: supertype.clone(),
                    });
                }
            }
        }
        check_supertype_cycles(&model.types)?;

        for cmpt in self.product_cmpts {
            let known_type = model
                .types
                .get(&cmpt.product_cmpt_type)
                .is_some_and(|ty| ty.kind == TypeKind::Product);
            if !known_type {
                return Err(ModelError::UnknownProductCmptType {
                    cmpt: cmpt.name,
                    product_cmpt_type: cmpt.product_cmpt_type,
                });
            }
            if model.product_cmpts.contains_key(&cmpt.name) {
                return Err(ModelError::duplicate_product_cmpt(cmpt.name));
            }
            model.product_cmpts.insert(cmpt.name.clone(), cmpt);
        }

        tracing::debug!(
            "model built: {} types, {} datatypes, {} product components",
            model.types.len(),
            model.datatypes.len(),
            model.product_cmpts.len()
        );
        Ok(model)
    }
}

fn check_supertype_cycles(types: &IndexMap<Name, ModelType>) -> Result<(), ModelError> {
    for start in types.values() {
        let mut visited = FxHashSet::default();
        let mut current = Some(start);
        while let Some(ty) = current {
            if !visited.insert(&ty.name) {
                return Err(ModelError::CyclicSupertype(ty.name.clone()));
            }
            current = ty.supertype.as_ref().and_then(|s| types.get(s));
        }
    }
    Ok(())
}
