//! Context collector: which product components an identifier can reach.
//!
//! A formula is evaluated for one product component generation. Following
//! an identifier chain from there, every node narrows (or keeps) the set of
//! product components its value can be configured by:
//!
//! ```text
//! policy                          → {HomeProduct}
//! policy.coverage                 → {FireCoverage, CollisionStandard}
//! policy.coverage["FireCoverage"] → {FireCoverage}
//! ```
//!
//! Each rule consumes what the node before it computed. Nodes without a rule
//! (attributes, indices, enumerations, invalid nodes) pass the previous
//! result through unchanged.

use indexmap::IndexSet;
use tracing::debug;

use crate::base::Name;
use crate::model::{Association, ModelLookup, Parameter, ProductCmptGeneration};
use crate::node::{IdentifierNode, NodeKind};

/// Product components an identifier may refer to at runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContextProducts {
    /// Any product component, the chain does not narrow it down.
    Unconstrained,
    /// Exactly these product components. Empty means none.
    ConstrainedTo(IndexSet<Name>),
}

impl ContextProducts {
    /// Constrained to a single product component.
    pub fn single(product_cmpt: impl Into<Name>) -> Self {
        Self::ConstrainedTo(std::iter::once(product_cmpt.into()).collect())
    }

    pub fn is_unconstrained(&self) -> bool {
        matches!(self, Self::Unconstrained)
    }

    /// The product components, `None` if unconstrained.
    pub fn product_cmpts(&self) -> Option<&IndexSet<Name>> {
        match self {
            Self::Unconstrained => None,
            Self::ConstrainedTo(cmpts) => Some(cmpts),
        }
    }

    /// Check if the given product component is possible.
    pub fn contains(&self, product_cmpt: &str) -> bool {
        match self {
            Self::Unconstrained => true,
            Self::ConstrainedTo(cmpts) => cmpts.contains(product_cmpt),
        }
    }
}

/// Walks an identifier chain for one product component generation.
pub struct ContextCollector<'a, L: ModelLookup + ?Sized> {
    lookup: &'a L,
    generation: &'a ProductCmptGeneration,
}

impl<'a, L: ModelLookup + ?Sized> ContextCollector<'a, L> {
    pub fn new(lookup: &'a L, generation: &'a ProductCmptGeneration) -> Self {
        Self { lookup, generation }
    }

    /// Collect the product components the last node of `chain` can reach.
    pub fn collect(&self, chain: &IdentifierNode) -> ContextProducts {
        chain
            .iter()
            .fold(None, |previous, node| Some(self.apply(node, previous)))
            .unwrap_or(ContextProducts::Unconstrained)
    }

    fn apply(&self, node: &IdentifierNode, previous: Option<ContextProducts>) -> ContextProducts {
        match node.kind() {
            NodeKind::Parameter(param) => self.parameter(param, node),
            NodeKind::Association(association) => self.association(association, previous),
            NodeKind::Qualifier(qualifier) => qualify(qualifier, previous),
            NodeKind::Attribute { .. }
            | NodeKind::Index(_)
            | NodeKind::EnumClass(_)
            | NodeKind::EnumValue(_)
            | NodeKind::Invalid(_) => previous.unwrap_or(ContextProducts::Unconstrained),
        }
    }

    fn parameter(&self, param: &Parameter, node: &IdentifierNode) -> ContextProducts {
        let Some(param_type) = node.datatype().and_then(|d| d.model_type_name()) else {
            return ContextProducts::Unconstrained;
        };
        let configured = self
            .lookup
            .configured_policy_type(&self.generation.product_cmpt_type);
        match configured {
            Some(policy_type) if self.lookup.is_subtype_or_same(&policy_type, param_type) => {
                ContextProducts::single(self.generation.product_cmpt.clone())
            }
            _ => {
                debug!(
                    "[COLLECT] parameter '{}' of type {} is not configured by {}",
                    param.name, param_type, self.generation.product_cmpt_type
                );
                ContextProducts::Unconstrained
            }
        }
    }

    fn association(
        &self,
        association: &Association,
        previous: Option<ContextProducts>,
    ) -> ContextProducts {
        let Some(ContextProducts::ConstrainedTo(sources)) = previous else {
            return ContextProducts::Unconstrained;
        };
        let Some(matching) = &association.matching_association else {
            debug!(
                "[COLLECT] association '{}' has no matching product association",
                association.name
            );
            return ContextProducts::Unconstrained;
        };

        let targets = sources
            .iter()
            .filter_map(|source| self.lookup.find_product_cmpt(source))
            .flat_map(|cmpt| cmpt.link_targets(matching).cloned().collect::<Vec<_>>())
            .collect();
        ContextProducts::ConstrainedTo(targets)
    }
}

fn qualify(qualifier: &Name, previous: Option<ContextProducts>) -> ContextProducts {
    match previous {
        Some(ContextProducts::ConstrainedTo(cmpts)) if !cmpts.contains(qualifier) => {
            ContextProducts::ConstrainedTo(IndexSet::new())
        }
        _ => ContextProducts::single(qualifier.clone()),
    }
}

/// Collect the product components `node` can reach when evaluated for
/// `generation`.
pub fn collect_context_product_cmpts<L: ModelLookup + ?Sized>(
    node: &IdentifierNode,
    generation: &ProductCmptGeneration,
    lookup: &L,
) -> ContextProducts {
    ContextCollector::new(lookup, generation).collect(node)
}
