//! Identifier builder: resolves scanned segments against the model.
//!
//! Resolution is a single forward pass. Each segment is resolved against the
//! datatype of the node before it; the first segment that cannot be resolved
//! becomes an invalid node and ends the chain.

use indexmap::IndexMap;
use tracing::{debug, trace};

use super::ParseSession;
use super::segments::{Segment, SegmentScanner, Suffix};
use crate::base::{Name, TextRange, is_identifier, text_range};
use crate::diagnostics::ErrorCode;
use crate::error::{Error, Result};
use crate::filter::{IdentifierKind, ModelPart};
use crate::model::{Association, Attribute, Datatype, ModelLookup, Parameter};
use crate::node::{IdentifierNode, NodeKind};

/// `Ok` continues the chain, `Err` is the invalid node that ends it.
type Resolution = std::result::Result<IdentifierNode, IdentifierNode>;

/// Parses identifiers of one formula.
///
/// Holds everything a formula's identifiers resolve against: the model, the
/// formula signature's parameters, the type the formula is defined on and
/// the session's filter and options.
pub struct IdentifierParser<'a, L: ModelLookup + ?Sized> {
    lookup: &'a L,
    parameters: IndexMap<Name, Parameter>,
    context_type: Option<Name>,
    session: ParseSession,
}

impl<'a, L: ModelLookup + ?Sized> IdentifierParser<'a, L> {
    /// Create a parser for a formula signature.
    ///
    /// Fails if a parameter name is empty or not an identifier, if a
    /// datatype is empty, or if two parameters share a name.
    pub fn new(
        lookup: &'a L,
        parameters: &[Parameter],
        context_type: Option<&str>,
        session: ParseSession,
    ) -> Result<Self> {
        let mut by_name = IndexMap::with_capacity(parameters.len());
        for (position, param) in parameters.iter().enumerate() {
            if param.name.is_empty() {
                return Err(Error::EmptyParameterName(position));
            }
            if !is_identifier(&param.name) {
                return Err(Error::InvalidParameterName(param.name.clone()));
            }
            if param.datatype.is_empty() {
                return Err(Error::MissingParameterDatatype(param.name.clone()));
            }
            if by_name.insert(param.name.clone(), param.clone()).is_some() {
                return Err(Error::DuplicateParameter(param.name.clone()));
            }
        }

        Ok(Self {
            lookup,
            parameters: by_name,
            context_type: context_type.map(Name::from),
            session,
        })
    }

    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.values()
    }

    pub fn context_type(&self) -> Option<&str> {
        self.context_type.as_deref()
    }

    pub fn session(&self) -> &ParseSession {
        &self.session
    }

    /// Parse an identifier into its node chain.
    ///
    /// Never fails: malformed or unresolvable identifiers produce a chain
    /// ending in an invalid node.
    pub fn parse(&self, identifier: &str) -> IdentifierNode {
        let mut nodes: Vec<IdentifierNode> = Vec::new();

        for segment in SegmentScanner::new(identifier) {
            let segment = match segment {
                Ok(segment) => segment,
                Err(issue) => {
                    nodes.push(issue.into_node());
                    break;
                }
            };

            let resolved = match nodes.last() {
                None => self.resolve_first(&segment),
                Some(previous) => self.resolve_next(previous, &segment),
            };
            let node = match resolved {
                Ok(node) => node,
                Err(invalid) => {
                    nodes.push(invalid);
                    break;
                }
            };
            trace!(
                "[IDENT] '{}' -> {} : {}",
                segment.name,
                node.kind().label(),
                describe(node.datatype())
            );

            let suffix = segment
                .suffix
                .map(|suffix| self.resolve_suffix(&node, suffix));
            nodes.push(node);
            match suffix {
                Some(Ok(node)) => nodes.push(node),
                Some(Err(invalid)) => {
                    nodes.push(invalid);
                    break;
                }
                None => {}
            }
        }

        let head = IdentifierNode::link(nodes).unwrap_or_else(|| {
            IdentifierNode::new_invalid(ErrorCode::E0102, "Identifier is empty", text_range(0, 0))
        });
        if let Some(diagnostic) = head.diagnostic() {
            debug!(
                "[IDENT] '{}' is invalid: {}",
                identifier,
                diagnostic.format()
            );
        }
        head
    }

    fn resolve_first(&self, segment: &Segment<'_>) -> Resolution {
        if let Some(param) = self.parameters.get(segment.name) {
            return self.parameter_node(param, segment);
        }

        if let Some(context_type) = &self.context_type {
            if let Some(resolved) = self.resolve_member(context_type, false, segment) {
                return resolved;
            }
        }

        if self.session.options.enum_class_access {
            if let Some(Datatype::Enum(enum_type)) = self.lookup.find_datatype(segment.name) {
                return self.enum_class_node(enum_type, segment);
            }
        }

        Err(IdentifierNode::new_invalid(
            ErrorCode::E0201,
            format!("Undefined identifier '{}'", segment.name),
            segment.range,
        ))
    }

    fn resolve_next(&self, previous: &IdentifierNode, segment: &Segment<'_>) -> Resolution {
        let Some(datatype) = previous.datatype() else {
            return Err(IdentifierNode::new_invalid(
                ErrorCode::E0201,
                format!("Undefined identifier '{}'", segment.name),
                segment.range,
            ));
        };

        // A value is a leaf; only the enumeration itself has values
        if let Datatype::Enum(enum_type) = datatype {
            if !matches!(previous.kind(), NodeKind::EnumValue(_)) {
                return self.enum_value_node(enum_type, segment);
            }
        }

        match datatype.element() {
            Datatype::Type(type_name) => self
                .resolve_member(type_name, datatype.is_list(), segment)
                .unwrap_or_else(|| {
                    Err(IdentifierNode::new_invalid(
                        ErrorCode::E0201,
                        format!("'{}' is not a member of type '{}'", segment.name, type_name),
                        segment.range,
                    ))
                }),
            _ => Err(IdentifierNode::new_invalid(
                ErrorCode::E0203,
                format!(
                    "Datatype '{}' has no member '{}'",
                    datatype, segment.name
                ),
                segment.range,
            )),
        }
    }

    /// Attribute before association. `None` if the type has neither.
    fn resolve_member(
        &self,
        type_name: &str,
        from_list: bool,
        segment: &Segment<'_>,
    ) -> Option<Resolution> {
        if let Some(attribute) = self.lookup.find_attribute(type_name, segment.name) {
            return Some(self.attribute_node(attribute, from_list, segment));
        }
        self.lookup
            .find_association(type_name, segment.name)
            .map(|association| self.association_node(association, from_list, segment))
    }

    fn parameter_node(&self, param: &Parameter, segment: &Segment<'_>) -> Resolution {
        if segment.default_value_access {
            return Err(default_not_applicable("parameter", segment));
        }
        let datatype = self.datatype_of(&param.datatype, "parameter", segment)?;
        Ok(IdentifierNode::new(
            NodeKind::Parameter(param.clone()),
            datatype,
            segment.range,
        ))
    }

    fn attribute_node(
        &self,
        attribute: Attribute,
        from_list: bool,
        segment: &Segment<'_>,
    ) -> Resolution {
        let kind = if segment.default_value_access {
            if !self.session.options.default_value_access {
                return Err(IdentifierNode::new_invalid(
                    ErrorCode::E0302,
                    "Default value access is disabled",
                    segment.range,
                ));
            }
            if !attribute.configurable {
                return Err(IdentifierNode::new_invalid(
                    ErrorCode::E0302,
                    format!("Attribute '{}' has no default value", attribute.name),
                    segment.range,
                ));
            }
            IdentifierKind::DefaultValueOfAttribute
        } else {
            IdentifierKind::Attribute
        };

        self.check_allowed(&ModelPart::Attribute(&attribute), kind, segment.range)?;
        let datatype = self
            .datatype_of(&attribute.datatype, "attribute", segment)?
            .listed_if(attribute.multi_valued || from_list);

        Ok(IdentifierNode::new(
            NodeKind::Attribute {
                attribute,
                default_value_access: segment.default_value_access,
            },
            datatype,
            segment.range,
        ))
    }

    fn association_node(
        &self,
        association: Association,
        from_list: bool,
        segment: &Segment<'_>,
    ) -> Resolution {
        if segment.default_value_access {
            return Err(default_not_applicable("association", segment));
        }

        let kind = match segment.suffix {
            Some(Suffix::Index { .. }) => IdentifierKind::IndexBasedAssociation,
            Some(Suffix::Qualifier { .. }) => IdentifierKind::QualifiedAssociation,
            None => IdentifierKind::Association,
        };
        self.check_allowed(&ModelPart::Association(&association), kind, segment.range)?;
        let datatype = self
            .datatype_of(&association.target, "association target", segment)?
            .listed_if(association.to_many || from_list);

        Ok(IdentifierNode::new(
            NodeKind::Association(association),
            datatype,
            segment.range,
        ))
    }

    fn enum_class_node(&self, enum_type: Name, segment: &Segment<'_>) -> Resolution {
        if segment.default_value_access {
            return Err(default_not_applicable("enumeration", segment));
        }
        self.check_allowed(
            &ModelPart::EnumType(&enum_type),
            IdentifierKind::EnumClass,
            segment.range,
        )?;
        Ok(IdentifierNode::new(
            NodeKind::EnumClass(enum_type.clone()),
            Datatype::Enum(enum_type),
            segment.range,
        ))
    }

    fn enum_value_node(&self, enum_type: &Name, segment: &Segment<'_>) -> Resolution {
        if segment.default_value_access {
            return Err(default_not_applicable("enumeration value", segment));
        }
        let Some(value) = self.lookup.find_enum_value(enum_type, segment.name) else {
            return Err(IdentifierNode::new_invalid(
                ErrorCode::E0202,
                format!(
                    "'{}' is not a value of enumeration '{}'",
                    segment.name, enum_type
                ),
                segment.range,
            ));
        };
        self.check_allowed(
            &ModelPart::EnumValue(&value),
            IdentifierKind::EnumValue,
            segment.range,
        )?;
        Ok(IdentifierNode::new(
            NodeKind::EnumValue(value),
            Datatype::Enum(enum_type.clone()),
            segment.range,
        ))
    }

    fn resolve_suffix(&self, node: &IdentifierNode, suffix: Suffix<'_>) -> Resolution {
        let (association, datatype) = match (node.kind(), node.datatype()) {
            (NodeKind::Association(association), Some(datatype)) => (association, datatype),
            _ => {
                let (code, what, range) = match suffix {
                    Suffix::Index { range, .. } => (ErrorCode::E0303, "Index", range),
                    Suffix::Qualifier { range, .. } => (ErrorCode::E0304, "Qualifier", range),
                };
                return Err(IdentifierNode::new_invalid(
                    code,
                    format!(
                        "{} access is not possible on {} '{}'",
                        what,
                        node.kind().label(),
                        node
                    ),
                    range,
                ));
            }
        };

        match suffix {
            Suffix::Index { value, range } => {
                if !datatype.is_list() {
                    return Err(IdentifierNode::new_invalid(
                        ErrorCode::E0303,
                        format!(
                            "Index access requires a list-valued association but '{}' is {}",
                            association.name, datatype
                        ),
                        range,
                    ));
                }
                Ok(IdentifierNode::new(
                    NodeKind::Index(value),
                    datatype.element().clone(),
                    range,
                ))
            }
            Suffix::Qualifier { value, range } => {
                self.qualifier_node(association, datatype.is_list(), value, range)
            }
        }
    }

    fn qualifier_node(
        &self,
        association: &Association,
        list: bool,
        qualifier: &str,
        range: TextRange,
    ) -> Resolution {
        if !association.qualified {
            return Err(IdentifierNode::new_invalid(
                ErrorCode::E0304,
                format!("Association '{}' is not qualified", association.name),
                range,
            ));
        }

        let Some(cmpt) = self.lookup.find_product_cmpt(qualifier) else {
            return Err(IdentifierNode::new_invalid(
                ErrorCode::E0305,
                format!("Undefined product component '{}'", qualifier),
                range,
            ));
        };

        let policy_type = self
            .lookup
            .configured_policy_type(&cmpt.product_cmpt_type)
            .filter(|policy_type| {
                self.lookup
                    .is_subtype_or_same(policy_type, &association.target)
            });
        let Some(policy_type) = policy_type else {
            return Err(IdentifierNode::new_invalid(
                ErrorCode::E0306,
                format!(
                    "Product component '{}' does not configure '{}'",
                    qualifier, association.target
                ),
                range,
            ));
        };

        trace!("[IDENT] qualifier '{}' -> {}", qualifier, policy_type);
        Ok(IdentifierNode::new(
            NodeKind::Qualifier(cmpt.name),
            Datatype::Type(policy_type).listed_if(list),
            range,
        ))
    }

    fn check_allowed(
        &self,
        part: &ModelPart<'_>,
        kind: IdentifierKind,
        range: TextRange,
    ) -> std::result::Result<(), IdentifierNode> {
        if self.session.filter.is_identifier_allowed(part, kind) {
            return Ok(());
        }
        Err(IdentifierNode::new_invalid(
            ErrorCode::E0301,
            format!("Identifier '{}' ({}) is not allowed", part.name(), kind),
            range,
        ))
    }

    fn datatype_of(
        &self,
        qualified_name: &str,
        owner: &str,
        segment: &Segment<'_>,
    ) -> std::result::Result<Datatype, IdentifierNode> {
        self.lookup.find_datatype(qualified_name).ok_or_else(|| {
            IdentifierNode::new_invalid(
                ErrorCode::E0204,
                format!(
                    "Undefined datatype '{}' of {} '{}'",
                    qualified_name, owner, segment.name
                ),
                segment.range,
            )
        })
    }
}

fn default_not_applicable(what: &str, segment: &Segment<'_>) -> IdentifierNode {
    IdentifierNode::new_invalid(
        ErrorCode::E0302,
        format!(
            "Default value access is not possible on {} '{}'",
            what, segment.name
        ),
        segment.range,
    )
}

fn describe(datatype: Option<&Datatype>) -> String {
    datatype.map_or_else(|| "-".to_string(), Datatype::to_string)
}
