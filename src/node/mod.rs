//! Identifier nodes: the typed chain an identifier resolves to.
//!
//! `coverage[2].limit` becomes three nodes:
//!
//! ```text
//! Association(coverage) : List<Coverage>   [0, 8)
//!   └─ Index(2)         : Coverage         [8, 11)
//!        └─ Attribute(limit) : Money       [12, 17)
//! ```
//!
//! Each node owns its successor, so the head owns the whole chain. Nodes are
//! built once by the parser and never change afterwards. A chain that failed
//! to resolve ends in a single [`NodeKind::Invalid`] node.

use std::fmt;
use std::ops::Range;

use crate::base::{Name, TextRange};
use crate::diagnostics::ErrorCode;
use crate::model::{Association, Attribute, Datatype, EnumValue, Parameter};

/// Keyword following `@` for default value access.
pub const DEFAULT_VALUE_KEYWORD: &str = "default";

/// What a node refers to.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// A formula parameter.
    Parameter(Parameter),
    /// An attribute; `default_value_access` for `attribute@default`.
    Attribute {
        attribute: Attribute,
        default_value_access: bool,
    },
    /// An association to another model type.
    Association(Association),
    /// `[n]` after a list-valued association.
    Index(u32),
    /// `["ProductCmpt"]` after a qualified association.
    Qualifier(Name),
    /// An enumeration type used as the first segment.
    EnumClass(Name),
    /// A value of the enumeration the previous node resolves to.
    EnumValue(EnumValue),
    /// The segment could not be resolved.
    Invalid(InvalidIdentifier),
}

impl NodeKind {
    /// Check if this is the invalid marker.
    pub fn is_invalid(&self) -> bool {
        matches!(self, NodeKind::Invalid(_))
    }

    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Parameter(_) => "parameter",
            NodeKind::Attribute { .. } => "attribute",
            NodeKind::Association(_) => "association",
            NodeKind::Index(_) => "index",
            NodeKind::Qualifier(_) => "qualifier",
            NodeKind::EnumClass(_) => "enum class",
            NodeKind::EnumValue(_) => "enum value",
            NodeKind::Invalid(_) => "invalid",
        }
    }
}

/// Diagnostic of a segment that could not be resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InvalidIdentifier {
    pub code: ErrorCode,
    pub message: String,
}

impl InvalidIdentifier {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Format the diagnostic for display
    pub fn format(&self) -> String {
        format!("{}: {}", self.code, self.message)
    }
}

/// One resolved segment of an identifier chain.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdentifierNode {
    kind: NodeKind,
    /// `None` only for invalid nodes.
    datatype: Option<Datatype>,
    range: TextRange,
    successor: Option<Box<IdentifierNode>>,
}

impl IdentifierNode {
    pub(crate) fn new(kind: NodeKind, datatype: Datatype, range: TextRange) -> Self {
        Self {
            kind,
            datatype: Some(datatype),
            range,
            successor: None,
        }
    }

    pub(crate) fn new_invalid(
        code: ErrorCode,
        message: impl Into<String>,
        range: TextRange,
    ) -> Self {
        Self {
            kind: NodeKind::Invalid(InvalidIdentifier::new(code, message)),
            datatype: None,
            range,
            successor: None,
        }
    }

    /// Link nodes in order, returning the head. `None` for no nodes.
    pub(crate) fn link(nodes: Vec<IdentifierNode>) -> Option<IdentifierNode> {
        nodes.into_iter().rev().fold(None, |successor, mut node| {
            node.successor = successor.map(Box::new);
            Some(node)
        })
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Resolved datatype of the expression ending at this node.
    pub fn datatype(&self) -> Option<&Datatype> {
        self.datatype.as_ref()
    }

    /// Byte range of the segment text this node was built from.
    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn successor(&self) -> Option<&IdentifierNode> {
        self.successor.as_deref()
    }

    /// Check if this node resolves to a list.
    pub fn is_list_of_types(&self) -> bool {
        self.datatype.as_ref().is_some_and(Datatype::is_list)
    }

    /// Check if neither this node nor any successor is invalid.
    pub fn is_valid(&self) -> bool {
        self.invalid().is_none()
    }

    /// The invalid node of this chain, if any.
    pub fn invalid(&self) -> Option<&IdentifierNode> {
        self.iter().find(|node| node.kind.is_invalid())
    }

    /// Diagnostic of the invalid node of this chain, if any.
    pub fn diagnostic(&self) -> Option<&InvalidIdentifier> {
        self.iter().find_map(|node| match &node.kind {
            NodeKind::Invalid(invalid) => Some(invalid),
            _ => None,
        })
    }

    /// Iterate over this node and all its successors.
    pub fn iter(&self) -> Iter<'_> {
        Iter { next: Some(self) }
    }

    /// The last node of the chain.
    pub fn last(&self) -> &IdentifierNode {
        let mut node = self;
        while let Some(next) = node.successor() {
            node = next;
        }
        node
    }

    /// Number of nodes from here to the end of the chain.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Slice of `source` covered by this node.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source
            .get(Range::<usize>::from(self.range))
            .unwrap_or_default()
    }

    /// Serialize the chain back into identifier syntax.
    ///
    /// Invalid nodes carry no resolved name and are left out.
    pub fn to_identifier_string(&self) -> String {
        let mut out = String::new();
        for node in self.iter() {
            match &node.kind {
                NodeKind::Index(index) => out.push_str(&format!("[{}]", index)),
                NodeKind::Qualifier(qualifier) => out.push_str(&format!("[\"{}\"]", qualifier)),
                NodeKind::Invalid(_) => {}
                kind => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    match kind {
                        NodeKind::Parameter(param) => out.push_str(&param.name),
                        NodeKind::Attribute {
                            attribute,
                            default_value_access,
                        } => {
                            out.push_str(&attribute.name);
                            if *default_value_access {
                                out.push('@');
                                out.push_str(DEFAULT_VALUE_KEYWORD);
                            }
                        }
                        NodeKind::Association(assoc) => out.push_str(&assoc.name),
                        NodeKind::EnumClass(name) => out.push_str(name),
                        NodeKind::EnumValue(value) => out.push_str(&value.id),
                        NodeKind::Index(_) | NodeKind::Qualifier(_) | NodeKind::Invalid(_) => {}
                    }
                }
            }
        }
        out
    }
}

impl fmt::Display for IdentifierNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_identifier_string())
    }
}

impl<'a> IntoIterator for &'a IdentifierNode {
    type Item = &'a IdentifierNode;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a node and its successors.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    next: Option<&'a IdentifierNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a IdentifierNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.successor();
        Some(node)
    }
}
