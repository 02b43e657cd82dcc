use crate::{ExpandedAnchor, Node};
use serde::{Deserialize, Serialize};

/// A same-kind batch of edges inside a paged edge set or an edge page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeGroup {
    pub kind: String,
    pub edges: Vec<EdgeSetEdge>,
}

/// One edge of an [`EdgeGroup`]: its target node and ordinal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSetEdge {
    pub target: Node,
    pub ordinal: i32,
}

/// Reference to an evicted page: where it lives and what it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageIndex {
    pub page_key: String,
    pub edge_kind: String,
    pub edge_count: i32,
}

/// A node's outgoing edges, grouped by kind, with overflow split into
/// pages referenced by `page_indexes`.
///
/// `total_edges` counts every edge across the in-set groups and all
/// referenced pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedEdgeSet {
    pub source: Node,
    pub groups: Vec<EdgeGroup>,
    pub page_indexes: Vec<PageIndex>,
    pub total_edges: i32,
}

/// An overflow page holding a single edge group for one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgePage {
    pub page_key: String,
    pub source_ticket: String,
    pub edges_group: EdgeGroup,
}

/// A same-kind batch of expanded anchors referencing one node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossReferenceGroup {
    pub kind: String,
    pub anchors: Vec<ExpandedAnchor>,
}

/// Reference to an evicted cross-reference page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossReferencePageIndex {
    pub page_key: String,
    pub kind: String,
    pub count: i32,
}

/// A node's inbound references, grouped by kind and paged like
/// [`PagedEdgeSet`].
///
/// `incomplete` is derived from the node's completeness fact: true
/// unless the node is marked a definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedCrossReferences {
    pub source_ticket: String,
    pub incomplete: bool,
    pub groups: Vec<CrossReferenceGroup>,
    pub page_indexes: Vec<CrossReferencePageIndex>,
    pub total_references: i32,
}

/// An overflow page holding a single cross-reference group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossReferencePage {
    pub page_key: String,
    pub source_ticket: String,
    pub group: CrossReferenceGroup,
}
