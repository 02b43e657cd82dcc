use serde::{Deserialize, Serialize};
use xref_ticket::VName;

/// A single fact or edge record in the entry stream.
///
/// The record is an edge when `edge_kind` is non-empty; otherwise it
/// attaches the named fact to `source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub source: VName,

    /// Edge kind, possibly carrying an `.N` ordinal suffix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<VName>,

    pub fact_name: String,
    pub fact_value: Vec<u8>,
}

impl Entry {
    /// Attach a fact to a source node.
    pub fn fact(source: VName, name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            source,
            edge_kind: None,
            target: None,
            fact_name: name.into(),
            fact_value: value.into(),
        }
    }

    /// Record an edge between two nodes.
    pub fn edge(source: VName, kind: impl Into<String>, target: VName) -> Self {
        Self {
            source,
            edge_kind: Some(kind.into()),
            target: Some(target),
            fact_name: String::new(),
            fact_value: Vec::new(),
        }
    }

    /// Whether this entry records an edge rather than a fact.
    #[must_use]
    pub fn is_edge(&self) -> bool {
        self.edge_kind.as_deref().is_some_and(|kind| !kind.is_empty())
    }
}

/// A named fact value attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    pub name: String,
    pub value: Vec<u8>,
}

impl Fact {
    pub fn new(name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Canonical transport form of a node: its ticket plus facts sorted
/// ascending by fact name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub ticket: String,
    pub facts: Vec<Fact>,
}

impl Node {
    /// A node with the given facts, sorted into canonical order.
    pub fn new(ticket: impl Into<String>, mut facts: Vec<Fact>) -> Self {
        facts.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            ticket: ticket.into(),
            facts,
        }
    }

    /// A bare node with a ticket and no facts.
    pub fn with_ticket(ticket: impl Into<String>) -> Self {
        Self {
            ticket: ticket.into(),
            facts: Vec::new(),
        }
    }

    /// The value of the first fact named `name`, if any.
    #[must_use]
    pub fn fact(&self, name: &str) -> Option<&[u8]> {
        self.facts
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_slice())
    }
}

/// Streaming form of an edge between two completed nodes.
///
/// A header edge has a source but no kind and no target; it signals the
/// start of a run of edges sharing that source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: Node,
    pub kind: String,
    pub ordinal: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Node>,
}

impl Edge {
    /// The header edge opening a run for `source`.
    pub fn header(source: Node) -> Self {
        Self {
            source,
            kind: String::new(),
            ordinal: 0,
            target: None,
        }
    }

    /// Whether this edge is a run header.
    #[must_use]
    pub fn is_header(&self) -> bool {
        self.target.is_none()
    }
}
