use std::collections::{BTreeMap, BTreeSet, HashMap};

use xref_model::{Edge, Entry, Fact, Node};
use xref_schema as schema;

/// The bundle of facts and outgoing edges shared by one source VName.
///
/// Facts hold at most one value per name (later entries overwrite
/// earlier ones); per-kind edge lists are de-duplicated and sorted by
/// (ordinal, target ticket).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Source {
    pub ticket: String,
    pub facts: BTreeMap<String, Vec<u8>>,
    /// Base edge kind (ordinal stripped) to ordered targets.
    pub edges: BTreeMap<String, Vec<EdgeTarget>>,
}

/// A target of an edge with its ordinal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct EdgeTarget {
    pub ordinal: i32,
    pub ticket: String,
}

impl Source {
    /// Group a batch of entries sharing a source VName into a Source.
    ///
    /// The caller batches entries by source; they arrive consecutively
    /// in the sorted entry stream. An empty batch yields `None`.
    #[must_use]
    pub fn from_entries(entries: &[Entry]) -> Option<Source> {
        let first = entries.first()?;

        let mut facts = BTreeMap::new();
        // base kind -> target ticket -> ordinal set
        let mut edges: BTreeMap<String, BTreeMap<String, BTreeSet<i32>>> = BTreeMap::new();

        for entry in entries {
            if entry.is_edge() {
                let Some(target) = &entry.target else { continue };
                let Some(kind) = entry.edge_kind.as_deref() else { continue };
                let (base, ordinal, _) = schema::parse_ordinal(kind);
                edges
                    .entry(base.to_string())
                    .or_default()
                    .entry(target.ticket())
                    .or_default()
                    .insert(ordinal);
            } else {
                facts.insert(entry.fact_name.clone(), entry.fact_value.clone());
            }
        }

        let edges = edges
            .into_iter()
            .map(|(kind, targets)| {
                let mut list: Vec<EdgeTarget> = targets
                    .into_iter()
                    .flat_map(|(ticket, ordinals)| {
                        ordinals.into_iter().map(move |ordinal| EdgeTarget {
                            ordinal,
                            ticket: ticket.clone(),
                        })
                    })
                    .collect();
                list.sort();
                (kind, list)
            })
            .collect();

        Some(Source {
            ticket: first.source.ticket(),
            facts,
            edges,
        })
    }

    /// The canonical transport node for this source.
    #[must_use]
    pub fn node(&self) -> Node {
        let facts = self
            .facts
            .iter()
            .map(|(name, value)| Fact::new(name.clone(), value.clone()))
            .collect();
        // BTreeMap iteration already yields facts sorted by name.
        Node {
            ticket: self.ticket.clone(),
            facts,
        }
    }
}

/// Index a node's fact list by name.
#[must_use]
pub fn facts_to_map(facts: &[Fact]) -> HashMap<&str, &[u8]> {
    facts
        .iter()
        .map(|f| (f.name.as_str(), f.value.as_slice()))
        .collect()
}

/// The value of the first fact named `name`, if any.
#[must_use]
pub fn get_fact<'a>(facts: &'a [Fact], name: &str) -> Option<&'a [u8]> {
    facts.iter().find(|f| f.name == name).map(|f| f.value.as_slice())
}

/// A copy of `node` without its text facts.
///
/// Edge targets repeat on every inbound edge, so carrying file text on
/// them would multiply storage by the fan-in.
#[must_use]
pub fn filter_text_facts(node: &Node) -> Node {
    Node {
        ticket: node.ticket.clone(),
        facts: node
            .facts
            .iter()
            .filter(|f| f.name != schema::TEXT_FACT && f.name != schema::TEXT_ENCODING_FACT)
            .cloned()
            .collect(),
    }
}

/// The partial reverse edges of `src`: a leading self-edge (header) so
/// every node contributes a run to the sorted stream, then one edge per
/// (kind, target, ordinal) with source and target swapped and the kind
/// mirrored. The carried target node has its text facts filtered.
#[must_use]
pub fn partial_reverse_edges(src: &Source) -> Vec<Edge> {
    let node = src.node();
    let target = filter_text_facts(&node);

    let mut edges = vec![Edge::header(node)];
    for (kind, targets) in &src.edges {
        let rev = schema::mirror(kind);
        for t in targets {
            edges.push(Edge {
                source: Node::with_ticket(t.ticket.clone()),
                kind: rev.clone(),
                ordinal: t.ordinal,
                target: Some(target.clone()),
            });
        }
    }
    edges
}
