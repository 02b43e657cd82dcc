//! End-to-end: entries through sources, reverse edges, an external
//! sort, and the decoration / edge-set / cross-reference builders.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use xref_assemble::{
    cross_reference, partial_reverse_edges, CrossReferencesBuilder, DecorationFragmentBuilder,
    EdgeSetBuilder, Source,
};
use xref_model::{
    CrossReferenceGroup, Edge, EdgeGroup, EdgeSetEdge, Entry, FileDecorations, Node, VName,
};
use xref_schema as schema;
use xref_text::Normalizer;

fn vname(path: &str, signature: &str) -> VName {
    VName {
        corpus: "corpus".into(),
        root: String::new(),
        path: path.into(),
        language: "rust".into(),
        signature: signature.into(),
    }
}

/// The test graph: file `lib.rs` containing "foo\nbar\nbaz", an anchor
/// over "bar" that references function `bar`, and the function node.
fn entries() -> Vec<Entry> {
    let file = vname("lib.rs", "");
    let anchor = vname("lib.rs", "a[4,7)");
    let func = vname("lib.rs", "fn:bar");

    vec![
        Entry::fact(file.clone(), schema::NODE_KIND_FACT, b"file".to_vec()),
        Entry::fact(file.clone(), schema::TEXT_FACT, b"foo\nbar\nbaz".to_vec()),
        Entry::fact(file.clone(), schema::TEXT_ENCODING_FACT, b"utf-8".to_vec()),
        Entry::fact(anchor.clone(), schema::NODE_KIND_FACT, b"anchor".to_vec()),
        Entry::fact(anchor.clone(), schema::ANCHOR_START_FACT, b"4".to_vec()),
        Entry::fact(anchor.clone(), schema::ANCHOR_END_FACT, b"7".to_vec()),
        Entry::edge(anchor.clone(), schema::CHILD_OF_EDGE, file.clone()),
        Entry::edge(anchor.clone(), schema::REF_EDGE, func.clone()),
        Entry::fact(func.clone(), schema::NODE_KIND_FACT, b"function".to_vec()),
        Entry::fact(func.clone(), schema::COMPLETE_FACT, b"definition".to_vec()),
    ]
}

/// Batch entries by source VName, preserving stream order.
fn sources(entries: &[Entry]) -> Vec<Source> {
    let mut batches: BTreeMap<String, Vec<Entry>> = BTreeMap::new();
    for entry in entries {
        batches
            .entry(entry.source.ticket())
            .or_default()
            .push(entry.clone());
    }
    batches
        .into_values()
        .filter_map(|batch| Source::from_entries(&batch))
        .collect()
}

/// The completed, re-sorted edge stream the downstream builders read:
/// every source's header first, then its completed forward and reverse
/// edges in kind order.
fn completed_stream(sources: &[Source]) -> Vec<Edge> {
    let nodes: BTreeMap<String, Node> = sources
        .iter()
        .map(|s| (s.ticket.clone(), s.node()))
        .collect();

    let mut runs: BTreeMap<String, Vec<Edge>> = BTreeMap::new();
    for source in sources {
        // Reverse edges land in their target's run with the completed
        // source node attached.
        for edge in partial_reverse_edges(source) {
            runs.entry(edge.source.ticket.clone()).or_default().push(edge);
        }
        // Forward edges land in their own run with completed targets.
        for (kind, targets) in &source.edges {
            for target in targets {
                let completed = nodes
                    .get(&target.ticket)
                    .cloned()
                    .unwrap_or_else(|| Node::with_ticket(target.ticket.clone()));
                runs.entry(source.ticket.clone()).or_default().push(Edge {
                    source: Node::with_ticket(source.ticket.clone()),
                    kind: kind.clone(),
                    ordinal: target.ordinal,
                    target: Some(xref_assemble::filter_text_facts(&completed)),
                });
            }
        }
    }

    let mut stream = Vec::new();
    for (_, mut run) in runs {
        // Headers carry an empty kind, so this sort keeps them first.
        run.sort_by(|a, b| {
            (a.kind.as_str(), a.target.as_ref().map(|t| t.ticket.as_str()))
                .cmp(&(b.kind.as_str(), b.target.as_ref().map(|t| t.ticket.as_str())))
        });
        stream.extend(run);
    }
    stream
}

#[test]
fn decorations_come_out_of_the_sorted_stream() {
    let sources = sources(&entries());
    let stream = completed_stream(&sources);

    let emitted: Rc<RefCell<Vec<(String, FileDecorations)>>> = Default::default();
    let sink = Rc::clone(&emitted);
    let mut builder = DecorationFragmentBuilder::new(move |file, fragment| {
        sink.borrow_mut().push((file.to_string(), fragment));
        Ok(())
    });
    for edge in stream {
        builder.add_edge(edge).unwrap();
    }
    builder.flush().unwrap();

    let emitted = emitted.borrow();
    let file_ticket = vname("lib.rs", "").ticket();

    let file_fragments: Vec<_> = emitted.iter().filter(|(_, f)| f.file.is_some()).collect();
    assert_eq!(file_fragments.len(), 1);
    assert_eq!(file_fragments[0].0, file_ticket);
    let file = file_fragments[0].1.file.as_ref().unwrap();
    assert_eq!(file.text, b"foo\nbar\nbaz");
    assert_eq!(file.encoding, "utf-8");

    let decoration_fragments: Vec<_> =
        emitted.iter().filter(|(_, f)| !f.decorations.is_empty()).collect();
    assert_eq!(decoration_fragments.len(), 1);
    assert_eq!(decoration_fragments[0].0, file_ticket);
    let decoration = &decoration_fragments[0].1.decorations[0];
    assert_eq!(decoration.kind, schema::REF_EDGE);
    assert_eq!(decoration.anchor.start_offset, 4);
    assert_eq!(decoration.anchor.end_offset, 7);
    assert_eq!(decoration.target.ticket, vname("lib.rs", "fn:bar").ticket());
}

#[test]
fn edge_sets_cover_every_stream_edge() {
    let sources = sources(&entries());
    let stream = completed_stream(&sources);

    let sets: Rc<RefCell<Vec<xref_model::PagedEdgeSet>>> = Default::default();
    let pages: Rc<RefCell<Vec<xref_model::EdgePage>>> = Default::default();
    let set_sink = Rc::clone(&sets);
    let page_sink = Rc::clone(&pages);
    let mut builder = EdgeSetBuilder::new(
        2,
        move |set| {
            set_sink.borrow_mut().push(set);
            Ok(())
        },
        move |page| {
            page_sink.borrow_mut().push(page);
            Ok(())
        },
    );

    let mut fed = 0;
    for edge in stream {
        match edge.target {
            None => builder.start_edge_set(edge.source).unwrap(),
            Some(target) => {
                fed += 1;
                builder
                    .add_group(EdgeGroup {
                        kind: edge.kind,
                        edges: vec![EdgeSetEdge {
                            target,
                            ordinal: edge.ordinal,
                        }],
                    })
                    .unwrap();
            }
        }
    }
    builder.flush().unwrap();

    let sets = sets.borrow();
    // One set per node in the graph.
    assert_eq!(sets.len(), 3);
    let total: i32 = sets.iter().map(|s| s.total_edges).sum();
    let in_pages: usize = pages.borrow().iter().map(|p| p.edges_group.edges.len()).sum();
    let in_sets: usize = sets
        .iter()
        .flat_map(|s| &s.groups)
        .map(|g| g.edges.len())
        .sum();
    assert_eq!(total as usize, fed);
    assert_eq!(in_pages + in_sets, fed);

    // The anchor's set holds its two forward edges, childof after ref
    // in serving order.
    let anchor_ticket = vname("lib.rs", "a[4,7)").ticket();
    let anchor_set = sets.iter().find(|s| s.source.ticket == anchor_ticket).unwrap();
    let kinds: Vec<_> = anchor_set.groups.iter().map(|g| g.kind.as_str()).collect();
    assert_eq!(kinds, [schema::REF_EDGE, schema::CHILD_OF_EDGE]);
}

#[test]
fn cross_references_expand_out_of_decorations() {
    let sources = sources(&entries());
    let stream = completed_stream(&sources);

    // Collect the file and the decorations exactly as a caller would.
    let fragments: Rc<RefCell<Vec<(String, FileDecorations)>>> = Default::default();
    let sink = Rc::clone(&fragments);
    let mut builder = DecorationFragmentBuilder::new(move |file, fragment| {
        sink.borrow_mut().push((file.to_string(), fragment));
        Ok(())
    });
    for edge in stream {
        builder.add_edge(edge).unwrap();
    }
    builder.flush().unwrap();

    let fragments = fragments.borrow();
    let file = fragments
        .iter()
        .find_map(|(_, f)| f.file.clone())
        .unwrap();
    let norm = Normalizer::new(&file.text);

    let sets: Rc<RefCell<Vec<xref_model::PagedCrossReferences>>> = Default::default();
    let set_sink = Rc::clone(&sets);
    let mut xrefs = CrossReferencesBuilder::new(
        0,
        move |set| {
            set_sink.borrow_mut().push(set);
            Ok(())
        },
        |_page| Ok(()),
    );

    for (_, fragment) in fragments.iter() {
        for decoration in &fragment.decorations {
            let xref = cross_reference(Some(&file), Some(&norm), decoration).unwrap();
            xrefs.start_set(xref.referent.clone()).unwrap();
            xrefs
                .add_group(CrossReferenceGroup {
                    kind: xref.target_anchor.kind.clone(),
                    anchors: vec![xref.target_anchor],
                })
                .unwrap();
        }
    }
    xrefs.flush().unwrap();

    let sets = sets.borrow();
    assert_eq!(sets.len(), 1);
    let set = &sets[0];
    assert_eq!(set.source_ticket, vname("lib.rs", "fn:bar").ticket());
    // The function is a definition, so its references are complete.
    assert!(!set.incomplete);
    assert_eq!(set.total_references, 1);
    let anchor = &set.groups[0].anchors[0];
    assert_eq!(anchor.kind, "%/kythe/edge/ref");
    assert_eq!(anchor.text, "bar");
    assert_eq!(anchor.snippet, "bar");
}
