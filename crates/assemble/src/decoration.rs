use crate::error::Result;
use crate::source::{facts_to_map, get_fact};

use xref_model::{Decoration, Edge, File, FileDecorations, RawAnchor};
use xref_schema as schema;

/// Streaming builder of [`FileDecorations`] fragments.
///
/// Consumes the sorted reverse-edge stream: each run of edges sharing a
/// source opens with a header edge (no kind, no target) carrying the
/// completed source node. File headers emit a file fragment at once;
/// anchor headers arm the builder so the run's remaining edges become
/// decorations attributed to the anchor's parent files.
///
/// Within a run, `childof` edges to file nodes are expected before the
/// decoration edges; decorations seen before any parent is known are
/// held until the next parent or the final [`flush`](Self::flush).
/// Fragments are pushed to the output callback as they complete, so the
/// builder holds at most one anchor's state. Call `flush` after the
/// last edge.
pub struct DecorationFragmentBuilder<F>
where
    F: FnMut(&str, FileDecorations) -> Result<()>,
{
    output: F,

    anchor: Option<RawAnchor>,
    decorations: Vec<Decoration>,
    parents: Vec<String>,
}

impl<F> DecorationFragmentBuilder<F>
where
    F: FnMut(&str, FileDecorations) -> Result<()>,
{
    /// `output` receives each finished fragment keyed by file ticket.
    pub fn new(output: F) -> Self {
        Self {
            output,
            anchor: None,
            decorations: Vec::new(),
            parents: Vec::new(),
        }
    }

    /// Feed the next edge of the sorted reverse-edge stream.
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        let Some(target) = edge.target else {
            // Header: a new source begins.
            self.flush()?;
            return self.start_run(&edge.source.ticket, &edge.source.facts);
        };

        let Some(anchor) = &self.anchor else {
            // Edges of non-anchor nodes carry no decorations.
            return Ok(());
        };

        if edge.kind == schema::CHILD_OF_EDGE {
            if get_fact(&target.facts, schema::NODE_KIND_FACT) == Some(schema::FILE_KIND.as_bytes())
            {
                self.parents.push(target.ticket);
            }
            return Ok(());
        }

        self.decorations.push(Decoration {
            anchor: anchor.clone(),
            kind: edge.kind,
            target,
        });
        if !self.parents.is_empty() {
            let fragment =
                FileDecorations::decoration_fragment(std::mem::take(&mut self.decorations));
            for parent in &self.parents {
                (self.output)(parent, fragment.clone())?;
            }
        }
        Ok(())
    }

    fn start_run(&mut self, ticket: &str, facts: &[xref_model::Fact]) -> Result<()> {
        let facts = facts_to_map(facts);
        match facts.get(schema::NODE_KIND_FACT).copied() {
            Some(kind) if kind == schema::FILE_KIND.as_bytes() => {
                let fragment = FileDecorations::file_fragment(File {
                    ticket: ticket.to_string(),
                    text: facts.get(schema::TEXT_FACT).copied().unwrap_or_default().to_vec(),
                    encoding: String::from_utf8_lossy(
                        facts.get(schema::TEXT_ENCODING_FACT).copied().unwrap_or_default(),
                    )
                    .into_owned(),
                });
                (self.output)(ticket, fragment)
            }
            Some(kind) if kind == schema::ANCHOR_KIND.as_bytes() => {
                if facts.get(schema::SUBKIND_FACT).copied()
                    == Some(schema::IMPLICIT_SUBKIND.as_bytes())
                {
                    // Implicit anchors never become decorations.
                    return Ok(());
                }
                let Some(start_offset) = parse_offset(&facts, schema::ANCHOR_START_FACT) else {
                    log::warn!(
                        "dropping anchor {ticket}: unparsable start offset {:?}",
                        lossy(&facts, schema::ANCHOR_START_FACT)
                    );
                    return Ok(());
                };
                let Some(end_offset) = parse_offset(&facts, schema::ANCHOR_END_FACT) else {
                    log::warn!(
                        "dropping anchor {ticket}: unparsable end offset {:?}",
                        lossy(&facts, schema::ANCHOR_END_FACT)
                    );
                    return Ok(());
                };
                self.anchor = Some(RawAnchor {
                    ticket: ticket.to_string(),
                    start_offset,
                    end_offset,
                    // Absent or unparsable snippet offsets stay zero.
                    snippet_start: parse_offset(&facts, schema::SNIPPET_START_FACT).unwrap_or(0),
                    snippet_end: parse_offset(&facts, schema::SNIPPET_END_FACT).unwrap_or(0),
                });
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Emit any pending decorations to the current parents and reset.
    ///
    /// Safe to call between runs; a second flush is a no-op.
    pub fn flush(&mut self) -> Result<()> {
        self.anchor = None;
        let decorations = std::mem::take(&mut self.decorations);
        let parents = std::mem::take(&mut self.parents);
        if !decorations.is_empty() && !parents.is_empty() {
            let fragment = FileDecorations::decoration_fragment(decorations);
            for parent in &parents {
                (self.output)(parent, fragment.clone())?;
            }
        }
        Ok(())
    }
}

fn parse_offset(facts: &std::collections::HashMap<&str, &[u8]>, name: &str) -> Option<i32> {
    let raw = facts.get(name).copied()?;
    std::str::from_utf8(raw).ok()?.trim().parse().ok()
}

fn lossy<'a>(facts: &'a std::collections::HashMap<&str, &[u8]>, name: &str) -> std::borrow::Cow<'a, str> {
    String::from_utf8_lossy(facts.get(name).copied().unwrap_or_default())
}
