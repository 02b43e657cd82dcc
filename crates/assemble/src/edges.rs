use crate::error::{AssembleError, Result};

use xref_model::{EdgeGroup, EdgePage, Node, PageIndex, PagedEdgeSet};
use xref_pager::{SetFamily, SetPager};
use xref_schema::compare_edge_kinds;

/// Key of a page within its source: the source ticket plus a
/// zero-padded ordinal, dense from 0 in emission order.
#[must_use]
pub fn new_page_key(source_ticket: &str, ordinal: usize) -> String {
    format!("{source_ticket}.{ordinal:010}")
}

/// Builds one [`PagedEdgeSet`] per source node from a sequence of
/// same-source [`EdgeGroup`]s, splitting overflow into [`EdgePage`]s.
///
/// Call [`start_edge_set`](Self::start_edge_set) before the groups of
/// each source and [`flush`](Self::flush) after the final group. Groups
/// for one source are assumed to arrive with equal kinds adjacent; the
/// finished set carries its groups and page indexes sorted by the
/// serving edge-kind order, and `total_edges` counts both.
pub struct EdgeSetBuilder<FS, FP>
where
    FS: FnMut(PagedEdgeSet) -> Result<()>,
    FP: FnMut(EdgePage) -> Result<()>,
{
    pager: SetPager<EdgeSetFamily<FS, FP>>,
}

impl<FS, FP> EdgeSetBuilder<FS, FP>
where
    FS: FnMut(PagedEdgeSet) -> Result<()>,
    FP: FnMut(EdgePage) -> Result<()>,
{
    /// `max_page_size` bounds the edges per set group and per page; zero
    /// disables paging. `output`/`output_page` receive the artifacts.
    pub fn new(max_page_size: usize, output: FS, output_page: FP) -> Self {
        Self {
            pager: SetPager::new(EdgeSetFamily { output, output_page }, max_page_size),
        }
    }

    /// Begin the edge set for `source`, emitting the previous set.
    pub fn start_edge_set(&mut self, source: Node) -> Result<()> {
        self.pager.start_set(source).map_err(AssembleError::from)
    }

    /// Add the next group of the current source's edges.
    pub fn add_group(&mut self, group: EdgeGroup) -> Result<()> {
        self.pager.add_group(group).map_err(AssembleError::from)
    }

    /// Emit the final edge set being built.
    pub fn flush(&mut self) -> Result<()> {
        self.pager.flush().map_err(AssembleError::from)
    }
}

struct EdgeSetFamily<FS, FP> {
    output: FS,
    output_page: FP,
}

impl<FS, FP> SetFamily for EdgeSetFamily<FS, FP>
where
    FS: FnMut(PagedEdgeSet) -> Result<()>,
    FP: FnMut(EdgePage) -> Result<()>,
{
    type Head = Node;
    type Set = PagedEdgeSet;
    type Group = EdgeGroup;
    type Error = AssembleError;

    fn new_set(&mut self, source: Node) -> PagedEdgeSet {
        PagedEdgeSet {
            source,
            ..PagedEdgeSet::default()
        }
    }

    fn combine(&mut self, prev: &mut EdgeGroup, next: EdgeGroup) -> Option<EdgeGroup> {
        if prev.kind != next.kind {
            return Some(next);
        }
        prev.edges.extend(next.edges);
        None
    }

    fn split(&mut self, at: usize, group: EdgeGroup) -> (EdgeGroup, EdgeGroup) {
        let EdgeGroup { kind, mut edges } = group;
        let rest = edges.split_off(at);
        (
            EdgeGroup {
                kind: kind.clone(),
                edges,
            },
            EdgeGroup { kind, edges: rest },
        )
    }

    fn size(&self, group: &EdgeGroup) -> usize {
        group.edges.len()
    }

    fn output_set(
        &mut self,
        total: usize,
        mut set: PagedEdgeSet,
        groups: Vec<EdgeGroup>,
    ) -> Result<()> {
        set.groups = groups;
        set.groups.sort_by(|a, b| compare_edge_kinds(&a.kind, &b.kind));
        set.page_indexes
            .sort_by(|a, b| compare_edge_kinds(&a.edge_kind, &b.edge_kind));
        set.total_edges = total as i32;
        (self.output)(set)
    }

    fn output_page(&mut self, set: &mut PagedEdgeSet, group: EdgeGroup) -> Result<()> {
        let page_key = new_page_key(&set.source.ticket, set.page_indexes.len());
        let index = PageIndex {
            page_key: page_key.clone(),
            edge_kind: group.kind.clone(),
            edge_count: group.edges.len() as i32,
        };
        (self.output_page)(EdgePage {
            page_key,
            source_ticket: set.source.ticket.clone(),
            edges_group: group,
        })?;
        set.page_indexes.push(index);
        Ok(())
    }
}
