use crate::edges::new_page_key;
use crate::error::{AssembleError, Result};

use xref_model::{
    CrossReferenceGroup, CrossReferencePage, CrossReferencePageIndex, Node, PagedCrossReferences,
};
use xref_pager::{SetFamily, SetPager};
use xref_schema::{self as schema, compare_edge_kinds};

/// Builds one [`PagedCrossReferences`] per source node from a sequence
/// of same-source anchor groups, mirroring [`EdgeSetBuilder`].
///
/// The set is marked `incomplete` unless the source node carries a
/// completeness fact whose value is exactly `definition`.
///
/// [`EdgeSetBuilder`]: crate::EdgeSetBuilder
pub struct CrossReferencesBuilder<FS, FP>
where
    FS: FnMut(PagedCrossReferences) -> Result<()>,
    FP: FnMut(CrossReferencePage) -> Result<()>,
{
    pager: SetPager<CrossReferencesFamily<FS, FP>>,
}

impl<FS, FP> CrossReferencesBuilder<FS, FP>
where
    FS: FnMut(PagedCrossReferences) -> Result<()>,
    FP: FnMut(CrossReferencePage) -> Result<()>,
{
    /// `max_page_size` bounds the anchors per set group and per page;
    /// zero disables paging.
    pub fn new(max_page_size: usize, output: FS, output_page: FP) -> Self {
        Self {
            pager: SetPager::new(CrossReferencesFamily { output, output_page }, max_page_size),
        }
    }

    /// Begin the cross-reference set for `source`, emitting the
    /// previous set.
    pub fn start_set(&mut self, source: Node) -> Result<()> {
        self.pager.start_set(source).map_err(AssembleError::from)
    }

    /// Add the next group of anchors referencing the current source.
    pub fn add_group(&mut self, group: CrossReferenceGroup) -> Result<()> {
        self.pager.add_group(group).map_err(AssembleError::from)
    }

    /// Emit the final cross-reference set being built.
    pub fn flush(&mut self) -> Result<()> {
        self.pager.flush().map_err(AssembleError::from)
    }
}

struct CrossReferencesFamily<FS, FP> {
    output: FS,
    output_page: FP,
}

impl<FS, FP> SetFamily for CrossReferencesFamily<FS, FP>
where
    FS: FnMut(PagedCrossReferences) -> Result<()>,
    FP: FnMut(CrossReferencePage) -> Result<()>,
{
    type Head = Node;
    type Set = PagedCrossReferences;
    type Group = CrossReferenceGroup;
    type Error = AssembleError;

    fn new_set(&mut self, source: Node) -> PagedCrossReferences {
        let incomplete = source
            .facts
            .iter()
            .any(|f| f.name == schema::COMPLETE_FACT && f.value != b"definition");
        PagedCrossReferences {
            source_ticket: source.ticket,
            incomplete,
            ..PagedCrossReferences::default()
        }
    }

    fn combine(
        &mut self,
        prev: &mut CrossReferenceGroup,
        next: CrossReferenceGroup,
    ) -> Option<CrossReferenceGroup> {
        if prev.kind != next.kind {
            return Some(next);
        }
        prev.anchors.extend(next.anchors);
        None
    }

    fn split(&mut self, at: usize, group: CrossReferenceGroup) -> (CrossReferenceGroup, CrossReferenceGroup) {
        let CrossReferenceGroup { kind, mut anchors } = group;
        let rest = anchors.split_off(at);
        (
            CrossReferenceGroup {
                kind: kind.clone(),
                anchors,
            },
            CrossReferenceGroup { kind, anchors: rest },
        )
    }

    fn size(&self, group: &CrossReferenceGroup) -> usize {
        group.anchors.len()
    }

    fn output_set(
        &mut self,
        total: usize,
        mut set: PagedCrossReferences,
        groups: Vec<CrossReferenceGroup>,
    ) -> Result<()> {
        set.groups = groups;
        set.groups.sort_by(|a, b| compare_edge_kinds(&a.kind, &b.kind));
        set.page_indexes.sort_by(|a, b| compare_edge_kinds(&a.kind, &b.kind));
        set.total_references = total as i32;
        (self.output)(set)
    }

    fn output_page(&mut self, set: &mut PagedCrossReferences, group: CrossReferenceGroup) -> Result<()> {
        let page_key = new_page_key(&set.source_ticket, set.page_indexes.len());
        let index = CrossReferencePageIndex {
            page_key: page_key.clone(),
            kind: group.kind.clone(),
            count: group.anchors.len() as i32,
        };
        (self.output_page)(CrossReferencePage {
            page_key,
            source_ticket: set.source_ticket.clone(),
            group,
        })?;
        set.page_indexes.push(index);
        Ok(())
    }
}
