//! # Xref Pager
//!
//! A generic paging engine for building bounded-size serving sets.
//!
//! Groups are fed in head order: [`SetPager::start_set`] opens the set
//! for a new head (flushing the previous one), [`SetPager::add_group`]
//! merges each group into the buffered tail when kinds match, and any
//! tail that reaches the page size is split off and emitted as a page.
//! [`SetPager::flush`] emits the remaining groups as the set itself.
//!
//! The caller supplies the domain through a [`SetFamily`]; the pager
//! guarantees that the sizes of all emitted pages plus the sizes of the
//! groups handed to [`SetFamily::output_set`] add up to the total size
//! of everything fed in, and that each page holds a single-kind group.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PagerError<E> {
    #[error("no active set; start_set must be called first")]
    NoActiveSet,

    #[error("output callback failed: {0}")]
    Output(E),
}

pub type Result<T, E> = std::result::Result<T, PagerError<E>>;

/// The domain hooks a [`SetPager`] is instantiated over.
///
/// `Head` seeds a new set, `Group` is the unit of accumulation, and the
/// two output hooks receive finished artifacts. Output hooks may fail;
/// the pager propagates the error and emits nothing further for the
/// current batch.
pub trait SetFamily {
    type Head;
    type Set;
    type Group;
    type Error;

    /// Construct the set for a new head.
    fn new_set(&mut self, head: Self::Head) -> Self::Set;

    /// Merge `next` into `prev` when the two carry the same kind.
    ///
    /// Returns `next` unchanged when the groups cannot be combined, in
    /// which case the pager buffers it as a new tail group.
    fn combine(&mut self, prev: &mut Self::Group, next: Self::Group) -> Option<Self::Group>;

    /// Split `group` into its first `at` elements and the remainder.
    fn split(&mut self, at: usize, group: Self::Group) -> (Self::Group, Self::Group);

    /// Number of elements in `group`.
    fn size(&self, group: &Self::Group) -> usize;

    /// Receive the finished set together with its retained groups and
    /// the total element count across the set and all emitted pages.
    fn output_set(
        &mut self,
        total: usize,
        set: Self::Set,
        groups: Vec<Self::Group>,
    ) -> std::result::Result<(), Self::Error>;

    /// Receive one evicted page-sized group. The set is mutable so the
    /// family can record a page index on it.
    fn output_page(
        &mut self,
        set: &mut Self::Set,
        group: Self::Group,
    ) -> std::result::Result<(), Self::Error>;
}

/// Streaming pager over a [`SetFamily`].
///
/// Buffers at most one head's worth of groups; not safe for concurrent
/// use. A `max_page_size` of zero disables paging entirely, producing
/// exactly one group per kind and no pages.
pub struct SetPager<F: SetFamily> {
    family: F,
    max_page_size: usize,

    set: Option<F::Set>,
    groups: Vec<F::Group>,
    total: usize,
}

impl<F: SetFamily> SetPager<F> {
    pub fn new(family: F, max_page_size: usize) -> Self {
        Self {
            family,
            max_page_size,
            set: None,
            groups: Vec::new(),
            total: 0,
        }
    }

    /// Open a set for `head`, flushing any set currently being built.
    pub fn start_set(&mut self, head: F::Head) -> Result<(), F::Error> {
        self.flush()?;
        self.set = Some(self.family.new_set(head));
        Ok(())
    }

    /// Fold `group` into the current set, evicting full pages as the
    /// buffered tail crosses the page size.
    pub fn add_group(&mut self, group: F::Group) -> Result<(), F::Error> {
        if self.set.is_none() {
            return Err(PagerError::NoActiveSet);
        }

        self.total += self.family.size(&group);
        let unmerged = match self.groups.last_mut() {
            Some(prev) => self.family.combine(prev, group),
            None => Some(group),
        };
        if let Some(group) = unmerged {
            self.groups.push(group);
        }

        if self.max_page_size == 0 {
            return Ok(());
        }
        loop {
            let Some(tail) = self.groups.pop() else { break };
            if self.family.size(&tail) < self.max_page_size {
                self.groups.push(tail);
                break;
            }
            let (page, rest) = self.family.split(self.max_page_size, tail);
            let Some(set) = self.set.as_mut() else { break };
            self.family.output_page(set, page).map_err(PagerError::Output)?;
            // An exact-multiple split leaves an empty remainder; drop it
            // rather than surfacing an empty group in the index set.
            if self.family.size(&rest) > 0 {
                self.groups.push(rest);
            }
        }
        Ok(())
    }

    /// Emit the buffered groups as the finished set and reset.
    ///
    /// A second flush with nothing buffered is a no-op.
    pub fn flush(&mut self) -> Result<(), F::Error> {
        let Some(set) = self.set.take() else {
            return Ok(());
        };
        let groups = std::mem::take(&mut self.groups);
        let total = std::mem::take(&mut self.total);
        self.family
            .output_set(total, set, groups)
            .map_err(PagerError::Output)
    }

    /// The wrapped family, for inspecting collected output in callers
    /// that buffer artifacts on the family itself.
    pub fn family(&self) -> &F {
        &self.family
    }

    pub fn family_mut(&mut self) -> &mut F {
        &mut self.family
    }
}
