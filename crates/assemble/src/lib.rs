//! # Xref Assemble
//!
//! Streaming assemblers that turn a sorted stream of graph entries into
//! the serving-table artifacts behind file decorations, paged edge
//! sets, and paged cross-references.
//!
//! ## Pipeline
//!
//! ```text
//! Entry stream (GraphStore order)
//!     │
//!     ├──> Source::from_entries        one Source per source VName
//!     │      └─> partial_reverse_edges self-edge header + mirrored edges
//!     │
//!     ├──> external sort by (source ticket, kind, target ticket)
//!     │
//!     ├──> DecorationFragmentBuilder   file + decoration fragments
//!     │
//!     └──> EdgeSetBuilder /            paged sets + overflow pages
//!          CrossReferencesBuilder
//! ```
//!
//! Every builder emits synchronously through caller-supplied callbacks
//! and holds at most one source's worth of state; partitioning the
//! stream along header boundaries lets independent instances run on
//! disjoint partitions.

mod anchor;
mod decoration;
mod edges;
mod error;
mod source;
mod xrefs;

pub use anchor::{cross_reference, expand_anchor, CrossReference};
pub use decoration::DecorationFragmentBuilder;
pub use edges::{new_page_key, EdgeSetBuilder};
pub use error::{AssembleError, Result};
pub use source::{
    facts_to_map, filter_text_facts, get_fact, partial_reverse_edges, EdgeTarget, Source,
};
pub use xrefs::CrossReferencesBuilder;
