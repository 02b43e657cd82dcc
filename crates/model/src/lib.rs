//! # Xref Model
//!
//! Shared data model for the serving-table assembly pipeline.
//!
//! ```text
//! Entry stream (sorted)
//!     │
//!     ├──> Source / Node / Edge        (graph layer)
//!     │
//!     ├──> FileDecorations             (per-file render layer)
//!     │      └─ RawAnchor + Decoration
//!     │
//!     └──> Paged artifacts             (query layer)
//!            ├─ PagedEdgeSet + EdgePage
//!            └─ PagedCrossReferences + pages
//! ```
//!
//! Every type here is a plain value with serde derives; assemblers in
//! `xref-assemble` own all construction logic.

mod decor;
mod graph;
mod paged;
mod span;

pub use decor::{by_offset, Decoration, File, FileDecorations};
pub use graph::{Edge, Entry, Fact, Node};
pub use paged::{
    CrossReferenceGroup, CrossReferencePage, CrossReferencePageIndex, EdgeGroup, EdgePage,
    EdgeSetEdge, PageIndex, PagedCrossReferences, PagedEdgeSet,
};
pub use span::{ExpandedAnchor, Point, RawAnchor, Span};

pub use xref_ticket::VName;
