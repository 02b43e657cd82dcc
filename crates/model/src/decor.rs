use crate::{Node, RawAnchor};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A file's identity and contents as stored in serving tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub ticket: String,
    pub text: Vec<u8>,
    /// Declared encoding label of `text`.
    pub encoding: String,
}

/// A single reference rendered onto a file: an anchor span, the edge
/// kind relating it to its target, and the target node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoration {
    pub anchor: RawAnchor,
    pub kind: String,
    pub target: Node,
}

/// A fragment of a file's decorations.
///
/// Exactly one of the two shapes is populated: a file fragment carries
/// the file itself and no decorations; a decoration fragment carries
/// decorations only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDecorations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<File>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decorations: Vec<Decoration>,
}

impl FileDecorations {
    /// A fragment carrying the file's text and encoding.
    pub fn file_fragment(file: File) -> Self {
        Self {
            file: Some(file),
            decorations: Vec::new(),
        }
    }

    /// A fragment carrying only decorations.
    pub fn decoration_fragment(decorations: Vec<Decoration>) -> Self {
        Self {
            file: None,
            decorations,
        }
    }
}

/// Render order of decorations within a file: by start offset, then end
/// offset, then kind, then target ticket.
#[must_use]
pub fn by_offset(a: &Decoration, b: &Decoration) -> Ordering {
    a.anchor
        .start_offset
        .cmp(&b.anchor.start_offset)
        .then_with(|| a.anchor.end_offset.cmp(&b.anchor.end_offset))
        .then_with(|| a.kind.cmp(&b.kind))
        .then_with(|| a.target.ticket.cmp(&b.target.ticket))
}
