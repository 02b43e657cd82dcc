use serde::{Deserialize, Serialize};

/// A position in a file's text.
///
/// `line_number` is 1-based; `column_offset` counts bytes from the start
/// of the line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub byte_offset: i32,
    pub line_number: i32,
    pub column_offset: i32,
}

/// A half-open `[start, end)` range of file text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: Point,
    pub end: Point,
}

/// An anchor as emitted by an indexer: byte offsets only.
///
/// `snippet_start`/`snippet_end` are both zero when the indexer supplied
/// no snippet span of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAnchor {
    pub ticket: String,
    pub start_offset: i32,
    pub end_offset: i32,
    pub snippet_start: i32,
    pub snippet_end: i32,
}

/// An anchor resolved against its parent file: decoded text, line/column
/// span, and a display snippet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedAnchor {
    pub ticket: String,
    pub kind: String,
    /// Ticket of the file containing the anchor.
    pub parent: String,

    pub text: String,
    pub span: Span,

    pub snippet: String,
    pub snippet_span: Span,
}
