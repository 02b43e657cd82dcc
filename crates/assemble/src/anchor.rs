use crate::error::{AssembleError, Result};

use serde::{Deserialize, Serialize};
use xref_model::{Decoration, ExpandedAnchor, File, Node, Point, RawAnchor, Span};
use xref_schema as schema;
use xref_text::{decode_text, Normalizer};

/// A decoration re-keyed for cross-reference assembly: the referent
/// node (facts reduced to its completeness marker) paired with the
/// decoration's anchor expanded against its parent file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossReference {
    pub referent: Node,
    pub target_anchor: ExpandedAnchor,
}

/// Expand `anchor` against its parent `file` into an [`ExpandedAnchor`]
/// carrying decoded text, a line/column span, and a display snippet.
///
/// When the anchor supplies no snippet offsets, the snippet falls back
/// to the anchor's full start line, ending one byte before the next
/// line begins.
pub fn expand_anchor(
    anchor: &RawAnchor,
    file: &File,
    norm: &Normalizer,
    kind: impl Into<String>,
) -> Result<ExpandedAnchor> {
    check_span(file.text.len(), anchor.start_offset, anchor.end_offset)?;

    let start = norm.point_for_offset(anchor.start_offset);
    let end = norm.point_for_offset(anchor.end_offset);
    let text = span_text(file, &start, &end)?;

    let (snippet, snippet_span) = if anchor.snippet_start != 0 || anchor.snippet_end != 0 {
        check_span(file.text.len(), anchor.snippet_start, anchor.snippet_end)?;
        let snippet_start = norm.point_for_offset(anchor.snippet_start);
        let snippet_end = norm.point_for_offset(anchor.snippet_end);
        (
            span_text(file, &snippet_start, &snippet_end)?,
            Span {
                start: snippet_start,
                end: snippet_end,
            },
        )
    } else {
        // Single-line fallback: from the start of the anchor's first
        // line to one byte before the next line begins.
        let snippet_start = Point {
            byte_offset: start.byte_offset - start.column_offset,
            line_number: start.line_number,
            column_offset: 0,
        };
        let next_line = norm.point_for_line(start.line_number + 1);
        if next_line.byte_offset <= snippet_start.byte_offset {
            return Err(AssembleError::AnchorPastEof);
        }
        let snippet_end = Point {
            byte_offset: next_line.byte_offset - 1,
            line_number: start.line_number,
            column_offset: start.column_offset + (next_line.byte_offset - start.byte_offset - 1),
        };
        (
            span_text(file, &snippet_start, &snippet_end)?,
            Span {
                start: snippet_start,
                end: snippet_end,
            },
        )
    };

    Ok(ExpandedAnchor {
        ticket: anchor.ticket.clone(),
        kind: kind.into(),
        parent: file.ticket.clone(),
        text,
        span: Span { start, end },
        snippet,
        snippet_span,
    })
}

/// Pair a decoration's referent with its expanded target anchor.
///
/// The anchor is expanded under the mirrored edge kind (the referent
/// sees the inbound direction), and the referent keeps only its
/// completeness fact. Fails when the decoration's parent file or its
/// normalizer is missing.
pub fn cross_reference(
    file: Option<&File>,
    norm: Option<&Normalizer>,
    decoration: &Decoration,
) -> Result<CrossReference> {
    let (Some(file), Some(norm)) = (file, norm) else {
        return Err(AssembleError::MissingParentFile);
    };

    let target_anchor = expand_anchor(
        &decoration.anchor,
        file,
        norm,
        schema::mirror(&decoration.kind),
    )?;
    let facts = decoration
        .target
        .facts
        .iter()
        .filter(|f| f.name == schema::COMPLETE_FACT)
        .cloned()
        .collect();
    Ok(CrossReference {
        referent: Node {
            ticket: decoration.target.ticket.clone(),
            facts,
        },
        target_anchor,
    })
}

fn check_span(text_len: usize, start: i32, end: i32) -> Result<()> {
    if end as i64 > text_len as i64 {
        Err(AssembleError::InvalidSpan(format!(
            "span past EOF {text_len}: [{start}, {end})"
        )))
    } else if start < 0 {
        Err(AssembleError::InvalidSpan(format!("negative span: [{start}, {end})")))
    } else if start > end {
        Err(AssembleError::InvalidSpan(format!("crossed span: [{start}, {end})")))
    } else {
        Ok(())
    }
}

fn span_text(file: &File, start: &Point, end: &Point) -> Result<String> {
    let bytes = &file.text[start.byte_offset as usize..end.byte_offset as usize];
    Ok(decode_text(&file.encoding, bytes)?)
}
