//! # Xref Schema
//!
//! The graph schema vocabulary: well-known fact names, node kinds, and
//! edge kinds, plus the predicates every assembler uses to classify and
//! rewrite edge-kind strings.
//!
//! Edge kinds are plain strings of the form `/kythe/edge/<name>`, with
//! two orthogonal decorations:
//!
//! - a `%` prefix marks a reverse edge ([`mirror`] toggles it),
//! - a `.N` suffix carries an ordinal ([`parse_ordinal`] strips it).

mod ordering;

pub use ordering::{compare_edge_kinds, edge_kind_less};

use serde::{Deserialize, Serialize};

/// Fact name carrying a node's kind.
pub const NODE_KIND_FACT: &str = "/kythe/node/kind";
/// Fact name carrying a node's subkind.
pub const SUBKIND_FACT: &str = "/kythe/subkind";
/// Fact name carrying a file's full text.
pub const TEXT_FACT: &str = "/kythe/text";
/// Fact name carrying the encoding label of [`TEXT_FACT`].
pub const TEXT_ENCODING_FACT: &str = "/kythe/text/encoding";
/// Fact name carrying an anchor's starting byte offset.
pub const ANCHOR_START_FACT: &str = "/kythe/loc/start";
/// Fact name carrying an anchor's ending byte offset.
pub const ANCHOR_END_FACT: &str = "/kythe/loc/end";
/// Fact name carrying an anchor's snippet starting byte offset.
pub const SNIPPET_START_FACT: &str = "/kythe/snippet/start";
/// Fact name carrying an anchor's snippet ending byte offset.
pub const SNIPPET_END_FACT: &str = "/kythe/snippet/end";
/// Fact name marking whether a node is a complete definition.
pub const COMPLETE_FACT: &str = "/kythe/complete";

/// Node kind of file nodes.
pub const FILE_KIND: &str = "file";
/// Node kind of anchor nodes.
pub const ANCHOR_KIND: &str = "anchor";
/// Subkind of implicit anchors, which never become decorations.
pub const IMPLICIT_SUBKIND: &str = "implicit";

/// Common prefix of all forward edge kinds.
pub const EDGE_PREFIX: &str = "/kythe/edge/";

pub const CHILD_OF_EDGE: &str = "/kythe/edge/childof";
pub const DEFINES_EDGE: &str = "/kythe/edge/defines";
pub const DOCUMENTS_EDGE: &str = "/kythe/edge/documents";
pub const REF_EDGE: &str = "/kythe/edge/ref";
pub const NAMED_EDGE: &str = "/kythe/edge/named";
pub const TYPED_EDGE: &str = "/kythe/edge/typed";

const REVERSE_PREFIX: &str = "%";

/// Direction of an edge kind relative to its forward form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Reverse,
}

/// Split an edge kind into its base kind and ordinal suffix.
///
/// An ordinal is a trailing `.N` with `N` a non-negative integer; the
/// returned flag reports whether one was present.
#[must_use]
pub fn parse_ordinal(kind: &str) -> (&str, i32, bool) {
    if let Some((base, suffix)) = kind.rsplit_once('.') {
        if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(ordinal) = suffix.parse::<i32>() {
                return (base, ordinal, true);
            }
        }
    }
    (kind, 0, false)
}

/// Toggle an edge kind between its forward and reverse forms.
///
/// Mirroring twice returns the original kind.
#[must_use]
pub fn mirror(kind: &str) -> String {
    match kind.strip_prefix(REVERSE_PREFIX) {
        Some(forward) => forward.to_string(),
        None => format!("{REVERSE_PREFIX}{kind}"),
    }
}

/// The direction of the given edge kind.
#[must_use]
pub fn direction(kind: &str) -> Direction {
    if kind.starts_with(REVERSE_PREFIX) {
        Direction::Reverse
    } else {
        Direction::Forward
    }
}

/// Reduce an edge kind to its canonical forward base form: lowercased,
/// ordinal stripped, reverse marker stripped.
#[must_use]
pub fn canonicalize(kind: &str) -> String {
    let (base, _, _) = parse_ordinal(kind);
    base.trim_start_matches(REVERSE_PREFIX).to_ascii_lowercase()
}

/// Whether `kind` equals `root` or extends it with a dotted suffix.
#[must_use]
pub fn is_edge_variant(kind: &str, root: &str) -> bool {
    kind == root || kind.strip_prefix(root).is_some_and(|rest| rest.starts_with('.'))
}

/// Whether the edge kind attaches anchors to their referents:
/// `defines`, `documents`, `ref`, their variants, and their reverses.
#[must_use]
pub fn is_anchor_edge(kind: &str) -> bool {
    let canonical = canonicalize(kind);
    is_edge_variant(&canonical, DEFINES_EDGE)
        || is_edge_variant(&canonical, DOCUMENTS_EDGE)
        || is_edge_variant(&canonical, REF_EDGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_ordinal_suffixes() {
        assert_eq!(parse_ordinal("/kythe/edge/param.3"), ("/kythe/edge/param", 3, true));
        assert_eq!(parse_ordinal("/kythe/edge/param.0"), ("/kythe/edge/param", 0, true));
        assert_eq!(parse_ordinal("/kythe/edge/ref"), ("/kythe/edge/ref", 0, false));
        // A dotted variant without a numeric tail is not an ordinal.
        assert_eq!(
            parse_ordinal("/kythe/edge/defines.binding"),
            ("/kythe/edge/defines.binding", 0, false)
        );
    }

    #[test]
    fn mirror_toggles_direction() {
        assert_eq!(mirror(REF_EDGE), "%/kythe/edge/ref");
        assert_eq!(mirror("%/kythe/edge/ref"), REF_EDGE);
        assert_eq!(direction(REF_EDGE), Direction::Forward);
        assert_eq!(direction("%/kythe/edge/ref"), Direction::Reverse);
    }

    #[test]
    fn canonicalizes_reverse_and_ordinal_forms() {
        assert_eq!(canonicalize("%/kythe/edge/Defines.2"), DEFINES_EDGE);
        assert_eq!(canonicalize(REF_EDGE), REF_EDGE);
    }

    #[test]
    fn variant_test_requires_dot_boundary() {
        assert!(is_edge_variant("/kythe/edge/defines.binding", DEFINES_EDGE));
        assert!(is_edge_variant(DEFINES_EDGE, DEFINES_EDGE));
        assert!(!is_edge_variant("/kythe/edge/definesx", DEFINES_EDGE));
    }

    #[test]
    fn anchor_edges_cover_variants_and_reverses() {
        assert!(is_anchor_edge(DEFINES_EDGE));
        assert!(is_anchor_edge("/kythe/edge/defines.binding"));
        assert!(is_anchor_edge("%/kythe/edge/ref"));
        assert!(is_anchor_edge(DOCUMENTS_EDGE));
        assert!(!is_anchor_edge(CHILD_OF_EDGE));
        assert!(!is_anchor_edge(TYPED_EDGE));
    }

    proptest! {
        #[test]
        fn proptest_mirror_is_an_involution(kind in "[a-z/.]{1,24}") {
            prop_assert_eq!(mirror(&mirror(&kind)), kind);
        }

        #[test]
        fn proptest_parse_ordinal_round_trips(
            base in "/kythe/edge/[a-z]{1,12}",
            ordinal in 0i32..10_000,
        ) {
            let kind = format!("{base}.{ordinal}");
            prop_assert_eq!(parse_ordinal(&kind), (base.as_str(), ordinal, true));
        }
    }
}
