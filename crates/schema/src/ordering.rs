//! Total order over edge kinds used by every paged serving artifact.
//!
//! Group lists and page-index lists are sorted with [`compare_edge_kinds`]
//! so that pagination is deterministic across assembler runs:
//!
//! 1. anchor edge kinds before non-anchor edge kinds,
//! 2. forward edges before reverse edges,
//! 3. the priority list `defines`, `documents`, `ref`, `named`, `typed`
//!    (each entry before its dotted variants, variants ordered
//!    lexicographically),
//! 4. otherwise lexicographic on the canonical form.

use crate::{
    canonicalize, direction, is_anchor_edge, is_edge_variant, Direction, DEFINES_EDGE,
    DOCUMENTS_EDGE, NAMED_EDGE, REF_EDGE, TYPED_EDGE,
};
use std::cmp::Ordering;

const EDGE_ORDERING: [&str; 5] = [DEFINES_EDGE, DOCUMENTS_EDGE, REF_EDGE, NAMED_EDGE, TYPED_EDGE];

/// Compare two edge kinds under the serving order.
///
/// Kinds with equal canonical forms compare equal, so ordinal suffixes,
/// case, and the reverse marker never influence placement beyond the
/// direction rule.
#[must_use]
pub fn compare_edge_kinds(kind1: &str, kind2: &str) -> Ordering {
    if kind1 == kind2 {
        return Ordering::Equal;
    }

    let (anchor1, anchor2) = (is_anchor_edge(kind1), is_anchor_edge(kind2));
    if anchor1 != anchor2 {
        return if anchor1 { Ordering::Less } else { Ordering::Greater };
    }

    let (dir1, dir2) = (direction(kind1), direction(kind2));
    if dir1 != dir2 {
        return if dir1 == Direction::Forward {
            Ordering::Less
        } else {
            Ordering::Greater
        };
    }

    let (canon1, canon2) = (canonicalize(kind1), canonicalize(kind2));
    if canon1 == canon2 {
        return Ordering::Equal;
    }
    for kind in EDGE_ORDERING {
        if canon1 == kind {
            return Ordering::Less;
        }
        if canon2 == kind {
            return Ordering::Greater;
        }
        let (variant1, variant2) = (is_edge_variant(&canon1, kind), is_edge_variant(&canon2, kind));
        if variant1 != variant2 {
            return if variant1 { Ordering::Less } else { Ordering::Greater };
        }
        if variant1 {
            return canon1.cmp(&canon2);
        }
    }
    canon1.cmp(&canon2)
}

/// Strict "comes before" form of [`compare_edge_kinds`].
#[must_use]
pub fn edge_kind_less(kind1: &str, kind2: &str) -> bool {
    compare_edge_kinds(kind1, kind2) == Ordering::Less
}
