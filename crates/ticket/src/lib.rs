//! # Xref Ticket
//!
//! Structured node names and their canonical ticket string form.
//!
//! A [`VName`] identifies a node in the cross-reference graph by
//! (corpus, root, path, language, signature). Its ticket is a `kythe:`
//! URI used as the node's key in every serving artifact:
//!
//! ```text
//! kythe://corpus?lang=rust?path=src/lib.rs#signature
//! ```
//!
//! Attributes appear in alphabetical order with empty components
//! omitted, so equal VNames always render the same ticket and
//! [`parse`] inverts [`VName::ticket`] exactly.

mod error;

pub use error::{Result, TicketError};

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// The URI scheme shared by all tickets.
pub const SCHEME: &str = "kythe";

/// Structured name of a graph node.
///
/// Field order matches the canonical component order used for sorting:
/// corpus, root, path, language, signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VName {
    pub corpus: String,
    pub root: String,
    pub path: String,
    pub language: String,
    pub signature: String,
}

impl VName {
    /// Render the canonical ticket string for this VName.
    ///
    /// Total over all VNames and injective: distinct VNames yield
    /// distinct tickets because every reserved byte is percent-escaped.
    #[must_use]
    pub fn ticket(&self) -> String {
        let mut out = String::with_capacity(self.corpus.len() + self.path.len() + 16);
        out.push_str(SCHEME);
        out.push(':');
        if !self.corpus.is_empty() {
            out.push_str("//");
            escape_into(&self.corpus, &mut out);
        }
        // Attributes in alphabetical order by attribute name.
        for (name, value) in [
            ("lang", &self.language),
            ("path", &self.path),
            ("root", &self.root),
        ] {
            if !value.is_empty() {
                out.push('?');
                out.push_str(name);
                out.push('=');
                escape_into(value, &mut out);
            }
        }
        if !self.signature.is_empty() {
            out.push('#');
            escape_into(&self.signature, &mut out);
        }
        out
    }
}

/// Parse a ticket string back into its structured VName.
///
/// Accepts attributes in any order; [`VName::ticket`] of the result is
/// the canonical rendering.
pub fn parse(ticket: &str) -> Result<VName> {
    let rest = ticket
        .strip_prefix(SCHEME)
        .and_then(|r| r.strip_prefix(':'))
        .ok_or_else(|| TicketError::InvalidScheme(ticket.to_string()))?;

    let mut vname = VName::default();

    let (head, fragment) = match rest.split_once('#') {
        Some((head, frag)) => (head, Some(frag)),
        None => (rest, None),
    };
    if let Some(frag) = fragment {
        vname.signature = unescape(frag)?;
    }

    let attrs = if let Some(body) = head.strip_prefix("//") {
        let (corpus, attrs) = match body.split_once('?') {
            Some((corpus, attrs)) => (corpus, Some(attrs)),
            None => (body, None),
        };
        vname.corpus = unescape(corpus)?;
        attrs
    } else {
        head.strip_prefix('?')
    };

    if let Some(attrs) = attrs {
        for attr in attrs.split('?') {
            let (name, value) = attr
                .split_once('=')
                .ok_or_else(|| TicketError::Malformed(format!("attribute {attr:?}")))?;
            let value = unescape(value)?;
            match name {
                "lang" => vname.language = value,
                "path" => vname.path = value,
                "root" => vname.root = value,
                _ => return Err(TicketError::Malformed(format!("unknown attribute {name:?}"))),
            }
        }
    } else if !head.starts_with("//") && !head.is_empty() {
        return Err(TicketError::Malformed(format!("unexpected component {head:?}")));
    }

    Ok(vname)
}

fn byte_is_unreserved(b: u8) -> bool {
    // '/' stays literal so path-valued components remain readable.
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~' | b'/')
}

fn escape_into(component: &str, out: &mut String) {
    for &b in component.as_bytes() {
        if byte_is_unreserved(b) {
            out.push(b as char);
        } else {
            let _ = write!(out, "%{b:02X}");
        }
    }
}

fn unescape(component: &str) -> Result<String> {
    let bytes = component.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hex = bytes
                    .get(i + 1..i + 3)
                    .ok_or_else(|| TicketError::BadEscape(component.to_string()))?;
                let hex = std::str::from_utf8(hex)
                    .map_err(|_| TicketError::BadEscape(component.to_string()))?;
                let b = u8::from_str_radix(hex, 16)
                    .map_err(|_| TicketError::BadEscape(component.to_string()))?;
                out.push(b);
                i += 3;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8(out).map_err(|_| TicketError::BadEscape(component.to_string()))
}
