//! # Xref Text
//!
//! File-text utilities for anchor expansion: the [`Normalizer`] maps
//! byte offsets to (line, column) points and lines back to byte
//! offsets, and [`decode_text`] decodes file bytes under their declared
//! encoding label.

mod encoding;
mod error;
mod normalizer;

pub use encoding::decode_text;
pub use error::{Result, TextError};
pub use normalizer::Normalizer;
