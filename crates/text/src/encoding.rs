use crate::error::{Result, TextError};

/// Decode file text bytes under the file's declared encoding label.
///
/// An empty label defaults to UTF-8. Labels naming UTF-8 or its ASCII
/// subset decode with strict validation; anything else is rejected so a
/// mislabeled file fails loudly instead of producing garbled anchors.
pub fn decode_text(encoding: &str, bytes: &[u8]) -> Result<String> {
    let label = encoding.trim().to_ascii_lowercase();
    match label.as_str() {
        "" | "utf-8" | "utf8" | "ascii" | "us-ascii" => std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| TextError::InvalidUtf8),
        _ => Err(TextError::UnsupportedEncoding(encoding.to_string())),
    }
}
