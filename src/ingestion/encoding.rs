//! Decoding input bytes with a configured encoding label.

use encoding_rs::Encoding;

use crate::error::{CleanerError, CleanerResult};

/// Resolve an encoding label.
///
/// Accepts every WHATWG label `encoding_rs` knows plus the Python spellings commonly found in
/// configs (`utf_8`, `utf-8-sig`, `cp932`, `latin_1`, ...).
pub fn resolve_encoding(label: &str) -> Option<&'static Encoding> {
    let normalized = label.trim().to_ascii_lowercase();
    let alias = match normalized.as_str() {
        "utf-8-sig" | "utf_8_sig" | "utf8-sig" | "utf8_sig" => "utf-8",
        "cp932" | "mskanji" => "windows-31j",
        "latin-1" | "latin_1" | "iso8859-1" | "iso8859_1" => "latin1",
        other => other,
    };
    Encoding::for_label(alias.as_bytes())
        .or_else(|| Encoding::for_label(alias.replace('_', "-").as_bytes()))
}

/// Decode `bytes` as text with exactly the configured encoding.
///
/// A leading BOM is stripped only when it belongs to that encoding; any other leading bytes
/// are decoded like the rest of the input.
pub fn decode_input(bytes: &[u8], label: &str) -> CleanerResult<String> {
    let encoding = resolve_encoding(label).ok_or_else(|| CleanerError::Config {
        message: format!("unknown encoding '{label}'"),
    })?;
    let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
    if had_errors {
        return Err(CleanerError::Encoding {
            label: label.to_string(),
            message: "input contains byte sequences that are invalid in this encoding".to_string(),
        });
    }
    Ok(text.into_owned())
}
