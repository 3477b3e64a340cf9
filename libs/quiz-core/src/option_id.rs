//! Stable ids for rendered answer options.
//!
//! Ids are a pure function of the option content, its index and an optional
//! prefix, so a list regenerated from the same inputs keeps the same keys.

use sha2::{Digest, Sha256};

/// Separator between id components.
pub const SEPARATOR: char = '-';

/// Prefix for paired script/transliteration options.
const ARABIC_TRANS_PREFIX: &str = "ar-tr";

/// Short content hash: the first 8 bytes of SHA-256 as lowercase hex.
fn content_hash(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    digest[..8].iter().map(|b| format!("{:02x}", b)).collect()
}

/// Generate the id for a single option.
///
/// Format is `{prefix}-{hash}-{index}`, or `{hash}-{index}` without a prefix.
pub fn generate_option_id(content: &str, index: usize, prefix: Option<&str>) -> String {
    let hash = content_hash(content);
    match prefix {
        Some(prefix) => format!("{prefix}{SEPARATOR}{hash}{SEPARATOR}{index}"),
        None => format!("{hash}{SEPARATOR}{index}"),
    }
}

/// Generate index-aligned ids for a list of options.
pub fn generate_option_ids<S: AsRef<str>>(contents: &[S]) -> Vec<String> {
    contents
        .iter()
        .enumerate()
        .map(|(index, content)| generate_option_id(content.as_ref(), index, None))
        .collect()
}

/// Generate the id for an option shown as a (script, transliteration) pair.
pub fn generate_arabic_trans_option_id(
    script_text: &str,
    transliteration: &str,
    index: usize,
) -> String {
    // Length-prefix the script text so ("ab", "c") and ("a", "bc") differ.
    let combined = format!("{}:{}|{}", script_text.len(), script_text, transliteration);
    generate_option_id(&combined, index, Some(ARABIC_TRANS_PREFIX))
}
