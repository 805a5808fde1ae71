use regex::Regex;
use std::sync::LazyLock;

// Server-side code embedded in markup: `<?php ... ?>`, `<?= ... ?>`, `<? ... ?>`
static SERVER_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<\?.*?\?>").unwrap());

/// Collapse every run of whitespace into one space and trim both ends.
///
/// ```
/// use locscan::core::utils::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  Hello,\n    world  "), "Hello, world");
/// assert_eq!(collapse_whitespace(" \t\n "), "");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when nothing but embedded server-side code and whitespace remains.
pub fn is_only_server_code(text: &str) -> bool {
    SERVER_CODE_REGEX.is_match(text) && SERVER_CODE_REGEX.replace_all(text, "").trim().is_empty()
}
