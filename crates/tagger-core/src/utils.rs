// SPDX-License-Identifier: Apache-2.0

//! Text helpers shared by the report renderers.

/// Truncates text to a maximum length with a custom suffix.
///
/// Uses character count (not byte count) to safely handle multi-byte UTF-8.
/// The suffix is included in the max length calculation.
///
/// # Examples
///
/// ```
/// use tagger_core::utils::truncate_with_suffix;
///
/// let text = "Restore fails when the package source requires authentication";
/// let result = truncate_with_suffix(text, 20, "...");
/// assert!(result.ends_with("..."));
/// assert!(result.chars().count() <= 20);
/// ```
#[must_use]
pub fn truncate_with_suffix(text: &str, max_len: usize, suffix: &str) -> String {
    let char_count = text.chars().count();
    if char_count <= max_len {
        text.to_string()
    } else {
        let suffix_len = suffix.chars().count();
        let truncate_at = max_len.saturating_sub(suffix_len);
        let truncated: String = text.chars().take(truncate_at).collect();
        format!("{truncated}{suffix}")
    }
}

/// Truncates text to a maximum length with default ellipsis suffix "...".
#[must_use]
pub fn truncate(text: &str, max_len: usize) -> String {
    truncate_with_suffix(text, max_len, "...")
}

/// Escapes text for use inside a Markdown table cell.
///
/// Pipes would end the cell and newlines would end the row.
#[must_use]
pub fn escape_markdown_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

/// Formats a score with two decimals, the precision rankings are compared at.
#[must_use]
pub fn format_score(score: f64) -> String {
    format!("{score:.2}")
}
