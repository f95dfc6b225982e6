//! String and time helpers shared across the generator.
//!
//! This module provides the small pure functions the rest of the crate
//! leans on:
//! - Word capitalization for filename-derived titles
//! - UTC timestamp formatting for the index footer

use chrono::{DateTime, Utc};

/// Capitalize a single word: first character uppercased, the rest lowercased.
///
/// # Arguments
///
/// * `word` - The word to capitalize
///
/// # Returns
///
/// The capitalized word, or an empty string for empty input.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(capitalize_word("firewall"), "Firewall");
/// assert_eq!(capitalize_word("DNS"), "Dns");
/// ```
pub fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

/// Derive a display title from a file stem.
///
/// Hyphens and underscores are treated as word separators; each resulting
/// word is capitalized. Used as the fallback when a runbook has no Markdown
/// heading to take a title from.
///
/// # Arguments
///
/// * `stem` - The file name without its extension
///
/// # Returns
///
/// A space-separated, word-capitalized title.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(title_case_stem("incident-response"), "Incident Response");
/// assert_eq!(title_case_stem("dns_tunneling_hunt"), "Dns Tunneling Hunt");
/// ```
pub fn title_case_stem(stem: &str) -> String {
    stem.replace(['-', '_'], " ")
        .split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a timestamp for the index footer as `YYYY-MM-DD HH:MM:SSZ`.
///
/// # Arguments
///
/// * `at` - The UTC instant to format
pub fn utc_stamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%SZ").to_string()
}
