use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error("tag entry '{0}' has no '=>' separator")]
    MissingSeparator(String),
    #[error("tag entry '{0}' has an empty key")]
    EmptyKey(String),
}

/// Parses a packed OSM tag list such as `"amenity"=>"cafe","level"=>"2"`.
///
/// Entries are split on `,` or `;` outside double quotes. Keys and values
/// are stripped of whitespace and quotes; a repeated key keeps its last
/// value.
pub fn parse_other_tags(raw: &str) -> Result<HashMap<String, String>, TagError> {
    let mut tags = HashMap::new();
    for entry in split_entries(raw) {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let (key, value) = entry
            .split_once("=>")
            .ok_or_else(|| TagError::MissingSeparator(entry.to_string()))?;
        let key = strip(key);
        if key.is_empty() {
            return Err(TagError::EmptyKey(entry.to_string()));
        }
        tags.insert(key.to_string(), strip(value).to_string());
    }
    Ok(tags)
}

fn strip(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '"')
}

fn split_entries(raw: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut in_quotes = false;
    let mut escaped = false;
    let mut start = 0;
    for (i, c) in raw.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => in_quotes = !in_quotes,
            ',' | ';' if !in_quotes => {
                entries.push(&raw[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    entries.push(&raw[start..]);
    entries
}
