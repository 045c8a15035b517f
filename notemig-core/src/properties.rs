//! Parses the metadata block at the top of a source note.
//!
//! A note optionally starts with a block like:
//!
//! ```text
//! ---
//! title: Groceries
//! created: 2021-03-04T10:11:12.000Z
//! favorited: true
//! tags: [Notebooks/Home, shopping]
//! attachments: [receipt.pdf]
//! ---
//! ```
//!
//! Parsing is lenient: a missing or malformed block yields default properties.

use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;
use strum_macros::{AsRefStr, EnumString};

/// Matches the leading metadata block. The first closing `---` line ends it.
static SECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\A---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)").unwrap()
});

static TEXT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*(title|created|modified)[ \t]*:(.*)$").unwrap()
});

static FLAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*(deleted|favorited)[ \t]*:(.*)$").unwrap()
});

/// `tags: [a, b]`: everything between the first `[` and the first `]` of the line.
static LIST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*(tags|attachments)[ \t]*:[^\[\r\n]*\[([^\]\r\n]*)\]").unwrap()
});

/// Keys recognised inside a metadata block. Matching is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PropertyKey {
    Title,
    Created,
    Modified,
    Deleted,
    Favorited,
    Tags,
    Attachments,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Text(String),
    Flag(bool),
    List(Vec<String>),
}

/// A single `key: value` line found in the block, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyOccurrence {
    pub offset: usize,
    pub key: PropertyKey,
    pub value: PropertyValue,
}

/// Structured metadata of a note.
///
/// `created`, `modified` and `favorited` stay `None` when the key never appeared,
/// so the generator can tell "absent" from "present but empty/false".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    pub title: String,
    pub created: Option<String>,
    pub modified: Option<String>,
    pub deleted: bool,
    pub favorited: Option<bool>,
    pub tags: Vec<String>,
    pub attachments: Vec<String>,
}

impl Properties {
    pub fn is_favorited(&self) -> bool {
        self.favorited.unwrap_or(false)
    }

    /// Applies one occurrence on top of the current values. Later calls win.
    fn apply(mut self, occurrence: PropertyOccurrence) -> Self {
        match (occurrence.key, occurrence.value) {
            (PropertyKey::Title, PropertyValue::Text(v)) => self.title = v,
            (PropertyKey::Created, PropertyValue::Text(v)) => self.created = Some(v),
            (PropertyKey::Modified, PropertyValue::Text(v)) => self.modified = Some(v),
            (PropertyKey::Deleted, PropertyValue::Flag(v)) => self.deleted = v,
            (PropertyKey::Favorited, PropertyValue::Flag(v)) => self.favorited = Some(v),
            (PropertyKey::Tags, PropertyValue::List(v)) => self.tags = v,
            (PropertyKey::Attachments, PropertyValue::List(v)) => self.attachments = v,
            _ => {}
        }
        self
    }
}

/// Returns the inner text of the leading metadata block, if the note has one.
pub fn properties_section(text: &str) -> Option<&str> {
    SECTION_RE
        .captures(text.trim_start())
        .map(|caps| caps.get(1).map_or("", |m| m.as_str()))
}

/// Collects every recognised key occurrence of a block, ordered by position.
pub fn scan_occurrences(section: &str) -> Vec<PropertyOccurrence> {
    let mut occurrences = Vec::new();

    for caps in TEXT_RE.captures_iter(section) {
        if let Ok(key) = PropertyKey::from_str(&caps[1]) {
            occurrences.push(PropertyOccurrence {
                offset: caps.get(0).map_or(0, |m| m.start()),
                key,
                value: PropertyValue::Text(caps[2].trim().to_string()),
            });
        }
    }

    for caps in FLAG_RE.captures_iter(section) {
        if let Ok(key) = PropertyKey::from_str(&caps[1]) {
            occurrences.push(PropertyOccurrence {
                offset: caps.get(0).map_or(0, |m| m.start()),
                key,
                value: PropertyValue::Flag(caps[2].trim() == "true"),
            });
        }
    }

    for caps in LIST_RE.captures_iter(section) {
        if let Ok(key) = PropertyKey::from_str(&caps[1]) {
            occurrences.push(PropertyOccurrence {
                offset: caps.get(0).map_or(0, |m| m.start()),
                key,
                value: PropertyValue::List(split_list(&caps[2])),
            });
        }
    }

    occurrences.sort_by_key(|o| o.offset);
    occurrences
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extracts the note's properties. The last occurrence of a key wins.
pub fn extract_properties(text: &str) -> Properties {
    match properties_section(text) {
        Some(section) => scan_occurrences(section)
            .into_iter()
            .fold(Properties::default(), Properties::apply),
        None => Properties::default(),
    }
}

/// Returns the note body: the text without its leading metadata block, trimmed.
/// Only the first block is removed; `---` lines further down are left alone.
pub fn remove_properties_section(text: &str) -> String {
    let trimmed = text.trim();
    SECTION_RE.replace(trimmed, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTE: &str = r#"---
title: Groceries
created: 2021-03-04T10:11:12.000Z
modified: 2021-03-05T08:00:00.000Z
favorited: true
tags: [Notebooks/Home, shopping ,  food]
attachments: [receipt.pdf, photo.png]
---

# Groceries

- milk
"#;

    #[test]
    fn extracts_every_key() {
        let p = extract_properties(NOTE);
        assert_eq!(p.title, "Groceries");
        assert_eq!(p.created.as_deref(), Some("2021-03-04T10:11:12.000Z"));
        assert_eq!(p.modified.as_deref(), Some("2021-03-05T08:00:00.000Z"));
        assert_eq!(p.favorited, Some(true));
        assert!(!p.deleted);
        assert_eq!(p.tags, vec!["Notebooks/Home", "shopping", "food"]);
        assert_eq!(p.attachments, vec!["receipt.pdf", "photo.png"]);
    }

    #[test]
    fn missing_block_gives_defaults() {
        let p = extract_properties("# Just a heading\n\nBody.");
        assert_eq!(p, Properties::default());
        assert_eq!(p.title, "");
        assert!(!p.deleted);
        assert!(!p.is_favorited());
        assert!(p.tags.is_empty());
        assert!(p.attachments.is_empty());
    }

    #[test]
    fn unterminated_block_gives_defaults() {
        let p = extract_properties("---\ntitle: Open\nno closing line");
        assert_eq!(p, Properties::default());
    }

    #[test]
    fn block_must_start_the_text() {
        let p = extract_properties("intro\n---\ntitle: Late\n---\n");
        assert_eq!(p.title, "");
    }

    #[test]
    fn keys_are_case_insensitive() {
        let p = extract_properties("---\nTITLE: Loud\nDeleted: true\nTags: [a]\n---\n");
        assert_eq!(p.title, "Loud");
        assert!(p.deleted);
        assert_eq!(p.tags, vec!["a"]);
    }

    #[test]
    fn last_occurrence_wins() {
        let text = "---\ntitle: First\ntags: [a]\nfavorited: true\ntitle: Second\nfavorited: false\ntags: [b, c]\n---\n";
        let p = extract_properties(text);
        assert_eq!(p.title, "Second");
        assert_eq!(p.favorited, Some(false));
        assert_eq!(p.tags, vec!["b", "c"]);
    }

    #[test]
    fn only_exact_true_is_true() {
        let p = extract_properties("---\ndeleted: yes\nfavorited: True\n---\n");
        assert!(!p.deleted);
        assert_eq!(p.favorited, Some(false));
    }

    #[test]
    fn empty_list_is_empty() {
        let p = extract_properties("---\ntags: []\nattachments: [ , ]\n---\n");
        assert!(p.tags.is_empty());
        assert!(p.attachments.is_empty());
    }

    #[test]
    fn list_stops_at_first_closing_bracket() {
        let p = extract_properties("---\ntags: [a] [b]\n---\n");
        assert_eq!(p.tags, vec!["a"]);
    }

    #[test]
    fn list_keeps_inner_opening_bracket() {
        let p = extract_properties("---\ntags: [a [b], c]\n---\n");
        assert_eq!(p.tags, vec!["a [b"]);
    }

    #[test]
    fn unclosed_list_leaves_key_unset() {
        let p = extract_properties("---\ntags: [a, b\nattachments: [x.png\n---\n");
        assert!(p.tags.is_empty());
        assert!(p.attachments.is_empty());

        let earlier = extract_properties("---\ntags: [keep]\ntags: [a, b\n---\n");
        assert_eq!(earlier.tags, vec!["keep"]);
    }

    #[test]
    fn keys_outside_block_are_ignored() {
        let p = extract_properties("---\ntitle: Inside\n---\ntitle: Outside\ndeleted: true\n");
        assert_eq!(p.title, "Inside");
        assert!(!p.deleted);
    }

    #[test]
    fn occurrences_are_in_document_order() {
        let occ = scan_occurrences("tags: [x]\ntitle: T\ndeleted: true");
        let keys: Vec<_> = occ.iter().map(|o| o.key).collect();
        assert_eq!(
            keys,
            vec![PropertyKey::Tags, PropertyKey::Title, PropertyKey::Deleted]
        );
    }

    #[test]
    fn windows_line_endings_are_accepted() {
        let p = extract_properties("---\r\ntitle: Crlf\r\ntags: [a, b]\r\n---\r\nBody");
        assert_eq!(p.title, "Crlf");
        assert_eq!(p.tags, vec!["a", "b"]);
        assert_eq!(remove_properties_section("---\r\ntitle: Crlf\r\n---\r\nBody"), "Body");
    }

    #[test]
    fn remove_section_leaves_body() {
        let body = remove_properties_section(NOTE);
        assert_eq!(body, "# Groceries\n\n- milk");
        assert!(!body.starts_with("---"));
    }

    #[test]
    fn remove_section_keeps_later_rules() {
        let text = "---\ntitle: A\n---\n\nabove\n\n---\n\nbelow\n---\n";
        assert_eq!(remove_properties_section(text), "above\n\n---\n\nbelow\n---");
    }

    #[test]
    fn remove_section_without_block_only_trims() {
        assert_eq!(remove_properties_section("\n\n  text  \n"), "text");
    }

    #[test]
    fn empty_block_is_a_block() {
        assert_eq!(properties_section("---\n---\nbody"), Some(""));
        assert_eq!(remove_properties_section("---\n---\nbody"), "body");
    }

    #[test]
    fn property_key_names() {
        assert_eq!(PropertyKey::Favorited.as_ref(), "favorited");
        assert_eq!(PropertyKey::from_str("ATTACHMENTS").unwrap(), PropertyKey::Attachments);
    }
}
