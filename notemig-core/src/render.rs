//! Pure rendering helpers for the destination format.
//!
//! Metadata block:
//!   ---
//!   favorited: true
//!   created: 2021-03-04T10:11:12.000Z
//!   tags: [a, b]
//!   attachments: [attachments/photo.png]
//!   ---

use crate::properties::{PropertyKey, Properties};

/// Renders the destination metadata block, or `""` when there is nothing to emit.
///
/// Only `favorited`, `created` and `modified` (in that order, when present),
/// `tags` and `attachments` (when non-empty) are written. `title` and `deleted`
/// are never re-emitted.
pub fn generate_properties_section(properties: &Properties, attachments_dir: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(favorited) = properties.favorited {
        lines.push(format_line(PropertyKey::Favorited, &favorited.to_string()));
    }
    if let Some(created) = &properties.created {
        lines.push(format_line(PropertyKey::Created, created));
    }
    if let Some(modified) = &properties.modified {
        lines.push(format_line(PropertyKey::Modified, modified));
    }

    if !properties.tags.is_empty() {
        lines.push(format_list(PropertyKey::Tags, properties.tags.iter().cloned()));
    }
    if !properties.attachments.is_empty() {
        let prefixed = properties
            .attachments
            .iter()
            .map(|name| format!("{attachments_dir}/{name}"));
        lines.push(format_list(PropertyKey::Attachments, prefixed));
    }

    if lines.is_empty() {
        String::new()
    } else {
        format!("---\n{}\n---", lines.join("\n"))
    }
}

/// Puts a metadata block in front of a body, separated by one blank line.
pub fn format_document(section: &str, body: &str) -> String {
    if section.is_empty() {
        body.to_string()
    } else {
        format!("{section}\n\n{body}")
    }
}

fn format_line(key: PropertyKey, value: &str) -> String {
    format!("{}: {value}", key.as_ref())
}

fn format_list(key: PropertyKey, items: impl Iterator<Item = String>) -> String {
    format!("{}: [{}]", key.as_ref(), items.collect::<Vec<_>>().join(", "))
}
