//! Rewrites source-format links into double-bracket vault links.
//!
//! - `[Text](@note/sub/page.md)` becomes `[[<note dir>/page\|Text]]`
//! - `[](@attachment/img/photo.png)` becomes `[[attachments/img/photo.png]]`

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::path::Path;

static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\]\r\n]*)\]\(@note/([^)\r\n]+)\)|\[\]\(@attachment/([^)\r\n]+)\)").unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRewrite {
    pub original: String,
    pub replacement: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenBody {
    pub text: String,
    pub rewrites: Vec<LinkRewrite>,
}

/// Rewrites every note and attachment link of `body` in one pass.
///
/// Matches are found against the original body, so a replacement never feeds
/// into another match. `note_dir` is the vault-relative directory of the note
/// being migrated (`""` at the vault root).
pub fn rewrite_links(body: &str, note_dir: &str, attachments_dir: &str) -> RewrittenBody {
    let mut rewrites = Vec::new();

    let text = LINK_RE.replace_all(body, |caps: &Captures| {
        let replacement = match (caps.get(2), caps.get(3)) {
            (Some(target), _) => note_link(&caps[1], target.as_str(), note_dir),
            (None, Some(attachment)) => attachment_link(attachment.as_str(), attachments_dir),
            (None, None) => caps[0].to_string(),
        };
        log::debug!("rewriting link {} -> {}", &caps[0], replacement);
        rewrites.push(LinkRewrite {
            original: caps[0].to_string(),
            replacement: replacement.clone(),
        });
        replacement
    });

    RewrittenBody {
        text: text.into_owned(),
        rewrites,
    }
}

/// `[[dir/stem]]`, with `\|text` appended when the link text says something else.
fn note_link(text: &str, target: &str, note_dir: &str) -> String {
    let stem = Path::new(target)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| target.to_string());
    let link = if note_dir.is_empty() {
        stem
    } else {
        format!("{note_dir}/{stem}")
    };

    if text.is_empty() || text == link {
        format!("[[{link}]]")
    } else {
        format!("[[{link}\\|{text}]]")
    }
}

fn attachment_link(path: &str, attachments_dir: &str) -> String {
    format!("[[{attachments_dir}/{path}]]")
}
