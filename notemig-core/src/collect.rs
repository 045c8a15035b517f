//! Walks a source tree and turns every note file into an [`Entry`].

use crate::config::Config;
use crate::entry::{Entry, Notes};
use crate::paths::notebook_path;
use crate::properties::{extract_properties, remove_properties_section};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Counters gathered while walking the source tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectStats {
    pub visited: usize,
    pub deleted: usize,
    pub duplicates: usize,
}

/// Notes found in the source tree plus what happened on the way.
#[derive(Debug, Default)]
pub struct Collection {
    pub notes: Notes,
    pub stats: CollectStats,
}

/// Reads every file under `root` into a [`Collection`].
///
/// - Deleted notes are skipped.
/// - A notebook tag moves the note into the notebook's directory.
/// - Notes sharing a title replace each other; the last one visited wins.
///
/// Entries are visited in sorted path order. Any I/O error aborts the walk.
pub fn collect(root: &Path, config: &Config) -> Result<Collection> {
    let mut collection = Collection::default();
    collect_dir(root, root, config, &mut collection)?;
    Ok(collection)
}

fn collect_dir(root: &Path, dir: &Path, config: &Config, acc: &mut Collection) -> Result<()> {
    let mut paths = fs::read_dir(dir)
        .with_context(|| format!("reading directory {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<PathBuf>, _>>()
        .with_context(|| format!("listing {}", dir.display()))?;
    paths.sort();

    for p in paths {
        if is_hidden(&p) {
            continue;
        }
        let meta = fs::metadata(&p).with_context(|| format!("reading metadata of {}", p.display()))?;

        if meta.is_dir() {
            collect_dir(root, &p, config, acc)?;
        } else if meta.is_file() {
            acc.stats.visited += 1;
            log::info!("reading {}", p.display());

            let Some(entry) = read_entry(root, &p, config)? else {
                log::info!("skipping deleted note {}", p.display());
                acc.stats.deleted += 1;
                continue;
            };
            if let Some(previous) = acc.notes.insert(entry.title.clone(), entry) {
                log::warn!(
                    "duplicate title '{}': {} replaces {}",
                    previous.title,
                    p.display(),
                    previous.source.display()
                );
                acc.stats.duplicates += 1;
            }
        }
    }

    Ok(())
}

/// Reads a single note. Returns `None` when it is marked deleted.
pub fn read_entry(root: &Path, path: &Path, config: &Config) -> Result<Option<Entry>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let text = String::from_utf8(bytes)
        .with_context(|| format!("{} is not UTF-8 text; move it out of the source tree", path.display()))?;
    let relative = path.strip_prefix(root).unwrap_or(path);
    Ok(parse_entry(&text, path, relative, &config.notebook_prefix))
}

/// Builds an entry from a note's text. Returns `None` when it is marked deleted.
pub fn parse_entry(text: &str, source: &Path, relative: &Path, notebook_prefix: &str) -> Option<Entry> {
    let mut properties = extract_properties(text);
    if properties.deleted {
        return None;
    }

    let path = match take_notebook(&mut properties.tags, notebook_prefix) {
        Some(notebook) => notebook_path(relative, &notebook),
        None => relative.to_path_buf(),
    };

    Some(Entry {
        title: properties.title.clone(),
        source: source.to_path_buf(),
        path,
        body: remove_properties_section(text),
        properties,
    })
}

/// Removes the first notebook tag from `tags` and returns the notebook name.
pub fn take_notebook(tags: &mut Vec<String>, prefix: &str) -> Option<String> {
    let index = tags.iter().position(|tag| {
        tag.strip_prefix(prefix)
            .is_some_and(|name| !name.trim_matches('/').is_empty())
    })?;
    let tag = tags.remove(index);
    tag.strip_prefix(prefix).map(str::to_string)
}

fn is_hidden(p: &Path) -> bool {
    p.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn notebook_tag_is_removed_and_routes_the_note() {
        let text = "---\ntitle: Plan\ntags: [Notebooks/Work, urgent]\ndeleted: false\n---\nBody";
        let e = parse_entry(text, Path::new("/src/plan.md"), Path::new("plan.md"), "Notebooks/")
            .unwrap();
        assert_eq!(e.properties.tags, vec!["urgent"]);
        assert_eq!(e.path, PathBuf::from("Work/plan.md"));
        assert_eq!(e.title, "Plan");
        assert_eq!(e.body, "Body");
    }

    #[test]
    fn deleted_note_is_dropped() {
        let text = "---\ntitle: Gone\ndeleted: true\n---\nBody";
        assert!(parse_entry(text, Path::new("gone.md"), Path::new("gone.md"), "Notebooks/").is_none());
    }

    #[test]
    fn only_first_notebook_tag_is_used() {
        let mut tags = vec![
            "a".to_string(),
            "Notebooks/One".to_string(),
            "Notebooks/Two".to_string(),
        ];
        assert_eq!(take_notebook(&mut tags, "Notebooks/"), Some("One".to_string()));
        assert_eq!(tags, vec!["a", "Notebooks/Two"]);
    }

    #[test]
    fn bare_prefix_is_not_a_notebook() {
        let mut tags = vec!["Notebooks/".to_string()];
        assert_eq!(take_notebook(&mut tags, "Notebooks/"), None);
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn untitled_note_has_empty_title() {
        let e = parse_entry("plain text", Path::new("x/idea.md"), Path::new("x/idea.md"), "Notebooks/")
            .unwrap();
        assert_eq!(e.title, "");
        assert_eq!(e.path, PathBuf::from("x/idea.md"));
        assert_eq!(e.body, "plain text");
    }

    #[test]
    fn non_utf8_file_names_the_file() {
        let tmp = tempfile::tempdir().unwrap();
        let p = tmp.path().join("image.png");
        fs::write(&p, [0xff, 0xfe, 0x00, 0x89]).unwrap();

        let err = read_entry(tmp.path(), &p, &Config::default()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("image.png"));
        assert!(message.contains("not UTF-8"));
    }
}
