//! Writes collected notes into the destination vault.

use crate::config::Config;
use crate::entry::{Entry, Notes};
use crate::links::rewrite_links;
use crate::paths::{destination_path, link_dir};
use crate::render::{format_document, generate_properties_section};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A note as it will be written to the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigratedNote {
    pub title: String,
    pub destination: PathBuf,
    pub content: String,
    pub links_rewritten: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub notes: Vec<PathBuf>,
    pub links_rewritten: usize,
    pub attachments: Vec<PathBuf>,
}

/// Computes the destination path and final text of one note. Touches no files.
pub fn render_entry(entry: &Entry, dest_root: &Path, config: &Config) -> MigratedNote {
    let destination = destination_path(dest_root, &entry.path);
    let rewritten = rewrite_links(&entry.body, &link_dir(&entry.path), &config.attachments_dir);
    let section = generate_properties_section(&entry.properties, &config.attachments_dir);

    MigratedNote {
        title: entry.title.clone(),
        destination,
        content: format_document(&section, &rewritten.text),
        links_rewritten: rewritten.rewrites.len(),
    }
}

/// Migrates every note into `dest_root`, overwriting files already there.
///
/// In dry-run mode the notes are rendered and reported but nothing is written.
pub fn migrate(notes: &Notes, dest_root: &Path, config: &Config) -> Result<MigrationReport> {
    let mut report = MigrationReport::default();

    for entry in notes.values() {
        let note = render_entry(entry, dest_root, config);

        if config.dry_run {
            log::info!("would write {} -> {}", entry.source.display(), note.destination.display());
        } else {
            write_file(&note.destination, &note.content)?;
            log::info!("wrote {} -> {}", entry.source.display(), note.destination.display());
        }

        report.links_rewritten += note.links_rewritten;
        report.notes.push(note.destination);
    }

    Ok(report)
}

/// Copies every file below `source` into `<dest_root>/<attachments_dir>`, keeping
/// relative paths. Returns the destination paths.
pub fn copy_attachments(source: &Path, dest_root: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    let target = dest_root.join(&config.attachments_dir);
    let mut copied = Vec::new();
    copy_dir(source, &target, config.dry_run, &mut copied)?;
    Ok(copied)
}

fn copy_dir(from: &Path, to: &Path, dry_run: bool, acc: &mut Vec<PathBuf>) -> Result<()> {
    let mut paths = fs::read_dir(from)
        .with_context(|| format!("reading directory {}", from.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<PathBuf>, _>>()
        .with_context(|| format!("listing {}", from.display()))?;
    paths.sort();

    for p in paths {
        let Some(name) = p.file_name() else { continue };
        let dest = to.join(name);
        let meta = fs::metadata(&p).with_context(|| format!("reading metadata of {}", p.display()))?;

        if meta.is_dir() {
            copy_dir(&p, &dest, dry_run, acc)?;
        } else if meta.is_file() {
            if dry_run {
                log::info!("would copy {} -> {}", p.display(), dest.display());
            } else {
                fs::create_dir_all(to).with_context(|| format!("creating {}", to.display()))?;
                fs::copy(&p, &dest)
                    .with_context(|| format!("copying {} to {}", p.display(), dest.display()))?;
                log::info!("copied {} -> {}", p.display(), dest.display());
            }
            acc.push(dest);
        }
    }

    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating parent directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))
}
