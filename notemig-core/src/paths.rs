use std::path::{Component, Path, PathBuf};

/// Moves `relative` into the notebook subdirectory, keeping its base name:
/// `notes/a.md` + `Work` → `notes/Work/a.md`.
pub fn notebook_path(relative: &Path, notebook: &str) -> PathBuf {
    let dir = relative.parent().unwrap_or_else(|| Path::new(""));
    let mut p = dir.to_path_buf();
    // `..` would escape the vault.
    for part in notebook
        .split('/')
        .filter(|part| !part.is_empty() && *part != "." && *part != "..")
    {
        p.push(part);
    }
    match relative.file_name() {
        Some(name) => p.join(name),
        None => p,
    }
}

/// Vault-relative directory of a note, with `/` separators (`""` at the root).
pub fn link_dir(relative: &Path) -> String {
    relative
        .parent()
        .map(|dir| {
            dir.components()
                .filter_map(|c| match c {
                    Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("/")
        })
        .unwrap_or_default()
}

pub fn destination_path(dest_root: &Path, relative: &Path) -> PathBuf {
    dest_root.join(relative)
}
