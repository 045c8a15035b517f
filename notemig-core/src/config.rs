use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::Deserialize;
use std::{fs, path::PathBuf};

pub const DEFAULT_NOTEBOOK_PREFIX: &str = "Notebooks/";
pub const DEFAULT_ATTACHMENTS_DIR: &str = "attachments";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Tags starting with this prefix pick the destination subdirectory (e.g. `Notebooks/Work`).
    pub notebook_prefix: String,
    /// Vault-relative directory attachments live in. Used for attachment links and metadata.
    pub attachments_dir: String,
    /// When set, nothing is written to the destination.
    pub dry_run: bool,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    notebook_prefix: Option<String>,
    attachments_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notebook_prefix: DEFAULT_NOTEBOOK_PREFIX.to_string(),
            attachments_dir: DEFAULT_ATTACHMENTS_DIR.to_string(),
            dry_run: false,
        }
    }
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native) and apply defaults.
    /// A missing or unreadable config file is not an error; defaults are used instead.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or_else(|err| {
            log::warn!("ignoring config file: {err:#}");
            FileConfig::default()
        });
        Ok(Self::from_file_config(file_config))
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        let defaults = Self::default();
        Self {
            notebook_prefix: file_config
                .notebook_prefix
                .filter(|p| !p.is_empty())
                .unwrap_or(defaults.notebook_prefix),
            attachments_dir: file_config
                .attachments_dir
                .map(|d| d.trim_matches('/').to_string())
                .filter(|d| !d.is_empty())
                .unwrap_or(defaults.attachments_dir),
            dry_run: false,
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b
                .home_dir()
                .join(".config")
                .join("notemig")
                .join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("notemig").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }
}
