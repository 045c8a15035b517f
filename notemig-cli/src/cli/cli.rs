use clap::{ArgAction, CommandFactory, Parser};
use log::LevelFilter;
use notemig_core::Config;
use std::path::{Path, PathBuf};

use crate::render::ColorMode;

/// notemig — move a Notable data directory into an Obsidian vault
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Directory holding the notes to migrate (e.g. `~/.notable/notes`).
    pub source: PathBuf,
    /// Vault directory the migrated notes are written to.
    pub destination: PathBuf,
    /// Attachments directory to copy into the vault (e.g. `~/.notable/attachments`).
    #[arg(long, value_name = "DIR")]
    pub attachments: Option<PathBuf>,
    /// Show what would be written without touching the vault.
    #[arg(long, short = 'n')]
    pub dry_run: bool,
    /// Tag prefix that marks a notebook (default: `Notebooks/`).
    #[arg(long, env = "NOTEMIG_NOTEBOOK_PREFIX")]
    pub notebook_prefix: Option<String>,
    /// Vault directory name attachments live in (default: `attachments`).
    #[arg(long, value_name = "NAME")]
    pub attachments_dir: Option<String>,
    /// More logging: `-v` also lists every rewritten link.
    #[arg(long, short, action = ArgAction::Count)]
    pub verbose: u8,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
}

impl Cli {
    pub fn new() -> Self {
        Cli::parse()
    }

    /// Checks that both positional paths are existing directories.
    pub fn validate(&self) -> Result<(), String> {
        check_dir("source", &self.source)?;
        check_dir("destination", &self.destination)?;
        if let Some(dir) = &self.attachments {
            check_dir("attachments", dir)?;
        }
        Ok(())
    }

    pub fn usage() -> String {
        Cli::command().render_usage().to_string()
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }

    /// Applies command line overrides on top of the loaded config.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(prefix) = self.notebook_prefix.as_ref().filter(|p| !p.is_empty()) {
            config.notebook_prefix = prefix.clone();
        }
        if let Some(dir) = self
            .attachments_dir
            .as_deref()
            .map(|d| d.trim_matches('/'))
            .filter(|d| !d.is_empty())
        {
            config.attachments_dir = dir.to_string();
        }
        config.dry_run = self.dry_run;
        config
    }
}

fn check_dir(name: &str, path: &Path) -> Result<(), String> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(format!("{name} '{}' is not a directory", path.display()))
    }
}
