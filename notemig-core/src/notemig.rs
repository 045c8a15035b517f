use crate::{
    Config,
    collect::{CollectStats, collect},
    migrate::{MigrationReport, copy_attachments, migrate},
};
use anyhow::Result;
use std::path::Path;

/// Everything a finished run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub stats: CollectStats,
    pub report: MigrationReport,
}

pub struct Notemig {
    pub config: Config,
}

impl Notemig {
    /// Creates a new `Notemig` instance, loading configuration from standard paths.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Collects the whole `source` tree, then migrates it into `destination`.
    /// When `attachments` is given, its files are copied into the vault afterwards.
    pub fn run(
        &self,
        source: &Path,
        destination: &Path,
        attachments: Option<&Path>,
    ) -> Result<RunSummary> {
        let collection = collect(source, &self.config)?;
        log::info!(
            "collected {} notes from {} files",
            collection.notes.len(),
            collection.stats.visited
        );

        let mut report = migrate(&collection.notes, destination, &self.config)?;
        if let Some(dir) = attachments {
            report.attachments = copy_attachments(dir, destination, &self.config)?;
        }

        Ok(RunSummary {
            stats: collection.stats,
            report,
        })
    }
}
