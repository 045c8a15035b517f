pub mod collect;
pub mod config;
pub mod entry;
pub mod links;
pub mod migrate;
pub mod notemig;
pub mod paths;
pub mod properties;
pub mod render;

pub use collect::{CollectStats, Collection, collect};
pub use config::Config;
pub use entry::{Entry, Notes};
pub use migrate::{MigrationReport, copy_attachments, migrate};
pub use notemig::{Notemig, RunSummary};
pub use properties::{Properties, extract_properties, remove_properties_section};
pub use render::generate_properties_section;
