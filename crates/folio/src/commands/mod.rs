//! CLI command implementations.

mod check;
mod links;
mod nav;

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use links::LinksArgs;
pub(crate) use nav::NavArgs;

/// Configuration arguments shared by every command.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long, env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,

    /// Site base path (overrides config).
    #[arg(long)]
    base: Option<String>,
}

impl ConfigArgs {
    /// Load configuration, applying `content_dir` and the base override.
    fn load(&self, content_dir: Option<PathBuf>) -> Result<Config, CliError> {
        let settings = CliSettings {
            content_dir,
            base: self.base.clone(),
        };
        Ok(Config::load(self.config.as_deref(), Some(&settings))?)
    }
}
