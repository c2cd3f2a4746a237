//! `links` command implementation.

use clap::Args;
use folio_nav::SiteNavigation;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the links command.
#[derive(Args)]
pub(crate) struct LinksArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Skip external links.
    #[arg(long)]
    internal: bool,

    /// Print public hrefs for this locale instead of configured links.
    #[arg(short, long)]
    locale: Option<String>,
}

impl LinksArgs {
    /// Execute the links command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or navigation is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load(None)?;
        let nav = config.navigation()?;

        for line in link_lines(&nav, self.internal, self.locale.as_deref()) {
            output.print(&line);
        }
        Ok(())
    }
}

/// Sidebar links in document order, one per line.
fn link_lines(nav: &SiteNavigation, internal_only: bool, locale: Option<&str>) -> Vec<String> {
    nav.tree()
        .flatten_links()
        .filter(|link| !internal_only || link.is_internal())
        .map(|link| match locale {
            Some(locale) => nav.href(link, locale),
            None => link.as_str().to_owned(),
        })
        .collect()
}
