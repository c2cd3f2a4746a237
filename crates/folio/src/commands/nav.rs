//! `nav` command implementation.

use clap::Args;
use folio_nav::{PageLink, Sidebar, SidebarEntry, SiteNavigation};

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Locale code or lang tag (default: the default locale).
    #[arg(short, long)]
    locale: Option<String>,

    /// Link of the page being viewed.
    #[arg(long)]
    current: Option<String>,

    /// Print the sidebar as JSON.
    #[arg(long)]
    json: bool,
}

impl NavArgs {
    /// Execute the nav command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or `--current` names a
    /// page that is not in the sidebar.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load(None)?;
        let nav = config.navigation()?;

        let locales = nav.locales();
        let locale = match self.locale.as_deref() {
            Some(key) => locales.find(key).ok_or_else(|| {
                CliError::Validation(format!("Unknown locale: {key}"))
            })?,
            None => locales.default_locale(),
        };
        let current = self.current.as_deref();
        if let Some(link) = current
            && !nav.tree().contains(link)
        {
            return Err(CliError::Validation(format!("Page not in sidebar: {link}")));
        }

        let sidebar = nav.sidebar(&locale.code, current);
        if self.json {
            output.print(&serde_json::to_string_pretty(&sidebar)?);
            return Ok(());
        }

        for line in render_sidebar(&sidebar) {
            output.print(&line);
        }
        if let Some(link) = current {
            output.print("");
            for line in page_context(&nav, link, &locale.code) {
                output.print(&line);
            }
        }
        Ok(())
    }
}

/// Indented text rendering of a sidebar.
///
/// Groups are marked `▾` when expanded and `▸` when collapsed; children of
/// collapsed groups are still listed. The current page is marked `*`.
fn render_sidebar(sidebar: &Sidebar) -> Vec<String> {
    let mut lines = Vec::new();
    render_entries(&sidebar.entries, 0, &mut lines);
    lines
}

fn render_entries(entries: &[SidebarEntry], depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    for entry in entries {
        match entry {
            SidebarEntry::Group {
                label,
                collapsed,
                entries,
            } => {
                let marker = if *collapsed { '▸' } else { '▾' };
                lines.push(format!("{indent}{marker} {label}"));
                render_entries(entries, depth + 1, lines);
            }
            SidebarEntry::Link {
                label,
                href,
                is_current,
            } => {
                let marker = if *is_current { '*' } else { '-' };
                lines.push(format!("{indent}{marker} {label} ({href})"));
            }
        }
    }
}

/// Breadcrumbs and prev/next lines for the page at `link`.
fn page_context(nav: &SiteNavigation, link: &str, locale: &str) -> Vec<String> {
    let tree = nav.tree();
    let mut lines = Vec::new();

    if let Some(crumbs) = tree.breadcrumbs(link, locale)
        && !crumbs.is_empty()
    {
        lines.push(format!("Breadcrumbs: {}", crumbs.join(" > ")));
    }
    if let Some(pagination) = tree.pagination(link, locale) {
        let page = |page: PageLink<'_>| format!("{} ({})", page.label, nav.href(page.link, locale));
        if let Some(prev) = pagination.prev {
            lines.push(format!("Previous: {}", page(prev)));
        }
        if let Some(next) = pagination.next {
            lines.push(format!("Next: {}", page(next)));
        }
    }
    lines
}
