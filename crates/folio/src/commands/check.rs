//! `check` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_content::{ContentReport, ContentSource, FsContent, verify};
use folio_nav::SiteNavigation;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Content directory (overrides config).
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Fail on missing translations and unreferenced documents.
    #[arg(long)]
    strict: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid, site assets are
    /// missing, or a sidebar link has no content.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load(self.content_dir)?;

        let missing = config.assets_resolved.missing();
        if !missing.is_empty() {
            let paths: Vec<_> = missing.iter().map(|p| p.display().to_string()).collect();
            return Err(CliError::Validation(format!(
                "Missing site assets: {}",
                paths.join(", ")
            )));
        }

        let nav = config.navigation()?;
        let content_dir = &config.docs_resolved.content_dir;
        output.info(&format!("Checking content in {}", content_dir.display()));

        let content = FsContent::new(content_dir.clone());
        let report = check_content(&nav, &content, self.strict)?;

        for warning in warnings(&report) {
            output.warning(&warning);
        }
        output.success(&format!(
            "{} links checked across {} locale(s), {} external",
            report.checked,
            nav.locales().len(),
            report.external
        ));
        Ok(())
    }
}

/// Verify sidebar content, treating warnings as errors when `strict`.
fn check_content(
    nav: &SiteNavigation,
    source: &dyn ContentSource,
    strict: bool,
) -> Result<ContentReport, CliError> {
    let report = verify(nav, source)?;
    if strict && !report.is_clean() {
        return Err(CliError::Validation(format!(
            "{} warning(s) in strict mode:\n  {}",
            report.fallbacks.len() + report.orphans.len(),
            warnings(&report).join("\n  ")
        )));
    }
    Ok(report)
}

fn warnings(report: &ContentReport) -> Vec<String> {
    let fallbacks = report.fallbacks.iter().map(|f| {
        format!(
            "Missing {} translation for {}, using default content",
            f.locale, f.link
        )
    });
    let orphans = report
        .orphans
        .iter()
        .map(|o| format!("Document {} ({}) is not in the sidebar", o.slug, o.locale));
    fallbacks.chain(orphans).collect()
}
