//! Sidebar link verification against a content source.

use folio_nav::{Locale, SiteNavigation};

use crate::source::ContentSource;

/// Sidebar links with no document in the default locale. Fatal to the build.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("No content for sidebar links: {}", .links.join(", "))]
pub struct MissingContentError {
    /// Links as configured, in document order.
    pub links: Vec<String>,
}

/// A link served from default-locale content because a translation is missing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fallback {
    /// Locale code lacking the document.
    pub locale: String,
    /// Link as configured.
    pub link: String,
}

/// A document that no sidebar entry points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Orphan {
    /// Locale code the document belongs to.
    pub locale: String,
    /// Document slug.
    pub slug: String,
}

/// Outcome of a successful verification.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentReport {
    /// Number of internal links checked.
    pub checked: usize,
    /// Number of external links skipped.
    pub external: usize,
    /// Missing translations.
    pub fallbacks: Vec<Fallback>,
    /// Unreferenced documents.
    pub orphans: Vec<Orphan>,
}

impl ContentReport {
    /// Whether there is nothing to warn about.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.fallbacks.is_empty() && self.orphans.is_empty()
    }
}

/// Check that every internal sidebar link has content.
///
/// Every link must resolve in the default locale. Links missing in other
/// locales are reported as [`Fallback`]s, and documents the sidebar never
/// references as [`Orphan`]s. External links are not checked.
///
/// # Errors
///
/// Returns [`MissingContentError`] listing every internal link without a
/// default-locale document.
pub fn verify(
    nav: &SiteNavigation,
    source: &dyn ContentSource,
) -> Result<ContentReport, MissingContentError> {
    let locales = nav.locales();
    let default = locales.default_locale();
    let translated: Vec<&Locale> = locales.iter().filter(|l| !l.is_default).collect();

    let mut report = ContentReport::default();
    let mut missing = Vec::new();

    for link in nav.tree().flatten_links() {
        let Some(slug) = link.slug() else {
            report.external += 1;
            continue;
        };
        report.checked += 1;

        if source.resolve(default.directory(), slug).is_none() {
            tracing::error!(link = %link, locale = %default.code, "Sidebar link has no content");
            missing.push(link.as_str().to_owned());
            continue;
        }

        for locale in &translated {
            if source.resolve(locale.directory(), slug).is_none() {
                tracing::warn!(link = %link, locale = %locale.code, "Translation missing, falling back to default locale");
                report.fallbacks.push(Fallback {
                    locale: locale.code.clone(),
                    link: link.as_str().to_owned(),
                });
            }
        }
    }

    if !missing.is_empty() {
        return Err(MissingContentError { links: missing });
    }

    let locale_dirs: Vec<&str> = locales.iter().filter_map(Locale::directory).collect();
    for locale in locales {
        for slug in source.scan(locale.directory(), &locale_dirs) {
            if !nav.tree().contains(&format!("/{slug}")) {
                tracing::warn!(slug = %slug, locale = %locale.code, "Document not referenced by the sidebar");
                report.orphans.push(Orphan {
                    locale: locale.code.clone(),
                    slug,
                });
            }
        }
    }

    tracing::debug!(
        checked = report.checked,
        fallbacks = report.fallbacks.len(),
        orphans = report.orphans.len(),
        "Verified sidebar content"
    );

    Ok(report)
}
