//! Site-wide navigation: locales, base path and the validated tree.
//!
//! [`SiteNavigation::build`] is the single startup entry point. The result is
//! immutable and can be shared across threads without locking.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{ConfigurationError, ConfigurationErrorKind, ErrorLocation};
use crate::locale::{Locale, LocaleSet, LocaleSpec};
use crate::node::{Link, NavigationNode, NavigationNodeSpec, normalize};
use crate::tree::{NavigationTree, build_tree};

/// Everything needed to build [`SiteNavigation`].
#[derive(Clone, Debug, Default)]
pub struct NavigationConfig {
    /// Path the site is served under (`/foliochain-docs`), empty for `/`.
    pub base: String,
    /// Locales keyed by code. Empty means a single English `root` locale.
    pub locales: BTreeMap<String, LocaleSpec>,
    /// Top-level sidebar entries.
    pub sidebar: Vec<NavigationNodeSpec>,
}

/// Localized sidebar entry, shaped for a frontend renderer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SidebarEntry {
    /// A page link.
    Link {
        /// Localized label.
        label: String,
        /// Fully qualified href (base and locale prefix applied).
        href: String,
        /// Whether this is the page being viewed.
        #[serde(rename = "isCurrent")]
        is_current: bool,
    },
    /// A group of entries.
    Group {
        /// Localized label.
        label: String,
        /// Collapsed state; groups holding the current page are expanded.
        collapsed: bool,
        /// Children in configured order.
        entries: Vec<SidebarEntry>,
    },
}

/// Sidebar for one locale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Sidebar {
    /// Locale code the labels were resolved for.
    pub locale: String,
    /// BCP-47 tag of that locale.
    pub lang: String,
    /// Top-level entries.
    pub entries: Vec<SidebarEntry>,
}

/// Validated navigation for the whole site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteNavigation {
    base: String,
    locales: LocaleSet,
    tree: NavigationTree,
}

impl SiteNavigation {
    /// Validate the configuration and build the navigation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] for an invalid base path, locale table
    /// or sidebar entry.
    pub fn build(config: &NavigationConfig) -> Result<Self, ConfigurationError> {
        let base = normalize_base(&config.base)?;
        let locales = if config.locales.is_empty() {
            LocaleSet::single_default()
        } else {
            LocaleSet::new(&config.locales)?
        };
        let tree = build_tree(&config.sidebar, &locales)?;

        tracing::debug!(
            base = %base,
            locales = locales.len(),
            links = tree.len(),
            "Built site navigation"
        );

        Ok(Self {
            base,
            locales,
            tree,
        })
    }

    /// Normalized base path: empty or `/segment` without trailing slash.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Configured locales.
    #[must_use]
    pub fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    /// The validated sidebar tree.
    #[must_use]
    pub fn tree(&self) -> &NavigationTree {
        &self.tree
    }

    /// Public href of `link` in `locale` (code or lang tag).
    ///
    /// Internal links get the base path and, outside the root locale, the
    /// locale segment. External links are returned as configured.
    #[must_use]
    pub fn href(&self, link: &Link, locale: &str) -> String {
        self.href_for(link, self.locales.resolve(locale))
    }

    /// Localized sidebar for `locale`, marking `current` as the active page.
    ///
    /// Unknown locales fall back to the default locale.
    #[must_use]
    pub fn sidebar(&self, locale: &str, current: Option<&str>) -> Sidebar {
        let locale = self.locales.resolve(locale);
        let current = current.map(normalize);
        let entries = self
            .tree
            .roots()
            .iter()
            .map(|node| self.entry(node, locale, current).0)
            .collect();

        Sidebar {
            locale: locale.code.clone(),
            lang: locale.lang.clone(),
            entries,
        }
    }

    /// Build an entry and report whether it holds the current page.
    fn entry(
        &self,
        node: &NavigationNode,
        locale: &Locale,
        current: Option<&str>,
    ) -> (SidebarEntry, bool) {
        let label = node.resolve_label(&locale.code).to_owned();
        match node {
            NavigationNode::Leaf { link, .. } => {
                let is_current = current == Some(normalize(link.as_str()));
                let href = self.href_for(link, locale);
                (
                    SidebarEntry::Link {
                        label,
                        href,
                        is_current,
                    },
                    is_current,
                )
            }
            NavigationNode::Group {
                children,
                collapsed,
                ..
            } => {
                let mut holds_current = false;
                let entries = children
                    .iter()
                    .map(|child| {
                        let (entry, is_current) = self.entry(child, locale, current);
                        holds_current |= is_current;
                        entry
                    })
                    .collect();
                (
                    SidebarEntry::Group {
                        label,
                        collapsed: *collapsed && !holds_current,
                        entries,
                    },
                    holds_current,
                )
            }
        }
    }

    fn href_for(&self, link: &Link, locale: &Locale) -> String {
        match (link, locale.directory()) {
            (Link::External(url), _) => url.clone(),
            (Link::Internal(path), None) => format!("{}{path}", self.base),
            (Link::Internal(path), Some(dir)) => format!("{}/{dir}{path}", self.base),
        }
    }
}

/// Normalize the base path, rejecting values without a leading slash.
fn normalize_base(base: &str) -> Result<String, ConfigurationError> {
    let trimmed = base.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    if !trimmed.starts_with('/') {
        return Err(ConfigurationError {
            location: ErrorLocation::Base,
            kind: ConfigurationErrorKind::InvalidBase(base.to_owned()),
        });
    }
    Ok(trimmed.trim_end_matches('/').to_owned())
}
