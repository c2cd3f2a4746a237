//! Sidebar nodes: raw configuration entries and their validated form.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::error::ConfigurationErrorKind;

/// Sidebar entry as written in configuration.
///
/// An entry with `link` is a leaf; an entry with `items` (alias `children`)
/// is a group. [`build_tree`](crate::build_tree) rejects anything else.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavigationNodeSpec {
    /// Label in the default locale.
    pub label: String,
    /// Target path (`/guide/`) or external URL.
    #[serde(default)]
    pub link: Option<String>,
    /// Label overrides keyed by locale code or lang tag.
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
    /// Child entries.
    #[serde(default, alias = "children")]
    pub items: Option<Vec<NavigationNodeSpec>>,
    /// Whether the group starts collapsed.
    #[serde(default)]
    pub collapsed: Option<bool>,
}

impl NavigationNodeSpec {
    /// Create a leaf entry.
    #[must_use]
    pub fn leaf(label: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            link: Some(link.into()),
            ..Self::default()
        }
    }

    /// Create a group entry.
    #[must_use]
    pub fn group(label: impl Into<String>, items: Vec<NavigationNodeSpec>) -> Self {
        Self {
            label: label.into(),
            items: Some(items),
            ..Self::default()
        }
    }

    /// Add a label override for a locale.
    #[must_use]
    pub fn with_translation(mut self, locale: impl Into<String>, label: impl Into<String>) -> Self {
        self.translations.insert(locale.into(), label.into());
        self
    }

    /// Set the initial collapsed state.
    #[must_use]
    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = Some(collapsed);
        self
    }
}

/// Target of a leaf entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Link {
    /// Site-relative path starting with `/`.
    Internal(String),
    /// Absolute `http://` or `https://` URL.
    External(String),
}

impl Link {
    /// Classify a configured link.
    pub(crate) fn parse(raw: &str) -> Result<Self, ConfigurationErrorKind> {
        let link = raw.trim();
        if link.is_empty() {
            Err(ConfigurationErrorKind::EmptyLink)
        } else if link.starts_with('/') {
            Ok(Self::Internal(link.to_owned()))
        } else if link.starts_with("http://") || link.starts_with("https://") {
            Ok(Self::External(link.to_owned()))
        } else {
            Err(ConfigurationErrorKind::InvalidLink(link.to_owned()))
        }
    }

    /// The link as configured.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Internal(link) | Self::External(link) => link,
        }
    }

    /// Whether the link points into this site.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }

    /// Content slug of an internal link (`/overview/intro/` → `overview/intro`).
    ///
    /// The site root `/` has the empty slug. External links have none.
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        match self {
            Self::Internal(link) => Some(link.trim_matches('/')),
            Self::External(_) => None,
        }
    }

    /// Form used for uniqueness checks: trailing slashes are not significant.
    pub(crate) fn key(&self) -> &str {
        normalize(self.as_str())
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strip surrounding whitespace and trailing slashes from a link.
pub(crate) fn normalize(link: &str) -> &str {
    link.trim().trim_end_matches('/')
}

/// A validated sidebar node.
///
/// Group and leaf are distinct variants, so a node can never carry both a
/// link and children. Translation keys are locale codes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationNode {
    /// Organizes children, has no content of its own.
    Group {
        /// Label in the default locale.
        label: String,
        /// Label overrides keyed by locale code.
        translations: BTreeMap<String, String>,
        /// Children in rendered order.
        children: Vec<NavigationNode>,
        /// Whether the group starts collapsed.
        collapsed: bool,
    },
    /// Points at a content document or an external URL.
    Leaf {
        /// Label in the default locale.
        label: String,
        /// Label overrides keyed by locale code.
        translations: BTreeMap<String, String>,
        /// Link target.
        link: Link,
    },
}

impl NavigationNode {
    /// Label in the default locale.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Group { label, .. } | Self::Leaf { label, .. } => label,
        }
    }

    /// Label overrides keyed by locale code.
    #[must_use]
    pub fn translations(&self) -> &BTreeMap<String, String> {
        match self {
            Self::Group { translations, .. } | Self::Leaf { translations, .. } => translations,
        }
    }

    /// Link of a leaf.
    #[must_use]
    pub fn link(&self) -> Option<&Link> {
        match self {
            Self::Leaf { link, .. } => Some(link),
            Self::Group { .. } => None,
        }
    }

    /// Children of a group, empty for a leaf.
    #[must_use]
    pub fn children(&self) -> &[NavigationNode] {
        match self {
            Self::Group { children, .. } => children,
            Self::Leaf { .. } => &[],
        }
    }

    /// Whether this node is a leaf.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Label for `locale`, falling back to the default label.
    ///
    /// Never fails: any locale without an override gets the default label.
    #[must_use]
    pub fn resolve_label(&self, locale: &str) -> &str {
        self.translations()
            .get(locale)
            .map_or_else(|| self.label(), String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn welcome() -> NavigationNode {
        NavigationNode::Leaf {
            label: "Welcome".to_owned(),
            translations: BTreeMap::from([("es".to_owned(), "Bienvenida".to_owned())]),
            link: Link::Internal("/welcome/".to_owned()),
        }
    }

    #[test]
    fn test_resolve_label_uses_translation() {
        assert_eq!(welcome().resolve_label("es"), "Bienvenida");
    }

    #[test]
    fn test_resolve_label_falls_back_to_default() {
        let node = welcome();
        assert_eq!(node.resolve_label("root"), "Welcome");
        assert_eq!(node.resolve_label("fr"), "Welcome");
        assert_eq!(node.resolve_label(""), "Welcome");
    }

    #[test]
    fn test_leaf_accessors() {
        let node = welcome();
        assert!(node.is_leaf());
        assert!(node.children().is_empty());
        assert_eq!(node.link().map(Link::as_str), Some("/welcome/"));
    }

    #[test]
    fn test_link_parse_internal() {
        let link = Link::parse(" /overview/introduction/ ").unwrap();
        assert_eq!(link, Link::Internal("/overview/introduction/".to_owned()));
        assert_eq!(link.slug(), Some("overview/introduction"));
        assert_eq!(link.key(), "/overview/introduction");
    }

    #[test]
    fn test_link_parse_root_slug_is_empty() {
        let link = Link::parse("/").unwrap();
        assert_eq!(link.slug(), Some(""));
    }

    #[test]
    fn test_link_parse_external() {
        let link = Link::parse("https://github.com/foliochain/protocol").unwrap();
        assert!(!link.is_internal());
        assert_eq!(link.slug(), None);
    }

    #[test]
    fn test_link_parse_rejects_relative_and_empty() {
        assert_eq!(Link::parse("  "), Err(ConfigurationErrorKind::EmptyLink));
        assert_eq!(
            Link::parse("overview/"),
            Err(ConfigurationErrorKind::InvalidLink("overview/".to_owned()))
        );
        assert_eq!(
            Link::parse("ftp://example.com"),
            Err(ConfigurationErrorKind::InvalidLink(
                "ftp://example.com".to_owned()
            ))
        );
    }

    #[test]
    fn test_spec_deserializes_children_alias() {
        let spec: NavigationNodeSpec = toml::from_str(
            r#"
label = "Overview"
translations = { es = "Resumen" }

[[children]]
label = "Introduction"
link = "/overview/introduction/"
"#,
        )
        .unwrap();

        assert_eq!(
            spec,
            NavigationNodeSpec::group(
                "Overview",
                vec![NavigationNodeSpec::leaf("Introduction", "/overview/introduction/")],
            )
            .with_translation("es", "Resumen")
        );
    }

    #[test]
    fn test_spec_rejects_unknown_fields() {
        let result: Result<NavigationNodeSpec, _> = toml::from_str(
            r#"
label = "Overview"
href = "/overview/"
"#,
        );
        assert!(result.is_err());
    }
}
