//! Configuration errors raised while building navigation.
//!
//! Every error carries an [`ErrorLocation`] so the offending entry can be
//! found in the source configuration. Sidebar locations are rendered as the
//! chain of nodes from the root, e.g. `sidebar #1 "Overview" > #2 "Introduction"`.

use std::fmt;

/// One step in a [`NodePath`]: the 1-based position among siblings and the label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathSegment {
    /// Position among siblings, starting at 1.
    pub position: usize,
    /// Label as written in the configuration (may be empty).
    pub label: String,
}

/// Path of a sidebar node from the root of the tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodePath {
    segments: Vec<PathSegment>,
}

impl NodePath {
    /// Create an empty path (the sidebar root).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Path segments, root first.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Labels of all segments, root first.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|s| s.label.as_str())
    }

    pub(crate) fn push(&mut self, position: usize, label: &str) {
        self.segments.push(PathSegment {
            position,
            label: label.to_owned(),
        });
    }

    pub(crate) fn pop(&mut self) {
        self.segments.pop();
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(" > ")?;
            }
            write!(f, "#{} {:?}", segment.position, segment.label)?;
        }
        Ok(())
    }
}

/// Where in the configuration an error was found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorLocation {
    /// A node in the sidebar tree.
    Sidebar(NodePath),
    /// The locale table as a whole.
    Locales,
    /// A single locale entry, by code.
    Locale(String),
    /// The site base path.
    Base,
}

impl fmt::Display for ErrorLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sidebar(path) => write!(f, "sidebar {path}"),
            Self::Locales => f.write_str("locales"),
            Self::Locale(code) => write!(f, "locales.{code}"),
            Self::Base => f.write_str("base"),
        }
    }
}

/// The rule a configuration entry violates.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationErrorKind {
    #[error("label must not be empty")]
    EmptyLabel,
    #[error("entry has both a link and children")]
    LinkAndChildren,
    #[error("entry must have either a link or children")]
    MissingLinkOrChildren,
    #[error("group has no children")]
    EmptyGroup,
    #[error("`collapsed` only applies to groups")]
    CollapsedLeaf,
    #[error("link must not be empty")]
    EmptyLink,
    #[error("link {0:?} must start with '/' or http:// or https://")]
    InvalidLink(String),
    #[error("link {link:?} is already used by sidebar {first}")]
    DuplicateLink {
        /// The duplicated link as written.
        link: String,
        /// The node that declared the link first.
        first: NodePath,
    },
    #[error("translation key {0:?} is not a configured locale")]
    UnknownLocale(String),
    #[error("translation for {0:?} must not be empty")]
    EmptyTranslation(String),
    #[error("locale {0:?} is translated more than once")]
    DuplicateTranslation(String),
    #[error("at least one locale must be configured")]
    NoLocales,
    #[error("no locale is marked as default")]
    NoDefaultLocale,
    #[error("only the root locale can be the default")]
    DefaultNotRoot,
    #[error("the root locale must be marked as default")]
    RootNotDefault,
    #[error("locale code must not be empty")]
    EmptyLocaleCode,
    #[error("the root locale requires a `lang` tag")]
    MissingLang,
    #[error("lang tag {lang:?} is already used by locale {first:?}")]
    DuplicateLang {
        /// The repeated BCP-47 tag.
        lang: String,
        /// Code of the locale that declared it first.
        first: String,
    },
    #[error("base {0:?} must be empty or start with '/'")]
    InvalidBase(String),
}

/// A navigation configuration error. Always fatal to the build.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{location}: {kind}")]
pub struct ConfigurationError {
    /// Where the error was found.
    pub location: ErrorLocation,
    /// Which rule was violated.
    pub kind: ConfigurationErrorKind,
}

impl ConfigurationError {
    pub(crate) fn sidebar(path: &NodePath, kind: ConfigurationErrorKind) -> Self {
        Self {
            location: ErrorLocation::Sidebar(path.clone()),
            kind,
        }
    }

    pub(crate) fn locale(code: &str, kind: ConfigurationErrorKind) -> Self {
        Self {
            location: ErrorLocation::Locale(code.to_owned()),
            kind,
        }
    }
}
