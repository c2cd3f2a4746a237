//! Validated navigation tree.
//!
//! [`build_tree`] turns configuration entries into a [`NavigationTree`],
//! checking every node in pre-order and stopping at the first violation.
//! The tree keeps its roots in configured order plus an index of leaves in
//! document order, which makes breadcrumbs and prev/next lookups O(d) where
//! d is the depth of the leaf.

use std::collections::{BTreeMap, HashMap};
use std::iter::FusedIterator;

use crate::error::{ConfigurationError, ConfigurationErrorKind, NodePath};
use crate::locale::LocaleSet;
use crate::node::{Link, NavigationNode, NavigationNodeSpec, normalize};

/// Immutable, validated sidebar tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationTree {
    roots: Vec<NavigationNode>,
    /// Child-index path from the roots to each leaf, in document order.
    leaf_paths: Vec<Vec<usize>>,
    /// Normalized link to leaf ordinal.
    link_index: HashMap<String, usize>,
}

/// A neighbouring page for prev/next navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageLink<'a> {
    /// Localized label.
    pub label: &'a str,
    /// Link target.
    pub link: &'a Link,
}

/// Previous and next leaves around a page, in document order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pagination<'a> {
    /// Leaf before the page.
    pub prev: Option<PageLink<'a>>,
    /// Leaf after the page.
    pub next: Option<PageLink<'a>>,
}

/// Validate sidebar entries against `locales` and build the tree.
///
/// Sibling order is preserved. Translation keys may name a locale by code
/// or lang tag and are stored by code.
///
/// # Errors
///
/// Returns [`ConfigurationError`] naming the first offending node when a
/// label is empty, an entry has both or neither of link and children, a
/// group is empty, a link is malformed or repeated, or a translation uses an
/// undeclared locale.
pub fn build_tree(
    nodes: &[NavigationNodeSpec],
    locales: &LocaleSet,
) -> Result<NavigationTree, ConfigurationError> {
    let mut builder = TreeBuilder {
        locales,
        path: NodePath::new(),
        seen: HashMap::new(),
        leaf_paths: Vec::new(),
        indices: Vec::new(),
    };

    let roots = nodes
        .iter()
        .enumerate()
        .map(|(i, spec)| builder.build_node(i, spec))
        .collect::<Result<Vec<_>, _>>()?;

    let link_index = builder
        .seen
        .into_iter()
        .map(|(key, (ordinal, _))| (key, ordinal))
        .collect();

    tracing::debug!(
        roots = roots.len(),
        leaves = builder.leaf_paths.len(),
        "Built navigation tree"
    );

    Ok(NavigationTree {
        roots,
        leaf_paths: builder.leaf_paths,
        link_index,
    })
}

/// Pre-order validation state.
struct TreeBuilder<'l> {
    locales: &'l LocaleSet,
    /// Labelled path of the node being validated, for error messages.
    path: NodePath,
    /// Normalized link to (leaf ordinal, declaring node).
    seen: HashMap<String, (usize, NodePath)>,
    leaf_paths: Vec<Vec<usize>>,
    /// Child-index path of the node being validated.
    indices: Vec<usize>,
}

impl TreeBuilder<'_> {
    fn build_node(
        &mut self,
        index: usize,
        spec: &NavigationNodeSpec,
    ) -> Result<NavigationNode, ConfigurationError> {
        self.path.push(index + 1, &spec.label);
        self.indices.push(index);

        if spec.label.trim().is_empty() {
            return Err(self.error(ConfigurationErrorKind::EmptyLabel));
        }

        let node = match (&spec.link, &spec.items) {
            (Some(_), Some(_)) => return Err(self.error(ConfigurationErrorKind::LinkAndChildren)),
            (None, None) => {
                return Err(self.error(ConfigurationErrorKind::MissingLinkOrChildren));
            }
            (Some(raw), None) => {
                if spec.collapsed.is_some() {
                    return Err(self.error(ConfigurationErrorKind::CollapsedLeaf));
                }
                let translations = self.translations(&spec.translations)?;
                let link = self.register_link(raw)?;
                NavigationNode::Leaf {
                    label: spec.label.clone(),
                    translations,
                    link,
                }
            }
            (None, Some(items)) => {
                if items.is_empty() {
                    return Err(self.error(ConfigurationErrorKind::EmptyGroup));
                }
                let translations = self.translations(&spec.translations)?;
                let children = items
                    .iter()
                    .enumerate()
                    .map(|(i, child)| self.build_node(i, child))
                    .collect::<Result<Vec<_>, _>>()?;
                NavigationNode::Group {
                    label: spec.label.clone(),
                    translations,
                    children,
                    collapsed: spec.collapsed.unwrap_or(false),
                }
            }
        };

        self.indices.pop();
        self.path.pop();
        Ok(node)
    }

    /// Check translation keys and values, keying the result by locale code.
    fn translations(
        &self,
        raw: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, String>, ConfigurationError> {
        let mut translations = BTreeMap::new();
        for (key, value) in raw {
            let Some(locale) = self.locales.find(key) else {
                return Err(self.error(ConfigurationErrorKind::UnknownLocale(key.clone())));
            };
            if value.trim().is_empty() {
                return Err(self.error(ConfigurationErrorKind::EmptyTranslation(key.clone())));
            }
            if translations
                .insert(locale.code.clone(), value.clone())
                .is_some()
            {
                return Err(self.error(ConfigurationErrorKind::DuplicateTranslation(
                    locale.code.clone(),
                )));
            }
        }
        Ok(translations)
    }

    /// Parse a leaf link and record it, rejecting repeats.
    fn register_link(&mut self, raw: &str) -> Result<Link, ConfigurationError> {
        let link = Link::parse(raw).map_err(|kind| self.error(kind))?;
        let key = link.key().to_owned();

        if let Some((_, first)) = self.seen.get(&key) {
            return Err(self.error(ConfigurationErrorKind::DuplicateLink {
                link: link.as_str().to_owned(),
                first: first.clone(),
            }));
        }

        let ordinal = self.leaf_paths.len();
        self.seen.insert(key, (ordinal, self.path.clone()));
        self.leaf_paths.push(self.indices.clone());
        Ok(link)
    }

    fn error(&self, kind: ConfigurationErrorKind) -> ConfigurationError {
        ConfigurationError::sidebar(&self.path, kind)
    }
}

impl NavigationTree {
    /// Top-level nodes in configured order.
    #[must_use]
    pub fn roots(&self) -> &[NavigationNode] {
        &self.roots
    }

    /// Number of leaves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.leaf_paths.len()
    }

    /// Whether the tree has no leaves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaf_paths.is_empty()
    }

    /// Every leaf link in document order (pre-order, depth-first).
    ///
    /// The iterator is lazy and can be cloned or requested again to restart.
    #[must_use]
    pub fn flatten_links(&self) -> Links<'_> {
        Links {
            stack: vec![self.roots.iter()],
        }
    }

    /// Whether some leaf points at `link`. Trailing slashes are ignored.
    #[must_use]
    pub fn contains(&self, link: &str) -> bool {
        self.link_index.contains_key(normalize(link))
    }

    /// Find the leaf pointing at `link`.
    #[must_use]
    pub fn find(&self, link: &str) -> Option<&NavigationNode> {
        let ordinal = *self.link_index.get(normalize(link))?;
        self.node_at(&self.leaf_paths[ordinal])
    }

    /// Localized labels of the groups enclosing `link`, outermost first.
    ///
    /// Returns `None` when no leaf points at `link`.
    #[must_use]
    pub fn breadcrumbs(&self, link: &str, locale: &str) -> Option<Vec<&str>> {
        let ordinal = *self.link_index.get(normalize(link))?;
        let (_, parents) = self.leaf_paths[ordinal].split_last()?;

        let mut crumbs = Vec::with_capacity(parents.len());
        let mut siblings = self.roots.as_slice();
        for &index in parents {
            let group = &siblings[index];
            crumbs.push(group.resolve_label(locale));
            siblings = group.children();
        }
        Some(crumbs)
    }

    /// Previous and next leaves around `link` in document order.
    ///
    /// Returns `None` when no leaf points at `link`.
    #[must_use]
    pub fn pagination(&self, link: &str, locale: &str) -> Option<Pagination<'_>> {
        let ordinal = *self.link_index.get(normalize(link))?;
        let page_link = |ordinal: usize| {
            let node = self.node_at(&self.leaf_paths[ordinal])?;
            node.link().map(|link| PageLink {
                label: node.resolve_label(locale),
                link,
            })
        };

        Some(Pagination {
            prev: ordinal.checked_sub(1).and_then(page_link),
            next: (ordinal + 1 < self.len())
                .then(|| page_link(ordinal + 1))
                .flatten(),
        })
    }

    fn node_at(&self, path: &[usize]) -> Option<&NavigationNode> {
        let (&first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.roots.get(first)?, |node, &index| node.children().get(index))
    }
}

/// Lazy pre-order iterator over leaf links. See [`NavigationTree::flatten_links`].
#[derive(Clone, Debug)]
pub struct Links<'a> {
    stack: Vec<std::slice::Iter<'a, NavigationNode>>,
}

impl<'a> Iterator for Links<'a> {
    type Item = &'a Link;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(siblings) = self.stack.last_mut() {
            match siblings.next() {
                Some(NavigationNode::Leaf { link, .. }) => return Some(link),
                Some(NavigationNode::Group { children, .. }) => self.stack.push(children.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}

impl FusedIterator for Links<'_> {}
