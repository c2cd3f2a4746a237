//! Mock content source for testing.
//!
//! Provides [`MockContent`] for unit testing without filesystem access.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::source::ContentSource;

/// In-memory content source.
///
/// # Example
///
/// ```ignore
/// use folio_content::{ContentSource, MockContent};
///
/// let content = MockContent::new()
///     .with_document(None, "overview/introduction")
///     .with_document(Some("es"), "overview/introduction");
///
/// assert!(content.resolve(Some("es"), "overview/introduction").is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MockContent {
    documents: BTreeSet<(Option<String>, String)>,
}

impl MockContent {
    /// Create an empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document for `slug` in `locale_dir`.
    #[must_use]
    pub fn with_document(mut self, locale_dir: Option<&str>, slug: &str) -> Self {
        self.documents.insert((
            locale_dir.map(str::to_owned),
            slug.trim_matches('/').to_owned(),
        ));
        self
    }
}

impl ContentSource for MockContent {
    fn resolve(&self, locale_dir: Option<&str>, slug: &str) -> Option<PathBuf> {
        let key = (locale_dir.map(str::to_owned), slug.trim_matches('/').to_owned());
        self.documents.contains(&key).then(|| {
            let mut path = PathBuf::new();
            if let Some(dir) = locale_dir {
                path.push(dir);
            }
            path.push(if key.1.is_empty() { "index" } else { key.1.as_str() });
            path.set_extension("md");
            path
        })
    }

    fn scan(&self, locale_dir: Option<&str>, _excluded: &[&str]) -> Vec<String> {
        self.documents
            .iter()
            .filter(|(dir, _)| dir.as_deref() == locale_dir)
            .map(|(_, slug)| slug.clone())
            .collect()
    }
}
