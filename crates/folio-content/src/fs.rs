//! Filesystem content source.

use std::fs;
use std::path::{Path, PathBuf};

use crate::source::ContentSource;

/// Document extensions, in lookup order.
const EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// Content tree on disk, laid out as `<content_dir>/[<locale>/]<slug>.md`.
///
/// A slug also resolves to `<slug>/index.md`, and `.mdx` is accepted
/// wherever `.md` is. Hidden files and files starting with `_` are not
/// documents.
#[derive(Clone, Debug)]
pub struct FsContent {
    content_dir: PathBuf,
}

impl FsContent {
    /// Create a source rooted at `content_dir`.
    #[must_use]
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
        }
    }

    /// Root directory of the content tree.
    #[must_use]
    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    fn locale_root(&self, locale_dir: Option<&str>) -> PathBuf {
        match locale_dir {
            Some(dir) => self.content_dir.join(dir),
            None => self.content_dir.clone(),
        }
    }

    /// Recursively collect document slugs under `dir`.
    fn scan_directory(dir: &Path, slug_prefix: &str, excluded: &[&str], slugs: &mut Vec<String>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };

        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') || name.starts_with('_') {
                continue;
            }

            let path = entry.path();
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                if slug_prefix.is_empty() && excluded.contains(&name.as_str()) {
                    continue;
                }
                Self::scan_directory(&path, &join_slug(slug_prefix, &name), &[], slugs);
            } else if let Some(stem) = document_stem(&name) {
                let slug = if stem == "index" {
                    slug_prefix.to_owned()
                } else {
                    join_slug(slug_prefix, stem)
                };
                slugs.push(slug);
            }
        }
    }
}

impl ContentSource for FsContent {
    fn resolve(&self, locale_dir: Option<&str>, slug: &str) -> Option<PathBuf> {
        let root = self.locale_root(locale_dir);
        let slug = slug.trim_matches('/');

        let mut candidates = Vec::with_capacity(4);
        for ext in EXTENSIONS {
            if slug.is_empty() {
                candidates.push(root.join(format!("index.{ext}")));
            } else {
                candidates.push(root.join(format!("{slug}.{ext}")));
            }
        }
        if !slug.is_empty() {
            for ext in EXTENSIONS {
                candidates.push(root.join(slug).join(format!("index.{ext}")));
            }
        }

        candidates.into_iter().find(|path| path.is_file())
    }

    fn scan(&self, locale_dir: Option<&str>, excluded: &[&str]) -> Vec<String> {
        let root = self.locale_root(locale_dir);
        let excluded = if locale_dir.is_none() { excluded } else { &[] };

        let mut slugs = Vec::new();
        if root.is_dir() {
            Self::scan_directory(&root, "", excluded, &mut slugs);
        }
        slugs.sort();
        slugs.dedup();
        slugs
    }
}

/// File stem of a document file name, `None` for other files.
fn document_stem(name: &str) -> Option<&str> {
    let (stem, ext) = name.rsplit_once('.')?;
    EXTENSIONS.contains(&ext).then_some(stem)
}

fn join_slug(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}/{name}")
    }
}
