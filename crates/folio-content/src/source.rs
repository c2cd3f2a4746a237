//! Content source trait.
//!
//! # Slug Convention
//!
//! Content is addressed by **slug**: the internal sidebar link without
//! surrounding slashes.
//! - `""` - site root (`index.md`)
//! - `"overview/introduction"` - `overview/introduction.md` or
//!   `overview/introduction/index.md`
//!
//! Locales other than `root` live in a directory named after the locale
//! code; implementations receive that directory as `locale_dir`.

use std::path::PathBuf;

/// Lookup of content documents by locale and slug.
pub trait ContentSource: Send + Sync {
    /// Find the document backing `slug` in `locale_dir` (`None` for root).
    fn resolve(&self, locale_dir: Option<&str>, slug: &str) -> Option<PathBuf>;

    /// List slugs of every document in `locale_dir`.
    ///
    /// When scanning the root (`locale_dir` is `None`), top-level directories
    /// named in `excluded` belong to other locales and are skipped.
    fn scan(&self, locale_dir: Option<&str>, excluded: &[&str]) -> Vec<String>;
}
