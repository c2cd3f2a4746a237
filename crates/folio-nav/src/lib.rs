//! Localized navigation model for Folio documentation sites.
//!
//! This crate provides:
//! - [`SiteNavigation`]: validated sidebar, locales and base path
//! - [`build_tree`]: sidebar validation into a [`NavigationTree`]
//! - [`NavigationNode::resolve_label`]: label lookup with default-locale fallback
//! - [`NavigationTree::flatten_links`]: leaf links in document order
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::collections::BTreeMap;
//! use folio_nav::{LocaleSpec, NavigationConfig, NavigationNodeSpec, SiteNavigation};
//!
//! let config = NavigationConfig {
//!     base: "/docs".to_owned(),
//!     locales: BTreeMap::from([
//!         ("root".to_owned(), LocaleSpec { label: "English".to_owned(), lang: Some("en".to_owned()), default: true }),
//!         ("es".to_owned(), LocaleSpec { label: "Español".to_owned(), lang: None, default: false }),
//!     ]),
//!     sidebar: vec![NavigationNodeSpec::group(
//!         "Overview",
//!         vec![NavigationNodeSpec::leaf("Introduction", "/overview/introduction/")
//!             .with_translation("es", "Introducción")],
//!     )],
//! };
//!
//! let nav = SiteNavigation::build(&config)?;
//! let links: Vec<_> = nav.tree().flatten_links().map(|l| l.as_str()).collect();
//! assert_eq!(links, ["/overview/introduction/"]);
//!
//! let intro = &nav.tree().roots()[0].children()[0];
//! assert_eq!(intro.resolve_label("es"), "Introducción");
//! assert_eq!(intro.resolve_label("root"), "Introduction");
//! # Ok(())
//! # }
//! ```

mod error;
mod locale;
mod node;
mod site;
mod tree;

pub use error::{
    ConfigurationError, ConfigurationErrorKind, ErrorLocation, NodePath, PathSegment,
};
pub use locale::{Locale, LocaleSet, LocaleSpec, ROOT_LOCALE};
pub use node::{Link, NavigationNode, NavigationNodeSpec};
pub use site::{NavigationConfig, Sidebar, SidebarEntry, SiteNavigation};
pub use tree::{Links, NavigationTree, PageLink, Pagination, build_tree};
