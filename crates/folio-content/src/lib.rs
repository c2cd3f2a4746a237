//! Content resolution for Folio documentation sites.
//!
//! The navigation model only references documents by link. This crate maps
//! links to documents and checks that the sidebar and the content tree agree:
//!
//! - [`ContentSource`] trait with `resolve()` and `scan()` methods
//! - [`FsContent`] for content trees on disk
//! - [`MockContent`] for testing (behind `mock` feature flag)
//! - [`verify`] to check every sidebar link before rendering
//!
//! # Example
//!
//! ```ignore
//! use folio_content::{FsContent, verify};
//!
//! let content = FsContent::new("src/content/docs");
//! let report = verify(&nav, &content)?;
//! for fallback in &report.fallbacks {
//!     println!("{} has no {} translation", fallback.link, fallback.locale);
//! }
//! ```

mod fs;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod source;
mod verify;

pub use fs::FsContent;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockContent;
pub use source::ContentSource;
pub use verify::{ContentReport, Fallback, MissingContentError, Orphan, verify};
