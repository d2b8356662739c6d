//! Reference notes: Obsidian-compatible markdown files with YAML frontmatter.
//!
//! One note per work, named after its title, with author-year and DOI
//! aliases so `[[lecun2015]]` and `[[10.1038/nature14539]]` both resolve.

pub mod file_ops;
pub mod frontmatter;
pub mod store;
pub mod template;

pub use store::{Document, DocumentStore, ReferenceSummary, StoreError, VaultStore};
pub use template::NoteDraft;
