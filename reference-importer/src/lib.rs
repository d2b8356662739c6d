//! Reference importer: turns a selected DOI into an Obsidian reference note.
//!
//! Fetches the work from Crossref, writes `{folder}/{title}.md` with
//! author-year and DOI aliases, and swaps the selection for `[[title|DOI]]`.

pub mod config;
pub mod editor;
pub mod error;
pub mod importer;
pub mod metadata;
pub mod models;
pub mod notes;
pub mod notice;

pub use error::ImportError;
pub use importer::{ImportOutcome, ReferenceImporter};
