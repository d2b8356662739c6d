//! Crossref client: thin typed wrapper around `api.crossref.org/works`.

mod crossref_client;

pub use crossref_client::{CrossrefClient, CrossrefError, DEFAULT_BASE_URL};
pub use crossref_types as types;
