//! Wire types for the Crossref REST API `/works/{doi}` endpoint.
//!
//! Every field is optional at this level. Deciding which ones an importer
//! actually needs is left to the caller, so a sparse or partial record still
//! decodes and the caller can report exactly what is missing.

use serde::{Deserialize, Serialize};

// =====================================================
// Response envelope
// =====================================================

/// Top-level response of `GET /works/{doi}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "message-type")]
    pub message_type: Option<String>,
    #[serde(default)]
    pub message: Option<Work>,
}

// =====================================================
// Domain Types
// =====================================================

/// A single registered work
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Work {
    /// Titles; Crossref returns a list even when there is only one
    #[serde(default)]
    pub title: Vec<String>,
    #[serde(default)]
    pub author: Vec<Author>,
    #[serde(default)]
    pub created: Option<DateParts>,
    #[serde(default, rename = "container-title")]
    pub container_title: Vec<String>,
    #[serde(default)]
    pub volume: Option<String>,
    #[serde(default)]
    pub issue: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default, rename = "DOI")]
    pub doi: Option<String>,
    #[serde(default, rename = "URL")]
    pub url: Option<String>,
}

/// A contributor. Organisations carry `name` instead of `given`/`family`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub given: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Crossref partial date: `{"date-parts": [[2020, 5, 17]]}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateParts {
    #[serde(default, rename = "date-parts")]
    pub date_parts: Vec<Vec<Option<i32>>>,
}

impl DateParts {
    /// First element of the first date, if present
    pub fn year(&self) -> Option<i32> {
        self.date_parts.first()?.first().copied().flatten()
    }
}
