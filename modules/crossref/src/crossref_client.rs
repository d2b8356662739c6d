//! Typed HTTP client for the Crossref works API.

use crossref_types::WorkResponse;
use reqwest::header::{ACCEPT, USER_AGENT};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.crossref.org";

pub struct CrossrefClient {
    base_url: String,
    client: reqwest::Client,
    user_agent: String,
}

/// Failure of a single works lookup
#[derive(Debug, Error)]
pub enum CrossrefError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode works response: {0}")]
    Decode(#[from] serde_json::Error),
}

// ── Client impl ─────────────────────────────────────

impl CrossrefClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            user_agent: format!("reference-importer/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Identify with a contact address so requests land in the polite pool
    pub fn with_mailto(mut self, mailto: &str) -> Self {
        self.user_agent = format!(
            "reference-importer/{} (mailto:{})",
            env!("CARGO_PKG_VERSION"),
            mailto
        );
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the work registered under `doi`.
    ///
    /// The DOI's `/` separators stay literal; everything else in a segment is percent-encoded.
    pub async fn work(&self, doi: &str) -> Result<WorkResponse, CrossrefError> {
        let url = format!("{}/works/{}", self.base_url, encode_doi(doi));
        log::debug!("[CROSSREF] GET {}", url);

        let resp = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CrossrefError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = resp.text().await?;
        Ok(serde_json::from_str::<WorkResponse>(&text)?)
    }
}

fn encode_doi(doi: &str) -> String {
    doi.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

impl Default for CrossrefClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = CrossrefClient::new("https://api.crossref.org/");
        assert_eq!(client.base_url(), "https://api.crossref.org");
    }

    #[test]
    fn test_mailto_in_user_agent() {
        let client = CrossrefClient::default().with_mailto("someone@example.org");
        assert!(client.user_agent.ends_with("(mailto:someone@example.org)"));
        assert!(client.user_agent.starts_with("reference-importer/"));
    }

    #[test]
    fn test_encode_doi_keeps_separators() {
        assert_eq!(encode_doi("10.1038/nature14539"), "10.1038/nature14539");
        assert_eq!(encode_doi("10.1000/a#b"), "10.1000/a%23b");
        assert_eq!(
            encode_doi("10.1002/(SICI)1097-4636"),
            "10.1002/%28SICI%291097-4636"
        );
    }
}
