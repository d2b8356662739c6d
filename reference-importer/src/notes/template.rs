//! Reference note body template.

use crate::config::defaults::SUMMARY_PLACEHOLDER;
use crate::metadata::Metadata;
use regex::Regex;
use std::sync::LazyLock;

/// Flattened metadata ready for substitution into the note template.
///
/// Volume and issue travel with the draft but the template does not print them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub authors: String,
    pub year: i32,
    pub journal: String,
    pub volume: String,
    pub issue: String,
    pub page: String,
    pub doi: String,
    pub url: String,
}

impl From<&Metadata> for NoteDraft {
    fn from(meta: &Metadata) -> Self {
        Self {
            title: meta.title.clone(),
            authors: meta.authors_line(),
            year: meta.year,
            journal: meta.journal.clone().unwrap_or_default(),
            volume: meta.volume.clone().unwrap_or_default(),
            issue: meta.issue.clone().unwrap_or_default(),
            page: meta.page.clone().unwrap_or_default(),
            doi: meta.doi.clone(),
            url: meta.url.clone(),
        }
    }
}

impl NoteDraft {
    pub fn render(&self) -> String {
        format!(
            "# {title}

- Author: {authors}
- Year: {year}
- Journal: {journal}
- Pages: {page}
- DOI: {doi}
- URL: {url}

## Summary

{summary}
",
            title = self.title,
            authors = self.authors,
            year = self.year,
            journal = self.journal,
            page = self.page,
            doi = self.doi,
            url = self.url,
            summary = SUMMARY_PLACEHOLDER,
        )
    }
}

/// Fields recovered from a rendered reference note
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedFields {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub doi: Option<String>,
    pub url: Option<String>,
}

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^# (.+?)\s*$").unwrap());
static FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^- (Year|DOI|URL): (.*?)\s*$").unwrap());

/// Read title, year, DOI and URL back out of a note body produced by `render`
pub fn parse_rendered(body: &str) -> RenderedFields {
    let mut fields = RenderedFields {
        title: HEADING_RE.captures(body).map(|cap| cap[1].to_string()),
        ..Default::default()
    };

    for cap in FIELD_RE.captures_iter(body) {
        let value = cap[2].to_string();
        match &cap[1] {
            "Year" if fields.year.is_none() => fields.year = value.parse().ok(),
            "DOI" if fields.doi.is_none() => fields.doi = Some(value),
            "URL" if fields.url.is_none() => fields.url = Some(value),
            _ => {}
        }
    }

    fields
}
