//! Validated work metadata.
//!
//! `Metadata::from_response` is the single place the loosely-typed Crossref
//! record is checked. Everything downstream works on the validated value.

use async_trait::async_trait;
use crossref_client::types::{Author, WorkResponse};
use crossref_client::{CrossrefClient, CrossrefError};
use thiserror::Error;

/// Source of raw works records, keyed by identifier
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn fetch_work(&self, identifier: &str) -> Result<WorkResponse, CrossrefError>;
}

#[async_trait]
impl MetadataProvider for CrossrefClient {
    async fn fetch_work(&self, identifier: &str) -> Result<WorkResponse, CrossrefError> {
        self.work(identifier).await
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetadataError {
    #[error("response has no `message` object")]
    MissingMessage,

    #[error("required field `{0}` is missing or empty")]
    MissingField(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub given: Option<String>,
    pub family: Option<String>,
    /// Organisation name for corporate authors
    pub name: Option<String>,
}

impl Person {
    /// "Given Family", or whatever part of the name exists
    pub fn display_name(&self) -> String {
        match (&self.given, &self.family, &self.name) {
            (Some(given), Some(family), _) => format!("{} {}", given, family),
            (None, Some(family), _) => family.clone(),
            (Some(given), None, None) => given.clone(),
            (_, None, Some(name)) => name.clone(),
            (None, None, None) => String::new(),
        }
    }
}

impl From<&Author> for Person {
    fn from(author: &Author) -> Self {
        Self {
            given: author.given.clone(),
            family: author.family.clone(),
            name: author.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    /// Non-empty; the first author always has a family name
    pub authors: Vec<Person>,
    pub year: i32,
    pub journal: Option<String>,
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub page: Option<String>,
    pub doi: String,
    pub url: String,
}

impl Metadata {
    pub fn from_response(response: WorkResponse) -> Result<Self, MetadataError> {
        let work = response.message.ok_or(MetadataError::MissingMessage)?;

        let title = work
            .title
            .into_iter()
            .next()
            .filter(|t| !t.trim().is_empty())
            .ok_or(MetadataError::MissingField("title"))?;

        let authors: Vec<Person> = work.author.iter().map(Person::from).collect();
        match authors.first() {
            None => return Err(MetadataError::MissingField("author")),
            Some(first) if first.family.as_deref().is_none_or(|f| f.trim().is_empty()) => {
                return Err(MetadataError::MissingField("author[0].family"));
            }
            Some(_) => {}
        }

        let year = work
            .created
            .as_ref()
            .and_then(|c| c.year())
            .ok_or(MetadataError::MissingField("created.date-parts"))?;

        let doi = work
            .doi
            .filter(|d| !d.trim().is_empty())
            .ok_or(MetadataError::MissingField("DOI"))?;
        let url = work
            .url
            .filter(|u| !u.trim().is_empty())
            .ok_or(MetadataError::MissingField("URL"))?;

        Ok(Self {
            title,
            authors,
            year,
            journal: work.container_title.into_iter().next(),
            volume: work.volume,
            issue: work.issue,
            page: work.page,
            doi,
            url,
        })
    }

    /// `lowercase(first author's family name) + year`, e.g. `lecun2015`
    pub fn first_author_year(&self) -> String {
        let family = self
            .authors
            .first()
            .and_then(|a| a.family.as_deref())
            .unwrap_or_default();
        format!("{}{}", family.to_lowercase(), self.year)
    }

    /// Front-matter aliases in their fixed order: author-year, then DOI
    pub fn aliases(&self) -> Vec<String> {
        vec![self.first_author_year(), self.doi.clone()]
    }

    pub fn authors_line(&self) -> String {
        self.authors
            .iter()
            .map(Person::display_name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
