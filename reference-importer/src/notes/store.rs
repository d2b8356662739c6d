//! Document store: where reference notes live.
//!
//! The importer only talks to `DocumentStore`; `VaultStore` is the
//! filesystem implementation rooted at a vault directory.

use super::file_ops;
use super::frontmatter::{self, FrontMatter};
use super::template;
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Handle to a note that exists in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Vault path, e.g. `/references/Deep learning.md`
    pub path: String,
}

/// What `list` reports about one reference note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSummary {
    pub path: String,
    pub title: String,
    pub year: Option<i32>,
    pub doi: Option<String>,
    pub aliases: Vec<String>,
}

/// Edit applied to a document's frontmatter
pub type FrontMatterEdit = Box<dyn FnOnce(&mut FrontMatter) + Send>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("note already exists: {0}")]
    AlreadyExists(String),

    #[error("note not found: {0}")]
    NotFound(String),

    #[error("path escapes the vault: {0}")]
    InvalidPath(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn exists(&self, path: &str) -> Result<bool, StoreError>;

    /// Create a new document; never overwrites
    async fn create(&self, path: &str, content: &str) -> Result<Document, StoreError>;

    async fn mutate_front_matter(
        &self,
        document: &Document,
        edit: FrontMatterEdit,
    ) -> Result<(), StoreError>;
}

/// Filesystem-backed store rooted at a vault directory
pub struct VaultStore {
    vault_dir: PathBuf,
}

impl VaultStore {
    pub fn new(vault_dir: PathBuf) -> Self {
        Self { vault_dir }
    }

    /// Get the vault directory path
    pub fn vault_dir(&self) -> &Path {
        &self.vault_dir
    }

    /// Summarise every note under `folder`, recovering fields from the rendered template
    pub fn list_references(&self, folder: &str) -> Result<Vec<ReferenceSummary>, StoreError> {
        let folder_dir = if folder.trim_matches('/').is_empty() {
            self.vault_dir.clone()
        } else {
            self.resolve(folder)?
        };
        let files = file_ops::list_notes(&folder_dir).map_err(|e| io_error(folder, e))?;

        let mut summaries = Vec::with_capacity(files.len());
        for file_path in files {
            let content = match file_ops::read_note(&file_path) {
                Ok(content) => content,
                Err(e) => {
                    log::warn!("[NOTES] Skipping {}: {}", file_path.display(), e);
                    continue;
                }
            };
            let rel_path = file_ops::relative_path(&self.vault_dir, &file_path)
                .map(|p| format!("/{}", p.replace('\\', "/")))
                .unwrap_or_else(|| file_path.to_string_lossy().to_string());

            let (yaml, body) = frontmatter::split_frontmatter(&content);
            let fields = template::parse_rendered(&body);
            let title = fields.title.unwrap_or_else(|| {
                // Fall back to filename without extension
                file_path
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_default()
            });

            summaries.push(ReferenceSummary {
                path: rel_path,
                title,
                year: fields.year,
                doi: fields.doi,
                aliases: frontmatter::parse_frontmatter(&yaml).aliases,
            });
        }

        Ok(summaries)
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StoreError> {
        file_ops::resolve_vault_path(&self.vault_dir, path)
            .ok_or_else(|| StoreError::InvalidPath(path.to_string()))
    }
}

fn io_error(path: &str, source: io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_string(),
        source,
    }
}

#[async_trait]
impl DocumentStore for VaultStore {
    async fn exists(&self, path: &str) -> Result<bool, StoreError> {
        let full_path = self.resolve(path)?;
        Ok(full_path.exists())
    }

    async fn create(&self, path: &str, content: &str) -> Result<Document, StoreError> {
        let full_path = self.resolve(path)?;

        file_ops::create_note_file(&full_path, content).map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                StoreError::AlreadyExists(path.to_string())
            } else {
                io_error(path, e)
            }
        })?;

        log::info!("[NOTES] Created {}", full_path.display());
        Ok(Document {
            path: path.to_string(),
        })
    }

    async fn mutate_front_matter(
        &self,
        document: &Document,
        edit: FrontMatterEdit,
    ) -> Result<(), StoreError> {
        let full_path = self.resolve(&document.path)?;
        if !full_path.exists() {
            return Err(StoreError::NotFound(document.path.clone()));
        }

        let existing =
            file_ops::read_note(&full_path).map_err(|e| io_error(&document.path, e))?;
        let updated = frontmatter::update_frontmatter(&existing, edit);
        file_ops::write_note(&full_path, &updated).map_err(|e| io_error(&document.path, e))?;

        log::debug!("[NOTES] Updated frontmatter of {}", full_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_create_then_exists() {
        let dir = tempdir().unwrap();
        let store = VaultStore::new(dir.path().to_path_buf());

        assert!(!store.exists("/references/Deep learning.md").await.unwrap());

        let doc = store
            .create("/references/Deep learning.md", "# Deep learning\n")
            .await
            .expect("Failed to create note");

        assert_eq!(doc.path, "/references/Deep learning.md");
        assert!(store.exists("/references/Deep learning.md").await.unwrap());
        assert!(dir.path().join("references/Deep learning.md").exists());
    }

    #[tokio::test]
    async fn test_duplicate_prevention() {
        let dir = tempdir().unwrap();
        let store = VaultStore::new(dir.path().to_path_buf());

        store.create("/refs/Unique.md", "first").await.unwrap();
        let err = store.create("/refs/Unique.md", "second").await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));

        let content = std::fs::read_to_string(dir.path().join("refs/Unique.md")).unwrap();
        assert_eq!(content, "first");
    }

    #[tokio::test]
    async fn test_mutate_front_matter() {
        let dir = tempdir().unwrap();
        let store = VaultStore::new(dir.path().to_path_buf());

        let doc = store.create("/refs/Note.md", "# Note\n").await.unwrap();
        store
            .mutate_front_matter(
                &doc,
                Box::new(|fm: &mut FrontMatter| {
                    fm.set_aliases(vec!["smith2020".to_string(), "10.1/x".to_string()])
                }),
            )
            .await
            .unwrap();

        let content = std::fs::read_to_string(dir.path().join("refs/Note.md")).unwrap();
        assert!(
            content.starts_with("---\naliases:\n  - \"smith2020\"\n  - \"10.1/x\"\n---\n# Note\n")
        );
    }

    #[tokio::test]
    async fn test_mutate_missing_document() {
        let dir = tempdir().unwrap();
        let store = VaultStore::new(dir.path().to_path_buf());

        let doc = Document {
            path: "/refs/Gone.md".to_string(),
        };
        let err = store
            .mutate_front_matter(&doc, Box::new(|_: &mut FrontMatter| {}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_references() {
        let dir = tempdir().unwrap();
        let store = VaultStore::new(dir.path().to_path_buf());

        let doc = store
            .create(
                "/references/Deep learning.md",
                "# Deep learning\n\n- Year: 2015\n- DOI: 10.1038/nature14539\n",
            )
            .await
            .unwrap();
        store
            .mutate_front_matter(
                &doc,
                Box::new(|fm: &mut FrontMatter| {
                    fm.set_aliases(vec!["lecun2015".to_string(), "10.1038/nature14539".to_string()])
                }),
            )
            .await
            .unwrap();
        store.create("/references/scratch.md", "no template here").await.unwrap();
        store.create("/elsewhere/Other.md", "# Other\n").await.unwrap();

        let refs = store.list_references("/references").unwrap();
        assert_eq!(refs.len(), 2);

        assert_eq!(refs[0].path, "/references/Deep learning.md");
        assert_eq!(refs[0].title, "Deep learning");
        assert_eq!(refs[0].year, Some(2015));
        assert_eq!(refs[0].doi.as_deref(), Some("10.1038/nature14539"));
        assert_eq!(refs[0].aliases, vec!["lecun2015", "10.1038/nature14539"]);

        assert_eq!(refs[1].title, "scratch");
        assert!(refs[1].doi.is_none());
    }

    #[test]
    fn test_list_references_missing_folder() {
        let dir = tempdir().unwrap();
        let store = VaultStore::new(dir.path().to_path_buf());
        assert!(store.list_references("/references").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejects_paths_outside_vault() {
        let dir = tempdir().unwrap();
        let store = VaultStore::new(dir.path().join("vault"));

        let err = store.exists("/../outside.md").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidPath(_)));
        let err = store.create("/refs/../../x.md", "x").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidPath(_)));
    }
}
