//! Reference importer: DOI selection in, reference note and wikilink out.
//!
//! One linear pass per invocation: fetch, validate, render, check, create,
//! attach aliases, rewrite the selection. Every failure ends in a notice.
//!
//! Creating the note and attaching its aliases are two separate store calls.
//! If the second one fails the note is kept without aliases and the user is
//! told so; nothing is rolled back.

use crate::editor::SelectionSource;
use crate::error::ImportError;
use crate::metadata::{Metadata, MetadataProvider};
use crate::models::ImporterSettings;
use crate::notes::frontmatter::FrontMatter;
use crate::notes::{file_ops, DocumentStore, NoteDraft, StoreError};
use crate::notice::{Notice, Notifier};

/// How an import ended
#[derive(Debug)]
pub enum ImportOutcome {
    Created {
        path: String,
        link: String,
        aliases_saved: bool,
    },
    AlreadyExists {
        path: String,
    },
    /// Nothing was selected
    Skipped,
    Failed(ImportError),
}

impl ImportOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            ImportOutcome::Created { .. } | ImportOutcome::AlreadyExists { .. }
        )
    }
}

pub struct ReferenceImporter<'a> {
    settings: &'a ImporterSettings,
    provider: &'a dyn MetadataProvider,
    store: &'a dyn DocumentStore,
    notifier: &'a dyn Notifier,
}

impl<'a> ReferenceImporter<'a> {
    pub fn new(
        settings: &'a ImporterSettings,
        provider: &'a dyn MetadataProvider,
        store: &'a dyn DocumentStore,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            settings,
            provider,
            store,
            notifier,
        }
    }

    /// Import the work identified by the editor's current selection
    pub async fn import(&self, editor: &mut dyn SelectionSource) -> ImportOutcome {
        let identifier = editor.selection().trim().to_string();
        if identifier.is_empty() {
            self.notifier.notify(Notice::EmptySelection);
            return ImportOutcome::Skipped;
        }

        log::info!("[IMPORT] Fetching metadata for {}", identifier);
        let metadata = match self.fetch_metadata(&identifier).await {
            Ok(metadata) => metadata,
            Err(e) => {
                log::error!("[IMPORT] Could not load metadata for {}: {}", identifier, e);
                self.notifier.notify(Notice::FetchFailed);
                return ImportOutcome::Failed(e);
            }
        };

        let draft = NoteDraft::from(&metadata);
        let name = file_ops::note_name(&metadata.title, self.settings.filename_policy);
        let path = file_ops::note_path(&self.settings.reference_note_path, &name);

        let exists = self.store.exists(&path).await;
        match exists {
            Ok(true) => return self.already_exists(path),
            Ok(false) => {}
            Err(e) => return self.write_failed(&path, e.into()),
        }

        let created = self.store.create(&path, &draft.render()).await;
        let document = match created {
            Ok(document) => document,
            // Another import got there between the check and the create
            Err(StoreError::AlreadyExists(_)) => return self.already_exists(path),
            Err(e) => return self.write_failed(&path, e.into()),
        };

        let aliases = metadata.aliases();
        let aliases_saved = match self
            .store
            .mutate_front_matter(
                &document,
                Box::new(move |fm: &mut FrontMatter| fm.set_aliases(aliases)),
            )
            .await
        {
            Ok(()) => true,
            Err(e) => {
                log::warn!("[IMPORT] Created {} but could not set aliases: {}", path, e);
                self.notifier.notify(Notice::AliasesNotSaved { path: path.clone() });
                false
            }
        };

        let link = format!("[[{}|{}]]", name, draft.doi);
        if let Err(e) = editor.replace_selection(&link) {
            return self.write_failed(&path, e.into());
        }

        log::info!("[IMPORT] {} -> {}", identifier, path);
        ImportOutcome::Created {
            path,
            link,
            aliases_saved,
        }
    }

    async fn fetch_metadata(&self, identifier: &str) -> Result<Metadata, ImportError> {
        let response = self.provider.fetch_work(identifier).await?;
        Ok(Metadata::from_response(response)?)
    }

    fn already_exists(&self, path: String) -> ImportOutcome {
        log::info!("[IMPORT] {} already exists, leaving selection as is", path);
        self.notifier.notify(Notice::AlreadyExists { path: path.clone() });
        ImportOutcome::AlreadyExists { path }
    }

    fn write_failed(&self, path: &str, error: ImportError) -> ImportOutcome {
        log::error!("[IMPORT] Failed to write {}: {}", path, error);
        self.notifier.notify(Notice::WriteFailed);
        ImportOutcome::Failed(error)
    }
}
