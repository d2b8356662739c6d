//! Editor surface: the text the user selected and where the link goes.

use std::fs;
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("`{needle}` does not occur in {path}")]
    SelectionNotFound { needle: String, path: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

pub trait SelectionSource {
    fn selection(&self) -> &str;

    fn replace_selection(&mut self, text: &str) -> Result<(), EditorError>;
}

/// Selection passed on the command line; the replacement is kept for the caller to print
#[derive(Debug, Clone)]
pub struct ArgumentSelection {
    text: String,
    replacement: Option<String>,
}

impl ArgumentSelection {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            replacement: None,
        }
    }

    pub fn replacement(&self) -> Option<&str> {
        self.replacement.as_deref()
    }
}

impl SelectionSource for ArgumentSelection {
    fn selection(&self) -> &str {
        &self.text
    }

    fn replace_selection(&mut self, text: &str) -> Result<(), EditorError> {
        self.replacement = Some(text.to_string());
        Ok(())
    }
}

/// First occurrence of some text inside a markdown file, rewritten in place
#[derive(Debug)]
pub struct FileSelection {
    path: PathBuf,
    content: String,
    range: Range<usize>,
}

impl FileSelection {
    /// Select the first occurrence of `needle` in the file at `path`
    pub fn open(path: &Path, needle: &str) -> Result<Self, EditorError> {
        let content = fs::read_to_string(path).map_err(|source| EditorError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let start = content
            .find(needle)
            .filter(|_| !needle.is_empty())
            .ok_or_else(|| EditorError::SelectionNotFound {
                needle: needle.to_string(),
                path: path.display().to_string(),
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            range: start..start + needle.len(),
            content,
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl SelectionSource for FileSelection {
    fn selection(&self) -> &str {
        &self.content[self.range.clone()]
    }

    fn replace_selection(&mut self, text: &str) -> Result<(), EditorError> {
        let mut updated = String::with_capacity(self.content.len() + text.len());
        updated.push_str(&self.content[..self.range.start]);
        updated.push_str(text);
        updated.push_str(&self.content[self.range.end..]);

        fs::write(&self.path, &updated).map_err(|source| EditorError::Io {
            path: self.path.display().to_string(),
            source,
        })?;

        self.range = self.range.start..self.range.start + text.len();
        self.content = updated;
        Ok(())
    }
}
