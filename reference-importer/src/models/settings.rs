//! Importer settings backed by a RON file.
//!
//! Holds the folder reference notes are written to, how note file names are
//! derived from titles, and how to reach Crossref. Loaded once at startup from
//! `{vault}/.reference-importer/settings.ron`; missing fields take defaults.

use crate::config::{defaults, Config};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// How a note's file name is derived from the work's title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilenamePolicy {
    /// Use the title verbatim. Characters like `/` or `:` are not touched.
    #[default]
    Raw,
    /// Replace path-unsafe and link-breaking characters, cap the length.
    Sanitize,
}

impl fmt::Display for FilenamePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilenamePolicy::Raw => write!(f, "raw"),
            FilenamePolicy::Sanitize => write!(f, "sanitize"),
        }
    }
}

impl FromStr for FilenamePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "raw" => Ok(FilenamePolicy::Raw),
            "sanitize" => Ok(FilenamePolicy::Sanitize),
            other => Err(format!(
                "Unknown filename policy '{}'. Valid values: raw, sanitize",
                other
            )),
        }
    }
}

/// Top-level importer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImporterSettings {
    /// Vault folder reference notes are created in
    #[serde(default = "default_reference_note_path")]
    pub reference_note_path: String,
    #[serde(default)]
    pub filename_policy: FilenamePolicy,
    #[serde(default = "default_crossref_api_url")]
    pub crossref_api_url: String,
    /// Contact address sent to Crossref (polite pool)
    #[serde(default)]
    pub mailto: Option<String>,
}

fn default_reference_note_path() -> String {
    defaults::REFERENCE_NOTE_PATH.to_string()
}

fn default_crossref_api_url() -> String {
    defaults::CROSSREF_API_URL.to_string()
}

impl Default for ImporterSettings {
    fn default() -> Self {
        Self {
            reference_note_path: default_reference_note_path(),
            filename_policy: FilenamePolicy::Raw,
            crossref_api_url: default_crossref_api_url(),
            mailto: None,
        }
    }
}

impl ImporterSettings {
    /// Load from `path`, falling back to `Default` on any error.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match ron::from_str::<ImporterSettings>(&content) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!(
                        "[CONFIG] Failed to parse {}: {}, using defaults",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                log::debug!(
                    "[CONFIG] Could not read {} ({}), using defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Environment overrides win over the file for the Crossref connection.
    pub fn with_env_overrides(mut self, config: &Config) -> Self {
        if let Some(url) = &config.crossref_api_url {
            self.crossref_api_url = url.clone();
        }
        if let Some(mailto) = &config.crossref_mailto {
            self.mailto = Some(mailto.clone());
        }
        self
    }

    /// Serialize to pretty RON and write to `path`.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create settings dir: {}", e))?;
        }
        let pretty = ron::ser::PrettyConfig::default();
        let content = ron::ser::to_string_pretty(self, pretty)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;
        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
        Ok(())
    }
}
