use std::env;
use std::path::{Path, PathBuf};

/// Environment variable names - single source of truth
pub mod env_vars {
    /// Root directory of the vault notes are written into.
    pub const VAULT_DIR: &str = "REFERENCE_VAULT_DIR";
    /// Explicit override for the settings file location.
    pub const SETTINGS_PATH: &str = "REFERENCE_IMPORTER_SETTINGS";
    /// Overrides `crossref_api_url` from the settings file (e.g. a local mirror).
    pub const CROSSREF_API_URL: &str = "CROSSREF_API_URL";
    /// Overrides `mailto` from the settings file.
    pub const CROSSREF_MAILTO: &str = "CROSSREF_MAILTO";
}

/// Default values
pub mod defaults {
    pub const VAULT_DIR: &str = ".";
    pub const REFERENCE_NOTE_PATH: &str = "/references";
    pub const CROSSREF_API_URL: &str = "https://api.crossref.org";
    pub const SETTINGS_DIR: &str = ".reference-importer";
    pub const SETTINGS_FILE: &str = "settings.ron";
    /// Stand-in for the human-written summary section
    pub const SUMMARY_PLACEHOLDER: &str = "TK";
}

/// Process-level configuration resolved from the environment
#[derive(Clone, Debug)]
pub struct Config {
    pub vault_dir: PathBuf,
    pub settings_path: PathBuf,
    pub crossref_api_url: Option<String>,
    pub crossref_mailto: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let vault_dir = PathBuf::from(
            env::var(env_vars::VAULT_DIR).unwrap_or_else(|_| defaults::VAULT_DIR.to_string()),
        );
        let settings_path = env::var(env_vars::SETTINGS_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| settings_path(&vault_dir));

        Self {
            vault_dir,
            settings_path,
            crossref_api_url: non_empty_var(env_vars::CROSSREF_API_URL),
            crossref_mailto: non_empty_var(env_vars::CROSSREF_MAILTO),
        }
    }

    /// Point at a different vault; the settings file follows unless it was set explicitly
    pub fn with_vault_dir(mut self, vault_dir: PathBuf) -> Self {
        if self.settings_path == settings_path(&self.vault_dir) {
            self.settings_path = settings_path(&vault_dir);
        }
        self.vault_dir = vault_dir;
        self
    }
}

/// Get the default settings file path for a vault
pub fn settings_path(vault_dir: &Path) -> PathBuf {
    vault_dir
        .join(defaults::SETTINGS_DIR)
        .join(defaults::SETTINGS_FILE)
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
