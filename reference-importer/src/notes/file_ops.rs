//! File operations for reference notes
//!
//! Maps vault paths onto the filesystem, derives note file names from titles,
//! and reads/writes/lists markdown files.

use crate::models::FilenamePolicy;
use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

/// Longest file stem the sanitize policy produces, in characters
pub const MAX_SANITIZED_LEN: usize = 180;

/// Characters that break filesystem paths or Obsidian wikilinks
const UNSAFE_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|', '#', '^', '[', ']'];

/// Derive a note name (file stem) from a title under the given policy
pub fn note_name(title: &str, policy: FilenamePolicy) -> String {
    match policy {
        FilenamePolicy::Raw => title.to_string(),
        FilenamePolicy::Sanitize => sanitize_filename(title),
    }
}

/// Sanitize a title for use as a filename (e.g. "A/B: C?" -> "A B C")
pub fn sanitize_filename(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| {
            if c.is_control() || UNSAFE_CHARS.contains(&c) {
                ' '
            } else {
                c
            }
        })
        .collect();

    let collapsed = replaced.split_whitespace().collect::<Vec<&str>>().join(" ");
    let truncated: String = collapsed.chars().take(MAX_SANITIZED_LEN).collect();
    let cleaned = truncated.trim_end().trim_end_matches('.').trim_end();

    if cleaned.is_empty() {
        "untitled".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Vault path of a note: `{folder}/{name}.md`
pub fn note_path(folder: &str, name: &str) -> String {
    let folder = folder.trim_end_matches('/');
    format!("{}/{}.md", folder, name)
}

/// Resolve a `/`-separated vault path under `vault_dir`.
///
/// A leading `/` means the vault root. Returns `None` for paths that would
/// leave the vault (`..`) or that name nothing.
pub fn resolve_vault_path(vault_dir: &Path, vault_path: &str) -> Option<PathBuf> {
    let relative = Path::new(vault_path.trim_start_matches('/'));
    let mut resolved = vault_dir.to_path_buf();
    let mut depth = 0usize;

    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                resolved.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if depth == 0 { None } else { Some(resolved) }
}

/// Write a new note file, failing if it already exists (creates parent directories as needed)
pub fn create_note_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Overwrite an existing note file
pub fn write_note(path: &Path, content: &str) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Read a note file, returning empty string if not found
pub fn read_note(path: &Path) -> io::Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e),
    }
}

/// List all markdown files in a directory (recursively)
pub fn list_notes(notes_dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if !notes_dir.exists() {
        return Ok(files);
    }

    fn visit_dir(dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            // Skip hidden files/dirs (like .reference-importer)
            if path
                .file_name()
                .map(|n| n.to_string_lossy().starts_with('.'))
                .unwrap_or(false)
            {
                continue;
            }
            if path.is_dir() {
                visit_dir(&path, files)?;
            } else if path.extension().map(|e| e == "md").unwrap_or(false) {
                files.push(path);
            }
        }
        Ok(())
    }

    visit_dir(notes_dir, &mut files)?;
    files.sort();
    Ok(files)
}

/// Get relative path from notes_dir for a file
pub fn relative_path(notes_dir: &Path, file_path: &Path) -> Option<String> {
    file_path
        .strip_prefix(notes_dir)
        .ok()
        .map(|p| p.to_string_lossy().to_string())
}
