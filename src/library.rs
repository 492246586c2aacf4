//! Favorite prompts kept in a small JSON file.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub name: String,
    pub prompt: String,
}

/// Whether [`PromptLibrary::upsert`] added a new entry or replaced one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Replaced,
}

#[derive(Debug)]
pub struct PromptLibrary {
    path: PathBuf,
    entries: Vec<FavoriteEntry>,
}

impl PromptLibrary {
    /// Load the library at `path`.
    ///
    /// A missing file is an empty library. So is a file that is not a JSON
    /// array of `{name, prompt}` records; that case is logged and the bad
    /// file is left alone until the next save.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<FavoriteEntry>>(&raw) {
                Ok(entries) => {
                    tracing::debug!(path = %path.display(), count = entries.len(), "library loaded");
                    entries
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "library file malformed; starting empty");
                    Vec::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "library file unreadable; starting empty");
                Vec::new()
            }
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the library as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("could not save library to {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), count = self.entries.len(), "library saved");
        Ok(())
    }

    /// Entries sorted case-insensitively by name.
    pub fn sorted(&self) -> Vec<&FavoriteEntry> {
        let mut entries: Vec<&FavoriteEntry> = self.entries.iter().collect();
        entries.sort_by_key(|e| e.name.to_lowercase());
        entries
    }

    pub fn find(&self, name: &str) -> Option<&FavoriteEntry> {
        let needle = name.trim().to_lowercase();
        self.entries.iter().find(|e| e.name.to_lowercase() == needle)
    }

    /// Add or replace the entry named `name` (case-insensitive) and save.
    pub fn upsert(&mut self, name: &str, prompt: &str) -> Result<Upsert> {
        let name = name.trim();
        if name.is_empty() {
            bail!("a favorite needs a non-empty name");
        }
        let prompt = prompt.trim();
        if prompt.is_empty() {
            bail!("refusing to save an empty prompt");
        }

        let needle = name.to_lowercase();
        let before = self.entries.len();
        self.entries.retain(|e| e.name.to_lowercase() != needle);
        let result = if self.entries.len() < before {
            Upsert::Replaced
        } else {
            Upsert::Inserted
        };
        self.entries.push(FavoriteEntry {
            name: name.to_string(),
            prompt: prompt.to_string(),
        });
        self.save()?;
        Ok(result)
    }

    /// Remove the entry named `name` (case-insensitive). Saves only when
    /// something was removed.
    pub fn remove(&mut self, name: &str) -> Result<bool> {
        let needle = name.trim().to_lowercase();
        let before = self.entries.len();
        self.entries.retain(|e| e.name.to_lowercase() != needle);
        if self.entries.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }
}
