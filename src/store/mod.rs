//! Flat-file store for scraped characters.
//!
//! ```text
//! <data>/characters/<slug>.json   one record each
//! <data>/characters.json          aggregate array from the last full pass
//! <data>/assets/<slug>.<ext>      downloaded icons
//! ```
//!
//! Writes are not coordinated across files. A run that aborts part way leaves
//! the per-character files it already wrote next to the previous aggregate.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::debug;

use crate::models::Character;

pub const CHARACTERS_DIR: &str = "characters";
pub const ASSETS_DIR: &str = "assets";
pub const CHARACTER_LIST_FILE: &str = "characters.json";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed character record {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize characters: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Paths of the store under one data root.
#[derive(Debug, Clone)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn characters_dir(&self) -> PathBuf {
        self.root.join(CHARACTERS_DIR)
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.root.join(ASSETS_DIR)
    }

    pub fn character_list_file(&self) -> PathBuf {
        self.root.join(CHARACTER_LIST_FILE)
    }

    pub fn character_file(&self, slug: &str) -> PathBuf {
        self.characters_dir().join(format!("{slug}.json"))
    }

    /// Create the data root, `characters/` and `assets/`.
    pub async fn ensure_dirs(&self) -> Result<(), StoreError> {
        for dir in [self.characters_dir(), self.assets_dir()] {
            fs::create_dir_all(&dir)
                .await
                .map_err(|source| StoreError::Io { path: dir, source })?;
        }
        Ok(())
    }
}

/// Write one record to `characters/<slug>.json`, replacing any earlier one.
pub async fn write_character(paths: &DataPaths, character: &Character) -> Result<(), StoreError> {
    let dir = paths.characters_dir();
    fs::create_dir_all(&dir)
        .await
        .map_err(|source| StoreError::Io { path: dir, source })?;

    let path = paths.character_file(&character.slug);
    let body = serde_json::to_vec_pretty(character)?;
    fs::write(&path, body)
        .await
        .map_err(|source| StoreError::Io { path, source })
}

/// Replace the aggregate list file.
pub async fn save_character_list(
    paths: &DataPaths,
    characters: &[Character],
) -> Result<(), StoreError> {
    fs::create_dir_all(paths.root())
        .await
        .map_err(|source| StoreError::Io {
            path: paths.root().to_path_buf(),
            source,
        })?;

    let path = paths.character_list_file();
    let body = serde_json::to_vec_pretty(characters)?;
    fs::write(&path, body)
        .await
        .map_err(|source| StoreError::Io { path, source })
}

/// Read every `*.json` record under `characters/`, sorted by file name.
/// A missing directory means nothing has been scraped yet.
pub async fn load_characters(paths: &DataPaths) -> Result<Vec<Character>, StoreError> {
    let dir = paths.characters_dir();
    let mut entries = match fs::read_dir(&dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => return Err(StoreError::Io { path: dir, source }),
    };

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?
    {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".json") {
            files.push(name);
        }
    }
    files.sort();

    let mut characters = Vec::with_capacity(files.len());
    for name in files {
        let path = dir.join(&name);
        let raw = fs::read(&path)
            .await
            .map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
        let character =
            serde_json::from_slice(&raw).map_err(|source| StoreError::Parse { path, source })?;
        characters.push(character);
    }
    Ok(characters)
}

/// Remove `characters/`, `assets/` and the aggregate list. Paths that do not
/// exist are skipped.
pub async fn clean_data(paths: &DataPaths) -> Result<(), StoreError> {
    for dir in [paths.characters_dir(), paths.assets_dir()] {
        match fs::remove_dir_all(&dir).await {
            Ok(()) => debug!(path = %dir.display(), "removed directory"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(source) => return Err(StoreError::Io { path: dir, source }),
        }
    }

    let list = paths.character_list_file();
    match fs::remove_file(&list).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(StoreError::Io { path: list, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn character(name: &str, slug: &str) -> Character {
        Character {
            name: name.to_string(),
            slug: slug.to_string(),
            character_type: Some("Townsfolk".to_string()),
            edition: None,
            ability: Some("Each night, learn something.".to_string()),
            icon_path: None,
            source_url: None,
        }
    }

    #[tokio::test]
    async fn test_load_missing_directory_is_empty() {
        let tmp = TempDir::new().unwrap();
        let paths = DataPaths::new(tmp.path().join("never-created"));
        assert!(load_characters(&paths).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_then_load_in_filename_order() {
        let tmp = TempDir::new().unwrap();
        let paths = DataPaths::new(tmp.path());

        write_character(&paths, &character("Washerwoman", "washerwoman"))
            .await
            .unwrap();
        write_character(&paths, &character("Chef", "chef")).await.unwrap();
        tokio::fs::write(paths.characters_dir().join("notes.txt"), "ignored")
            .await
            .unwrap();

        let loaded = load_characters(&paths).await.unwrap();
        let slugs: Vec<_> = loaded.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["chef", "washerwoman"]);
    }

    #[tokio::test]
    async fn test_rewrite_overwrites_record() {
        let tmp = TempDir::new().unwrap();
        let paths = DataPaths::new(tmp.path());

        write_character(&paths, &character("Chef", "chef")).await.unwrap();
        let mut updated = character("Chef", "chef");
        updated.ability = None;
        write_character(&paths, &updated).await.unwrap();

        let loaded = load_characters(&paths).await.unwrap();
        assert_eq!(loaded, vec![updated]);
    }

    #[tokio::test]
    async fn test_malformed_record_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let paths = DataPaths::new(tmp.path());
        paths.ensure_dirs().await.unwrap();
        tokio::fs::write(paths.character_file("broken"), "{not json")
            .await
            .unwrap();

        let err = load_characters(&paths).await.unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_save_list_writes_array() {
        let tmp = TempDir::new().unwrap();
        let paths = DataPaths::new(tmp.path().join("data"));
        save_character_list(&paths, &[character("Chef", "chef")])
            .await
            .unwrap();

        let raw = tokio::fs::read_to_string(paths.character_list_file())
            .await
            .unwrap();
        let parsed: Vec<Character> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.len(), 1);
        assert!(raw.contains("\"characterType\""));
    }

    #[tokio::test]
    async fn test_clean_removes_everything_it_owns() {
        let tmp = TempDir::new().unwrap();
        let paths = DataPaths::new(tmp.path());
        paths.ensure_dirs().await.unwrap();
        write_character(&paths, &character("Chef", "chef")).await.unwrap();
        save_character_list(&paths, &[]).await.unwrap();
        tokio::fs::write(paths.assets_dir().join("chef.png"), [0u8; 4])
            .await
            .unwrap();
        tokio::fs::write(tmp.path().join("keep.txt"), "mine").await.unwrap();

        clean_data(&paths).await.unwrap();

        assert!(!paths.characters_dir().exists());
        assert!(!paths.assets_dir().exists());
        assert!(!paths.character_list_file().exists());
        assert!(tmp.path().join("keep.txt").exists());
    }

    #[tokio::test]
    async fn test_clean_missing_root_is_ok() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("absent");
        let paths = DataPaths::new(&root);

        clean_data(&paths).await.unwrap();
        assert!(!root.exists());
    }
}
