//! JSON file repositories.
//!
//! One pretty-printed file per entity at `<dir>/<id>.json`. Writes go to a
//! temporary sibling first and are renamed into place, so readers never see a
//! half-written record.

use std::fmt::Display;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use villagesim_domain::{CharacterId, CharacterProfile, EventId, EventRecord};

use crate::infrastructure::ports::{CharacterRepo, EventRepo, RepoError};

/// Directory of `<id>.json` files.
#[derive(Debug, Clone)]
struct JsonDir {
    dir: PathBuf,
}

impl JsonDir {
    fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, id: impl Display) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    async fn read<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        id: impl Display,
    ) -> Result<Option<T>, RepoError> {
        let path = self.path_for(id);
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(RepoError::storage(operation, e)),
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| RepoError::serialization(format!("{}: {}", path.display(), e)))
    }

    async fn write<T: Serialize>(
        &self,
        operation: &'static str,
        id: impl Display,
        value: &T,
    ) -> Result<(), RepoError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| RepoError::storage(operation, e))?;

        let json = serde_json::to_string_pretty(value).map_err(RepoError::serialization)?;
        let path = self.path_for(&id);
        let tmp = self.dir.join(format!(".{id}.json.tmp"));

        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| RepoError::storage(operation, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| RepoError::storage(operation, e))
    }

    /// Every readable `*.json` file; unreadable ones are logged and skipped.
    async fn read_all<T: DeserializeOwned>(
        &self,
        operation: &'static str,
    ) -> Result<Vec<T>, RepoError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(RepoError::storage(operation, e)),
        };

        let mut values = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| RepoError::storage(operation, e))?
        {
            let path = entry.path();
            if !is_json_file(&path) {
                continue;
            }
            match read_json::<T>(&path).await {
                Ok(value) => values.push(value),
                Err(error) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %error,
                        "Skipping unreadable record"
                    );
                }
            }
        }
        Ok(values)
    }

    async fn remove(&self, operation: &'static str, id: impl Display) -> Result<bool, RepoError> {
        match tokio::fs::remove_file(self.path_for(id)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(RepoError::storage(operation, e)),
        }
    }
}

fn is_json_file(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'));
    !hidden && path.extension().is_some_and(|ext| ext == "json")
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| e.to_string())?;
    serde_json::from_str(&text).map_err(|e| e.to_string())
}

// =============================================================================
// Characters
// =============================================================================

pub struct JsonCharacterRepo {
    files: JsonDir,
}

impl JsonCharacterRepo {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            files: JsonDir::new(dir),
        }
    }
}

#[async_trait]
impl CharacterRepo for JsonCharacterRepo {
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterProfile>, RepoError> {
        self.files.read("get_character", id).await
    }

    async fn save(&self, character: &CharacterProfile) -> Result<(), RepoError> {
        self.files
            .write("save_character", character.id, character)
            .await
    }
}

// =============================================================================
// Events
// =============================================================================

pub struct JsonEventRepo {
    files: JsonDir,
}

impl JsonEventRepo {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            files: JsonDir::new(dir),
        }
    }
}

#[async_trait]
impl EventRepo for JsonEventRepo {
    async fn get(&self, id: EventId) -> Result<Option<EventRecord>, RepoError> {
        self.files.read("get_event", id).await
    }

    async fn save(&self, record: &EventRecord) -> Result<(), RepoError> {
        self.files.write("save_event", record.id, record).await
    }

    async fn list(&self) -> Result<Vec<EventRecord>, RepoError> {
        self.files.read_all("list_events").await
    }

    async fn delete(&self, id: EventId) -> Result<bool, RepoError> {
        self.files.remove("delete_event", id).await
    }
}
