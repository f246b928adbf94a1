use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use recipe_core::Recipe;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Storage key holding the serialized favorites list.
pub const FAVORITES_KEY: &str = "recipe-app-favorites";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage directory missing or not writable: {0}")]
    StorageDir(String),
    #[error("stored favorites are unreadable: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Durable home of the favorites collection.
pub trait FavoritesStore: Send + Sync {
    fn load(&self) -> Result<Vec<Recipe>, PersistError>;
    fn save(&self, favorites: &[Recipe]) -> Result<(), PersistError>;
}

/// Ensure the storage directory exists; create if missing.
pub fn ensure_storage_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::StorageDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::StorageDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::StorageDir(e.to_string()))?;
    }
    Ok(())
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write(&self, filename: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        ensure_storage_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

/// Key/value storage on disk: one `{key}.json` file per key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    writer: AtomicFileWriter,
    key: String,
}

impl JsonFileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self::with_key(dir, FAVORITES_KEY)
    }

    pub fn with_key(dir: PathBuf, key: &str) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir),
            key: key.to_string(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.writer.dir().join(self.filename())
    }

    fn filename(&self) -> String {
        format!("{}.json", self.key)
    }
}

impl FavoritesStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Recipe>, PersistError> {
        let bytes = match fs::read(self.path()) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn save(&self, favorites: &[Recipe]) -> Result<(), PersistError> {
        let content = serde_json::to_vec(favorites)?;
        self.writer.write(&self.filename(), &content)?;
        Ok(())
    }
}

/// Process-local store for sessions without a writable data directory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    favorites: Mutex<Vec<Recipe>>,
}

impl MemoryStore {
    pub fn new(initial: Vec<Recipe>) -> Self {
        Self {
            favorites: Mutex::new(initial),
        }
    }

    pub fn snapshot(&self) -> Vec<Recipe> {
        self.favorites
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl FavoritesStore for MemoryStore {
    fn load(&self) -> Result<Vec<Recipe>, PersistError> {
        Ok(self.snapshot())
    }

    fn save(&self, favorites: &[Recipe]) -> Result<(), PersistError> {
        if let Ok(mut guard) = self.favorites.lock() {
            *guard = favorites.to_vec();
        }
        Ok(())
    }
}
