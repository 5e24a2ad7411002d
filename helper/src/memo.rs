use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use miette::Diagnostic;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Diagnostic)]
pub enum MemoError {
    #[error("failed to access memo file {}", .path.display())]
    #[diagnostic(code(helper::memo::io))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("memo file {} is not a JSON object of integers", .path.display())]
    #[diagnostic(
        code(helper::memo::json),
        help("delete the file to start with an empty memo")
    )]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// String-keyed memo of answers, optionally mirrored to a JSON file.
///
/// Writes re-read the file and merge it before saving, so several memos
/// backed by the same file never drop each other's entries.
#[derive(Debug, Default)]
pub struct JsonMemo {
    path: Option<PathBuf>,
    entries: RwLock<BTreeMap<String, u64>>,
}

impl JsonMemo {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Loads `path` if it exists, the file is created on the first insert.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, MemoError> {
        let path = path.into();
        let entries = read_entries(&path)?;
        debug!(path = %path.display(), entries = entries.len(), "opened memo");
        Ok(Self {
            path: Some(path),
            entries: RwLock::new(entries),
        })
    }

    pub fn key(id: &str, index: usize) -> String {
        format!("{id}[{index}]")
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).copied()
    }

    pub fn insert(&self, key: String, value: u64) -> Result<(), MemoError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let Some(path) = &self.path else {
            entries.insert(key, value);
            return Ok(());
        };

        for (stored, stored_value) in read_entries(path)? {
            entries.entry(stored).or_insert(stored_value);
        }
        entries.insert(key, value);

        let json = serde_json::to_string_pretty(&*entries).map_err(|source| MemoError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(path, json).map_err(|source| MemoError::Io {
            path: path.clone(),
            source,
        })
    }

    pub fn get_or_insert_with(
        &self,
        key: String,
        compute: impl FnOnce() -> u64,
    ) -> Result<u64, MemoError> {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }
        let value = compute();
        self.insert(key, value)?;
        Ok(value)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, u64>, MemoError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(source) => {
            return Err(MemoError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    if contents.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(&contents).map_err(|source| MemoError::Json {
        path: path.to_path_buf(),
        source,
    })
}
