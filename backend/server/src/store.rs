//! # Collections
//!
//! JSON file per collection: `users`, `posts`, `universities`, whatever the client sends.
//!
//! - Key to file: `<data_dir>/<key>.json`
//! - Reads of a missing collection give `[]`
//! - Writes replace the whole collection, no partial updates, no schema
//! - Keys are restricted to letters, digits, `_` and `-` so a key can never point outside the data directory
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{
        LazyLock,
        atomic::{AtomicU64, Ordering},
    },
};

use regex::Regex;
use serde_json::Value;
use tokio::fs;

use crate::error::AppError;

static KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("collection key pattern"));

pub struct CollectionStore {
    dir: PathBuf,
    /// Numbers temp files so overlapping writes to one key never share one.
    writes: AtomicU64,
}

impl CollectionStore {
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;

        Ok(Self {
            dir,
            writes: AtomicU64::new(0),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn read(&self, key: &str) -> Result<Value, AppError> {
        let path = self.path_for(key)?;

        match fs::read_to_string(&path).await {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Value::Array(Vec::new())),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn write(&self, key: &str, data: &Value) -> Result<(), AppError> {
        let path = self.path_for(key)?;
        let n = self.writes.fetch_add(1, Ordering::Relaxed);
        let tmp = self.dir.join(format!("{key}.json.{n}.tmp"));

        fs::write(&tmp, serde_json::to_string_pretty(data)?).await?;
        fs::rename(&tmp, &path).await?;

        Ok(())
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, AppError> {
        if !KEY_PATTERN.is_match(key) {
            return Err(AppError::InvalidKey(key.to_string()));
        }

        Ok(self.dir.join(format!("{key}.json")))
    }
}
