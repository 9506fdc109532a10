use std::{
    fs, io,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::{
    error::StoreError,
    records::{DomainIndex, GeocodeCache},
};

pub type IndexFile = JsonFile<DomainIndex>;
pub type CacheFile = JsonFile<GeocodeCache>;

/// A whole-file JSON document at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFile<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFile<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document, falling back to an empty one.
    ///
    /// A cold start has no file yet and a corrupt file is no better than none,
    /// so neither stops the caller. A file that does not parse is copied to
    /// `<file>.bak` first, the next save would otherwise overwrite it.
    pub fn load(&self) -> T {
        match self.try_load() {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!("{} not found, starting empty", self.path.display());
                T::default()
            }
            Err(e @ StoreError::Parse { .. }) => {
                let backup = self.sibling_path(".bak");
                match fs::copy(&self.path, &backup) {
                    Ok(_) => warn!("{e}, kept a copy at {}, starting empty", backup.display()),
                    Err(copy_error) => warn!("{e}, backup failed ({copy_error}), starting empty"),
                }
                T::default()
            }
            Err(e) => {
                warn!("{e}, starting empty");
                T::default()
            }
        }
    }

    pub fn try_load(&self) -> Result<Option<T>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    pub fn save(&self, value: &T) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Serialize {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.sibling_path(".tmp");
        fs::write(&tmp, json)
            .and_then(|_| fs::rename(&tmp, &self.path))
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })
    }

    fn sibling_path(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(suffix);
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::records::{Coordinates, DomainRecord};

    fn record(name: &str, lat: Option<f64>, lng: Option<f64>) -> DomainRecord {
        DomainRecord {
            name: name.to_string(),
            lat,
            lng,
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let file = IndexFile::new(dir.path().join("domain_index.json"));

        assert!(file.try_load().unwrap().is_none());
        assert!(file.load().is_empty());
    }

    #[test]
    fn test_garbage_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("geocode.json");
        fs::write(&path, "{ not json").unwrap();

        let file = CacheFile::new(&path);
        assert!(matches!(file.try_load(), Err(StoreError::Parse { .. })));
        assert!(file.load().is_empty());
    }

    #[test]
    fn test_unparsable_file_is_backed_up_before_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("domain_index.json");
        fs::write(&path, "[\"not\", \"a map\"]").unwrap();

        let file = IndexFile::new(&path);
        let index = file.load();
        assert!(index.is_empty());

        file.save(&index).unwrap();

        let backup = dir.path().join("domain_index.json.bak");
        assert_eq!(fs::read_to_string(backup).unwrap(), "[\"not\", \"a map\"]");
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_missing_file_leaves_no_backup() {
        let dir = tempdir().unwrap();
        let file = IndexFile::new(dir.path().join("domain_index.json"));

        file.load();
        assert!(!dir.path().join("domain_index.json.bak").exists());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let file = IndexFile::new(dir.path().join("data").join("nested").join("domain_index.json"));

        let mut index = DomainIndex::new();
        index.insert("example.edu".to_string(), record("Example University", None, None));
        file.save(&index).unwrap();

        assert_eq!(file.load(), index);
        assert!(!dir.path().join("data/nested/domain_index.json.tmp").exists());
    }

    #[test]
    fn test_save_is_pretty_and_sorted() {
        let dir = tempdir().unwrap();
        let file = IndexFile::new(dir.path().join("domain_index.json"));

        let mut index = DomainIndex::new();
        index.insert("zeta.edu".to_string(), record("Zeta", None, None));
        index.insert("alpha.edu".to_string(), record("Alpha", Some(1.5), Some(-2.0)));
        file.save(&index).unwrap();

        let written = fs::read_to_string(file.path()).unwrap();
        assert!(written.starts_with("{\n  \"alpha.edu\": {\n    \"name\": \"Alpha\""));
        assert!(written.find("alpha.edu").unwrap() < written.find("zeta.edu").unwrap());
    }

    #[test]
    fn test_save_replaces_previous_contents() {
        let dir = tempdir().unwrap();
        let file = CacheFile::new(dir.path().join("geocode.json"));

        let mut cache = GeocodeCache::new();
        cache.insert("A|CA".to_string(), None);
        file.save(&cache).unwrap();

        cache.insert(
            "B|NY".to_string(),
            Some(Coordinates {
                lat: 40.7,
                lng: -74.0,
            }),
        );
        file.save(&cache).unwrap();

        let loaded = file.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get("A|CA"), Some(&None));
    }
}
