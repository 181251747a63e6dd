use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PropertiesError {
    #[error("could not read properties file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("properties file `{path}` has no `=` separator on line {line}")]
    MalformedLine { path: PathBuf, line: usize },
    #[error("missing required property `{key}` in `{path}`")]
    MissingKey { key: String, path: PathBuf },
}

/// An immutable key-value set loaded from a Java-style `.properties` file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Properties {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl Properties {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Looks up a required key. Absence is a typed error naming the key and
    /// the source file.
    pub fn get(&self, key: &str) -> Result<&str, PropertiesError> {
        self.values.get(key).map(String::as_str).ok_or_else(|| PropertiesError::MissingKey {
            key: key.to_string(),
            path: self.path.clone(),
        })
    }

    /// Looks up an optional key; an empty value counts as absent.
    pub fn get_optional(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str).filter(|value| !value.is_empty())
    }

    fn parse(path: &Path, raw: &str) -> Result<Self, PropertiesError> {
        let mut values = HashMap::new();

        for (index, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let (key, value) =
                line.split_once('=').ok_or_else(|| PropertiesError::MalformedLine {
                    path: path.to_path_buf(),
                    line: index + 1,
                })?;
            values.insert(key.trim().to_string(), value.trim().to_string());
        }

        Ok(Self { path: path.to_path_buf(), values })
    }
}

/// Loads `.properties` files and caches each loaded set by source path, so the
/// same file requested twice is read from disk only once. Safe for concurrent
/// lookups.
#[derive(Debug, Default)]
pub struct PropertiesLoader {
    cache: RwLock<HashMap<PathBuf, Arc<Properties>>>,
}

impl PropertiesLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&self, path: impl AsRef<Path>) -> Result<Arc<Properties>, PropertiesError> {
        let path = path.as_ref();

        if let Ok(cache) = self.cache.read() {
            if let Some(properties) = cache.get(path) {
                return Ok(Arc::clone(properties));
            }
        }

        let raw = fs::read_to_string(path)
            .map_err(|source| PropertiesError::ReadFile { path: path.to_path_buf(), source })?;
        let properties = Arc::new(Properties::parse(path, &raw)?);

        if let Ok(mut cache) = self.cache.write() {
            // A concurrent loader may have raced us; keep whichever set landed
            // first so all callers share one Arc.
            return Ok(Arc::clone(
                cache.entry(path.to_path_buf()).or_insert_with(|| Arc::clone(&properties)),
            ));
        }

        Ok(properties)
    }
}
