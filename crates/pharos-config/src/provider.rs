use std::{fs, path::Path, str::FromStr};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ConfigError, Result};

/// Read-only view of an already-loaded manifest document.
///
/// The provider owns every key/value pair of the manifest except the
/// `repositories` section, which is regenerated by
/// [`Satis`](crate::satis::Satis) on write. Values stay in raw form so
/// settings this crate knows nothing about survive a rewrite.
pub trait ConfigProvider {
    /// Returns the raw value stored under `key`, or `None` if the key does
    /// not exist.
    fn get(&self, key: &str) -> Option<&Value>;

    /// Returns a snapshot of every loaded key with values still in raw form,
    /// suitable for re-serialization without loss.
    fn content_map(&self) -> Map<String, Value>;
}

/// Provider backed by a JSON document on disk.
#[derive(Debug, Clone, Default)]
pub struct JsonFileProvider {
    content: Map<String, Value>,
}

impl JsonFileProvider {
    /// Loads the manifest at `path`.
    ///
    /// A missing file yields an empty document so a first run can start from
    /// scratch.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => content.parse(),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("Manifest {} not found, starting empty", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(ConfigError::IoError(err)),
        }
    }
}

impl FromStr for JsonFileProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s).map_err(ConfigError::JsonParse)?;
        match value {
            Value::Object(content) => Ok(Self { content }),
            _ => Err(ConfigError::ManifestNotAnObject),
        }
    }
}

impl ConfigProvider for JsonFileProvider {
    fn get(&self, key: &str) -> Option<&Value> {
        self.content.get(key)
    }

    fn content_map(&self) -> Map<String, Value> {
        self.content.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let provider = JsonFileProvider::load(dir.path().join("satis.json")).unwrap();
        assert!(provider.content_map().is_empty());
    }

    #[test]
    fn test_load_reads_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("satis.json");
        fs::write(&path, r#"{"name": "acme/mirror", "homepage": "https://packages.acme.dev"}"#)
            .unwrap();

        let provider = JsonFileProvider::load(&path).unwrap();
        assert_eq!(
            provider.get("name"),
            Some(&Value::String("acme/mirror".to_string()))
        );
        assert_eq!(provider.content_map().len(), 2);
    }

    #[test]
    fn test_get_absent_key() {
        let provider = r#"{"name": "acme/mirror"}"#.parse::<JsonFileProvider>().unwrap();
        assert!(provider.get("repositories").is_none());
    }

    #[test]
    fn test_invalid_json_fails() {
        let err = "{not json".parse::<JsonFileProvider>().unwrap_err();
        assert!(matches!(err, ConfigError::JsonParse(_)));
    }

    #[test]
    fn test_non_object_root_fails() {
        let err = "[1, 2, 3]".parse::<JsonFileProvider>().unwrap_err();
        assert!(matches!(err, ConfigError::ManifestNotAnObject));
    }

    #[test]
    fn test_content_map_keeps_raw_values() {
        let provider = r#"{"require-all": true, "archive": {"format": "tar"}}"#
            .parse::<JsonFileProvider>()
            .unwrap();
        let content = provider.content_map();
        assert_eq!(content.get("require-all"), Some(&Value::Bool(true)));
        assert_eq!(content["archive"]["format"], Value::String("tar".to_string()));
    }
}
