//! Satis manifest registry and writer.
//!
//! A Satis manifest is a plain JSON file with a fairly large schema, but only
//! the `repositories` section is owned by pharos. Reflecting the whole schema
//! as typed structs would force a release every time Satis grows a new
//! setting, so everything else is carried as raw values and written back
//! untouched.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use serde_json::{ser::PrettyFormatter, Serializer, Value};
use tracing::info;

use crate::{
    error::{ConfigError, Result},
    provider::ConfigProvider,
};

/// Default permission bits for a written manifest: world-readable,
/// owner-writable.
pub const DEFAULT_MANIFEST_MODE: u32 = 0o644;

/// A single entry in the manifest's `repositories` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SatisRepository {
    /// Repository mechanism, like `git` or `svn`.
    #[serde(rename = "type", default)]
    pub kind: String,

    /// URL of the repository that contains the packages.
    #[serde(default)]
    pub url: String,
}

/// In-memory registry of repository entries plus the manifest document they
/// were loaded from.
///
/// Entries are keyed by URL, so the set is deduplicated by construction and
/// iterates in URL order for reproducible manifest output.
#[derive(Debug)]
pub struct Satis<P> {
    provider: P,
    repositories: BTreeMap<String, SatisRepository>,
}

impl<P: ConfigProvider> Satis<P> {
    /// Creates a registry from a loaded manifest provider.
    ///
    /// Fails with [`ConfigError::MissingProvider`] when no provider is given
    /// and with [`ConfigError::MalformedRepositories`] when the existing
    /// `repositories` value is not an array of entries. An absent key (or an
    /// explicit `null`) starts the registry empty.
    pub fn new(provider: Option<P>) -> Result<Self> {
        let provider = provider.ok_or(ConfigError::MissingProvider)?;

        let initial: Vec<SatisRepository> = match provider.get("repositories") {
            None | Some(Value::Null) => Vec::new(),
            Some(raw) => serde_json::from_value(raw.clone())
                .map_err(|source| ConfigError::MalformedRepositories { source })?,
        };

        // Duplicate URLs in the loaded document collapse; the last
        // occurrence wins.
        let mut repositories = BTreeMap::new();
        for repository in initial {
            repositories.insert(repository.url.clone(), repository);
        }

        Ok(Self {
            provider,
            repositories,
        })
    }

    /// Records `url` as a mirrored `git` repository.
    ///
    /// Adding the same URL twice keeps exactly one entry. The URL is treated
    /// as an opaque identifier; no syntax validation is performed.
    pub fn add_repository(&mut self, url: impl Into<String>) {
        let url = url.into();
        self.repositories.insert(
            url.clone(),
            SatisRepository {
                kind: "git".to_string(),
                url,
            },
        );
    }

    /// Records every URL in `urls`, in sequence order.
    pub fn add_repositories<I>(&mut self, urls: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        for url in urls {
            self.add_repository(url);
        }
    }

    /// Returns the current entries sorted by URL.
    pub fn repositories(&self) -> Vec<SatisRepository> {
        self.repositories.values().cloned().collect()
    }

    /// Writes the merged manifest to `path` with permission bits `mode`.
    ///
    /// Every key of the original document is carried over unchanged in
    /// content; only `repositories` is replaced with the registry's current
    /// entries. The document goes to a `.tmp` sibling first and is renamed
    /// into place, so a failed write leaves the previous manifest intact.
    pub fn write_file<Q: AsRef<Path>>(&self, path: Q, mode: u32) -> Result<()> {
        let path = path.as_ref();

        let mut content = self.provider.content_map();
        let repositories =
            serde_json::to_value(self.repositories()).map_err(ConfigError::JsonSer)?;
        content.insert("repositories".to_string(), repositories);

        let body = to_pretty_json(&Value::Object(content))?;

        let mut tmp = path.as_os_str().to_os_string();
        tmp.push(".tmp");
        let tmp_path = PathBuf::from(tmp);

        fs::write(&tmp_path, body)?;
        set_file_permissions(&tmp_path, mode)?;
        fs::rename(&tmp_path, path)?;

        info!("Manifest written to {}", path.display());
        Ok(())
    }
}

/// Serializes `value` with the manifest's 4-space indentation.
fn to_pretty_json(value: &Value) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(ConfigError::JsonSer)?;
    Ok(buf)
}

#[cfg(unix)]
fn set_file_permissions(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_file_permissions(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}
