//! File-backed key-value store: one JSON document per key under a root directory.

use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use homeclean_core::{CoreError, KeyValueStore};
use tracing::{debug, warn};

const DOCUMENT_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Persists each storage key as `<root>/<canonical key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_name(key), DOCUMENT_EXTENSION))
    }

    /// Keys with a document on disk, as canonical file stems.
    pub fn keys(&self) -> Result<Vec<String>, CoreError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(DOCUMENT_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

impl KeyValueStore for JsonFileStore {
    /// Invalid UTF-8 is decoded lossily so callers see unparsable JSON, not an I/O error.
    fn get_item(&self, key: &str) -> Result<Option<String>, CoreError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(raw) => Ok(Some(raw)),
                Err(err) => {
                    warn!(key, "document is not valid UTF-8");
                    Ok(Some(String::from_utf8_lossy(err.as_bytes()).into_owned()))
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let path = self.path_for(key);
        write_atomic(&path, value)?;
        debug!(key, path = %path.display(), bytes = value.len(), "stored document");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), CoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

fn canonical_name(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "store".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes to a sibling temp file and renames it over `path`.
fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    {
        let mut file = File::create(&tmp)?;
        file.write_all(data.as_bytes())?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_name_keeps_storage_keys_readable() {
        assert_eq!(canonical_name("bookings"), "bookings");
        assert_eq!(canonical_name("savedAddresses"), "savedAddresses");
        assert_eq!(canonical_name("../etc/passwd"), "___etc_passwd");
        assert_eq!(canonical_name("  "), "store");
    }

    #[test]
    fn tmp_path_appends_suffix() {
        let tmp = tmp_path(Path::new("/data/bookings.json"));
        assert_eq!(tmp, PathBuf::from("/data/bookings.json.tmp"));
    }
}
