//! On-disk store for profile image files.

use crate::error::{FilestoreError, FilestoreResult};
use bytes::Bytes;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Flat directory of profile image files, one live file per account.
///
/// Paths handed out and accepted here are relative to the root; the
/// account record stores the same relative form.
pub struct ProfileImageStore {
    root: PathBuf,
}

impl ProfileImageStore {
    /// Opens the store, creating the directory tree if needed.
    pub fn open(root: impl AsRef<Path>) -> FilestoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Durably writes a file. The handle is fsynced before returning
    /// so a crash after success cannot lose the payload.
    pub fn write(&self, relative_path: &str, data: &Bytes) -> FilestoreResult<()> {
        let path = self.resolve(relative_path)?;
        let mut file = fs::File::create(&path)?;
        file.write_all(data)?;
        file.sync_all()?;
        Ok(())
    }

    /// Deletes a file. An already-missing file is success: the caller
    /// retries after a half-finished replacement and must not fail on
    /// the second pass.
    pub fn delete(&self, relative_path: &str) -> FilestoreResult<()> {
        let path = self.resolve(relative_path)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn exists(&self, relative_path: &str) -> bool {
        match self.resolve(relative_path) {
            Ok(path) => path.exists(),
            Err(_) => false,
        }
    }

    /// Number of files currently in the store.
    pub fn file_count(&self) -> FilestoreResult<usize> {
        let mut count = 0;
        for entry in fs::read_dir(&self.root)? {
            if entry?.file_type()?.is_file() {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Maps a relative path under the root, rejecting anything that
    /// would escape it.
    fn resolve(&self, relative_path: &str) -> FilestoreResult<PathBuf> {
        if relative_path.is_empty() {
            return Err(FilestoreError::Validation("Empty file path".to_string()));
        }
        let candidate = Path::new(relative_path);
        if candidate.is_absolute()
            || candidate
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(FilestoreError::Validation(format!(
                "Path '{}' escapes the image store",
                relative_path
            )));
        }
        Ok(self.root.join(candidate))
    }
}

/// Strips directory components and unsafe characters from a client
/// supplied file name, keeping the extension readable.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches('.');
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}
