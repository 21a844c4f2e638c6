use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use futures::future::{BoxFuture, FutureExt};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use crate::errors::StoreError;
use crate::store::Store;

/// The longest file name most filesystems accept, in bytes.
const MAX_FILE_NAME_LENGTH: usize = 255;

/// A store that saves each key to its own file inside a directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    /// Opens a store in `directory`, creating it if necessary.
    pub fn open(directory: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let directory = directory.into();
        fs::create_dir_all(&directory)?;

        Ok(FileStore { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.directory.join(file_name_for(key))
    }
}

/// Keys contain user input, so they're percent-encoded. Keys whose
/// encoding is too long for a file name are replaced by their SHA-256
/// digest. `%s` never appears in an encoded key, so the two can't
/// collide.
fn file_name_for(key: &str) -> String {
    let name = format!("{}.json", urlencoding::encode(key));

    if name.len() <= MAX_FILE_NAME_LENGTH {
        return name;
    }

    format!("%sha256-{}.json", hex::encode(Sha256::digest(key.as_bytes())))
}

impl Store for FileStore {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, StoreError>> {
        let path = self.path_for(key);

        async move {
            match tokio::fs::read_to_string(&path).await {
                Ok(value) => Ok(Some(value)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        }
        .boxed()
    }

    fn put<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, Result<(), StoreError>> {
        let directory = self.directory.clone();
        let path = self.path_for(key);

        async move {
            tokio::task::spawn_blocking(move || write_atomically(&directory, &path, &value))
                .await
                .map_err(|source| StoreError::Task { source })?
        }
        .boxed()
    }
}

/// Writes to a temporary file next to `path`, then renames it over
/// `path` so readers never see a partial value.
fn write_atomically(directory: &Path, path: &Path, value: &str) -> Result<(), StoreError> {
    let mut file = NamedTempFile::new_in(directory)?;
    file.write_all(value.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    Ok(())
}
