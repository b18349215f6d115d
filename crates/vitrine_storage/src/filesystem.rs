//! Local filesystem scanner.
//!
//! Lists category directories under a media root and serves them under a
//! public URL prefix.

use crate::url::{decode_segment, encode_segment, strip_query};
use crate::{AssetBackend, CategoryPaths, ScanOptions};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use vitrine_core::{Backend, Category, RawAssetRecord, VersionedName, is_media_file};
use vitrine_error::{StorageError, StorageErrorKind, VitrineResult};

/// Filesystem storage backend.
///
/// Maps each category to a directory below `media_root` and publishes files
/// as `{public_prefix}/{category path}/{file}`:
///
/// ```text
/// /srv/app/public/media/            ->  /media/
/// ├── products/
/// │   ├── mug_v1714557600000_k3x9p2aa.jpg
/// │   └── mug_v1714644000000_q8w1m0cd.jpg
/// ├── brands/
/// │   └── logo.png                  ->  /media/brands/logo.png
/// └── pages/
/// ```
///
/// Only files with an allow-listed extension are reported. Subdirectories are
/// not descended into.
#[derive(Debug, Clone)]
pub struct LocalFileScanner {
    media_root: PathBuf,
    public_prefix: String,
    paths: CategoryPaths,
}

impl LocalFileScanner {
    /// Create a scanner over `media_root`, published under `public_prefix`.
    ///
    /// The root need not exist; missing directories scan as empty.
    pub fn new(
        media_root: impl Into<PathBuf>,
        public_prefix: impl Into<String>,
        paths: CategoryPaths,
    ) -> Self {
        let public_prefix = public_prefix.into();
        let public_prefix = format!("/{}", public_prefix.trim_matches('/'));
        Self {
            media_root: media_root.into(),
            public_prefix,
            paths,
        }
    }

    /// Root directory scanned by this backend.
    pub fn media_root(&self) -> &Path {
        &self.media_root
    }

    /// URL path prefix for published files.
    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    fn category_dir(&self, category: Category) -> PathBuf {
        self.media_root.join(self.paths.path(category))
    }

    fn url_for(&self, category: Category, name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.public_prefix,
            self.paths.path(category),
            encode_segment(name)
        )
    }

    /// Resolve a published URL back to the file it names.
    fn resolve_url(&self, url: &str) -> VitrineResult<(Category, PathBuf)> {
        let path = strip_query(url);
        let relative = path
            .strip_prefix(self.public_prefix.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| {
                StorageError::new(StorageErrorKind::InvalidPath(format!(
                    "{} is outside {}",
                    url, self.public_prefix
                )))
            })?;

        let (category, file) = self.paths.locate(relative).ok_or_else(|| {
            StorageError::new(StorageErrorKind::InvalidPath(format!(
                "{} does not name a file in a managed category",
                url
            )))
        })?;

        let file = decode_segment(&file);
        if file.is_empty() || file == "." || file == ".." || file.contains(['/', '\\']) {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(format!(
                "{} does not name a file in a managed category",
                url
            )))
            .into());
        }

        Ok((category, self.category_dir(category).join(file)))
    }
}

/// Upload time from a file's modification time; unknown times sort oldest.
fn uploaded_at_from(modified: std::io::Result<SystemTime>) -> DateTime<Utc> {
    modified
        .map(DateTime::<Utc>::from)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Write `data` to `temp_path`, then rename it over `path`.
///
/// The temp file is removed if either step fails.
async fn write_atomically(path: &Path, temp_path: &Path, data: &[u8]) -> VitrineResult<()> {
    if let Err(e) = tokio::fs::write(temp_path, data).await {
        let _ = tokio::fs::remove_file(temp_path).await;
        return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            temp_path.display(),
            e
        )))
        .into());
    }

    if let Err(e) = tokio::fs::rename(temp_path, path).await {
        let _ = tokio::fs::remove_file(temp_path).await;
        return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
            "rename {} to {}: {}",
            temp_path.display(),
            path.display(),
            e
        )))
        .into());
    }

    Ok(())
}

#[async_trait::async_trait]
impl AssetBackend for LocalFileScanner {
    fn backend(&self) -> Backend {
        Backend::Local
    }

    fn owns_url(&self, url: &str) -> bool {
        strip_query(url)
            .strip_prefix(self.public_prefix.as_str())
            .map(|rest| rest.starts_with('/'))
            .unwrap_or(false)
    }

    #[tracing::instrument(skip(self, options), fields(root = %self.media_root.display()))]
    async fn scan(
        &self,
        category: Category,
        options: &ScanOptions,
    ) -> VitrineResult<Vec<RawAssetRecord>> {
        let dir = self.category_dir(category);

        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(dir = %dir.display(), "Category directory missing, nothing to scan");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::DirectoryRead(format!(
                    "{}: {}",
                    dir.display(),
                    e
                )))
                .into());
            }
        };

        let mut records = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryRead(format!(
                "{}: {}",
                dir.display(),
                e
            )))
        })? {
            let name = entry.file_name().to_string_lossy().to_string();
            if !is_media_file(&name) {
                continue;
            }

            let metadata = match entry.metadata().await {
                Ok(metadata) => metadata,
                Err(e) => {
                    // Vanished between listing and stat
                    tracing::debug!(file = %name, error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }

            let uploaded_at = uploaded_at_from(metadata.modified());
            if !options.admits(&uploaded_at) {
                continue;
            }

            records.push(RawAssetRecord {
                category,
                url: self.url_for(category, &name),
                raw_name: name,
                size_bytes: metadata.len(),
                uploaded_at,
            });
        }

        tracing::debug!(count = records.len(), "Scanned local category");
        Ok(records)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, url: &str) -> VitrineResult<bool> {
        let (_, path) = self.resolve_url(url)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Deleted media file");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Media file already absent");
                Ok(false)
            }
            Err(e) => Err(StorageError::new(StorageErrorKind::from_io(path.display(), &e)).into()),
        }
    }

    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    async fn store(
        &self,
        category: Category,
        display_name: &str,
        data: &[u8],
    ) -> VitrineResult<RawAssetRecord> {
        if display_name.contains('/') || !is_media_file(display_name) {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(format!(
                "{} is not a storable media filename",
                display_name
            )))
            .into());
        }

        let dir = self.category_dir(category);
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                dir.display(),
                e
            )))
        })?;

        let uploaded_at = Utc::now();
        let raw_name = VersionedName::generate(display_name, uploaded_at).to_raw();
        let path = dir.join(&raw_name);

        // Write to temp file first, then rename for atomicity
        let temp_path = dir.join(format!(".{}.tmp", raw_name));
        write_atomically(&path, &temp_path, data).await?;

        tracing::info!(path = %path.display(), "Stored media file");

        Ok(RawAssetRecord {
            category,
            url: self.url_for(category, &raw_name),
            raw_name,
            size_bytes: data.len() as u64,
            uploaded_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_mtime_sorts_oldest() {
        let unknown = uploaded_at_from(Err(std::io::Error::other("no mtime")));
        assert_eq!(unknown, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[tokio::test]
    async fn test_failed_rename_removes_temp_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("taken.png");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("occupant.png"), b"x").unwrap();
        let temp = dir.path().join(".taken.png.tmp");

        let result = write_atomically(&target, &temp, b"data").await;

        assert!(result.is_err());
        assert!(!temp.exists());
        assert!(target.join("occupant.png").exists());
    }
}
