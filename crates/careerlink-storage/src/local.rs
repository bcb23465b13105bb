use crate::traits::{ByteStream, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use careerlink_core::UploadCategory;
use futures::StreamExt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Local filesystem storage implementation
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Upload root (e.g., "/var/lib/careerlink/uploads")
    ///
    /// Only the root is created here; category directories appear on first write.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create upload directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    fn category_dir(&self, category: UploadCategory) -> PathBuf {
        self.base_path.join(category.directory())
    }

    /// Filenames are a single, non-hidden path component.
    fn validate_filename(filename: &str) -> StorageResult<()> {
        if filename.is_empty()
            || filename.contains("..")
            || filename.contains('/')
            || filename.contains('\\')
            || filename.starts_with('.')
        {
            return Err(StorageError::InvalidKey(format!(
                "Filename '{}' contains invalid characters",
                filename
            )));
        }
        Ok(())
    }

    /// Ensure the category directory exists. Concurrent first writers all succeed.
    async fn ensure_category_dir(&self, category: UploadCategory) -> StorageResult<PathBuf> {
        let dir = self.category_dir(category);
        match fs::create_dir_all(&dir).await {
            Ok(()) => Ok(dir),
            Err(e) if e.kind() == ErrorKind::AlreadyExists && dir.is_dir() => Ok(dir),
            Err(e) => Err(StorageError::UploadFailed(format!(
                "Failed to create directory {}: {}",
                dir.display(),
                e
            ))),
        }
    }

    async fn write_new_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await?;

        Self::write_or_remove(path, &mut file, data).await?;

        if let Err(e) = file.sync_all().await {
            drop(file);
            Self::remove_partial(path).await;
            return Err(e);
        }

        Ok(())
    }

    /// Write `data` through `writer`; on failure the file at `path` is removed.
    async fn write_or_remove<W>(path: &Path, mut writer: W, data: &[u8]) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let written = match writer.write_all(data).await {
            Ok(()) => writer.flush().await,
            Err(e) => Err(e),
        };

        if let Err(e) = written {
            drop(writer);
            Self::remove_partial(path).await;
            return Err(e);
        }

        Ok(())
    }

    async fn remove_partial(path: &Path) {
        if let Err(cleanup_err) = fs::remove_file(path).await {
            if cleanup_err.kind() != ErrorKind::NotFound {
                tracing::warn!(
                    path = %path.display(),
                    error = %cleanup_err,
                    "Failed to remove partially written file"
                );
            }
        }
    }

    async fn base_canonical(&self) -> StorageResult<PathBuf> {
        fs::canonicalize(&self.base_path).await.map_err(|e| {
            StorageError::ConfigError(format!("Failed to canonicalize upload root: {}", e))
        })
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn put(
        &self,
        category: UploadCategory,
        filename: &str,
        data: Vec<u8>,
    ) -> StorageResult<PathBuf> {
        Self::validate_filename(filename)?;
        let dir = self.ensure_category_dir(category).await?;
        let path = dir.join(filename);
        let size = data.len();
        let start = std::time::Instant::now();

        Self::write_new_file(&path, &data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            category = %category,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(path)
    }

    async fn exists(&self, category: UploadCategory, filename: &str) -> StorageResult<bool> {
        let path = self.resolve(category, filename)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn content_length(
        &self,
        category: UploadCategory,
        filename: &str,
    ) -> StorageResult<u64> {
        let path = self.resolve(category, filename)?;
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(meta.len()),
            Ok(_) => Err(StorageError::NotFound(filename.to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(filename.to_string()))
            }
            Err(e) => Err(StorageError::IoError(e)),
        }
    }

    async fn download_stream(
        &self,
        category: UploadCategory,
        filename: &str,
    ) -> StorageResult<ByteStream> {
        let path = self.resolve(category, filename)?;

        let file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound(filename.to_string()));
            }
            Err(e) => {
                return Err(StorageError::DownloadFailed(format!(
                    "Failed to open file {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let path_display = path.display().to_string();
        let stream = tokio_util::io::ReaderStream::new(file).map(move |result| {
            result.map_err(|e| {
                tracing::error!(path = %path_display, error = %e, "Local storage stream read error");
                StorageError::DownloadFailed(format!("Failed to read chunk: {}", e))
            })
        });

        Ok(Box::pin(stream))
    }

    async fn delete_path(&self, path: &Path) -> StorageResult<()> {
        let start = std::time::Instant::now();

        let canonical = match fs::canonicalize(path).await {
            Ok(canonical) => canonical,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(StorageError::IoError(e)),
        };

        let base_canonical = self.base_canonical().await?;
        if canonical.strip_prefix(&base_canonical).is_err() {
            return Err(StorageError::InvalidKey(format!(
                "Path {} resolves outside the upload directory",
                path.display()
            )));
        }

        match fs::remove_file(&canonical).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(StorageError::DeleteFailed(format!(
                    "Failed to delete file {}: {}",
                    path.display(),
                    e
                )));
            }
        }

        tracing::info!(
            path = %path.display(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage delete successful"
        );

        Ok(())
    }

    fn resolve(&self, category: UploadCategory, filename: &str) -> StorageResult<PathBuf> {
        Self::validate_filename(filename)?;
        Ok(self.category_dir(category).join(filename))
    }

    fn root(&self) -> &Path {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::pin::Pin;
    use std::sync::Arc;
    use std::task::{Context, Poll};
    use tempfile::tempdir;

    /// Writes through to `inner` until `remaining` bytes are spent, then fails.
    struct FailAfter {
        inner: fs::File,
        remaining: usize,
    }

    impl AsyncWrite for FailAfter {
        fn poll_write(
            mut self: Pin<&mut Self>,
            cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<std::io::Result<usize>> {
            if self.remaining == 0 {
                return Poll::Ready(Err(std::io::Error::other("no space left on device")));
            }
            let len = buf.len().min(self.remaining);
            let this = &mut *self;
            match Pin::new(&mut this.inner).poll_write(cx, &buf[..len]) {
                Poll::Ready(Ok(n)) => {
                    this.remaining -= n;
                    Poll::Ready(Ok(n))
                }
                other => other,
            }
        }

        fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
            Pin::new(&mut self.inner).poll_flush(cx)
        }

        fn poll_shutdown(
            mut self: Pin<&mut Self>,
            cx: &mut Context<'_>,
        ) -> Poll<std::io::Result<()>> {
            Pin::new(&mut self.inner).poll_shutdown(cx)
        }
    }

    #[tokio::test]
    async fn test_failed_write_leaves_no_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("resume-1-1.pdf");
        let inner = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .unwrap();
        let writer = FailAfter {
            inner,
            remaining: 16,
        };

        let result = LocalStorage::write_or_remove(&path, writer, &[7u8; 4096]).await;

        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_successful_write_keeps_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("resume-1-1.pdf");
        let inner = fs::File::create(&path).await.unwrap();
        let writer = FailAfter {
            inner,
            remaining: 4096,
        };

        LocalStorage::write_or_remove(&path, writer, b"%PDF-1.4")
            .await
            .unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4");
    }

    #[tokio::test]
    async fn test_category_path_blocked_by_file() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();
        std::fs::write(dir.path().join("resumes"), b"not a directory").unwrap();

        let result = storage
            .put(UploadCategory::Resume, "resume-1-1.pdf", b"x".to_vec())
            .await;
        assert!(matches!(result, Err(StorageError::UploadFailed(_))));
    }

    #[tokio::test]
    async fn test_put_creates_category_dir_lazily() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        assert!(!dir.path().join("resumes").exists());

        let path = storage
            .put(UploadCategory::Resume, "resume-1-2.pdf", b"%PDF-1.4".to_vec())
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("resumes").join("resume-1-2.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4");
    }

    #[tokio::test]
    async fn test_put_never_overwrites() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        storage
            .put(UploadCategory::IdCard, "idCard-1-1.png", b"first".to_vec())
            .await
            .unwrap();
        let result = storage
            .put(UploadCategory::IdCard, "idCard-1-1.png", b"second".to_vec())
            .await;

        assert!(matches!(result, Err(StorageError::UploadFailed(_))));
        let kept = std::fs::read(dir.path().join("idcards").join("idCard-1-1.png")).unwrap();
        assert_eq!(kept, b"first");
    }

    #[tokio::test]
    async fn test_concurrent_first_writers_share_directory() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(LocalStorage::new(dir.path()).await.unwrap());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let storage = storage.clone();
                tokio::spawn(async move {
                    storage
                        .put(
                            UploadCategory::ProfilePhoto,
                            &format!("profilePhoto-1-{}.png", i),
                            vec![i as u8; 16],
                        )
                        .await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let count = std::fs::read_dir(dir.path().join("profiles")).unwrap().count();
        assert_eq!(count, 8);
    }

    #[tokio::test]
    async fn test_invalid_filenames_rejected() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        for name in ["", "../etc/passwd", "a/b.png", "a\\b.png", ".hidden"] {
            let result = storage.resolve(UploadCategory::Resume, name);
            assert!(matches!(result, Err(StorageError::InvalidKey(_))), "{name}");
        }

        let result = storage
            .put(UploadCategory::Resume, "../escape.pdf", b"x".to_vec())
            .await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
        assert!(!dir.path().join("escape.pdf").exists());
    }

    #[tokio::test]
    async fn test_delete_missing_path_is_noop() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let missing = dir.path().join("profiles").join("nope.png");
        assert!(storage.delete_path(&missing).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_existing_path() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let path = storage
            .put(UploadCategory::CoverLetter, "coverLetter-1-1.pdf", b"x".to_vec())
            .await
            .unwrap();
        storage.delete_path(&path).await.unwrap();

        assert!(!path.exists());
        assert!(!storage
            .exists(UploadCategory::CoverLetter, "coverLetter-1-1.pdf")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_delete_outside_root_rejected() {
        let root = tempdir().unwrap();
        let other = tempdir().unwrap();
        let storage = LocalStorage::new(root.path()).await.unwrap();

        let outside = other.path().join("keep.txt");
        std::fs::write(&outside, b"keep").unwrap();

        let result = storage.delete_path(&outside).await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
        assert!(outside.exists());
    }

    #[tokio::test]
    async fn test_stream_download_and_length() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();
        let data = b"stream download test".to_vec();

        storage
            .put(UploadCategory::CompanyDocument, "companyDocument-1-1.pdf", data.clone())
            .await
            .unwrap();

        assert_eq!(
            storage
                .content_length(UploadCategory::CompanyDocument, "companyDocument-1-1.pdf")
                .await
                .unwrap(),
            data.len() as u64
        );

        let mut stream = storage
            .download_stream(UploadCategory::CompanyDocument, "companyDocument-1-1.pdf")
            .await
            .unwrap();
        let mut downloaded = Vec::new();
        while let Some(chunk) = stream.next().await {
            downloaded.extend_from_slice(&chunk.unwrap());
        }
        assert_eq!(downloaded, data);
    }

    #[tokio::test]
    async fn test_download_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let result = storage
            .download_stream(UploadCategory::Resume, "resume-0-0.pdf")
            .await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }
}
