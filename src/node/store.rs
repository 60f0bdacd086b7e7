//! Flat-file blob storage for one node
//!
//! A blob is one file under the node's data directory, named by the
//! percent-encoded file id. Writes overwrite in place and deletes are
//! idempotent; there is no index, WAL or chunking here.

use crate::common::{encode_file_id, Result};
use bytes::Bytes;
use std::path::{Path, PathBuf};

pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    /// Open the store, creating the data directory if absent.
    pub async fn open(root: &Path) -> Result<Self> {
        tokio::fs::create_dir_all(root).await?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    fn blob_path(&self, file_id: &str) -> PathBuf {
        self.root.join(encode_file_id(file_id))
    }

    /// Write `data` under `file_id`, overwriting any prior blob of the
    /// same name.
    pub async fn write(&self, file_id: &str, data: &Bytes) -> Result<()> {
        tokio::fs::write(self.blob_path(file_id), data).await?;
        Ok(())
    }

    /// Read the blob, or `None` if absent.
    pub async fn read(&self, file_id: &str) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.blob_path(file_id)).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove the blob. "Already absent" is success: deletion is
    /// idempotent.
    pub async fn delete(&self, file_id: &str) -> Result<bool> {
        match tokio::fs::remove_file(self.blob_path(file_id)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Blob count and total bytes currently held.
    pub async fn stats(&self) -> Result<(u64, u64)> {
        let mut blobs = 0u64;
        let mut total_bytes = 0u64;

        let mut entries = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let meta = entry.metadata().await?;
            if meta.is_file() {
                blobs += 1;
                total_bytes += meta.len();
            }
        }

        Ok((blobs, total_bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_read_delete() {
        let dir = tempdir().unwrap();
        let store = BlobStore::open(dir.path()).await.unwrap();

        store.write("f.bin", &Bytes::from_static(b"hello")).await.unwrap();
        assert_eq!(store.read("f.bin").await.unwrap().unwrap(), b"hello");

        assert!(store.delete("f.bin").await.unwrap());
        assert!(store.read("f.bin").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = BlobStore::open(dir.path()).await.unwrap();

        store.write("f.bin", &Bytes::from_static(b"hello")).await.unwrap();
        assert!(store.delete("f.bin").await.unwrap());

        // Second delete of an already-absent blob still succeeds
        assert!(!store.delete("f.bin").await.unwrap());
        assert!(store.delete("never-existed.bin").await.is_ok());
    }

    #[tokio::test]
    async fn test_overwrite_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = BlobStore::open(dir.path()).await.unwrap();

        store.write("f.bin", &Bytes::from_static(b"v1")).await.unwrap();
        store.write("f.bin", &Bytes::from_static(b"v1")).await.unwrap();
        assert_eq!(store.read("f.bin").await.unwrap().unwrap(), b"v1");

        store.write("f.bin", &Bytes::from_static(b"v2")).await.unwrap();
        assert_eq!(store.read("f.bin").await.unwrap().unwrap(), b"v2");
    }

    #[tokio::test]
    async fn test_file_id_with_slash() {
        let dir = tempdir().unwrap();
        let store = BlobStore::open(dir.path()).await.unwrap();

        // Encoded on disk, so path separators cannot escape the root
        store
            .write("path/to/f.bin", &Bytes::from_static(b"x"))
            .await
            .unwrap();
        assert!(store.read("path/to/f.bin").await.unwrap().is_some());

        let (blobs, _) = store.stats().await.unwrap();
        assert_eq!(blobs, 1);
    }

    #[tokio::test]
    async fn test_stats() {
        let dir = tempdir().unwrap();
        let store = BlobStore::open(dir.path()).await.unwrap();

        store.write("a.bin", &Bytes::from_static(b"aaaa")).await.unwrap();
        store.write("b.bin", &Bytes::from_static(b"bb")).await.unwrap();

        let (blobs, total_bytes) = store.stats().await.unwrap();
        assert_eq!(blobs, 2);
        assert_eq!(total_bytes, 6);
    }
}
