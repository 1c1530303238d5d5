use axum::body::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;

/// a key to store uploaded objects under
///
/// renders to the path relative to the upload directory, this relative path is
/// what gets persisted on the database, the serving host is resolved only when
/// creating API responses
///
/// eg: `vehicles/1723370096123-2890151430.jpeg`
#[derive(Clone)]
pub struct StorageKey {
    /// the "folder" a file using this key will be stored into
    pub folder: String,

    /// filename with extension, eg: `1723370096123-2890151430.jpeg`
    pub filename: String,
}

impl From<StorageKey> for String {
    fn from(v: StorageKey) -> Self {
        format!("{}/{}", v.folder, v.filename)
    }
}

/// The upload storage, a directory on the local disk exposed to clients
/// under a static path prefix by the http router
#[derive(Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: PathBuf) -> Self {
        Storage { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// creates the upload directory if it does not exist
    ///
    /// # PANICS
    /// panics if the directory cannot be created, the application cannot
    /// serve uploads without its storage so this aborts startup
    pub async fn init(&self) {
        fs::create_dir_all(&self.root).await.unwrap_or_else(|_| {
            panic!(
                "[STORAGE] failed to create upload directory {}",
                self.root.display()
            )
        });
    }

    pub async fn put(&self, key: String, bytes: Bytes) -> std::io::Result<()> {
        let path = self.root.join(&key);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let result = fs::write(&path, &bytes).await;

        if result.is_err() {
            tracing::error!("[STORAGE] failed to store object: {}", key);
        }

        result
    }

    pub async fn delete(&self, key: String) -> std::io::Result<()> {
        let result = fs::remove_file(self.root.join(&key)).await;

        if result.is_err() {
            tracing::error!("[STORAGE] failed to delete object: {}", key)
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_core::{OsRng, RngCore};

    fn test_storage() -> Storage {
        let dir = std::env::temp_dir().join(format!("carlot-storage-test-{}", OsRng.next_u32()));
        Storage::new(dir)
    }

    #[tokio::test]
    async fn put_then_delete_roundtrip() {
        let storage = test_storage();
        storage.init().await;

        let key = String::from(StorageKey {
            folder: String::from("vehicles"),
            filename: String::from("1-1.jpeg"),
        });

        storage
            .put(key.clone(), Bytes::from_static(b"not really a jpeg"))
            .await
            .unwrap();

        assert!(storage.root().join("vehicles/1-1.jpeg").is_file());

        storage.delete(key).await.unwrap();
        assert!(!storage.root().join("vehicles/1-1.jpeg").exists());

        tokio::fs::remove_dir_all(storage.root()).await.unwrap();
    }

    #[tokio::test]
    async fn delete_missing_object_errors() {
        let storage = test_storage();
        storage.init().await;

        assert!(storage.delete(String::from("vehicles/nope.png")).await.is_err());

        tokio::fs::remove_dir_all(storage.root()).await.unwrap();
    }
}
