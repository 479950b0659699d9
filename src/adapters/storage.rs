use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// File system storage.
///
/// Reads take the path as given (absolute or relative to the working
/// directory), writes land under `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        tracing::debug!("Reading {}", path);
        let data = tokio::fs::read(path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tracing::debug!("Writing {} bytes to {}", data.len(), full_path.display());
        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().join("out"));

        tokio_test::block_on(async {
            storage
                .write_file("nested/addresses.csv", "a,b\n".as_bytes())
                .await
                .unwrap();

            let written = dir.path().join("out/nested/addresses.csv");
            let data = storage.read_file(written.to_str().unwrap()).await.unwrap();
            assert_eq!(data, b"a,b\n");
        });
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let storage = LocalStorage::new(".");
        let result = tokio_test::block_on(storage.read_file("/definitely/not/here.txt"));
        assert!(matches!(result, Err(crate::utils::error::EtlError::IoError(_))));
    }
}
