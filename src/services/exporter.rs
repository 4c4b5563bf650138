use crate::constants::GPX_FILE_EXTENSION;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use std::path::PathBuf;

/// Delivers a finished GPX document somewhere durable.
#[async_trait]
pub trait FileExporter: Send + Sync {
    /// Write `document` under `file_stem` and return where it landed.
    async fn export(&self, file_stem: &str, document: &str) -> Result<PathBuf>;
}

/// Writes `.gpx` files into a single directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectoryExporter {
    dir: PathBuf,
}

impl DirectoryExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectoryExporter { dir: dir.into() }
    }
}

fn is_safe_file_stem(stem: &str) -> bool {
    !stem.is_empty()
        && stem
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[async_trait]
impl FileExporter for DirectoryExporter {
    async fn export(&self, file_stem: &str, document: &str) -> Result<PathBuf> {
        if !is_safe_file_stem(file_stem) {
            return Err(AppError::InvalidInput(format!(
                "invalid export file name '{}'",
                file_stem
            )));
        }

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            AppError::Export(format!(
                "Failed to create export directory '{}': {}",
                self.dir.display(),
                e
            ))
        })?;

        let path = self
            .dir
            .join(format!("{}.{}", file_stem, GPX_FILE_EXTENSION));

        tokio::fs::write(&path, document.as_bytes())
            .await
            .map_err(|e| AppError::Export(format!("Failed to write '{}': {}", path.display(), e)))?;

        tracing::info!(
            path = %path.display(),
            bytes = document.len(),
            "Exported GPX to {}",
            path.display()
        );

        Ok(path)
    }
}
