use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Local};

use crate::PorticoError;

/// Name under which the current API description is kept.
pub const DOCUMENT_FILE_NAME: &str = "swagger.yaml";

/// Holds the one API description the viewer displays.
#[async_trait]
pub trait DocumentStorage: Send + Sync {
    async fn read(&self) -> Result<Option<Bytes>, PorticoError>;

    /// Replaces the current document, keeping the previous one as a
    /// timestamped backup. Returns the backup location, if one was made.
    async fn replace(&self, contents: Bytes) -> Result<Option<PathBuf>, PorticoError>;
}

#[derive(Clone, Debug)]
pub struct FileDocumentStorage {
    dir: PathBuf,
}

impl FileDocumentStorage {
    pub async fn open(dir: &Path) -> Result<Self, PorticoError> {
        tokio::fs::create_dir_all(dir).await?;

        Ok(Self {
            dir: dir.to_owned(),
        })
    }

    pub fn document_path(&self) -> PathBuf {
        self.dir.join(DOCUMENT_FILE_NAME)
    }

    fn backup_path(&self, at: DateTime<Local>) -> PathBuf {
        self.dir
            .join(format!("swagger_{}.yaml", at.format("%Y%m%d%H%M%S")))
    }
}

#[async_trait]
impl DocumentStorage for FileDocumentStorage {
    async fn read(&self) -> Result<Option<Bytes>, PorticoError> {
        match tokio::fs::read(self.document_path()).await {
            Ok(contents) => Ok(Some(contents.into())),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    async fn replace(&self, contents: Bytes) -> Result<Option<PathBuf>, PorticoError> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|error| {
            error!("{}", error);
            PorticoError::Storage("Failed to create uploads directory".into())
        })?;

        let document = self.document_path();
        let backup = if tokio::fs::metadata(&document).await.is_ok() {
            let backup = self.backup_path(Local::now());
            tokio::fs::rename(&document, &backup)
                .await
                .map_err(|error| {
                    PorticoError::Storage(format!("Failed to backup existing file: {}", error))
                })?;
            info!("Backed up previous document to {}", backup.display());
            Some(backup)
        } else {
            None
        };

        tokio::fs::write(&document, &contents)
            .await
            .map_err(|error| PorticoError::Storage(format!("Failed to save file: {}", error)))?;

        Ok(backup)
    }
}
