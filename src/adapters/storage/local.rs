//! Local directory store
//!
//! In place mode wipes the target directory and writes straight into it, so
//! readers can observe an empty or partial directory during a run. Staging
//! mode writes into a sibling `<dir>.staging` directory and swaps it in on
//! commit; a failed run then leaves the previous output untouched.

use super::traits::OutputStore;
use crate::domain::{GeotitresError, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

const STAGING_SUFFIX: &str = ".staging";

/// Output store backed by a directory on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalDirectory {
    target: PathBuf,
    staging: Option<PathBuf>,
}

impl LocalDirectory {
    /// Store writing directly into `target`
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            staging: None,
        }
    }

    /// Store writing into a sibling staging directory, swapped in on commit
    pub fn staged(target: impl Into<PathBuf>) -> Self {
        let target = target.into();
        let mut name = target
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(STAGING_SUFFIX);
        let staging = target.with_file_name(name);

        Self {
            target,
            staging: Some(staging),
        }
    }

    /// Directory the final output lives in
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Directory files are written to during a run
    pub fn working_dir(&self) -> &Path {
        self.staging.as_deref().unwrap_or(&self.target)
    }
}

#[async_trait]
impl OutputStore for LocalDirectory {
    async fn reset(&self) -> Result<()> {
        let dir = self.working_dir();

        remove_dir_if_exists(dir).await?;
        fs::create_dir_all(dir)
            .await
            .map_err(|e| storage_error("create", dir, e))?;

        tracing::debug!(directory = %dir.display(), "Output directory reset");
        Ok(())
    }

    async fn write(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.working_dir().join(name);
        fs::write(&path, bytes)
            .await
            .map_err(|e| storage_error("write", &path, e))?;

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "File written");
        Ok(())
    }

    async fn commit(&self) -> Result<()> {
        let Some(staging) = &self.staging else {
            return Ok(());
        };

        remove_dir_if_exists(&self.target).await?;
        fs::rename(staging, &self.target)
            .await
            .map_err(|e| storage_error("swap in", &self.target, e))?;

        tracing::debug!(
            staging = %staging.display(),
            target = %self.target.display(),
            "Staging directory swapped into place"
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.target.display().to_string()
    }
}

async fn remove_dir_if_exists(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(storage_error("remove", dir, e)),
    }
}

fn storage_error(action: &str, path: &Path, err: std::io::Error) -> GeotitresError {
    GeotitresError::Storage(format!("Failed to {action} {}: {err}", path.display()))
}
