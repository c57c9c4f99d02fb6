use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs as async_fs;
use tracing::debug;

use crate::common::error::AreteError;
use crate::common::result::{AreteResult, ResultExt};
use crate::domain::entities::settings::SOLUTIONS_FILE_NAME;
use crate::domain::entities::solution::SolutionsList;

/// On-disk copy of the merged solutions list (`<cache>/solutions.yaml`)
#[derive(Debug, Clone)]
pub struct SolutionCache {
    cache_dir: PathBuf,
}

impl SolutionCache {
    /// Create a cache rooted at `cache_dir`
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Path of the cached solutions list
    pub fn solutions_file(&self) -> PathBuf {
        self.cache_dir.join(SOLUTIONS_FILE_NAME)
    }

    fn temp_file(&self) -> PathBuf {
        self.cache_dir.join(format!("{}.tmp", SOLUTIONS_FILE_NAME))
    }

    /// Read the cached list.
    ///
    /// A missing file is created empty and yields an empty list.
    pub async fn load(&self) -> AreteResult<SolutionsList> {
        let path = self.solutions_file();

        match async_fs::read_to_string(&path).await {
            Ok(content) => SolutionsList::from_yaml(&content).map_err(|e| match e {
                AreteError::ParseError { message, source } => AreteError::ParseError {
                    message: format!("{} ({})", message, path.display()),
                    source,
                },
                other => other,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "solutions cache missing, creating empty file");
                self.ensure_cache_dir().await?;
                async_fs::write(&path, "")
                    .await
                    .with_cache_error("Failed to create solutions cache", &path)?;
                Ok(SolutionsList::new())
            }
            Err(e) => Err(AreteError::cache_io_error_with_source(
                "Failed to read solutions cache",
                Some(path),
                e,
            )),
        }
    }

    /// Overwrite the cached list.
    ///
    /// The YAML is written to a temporary file next to the cache and renamed
    /// over it, so readers never see a partial file.
    pub async fn persist(&self, solutions: &SolutionsList) -> AreteResult<()> {
        let path = self.solutions_file();
        let temp_path = self.temp_file();
        let yaml_content = solutions.to_yaml()?;

        self.ensure_cache_dir().await?;

        async_fs::write(&temp_path, yaml_content)
            .await
            .with_cache_error("Failed to write solutions cache", &temp_path)?;

        if let Err(e) = async_fs::rename(&temp_path, &path).await {
            let _ = async_fs::remove_file(&temp_path).await;
            return Err(AreteError::cache_io_error_with_source(
                "Failed to replace solutions cache",
                Some(path),
                e,
            ));
        }

        debug!(path = %path.display(), count = solutions.len(), "solutions cache written");
        Ok(())
    }

    /// Remove a materialized solution directory if present.
    ///
    /// Returns `true` when something was removed.
    pub async fn clear_solution_dir(&self, dest: &Path) -> AreteResult<bool> {
        match async_fs::metadata(dest).await {
            Ok(metadata) => {
                if metadata.is_dir() {
                    async_fs::remove_dir_all(dest)
                        .await
                        .with_cache_error("Failed to remove existing solution directory", dest)?;
                } else {
                    async_fs::remove_file(dest)
                        .await
                        .with_cache_error("Failed to remove existing solution path", dest)?;
                }
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AreteError::cache_io_error_with_source(
                "Failed to inspect solution directory",
                Some(dest.to_path_buf()),
                e,
            )),
        }
    }

    async fn ensure_cache_dir(&self) -> AreteResult<()> {
        async_fs::create_dir_all(&self.cache_dir)
            .await
            .with_cache_error("Failed to create cache directory", &self.cache_dir)
    }
}
