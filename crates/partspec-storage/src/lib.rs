//! partspec-storage - Storage collaborator for partition directories
//!
//! A thin wrapper over an OpenDAL operator exposing the handful of
//! operations the partition tooling needs: list, exists, delete, rename,
//! and directory create/remove helpers. One abstraction across local
//! filesystem and S3-compatible backends.

use std::time::Duration;

use opendal::Operator;
use partspec_config::{StorageBackend, StorageConfig};
use tracing::{debug, info, warn};

mod error;

pub use error::{Result, StorageError};

/// Storage handle. Cheap to clone; no state beyond the operator.
#[derive(Clone)]
pub struct Storage {
    operator: Operator,
    retry_wait: Option<Duration>,
}

impl Storage {
    /// Build a storage handle from configuration.
    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        let operator = match config.backend {
            StorageBackend::Fs => {
                let fs = config
                    .fs
                    .as_ref()
                    .ok_or(StorageError::MissingBackendConfig { backend: "fs" })?;
                let builder = opendal::services::Fs::default().root(&fs.path);
                Operator::new(builder)
                    .map_err(|source| StorageError::Backend {
                        backend: "fs",
                        source,
                    })?
                    .finish()
            }
            StorageBackend::S3 => {
                let s3 = config
                    .s3
                    .as_ref()
                    .ok_or(StorageError::MissingBackendConfig { backend: "s3" })?;
                let mut builder = opendal::services::S3::default()
                    .bucket(&s3.bucket)
                    .region(&s3.region);
                if let Some(endpoint) = &s3.endpoint {
                    builder = builder.endpoint(endpoint);
                }
                Operator::new(builder)
                    .map_err(|source| StorageError::Backend {
                        backend: "s3",
                        source,
                    })?
                    .finish()
            }
        };

        Ok(Self::from_operator(operator))
    }

    /// Wrap an existing operator (tests use the memory service here).
    pub fn from_operator(operator: Operator) -> Self {
        Self {
            operator,
            retry_wait: None,
        }
    }

    /// Fix the pause between rename retries instead of the default
    /// 5-15 second jitter.
    pub fn with_retry_wait(mut self, wait: Duration) -> Self {
        self.retry_wait = Some(wait);
        self
    }

    /// Names of the immediate children of a directory, sorted.
    ///
    /// This is how the territory catalog is discovered: the children of
    /// the first sub-file-type's directory are the known territory codes.
    pub async fn list_names(&self, path: &str) -> Result<Vec<String>> {
        let dir = dir_path(path);
        let entries = self
            .operator
            .list(&dir)
            .await
            .map_err(|source| StorageError::List {
                path: dir.clone(),
                source,
            })?;

        let mut names: Vec<String> = entries
            .iter()
            .filter(|entry| entry.path() != dir)
            .map(|entry| entry.name().trim_end_matches('/').to_string())
            .filter(|name| !name.is_empty())
            .collect();
        names.sort();
        Ok(names)
    }

    /// Whether a path exists. Directory checks must use the
    /// trailing-slash form OpenDAL expects; the dir helpers below do.
    pub async fn exists(&self, path: &str) -> Result<bool> {
        match self.operator.stat(path).await {
            Ok(_) => Ok(true),
            Err(err) if err.kind() == opendal::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StorageError::Stat {
                path: path.to_string(),
                source,
            }),
        }
    }

    /// Delete a path recursively. Deleting a missing path is not an error.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.operator
            .remove_all(path)
            .await
            .map_err(|source| StorageError::Delete {
                path: path.to_string(),
                source,
            })
    }

    /// Rename a single object.
    pub async fn rename(&self, from: &str, to: &str) -> Result<()> {
        self.operator
            .rename(from, to)
            .await
            .map_err(|source| StorageError::Rename {
                from: from.to_string(),
                to: to.to_string(),
                source,
            })
    }

    /// Create a directory, parents included.
    pub async fn create_dir(&self, path: &str) -> Result<()> {
        let dir = dir_path(path);
        self.operator
            .create_dir(&dir)
            .await
            .map_err(|source| StorageError::CreateDir { path: dir, source })
    }

    /// Create a directory unless it already exists. Returns whether it
    /// was created.
    pub async fn create_dir_if_missing(&self, path: &str) -> Result<bool> {
        if self.exists(&dir_path(path)).await? {
            return Ok(false);
        }
        self.create_dir(path).await?;
        info!(path, "created storage directory");
        Ok(true)
    }

    /// Remove a directory recursively if it exists. Returns whether it
    /// was removed.
    pub async fn remove_dir_if_exists(&self, path: &str) -> Result<bool> {
        if !self.exists(&dir_path(path)).await? {
            return Ok(false);
        }
        self.delete(&dir_path(path)).await?;
        info!(path, "removed storage directory");
        Ok(true)
    }

    /// Move an object, retrying on failure.
    ///
    /// An already-existing target counts as success; the source is then
    /// deleted when `remove_source` is set. Failed attempts pause for
    /// 5-15 seconds (or the configured wait) before retrying. Returns
    /// whether the move took effect within `retries` extra attempts.
    pub async fn rename_with_retry(
        &self,
        from: &str,
        to: &str,
        remove_source: bool,
        retries: u32,
    ) -> bool {
        for attempt in 0..=retries {
            match self.try_rename(from, to, remove_source).await {
                Ok(()) => return true,
                Err(err) => {
                    warn!(from, to, attempt, error = %err, "rename attempt failed");
                }
            }
            if attempt < retries {
                self.retry_pause(from, to).await;
            }
        }
        false
    }

    async fn try_rename(&self, from: &str, to: &str, remove_source: bool) -> Result<()> {
        if self.exists(to).await? {
            debug!(to, "rename target already exists");
            if remove_source && self.exists(from).await? {
                info!(from, "removing source since target already exists");
                self.delete(from).await?;
            }
            return Ok(());
        }
        self.rename(from, to).await
    }

    async fn retry_pause(&self, from: &str, to: &str) {
        let wait = self.retry_wait.unwrap_or_else(|| {
            use rand::Rng;
            Duration::from_secs(rand::thread_rng().gen_range(5..15))
        });
        warn!(from, to, wait_secs = wait.as_secs(), "waiting before rename retry");
        tokio::time::sleep(wait).await;
    }
}

/// OpenDAL addresses directories with a trailing slash.
fn dir_path(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}
