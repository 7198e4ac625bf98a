//! Error types for the storage crate

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur against the storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// Operator construction failed
    #[error("failed to build {backend} storage operator: {source}")]
    Backend {
        backend: &'static str,
        #[source]
        source: opendal::Error,
    },

    /// Backend selected without its configuration section
    #[error("storage backend '{backend}' requires the [storage.{backend}] configuration section")]
    MissingBackendConfig { backend: &'static str },

    /// Listing a directory failed
    #[error("failed to list '{path}': {source}")]
    List {
        path: String,
        #[source]
        source: opendal::Error,
    },

    /// Stat/existence check failed
    #[error("failed to stat '{path}': {source}")]
    Stat {
        path: String,
        #[source]
        source: opendal::Error,
    },

    /// Recursive delete failed
    #[error("failed to delete '{path}': {source}")]
    Delete {
        path: String,
        #[source]
        source: opendal::Error,
    },

    /// Rename failed
    #[error("failed to rename '{from}' to '{to}': {source}")]
    Rename {
        from: String,
        to: String,
        #[source]
        source: opendal::Error,
    },

    /// Directory creation failed
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        path: String,
        #[source]
        source: opendal::Error,
    },
}
