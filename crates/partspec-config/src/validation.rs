// Configuration validation
//
// Validates that required fields are present and values are sensible

use crate::{LayoutConfig, RuntimeConfig, StorageBackend, StorageConfig};
use anyhow::{bail, Result};
use tracing::warn;

pub fn validate_config(config: &RuntimeConfig) -> Result<()> {
    validate_storage_config(&config.storage)?;
    validate_layout_config(&config.layout)?;
    Ok(())
}

fn validate_storage_config(config: &StorageConfig) -> Result<()> {
    match config.backend {
        StorageBackend::Fs => {
            let Some(fs) = config.fs.as_ref() else {
                bail!("storage.fs is required for the fs backend");
            };
            if fs.path.is_empty() {
                bail!("storage.fs.path must not be empty");
            }
        }
        StorageBackend::S3 => {
            let Some(s3) = config.s3.as_ref() else {
                bail!("storage.s3 is required for the s3 backend");
            };
            if s3.bucket.is_empty() {
                bail!("storage.s3.bucket must not be empty");
            }
            if s3.region.is_empty() {
                bail!("storage.s3.region must not be empty");
            }
            if let Some(endpoint) = &s3.endpoint {
                if endpoint.starts_with("http://") {
                    warn!(%endpoint, "storage.s3.endpoint is not using TLS");
                }
            }
        }
    }

    Ok(())
}

fn validate_layout_config(config: &LayoutConfig) -> Result<()> {
    // Each level is a single directory name inside the storage operator
    for (field, value) in [
        ("layout.root", &config.root),
        ("layout.final_sub_dir", &config.final_sub_dir),
        ("layout.file_sub_dir", &config.file_sub_dir),
    ] {
        if value.is_empty() {
            bail!("{field} must not be empty");
        }
        if value.contains('/') {
            bail!("{field} must be a single path component, got '{value}'");
        }
    }

    Ok(())
}
