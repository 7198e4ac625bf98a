// Environment-variable overrides (highest priority config source)

use crate::{FsConfig, RuntimeConfig, S3Config, StorageBackend};
use anyhow::{Context, Result};

pub const ENV_PREFIX: &str = "PARTSPEC_";

/// Abstraction over environment-variable lookups so tests can supply their
/// own source of overrides without touching process state.
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// Process environment, keys prefixed with `PARTSPEC_`.
pub struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(format!("{ENV_PREFIX}{key}")).ok()
    }
}

/// Apply environment-variable overrides to the runtime config.
pub fn apply_env_overrides<E: EnvSource>(config: &mut RuntimeConfig, env: &E) -> Result<()> {
    // Storage backend
    if let Some(backend) = env.get("STORAGE_BACKEND") {
        config.storage.backend = backend
            .parse::<StorageBackend>()
            .context("Invalid PARTSPEC_STORAGE_BACKEND value")?;
    }

    // Filesystem storage
    if let Some(path) = env.get("STORAGE_PATH") {
        config.storage.fs.get_or_insert_with(FsConfig::default).path = path;
    }

    // S3 storage
    if let Some(bucket) = env.get("S3_BUCKET") {
        ensure_s3(config).bucket = bucket;
    }
    if let Some(region) = env.get("S3_REGION") {
        ensure_s3(config).region = region;
    }
    if let Some(endpoint) = env.get("S3_ENDPOINT") {
        ensure_s3(config).endpoint = Some(endpoint);
    }

    // Layout
    if let Some(root) = env.get("ROOT") {
        config.layout.root = root;
    }
    if let Some(final_sub_dir) = env.get("FINAL_SUB_DIR") {
        config.layout.final_sub_dir = final_sub_dir;
    }
    if let Some(file_sub_dir) = env.get("FILE_SUB_DIR") {
        config.layout.file_sub_dir = file_sub_dir;
    }

    // Logging
    if let Some(level) = env.get("LOG_LEVEL") {
        config.log.level = level;
    }

    Ok(())
}

fn ensure_s3(config: &mut RuntimeConfig) -> &mut S3Config {
    config.storage.s3.get_or_insert_with(S3Config::default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FakeEnv(HashMap<&'static str, &'static str>);

    impl EnvSource for FakeEnv {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|v| v.to_string())
        }
    }

    #[test]
    fn test_overrides_beat_existing_values() {
        let mut config = RuntimeConfig::default();
        config.layout.root = "from-file".to_string();

        let env = FakeEnv(HashMap::from([
            ("ROOT", "from-env"),
            ("STORAGE_BACKEND", "s3"),
            ("S3_BUCKET", "lake"),
            ("LOG_LEVEL", "debug"),
        ]));
        apply_env_overrides(&mut config, &env).unwrap();

        assert_eq!(config.layout.root, "from-env");
        assert_eq!(config.storage.backend, StorageBackend::S3);
        assert_eq!(config.storage.s3.unwrap().bucket, "lake");
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_absent_vars_leave_config_untouched() {
        let mut config = RuntimeConfig::default();
        apply_env_overrides(&mut config, &FakeEnv(HashMap::new())).unwrap();
        assert_eq!(config.layout.root, "warehouse");
    }

    #[test]
    fn test_invalid_backend_is_rejected() {
        let mut config = RuntimeConfig::default();
        let env = FakeEnv(HashMap::from([("STORAGE_BACKEND", "gcs")]));
        assert!(apply_env_overrides(&mut config, &env).is_err());
    }
}
