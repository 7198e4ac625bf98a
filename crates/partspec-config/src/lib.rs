// partspec-config - Runtime configuration
//
// Supports configuration from multiple sources:
// 1. Environment variables (PARTSPEC_* prefix, highest priority)
// 2. Config file path from PARTSPEC_CONFIG env var
// 3. Default config file location (./partspec.toml)
// 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};

mod env_overrides;
mod sources;
mod validation;

pub use env_overrides::{apply_env_overrides, EnvSource, StdEnvSource, ENV_PREFIX};
pub use sources::{load_config, load_from_file_path};

/// Main runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl RuntimeConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        validation::validate_config(self)
    }
}

/// Storage backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fs: Option<FsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3: Option<S3Config>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Fs,
            fs: Some(FsConfig::default()),
            s3: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Fs,
    S3,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Fs => write!(f, "fs"),
            StorageBackend::S3 => write!(f, "s3"),
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fs" => Ok(StorageBackend::Fs),
            "s3" => Ok(StorageBackend::S3),
            other => Err(anyhow::anyhow!(
                "unknown storage backend '{other}' (expected 'fs' or 's3')"
            )),
        }
    }
}

/// Local filesystem storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FsConfig {
    pub path: String,
}

impl Default for FsConfig {
    fn default() -> Self {
        Self {
            path: "./data".to_string(),
        }
    }
}

/// S3-compatible object storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    pub bucket: String,

    #[serde(default = "default_s3_region")]
    pub region: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            region: default_s3_region(),
            endpoint: None,
        }
    }
}

fn default_s3_region() -> String {
    "us-east-1".to_string()
}

/// Fixed directory levels of the partition tree:
/// `{root}/{final_sub_dir}/{file_sub_dir}/...`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_layout_root")]
    pub root: String,

    #[serde(default = "default_final_sub_dir")]
    pub final_sub_dir: String,

    #[serde(default = "default_file_sub_dir")]
    pub file_sub_dir: String,
}

fn default_layout_root() -> String {
    "warehouse".to_string()
}

fn default_final_sub_dir() -> String {
    "final".to_string()
}

fn default_file_sub_dir() -> String {
    "landed".to_string()
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            root: default_layout_root(),
            final_sub_dir: default_final_sub_dir(),
            file_sub_dir: default_file_sub_dir(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        RuntimeConfig::default().validate().unwrap();
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: RuntimeConfig = toml::from_str(
            r#"
            [storage]
            backend = "s3"

            [storage.s3]
            bucket = "lake"

            [layout]
            root = "daas"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::S3);
        assert_eq!(config.storage.s3.unwrap().region, "us-east-1");
        assert_eq!(config.layout.root, "daas");
        assert_eq!(config.layout.final_sub_dir, "final");
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("FS".parse::<StorageBackend>().unwrap(), StorageBackend::Fs);
        assert!("gcs".parse::<StorageBackend>().is_err());
    }
}
