use anyhow::{Context, Result};
use bytesize::ByteSize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Which store backs the chunk cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// foyer hybrid cache: memory tier spilling to a disk tier
    #[default]
    Hybrid,
    /// Plain in-memory map without eviction
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Store used for chunk payloads
    pub backend: Backend,

    /// Directory of the disk tier (hybrid backend only)
    pub directory: PathBuf,

    /// Memory tier capacity, weighed as encoded key size plus payload size
    #[serde(with = "bytesize_serde")]
    pub memory_capacity: ByteSize,

    /// Disk tier capacity
    #[serde(with = "bytesize_serde")]
    pub disk_capacity: ByteSize,

    /// Disk tier block size
    #[serde(with = "bytesize_serde")]
    pub block_size: ByteSize,

    /// Number of shards of the memory tier
    pub shards: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            directory: PathBuf::from("/var/cache/chunk-cache"),
            memory_capacity: ByteSize::mib(64),
            disk_capacity: ByteSize::mib(256),
            block_size: ByteSize::mib(1),
            shards: 16,
        }
    }
}

impl CacheConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: CacheConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse YAML config file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.memory_capacity.as_u64() == 0 {
            anyhow::bail!("memory_capacity must be greater than 0");
        }

        if self.shards == 0 {
            anyhow::bail!("shards must be greater than 0");
        }

        if self.backend == Backend::Hybrid {
            if self.disk_capacity.as_u64() == 0 {
                anyhow::bail!("disk_capacity must be greater than 0");
            }

            if self.block_size.as_u64() == 0 {
                anyhow::bail!("block_size must be greater than 0");
            }

            if self.block_size > self.disk_capacity {
                anyhow::bail!(
                    "block_size ({}) must not exceed disk_capacity ({})",
                    self.block_size,
                    self.disk_capacity
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = CacheConfig::default();
        config.validate().unwrap();
        assert_eq!(config.backend, Backend::Hybrid);
    }

    #[test]
    fn parses_sizes_with_units() {
        let yaml = r#"
backend: hybrid
directory: /tmp/chunks
memory_capacity: "32 MiB"
disk_capacity: "1 GiB"
block_size: "512 KiB"
shards: 8
"#;
        let config: CacheConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.directory, PathBuf::from("/tmp/chunks"));
        assert_eq!(config.memory_capacity, ByteSize::mib(32));
        assert_eq!(config.disk_capacity, ByteSize::gib(1));
        assert_eq!(config.block_size, ByteSize::kib(512));
        assert_eq!(config.shards, 8);
        config.validate().unwrap();
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: CacheConfig = serde_yaml::from_str("backend: memory\n").unwrap();

        assert_eq!(config.backend, Backend::Memory);
        assert_eq!(config.shards, CacheConfig::default().shards);
        assert_eq!(config.memory_capacity, CacheConfig::default().memory_capacity);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = serde_yaml::from_str::<CacheConfig>("workers: 4\n").unwrap_err();
        assert!(err.to_string().contains("workers"));
    }

    #[test]
    fn rejects_zero_shards() {
        let config = CacheConfig {
            shards: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn memory_backend_ignores_disk_settings() {
        let config = CacheConfig {
            backend: Backend::Memory,
            disk_capacity: ByteSize::b(0),
            block_size: ByteSize::b(0),
            ..Default::default()
        };
        config.validate().unwrap();
    }

    #[test]
    fn rejects_block_larger_than_disk() {
        let config = CacheConfig {
            disk_capacity: ByteSize::mib(1),
            block_size: ByteSize::mib(4),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("block_size"));
    }

    #[test]
    fn from_yaml_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "shards: 0").unwrap();

        let err = CacheConfig::from_yaml_file(file.path()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains(&file.path().display().to_string()));
        assert!(message.contains("shards must be greater than 0"));
    }

    #[test]
    fn from_yaml_file_loads_valid_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "backend: memory").unwrap();
        writeln!(file, "memory_capacity: \"8 MiB\"").unwrap();

        let config = CacheConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.backend, Backend::Memory);
        assert_eq!(config.memory_capacity, ByteSize::mib(8));
    }
}
