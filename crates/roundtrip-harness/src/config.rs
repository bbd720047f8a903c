//! Configuration types for round-trip runs.

use crate::codec::{JsonCodec, DEFAULT_READ_BUFFER_SIZE, DEFAULT_WRITE_CHUNK_SIZE};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the serialized buffer lives during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageKind {
    /// In-memory buffer.
    #[default]
    Memory,
    /// Scratch file, in `dir` or the system temp directory.
    TempFile {
        #[serde(default)]
        dir: Option<PathBuf>,
    },
}

/// Configuration for a round-trip run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Scratch storage backend.
    pub storage: StorageKind,
    /// Bytes per write when serializing.
    pub write_chunk_size: usize,
    /// Buffer size of the streaming reader.
    pub stream_buffer_size: usize,
    /// Emit indented JSON.
    pub pretty: bool,
    /// Also compare the decoded value against the value that was serialized.
    pub compare_with_original: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            storage: StorageKind::Memory,
            write_chunk_size: DEFAULT_WRITE_CHUNK_SIZE,
            stream_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            pretty: false,
            compare_with_original: true,
        }
    }
}

impl HarnessConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Set the storage backend.
    pub fn with_storage(mut self, storage: StorageKind) -> Self {
        self.storage = storage;
        self
    }

    /// Use a scratch file in the system temp directory.
    pub fn with_temp_file(self) -> Self {
        self.with_storage(StorageKind::TempFile { dir: None })
    }

    /// Set the bytes per write when serializing.
    pub fn with_write_chunk_size(mut self, size: usize) -> Self {
        self.write_chunk_size = size;
        self
    }

    /// Set the streaming reader buffer size.
    pub fn with_stream_buffer_size(mut self, size: usize) -> Self {
        self.stream_buffer_size = size;
        self
    }

    /// Enable or disable indented output.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Enable or disable the comparison against the original value.
    pub fn with_compare_with_original(mut self, enabled: bool) -> Self {
        self.compare_with_original = enabled;
        self
    }

    /// JSON codec configured from these settings.
    pub fn json_codec(&self) -> JsonCodec {
        JsonCodec::new()
            .with_write_chunk_size(self.write_chunk_size)
            .with_read_buffer_size(self.stream_buffer_size)
            .with_pretty(self.pretty)
    }
}
