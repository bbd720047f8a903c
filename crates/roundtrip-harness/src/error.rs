//! Error types for the round-trip harness.

use crate::path::StructuralPath;
use std::fmt;
use thiserror::Error;

/// Boxed error from the codec under test.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors reported by a [`Codec`](crate::codec::Codec).
#[derive(Error, Debug)]
pub enum CodecError {
    /// IO error while writing to the sink.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The value could not be encoded.
    #[error("Encode error: {0}")]
    Encode(#[source] BoxError),

    /// The input could not be decoded; `path` names the element being read.
    #[error("Decode error at {path}: {source}")]
    Decode {
        path: StructuralPath,
        #[source]
        source: BoxError,
    },

    /// The cancellation token fired at an I/O boundary.
    #[error("Operation cancelled")]
    Cancelled,

    /// The blocking task running the streaming decoder failed.
    #[error("Streaming decoder task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl CodecError {
    /// Path of the failing element, for decode errors.
    pub fn path(&self) -> Option<&StructuralPath> {
        match self {
            CodecError::Decode { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Which deserialization path failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStage {
    /// Parsing the fully materialized text.
    Buffered,
    /// Parsing incrementally from the byte source.
    Streaming,
}

impl fmt::Display for ParseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseStage::Buffered => f.write_str("buffered"),
            ParseStage::Streaming => f.write_str("streaming"),
        }
    }
}

/// Errors that end a round-trip run.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// Writing the serialized buffer failed; nothing was compared.
    #[error("Serialization failed: {0}")]
    Serialization(#[source] CodecError),

    /// Scratch storage could not be created, rewound, or read.
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// The serialized buffer could not be materialized as text.
    #[error("Serialized buffer is not valid UTF-8: {0}")]
    Snapshot(#[from] std::string::FromUtf8Error),

    /// One of the deserialization paths rejected the buffer.
    #[error("{stage} parse failed at {path}: {source}")]
    Parse {
        stage: ParseStage,
        path: StructuralPath,
        #[source]
        source: CodecError,
    },

    /// Both paths succeeded but produced different values.
    #[error("Buffered and streaming results diverge at {path}: buffered {buffered}, streamed {streamed}")]
    Divergence {
        path: StructuralPath,
        buffered: String,
        streamed: String,
    },

    /// The decoded value differs from the value that was serialized.
    #[error("Decoded value differs from the original at {path}: expected {expected}, got {actual}")]
    OriginalMismatch {
        path: StructuralPath,
        expected: String,
        actual: String,
    },

    /// The run was cancelled at an I/O boundary.
    #[error("Round trip cancelled")]
    Cancelled,
}

impl HarnessError {
    /// Structural path of the failure, when the failure is tied to an element.
    pub fn failing_path(&self) -> Option<&StructuralPath> {
        match self {
            HarnessError::Parse { path, .. }
            | HarnessError::Divergence { path, .. }
            | HarnessError::OriginalMismatch { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Index of the top-level element the failure points into.
    pub fn failing_index(&self) -> Option<usize> {
        self.failing_path().and_then(StructuralPath::first_index)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, HarnessError::Cancelled)
    }
}

/// Errors loading a harness configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
