//! The codec under test and its JSON implementation.
//!
//! A [`Codec`] exposes one serializer and two independent deserializers: a buffered one
//! over fully materialized text, and a streaming one that pulls bytes incrementally from
//! an async source. The harness treats the codec purely through this trait.

use crate::cancel::{until_cancelled, CancellableReader};
use crate::error::CodecError;
use crate::path::StructuralPath;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::io::SyncIoBridge;
use tokio_util::sync::CancellationToken;

/// Default size of each write issued to the sink.
pub const DEFAULT_WRITE_CHUNK_SIZE: usize = 16 * 1024;

/// Default buffer size of the streaming reader.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 8192;

/// Serializer plus buffered and streaming deserializers.
#[async_trait]
pub trait Codec: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Serialize `value` into `sink`, checking `cancel` before every write.
    ///
    /// Returns the number of bytes written. The sink is flushed before returning.
    async fn serialize<T, W>(
        &self,
        value: &T,
        sink: &mut W,
        cancel: &CancellationToken,
    ) -> Result<u64, CodecError>
    where
        T: Serialize + Sync + ?Sized,
        W: AsyncWrite + Unpin + Send + ?Sized;

    /// Deserialize from fully materialized text.
    fn deserialize_str<T: DeserializeOwned>(&self, text: &str) -> Result<T, CodecError>;

    /// Deserialize incrementally from `source`, checking `cancel` before every read.
    async fn deserialize_stream<T, R>(
        &self,
        source: R,
        cancel: CancellationToken,
    ) -> Result<T, CodecError>
    where
        T: DeserializeOwned + Send + 'static,
        R: AsyncRead + Unpin + Send + 'static;
}

/// `serde_json` codec.
///
/// The streaming path runs `serde_json::Deserializer::from_reader` on the blocking pool,
/// fed through a `BufReader` of `read_buffer_size` bytes over the async source. Small
/// buffer sizes move the read boundaries around inside multi-byte sequences.
#[derive(Debug, Clone)]
pub struct JsonCodec {
    /// Bytes per write to the sink.
    pub write_chunk_size: usize,
    /// Bytes per read from the source on the streaming path.
    pub read_buffer_size: usize,
    /// Emit indented JSON.
    pub pretty: bool,
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self {
            write_chunk_size: DEFAULT_WRITE_CHUNK_SIZE,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            pretty: false,
        }
    }
}

impl JsonCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bytes per write to the sink.
    pub fn with_write_chunk_size(mut self, size: usize) -> Self {
        self.write_chunk_size = size;
        self
    }

    /// Set the streaming reader buffer size.
    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size;
        self
    }

    /// Enable or disable indented output.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// Deserialize one value and require that only whitespace follows it.
fn decode<'de, T, R>(de: &mut serde_json::Deserializer<R>) -> Result<T, CodecError>
where
    T: DeserializeOwned,
    R: serde_json::de::Read<'de>,
{
    let value = serde_path_to_error::deserialize(&mut *de).map_err(|err| {
        let path = StructuralPath::from(err.path());
        CodecError::Decode {
            path,
            source: Box::new(err.into_inner()),
        }
    })?;
    de.end().map_err(|err| CodecError::Decode {
        path: StructuralPath::root(),
        source: Box::new(err),
    })?;
    Ok(value)
}

#[async_trait]
impl Codec for JsonCodec {
    fn name(&self) -> &'static str {
        "serde_json"
    }

    async fn serialize<T, W>(
        &self,
        value: &T,
        sink: &mut W,
        cancel: &CancellationToken,
    ) -> Result<u64, CodecError>
    where
        T: Serialize + Sync + ?Sized,
        W: AsyncWrite + Unpin + Send + ?Sized,
    {
        let encoded = if self.pretty {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        };
        let bytes = encoded.map_err(|err| CodecError::Encode(Box::new(err)))?;

        for chunk in bytes.chunks(self.write_chunk_size.max(1)) {
            until_cancelled(cancel, sink.write_all(chunk))
                .await
                .ok_or(CodecError::Cancelled)??;
        }
        until_cancelled(cancel, sink.flush())
            .await
            .ok_or(CodecError::Cancelled)??;

        Ok(bytes.len() as u64)
    }

    fn deserialize_str<T: DeserializeOwned>(&self, text: &str) -> Result<T, CodecError> {
        let mut de = serde_json::Deserializer::from_str(text);
        decode(&mut de)
    }

    async fn deserialize_stream<T, R>(
        &self,
        source: R,
        cancel: CancellationToken,
    ) -> Result<T, CodecError>
    where
        T: DeserializeOwned + Send + 'static,
        R: AsyncRead + Unpin + Send + 'static,
    {
        let bridge = SyncIoBridge::new(CancellableReader::new(source, cancel.clone()));
        let buffer_size = self.read_buffer_size.max(1);

        let result = tokio::task::spawn_blocking(move || {
            let reader = std::io::BufReader::with_capacity(buffer_size, bridge);
            let mut de = serde_json::Deserializer::from_reader(reader);
            decode::<T, _>(&mut de)
        })
        .await?;

        match result {
            Err(err) if cancel.is_cancelled() && is_read_failure(&err) => {
                Err(CodecError::Cancelled)
            }
            other => other,
        }
    }
}

/// Whether `err` came from the source failing a read rather than from the data itself.
fn is_read_failure(err: &CodecError) -> bool {
    match err {
        CodecError::Io(_) => true,
        CodecError::Decode { source, .. } => source
            .downcast_ref::<serde_json::Error>()
            .is_some_and(serde_json::Error::is_io),
        _ => false,
    }
}
