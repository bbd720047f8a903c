//! Round-trip harness implementation.

use crate::cancel::until_cancelled;
use crate::codec::{Codec, JsonCodec};
use crate::compare::{compare, CompareResult, StructuralEq};
use crate::config::{HarnessConfig, StorageKind};
use crate::error::{CodecError, HarnessError, ParseStage};
use crate::report::{RoundTrip, RoundTripReport};
use crate::storage::{MemoryStorage, ScratchStorage, TempFileStorage};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Instant;
use tokio::io::AsyncReadExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Serializes a value once and checks that buffered and streaming deserialization agree.
///
/// A run goes through these steps in order, stopping at the first failure:
///
/// 1. serialize into fresh scratch storage
/// 2. rewind and materialize the whole buffer as text
/// 3. buffered parse of that text
/// 4. rewind the same storage and parse it as a stream
/// 5. compare the two results, then (optionally) the buffered result with the original
///
/// Failures are logged with their structural path and returned; nothing is retried.
pub struct RoundTripHarness<C = JsonCodec> {
    codec: C,
    config: HarnessConfig,
}

impl RoundTripHarness<JsonCodec> {
    /// Create a harness around the JSON codec configured from `config`.
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            codec: config.json_codec(),
            config,
        }
    }
}

impl Default for RoundTripHarness<JsonCodec> {
    fn default() -> Self {
        Self::new(HarnessConfig::default())
    }
}

impl<C: Codec> RoundTripHarness<C> {
    /// Create a harness around an arbitrary codec.
    pub fn with_codec(codec: C, config: HarnessConfig) -> Self {
        Self { codec, config }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Run a round trip using the configured storage backend.
    pub async fn run<T>(
        &self,
        value: &T,
        cancel: &CancellationToken,
    ) -> Result<RoundTrip<T>, HarnessError>
    where
        T: Serialize + DeserializeOwned + StructuralEq + Send + Sync + 'static,
    {
        match &self.config.storage {
            StorageKind::Memory => {
                self.run_with_storage(value, MemoryStorage::new(), cancel)
                    .await
            }
            StorageKind::TempFile { dir } => {
                let storage = TempFileStorage::create(dir.as_deref())?;
                self.run_with_storage(value, storage, cancel).await
            }
        }
    }

    /// Run a round trip through caller-supplied storage.
    ///
    /// The storage is dropped before this returns, on success and on every failure.
    pub async fn run_with_storage<T, S>(
        &self,
        value: &T,
        mut storage: S,
        cancel: &CancellationToken,
    ) -> Result<RoundTrip<T>, HarnessError>
    where
        T: Serialize + DeserializeOwned + StructuralEq + Send + Sync + 'static,
        S: ScratchStorage,
    {
        let start_time = Instant::now();
        let mut report = RoundTripReport {
            codec: self.codec.name().to_string(),
            ..Default::default()
        };

        info!("Starting round trip through {}", report.codec);

        let step = Instant::now();
        report.bytes_written = self
            .codec
            .serialize(value, &mut storage, cancel)
            .await
            .map_err(|err| match err {
                CodecError::Cancelled => HarnessError::Cancelled,
                err => {
                    error!("Serialization failed: {err}");
                    HarnessError::Serialization(err)
                }
            })?;
        report.serialize_duration = step.elapsed();
        report.storage = storage.describe();
        debug!(
            "Serialized {} bytes to {} in {:?}",
            report.bytes_written, report.storage, report.serialize_duration
        );

        let step = Instant::now();
        let text = snapshot(&mut storage, cancel).await?;
        report.snapshot_duration = step.elapsed();
        debug!("Materialized {} bytes of text", text.len());

        let step = Instant::now();
        let buffered: T = self
            .codec
            .deserialize_str(&text)
            .map_err(|err| parse_failure(ParseStage::Buffered, err))?;
        report.buffered_parse_duration = step.elapsed();
        drop(text);

        let step = Instant::now();
        until_cancelled(cancel, storage.rewind())
            .await
            .ok_or(HarnessError::Cancelled)??;
        let reader = until_cancelled(cancel, storage.open_reader())
            .await
            .ok_or(HarnessError::Cancelled)??;
        let streamed: T = self
            .codec
            .deserialize_stream(reader, cancel.clone())
            .await
            .map_err(|err| parse_failure(ParseStage::Streaming, err))?;
        report.streaming_parse_duration = step.elapsed();

        let step = Instant::now();
        if let CompareResult::Mismatch(mismatch) = compare(&buffered, &streamed) {
            error!("Buffered and streaming results diverge {mismatch}");
            return Err(HarnessError::Divergence {
                path: mismatch.path,
                buffered: mismatch.left,
                streamed: mismatch.right,
            });
        }
        if self.config.compare_with_original {
            if let CompareResult::Mismatch(mismatch) = compare(value, &buffered) {
                error!("Decoded value differs from the original {mismatch}");
                return Err(HarnessError::OriginalMismatch {
                    path: mismatch.path,
                    expected: mismatch.left,
                    actual: mismatch.right,
                });
            }
        }
        report.compare_duration = step.elapsed();
        report.total_duration = start_time.elapsed();

        info!(
            "Round trip complete: {} bytes in {:?} ({:.2} bytes/sec)",
            report.bytes_written,
            report.total_duration,
            report.bytes_per_second()
        );

        Ok(RoundTrip {
            report,
            decoded: buffered,
        })
    }
}

/// Rewind `storage` and read it fully as UTF-8 text.
async fn snapshot<S: ScratchStorage>(
    storage: &mut S,
    cancel: &CancellationToken,
) -> Result<String, HarnessError> {
    until_cancelled(cancel, storage.rewind())
        .await
        .ok_or(HarnessError::Cancelled)??;
    let mut reader = until_cancelled(cancel, storage.open_reader())
        .await
        .ok_or(HarnessError::Cancelled)??;

    let mut bytes = Vec::new();
    until_cancelled(cancel, reader.read_to_end(&mut bytes))
        .await
        .ok_or(HarnessError::Cancelled)??;
    Ok(String::from_utf8(bytes)?)
}

fn parse_failure(stage: ParseStage, err: CodecError) -> HarnessError {
    match err {
        CodecError::Cancelled => HarnessError::Cancelled,
        err => {
            let path = err.path().cloned().unwrap_or_default();
            error!("Error Path: {path} ({stage} parse: {err})");
            HarnessError::Parse {
                stage,
                path,
                source: err,
            }
        }
    }
}
