//! The non-random fill: 16K copies of one fixed record.

use crate::init_logging;
use roundtrip_harness::{HarnessConfig, RoundTripHarness};
use stream_parity::fixture::NON_RANDOM_RECORD_COUNT;
use stream_parity::{non_random_records, repro_record};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

#[tokio::test(flavor = "multi_thread")]
async fn test_non_random_fill_round_trips() -> anyhow::Result<()> {
    init_logging();

    let records = non_random_records(NON_RANDOM_RECORD_COUNT);
    let temp_dir = TempDir::new()?;
    let harness = RoundTripHarness::new(
        HarnessConfig::new().with_storage(roundtrip_harness::StorageKind::TempFile {
            dir: Some(temp_dir.path().to_path_buf()),
        }),
    );

    let outcome = harness.run(&records, &CancellationToken::new()).await?;

    assert_eq!(outcome.decoded.len(), 16384);
    assert!(outcome.decoded.iter().all(|r| *r == repro_record()));

    let element = r#"{"a":0,"b":{"value":null},"c":null,"d":[]}"#.len() as u64;
    // One comma between each pair of elements plus the enclosing brackets
    assert_eq!(
        outcome.report.bytes_written,
        element * 16384 + 16383 + 2
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_non_random_fill_pretty() -> anyhow::Result<()> {
    let records = non_random_records(NON_RANDOM_RECORD_COUNT);
    let harness = RoundTripHarness::new(
        HarnessConfig::new()
            .with_pretty(true)
            .with_stream_buffer_size(1000),
    );

    let outcome = harness.run(&records, &CancellationToken::new()).await?;

    assert_eq!(outcome.decoded, records);
    Ok(())
}
