//! Cancellation surfaces as its own error and still releases scratch storage.

use roundtrip_harness::{HarnessConfig, HarnessError, StorageKind};
use stream_parity::{run_fixture, FixtureConfig, ParityError};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

#[tokio::test(flavor = "multi_thread")]
async fn test_cancelled_before_run() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let config = HarnessConfig::new().with_storage(StorageKind::TempFile {
        dir: Some(temp_dir.path().to_path_buf()),
    });
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = run_fixture(
        &FixtureConfig::new().with_record_count(100),
        &config,
        &cancel,
    )
    .await;

    match result {
        Err(ParityError::Harness(err)) => assert!(err.is_cancelled()),
        Err(other) => panic!("Expected cancellation, got {other}"),
        Ok(_) => panic!("Expected cancellation, run succeeded"),
    }
    assert_eq!(std::fs::read_dir(temp_dir.path())?.count(), 0);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cancelled_is_not_a_divergence() {
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = run_fixture(
        &FixtureConfig::new().with_record_count(10),
        &HarnessConfig::new(),
        &cancel,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ParityError::Harness(HarnessError::Cancelled)));
    assert_eq!(err.failing_index(), None);
}
