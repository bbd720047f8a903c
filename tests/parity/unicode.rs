//! Multi-byte scalars split across every possible read boundary.

use roundtrip_harness::{HarnessConfig, RoundTripHarness};
use std::collections::BTreeSet;
use stream_parity::{fixture_generator, FixtureConfig, Nested, Record};
use tokio_util::sync::CancellationToken;

const BOUNDARY_STRINGS: &[&str] = &[
    "\u{7F}\u{80}",
    "\u{7FF}\u{800}",
    "\u{FFFF}\u{10000}",
    "\u{10FFFF}",
    "\u{1F600}\u{1F600}",
    "\u{D7FF}\u{E000}",
    "a\u{10348}b\u{20AC}c",
];

fn boundary_records() -> Vec<Record> {
    BOUNDARY_STRINGS
        .iter()
        .enumerate()
        .map(|(i, s)| Record {
            a: Some(i as i32),
            b: Some(Nested { value: None }),
            c: Some(s.to_string()),
            d: BOUNDARY_STRINGS
                .iter()
                .take(i)
                .map(|s| s.to_string())
                .collect::<BTreeSet<_>>(),
        })
        .collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_boundary_strings_across_buffer_sizes() -> anyhow::Result<()> {
    let records = boundary_records();
    let original = serde_json::to_vec(&records)?;

    for buffer_size in [1, 2, 3, 4, 5, 7] {
        let harness = RoundTripHarness::new(
            HarnessConfig::new()
                .with_stream_buffer_size(buffer_size)
                .with_write_chunk_size(buffer_size),
        );
        let outcome = harness.run(&records, &CancellationToken::new()).await?;

        assert_eq!(outcome.decoded, records, "buffer size {buffer_size}");
        assert_eq!(serde_json::to_vec(&outcome.decoded)?, original);
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_generated_strings_with_tiny_reads() -> anyhow::Result<()> {
    let config = FixtureConfig::new()
        .with_record_count(300)
        .with_null_probability(0.0);
    let records: Vec<Record> = fixture_generator(&config).create_array(300)?;

    // Every generated string is drawn from the full scalar range, so most carry 4-byte scalars
    assert!(records
        .iter()
        .filter_map(|r| r.c.as_ref())
        .any(|c| c.chars().any(|ch| ch.len_utf8() == 4)));

    let harness = RoundTripHarness::new(HarnessConfig::new().with_stream_buffer_size(1));
    let outcome = harness.run(&records, &CancellationToken::new()).await?;

    assert_eq!(outcome.decoded, records);
    Ok(())
}
