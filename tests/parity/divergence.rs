//! Failures point at the record they occurred in.

use roundtrip_harness::{Codec, JsonCodec, StructuralPath};
use std::io::Cursor;
use stream_parity::{generate_records, FixtureConfig, Record};
use tokio_util::sync::CancellationToken;

/// Serialized fixture cut a few bytes before the end of record `index`.
fn truncated_within(records: &[Record], index: usize) -> Vec<u8> {
    let prefix = serde_json::to_vec(&records[..=index]).unwrap();
    prefix[..prefix.len() - 4].to_vec()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_truncated_stream_reports_record_index() {
    let records = generate_records(&FixtureConfig::default()).unwrap();
    let bytes = truncated_within(&records, 7924);

    let codec = JsonCodec::new().with_read_buffer_size(512);
    let err = codec
        .deserialize_stream::<Vec<Record>, _>(Cursor::new(bytes), CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.path().and_then(StructuralPath::first_index), Some(7924));
}

#[test]
fn test_truncated_text_reports_record_index() {
    let records = generate_records(&FixtureConfig::new().with_record_count(100)).unwrap();
    let bytes = truncated_within(&records, 57);
    let text = String::from_utf8(bytes).unwrap();

    let err = JsonCodec::new()
        .deserialize_str::<Vec<Record>>(&text)
        .unwrap_err();

    let path = err.path().expect("decode error carries a path");
    assert_eq!(path.first_index(), Some(57));
    assert!(path.to_string().starts_with("$[57]"));
}

#[test]
fn test_type_error_reports_field_path() {
    let text = r#"[{"a":1,"b":null,"c":null,"d":[]},{"a":2,"b":{"value":"x"},"c":null,"d":[]}]"#;

    let err = JsonCodec::new()
        .deserialize_str::<Vec<Record>>(text)
        .unwrap_err();

    assert_eq!(err.path().unwrap().to_string(), "$[1].b.value");
}
