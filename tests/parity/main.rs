//! End-to-end round-trip tests on generated fixtures.
//!
//! Each test builds a fixture (seeded or fixed), serializes it once, parses the
//! serialized bytes both buffered and streamed, and checks that the two agree.

mod cancellation;
mod divergence;
mod large_fixture;
mod non_random;
mod unicode;

/// Initialize logging for tests
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stream_parity=info,roundtrip_harness=info".into()),
        )
        .try_init()
        .ok();
}
