//! Fixture record shapes and their random generators.

use fixture_generator::{GeneratorError, RandomGenerator};
use roundtrip_harness::{structural_record, ConfigError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Seed that reproduces the known large-fixture scenario.
pub const DEFAULT_SEED: u64 = 1_905_742_104;

/// Number of records in the known large-fixture scenario.
pub const DEFAULT_RECORD_COUNT: usize = 8000;

/// Record count of the non-random fill.
pub const NON_RANDOM_RECORD_COUNT: usize = 1 << 14;

/// Nested value held by [`Record::b`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nested {
    pub value: Option<i32>,
}

structural_record!(Nested { value });

/// Root fixture record: a nullable scalar, a nullable nested struct, a nullable string
/// and a set of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub a: Option<i32>,
    pub b: Option<Nested>,
    pub c: Option<String>,
    pub d: BTreeSet<String>,
}

structural_record!(Record { a, b, c, d });

/// Configuration for fixture generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    /// RNG seed.
    pub seed: u64,
    /// Number of root records.
    pub record_count: usize,
    /// Probability that each nullable field is null.
    pub null_probability: f64,
    /// Minimum drawn size of `d` before deduplication.
    pub set_min: usize,
    /// Maximum drawn size of `d` before deduplication.
    pub set_max: usize,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            record_count: DEFAULT_RECORD_COUNT,
            null_probability: 0.5,
            set_min: 0,
            set_max: 5,
        }
    }
}

impl FixtureConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a fixture configuration from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a fixture configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_record_count(mut self, count: usize) -> Self {
        self.record_count = count;
        self
    }

    pub fn with_null_probability(mut self, probability: f64) -> Self {
        self.null_probability = probability;
        self
    }

    /// Set the inclusive size range drawn for `d`.
    pub fn with_set_size(mut self, min: usize, max: usize) -> Self {
        self.set_min = min;
        self.set_max = max;
        self
    }
}

/// Build a generator with [`Nested`] and [`Record`] registered.
///
/// Field draws happen in declaration order: `a`, `b`, `c`, then `d`.
pub fn fixture_generator(config: &FixtureConfig) -> RandomGenerator {
    let null_probability = config.null_probability;
    let (set_min, set_max) = (config.set_min, config.set_max);

    RandomGenerator::new(config.seed)
        .register(move |r: &mut RandomGenerator| {
            Ok::<_, GeneratorError>(Nested {
                value: r.null_or(null_probability, RandomGenerator::create::<i32>)?,
            })
        })
        .register(move |r: &mut RandomGenerator| {
            Ok::<_, GeneratorError>(Record {
                a: r.null_or(null_probability, RandomGenerator::create::<i32>)?,
                b: r.null_or(null_probability, RandomGenerator::create::<Nested>)?,
                c: r.null_or(null_probability, RandomGenerator::create::<String>)?,
                d: r.create_set_between::<String>(set_min, set_max)?,
            })
        })
}

/// Generate `config.record_count` records from `config.seed`.
pub fn generate_records(config: &FixtureConfig) -> Result<Vec<Record>, GeneratorError> {
    let mut generator = fixture_generator(config);
    let records = generator.create_array::<Record>(config.record_count)?;
    tracing::info!(
        "Generated {} records from seed {}",
        records.len(),
        generator.seed()
    );
    Ok(records)
}

/// The record `{a: 0, b: {value: null}, c: null, d: []}` at the reported failure position.
pub fn repro_record() -> Record {
    Record {
        a: Some(0),
        b: Some(Nested { value: None }),
        c: None,
        d: BTreeSet::new(),
    }
}

/// `count` copies of [`repro_record`].
pub fn non_random_records(count: usize) -> Vec<Record> {
    vec![repro_record(); count]
}
