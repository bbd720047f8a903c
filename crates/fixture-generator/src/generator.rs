//! Main random generator for producing fixture graphs.

use crate::error::GeneratorError;
use crate::generators;
use crate::registry::{TypeKey, ValueRegistry};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use std::fmt;

/// Random generator that produces deterministic values by logical type.
///
/// The generator owns a single seeded RNG and hands `&mut self` to every registered
/// generator function, so nested calls draw from the same source in a fixed order.
/// Two generators built with the same seed and the same registrations return identical
/// values for identical call sequences.
pub struct RandomGenerator {
    /// Seed the RNG was created from
    seed: u64,
    /// Seeded random number generator for reproducibility
    rng: StdRng,
    /// Generators keyed by the type they produce
    registry: ValueRegistry,
}

impl RandomGenerator {
    /// Create a new generator with the given seed and the built-in generators registered.
    pub fn new(seed: u64) -> Self {
        tracing::info!("Using seed: {seed}");
        let mut registry = ValueRegistry::new();
        generators::register_defaults(&mut registry);
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            registry,
        }
    }

    /// Create a new generator with a freshly drawn seed.
    ///
    /// The seed is logged before use; pass it to [`RandomGenerator::new`] to replay a run.
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Get the seed this generator was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Register a generator for `T`, keeping any generator already registered for it.
    pub fn register<T, F>(mut self, factory: F) -> Self
    where
        T: 'static,
        F: Fn(&mut RandomGenerator) -> Result<T, GeneratorError> + Send + Sync + 'static,
    {
        self.registry.register(factory);
        self
    }

    /// Get a reference to the registry.
    pub fn registry(&self) -> &ValueRegistry {
        &self.registry
    }

    /// Direct access to the underlying RNG for generators that need raw draws.
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Generate one value of type `T` with its registered generator.
    pub fn create<T: 'static>(&mut self) -> Result<T, GeneratorError> {
        let key = TypeKey::of::<T>();
        let factory = self.registry.resolve(key)?;
        let boxed = factory(self)?;
        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| GeneratorError::TypeMismatch {
                type_name: key.name(),
            })
    }

    /// Generate exactly `count` values, index 0 first.
    pub fn create_array<T: 'static>(&mut self, count: usize) -> Result<Vec<T>, GeneratorError> {
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(self.create::<T>()?);
        }
        Ok(values)
    }

    /// Generate between `min` and `max` values (inclusive).
    ///
    /// The count is drawn before any element is generated.
    pub fn create_array_between<T: 'static>(
        &mut self,
        min: usize,
        max: usize,
    ) -> Result<Vec<T>, GeneratorError> {
        if min > max {
            return Err(GeneratorError::InvalidRange { min, max });
        }
        let count = self.rng.gen_range(min..=max);
        self.create_array(count)
    }

    /// Generate between `min` and `max` values and collect them into a set.
    ///
    /// Duplicates collapse, so the set may hold fewer than the drawn count.
    pub fn create_set_between<T: Ord + 'static>(
        &mut self,
        min: usize,
        max: usize,
    ) -> Result<BTreeSet<T>, GeneratorError> {
        Ok(self.create_array_between(min, max)?.into_iter().collect())
    }

    /// Yield `None` with probability `null_probability`, otherwise the result of `generate`.
    ///
    /// One uniform draw in `[0, 1)` decides the branch; the value is null when the draw is
    /// strictly less than `null_probability`. The null branch never calls `generate`, so it
    /// consumes exactly one draw while the present branch consumes one plus whatever
    /// `generate` draws. Callers must not expect both branches to leave the RNG aligned.
    pub fn null_or<T, F>(
        &mut self,
        null_probability: f64,
        generate: F,
    ) -> Result<Option<T>, GeneratorError>
    where
        F: FnOnce(&mut Self) -> Result<T, GeneratorError>,
    {
        if self.rng.gen::<f64>() < null_probability {
            return Ok(None);
        }
        generate(self).map(Some)
    }

    /// Build a string of `len` random Unicode scalar values.
    pub fn next_string(&mut self, len: usize) -> String {
        generators::string::next_string(&mut self.rng, len)
    }
}

impl fmt::Debug for RandomGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomGenerator")
            .field("seed", &self.seed)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
