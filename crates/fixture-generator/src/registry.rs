//! Per-type registry of generator functions.

use crate::error::GeneratorError;
use crate::generator::RandomGenerator;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Type-erased generator function stored in the registry.
///
/// The boxed value is recovered with a downcast in [`RandomGenerator::create`].
pub type ErasedFactory =
    Arc<dyn Fn(&mut RandomGenerator) -> Result<Box<dyn Any>, GeneratorError> + Send + Sync>;

/// Identifies the logical type a generator produces.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key for the type `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Fully qualified type name, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

struct Entry {
    name: &'static str,
    factory: ErasedFactory,
}

/// Registry mapping each logical type to the function that generates it.
///
/// Registration is insert-if-absent: the first generator registered for a type wins and
/// every later registration for the same type is ignored without error. This lets default
/// registrations sit underneath user registrations made afterwards for *new* types.
/// Registering the same type twice with different logic is a caller error; only the first
/// one will ever run.
#[derive(Default)]
pub struct ValueRegistry {
    entries: HashMap<TypeId, Entry>,
}

impl ValueRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a generator for `T` unless one already exists.
    ///
    /// Returns `true` if the generator was inserted, `false` if an earlier registration
    /// for `T` was kept.
    pub fn register<T, F>(&mut self, factory: F) -> bool
    where
        T: 'static,
        F: Fn(&mut RandomGenerator) -> Result<T, GeneratorError> + Send + Sync + 'static,
    {
        let key = TypeKey::of::<T>();
        if self.entries.contains_key(&key.id) {
            tracing::debug!("Ignoring duplicate generator registration for {}", key.name);
            return false;
        }

        let erased: ErasedFactory =
            Arc::new(move |r: &mut RandomGenerator| factory(r).map(|v| Box::new(v) as Box<dyn Any>));
        self.entries.insert(
            key.id,
            Entry {
                name: key.name,
                factory: erased,
            },
        );
        true
    }

    /// Look up the generator for `key`.
    ///
    /// The returned handle is independent of the registry borrow so it can be invoked with
    /// mutable access to the generator that owns this registry.
    pub fn resolve(&self, key: TypeKey) -> Result<ErasedFactory, GeneratorError> {
        self.entries
            .get(&key.id)
            .map(|entry| Arc::clone(&entry.factory))
            .ok_or(GeneratorError::UnregisteredType {
                type_name: key.name,
            })
    }

    /// Check whether a generator for `T` is registered.
    pub fn contains<T: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no types are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sorted names of all registered types.
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.values().map(|e| e.name).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for ValueRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}
