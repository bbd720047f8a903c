//! Structural comparison of deserialized values.
//!
//! Comparison walks both values in lockstep and stops at the first difference, reporting
//! the [`StructuralPath`] where it occurred. Absent (`None`) is distinct from every present
//! value, and sets compare without regard to element order.

use crate::path::StructuralPath;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

/// First point at which two values differ.
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    pub path: StructuralPath,
    pub left: String,
    pub right: String,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at {}: {} != {}", self.path, self.left, self.right)
    }
}

/// Result of comparing two values.
#[derive(Debug, Clone, PartialEq)]
pub enum CompareResult {
    /// Values match.
    Match,
    /// Values differ.
    Mismatch(Mismatch),
}

impl CompareResult {
    pub fn is_match(&self) -> bool {
        matches!(self, CompareResult::Match)
    }

    fn mismatch(path: &StructuralPath, left: impl Into<String>, right: impl Into<String>) -> Self {
        CompareResult::Mismatch(Mismatch {
            path: path.clone(),
            left: left.into(),
            right: right.into(),
        })
    }
}

/// Structural equality that can name where two values first differ.
///
/// Record types implement this with [`structural_record!`](crate::structural_record).
pub trait StructuralEq {
    /// Compare `self` with `other`, both located at `path`.
    ///
    /// Implementations may push onto `path` while descending but must leave it as they
    /// found it before returning.
    fn compare_at(&self, other: &Self, path: &mut StructuralPath) -> CompareResult;
}

/// Compare two values from the root.
pub fn compare<T: StructuralEq + ?Sized>(left: &T, right: &T) -> CompareResult {
    left.compare_at(right, &mut StructuralPath::root())
}

macro_rules! impl_scalar {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl StructuralEq for $ty {
                fn compare_at(&self, other: &Self, path: &mut StructuralPath) -> CompareResult {
                    if self == other {
                        CompareResult::Match
                    } else {
                        CompareResult::mismatch(path, format!("{self:?}"), format!("{other:?}"))
                    }
                }
            }
        )+
    };
}

impl_scalar!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, String, str);

impl<T: StructuralEq + fmt::Debug> StructuralEq for Option<T> {
    fn compare_at(&self, other: &Self, path: &mut StructuralPath) -> CompareResult {
        match (self, other) {
            (None, None) => CompareResult::Match,
            (Some(left), Some(right)) => left.compare_at(right, path),
            (None, Some(right)) => CompareResult::mismatch(path, "null", format!("{right:?}")),
            (Some(left), None) => CompareResult::mismatch(path, format!("{left:?}"), "null"),
        }
    }
}

impl<T: StructuralEq + ?Sized> StructuralEq for Box<T> {
    fn compare_at(&self, other: &Self, path: &mut StructuralPath) -> CompareResult {
        (**self).compare_at(other, path)
    }
}

impl<T: StructuralEq> StructuralEq for [T] {
    fn compare_at(&self, other: &Self, path: &mut StructuralPath) -> CompareResult {
        if self.len() != other.len() {
            return CompareResult::mismatch(
                path,
                format!("array of length {}", self.len()),
                format!("array of length {}", other.len()),
            );
        }
        for (i, (left, right)) in self.iter().zip(other.iter()).enumerate() {
            path.push_index(i);
            let result = left.compare_at(right, path);
            path.pop();
            if !result.is_match() {
                return result;
            }
        }
        CompareResult::Match
    }
}

impl<T: StructuralEq> StructuralEq for Vec<T> {
    fn compare_at(&self, other: &Self, path: &mut StructuralPath) -> CompareResult {
        self.as_slice().compare_at(other.as_slice(), path)
    }
}

/// Compare two sets without regard to order.
///
/// Reports the smallest (by debug rendering) element present on one side only.
fn compare_sets<'a, T, I>(
    left_len: usize,
    right_len: usize,
    left_only: I,
    right_only: I,
    path: &StructuralPath,
) -> CompareResult
where
    T: fmt::Debug + 'a,
    I: Iterator<Item = &'a T>,
{
    if left_len != right_len {
        return CompareResult::mismatch(
            path,
            format!("set of {left_len} elements"),
            format!("set of {right_len} elements"),
        );
    }
    let first = |items: I| items.map(|item| format!("{item:?}")).min();
    if let Some(item) = first(left_only) {
        return CompareResult::mismatch(path, format!("set containing {item}"), "element missing");
    }
    if let Some(item) = first(right_only) {
        return CompareResult::mismatch(path, "element missing", format!("set containing {item}"));
    }
    CompareResult::Match
}

impl<T: Ord + fmt::Debug> StructuralEq for BTreeSet<T> {
    fn compare_at(&self, other: &Self, path: &mut StructuralPath) -> CompareResult {
        compare_sets(
            self.len(),
            other.len(),
            self.difference(other),
            other.difference(self),
            path,
        )
    }
}

impl<T: Eq + Hash + fmt::Debug, S: std::hash::BuildHasher> StructuralEq for HashSet<T, S> {
    fn compare_at(&self, other: &Self, path: &mut StructuralPath) -> CompareResult {
        compare_sets(
            self.len(),
            other.len(),
            self.difference(other),
            other.difference(self),
            path,
        )
    }
}

/// Compare two keyed maps over the union of their keys, in sorted key order.
fn compare_keyed<'a, V, L, R>(
    keys: BTreeSet<&'a String>,
    left: L,
    right: R,
    path: &mut StructuralPath,
) -> CompareResult
where
    V: StructuralEq + 'a,
    L: Fn(&String) -> Option<&'a V>,
    R: Fn(&String) -> Option<&'a V>,
{
    for key in keys {
        path.push_field(key.as_str());
        let result = match (left(key), right(key)) {
            (Some(l), Some(r)) => l.compare_at(r, path),
            (Some(_), None) => CompareResult::mismatch(path, "field present", "field absent"),
            (None, Some(_)) => CompareResult::mismatch(path, "field absent", "field present"),
            (None, None) => CompareResult::Match,
        };
        path.pop();
        if !result.is_match() {
            return result;
        }
    }
    CompareResult::Match
}

impl<V: StructuralEq> StructuralEq for BTreeMap<String, V> {
    fn compare_at(&self, other: &Self, path: &mut StructuralPath) -> CompareResult {
        let keys: BTreeSet<&String> = self.keys().chain(other.keys()).collect();
        compare_keyed(keys, |k| self.get(k), |k| other.get(k), path)
    }
}

impl<V: StructuralEq, S: std::hash::BuildHasher> StructuralEq for HashMap<String, V, S> {
    fn compare_at(&self, other: &Self, path: &mut StructuralPath) -> CompareResult {
        let keys: BTreeSet<&String> = self.keys().chain(other.keys()).collect();
        compare_keyed(keys, |k| self.get(k), |k| other.get(k), path)
    }
}

impl StructuralEq for serde_json::Value {
    fn compare_at(&self, other: &Self, path: &mut StructuralPath) -> CompareResult {
        use serde_json::Value;

        match (self, other) {
            (Value::Array(left), Value::Array(right)) => left.compare_at(right, path),
            (Value::Object(left), Value::Object(right)) => {
                let keys: BTreeSet<&String> = left.keys().chain(right.keys()).collect();
                compare_keyed(keys, |k| left.get(k), |k| right.get(k), path)
            }
            (left, right) if left == right => CompareResult::Match,
            (left, right) => CompareResult::mismatch(path, left.to_string(), right.to_string()),
        }
    }
}

/// Implement [`StructuralEq`] for a record by comparing the listed fields in order.
///
/// ```rust
/// use roundtrip_harness::compare::{compare, CompareResult};
/// use roundtrip_harness::structural_record;
///
/// #[derive(Debug)]
/// struct Nested {
///     value: Option<i32>,
/// }
///
/// structural_record!(Nested { value });
///
/// let result = compare(&Nested { value: None }, &Nested { value: Some(0) });
/// match result {
///     CompareResult::Mismatch(m) => assert_eq!(m.path.to_string(), "$.value"),
///     CompareResult::Match => unreachable!(),
/// }
/// ```
#[macro_export]
macro_rules! structural_record {
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        impl $crate::compare::StructuralEq for $ty {
            fn compare_at(
                &self,
                other: &Self,
                path: &mut $crate::path::StructuralPath,
            ) -> $crate::compare::CompareResult {
                $(
                    path.push_field(stringify!($field));
                    let result =
                        $crate::compare::StructuralEq::compare_at(&self.$field, &other.$field, path);
                    path.pop();
                    if !result.is_match() {
                        return result;
                    }
                )+
                $crate::compare::CompareResult::Match
            }
        }
    };
}
