//! Structural paths into deserialized values.
//!
//! A [`StructuralPath`] names a position inside a value the same way for codec errors and
//! for comparison mismatches, e.g. `$[7924].b.value`.

use serde::Serialize;
use std::fmt;

/// One step of a [`StructuralPath`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PathSegment {
    /// Element of an array or set, by position.
    Index(usize),
    /// Named field of a record, or key of a map.
    Field(String),
    /// A step the codec could not name.
    Unknown,
}

/// Path from the root of a value to one of its elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructuralPath {
    segments: Vec<PathSegment>,
}

impl StructuralPath {
    /// The empty path, naming the whole value.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    pub fn push_field(&mut self, name: impl Into<String>) {
        self.segments.push(PathSegment::Field(name.into()));
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    /// Builder form of [`push_index`](Self::push_index).
    pub fn index(mut self, index: usize) -> Self {
        self.push_index(index);
        self
    }

    /// Builder form of [`push_field`](Self::push_field).
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.push_field(name);
        self
    }

    /// Index of the top-level element this path points into, if the root is a sequence.
    pub fn first_index(&self) -> Option<usize> {
        match self.segments.first() {
            Some(PathSegment::Index(index)) => Some(*index),
            _ => None,
        }
    }
}

impl fmt::Display for StructuralPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            match segment {
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Unknown => f.write_str(".?")?,
            }
        }
        Ok(())
    }
}

impl From<&serde_path_to_error::Path> for StructuralPath {
    fn from(path: &serde_path_to_error::Path) -> Self {
        use serde_path_to_error::Segment;

        let segments = path
            .iter()
            .map(|segment| match segment {
                Segment::Seq { index } => PathSegment::Index(*index),
                Segment::Map { key } => PathSegment::Field(key.clone()),
                Segment::Enum { variant } => PathSegment::Field(variant.clone()),
                Segment::Unknown => PathSegment::Unknown,
            })
            .collect();
        Self { segments }
    }
}
