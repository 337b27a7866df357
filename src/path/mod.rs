//! Logical and storage paths.
//!
//! A logical path is what a query author writes (`ref.$id`). A storage path is
//! what the document store understands (`ref._id`). [`tokenize`] turns text
//! into a [`LogicalPath`]; only the resolver produces [`StoragePath`]s.

use std::fmt;
use std::sync::Arc;

use crate::base::Name;
use crate::base::constants::{ID_TOKEN, PATH_SEPARATOR};

/// One segment of a logical path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An ordinary field name (logical or storage spelling).
    Field(Name),
    /// The reserved identifier token.
    IdToken,
}

impl PathSegment {
    pub fn as_str(&self) -> &str {
        match self {
            PathSegment::Field(name) => name,
            PathSegment::IdToken => ID_TOKEN,
        }
    }
}

/// A tokenized, non-empty logical path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicalPath {
    text: Name,
    segments: Vec<PathSegment>,
}

impl LogicalPath {
    /// The path exactly as it was written.
    pub fn text(&self) -> &Name {
        &self.text
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; tokenization rejects empty paths.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// The path has no segments, or one of its segments is empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptySegment {
    /// Zero-based position of the first empty segment.
    pub position: usize,
}

/// Split a path on `.` using the default identifier token.
pub fn tokenize(path: &str) -> Result<LogicalPath, EmptySegment> {
    tokenize_with(path, PATH_SEPARATOR, ID_TOKEN)
}

/// Split a path on `separator`, recognising `id_token` as [`PathSegment::IdToken`].
///
/// Leading, trailing or doubled separators are rejected rather than skipped.
pub fn tokenize_with(
    path: &str,
    separator: char,
    id_token: &str,
) -> Result<LogicalPath, EmptySegment> {
    if path.is_empty() {
        return Err(EmptySegment { position: 0 });
    }

    let segments = path
        .split(separator)
        .enumerate()
        .map(|(position, raw)| match raw {
            "" => Err(EmptySegment { position }),
            token if token == id_token => Ok(PathSegment::IdToken),
            field => Ok(PathSegment::Field(Name::from(field))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LogicalPath {
        text: Name::from(path),
        segments,
    })
}

// ============================================================================
// STORAGE PATH
// ============================================================================

/// A resolved path of storage keys.
///
/// Backed by a shared slice so that copies handed out by the cache are cheap.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StoragePath(Arc<[Name]>);

impl StoragePath {
    pub(crate) fn new(segments: Vec<Name>) -> Self {
        Self(segments.into())
    }

    pub fn segments(&self) -> &[Name] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for paths produced by resolution.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&Name> {
        self.0.last()
    }

    /// Whether two handles share the same allocation.
    pub fn ptr_eq(&self, other: &StoragePath) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", PATH_SEPARATOR)?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl<S: AsRef<str>> PartialEq<[S]> for StoragePath {
    fn eq(&self, other: &[S]) -> bool {
        self.0.len() == other.len() && self.0.iter().zip(other).all(|(a, b)| a == b.as_ref())
    }
}

impl<S: AsRef<str>, const N: usize> PartialEq<[S; N]> for StoragePath {
    fn eq(&self, other: &[S; N]) -> bool {
        *self == other[..]
    }
}
