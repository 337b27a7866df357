//! Query filters over logical paths.
//!
//! A [`Filter`] names fields by logical path. Before it can be evaluated it
//! is translated into a [`StorageFilter`] by resolving every path through a
//! [`PathMapper`]. Translation happens each time a query runs, so every run of
//! the same query either fails with the same validation error or succeeds
//! against the same storage paths.

use std::fmt;

use crate::base::{Name, TypeId};
use crate::document::{Document, Value};
use crate::mapping::MetadataGraph;
use crate::path::StoragePath;
use crate::resolve::{PathMapper, ResolutionError};

// ============================================================================
// LOGICAL FILTERS
// ============================================================================

/// A filter expressed against logical paths.
#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    Eq { path: Name, value: Value },
    Ne { path: Name, value: Value },
    In { path: Name, values: Vec<Value> },
    And(Vec<Filter>),
}

impl Filter {
    pub fn eq(path: impl Into<Name>, value: impl Into<Value>) -> Self {
        Filter::Eq {
            path: path.into(),
            value: value.into(),
        }
    }

    pub fn ne(path: impl Into<Name>, value: impl Into<Value>) -> Self {
        Filter::Ne {
            path: path.into(),
            value: value.into(),
        }
    }

    pub fn in_<V: Into<Value>>(path: impl Into<Name>, values: impl IntoIterator<Item = V>) -> Self {
        Filter::In {
            path: path.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn and(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::And(filters.into_iter().collect())
    }

    /// Resolve every path in this filter against `root`.
    ///
    /// Stops at the first path that fails to resolve.
    pub fn translate(
        &self,
        mapper: &PathMapper,
        root: TypeId,
    ) -> Result<StorageFilter, ResolutionError> {
        Ok(match self {
            Filter::Eq { path, value } => StorageFilter::Eq {
                path: mapper.resolve(root, path)?,
                value: value.clone(),
            },
            Filter::Ne { path, value } => StorageFilter::Ne {
                path: mapper.resolve(root, path)?,
                value: value.clone(),
            },
            Filter::In { path, values } => StorageFilter::In {
                path: mapper.resolve(root, path)?,
                values: values.clone(),
            },
            Filter::And(filters) => StorageFilter::And(
                filters
                    .iter()
                    .map(|f| f.translate(mapper, root))
                    .collect::<Result<_, _>>()?,
            ),
        })
    }
}

// ============================================================================
// STORAGE FILTERS
// ============================================================================

/// A filter expressed against storage paths, ready to evaluate.
#[derive(Clone, Debug, PartialEq)]
pub enum StorageFilter {
    Eq { path: StoragePath, value: Value },
    Ne { path: StoragePath, value: Value },
    In { path: StoragePath, values: Vec<Value> },
    /// Matches when every child matches; empty matches everything.
    And(Vec<StorageFilter>),
}

impl StorageFilter {
    /// Evaluate against a stored document.
    ///
    /// A missing field compares equal to `null`.
    pub fn matches(&self, graph: &MetadataGraph, doc: &Document) -> bool {
        match self {
            StorageFilter::Eq { path, value } => field_equals(lookup(graph, doc, path), value),
            StorageFilter::Ne { path, value } => !field_equals(lookup(graph, doc, path), value),
            StorageFilter::In { path, values } => {
                let field = lookup(graph, doc, path);
                values.iter().any(|v| field_equals(field, v))
            }
            StorageFilter::And(filters) => filters.iter().all(|f| f.matches(graph, doc)),
        }
    }
}

impl fmt::Display for StorageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageFilter::Eq { path, value } => {
                write!(f, "{{ \"{}\": {{ \"$eq\": {} }} }}", path, value)
            }
            StorageFilter::Ne { path, value } => {
                write!(f, "{{ \"{}\": {{ \"$ne\": {} }} }}", path, value)
            }
            StorageFilter::In { path, values } => {
                write!(f, "{{ \"{}\": {{ \"$in\": [", path)?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                f.write_str("] } }")
            }
            StorageFilter::And(filters) => {
                f.write_str("{ \"$and\": [")?;
                for (i, filter) in filters.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", filter)?;
                }
                f.write_str("] }")
            }
        }
    }
}

/// Follow `path` through embedded documents and references.
///
/// A reference can only be stepped into through the identifier of its target
/// type, since nothing else of the referenced document is stored. Any other
/// field of a referenced type is therefore missing, and a missing field
/// compares equal to `null`: `eq("ref.label", null)` matches every document
/// holding a reference. A reference into a collection the graph does not know
/// has no identifier to step into.
fn lookup<'d>(
    graph: &MetadataGraph,
    doc: &'d Document,
    path: &StoragePath,
) -> Option<&'d Value> {
    let (first, rest) = path.segments().split_first()?;
    let mut value = doc.get(first)?;
    for segment in rest {
        value = match value {
            Value::Doc(inner) => inner.get(segment)?,
            Value::Ref(r) if is_identifier_of(graph, r.collection, segment) => &r.id,
            _ => return None,
        };
    }
    Some(value)
}

fn is_identifier_of(graph: &MetadataGraph, collection: TypeId, segment: &str) -> bool {
    graph
        .try_get(collection)
        .is_some_and(|ty| ty.identifier().storage_name() == segment)
}

/// Equality with bare references comparing by their embedded identifier.
fn field_equals(field: Option<&Value>, operand: &Value) -> bool {
    match (field, operand) {
        (None, Value::Null) => true,
        (None, _) => false,
        (Some(Value::Ref(stored)), Value::Ref(wanted)) => stored == wanted,
        (Some(Value::Ref(stored)), scalar) => *stored.id == *scalar,
        (Some(stored), operand) => stored == operand,
    }
}

// ============================================================================
// QUERY
// ============================================================================

/// A set of filters over documents of one mapped type.
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    root: TypeId,
    filters: Vec<Filter>,
}

impl Query {
    pub fn new(root: TypeId) -> Self {
        Self {
            root,
            filters: Vec::new(),
        }
    }

    /// Add a filter; all filters must match.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn root(&self) -> TypeId {
        self.root
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Resolve all filters into one storage-level conjunction.
    pub fn translate(&self, mapper: &PathMapper) -> Result<StorageFilter, ResolutionError> {
        self.filters
            .iter()
            .map(|f| f.translate(mapper, self.root))
            .collect::<Result<Vec<_>, _>>()
            .map(StorageFilter::And)
    }

    /// Render the storage-level filter, failing exactly as execution would.
    pub fn explain(&self, mapper: &PathMapper) -> Result<String, ResolutionError> {
        self.translate(mapper).map(|filter| filter.to_string())
    }
}
