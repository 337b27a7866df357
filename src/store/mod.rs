//! Datastore — in-memory collections queried through resolved paths.
//!
//! The [`Datastore`] owns the [`PathMapper`] and so the resolution cache:
//! cached resolutions live exactly as long as the datastore instance.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use docmap::mapping::{EntityDecl, MetadataGraph};
//! use docmap::query::Filter;
//! use docmap::store::Datastore;
//! use docmap::document::Document;
//!
//! let graph = MetadataGraph::build([
//!     EntityDecl::new("Root").id("id").reference("ref", "Referenced"),
//!     EntityDecl::new("Referenced").id("id"),
//! ])
//! .unwrap();
//! let store = Datastore::new(Arc::new(graph));
//! let root = store.type_named("Root").unwrap();
//! let referenced = store.type_named("Referenced").unwrap();
//!
//! store.save(referenced, Document::new().with("_id", 2)).unwrap();
//! let r = store.reference(referenced, 2);
//! store.save(root, Document::new().with("_id", 1).with("ref", r)).unwrap();
//!
//! let query = store.find(root).filter(Filter::eq("ref.$id", 2));
//! assert!(store.first(&query).unwrap().is_some());
//! ```

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

use crate::base::{Name, TypeId};
use crate::document::{DocRef, Document, Value};
use crate::mapping::{MappedType, MetadataGraph};
use crate::query::{Query, StorageFilter};
use crate::resolve::{PathMapper, ResolutionError, ResolverConfig};

/// Errors from datastore operations.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DatastoreError {
    /// A query path could not be resolved.
    #[error(transparent)]
    Validation(#[from] ResolutionError),

    #[error("Document for '{ty}' has no identifier field '{field}'")]
    MissingIdentifier { ty: Name, field: Name },

    /// A reference field holds a reference into the wrong collection.
    #[error("Field '{ty}.{field}' must reference '{expected}', not '{found}'")]
    ReferenceTarget {
        ty: Name,
        field: Name,
        expected: Name,
        found: Name,
    },

    /// The name or type id does not belong to this datastore's graph.
    #[error("Unknown mapped type '{0}'")]
    UnknownType(Name),
}

/// Documents of one type keyed by rendered identifier, in insertion order.
type Collection = IndexMap<String, Document>;

/// In-memory document store bound to one metadata graph.
#[derive(Debug)]
pub struct Datastore {
    mapper: PathMapper,
    collections: RwLock<FxHashMap<TypeId, Collection>>,
}

impl Datastore {
    pub fn new(graph: Arc<MetadataGraph>) -> Self {
        Self::with_config(graph, ResolverConfig::default())
    }

    pub fn with_config(graph: Arc<MetadataGraph>, config: ResolverConfig) -> Self {
        Self {
            mapper: PathMapper::with_config(graph, config),
            collections: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn mapper(&self) -> &PathMapper {
        &self.mapper
    }

    pub fn graph(&self) -> &Arc<MetadataGraph> {
        self.mapper.graph()
    }

    pub fn type_named(&self, name: &str) -> Result<TypeId, DatastoreError> {
        self.graph()
            .type_named(name)
            .ok_or_else(|| DatastoreError::UnknownType(Name::from(name)))
    }

    /// A reference value pointing at the document of `ty` with identifier `id`.
    pub fn reference(&self, ty: TypeId, id: impl Into<Value>) -> Value {
        Value::Ref(DocRef::new(ty, id))
    }

    /// Insert or replace a document, keyed by its identifier.
    ///
    /// Reference fields must hold references into the field's target type.
    pub fn save(&self, ty: TypeId, doc: Document) -> Result<(), DatastoreError> {
        let mapped = self.mapped(ty)?;
        check_references(self.graph(), mapped, &doc)?;
        let key = key_of(mapped, &doc)?;
        self.collections
            .write()
            .entry(ty)
            .or_default()
            .insert(key, doc);
        Ok(())
    }

    /// Remove the document of `ty` with identifier `id`. Returns whether it existed.
    pub fn delete(&self, ty: TypeId, id: impl Into<Value>) -> bool {
        let key = id.into().to_string();
        self.collections
            .write()
            .get_mut(&ty)
            .and_then(|docs| docs.shift_remove(&key))
            .is_some()
    }

    /// Start a query over documents of `ty`.
    pub fn find(&self, ty: TypeId) -> Query {
        Query::new(ty)
    }

    /// First matching document in insertion order.
    pub fn first(&self, query: &Query) -> Result<Option<Document>, DatastoreError> {
        let filter = self.translate(query)?;
        let graph = self.graph();
        Ok(self.collections.read().get(&query.root()).and_then(|docs| {
            docs.values()
                .find(|doc| filter.matches(graph, doc))
                .cloned()
        }))
    }

    pub fn all(&self, query: &Query) -> Result<Vec<Document>, DatastoreError> {
        let filter = self.translate(query)?;
        let graph = self.graph();
        Ok(self
            .collections
            .read()
            .get(&query.root())
            .map(|docs| {
                docs.values()
                    .filter(|doc| filter.matches(graph, doc))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    pub fn count(&self, query: &Query) -> Result<usize, DatastoreError> {
        Ok(self.all(query)?.len())
    }

    /// Render the storage-level filter of `query`.
    pub fn explain(&self, query: &Query) -> Result<String, DatastoreError> {
        Ok(query.explain(&self.mapper)?)
    }

    fn mapped(&self, ty: TypeId) -> Result<&MappedType, DatastoreError> {
        self.graph()
            .try_get(ty)
            .ok_or_else(|| DatastoreError::UnknownType(Name::from(ty.to_string())))
    }

    fn translate(&self, query: &Query) -> Result<StorageFilter, DatastoreError> {
        self.mapped(query.root())?;
        query.translate(&self.mapper).map_err(|err| {
            debug!("query rejected: {}", err);
            DatastoreError::from(err)
        })
    }

}

fn key_of(mapped: &MappedType, doc: &Document) -> Result<String, DatastoreError> {
    let id = mapped.identifier().storage_name();
    doc.get(id)
        .map(ToString::to_string)
        .ok_or_else(|| DatastoreError::MissingIdentifier {
            ty: mapped.name().clone(),
            field: id.clone(),
        })
}

/// Stored references must point into the collection their field targets.
fn check_references(
    graph: &MetadataGraph,
    mapped: &MappedType,
    doc: &Document,
) -> Result<(), DatastoreError> {
    for field in mapped.fields().values() {
        let Some(expected) = field.target() else {
            continue;
        };
        if let Some(Value::Ref(r)) = doc.get(field.storage_name()) {
            if r.collection != expected {
                let found = graph
                    .try_get(r.collection)
                    .map(|ty| ty.name().clone())
                    .unwrap_or_else(|| Name::from(r.collection.to_string()));
                return Err(DatastoreError::ReferenceTarget {
                    ty: mapped.name().clone(),
                    field: field.name().clone(),
                    expected: graph.get(expected).name().clone(),
                    found,
                });
            }
        }
    }
    Ok(())
}
