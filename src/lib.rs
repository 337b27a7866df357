//! # docmap-core
//!
//! Path resolution and resolution caching for a document-mapping layer.
//!
//! Query filters name fields with logical, dot-separated paths such as
//! `ref.$id`. This crate resolves them against a graph of mapped types into
//! the storage paths the document store filters on, and caches the results
//! per (root type, path).
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! store     → In-memory Datastore owning the PathMapper (and its cache)
//!   ↓
//! query     → Filter / Query over logical paths, StorageFilter evaluation
//!   ↓
//! document  → Stored Value / Document / DocRef
//!   ↓
//! resolve   → Resolver, ResolutionCache, PathMapper, describe
//!   ↓
//! path      → tokenize, LogicalPath, StoragePath
//!   ↓
//! mapping   → Entity metadata graph (MappedType, FieldDescriptor)
//!   ↓
//! base      → Primitives (Name, TypeId, constants)
//! ```

// ============================================================================
// MODULES (dependency order: base → mapping → path → resolve → document → query → store)
// ============================================================================

/// Foundation types: Name, TypeId, constants
pub mod base;

/// Entity metadata graph: mapped types and their fields
pub mod mapping;

/// Logical path tokenizer and storage paths
pub mod path;

/// Path resolution with a failure-free cache
pub mod resolve;

/// Stored values and documents
pub mod document;

/// Filters and queries over logical paths
pub mod query;

/// In-memory datastore
pub mod store;

// Re-export the resolution surface
pub use base::{Name, TypeId};
pub use mapping::{EntityDecl, FieldDescriptor, FieldKind, MappedType, MetadataGraph};
pub use path::{LogicalPath, PathSegment, StoragePath, tokenize};
pub use resolve::{
    PathMapper, ResolutionCache, ResolutionError, ResolutionResult, ResolveErrorKind, Resolver,
    ResolverConfig, describe,
};
