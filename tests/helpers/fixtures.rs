//! Common metadata graphs for tests.

use std::sync::Arc;

use docmap::document::Document;
use docmap::mapping::{EntityDecl, MetadataGraph};
use docmap::store::Datastore;
use docmap::TypeId;
use once_cell::sync::Lazy;

pub const ROOT: &str = "com.foo.RootDocument";
pub const REFERENCED: &str = "com.foo.ReferenceDocument";
pub const AUTHOR: &str = "com.foo.Author";
pub const BOOK: &str = "com.foo.Book";

/// `RootDocument { @Id id, @Reference ref: ReferenceDocument }`.
pub static ROOT_GRAPH: Lazy<Arc<MetadataGraph>> = Lazy::new(|| {
    Arc::new(
        MetadataGraph::build([
            EntityDecl::new(ROOT).id("id").reference("ref", REFERENCED),
            EntityDecl::new(REFERENCED).id("id"),
        ])
        .expect("root graph is valid"),
    )
});

/// A richer graph: renamed storage keys, embedded values, chained references.
pub static LIBRARY_GRAPH: Lazy<Arc<MetadataGraph>> = Lazy::new(|| {
    Arc::new(
        MetadataGraph::build([
            EntityDecl::new(BOOK)
                .id_as("isbn", "_id")
                .value_as("title", "t")
                .reference_as("author", "a", AUTHOR)
                .reference("editor", AUTHOR),
            EntityDecl::new(AUTHOR)
                .id_as("key", "k")
                .value("name")
                .reference("mentor", AUTHOR),
        ])
        .expect("library graph is valid"),
    )
});

pub fn type_id(graph: &MetadataGraph, name: &str) -> TypeId {
    graph.type_named(name).expect("fixture type exists")
}

/// Datastore seeded like the reproducer: doc 1 -> ref 2, doc 4 -> ref 3.
pub fn seeded_root_store() -> Datastore {
    let store = Datastore::new(ROOT_GRAPH.clone());
    let root = type_id(store.graph(), ROOT);
    let referenced = type_id(store.graph(), REFERENCED);

    store
        .save(referenced, Document::new().with("_id", 3))
        .expect("save ref 3");
    let ref3 = store.reference(referenced, 3);
    store
        .save(root, Document::new().with("_id", 4).with("ref", ref3))
        .expect("save doc 4");

    store
        .save(referenced, Document::new().with("_id", 2))
        .expect("save ref 2");
    let ref2 = store.reference(referenced, 2);
    store
        .save(root, Document::new().with("_id", 1).with("ref", ref2))
        .expect("save doc 1");

    store
}
