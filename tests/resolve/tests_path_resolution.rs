//! Path resolution against mapped types.
//!
//! Covers identifier qualifiers after references, bare references, renamed
//! storage keys and every failure kind.

use rstest::rstest;

use crate::helpers::fixtures::{AUTHOR, BOOK, LIBRARY_GRAPH, REFERENCED, ROOT, ROOT_GRAPH, type_id};
use crate::helpers::resolution_assertions::{assert_resolves_to, assert_unresolvable};
use docmap::mapping::{EntityDecl, MetadataGraph};
use docmap::{PathMapper, ResolveErrorKind, describe};

fn root_mapper() -> PathMapper {
    PathMapper::new(ROOT_GRAPH.clone())
}

fn library_mapper() -> PathMapper {
    PathMapper::new(LIBRARY_GRAPH.clone())
}

// ============================================================================
// Reference identifiers
// ============================================================================

#[rstest]
#[case("ref.$id")]
#[case("ref._id")]
#[case("ref.id")]
fn test_identifier_qualifiers_resolve_alike(#[case] path: &str) {
    let mapper = root_mapper();
    let root = type_id(mapper.graph(), ROOT);
    assert_resolves_to(&mapper.resolve(root, path), &["ref", "_id"]);
}

#[test]
fn test_bare_reference_resolves_to_reference_field() {
    let mapper = root_mapper();
    let root = type_id(mapper.graph(), ROOT);
    let path = mapper.resolve(root, "ref").unwrap();
    assert_eq!(path, ["ref"]);
    assert!(!path.is_empty());
}

#[test]
fn test_unknown_field_after_reference() {
    let mapper = root_mapper();
    let root = type_id(mapper.graph(), ROOT);
    assert_unresolvable(&mapper.resolve(root, "ref.nope"), "nope", REFERENCED);
}

// ============================================================================
// Renamed storage keys
// ============================================================================

#[rstest]
#[case("isbn", &["_id"])]
#[case("_id", &["_id"])]
#[case("title", &["t"])]
#[case("t", &["t"])]
#[case("author", &["a"])]
#[case("author.$id", &["a", "k"])]
#[case("author.key", &["a", "k"])]
#[case("author.k", &["a", "k"])]
#[case("a.$id", &["a", "k"])]
#[case("editor.name", &["editor", "name"])]
#[case("author.mentor.$id", &["a", "mentor", "k"])]
#[case("author.mentor.mentor", &["a", "mentor", "mentor"])]
fn test_library_paths(#[case] path: &str, #[case] expected: &[&str]) {
    let mapper = library_mapper();
    let book = type_id(mapper.graph(), BOOK);
    assert_resolves_to(&mapper.resolve(book, path), expected);
}

#[rstest]
#[case("author._id", "_id")]
#[case("author.id", "id")]
#[case("editor._ID", "_ID")]
fn test_conventional_id_spellings_on_author(#[case] path: &str, #[case] segment: &str) {
    // Author stores its identifier as `key` / `k`.
    let mapper = library_mapper();
    let book = type_id(mapper.graph(), BOOK);
    let err = mapper.resolve(book, path).unwrap_err();
    assert_eq!(
        err.kind(),
        &ResolveErrorKind::InvalidIdentifierQualifier {
            segment: segment.into(),
            on: AUTHOR.into()
        }
    );
}

// ============================================================================
// Failures
// ============================================================================

#[rstest]
#[case("title.x", "x", BOOK)]
#[case("author.name.first", "first", AUTHOR)]
#[case("author.$id.x", "x", AUTHOR)]
#[case("author.key.$id", "$id", AUTHOR)]
fn test_path_continues_past_value(#[case] path: &str, #[case] segment: &str, #[case] on: &str) {
    let mapper = library_mapper();
    let book = type_id(mapper.graph(), BOOK);
    let err = mapper.resolve(book, path).unwrap_err();
    assert_eq!(
        err.kind(),
        &ResolveErrorKind::PathContinuesPastValue {
            segment: segment.into(),
            on: on.into()
        }
    );
}

#[rstest]
#[case("author.KEY")]
#[case("author.$ID")]
#[case("author.K")]
#[case("$id")]
fn test_invalid_identifier_qualifier(#[case] path: &str) {
    let mapper = library_mapper();
    let book = type_id(mapper.graph(), BOOK);
    let err = mapper.resolve(book, path).unwrap_err();
    assert!(
        matches!(err.kind(), ResolveErrorKind::InvalidIdentifierQualifier { .. }),
        "{path}: {:?}",
        err.kind()
    );
}

#[rstest]
#[case("")]
#[case(".")]
#[case("ref.")]
#[case(".ref")]
#[case("ref..$id")]
fn test_empty_path(#[case] path: &str) {
    let mapper = root_mapper();
    let root = type_id(mapper.graph(), ROOT);
    let err = mapper.resolve(root, path).unwrap_err();
    assert_eq!(err.kind(), &ResolveErrorKind::EmptyPath);
    assert_eq!(err.type_name(), ROOT);
}

#[test]
fn test_describe_names_path_root_and_segment() {
    let mapper = root_mapper();
    let root = type_id(mapper.graph(), ROOT);
    let err = mapper.resolve(root, "ref.nope").unwrap_err();
    assert_eq!(
        describe(&err),
        "Could not resolve path 'ref.nope' against 'com.foo.RootDocument'. Unknown path element: 'nope'."
    );
}

#[test]
fn test_unknown_root_field() {
    let mapper = root_mapper();
    let root = type_id(mapper.graph(), ROOT);
    let err = mapper.resolve(root, "owner.$id").unwrap_err();
    assert_eq!(
        describe(&err),
        "Could not resolve path 'owner.$id' against 'com.foo.RootDocument'. Unknown path element: 'owner'."
    );
    assert_eq!(err.type_name(), ROOT);
}

#[test]
fn test_type_from_another_graph_is_rejected() {
    let wider = MetadataGraph::build([
        EntityDecl::new("A").id("id"),
        EntityDecl::new("B").id("id"),
        EntityDecl::new("C").id("id"),
    ])
    .unwrap();
    let foreign = type_id(&wider, "C");
    let mapper = root_mapper();

    let err = mapper.resolve(foreign, "ref.$id").unwrap_err();
    assert_eq!(err.kind(), &ResolveErrorKind::UnknownRootType(foreign));
    assert_eq!(err.root(), "#2");
    assert!(mapper.cache().is_empty());
}
