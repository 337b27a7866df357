//! Resolution cache behaviour.
//!
//! Successful resolutions are published once and served afterwards; failed
//! resolutions leave nothing behind and fail identically every time.

use rstest::rstest;

use crate::helpers::fixtures::{ROOT, ROOT_GRAPH, type_id};
use docmap::resolve::CacheStats;
use docmap::{PathMapper, ResolverConfig};

#[test]
fn test_failure_is_recomputed_and_stable() {
    let mapper = PathMapper::new(ROOT_GRAPH.clone());
    let root = type_id(mapper.graph(), ROOT);

    let first = mapper.resolve(root, "ref.nope").unwrap_err();
    for attempt in 2..=4u64 {
        let again = mapper.resolve(root, "ref.nope").unwrap_err();
        assert_eq!(again, first);
        assert_eq!(mapper.cache_stats().misses, attempt);
    }

    assert!(!mapper.cache().contains(root, "ref.nope"));
    assert!(mapper.cache().is_empty());
    assert_eq!(mapper.cache_stats().inserts, 0);
    assert_eq!(mapper.cache_stats().hits, 0);
}

#[test]
fn test_failure_does_not_poison_neighbouring_paths() {
    let mapper = PathMapper::new(ROOT_GRAPH.clone());
    let root = type_id(mapper.graph(), ROOT);

    assert!(mapper.resolve(root, "ref.nope").is_err());
    assert_eq!(mapper.resolve(root, "ref.$id").unwrap(), ["ref", "_id"]);
    assert!(mapper.resolve(root, "ref.nope").is_err());
    assert_eq!(mapper.resolve(root, "ref").unwrap(), ["ref"]);
    assert_eq!(mapper.cache().len(), 2);
}

#[test]
fn test_success_served_from_cache() {
    let mapper = PathMapper::new(ROOT_GRAPH.clone());
    let root = type_id(mapper.graph(), ROOT);

    let first = mapper.resolve(root, "ref.id").unwrap();
    let second = mapper.resolve(root, "ref.id").unwrap();

    assert!(first.ptr_eq(&second));
    assert_eq!(
        mapper.cache_stats(),
        CacheStats {
            hits: 1,
            misses: 1,
            inserts: 1
        }
    );
}

#[rstest]
#[case(vec!["ref.$id", "ref.nope", "ref._id", "ref", "ref.nope", "ref.id"])]
#[case(vec!["ref.nope", "ref.nope", "ref", "ref.id", "ref.$id", "ref._id"])]
#[case(vec!["ref", "ref._id", "ref.id", "ref.$id", "ref.nope", "ref"])]
fn test_cached_matches_uncached_in_any_order(#[case] order: Vec<&str>) {
    let mapper = PathMapper::new(ROOT_GRAPH.clone());
    let root = type_id(mapper.graph(), ROOT);

    for _ in 0..2 {
        for path in &order {
            assert_eq!(
                mapper.resolve(root, path),
                mapper.resolve_uncached(root, path),
                "{path}"
            );
        }
    }
}

#[test]
fn test_cache_disabled_never_stores() {
    let config = ResolverConfig {
        cache_enabled: false,
        ..ResolverConfig::default()
    };
    let mapper = PathMapper::with_config(ROOT_GRAPH.clone(), config);
    let root = type_id(mapper.graph(), ROOT);

    assert_eq!(mapper.resolve(root, "ref.$id").unwrap(), ["ref", "_id"]);
    assert_eq!(mapper.resolve(root, "ref.$id").unwrap(), ["ref", "_id"]);
    assert!(mapper.cache().is_empty());
    assert_eq!(mapper.cache_stats(), CacheStats::default());
}

#[test]
fn test_caches_are_per_mapper() {
    let a = PathMapper::new(ROOT_GRAPH.clone());
    let b = PathMapper::new(ROOT_GRAPH.clone());
    let root = type_id(a.graph(), ROOT);

    a.resolve(root, "ref").unwrap();
    assert_eq!(a.cache().len(), 1);
    assert!(b.cache().is_empty());
}
