//! Same snapshot, same request, same response.

use crate::common::{sample_engine, sample_records};
use orgsearch::{EngineConfig, SearchEngine, SearchRequest};

#[test]
fn test_repeated_search_is_identical() {
    let engine = sample_engine();
    for query in ["hand", "helping", "food pantry", "care"] {
        let request = SearchRequest::new(query).with_tags([2]);
        let first = engine.search(&request);
        for _ in 0..5 {
            assert_eq!(engine.search(&request), first);
        }
    }
}

#[test]
fn test_independent_builds_agree() {
    let a = SearchEngine::from_records(sample_records(), EngineConfig::default()).unwrap();
    let b = SearchEngine::from_records(sample_records(), EngineConfig::default()).unwrap();

    assert_eq!(a.snapshot().fingerprint(), b.snapshot().fingerprint());
    assert_eq!(a.snapshot().index().terms(), b.snapshot().index().terms());
    let request = SearchRequest::new("helping hand");
    assert_eq!(a.try_search(&request).unwrap(), b.try_search(&request).unwrap());
}
