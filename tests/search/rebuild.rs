//! Index rebuilds: atomic swaps, failure isolation, staleness.

use crate::common::{make_record, write_store, STORE_JSON};
use orgsearch::{
    CorpusProvider, EngineConfig, Record, Result, SearchEngine, SearchError, SearchRequest,
    TableStore,
};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[test]
fn test_rebuild_picks_up_new_records() {
    let (_dir, path) = write_store(STORE_JSON);
    let engine = SearchEngine::new(TableStore::open(&path), EngineConfig::default()).unwrap();
    let before = engine.snapshot();

    let mut dump: orgsearch::TableDump = serde_json::from_str(STORE_JSON).unwrap();
    dump.organizations.push(make_record(4, "Hands of Hope", "mentoring"));
    fs::write(&path, serde_json::to_string(&dump).unwrap()).unwrap();
    assert!(engine.is_stale(&dump.join()));

    let after = engine.rebuild_index().unwrap();
    assert_eq!(after.len(), 4);
    assert!(after.version() > before.version());
    assert_eq!(before.len(), 3, "old snapshot must stay intact for its holders");
    assert!(!engine.is_stale(&dump.join()));

    let hits = engine.try_search(&SearchRequest::new("hands of hope")).unwrap();
    assert_eq!(hits[0].id, orgsearch::RecordId::Int(4));
}

#[test]
fn test_failed_rebuild_keeps_serving_old_snapshot() {
    let (_dir, path) = write_store(STORE_JSON);
    let engine = SearchEngine::new(TableStore::open(&path), EngineConfig::default()).unwrap();
    let version = engine.snapshot().version();

    fs::write(&path, r#"{"organizations": []}"#).unwrap();
    assert!(matches!(engine.rebuild_index(), Err(SearchError::DataUnavailable(_))));

    fs::remove_file(&path).unwrap();
    assert!(matches!(engine.rebuild_index(), Err(SearchError::DataUnavailable(_))));

    assert_eq!(engine.snapshot().version(), version);
    assert!(engine.search(&SearchRequest::new("hand")).is_success());
}

#[test]
fn test_empty_store_fails_construction() {
    let (_dir, path) = write_store(r#"{"organizations": []}"#);
    let result = SearchEngine::new(TableStore::open(&path), EngineConfig::default());
    assert!(matches!(result, Err(SearchError::DataUnavailable(_))));
}

#[test]
fn test_duplicate_ids_fail_rebuild() {
    let records = vec![make_record(1, "A", ""), make_record(1, "B", "")];
    let result = SearchEngine::new(records, EngineConfig::default());
    assert!(matches!(result, Err(SearchError::DuplicateRecordId(_))));
}

/// Alternates between two catalogs on every fetch.
struct Alternating {
    fetches: AtomicUsize,
}

const OLD_NAMES: [&str; 2] = ["Helping Hands", "Hand in Hand"];
const NEW_NAMES: [&str; 3] = ["Hands United", "Hand in Hand", "Handy Helpers"];

impl CorpusProvider for Alternating {
    fn fetch_all_records(&self) -> Result<Vec<Record>> {
        let names: &[&str] = if self.fetches.fetch_add(1, Ordering::SeqCst) % 2 == 0 {
            &OLD_NAMES
        } else {
            &NEW_NAMES
        };
        Ok(names
            .iter()
            .enumerate()
            .map(|(i, name)| Record::new(i as i64 + 1, *name))
            .collect())
    }
}

#[test]
fn test_concurrent_searches_see_whole_snapshots() {
    let provider = Alternating {
        fetches: AtomicUsize::new(0),
    };
    let engine = Arc::new(SearchEngine::new(provider, EngineConfig::default()).unwrap());

    let rebuilder = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || {
            for _ in 0..50 {
                engine.rebuild_index().unwrap();
            }
        })
    };

    let searchers: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for _ in 0..50 {
                    let response = engine.search(&SearchRequest::new("hand"));
                    assert!(response.is_success());
                    let titles: Vec<&str> =
                        response.results.iter().map(|hit| hit.title.as_str()).collect();
                    let old = titles.iter().all(|t| OLD_NAMES.contains(t));
                    let new = titles.iter().all(|t| NEW_NAMES.contains(t));
                    assert!(old || new, "mixed snapshot: {:?}", titles);
                    assert!(titles.len() == 2 || titles.len() == 3);
                }
            })
        })
        .collect();

    rebuilder.join().unwrap();
    for searcher in searchers {
        searcher.join().unwrap();
    }
}

#[test]
fn test_rebuild_of_unchanged_store_is_idempotent() {
    let (_dir, path) = write_store(STORE_JSON);
    let engine = SearchEngine::new(TableStore::open(&path), EngineConfig::default()).unwrap();
    let request = SearchRequest::new("helping hand");
    let before = engine.try_search(&request).unwrap();
    let fingerprint = engine.snapshot().fingerprint();

    engine.rebuild_index().unwrap();

    assert_eq!(engine.snapshot().fingerprint(), fingerprint);
    let after = engine.try_search(&request).unwrap();
    assert_eq!(before.len(), after.len());
    for (a, b) in before.iter().zip(&after) {
        assert_eq!(a.id, b.id);
        assert!((a.similarity - b.similarity).abs() < 1e-12);
    }
}

/// First fetch returns a large catalog, every later fetch a single record.
struct LargeThenSmall {
    fetches: AtomicUsize,
}

const LARGE_CATALOG: usize = 20_000;

impl CorpusProvider for LargeThenSmall {
    fn fetch_all_records(&self) -> Result<Vec<Record>> {
        if self.fetches.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok((0..LARGE_CATALOG as i64)
                .map(|i| make_record(i, &format!("Old Shelter {}", i), "emergency housing"))
                .collect())
        } else {
            Ok(vec![make_record(1, "Fresh Start", "job training")])
        }
    }
}

#[test]
fn test_overlapping_rebuilds_never_roll_back() {
    let provider = Arc::new(LargeThenSmall {
        fetches: AtomicUsize::new(0),
    });
    let engine = Arc::new(
        SearchEngine::new(
            SharedProvider(Arc::clone(&provider)),
            EngineConfig::default(),
        )
        .unwrap(),
    );
    assert_eq!(engine.snapshot().len(), LARGE_CATALOG);

    // The large catalog is fetched again by the slow rebuild below.
    provider.fetches.store(0, Ordering::SeqCst);
    let slow = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || engine.rebuild_index().unwrap().version())
    };
    while provider.fetches.load(Ordering::SeqCst) == 0 {
        thread::yield_now();
    }
    let fast = engine.rebuild_index().unwrap().version();
    let slow = slow.join().unwrap();

    let live = engine.snapshot();
    assert!(fast > slow, "later fetch must get the later version");
    assert_eq!(live.version(), fast);
    assert_eq!(live.len(), 1);
    let hits = engine.try_search(&SearchRequest::new("fresh start")).unwrap();
    assert_eq!(hits[0].title, "Fresh Start");
}

struct SharedProvider(Arc<LargeThenSmall>);

impl CorpusProvider for SharedProvider {
    fn fetch_all_records(&self) -> Result<Vec<Record>> {
        self.0.fetch_all_records()
    }
}
