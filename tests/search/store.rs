//! The JSON table store as an engine provider.

use crate::common::{ids, int_ids, write_store, STORE_JSON};
use orgsearch::{EngineConfig, SearchEngine, SearchRequest, TableStore, TagId};

fn engine() -> (tempfile::TempDir, SearchEngine) {
    let (dir, path) = write_store(STORE_JSON);
    let engine = SearchEngine::new(TableStore::open(path), EngineConfig::default()).unwrap();
    (dir, engine)
}

#[test]
fn test_search_over_store() {
    let (_dir, engine) = engine();
    let hits = engine.try_search(&SearchRequest::new("hand")).unwrap();

    assert_eq!(ids(&hits[..2]), int_ids(&[1, 2]));
    assert_eq!(hits[0].org_logo.as_deref(), Some("hh.png"));
    assert_eq!(hits[1].org_logo, None);
}

#[test]
fn test_null_description_is_searchable_as_empty() {
    let (_dir, engine) = engine();
    let clinic = engine
        .organizations()
        .into_iter()
        .find(|record| record.name == "River Clinic")
        .unwrap();
    assert_eq!(clinic.description, "");
}

#[test]
fn test_tag_filter_uses_joined_tags() {
    let (_dir, engine) = engine();
    let hits = engine.try_search(&SearchRequest::new("").with_tags([2])).unwrap();
    assert_eq!(ids(&hits), int_ids(&[1, 2]));
}

#[test]
fn test_listings() {
    let (_dir, engine) = engine();

    let organizations = engine.organizations();
    assert_eq!(organizations.len(), 3);
    assert_eq!(organizations[0].tag_names, vec!["Food", "Youth"]);

    let tags = engine.tags().unwrap();
    let tag_ids: Vec<TagId> = tags.iter().map(|tag| tag.id).collect();
    assert_eq!(tag_ids, vec![TagId(1), TagId(2), TagId(3)]);
}
