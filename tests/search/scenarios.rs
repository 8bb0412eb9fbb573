//! End-to-end search scenarios against the sample catalog.

use crate::common::{engine_over, ids, int_ids, make_record, sample_engine};
use orgsearch::{SearchRequest, Status};

#[test]
fn test_name_substring_ranks_first_in_corpus_order() {
    let hits = sample_engine().try_search(&SearchRequest::new("hand")).unwrap();

    assert!(hits.len() >= 2);
    assert_eq!(ids(&hits[..2]), int_ids(&[1, 2]));
    assert_eq!(hits[0].similarity, 1.0);
    assert_eq!(hits[1].similarity, 1.0);
    assert!(hits[2..].iter().all(|hit| hit.similarity < 1.0));
}

#[test]
fn test_query_is_case_insensitive() {
    let engine = sample_engine();
    let lower = engine.try_search(&SearchRequest::new("hand")).unwrap();
    let upper = engine.try_search(&SearchRequest::new("HAND")).unwrap();
    assert_eq!(lower, upper);
}

#[test]
fn test_nonsense_query_is_empty_success() {
    let response = sample_engine().search(&SearchRequest::new("zzzznonexistent"));

    assert_eq!(response.status, Status::Success);
    assert!(response.results.is_empty());
    assert!(response.message.is_none());
    let debug = response.debug_info.unwrap();
    assert_eq!(debug.total_results, 0);
    assert_eq!(debug.raw_data_count, 5);
}

#[test]
fn test_empty_query_returns_everything_unranked() {
    let hits = sample_engine().try_search(&SearchRequest::new("")).unwrap();

    assert_eq!(ids(&hits), int_ids(&[1, 2, 3, 4, 5]));
    assert!(hits.iter().all(|hit| hit.similarity == 0.0));
}

#[test]
fn test_description_only_match_is_found() {
    let hits = sample_engine().try_search(&SearchRequest::new("shelter")).unwrap();
    assert_eq!(hits[0].id, orgsearch::RecordId::Int(2));
    assert!(hits[0].similarity > 0.0 && hits[0].similarity < 1.0);
}

#[test]
fn test_hits_carry_record_fields() {
    let hits = sample_engine().try_search(&SearchRequest::new("helping hands")).unwrap();
    let top = &hits[0];

    assert_eq!(top.kind, "organization");
    assert_eq!(top.title, "Helping Hands");
    assert_eq!(top.description, "food bank and pantry");
    assert_eq!(top.org_logo, None);
}

#[test]
fn test_response_json_shape() {
    let response = sample_engine().search(&SearchRequest::new("hand").with_tags([2]));
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["status"], "success");
    let first = &json["results"][0];
    for key in ["type", "id", "title", "description", "org_logo", "similarity"] {
        assert!(first.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(json["debug_info"]["query"], "hand");
    assert_eq!(json["debug_info"]["tag_ids"], serde_json::json!([2]));
    assert!(json.get("message").is_none());
}

#[test]
fn test_json_request_drives_search() {
    let request = SearchRequest::from_json(r#"{"query": "hand", "tagIds": "2"}"#).unwrap();
    let hits = sample_engine().try_search(&request).unwrap();
    assert_eq!(ids(&hits[..2]), int_ids(&[1, 2]));
}

#[test]
fn test_autocomplete() {
    let engine = sample_engine();
    let suggestions = engine.autocomplete("Hand");
    let names: Vec<&str> = suggestions.iter().map(|s| s.name.as_str()).collect();

    assert_eq!(names, vec!["Helping Hands", "Hand in Hand"]);
    assert!(engine.autocomplete("").is_empty());
    assert!(engine.autocomplete("zzzz").is_empty());
}

#[test]
fn test_two_record_tie_keeps_corpus_order() {
    let engine = crate::common::engine_over(vec![
        crate::common::make_record(1, "Helping Hands", "food bank"),
        crate::common::make_record(2, "Hand in Hand", "shelter"),
    ]);
    let hits = engine.try_search(&SearchRequest::new("hand")).unwrap();

    assert_eq!(ids(&hits), int_ids(&[1, 2]));
    assert!(hits.iter().all(|hit| hit.similarity == 1.0));
}

#[test]
fn test_malformed_body_is_error_response() {
    let engine = sample_engine();

    let response = engine.search_json(r#"{"query": "hand", "tagIds": ["one"]}"#);
    assert_eq!(response.status, Status::Error);
    assert!(response.results.is_empty());
    assert!(response.message.is_some());

    let response = engine.search_json(r#"{"query": "hand", "tagIds": [2]}"#);
    assert!(response.is_success());
}

#[test]
fn test_weak_lexical_match_below_threshold_is_dropped() {
    // Record 3 shares only "care" with the query, drowned out by thirty
    // words found nowhere else. Its name is long enough that fuzzy
    // scoring scales down too.
    let long_name = "Tulip Meadow Walnut Harbor Cobalt Pebble Tundra Falcon Ginger Hazel \
                     Juniper Kettle Lagoon Maple Nectar Oyster Parsley Radish Spruce Velvet \
                     Willow Marble Lantern Orchard Violin Saddle Zephyr Cedar Bramble Thistle Care";
    let engine = engine_over(vec![
        make_record(1, "Care Collective", "elder care"),
        make_record(2, "Home Helpers", "care at home"),
        make_record(3, long_name, ""),
    ]);
    let query = "care xq";

    let weak = engine
        .snapshot()
        .index()
        .query(query, 0.0)
        .into_iter()
        .find(|&(row, _)| row == 2)
        .map(|(_, similarity)| similarity)
        .unwrap();
    assert!(weak > 0.0 && weak < 0.15, "cosine {}", weak);

    let hits = engine.try_search(&SearchRequest::new(query)).unwrap();
    assert_eq!(ids(&hits), int_ids(&[1, 2]));
}
