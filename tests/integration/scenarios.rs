//! Reference search behaviors, driven through the worker.

use crate::common::*;

#[test]
fn search_ranks_equal_scores_by_id() {
    let (worker, responses) = spawn_worker();
    worker.update_index(two_songs()).unwrap();
    worker.search("song").unwrap();

    let _ = next(&responses);
    assert_eq!(hits(next(&responses)), ids(&[1, 2]));
}

#[test]
fn search_with_trailing_wildcard() {
    let (worker, responses) = spawn_worker();
    worker.update_index(two_songs()).unwrap();
    worker.search("song *").unwrap();
    worker.search("two*").unwrap();

    let _ = next(&responses);
    assert_eq!(hits(next(&responses)), ids(&[1, 2]));
    assert_eq!(hits(next(&responses)), ids(&[2]));
}

#[test]
fn search_is_exact_not_prefix() {
    let (worker, responses) = spawn_worker();
    worker.update_index(two_songs()).unwrap();
    worker.search("son").unwrap();

    let _ = next(&responses);
    assert!(hits(next(&responses)).is_empty());
}

#[test]
fn search_before_first_rebuild_is_empty() {
    let (worker, responses) = spawn_worker();
    worker.search("song").unwrap();
    assert!(hits(next(&responses)).is_empty());
}

#[test]
fn empty_corpus_returns_nothing() {
    let (worker, responses) = spawn_worker();
    worker.update_index(Vec::<TrackRecord>::new()).unwrap();
    worker.search("song").unwrap();

    let rebuilt = next(&responses);
    assert_eq!(
        rebuilt.output,
        Output::UpdateSearchIndex(IndexSummary {
            generation: 1,
            documents: 0
        })
    );
    assert!(hits(next(&responses)).is_empty());
}

#[test]
fn malformed_rebuild_keeps_previous_generation() {
    let (worker, responses) = spawn_worker();
    worker.update_index(two_songs()).unwrap();
    worker.update_index("[{\"id\": 1, \"tags\": ").unwrap();
    worker.search("one").unwrap();

    let _ = next(&responses);
    let failed = next(&responses);
    assert!(matches!(failed.output, Output::Error(Error::Decode { .. })));
    assert_eq!(hits(next(&responses)), ids(&[1]));
}

#[test]
fn rebuild_replaces_collection() {
    let (worker, responses) = spawn_worker();
    worker.update_index(two_songs()).unwrap();
    worker
        .update_index(vec![TrackRecord::new(5, "Purple Rain", "Prince", "When Doves Cry")])
        .unwrap();
    worker.search("song").unwrap();
    worker.search("prince").unwrap();

    let _ = next(&responses);
    let second = next(&responses);
    assert_eq!(
        second.output,
        Output::UpdateSearchIndex(IndexSummary {
            generation: 2,
            documents: 1
        })
    );
    assert!(hits(next(&responses)).is_empty());
    assert_eq!(hits(next(&responses)), ids(&[5]));
}

#[test]
fn identical_rebuilds_rank_identically() {
    let (worker, responses) = spawn_worker();
    let catalog = synthetic_catalog(200);

    worker.update_index(catalog.clone()).unwrap();
    worker.search("nina take 3").unwrap();
    worker.update_index(catalog).unwrap();
    worker.search("nina take 3").unwrap();

    let _ = next(&responses);
    let first = hits(next(&responses));
    let _ = next(&responses);
    let second = hits(next(&responses));

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn matches_in_several_fields_rank_first() {
    let (worker, responses) = spawn_worker();
    worker
        .update_index(vec![
            TrackRecord::new(1, "Hits", "Prince", "Kiss"),
            TrackRecord::new(2, "Prince", "Prince", "Purple Rain"),
            TrackRecord::new(3, "Blue", "Joni Mitchell", "River"),
        ])
        .unwrap();
    worker.search("prince").unwrap();

    let _ = next(&responses);
    assert_eq!(hits(next(&responses)), ids(&[2, 1]));
}

#[test]
fn string_ids_round_trip() {
    let (worker, responses) = spawn_worker();
    worker
        .update_index(
            r#"[
                {"id": "track-b", "tags": {"title": "Autumn Leaves"}},
                {"id": "track-a", "tags": {"title": "Autumn Leaves"}}
            ]"#,
        )
        .unwrap();
    worker.search("autumn").unwrap();

    let _ = next(&responses);
    assert_eq!(
        hits(next(&responses)),
        vec![DocumentId::from("track-a"), DocumentId::from("track-b")]
    );
}
