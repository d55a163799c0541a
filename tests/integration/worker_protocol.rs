//! JSON messages in, JSON responses out.

use serde_json::{json, Value};

use crate::common::*;

fn send(worker: &SearchWorker, message: Value) -> u64 {
    let command: Command =
        Command::from_json(&message.to_string()).expect("message should decode");
    worker.submit(command).expect("inbox has room")
}

fn receive(responses: &crossbeam_channel::Receiver<Response>) -> Value {
    let text = next(responses).to_json().expect("response should encode");
    serde_json::from_str(&text).unwrap()
}

#[test]
fn update_then_search_messages() {
    let (worker, responses) = spawn_worker();

    let update = send(
        &worker,
        json!({
            "action": "UPDATE_SEARCH_INDEX",
            "data": [
                {"id": 1, "path": "/a.flac", "tags": {"album": "A", "artist": "X", "title": "Song One"}},
                {"id": 2, "path": "/b.flac", "tags": {"album": "B", "artist": "Y", "title": "Song Two"}}
            ]
        }),
    );
    let search = send(&worker, json!({"action": "PERFORM_SEARCH", "data": "song *"}));

    assert_eq!(
        receive(&responses),
        json!({
            "request": update,
            "output": {"action": "UPDATE_SEARCH_INDEX", "data": {"generation": 1, "documents": 2}}
        })
    );
    assert_eq!(
        receive(&responses),
        json!({"request": search, "output": {"action": "PERFORM_SEARCH", "data": [1, 2]}})
    );
}

#[test]
fn serialized_collection_message() {
    let (worker, responses) = spawn_worker();
    let tracks = serde_json::to_string(&two_songs()).unwrap();

    send(&worker, json!({"action": "UPDATE_SEARCH_INDEX", "data": tracks}));
    send(&worker, json!({"action": "PERFORM_SEARCH", "data": "x"}));

    let _ = receive(&responses);
    assert_eq!(receive(&responses)["output"]["data"], json!([1]));
}

#[test]
fn decode_failure_message() {
    let (worker, responses) = spawn_worker();
    send(&worker, json!({"action": "UPDATE_SEARCH_INDEX", "data": "{oops"}));

    let response = receive(&responses);
    assert_eq!(response["output"]["action"], "ERROR");
    assert_eq!(response["output"]["data"]["kind"], "decode");
}

#[test]
fn null_collection_builds_empty_index() {
    let (worker, responses) = spawn_worker();
    send(&worker, json!({"action": "UPDATE_SEARCH_INDEX", "data": null}));
    send(&worker, json!({"action": "PERFORM_SEARCH", "data": "anything"}));

    assert_eq!(receive(&responses)["output"]["data"]["documents"], 0);
    assert_eq!(receive(&responses)["output"]["data"], json!([]));
}

#[test]
fn many_searches_answered_in_submission_order() {
    let (worker, responses) = spawn_worker();
    worker.update_index(synthetic_catalog(500)).unwrap();

    let queries = ["miles", "prince take 2", "album 3", "track 42", "nothing here"];
    let requests: Vec<u64> = queries
        .iter()
        .cycle()
        .take(100)
        .map(|q| worker.search(*q).unwrap())
        .collect();

    let _ = next(&responses);
    let answered: Vec<u64> = (0..requests.len()).map(|_| next(&responses).request).collect();
    assert_eq!(answered, requests);
}
