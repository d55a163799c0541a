//! Readers racing with rebuilds never observe a partially built generation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use tracksearch_core::Document;
use tracksearch_engine::{IndexManager, IndexState};
use tracksearch_search::QueryProcessor;

fn corpus(term: &str, n: i64) -> Vec<Document> {
    (0..n)
        .map(|i| Document::new(i, "Album", "Artist", format!("{} {}", term, i)))
        .collect()
}

#[test]
fn readers_see_whole_generations_only() {
    crate::common::init_tracing();

    const SMALL: i64 = 50;
    const LARGE: i64 = 2_000;

    let manager = Arc::new(IndexManager::new());
    manager.rebuild(corpus("alpha", SMALL));

    let stop = Arc::new(AtomicBool::new(false));
    let barrier = Arc::new(Barrier::new(5));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let manager = Arc::clone(&manager);
            let stop = Arc::clone(&stop);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let processor = QueryProcessor::default();
                barrier.wait();
                let mut observed = 0usize;
                while !stop.load(Ordering::Acquire) {
                    let generation = manager.current().expect("a generation is published");
                    let index = generation.index();
                    let alpha = processor.search("alpha", index).len();
                    let beta = processor.search("beta", index).len();

                    // Every document of a generation carries exactly one of the terms
                    match generation.total_docs() as i64 {
                        SMALL => assert_eq!((alpha, beta), (SMALL as usize, 0)),
                        LARGE => assert_eq!((alpha, beta), (0, LARGE as usize)),
                        other => panic!("unexpected generation size {}", other),
                    }
                    observed += 1;
                }
                observed
            })
        })
        .collect();

    barrier.wait();
    for round in 0..10 {
        if round % 2 == 0 {
            manager.rebuild(corpus("beta", LARGE));
        } else {
            manager.rebuild(corpus("alpha", SMALL));
        }
    }
    stop.store(true, Ordering::Release);

    for reader in readers {
        assert!(reader.join().expect("reader should not panic") > 0);
    }
    assert_eq!(manager.generations(), 11);
    assert_eq!(manager.state(), IndexState::Ready);
}

#[test]
fn held_generation_survives_replacement() {
    let manager = IndexManager::new();
    manager.rebuild(corpus("alpha", 10));
    let held = manager.current().unwrap();

    manager.rebuild(corpus("beta", 3));

    let processor = QueryProcessor::default();
    assert_eq!(processor.search("alpha", held.index()).len(), 10);
    assert!(processor
        .search("alpha", manager.current().unwrap().index())
        .is_empty());
}
