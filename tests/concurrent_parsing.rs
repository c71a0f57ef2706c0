//! Parsing from many threads through one shared registry

use handhistory::history::formats::FormatRegistry;
use handhistory::history::testing::samples;
use std::sync::Arc;
use std::thread;

#[test]
fn shared_registry_gives_identical_results() {
    let registry = FormatRegistry::default();
    let expected: Vec<_> = samples::ALL
        .iter()
        .map(|(_, source)| registry.parse(source))
        .collect();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    samples::ALL
                        .iter()
                        .map(|(_, source)| registry.parse(source))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn registry_moves_across_threads() {
    let registry = Arc::new(FormatRegistry::default());
    let workers: Vec<_> = samples::ALL
        .iter()
        .map(|(name, source)| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || (*name, registry.parse(source)))
        })
        .collect();

    for worker in workers {
        let (name, result) = worker.join().unwrap();
        assert!(result.is_ok(), "{name}: {:?}", result.err());
    }
}

#[test]
fn free_functions_are_thread_safe() {
    thread::scope(|scope| {
        for (name, source) in samples::ALL {
            scope.spawn(move || {
                let hand = handhistory::history::parse(source)
                    .unwrap_or_else(|e| panic!("{name}: {e}"));
                assert!(!hand.actions.is_empty());
            });
        }
    });
}
