use digraph_adt::{Digraph, GraphError, History, SharedDigraph, VertexFault};
use std::sync::Barrier;
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_writers_keep_invariants() {
    let shared: SharedDigraph<u32, u32> = SharedDigraph::new();
    shared.write(|g| {
        for n in 0..16 {
            g.insert_vertex(n).unwrap();
        }
    });

    let threads = 4;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let shared = shared.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let mut inserted = 0;
                // Every thread races for the same pairs; each pair is won exactly once.
                for a in 0..16u32 {
                    for b in 0..16u32 {
                        if shared
                            .write(|g| g.insert_edge_between(&a, &b, a * 16 + b))
                            .is_ok()
                        {
                            inserted += 1;
                        }
                    }
                }
                inserted
            })
        })
        .collect();

    let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(total, 256);
    shared.read(|g| {
        assert_eq!(g.edge_count(), 256);
        assert_eq!(g.edges().count(), 256);
    });
}

#[test]
fn test_mixed_inserts_and_removals() {
    let shared: SharedDigraph<u32, ()> = SharedDigraph::new();
    let handles: Vec<_> = (0..4u32)
        .map(|t| {
            let shared = shared.clone();
            thread::spawn(move || {
                for i in 0..100 {
                    let payload = t * 1000 + i;
                    shared.write(|g| {
                        let v = g.insert_vertex(payload).unwrap();
                        if i % 2 == 0 {
                            g.remove_vertex(v).unwrap();
                        }
                    });
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let graph = shared.try_into_inner().unwrap();
    assert_eq!(graph.vertex_count(), 200);
    assert!(graph.vertices().all(|v| graph.vertex_payload(v).unwrap() % 2 == 1));
}

#[test]
fn test_shared_checkpoint_and_undo() {
    let shared = SharedDigraph::from(Digraph::<&str, u8>::new());
    let mut history = History::new();

    shared.checkpoint(&mut history);
    shared.write(|g| {
        let a = g.insert_vertex("a").unwrap();
        let b = g.insert_vertex("b").unwrap();
        g.insert_edge(a, b, 1).unwrap();
    });
    assert_eq!(shared.read(Digraph::edge_count), 1);

    let report = shared.undo(&mut history).unwrap().unwrap();
    assert_eq!(report.vertices_removed, 2);
    assert!(shared.read(Digraph::is_empty));
}

#[test]
fn test_errors_surface_through_wrapper() {
    let shared: SharedDigraph<u8, ()> = SharedDigraph::new();
    shared.write(|g| g.insert_vertex(1)).unwrap();
    assert_eq!(
        shared.write(|g| g.insert_vertex(1)).unwrap_err(),
        GraphError::InvalidVertex(VertexFault::Duplicate)
    );
}

#[test]
fn test_poisoned_lock_is_recovered() {
    let shared: SharedDigraph<u8, ()> = SharedDigraph::new();
    shared.write(|g| g.insert_vertex(1)).unwrap();

    let clone = shared.clone();
    let result = thread::spawn(move || {
        clone.write(|_| panic!("caller bug"));
    })
    .join();
    assert!(result.is_err());

    assert_eq!(shared.read(Digraph::vertex_count), 1);
}
